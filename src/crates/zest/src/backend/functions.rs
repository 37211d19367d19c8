//! Edge function invocation

use super::{read_json, BackendClient};
use crate::error::{Result, ZestError};
use crate::models::Session;
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    text: Option<String>,
}

impl BackendClient {
    /// Send one message to the chat function and return the reply text.
    ///
    /// The request is authorized with the session's token when there is one
    /// and with the anon key otherwise.
    pub async fn invoke_chat(&self, function: &str, session: Option<&Session>, message: &str) -> Result<String> {
        if message.trim().is_empty() {
            return Err(ZestError::InvalidInput("Message cannot be empty".to_string()));
        }

        let req = self
            .request(Method::POST, &self.functions_url(function), session)
            .json(&ChatRequest { message });

        let response = self.send(req).await?;
        let reply: ChatReply = read_json(response, "Chat function failed").await?;

        reply
            .text
            .filter(|text| !text.is_empty())
            .ok_or_else(|| ZestError::Decode("Chat function returned no text".to_string()))
    }
}

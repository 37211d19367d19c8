//! PostgREST table access

use super::{read_body, read_json, BackendClient};
use crate::error::Result;
use crate::models::Session;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Select clause that embeds the owning workflow's name in each task row
pub const JOINED_TASK_SELECT: &str = "*,workflows(name)";

/// A column filter, sent as `column=eq.value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    column: &'static str,
    value: String,
}

impl Filter {
    pub fn eq(column: &'static str, value: impl Into<String>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }

    fn to_query(&self) -> (String, String) {
        (self.column.to_string(), format!("eq.{}", self.value))
    }
}

fn query_params(select: Option<&str>, filters: &[Filter]) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = filters.iter().map(Filter::to_query).collect();
    if let Some(select) = select {
        params.push(("select".to_string(), select.to_string()));
    }
    params
}

impl BackendClient {
    /// `GET /rest/v1/{table}?select=...&col=eq.val`
    pub async fn select<T: DeserializeOwned>(
        &self,
        session: &Session,
        table: &str,
        select: &str,
        filters: &[Filter],
    ) -> Result<Vec<T>> {
        let req = self
            .request(Method::GET, &self.rest_url(table), Some(session))
            .query(&query_params(Some(select), filters));

        let response = self.send(req).await?;
        read_json(response, &format!("Failed to select from {}", table)).await
    }

    /// `POST /rest/v1/{table}` returning the inserted rows
    pub async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        session: &Session,
        table: &str,
        rows: &B,
        select: &str,
    ) -> Result<Vec<T>> {
        let req = self
            .request(Method::POST, &self.rest_url(table), Some(session))
            .header("Prefer", "return=representation")
            .query(&query_params(Some(select), &[]))
            .json(rows);

        let response = self.send(req).await?;
        read_json(response, &format!("Failed to insert into {}", table)).await
    }

    /// `POST /rest/v1/{table}` without reading rows back
    pub async fn insert_minimal<B: Serialize + ?Sized>(
        &self,
        session: &Session,
        table: &str,
        rows: &B,
    ) -> Result<()> {
        let req = self
            .request(Method::POST, &self.rest_url(table), Some(session))
            .header("Prefer", "return=minimal")
            .json(rows);

        let response = self.send(req).await?;
        read_body(response, &format!("Failed to insert into {}", table)).await?;
        Ok(())
    }

    /// `PATCH /rest/v1/{table}?col=eq.val` returning the updated rows
    pub async fn update<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        session: &Session,
        table: &str,
        changes: &B,
        filters: &[Filter],
        select: &str,
    ) -> Result<Vec<T>> {
        let req = self
            .request(Method::PATCH, &self.rest_url(table), Some(session))
            .header("Prefer", "return=representation")
            .query(&query_params(Some(select), filters))
            .json(changes);

        let response = self.send(req).await?;
        read_json(response, &format!("Failed to update {}", table)).await
    }

    /// `PATCH /rest/v1/{table}?col=eq.val` without reading rows back.
    ///
    /// Matching no rows is not an error.
    pub async fn update_minimal<B: Serialize + ?Sized>(
        &self,
        session: &Session,
        table: &str,
        changes: &B,
        filters: &[Filter],
    ) -> Result<()> {
        let req = self
            .request(Method::PATCH, &self.rest_url(table), Some(session))
            .header("Prefer", "return=minimal")
            .query(&query_params(None, filters))
            .json(changes);

        let response = self.send(req).await?;
        read_body(response, &format!("Failed to update {}", table)).await?;
        Ok(())
    }

    /// `DELETE /rest/v1/{table}?col=eq.val`
    pub async fn delete(&self, session: &Session, table: &str, filters: &[Filter]) -> Result<()> {
        let req = self
            .request(Method::DELETE, &self.rest_url(table), Some(session))
            .query(&query_params(None, filters));

        let response = self.send(req).await?;
        read_body(response, &format!("Failed to delete from {}", table)).await?;
        Ok(())
    }
}

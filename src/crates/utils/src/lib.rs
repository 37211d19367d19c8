//! Helpers shared by the zest crates.
//!
//! - [`client`]: a `reqwest` client with default headers and a timeout baked
//!   in, sending each request once
//! - [`config`]: environment lookups, `${VAR}` expansion and TOML/YAML/JSON
//!   file loading
//!
//! Both modules sit behind cargo features of the same name, enabled by
//! default.

pub mod error;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "config")]
pub mod config;

pub use error::{Result, UtilsError};

#[cfg(feature = "client")]
pub use client::{AuthHelper, ClientConfig, HttpClient};

#[cfg(feature = "config")]
pub use config::{
    expand_env_var, get_env, load_config_file, parse_env_with, ConfigFormat,
};

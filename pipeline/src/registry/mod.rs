//! Chain registry loading.
//!
//! The registry is the authoritative list of chains and their static
//! metadata, served as rows of string cells by a spreadsheet-backed
//! endpoint. This module defines the generic [`RegistrySource`] seam and
//! a concrete HTTP implementation ([`http::HttpRegistrySource`]).
//!
//! A registry failure is fatal to the whole pipeline: with no rows there
//! is nothing to enrich or aggregate.

use std::fmt;

use async_trait::async_trait;

use crate::types::ChainRecord;

pub mod http;

pub use http::HttpRegistrySource;

/// Errors that can occur while loading the registry.
#[derive(Debug)]
pub enum RegistryError {
    /// Transport-level error (e.g. connection failure, timeout).
    Transport(String),
    /// The endpoint returned a non-success HTTP status.
    Service(String),
    /// The payload was malformed or missing the expected tabular shape.
    Protocol(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Transport(msg) => write!(f, "registry transport error: {msg}"),
            RegistryError::Service(msg) => write!(f, "registry service error: {msg}"),
            RegistryError::Protocol(msg) => write!(f, "registry protocol error: {msg}"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Abstract registry source used by the pipeline engine.
///
/// Implementations fetch the raw tabular payload and normalise it into one
/// [`ChainRecord`] per row, preserving source row order (the registry's
/// canonical order, used downstream as a stable tie-break).
#[async_trait]
pub trait RegistrySource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<ChainRecord>, RegistryError>;
}

//! Request-level error taxonomy shared by every endpoint.
//!
//! Each variant corresponds to one HTTP status family, so callers that do sit
//! behind a web framework can translate an error with [`ApiError::status`]
//! without inspecting the message.

use thiserror::Error;

use crate::framework::FrameworkError;

/// The error surface of [`LittleLemonApi`](crate::api::LittleLemonApi).
///
/// Authorization failures always take precedence over validation failures,
/// with one documented exception: placing an order from an empty cart is
/// reported as [`ApiError::InvalidInput`] even though the caller was already
/// authorized.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The caller could not be resolved to a known account (401).
    #[error("Authentication credentials were not provided.")]
    NotAuthenticated,

    /// The caller is authenticated but not allowed to do this (403).
    #[error("{0}")]
    PermissionDenied(String),

    /// Unknown resource, or one outside the caller's visibility scope (404).
    #[error("{0}")]
    NotFound(String),

    /// Malformed or rejected input (400).
    #[error("{0}")]
    InvalidInput(String),

    /// Actor communication failure; no partial state was committed (500).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// The HTTP status code this error maps to.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::NotAuthenticated => 401,
            ApiError::PermissionDenied(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::InvalidInput(_) => 400,
            ApiError::Internal(_) => 500,
        }
    }
}

impl From<FrameworkError> for ApiError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(msg) => ApiError::NotFound(msg),
            FrameworkError::Duplicate(msg) | FrameworkError::Invalid(msg) => {
                ApiError::InvalidInput(msg)
            }
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}

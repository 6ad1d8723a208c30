use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Raised when a backend rejects a credential set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("credentials validate failed: {0}")]
pub struct CredentialsValidateFailedError(pub String);

/// Unified, cross-provider error categories the host applies retry and
/// surfacing policy to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvokeErrorKind {
    Connection,
    ServerUnavailable,
    RateLimit,
    Authorization,
    BadRequest,
    /// Backend error with no mapping entry.
    Unknown,
}

impl InvokeErrorKind {
    /// Categories that may appear as keys of an [`InvokeErrorMapping`].
    pub const MAPPABLE: [InvokeErrorKind; 5] = [
        InvokeErrorKind::Connection,
        InvokeErrorKind::ServerUnavailable,
        InvokeErrorKind::RateLimit,
        InvokeErrorKind::Authorization,
        InvokeErrorKind::BadRequest,
    ];

    pub fn description(self) -> &'static str {
        match self {
            InvokeErrorKind::Connection => "Connection Error",
            InvokeErrorKind::ServerUnavailable => "Server Unavailable Error",
            InvokeErrorKind::RateLimit => "Rate Limit Error",
            InvokeErrorKind::Authorization => {
                "Incorrect model credentials provided, please check and try again."
            }
            InvokeErrorKind::BadRequest => "Bad Request Error",
            InvokeErrorKind::Unknown => "Error",
        }
    }
}

impl fmt::Display for InvokeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A backend failure translated into a unified category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{description}")]
pub struct InvokeError {
    pub kind: InvokeErrorKind,
    pub description: String,
}

impl InvokeError {
    pub fn new(kind: InvokeErrorKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }
}

/// Unified category -> backend error kinds translated into it.
pub type InvokeErrorMapping<K> = BTreeMap<InvokeErrorKind, Vec<K>>;

/// Errors a model backend raises, before the host translates them.
pub trait BackendError: std::error::Error + Send + Sync + 'static {
    type Kind: PartialEq + Copy + fmt::Debug;

    fn kind(&self) -> Self::Kind;
}

/// Finds the unified error for `err`, scanning categories in declaration order.
pub fn transform<E: BackendError>(
    provider: &str,
    mapping: &InvokeErrorMapping<E::Kind>,
    err: &E,
) -> InvokeError {
    let kind = err.kind();
    match mapping
        .iter()
        .find(|(_, kinds)| kinds.contains(&kind))
        .map(|(category, _)| *category)
    {
        Some(category) => InvokeError::new(
            category,
            format!("[{provider}] {}, {err}", category.description()),
        ),
        None => InvokeError::new(InvokeErrorKind::Unknown, format!("[{provider}] Error: {err}")),
    }
}

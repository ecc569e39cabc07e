//! REST client seam for the FortiOS management API
//!
//! The transport itself lives outside this crate. The provider only shapes
//! request bodies and consumes response bodies through this trait.

use async_trait::async_trait;
use fortiform_core::mapper::WireObject;
use thiserror::Error;

/// Errors reported by a FortiOS REST client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, TLS or timeout failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Per-request settings sent alongside every call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Administrative domain (vdom) the request is scoped to
    pub vdom: Option<String>,
    /// Number of attempts the client may make
    pub retries: u32,
}

impl RequestOptions {
    pub fn new(retries: u32) -> Self {
        Self {
            vdom: None,
            retries,
        }
    }

    pub fn with_vdom(mut self, vdom: Option<String>) -> Self {
        self.vdom = vdom.filter(|v| !v.is_empty());
        self
    }
}

/// CRUD interface over one FortiOS REST endpoint family
///
/// `path` is the CMDB path of the resource kind (e.g. "firewall/proxy-policy")
/// and `mkey` the object's primary key.
#[async_trait]
pub trait FortiosClient: Send + Sync {
    /// Create an object; the response usually carries its `mkey`
    async fn create(
        &self,
        path: &str,
        object: WireObject,
        opts: &RequestOptions,
    ) -> ClientResult<WireObject>;

    /// Read an object
    ///
    /// Returns `None` if the object does not exist
    async fn read(
        &self,
        path: &str,
        mkey: &str,
        opts: &RequestOptions,
    ) -> ClientResult<Option<WireObject>>;

    /// Update an object in place; fields missing from `object` stay untouched
    async fn update(
        &self,
        path: &str,
        object: WireObject,
        mkey: &str,
        opts: &RequestOptions,
    ) -> ClientResult<WireObject>;

    /// Delete an object
    async fn delete(&self, path: &str, mkey: &str, opts: &RequestOptions) -> ClientResult<()>;
}

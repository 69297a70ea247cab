//! # Ignition API Client
//!
//! Async client for the Ignition gateway configuration REST API
//! (`/data/api/v1`).
//!
//! ## Request path
//!
//! Every verb on [`GatewayClient`] runs under a [`CallContext`], goes through
//! one retrying transport that authenticates with the
//! [`TOKEN_HEADER`] header, and decodes the reply
//! into a [`ResourceEnvelope`](ignition_api_model::ResourceEnvelope), a
//! [`Project`](ignition_api_model::Project) or a
//! [`Secret`](ignition_api_model::Secret).
//!
//! ## Failure model
//!
//! - Transport errors, 429 and 5xx are retried per [`RetryConfig`]
//! - Other non-2xx replies surface as [`ClientError::Api`] or
//!   [`ClientError::Status`]
//! - Cancellation and deadlines surface from the [`CallContext`]
//!
//! ```no_run
//! use ignition_api_client::{CallContext, GatewayClient};
//! use ignition_api_client::model::kinds::DatabaseConnection;
//!
//! # async fn run() -> Result<(), ignition_api_client::ClientError> {
//! let client = GatewayClient::connect("https://gateway.local:8043", "token", false)?;
//! let db = client
//!     .get::<DatabaseConnection>(&CallContext::background(), "main-db")
//!     .await?;
//! println!("{} ({})", db.name, db.signature);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod context;
mod decode;
pub mod encoding;
mod encryption;
pub mod error;
pub mod projects;
mod redundancy;
mod resources;
pub mod retry;
mod transport;

pub use client::{GatewayClient, GatewayClientConfig};
pub use context::CallContext;
pub use error::{ClientError, ErrorKind};
pub use ignition_api_model as model;
pub use retry::RetryConfig;
pub use transport::TOKEN_HEADER;

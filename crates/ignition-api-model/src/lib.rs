//! # Ignition API Model
//!
//! Wire types for the Ignition gateway configuration REST API.
//!
//! ## Envelopes
//!
//! Every configurable resource travels inside a [`ResourceEnvelope`] that is
//! generic over its kind-specific `config` payload. The payload is opaque to
//! the transport; [`kinds`] supplies typed payloads for the resource kinds the
//! gateway ships with, each tied to its `(module, type)` address through the
//! [`ResourceKind`] trait.
//!
//! ## Replies
//!
//! Mutations may answer with a [`ChangeSet`] instead of the envelope, and
//! failures carry an [`ApiErrorBody`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod envelope;
pub mod error_body;
pub mod kinds;
pub mod project;
pub mod secret;

pub use envelope::{ChangeRecord, ChangeSet, ResourceEnvelope, DEFAULT_MODULE};
pub use error_body::{ApiErrorBody, FieldMessages, Problem};
pub use kinds::ResourceKind;
pub use project::Project;
pub use secret::{Secret, SecretKind};

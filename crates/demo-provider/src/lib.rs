//! Provider layer for the demo record store.
//!
//! Turns provider configuration into exactly one storage backend and drives
//! the `foo` resource lifecycle on top of it.
//!
//! # Modules
//!
//! - [`config`] -- [`ProviderConfig`] with its mutually exclusive
//!   `filesystem` / `jsonserver` blocks
//! - [`provider`] -- [`Provider`], which validates the config and selects the
//!   backend once
//! - [`resource`] -- the typed [`FooResource`] and its expand/flatten model
//! - [`error`] -- [`ProviderError`]

pub mod config;
pub mod error;
pub mod provider;
pub mod resource;

pub use config::{FilesystemConfig, JsonServerConfig, ProviderConfig};
pub use error::{ProviderError, Result};
pub use provider::{BackendKind, Provider};
pub use resource::{FooModel, FooResource, FooState, NestedBlock};

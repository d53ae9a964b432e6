//! Record storage clients for the demo provider.
//!
//! A record is an opaque byte payload addressed by an opaque string
//! identifier. The provider never looks inside a record; it only needs a
//! place to put it and a way to get it back.
//!
//! # Backends
//!
//! All backends implement the [`Client`] trait:
//!
//! - [`FsClient`] -- one file per record in a flat directory, named by a
//!   random UUID
//! - [`JsonServerClient`] -- REST calls against a json-server style service
//!   that assigns numeric identifiers
//!
//! # Contract
//!
//! 1. An identifier returned by `create` resolves to the bytes last written
//!    until it is deleted.
//! 2. `read` on an absent identifier returns [`ClientError::NotFound`].
//! 3. `update` replaces the payload wholesale. There is no merge.
//! 4. Identifiers are only meaningful to the backend instance that issued
//!    them.
//! 5. Operations are blocking and never retried internally.

pub mod error;
pub mod fs;
pub mod jsonserver;
pub mod traits;

pub use error::{ClientError, ClientResult};
pub use fs::FsClient;
pub use jsonserver::JsonServerClient;
pub use traits::Client;

//! The `foo` resource.
//!
//! A `foo` is a bag of optional attributes stored as one JSON record. Unset
//! attributes are left out of the payload and missing keys read back as
//! unset, so a record round-trips through either backend unchanged. Extra
//! keys in a stored record (json-server echoes `id`) are ignored.

use std::sync::Arc;

use demo_client::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProviderError, Result};

/// One element of `list_nested_block` / `set_nested_block`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NestedBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
}

/// Attributes of a `foo` resource.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FooModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub int64: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub float64: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<f64>,
    #[serde(rename = "bool", default, skip_serializing_if = "Option::is_none")]
    pub boolean: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_nested_block: Option<Vec<NestedBlock>>,
    /// Element order carries no meaning.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_nested_block: Option<Vec<NestedBlock>>,
}

impl FooModel {
    /// Encode as the JSON record payload.
    pub fn expand(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| ProviderError::Serialization(format!("encoding request: {e}")))
    }

    /// Decode a stored JSON record payload.
    pub fn flatten(payload: &[u8]) -> Result<Self> {
        serde_json::from_slice(payload)
            .map_err(|e| ProviderError::Serialization(format!("decoding response: {e}")))
    }
}

/// A `foo` as tracked in state: its backend identifier plus attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct FooState {
    pub id: String,
    pub model: FooModel,
}

/// Lifecycle of `foo` resources against one backend.
#[derive(Clone)]
pub struct FooResource {
    client: Arc<dyn Client>,
}

impl FooResource {
    pub fn new(client: Arc<dyn Client>) -> Self {
        Self { client }
    }

    /// Resource type name under the given provider, e.g. `demo_foo`.
    pub fn type_name(provider: &str) -> String {
        format!("{provider}_foo")
    }

    /// Create the record, then read it back as the new state.
    pub fn create(&self, plan: &FooModel) -> Result<FooState> {
        let payload = plan.expand()?;
        let id = self
            .client
            .create(&payload)
            .map_err(|e| ProviderError::client("Creation", e))?;
        debug!(%id, "created foo");
        self.read_existing(&id)
    }

    /// Current state of `id`, or `None` if the record no longer exists and
    /// should be dropped from state.
    pub fn read(&self, id: &str) -> Result<Option<FooState>> {
        let payload = match self.client.read(id) {
            Ok(payload) => payload,
            Err(e) if e.is_not_found() => {
                debug!(%id, "foo is gone, removing from state");
                return Ok(None);
            }
            Err(e) => return Err(ProviderError::client("Read", e)),
        };
        let model = FooModel::flatten(&payload)?;
        Ok(Some(FooState {
            id: id.to_string(),
            model,
        }))
    }

    /// Replace the record wholesale, then read it back.
    pub fn update(&self, id: &str, plan: &FooModel) -> Result<FooState> {
        let payload = plan.expand()?;
        self.client
            .update(id, &payload)
            .map_err(|e| ProviderError::client("Update", e))?;
        debug!(%id, "updated foo");
        self.read_existing(id)
    }

    /// Delete the record. A record that is already gone counts as deleted.
    pub fn delete(&self, id: &str) -> Result<()> {
        match self.client.delete(id) {
            Ok(()) => {
                debug!(%id, "deleted foo");
                Ok(())
            }
            Err(e) if e.is_not_found() => Ok(()),
            Err(e) => Err(ProviderError::client("Delete", e)),
        }
    }

    /// Import an existing record by id.
    pub fn import(&self, id: &str) -> Result<FooState> {
        self.read_existing(id)
    }

    fn read_existing(&self, id: &str) -> Result<FooState> {
        self.read(id)?.ok_or_else(|| ProviderError::Missing { id: id.to_string() })
    }
}

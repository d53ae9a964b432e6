use std::fmt;
use std::sync::Arc;

use demo_client::{Client, FsClient, JsonServerClient};
use tracing::info;

use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};
use crate::resource::FooResource;

/// Which backend a configured provider talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendKind {
    Filesystem,
    JsonServer,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filesystem => write!(f, "filesystem"),
            Self::JsonServer => write!(f, "jsonserver"),
        }
    }
}

impl ProviderConfig {
    /// The backend this configuration selects. Fails if it is not valid.
    pub fn backend_kind(&self) -> Result<BackendKind> {
        self.validate()?;
        Ok(if self.filesystem.is_some() {
            BackendKind::Filesystem
        } else {
            BackendKind::JsonServer
        })
    }

    /// Validate, then construct exactly one backend client.
    pub fn build_client(&self) -> Result<Arc<dyn Client>> {
        self.validate()?;
        if let Some(fs) = &self.filesystem {
            let client = FsClient::new(&fs.workdir).map_err(|source| ProviderError::Backend {
                backend: "filesystem",
                source,
            })?;
            return Ok(Arc::new(client));
        }
        if let Some(js) = &self.jsonserver {
            let client = match js.timeout() {
                Some(timeout) => JsonServerClient::with_timeout(&js.url, timeout),
                None => JsonServerClient::new(&js.url),
            }
            .map_err(|source| ProviderError::Backend {
                backend: "jsonserver",
                source,
            })?;
            return Ok(Arc::new(client));
        }
        Err(ProviderError::Config("no backend configured".into()))
    }
}

/// A configured provider: one backend, selected once and never switched.
#[derive(Clone)]
pub struct Provider {
    kind: BackendKind,
    client: Arc<dyn Client>,
}

impl Provider {
    pub const TYPE_NAME: &'static str = "demo";

    /// Validate `config` and construct its backend.
    pub fn configure(config: &ProviderConfig) -> Result<Self> {
        let kind = config.backend_kind()?;
        let client = config.build_client()?;
        info!(backend = %kind, "configured provider");
        Ok(Self { kind, client })
    }

    /// Wrap an already constructed backend.
    pub fn with_client(kind: BackendKind, client: Arc<dyn Client>) -> Self {
        Self { kind, client }
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.kind
    }

    pub fn client(&self) -> &Arc<dyn Client> {
        &self.client
    }

    /// Names of the resource types this provider manages.
    pub fn resources(&self) -> Vec<String> {
        vec![FooResource::type_name(Self::TYPE_NAME)]
    }

    pub fn foo(&self) -> FooResource {
        FooResource::new(self.client.clone())
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider").field("kind", &self.kind).finish()
    }
}

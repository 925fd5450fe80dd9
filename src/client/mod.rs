//! Pwinty API client
//!
//! ```text
//!   PwintyClient ──► orders() / countries() / catalogue()
//!                                │
//!                            Dispatcher ──► HttpTransport
//! ```
//!
//! The client is cheap to clone and safe to share between tasks; clones use
//! the same dispatcher.

pub mod dispatcher;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;
use tracing::info;

use crate::config::ClientSettings;
use crate::error::PwintyResult;
use crate::resources::{Catalogue, Countries, Orders};
use crate::transport::{HttpTransport, ReqwestTransport};

pub use dispatcher::Dispatcher;

/// Entry point for all API calls
#[derive(Debug, Clone)]
pub struct PwintyClient {
    dispatcher: Arc<Dispatcher>,
}

impl PwintyClient {
    /// Create a client over the default reqwest transport
    pub fn new(settings: &ClientSettings) -> PwintyResult<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(settings, Arc::new(transport)))
    }

    /// Create a client from config files and `PWINTY_*` environment variables.
    ///
    /// Missing credentials are reported by the first request, not here.
    pub fn from_env() -> PwintyResult<Self> {
        let settings = ClientSettings::load()?;
        Self::new(&settings)
    }

    /// Create a client over any transport
    pub fn with_transport(settings: &ClientSettings, transport: Arc<dyn HttpTransport>) -> Self {
        let dispatcher = Dispatcher::new(settings, transport);
        info!(base_url = dispatcher.base_url(), "Pwinty client initialised");

        PwintyClient {
            dispatcher: Arc::new(dispatcher),
        }
    }

    pub fn base_url(&self) -> &str {
        self.dispatcher.base_url()
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders::new(&self.dispatcher)
    }

    pub fn countries(&self) -> Countries<'_> {
        Countries::new(&self.dispatcher)
    }

    pub fn catalogue(&self) -> Catalogue<'_> {
        Catalogue::new(&self.dispatcher)
    }
}

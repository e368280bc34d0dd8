use std::sync::Arc;

use tracing::{debug, info};

use crate::config::LibraryConfig;
use crate::contract::client::LibraryApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::LibraryLocalClient;
use crate::infra::events::TracingEventPublisher;
use crate::infra::storage::InMemoryLedgerStore;

/// Name of the module's section in the application config bag.
pub const MODULE_NAME: &str = "library_ledger";

/// Wired ledger: one record store, one service, one local client.
///
/// Each instance owns an independent store.
#[derive(Clone)]
pub struct LibraryLedger {
    store: Arc<InMemoryLedgerStore>,
    service: Arc<Service>,
    client: Arc<dyn LibraryApi>,
}

impl LibraryLedger {
    pub fn init(cfg: &LibraryConfig) -> Self {
        info!("Initializing library_ledger module");
        debug!(
            "Loaded library_ledger config: max_name_length={:?}",
            cfg.max_name_length
        );

        // Wire repository (infra) to domain service (port)
        let store = Arc::new(InMemoryLedgerStore::new());
        let service = Arc::new(Service::new(
            store.clone(),
            Arc::new(TracingEventPublisher),
            ServiceConfig::from(cfg),
        ));

        let client: Arc<dyn LibraryApi> = Arc::new(LibraryLocalClient::new(service.clone()));
        info!("library_ledger API ready");

        Self {
            store,
            service,
            client,
        }
    }

    pub fn client(&self) -> Arc<dyn LibraryApi> {
        self.client.clone()
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn store(&self) -> Arc<InMemoryLedgerStore> {
        self.store.clone()
    }
}

impl Default for LibraryLedger {
    fn default() -> Self {
        Self::init(&LibraryConfig::default())
    }
}

use std::sync::Arc;

use crate::board::ReviewBoard;
use crate::directory::AccountDirectory;
use crate::earnings::EarningsAggregator;
use crate::error::CoreError;
use crate::ledger::ApplicationLedger;
use crate::registry::JobRegistry;
use crate::store::Store;

/// The domain components sharing one store.
#[derive(Clone)]
pub struct Marketplace {
    pub accounts: AccountDirectory,
    pub jobs: JobRegistry,
    pub applications: ApplicationLedger,
    pub earnings: EarningsAggregator,
    pub reviews: ReviewBoard,
    store: Arc<dyn Store>,
}

impl Marketplace {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            accounts: AccountDirectory::new(Arc::clone(&store)),
            jobs: JobRegistry::new(Arc::clone(&store)),
            applications: ApplicationLedger::new(Arc::clone(&store)),
            earnings: EarningsAggregator::new(Arc::clone(&store)),
            reviews: ReviewBoard::new(Arc::clone(&store)),
            store,
        }
    }

    /// Check that the backing store is reachable.
    pub async fn ping(&self) -> Result<(), CoreError> {
        self.store.ping().await
    }
}

//! Shared relay state.

use duel_core::{DuelEngine, EngineConfig, MockChain, RelayGateway};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Shared application state
///
/// Submissions are serialized by the gateway lock, so the engine sees one
/// totally ordered move stream.
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<Mutex<RelayGateway<MockChain>>>,
    /// Handle onto the same chain the gateway seals blocks on
    chain: MockChain,
}

impl AppState {
    pub fn new(config: EngineConfig) -> Self {
        let chain = MockChain::default();
        let gateway = RelayGateway::new(DuelEngine::new(config), chain.clone());
        Self {
            gateway: Arc::new(Mutex::new(gateway)),
            chain,
        }
    }

    pub async fn gateway(&self) -> MutexGuard<'_, RelayGateway<MockChain>> {
        self.gateway.lock().await
    }

    pub fn chain(&self) -> &MockChain {
        &self.chain
    }
}

//! In-memory block clock for testing.

use super::traits::BlockClock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Mock chain that seals a block per submission while automining
#[derive(Clone, Debug)]
pub struct MockChain {
    height: Arc<AtomicU64>,
    automine: Arc<AtomicBool>,
}

impl MockChain {
    /// Create a new automining chain at the given height
    pub fn new(height: u64) -> Self {
        Self {
            height: Arc::new(AtomicU64::new(height)),
            automine: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Advance the head by `blocks` empty blocks
    pub fn mine(&self, blocks: u64) -> u64 {
        self.height.fetch_add(blocks, Ordering::SeqCst) + blocks
    }

    /// Enable or disable sealing on submission
    pub fn set_automine(&self, enabled: bool) {
        self.automine.store(enabled, Ordering::SeqCst);
    }
}

impl Default for MockChain {
    fn default() -> Self {
        Self::new(0)
    }
}

impl BlockClock for MockChain {
    fn height(&self) -> u64 {
        self.height.load(Ordering::SeqCst)
    }

    fn seal(&self) {
        if self.automine.load(Ordering::SeqCst) {
            self.height.fetch_add(1, Ordering::SeqCst);
        }
    }
}

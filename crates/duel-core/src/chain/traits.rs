//! Block clock trait definition.

/// Source of block heights for deadline arbitration
///
/// Implementations can be:
/// - MockChain for tests and local devnets
/// - An adapter over a real node's head
pub trait BlockClock: Send + Sync {
    /// Height of the latest sealed block
    fn height(&self) -> u64;

    /// Seal one block; called after every processed submission
    fn seal(&self);
}

/// Height at which a move processed now executes
pub fn execution_height(latest: u64) -> u64 {
    latest.saturating_add(1)
}

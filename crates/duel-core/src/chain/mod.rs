//! Host chain abstraction.
//!
//! The engine never reads a clock itself; callers pass the latest sealed
//! block height, which they obtain from a `BlockClock`.

mod mock;
mod traits;

pub use mock::MockChain;
pub use traits::{execution_height, BlockClock};

//! Engine configuration.

use crate::protocol::GameId;
use crate::rules::RuleKind;
use serde::{Deserialize, Serialize};

/// Default per-move block window
pub const DEFAULT_MAX_BLOCKS_PER_MOVE: u64 = 10;

/// Parameters fixed at engine construction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Identifier of the engine instance; random when absent
    pub id: Option<GameId>,
    /// Blocks a player has to make their move; at least 1
    pub max_blocks_per_move: u64,
    /// How revealed values decide a round
    pub rule: RuleKind,
}

impl EngineConfig {
    pub fn with_window(max_blocks_per_move: u64) -> Self {
        Self {
            max_blocks_per_move,
            ..Self::default()
        }
    }

    pub fn rule(mut self, rule: RuleKind) -> Self {
        self.rule = rule;
        self
    }

    /// Window the engine runs with. A zero window would expire every deadline
    /// at the block it is set, so it is raised to one block.
    pub fn window(&self) -> u64 {
        self.max_blocks_per_move.max(1)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            id: None,
            max_blocks_per_move: DEFAULT_MAX_BLOCKS_PER_MOVE,
            rule: RuleKind::default(),
        }
    }
}

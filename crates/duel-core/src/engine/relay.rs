//! Gateway accepting moves from any submitter.

use super::{DuelEngine, DuelError, MoveReceipt};
use crate::chain::BlockClock;
use crate::protocol::Submission;
use tracing::debug;

/// Accepts submissions from anyone and processes them in arrival order.
///
/// The submitter only pays for inclusion: authorization is bound to the
/// signer inside the move, so a relayer can withhold a move but never forge
/// or alter one. One block is sealed per submission, accepted or not.
pub struct RelayGateway<C: BlockClock> {
    engine: DuelEngine,
    chain: C,
}

impl<C: BlockClock> RelayGateway<C> {
    pub fn new(engine: DuelEngine, chain: C) -> Self {
        Self { engine, chain }
    }

    pub fn relay(&mut self, submission: &Submission) -> Result<MoveReceipt, DuelError> {
        let now = self.chain.height();
        if submission.submitter != submission.signed.actor {
            debug!(
                "Relaying {} for {} on behalf of submitter {}",
                submission.action, submission.signed.actor, submission.submitter
            );
        }
        let result = self.engine.submit(submission, now);
        self.chain.seal();
        result
    }

    pub fn engine(&self) -> &DuelEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut DuelEngine {
        &mut self.engine
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }
}

//! Audit-trail events emitted by the engine.

use crate::crypto::Address;
use crate::protocol::{GameId, Step};
use serde::{Deserialize, Serialize};

/// A challenger was seated and a round began
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartEvent {
    pub id: GameId,
    pub round: u64,
    pub challenger: Address,
    pub defender: Address,
}

/// A move advanced the round; `deadline_block` bounds the next move
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStateEvent {
    pub id: GameId,
    pub round: u64,
    pub step: Step,
    pub actor: Address,
    pub opponent: Address,
    pub deadline_block: u64,
}

/// A round was won and the winner holds the defender seat
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningEvent {
    pub id: GameId,
    pub round: u64,
    pub winner: Address,
    pub announcer: Address,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DuelEvent {
    Start(StartEvent),
    UpdateState(UpdateStateEvent),
    Winning(WinningEvent),
}

impl From<StartEvent> for DuelEvent {
    fn from(event: StartEvent) -> Self {
        DuelEvent::Start(event)
    }
}

impl From<UpdateStateEvent> for DuelEvent {
    fn from(event: UpdateStateEvent) -> Self {
        DuelEvent::UpdateState(event)
    }
}

impl From<WinningEvent> for DuelEvent {
    fn from(event: WinningEvent) -> Self {
        DuelEvent::Winning(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_tagging() {
        let event: DuelEvent = WinningEvent {
            id: GameId::new(),
            round: 3,
            winner: Address::from_bytes([1; 20]),
            announcer: Address::from_bytes([2; 20]),
        }
        .into();

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "winning");
        assert_eq!(json["round"], 3);

        let back: DuelEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}

//! Integration tests for complete duel rounds.
//!
//! Every move goes through the relay gateway on a mock chain that seals one
//! block per submission.

use duel_core::{
    protocol::{chain_digest, DuelEvent, StartEvent, WinningEvent},
    Address, Commitment, Digest, DuelError, EngineConfig, MockChain, MoveKind, MoveReceipt, Phase,
    RelayGateway, RuleKind, SignedMove, Signer, Submission,
};

const WINDOW: u64 = 10;

const CHALLENGE_VALUE: &str = "1";

/// A duel table with optional relayer paying for every submission
struct Table {
    gateway: RelayGateway<MockChain>,
    relayer: Option<Signer>,
}

impl Table {
    fn new() -> Self {
        Self::with_config(EngineConfig::with_window(WINDOW))
    }

    fn with_config(config: EngineConfig) -> Self {
        Self {
            gateway: RelayGateway::new(duel_core::DuelEngine::new(config), MockChain::default()),
            relayer: None,
        }
    }

    fn relayed(mut self) -> Self {
        self.relayer = Some(Signer::random());
        self
    }

    fn play(&mut self, player: &Signer, action: MoveKind, payload: &str) -> Result<MoveReceipt, DuelError> {
        let prev_hash = self.gateway.engine().last_state_hash();
        self.play_on(player, action, payload, prev_hash)
    }

    fn play_on(
        &mut self,
        player: &Signer,
        action: MoveKind,
        payload: &str,
        prev_hash: Digest,
    ) -> Result<MoveReceipt, DuelError> {
        let signed = SignedMove::sign(player, prev_hash, payload);
        let submitter = self
            .relayer
            .as_ref()
            .map(Signer::address)
            .unwrap_or_else(|| player.address());
        self.gateway.relay(&Submission::new(submitter, action, signed))
    }

    fn mine(&self, blocks: u64) {
        self.gateway.chain().mine(blocks);
    }

    fn defender(&self) -> Address {
        self.gateway.engine().defender()
    }

    fn challenger(&self) -> Address {
        self.gateway.engine().challenger()
    }

    /// Seat `defender`, start a round against `challenger`, and play as far
    /// as the given reveals go
    fn fight(&mut self, defender: &Signer, challenger: &Signer, defend_value: Option<&str>, reveal: Option<(&str, &str)>) {
        self.play(defender, MoveKind::Challenge, "").unwrap();
        self.play(challenger, MoveKind::Challenge, &commit(CHALLENGE_VALUE)).unwrap();
        assert_eq!(self.defender(), defender.address());
        assert_eq!(self.challenger(), challenger.address());

        if let Some(value) = defend_value {
            self.play(defender, MoveKind::Defend, &commit(value)).unwrap();
        }
        if let Some((challenge_reveal, defend_reveal)) = reveal {
            self.play(challenger, MoveKind::RevealChallenge, challenge_reveal).unwrap();
            self.play(defender, MoveKind::RevealDefend, defend_reveal).unwrap();
        }
    }
}

fn commit(value: &str) -> String {
    Commitment::new(value.as_bytes()).to_payload()
}

fn winning(receipt: &MoveReceipt) -> WinningEvent {
    receipt
        .events
        .iter()
        .find_map(|event| match event {
            DuelEvent::Winning(w) => Some(w.clone()),
            _ => None,
        })
        .expect("winning event")
}

#[test]
fn test_scenario_defender_holds_on_equal_reveals() {
    let (defender, challenger) = (Signer::random(), Signer::random());
    let mut table = Table::new();
    table.fight(&defender, &challenger, Some("1"), Some(("1", "1")));

    assert_eq!(table.gateway.engine().who_wins(), defender.address());
    let round = table.gateway.engine().round();

    let receipt = table.play(&defender, MoveKind::ClaimWinning, "").unwrap();
    assert_eq!(
        winning(&receipt),
        WinningEvent {
            id: table.gateway.engine().id(),
            round,
            winner: defender.address(),
            announcer: defender.address(),
        }
    );
    assert_eq!(table.defender(), defender.address());
    assert_eq!(table.challenger(), Address::NOBODY);
    assert_eq!(table.gateway.engine().phase(), Phase::Concluded);
    assert_eq!(round, 1);
}

#[test]
fn test_scenario_challenger_wins_on_different_reveals() {
    let (defender, challenger) = (Signer::random(), Signer::random());
    let mut table = Table::new();
    table.fight(&defender, &challenger, Some("0"), Some(("1", "0")));

    assert_eq!(table.gateway.engine().who_wins(), challenger.address());
    assert_eq!(
        table.play(&defender, MoveKind::ClaimWinning, ""),
        Err(DuelError::NotTheWinner)
    );

    table.play(&challenger, MoveKind::ClaimWinning, "").unwrap();
    assert_eq!(table.defender(), challenger.address());
    assert_eq!(table.challenger(), Address::NOBODY);
}

#[test]
fn test_scenario_timeout_forced_win() {
    let (defender, challenger) = (Signer::random(), Signer::random());
    let mut table = Table::new();
    table.fight(&defender, &challenger, None, None);

    assert_eq!(
        table.play(&challenger, MoveKind::ClaimWinning, ""),
        Err(DuelError::SomebodyStillPlaying)
    );

    table.mine(WINDOW);
    assert_eq!(
        table.play(&defender, MoveKind::Defend, &commit("1")),
        Err(DuelError::TooLate)
    );
    assert_eq!(
        table.play(&defender, MoveKind::ClaimWinning, ""),
        Err(DuelError::NotTheWinner)
    );

    table.play(&challenger, MoveKind::ClaimWinning, "").unwrap();
    assert_eq!(table.defender(), challenger.address());
    assert_eq!(table.challenger(), Address::NOBODY);
}

#[test]
fn test_defender_forced_win_when_challenger_stalls_reveal() {
    let (defender, challenger) = (Signer::random(), Signer::random());
    let mut table = Table::new();
    table.fight(&defender, &challenger, Some("1"), None);

    table.mine(WINDOW + 5);
    assert_eq!(
        table.play(&challenger, MoveKind::RevealChallenge, CHALLENGE_VALUE),
        Err(DuelError::TooLate)
    );
    table.play(&defender, MoveKind::ClaimWinning, "").unwrap();
    assert_eq!(table.defender(), defender.address());
}

#[test]
fn test_move_just_before_deadline_is_in_time() {
    let (defender, challenger) = (Signer::random(), Signer::random());
    let mut table = Table::new();
    table.fight(&defender, &challenger, None, None);

    // The challenge sealed the head; W - 1 empty blocks leave exactly one
    // block inside the window
    table.mine(WINDOW - 1);
    table.play(&defender, MoveKind::Defend, &commit("1")).unwrap();
    assert_eq!(table.gateway.engine().phase(), Phase::Defended);
}

#[test]
fn test_third_challenge_excluded() {
    let (defender, challenger, bystander) = (Signer::random(), Signer::random(), Signer::random());
    let mut table = Table::new();
    table.fight(&defender, &challenger, None, None);

    assert_eq!(
        table.play(&bystander, MoveKind::Challenge, &commit("0")),
        Err(DuelError::SomebodyStillPlaying)
    );
    assert_eq!(table.challenger(), challenger.address());

    // Once stalled, the round must be claimed before the hill reopens
    table.mine(WINDOW);
    assert_eq!(
        table.play(&bystander, MoveKind::Challenge, &commit("0")),
        Err(DuelError::MoveNotAllowed)
    );
}

#[test]
fn test_third_challenge_excluded_until_round_claimed() {
    let (defender, challenger, bystander) = (Signer::random(), Signer::random(), Signer::random());
    let mut table = Table::new();
    table.fight(&defender, &challenger, Some("1"), Some(("1", "1")));
    assert_eq!(table.gateway.engine().phase(), Phase::DefendRevealed);

    assert_eq!(
        table.play(&bystander, MoveKind::Challenge, &commit("0")),
        Err(DuelError::SomebodyStillPlaying)
    );
    assert_eq!(table.defender(), defender.address());
    assert_eq!(table.challenger(), challenger.address());

    table.play(&defender, MoveKind::ClaimWinning, "").unwrap();
    table.play(&bystander, MoveKind::Challenge, &commit("0")).unwrap();
    assert_eq!(table.challenger(), bystander.address());
}

#[test]
fn test_round_rollover_accepts_new_challenger() {
    let (defender, challenger, newcomer) = (Signer::random(), Signer::random(), Signer::random());
    let mut table = Table::new();
    table.fight(&defender, &challenger, Some("0"), Some(("1", "0")));
    table.play(&challenger, MoveKind::ClaimWinning, "").unwrap();

    let receipt = table.play(&newcomer, MoveKind::Challenge, &commit("1")).unwrap();
    assert_eq!(table.defender(), challenger.address());
    assert_eq!(table.challenger(), newcomer.address());
    assert_eq!(table.gateway.engine().round(), 2);
    assert!(receipt.events.contains(&DuelEvent::Start(StartEvent {
        id: table.gateway.engine().id(),
        round: 2,
        challenger: newcomer.address(),
        defender: challenger.address(),
    })));

    assert_eq!(
        table.play(&newcomer, MoveKind::Defend, &commit("x")),
        Err(DuelError::NotYourTurn)
    );
    assert_eq!(
        table.play(&challenger, MoveKind::Challenge, &commit("1")),
        Err(DuelError::SomebodyStillPlaying)
    );
}

#[test]
fn test_claim_before_any_game() {
    let player = Signer::random();
    let mut table = Table::new();

    assert_eq!(
        table.play(&player, MoveKind::ClaimWinning, ""),
        Err(DuelError::NoGameYet)
    );
    assert_eq!(
        table.play(&player, MoveKind::Defend, &commit("1")),
        Err(DuelError::MoveNotAllowed)
    );

    table.play(&player, MoveKind::Challenge, "").unwrap();
    assert_eq!(
        table.play(&player, MoveKind::ClaimWinning, ""),
        Err(DuelError::NoGameYet)
    );
    assert_eq!(
        table.play(&player, MoveKind::Defend, &commit("1")),
        Err(DuelError::MoveNotAllowed)
    );
}

#[test]
fn test_replayed_and_forked_moves_rejected() {
    let (defender, challenger) = (Signer::random(), Signer::random());
    let mut table = Table::new();
    table.play(&defender, MoveKind::Challenge, "").unwrap();

    // Replay of the very first move against the zero seed
    assert!(matches!(
        table.play_on(&defender, MoveKind::Challenge, "", Digest::ZERO),
        Err(DuelError::StaleOrReplayedMove { .. })
    ));

    // Two challengers race from the same head: only the first lands
    let head = table.gateway.engine().last_state_hash();
    let rival = Signer::random();
    table
        .play_on(&challenger, MoveKind::Challenge, &commit("1"), head)
        .unwrap();
    assert!(matches!(
        table.play_on(&rival, MoveKind::Challenge, &commit("0"), head),
        Err(DuelError::StaleOrReplayedMove { .. })
    ));
    assert_eq!(table.challenger(), challenger.address());
}

#[test]
fn test_signature_checked_before_chain_position() {
    let defender = Signer::random();
    let mut table = Table::new();
    table.play(&defender, MoveKind::Challenge, "").unwrap();

    // Stale and forged: reported as a bad signature
    let mut signed = SignedMove::sign(&defender, Digest::ZERO, "");
    signed.payload.push('*');
    assert_eq!(
        table.gateway.relay(&Submission::direct(MoveKind::Challenge, signed)),
        Err(DuelError::SignatureInvalid)
    );
}

#[test]
fn test_claimed_actor_must_be_signer() {
    let (impostor, victim) = (Signer::random(), Signer::random());
    let mut table = Table::new();

    let mut signed = SignedMove::sign(&impostor, Digest::ZERO, "");
    signed.actor = victim.address();
    assert_eq!(
        table.gateway.relay(&Submission::direct(MoveKind::Challenge, signed)),
        Err(DuelError::SignatureInvalid)
    );
    assert_eq!(table.defender(), Address::NOBODY);
    assert_eq!(table.gateway.engine().last_state_hash(), Digest::ZERO);
}

#[test]
fn test_relayed_round_matches_direct_round() {
    let (defender, challenger) = (Signer::random(), Signer::random());
    let mut table = Table::new().relayed();
    table.fight(&defender, &challenger, Some("1"), Some(("1", "1")));
    table.play(&defender, MoveKind::ClaimWinning, "").unwrap();

    assert_eq!(table.defender(), defender.address());
    let relayer = table.relayer.as_ref().unwrap().address();
    assert!(table
        .gateway
        .engine()
        .history()
        .iter()
        .all(|record| record.submitter == relayer && record.actor != relayer));
}

#[test]
fn test_history_reproduces_last_state_hash() {
    let (defender, challenger) = (Signer::random(), Signer::random());
    let mut table = Table::new();
    table.fight(&defender, &challenger, Some("0"), Some(("1", "0")));
    table.play(&challenger, MoveKind::ClaimWinning, "").unwrap();
    // Rejected moves leave no trace in the log
    table.play(&defender, MoveKind::ClaimWinning, "").unwrap_err();

    let engine = table.gateway.engine();
    assert_eq!(engine.history().len(), 6);
    assert_eq!(chain_digest(engine.history()), engine.last_state_hash());
    for pair in engine.history().windows(2) {
        assert_eq!(pair[1].prev_hash, pair[0].digest);
    }
}

#[test]
fn test_rock_paper_scissors_rule() {
    let (defender, challenger) = (Signer::random(), Signer::random());
    let mut table = Table::with_config(EngineConfig::with_window(WINDOW).rule(RuleKind::RockPaperScissors));

    table.play(&defender, MoveKind::Challenge, "").unwrap();
    table.play(&challenger, MoveKind::Challenge, &commit("Paper")).unwrap();
    table.play(&defender, MoveKind::Defend, &commit("Rock")).unwrap();
    table.play(&challenger, MoveKind::RevealChallenge, "Paper").unwrap();
    table.play(&defender, MoveKind::RevealDefend, "Rock").unwrap();

    assert_eq!(table.gateway.engine().who_wins(), challenger.address());
}

#[test]
fn test_reveal_must_match_commitment() {
    let (defender, challenger) = (Signer::random(), Signer::random());
    let mut table = Table::new();
    table.fight(&defender, &challenger, Some("1"), None);

    assert_eq!(
        table.play(&challenger, MoveKind::RevealChallenge, "0"),
        Err(DuelError::RevealMismatch)
    );
    table.play(&challenger, MoveKind::RevealChallenge, CHALLENGE_VALUE).unwrap();
    assert_eq!(
        table.play(&defender, MoveKind::RevealDefend, "0"),
        Err(DuelError::RevealMismatch)
    );
    assert_eq!(table.gateway.engine().phase(), Phase::ChallengeRevealed);
}

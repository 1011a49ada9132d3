//! Test helper functions for building units, actions and transcripts.

use crate::action::{
    Action, ActionCommon, ChargeAction, ChargeRoll, FightAction, MoveAction, ShootAction,
    StrikeResults,
};
use crate::transcript::{GameTranscript, Player};
use crate::unit::UnitReference;

// =============================================================================
// Tracing
// =============================================================================

/// Routes library logs to the test harness output. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

// =============================================================================
// Units
// =============================================================================

/// A full-strength Space Marine squad.
pub fn intercessors() -> UnitReference {
    UnitReference::new("Intercessor Squad A", "Space Marines")
        .with_wounds_remaining(10)
        .with_models_remaining(5)
        .with_position(12.0, 8.0)
}

/// A mob of Ork Boyz.
pub fn boyz() -> UnitReference {
    UnitReference::new("Boyz Mob", "Orks")
        .with_wounds_remaining(10)
        .with_models_remaining(10)
        .with_position(30.0, 20.0)
}

// =============================================================================
// Actions
// =============================================================================

/// A plain move in the movement phase.
pub fn simple_move(turn: u32, actor: &UnitReference, distance: f64) -> Action {
    MoveAction::new(ActionCommon::new(turn, "movement", actor.clone()), distance)
        .expect("valid move")
        .into()
}

/// A shooting record with the given shots and cascade.
pub fn shooting(
    turn: u32,
    actor: &UnitReference,
    target: &UnitReference,
    shots: u32,
    results: StrikeResults,
) -> Action {
    ShootAction::builder(
        ActionCommon::new(turn, "shooting", actor.clone()),
        target.clone(),
        "Bolt rifle",
        shots,
    )
    .profile("S", "4")
    .profile("AP", "-1")
    .results(results)
    .build()
    .expect("valid shooting")
    .into()
}

/// A charge record.
pub fn charge(
    turn: u32,
    actor: &UnitReference,
    target: &UnitReference,
    roll: (u8, u8),
    needed: f64,
    made: bool,
) -> Action {
    ChargeAction::builder(
        ActionCommon::new(turn, "charge", actor.clone()),
        vec![target.clone()],
        ChargeRoll::new(roll.0, roll.1).expect("valid roll"),
        needed,
    )
    .made_charge(made)
    .build()
    .expect("valid charge")
    .into()
}

/// A melee record with the given attacks and cascade.
pub fn fighting(
    turn: u32,
    actor: &UnitReference,
    target: &UnitReference,
    attacks: u32,
    results: StrikeResults,
) -> Action {
    FightAction::builder(
        ActionCommon::new(turn, "fight", actor.clone()),
        target.clone(),
        "Close combat weapon",
        attacks,
    )
    .results(results)
    .build()
    .expect("valid fight")
    .into()
}

// =============================================================================
// Transcripts
// =============================================================================

/// An empty two-player transcript.
pub fn empty_transcript() -> GameTranscript {
    GameTranscript::new(
        Player::new("Alice", "Space Marines"),
        Player::new("Bob", "Orks"),
    )
    .with_mission("Take and Hold")
}

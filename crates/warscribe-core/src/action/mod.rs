//! Recorded actions.
//!
//! An [`Action`] is one immutable event in a game transcript. The set of
//! record variants is closed:
//!
//! - [`MoveAction`]: a unit moved (normal move, advance or fall back)
//! - [`ShootAction`]: a unit fired a ranged weapon
//! - [`ChargeAction`]: a unit declared a charge and rolled 2D6
//! - [`FightAction`]: a unit attacked in melee
//!
//! Every variant embeds an [`ActionCommon`] block (id, turn, phase,
//! timestamp, actor, result, notes).
//!
//! # Construction
//!
//! Each variant is built through a builder whose `build()` checks the
//! structural invariants (non-negative distances, at least one shot, a
//! well-formed 2D6 charge roll, ...) and returns a [`SchemaError`] instead of
//! a value when one is broken. Deserialization goes through the same
//! builders, so an invalid document never yields a value either.
//!
//! # Wire format
//!
//! `Action` serializes as a flat JSON object with an `action_type`
//! discriminant:
//!
//! ```
//! use warscribe_core::action::{Action, ActionCommon, MoveAction};
//! use warscribe_core::unit::UnitReference;
//!
//! let actor = UnitReference::new("Intercessors", "Space Marines");
//! let action: Action = MoveAction::builder(ActionCommon::new(1, "movement", actor), 6.0)
//!     .terrain("ruins")
//!     .build()?
//!     .into();
//!
//! let json = serde_json::to_value(&action)?;
//! assert_eq!(json["action_type"], "move");
//! assert_eq!(json["distance_inches"], 6.0);
//!
//! let restored: Action = serde_json::from_value(json)?;
//! assert_eq!(restored, action);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Unknown `action_type` values are rejected. Unknown fields inside a known
//! variant are ignored so older readers accept newer documents.

mod charge;
mod melee;
mod movement;
mod shooting;
mod strike;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::unit::UnitReference;

pub use crate::ids::ActionId;
pub use charge::{ChargeAction, ChargeBuilder, ChargeRoll};
pub use melee::{FightAction, FightBuilder};
pub use movement::{MoveAction, MoveBuilder, RelativeDistance};
pub use shooting::{ShootAction, ShootBuilder};
pub use strike::{StrikeResults, WeaponUse};

// =============================================================================
// Action Type
// =============================================================================

/// Action-type tags.
///
/// Editions whitelist these per phase. Only `Move`, `Shoot`, `Charge` and
/// `Fight` have record variants in [`Action`]; the remaining tags exist so
/// phase definitions can name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Normal move
    Move,
    /// Ranged attack
    Shoot,
    /// Charge declaration
    Charge,
    /// Melee attack
    Fight,
    /// Advance move
    Advance,
    /// Fall back out of engagement
    FallBack,
    /// Consolidation move after fighting
    Consolidate,
    /// Pile-in move before fighting
    PileIn,
    /// Heroic intervention
    HeroicIntervention,
    /// Stratagem use
    Stratagem,
    /// Unit or model ability
    Ability,
    /// Objective action
    Objective,
}

impl ActionType {
    /// Every tag, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Move,
        Self::Shoot,
        Self::Charge,
        Self::Fight,
        Self::Advance,
        Self::FallBack,
        Self::Consolidate,
        Self::PileIn,
        Self::HeroicIntervention,
        Self::Stratagem,
        Self::Ability,
        Self::Objective,
    ];

    /// Returns the wire name of this tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Shoot => "shoot",
            Self::Charge => "charge",
            Self::Fight => "fight",
            Self::Advance => "advance",
            Self::FallBack => "fall_back",
            Self::Consolidate => "consolidate",
            Self::PileIn => "pile_in",
            Self::HeroicIntervention => "heroic_intervention",
            Self::Stratagem => "stratagem",
            Self::Ability => "ability",
            Self::Objective => "objective",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Action Result
// =============================================================================

/// Reported outcome of an action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionResult {
    /// The action achieved its aim.
    Success,
    /// The action failed.
    Failed,
    /// The action partly succeeded.
    Partial,
    /// Not yet resolved.
    #[default]
    Pending,
}

// =============================================================================
// Common Fields
// =============================================================================

/// Fields shared by every action variant.
///
/// `phase` is an opaque key. It is compared against the phase names of
/// whichever edition judges the action, so editions with custom phases need
/// no changes here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionCommon {
    /// Unique action ID, generated at creation.
    pub id: ActionId,
    /// Game turn, starting at 1.
    pub turn: u32,
    /// Phase key, e.g. "movement".
    pub phase: String,
    /// When the action was recorded.
    pub timestamp: DateTime<Utc>,
    /// The unit performing the action.
    pub actor: UnitReference,
    /// Reported outcome.
    #[serde(default)]
    pub result: ActionResult,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl ActionCommon {
    /// Creates the common block with a fresh ID, the current time and a
    /// pending result.
    #[must_use]
    pub fn new(turn: u32, phase: impl Into<String>, actor: UnitReference) -> Self {
        Self {
            id: ActionId::new(),
            turn,
            phase: phase.into(),
            timestamp: Utc::now(),
            actor,
            result: ActionResult::Pending,
            notes: None,
        }
    }

    /// Sets the reported outcome.
    #[must_use]
    pub fn with_result(mut self, result: ActionResult) -> Self {
        self.result = result;
        self
    }

    /// Attaches notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Overrides the recording time.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    fn check(&self) -> Result<(), SchemaError> {
        if self.turn == 0 {
            return Err(SchemaError::TurnOutOfRange(self.turn));
        }
        self.actor.check()
    }
}

// =============================================================================
// Field Checks
// =============================================================================

fn check_finite(field: &'static str, value: f64) -> Result<(), SchemaError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SchemaError::NonFiniteValue { field })
    }
}

fn check_distance(field: &'static str, value: f64) -> Result<(), SchemaError> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(SchemaError::NegativeDistance { field, value });
    }
    Ok(())
}

fn check_count(field: &'static str, value: u32) -> Result<(), SchemaError> {
    if value == 0 {
        return Err(SchemaError::ZeroCount { field });
    }
    Ok(())
}

// =============================================================================
// Action
// =============================================================================

/// A recorded action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action_type", rename_all = "snake_case")]
pub enum Action {
    /// A movement
    Move(MoveAction),
    /// A ranged attack
    Shoot(ShootAction),
    /// A charge
    Charge(ChargeAction),
    /// A melee attack
    Fight(FightAction),
}

impl Action {
    /// Returns the discriminant tag.
    #[must_use]
    pub const fn action_type(&self) -> ActionType {
        match self {
            Self::Move(_) => ActionType::Move,
            Self::Shoot(_) => ActionType::Shoot,
            Self::Charge(_) => ActionType::Charge,
            Self::Fight(_) => ActionType::Fight,
        }
    }

    /// Returns the shared fields.
    #[must_use]
    pub const fn common(&self) -> &ActionCommon {
        match self {
            Self::Move(action) => action.common(),
            Self::Shoot(action) => action.common(),
            Self::Charge(action) => action.common(),
            Self::Fight(action) => action.common(),
        }
    }

    /// Returns the action ID.
    #[must_use]
    pub const fn id(&self) -> ActionId {
        self.common().id
    }

    /// Returns the turn number.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.common().turn
    }

    /// Returns the phase key.
    #[must_use]
    pub fn phase(&self) -> &str {
        &self.common().phase
    }

    /// Returns the acting unit.
    #[must_use]
    pub const fn actor(&self) -> &UnitReference {
        &self.common().actor
    }

    /// Returns the reported outcome.
    #[must_use]
    pub const fn result(&self) -> ActionResult {
        self.common().result
    }
}

impl From<MoveAction> for Action {
    fn from(action: MoveAction) -> Self {
        Self::Move(action)
    }
}

impl From<ShootAction> for Action {
    fn from(action: ShootAction) -> Self {
        Self::Shoot(action)
    }
}

impl From<ChargeAction> for Action {
    fn from(action: ChargeAction) -> Self {
        Self::Charge(action)
    }
}

impl From<FightAction> for Action {
    fn from(action: FightAction) -> Self {
        Self::Fight(action)
    }
}

// =============================================================================
// Tests
// =============================================================================

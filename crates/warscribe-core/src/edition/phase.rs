//! Turn phases.
//!
//! Every edition defines its own ordered list of phases, each whitelisting
//! the action types that may be taken during it. A [`PhaseSequence`] holds
//! that list and guarantees it is totally ordered: every phase has a unique
//! name and a unique `order`.
//!
//! Phase lists are small (eight entries at most in practice), so lookups
//! are linear scans.
//!
//! # Example
//!
//! ```
//! use warscribe_core::action::ActionType;
//! use warscribe_core::edition::{GamePhase, PhaseDefinition, PhaseSequence};
//!
//! let phases = PhaseSequence::new(vec![
//!     PhaseDefinition::new(GamePhase::Movement, "Movement Phase", 1, [ActionType::Move]),
//!     PhaseDefinition::new(GamePhase::Shooting, "Shooting Phase", 2, [ActionType::Shoot]),
//! ])?;
//!
//! assert_eq!(phases.next("movement").map(|p| p.name.as_str()), Some("shooting"));
//! assert!(phases.next("shooting").is_none());
//! assert!(phases.allows(ActionType::Move, "movement"));
//! assert!(!phases.allows(ActionType::Move, "shooting"));
//! # Ok::<(), warscribe_core::error::EditionError>(())
//! ```

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::ActionType;
use crate::error::EditionError;

// =============================================================================
// Game Phase
// =============================================================================

/// Standard phase keys.
///
/// Editions are free to use other names; these cover the phases shared by
/// the editions shipped with this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Command phase
    Command,
    /// Movement phase
    Movement,
    /// Psychic phase (older editions only)
    Psychic,
    /// Shooting phase
    Shooting,
    /// Charge phase
    Charge,
    /// Fight phase
    Fight,
    /// Morale phase
    Morale,
}

impl GamePhase {
    /// Returns the phase key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Command => "command",
            Self::Movement => "movement",
            Self::Psychic => "psychic",
            Self::Shooting => "shooting",
            Self::Charge => "charge",
            Self::Fight => "fight",
            Self::Morale => "morale",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<GamePhase> for String {
    fn from(phase: GamePhase) -> Self {
        phase.as_str().to_string()
    }
}

// =============================================================================
// Phase Definition
// =============================================================================

/// One phase of a turn as defined by an edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDefinition {
    /// Stable key, compared against [`ActionCommon::phase`](crate::action::ActionCommon::phase).
    pub name: String,
    /// Human-readable name.
    pub display_name: String,
    /// Position in the turn. Unique within an edition.
    pub order: u32,
    /// Action types legal in this phase.
    pub allowed_actions: BTreeSet<ActionType>,
    /// Short rules summary.
    #[serde(default)]
    pub description: String,
    /// Whether the phase may be skipped.
    #[serde(default)]
    pub is_optional: bool,
}

impl PhaseDefinition {
    /// Creates a mandatory phase with no description.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        order: u32,
        allowed_actions: impl IntoIterator<Item = ActionType>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            order,
            allowed_actions: allowed_actions.into_iter().collect(),
            description: String::new(),
            is_optional: false,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the phase as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    /// Returns true if `action_type` may be taken in this phase.
    #[must_use]
    pub fn allows(&self, action_type: ActionType) -> bool {
        self.allowed_actions.contains(&action_type)
    }
}

// =============================================================================
// Phase Sequence
// =============================================================================

/// A totally ordered list of phases, sorted by `order`.
///
/// Orders need not be contiguous, but [`next`](Self::next) only follows a
/// step of exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PhaseDefinition>", into = "Vec<PhaseDefinition>")]
pub struct PhaseSequence {
    phases: Vec<PhaseDefinition>,
}

impl PhaseSequence {
    /// Creates a sequence from phase definitions in any order.
    ///
    /// # Errors
    ///
    /// Returns an [`EditionError`] if the list is empty or two phases share a
    /// name or an order.
    pub fn new(mut phases: Vec<PhaseDefinition>) -> Result<Self, EditionError> {
        if phases.is_empty() {
            return Err(EditionError::EmptyPhaseSequence);
        }

        let mut names = HashSet::with_capacity(phases.len());
        for phase in &phases {
            if !names.insert(phase.name.as_str()) {
                return Err(EditionError::DuplicatePhaseName(phase.name.clone()));
            }
        }

        phases.sort_by_key(|phase| phase.order);
        if let Some(pair) = phases.windows(2).find(|pair| pair[0].order == pair[1].order) {
            return Err(EditionError::DuplicatePhaseOrder {
                first: pair[0].name.clone(),
                second: pair[1].name.clone(),
                order: pair[0].order,
            });
        }

        Ok(Self { phases })
    }

    /// Builds a sequence from a list already known to be valid.
    pub(crate) fn from_trusted(mut phases: Vec<PhaseDefinition>) -> Self {
        debug_assert!(Self::new(phases.clone()).is_ok());
        phases.sort_by_key(|phase| phase.order);
        Self { phases }
    }

    /// Looks up a phase by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PhaseDefinition> {
        self.phases.iter().find(|phase| phase.name == name)
    }

    /// Returns the order of the named phase.
    #[must_use]
    pub fn order_of(&self, name: &str) -> Option<u32> {
        self.get(name).map(|phase| phase.order)
    }

    /// Returns the phase whose order is exactly one more than `current`'s.
    ///
    /// `None` if `current` is the last phase, is unknown, or the next order
    /// value is unused.
    #[must_use]
    pub fn next(&self, current: &str) -> Option<&PhaseDefinition> {
        let wanted = self.order_of(current)?.checked_add(1)?;
        self.phases.iter().find(|phase| phase.order == wanted)
    }

    /// The opening phase of a turn.
    #[must_use]
    pub fn first(&self) -> Option<&PhaseDefinition> {
        self.phases.first()
    }

    /// Returns true if `action_type` is legal in the named phase.
    ///
    /// Unknown phases allow nothing.
    #[must_use]
    pub fn allows(&self, action_type: ActionType, phase: &str) -> bool {
        self.get(phase).is_some_and(|definition| definition.allows(action_type))
    }

    /// Iterates phases in turn order.
    pub fn iter(&self) -> impl Iterator<Item = &PhaseDefinition> {
        self.phases.iter()
    }

    /// Phase names in turn order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.phases.iter().map(|phase| phase.name.as_str()).collect()
    }

    /// Number of phases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Always false for a constructed sequence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

impl TryFrom<Vec<PhaseDefinition>> for PhaseSequence {
    type Error = EditionError;

    fn try_from(phases: Vec<PhaseDefinition>) -> Result<Self, Self::Error> {
        Self::new(phases)
    }
}

impl From<PhaseSequence> for Vec<PhaseDefinition> {
    fn from(sequence: PhaseSequence) -> Self {
        sequence.phases
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn movement() -> PhaseDefinition {
        PhaseDefinition::new(GamePhase::Movement, "Movement Phase", 1, [ActionType::Move])
    }

    fn shooting() -> PhaseDefinition {
        PhaseDefinition::new(
            GamePhase::Shooting,
            "Shooting Phase",
            2,
            [ActionType::Shoot, ActionType::Stratagem],
        )
    }

    mod definition_tests {
        use super::*;

        #[test]
        fn create_phase() {
            let phase = movement();
            assert_eq!(phase.name, "movement");
            assert_eq!(phase.order, 1);
            assert!(phase.allows(ActionType::Move));
            assert!(!phase.allows(ActionType::Shoot));
            assert!(!phase.is_optional);
        }

        #[test]
        fn optional_and_description() {
            let phase = PhaseDefinition::new("morale", "Morale Phase", 5, [ActionType::Ability])
                .with_description("Test unit morale.")
                .optional();
            assert!(phase.is_optional);
            assert_eq!(phase.description, "Test unit morale.");
        }

        #[test]
        fn game_phase_keys() {
            assert_eq!(GamePhase::Shooting.as_str(), "shooting");
            assert_eq!(String::from(GamePhase::Morale), "morale");
            assert_eq!(
                serde_json::to_string(&GamePhase::Command).unwrap(),
                "\"command\""
            );
        }
    }

    mod sequence_tests {
        use super::*;

        #[test]
        fn sorts_by_order() {
            let sequence = PhaseSequence::new(vec![shooting(), movement()]).unwrap();
            assert_eq!(sequence.names(), vec!["movement", "shooting"]);
            assert_eq!(sequence.first().unwrap().name, "movement");
        }

        #[test]
        fn empty_is_rejected() {
            assert_eq!(
                PhaseSequence::new(vec![]),
                Err(EditionError::EmptyPhaseSequence)
            );
        }

        #[test]
        fn duplicate_order_is_rejected() {
            let clash = PhaseDefinition::new(GamePhase::Psychic, "Psychic Phase", 1, []);
            let err = PhaseSequence::new(vec![movement(), clash]).unwrap_err();
            assert!(matches!(err, EditionError::DuplicatePhaseOrder { order: 1, .. }));
        }

        #[test]
        fn duplicate_name_is_rejected() {
            let mut again = shooting();
            again.name = "movement".into();
            assert_eq!(
                PhaseSequence::new(vec![movement(), again]),
                Err(EditionError::DuplicatePhaseName("movement".into()))
            );
        }

        #[test]
        fn next_requires_step_of_one() {
            let mut late = shooting();
            late.order = 5;
            let sequence = PhaseSequence::new(vec![movement(), late]).unwrap();

            assert!(sequence.next("movement").is_none());
            assert!(sequence.next("unknown").is_none());
        }

        #[test]
        fn unknown_phase_allows_nothing() {
            let sequence = PhaseSequence::new(vec![movement()]).unwrap();
            assert!(!sequence.allows(ActionType::Move, "psychic"));
            assert_eq!(sequence.order_of("psychic"), None);
        }

        #[test]
        fn deserialization_enforces_ordering() {
            let json = serde_json::to_string(&vec![movement(), movement()]).unwrap();
            assert!(serde_json::from_str::<PhaseSequence>(&json).is_err());

            let json = serde_json::to_string(&vec![shooting(), movement()]).unwrap();
            let sequence: PhaseSequence = serde_json::from_str(&json).unwrap();
            assert_eq!(sequence.len(), 2);
        }
    }
}

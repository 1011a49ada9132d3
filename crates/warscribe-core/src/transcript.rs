//! Game transcripts.
//!
//! A [`GameTranscript`] is the ordered log of everything recorded in one game
//! between two players. Recording and judging are separate: appending an
//! action never validates it. Pass actions to an
//! [`EditionRules`](crate::edition::EditionRules) implementation to judge
//! them.
//!
//! # Example
//!
//! ```
//! use warscribe_core::action::{ActionCommon, MoveAction};
//! use warscribe_core::transcript::{GameTranscript, Player};
//! use warscribe_core::unit::UnitReference;
//!
//! let mut transcript = GameTranscript::new(
//!     Player::new("Alice", "Space Marines"),
//!     Player::new("Bob", "Orks"),
//! )
//! .with_mission("Scorched Earth");
//!
//! let actor = UnitReference::new("Intercessors", "Space Marines");
//! transcript.add_action(MoveAction::new(ActionCommon::new(1, "movement", actor), 6.0)?);
//!
//! let json = transcript.to_json()?;
//! let restored = GameTranscript::from_json(&json)?;
//! assert_eq!(restored, transcript);
//! assert_eq!(restored.actions_for_turn(1).len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::error::TranscriptError;
use crate::unit::UnitId;

/// One side of the game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Player name.
    pub name: String,
    /// Army faction.
    pub faction: String,
}

impl Player {
    /// Creates a player.
    #[must_use]
    pub fn new(name: impl Into<String>, faction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            faction: faction.into(),
        }
    }
}

/// Append-only record of one game.
///
/// Actions keep their recording order. They are never reordered or
/// deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameTranscript {
    /// First player.
    pub player1: Player,
    /// Second player.
    pub player2: Player,
    /// Mission being played, if named.
    #[serde(default)]
    pub mission: Option<String>,
    #[serde(default)]
    actions: Vec<Action>,
}

impl GameTranscript {
    /// Creates an empty transcript.
    #[must_use]
    pub fn new(player1: Player, player2: Player) -> Self {
        Self {
            player1,
            player2,
            mission: None,
            actions: Vec::new(),
        }
    }

    /// Names the mission.
    #[must_use]
    pub fn with_mission(mut self, mission: impl Into<String>) -> Self {
        self.mission = Some(mission.into());
        self
    }

    /// Appends an action. No validation is performed.
    pub fn add_action(&mut self, action: impl Into<Action>) {
        let action = action.into();
        tracing::trace!(
            action_id = %action.id(),
            action_type = %action.action_type(),
            turn = action.turn(),
            "recorded action"
        );
        self.actions.push(action);
    }

    /// All actions in recording order.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Number of recorded actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Actions recorded for `turn`, in recording order.
    #[must_use]
    pub fn actions_for_turn(&self, turn: u32) -> Vec<&Action> {
        self.actions
            .iter()
            .filter(|action| action.turn() == turn)
            .collect()
    }

    /// Actions performed by the unit `unit`, in recording order.
    #[must_use]
    pub fn actions_for_unit(&self, unit: UnitId) -> Vec<&Action> {
        self.actions
            .iter()
            .filter(|action| action.actor().id == unit)
            .collect()
    }

    /// Highest turn number recorded so far.
    #[must_use]
    pub fn last_turn(&self) -> Option<u32> {
        self.actions.iter().map(Action::turn).max()
    }

    /// Serializes the transcript to a compact JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`TranscriptError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, TranscriptError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the transcript to an indented JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`TranscriptError::Json`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, TranscriptError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a transcript from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`TranscriptError::Json`] if the document is malformed, has an
    /// unknown `action_type`, or contains an action that breaks its schema.
    pub fn from_json(document: &str) -> Result<Self, TranscriptError> {
        let transcript: Self = serde_json::from_str(document)?;
        tracing::debug!(actions = transcript.len(), "loaded transcript");
        Ok(transcript)
    }
}

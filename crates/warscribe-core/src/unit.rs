//! Unit references.
//!
//! A [`UnitReference`] is a snapshot of a battlefield unit taken when an
//! action is recorded. The mutable context (wounds, models, position) may
//! differ between two snapshots of the same unit; the [`UnitId`] does not.
//!
//! # Example
//!
//! ```
//! use warscribe_core::unit::UnitReference;
//!
//! let squad = UnitReference::new("Intercessor Squad A", "Space Marines")
//!     .with_wounds_remaining(8)
//!     .with_position(12.0, 30.5);
//!
//! assert_eq!(squad.to_string(), "Intercessor Squad A (Space Marines)");
//! assert_eq!(squad.short_ref(), "Intercesso..");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

pub use crate::ids::UnitId;

/// Names longer than this are abbreviated by [`UnitReference::short_ref`].
const SHORT_REF_MAX: usize = 12;
/// Characters kept from a long name before the ".." marker.
const SHORT_REF_KEEP: usize = 10;

/// Identity and context snapshot of a unit at the time an action happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitReference {
    /// Unique for the unit's lifetime within one game.
    pub id: UnitId,
    /// Display name, e.g. "Intercessor Squad A".
    pub name: String,
    /// Faction the unit belongs to.
    pub faction: String,
    /// Wounds left on the unit, if tracked.
    #[serde(default)]
    pub wounds_remaining: Option<u32>,
    /// Models left in the unit, if tracked.
    #[serde(default)]
    pub models_remaining: Option<u32>,
    /// Table X coordinate in inches.
    #[serde(default)]
    pub position_x: Option<f64>,
    /// Table Y coordinate in inches.
    #[serde(default)]
    pub position_y: Option<f64>,
}

impl UnitReference {
    /// Creates a reference to a new unit with a freshly generated ID.
    #[must_use]
    pub fn new(name: impl Into<String>, faction: impl Into<String>) -> Self {
        Self::with_id(UnitId::new(), name, faction)
    }

    /// Creates a reference for an already known unit.
    #[must_use]
    pub fn with_id(id: UnitId, name: impl Into<String>, faction: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            faction: faction.into(),
            wounds_remaining: None,
            models_remaining: None,
            position_x: None,
            position_y: None,
        }
    }

    /// Sets the wounds remaining.
    #[must_use]
    pub fn with_wounds_remaining(mut self, wounds: u32) -> Self {
        self.wounds_remaining = Some(wounds);
        self
    }

    /// Sets the models remaining.
    #[must_use]
    pub fn with_models_remaining(mut self, models: u32) -> Self {
        self.models_remaining = Some(models);
        self
    }

    /// Sets the table position.
    #[must_use]
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position_x = Some(x);
        self.position_y = Some(y);
        self
    }

    /// Checks that the recorded position, if any, is a finite point.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NonFiniteValue`] for a NaN or infinite
    /// coordinate.
    pub fn check(&self) -> Result<(), SchemaError> {
        for (field, value) in [("position_x", self.position_x), ("position_y", self.position_y)] {
            if value.is_some_and(|coordinate| !coordinate.is_finite()) {
                return Err(SchemaError::NonFiniteValue { field });
            }
        }
        Ok(())
    }

    /// Returns true if both references denote the same unit, regardless of
    /// the context captured in each snapshot.
    #[must_use]
    pub fn same_unit(&self, other: &Self) -> bool {
        self.id == other.id
    }

    /// Compact label for dense notation.
    ///
    /// Names longer than 12 characters keep their first 10 characters
    /// followed by `..`.
    #[must_use]
    pub fn short_ref(&self) -> String {
        if self.name.chars().count() > SHORT_REF_MAX {
            let head: String = self.name.chars().take(SHORT_REF_KEEP).collect();
            format!("{head}..")
        } else {
            self.name.clone()
        }
    }
}

impl fmt::Display for UnitReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.faction)
    }
}

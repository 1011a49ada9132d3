//! Charge records.

use serde::{Deserialize, Serialize};

use super::{check_distance, ActionCommon};
use crate::error::SchemaError;
use crate::unit::UnitReference;

const DIE_FACES: std::ops::RangeInclusive<u8> = 1..=6;

/// A 2D6 charge roll.
///
/// Always exactly two dice, each 1-6. Serialized as a two-element array.
///
/// # Example
///
/// ```
/// use warscribe_core::action::ChargeRoll;
///
/// let roll = ChargeRoll::new(4, 5)?;
/// assert_eq!(roll.total(), 9);
///
/// assert!(ChargeRoll::from_dice(&[3, 3, 3]).is_err());
/// assert!(ChargeRoll::new(0, 7).is_err());
/// # Ok::<(), warscribe_core::error::SchemaError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "[u8; 2]")]
pub struct ChargeRoll([u8; 2]);

impl ChargeRoll {
    /// Creates a roll from two dice.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DieOutOfRange`] if either die is outside 1-6.
    pub fn new(first: u8, second: u8) -> Result<Self, SchemaError> {
        for value in [first, second] {
            if !DIE_FACES.contains(&value) {
                return Err(SchemaError::DieOutOfRange { value });
            }
        }
        Ok(Self([first, second]))
    }

    /// Creates a roll from a slice of dice.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ChargeRollArity`] unless exactly two dice are
    /// given, or [`SchemaError::DieOutOfRange`] for a bad face.
    pub fn from_dice(dice: &[u8]) -> Result<Self, SchemaError> {
        match *dice {
            [first, second] => Self::new(first, second),
            _ => Err(SchemaError::ChargeRollArity { count: dice.len() }),
        }
    }

    /// The two dice.
    #[must_use]
    pub const fn dice(self) -> [u8; 2] {
        self.0
    }

    /// Sum of both dice.
    #[must_use]
    pub const fn total(self) -> u32 {
        self.0[0] as u32 + self.0[1] as u32
    }
}

impl TryFrom<Vec<u8>> for ChargeRoll {
    type Error = SchemaError;

    fn try_from(dice: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_dice(&dice)
    }
}

impl From<ChargeRoll> for [u8; 2] {
    fn from(roll: ChargeRoll) -> Self {
        roll.0
    }
}

/// A unit declared a charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ChargeBuilder")]
pub struct ChargeAction {
    #[serde(flatten)]
    common: ActionCommon,
    targets: Vec<UnitReference>,
    charge_roll: ChargeRoll,
    distance_needed: f64,
    made_charge: bool,
}

impl ChargeAction {
    /// Starts building a charge against `targets`.
    ///
    /// `distance_needed` is the distance to the nearest target.
    #[must_use]
    pub fn builder(
        common: ActionCommon,
        targets: Vec<UnitReference>,
        charge_roll: ChargeRoll,
        distance_needed: f64,
    ) -> ChargeBuilder {
        ChargeBuilder {
            common,
            targets,
            charge_roll,
            distance_needed,
            made_charge: false,
        }
    }

    /// Shared action fields.
    #[must_use]
    pub const fn common(&self) -> &ActionCommon {
        &self.common
    }

    /// Charge targets. Never empty.
    #[must_use]
    pub fn targets(&self) -> &[UnitReference] {
        &self.targets
    }

    /// The 2D6 roll.
    #[must_use]
    pub const fn charge_roll(&self) -> ChargeRoll {
        self.charge_roll
    }

    /// Distance to the nearest target, in inches.
    #[must_use]
    pub const fn distance_needed(&self) -> f64 {
        self.distance_needed
    }

    /// Whether the player reported the charge as made.
    #[must_use]
    pub const fn made_charge(&self) -> bool {
        self.made_charge
    }
}

/// Builder for [`ChargeAction`]; also the shape charge documents are read into.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargeBuilder {
    #[serde(flatten)]
    common: ActionCommon,
    targets: Vec<UnitReference>,
    charge_roll: ChargeRoll,
    distance_needed: f64,
    #[serde(default)]
    made_charge: bool,
}

impl ChargeBuilder {
    /// Sets the reported outcome of the charge.
    #[must_use]
    pub fn made_charge(mut self, made: bool) -> Self {
        self.made_charge = made;
        self
    }

    /// Checks the structural invariants and produces the action.
    ///
    /// A charge reported as made with a roll below the distance needed is
    /// still structurally valid; editions flag it during validation.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] for a zero turn, no targets, a negative or
    /// non-finite distance, or a unit snapshot with a non-finite position.
    pub fn build(self) -> Result<ChargeAction, SchemaError> {
        self.common.check()?;
        if self.targets.is_empty() {
            return Err(SchemaError::NoChargeTargets);
        }
        for target in &self.targets {
            target.check()?;
        }
        check_distance("distance_needed", self.distance_needed)?;

        Ok(ChargeAction {
            common: self.common,
            targets: self.targets,
            charge_roll: self.charge_roll,
            distance_needed: self.distance_needed,
            made_charge: self.made_charge,
        })
    }
}

impl TryFrom<ChargeBuilder> for ChargeAction {
    type Error = SchemaError;

    fn try_from(builder: ChargeBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

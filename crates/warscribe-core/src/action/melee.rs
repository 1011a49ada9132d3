//! Melee records.
//!
//! Same shape as shooting, with `attacks` in place of `shots`.

use serde::{Deserialize, Serialize};

use super::{check_count, ActionCommon, StrikeResults, WeaponUse};
use crate::error::SchemaError;
use crate::unit::UnitReference;

/// A unit attacked in close combat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FightBuilder")]
pub struct FightAction {
    #[serde(flatten)]
    common: ActionCommon,
    #[serde(flatten)]
    weapon: WeaponUse,
    attacks: u32,
    #[serde(flatten)]
    results: StrikeResults,
}

impl FightAction {
    /// Starts building a melee record of `attacks` attacks.
    #[must_use]
    pub fn builder(
        common: ActionCommon,
        target: UnitReference,
        weapon_name: impl Into<String>,
        attacks: u32,
    ) -> FightBuilder {
        FightBuilder {
            common,
            weapon: WeaponUse::new(target, weapon_name),
            attacks,
            results: StrikeResults::default(),
        }
    }

    /// Shared action fields.
    #[must_use]
    pub const fn common(&self) -> &ActionCommon {
        &self.common
    }

    /// Target, weapon and dice detail.
    #[must_use]
    pub const fn weapon(&self) -> &WeaponUse {
        &self.weapon
    }

    /// The unit fought.
    #[must_use]
    pub const fn target(&self) -> &UnitReference {
        &self.weapon.target
    }

    /// Number of attacks made. Always at least 1.
    #[must_use]
    pub const fn attacks(&self) -> u32 {
        self.attacks
    }

    /// Hit, wound, save, damage and casualty counts.
    #[must_use]
    pub const fn results(&self) -> &StrikeResults {
        &self.results
    }
}

/// Builder for [`FightAction`]; also the shape fight documents are read into.
#[derive(Debug, Clone, Deserialize)]
pub struct FightBuilder {
    #[serde(flatten)]
    common: ActionCommon,
    #[serde(flatten)]
    weapon: WeaponUse,
    attacks: u32,
    #[serde(flatten)]
    results: StrikeResults,
}

impl FightBuilder {
    /// Adds a weapon stat.
    #[must_use]
    pub fn profile(mut self, stat: impl Into<String>, value: impl Into<String>) -> Self {
        self.weapon.weapon_profile.insert(stat.into(), value.into());
        self
    }

    /// Appends an active modifier, e.g. "lance".
    #[must_use]
    pub fn modifier(mut self, label: impl Into<String>) -> Self {
        self.weapon.modifiers.push(label.into());
        self
    }

    /// Records the raw dice for one step, replacing any earlier dice for it.
    #[must_use]
    pub fn dice(mut self, step: impl Into<String>, rolls: Vec<u8>) -> Self {
        self.weapon.dice_rolls.insert(step.into(), rolls);
        self
    }

    /// Sets the cascade counts.
    #[must_use]
    pub fn results(mut self, results: StrikeResults) -> Self {
        self.results = results;
        self
    }

    /// Checks the structural invariants and produces the action.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] for a zero turn, zero attacks, or a unit
    /// snapshot with a non-finite position.
    pub fn build(self) -> Result<FightAction, SchemaError> {
        self.common.check()?;
        check_count("attacks", self.attacks)?;
        self.weapon.target.check()?;

        Ok(FightAction {
            common: self.common,
            weapon: self.weapon,
            attacks: self.attacks,
            results: self.results,
        })
    }
}

impl TryFrom<FightBuilder> for FightAction {
    type Error = SchemaError;

    fn try_from(builder: FightBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(attacks: u32) -> FightBuilder {
        FightAction::builder(
            ActionCommon::new(1, "fight", UnitReference::new("Intercessor", "Imperium")),
            UnitReference::new("Gretchin", "Orks"),
            "Astartes Chainsword",
            attacks,
        )
    }

    #[test]
    fn zero_attacks_is_rejected() {
        assert_eq!(
            builder(0).build().unwrap_err(),
            SchemaError::ZeroCount { field: "attacks" }
        );
    }

    #[test]
    fn detail_is_kept() {
        let action = builder(3)
            .profile("AP", "-1")
            .modifier("sustained hits 1")
            .dice("hit", vec![4, 5, 2])
            .dice("wound", vec![4, 6])
            .results(StrikeResults {
                hits: 2,
                wounds: 2,
                ..StrikeResults::default()
            })
            .build()
            .unwrap();

        assert_eq!(action.weapon().weapon_profile["AP"], "-1");
        assert!(action
            .weapon()
            .modifiers
            .contains(&"sustained hits 1".to_string()));
        assert_eq!(action.weapon().dice_rolls["hit"].len(), 3);
        assert_eq!(action.attacks(), 3);
    }

    #[test]
    fn zero_attacks_fails_deserialization() {
        let action = builder(2).build().unwrap();
        let mut json = serde_json::to_value(&action).unwrap();
        json["attacks"] = 0.into();

        let err = serde_json::from_value::<FightAction>(json).unwrap_err();
        assert!(err.to_string().contains("attacks must be at least 1"));
    }
}

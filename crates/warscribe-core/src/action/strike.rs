//! Building blocks shared by shooting and melee records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::unit::UnitReference;

/// The attack cascade after the initial shots or attacks.
///
/// Under normal play each stage is no larger than the one before it:
/// hits, then wounds, then failed saves, then models killed. Editions flag
/// breaks in that chain during validation; the record itself accepts any
/// counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrikeResults {
    /// Successful hit rolls.
    #[serde(default)]
    pub hits: u32,
    /// Successful wound rolls.
    #[serde(default)]
    pub wounds: u32,
    /// Saving throws the target failed.
    #[serde(default)]
    pub saves_failed: u32,
    /// Total damage inflicted.
    #[serde(default)]
    pub damage_dealt: u32,
    /// Models removed as casualties.
    #[serde(default)]
    pub models_killed: u32,
}

impl StrikeResults {
    /// Creates a full result set.
    #[must_use]
    pub const fn new(
        hits: u32,
        wounds: u32,
        saves_failed: u32,
        damage_dealt: u32,
        models_killed: u32,
    ) -> Self {
        Self {
            hits,
            wounds,
            saves_failed,
            damage_dealt,
            models_killed,
        }
    }
}

/// What was attacked and with what.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponUse {
    /// The unit being attacked.
    pub target: UnitReference,
    /// Weapon used.
    pub weapon_name: String,
    /// Key weapon stats, e.g. `S`, `AP`, `D`.
    #[serde(default)]
    pub weapon_profile: BTreeMap<String, String>,
    /// Active modifiers, e.g. "heavy", "cover".
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// Raw dice by step, usually "hit", "wound" and "save".
    #[serde(default)]
    pub dice_rolls: BTreeMap<String, Vec<u8>>,
}

impl WeaponUse {
    pub(super) fn new(target: UnitReference, weapon_name: impl Into<String>) -> Self {
        Self {
            target,
            weapon_name: weapon_name.into(),
            weapon_profile: BTreeMap::new(),
            modifiers: Vec::new(),
            dice_rolls: BTreeMap::new(),
        }
    }
}

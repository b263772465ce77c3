//! Bag items usable mid-battle.
//!
//! The bag is an [`Inventory`] owned by the caller and lent to the battle for
//! each item use.

use crate::error::BattleError;
use crate::status::Ailment;
use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Alarm,
    Antidote,
    Heater,
    Suncream,
    ParalyzeHeal,
    Potion,
    Pokeball,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ItemEffect {
    Cure(Ailment),
    FullHeal,
    Catch,
}

static ITEM_NAMES: phf::Map<&'static str, ItemKind> = phf_map! {
    "alarm" => ItemKind::Alarm,
    "antidote" => ItemKind::Antidote,
    "heater" => ItemKind::Heater,
    "suncream" => ItemKind::Suncream,
    "paralyzeheal" => ItemKind::ParalyzeHeal,
    "potion" => ItemKind::Potion,
    "pokeball" => ItemKind::Pokeball,
};

impl ItemKind {
    pub const ALL: [ItemKind; 7] = [
        ItemKind::Alarm,
        ItemKind::Antidote,
        ItemKind::Heater,
        ItemKind::Suncream,
        ItemKind::ParalyzeHeal,
        ItemKind::Potion,
        ItemKind::Pokeball,
    ];

    /// Case-insensitive; spaces, dashes and underscores are ignored and an
    /// accented e matches a plain one.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| match c {
                '\u{e9}' | '\u{c9}' => 'e',
                other => other.to_ascii_lowercase(),
            })
            .collect();
        ITEM_NAMES.get(key.as_str()).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Alarm => "Alarm",
            ItemKind::Antidote => "Antidote",
            ItemKind::Heater => "Heater",
            ItemKind::Suncream => "Suncream",
            ItemKind::ParalyzeHeal => "Paralyze Heal",
            ItemKind::Potion => "Potion",
            ItemKind::Pokeball => "Pokeball",
        }
    }

    pub fn effect(self) -> ItemEffect {
        match self {
            ItemKind::Alarm => ItemEffect::Cure(Ailment::Sleep),
            ItemKind::Antidote => ItemEffect::Cure(Ailment::Poison),
            ItemKind::Heater => ItemEffect::Cure(Ailment::Freeze),
            ItemKind::Suncream => ItemEffect::Cure(Ailment::Burn),
            ItemKind::ParalyzeHeal => ItemEffect::Cure(Ailment::Paralysis),
            ItemKind::Potion => ItemEffect::FullHeal,
            ItemKind::Pokeball => ItemEffect::Catch,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Item counts. Kinds with no entry count as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    counts: BTreeMap<ItemKind, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bag a new player starts with.
    pub fn starter() -> Self {
        [
            (ItemKind::Alarm, 1),
            (ItemKind::Antidote, 2),
            (ItemKind::Heater, 1),
            (ItemKind::Pokeball, 3),
            (ItemKind::Potion, 2),
            (ItemKind::Suncream, 2),
            (ItemKind::ParalyzeHeal, 1),
        ]
        .into_iter()
        .collect()
    }

    pub fn quantity(&self, kind: ItemKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn has(&self, kind: ItemKind) -> bool {
        self.quantity(kind) > 0
    }

    pub fn add(&mut self, kind: ItemKind, amount: u32) {
        *self.counts.entry(kind).or_insert(0) += amount;
    }

    /// Remove one `kind`, failing without change when none is left.
    pub fn take(&mut self, kind: ItemKind) -> Result<(), BattleError> {
        match self.counts.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                Ok(())
            }
            _ => Err(BattleError::ItemUnavailable(kind)),
        }
    }

    /// Kinds currently in stock.
    pub fn available(&self) -> Vec<ItemKind> {
        self.counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(kind, _)| *kind)
            .collect()
    }
}

impl FromIterator<(ItemKind, u32)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (ItemKind, u32)>>(iter: I) -> Self {
        let mut inventory = Inventory::new();
        for (kind, amount) in iter {
            inventory.add(kind, amount);
        }
        inventory
    }
}

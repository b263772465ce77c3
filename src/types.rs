//! Elemental types and the type-effectiveness chart.
//!
//! The chart is data, not code: a [`TypeChart`] is a sparse table of
//! `(attacking, defending) -> factor` entries where every missing pair is
//! neutral. Two tables ship with the crate, the full eighteen-type chart and
//! a reduced six-type chart.

use once_cell::sync::Lazy;
use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
    /// Any tag the loader did not recognise. Neutral against everything.
    Unknown,
}

static TYPE_TAGS: phf::Map<&'static str, ElementType> = phf_map! {
    "normal" => ElementType::Normal,
    "fire" => ElementType::Fire,
    "water" => ElementType::Water,
    "electric" => ElementType::Electric,
    "grass" => ElementType::Grass,
    "ice" => ElementType::Ice,
    "fighting" => ElementType::Fighting,
    "poison" => ElementType::Poison,
    "ground" => ElementType::Ground,
    "flying" => ElementType::Flying,
    "psychic" => ElementType::Psychic,
    "bug" => ElementType::Bug,
    "rock" => ElementType::Rock,
    "ghost" => ElementType::Ghost,
    "dragon" => ElementType::Dragon,
    "dark" => ElementType::Dark,
    "steel" => ElementType::Steel,
    "fairy" => ElementType::Fairy,
};

impl ElementType {
    /// Parse a type tag, ignoring case. Unrecognised tags become [`ElementType::Unknown`].
    pub fn from_tag(tag: &str) -> Self {
        let key = tag.trim().to_ascii_lowercase();
        TYPE_TAGS.get(key.as_str()).copied().unwrap_or(ElementType::Unknown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Normal => "normal",
            ElementType::Fire => "fire",
            ElementType::Water => "water",
            ElementType::Electric => "electric",
            ElementType::Grass => "grass",
            ElementType::Ice => "ice",
            ElementType::Fighting => "fighting",
            ElementType::Poison => "poison",
            ElementType::Ground => "ground",
            ElementType::Flying => "flying",
            ElementType::Psychic => "psychic",
            ElementType::Bug => "bug",
            ElementType::Rock => "rock",
            ElementType::Ghost => "ghost",
            ElementType::Dragon => "dragon",
            ElementType::Dark => "dark",
            ElementType::Steel => "steel",
            ElementType::Fairy => "fairy",
            ElementType::Unknown => "unknown",
        }
    }
}

impl From<String> for ElementType {
    fn from(tag: String) -> Self {
        ElementType::from_tag(&tag)
    }
}

impl From<ElementType> for String {
    fn from(element: ElementType) -> Self {
        element.as_str().to_string()
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attacking type, then the defenders it hits for 2x, 0.5x and 0x.
type ChartRow<'a> = (
    ElementType,
    &'a [ElementType],
    &'a [ElementType],
    &'a [ElementType],
);

#[derive(Clone, Debug, Default)]
pub struct TypeChart {
    entries: HashMap<(ElementType, ElementType), f32>,
}

impl TypeChart {
    /// An empty chart: every matchup is neutral.
    pub fn new() -> Self {
        Self::default()
    }

    fn from_rows(rows: &[ChartRow<'_>]) -> Self {
        let mut chart = Self::new();
        for (attacking, super_effective, resisted, immune) in rows {
            for defending in *super_effective {
                chart.set(*attacking, *defending, 2.0);
            }
            for defending in *resisted {
                chart.set(*attacking, *defending, 0.5);
            }
            for defending in *immune {
                chart.set(*attacking, *defending, 0.0);
            }
        }
        chart
    }

    /// The eighteen-type chart.
    pub fn standard() -> Self {
        use ElementType::*;
        let rows: &[ChartRow<'_>] = &[
            (Normal, &[], &[Rock, Steel], &[Ghost]),
            (Fire, &[Grass, Ice, Bug, Steel], &[Fire, Water, Rock, Dragon], &[]),
            (Water, &[Fire, Ground, Rock], &[Water, Grass, Dragon], &[]),
            (Electric, &[Water, Flying], &[Electric, Grass, Dragon], &[Ground]),
            (
                Grass,
                &[Water, Ground, Rock],
                &[Fire, Grass, Poison, Flying, Bug, Dragon, Steel],
                &[],
            ),
            (Ice, &[Grass, Ground, Flying, Dragon], &[Fire, Water, Ice, Steel], &[]),
            (
                Fighting,
                &[Normal, Ice, Rock, Dark, Steel],
                &[Poison, Flying, Psychic, Bug, Fairy],
                &[Ghost],
            ),
            (Poison, &[Grass, Fairy], &[Poison, Ground, Rock, Ghost], &[Steel]),
            (Ground, &[Fire, Electric, Poison, Rock, Steel], &[Grass, Bug], &[Flying]),
            (Flying, &[Grass, Fighting, Bug], &[Electric, Rock, Steel], &[]),
            (Psychic, &[Fighting, Poison], &[Psychic, Steel], &[Dark]),
            (
                Bug,
                &[Grass, Psychic, Dark],
                &[Fire, Fighting, Poison, Flying, Ghost, Steel, Fairy],
                &[],
            ),
            (Rock, &[Fire, Ice, Flying, Bug], &[Fighting, Ground, Steel], &[]),
            (Ghost, &[Ghost, Psychic], &[Dark], &[Normal]),
            (Dragon, &[Dragon], &[Steel], &[Fairy]),
            (Dark, &[Psychic, Ghost], &[Fighting, Dark, Fairy], &[]),
            (Steel, &[Rock, Ice, Fairy], &[Fire, Water, Electric, Steel], &[]),
            (Fairy, &[Fighting, Dragon, Dark], &[Fire, Poison, Steel], &[]),
        ];
        Self::from_rows(rows)
    }

    /// Six types only. Flying attacks do nothing to ground types here.
    pub fn simplified() -> Self {
        use ElementType::*;
        let rows: &[ChartRow<'_>] = &[
            (Fire, &[Grass], &[Water, Fire], &[]),
            (Water, &[Fire], &[Grass, Water], &[]),
            (Grass, &[Water], &[Fire, Grass], &[]),
            (Electric, &[Water], &[], &[Ground]),
            (Ground, &[Electric], &[], &[]),
            (Flying, &[], &[], &[Ground]),
        ];
        Self::from_rows(rows)
    }

    pub fn set(&mut self, attacking: ElementType, defending: ElementType, factor: f32) {
        self.entries.insert((attacking, defending), factor);
    }

    /// Single matchup factor. Unlisted pairs, and anything involving
    /// [`ElementType::Unknown`], are neutral.
    pub fn factor(&self, attacking: ElementType, defending: ElementType) -> f32 {
        self.entries
            .get(&(attacking, defending))
            .copied()
            .unwrap_or(1.0)
    }

    /// Product of the single matchups against every defending type.
    pub fn effectiveness(&self, attacking: ElementType, defending: &[ElementType]) -> f32 {
        defending
            .iter()
            .fold(1.0, |multiplier, defender| multiplier * self.factor(attacking, *defender))
    }
}

pub static STANDARD_CHART: Lazy<TypeChart> = Lazy::new(TypeChart::standard);
pub static SIMPLIFIED_CHART: Lazy<TypeChart> = Lazy::new(TypeChart::simplified);

/// Which shipped chart a battle resolves against.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartVariant {
    #[default]
    Standard,
    Simplified,
}

impl ChartVariant {
    pub fn chart(self) -> &'static TypeChart {
        match self {
            ChartVariant::Standard => &STANDARD_CHART,
            ChartVariant::Simplified => &SIMPLIFIED_CHART,
        }
    }
}

pub fn type_effectiveness(move_type: ElementType, target_types: &[ElementType]) -> f32 {
    STANDARD_CHART.effectiveness(move_type, target_types)
}

/// Qualifier reported alongside damage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effectiveness {
    NoEffect,
    NotVeryEffective,
    Neutral,
    SuperEffective,
}

impl Effectiveness {
    pub fn from_multiplier(multiplier: f32) -> Self {
        if multiplier == 0.0 {
            Effectiveness::NoEffect
        } else if multiplier < 1.0 {
            Effectiveness::NotVeryEffective
        } else if multiplier > 1.0 {
            Effectiveness::SuperEffective
        } else {
            Effectiveness::Neutral
        }
    }
}

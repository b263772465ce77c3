use serde::{Deserialize, Serialize};

pub const MIN_STAGE: i8 = -6;
pub const MAX_STAGE: i8 = 6;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
    Accuracy,
    Evasion,
}

impl Stat {
    pub const ALL: [Stat; 7] = [
        Stat::Attack,
        Stat::Defense,
        Stat::SpecialAttack,
        Stat::SpecialDefense,
        Stat::Speed,
        Stat::Accuracy,
        Stat::Evasion,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Stat::Attack => "Attack",
            Stat::Defense => "Defense",
            Stat::SpecialAttack => "Sp. Atk",
            Stat::SpecialDefense => "Sp. Def",
            Stat::Speed => "Speed",
            Stat::Accuracy => "accuracy",
            Stat::Evasion => "evasiveness",
        }
    }
}

/// Permanent stats. Only changed between battles (level-up).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

impl BaseStats {
    /// Base value of a stat. Accuracy and evasion exist only as stages.
    pub fn get(&self, stat: Stat) -> Option<u32> {
        match stat {
            Stat::Attack => Some(self.attack),
            Stat::Defense => Some(self.defense),
            Stat::SpecialAttack => Some(self.special_attack),
            Stat::SpecialDefense => Some(self.special_defense),
            Stat::Speed => Some(self.speed),
            Stat::Accuracy | Stat::Evasion => None,
        }
    }

    /// Every stat multiplied by `numerator / denominator`, floored.
    pub fn scaled(&self, numerator: u32, denominator: u32) -> Self {
        let scale = |value: u32| (value as u64 * numerator as u64 / denominator.max(1) as u64) as u32;
        Self {
            hp: scale(self.hp),
            attack: scale(self.attack),
            defense: scale(self.defense),
            special_attack: scale(self.special_attack),
            special_defense: scale(self.special_defense),
            speed: scale(self.speed),
        }
    }

    pub(crate) fn has_zero(&self) -> bool {
        [
            self.hp,
            self.attack,
            self.defense,
            self.special_attack,
            self.special_defense,
            self.speed,
        ]
        .contains(&0)
    }
}

/// In-battle stage modifiers, each kept in [-6, 6].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatStages {
    #[serde(default)]
    pub attack: i8,
    #[serde(default)]
    pub defense: i8,
    #[serde(default)]
    pub special_attack: i8,
    #[serde(default)]
    pub special_defense: i8,
    #[serde(default)]
    pub speed: i8,
    #[serde(default)]
    pub accuracy: i8,
    #[serde(default)]
    pub evasion: i8,
}

impl StatStages {
    pub fn get(&self, stat: Stat) -> i8 {
        match stat {
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::SpecialAttack => self.special_attack,
            Stat::SpecialDefense => self.special_defense,
            Stat::Speed => self.speed,
            Stat::Accuracy => self.accuracy,
            Stat::Evasion => self.evasion,
        }
    }

    fn slot(&mut self, stat: Stat) -> &mut i8 {
        match stat {
            Stat::Attack => &mut self.attack,
            Stat::Defense => &mut self.defense,
            Stat::SpecialAttack => &mut self.special_attack,
            Stat::SpecialDefense => &mut self.special_defense,
            Stat::Speed => &mut self.speed,
            Stat::Accuracy => &mut self.accuracy,
            Stat::Evasion => &mut self.evasion,
        }
    }

    /// Shift a stage by `delta`, clamped to [-6, 6]. Returns the change that
    /// actually happened (0 when already at the limit).
    pub fn apply(&mut self, stat: Stat, delta: i8) -> i8 {
        let slot = self.slot(stat);
        let current = (*slot).clamp(MIN_STAGE, MAX_STAGE);
        let next = current.saturating_add(delta).clamp(MIN_STAGE, MAX_STAGE);
        *slot = next;
        next - current
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn in_range(&self) -> bool {
        Stat::ALL
            .iter()
            .all(|stat| (MIN_STAGE..=MAX_STAGE).contains(&self.get(*stat)))
    }
}

/// Multiplier for attack, defense, special stats and speed.
pub fn stage_multiplier(stage: i8) -> f32 {
    let stage = stage.clamp(MIN_STAGE, MAX_STAGE) as i32;
    if stage >= 0 {
        (2 + stage) as f32 / 2.0
    } else {
        2.0 / (2 - stage) as f32
    }
}

/// Multiplier for the accuracy and evasion stages.
pub fn accuracy_multiplier(stage: i8) -> f32 {
    let stage = stage.clamp(MIN_STAGE, MAX_STAGE) as i32;
    if stage >= 0 {
        (3 + stage) as f32 / 3.0
    } else {
        3.0 / (3 - stage) as f32
    }
}

/// Effective stat from the unmodified base value; never compounds.
pub fn apply_stage_multiplier(base: u32, stage: i8) -> u32 {
    let value = (base as f32) * stage_multiplier(stage);
    value.floor().max(1.0) as u32
}

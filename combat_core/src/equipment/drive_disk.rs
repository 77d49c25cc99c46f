//! DriveDisk - Six-slot disk equipment with rarity/level scaling and set bonuses

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buff::Buff;
use crate::equipment::ContributionSource;
use crate::property::PropertyCollection;
use crate::types::{DiskSlot, PropertyType, Rarity};

/// Sub-stats a disk may roll, regardless of slot
pub const AVAILABLE_SUB_STATS: &[PropertyType] = &[
    PropertyType::HpFlat,
    PropertyType::AttackFlat,
    PropertyType::DefenseFlat,
    PropertyType::PenFlat,
    PropertyType::AnomalyProficiency,
    PropertyType::HpPercent,
    PropertyType::AttackPercent,
    PropertyType::DefensePercent,
    PropertyType::CritRate,
    PropertyType::CritDamage,
];

/// Maximum enhancement level for a rarity
pub fn max_level(rarity: Rarity) -> u32 {
    match rarity {
        Rarity::S => 15,
        Rarity::A => 12,
        Rarity::B => 9,
    }
}

/// Main stats legal for a slot
pub fn slot_main_stats(slot: DiskSlot) -> &'static [PropertyType] {
    match slot {
        DiskSlot::One => &[PropertyType::HpFlat],
        DiskSlot::Two => &[PropertyType::AttackFlat],
        DiskSlot::Three => &[PropertyType::DefenseFlat],
        DiskSlot::Four => &[
            PropertyType::HpPercent,
            PropertyType::AttackPercent,
            PropertyType::DefensePercent,
            PropertyType::CritRate,
            PropertyType::CritDamage,
            PropertyType::AnomalyProficiency,
        ],
        DiskSlot::Five => &[
            PropertyType::HpPercent,
            PropertyType::AttackPercent,
            PropertyType::DefensePercent,
            PropertyType::PenRate,
            PropertyType::PhysicalDamageBonus,
            PropertyType::FireDamageBonus,
            PropertyType::IceDamageBonus,
            PropertyType::ElectricDamageBonus,
            PropertyType::EtherDamageBonus,
        ],
        DiskSlot::Six => &[
            PropertyType::HpPercent,
            PropertyType::AttackPercent,
            PropertyType::DefensePercent,
            PropertyType::AnomalyMastery,
            PropertyType::ImpactPercent,
            PropertyType::EnergyRegenPercent,
        ],
    }
}

/// Main-stat value at maximum enhancement level
///
/// Returns None for stats that never appear as a main stat.
pub fn main_stat_max(rarity: Rarity, stat: PropertyType) -> Option<f64> {
    let value = match rarity {
        Rarity::S => match stat {
            PropertyType::AttackPercent => 0.30,
            PropertyType::HpPercent => 0.30,
            PropertyType::DefensePercent => 0.48,
            PropertyType::CritRate => 0.24,
            PropertyType::CritDamage => 0.48,
            PropertyType::PenRate => 0.24,
            PropertyType::AttackFlat => 316.0,
            PropertyType::HpFlat => 2200.0,
            PropertyType::DefenseFlat => 184.0,
            PropertyType::AnomalyProficiency => 92.0,
            PropertyType::AnomalyMastery => 92.0,
            PropertyType::ImpactPercent => 0.18,
            PropertyType::EnergyRegenPercent => 0.60,
            PropertyType::PhysicalDamageBonus
            | PropertyType::FireDamageBonus
            | PropertyType::IceDamageBonus
            | PropertyType::ElectricDamageBonus
            | PropertyType::EtherDamageBonus => 0.30,
            _ => return None,
        },
        Rarity::A => match stat {
            PropertyType::AttackPercent => 0.20,
            PropertyType::HpPercent => 0.20,
            PropertyType::DefensePercent => 0.32,
            PropertyType::CritRate => 0.16,
            PropertyType::CritDamage => 0.32,
            PropertyType::PenRate => 0.16,
            PropertyType::AttackFlat => 212.0,
            PropertyType::HpFlat => 1468.0,
            PropertyType::DefenseFlat => 124.0,
            PropertyType::AnomalyProficiency => 60.0,
            PropertyType::AnomalyMastery => 60.0,
            PropertyType::ImpactPercent => 0.12,
            PropertyType::EnergyRegenPercent => 0.40,
            PropertyType::PhysicalDamageBonus
            | PropertyType::FireDamageBonus
            | PropertyType::IceDamageBonus
            | PropertyType::ElectricDamageBonus
            | PropertyType::EtherDamageBonus => 0.20,
            _ => return None,
        },
        Rarity::B => match stat {
            PropertyType::AttackPercent => 0.10,
            PropertyType::HpPercent => 0.10,
            PropertyType::DefensePercent => 0.16,
            PropertyType::CritRate => 0.08,
            PropertyType::CritDamage => 0.16,
            PropertyType::PenRate => 0.08,
            PropertyType::AttackFlat => 104.0,
            PropertyType::HpFlat => 734.0,
            PropertyType::DefenseFlat => 60.0,
            PropertyType::AnomalyProficiency => 32.0,
            PropertyType::AnomalyMastery => 32.0,
            PropertyType::ImpactPercent => 0.06,
            PropertyType::EnergyRegenPercent => 0.20,
            PropertyType::PhysicalDamageBonus
            | PropertyType::FireDamageBonus
            | PropertyType::IceDamageBonus
            | PropertyType::ElectricDamageBonus
            | PropertyType::EtherDamageBonus => 0.10,
            _ => return None,
        },
    };
    Some(value)
}

/// Sub-stat value of a single roll
///
/// Returns None for stats that never appear as a sub-stat.
pub fn sub_stat_base(rarity: Rarity, stat: PropertyType) -> Option<f64> {
    let value = match rarity {
        Rarity::S => match stat {
            PropertyType::AttackFlat => 19.0,
            PropertyType::HpFlat => 112.0,
            PropertyType::DefenseFlat => 15.0,
            PropertyType::PenFlat => 9.0,
            PropertyType::AnomalyProficiency => 9.0,
            PropertyType::AttackPercent => 0.03,
            PropertyType::HpPercent => 0.03,
            PropertyType::DefensePercent => 0.048,
            PropertyType::CritRate => 0.024,
            PropertyType::CritDamage => 0.048,
            _ => return None,
        },
        Rarity::A => match stat {
            PropertyType::AttackFlat => 15.0,
            PropertyType::HpFlat => 79.0,
            PropertyType::DefenseFlat => 10.0,
            PropertyType::PenFlat => 6.0,
            PropertyType::AnomalyProficiency => 6.0,
            PropertyType::AttackPercent => 0.02,
            PropertyType::HpPercent => 0.02,
            PropertyType::DefensePercent => 0.032,
            PropertyType::CritRate => 0.016,
            PropertyType::CritDamage => 0.032,
            _ => return None,
        },
        Rarity::B => match stat {
            PropertyType::AttackFlat => 7.0,
            PropertyType::HpFlat => 39.0,
            PropertyType::DefenseFlat => 5.0,
            PropertyType::PenFlat => 3.0,
            PropertyType::AnomalyProficiency => 3.0,
            PropertyType::AttackPercent => 0.01,
            PropertyType::HpPercent => 0.01,
            PropertyType::DefensePercent => 0.016,
            PropertyType::CritRate => 0.008,
            PropertyType::CritDamage => 0.016,
            _ => return None,
        },
    };
    Some(value)
}

/// Validation failures for a drive disk
#[derive(Debug, Error, PartialEq)]
pub enum DiskError {
    #[error("main stat {stat:?} is not legal in slot {slot:?}")]
    IllegalMainStat { slot: DiskSlot, stat: PropertyType },

    #[error("level {level} exceeds the {rarity:?}-rank cap of {cap}")]
    LevelAboveCap { rarity: Rarity, level: u32, cap: u32 },

    #[error("disk carries {count} sub-stats, maximum is 4")]
    TooManySubStats { count: usize },

    #[error("{stat:?} cannot appear as a sub-stat")]
    IllegalSubStat { stat: PropertyType },

    #[error("sub-stat {stat:?} duplicates the main stat")]
    SubStatDuplicatesMain { stat: PropertyType },

    #[error("sub-stat {stat:?} has {rolls} rolls, expected 1-5")]
    RollsOutOfRange { stat: PropertyType, rolls: u32 },
}

/// One sub-stat line: a stat and how many times it rolled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubStat {
    pub stat: PropertyType,
    pub rolls: u32,
}

/// A drive disk
///
/// Main-stat value scales with enhancement level:
/// max_value × (0.25 + 0.75 × level / max_level).
/// Sub-stat value is the per-roll base times the roll count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveDisk {
    /// Unique identifier
    pub id: String,
    /// Set this disk belongs to
    pub set_id: String,
    /// Slot the disk occupies
    pub slot: DiskSlot,
    /// Rarity rank
    pub rarity: Rarity,
    /// Enhancement level (0 to the rarity cap)
    pub level: u32,
    /// Main stat type
    pub main_stat: PropertyType,
    /// Sub-stat lines, at most four
    pub sub_stats: Vec<SubStat>,
}

impl DriveDisk {
    /// Create a new unenhanced disk with no sub-stats
    pub fn new(
        id: impl Into<String>,
        set_id: impl Into<String>,
        slot: DiskSlot,
        rarity: Rarity,
        main_stat: PropertyType,
    ) -> Self {
        DriveDisk {
            id: id.into(),
            set_id: set_id.into(),
            slot,
            rarity,
            level: 0,
            main_stat,
            sub_stats: Vec::new(),
        }
    }

    /// Set the enhancement level
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Add a sub-stat line
    pub fn with_sub(mut self, stat: PropertyType, rolls: u32) -> Self {
        self.sub_stats.push(SubStat { stat, rolls });
        self
    }

    /// Current main-stat value at this disk's level
    pub fn main_stat_value(&self) -> f64 {
        match main_stat_max(self.rarity, self.main_stat) {
            Some(max) => {
                let cap = max_level(self.rarity) as f64;
                max * (0.25 + 0.75 * self.level as f64 / cap)
            }
            None => 0.0,
        }
    }

    /// Current value of one sub-stat line
    pub fn sub_stat_value(&self, sub: &SubStat) -> f64 {
        match sub_stat_base(self.rarity, sub.stat) {
            Some(base) => base * sub.rolls as f64,
            None => 0.0,
        }
    }

    /// Check slot legality, level cap, and sub-stat rules
    pub fn validate(&self) -> Result<(), DiskError> {
        if !slot_main_stats(self.slot).contains(&self.main_stat) {
            return Err(DiskError::IllegalMainStat {
                slot: self.slot,
                stat: self.main_stat,
            });
        }

        let cap = max_level(self.rarity);
        if self.level > cap {
            return Err(DiskError::LevelAboveCap {
                rarity: self.rarity,
                level: self.level,
                cap,
            });
        }

        if self.sub_stats.len() > 4 {
            return Err(DiskError::TooManySubStats {
                count: self.sub_stats.len(),
            });
        }

        for sub in &self.sub_stats {
            if !AVAILABLE_SUB_STATS.contains(&sub.stat) {
                return Err(DiskError::IllegalSubStat { stat: sub.stat });
            }
            if sub.stat == self.main_stat {
                return Err(DiskError::SubStatDuplicatesMain { stat: sub.stat });
            }
            if !(1..=5).contains(&sub.rolls) {
                return Err(DiskError::RollsOutOfRange {
                    stat: sub.stat,
                    rolls: sub.rolls,
                });
            }
        }

        Ok(())
    }
}

impl ContributionSource for DriveDisk {
    fn id(&self) -> &str {
        &self.id
    }

    /// All disk stats land in the pre-battle layer
    fn collection(&self) -> PropertyCollection {
        let mut collection = PropertyCollection::new();
        collection.add_pre_battle(self.main_stat, self.main_stat_value());
        for sub in &self.sub_stats {
            collection.add_pre_battle(sub.stat, self.sub_stat_value(sub));
        }
        collection
    }
}

/// Set-bonus definition shared by every disk carrying the same set id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveDiskSet {
    /// Set identifier matched against DriveDisk::set_id
    pub set_id: String,
    /// Display name
    pub name: String,
    /// Buffs granted at two or more equipped pieces
    pub two_piece: Vec<Buff>,
    /// Buffs granted at four or more equipped pieces
    pub four_piece: Vec<Buff>,
}

impl DriveDiskSet {
    /// Define a set with no bonuses yet
    pub fn new(set_id: impl Into<String>, name: impl Into<String>) -> Self {
        DriveDiskSet {
            set_id: set_id.into(),
            name: name.into(),
            two_piece: Vec::new(),
            four_piece: Vec::new(),
        }
    }

    /// Add a two-piece bonus buff
    pub fn with_two_piece(mut self, buff: Buff) -> Self {
        self.two_piece.push(buff);
        self
    }

    /// Add a four-piece bonus buff
    pub fn with_four_piece(mut self, buff: Buff) -> Self {
        self.four_piece.push(buff);
        self
    }

    /// Bonus buffs active at the given equipped-piece count
    ///
    /// Two-piece bonuses stay active alongside four-piece bonuses.
    pub fn active_buffs(&self, piece_count: usize) -> Vec<Buff> {
        let mut buffs = Vec::new();
        if piece_count >= 2 {
            buffs.extend(self.two_piece.iter().cloned());
        }
        if piece_count >= 4 {
            buffs.extend(self.four_piece.iter().cloned());
        }
        buffs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_stat_scales_with_level() {
        // S-rank ATK%: 0.30 × (0.25 + 0.75 × 15/15) = 0.30
        let disk = DriveDisk::new("d1", "set_a", DiskSlot::Four, Rarity::S, PropertyType::AttackPercent)
            .with_level(15);
        assert!((disk.main_stat_value() - 0.30).abs() < 1e-9);

        // Unenhanced: 0.30 × 0.25 = 0.075
        let disk = disk.with_level(0);
        assert!((disk.main_stat_value() - 0.075).abs() < 1e-9);

        // A-rank flat HP at 6/12: 1468 × (0.25 + 0.75 × 0.5) = 917.5
        let disk = DriveDisk::new("d2", "set_a", DiskSlot::One, Rarity::A, PropertyType::HpFlat)
            .with_level(6);
        assert!((disk.main_stat_value() - 917.5).abs() < 1e-9);
    }

    #[test]
    fn test_sub_stat_value_is_base_times_rolls() {
        let disk = DriveDisk::new("d1", "set_a", DiskSlot::Two, Rarity::S, PropertyType::AttackFlat)
            .with_sub(PropertyType::CritRate, 3)
            .with_sub(PropertyType::HpFlat, 1);

        // 0.024 × 3 = 0.072
        assert!((disk.sub_stat_value(&disk.sub_stats[0]) - 0.072).abs() < 1e-9);
        // 112 × 1 = 112
        assert!((disk.sub_stat_value(&disk.sub_stats[1]) - 112.0).abs() < 1e-9);
    }

    #[test]
    fn test_collection_combines_main_and_subs() {
        let disk = DriveDisk::new("d1", "set_a", DiskSlot::Two, Rarity::S, PropertyType::AttackFlat)
            .with_level(15)
            .with_sub(PropertyType::AttackPercent, 2);

        let collection = disk.collection();
        assert!((collection.pre_battle(PropertyType::AttackFlat) - 316.0).abs() < 1e-9);
        assert!((collection.pre_battle(PropertyType::AttackPercent) - 0.06).abs() < 1e-9);
        assert!(collection.in_battle(PropertyType::AttackFlat) == 0.0);
    }

    #[test]
    fn test_validate_slot_legality() {
        // Crit rate is never a slot-one main stat
        let disk = DriveDisk::new("d1", "set_a", DiskSlot::One, Rarity::S, PropertyType::CritRate);
        assert_eq!(
            disk.validate(),
            Err(DiskError::IllegalMainStat {
                slot: DiskSlot::One,
                stat: PropertyType::CritRate,
            })
        );

        let disk = DriveDisk::new("d1", "set_a", DiskSlot::One, Rarity::S, PropertyType::HpFlat);
        assert!(disk.validate().is_ok());
    }

    #[test]
    fn test_validate_level_cap() {
        let disk = DriveDisk::new("d1", "set_a", DiskSlot::One, Rarity::B, PropertyType::HpFlat)
            .with_level(10);
        assert_eq!(
            disk.validate(),
            Err(DiskError::LevelAboveCap {
                rarity: Rarity::B,
                level: 10,
                cap: 9,
            })
        );
    }

    #[test]
    fn test_validate_sub_stat_rules() {
        let base = DriveDisk::new("d1", "set_a", DiskSlot::Two, Rarity::S, PropertyType::AttackFlat);

        // Duplicating the main stat
        let disk = base.clone().with_sub(PropertyType::AttackFlat, 1);
        assert_eq!(
            disk.validate(),
            Err(DiskError::SubStatDuplicatesMain {
                stat: PropertyType::AttackFlat,
            })
        );

        // Stat that never rolls as a sub
        let disk = base.clone().with_sub(PropertyType::DamageBonus, 1);
        assert_eq!(
            disk.validate(),
            Err(DiskError::IllegalSubStat {
                stat: PropertyType::DamageBonus,
            })
        );

        // Roll count out of range
        let disk = base.clone().with_sub(PropertyType::CritRate, 6);
        assert_eq!(
            disk.validate(),
            Err(DiskError::RollsOutOfRange {
                stat: PropertyType::CritRate,
                rolls: 6,
            })
        );

        // Five sub-stat lines
        let disk = base
            .clone()
            .with_sub(PropertyType::CritRate, 1)
            .with_sub(PropertyType::CritDamage, 1)
            .with_sub(PropertyType::HpFlat, 1)
            .with_sub(PropertyType::DefenseFlat, 1)
            .with_sub(PropertyType::PenFlat, 1);
        assert_eq!(disk.validate(), Err(DiskError::TooManySubStats { count: 5 }));

        let disk = base
            .with_sub(PropertyType::CritRate, 5)
            .with_sub(PropertyType::CritDamage, 3)
            .with_sub(PropertyType::HpFlat, 1)
            .with_sub(PropertyType::PenFlat, 2);
        assert!(disk.validate().is_ok());
    }

    #[test]
    fn test_set_bonus_activation_thresholds() {
        let set = DriveDiskSet::new("set_a", "Polar Vortex")
            .with_two_piece(Buff::new("set_a_2pc", "2pc").with_pre_battle(PropertyType::CritRate, 0.08))
            .with_four_piece(
                Buff::new("set_a_4pc", "4pc").with_in_battle(PropertyType::AttackPercent, 0.12),
            );

        assert!(set.active_buffs(1).is_empty());
        assert_eq!(set.active_buffs(2).len(), 1);
        assert_eq!(set.active_buffs(3).len(), 1);

        let at_four = set.active_buffs(4);
        assert_eq!(at_four.len(), 2);
        assert_eq!(at_four[0].id, "set_a_2pc");
        assert_eq!(at_four[1].id, "set_a_4pc");

        assert_eq!(set.active_buffs(6).len(), 2);
    }
}

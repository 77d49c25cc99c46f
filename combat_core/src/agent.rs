//! Agent - Playable character with base stats, equipment, and innate kit

use serde::{Deserialize, Serialize};

use crate::buff::{Buff, ConversionBuff};
use crate::equipment::{ContributionSource, DriveDisk, DriveDiskSet, WEngine};
use crate::property::{CombatStats, PropertyCollection};
use crate::types::{Element, PropertyType};

/// Crit rate every agent starts with
pub const DEFAULT_CRIT_RATE: f64 = 0.05;
/// Crit damage every agent starts with
pub const DEFAULT_CRIT_DAMAGE: f64 = 0.50;

/// A playable character
///
/// Owns its base panel, equipped gear, innate kit bonuses, and the buffs
/// and conversion modifiers its kit grants. Resolution gathers every
/// contribution into collections and hands them to the snapshot resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Character level, feeds the enemy level coefficient on the other side
    pub level: u32,
    /// Attribute of the agent's kit, if any
    pub element: Option<Element>,

    // === Base panel ===
    pub base_attack: f64,
    pub base_hp: f64,
    pub base_defense: f64,
    pub base_impact: f64,

    /// Innate kit bonuses (core passives, potential ranks)
    kit: PropertyCollection,
    /// Equipped weapon engine
    wengine: Option<WEngine>,
    /// Equipped disks, one slot each
    disks: [Option<DriveDisk>; 6],
    /// Set-bonus definitions the equipped disks may activate
    sets: Vec<DriveDiskSet>,
    /// Buffs from the agent's own kit
    buffs: Vec<Buff>,
    /// Conversion modifiers from the agent's own kit
    conversions: Vec<ConversionBuff>,
}

impl Agent {
    /// Create a level-60 agent with an empty panel and no equipment
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Agent {
            id: id.into(),
            name: name.into(),
            level: 60,
            element: None,
            base_attack: 0.0,
            base_hp: 0.0,
            base_defense: 0.0,
            base_impact: 0.0,
            kit: PropertyCollection::new(),
            wengine: None,
            disks: Default::default(),
            sets: Vec::new(),
            buffs: Vec::new(),
            conversions: Vec::new(),
        }
    }

    /// Set the character level
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Set the kit element
    pub fn with_element(mut self, element: Element) -> Self {
        self.element = Some(element);
        self
    }

    /// Set the base panel
    pub fn with_base_stats(mut self, attack: f64, hp: f64, defense: f64, impact: f64) -> Self {
        self.base_attack = attack;
        self.base_hp = hp;
        self.base_defense = defense;
        self.base_impact = impact;
        self
    }

    /// Add an innate pre-battle kit bonus
    pub fn with_kit_pre_battle(mut self, prop: PropertyType, value: f64) -> Self {
        self.kit.add_pre_battle(prop, value);
        self
    }

    /// Add an innate in-battle kit bonus
    pub fn with_kit_in_battle(mut self, prop: PropertyType, value: f64) -> Self {
        self.kit.add_in_battle(prop, value);
        self
    }

    /// Equip a weapon engine
    pub fn with_wengine(mut self, wengine: WEngine) -> Self {
        self.wengine = Some(wengine);
        self
    }

    /// Equip a disk into its slot, replacing any disk already there
    pub fn with_disk(mut self, disk: DriveDisk) -> Self {
        self.equip_disk(disk);
        self
    }

    /// Register a set-bonus definition
    pub fn with_set(mut self, set: DriveDiskSet) -> Self {
        self.sets.push(set);
        self
    }

    /// Add a kit buff
    pub fn with_buff(mut self, buff: Buff) -> Self {
        self.buffs.push(buff);
        self
    }

    /// Add a kit conversion modifier
    pub fn with_conversion(mut self, conversion: ConversionBuff) -> Self {
        self.conversions.push(conversion);
        self
    }

    /// Equip a disk into its slot, replacing any disk already there
    pub fn equip_disk(&mut self, disk: DriveDisk) {
        let index = disk.slot.index();
        self.disks[index] = Some(disk);
    }

    /// Equip a weapon engine
    pub fn equip_wengine(&mut self, wengine: WEngine) {
        self.wengine = Some(wengine);
    }

    /// Currently equipped weapon engine
    pub fn wengine(&self) -> Option<&WEngine> {
        self.wengine.as_ref()
    }

    /// Currently equipped disks in slot order
    pub fn disks(&self) -> Vec<&DriveDisk> {
        self.disks.iter().flatten().collect()
    }

    /// Registered set-bonus definitions
    pub fn sets(&self) -> &[DriveDiskSet] {
        &self.sets
    }

    /// Kit conversion modifiers
    pub fn conversions(&self) -> &[ConversionBuff] {
        &self.conversions
    }

    /// Base panel plus the default crit baseline, as a pre-battle collection
    fn base_collection(&self) -> PropertyCollection {
        PropertyCollection::new()
            .with_pre_battle(PropertyType::AttackBase, self.base_attack)
            .with_pre_battle(PropertyType::HpBase, self.base_hp)
            .with_pre_battle(PropertyType::DefenseBase, self.base_defense)
            .with_pre_battle(PropertyType::ImpactBase, self.base_impact)
            .with_pre_battle(PropertyType::CritRate, DEFAULT_CRIT_RATE)
            .with_pre_battle(PropertyType::CritDamage, DEFAULT_CRIT_DAMAGE)
    }

    /// Gather every contribution for the current loadout
    pub fn loadout_collections(&self, extra_buffs: &[Buff]) -> Vec<PropertyCollection> {
        let disks: Vec<&DriveDisk> = self.disks();
        self.loadout_collections_with(self.wengine.as_ref(), &disks, extra_buffs)
    }

    /// Gather every contribution with the given equipment standing in for
    /// whatever is equipped
    ///
    /// Pure with respect to the agent: candidate gear is evaluated without
    /// touching the equipped loadout, so callers can preview combinations
    /// side by side.
    pub fn loadout_collections_with(
        &self,
        wengine: Option<&WEngine>,
        disks: &[&DriveDisk],
        extra_buffs: &[Buff],
    ) -> Vec<PropertyCollection> {
        let mut collections = vec![self.base_collection(), self.kit.clone()];

        if let Some(engine) = wengine {
            collections.push(engine.collection());
            for buff in engine.active_buffs() {
                collections.push(buff.collection());
            }
        }

        for disk in disks {
            collections.push(disk.collection());
        }

        // Set bonuses activate per distinct set at 2 and 4 equipped pieces
        for set in &self.sets {
            let count = disks.iter().filter(|d| d.set_id == set.set_id).count();
            for buff in set.active_buffs(count) {
                collections.push(buff.collection());
            }
        }

        for buff in &self.buffs {
            collections.push(buff.collection());
        }
        for buff in extra_buffs {
            collections.push(buff.collection());
        }

        collections
    }

    /// Resolve the current loadout into a combat snapshot
    pub fn resolve(&self, extra_buffs: &[Buff]) -> CombatStats {
        CombatStats::resolve_with_conversions(
            &self.loadout_collections(extra_buffs),
            self.level,
            &self.conversions,
        )
    }

    /// Resolve a candidate loadout into a combat snapshot
    pub fn resolve_with_equipment(
        &self,
        wengine: Option<&WEngine>,
        disks: &[&DriveDisk],
        extra_buffs: &[Buff],
    ) -> CombatStats {
        CombatStats::resolve_with_conversions(
            &self.loadout_collections_with(wengine, disks, extra_buffs),
            self.level,
            &self.conversions,
        )
    }
}

/// Resolve an agent's current loadout plus outside buffs into a snapshot
pub fn resolve_combat_stats(agent: &Agent, extra_buffs: &[Buff]) -> CombatStats {
    agent.resolve(extra_buffs)
}

/// Resolve an agent with candidate equipment standing in for the equipped
/// loadout, used by the optimizer to score combinations
pub fn resolve_combat_stats_with(
    agent: &Agent,
    wengine: Option<&WEngine>,
    disks: &[&DriveDisk],
    extra_buffs: &[Buff],
) -> CombatStats {
    agent.resolve_with_equipment(wengine, disks, extra_buffs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiskSlot, Rarity};

    fn sample_agent() -> Agent {
        Agent::new("a1", "Vesper")
            .with_level(60)
            .with_element(Element::Electric)
            .with_base_stats(800.0, 8000.0, 600.0, 90.0)
    }

    #[test]
    fn test_default_crit_baseline() {
        let stats = sample_agent().resolve(&[]);
        assert!((stats.crit_rate - 0.05).abs() < f64::EPSILON);
        assert!((stats.crit_damage - 0.50).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resolve_matches_hand_computation() {
        // Attack base: 800 (agent) + 200 (engine) = 1000
        // Pre-battle percent: 0.06 (kit) + 0.10 (2pc set) = 0.16
        // Pre-battle flat: 316 (slot-two disk at +15)
        // Pre-battle final: 1000 × 1.16 + 316 = 1476
        // In-battle: × (1 + 0.20) = 1771.2
        let agent = sample_agent()
            .with_kit_pre_battle(PropertyType::AttackPercent, 0.06)
            .with_wengine(WEngine::new("w1", "Engine", 200.0, PropertyType::CritRate, 0.10))
            .with_disk(
                DriveDisk::new("d2", "set_a", DiskSlot::Two, Rarity::S, PropertyType::AttackFlat)
                    .with_level(15),
            )
            .with_disk(DriveDisk::new(
                "d1",
                "set_a",
                DiskSlot::One,
                Rarity::S,
                PropertyType::HpFlat,
            ))
            .with_set(DriveDiskSet::new("set_a", "Set A").with_two_piece(
                Buff::new("set_a_2pc", "2pc").with_pre_battle(PropertyType::AttackPercent, 0.10),
            ))
            .with_buff(Buff::new("kit_rage", "Rage").with_in_battle(PropertyType::AttackPercent, 0.20));

        let stats = agent.resolve(&[]);
        assert!((stats.base_attack - 1476.0).abs() < 1e-9);
        assert!((stats.final_attack() - 1771.2).abs() < 1e-9);
        // Engine advanced stat joins the snapshot too
        assert!((stats.crit_rate - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_set_bonus_needs_two_pieces() {
        let set = DriveDiskSet::new("set_a", "Set A").with_two_piece(
            Buff::new("set_a_2pc", "2pc").with_pre_battle(PropertyType::CritRate, 0.08),
        );

        let one_piece = sample_agent().with_set(set.clone()).with_disk(DriveDisk::new(
            "d1",
            "set_a",
            DiskSlot::One,
            Rarity::S,
            PropertyType::HpFlat,
        ));
        assert!((one_piece.resolve(&[]).crit_rate - 0.05).abs() < 1e-9);

        let two_pieces = one_piece.with_disk(DriveDisk::new(
            "d2",
            "set_a",
            DiskSlot::Two,
            Rarity::S,
            PropertyType::AttackFlat,
        ));
        assert!((two_pieces.resolve(&[]).crit_rate - 0.13).abs() < 1e-9);
    }

    #[test]
    fn test_equipment_override_leaves_agent_untouched() {
        let agent = sample_agent().with_wengine(WEngine::new(
            "w1",
            "Equipped",
            200.0,
            PropertyType::CritRate,
            0.10,
        ));

        let candidate = WEngine::new("w2", "Candidate", 500.0, PropertyType::CritDamage, 0.40);
        let preview = agent.resolve_with_equipment(Some(&candidate), &[], &[]);
        assert!((preview.base_attack - 1300.0).abs() < 1e-9);
        assert!((preview.crit_damage - 0.90).abs() < 1e-9);

        // The equipped loadout still resolves as before
        let current = agent.resolve(&[]);
        assert!((current.base_attack - 1000.0).abs() < 1e-9);
        assert!((current.crit_rate - 0.15).abs() < 1e-9);
        assert_eq!(agent.wengine().map(|w| w.id.as_str()), Some("w1"));
    }

    #[test]
    fn test_disk_slot_replacement() {
        let mut agent = sample_agent();
        agent.equip_disk(DriveDisk::new(
            "old",
            "set_a",
            DiskSlot::Four,
            Rarity::A,
            PropertyType::CritRate,
        ));
        agent.equip_disk(DriveDisk::new(
            "new",
            "set_b",
            DiskSlot::Four,
            Rarity::S,
            PropertyType::CritDamage,
        ));

        let disks = agent.disks();
        assert_eq!(disks.len(), 1);
        assert_eq!(disks[0].id, "new");
    }

    #[test]
    fn test_conversion_applies_during_resolve() {
        // Final attack 1000; every point feeds 0.03% electric bonus
        let agent = sample_agent()
            .with_kit_pre_battle(PropertyType::AttackPercent, 0.25)
            .with_conversion(ConversionBuff::new(
                "core_conv",
                PropertyType::AttackBase,
                PropertyType::ElectricDamageBonus,
                0.0003,
            ));

        let stats = agent.resolve(&[]);
        assert!((stats.final_attack() - 1000.0).abs() < 1e-9);
        assert!(
            (stats.element_damage_bonus(Element::Electric) - 0.30).abs() < 1e-9,
            "conversion should deposit 0.03% of final attack per point"
        );
    }
}

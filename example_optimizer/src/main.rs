//! Example Optimizer - Equipment search demo for combat_core
//!
//! This demo shows:
//! - Building an agent with a weapon engine and drive disks
//! - Evaluating a skill rotation through a battle session
//! - Estimating marginal stat weights for the current loadout
//! - Searching a random inventory for the highest-damage equipment
//!
//! Run with RUST_LOG=combat_core=debug for search internals.

use combat_core::equipment::{slot_main_stats, AVAILABLE_SUB_STATS};
use combat_core::prelude::*;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

/// Create the demo skill rotation
fn create_skills() -> Vec<SkillDamageParams> {
    vec![
        // 1. Basic combo - cheap physical hit, most of the daze
        SkillDamageParams::new("basic_combo", Element::Physical, 1.2)
            .with_stun_ratio(0.8)
            .with_anomaly_buildup(40.0),
        // 2. Frost cleave - heavy ice hit, builds freeze fast
        SkillDamageParams::new("frost_cleave", Element::Ice, 2.4)
            .with_anomaly_buildup(150.0)
            .with_stun_ratio(0.5),
        // 3. Glacial burst - ranged finisher, falls off past close range
        SkillDamageParams::new("glacial_burst", Element::Ice, 4.5)
            .with_anomaly_buildup(220.0)
            .with_distance(18.0),
    ]
}

/// Build the demo agent with a starter loadout
fn create_agent() -> Agent {
    let starter_engine = WEngine::new(
        "wengine_starter",
        "Training Blade",
        486.0,
        PropertyType::AttackPercent,
        0.20,
    );

    let mut agent = Agent::new("demo_agent", "Aria")
        .with_level(60)
        .with_element(Element::Ice)
        .with_base_stats(856.0, 7789.0, 612.0, 93.0)
        .with_kit_pre_battle(PropertyType::CritRate, 0.094)
        .with_kit_pre_battle(PropertyType::AnomalyMastery, 94.0)
        .with_kit_pre_battle(PropertyType::AnomalyProficiency, 86.0)
        .with_wengine(starter_engine)
        .with_set(
            DriveDiskSet::new("polar_vortex", "Polar Vortex")
                .with_two_piece(
                    Buff::new("polar_vortex_2pc", "Polar Vortex 2pc")
                        .with_pre_battle(PropertyType::IceDamageBonus, 0.10),
                )
                .with_four_piece(
                    Buff::new("polar_vortex_4pc", "Polar Vortex 4pc")
                        .with_in_battle(PropertyType::CritRate, 0.08),
                ),
        )
        .with_set(DriveDiskSet::new("ironclad", "Ironclad").with_two_piece(
            Buff::new("ironclad_2pc", "Ironclad 2pc")
                .with_pre_battle(PropertyType::AttackPercent, 0.10),
        ))
        .with_set(DriveDiskSet::new("swift_chorus", "Swift Chorus").with_two_piece(
            Buff::new("swift_chorus_2pc", "Swift Chorus 2pc")
                .with_pre_battle(PropertyType::AnomalyProficiency, 30.0),
        ));

    // Starter disks: flat mains in 1-3, crit rate in 4
    let starter_mains = [
        (DiskSlot::One, PropertyType::HpFlat),
        (DiskSlot::Two, PropertyType::AttackFlat),
        (DiskSlot::Three, PropertyType::DefenseFlat),
        (DiskSlot::Four, PropertyType::CritRate),
        (DiskSlot::Five, PropertyType::AttackPercent),
        (DiskSlot::Six, PropertyType::AttackPercent),
    ];
    for (slot, main) in starter_mains {
        agent.equip_disk(
            DriveDisk::new(
                format!("starter_{}", slot.index() + 1),
                "ironclad",
                slot,
                Rarity::A,
                main,
            )
            .with_level(12),
        );
    }

    agent
}

/// Roll one random S-rank drive disk for a slot
fn random_disk(rng: &mut ChaCha8Rng, slot: DiskSlot, index: usize) -> DriveDisk {
    let sets = ["polar_vortex", "ironclad", "swift_chorus"];
    let main = *slot_main_stats(slot).choose(rng).unwrap();

    let mut disk = DriveDisk::new(
        format!("disk_{}_{}", slot.index() + 1, index),
        *sets.choose(rng).unwrap(),
        slot,
        Rarity::S,
        main,
    )
    .with_level(15);

    // Up to four distinct sub lines, never duplicating the main stat
    let mut candidates: Vec<PropertyType> = AVAILABLE_SUB_STATS
        .iter()
        .copied()
        .filter(|stat| *stat != main)
        .collect();
    candidates.shuffle(rng);
    for stat in candidates.into_iter().take(4) {
        disk = disk.with_sub(stat, rng.gen_range(1..=5));
    }

    disk
}

/// Roll one random weapon engine
fn random_wengine(rng: &mut ChaCha8Rng, index: usize) -> WEngine {
    let advanced_stats = [
        (PropertyType::CritRate, 0.096),
        (PropertyType::CritDamage, 0.192),
        (PropertyType::AttackPercent, 0.12),
        (PropertyType::AnomalyProficiency, 36.0),
    ];
    let (stat, value) = *advanced_stats.choose(rng).unwrap();
    let base_attack = 520.0 + rng.gen_range(0..8) as f64 * 20.0;

    let talent = Buff::new(&format!("wengine_{}_talent", index), "Resonance")
        .with_in_battle(PropertyType::DamageBonus, 0.10);
    WEngine::new(
        format!("wengine_{}", index),
        format!("Prototype {}", index),
        base_attack,
        stat,
        value,
    )
    .with_refinement(rng.gen_range(1..=5))
    .with_talent(1, vec![talent])
}

fn print_result(name: &str, result: &DamageResult) {
    let total = result.total();
    println!(
        "  {:<16} expected {:>9.0}  (non-crit {:>9.0}, crit {:>9.0})  daze {:>7.1}",
        name,
        total.expected,
        total.non_crit,
        total.crit,
        result.stun_value()
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let mut rng = ChaCha8Rng::seed_from_u64(42);

    let agent = create_agent();
    let skills = create_skills();
    let enemies = default_enemies();
    let enemy = enemies["training_dummy"].clone();

    let registry = AnomalyRegistry::with_defaults();
    let shatter = registry
        .for_element(Element::Ice)
        .expect("standard registry covers every element")
        .clone();

    // === Battle session ===
    println!("=== Battle: {} vs training dummy ===", agent.name);
    let mut session = BattleSession::new();
    session.set_agent(agent.clone());
    session.set_enemy(enemy.clone());
    session.start().expect("fresh session starts");

    for skill in &skills {
        let result = session
            .calculate_skill_damage(skill, Some(&shatter))
            .expect("active session evaluates");
        print_result(&skill.name, &result);
    }

    // A team buff lands mid-battle and shows up on the next call
    session.add_buff(
        Buff::new("team_rally", "Team Rally").with_in_battle(PropertyType::AttackPercent, 0.12),
    );
    let rallied = session
        .calculate_skill_damage(&skills[1], Some(&shatter))
        .expect("active session evaluates");
    println!("  with team rally:");
    print_result(&skills[1].name, &rallied);

    // Sample a few concrete hits from the expectation
    println!("  sampled hits of {}:", skills[1].name);
    for _ in 0..4 {
        let hit = rallied.roll(&mut rng);
        println!(
            "    {:>9.0}{}{}",
            hit.direct_damage,
            if hit.is_crit { "  CRIT" } else { "" },
            if hit.anomaly_triggered {
                "  anomaly!"
            } else {
                ""
            }
        );
    }
    session.reset();

    // === Marginal stat weights ===
    println!();
    println!("=== Marginal stat weights for the current loadout ===");
    let stats = agent.resolve(&[]);
    let reference = calculate_skill_damage(&stats, &enemy, &skills[1], Some(&shatter));
    let shares = DamageShares::from_result(&reference);
    let weights = compute_marginal_weights(&shares, &stats, &enemy);

    let mut ranked: Vec<(PropertyType, f64)> = weights
        .iter()
        .map(|(stat, weight)| (*stat, *weight))
        .filter(|(_, weight)| *weight > 0.0)
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (stat, weight) in ranked.iter().take(8) {
        println!("  {:<24} {:.4}", format!("{:?}", stat), weight);
    }

    // === Equipment search ===
    println!();
    println!("=== Equipment search ===");
    let wengines: Vec<WEngine> = (0..6).map(|i| random_wengine(&mut rng, i)).collect();
    let mut pools = DiskPools::new();
    for slot in DiskSlot::all() {
        for index in 0..10 {
            pools.add(random_disk(&mut rng, *slot, index));
        }
    }
    println!(
        "  inventory: {} weapon engines, {} disks",
        wengines.len(),
        pools.len()
    );

    let request = OptimizeRequest::new(&agent, &skills, &enemy, &wengines, &pools, 5)
        .with_anomaly(&shatter);
    let outcome = match request.run() {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("search failed: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "  evaluated {} combinations in {:.1}ms",
        outcome.combinations_evaluated,
        outcome.elapsed.as_secs_f64() * 1000.0
    );
    println!(
        "  best rotation damage: {:.0} (was {:.0})",
        outcome.max_damage,
        skills
            .iter()
            .map(|skill| {
                calculate_skill_damage(&stats, &enemy, skill, Some(&shatter)).expected_total()
            })
            .sum::<f64>()
    );
    println!(
        "  weapon engine: {} (refinement {})",
        outcome.best_wengine.name,
        outcome.best_wengine.refinement()
    );
    for disk in &outcome.best_disks {
        let subs: Vec<String> = disk
            .sub_stats
            .iter()
            .map(|sub| format!("{:?} x{}", sub.stat, sub.rolls))
            .collect();
        println!(
            "  slot {}: [{}] {:?} | {}",
            disk.slot.index() + 1,
            disk.set_id,
            disk.main_stat,
            subs.join(", ")
        );
    }
    println!("  per skill:");
    for (skill, result) in skills.iter().zip(&outcome.best_results) {
        print_result(&skill.name, result);
    }
}

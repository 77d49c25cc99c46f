//! Search - Slot pruning and sharded exhaustive combination evaluation

use std::cmp::{Ordering as CmpOrdering, Reverse};
use std::collections::{BTreeMap, BinaryHeap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::agent::Agent;
use crate::damage::{calculate_skill_damage, AnomalyEffect, DamageResult, SkillDamageParams};
use crate::enemy::EnemyStats;
use crate::equipment::{ContributionSource, DriveDisk, WEngine};
use crate::estimator::{compute_marginal_weights, score_collection, DamageShares};
use crate::property::CombatStats;
use crate::types::{DiskSlot, PropertyType};

use super::{CancelToken, DiskPools, OptimizationResult, OptimizeError};

/// Search every weapon × top-N disk combination for maximum expected damage
///
/// Ties break toward the earliest combination in enumeration order (weapon
/// axis outermost, slot six fastest), so the result is deterministic for a
/// fixed candidate ordering.
pub fn optimize_equipment(
    agent: &Agent,
    skills: &[SkillDamageParams],
    enemy: &EnemyStats,
    wengines: &[WEngine],
    pools: &DiskPools,
    top_n: usize,
) -> Result<OptimizationResult, OptimizeError> {
    OptimizeRequest::new(agent, skills, enemy, wengines, pools, top_n).run()
}

/// A configured equipment search
///
/// Holds read-only references; the search never mutates the agent or the
/// candidate pools.
pub struct OptimizeRequest<'a> {
    agent: &'a Agent,
    skills: &'a [SkillDamageParams],
    enemy: &'a EnemyStats,
    wengines: &'a [WEngine],
    pools: &'a DiskPools,
    top_n: usize,
    anomaly: Option<&'a AnomalyEffect>,
    cancel: CancelToken,
}

impl<'a> OptimizeRequest<'a> {
    pub fn new(
        agent: &'a Agent,
        skills: &'a [SkillDamageParams],
        enemy: &'a EnemyStats,
        wengines: &'a [WEngine],
        pools: &'a DiskPools,
        top_n: usize,
    ) -> Self {
        OptimizeRequest {
            agent,
            skills,
            enemy,
            wengines,
            pools,
            top_n,
            anomaly: None,
            cancel: CancelToken::new(),
        }
    }

    /// Anomaly effect applied to every skill evaluation
    pub fn with_anomaly(mut self, effect: &'a AnomalyEffect) -> Self {
        self.anomaly = Some(effect);
        self
    }

    /// Token for stopping the search between combinations
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Run the search to completion
    pub fn run(self) -> Result<OptimizationResult, OptimizeError> {
        let started = Instant::now();

        // Fail fast before any evaluation
        if self.wengines.is_empty() {
            return Err(OptimizeError::EmptyWEnginePool);
        }
        if let Some(slot) = self.pools.first_empty_slot() {
            return Err(OptimizeError::EmptySlot(slot));
        }
        if self.skills.is_empty() {
            return Err(OptimizeError::NoSolution);
        }

        // Step 1: marginal weights from the current loadout
        let current = self.agent.resolve(&[]);
        let shares = self.baseline_shares(&current);
        let weights = compute_marginal_weights(&shares, &current, self.enemy);

        // Step 2: prune each slot pool to the top-N candidates
        let pruned: Vec<Vec<&DriveDisk>> = DiskSlot::all()
            .iter()
            .map(|&slot| {
                let kept = prune_slot(self.pools.slot(slot), &weights, self.top_n);
                debug!(
                    slot = ?slot,
                    pool = self.pools.slot(slot).len(),
                    kept = kept.len(),
                    "slot pool pruned"
                );
                kept
            })
            .collect();

        // Step 3: enumerate shards of the weapon axis in parallel
        let shard_count = rayon::current_num_threads().min(self.wengines.len()).max(1);
        let combinations = AtomicU64::new(0);

        let shard_bests = (0..shard_count)
            .into_par_iter()
            .map(|shard| self.evaluate_shard(shard, shard_count, &pruned, &combinations))
            .collect::<Result<Vec<Option<ShardBest>>, OptimizeError>>()?;

        // Step 4: reduce in shard order so the global winner matches the
        // sequential first-seen order
        let mut best: Option<ShardBest> = None;
        for candidate in shard_bests.into_iter().flatten() {
            let better = best.as_ref().map_or(true, |b| candidate.damage > b.damage);
            if better {
                best = Some(candidate);
            }
        }
        let best = best.ok_or(OptimizeError::NoSolution)?;

        // Rebuild the winning combination and its per-skill breakdown
        let best_wengine = self.wengines[best.wengine].clone();
        let best_disks: [DriveDisk; 6] =
            std::array::from_fn(|slot| pruned[slot][best.disks[slot]].clone());
        let disk_refs: Vec<&DriveDisk> = best_disks.iter().collect();
        let stats = self
            .agent
            .resolve_with_equipment(Some(&best_wengine), &disk_refs, &[]);
        let best_results: Vec<DamageResult> = self
            .skills
            .iter()
            .map(|skill| calculate_skill_damage(&stats, self.enemy, skill, self.anomaly))
            .collect();

        let combinations_evaluated = combinations.into_inner();
        let elapsed = started.elapsed();
        info!(
            max_damage = best.damage,
            combinations = combinations_evaluated,
            elapsed_ms = elapsed.as_millis() as u64,
            "optimization complete"
        );

        Ok(OptimizationResult {
            best_wengine,
            best_disks,
            max_damage: best.damage,
            best_results,
            combinations_evaluated,
            elapsed,
        })
    }

    /// Damage-share split of the current loadout, direct-only when the
    /// current loadout deals nothing
    fn baseline_shares(&self, current: &CombatStats) -> DamageShares {
        let mut direct = 0.0;
        let mut anomaly = 0.0;
        for skill in self.skills {
            let result = calculate_skill_damage(current, self.enemy, skill, self.anomaly);
            direct += result.expected_direct();
            anomaly += result.expected_anomaly();
        }

        let total = direct + anomaly;
        if total > 0.0 {
            DamageShares::new(direct / total, anomaly / total)
        } else {
            DamageShares::direct_only()
        }
    }

    /// Evaluate one contiguous range of the weapon axis against the full
    /// disk product, keeping the shard's first-seen maximum
    fn evaluate_shard(
        &self,
        shard: usize,
        shard_count: usize,
        pruned: &[Vec<&DriveDisk>],
        combinations: &AtomicU64,
    ) -> Result<Option<ShardBest>, OptimizeError> {
        let start = self.wengines.len() * shard / shard_count;
        let end = self.wengines.len() * (shard + 1) / shard_count;

        let mut best: Option<ShardBest> = None;
        let mut combo: Vec<&DriveDisk> = Vec::with_capacity(6);

        for wengine_index in start..end {
            let wengine = &self.wengines[wengine_index];
            let mut indices = [0usize; 6];

            'combos: loop {
                if self.cancel.is_cancelled() {
                    return Err(OptimizeError::Cancelled);
                }

                combo.clear();
                combo.extend((0..6).map(|slot| pruned[slot][indices[slot]]));

                let stats = self.agent.resolve_with_equipment(Some(wengine), &combo, &[]);
                let mut damage = 0.0;
                for skill in self.skills {
                    damage +=
                        calculate_skill_damage(&stats, self.enemy, skill, self.anomaly)
                            .expected_total();
                }
                combinations.fetch_add(1, Ordering::Relaxed);

                let better = best.as_ref().map_or(true, |b| damage > b.damage);
                if better {
                    best = Some(ShardBest {
                        damage,
                        wengine: wengine_index,
                        disks: indices,
                    });
                }

                // Advance the slot odometer, slot six fastest
                let mut axis = 5;
                loop {
                    indices[axis] += 1;
                    if indices[axis] < pruned[axis].len() {
                        break;
                    }
                    indices[axis] = 0;
                    if axis == 0 {
                        break 'combos;
                    }
                    axis -= 1;
                }
            }
        }

        debug!(shard, start, end, "shard complete");
        Ok(best)
    }
}

/// Winning combination within one shard, tracked by pool indices
struct ShardBest {
    damage: f64,
    wengine: usize,
    disks: [usize; 6],
}

/// Heap entry ordered by score ascending, then arrival descending, so the
/// root of a min-heap is the weakest entry and, among equals, the latest
struct ScoredCandidate {
    score: f64,
    index: usize,
}

impl PartialEq for ScoredCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == CmpOrdering::Equal
    }
}

impl Eq for ScoredCandidate {}

impl PartialOrd for ScoredCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredCandidate {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// Keep the top-N highest-scoring candidates of one pool, in arrival order
///
/// Replacement requires a strictly greater score, so equal-scoring
/// candidates favor the earliest. A cap of zero disables pruning.
fn prune_slot<'a>(
    pool: &'a [DriveDisk],
    weights: &BTreeMap<PropertyType, f64>,
    top_n: usize,
) -> Vec<&'a DriveDisk> {
    if top_n == 0 {
        return pool.iter().collect();
    }

    let mut heap: BinaryHeap<Reverse<ScoredCandidate>> = BinaryHeap::with_capacity(top_n);
    for (index, disk) in pool.iter().enumerate() {
        let score = score_collection(&disk.collection(), weights);
        if heap.len() < top_n {
            heap.push(Reverse(ScoredCandidate { score, index }));
        } else if let Some(weakest) = heap.peek() {
            if score > weakest.0.score {
                heap.pop();
                heap.push(Reverse(ScoredCandidate { score, index }));
            }
        }
    }

    let mut kept: Vec<usize> = heap.into_iter().map(|entry| entry.0.index).collect();
    kept.sort_unstable();
    kept.into_iter().map(|index| &pool[index]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buff::Buff;
    use crate::equipment::DriveDiskSet;
    use crate::types::{Element, Rarity};

    fn sample_agent() -> Agent {
        Agent::new("a1", "Vesper")
            .with_level(60)
            .with_base_stats(1000.0, 8000.0, 600.0, 90.0)
    }

    fn neutral_enemy() -> EnemyStats {
        EnemyStats::new(60, 50_000.0, 0.0)
    }

    fn basic_skill() -> Vec<SkillDamageParams> {
        vec![SkillDamageParams::new("basic", Element::Physical, 1.0)]
    }

    fn plain_wengine(id: &str) -> WEngine {
        WEngine::new(id, "Engine", 0.0, PropertyType::CritRate, 0.0)
    }

    /// One benign disk per slot; slot two carries flat attack like the real
    /// slot layout demands
    fn filler_pools() -> DiskPools {
        let mut pools = DiskPools::new();
        pools.add(DriveDisk::new("f1", "filler", DiskSlot::One, Rarity::B, PropertyType::HpFlat));
        pools.add(DriveDisk::new("f2", "filler", DiskSlot::Two, Rarity::B, PropertyType::AttackFlat));
        pools.add(DriveDisk::new("f3", "filler", DiskSlot::Three, Rarity::B, PropertyType::DefenseFlat));
        pools.add(DriveDisk::new("f4", "filler", DiskSlot::Four, Rarity::B, PropertyType::HpPercent));
        pools.add(DriveDisk::new("f5", "filler", DiskSlot::Five, Rarity::B, PropertyType::HpPercent));
        pools.add(DriveDisk::new("f6", "filler", DiskSlot::Six, Rarity::B, PropertyType::HpPercent));
        pools
    }

    #[test]
    fn test_empty_pools_fail_fast() {
        let agent = sample_agent();
        let enemy = neutral_enemy();
        let skills = basic_skill();

        let err = optimize_equipment(&agent, &skills, &enemy, &[], &filler_pools(), 5);
        assert!(matches!(err, Err(OptimizeError::EmptyWEnginePool)));

        let mut pools = filler_pools();
        pools = {
            // Rebuild without slot three
            let mut rebuilt = DiskPools::new();
            for slot in [DiskSlot::One, DiskSlot::Two, DiskSlot::Four, DiskSlot::Five, DiskSlot::Six] {
                for disk in pools.slot(slot) {
                    rebuilt.add(disk.clone());
                }
            }
            rebuilt
        };
        let engines = [plain_wengine("w1")];
        let err = optimize_equipment(&agent, &skills, &enemy, &engines, &pools, 5);
        assert!(matches!(err, Err(OptimizeError::EmptySlot(DiskSlot::Three))));
    }

    #[test]
    fn test_no_skills_is_an_error() {
        let agent = sample_agent();
        let enemy = neutral_enemy();
        let engines = [plain_wengine("w1")];

        let err = optimize_equipment(&agent, &[], &enemy, &engines, &filler_pools(), 5);
        assert!(matches!(err, Err(OptimizeError::NoSolution)));
    }

    #[test]
    fn test_picks_highest_damage_combination() {
        let agent = sample_agent();
        let enemy = neutral_enemy();
        let skills = basic_skill();
        let engines = [plain_wengine("w1")];

        let mut pools = filler_pools();
        // Stronger slot-two candidates: B+0 main is 26, S+15 main is 316
        pools.add(
            DriveDisk::new("atk_s", "filler", DiskSlot::Two, Rarity::S, PropertyType::AttackFlat)
                .with_level(15),
        );

        let result = optimize_equipment(&agent, &skills, &enemy, &engines, &pools, 5)
            .expect("search should succeed");

        assert_eq!(result.best_disks[1].id, "atk_s");
        // 1000 + 316 flat = 1316; ceil(1316 × 1.025) = 1349
        assert_eq!(result.max_damage, 1349.0);
        assert_eq!(result.combinations_evaluated, 2);
        assert_eq!(result.best_results.len(), 1);
        assert_eq!(result.best_results[0].expected_total(), 1349.0);
    }

    #[test]
    fn test_top_n_prunes_weakest_candidate() {
        let agent = sample_agent();
        let enemy = neutral_enemy();
        let skills = basic_skill();
        let engines = [plain_wengine("w1")];

        // Slot two offers 26 (B+0), 53 (A+0), and 79 (S+0) flat attack;
        // a cap of two must drop the weakest before enumeration
        let mut pools = DiskPools::new();
        pools.add(DriveDisk::new("atk_b", "filler", DiskSlot::Two, Rarity::B, PropertyType::AttackFlat));
        pools.add(DriveDisk::new("atk_a", "filler", DiskSlot::Two, Rarity::A, PropertyType::AttackFlat));
        pools.add(DriveDisk::new("atk_s", "filler", DiskSlot::Two, Rarity::S, PropertyType::AttackFlat));
        for disk in filler_pools().slot(DiskSlot::One) {
            pools.add(disk.clone());
        }
        for slot in [DiskSlot::Three, DiskSlot::Four, DiskSlot::Five, DiskSlot::Six] {
            for disk in filler_pools().slot(slot) {
                pools.add(disk.clone());
            }
        }

        let result = optimize_equipment(&agent, &skills, &enemy, &engines, &pools, 2)
            .expect("search should succeed");

        // 1 weapon × min(3, 2) slot-two candidates × 1 everywhere else
        assert_eq!(result.combinations_evaluated, 2);
        assert_eq!(result.best_disks[1].id, "atk_s");
        // ceil((1000 + 79) × 1.025) = 1106
        assert_eq!(result.max_damage, 1106.0);
    }

    #[test]
    fn test_set_pair_beats_greedy_per_slot_picks() {
        // Two weak-main alpha pieces unlock a pre-battle attack bonus that a
        // per-slot scorer never sees; the ice main scores high under the
        // marginal weights but the skill is physical
        let set = DriveDiskSet::new("alpha", "Alpha").with_two_piece(
            Buff::new("alpha_2pc", "Alpha 2pc").with_pre_battle(PropertyType::AttackPercent, 0.10),
        );
        let agent = sample_agent().with_set(set);
        let enemy = neutral_enemy();
        let skills = basic_skill();
        let engines = [plain_wengine("w1")];

        let mut pools = DiskPools::new();
        for slot in [DiskSlot::One, DiskSlot::Two, DiskSlot::Three, DiskSlot::Six] {
            for disk in filler_pools().slot(slot) {
                pools.add(disk.clone());
            }
        }
        pools.add(
            DriveDisk::new("crit_d", "filler", DiskSlot::Four, Rarity::S, PropertyType::CritDamage)
                .with_level(15),
        );
        pools.add(DriveDisk::new("q_alpha", "alpha", DiskSlot::Four, Rarity::B, PropertyType::HpPercent));
        pools.add(
            DriveDisk::new("ice_b", "filler", DiskSlot::Five, Rarity::S, PropertyType::IceDamageBonus)
                .with_level(15),
        );
        pools.add(DriveDisk::new("y_alpha", "alpha", DiskSlot::Five, Rarity::B, PropertyType::HpPercent));

        // Greedy: the single best disk per slot under the same weights the
        // search prunes with
        let request = OptimizeRequest::new(&agent, &skills, &enemy, &engines, &pools, 5);
        let current = agent.resolve(&[]);
        let shares = request.baseline_shares(&current);
        let weights = compute_marginal_weights(&shares, &current, &enemy);
        let greedy: Vec<&DriveDisk> = DiskSlot::all()
            .iter()
            .map(|&slot| prune_slot(pools.slot(slot), &weights, 1)[0])
            .collect();
        assert_eq!(greedy[3].id, "crit_d");
        assert_eq!(greedy[4].id, "ice_b");

        let greedy_stats = agent.resolve_with_equipment(Some(&engines[0]), &greedy, &[]);
        let greedy_damage =
            calculate_skill_damage(&greedy_stats, &enemy, &skills[0], None).expected_total();
        // ceil((1000 + 26) × 1.049) = 1077
        assert_eq!(greedy_damage, 1077.0);

        let result = optimize_equipment(&agent, &skills, &enemy, &engines, &pools, 5)
            .expect("search should succeed");

        // The alpha pair wins: ceil((1000 × 1.10 + 26) × 1.025) = 1155
        assert_eq!(result.best_disks[3].id, "q_alpha");
        assert_eq!(result.best_disks[4].id, "y_alpha");
        assert_eq!(result.max_damage, 1155.0);
        assert!(result.max_damage > greedy_damage);
        assert_eq!(result.combinations_evaluated, 4);
    }

    #[test]
    fn test_ties_break_first_seen() {
        let agent = sample_agent();
        let enemy = neutral_enemy();
        let skills = basic_skill();

        // Identical engines and an identical extra disk: every combination
        // scores the same, so the earliest must win
        let engines = [plain_wengine("w1"), plain_wengine("w2")];
        let mut pools = filler_pools();
        pools.add(DriveDisk::new("f4_dup", "filler", DiskSlot::Four, Rarity::B, PropertyType::HpPercent));

        let result = optimize_equipment(&agent, &skills, &enemy, &engines, &pools, 5)
            .expect("search should succeed");

        assert_eq!(result.best_wengine.id, "w1");
        assert_eq!(result.best_disks[3].id, "f4");
        // 2 weapons × 2 slot-four candidates
        assert_eq!(result.combinations_evaluated, 4);
    }

    #[test]
    fn test_cancelled_token_stops_the_search() {
        let agent = sample_agent();
        let enemy = neutral_enemy();
        let skills = basic_skill();
        let engines = [plain_wengine("w1")];
        let pools = filler_pools();

        let token = CancelToken::new();
        token.cancel();

        let err = OptimizeRequest::new(&agent, &skills, &enemy, &engines, &pools, 5)
            .with_cancel_token(token)
            .run();
        assert!(matches!(err, Err(OptimizeError::Cancelled)));
    }

    #[test]
    fn test_prune_keeps_arrival_order_and_ties() {
        let weights: BTreeMap<PropertyType, f64> =
            [(PropertyType::AttackFlat, 1.0)].into_iter().collect();

        // Scores: 26, 26, 53 — cap two keeps the first 26 and the 53
        let pool = vec![
            DriveDisk::new("first", "s", DiskSlot::Two, Rarity::B, PropertyType::AttackFlat),
            DriveDisk::new("second", "s", DiskSlot::Two, Rarity::B, PropertyType::AttackFlat),
            DriveDisk::new("third", "s", DiskSlot::Two, Rarity::A, PropertyType::AttackFlat),
        ];
        let kept = prune_slot(&pool, &weights, 2);
        let ids: Vec<&str> = kept.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "third"]);

        // Cap zero disables pruning
        assert_eq!(prune_slot(&pool, &weights, 0).len(), 3);
    }

    #[test]
    fn test_anomaly_effect_counts_toward_damage() {
        let agent = sample_agent()
            .with_kit_pre_battle(PropertyType::AnomalyMastery, 120.0)
            .with_kit_pre_battle(PropertyType::AnomalyProficiency, 100.0);
        let enemy = neutral_enemy();
        let engines = [plain_wengine("w1")];
        let pools = filler_pools();
        let skills = vec![
            SkillDamageParams::new("burst", Element::Fire, 1.0).with_anomaly_buildup(900.0),
        ];
        let burn = AnomalyEffect::new("burn", Element::Fire, 0.5).with_ticks(0.5, 10.0);

        let plain = optimize_equipment(&agent, &skills, &enemy, &engines, &pools, 5)
            .expect("search should succeed");
        let with_burn = OptimizeRequest::new(&agent, &skills, &enemy, &engines, &pools, 5)
            .with_anomaly(&burn)
            .run()
            .expect("search should succeed");

        assert!(with_burn.max_damage > plain.max_damage);
    }
}

//! Session - Battle lifecycle around snapshot resolution and damage evaluation

use thiserror::Error;
use tracing::info;

use crate::agent::Agent;
use crate::buff::Buff;
use crate::damage::{calculate_skill_damage, AnomalyEffect, DamageResult, SkillDamageParams};
use crate::enemy::EnemyStats;
use crate::property::CombatStats;

/// Lifecycle states of a battle session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BattleState {
    #[default]
    NotStarted,
    Active,
    Paused,
}

/// Usage errors raised by the session state machine
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no agent set")]
    MissingAgent,

    #[error("no enemy set")]
    MissingEnemy,

    #[error("session already started")]
    AlreadyStarted,

    #[error("session has not started")]
    NotStarted,

    #[error("session is not active")]
    NotActive,

    #[error("session is not paused")]
    NotPaused,
}

/// A battle in progress
///
/// Holds the combatants and any battle-scoped buffs, and gates damage
/// evaluation behind the lifecycle: damage can only be calculated while
/// Active. Every calculation re-resolves the snapshot from the current
/// agent and buff list, so mid-battle buff changes show up immediately.
#[derive(Debug, Default)]
pub struct BattleSession {
    state: BattleState,
    agent: Option<Agent>,
    enemy: Option<EnemyStats>,
    buffs: Vec<Buff>,
}

impl BattleSession {
    pub fn new() -> Self {
        BattleSession::default()
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn agent(&self) -> Option<&Agent> {
        self.agent.as_ref()
    }

    pub fn enemy(&self) -> Option<&EnemyStats> {
        self.enemy.as_ref()
    }

    /// Battle-scoped buffs applied on top of the agent's own
    pub fn buffs(&self) -> &[Buff] {
        &self.buffs
    }

    pub fn set_agent(&mut self, agent: Agent) {
        self.agent = Some(agent);
    }

    pub fn set_enemy(&mut self, enemy: EnemyStats) {
        self.enemy = Some(enemy);
    }

    /// Add a battle-scoped buff, effective from the next calculation
    pub fn add_buff(&mut self, buff: Buff) {
        self.buffs.push(buff);
    }

    pub fn clear_buffs(&mut self) {
        self.buffs.clear();
    }

    /// Begin the battle; requires both combatants
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.state != BattleState::NotStarted {
            return Err(SessionError::AlreadyStarted);
        }
        if self.agent.is_none() {
            return Err(SessionError::MissingAgent);
        }
        if self.enemy.is_none() {
            return Err(SessionError::MissingEnemy);
        }

        self.state = BattleState::Active;
        info!(state = ?self.state, "battle started");
        Ok(())
    }

    /// Suspend an active battle
    pub fn pause(&mut self) -> Result<(), SessionError> {
        if self.state != BattleState::Active {
            return Err(SessionError::NotActive);
        }
        self.state = BattleState::Paused;
        info!(state = ?self.state, "battle paused");
        Ok(())
    }

    /// Continue a paused battle
    pub fn resume(&mut self) -> Result<(), SessionError> {
        if self.state != BattleState::Paused {
            return Err(SessionError::NotPaused);
        }
        self.state = BattleState::Active;
        info!(state = ?self.state, "battle resumed");
        Ok(())
    }

    /// Return to NotStarted from any state, dropping battle-scoped buffs
    ///
    /// The combatants stay set, so the same matchup can start again.
    pub fn reset(&mut self) {
        self.state = BattleState::NotStarted;
        self.buffs.clear();
        info!(state = ?self.state, "battle reset");
    }

    /// Resolve the current snapshot; only valid while Active
    pub fn resolve_snapshot(&self) -> Result<CombatStats, SessionError> {
        self.require_active()?;
        let agent = self.agent.as_ref().ok_or(SessionError::MissingAgent)?;
        Ok(agent.resolve(&self.buffs))
    }

    /// Evaluate one skill through the full pipeline; only valid while Active
    ///
    /// Calling this while Paused or NotStarted is a usage error, never a
    /// silent no-op. The snapshot is re-resolved on every call.
    pub fn calculate_skill_damage(
        &self,
        skill: &SkillDamageParams,
        anomaly: Option<&AnomalyEffect>,
    ) -> Result<DamageResult, SessionError> {
        self.require_active()?;
        let agent = self.agent.as_ref().ok_or(SessionError::MissingAgent)?;
        let enemy = self.enemy.as_ref().ok_or(SessionError::MissingEnemy)?;

        let stats = agent.resolve(&self.buffs);
        Ok(calculate_skill_damage(&stats, enemy, skill, anomaly))
    }

    fn require_active(&self) -> Result<(), SessionError> {
        match self.state {
            BattleState::Active => Ok(()),
            BattleState::NotStarted => Err(SessionError::NotStarted),
            BattleState::Paused => Err(SessionError::NotActive),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Element, PropertyType};

    fn ready_session() -> BattleSession {
        let mut session = BattleSession::new();
        session.set_agent(
            Agent::new("a1", "Vesper")
                .with_level(60)
                .with_base_stats(1000.0, 8000.0, 600.0, 90.0),
        );
        session.set_enemy(EnemyStats::new(60, 50_000.0, 500.0));
        session
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut session = ready_session();
        assert_eq!(session.state(), BattleState::NotStarted);

        session.start().expect("start should succeed");
        assert_eq!(session.state(), BattleState::Active);

        session.pause().expect("pause should succeed");
        assert_eq!(session.state(), BattleState::Paused);

        session.resume().expect("resume should succeed");
        assert_eq!(session.state(), BattleState::Active);

        session.reset();
        assert_eq!(session.state(), BattleState::NotStarted);
    }

    #[test]
    fn test_start_requires_both_combatants() {
        let mut session = BattleSession::new();
        assert!(matches!(session.start(), Err(SessionError::MissingAgent)));

        session.set_agent(Agent::new("a1", "Vesper"));
        assert!(matches!(session.start(), Err(SessionError::MissingEnemy)));

        session.set_enemy(EnemyStats::default());
        assert!(session.start().is_ok());
    }

    #[test]
    fn test_double_start_is_an_error() {
        let mut session = ready_session();
        session.start().expect("start should succeed");
        assert!(matches!(session.start(), Err(SessionError::AlreadyStarted)));
    }

    #[test]
    fn test_wrong_state_transitions_error() {
        let mut session = ready_session();
        assert!(matches!(session.pause(), Err(SessionError::NotActive)));
        assert!(matches!(session.resume(), Err(SessionError::NotPaused)));

        session.start().expect("start should succeed");
        assert!(matches!(session.resume(), Err(SessionError::NotPaused)));
    }

    #[test]
    fn test_calculation_gated_by_state() {
        let mut session = ready_session();
        let skill = SkillDamageParams::new("basic", Element::Physical, 1.0);

        assert!(matches!(
            session.calculate_skill_damage(&skill, None),
            Err(SessionError::NotStarted)
        ));

        session.start().expect("start should succeed");
        session.pause().expect("pause should succeed");
        assert!(matches!(
            session.calculate_skill_damage(&skill, None),
            Err(SessionError::NotActive)
        ));
    }

    #[test]
    fn test_buffs_apply_on_next_calculation() {
        let mut session = ready_session();
        let skill = SkillDamageParams::new("basic", Element::Physical, 1.0);
        session.start().expect("start should succeed");

        // 1000 × 794/1294 × 1.025 rounded up
        let before = session
            .calculate_skill_damage(&skill, None)
            .expect("calculation should succeed");
        assert_eq!(before.expected_total(), 629.0);

        // 10% in-battle attack lifts the next call, no caching in between
        session.add_buff(
            Buff::new("rally", "Rally").with_in_battle(PropertyType::AttackPercent, 0.10),
        );
        let after = session
            .calculate_skill_damage(&skill, None)
            .expect("calculation should succeed");
        assert_eq!(after.expected_total(), 692.0);
    }

    #[test]
    fn test_reset_drops_battle_buffs() {
        let mut session = ready_session();
        session.start().expect("start should succeed");
        session.add_buff(
            Buff::new("rally", "Rally").with_in_battle(PropertyType::AttackPercent, 0.10),
        );

        session.reset();
        assert!(session.buffs().is_empty());
        assert!(session.agent().is_some());
        assert!(session.enemy().is_some());
    }
}

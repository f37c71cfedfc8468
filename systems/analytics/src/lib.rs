#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic analytics system that tallies combat outcomes per wave.
//!
//! The system is a pure fold over the world's event stream: feed it every
//! event batch in order and it maintains a running [`CombatReport`] for the
//! wave in progress plus a history of completed waves. It never queries the
//! world and holds no references into it, so adapters can run it wherever
//! convenient.

use sanctum_defence_core::Event;

/// Per-wave tally of combat outcomes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatReport {
    /// Wave the report covers (zero for the pre-wave idle period).
    pub wave: u32,
    /// Enemies that entered the battlefield.
    pub spawned: u32,
    /// Enemies killed by projectiles or miracles.
    pub killed: u32,
    /// Enemies that reached the base.
    pub leaked: u32,
    /// Mana granted from every source.
    pub mana_earned: u32,
    /// Base hit points lost.
    pub base_damage: u32,
}

/// Pure analytics system folding world events into per-wave reports.
#[derive(Clone, Debug, Default)]
pub struct Analytics {
    current: CombatReport,
    history: Vec<CombatReport>,
}

impl Analytics {
    /// Creates a new analytics system with an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report for the wave currently in progress.
    #[must_use]
    pub fn current(&self) -> &CombatReport {
        &self.current
    }

    /// Reports for completed waves, oldest first.
    #[must_use]
    pub fn history(&self) -> &[CombatReport] {
        &self.history
    }

    /// Folds one batch of world events into the running tallies.
    ///
    /// A `WaveStarted` event closes the report in progress and opens a fresh
    /// one; every other event lands in the report that is open when it
    /// arrives, which matches the frame the world emitted it on.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::WaveStarted { wave } => {
                    let finished = std::mem::take(&mut self.current);
                    self.history.push(finished);
                    self.current.wave = *wave;
                }
                Event::EnemySpawned { .. } => self.current.spawned += 1,
                Event::EnemyKilled { .. } => self.current.killed += 1,
                Event::EnemyLeaked { .. } => self.current.leaked += 1,
                Event::ManaAwarded { amount, .. } => self.current.mana_earned += amount,
                Event::BaseDamaged { amount, .. } => self.current.base_damage += amount,
                _ => {}
            }
        }
    }
}

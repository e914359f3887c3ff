//! Scripted player for the headless runner.
//!
//! Reads snapshots and answers with loop commands: it aims at the asteroid
//! closest to the ship, fires every ready skill at it, and between runs buys
//! whatever upgrades it can afford in table order.

use std::collections::BTreeSet;

use tracing::info;

use orefall_core::commands::PlayerCommand;
use orefall_core::enums::{GamePhase, SkillSlot};
use orefall_core::state::{AsteroidView, SimSnapshot};
use orefall_tree::{UpgradeGraph, ROOT_NODE_ID};

use crate::state::GameLoopCommand;

pub struct Autoplayer {
    graph: &'static UpgradeGraph,
    runs_wanted: u32,
    runs_completed: u32,
    last_phase: Option<GamePhase>,
    /// StartRun sent but not yet observed.
    awaiting_start: bool,
    requested: BTreeSet<&'static str>,
}

impl Autoplayer {
    pub fn new(runs_wanted: u32) -> Self {
        Self {
            graph: UpgradeGraph::standard(),
            runs_wanted,
            runs_completed: 0,
            last_phase: None,
            awaiting_start: false,
            requested: BTreeSet::new(),
        }
    }

    pub fn runs_completed(&self) -> u32 {
        self.runs_completed
    }

    pub fn is_finished(&self) -> bool {
        self.runs_completed >= self.runs_wanted
    }

    /// Commands to send in response to `snapshot`.
    pub fn decide(&mut self, snapshot: &SimSnapshot) -> Vec<GameLoopCommand> {
        let entered = self.last_phase != Some(snapshot.phase);
        self.last_phase = Some(snapshot.phase);
        if snapshot.paused {
            return Vec::new();
        }

        match snapshot.phase {
            GamePhase::Playing => {
                self.awaiting_start = false;
                self.aim_and_fire(snapshot)
            }
            GamePhase::Collecting => {
                if entered {
                    vec![GameLoopCommand::Pointer(None)]
                } else {
                    Vec::new()
                }
            }
            GamePhase::GameOver => {
                if entered {
                    self.runs_completed += 1;
                    info!(
                        run = self.runs_completed,
                        credits = snapshot.credits,
                        next_level = snapshot.level,
                        "run finished"
                    );
                }
                if self.is_finished() {
                    vec![GameLoopCommand::Shutdown]
                } else {
                    vec![GameLoopCommand::PlayerCommand(PlayerCommand::OpenUpgrades)]
                }
            }
            GamePhase::Upgrading => {
                if self.is_finished() {
                    return vec![GameLoopCommand::Shutdown];
                }
                if self.awaiting_start {
                    return Vec::new();
                }
                self.awaiting_start = true;
                let mut commands = self.shop(snapshot.credits);
                commands.push(GameLoopCommand::PlayerCommand(PlayerCommand::StartRun));
                commands
            }
        }
    }

    /// Purchase requests for every affordable node whose prerequisites are
    /// already requested. Table order lists prerequisites first.
    fn shop(&mut self, credits: u64) -> Vec<GameLoopCommand> {
        let mut budget = credits;
        let mut commands = Vec::new();
        for node in self.graph.nodes() {
            if node.is_root() || self.requested.contains(node.id) {
                continue;
            }
            let unlocked = node
                .prerequisites
                .iter()
                .all(|p| *p == ROOT_NODE_ID || self.requested.contains(p));
            if !unlocked {
                continue;
            }
            let cost = node.actual_cost();
            if cost > budget {
                continue;
            }
            budget -= cost;
            self.requested.insert(node.id);
            commands.push(GameLoopCommand::PlayerCommand(PlayerCommand::Purchase {
                node_id: node.id.to_string(),
            }));
        }
        commands
    }

    fn aim_and_fire(&self, snapshot: &SimSnapshot) -> Vec<GameLoopCommand> {
        let Some(target) = closest_to_ship(&snapshot.asteroids) else {
            return vec![GameLoopCommand::Pointer(None)];
        };
        let mut commands = vec![GameLoopCommand::Pointer(Some(target.position))];
        for (slot, view) in SkillSlot::ALL.iter().zip(&snapshot.skills) {
            if view.unlocked && view.cooldown_remaining <= 0.0 {
                commands.push(GameLoopCommand::PressSkill(*slot));
            }
        }
        commands
    }
}

/// Asteroids fall toward the ship, so the lowest one is the most urgent.
fn closest_to_ship(asteroids: &[AsteroidView]) -> Option<&AsteroidView> {
    asteroids
        .iter()
        .min_by(|a, b| a.position.y.total_cmp(&b.position.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use orefall_core::state::SkillView;

    fn asteroid(id: u64, position: Vec2) -> AsteroidView {
        AsteroidView {
            id,
            position,
            rotation: 0.0,
            scale: 1.0,
            health_fraction: 1.0,
            resource_tier: 0,
            burning: false,
            since_hit: 0.0,
        }
    }

    fn snapshot(phase: GamePhase) -> SimSnapshot {
        SimSnapshot {
            phase,
            skills: vec![
                SkillView {
                    unlocked: true,
                    cooldown_remaining: 0.0,
                    cooldown_fraction: 0.0,
                },
                SkillView {
                    unlocked: false,
                    cooldown_remaining: 0.0,
                    cooldown_fraction: 0.0,
                },
                SkillView {
                    unlocked: true,
                    cooldown_remaining: 3.0,
                    cooldown_fraction: 0.2,
                },
                SkillView {
                    unlocked: true,
                    cooldown_remaining: 0.0,
                    cooldown_fraction: 0.0,
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_aims_at_lowest_asteroid_and_fires_ready_skills() {
        let mut player = Autoplayer::new(1);
        let mut snap = snapshot(GamePhase::Playing);
        snap.asteroids = vec![
            asteroid(1, Vec2::new(2.0, 5.0)),
            asteroid(2, Vec2::new(-1.0, -3.0)),
        ];

        let commands = player.decide(&snap);
        assert_eq!(
            commands,
            vec![
                GameLoopCommand::Pointer(Some(Vec2::new(-1.0, -3.0))),
                GameLoopCommand::PressSkill(SkillSlot::LaserBurst),
                GameLoopCommand::PressSkill(SkillSlot::Overcharge),
            ]
        );
    }

    #[test]
    fn test_empty_field_lowers_pointer() {
        let mut player = Autoplayer::new(1);
        let commands = player.decide(&snapshot(GamePhase::Playing));
        assert_eq!(commands, vec![GameLoopCommand::Pointer(None)]);
    }

    #[test]
    fn test_shops_once_then_starts_run() {
        let mut player = Autoplayer::new(2);
        let mut snap = snapshot(GamePhase::Upgrading);
        snap.credits = 120;

        let commands = player.decide(&snap);
        assert_eq!(
            commands.last(),
            Some(&GameLoopCommand::PlayerCommand(PlayerCommand::StartRun))
        );
        let spent: u64 = commands
            .iter()
            .filter_map(|c| match c {
                GameLoopCommand::PlayerCommand(PlayerCommand::Purchase { node_id }) => {
                    UpgradeGraph::standard().get(node_id).map(|n| n.actual_cost())
                }
                _ => None,
            })
            .sum();
        assert!(spent > 0 && spent <= 120);

        // Still on the upgrade screen while the start is in flight.
        assert!(player.decide(&snap).is_empty());
    }

    #[test]
    fn test_stops_after_wanted_runs() {
        let mut player = Autoplayer::new(1);
        player.decide(&snapshot(GamePhase::Playing));
        let commands = player.decide(&snapshot(GamePhase::GameOver));
        assert_eq!(commands, vec![GameLoopCommand::Shutdown]);
        assert_eq!(player.runs_completed(), 1);
        assert!(player.is_finished());
    }

    #[test]
    fn test_more_runs_reopen_upgrades() {
        let mut player = Autoplayer::new(3);
        let commands = player.decide(&snapshot(GamePhase::GameOver));
        assert_eq!(
            commands,
            vec![GameLoopCommand::PlayerCommand(PlayerCommand::OpenUpgrades)]
        );
        // Repeated GameOver snapshots count the run once.
        player.decide(&snapshot(GamePhase::GameOver));
        assert_eq!(player.runs_completed(), 1);
    }
}

//! Scripted autopilot for demo runs.
//!
//! Reads only the snapshot, like a human player would: dodges enemy fire
//! heading for the ship, steps into the safe lane of an area sweep, and
//! otherwise lines up under the nearest target and keeps firing.

use barrage_core::commands::PlayerCommand;
use barrage_core::constants::*;
use barrage_core::enums::{Direction, DrawKind, Faction, SkillKind};
use barrage_core::state::{Drawable, GameStateSnapshot, PatternHint};
use barrage_core::types::PlayerId;

/// How far above the ship enemy fire is considered a threat.
const DANGER_HEIGHT: f32 = 120.0;
/// Horizontal slack when lining up under a target.
const AIM_TOLERANCE: f32 = PLAYER_SPEED;
/// Ticks between bombs while a boss is on the field.
const BOMB_EVERY_TICKS: u64 = 240;

#[derive(Debug, Clone)]
pub struct Autopilot {
    players: Vec<PlayerId>,
}

fn center_x(d: &Drawable) -> f32 {
    d.x + d.w * 0.5
}

fn toward(dx: f32) -> Direction {
    if dx < 0.0 {
        Direction::Left
    } else {
        Direction::Right
    }
}

impl Autopilot {
    pub fn new(players: usize) -> Self {
        Self {
            players: (1..=players.clamp(1, MAX_PLAYERS))
                .map(|n| PlayerId(n as u8))
                .collect(),
        }
    }

    /// Commands for every piloted player this tick.
    pub fn commands(&self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let mut commands = Vec::new();
        for &player in &self.players {
            let ship = snapshot
                .drawables
                .iter()
                .find(|d| d.kind == DrawKind::Player { player: player.0 });
            if let Some(ship) = ship {
                self.pilot(player, ship, snapshot, &mut commands);
            }
        }
        commands
    }

    fn pilot(
        &self,
        player: PlayerId,
        ship: &Drawable,
        snapshot: &GameStateSnapshot,
        commands: &mut Vec<PlayerCommand>,
    ) {
        let x = center_x(ship);
        let hud = snapshot.hud.players.iter().find(|h| h.player == player);
        let teleport_ready = hud.is_some_and(|h| h.teleport_cooldown == 0.0);

        commands.push(PlayerCommand::Fire { player });

        if let Some(dx) = Self::incoming(ship, snapshot) {
            let direction = toward(-dx);
            if teleport_ready {
                commands.push(PlayerCommand::Teleport { player, direction });
            } else {
                commands.push(PlayerCommand::Move { player, direction });
            }
            return;
        }

        if let Some(safe_x) = Self::safe_lane_center(snapshot) {
            if (safe_x - x).abs() > AIM_TOLERANCE {
                commands.push(PlayerCommand::Move {
                    player,
                    direction: toward(safe_x - x),
                });
            }
            return;
        }

        let boss_up = snapshot.hud.boss_health.is_some();
        let bombs = hud.map_or(0, |h| h.bombs);
        if boss_up && bombs > 0 && snapshot.time.tick % BOMB_EVERY_TICKS == 0 {
            commands.push(PlayerCommand::UseSkill {
                player,
                skill: SkillKind::Bomb,
            });
        }

        let target = snapshot
            .drawables
            .iter()
            .filter(|d| matches!(d.kind, DrawKind::Enemy { .. } | DrawKind::Boss { .. }))
            .min_by(|a, b| (center_x(a) - x).abs().total_cmp(&(center_x(b) - x).abs()));
        if let Some(target) = target {
            let dx = center_x(target) - x;
            if dx.abs() > AIM_TOLERANCE {
                commands.push(PlayerCommand::Move {
                    player,
                    direction: toward(dx),
                });
            }
        }
    }

    /// Horizontal offset of the closest enemy shot about to land on `ship`.
    fn incoming(ship: &Drawable, snapshot: &GameStateSnapshot) -> Option<f32> {
        let x = center_x(ship);
        snapshot
            .drawables
            .iter()
            .filter(|d| {
                matches!(
                    d.kind,
                    DrawKind::Bullet {
                        faction: Faction::Enemy,
                        ..
                    }
                )
            })
            .filter(|d| {
                let above = ship.y - (d.y + d.h);
                (0.0..DANGER_HEIGHT).contains(&above) && (center_x(d) - x).abs() < ship.w
            })
            .map(|d| center_x(d) - x)
            .min_by(|a, b| a.abs().total_cmp(&b.abs()))
    }

    fn safe_lane_center(snapshot: &GameStateSnapshot) -> Option<f32> {
        snapshot.hints.iter().find_map(|hint| match hint {
            PatternHint::LaneOverlay {
                safe_lane,
                lane_width,
                ..
            } => Some((*safe_lane as f32 + 0.5) * lane_width),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrage_core::enums::{BulletKind, EnemyKind};
    use barrage_core::state::PlayerHud;

    fn drawable(kind: DrawKind, x: f32, y: f32, w: f32, h: f32) -> Drawable {
        Drawable {
            kind,
            x,
            y,
            w,
            h,
            rotation: 0.0,
            color: 0,
        }
    }

    fn snapshot_with(drawables: Vec<Drawable>) -> GameStateSnapshot {
        let mut snapshot = GameStateSnapshot::default();
        snapshot.drawables = drawables;
        snapshot.hud.players = vec![PlayerHud {
            player: PlayerId(1),
            score: 0,
            lives: 3,
            teleport_cooldown: 0.5,
            charge: 0.0,
            bombs: 0,
        }];
        snapshot
    }

    fn ship() -> Drawable {
        drawable(DrawKind::Player { player: 1 }, 384.0, 552.0, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    #[test]
    fn test_fires_and_lines_up() {
        let enemy = drawable(
            DrawKind::Enemy {
                kind: EnemyKind::Grunt,
            },
            100.0,
            60.0,
            ENEMY_WIDTH,
            ENEMY_HEIGHT,
        );
        let commands = Autopilot::new(1).commands(&snapshot_with(vec![ship(), enemy]));
        assert!(commands.contains(&PlayerCommand::Fire { player: PlayerId(1) }));
        assert!(commands.contains(&PlayerCommand::Move {
            player: PlayerId(1),
            direction: Direction::Left,
        }));
    }

    #[test]
    fn test_dodges_incoming_fire() {
        let shot = drawable(
            DrawKind::Bullet {
                kind: BulletKind::Standard,
                faction: Faction::Enemy,
            },
            402.0,
            500.0,
            ENEMY_BULLET_SIZE,
            ENEMY_BULLET_SIZE,
        );
        let commands = Autopilot::new(1).commands(&snapshot_with(vec![ship(), shot]));
        // The shot is right of center, so step left.
        assert!(commands.contains(&PlayerCommand::Move {
            player: PlayerId(1),
            direction: Direction::Left,
        }));
    }

    #[test]
    fn test_heads_for_safe_lane() {
        let mut snapshot = snapshot_with(vec![ship()]);
        snapshot.hints.push(PatternHint::LaneOverlay {
            lanes: 5,
            safe_lane: 4,
            lane_width: 160.0,
            front_y: None,
        });
        let commands = Autopilot::new(1).commands(&snapshot);
        assert!(commands.contains(&PlayerCommand::Move {
            player: PlayerId(1),
            direction: Direction::Right,
        }));
    }

    #[test]
    fn test_missing_ship_is_skipped() {
        let commands = Autopilot::new(2).commands(&snapshot_with(vec![ship()]));
        assert!(commands
            .iter()
            .all(|c| c.player() == Some(PlayerId(1))));
    }
}

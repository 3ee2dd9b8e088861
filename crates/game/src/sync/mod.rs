use glam::Vec2;

use crate::player::{Movement, PlayerState};

#[derive(Debug, Clone, Copy, PartialEq)]
struct MotionSnapshot {
    position: Vec2,
    facing_left: bool,
    holding: bool,
}

impl MotionSnapshot {
    fn of(player: &PlayerState) -> Self {
        Self {
            position: player.position,
            facing_left: player.facing_left,
            holding: player.weapon.holding,
        }
    }
}

/// Decides once per tick whether the local avatar changed enough to be
/// broadcast.
///
/// x is compared exactly. y ignores drift below `y_tolerance`.
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    previous: Option<MotionSnapshot>,
    y_tolerance: f32,
}

impl ChangeDetector {
    pub fn new(y_tolerance: f32) -> Self {
        Self {
            previous: None,
            y_tolerance,
        }
    }

    /// Compares against the end of the previous tick, then records the
    /// current state whatever the result. The first observation only seeds
    /// the snapshot.
    pub fn observe(&mut self, player: &PlayerState) -> Option<Movement> {
        let current = MotionSnapshot::of(player);
        let previous = self.previous.replace(current)?;

        let x_changed = current.position.x != previous.position.x;
        let y_changed = (current.position.y - previous.position.y).abs() >= self.y_tolerance;
        let changed = x_changed
            || y_changed
            || current.facing_left != previous.facing_left
            || current.holding != previous.holding;

        changed.then(|| Movement {
            position: player.position,
            facing_left: player.facing_left,
            weapon: player.weapon,
            run: x_changed,
        })
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{PlayerSpawn, Team, Weapon};

    fn player() -> PlayerState {
        PlayerState::from_spawn(
            PlayerSpawn {
                player_id: "a".into(),
                position: Vec2::new(100.0, 450.0),
                facing_left: false,
                team: Team::Blue,
            },
            100,
        )
    }

    #[test]
    fn first_tick_only_seeds() {
        let mut detector = ChangeDetector::new(0.0005);
        let player = player();

        assert_eq!(detector.observe(&player), None);
        assert_eq!(detector.observe(&player), None);
    }

    #[test]
    fn emits_once_per_changed_tick() {
        let mut detector = ChangeDetector::new(0.0005);
        let mut player = player();
        detector.observe(&player);

        player.position.x += 4.0;
        let moved = detector.observe(&player).unwrap();
        assert!(moved.run);
        assert_eq!(moved.position.x, 104.0);

        assert_eq!(detector.observe(&player), None);

        player.facing_left = true;
        let turned = detector.observe(&player).unwrap();
        assert!(!turned.run);
        assert!(turned.facing_left);

        player.weapon = Weapon::pistol();
        let armed = detector.observe(&player).unwrap();
        assert!(armed.weapon.holding);
    }

    #[test]
    fn y_jitter_is_suppressed() {
        let mut detector = ChangeDetector::new(0.0005);
        let mut player = player();
        detector.observe(&player);

        player.position.y += 0.0001;
        assert_eq!(detector.observe(&player), None);

        player.position.y += 2.0;
        let fell = detector.observe(&player).unwrap();
        assert!(!fell.run);
    }

    #[test]
    fn reset_forgets_snapshot() {
        let mut detector = ChangeDetector::new(0.0005);
        let mut player = player();
        detector.observe(&player);
        detector.reset();

        player.position.x += 1.0;
        assert_eq!(detector.observe(&player), None);
    }
}

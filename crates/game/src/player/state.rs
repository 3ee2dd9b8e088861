use glam::Vec2;

use crate::entity::{BodyHandle, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Team {
    #[default]
    Blue,
    Red,
}

impl Team {
    /// Anything other than `"blue"` plays as red.
    pub fn from_wire(name: &str) -> Self {
        if name == "blue" { Self::Blue } else { Self::Red }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Red => "red",
        }
    }

    pub fn tint(self) -> u32 {
        match self {
            Self::Blue => 0x0000ff,
            Self::Red => 0xff0000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeaponKind {
    #[default]
    None,
    Pistol,
}

impl WeaponKind {
    pub fn from_wire(name: Option<&str>) -> Self {
        match name {
            Some("pistol") => Self::Pistol,
            _ => Self::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Pistol => "pistol",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub holding: bool,
}

impl Weapon {
    pub fn pistol() -> Self {
        Self {
            kind: WeaponKind::Pistol,
            holding: true,
        }
    }

    pub fn can_fire(&self) -> bool {
        self.holding && self.kind == WeaponKind::Pistol
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Damage {
    pub applied: i32,
    pub remaining: i32,
    /// Set only on the hit that took health from positive to zero.
    pub defeated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    current: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max.max(0) }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    pub fn apply_damage(&mut self, amount: i32) -> Damage {
        let applied = amount.clamp(0, self.current);
        let was_alive = self.current > 0;
        self.current -= applied;

        Damage {
            applied,
            remaining: self.current,
            defeated: was_alive && self.current == 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSpawn {
    pub player_id: PlayerId,
    pub position: Vec2,
    pub facing_left: bool,
    pub team: Team,
}

/// One "player moved" update, outbound from the change detector or inbound
/// for a remote player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    pub position: Vec2,
    pub facing_left: bool,
    pub weapon: Weapon,
    pub run: bool,
}

/// The input-driven avatar. Network messages never write to it.
#[derive(Debug, Clone)]
pub struct PlayerState {
    pub player_id: PlayerId,
    pub position: Vec2,
    pub facing_left: bool,
    pub weapon: Weapon,
    pub health: Health,
    pub team: Team,
    pub body: Option<BodyHandle>,
}

impl PlayerState {
    pub fn from_spawn(spawn: PlayerSpawn, max_health: i32) -> Self {
        Self {
            player_id: spawn.player_id,
            position: spawn.position,
            facing_left: spawn.facing_left,
            weapon: Weapon::default(),
            health: Health::new(max_health),
            team: spawn.team,
            body: None,
        }
    }

    pub fn muzzle(&self, offset: Vec2) -> Vec2 {
        let dx = if self.facing_left { -offset.x } else { offset.x };
        Vec2::new(self.position.x + dx, self.position.y + offset.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_floors_at_zero() {
        let mut health = Health::new(25);

        let first = health.apply_damage(10);
        assert_eq!(first.remaining, 15);
        assert!(!first.defeated);

        let second = health.apply_damage(10);
        let third = health.apply_damage(10);
        assert_eq!(second.remaining, 5);
        assert_eq!(third.applied, 5);
        assert_eq!(third.remaining, 0);
        assert!(third.defeated);

        let fourth = health.apply_damage(10);
        assert_eq!(fourth.applied, 0);
        assert_eq!(fourth.remaining, 0);
        assert!(!fourth.defeated);
        assert!(health.is_depleted());
    }

    #[test]
    fn wire_names() {
        assert_eq!(Team::from_wire("blue"), Team::Blue);
        assert_eq!(Team::from_wire("green"), Team::Red);
        assert_eq!(WeaponKind::from_wire(Some("pistol")), WeaponKind::Pistol);
        assert_eq!(WeaponKind::from_wire(Some("")), WeaponKind::None);
        assert_eq!(WeaponKind::from_wire(None), WeaponKind::None);
    }

    #[test]
    fn muzzle_follows_facing() {
        let mut player = PlayerState::from_spawn(
            PlayerSpawn {
                player_id: "a".into(),
                position: Vec2::new(100.0, 200.0),
                facing_left: false,
                team: Team::Blue,
            },
            100,
        );
        let offset = Vec2::new(10.0, 3.0);

        assert_eq!(player.muzzle(offset), Vec2::new(110.0, 203.0));
        player.facing_left = true;
        assert_eq!(player.muzzle(offset), Vec2::new(90.0, 203.0));
    }
}

use std::collections::{BTreeMap, HashMap};

use glam::Vec2;

use crate::entity::{BodyHandle, PickupId, PlayerId};
use crate::player::{Health, Movement, PlayerSpawn, Team, Weapon};

/// Another client's avatar, driven only by network events.
#[derive(Debug, Clone)]
pub struct RemotePlayer {
    pub player_id: PlayerId,
    pub position: Vec2,
    pub facing_left: bool,
    pub weapon: Weapon,
    pub run: bool,
    pub health: Health,
    pub team: Team,
    pub body: Option<BodyHandle>,
}

impl RemotePlayer {
    pub fn from_spawn(spawn: PlayerSpawn, max_health: i32) -> Self {
        Self {
            player_id: spawn.player_id,
            position: spawn.position,
            facing_left: spawn.facing_left,
            weapon: Weapon::default(),
            run: false,
            health: Health::new(max_health),
            team: spawn.team,
            body: None,
        }
    }

    fn apply(&mut self, movement: &Movement) {
        self.position = movement.position;
        self.facing_left = movement.facing_left;
        self.weapon = movement.weapon;
        self.run = movement.run;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeaponPickup {
    pub id: PickupId,
    pub position: Vec2,
    pub active: bool,
    pub body: Option<BodyHandle>,
}

/// Remote players and weapon pickups, keyed by their network ids.
///
/// Every operation tolerates duplicate and out-of-order delivery: creating
/// an existing entity keeps the one already stored, and updating or removing an
/// unknown one does nothing. Deactivated pickups stay in the table so their
/// id can never come back.
#[derive(Debug)]
pub struct RemoteRegistry {
    players: HashMap<PlayerId, RemotePlayer>,
    pickups: BTreeMap<PickupId, WeaponPickup>,
    max_health: i32,
}

impl RemoteRegistry {
    pub fn new(max_health: i32) -> Self {
        Self {
            players: HashMap::new(),
            pickups: BTreeMap::new(),
            max_health,
        }
    }

    pub fn insert_player(&mut self, spawn: PlayerSpawn) -> bool {
        if self.players.contains_key(&spawn.player_id) {
            log::debug!("duplicate create for player {}, keeping existing", spawn.player_id);
            return false;
        }
        let player = RemotePlayer::from_spawn(spawn, self.max_health);
        self.players.insert(player.player_id.clone(), player);
        true
    }

    /// Returns how many players were newly created.
    pub fn apply_roster_snapshot(&mut self, entries: impl IntoIterator<Item = PlayerSpawn>) -> usize {
        entries
            .into_iter()
            .map(|spawn| self.insert_player(spawn))
            .filter(|created| *created)
            .count()
    }

    pub fn apply_movement(&mut self, player_id: &str, movement: &Movement) -> bool {
        match self.players.get_mut(player_id) {
            Some(player) => {
                player.apply(movement);
                true
            }
            None => {
                log::debug!("movement for unknown player {}, dropping", player_id);
                false
            }
        }
    }

    pub fn remove(&mut self, player_id: &str) -> Option<RemotePlayer> {
        self.players.remove(player_id)
    }

    pub fn player(&self, player_id: &str) -> Option<&RemotePlayer> {
        self.players.get(player_id)
    }

    pub fn player_mut(&mut self, player_id: &str) -> Option<&mut RemotePlayer> {
        self.players.get_mut(player_id)
    }

    pub fn players(&self) -> impl Iterator<Item = &RemotePlayer> {
        self.players.values()
    }

    /// The opponent in a two-player room.
    pub fn opponent(&self) -> Option<&RemotePlayer> {
        self.players.values().min_by(|a, b| a.player_id.cmp(&b.player_id))
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn spawn_pickup(&mut self, id: PickupId, position: Vec2) -> bool {
        if self.pickups.contains_key(&id) {
            log::debug!("duplicate create for pickup {}, keeping existing", id);
            return false;
        }
        self.pickups.insert(
            id,
            WeaponPickup {
                id,
                position,
                active: true,
                body: None,
            },
        );
        true
    }

    /// Returns true only for the call that actually deactivated the pickup.
    pub fn deactivate_pickup(&mut self, id: PickupId) -> bool {
        match self.pickups.get_mut(&id) {
            Some(pickup) if pickup.active => {
                pickup.active = false;
                true
            }
            Some(_) => false,
            None => {
                log::debug!("deactivate for unknown pickup {}, ignoring", id);
                false
            }
        }
    }

    pub fn pickup(&self, id: PickupId) -> Option<&WeaponPickup> {
        self.pickups.get(&id)
    }

    pub fn pickup_mut(&mut self, id: PickupId) -> Option<&mut WeaponPickup> {
        self.pickups.get_mut(&id)
    }

    pub fn pickups(&self) -> impl Iterator<Item = &WeaponPickup> {
        self.pickups.values()
    }

    pub fn active_pickups(&self) -> impl Iterator<Item = &WeaponPickup> {
        self.pickups.values().filter(|p| p.active)
    }
}

use std::collections::HashMap;

use serde_json::Value;

use crate::combat::ProjectileSpawn;
use crate::net::{
    BulletInfo, CodecError, JoinedInfo, MessageKind, OutboundMessage, PickupInfo, PickupRef,
    PlayerMovedInfo, PlayerRef, RosterInfo, decode_payload,
};
use crate::player::{Movement, PlayerSpawn, PlayerState};

use super::controller::Session;
use super::events::{GameOverReason, SessionEvent};
use super::state::{Role, SessionState};

pub(super) type Handler = fn(&mut Session, Value) -> Result<(), CodecError>;

/// Inbound message kind to handler, built once per session.
#[derive(Debug)]
pub(super) struct DispatchTable {
    handlers: HashMap<MessageKind, Handler>,
}

impl DispatchTable {
    pub(super) fn new() -> Self {
        let entries: [(MessageKind, Handler); 11] = [
            (MessageKind::Roster, Session::on_roster),
            (MessageKind::PlayerJoined, Session::on_player_joined),
            (MessageKind::PlayerLeft, Session::on_player_left),
            (MessageKind::PlayerMoved, Session::on_player_moved),
            (MessageKind::PickupSpawned, Session::on_pickup_spawned),
            (MessageKind::PickupDestroyed, Session::on_pickup_destroyed),
            (MessageKind::BulletIncoming, Session::on_bullet_incoming),
            (MessageKind::GameEnded, Session::on_game_ended),
            (MessageKind::HostAssigned, Session::on_host_assigned),
            (MessageKind::GuestAssigned, Session::on_guest_assigned),
            (MessageKind::StartGame, Session::on_start_game),
        ];

        Self {
            handlers: entries.into_iter().collect(),
        }
    }

    pub(super) fn get(&self, kind: MessageKind) -> Option<Handler> {
        self.handlers.get(&kind).copied()
    }

    #[cfg(test)]
    pub(super) fn len(&self) -> usize {
        self.handlers.len()
    }
}

impl Session {
    fn is_local(&self, player_id: &str) -> bool {
        self.local_id.as_deref() == Some(player_id)
    }

    fn on_roster(&mut self, payload: Value) -> Result<(), CodecError> {
        let roster: RosterInfo = decode_payload(MessageKind::Roster, payload)?;
        let spawns = roster.into_spawns();

        match self.state {
            SessionState::AwaitingRoster => {}
            SessionState::RoundActive => {
                let (_, remotes): (Vec<PlayerSpawn>, Vec<PlayerSpawn>) =
                    spawns.into_iter().partition(|s| self.is_local(&s.player_id));
                let created = self.world.remotes.apply_roster_snapshot(remotes);
                log::debug!("late roster created {} players", created);
                return Ok(());
            }
            _ => {
                log::debug!("roster ignored in state {}", self.state);
                return Ok(());
            }
        }

        let mut local = None;
        let mut remote_count = 0;
        for spawn in spawns {
            if self.is_local(&spawn.player_id) {
                local = Some(PlayerState::from_spawn(spawn, self.config.max_health));
            } else if self.world.remotes.insert_player(spawn) {
                remote_count += 1;
            }
        }

        let Some(local) = local else {
            log::warn!("roster has no entry for the local player, still waiting");
            return Ok(());
        };

        let local_id = local.player_id.clone();
        log::info!("round started as {} with {} remote players", local_id, remote_count);
        self.world.local = Some(local);
        self.detector.reset();
        self.state = SessionState::RoundActive;
        self.events.push(SessionEvent::RoundStarted {
            local_id,
            remote_count,
        });
        Ok(())
    }

    fn on_player_joined(&mut self, payload: Value) -> Result<(), CodecError> {
        let joined: JoinedInfo = decode_payload(MessageKind::PlayerJoined, payload)?;
        let spawn = PlayerSpawn::from(joined);
        if self.is_local(&spawn.player_id) {
            return Ok(());
        }

        let player_id = spawn.player_id.clone();
        if self.world.remotes.insert_player(spawn) {
            log::info!("player {} joined", player_id);
            self.events.push(SessionEvent::PlayerJoined { player_id });
        }
        Ok(())
    }

    fn on_player_left(&mut self, payload: Value) -> Result<(), CodecError> {
        let left: PlayerRef = decode_payload(MessageKind::PlayerLeft, payload)?;
        let player_id = left.into_id();

        if self.world.remotes.remove(&player_id).is_some() {
            log::info!("player {} left", player_id);
            self.events.push(SessionEvent::PlayerLeft { player_id });
        } else {
            log::debug!("leave for unknown player {}", player_id);
        }
        Ok(())
    }

    fn on_player_moved(&mut self, payload: Value) -> Result<(), CodecError> {
        let moved: PlayerMovedInfo = decode_payload(MessageKind::PlayerMoved, payload)?;
        if self.is_local(&moved.player_id) {
            return Ok(());
        }
        let movement = Movement::from(&moved.movement);
        self.world.remotes.apply_movement(&moved.player_id, &movement);
        Ok(())
    }

    fn on_pickup_spawned(&mut self, payload: Value) -> Result<(), CodecError> {
        let pickup: PickupInfo = decode_payload(MessageKind::PickupSpawned, payload)?;
        if self.state == SessionState::GameOver {
            return Ok(());
        }

        self.observe_pickup_id(pickup.id);
        if self.world.remotes.spawn_pickup(pickup.id, pickup.position()) {
            self.events.push(SessionEvent::PickupSpawned { id: pickup.id });
        }
        Ok(())
    }

    fn on_pickup_destroyed(&mut self, payload: Value) -> Result<(), CodecError> {
        let pickup: PickupRef = decode_payload(MessageKind::PickupDestroyed, payload)?;
        if self.state == SessionState::GameOver {
            return Ok(());
        }

        let id = pickup.id();
        self.observe_pickup_id(id);
        if self.world.remotes.deactivate_pickup(id) {
            self.events.push(SessionEvent::PickupRemoved {
                id,
                taken_locally: false,
            });
        }
        Ok(())
    }

    fn on_bullet_incoming(&mut self, payload: Value) -> Result<(), CodecError> {
        let bullet: BulletInfo = decode_payload(MessageKind::BulletIncoming, payload)?;
        if self.state == SessionState::GameOver {
            return Ok(());
        }

        self.world.projectiles.acquire(ProjectileSpawn {
            position: bullet.position(),
            facing_left: bullet.facing_left,
            owner_is_enemy: bullet.enemy_bullet,
            lifetime_ms: self.config.bullet_lifetime_ms,
        });
        Ok(())
    }

    fn on_game_ended(&mut self, _payload: Value) -> Result<(), CodecError> {
        if self.state != SessionState::RoundActive {
            log::debug!("gameHasEnded ignored in state {}", self.state);
            return Ok(());
        }
        self.end_round(GameOverReason::RemoteEnded);
        Ok(())
    }

    fn on_host_assigned(&mut self, _payload: Value) -> Result<(), CodecError> {
        self.assign_role(Role::Host);
        Ok(())
    }

    fn on_guest_assigned(&mut self, _payload: Value) -> Result<(), CodecError> {
        if self.assign_role(Role::Guest) {
            self.outbox.push(OutboundMessage::GuestReady);
        }
        Ok(())
    }

    fn on_start_game(&mut self, _payload: Value) -> Result<(), CodecError> {
        if self.role != Role::Host {
            log::debug!("startGame ignored, role is {:?}", self.role);
            return Ok(());
        }
        if self.pickups_placed || self.state == SessionState::GameOver {
            return Ok(());
        }
        self.pickups_placed = true;

        let spawns = self.config.pickup_spawns.clone();
        let mut placed = 0;
        for position in spawns {
            let Some(id) = self.reserve_pickup_id() else {
                log::warn!("pickup ids exhausted, skipping pickup at {:?}", position);
                continue;
            };
            self.world.remotes.spawn_pickup(id, position);
            placed += 1;
            self.outbox.push(OutboundMessage::PickupCreated(PickupInfo {
                x: position.x,
                y: position.y,
                id,
            }));
            self.events.push(SessionEvent::PickupSpawned { id });
        }
        log::info!("placed {} pickups", placed);
        Ok(())
    }

    fn assign_role(&mut self, role: Role) -> bool {
        if self.role == role {
            return false;
        }
        log::info!("assigned role {:?}", role);
        self.role = role;
        self.events.push(SessionEvent::RoleAssigned(role));
        true
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use serde_json::json;

    use super::*;
    use crate::config::TuningConfig;
    use crate::net::Frame;
    use crate::player::WeaponKind;

    fn session() -> Session {
        let mut session = Session::new(TuningConfig::default());
        session.connect("a");
        session.handle_frame(Frame::new(
            MessageKind::Roster,
            json!({
                "a": { "playerId": "a", "x": 100.0, "y": 450.0, "team": "blue" },
                "b": { "playerId": "b", "x": 900.0, "y": 450.0, "facingLeft": true, "team": "red" },
            }),
        ));
        session
    }

    fn dropped(session: &mut Session) -> usize {
        session
            .drain_events()
            .filter(|e| matches!(e, SessionEvent::MessageDropped { .. }))
            .count()
    }

    #[test]
    fn registers_every_inbound_kind() {
        let table = DispatchTable::new();
        assert_eq!(table.len(), MessageKind::INBOUND.len());
        for kind in MessageKind::INBOUND {
            assert!(table.get(kind).is_some(), "missing handler for {}", kind);
        }
        for kind in MessageKind::OUTBOUND {
            assert!(table.get(kind).is_none());
        }
    }

    #[test]
    fn roster_creates_local_and_remote() {
        let mut session = session();

        assert_eq!(session.state(), SessionState::RoundActive);
        let local = session.local_player().unwrap();
        assert_eq!(local.player_id, "a");
        assert_eq!(local.position, Vec2::new(100.0, 450.0));
        assert_eq!(session.world().remotes().player_count(), 1);
        assert!(session.world().remotes().player("b").unwrap().facing_left);
    }

    #[test]
    fn malformed_payload_is_dropped() {
        let mut session = session();
        session.drain_events().for_each(drop);

        session.handle_frame(Frame::new(MessageKind::BulletIncoming, json!({ "x": 1.0 })));
        session.handle_text("not json");
        session.handle_text(r#"{ "event": "teleport", "payload": {} }"#);

        assert_eq!(dropped(&mut session), 3);
        assert_eq!(session.world().projectiles().active_count(), 0);
        assert_eq!(session.state(), SessionState::RoundActive);
    }

    #[test]
    fn movement_for_local_id_is_ignored() {
        let mut session = session();
        session.handle_frame(Frame::new(
            MessageKind::PlayerMoved,
            json!({
                "playerId": "a",
                "x": 1.0,
                "y": 1.0,
                "facingLeft": true,
                "currentWeapon": { "name": "pistol", "holding": true },
                "run": false,
            }),
        ));

        let local = session.local_player().unwrap();
        assert_eq!(local.position, Vec2::new(100.0, 450.0));
        assert_eq!(local.weapon.kind, WeaponKind::None);
    }

    #[test]
    fn start_game_requires_host() {
        let mut session = session();
        session.handle_frame(Frame::empty(MessageKind::StartGame));
        assert!(session.pending_outbound().is_empty());

        session.handle_frame(Frame::empty(MessageKind::HostAssigned));
        session.handle_frame(Frame::empty(MessageKind::StartGame));
        session.handle_frame(Frame::empty(MessageKind::StartGame));

        let ids: Vec<_> = session
            .drain_outbox()
            .filter_map(|m| match m {
                OutboundMessage::PickupCreated(info) => Some(info.id),
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(session.world().remotes().active_pickups().count(), 2);
    }

    #[test]
    fn guest_announces_ready_once() {
        let mut session = session();
        session.handle_frame(Frame::empty(MessageKind::GuestAssigned));
        session.handle_frame(Frame::empty(MessageKind::GuestAssigned));

        let ready = session
            .drain_outbox()
            .filter(|m| *m == OutboundMessage::GuestReady)
            .count();
        assert_eq!(ready, 1);
        assert_eq!(session.role(), Role::Guest);
    }

    #[test]
    fn received_pickup_ids_are_never_reissued() {
        let mut session = session();
        session.handle_frame(Frame::new(
            MessageKind::PickupSpawned,
            json!({ "x": 5.0, "y": 5.0, "id": 7 }),
        ));
        session.handle_frame(Frame::empty(MessageKind::HostAssigned));
        session.handle_frame(Frame::empty(MessageKind::StartGame));

        let mut ids: Vec<_> = session.world().remotes().pickups().map(|p| p.id).collect();
        ids.sort();
        assert_eq!(ids, vec![7, 8, 9]);
    }

    #[test]
    fn exhausted_pickup_ids_skip_placement() {
        let mut session = session();
        session.handle_frame(Frame::new(
            MessageKind::PickupSpawned,
            json!({ "x": 5.0, "y": 5.0, "id": u32::MAX }),
        ));
        session.handle_frame(Frame::empty(MessageKind::HostAssigned));
        session.handle_frame(Frame::empty(MessageKind::StartGame));

        let created = session
            .drain_outbox()
            .filter(|m| matches!(m, OutboundMessage::PickupCreated(_)))
            .count();
        assert_eq!(created, 0);
        assert_eq!(session.world().remotes().pickups().count(), 1);
        assert_eq!(session.state(), SessionState::RoundActive);
    }

    #[test]
    fn reserved_ids_skip_held_pickups() {
        let mut session = session();
        session.world.remotes.spawn_pickup(1, Vec2::ZERO);
        session.world.remotes.spawn_pickup(2, Vec2::ZERO);

        assert_eq!(session.reserve_pickup_id(), Some(3));
        assert_eq!(session.reserve_pickup_id(), Some(4));
    }

    #[test]
    fn game_ended_before_roster_is_ignored() {
        let mut session = Session::new(TuningConfig::default());
        session.connect("a");
        session.handle_frame(Frame::empty(MessageKind::GameEnded));
        assert_eq!(session.state(), SessionState::AwaitingRoster);

        session.handle_frame(Frame::new(
            MessageKind::Roster,
            json!({ "a": { "playerId": "a", "x": 100.0, "y": 450.0, "team": "blue" } }),
        ));
        assert_eq!(session.state(), SessionState::RoundActive);
        assert!(session.local_player().is_some());
    }

    #[test]
    fn movement_without_run_is_dropped() {
        let mut session = session();
        session.drain_events().for_each(drop);

        session.handle_frame(Frame::new(
            MessageKind::PlayerMoved,
            json!({
                "playerId": "b",
                "x": 1.0,
                "y": 1.0,
                "facingLeft": false,
                "currentWeapon": { "name": null, "holding": false },
            }),
        ));

        assert_eq!(dropped(&mut session), 1);
        assert_eq!(
            session.world().remotes().player("b").unwrap().position,
            Vec2::new(900.0, 450.0)
        );
    }

    #[test]
    fn game_over_freezes_bullets_and_pickups_but_not_leaves() {
        let mut session = session();
        session.handle_frame(Frame::empty(MessageKind::GameEnded));
        assert_eq!(session.state(), SessionState::GameOver);

        session.handle_frame(Frame::new(
            MessageKind::BulletIncoming,
            json!({ "x": 1.0, "y": 1.0, "facingLeft": false, "enemyBullet": true }),
        ));
        session.handle_frame(Frame::new(
            MessageKind::PickupSpawned,
            json!({ "x": 1.0, "y": 1.0, "id": 1 }),
        ));
        session.handle_frame(Frame::new(MessageKind::PlayerLeft, json!("b")));

        assert_eq!(session.world().projectiles().active_count(), 0);
        assert_eq!(session.world().remotes().pickups().count(), 0);
        assert_eq!(session.world().remotes().player_count(), 0);

        let game_overs = session
            .drain_events()
            .filter(|e| matches!(e, SessionEvent::GameOver { .. }))
            .count();
        session.handle_frame(Frame::empty(MessageKind::GameEnded));
        assert_eq!(game_overs, 1);
        assert_eq!(session.drain_events().count(), 0);
    }
}

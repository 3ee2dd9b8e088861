use crate::combat::{CollisionResolver, HitOutcome, ProjectileSpawn};
use crate::config::TuningConfig;
use crate::entity::{EntityRef, PickupId, PlayerId};
use crate::input::{InputFlags, TickInput};
use crate::net::{
    BulletInfo, CodecError, Frame, MovementInfo, OutboundMessage, Transport, encode,
    frame_from_text, inbound_kind,
};
use crate::player::{PlayerState, Weapon};
use crate::pool::PoolHandle;
use crate::sync::ChangeDetector;
use crate::world::World;

use super::dispatch::DispatchTable;
use super::events::{GameOverReason, SessionEvent};
use super::state::{Role, SessionState};

/// One client's view of a match.
///
/// Owns the world and drives it from two directions: `handle_frame` applies
/// room events, `tick` applies the local frame. Both queue outbound messages
/// and session events, drained by the embedding runtime.
pub struct Session {
    pub(super) config: TuningConfig,
    pub(super) state: SessionState,
    pub(super) role: Role,
    pub(super) local_id: Option<PlayerId>,
    pub(super) world: World,
    pub(super) detector: ChangeDetector,
    pub(super) resolver: CollisionResolver,
    dispatch: DispatchTable,
    pub(super) outbox: Vec<OutboundMessage>,
    pub(super) events: Vec<SessionEvent>,
    /// `None` once every id has been handed out.
    pub(super) next_pickup_id: Option<PickupId>,
    pub(super) pickups_placed: bool,
    fire_held: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(TuningConfig::default())
    }
}

impl Session {
    pub fn new(config: TuningConfig) -> Self {
        Self {
            world: World::new(&config),
            detector: ChangeDetector::new(config.y_tolerance),
            resolver: CollisionResolver::new(config.bullet_damage),
            config,
            state: SessionState::Idle,
            role: Role::Unassigned,
            local_id: None,
            dispatch: DispatchTable::new(),
            outbox: Vec::new(),
            events: Vec::new(),
            next_pickup_id: Some(1),
            pickups_placed: false,
            fire_held: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn local_id(&self) -> Option<&str> {
        self.local_id.as_deref()
    }

    pub fn config(&self) -> &TuningConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn local_player(&self) -> Option<&PlayerState> {
        self.world.local()
    }

    /// Binds the session to the id the transport assigned and starts waiting
    /// for the roster.
    pub fn connect(&mut self, local_id: impl Into<PlayerId>) -> bool {
        if self.state != SessionState::Idle {
            log::warn!("connect ignored in state {}", self.state);
            return false;
        }
        let local_id = local_id.into();
        log::info!("session connected as {}", local_id);
        self.local_id = Some(local_id.clone());
        self.state = SessionState::AwaitingRoster;
        self.events.push(SessionEvent::Connected { local_id });
        true
    }

    pub fn handle_text(&mut self, text: &str) {
        match frame_from_text(text) {
            Ok(frame) => self.handle_frame(frame),
            Err(err) => self.drop_message("<unparsed>", &err),
        }
    }

    pub fn handle_frame(&mut self, frame: Frame) {
        if !self.state.is_connected() {
            log::debug!("not connected, ignoring {}", frame.event);
            return;
        }

        let kind = match inbound_kind(&frame) {
            Ok(kind) => kind,
            Err(err) => {
                self.drop_message(&frame.event, &err);
                return;
            }
        };

        let Some(handler) = self.dispatch.get(kind) else {
            log::debug!("no handler for {}", kind);
            return;
        };

        if let Err(err) = handler(self, frame.payload) {
            self.drop_message(&frame.event, &err);
        }
    }

    pub fn handle_frames(&mut self, frames: impl IntoIterator<Item = Frame>) {
        for frame in frames {
            self.handle_frame(frame);
        }
    }

    /// Runs one local frame. Does nothing outside an active round.
    pub fn tick(&mut self, input: &TickInput) {
        if !self.state.is_playing() {
            return;
        }

        if let Some(local) = self.world.local.as_mut() {
            if let Some(position) = input.local_position {
                local.position = position;
            }
            if let Some(facing_left) = input.input.facing_left() {
                local.facing_left = facing_left;
            }
            if let Some(movement) = self.detector.observe(local) {
                self.outbox
                    .push(OutboundMessage::PlayerMovement(MovementInfo::from(&movement)));
            }
        }

        let fire = input.input.contains(InputFlags::FIRE);
        if fire && !self.fire_held {
            self.fire_weapon();
        }
        self.fire_held = fire;

        self.advance_projectiles(input.delta_ms);

        for overlap in &input.overlaps {
            if let Some(id) = overlap.local_pickup() {
                self.take_pickup(id);
            }
        }

        for overlap in CollisionResolver::order(&input.overlaps) {
            let outcome = self.resolver.resolve(&mut self.world, overlap);
            self.apply_outcome(outcome);
            if self.state == SessionState::GameOver {
                break;
            }
        }
    }

    /// Fires the held pistol from the muzzle. Returns the projectile handle,
    /// or `None` if the local player cannot shoot right now.
    pub fn fire_weapon(&mut self) -> Option<PoolHandle> {
        if !self.state.is_playing() {
            return None;
        }
        let local = self.world.local.as_ref()?;
        if !local.weapon.can_fire() {
            return None;
        }

        let muzzle = local.muzzle(self.config.muzzle_offset);
        let facing_left = local.facing_left;
        let handle = self.world.projectiles.acquire(ProjectileSpawn {
            position: muzzle,
            facing_left,
            owner_is_enemy: false,
            lifetime_ms: self.config.bullet_lifetime_ms,
        });

        // The receiver sees our bullet as hostile.
        self.outbox.push(OutboundMessage::BulletFired(BulletInfo {
            x: muzzle.x,
            y: muzzle.y,
            facing_left,
            enemy_bullet: true,
        }));
        Some(handle)
    }

    pub fn drain_outbox(&mut self) -> impl Iterator<Item = OutboundMessage> + '_ {
        self.outbox.drain(..)
    }

    pub fn pending_outbound(&self) -> &[OutboundMessage] {
        &self.outbox
    }

    /// Encodes and sends every queued message. Returns how many were sent.
    pub fn flush(&mut self, transport: &mut impl Transport) -> usize {
        let mut sent = 0;
        for message in self.outbox.drain(..) {
            match encode(&message) {
                Ok(frame) => {
                    transport.send(frame);
                    sent += 1;
                }
                Err(err) => log::error!("{}", err),
            }
        }
        sent
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = SessionEvent> + '_ {
        self.events.drain(..)
    }

    fn advance_projectiles(&mut self, delta_ms: f32) {
        let speed = self.config.bullet_speed_per_ms();
        let expired: Vec<PoolHandle> = self
            .world
            .projectiles
            .iter_active_mut()
            .filter_map(|(handle, projectile)| {
                (!projectile.advance(delta_ms, speed)).then_some(handle)
            })
            .collect();

        for handle in expired {
            self.world.projectiles.release(handle);
        }
    }

    fn take_pickup(&mut self, id: PickupId) {
        if !self.world.remotes.deactivate_pickup(id) {
            return;
        }
        if let Some(local) = self.world.local.as_mut() {
            local.weapon = Weapon::pistol();
        }
        log::debug!("picked up pistol {}", id);
        self.outbox.push(OutboundMessage::PickupTaken { id });
        self.events.push(SessionEvent::PickupRemoved {
            id,
            taken_locally: true,
        });
    }

    fn apply_outcome(&mut self, outcome: HitOutcome) {
        let (victim, damage, reason) = match outcome {
            HitOutcome::LocalHit { damage } => {
                (EntityRef::LocalPlayer, damage, GameOverReason::LocalDefeated)
            }
            HitOutcome::OpponentHit { player_id, damage } => (
                EntityRef::RemotePlayer(player_id),
                damage,
                GameOverReason::OpponentDefeated,
            ),
            _ => return,
        };

        log::debug!("{:?} hit, {} health left", victim, damage.remaining);
        self.events.push(SessionEvent::HitLanded { victim, damage });

        if damage.defeated {
            self.outbox.push(OutboundMessage::GameOver);
            self.end_round(reason);
        }
    }

    pub(super) fn end_round(&mut self, reason: GameOverReason) {
        if self.state == SessionState::GameOver {
            return;
        }
        log::info!("game over: {:?}", reason);
        self.state = SessionState::GameOver;
        self.events.push(SessionEvent::GameOver { reason });
    }

    /// Next unused pickup id, skipping any the registry already holds.
    pub(super) fn reserve_pickup_id(&mut self) -> Option<PickupId> {
        loop {
            let id = self.next_pickup_id?;
            self.next_pickup_id = id.checked_add(1);
            if self.world.remotes.pickup(id).is_none() {
                return Some(id);
            }
        }
    }

    pub(super) fn observe_pickup_id(&mut self, id: PickupId) {
        if self.next_pickup_id.is_some_and(|next| id >= next) {
            self.next_pickup_id = id.checked_add(1);
        }
    }

    fn drop_message(&mut self, event: &str, err: &CodecError) {
        log::warn!("dropping {}: {}", event, err);
        self.events.push(SessionEvent::MessageDropped {
            event: event.to_string(),
            reason: err.to_string(),
        });
    }
}

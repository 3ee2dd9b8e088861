use glam::Vec2;
use skirmish::{
    InputFlags, LoopbackRoom, LoopbackTransport, Session, SessionEvent, SessionState, TickInput,
    Transport, TuningConfig,
};

use crate::arena::{self, GROUND_Y};

const WALK_SPEED: f32 = 0.25;
const STANDOFF: f32 = 400.0;

fn approach(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let delta = to - from;
    let distance = delta.length();
    if distance <= max_step {
        to
    } else {
        from + delta / distance * max_step
    }
}

/// Scripted player: walks to the nearest pistol, returns to the ground and
/// shoots at the opponent on a fixed cadence.
pub struct Bot {
    name: String,
    session: Session,
    transport: LoopbackTransport,
    position: Option<Vec2>,
    fire_interval: u32,
    ticks_since_shot: u32,
}

impl Bot {
    pub fn join(room: &LoopbackRoom, name: &str, config: TuningConfig, fire_interval: u32) -> Self {
        let transport = room.join();
        let mut session = Session::new(config);
        session.connect(transport.local_id());
        Self {
            name: name.to_string(),
            session,
            transport,
            position: None,
            fire_interval: fire_interval.max(2),
            ticks_since_shot: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_over(&self) -> bool {
        self.session.state() == SessionState::GameOver
    }

    pub fn sync(&mut self) {
        let sent = self.session.flush(&mut self.transport);
        if sent > 0 {
            log::debug!("{}: sent {} messages", self.name, sent);
        }
        let frames = self.transport.poll();
        self.session.handle_frames(frames);
    }

    pub fn step(&mut self, delta_ms: f32) {
        let Some(local) = self.session.local_player() else {
            return;
        };
        let current = *self.position.get_or_insert(local.position);
        let armed = local.weapon.can_fire();

        let opponent = self.session.world().remotes().opponent().map(|p| p.position);
        let target = if armed {
            let x = match opponent {
                Some(opponent) if current.x < opponent.x => opponent.x - STANDOFF,
                Some(opponent) => opponent.x + STANDOFF,
                None => current.x,
            };
            Vec2::new(x, GROUND_Y)
        } else {
            self.session
                .world()
                .remotes()
                .active_pickups()
                .map(|p| p.position)
                .min_by(|a, b| a.distance_squared(current).total_cmp(&b.distance_squared(current)))
                .unwrap_or(Vec2::new(current.x, GROUND_Y))
        };

        let next = approach(current, target, WALK_SPEED * delta_ms);
        self.position = Some(next);

        let mut input = InputFlags::empty();
        let look_at = if armed { opponent.unwrap_or(next) } else { target };
        if look_at.x < next.x {
            input |= InputFlags::LEFT;
        } else if look_at.x > next.x {
            input |= InputFlags::RIGHT;
        }

        self.ticks_since_shot += 1;
        if armed && next.y == GROUND_Y && self.ticks_since_shot >= self.fire_interval {
            input |= InputFlags::FIRE;
            self.ticks_since_shot = 0;
        }

        let tick = TickInput {
            delta_ms,
            local_position: Some(next),
            input,
            overlaps: arena::detect_overlaps(self.session.world(), next),
        };
        self.session.tick(&tick);
    }

    pub fn report(&mut self) {
        for event in self.session.drain_events() {
            match event {
                SessionEvent::RoundStarted {
                    local_id,
                    remote_count,
                } => log::info!(
                    "{}: round started as {} facing {} opponent(s)",
                    self.name,
                    local_id,
                    remote_count
                ),
                SessionEvent::RoleAssigned(role) => log::info!("{}: role {:?}", self.name, role),
                SessionEvent::PickupRemoved { id, taken_locally } if taken_locally => {
                    log::info!("{}: picked up pistol {}", self.name, id)
                }
                SessionEvent::HitLanded { victim, damage } => log::info!(
                    "{}: {:?} hit, {} health left",
                    self.name,
                    victim,
                    damage.remaining
                ),
                SessionEvent::GameOver { reason } => {
                    log::info!("{}: game over ({:?})", self.name, reason)
                }
                SessionEvent::MessageDropped { event, reason } => {
                    log::warn!("{}: dropped {}: {}", self.name, event, reason)
                }
                other => log::debug!("{}: {:?}", self.name, other),
            }
        }
    }
}

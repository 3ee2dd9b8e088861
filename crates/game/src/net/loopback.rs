//! In-process room that plays the part of the relay server.
//!
//! Every client that joins gets a [`LoopbackTransport`]. Frames sent through
//! it are rewritten into the events the other member would receive from the
//! real relay, and queued in that member's inbox until polled. Used by the
//! integration tests and the demo binary to run two sessions side by side.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use glam::Vec2;
use serde_json::Value;

use crate::entity::PlayerId;

use super::protocol::{Frame, MessageKind, PlayerInfo};
use super::transport::Transport;

const SPAWN_POINTS: [Vec2; 2] = [Vec2::new(100.0, 450.0), Vec2::new(900.0, 450.0)];
const TEAMS: [&str; 2] = ["blue", "red"];

#[derive(Debug)]
struct Member {
    id: PlayerId,
    info: PlayerInfo,
    inbox: VecDeque<Frame>,
}

#[derive(Debug)]
struct RoomState {
    name: String,
    members: Vec<Member>,
    next_client: u32,
    started: bool,
}

impl RoomState {
    fn push_to(&mut self, id: &str, frame: Frame) {
        if let Some(member) = self.members.iter_mut().find(|m| m.id == id) {
            member.inbox.push_back(frame);
        }
    }

    fn push_to_others(&mut self, sender: &str, frame: &Frame) {
        for member in self.members.iter_mut().filter(|m| m.id != sender) {
            member.inbox.push_back(frame.clone());
        }
    }

    fn push_to_all(&mut self, frame: &Frame) {
        for member in &mut self.members {
            member.inbox.push_back(frame.clone());
        }
    }

    fn roster(&self) -> Value {
        let players: HashMap<&str, &PlayerInfo> = self
            .members
            .iter()
            .map(|m| (m.id.as_str(), &m.info))
            .collect();
        serde_json::to_value(players).unwrap_or(Value::Null)
    }

    fn relay(&mut self, sender: &str, frame: Frame) {
        let Some(kind) = MessageKind::outbound_from_event(&frame.event) else {
            log::debug!("room {}: ignoring unknown event {}", self.name, frame.event);
            return;
        };

        match kind {
            MessageKind::PlayerMovement => {
                self.track_movement(sender, &frame.payload);
                let mut payload = frame.payload;
                if let Value::Object(fields) = &mut payload {
                    fields.insert("playerId".to_string(), Value::String(sender.to_string()));
                }
                let relayed = Frame::new(MessageKind::PlayerMoved, payload);
                self.push_to_others(sender, &relayed);
            }
            MessageKind::PickupCreated => {
                let relayed = Frame::new(MessageKind::PickupSpawned, frame.payload);
                self.push_to_others(sender, &relayed);
            }
            MessageKind::PickupTaken => {
                let relayed = Frame::new(MessageKind::PickupDestroyed, frame.payload);
                self.push_to_others(sender, &relayed);
            }
            MessageKind::BulletFired => {
                let relayed = Frame::new(MessageKind::BulletIncoming, frame.payload);
                self.push_to_others(sender, &relayed);
            }
            MessageKind::GameOver => {
                self.push_to_all(&Frame::empty(MessageKind::GameEnded));
            }
            MessageKind::GuestReady => {
                if self.started {
                    return;
                }
                self.started = true;
                if let Some(host) = self.members.first().map(|m| m.id.clone()) {
                    self.push_to(&host, Frame::empty(MessageKind::StartGame));
                }
            }
            _ => log::debug!("room {}: {} is not a client event", self.name, kind),
        }
    }

    fn track_movement(&mut self, sender: &str, payload: &Value) {
        let Some(member) = self.members.iter_mut().find(|m| m.id == sender) else {
            return;
        };
        if let Some(x) = payload.get("x").and_then(Value::as_f64) {
            member.info.x = x as f32;
        }
        if let Some(y) = payload.get("y").and_then(Value::as_f64) {
            member.info.y = y as f32;
        }
        if let Some(facing_left) = payload.get("facingLeft").and_then(Value::as_bool) {
            member.info.facing_left = facing_left;
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoopbackRoom {
    state: Rc<RefCell<RoomState>>,
}

impl LoopbackRoom {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(RoomState {
                name: name.into(),
                members: Vec::new(),
                next_client: 1,
                started: false,
            })),
        }
    }

    pub fn join(&self) -> LoopbackTransport {
        let mut state = self.state.borrow_mut();

        let id = format!("player-{}", state.next_client);
        state.next_client += 1;

        let slot = state.members.len() % SPAWN_POINTS.len();
        let spawn = SPAWN_POINTS[slot];
        let info = PlayerInfo {
            player_id: Some(id.clone()),
            x: spawn.x,
            y: spawn.y,
            facing_left: slot == 1,
            team: Some(TEAMS[slot].to_string()),
        };

        state.members.push(Member {
            id: id.clone(),
            info: info.clone(),
            inbox: VecDeque::new(),
        });

        let role = if state.members.len() == 1 {
            MessageKind::HostAssigned
        } else {
            MessageKind::GuestAssigned
        };
        state.push_to(&id, Frame::empty(role));

        let roster = Frame::new(MessageKind::Roster, state.roster());
        state.push_to(&id, roster);

        let joined = Frame::new(
            MessageKind::PlayerJoined,
            serde_json::to_value(&info).unwrap_or(Value::Null),
        );
        state.push_to_others(&id, &joined);

        log::info!("room {}: {} joined", state.name, id);

        LoopbackTransport {
            id,
            state: Rc::clone(&self.state),
        }
    }

    pub fn member_count(&self) -> usize {
        self.state.borrow().members.len()
    }

    pub fn name(&self) -> String {
        self.state.borrow().name.clone()
    }
}

#[derive(Debug)]
pub struct LoopbackTransport {
    id: PlayerId,
    state: Rc<RefCell<RoomState>>,
}

impl LoopbackTransport {
    pub fn leave(self) {
        let mut state = self.state.borrow_mut();
        state.members.retain(|m| m.id != self.id);
        let left = Frame::new(MessageKind::PlayerLeft, Value::String(self.id.clone()));
        state.push_to_all(&left);
        log::info!("room {}: {} left", state.name, self.id);
    }
}

impl Transport for LoopbackTransport {
    fn local_id(&self) -> &str {
        &self.id
    }

    fn send(&mut self, frame: Frame) {
        self.state.borrow_mut().relay(&self.id, frame);
    }

    fn poll(&mut self) -> Vec<Frame> {
        let mut state = self.state.borrow_mut();
        match state.members.iter_mut().find(|m| m.id == self.id) {
            Some(member) => member.inbox.drain(..).collect(),
            None => Vec::new(),
        }
    }
}

use std::collections::HashMap;
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::{PickupId, PlayerId};
use crate::player::{Movement, PlayerSpawn, Team, Weapon, WeaponKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Inbound,
    Outbound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Roster,
    PlayerJoined,
    PlayerLeft,
    PlayerMoved,
    PickupSpawned,
    PickupDestroyed,
    BulletIncoming,
    GameEnded,
    HostAssigned,
    GuestAssigned,
    StartGame,

    PlayerMovement,
    PickupCreated,
    PickupTaken,
    BulletFired,
    GameOver,
    GuestReady,
}

impl MessageKind {
    pub const INBOUND: [MessageKind; 11] = [
        Self::Roster,
        Self::PlayerJoined,
        Self::PlayerLeft,
        Self::PlayerMoved,
        Self::PickupSpawned,
        Self::PickupDestroyed,
        Self::BulletIncoming,
        Self::GameEnded,
        Self::HostAssigned,
        Self::GuestAssigned,
        Self::StartGame,
    ];

    pub const OUTBOUND: [MessageKind; 6] = [
        Self::PlayerMovement,
        Self::PickupCreated,
        Self::PickupTaken,
        Self::BulletFired,
        Self::GameOver,
        Self::GuestReady,
    ];

    pub fn event_name(self) -> &'static str {
        match self {
            Self::Roster => "currentPlayers",
            Self::PlayerJoined => "newPlayer",
            Self::PlayerLeft => "disconnect",
            Self::PlayerMoved => "playerMoved",
            Self::PickupSpawned => "pistolLocation",
            Self::PickupDestroyed => "pistolDestroy",
            Self::BulletIncoming => "incomingBullet",
            Self::GameEnded => "gameHasEnded",
            Self::HostAssigned => "host",
            Self::GuestAssigned => "player2",
            Self::StartGame => "startGame",

            Self::PlayerMovement => "playerMovement",
            Self::PickupCreated => "pistolCreated",
            Self::PickupTaken => "pistolPickedUp",
            Self::BulletFired => "bulletFired",
            Self::GameOver => "gameOver",
            Self::GuestReady => "player2-ready",
        }
    }

    pub fn inbound_from_event(event: &str) -> Option<Self> {
        Self::INBOUND
            .into_iter()
            .find(|kind| kind.event_name() == event)
    }

    pub fn outbound_from_event(event: &str) -> Option<Self> {
        Self::OUTBOUND
            .into_iter()
            .find(|kind| kind.event_name() == event)
    }

    pub fn direction(self) -> Direction {
        if Self::OUTBOUND.contains(&self) {
            Direction::Outbound
        } else {
            Direction::Inbound
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}

/// One event on the room channel: a name plus its JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub event: String,
    #[serde(default)]
    pub payload: Value,
}

impl Frame {
    pub fn new(kind: MessageKind, payload: Value) -> Self {
        Self {
            event: kind.event_name().to_string(),
            payload,
        }
    }

    pub fn empty(kind: MessageKind) -> Self {
        Self::new(kind, Value::Object(Default::default()))
    }
}

/// Payload checks that serde cannot express.
pub trait Validate {
    fn validate(&self) -> Result<(), &'static str>;
}

fn check_position(x: f32, y: f32) -> Result<(), &'static str> {
    if x.is_finite() && y.is_finite() {
        Ok(())
    } else {
        Err("non-finite coordinate")
    }
}

fn check_id(id: &str) -> Result<(), &'static str> {
    if id.trim().is_empty() {
        Err("empty player id")
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    #[serde(default)]
    pub player_id: Option<String>,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub facing_left: bool,
    #[serde(default)]
    pub team: Option<String>,
}

impl PlayerInfo {
    pub fn into_spawn(self, fallback_id: &str) -> PlayerSpawn {
        PlayerSpawn {
            player_id: self.player_id.unwrap_or_else(|| fallback_id.to_string()),
            position: Vec2::new(self.x, self.y),
            facing_left: self.facing_left,
            team: Team::from_wire(self.team.as_deref().unwrap_or_default()),
        }
    }
}

impl Validate for PlayerInfo {
    fn validate(&self) -> Result<(), &'static str> {
        check_position(self.x, self.y)?;
        match &self.player_id {
            Some(id) => check_id(id),
            None => Ok(()),
        }
    }
}

/// A "player joined" payload; unlike roster entries it must name the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoinedInfo(pub PlayerInfo);

impl Validate for JoinedInfo {
    fn validate(&self) -> Result<(), &'static str> {
        if self.0.player_id.is_none() {
            return Err("missing playerId");
        }
        self.0.validate()
    }
}

impl From<JoinedInfo> for PlayerSpawn {
    fn from(info: JoinedInfo) -> Self {
        info.0.into_spawn("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RosterInfo(pub HashMap<String, PlayerInfo>);

impl RosterInfo {
    /// Entries ordered by player id so every client builds the same roster.
    pub fn into_spawns(self) -> Vec<PlayerSpawn> {
        let mut spawns: Vec<PlayerSpawn> = self
            .0
            .into_iter()
            .map(|(key, info)| info.into_spawn(&key))
            .collect();
        spawns.sort_by(|a, b| a.player_id.cmp(&b.player_id));
        spawns
    }
}

impl Validate for RosterInfo {
    fn validate(&self) -> Result<(), &'static str> {
        for (key, info) in &self.0 {
            check_id(key)?;
            info.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaponInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub holding: bool,
}

impl From<&WeaponInfo> for Weapon {
    fn from(info: &WeaponInfo) -> Self {
        Self {
            kind: WeaponKind::from_wire(info.name.as_deref()),
            holding: info.holding,
        }
    }
}

impl From<Weapon> for WeaponInfo {
    fn from(weapon: Weapon) -> Self {
        Self {
            name: Some(weapon.kind.as_str().to_string()),
            holding: weapon.holding,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementInfo {
    pub x: f32,
    pub y: f32,
    pub facing_left: bool,
    pub current_weapon: WeaponInfo,
    pub run: bool,
}

impl From<&Movement> for MovementInfo {
    fn from(movement: &Movement) -> Self {
        Self {
            x: movement.position.x,
            y: movement.position.y,
            facing_left: movement.facing_left,
            current_weapon: WeaponInfo::from(movement.weapon),
            run: movement.run,
        }
    }
}

impl From<&MovementInfo> for Movement {
    fn from(info: &MovementInfo) -> Self {
        Self {
            position: Vec2::new(info.x, info.y),
            facing_left: info.facing_left,
            weapon: Weapon::from(&info.current_weapon),
            run: info.run,
        }
    }
}

/// Inbound "player moved": the relay tags the sender's movement with its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMovedInfo {
    pub player_id: String,
    #[serde(flatten)]
    pub movement: MovementInfo,
}

impl Validate for PlayerMovedInfo {
    fn validate(&self) -> Result<(), &'static str> {
        check_id(&self.player_id)?;
        check_position(self.movement.x, self.movement.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerRef {
    Bare(String),
    #[serde(rename_all = "camelCase")]
    Object { player_id: String },
}

impl PlayerRef {
    pub fn into_id(self) -> PlayerId {
        match self {
            Self::Bare(id) | Self::Object { player_id: id } => id,
        }
    }
}

impl Validate for PlayerRef {
    fn validate(&self) -> Result<(), &'static str> {
        match self {
            Self::Bare(id) | Self::Object { player_id: id } => check_id(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupInfo {
    pub x: f32,
    pub y: f32,
    pub id: PickupId,
}

impl PickupInfo {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl Validate for PickupInfo {
    fn validate(&self) -> Result<(), &'static str> {
        check_position(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PickupRef {
    Bare(PickupId),
    Object { id: PickupId },
}

impl PickupRef {
    pub fn id(&self) -> PickupId {
        match self {
            Self::Bare(id) | Self::Object { id } => *id,
        }
    }
}

impl Validate for PickupRef {
    fn validate(&self) -> Result<(), &'static str> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletInfo {
    pub x: f32,
    pub y: f32,
    pub facing_left: bool,
    pub enemy_bullet: bool,
}

impl BulletInfo {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl Validate for BulletInfo {
    fn validate(&self) -> Result<(), &'static str> {
        check_position(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutboundMessage {
    PlayerMovement(MovementInfo),
    PickupCreated(PickupInfo),
    PickupTaken { id: PickupId },
    BulletFired(BulletInfo),
    GameOver,
    GuestReady,
}

impl OutboundMessage {
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::PlayerMovement(_) => MessageKind::PlayerMovement,
            Self::PickupCreated(_) => MessageKind::PickupCreated,
            Self::PickupTaken { .. } => MessageKind::PickupTaken,
            Self::BulletFired(_) => MessageKind::BulletFired,
            Self::GameOver => MessageKind::GameOver,
            Self::GuestReady => MessageKind::GuestReady,
        }
    }
}

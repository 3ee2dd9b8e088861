use crate::entity::{EntityRef, PickupId, PlayerId};
use crate::player::Damage;

use super::state::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    LocalDefeated,
    OpponentDefeated,
    /// The room announced the end before this client saw a defeat.
    RemoteEnded,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Connected {
        local_id: PlayerId,
    },
    RoleAssigned(Role),
    RoundStarted {
        local_id: PlayerId,
        remote_count: usize,
    },
    PlayerJoined {
        player_id: PlayerId,
    },
    PlayerLeft {
        player_id: PlayerId,
    },
    PickupSpawned {
        id: PickupId,
    },
    PickupRemoved {
        id: PickupId,
        taken_locally: bool,
    },
    HitLanded {
        victim: EntityRef,
        damage: Damage,
    },
    GameOver {
        reason: GameOverReason,
    },
    MessageDropped {
        event: String,
        reason: String,
    },
}

use bitflags::bitflags;
use glam::Vec2;

use crate::entity::Overlap;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InputFlags: u8 {
        const LEFT  = 0b0001;
        const RIGHT = 0b0010;
        const JUMP  = 0b0100;
        const FIRE  = 0b1000;
    }
}

impl Default for InputFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl InputFlags {
    /// Facing implied by the horizontal keys, if exactly one is held.
    pub fn facing_left(self) -> Option<bool> {
        match (self.contains(Self::LEFT), self.contains(Self::RIGHT)) {
            (true, false) => Some(true),
            (false, true) => Some(false),
            _ => None,
        }
    }
}

/// What the embedding runtime hands the session each frame: elapsed time,
/// the avatar position after its physics step, sampled keys and the overlap
/// pairs physics reported.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub delta_ms: f32,
    pub local_position: Option<Vec2>,
    pub input: InputFlags,
    pub overlaps: Vec<Overlap>,
}

impl TickInput {
    pub fn new(delta_ms: f32) -> Self {
        Self {
            delta_ms,
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.local_position = Some(position);
        self
    }

    pub fn with_input(mut self, input: InputFlags) -> Self {
        self.input = input;
        self
    }

    pub fn with_overlap(mut self, overlap: Overlap) -> Self {
        self.overlaps.push(overlap);
        self
    }
}

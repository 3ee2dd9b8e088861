use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingRoster,
    RoundActive,
    /// Terminal. A new round needs a new session.
    GameOver,
}

impl SessionState {
    pub fn is_connected(self) -> bool {
        !matches!(self, Self::Idle)
    }

    pub fn is_playing(self) -> bool {
        matches!(self, Self::RoundActive)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::AwaitingRoster => "awaiting roster",
            Self::RoundActive => "round active",
            Self::GameOver => "game over",
        };
        f.write_str(name)
    }
}

/// Which side of the room this client is, as told by the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Unassigned,
    Host,
    Guest,
}

mod codec;
pub mod loopback;
mod protocol;
mod transport;

pub use codec::{CodecError, decode_payload, encode, frame_from_text, frame_to_text, inbound_kind};
pub use loopback::{LoopbackRoom, LoopbackTransport};
pub use protocol::{
    BulletInfo, Direction, Frame, JoinedInfo, MessageKind, MovementInfo, OutboundMessage,
    PickupInfo, PickupRef, PlayerInfo, PlayerMovedInfo, PlayerRef, RosterInfo, Validate,
    WeaponInfo,
};
pub use transport::Transport;

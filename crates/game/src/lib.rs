pub mod combat;
pub mod config;
pub mod entity;
pub mod input;
pub mod net;
pub mod player;
pub mod pool;
pub mod registry;
pub mod session;
pub mod sync;
pub mod world;

pub use combat::{CollisionResolver, HitOutcome, Projectile, ProjectileSpawn};
pub use config::{HealthBarConfig, TuningConfig};
pub use entity::{BodyHandle, EntityKind, EntityRef, Overlap, PickupId, PlayerId};
pub use input::{InputFlags, TickInput};
pub use net::{
    CodecError, Frame, LoopbackRoom, LoopbackTransport, MessageKind, OutboundMessage, Transport,
};
pub use player::{
    Damage, Health, HealthBar, HealthBars, Movement, PlayerSpawn, PlayerState, Team, Weapon,
    WeaponKind,
};
pub use pool::{EntityPool, PoolHandle, Poolable};
pub use registry::{RemotePlayer, RemoteRegistry, WeaponPickup};
pub use session::{GameOverReason, Role, Session, SessionEvent, SessionState};
pub use sync::ChangeDetector;
pub use world::World;

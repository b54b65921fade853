//! Realtime transport: websocket sessions and the per-room actors they talk to.

pub mod hub;
pub mod protocol;
pub mod room_actor;
pub mod session;

pub use hub::RoomRegistry;
pub use room_actor::RoomActor;

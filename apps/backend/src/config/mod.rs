pub mod room;
pub mod server;

pub use room::RoomConfig;
pub use server::ServerConfig;

use std::sync::Arc;

use crate::config::RoomConfig;
use crate::ws::hub::RoomRegistry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Live rooms, keyed by room id
    pub rooms: Arc<RoomRegistry>,
}

impl AppState {
    /// Create a new AppState whose rooms are built from `room_config`
    pub fn new(room_config: RoomConfig) -> Self {
        Self {
            rooms: RoomRegistry::new(room_config),
        }
    }

    pub fn room_config(&self) -> &RoomConfig {
        self.rooms.config()
    }
}

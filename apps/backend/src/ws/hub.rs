use std::sync::Arc;

use actix::prelude::*;
use dashmap::DashMap;
use tracing::info;

use crate::config::RoomConfig;
use crate::services::room_flow::RoomFlow;
use crate::ws::room_actor::RoomActor;

/// Live rooms by id. A room is created by its first connection and drops
/// itself from here when it tears down.
pub struct RoomRegistry {
    rooms: DashMap<String, Addr<RoomActor>>,
    config: RoomConfig,
}

impl RoomRegistry {
    pub fn new(config: RoomConfig) -> Arc<Self> {
        Arc::new(Self {
            rooms: DashMap::new(),
            config,
        })
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    /// Address of the room, starting it if it does not exist or has stopped.
    ///
    /// Must be called from inside a running actix system.
    pub fn get_or_create(self: &Arc<Self>, room_id: &str) -> Addr<RoomActor> {
        let mut entry = self
            .rooms
            .entry(room_id.to_string())
            .or_insert_with(|| self.start_room(room_id));
        if !entry.connected() {
            *entry = self.start_room(room_id);
        }
        entry.clone()
    }

    fn start_room(self: &Arc<Self>, room_id: &str) -> Addr<RoomActor> {
        info!(room_id, "[ROOM REGISTRY] creating room");
        let flow = RoomFlow::new(room_id, self.config.clone());
        RoomActor::new(flow)
            .with_registry(Arc::downgrade(self))
            .start()
    }

    pub fn get(&self, room_id: &str) -> Option<Addr<RoomActor>> {
        self.rooms
            .get(room_id)
            .map(|entry| entry.value().clone())
            .filter(Addr::connected)
    }

    pub fn remove(&self, room_id: &str) {
        if self.rooms.remove(room_id).is_some() {
            info!(room_id, "[ROOM REGISTRY] room removed");
        }
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

use std::collections::HashMap;

use super::event::{Message, RoomId};

// Append-only, arrival order, no eviction.
#[derive(Debug, Default)]
pub struct History {
    rooms: HashMap<RoomId, Vec<Message>>,
}

impl History {
    pub fn append(&mut self, room: &RoomId, message: Message) {
        self.rooms.entry(room.clone()).or_default().push(message);
    }

    pub fn get(&self, room: &RoomId) -> &[Message] {
        self.rooms.get(room).map(Vec::as_slice).unwrap_or_default()
    }
}

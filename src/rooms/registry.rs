use std::collections::HashMap;

use super::event::{ConnId, RoomId};

// Entries are never removed; a disconnect leaves them for a resumed handle.
#[derive(Debug, Default)]
pub struct Registry {
    by_conn: HashMap<ConnId, String>,
    by_identity: HashMap<String, ConnId>,
    rooms: HashMap<String, RoomId>,
}

impl Registry {
    pub fn bind(&mut self, identity: &str, conn: ConnId) {
        if let Some(old) = self.by_identity.insert(identity.to_owned(), conn) {
            if old != conn && self.by_conn.get(&old).is_some_and(|bound| bound == identity) {
                self.by_conn.remove(&old);
            }
        }
        self.by_conn.insert(conn, identity.to_owned());
    }

    pub fn current_connection(&self, identity: &str) -> Option<ConnId> {
        self.by_identity.get(identity).copied()
    }

    pub fn identity_of(&self, conn: ConnId) -> Option<&str> {
        self.by_conn.get(&conn).map(String::as_str)
    }

    pub fn set_room(&mut self, identity: &str, room: RoomId) {
        self.rooms.insert(identity.to_owned(), room);
    }

    pub fn room_of(&self, identity: &str) -> Option<&RoomId> {
        self.rooms.get(identity)
    }
}

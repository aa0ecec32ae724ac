use std::collections::{BTreeSet, HashMap};

use super::event::{ConnId, RoomId};

/// Broadcast membership: which live connections hear a room.
#[derive(Debug, Default)]
pub struct Groups {
    members: HashMap<RoomId, BTreeSet<ConnId>>,
    joined: HashMap<ConnId, BTreeSet<RoomId>>,
}

impl Groups {
    pub fn join(&mut self, conn: ConnId, room: &RoomId) {
        self.members.entry(room.clone()).or_default().insert(conn);
        self.joined.entry(conn).or_default().insert(room.clone());
    }

    pub fn leave(&mut self, conn: ConnId, room: &RoomId) {
        if let Some(set) = self.members.get_mut(room) {
            set.remove(&conn);
            if set.is_empty() {
                self.members.remove(room);
            }
        }
        if let Some(set) = self.joined.get_mut(&conn) {
            set.remove(room);
            if set.is_empty() {
                self.joined.remove(&conn);
            }
        }
    }

    pub fn members(&self, room: &RoomId) -> impl Iterator<Item = ConnId> + '_ {
        self.members.get(room).into_iter().flatten().copied()
    }

    pub fn rooms_of(&self, conn: ConnId) -> Vec<RoomId> {
        self.joined.get(&conn).map(|set| set.iter().cloned().collect()).unwrap_or_default()
    }

    pub fn drop_connection(&mut self, conn: ConnId) -> Vec<RoomId> {
        let rooms = self.rooms_of(conn);
        for room in &rooms {
            self.leave(conn, room);
        }
        rooms
    }
}

use std::collections::HashMap;

use super::event::Status;

/// Last known status per identity. Never forgets, never notifies.
#[derive(Debug, Default)]
pub struct Presence {
    statuses: HashMap<String, Status>,
}

impl Presence {
    pub fn set_status(&mut self, identity: &str, status: Status) {
        self.statuses.insert(identity.to_owned(), status);
    }

    pub fn status(&self, identity: &str) -> Status {
        self.statuses.get(identity).copied().unwrap_or_default()
    }

    pub fn is_online(&self, identity: &str) -> bool {
        self.status(identity) == Status::Online
    }
}

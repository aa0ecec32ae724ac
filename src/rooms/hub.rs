use std::collections::HashMap;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

use super::{
    event::{ConnId, Outbound, ServerEvent},
    relay::{self, Relay},
};
use crate::ChatError;

pub type Outbox = mpsc::UnboundedReceiver<ServerEvent>;

// One lock: a handler and all of its sends finish before the next event.
#[derive(Debug, Default)]
pub struct Hub {
    state: Mutex<HubState>,
}

#[derive(Debug, Default)]
struct HubState {
    relay: Relay,
    outboxes: HashMap<ConnId, mpsc::UnboundedSender<ServerEvent>>,
}

impl HubState {
    fn deliver(&mut self, outbound: Vec<Outbound>) {
        for delivery in self.relay.route(outbound) {
            let Some(tx) = self.outboxes.get(&delivery.conn) else {
                continue;
            };
            if tx.send(delivery.event).is_err() {
                debug!(conn = %delivery.conn, "outbox closed");
            }
        }
    }
}

impl Hub {
    pub fn connect(&self, resume: Option<ConnId>) -> (ConnId, Outbox) {
        let mut state = self.state.lock();
        let conn = match resume {
            Some(conn) if !state.outboxes.contains_key(&conn) => conn,
            _ => ConnId::new(),
        };

        let (tx, rx) = mpsc::unbounded_channel();
        state.outboxes.insert(conn, tx);
        let out = state.relay.connect(conn);
        state.deliver(out);

        (conn, rx)
    }

    pub fn disconnect(&self, conn: ConnId) {
        let mut state = self.state.lock();
        if state.outboxes.remove(&conn).is_none() {
            return;
        }
        let out = state.relay.disconnect(conn);
        state.deliver(out);
    }

    pub fn dispatch(&self, conn: ConnId, frame: &str) {
        let mut state = self.state.lock();
        let out = state.relay.handle_frame(conn, frame);
        state.deliver(out);
    }

    pub fn reject(&self, conn: ConnId, err: ChatError) {
        let mut state = self.state.lock();
        state.deliver(relay::reject(conn, err));
    }

    pub fn inspect<R>(&self, f: impl FnOnce(&Relay) -> R) -> R {
        f(&self.state.lock().relay)
    }

    pub fn connection_count(&self) -> usize {
        self.state.lock().outboxes.len()
    }
}

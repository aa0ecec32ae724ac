use tracing::warn;

use super::{
    event::{ClientEvent, ConnId, Outbound, ServerEvent, Target},
    groups::Groups,
    history::History,
    join, lifecycle, msg,
    presence::Presence,
    registry::Registry,
    status,
};
use crate::ChatError;

#[derive(Debug, Default)]
pub struct Relay {
    pub registry: Registry,
    pub presence: Presence,
    pub history: History,
    pub groups: Groups,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub conn: ConnId,
    pub event: ServerEvent,
}

impl Relay {
    pub fn connect(&mut self, conn: ConnId) -> Vec<Outbound> {
        lifecycle::on_connect(self, conn)
    }

    pub fn disconnect(&mut self, conn: ConnId) -> Vec<Outbound> {
        lifecycle::on_disconnect(self, conn)
    }

    pub fn handle(&mut self, conn: ConnId, event: ClientEvent) -> Vec<Outbound> {
        let result = match event {
            ClientEvent::JoinPrivateChat(req) => join::join_private_chat(self, conn, req),
            ClientEvent::SendMessage(req) => msg::send_message(self, conn, req),
            ClientEvent::UserStatusChange(req) => Ok(status::user_status_change(self, conn, req)),
            ClientEvent::RequestUserStatus(req) => status::request_user_status(self, conn, req),
        };

        result.unwrap_or_else(|err| reject(conn, err))
    }

    pub fn handle_frame(&mut self, conn: ConnId, frame: &str) -> Vec<Outbound> {
        match serde_json::from_str::<ClientEvent>(frame) {
            Ok(event) => self.handle(conn, event),
            Err(err) => reject(conn, err.into()),
        }
    }

    pub fn route(&self, outbound: Vec<Outbound>) -> Vec<Delivery> {
        let mut deliveries = Vec::new();
        for Outbound { target, event } in outbound {
            match target {
                Target::Connection(conn) => deliveries.push(Delivery { conn, event }),
                Target::Room(room) => deliveries.extend(
                    self.groups.members(&room).map(|conn| Delivery { conn, event: event.clone() })
                ),
                Target::RoomExcept(room, except) => deliveries.extend(
                    self.groups.members(&room)
                        .filter(|conn| *conn != except)
                        .map(|conn| Delivery { conn, event: event.clone() })
                ),
            }
        }
        deliveries
    }
}

pub fn reject(conn: ConnId, err: ChatError) -> Vec<Outbound> {
    warn!(%conn, error = %err, "rejected event");
    vec![Outbound::to(conn, err.into())]
}

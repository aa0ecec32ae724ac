use tracing::info;

use super::{
    event::{ConnId, Outbound, ServerEvent, Status},
    relay::Relay,
};
use crate::now_millis;

pub fn on_connect(relay: &mut Relay, conn: ConnId) -> Vec<Outbound> {
    let mut out = vec![Outbound::to(conn, ServerEvent::ConnectionSuccess {
        connection_id: conn,
        status: "connected".to_owned(),
        timestamp: now_millis(),
    })];

    // Only a resumed handle can already be bound.
    if let Some(identity) = relay.registry.identity_of(conn).map(str::to_owned) {
        relay.presence.set_status(&identity, Status::Online);
        info!(%conn, identity = %identity, "back online");

        if let Some(room) = relay.registry.room_of(&identity) {
            out.push(Outbound::room(room.clone(), ServerEvent::status_update(&identity, Status::Online)));
        }
    }

    out
}

pub fn on_disconnect(relay: &mut Relay, conn: ConnId) -> Vec<Outbound> {
    relay.groups.drop_connection(conn);

    let Some(identity) = relay.registry.identity_of(conn).map(str::to_owned) else {
        info!(%conn, "anonymous connection closed");
        return Vec::new();
    };

    relay.presence.set_status(&identity, Status::Offline);
    info!(%conn, identity = %identity, "went offline");

    relay.registry.room_of(&identity)
        .map(|room| Outbound::room(room.clone(), ServerEvent::status_update(&identity, Status::Offline)))
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::{
        event::{JoinRequest, Target},
        join::join_private_chat,
        room::resolve_room,
    };

    fn join(relay: &mut Relay, conn: ConnId, sender: &str, recipient: &str) {
        join_private_chat(relay, conn, JoinRequest {
            sender: Some(sender.into()),
            recipient: Some(recipient.into()),
        }).unwrap();
    }

    #[test]
    fn fresh_connect_only_greets() {
        let mut relay = Relay::default();
        let conn = ConnId::new();
        let out = on_connect(&mut relay, conn);

        assert_eq!(out.len(), 1);
        let ServerEvent::ConnectionSuccess { connection_id, status, .. } = &out[0].event else {
            panic!("expected greeting")
        };
        assert_eq!(*connection_id, conn);
        assert_eq!(status, "connected");
    }

    #[test]
    fn disconnect_keeps_bindings() {
        let mut relay = Relay::default();
        let conn = ConnId::new();
        join(&mut relay, conn, "alice", "bob");

        let out = on_disconnect(&mut relay, conn);

        assert_eq!(relay.presence.status("alice"), Status::Offline);
        assert_eq!(relay.registry.identity_of(conn), Some("alice"));
        assert_eq!(relay.registry.room_of("alice"), Some(&resolve_room("alice", "bob")));
        assert!(relay.groups.rooms_of(conn).is_empty());
        assert_eq!(out, [Outbound::room(
            resolve_room("alice", "bob"),
            ServerEvent::status_update("alice", Status::Offline),
        )]);
    }

    #[test]
    fn anonymous_disconnect_is_silent() {
        let mut relay = Relay::default();
        assert!(on_disconnect(&mut relay, ConnId::new()).is_empty());
    }

    #[test]
    fn superseded_connection_does_not_take_identity_offline() {
        let mut relay = Relay::default();
        let old = ConnId::new();
        let new = ConnId::new();
        join(&mut relay, old, "alice", "bob");
        join(&mut relay, new, "alice", "bob");

        assert!(on_disconnect(&mut relay, old).is_empty());
        assert!(relay.presence.is_online("alice"));
    }

    #[test]
    fn resumed_handle_comes_back_online() {
        let mut relay = Relay::default();
        let conn = ConnId::new();
        join(&mut relay, conn, "alice", "bob");
        on_disconnect(&mut relay, conn);

        let out = on_connect(&mut relay, conn);

        assert!(relay.presence.is_online("alice"));
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].target, Target::Room(resolve_room("alice", "bob")));
        assert_eq!(out[1].event, ServerEvent::status_update("alice", Status::Online));
    }
}

use tracing::debug;
use uuid::Uuid;

use super::{
    event::{non_empty, ConnId, Message, Outbound, SendRequest, ServerEvent, Timestamp},
    relay::Relay,
    room::resolve_room,
};
use crate::{ChatError, ChatResult};

pub fn send_message(relay: &mut Relay, conn: ConnId, req: SendRequest) -> ChatResult<Vec<Outbound>> {
    let SendRequest { username, message, recipient, timestamp } = req;
    let (Some(sender), Some(body), Some(recipient)) =
        (non_empty(username), non_empty(message), non_empty(recipient))
    else {
        return Err(ChatError::validation("Missing required fields"));
    };

    let room = resolve_room(&sender, &recipient);
    let message = Message {
        sender,
        body,
        recipient,
        timestamp: Timestamp::from_client(timestamp),
    };

    relay.history.append(&room, message.clone());
    debug!(%conn, %room, sender = %message.sender, "message stored");

    Ok(vec![
        Outbound::room(room, ServerEvent::ReceiveMessage(message)),
        Outbound::to(conn, ServerEvent::MessageSent {
            status: "ok".to_owned(),
            id: Uuid::now_v7().to_string(),
        }),
    ])
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{now_millis, rooms::event::Target};

    fn send(sender: &str, recipient: &str, body: &str, timestamp: Option<i64>) -> SendRequest {
        SendRequest {
            username: Some(sender.into()),
            message: Some(body.into()),
            recipient: Some(recipient.into()),
            timestamp: timestamp.map(Into::into),
        }
    }

    #[test]
    fn empty_body_is_rejected_without_storing() {
        let mut relay = Relay::default();
        let err = send_message(&mut relay, ConnId::new(), send("alice", "bob", "", None)).unwrap_err();
        assert_eq!(err, ChatError::validation("Missing required fields"));
        assert!(relay.history.get(&resolve_room("alice", "bob")).is_empty());
    }

    #[test]
    fn stores_even_when_nobody_listens() {
        let mut relay = Relay::default();
        send_message(&mut relay, ConnId::new(), send("alice", "bob", "hi", Some(42))).unwrap();

        let history = relay.history.get(&resolve_room("bob", "alice"));
        assert_eq!(history, [Message {
            sender: "alice".into(),
            body: "hi".into(),
            recipient: "bob".into(),
            timestamp: 42i64.into(),
        }]);
    }

    #[test]
    fn fills_in_server_time() {
        let mut relay = Relay::default();
        let before = now_millis();
        send_message(&mut relay, ConnId::new(), send("alice", "bob", "hi", None)).unwrap();
        let stored = &relay.history.get(&resolve_room("alice", "bob"))[0];
        assert!(stored.timestamp.as_millis().unwrap() >= before as f64);
    }

    #[test]
    fn keeps_fractional_and_iso_timestamps() {
        let mut relay = Relay::default();
        let conn = ConnId::new();
        for raw in [json!(1712345678901.5), json!("2024-04-01T10:00:00.000Z")] {
            let mut req = send("alice", "bob", "hi", None);
            req.timestamp = Some(raw.clone());
            let out = send_message(&mut relay, conn, req).unwrap();
            assert_eq!(out.len(), 2);

            let stored = relay.history.get(&resolve_room("alice", "bob")).last().unwrap();
            assert_eq!(serde_json::to_value(&stored.timestamp).unwrap(), raw);
        }
        assert_eq!(relay.history.get(&resolve_room("alice", "bob")).len(), 2);
    }

    #[test]
    fn broadcasts_then_acks_sender() {
        let mut relay = Relay::default();
        let conn = ConnId::new();
        let out = send_message(&mut relay, conn, send("alice", "bob", "hi", Some(1))).unwrap();

        assert_eq!(out[0].target, Target::Room(resolve_room("alice", "bob")));
        assert!(matches!(out[0].event, ServerEvent::ReceiveMessage(_)));
        assert_eq!(out[1].target, Target::Connection(conn));
        let ServerEvent::MessageSent { status, id } = &out[1].event else { panic!("expected ack") };
        assert_eq!(status, "ok");
        assert!(!id.is_empty());
    }

    #[test]
    fn acks_get_distinct_ids() {
        let mut relay = Relay::default();
        let conn = ConnId::new();
        let a = send_message(&mut relay, conn, send("alice", "bob", "hi", None)).unwrap();
        let b = send_message(&mut relay, conn, send("alice", "bob", "hi", None)).unwrap();
        assert_ne!(a[1].event, b[1].event);
    }
}

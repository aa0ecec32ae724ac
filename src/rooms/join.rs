use tracing::info;

use super::{
    event::{non_empty, ConnId, JoinRequest, Outbound, ServerEvent, Status},
    relay::Relay,
    room::resolve_room,
};
use crate::{ChatError, ChatResult};

pub fn join_private_chat(relay: &mut Relay, conn: ConnId, req: JoinRequest) -> ChatResult<Vec<Outbound>> {
    let (Some(sender), Some(recipient)) = (non_empty(req.sender), non_empty(req.recipient)) else {
        return Err(ChatError::validation("Missing sender or recipient email"));
    };

    relay.registry.bind(&sender, conn);
    relay.presence.set_status(&sender, Status::Online);

    let room = resolve_room(&sender, &recipient);

    if let Some(previous) = relay.registry.room_of(&sender).cloned() {
        if previous != room {
            relay.groups.leave(conn, &previous);
            info!(%conn, sender = %sender, %previous, "left room");
        }
    }

    relay.groups.join(conn, &room);
    relay.registry.set_room(&sender, room.clone());
    info!(%conn, sender = %sender, recipient = %recipient, %room, "joined room");

    let recipient_online = relay.presence.is_online(&recipient);

    // history rides on room_joined, never on the room broadcast
    let mut out = vec![
        Outbound::to(conn, ServerEvent::RoomJoined {
            room: room.clone(),
            sender: sender.clone(),
            recipient: recipient.clone(),
            recipient_online,
            message_history: relay.history.get(&room).to_vec(),
        }),
        Outbound::room(room.clone(), ServerEvent::status_update(&sender, Status::Online)),
    ];

    if sender != recipient {
        out.push(Outbound::room_except(room.clone(), conn, ServerEvent::UserJoined {
            email: sender,
            status: Status::Online,
            room,
        }));
    }

    Ok(out)
}

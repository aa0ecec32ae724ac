use tracing::debug;

use super::{
    event::{non_empty, ConnId, Outbound, ServerEvent, StatusChange, StatusQuery},
    relay::Relay,
};
use crate::{ChatError, ChatResult};

pub fn request_user_status(relay: &Relay, conn: ConnId, req: StatusQuery) -> ChatResult<Vec<Outbound>> {
    let Some(target) = non_empty(req.target) else {
        return Err(ChatError::validation("Missing target email"));
    };

    let status = relay.presence.status(&target);
    debug!(%conn, target = %target, ?status, "status request");

    Ok(vec![Outbound::to(conn, ServerEvent::status_update(&target, status))])
}

pub fn user_status_change(relay: &mut Relay, conn: ConnId, req: StatusChange) -> Vec<Outbound> {
    let Some(identity) = relay.registry.identity_of(conn).map(str::to_owned) else {
        debug!(%conn, "status change from unbound connection");
        return Vec::new();
    };

    let status = req.status.unwrap_or_default();
    relay.presence.set_status(&identity, status);
    debug!(%conn, identity = %identity, ?status, "status changed");

    relay.groups.rooms_of(conn)
        .into_iter()
        .map(|room| Outbound::room(room, ServerEvent::status_update(&identity, status)))
        .collect()
}

pub mod event;
pub mod groups;
pub mod history;
pub mod hub;
pub mod join;
pub mod lifecycle;
pub mod msg;
pub mod presence;
pub mod registry;
pub mod relay;
pub mod room;
pub mod status;
mod ws;

use axum::{routing::get, Router};

use crate::AppState;

pub use event::{ClientEvent, ConnId, Message, RoomId, ServerEvent, Status};
pub use relay::Relay;
pub use room::resolve_room;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::relay_ws))
}

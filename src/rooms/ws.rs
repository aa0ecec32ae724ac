use std::sync::Arc;

use axum::{
    debug_handler,
    extract::{ws::{Message, WebSocket}, Query, State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{ChatError, Hub};

use super::event::ConnId;

#[derive(Debug, Default, Deserialize)]
pub struct WsQuery {
    #[serde(rename = "connectionId")]
    pub connection_id: Option<Uuid>,
}

#[debug_handler(state = crate::AppState)]
pub async fn relay_ws(
    Query(WsQuery { connection_id }): Query<WsQuery>,
    State(hub): State<Arc<Hub>>,

    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |stream| serve_socket(hub, stream, connection_id.map(ConnId)))
}

async fn serve_socket(hub: Arc<Hub>, stream: WebSocket, resume: Option<ConnId>) {
    let (conn, mut outbox) = hub.connect(resume);
    let resumed = resume == Some(conn);
    info!(%conn, resumed, connections = hub.connection_count(), "socket open");

    let (mut sender, mut receiver) = stream.split();

    let mut send_task = tokio::spawn(async move {
        while let Some(event) = outbox.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(err) => {
                    warn!(%conn, error = %err, "failed to encode event");
                    continue;
                }
            };
            if sender.send(text.into()).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = {
        let hub = hub.clone();
        tokio::spawn(async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => hub.dispatch(conn, text.as_str()),
                    Message::Binary(data) => match std::str::from_utf8(&data) {
                        Ok(text) => hub.dispatch(conn, text),
                        Err(_) => hub.reject(conn, ChatError::Malformed("frame is not utf-8".to_owned())),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        })
    };

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    };

    hub.disconnect(conn);
    info!(%conn, connections = hub.connection_count(), "socket closed");
}

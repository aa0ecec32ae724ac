//! Wire shapes for the relay socket.
//!
//! Every frame is `{"event": "<name>", "data": {...}}` in both directions.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{now_millis, ChatError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnId(pub Uuid);

impl ConnId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ConnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub(crate) String);

impl RoomId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Online,
    #[default]
    Offline,
}

/// Epoch millis (possibly fractional) or an ISO-8601 string, kept as the client sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Number(serde_json::Number),
    Text(String),
}

impl Timestamp {
    pub fn now() -> Self {
        Self::from(now_millis())
    }

    pub fn from_client(value: Option<Value>) -> Self {
        match value {
            Some(Value::Number(n)) => Self::Number(n),
            Some(Value::String(s)) if !s.is_empty() => Self::Text(s),
            _ => Self::now(),
        }
    }

    pub fn as_millis(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(_) => None,
        }
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Self::Number(millis.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "username")]
    pub sender: String,
    #[serde(rename = "message")]
    pub body: String,
    pub recipient: String,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JoinRequest {
    #[serde(default, rename = "senderEmail", alias = "senderIdentity")]
    pub sender: Option<String>,
    #[serde(default, rename = "recipientEmail", alias = "recipientIdentity")]
    pub recipient: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SendRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default)]
    pub timestamp: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusChange {
    #[serde(default)]
    pub status: Option<Status>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusQuery {
    #[serde(default, rename = "targetEmail", alias = "targetIdentity")]
    pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    JoinPrivateChat(JoinRequest),
    SendMessage(SendRequest),
    UserStatusChange(StatusChange),
    RequestUserStatus(StatusQuery),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    ConnectionSuccess {
        connection_id: ConnId,
        status: String,
        timestamp: i64,
    },
    RoomJoined {
        room: RoomId,
        sender: String,
        recipient: String,
        recipient_online: bool,
        message_history: Vec<Message>,
    },
    UserStatusUpdate {
        email: String,
        status: Status,
    },
    UserJoined {
        email: String,
        status: Status,
        room: RoomId,
    },
    ReceiveMessage(Message),
    MessageSent {
        status: String,
        id: String,
    },
    Error {
        message: String,
    },
}

impl ServerEvent {
    pub fn status_update(email: &str, status: Status) -> Self {
        Self::UserStatusUpdate { email: email.to_owned(), status }
    }
}

impl From<ChatError> for ServerEvent {
    fn from(err: ChatError) -> Self {
        Self::Error { message: err.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Connection(ConnId),
    Room(RoomId),
    RoomExcept(RoomId, ConnId),
}

/// One effect produced by a handler, routed by the hub once the handler returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub target: Target,
    pub event: ServerEvent,
}

impl Outbound {
    pub fn to(conn: ConnId, event: ServerEvent) -> Self {
        Self { target: Target::Connection(conn), event }
    }

    pub fn room(room: RoomId, event: ServerEvent) -> Self {
        Self { target: Target::Room(room), event }
    }

    pub fn room_except(room: RoomId, except: ConnId, event: ServerEvent) -> Self {
        Self { target: Target::RoomExcept(room, except), event }
    }
}

pub(crate) fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

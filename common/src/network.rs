use crate::{
    player::{PlayerRef, UserId},
    RoleKind,
};
use laminar::Packet;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

pub const PROTOCOL_VERSION: u32 = 0;
pub const COMMAND_STREAM: u8 = 0;
pub const EFFECT_STREAM: u8 = 1;

#[derive(Debug, Clone, Copy)]
pub enum DeliveryType {
    ReliableOrdered,
    ReliableUnordered,
    Unreliable,
}

pub fn make_packet(
    delivery_type: DeliveryType,
    data: Vec<u8>,
    addr: SocketAddr,
    stream_id: u8,
) -> Packet {
    match delivery_type {
        DeliveryType::ReliableOrdered => Packet::reliable_ordered(addr, data, Some(stream_id)),
        DeliveryType::ReliableUnordered => Packet::reliable_unordered(addr, data),
        DeliveryType::Unreliable => Packet::unreliable(addr, data),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GatewayToServer {
    Connect(ConnectPacket),
    Command(CommandPacket),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectPacket {
    pub version: u32,
    pub name: String,
}

impl ConnectPacket {
    pub fn new(name: &str) -> Self {
        Self { version: PROTOCOL_VERSION, name: name.to_string() }
    }
}

/// One chat command as relayed by the gateway: who issued it, where it was
/// issued, and what it was.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandPacket {
    pub actor: PlayerRef,
    pub origin: CommandOrigin,
    pub command: GameCommand,
}

/// Where a command was typed. Channel ids round-trip unchanged so replies
/// and message deletions can be routed without the coordinator tracking
/// any platform state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOrigin {
    Channel { channel_id: u64, message_id: u64 },
    Direct,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameCommand {
    /// Remaining words of the invocation; they get joined into the code.
    Create { args: Vec<String> },
    Join,
    Start,
    Dead,
    Leave,
    End,
    Round,
    Info,
    Code,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ServerToGateway {
    ConnectAck,
    Reply(ReplyPacket),
    Role(RolePacket),
    DeleteMessage(DeleteMessagePacket),
}

/// Text for the gateway to deliver. A `Direct` origin means a DM to
/// `recipient`, a `Channel` origin means the channel the command came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyPacket {
    pub origin: CommandOrigin,
    pub recipient: UserId,
    pub text: String,
}

/// Directive for one of the gateway's idempotent role operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePacket {
    pub user: UserId,
    pub role: RoleKind,
    pub action: RoleAction,
}

impl RolePacket {
    pub fn grant(user: UserId, role: RoleKind) -> Self {
        Self { user, role, action: RoleAction::Grant }
    }

    pub fn revoke(user: UserId, role: RoleKind) -> Self {
        Self { user, role, action: RoleAction::Revoke }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleAction {
    Grant,
    Revoke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteMessagePacket {
    pub channel_id: u64,
    pub message_id: u64,
}

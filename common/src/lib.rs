use serde::{Deserialize, Serialize};

pub mod network;
pub mod player;
pub mod session;

pub use laminar;

/// Platform-level tag reflecting a player's in-round status.
///
/// The coordinator only ever asks the gateway to grant or revoke these two
/// tags. The mapping to concrete platform role ids is gateway configuration
/// and never reaches this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleKind {
    Alive,
    Dead,
}

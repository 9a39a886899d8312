use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Platform user id. Opaque to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

/// A player as the chat platform sees them.
///
/// Identity is the id alone. The same user can show up with different
/// display names depending on where they message from, so `name` never
/// participates in equality or hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: UserId,
    pub name: String,
}

impl PlayerRef {
    pub fn new(id: u64, name: &str) -> Self {
        Self { id: UserId(id), name: name.to_string() }
    }
}

impl PartialEq for PlayerRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PlayerRef {}

impl Hash for PlayerRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// Core ID types for the matchmaking protocol.
//
// These are lightweight newtypes shared by `message.rs` and the session core.
// They are backend-scoped identifiers — the matchmaking backend assigns
// compact integer IDs to the players it tracks.

use serde::{Deserialize, Serialize};

/// Backend-assigned player ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

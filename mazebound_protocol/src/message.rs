// Protocol messages for client-backend matchmaking communication.
//
// Two enums define the full conversation:
// - `TransportRequest`: operations a client issues to the backend. All are
//   fire-and-forget — their outcomes arrive later as events.
// - `TransportEvent`: callbacks the backend delivers to a client, consumed
//   by the session core through a single exhaustive dispatch.
//
// `RoomOptions` is the one supporting struct, carried by `CreateRoom`. All
// types derive `Serialize`/`Deserialize` so a concrete transport can encode
// them however its wire format requires.

use serde::{Deserialize, Serialize};

use crate::types::PlayerId;

/// Creation parameters for a new room.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomOptions {
    /// Room capacity. The backend refuses joins past this count.
    pub max_players: u32,
}

/// Operations a client issues to the matchmaking backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TransportRequest {
    /// Establish a connection. Only clients reporting the same version
    /// string are matched together.
    Connect { game_version: String },
    /// Join any open room in this client's game-version partition.
    JoinRandomRoom,
    /// Create a fresh room and enter it.
    CreateRoom { options: RoomOptions },
    /// Open or close the client's current room to new joins.
    SetRoomOpen { open: bool },
}

/// Callbacks the matchmaking backend delivers to a client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TransportEvent {
    /// The connection handshake completed.
    ConnectedToServer,
    /// The connection was lost or refused.
    Disconnected { cause: String },
    /// No open room matched the random-join request.
    JoinRandomFailed { code: i32, message: String },
    /// The backend could not create the requested room.
    CreateRoomFailed { code: i32, message: String },
    /// This client entered a room (by join or by creation).
    JoinedRoom,
    /// Another player entered the room this client is in.
    PlayerEnteredRoom { player: PlayerId },
}

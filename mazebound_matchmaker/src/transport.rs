// Consumed matchmaking backend interface.
//
// The session core never talks to a concrete backend directly — it holds a
// `MatchmakingTransport` instance injected at construction. Operations are
// fire-and-forget: the transport queues them, and their outcomes arrive
// later as `TransportEvent`s from `poll_events`. This keeps the controller
// non-blocking and lets tests substitute a recording double or an in-memory
// backend for the real network.

use mazebound_protocol::{RoomOptions, TransportEvent};

/// A matchmaking backend as seen by one client.
pub trait MatchmakingTransport {
    /// Start the connection handshake. Only clients reporting the same
    /// version string are matched together.
    fn connect(&mut self, game_version: &str);

    /// Ask for any open room in this client's game-version partition.
    fn join_random_room(&mut self);

    /// Create a fresh room and enter it.
    fn create_room(&mut self, options: RoomOptions);

    /// Snapshot of the current room's occupancy. Zero when not in a room.
    fn current_room_player_count(&self) -> u32;

    /// Open or close the current room to new joins.
    fn set_room_open(&mut self, open: bool);

    /// Drain all pending backend events, in delivery order.
    fn poll_events(&mut self) -> Vec<TransportEvent>;
}

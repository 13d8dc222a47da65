// Room occupancy decisions.
//
// Pure functions over `(player_count, config)` — no transport access, no
// state. The controller calls these from its event handlers; tests exercise
// them in isolation.
//
// `is_full` uses strict equality: the backend refuses joins past capacity,
// so counts above `max_players_per_room` are an unreachable precondition,
// not a handled case.

use crate::config::SessionConfig;

/// What a room's occupancy means for match start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FillDecision {
    /// Below the start threshold — keep waiting for players.
    Wait,
    /// At or above the start threshold — the match can begin.
    Start,
}

/// True once enough players are present to start the match.
pub fn meets_minimum(player_count: u32, config: &SessionConfig) -> bool {
    player_count >= config.minimum_players_needed
}

/// True exactly when the room has reached capacity.
pub fn is_full(player_count: u32, config: &SessionConfig) -> bool {
    player_count == config.max_players_per_room
}

/// Decide whether a room at the given occupancy waits or starts.
pub fn evaluate(player_count: u32, config: &SessionConfig) -> FillDecision {
    if meets_minimum(player_count, config) {
        FillDecision::Start
    } else {
        FillDecision::Wait
    }
}

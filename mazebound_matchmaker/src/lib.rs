// mazebound_matchmaker — client-side matchmaking session core for Mazebound.
//
// This crate drives a client from "not connected" to "in a match": connect to
// the matchmaking backend, join an open room or create one when none exists,
// wait for the room to fill, and load the match level once enough players
// have gathered. It owns no networking and no UI — both sides are reached
// through narrow interfaces so the core stays engine-free and testable.
//
// Module overview:
// - `config.rs`:    `SessionConfig` — capacity, start threshold, game
//                   version, match level. Validated at construction.
// - `policy.rs`:    Pure room-occupancy decisions (wait / start / full).
// - `transport.rs`: `MatchmakingTransport` — the consumed backend interface.
// - `presenter.rs`: `UiPresenter` and `LevelLoader` — the produced-to
//                   interfaces for menus and scene loading.
// - `session.rs`:   `SessionController` — the state machine tying the above
//                   together, driven by `TransportEvent` dispatch.
//
// Design decisions:
// - **Single-threaded, event-driven.** All transport operations are
//   fire-and-forget; outcomes arrive later as events on the same logical
//   thread. The controller never blocks and holds no locks.
// - **Injected collaborators.** The transport, presenter, and loader are
//   passed to `SessionController::new` — no process-wide networking object,
//   and any of the three can be a test double.

pub mod config;
pub mod policy;
pub mod presenter;
pub mod session;
pub mod transport;

pub use config::{ConfigError, SessionConfig};
pub use presenter::{LevelLoader, UiPresenter};
pub use session::{SessionController, SessionState};
pub use transport::MatchmakingTransport;

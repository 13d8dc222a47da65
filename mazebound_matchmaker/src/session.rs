// Session state machine for matchmaking.
//
// `SessionController` is the central structure of this crate. It owns the
// session state, the injected transport/presenter/loader, and two per-room
// latches. All mutation happens through `connect()` and `handle_event()`,
// called from a single logical thread — no internal locking.
//
// Lifecycle: Idle → Connecting → Connected → InRoom, with Disconnected
// reachable from anywhere. The join-or-create protocol always attempts a
// random join first and creates a room only after the backend reports that
// none was available; creation is the sole room-creating path. Two clients
// that both miss at nearly the same time each create their own room — the
// backend offers no coordination, and this controller does not pretend
// otherwise.
//
// Event delivery: the owner either calls `pump()` to drain the transport's
// queued events, or pushes events directly into `handle_event()`. Both
// funnel into the same exhaustive dispatch. Threshold evaluation is
// idempotent (latched on `match_started`), so a `PlayerEnteredRoom` arriving
// right behind `JoinedRoom` re-evaluates safely.

use tracing::{debug, info, warn};

use mazebound_protocol::{RoomOptions, TransportEvent};

use crate::config::SessionConfig;
use crate::policy::{self, FillDecision};
use crate::presenter::{LevelLoader, UiPresenter};
use crate::transport::MatchmakingTransport;

/// Label shown while a connection attempt is in progress.
const CONNECTING_LABEL: &str = "Connecting";

/// Where the session currently stands.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    /// Fresh session, nothing requested yet.
    Idle,
    /// Connection handshake in flight.
    Connecting,
    /// Connected to the backend, not in a room.
    Connected,
    /// In a room, tracking its occupancy as last observed.
    InRoom { player_count: u32 },
    /// Connection lost or refused. Reconnection requires an explicit
    /// `connect()` call — there is no automatic retry.
    Disconnected { cause: String },
}

/// State machine driving one client through connect → join-or-create →
/// room fill → match start.
pub struct SessionController<T, P, L> {
    config: SessionConfig,
    state: SessionState,
    transport: T,
    presenter: P,
    loader: L,
    // Per-room latches. Reset on room entry and on disconnect.
    match_started: bool,
    room_closed: bool,
}

impl<T, P, L> SessionController<T, P, L>
where
    T: MatchmakingTransport,
    P: UiPresenter,
    L: LevelLoader,
{
    /// Build a controller around injected collaborators and show the entry
    /// view. The session starts `Idle`; nothing touches the network until
    /// `connect()` is called.
    pub fn new(config: SessionConfig, transport: T, mut presenter: P, loader: L) -> Self {
        presenter.show_entry_view();
        Self {
            config,
            state: SessionState::Idle,
            transport,
            presenter,
            loader,
            match_started: false,
            room_closed: false,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Start the matchmaking flow.
    ///
    /// Already connected: go straight to a random-join attempt. Not yet
    /// connected: open the connection; the join follows from
    /// `ConnectedToServer`. A call while a handshake is already in flight is
    /// a no-op, so double-clicking a connect button cannot issue two
    /// connection attempts.
    pub fn connect(&mut self) {
        match self.state {
            SessionState::Connecting => {
                debug!("connect requested while a connection attempt is in flight, ignoring");
            }
            SessionState::Connected | SessionState::InRoom { .. } => {
                self.presenter.show_connecting_view(CONNECTING_LABEL);
                self.transport.join_random_room();
            }
            SessionState::Idle | SessionState::Disconnected { .. } => {
                self.presenter.show_connecting_view(CONNECTING_LABEL);
                self.transport.connect(&self.config.game_version);
                self.state = SessionState::Connecting;
            }
        }
    }

    /// Drain the transport's queued events and dispatch each in order.
    pub fn pump(&mut self) {
        for event in self.transport.poll_events() {
            self.handle_event(event);
        }
    }

    /// Dispatch one backend event.
    pub fn handle_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::ConnectedToServer => {
                info!("connected to matchmaking backend, attempting random join");
                self.state = SessionState::Connected;
                self.transport.join_random_room();
            }
            TransportEvent::Disconnected { cause } => {
                warn!("disconnected from matchmaking backend: {cause}");
                self.presenter.show_entry_view();
                self.match_started = false;
                self.room_closed = false;
                self.state = SessionState::Disconnected { cause };
            }
            TransportEvent::JoinRandomFailed { code, message } => {
                info!("no open room available (code {code}: {message}), creating one");
                self.transport.create_room(RoomOptions {
                    max_players: self.config.max_players_per_room,
                });
            }
            TransportEvent::CreateRoomFailed { code, message } => {
                warn!("room creation failed (code {code}: {message})");
                self.presenter.show_entry_view();
                self.match_started = false;
                self.room_closed = false;
                self.state = SessionState::Disconnected {
                    cause: format!("room creation failed: {message}"),
                };
            }
            TransportEvent::JoinedRoom => {
                let player_count = self.transport.current_room_player_count();
                info!("joined a room with {player_count} player(s)");
                self.match_started = false;
                self.room_closed = false;
                self.state = SessionState::InRoom { player_count };
                self.evaluate_room_fill(player_count);
            }
            TransportEvent::PlayerEnteredRoom { player } => {
                if !matches!(self.state, SessionState::InRoom { .. }) {
                    debug!("ignoring player-entered event for {player:?} outside a room");
                    return;
                }
                let player_count = self.transport.current_room_player_count();
                info!("player {player:?} entered the room, now {player_count} player(s)");
                self.state = SessionState::InRoom { player_count };
                self.evaluate_room_fill(player_count);
                self.close_room_if_full(player_count);
            }
        }
    }

    /// Shared threshold evaluation for `JoinedRoom` and `PlayerEnteredRoom`.
    /// Latched: once the match has started, repeat deliveries at or above
    /// the threshold change nothing, so the level loads exactly once.
    fn evaluate_room_fill(&mut self, player_count: u32) {
        if self.match_started {
            return;
        }
        match policy::evaluate(player_count, &self.config) {
            FillDecision::Wait => {
                self.presenter.show_waiting_for_players();
            }
            FillDecision::Start => {
                info!(
                    "start threshold reached with {player_count} player(s), loading {}",
                    self.config.match_level_name
                );
                self.presenter.show_match_ready();
                self.loader.load_level(&self.config.match_level_name);
                self.match_started = true;
            }
        }
    }

    /// Close the room to new joins the moment it reaches capacity. The
    /// backend refuses joins past capacity on its own, so the check is an
    /// exact-equality test and fires at most once per room.
    fn close_room_if_full(&mut self, player_count: u32) {
        if self.room_closed {
            return;
        }
        if policy::is_full(player_count, &self.config) {
            info!("room reached capacity ({player_count}), closing to new joins");
            self.transport.set_room_open(false);
            self.room_closed = true;
        }
    }
}

// Test-only matchmaking backend for integration tests.
//
// `MatchmakingHub` is an in-memory stand-in for the real matchmaking
// service: it keeps a room table, honors game-version partitions and room
// capacity, and delivers `TransportEvent`s into per-client inboxes.
// `HubTransport` is the `MatchmakingTransport` each client holds; it queues
// requests on the hub, and `MatchmakingHub::step()` processes the queue in
// the order requests were issued — which is exactly what makes the
// join-or-create race reproducible: two `JoinRandomRoom` requests queued
// before either `CreateRoom` both miss, and both clients create.
//
// The only test-specific code beyond the hub is `TestClient`, which bundles
// a real `SessionController` with recording presenter/loader doubles. All
// session logic runs through the same code paths as a live client.
//
// Everything is single-threaded (matching the session core's concurrency
// model), so sharing uses `Rc<RefCell<..>>` — no locks, no threads.
//
// See also: `tests/matchmaking_flow.rs` for the scenarios.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use mazebound_matchmaker::{
    LevelLoader, MatchmakingTransport, SessionConfig, SessionController, SessionState, UiPresenter,
};
use mazebound_protocol::{PlayerId, RoomOptions, TransportEvent, TransportRequest};

/// Backend error code for a random join that found no open room.
const ERR_NO_MATCH: i32 = 1;

/// Safety cap for `settle` rounds. A full join-or-create exchange needs
/// three hub/pump rounds; anything past this is a livelock in the test.
const MAX_SETTLE_ROUNDS: usize = 16;

struct RoomSlot {
    game_version: String,
    max_players: u32,
    open: bool,
    occupants: Vec<usize>,
}

struct ClientSlot {
    player_id: PlayerId,
    game_version: Option<String>,
    room: Option<usize>,
    inbox: VecDeque<TransportEvent>,
}

struct HubState {
    rooms: Vec<RoomSlot>,
    clients: Vec<ClientSlot>,
    requests: VecDeque<(usize, TransportRequest)>,
}

/// In-memory matchmaking backend shared by all clients in a test.
pub struct MatchmakingHub {
    state: Rc<RefCell<HubState>>,
}

impl MatchmakingHub {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(HubState {
                rooms: Vec::new(),
                clients: Vec::new(),
                requests: VecDeque::new(),
            })),
        }
    }

    /// Register a new client and hand back its transport.
    pub fn register(&self) -> HubTransport {
        let mut state = self.state.borrow_mut();
        let index = state.clients.len();
        state.clients.push(ClientSlot {
            player_id: PlayerId(index as u32),
            game_version: None,
            room: None,
            inbox: VecDeque::new(),
        });
        HubTransport {
            state: self.state.clone(),
            client: index,
        }
    }

    /// Process all queued requests in issue order, delivering events into
    /// client inboxes.
    pub fn step(&self) {
        let mut state = self.state.borrow_mut();
        while let Some((client, request)) = state.requests.pop_front() {
            process_request(&mut state, client, request);
        }
    }

    /// True when no requests are queued and every inbox has been drained.
    pub fn is_settled(&self) -> bool {
        let state = self.state.borrow();
        state.requests.is_empty() && state.clients.iter().all(|c| c.inbox.is_empty())
    }

    /// Sever a client's connection: remove it from its room and deliver a
    /// `Disconnected` event. The remaining occupants get no event — the
    /// protocol has no player-left notification.
    pub fn drop_client(&self, client: usize, cause: &str) {
        let mut state = self.state.borrow_mut();
        leave_room(&mut state, client);
        state.clients[client]
            .inbox
            .push_back(TransportEvent::Disconnected {
                cause: cause.into(),
            });
    }

    pub fn room_count(&self) -> usize {
        self.state.borrow().rooms.len()
    }

    pub fn open_room_count(&self) -> usize {
        self.state.borrow().rooms.iter().filter(|r| r.open).count()
    }

    /// Occupant count per room, in creation order.
    pub fn room_occupancies(&self) -> Vec<u32> {
        self.state
            .borrow()
            .rooms
            .iter()
            .map(|r| r.occupants.len() as u32)
            .collect()
    }
}

impl Default for MatchmakingHub {
    fn default() -> Self {
        Self::new()
    }
}

fn process_request(state: &mut HubState, client: usize, request: TransportRequest) {
    match request {
        TransportRequest::Connect { game_version } => {
            state.clients[client].game_version = Some(game_version);
            state.clients[client]
                .inbox
                .push_back(TransportEvent::ConnectedToServer);
        }
        TransportRequest::JoinRandomRoom => {
            let version = state.clients[client]
                .game_version
                .clone()
                .unwrap_or_default();
            leave_room(state, client);
            let found = state.rooms.iter().position(|r| {
                r.open && r.game_version == version && (r.occupants.len() as u32) < r.max_players
            });
            match found {
                Some(idx) => {
                    state.rooms[idx].occupants.push(client);
                    state.clients[client].room = Some(idx);
                    let joiner = state.clients[client].player_id;
                    let others: Vec<usize> = state.rooms[idx]
                        .occupants
                        .iter()
                        .copied()
                        .filter(|&c| c != client)
                        .collect();
                    state.clients[client]
                        .inbox
                        .push_back(TransportEvent::JoinedRoom);
                    for other in others {
                        state.clients[other]
                            .inbox
                            .push_back(TransportEvent::PlayerEnteredRoom { player: joiner });
                    }
                }
                None => {
                    state.clients[client]
                        .inbox
                        .push_back(TransportEvent::JoinRandomFailed {
                            code: ERR_NO_MATCH,
                            message: "no match found".into(),
                        });
                }
            }
        }
        TransportRequest::CreateRoom { options } => {
            let version = state.clients[client]
                .game_version
                .clone()
                .unwrap_or_default();
            leave_room(state, client);
            state.rooms.push(RoomSlot {
                game_version: version,
                max_players: options.max_players,
                open: true,
                occupants: vec![client],
            });
            state.clients[client].room = Some(state.rooms.len() - 1);
            state.clients[client]
                .inbox
                .push_back(TransportEvent::JoinedRoom);
        }
        TransportRequest::SetRoomOpen { open } => {
            if let Some(idx) = state.clients[client].room {
                state.rooms[idx].open = open;
            }
        }
    }
}

// Rooms are never garbage-collected when they empty out — the hub lives for
// one test and indices into `rooms` must stay stable.
fn leave_room(state: &mut HubState, client: usize) {
    if let Some(idx) = state.clients[client].room.take() {
        state.rooms[idx].occupants.retain(|&c| c != client);
    }
}

/// One client's view of the hub.
pub struct HubTransport {
    state: Rc<RefCell<HubState>>,
    client: usize,
}

impl HubTransport {
    pub fn client_index(&self) -> usize {
        self.client
    }
}

impl MatchmakingTransport for HubTransport {
    fn connect(&mut self, game_version: &str) {
        self.state.borrow_mut().requests.push_back((
            self.client,
            TransportRequest::Connect {
                game_version: game_version.into(),
            },
        ));
    }

    fn join_random_room(&mut self) {
        self.state
            .borrow_mut()
            .requests
            .push_back((self.client, TransportRequest::JoinRandomRoom));
    }

    fn create_room(&mut self, options: RoomOptions) {
        self.state
            .borrow_mut()
            .requests
            .push_back((self.client, TransportRequest::CreateRoom { options }));
    }

    fn current_room_player_count(&self) -> u32 {
        let state = self.state.borrow();
        state.clients[self.client]
            .room
            .map_or(0, |idx| state.rooms[idx].occupants.len() as u32)
    }

    fn set_room_open(&mut self, open: bool) {
        self.state
            .borrow_mut()
            .requests
            .push_back((self.client, TransportRequest::SetRoomOpen { open }));
    }

    fn poll_events(&mut self) -> Vec<TransportEvent> {
        self.state.borrow_mut().clients[self.client]
            .inbox
            .drain(..)
            .collect()
    }
}

/// What the recording presenter last put on screen.
#[derive(Clone, Debug, PartialEq)]
pub enum View {
    Entry,
    Connecting(String),
    WaitingForPlayers,
    MatchReady,
}

#[derive(Clone, Default)]
pub struct RecordingPresenter {
    views: Rc<RefCell<Vec<View>>>,
}

impl UiPresenter for RecordingPresenter {
    fn show_entry_view(&mut self) {
        self.views.borrow_mut().push(View::Entry);
    }

    fn show_connecting_view(&mut self, label: &str) {
        self.views.borrow_mut().push(View::Connecting(label.into()));
    }

    fn show_waiting_for_players(&mut self) {
        self.views.borrow_mut().push(View::WaitingForPlayers);
    }

    fn show_match_ready(&mut self) {
        self.views.borrow_mut().push(View::MatchReady);
    }
}

#[derive(Clone, Default)]
pub struct RecordingLoader {
    loads: Rc<RefCell<Vec<String>>>,
}

impl LevelLoader for RecordingLoader {
    fn load_level(&mut self, name: &str) {
        self.loads.borrow_mut().push(name.into());
    }
}

/// A real `SessionController` wired to the hub, with recording doubles on
/// the presentation side.
pub struct TestClient {
    pub controller: SessionController<HubTransport, RecordingPresenter, RecordingLoader>,
    pub index: usize,
    views: Rc<RefCell<Vec<View>>>,
    loads: Rc<RefCell<Vec<String>>>,
}

impl TestClient {
    /// Register with the hub and kick off the matchmaking flow.
    pub fn connect(hub: &MatchmakingHub) -> Self {
        Self::connect_with_config(hub, SessionConfig::default())
    }

    pub fn connect_with_config(hub: &MatchmakingHub, config: SessionConfig) -> Self {
        let transport = hub.register();
        let index = transport.client_index();
        let presenter = RecordingPresenter::default();
        let loader = RecordingLoader::default();
        let views = presenter.views.clone();
        let loads = loader.loads.clone();
        let mut controller = SessionController::new(config, transport, presenter, loader);
        controller.connect();
        Self {
            controller,
            index,
            views,
            loads,
        }
    }

    pub fn pump(&mut self) {
        self.controller.pump();
    }

    pub fn state(&self) -> SessionState {
        self.controller.state().clone()
    }

    pub fn last_view(&self) -> Option<View> {
        self.views.borrow().last().cloned()
    }

    pub fn loaded_levels(&self) -> Vec<String> {
        self.loads.borrow().clone()
    }
}

/// Alternate hub processing and client pumping until the exchange goes
/// quiet. Panics if it never does — a livelocked protocol is a test bug.
pub fn settle(hub: &MatchmakingHub, clients: &mut [&mut TestClient]) {
    for _ in 0..MAX_SETTLE_ROUNDS {
        hub.step();
        for client in clients.iter_mut() {
            client.pump();
        }
        if hub.is_settled() {
            return;
        }
    }
    panic!("matchmaking exchange did not settle within {MAX_SETTLE_ROUNDS} rounds");
}

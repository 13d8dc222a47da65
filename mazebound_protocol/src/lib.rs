// mazebound_protocol — matchmaking transport vocabulary for Mazebound.
//
// This crate defines the types exchanged between a game client and the
// matchmaking backend: the operations a client issues (`TransportRequest`)
// and the callbacks the backend delivers (`TransportEvent`). It is consumed
// by the session core (`mazebound_matchmaker`) and by any transport
// implementation, and has no dependency on game or engine crates.
//
// Module overview:
// - `types.rs`:    Core ID types — `PlayerId`.
// - `message.rs`:  Request and event enums, plus `RoomOptions`.
//
// Design decisions:
// - **Events as one tagged enum.** The backend's callback surface is a single
//   `TransportEvent` consumed through one exhaustive `match`, instead of a
//   wide interface of overridable hooks. Adding a variant breaks every
//   dispatch site at compile time.
// - **No framing or wire format.** How a concrete backend serializes these
//   types on the wire is its own business; this crate only fixes the
//   vocabulary. All types derive serde traits so any transport can encode
//   them directly.

pub mod message;
pub mod types;

pub use message::{RoomOptions, TransportEvent, TransportRequest};
pub use types::PlayerId;

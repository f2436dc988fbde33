#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bitboard;
mod board;
pub mod codec;
mod commander;
mod commander_auto;
#[cfg(feature = "std")]
mod commander_cli;
mod common;
mod config;
pub mod input;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod peer_node;
pub mod render;
mod ship;
pub mod targeting;
#[cfg(feature = "std")]
pub mod transport;
mod turn;

pub use bitboard::{BitBoard, BitBoardError};
pub use board::*;
pub use codec::{Coordinate, Frame, ShotMessage, FRAME_LEN};
pub use commander::Commander;
pub use commander_auto::AutoCommander;
#[cfg(feature = "std")]
pub use commander_cli::CliCommander;
pub use common::*;
pub use config::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use peer_node::*;
pub use ship::*;
pub use turn::*;
#[cfg(feature = "std")]
pub use transport::{
    in_memory::InMemoryTransport, tcp::TcpTransport, timeout::ReadTimeout, udp::UdpTransport,
    Transport,
};

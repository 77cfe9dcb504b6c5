//! # linkframe
//!
//! A framed, CRC-checked request/response protocol for a host
//! controller talking to one or more embedded peers over a reliable
//! byte stream (typically a UART). Frames are addressed, sequenced, and
//! integrity-checked with CRC-16/XMODEM; a small command set covers
//! liveness, power/play/jog control, status reporting, bus scanning,
//! session sync, and a staged file-receive transfer.
//!
//! The crate supplies the frame codec, the byte-at-a-time receive state
//! machine, sequence tracking, and command dispatch. It knows nothing
//! about the underlying byte stream or clock source: those are supplied
//! by implementing [`Transport`] and [`Clock`].
//!
//! ## Example
//!
//! ```
//! use linkframe::{Clock, Handlers, Node, Transport};
//! use std::collections::VecDeque;
//!
//! struct Loopback(VecDeque<u8>, Vec<u8>);
//!
//! impl Transport for Loopback {
//!     fn read(&mut self, dst: &mut [u8]) -> usize {
//!         let n = dst.len().min(self.0.len());
//!         for slot in dst.iter_mut().take(n) {
//!             *slot = self.0.pop_front().unwrap();
//!         }
//!         n
//!     }
//!     fn write(&mut self, src: &[u8]) -> usize {
//!         self.1.extend_from_slice(src);
//!         src.len()
//!     }
//!     fn is_open(&self) -> bool { true }
//!     fn flush(&mut self) {}
//!     fn open(&mut self) -> bool { true }
//!     fn close(&mut self) {}
//! }
//!
//! struct FixedClock;
//! impl Clock for FixedClock {
//!     fn now_ms(&self) -> u32 { 0 }
//! }
//!
//! struct MyHandlers;
//! impl Handlers for MyHandlers {}
//!
//! let mut transport = Loopback(VecDeque::new(), Vec::new());
//! let frame = linkframe::frame::encode(2, 1, linkframe::commands::CMD_PING, 0, b"PING");
//! transport.0.extend(frame);
//!
//! let mut node = Node::new(2, transport, FixedClock, MyHandlers);
//! node.poll().unwrap();
//! assert!(!node.transport().1.is_empty());
//! ```

pub mod clock;
pub mod commands;
pub mod crc;
pub mod dispatch;
pub mod error;
pub mod file_transfer;
pub mod frame;
pub mod limits;
pub mod node;
pub mod receiver;
pub mod sequence;
pub mod status;
pub mod transport;

pub use clock::{Clock, SystemClock};
pub use dispatch::{Handlers, Reply};
pub use error::Error;
pub use file_transfer::FileTransferContext;
pub use node::Node;
pub use receiver::Frame;
pub use status::StatusSnapshot;
pub use transport::Transport;

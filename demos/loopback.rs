//! Minimal in-process demo: a loopback `Transport` feeding a `Node` a
//! `PING`, printing whatever the dispatcher sends back.

extern crate linkframe;

use linkframe::{Clock, Handlers, Node, Transport};
use std::collections::VecDeque;
use std::time::Instant;

struct Loopback {
    inbound: VecDeque<u8>,
    open: bool,
}

impl Transport for Loopback {
    fn read(&mut self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.inbound.len());
        for slot in dst.iter_mut().take(n) {
            *slot = self.inbound.pop_front().unwrap();
        }
        n
    }

    fn write(&mut self, src: &[u8]) -> usize {
        print!("-> [ ");
        for b in src {
            print!("{:02x} ", b);
        }
        println!("]");
        src.len()
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn flush(&mut self) {}

    fn open(&mut self) -> bool {
        self.open = true;
        true
    }

    fn close(&mut self) {
        self.open = false;
    }
}

struct WallClock(Instant);

impl Clock for WallClock {
    fn now_ms(&self) -> u32 {
        self.0.elapsed().as_millis() as u32
    }
}

struct AppHandlers;
impl Handlers for AppHandlers {
    fn handle_unknown(&mut self, cmd: u16) {
        println!("unhandled command {:#06x}", cmd);
    }
}

fn main() {
    env_logger::init();

    let frame = linkframe::frame::encode(2, 1, linkframe::commands::CMD_PING, 0, b"PING");
    let mut transport = Loopback {
        inbound: VecDeque::new(),
        open: true,
    };
    transport.inbound.extend(frame);

    let mut node = Node::new(2, transport, WallClock(Instant::now()), AppHandlers);
    node.poll().expect("poll should not fail against an open loopback transport");
}

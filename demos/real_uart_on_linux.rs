//! Drives a `Node` against a real UART using the `serial` crate,
//! grounded in the teacher crate's own `real_uart_on_linux` demo.

extern crate linkframe;
extern crate serial;

use linkframe::{Handlers, Node, SystemClock, Transport};
use log::debug;
use serial::prelude::*;
use serial::SystemPort;
use std::io::{Read as _, Write as _};
use std::thread;
use std::time::Duration;

const SERIAL_PORT: &str = "/dev/ttyS5";
const BAUD_RATE: serial::BaudRate = serial::Baud115200;
const OWN_ID: u16 = 2;

struct Uart {
    port: SystemPort,
}

impl Uart {
    fn new(mut port: SystemPort) -> Self {
        let settings = serial::PortSettings {
            baud_rate: BAUD_RATE,
            char_size: serial::Bits8,
            parity: serial::ParityNone,
            stop_bits: serial::Stop1,
            flow_control: serial::FlowNone,
        };
        port.configure(&settings).unwrap();
        port.set_timeout(Duration::from_millis(10)).unwrap();
        Uart { port }
    }
}

impl Transport for Uart {
    fn read(&mut self, dst: &mut [u8]) -> usize {
        match self.port.read(dst) {
            Ok(n) => n,
            Err(_) => 0,
        }
    }

    fn write(&mut self, src: &[u8]) -> usize {
        match self.port.write(src) {
            Ok(n) => n,
            Err(e) => {
                debug!(target: "linkframe::demo", "write failed: {}", e);
                0
            }
        }
    }

    fn is_open(&self) -> bool {
        true
    }

    fn flush(&mut self) {
        let _ = self.port.flush();
    }

    fn open(&mut self) -> bool {
        true
    }

    fn close(&mut self) {}
}

struct AppHandlers;
impl Handlers for AppHandlers {}

fn main() {
    env_logger::init();

    let port = serial::open(SERIAL_PORT).unwrap();
    let uart = Uart::new(port);
    let mut node = Node::new(OWN_ID, uart, SystemClock::default(), AppHandlers);

    loop {
        node.poll().unwrap_or(());
        thread::sleep(Duration::from_millis(10));
    }
}

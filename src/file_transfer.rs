//! Staged file-receive sub-protocol (spec.md §4.6), grounded in the
//! original source's `FileTransferContext`/`handleFileReceive`. Carried
//! entirely inside `FILE_RECEIVE` payloads; every reply goes out as
//! `FILE_RECEIVE_ACK`.
//!
//! File-transfer integers are fixed to big-endian on the wire here,
//! overriding the original's native-endian `reinterpret_cast` (see
//! spec.md §9).

use crate::crc::crc16;
use crate::limits::MAX_FILE_SIZE;

pub const STAGE_REQUEST_RECEIVE: u8 = 1;
pub const STAGE_RECEIVING_DATA: u8 = 3;
pub const STAGE_VERIFY_CHECKSUM: u8 = 4;

/// Per-reception state, scoped to one `REQUEST_RECEIVE` -> `VERIFY_CHECKSUM`
/// conversation. Created on a valid `REQUEST_RECEIVE`; cleared on a
/// successful `VERIFY_CHECKSUM` or left stale on abandonment (a later
/// `REQUEST_RECEIVE` simply overwrites it).
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTransferContext {
    active: bool,
    file_size: u32,
    received: u32,
    next_index: u32,
    checksum: u16,
    retry_count: u32,
}

impl FileTransferContext {
    pub fn new() -> Self {
        FileTransferContext::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    /// Handles one `FILE_RECEIVE` payload, returning the `FILE_RECEIVE_ACK`
    /// payload to send back, or `None` if the payload is too short to
    /// contain its stage tag's fixed fields (a malformed-payload case,
    /// dropped silently per spec.md §7).
    pub fn handle(&mut self, payload: &[u8]) -> Option<Vec<u8>> {
        let &stage = payload.first()?;
        match stage {
            STAGE_REQUEST_RECEIVE => self.handle_request_receive(payload),
            STAGE_RECEIVING_DATA => self.handle_receiving_data(payload),
            STAGE_VERIFY_CHECKSUM => self.handle_verify_checksum(payload),
            _ => None,
        }
    }

    fn handle_request_receive(&mut self, payload: &[u8]) -> Option<Vec<u8>> {
        if payload.len() < 5 {
            return None;
        }
        let file_size = u32::from_be_bytes(payload[1..5].try_into().unwrap());
        if file_size > MAX_FILE_SIZE {
            return Some(vec![STAGE_REQUEST_RECEIVE, 0]);
        }
        *self = FileTransferContext {
            active: true,
            file_size,
            received: 0,
            next_index: 0,
            checksum: 0,
            retry_count: 0,
        };
        Some(vec![STAGE_REQUEST_RECEIVE, 1])
    }

    fn handle_receiving_data(&mut self, payload: &[u8]) -> Option<Vec<u8>> {
        if payload.len() < 5 {
            return None;
        }
        let block_index = u32::from_be_bytes(payload[1..5].try_into().unwrap());
        let block = &payload[5..];

        if !self.active || block_index != self.next_index {
            return Some(vec![STAGE_RECEIVING_DATA, 0]);
        }

        self.received += block.len() as u32;
        self.next_index += 1;
        self.checksum = crc16(block);

        let mut ack = vec![STAGE_RECEIVING_DATA, 1];
        ack.extend_from_slice(&block_index.to_be_bytes());
        Some(ack)
    }

    fn handle_verify_checksum(&mut self, payload: &[u8]) -> Option<Vec<u8>> {
        if payload.len() < 3 {
            return None;
        }
        let expected = u16::from_be_bytes(payload[1..3].try_into().unwrap());
        let success = expected == self.checksum;
        if success {
            *self = FileTransferContext::default();
        }
        Some(vec![STAGE_VERIFY_CHECKSUM, success as u8])
    }
}

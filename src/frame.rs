//! Frame encoding (spec.md §4.2). Decoding happens inside the receive
//! state machine (`receiver.rs`) rather than on a buffered frame, because
//! the transport is a byte stream without framing — see spec.md §4.2's
//! note on why encode and decode are not symmetric functions here.

use crate::crc::crc16;
use crate::limits::{CRC_LEN, HEADER_LEN, PREAMBLE_BYTE, PREAMBLE_LEN};

/// Encodes `(receiver, sender, cmd, seq, payload)` into a complete
/// on-wire frame: preamble, big-endian length, big-endian header,
/// payload, big-endian CRC-16/XMODEM over header+payload.
///
/// Does not touch any sequence counter; the caller supplies `seq`
/// directly (see spec.md §4.2: "The encode path must never read the
/// inbound sequence counter").
pub fn encode(receiver: u16, sender: u16, cmd: u16, seq: u16, payload: &[u8]) -> Vec<u8> {
    let total_length = (HEADER_LEN + payload.len() + CRC_LEN) as u16;

    let mut out = Vec::with_capacity(PREAMBLE_LEN + 2 + HEADER_LEN + payload.len() + CRC_LEN);
    out.extend(std::iter::repeat(PREAMBLE_BYTE).take(PREAMBLE_LEN));
    out.extend_from_slice(&total_length.to_be_bytes());

    let header_start = out.len();
    out.extend_from_slice(&receiver.to_be_bytes());
    out.extend_from_slice(&sender.to_be_bytes());
    out.extend_from_slice(&cmd.to_be_bytes());
    out.extend_from_slice(&seq.to_be_bytes());
    out.extend_from_slice(payload);

    let crc = crc16(&out[header_start..]);
    out.extend_from_slice(&crc.to_be_bytes());
    out
}

//! Protocol constants. Kept in one place so the tunables spec.md fixes as
//! constants are easy to find and, for a fork, to override.

/// Number of preamble bytes that must be seen before a frame is accepted.
pub const PREAMBLE_LEN: usize = 4;
/// Value repeated `PREAMBLE_LEN` times at the start of every frame.
pub const PREAMBLE_BYTE: u8 = 0x16;

/// Size of the fixed header: receiver, sender, cmd, seq (u16 BE each).
pub const HEADER_LEN: usize = 8;
/// Size of the trailing CRC.
pub const CRC_LEN: usize = 2;
/// Smallest legal `total_length`: header + 0 payload + CRC.
pub const MIN_FRAME_LEN: usize = HEADER_LEN + CRC_LEN;

/// Default receive buffer capacity, and the default upper bound on
/// `total_length`.
pub const DEFAULT_BUFFER_CAPACITY: usize = 256;

/// Broadcast receiver id: matches any node's address filter.
pub const BROADCAST_ID: u16 = 0xFFFF;

/// Inter-byte timeout for a frame in progress. Exceeding this resets the
/// receive state machine to `WAIT_START`.
pub const PACKET_TIMEOUT_MS: u32 = 100;

/// Reporting-only threshold for "small" vs. "large" forward sequence
/// jumps. Has no effect on behavior (see spec.md §4.4 and §9).
pub const SEQUENCE_JUMP_THRESHOLD: u16 = 3;

/// Authentication token required in the last two bytes of a `SYNC` payload.
pub const SYNC_AUTH_TOKEN: u16 = 0xABCD;

/// Largest file size accepted by `REQUEST_RECEIVE`.
pub const MAX_FILE_SIZE: u32 = 1024 * 1024;

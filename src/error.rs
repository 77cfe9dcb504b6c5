/// Error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport is closed; no frame can be sent or received.
    #[error("transport is closed")]
    TransportClosed,
    /// A payload handed to `send_frame` is too large for the wire format
    /// (the encoded frame would exceed the receive buffer's capacity on
    /// the peer, which must be announced out of band; we only know our
    /// own buffer capacity, used as a conservative bound).
    #[error("payload too large: {len} bytes exceeds max {max}")]
    PayloadTooLarge { len: usize, max: usize },
}

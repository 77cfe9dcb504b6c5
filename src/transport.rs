//! External byte-stream collaborator. The core treats short reads and
//! short writes as normal; see spec.md §6.
//!
//! Generalizes the teacher crate's `Interface` trait (`tx_space`,
//! `tx_start`/`tx_finished`, `tx_byte`) from a single-byte callback shape
//! to a buffer-oriented `read`/`write` shape, matching
//! `ISerialInterface` in the original C++ source.

/// A non-blocking, ordered, lossy-but-not-corrupting byte stream.
///
/// Implementors must never block for an unbounded time inside `read` or
/// `write`; a short read/write (including zero) is a normal outcome, not
/// an error.
pub trait Transport {
    /// Reads as many bytes as are immediately available into `dst`,
    /// returning the count. Never blocks; returns 0 if nothing is ready.
    fn read(&mut self, dst: &mut [u8]) -> usize;

    /// Writes as many bytes of `src` as the transport will currently
    /// accept, returning the count actually written.
    fn write(&mut self, src: &[u8]) -> usize;

    /// Whether the transport is currently usable.
    fn is_open(&self) -> bool;

    /// Blocks briefly until any buffered output has been pushed out.
    fn flush(&mut self);

    /// Opens the underlying link. Returns whether it succeeded.
    fn open(&mut self) -> bool;

    /// Closes the underlying link.
    fn close(&mut self);
}

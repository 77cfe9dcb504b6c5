//! Inbound sequence tracking (spec.md §4.4), grounded in the original
//! source's `expectedSequenceNumber_`/`missingPacketCount_` handling inside
//! `processReceivedData()`'s `READ_SEQ` case.
//!
//! `SEQUENCE_JUMP_THRESHOLD` is carried over for parity with the original
//! constant but, as there, never changes what happens — both branches of
//! its comparison do the same thing. It only affects what would be logged.

use crate::limits::SEQUENCE_JUMP_THRESHOLD;

/// What a tracker decided about an inbound sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceOutcome {
    /// `seq` was the expected value, or ahead of it; `expected_seq` has
    /// been advanced past it. `missing` is how many packets appear to
    /// have been lost (0 for the exact-match case).
    Accepted { missing: u16 },
    /// `seq` was behind `expected_seq`; the peer has regressed or
    /// restarted. No state changed; callers should resync rather than
    /// process the frame.
    Regressed,
}

/// Tracks the next expected sequence number for one inbound direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceTracker {
    expected: u16,
}

impl SequenceTracker {
    pub fn new() -> Self {
        SequenceTracker { expected: 0 }
    }

    pub fn expected(&self) -> u16 {
        self.expected
    }

    /// Unconditionally resets the expected sequence number to 0. Called
    /// when a `SYNC` command with a valid auth token is dispatched (the
    /// token check happens at the dispatcher, not here: see spec.md §4.4).
    pub fn reset(&mut self) {
        self.expected = 0;
    }

    /// Folds one observed sequence number into the tracker.
    pub fn observe(&mut self, seq: u16) -> SequenceOutcome {
        let diff = seq.wrapping_sub(self.expected);
        if diff == 0 || diff < 0x8000 {
            // seq is at or ahead of what we expected: accept, and note
            // anything in between as presumed lost. `diff` itself is the
            // count of skipped sequence numbers (0 when seq == expected).
            let missing = diff;
            if missing > SEQUENCE_JUMP_THRESHOLD {
                log::debug!(target: "linkframe::sequence", "large forward jump: {} missing", missing);
            }
            self.expected = seq.wrapping_add(1);
            SequenceOutcome::Accepted { missing }
        } else {
            SequenceOutcome::Regressed
        }
    }
}

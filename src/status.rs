//! `STATUS_SYNC_ACK` payload, 29 bytes per spec.md §6. Grounded in the
//! original source's `handleStatusSync`, which builds this exact layout
//! field by field into a `responsePayload[29]`.

use crate::commands::MotorType;

/// Length in bytes of an encoded `StatusSnapshot`.
pub const STATUS_PAYLOAD_LEN: usize = 29;

/// Fixed-width error code string carried at the tail of the status
/// payload, ASCII, zero-padded to 8 bytes.
pub const ERROR_CODE_LEN: usize = 8;

/// Everything `STATUS_SYNC` reports about the node, supplied by the
/// handler on each request (see `Handlers::status_snapshot`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub main_power: bool,
    pub play_state: u8,
    pub run_hours: u8,
    pub run_minutes: u8,
    pub run_seconds: u8,
    pub current_count: u16,
    pub total_count: u16,
    /// Units of 0.01 V.
    pub voltage: u16,
    /// Units of 0.01 A.
    pub current: u16,
    /// Units of 0.01 s. Only the low 16 bits are encoded, per spec.md §6.
    pub motion_current_time: u16,
    /// Units of 0.01 s.
    pub motion_end_time: u16,
    pub fault: bool,
    pub can_id: u8,
    pub can_sub_id: u8,
    pub motor_type: MotorType,
    pub error_code: [u8; ERROR_CODE_LEN],
}

impl StatusSnapshot {
    /// Convenience constructor matching `handleStatusSync`'s
    /// ms-to-h/m/s derivation of a single running-time counter.
    pub fn from_run_time_ms(run_time_ms: u32) -> (u8, u8, u8) {
        let hours = run_time_ms / (1000 * 60 * 60);
        let minutes = (run_time_ms % (1000 * 60 * 60)) / (1000 * 60);
        let seconds = (run_time_ms % (1000 * 60)) / 1000;
        (hours as u8, minutes as u8, seconds as u8)
    }

    pub fn encode(&self) -> [u8; STATUS_PAYLOAD_LEN] {
        let mut out = [0u8; STATUS_PAYLOAD_LEN];
        out[0] = self.main_power as u8;
        out[1] = self.play_state;
        out[2] = self.run_hours;
        out[3] = self.run_minutes;
        out[4] = self.run_seconds;
        out[5..7].copy_from_slice(&self.current_count.to_be_bytes());
        out[7..9].copy_from_slice(&self.total_count.to_be_bytes());
        out[9..11].copy_from_slice(&self.voltage.to_be_bytes());
        out[11..13].copy_from_slice(&self.current.to_be_bytes());
        out[13..15].copy_from_slice(&self.motion_current_time.to_be_bytes());
        out[15..17].copy_from_slice(&self.motion_end_time.to_be_bytes());
        out[17] = self.fault as u8;
        out[18] = self.can_id;
        out[19] = self.can_sub_id;
        out[20] = self.motor_type as u8;
        out[21..29].copy_from_slice(&self.error_code);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_fields_at_documented_offsets() {
        let snap = StatusSnapshot {
            main_power: true,
            play_state: 2,
            run_hours: 1,
            run_minutes: 2,
            run_seconds: 3,
            current_count: 1000,
            total_count: 2000,
            voltage: 3000,
            current: 4000,
            motion_current_time: 1000,
            motion_end_time: 2000,
            fault: false,
            can_id: 7,
            can_sub_id: 8,
            motor_type: MotorType::TypeA,
            error_code: *b"E01\0\0\0\0\0",
        };
        let bytes = snap.encode();
        assert_eq!(bytes.len(), STATUS_PAYLOAD_LEN);
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[1], 2);
        assert_eq!(&bytes[2..5], &[1, 2, 3]);
        assert_eq!(u16::from_be_bytes([bytes[5], bytes[6]]), 1000);
        assert_eq!(u16::from_be_bytes([bytes[7], bytes[8]]), 2000);
        assert_eq!(u16::from_be_bytes([bytes[9], bytes[10]]), 3000);
        assert_eq!(u16::from_be_bytes([bytes[11], bytes[12]]), 4000);
        assert_eq!(bytes[17], 0);
        assert_eq!(bytes[18], 7);
        assert_eq!(bytes[19], 8);
        assert_eq!(bytes[20], MotorType::TypeA as u8);
        assert_eq!(&bytes[21..24], b"E01");
    }

    #[test]
    fn run_time_conversion_matches_original_division() {
        // 1h 1m 1s, in ms.
        let ms = (60 * 60 + 60 + 1) * 1000;
        assert_eq!(StatusSnapshot::from_run_time_ms(ms), (1, 1, 1));
    }
}

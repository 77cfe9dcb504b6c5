//! Command dispatcher (spec.md §4.5, supplemented by §4.7 in
//! SPEC_FULL.md). Generalizes the original source's virtual
//! `handle_*` overrides into a single `Handlers` trait matched against
//! in one exhaustive dispatch site, per spec.md §9's re-architecture
//! guidance.

use crate::commands::{
    JogDirection, MotorType, PlayState, CMD_CONFIG, CMD_FILE_RECEIVE, CMD_FILE_RECEIVE_ACK,
    CMD_ID_SCAN, CMD_ID_SCAN_ACK, CMD_JOG_MOVE_CW_CCW, CMD_MAIN_POWER_CONTROL,
    CMD_MAIN_POWER_CONTROL_ACK, CMD_PING, CMD_PLAY_CONTROL, CMD_PLAY_CONTROL_ACK, CMD_PONG,
    CMD_STATUS_SYNC, CMD_STATUS_SYNC_ACK, CMD_SYNC, CMD_SYNC_ACK,
};
use crate::file_transfer::FileTransferContext;
use crate::limits::SYNC_AUTH_TOKEN;
use crate::status::StatusSnapshot;

/// Node-supplied behavior for commands the dispatcher cannot answer on
/// its own. Every method has a meaning even when the command never
/// fires in a given deployment; implement the ones you care about and
/// take the provided defaults for the rest.
pub trait Handlers {
    /// `CONFIG` (0x0003): no automatic reply, payload handed through as-is.
    fn config(&mut self, _payload: &[u8]) {}

    /// `MAIN_POWER_CONTROL`: `power_flag` is already validated to be 0 or 1.
    fn set_main_power(&mut self, _power_flag: u8) {}

    /// `PLAY_CONTROL`: `requested` is already validated. Returns the
    /// state to report back in the ACK, which need not equal `requested`.
    fn set_play_state(&mut self, requested: PlayState) -> PlayState {
        requested
    }

    /// `JOG_MOVE_CW_CCW`: `direction` is already validated to be 0 or 1.
    fn set_jog(&mut self, _id: u8, _sub_id: u8, _speed: u32, _direction: JogDirection) {}

    /// `STATUS_SYNC`: supplies the full status snapshot to encode.
    fn status_snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            main_power: false,
            play_state: PlayState::Stop as u8,
            run_hours: 0,
            run_minutes: 0,
            run_seconds: 0,
            current_count: 0,
            total_count: 0,
            voltage: 0,
            current: 0,
            motion_current_time: 0,
            motion_end_time: 0,
            fault: false,
            can_id: 0,
            can_sub_id: 0,
            motor_type: MotorType::None,
            error_code: [0; 8],
        }
    }

    /// Called for any command code not in the dispatch table.
    fn handle_unknown(&mut self, _cmd: u16) {}
}

/// Everything the dispatcher decided to send back, if anything.
pub struct Reply {
    pub cmd: u16,
    pub payload: Vec<u8>,
}

impl Reply {
    fn new(cmd: u16, payload: Vec<u8>) -> Self {
        Reply { cmd, payload }
    }
}

/// Routes one decoded frame to its handler, returning the reply payload
/// (command + bytes) to encode and send, if the command produces one.
///
/// `file_transfer` is threaded in explicitly rather than owned by the
/// dispatcher so that its lifecycle (spanning many `FILE_RECEIVE`
/// frames) is visible at the call site, matching spec.md's framing of
/// the file context as node state rather than dispatcher state.
pub fn dispatch<H: Handlers>(
    handlers: &mut H,
    file_transfer: &mut FileTransferContext,
    own_id: u16,
    cmd: u16,
    payload: &[u8],
) -> Option<Reply> {
    match cmd {
        CMD_PING => Some(Reply::new(CMD_PONG, b"PONG".to_vec())),

        CMD_FILE_RECEIVE => file_transfer
            .handle(payload)
            .map(|ack| Reply::new(CMD_FILE_RECEIVE_ACK, ack)),

        CMD_CONFIG => {
            handlers.config(payload);
            None
        }

        CMD_ID_SCAN => {
            if payload.len() < 2 {
                return None;
            }
            let target = u16::from_be_bytes([payload[0], payload[1]]);
            if target != own_id {
                return None;
            }
            Some(Reply::new(CMD_ID_SCAN_ACK, payload[..2].to_vec()))
        }

        CMD_STATUS_SYNC => {
            let snapshot = handlers.status_snapshot();
            Some(Reply::new(CMD_STATUS_SYNC_ACK, snapshot.encode().to_vec()))
        }

        CMD_SYNC => {
            if payload.len() < 6 {
                return None;
            }
            let token = u16::from_be_bytes([payload[4], payload[5]]);
            if token != SYNC_AUTH_TOKEN {
                return None;
            }
            // Mirrors the sender's timestamp back alongside the token,
            // per `sendSyncAck` in the original source: a 6-byte ack
            // payload, not an empty one.
            let mut ack = payload[0..4].to_vec();
            ack.extend_from_slice(&SYNC_AUTH_TOKEN.to_be_bytes());
            Some(Reply::new(CMD_SYNC_ACK, ack))
        }

        CMD_MAIN_POWER_CONTROL => {
            let &power_flag = payload.first()?;
            if power_flag > 1 {
                return None;
            }
            handlers.set_main_power(power_flag);
            Some(Reply::new(CMD_MAIN_POWER_CONTROL_ACK, vec![power_flag]))
        }

        CMD_PLAY_CONTROL => {
            let &raw = payload.first()?;
            let requested = PlayState::from_byte(raw)?;
            let reported = handlers.set_play_state(requested);
            Some(Reply::new(CMD_PLAY_CONTROL_ACK, vec![reported as u8]))
        }

        CMD_JOG_MOVE_CW_CCW => {
            if payload.len() < 7 {
                return None;
            }
            let id = payload[0];
            let sub_id = payload[1];
            let speed = u32::from_be_bytes(payload[2..6].try_into().unwrap());
            let direction = JogDirection::from_byte(payload[6])?;
            handlers.set_jog(id, sub_id, speed, direction);
            None
        }

        other => {
            handlers.handle_unknown(other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingHandlers {
        power: Option<u8>,
        jog: Option<(u8, u8, u32, JogDirection)>,
        unknown: Vec<u16>,
    }

    impl Handlers for RecordingHandlers {
        fn set_main_power(&mut self, power_flag: u8) {
            self.power = Some(power_flag);
        }

        fn set_jog(&mut self, id: u8, sub_id: u8, speed: u32, direction: JogDirection) {
            self.jog = Some((id, sub_id, speed, direction));
        }

        fn handle_unknown(&mut self, cmd: u16) {
            self.unknown.push(cmd);
        }
    }

    #[test]
    fn ping_replies_with_pong() {
        let mut h = RecordingHandlers::default();
        let mut ft = FileTransferContext::new();
        let reply = dispatch(&mut h, &mut ft, 1, CMD_PING, &[]).unwrap();
        assert_eq!(reply.cmd, CMD_PONG);
        assert_eq!(reply.payload, b"PONG");
    }

    #[test]
    fn sync_with_bad_token_is_ignored() {
        let mut h = RecordingHandlers::default();
        let mut ft = FileTransferContext::new();
        let payload = [0, 0, 0, 0, 0xAB, 0xCE];
        assert!(dispatch(&mut h, &mut ft, 1, CMD_SYNC, &payload).is_none());
    }

    #[test]
    fn sync_with_good_token_acks_and_mirrors_timestamp() {
        let mut h = RecordingHandlers::default();
        let mut ft = FileTransferContext::new();
        let payload = [0x00, 0x00, 0x00, 0x64, 0xAB, 0xCD];
        let reply = dispatch(&mut h, &mut ft, 1, CMD_SYNC, &payload).unwrap();
        assert_eq!(reply.cmd, CMD_SYNC_ACK);
        assert_eq!(reply.payload, vec![0x00, 0x00, 0x00, 0x64, 0xAB, 0xCD]);
    }

    #[test]
    fn main_power_control_rejects_out_of_range_flag() {
        let mut h = RecordingHandlers::default();
        let mut ft = FileTransferContext::new();
        assert!(dispatch(&mut h, &mut ft, 1, CMD_MAIN_POWER_CONTROL, &[2]).is_none());
        assert_eq!(h.power, None);
    }

    #[test]
    fn main_power_control_accepts_and_echoes() {
        let mut h = RecordingHandlers::default();
        let mut ft = FileTransferContext::new();
        let reply = dispatch(&mut h, &mut ft, 1, CMD_MAIN_POWER_CONTROL, &[1]).unwrap();
        assert_eq!(h.power, Some(1));
        assert_eq!(reply.payload, vec![1]);
    }

    #[test]
    fn jog_rejects_bad_direction_and_sends_no_reply() {
        let mut h = RecordingHandlers::default();
        let mut ft = FileTransferContext::new();
        let payload = [1, 2, 0, 0, 1, 0, 9];
        assert!(dispatch(&mut h, &mut ft, 1, CMD_JOG_MOVE_CW_CCW, &payload).is_none());
        assert!(h.jog.is_none());
    }

    #[test]
    fn jog_accepts_and_never_replies() {
        let mut h = RecordingHandlers::default();
        let mut ft = FileTransferContext::new();
        let payload = [1, 2, 0, 0, 1, 0, 1];
        assert!(dispatch(&mut h, &mut ft, 1, CMD_JOG_MOVE_CW_CCW, &payload).is_none());
        assert_eq!(h.jog, Some((1, 2, 256, JogDirection::Cw)));
    }

    #[test]
    fn unknown_command_calls_handle_unknown() {
        let mut h = RecordingHandlers::default();
        let mut ft = FileTransferContext::new();
        assert!(dispatch(&mut h, &mut ft, 1, 0x00F0, &[]).is_none());
        assert_eq!(h.unknown, vec![0x00F0]);
    }

    #[test]
    fn id_scan_replies_only_when_target_matches_own_id() {
        let mut h = RecordingHandlers::default();
        let mut ft = FileTransferContext::new();
        assert!(dispatch(&mut h, &mut ft, 5, CMD_ID_SCAN, &[0, 7]).is_none());
        let reply = dispatch(&mut h, &mut ft, 5, CMD_ID_SCAN, &[0, 5]).unwrap();
        assert_eq!(reply.cmd, CMD_ID_SCAN_ACK);
        assert_eq!(reply.payload, vec![0, 5]);
    }

    #[test]
    fn status_sync_encodes_default_snapshot() {
        let mut h = RecordingHandlers::default();
        let mut ft = FileTransferContext::new();
        let reply = dispatch(&mut h, &mut ft, 1, CMD_STATUS_SYNC, &[]).unwrap();
        assert_eq!(reply.cmd, CMD_STATUS_SYNC_ACK);
        assert_eq!(reply.payload.len(), 29);
    }
}

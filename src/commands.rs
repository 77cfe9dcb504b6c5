//! Command codes and the small enums carried in a few command payloads.
//! Grounded in the original C++ source's `CMD_*` constants
//! (`com_protocol_class.cpp`/`.h`), generalized from raw `uint16_t`
//! literals to named constants and, where the payload is an enum, real
//! Rust enums instead of `static_cast<uint8_t>`.

/// Bit set on a command code to mark it as a reply.
pub const ACK_BIT: u16 = 0x8000;

pub const CMD_PING: u16 = 0x0001;
pub const CMD_PONG: u16 = CMD_PING | ACK_BIT;

pub const CMD_FILE_RECEIVE: u16 = 0x0002;
pub const CMD_FILE_RECEIVE_ACK: u16 = CMD_FILE_RECEIVE | ACK_BIT;

pub const CMD_CONFIG: u16 = 0x0003;

pub const CMD_ID_SCAN: u16 = 0x0004;
pub const CMD_ID_SCAN_ACK: u16 = CMD_ID_SCAN | ACK_BIT;

pub const CMD_STATUS_SYNC: u16 = 0x0010;
pub const CMD_STATUS_SYNC_ACK: u16 = CMD_STATUS_SYNC | ACK_BIT;

pub const CMD_SYNC: u16 = 0x0020;
pub const CMD_SYNC_ACK: u16 = CMD_SYNC | ACK_BIT;

pub const CMD_MAIN_POWER_CONTROL: u16 = 0x0100;
pub const CMD_MAIN_POWER_CONTROL_ACK: u16 = CMD_MAIN_POWER_CONTROL | ACK_BIT;

pub const CMD_PLAY_CONTROL: u16 = 0x0110;
pub const CMD_PLAY_CONTROL_ACK: u16 = CMD_PLAY_CONTROL | ACK_BIT;

pub const CMD_JOG_MOVE_CW_CCW: u16 = 0x0120;

/// `PLAY_CONTROL` request/response state, from `payload[0]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PlayState {
    PlayOne = 1,
    PlayRepeat = 2,
    Pause = 3,
    Stop = 4,
}

impl PlayState {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            1 => Some(PlayState::PlayOne),
            2 => Some(PlayState::PlayRepeat),
            3 => Some(PlayState::Pause),
            4 => Some(PlayState::Stop),
            _ => None,
        }
    }
}

/// Motor type reported in a `STATUS_SYNC_ACK` payload. The original
/// source references `MotorType::MOTOR_NULL` and bounds the field to
/// "0..5" without naming the other variants in the retrieved source;
/// the discriminants 0..=5 are what matters on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MotorType {
    None = 0,
    TypeA = 1,
    TypeB = 2,
    TypeC = 3,
    TypeD = 4,
    TypeE = 5,
}

impl MotorType {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(MotorType::None),
            1 => Some(MotorType::TypeA),
            2 => Some(MotorType::TypeB),
            3 => Some(MotorType::TypeC),
            4 => Some(MotorType::TypeD),
            5 => Some(MotorType::TypeE),
            _ => None,
        }
    }
}

/// Jog direction, from `JOG_MOVE_CW_CCW`'s `direction` byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum JogDirection {
    Ccw = 0,
    Cw = 1,
}

impl JogDirection {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(JogDirection::Ccw),
            1 => Some(JogDirection::Cw),
            _ => None,
        }
    }
}

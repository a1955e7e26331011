use crc::{Algorithm, Crc};
use std::time::Duration;

use crate::ChecksumMismatch;

/// Address of most SHT4x parts (SHT40-AD1B, SHT41-AD1B, SHT45-AD1B, ...).
pub const DEFAULT_ADDRESS: u16 = 0x44;
/// Address of the SHT40-BD1B and SHT43-BDCB.
pub const ALT_ADDRESS_B: u16 = 0x45;
/// Address of the SHT40-CD1B.
pub const ALT_ADDRESS_C: u16 = 0x46;

mod constants {
    // measurement without heater
    pub const CMD_NOHEAT_HIGH_PRECISION: u8 = 0xfd;
    pub const CMD_NOHEAT_MED_PRECISION: u8 = 0xf6;
    pub const CMD_NOHEAT_LOW_PRECISION: u8 = 0xe0;

    // heater pulse followed by a high precision measurement
    pub const CMD_HIGHHEAT_1S: u8 = 0x39;
    pub const CMD_HIGHHEAT_100MS: u8 = 0x32;
    pub const CMD_MEDHEAT_1S: u8 = 0x2f;
    pub const CMD_MEDHEAT_100MS: u8 = 0x24;
    pub const CMD_LOWHEAT_1S: u8 = 0x1e;
    pub const CMD_LOWHEAT_100MS: u8 = 0x15;

    pub const CMD_READ_SERIAL: u8 = 0x89;
    pub const CMD_SOFT_RESET: u8 = 0x94;
}
pub(crate) use constants::*;

/// Every data-returning command replies with two (word, crc) groups.
pub const REPLY_LEN: usize = 6;

pub(crate) const RESET_DELAY: Duration = Duration::from_millis(1);
pub(crate) const SERIAL_DELAY: Duration = Duration::from_millis(10);

/// CRC-8 used by Sensirion sensors: polynomial 0x31, init 0xff, no reflection, no final xor.
pub const CRC_8_SENSIRION: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x31,
    init: 0xff,
    refin: false,
    refout: false,
    xorout: 0x00,
    check: 0xf7,
    residue: 0x00,
};

const CRC: Crc<u8> = Crc::<u8>::new(&CRC_8_SENSIRION);

/// Measurement repeatability. Higher precision takes longer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    #[default]
    High,
    Medium,
    Low,
}

/// On-chip heater pulse run before a high precision measurement.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heater {
    #[default]
    None,
    HighHeat1s,
    HighHeat100ms,
    MedHeat1s,
    MedHeat100ms,
    LowHeat1s,
    LowHeat100ms,
}

// (command, wait in ms) indexed by setting
const PRECISION_TABLE: [(u8, u64); 3] = [
    (CMD_NOHEAT_HIGH_PRECISION, 10),
    (CMD_NOHEAT_MED_PRECISION, 5),
    (CMD_NOHEAT_LOW_PRECISION, 2),
];

const HEATER_TABLE: [(u8, u64); 6] = [
    (CMD_HIGHHEAT_1S, 1100),
    (CMD_HIGHHEAT_100MS, 110),
    (CMD_MEDHEAT_1S, 1100),
    (CMD_MEDHEAT_100MS, 110),
    (CMD_LOWHEAT_1S, 1100),
    (CMD_LOWHEAT_100MS, 110),
];

impl Precision {
    fn entry(self) -> (u8, u64) {
        let index = match self {
            Precision::High => 0,
            Precision::Medium => 1,
            Precision::Low => 2,
        };
        PRECISION_TABLE[index]
    }

    pub fn command(self) -> u8 {
        self.entry().0
    }
}

impl Heater {
    fn entry(self) -> Option<(u8, u64)> {
        let index = match self {
            Heater::None => return None,
            Heater::HighHeat1s => 0,
            Heater::HighHeat100ms => 1,
            Heater::MedHeat1s => 2,
            Heater::MedHeat100ms => 3,
            Heater::LowHeat1s => 4,
            Heater::LowHeat100ms => 5,
        };
        Some(HEATER_TABLE[index])
    }

    /// Command byte for this heater pulse, `None` when the heater is off.
    pub fn command(self) -> Option<u8> {
        self.entry().map(|(cmd, _)| cmd)
    }

    pub fn is_active(self) -> bool {
        self != Heater::None
    }
}

/// Picks the measurement command and how long the sensor needs before its reply can be read.
/// An active heater overrides the precision setting.
pub fn select_command(precision: Precision, heater: Heater) -> (u8, Duration) {
    let (cmd, wait_ms) = heater.entry().unwrap_or_else(|| precision.entry());
    (cmd, Duration::from_millis(wait_ms))
}

pub fn checksum8(bytes: &[u8]) -> u8 {
    CRC.checksum(bytes)
}

fn check_word(group: &[u8]) -> Result<u16, ChecksumMismatch> {
    let computed = checksum8(&group[0..2]);
    let received = group[2];
    if computed != received {
        return Err(ChecksumMismatch { computed, received });
    }
    Ok(u16::from_be_bytes([group[0], group[1]]))
}

/// Validates both halves of a 6-byte reply and returns the two data words.
pub fn decode_reply(reply: &[u8; REPLY_LEN]) -> Result<[u16; 2], ChecksumMismatch> {
    let first = check_word(&reply[0..3]).inspect_err(|e| {
        log::warn!("first reply word failed validation: {e}");
    })?;
    let second = check_word(&reply[3..6]).inspect_err(|e| {
        log::warn!("second reply word failed validation: {e}");
    })?;
    Ok([first, second])
}

pub fn ticks_to_celsius(ticks: u16) -> f32 {
    -45.0 + 175.0 * f32::from(ticks) / 65535.0
}

/// Relative humidity in percent, clamped to the physically meaningful 0..=100 range.
pub fn ticks_to_humidity(ticks: u16) -> f32 {
    let rh = -6.0 + 125.0 * f32::from(ticks) / 65535.0;
    rh.clamp(0.0, 100.0)
}

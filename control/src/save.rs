//! Binary image of the persisted settings.
//!
//! `Save` holds the settings exactly as they are stored, without any
//! sanitation. `Store` wraps it into a record that can be recognized and
//! verified when read back from flash.

use crc::{Crc, CRC_16_USB};

use crate::calibration::ADC_MAX;
use crate::configuration::{DEFAULT_CC, DEFAULT_CHANNEL};

/// Settings image written to the storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Save {
    pub cc: u8,
    pub channel: u8,
    pub curve: u8,
    pub invert: bool,
    pub instrument: u8,
    pub pedal_min: u16,
    pub pedal_max: u16,
}

impl Default for Save {
    fn default() -> Self {
        Self {
            cc: DEFAULT_CC,
            channel: DEFAULT_CHANNEL,
            curve: 0,
            invert: false,
            instrument: 0,
            pedal_min: 0,
            pedal_max: ADC_MAX,
        }
    }
}

impl Save {
    pub const SIZE: usize = 9;

    fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        Self {
            cc: bytes[0],
            channel: bytes[1],
            curve: bytes[2],
            invert: bytes[3] != 0,
            instrument: bytes[4],
            pedal_min: u16::from_le_bytes([bytes[5], bytes[6]]),
            pedal_max: u16::from_le_bytes([bytes[7], bytes[8]]),
        }
    }

    fn to_bytes(self) -> [u8; Self::SIZE] {
        let min = self.pedal_min.to_le_bytes();
        let max = self.pedal_max.to_le_bytes();
        [
            self.cc,
            self.channel,
            self.curve,
            u8::from(self.invert),
            self.instrument,
            min[0],
            min[1],
            max[0],
            max[1],
        ]
    }
}

// This constant is used to invalidate data when needed, reads "ERM2"
const MARKER: u32 = 0x4552_4D32;
const CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_USB);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidData;

#[derive(Debug, Clone, Copy)]
pub struct Store {
    version: u32,
    save_raw: [u8; Save::SIZE],
    crc: u16,
}

impl Store {
    /// Marker, version, payload and checksum.
    pub const SIZE: usize = 4 + 4 + Save::SIZE + 2;

    #[must_use]
    pub fn new(save: Save, version: u32) -> Self {
        let save_raw = save.to_bytes();
        let crc = CRC.checksum(&save_raw);
        Self {
            version,
            save_raw,
            crc,
        }
    }

    /// # Errors
    ///
    /// This fails with `InvalidData` when the record does not start with
    /// the expected marker or when the recovered save does not pass CRC
    /// check.
    pub fn from_bytes(bytes: [u8; Self::SIZE]) -> Result<Self, InvalidData> {
        let marker = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if marker != MARKER {
            return Err(InvalidData);
        }

        let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
        let mut save_raw = [0; Save::SIZE];
        save_raw.copy_from_slice(&bytes[8..8 + Save::SIZE]);
        let crc = u16::from_le_bytes([bytes[Self::SIZE - 2], bytes[Self::SIZE - 1]]);

        if CRC.checksum(&save_raw) == crc {
            Ok(Self {
                version,
                save_raw,
                crc,
            })
        } else {
            Err(InvalidData)
        }
    }

    #[must_use]
    pub fn to_bytes(self) -> [u8; Self::SIZE] {
        let mut bytes = [0; Self::SIZE];
        bytes[0..4].copy_from_slice(&MARKER.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.version.to_le_bytes());
        bytes[8..8 + Save::SIZE].copy_from_slice(&self.save_raw);
        bytes[Self::SIZE - 2..].copy_from_slice(&self.crc.to_le_bytes());
        bytes
    }

    #[must_use]
    pub fn save(&self) -> Save {
        Save::from_bytes(self.save_raw)
    }

    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }
}

//! Persistence of the configuration.
//!
//! The controller talks only to the [`Storage`] trait, one getter and one
//! setter per setting. Two implementations are provided: a volatile
//! [`MemoryStorage`] and [`FlashStorage`], which writes versioned records
//! over a ring of flash sectors and picks the latest valid one on boot.

use crate::log;
use crate::save::{Save, Store};

/// Key-value store of the persisted settings.
///
/// Values are returned exactly as stored. Range checks are left to the
/// caller. Writes are synchronous and assumed to succeed.
pub trait Storage {
    /// Prepare the storage for use.
    ///
    /// Returns `false` when no prior settings were found, in which case
    /// the defaults were just written.
    fn init(&mut self) -> bool;

    fn cc(&self) -> u8;
    fn save_cc(&mut self, cc: u8);

    fn channel(&self) -> u8;
    fn save_channel(&mut self, channel: u8);

    fn curve(&self) -> u8;
    fn save_curve(&mut self, curve: u8);

    fn invert(&self) -> bool;
    fn save_invert(&mut self, invert: bool);

    fn active_instrument(&self) -> u8;
    fn save_active_instrument(&mut self, index: u8);

    fn pedal_min(&self) -> u16;
    fn pedal_max(&self) -> u16;
    fn save_calibration(&mut self, min: u16, max: u16);
}

/// Storage living only in RAM, losing everything on power down.
///
/// Useful for hosts without persistent memory and for tests. It counts
/// the performed writes.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    save: Option<Save>,
    writes: usize,
}

impl MemoryStorage {
    /// Storage pretending to contain the given settings from a previous run.
    #[must_use]
    pub fn with_save(save: Save) -> Self {
        Self {
            save: Some(save),
            writes: 0,
        }
    }

    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn current(&self) -> Save {
        self.save.unwrap_or_default()
    }

    fn update(&mut self, update: impl FnOnce(&mut Save)) {
        let mut save = self.current();
        update(&mut save);
        self.save = Some(save);
        self.writes += 1;
    }
}

impl Storage for MemoryStorage {
    fn init(&mut self) -> bool {
        if self.save.is_some() {
            true
        } else {
            self.save = Some(Save::default());
            false
        }
    }

    fn cc(&self) -> u8 {
        self.current().cc
    }

    fn save_cc(&mut self, cc: u8) {
        self.update(|save| save.cc = cc);
    }

    fn channel(&self) -> u8 {
        self.current().channel
    }

    fn save_channel(&mut self, channel: u8) {
        self.update(|save| save.channel = channel);
    }

    fn curve(&self) -> u8 {
        self.current().curve
    }

    fn save_curve(&mut self, curve: u8) {
        self.update(|save| save.curve = curve);
    }

    fn invert(&self) -> bool {
        self.current().invert
    }

    fn save_invert(&mut self, invert: bool) {
        self.update(|save| save.invert = invert);
    }

    fn active_instrument(&self) -> u8 {
        self.current().instrument
    }

    fn save_active_instrument(&mut self, index: u8) {
        self.update(|save| save.instrument = index);
    }

    fn pedal_min(&self) -> u16 {
        self.current().pedal_min
    }

    fn pedal_max(&self) -> u16 {
        self.current().pedal_max
    }

    fn save_calibration(&mut self, min: u16, max: u16) {
        self.update(|save| {
            save.pedal_min = min;
            save.pedal_max = max;
        });
    }
}

/// Raw access to a non-volatile memory.
///
/// Writing to an address is expected to replace the whole sector it
/// belongs to, the way erase-then-program flash drivers do.
pub trait Flash {
    fn read(&mut self, address: u32, buffer: &mut [u8]);
    fn write(&mut self, address: u32, data: &[u8]);
}

pub const SECTOR_SIZE: u32 = 4096;

/// Number of sectors the records rotate through by default.
pub const DEFAULT_SECTORS: usize = 16;

fn sector_address(sector_index: usize) -> u32 {
    (sector_index as u32) * SECTOR_SIZE
}

/// Storage writing every change as a new record to the next flash sector.
///
/// Spreading writes over sectors limits wear. Each record carries an
/// increasing version, so the newest one can be recognized on boot.
pub struct FlashStorage<F> {
    flash: F,
    sectors: usize,
    version: u32,
    save: Save,
}

impl<F: Flash> FlashStorage<F> {
    #[must_use]
    pub fn new(flash: F) -> Self {
        Self::with_sectors(flash, DEFAULT_SECTORS)
    }

    #[must_use]
    pub fn with_sectors(flash: F, sectors: usize) -> Self {
        Self {
            flash,
            sectors: sectors.max(1),
            version: 0,
            save: Save::default(),
        }
    }

    pub fn release(self) -> F {
        self.flash
    }

    fn load_latest(&mut self) -> Option<Store> {
        let mut latest_store: Option<Store> = None;

        for i in 0..self.sectors {
            let mut store_buffer = [0; Store::SIZE];
            self.flash.read(sector_address(i), &mut store_buffer);

            if let Ok(store) = Store::from_bytes(store_buffer) {
                match latest_store {
                    Some(latest) if store.version() <= latest.version() => (),
                    _ => latest_store = Some(store),
                }
            }
        }

        latest_store
    }

    fn persist(&mut self) {
        log::info!("Saving version={:?}: {:?}", self.version, self.save);
        let data = Store::new(self.save, self.version).to_bytes();
        let sector = self.version as usize % self.sectors;
        self.flash.write(sector_address(sector), &data);
        self.version = self.version.wrapping_add(1);
    }

    fn update(&mut self, update: impl FnOnce(&mut Save)) {
        update(&mut self.save);
        self.persist();
    }
}

impl<F: Flash> Storage for FlashStorage<F> {
    fn init(&mut self) -> bool {
        if let Some(latest) = self.load_latest() {
            self.save = latest.save();
            log::info!("Loaded save version={:?}: {:?}", latest.version(), self.save);
            self.version = latest.version().wrapping_add(1);
            true
        } else {
            log::info!("No valid save was found, writing defaults");
            self.save = Save::default();
            self.persist();
            false
        }
    }

    fn cc(&self) -> u8 {
        self.save.cc
    }

    fn save_cc(&mut self, cc: u8) {
        self.update(|save| save.cc = cc);
    }

    fn channel(&self) -> u8 {
        self.save.channel
    }

    fn save_channel(&mut self, channel: u8) {
        self.update(|save| save.channel = channel);
    }

    fn curve(&self) -> u8 {
        self.save.curve
    }

    fn save_curve(&mut self, curve: u8) {
        self.update(|save| save.curve = curve);
    }

    fn invert(&self) -> bool {
        self.save.invert
    }

    fn save_invert(&mut self, invert: bool) {
        self.update(|save| save.invert = invert);
    }

    fn active_instrument(&self) -> u8 {
        self.save.instrument
    }

    fn save_active_instrument(&mut self, index: u8) {
        self.update(|save| save.instrument = index);
    }

    fn pedal_min(&self) -> u16 {
        self.save.pedal_min
    }

    fn pedal_max(&self) -> u16 {
        self.save.pedal_max
    }

    fn save_calibration(&mut self, min: u16, max: u16) {
        self.update(|save| {
            save.pedal_min = min;
            save.pedal_max = max;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testlib::MemoryFlash;

    #[test]
    fn empty_memory_storage_writes_defaults() {
        let mut storage = MemoryStorage::default();
        assert!(!storage.init());
        assert_eq!(storage.cc(), 74);
        assert_eq!(storage.channel(), 15);
        assert_eq!(storage.pedal_max(), 4095);
        assert!(storage.init());
    }

    #[test]
    fn memory_storage_counts_writes() {
        let mut storage = MemoryStorage::default();
        storage.init();
        storage.save_cc(20);
        storage.save_calibration(100, 3000);
        assert_eq!(storage.writes(), 2);
        assert_eq!(storage.cc(), 20);
        assert_eq!(storage.pedal_min(), 100);
        assert_eq!(storage.pedal_max(), 3000);
    }

    #[test]
    fn blank_flash_gets_defaults_written() {
        let mut storage = FlashStorage::with_sectors(MemoryFlash::new(4), 4);
        assert!(!storage.init());
        assert_eq!(storage.cc(), 74);

        let mut storage = FlashStorage::with_sectors(storage.release(), 4);
        assert!(storage.init());
    }

    #[test]
    fn settings_survive_reboot() {
        let mut storage = FlashStorage::with_sectors(MemoryFlash::new(4), 4);
        storage.init();
        storage.save_cc(1);
        storage.save_channel(3);
        storage.save_curve(4);
        storage.save_invert(true);
        storage.save_active_instrument(7);
        storage.save_calibration(200, 3900);

        let mut storage = FlashStorage::with_sectors(storage.release(), 4);
        assert!(storage.init());
        assert_eq!(storage.cc(), 1);
        assert_eq!(storage.channel(), 3);
        assert_eq!(storage.curve(), 4);
        assert!(storage.invert());
        assert_eq!(storage.active_instrument(), 7);
        assert_eq!(storage.pedal_min(), 200);
        assert_eq!(storage.pedal_max(), 3900);
    }

    #[test]
    fn records_rotate_over_sectors() {
        let mut storage = FlashStorage::with_sectors(MemoryFlash::new(4), 4);
        storage.init();
        for cc in 0..10 {
            storage.save_cc(cc);
        }
        let flash = storage.release();
        assert_eq!(flash.written_sectors(), 4);

        let mut storage = FlashStorage::with_sectors(flash, 4);
        storage.init();
        assert_eq!(storage.cc(), 9);
    }

    #[test]
    fn corrupted_latest_record_falls_back_to_previous_one() {
        let mut storage = FlashStorage::with_sectors(MemoryFlash::new(4), 4);
        storage.init();
        storage.save_cc(30);
        storage.save_cc(40);

        // Defaults went to sector 0, then 30 to sector 1 and 40 to sector 2.
        let mut flash = storage.release();
        flash.corrupt(sector_address(2) + 10);

        let mut storage = FlashStorage::with_sectors(flash, 4);
        assert!(storage.init());
        assert_eq!(storage.cc(), 30);
    }
}

//! Settings storage in the last erase block of the Pico's internal flash.
//!
//! Flash cannot be rewritten byte by byte, so the block is emulated as EEPROM:
//! [`Storage::begin`] copies it into RAM, reads and writes go to that copy, and
//! [`Storage::end`] erases and programs the block once if anything was written.
//!
//! ```rust,no_run
//! # #![no_std]
//! # #![no_main]
//! # use defmt_rtt as _;
//! # use panic_probe as _;
//! use word_clock::config_store::ConfigStore;
//! use word_clock::flash_storage::FlashStorage;
//! use word_clock::settings::DefaultPreset;
//!
//! # fn example(p: embassy_rp::Peripherals) {
//! let mut store = ConfigStore::new(FlashStorage::new(p.FLASH), DefaultPreset::Standard);
//! let settings = store.load();
//! # let _ = settings;
//! # }
//! ```

use embassy_rp::Peri;
use embassy_rp::flash::{Blocking, ERASE_SIZE, Flash as EmbassyFlash};
use embassy_rp::peripherals::FLASH;

use crate::config_store::Storage;
use crate::{Error, Result};

// Internal flash size for Raspberry Pi Pico 2 (4 MB).
#[cfg(feature = "pico2")]
const INTERNAL_FLASH_SIZE: usize = 4 * 1024 * 1024;

// Internal flash size for Raspberry Pi Pico 1 (2 MB).
#[cfg(not(feature = "pico2"))]
const INTERNAL_FLASH_SIZE: usize = 2 * 1024 * 1024;

const BLOCK_OFFSET: u32 = (INTERNAL_FLASH_SIZE - ERASE_SIZE) as u32;

/// One flash erase block used as settings storage.
pub struct FlashStorage {
    flash: EmbassyFlash<'static, FLASH, Blocking, INTERNAL_FLASH_SIZE>,
    sector: [u8; ERASE_SIZE],
    open: bool,
    dirty: bool,
}

impl FlashStorage {
    /// Take the flash peripheral.
    #[must_use]
    pub fn new(peripheral: Peri<'static, FLASH>) -> Self {
        Self {
            flash: EmbassyFlash::new_blocking(peripheral),
            sector: [0xFF; ERASE_SIZE],
            open: false,
            dirty: false,
        }
    }

    fn range(&self, offset: usize, len: usize) -> Result<core::ops::Range<usize>> {
        if !self.open {
            return Err(Error::StorageBracket);
        }
        let end = offset.checked_add(len).ok_or(Error::IndexOutOfBounds)?;
        if end > ERASE_SIZE {
            return Err(Error::IndexOutOfBounds);
        }
        Ok(offset..end)
    }
}

impl Storage for FlashStorage {
    fn capacity(&self) -> usize {
        ERASE_SIZE
    }

    fn begin(&mut self) -> Result<()> {
        if self.open {
            return Err(Error::StorageBracket);
        }
        self.flash
            .blocking_read(BLOCK_OFFSET, &mut self.sector)
            .map_err(Error::Flash)?;
        self.open = true;
        self.dirty = false;
        Ok(())
    }

    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<()> {
        let range = self.range(offset, buffer.len())?;
        let source = self.sector.get(range).ok_or(Error::IndexOutOfBounds)?;
        buffer.copy_from_slice(source);
        Ok(())
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<()> {
        let range = self.range(offset, data.len())?;
        let target = self.sector.get_mut(range).ok_or(Error::IndexOutOfBounds)?;
        target.copy_from_slice(data);
        self.dirty = true;
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        if !self.open {
            return Err(Error::StorageBracket);
        }
        self.open = false;
        if !self.dirty {
            return Ok(());
        }
        self.dirty = false;
        self.flash
            .blocking_erase(BLOCK_OFFSET, BLOCK_OFFSET + ERASE_SIZE as u32)
            .map_err(Error::Flash)?;
        self.flash
            .blocking_write(BLOCK_OFFSET, &self.sector)
            .map_err(Error::Flash)?;
        info!("Flash: settings block written at {}", BLOCK_OFFSET);
        Ok(())
    }
}

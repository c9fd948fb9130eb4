//! Configuration Store: the versioned settings record on non-volatile storage.
//!
//! The record is written whole on every save:
//!
//! ```text
//! [magic u8 = 0x2A][version u8][payload len u16 LE][postcard payload][crc32 LE]
//! ```
//!
//! The CRC covers every preceding byte. Anything that does not check out is
//! treated as corruption: [`ConfigStore::load`] resets to the compiled defaults and
//! persists them before returning.
//!
//! ```rust
//! use word_clock::config_store::{ConfigStore, RamStorage, RECORD_SIZE};
//! use word_clock::settings::{DefaultPreset, Settings, SettingsChange};
//!
//! # fn main() -> word_clock::Result<()> {
//! let mut store = ConfigStore::new(RamStorage::<RECORD_SIZE>::new(), DefaultPreset::Standard);
//! assert_eq!(store.load(), Settings::default()); // blank storage: defaults, now persisted
//!
//! store.apply(SettingsChange::Brightness(42))?;
//! let storage = store.into_storage();
//!
//! let mut reopened = ConfigStore::new(storage, DefaultPreset::Standard);
//! assert_eq!(reopened.load().brightness, 42);
//! # Ok(())
//! # }
//! ```

use crc32fast::Hasher;

use crate::settings::{DefaultPreset, Settings, SettingsChange};
use crate::{Error, Result};

/// Marks a settings record.
pub const MAGIC: u8 = 0x2A;
/// Schema version of [`Settings`]; bump when the record layout changes.
pub const VERSION: u8 = 25;

const HEADER_SIZE: usize = 1 + 1 + 2; // Magic + Version + PayloadLen
const CRC_SIZE: usize = 4;
const MAX_PAYLOAD_SIZE: usize = 64;

/// Bytes of storage one settings record occupies.
pub const RECORD_SIZE: usize = HEADER_SIZE + MAX_PAYLOAD_SIZE + CRC_SIZE;

/// A fixed-size byte region that survives power loss.
///
/// Every access is bracketed by [`begin`](Self::begin) and [`end`](Self::end).
/// Reads and writes outside a bracket, or a nested `begin`, fail with
/// [`Error::StorageBracket`].
pub trait Storage {
    /// Size of the region in bytes.
    fn capacity(&self) -> usize;

    /// Open the region for access.
    ///
    /// # Errors
    ///
    /// Returns an error if the region is already open or cannot be opened.
    fn begin(&mut self) -> Result<()>;

    /// Fill `buffer` from `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error outside a bracket, out of range, or on an I/O failure.
    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<()>;

    /// Write `data` at `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error outside a bracket, out of range, or on an I/O failure.
    fn write(&mut self, offset: usize, data: &[u8]) -> Result<()>;

    /// Close the region, committing writes made since `begin`.
    ///
    /// # Errors
    ///
    /// Returns an error if the region is not open or the commit fails.
    fn end(&mut self) -> Result<()>;
}

/// Run `f` inside a `begin`/`end` bracket. `end` runs even when `f` fails.
fn with_storage<S, R>(storage: &mut S, f: impl FnOnce(&mut S) -> Result<R>) -> Result<R>
where
    S: Storage + ?Sized,
{
    storage.begin()?;
    let result = f(storage);
    let ended = storage.end();
    let value = result?;
    ended?;
    Ok(value)
}

/// Storage in RAM, for host builds and tests. Starts erased (`0xFF`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RamStorage<const N: usize> {
    bytes: [u8; N],
    staged: [u8; N],
    open: bool,
}

impl<const N: usize> RamStorage<N> {
    /// Erased storage.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0xFF; N],
            staged: [0xFF; N],
            open: false,
        }
    }

    /// Committed contents.
    #[must_use]
    pub const fn bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    /// Committed contents, for simulating corruption.
    pub const fn bytes_mut(&mut self) -> &mut [u8; N] {
        &mut self.bytes
    }
}

impl<const N: usize> Default for RamStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Storage for RamStorage<N> {
    fn capacity(&self) -> usize {
        N
    }

    fn begin(&mut self) -> Result<()> {
        if self.open {
            return Err(Error::StorageBracket);
        }
        self.staged = self.bytes;
        self.open = true;
        Ok(())
    }

    fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<()> {
        if !self.open {
            return Err(Error::StorageBracket);
        }
        let end = offset.checked_add(buffer.len()).ok_or(Error::IndexOutOfBounds)?;
        let source = self.staged.get(offset..end).ok_or(Error::IndexOutOfBounds)?;
        buffer.copy_from_slice(source);
        Ok(())
    }

    fn write(&mut self, offset: usize, data: &[u8]) -> Result<()> {
        if !self.open {
            return Err(Error::StorageBracket);
        }
        let end = offset.checked_add(data.len()).ok_or(Error::IndexOutOfBounds)?;
        let target = self
            .staged
            .get_mut(offset..end)
            .ok_or(Error::IndexOutOfBounds)?;
        target.copy_from_slice(data);
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        if !self.open {
            return Err(Error::StorageBracket);
        }
        self.bytes = self.staged;
        self.open = false;
        Ok(())
    }
}

/// Owns the storage and the last committed [`Settings`].
///
/// The in-memory record only changes after the storage accepted the new record,
/// so a failed save leaves the previous committed value in place.
pub struct ConfigStore<S: Storage> {
    storage: S,
    settings: Settings,
    preset: DefaultPreset,
}

impl<S: Storage> ConfigStore<S> {
    /// Wrap `storage`. Call [`load`](Self::load) before trusting [`settings`](Self::settings).
    #[must_use]
    pub const fn new(storage: S, preset: DefaultPreset) -> Self {
        Self {
            storage,
            settings: Settings::defaults(preset),
            preset,
        }
    }

    /// Read the persisted record.
    ///
    /// A missing, stale, or damaged record is replaced by the preset defaults,
    /// which are persisted before returning. If the storage cannot be read at all
    /// the defaults are used in memory and the storage is left untouched.
    pub fn load(&mut self) -> Settings {
        let defaults = Settings::defaults(self.preset);
        match read_record(&mut self.storage) {
            Ok(settings) => {
                info!("Settings: loaded record version {}", VERSION);
                self.settings = settings;
            }
            Err(Error::StorageCorrupted) => {
                warn!("Settings: stored record invalid, restoring defaults");
                if let Err(err) = self.save(defaults) {
                    error!("Settings: persisting defaults failed: {:?}", err);
                    self.settings = defaults;
                }
            }
            Err(err) => {
                error!("Settings: storage read failed: {:?}", err);
                self.settings = defaults;
            }
        }
        self.settings
    }

    /// Persist the whole record and make it the committed value.
    ///
    /// # Errors
    ///
    /// Returns the storage or serialization error; the committed value is then unchanged.
    pub fn save(&mut self, settings: Settings) -> Result<()> {
        let record = encode_record(&settings)?;
        let capacity = self.storage.capacity();
        if capacity < RECORD_SIZE {
            return Err(Error::StorageTooSmall {
                needed: RECORD_SIZE,
                capacity,
            });
        }
        with_storage(&mut self.storage, |storage| storage.write(0, &record))?;
        self.settings = settings;
        debug!("Settings: saved");
        Ok(())
    }

    /// Apply one setter and persist the result.
    ///
    /// # Errors
    ///
    /// Same as [`save`](Self::save).
    pub fn apply(&mut self, change: SettingsChange) -> Result<Settings> {
        let next = self.settings.with(change);
        if next != self.settings {
            self.save(next)?;
        }
        Ok(self.settings)
    }

    /// Restore and persist the preset defaults.
    ///
    /// # Errors
    ///
    /// Same as [`save`](Self::save).
    pub fn reset(&mut self) -> Result<()> {
        self.save(Settings::defaults(self.preset))
    }

    /// The committed settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The default preset this store falls back to.
    #[must_use]
    pub const fn preset(&self) -> DefaultPreset {
        self.preset
    }

    /// Borrow the storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Give the storage back.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }
}

fn read_record<S: Storage>(storage: &mut S) -> Result<Settings> {
    let capacity = storage.capacity();
    if capacity < RECORD_SIZE {
        return Err(Error::StorageTooSmall {
            needed: RECORD_SIZE,
            capacity,
        });
    }
    let mut buffer = [0u8; RECORD_SIZE];
    with_storage(storage, |storage| storage.read(0, &mut buffer))?;
    decode_record(&buffer)
}

fn encode_record(settings: &Settings) -> Result<[u8; RECORD_SIZE]> {
    let mut payload_buffer = [0u8; MAX_PAYLOAD_SIZE];
    let payload_len = postcard::to_slice(settings, &mut payload_buffer)
        .map_err(|_| {
            error!(
                "Settings: serialization failed (max {} bytes)",
                MAX_PAYLOAD_SIZE
            );
            Error::FormatError
        })?
        .len();
    let payload = payload_buffer.get(..payload_len).ok_or(Error::FormatError)?;
    let len_bytes = u16::try_from(payload_len)
        .map_err(|_| Error::FormatError)?
        .to_le_bytes();

    let mut buffer = [0xFFu8; RECORD_SIZE];
    let crc_offset = HEADER_SIZE + payload_len;
    {
        let (header, rest) = buffer.split_at_mut(HEADER_SIZE);
        header.copy_from_slice(&[MAGIC, VERSION, len_bytes[0], len_bytes[1]]);
        rest.get_mut(..payload_len)
            .ok_or(Error::FormatError)?
            .copy_from_slice(payload);
    }
    let crc = compute_crc(buffer.get(..crc_offset).ok_or(Error::FormatError)?);
    buffer
        .get_mut(crc_offset..crc_offset + CRC_SIZE)
        .ok_or(Error::FormatError)?
        .copy_from_slice(&crc.to_le_bytes());
    Ok(buffer)
}

fn decode_record(buffer: &[u8; RECORD_SIZE]) -> Result<Settings> {
    let [magic, version, len_lo, len_hi, ..] = *buffer;
    if magic != MAGIC {
        info!("Settings: no record (magic {})", magic);
        return Err(Error::StorageCorrupted);
    }
    if version != VERSION {
        info!(
            "Settings: version mismatch (expected {}, found {})",
            VERSION, version
        );
        return Err(Error::StorageCorrupted);
    }

    let payload_len = usize::from(u16::from_le_bytes([len_lo, len_hi]));
    if payload_len > MAX_PAYLOAD_SIZE {
        error!("Settings: invalid payload length {}", payload_len);
        return Err(Error::StorageCorrupted);
    }

    let crc_offset = HEADER_SIZE + payload_len;
    let stored_crc = buffer
        .get(crc_offset..crc_offset + CRC_SIZE)
        .and_then(|bytes| <[u8; CRC_SIZE]>::try_from(bytes).ok())
        .map(u32::from_le_bytes)
        .ok_or(Error::StorageCorrupted)?;
    let computed_crc = compute_crc(buffer.get(..crc_offset).ok_or(Error::StorageCorrupted)?);
    if stored_crc != computed_crc {
        error!(
            "Settings: CRC mismatch (expected {}, found {})",
            computed_crc, stored_crc
        );
        return Err(Error::StorageCorrupted);
    }

    let payload = buffer
        .get(HEADER_SIZE..crc_offset)
        .ok_or(Error::StorageCorrupted)?;
    postcard::from_bytes(payload).map_err(|_| {
        error!("Settings: deserialization failed");
        Error::StorageCorrupted
    })
}

/// Compute CRC32 checksum.
fn compute_crc(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

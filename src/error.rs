use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[derive(Debug, Display, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The persisted-storage collaborator reported a read or write failure.
    #[display("Storage I/O failed")]
    StorageIo,

    /// The storage region cannot hold a full settings record.
    #[display("Storage too small: need {needed} bytes, have {capacity}")]
    StorageTooSmall {
        /// Bytes required for the record.
        needed: usize,
        /// Bytes the storage region offers.
        capacity: usize,
    },

    /// A storage access happened outside a `begin`/`end` bracket, or a bracket was nested.
    #[display("Storage accessed outside of a begin/end bracket")]
    StorageBracket,

    /// The stored bytes do not form a valid settings record.
    #[display("Storage corrupted")]
    StorageCorrupted,

    /// Serialization into the record buffer failed.
    #[display("Format error")]
    FormatError,

    /// A new target frame was offered while a transition was still running.
    #[display("A transition is still in progress")]
    TransitionInProgress,

    /// Text does not fit the feed buffer.
    #[display("Feed text is too long")]
    FeedTooLong,

    /// The LED strip driver refused a frame.
    #[display("LED strip write failed")]
    StripWrite,

    /// Index out of bounds.
    #[display("Index out of bounds")]
    IndexOutOfBounds,

    /// The on-chip flash driver failed.
    #[cfg(any(feature = "pico1", feature = "pico2"))]
    #[display("Flash operation failed: {_0:?}")]
    Flash(#[error(not(source))] embassy_rp::flash::Error),
}

use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[derive(Debug, Display, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // `#[error(not(source))]` tells `derive_more` a lone tuple field is not an error source.
    // `embassy_executor::SpawnError` does not implement `core::error::Error`.
    #[cfg(feature = "pico1")]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    /// The entry at this index is not four whitespace-separated fields with numeric times.
    #[display("Melody entry {_0} is not `start note duration volume`")]
    MelodySyntax(#[error(not(source))] usize),

    #[display("Melody entry {_0} names an unknown note")]
    UnknownNote(#[error(not(source))] usize),

    #[display("Melody has more than {_0} notes")]
    MelodyTooLong(#[error(not(source))] usize),
}

#[cfg(feature = "pico1")]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}

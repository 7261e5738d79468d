//!A mod for the driver error type.
use std::fmt::{Debug, Formatter};

///Error type for all driver operations, generic over the error type of
///the underlying bus transport.
///
///A transport failure aborts the operation at the failing write and is
///never retried internally. Invalid arguments are detected before any
///bus traffic, so no partial write sequence is ever emitted for them.
pub enum Pca9685Error<E> {
    ///The bus open or write failed. Recovery (retry, reset,
    ///re-initialize) is the caller's concern.
    Transport(E),
    ///An input was outside its documented domain.
    InvalidArgument(String),
}

impl<E> Pca9685Error<E> {
    pub fn invalid_argument(message: String) -> Self {
        Pca9685Error::InvalidArgument(message)
    }
}

impl<E: Debug> Debug for Pca9685Error<E> {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => {
                fmt.write_fmt(format_args!("Pca9685Error::Transport - Cause: {:?}", err))
            }
            Self::InvalidArgument(message) => {
                fmt.write_fmt(format_args!("Pca9685Error::InvalidArgument: {}", message))
            }
        }
    }
}

//! Feedback capture errors and the legacy integer status contract.

use thiserror_no_std::Error;

/// Why [`start`](crate::start) failed.
///
/// Every variant is terminal for the call that returned it: the setup has
/// already been unwound and nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FeedbackError {
    /// No device context, or the capture stream refused to start.
    #[error("invalid argument")]
    InvalidArgument,
    /// The usecase record could not be registered.
    #[error("out of memory")]
    OutOfMemory,
    /// The platform has no PCM device for feedback capture.
    #[error("no such device")]
    NoSuchDevice,
    /// The capture stream opened but is not ready.
    #[error("i/o error")]
    Io,
}

impl FeedbackError {
    /// Negative errno the HAL reports for this error.
    pub const fn errno(self) -> i32 {
        match self {
            Self::InvalidArgument => libc::EINVAL.wrapping_neg(),
            Self::OutOfMemory => libc::ENOMEM.wrapping_neg(),
            Self::NoSuchDevice => libc::ENODEV.wrapping_neg(),
            Self::Io => libc::EIO.wrapping_neg(),
        }
    }
}

/// Collapse a result to the HAL status code: 0 on success, negative errno otherwise.
pub fn status(result: Result<(), FeedbackError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => err.errno(),
    }
}

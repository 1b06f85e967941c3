//! PCM stream abstraction
//!
//! Mirrors the shape of a tinyalsa-style driver: open a stream on
//! `(card, device)` with a fixed [`PcmConfig`], check it came up, arm it,
//! close it. Open returns an owned handle; closing consumes it, so a closed
//! stream cannot be used again.

use core::fmt;

use thiserror_no_std::Error;

// ── Identifiers ──────────────────────────────────────────────────────────────

/// Sound card index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct CardId(u32);

impl CardId {
    /// Wrap a card index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Raw card index.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card{}", self.0)
    }
}

/// PCM device index on a card.
///
/// Platform lookups report "no device" with a negative integer; this type can
/// only hold a valid, non-negative index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct PcmDeviceId(u32);

impl PcmDeviceId {
    /// Wrap a device index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Convert a raw platform lookup result. Negative means "no device".
    #[must_use]
    pub fn from_raw(raw: i32) -> Option<Self> {
        u32::try_from(raw).ok().map(Self)
    }

    /// Raw device index.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PcmDeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pcm{}", self.0)
    }
}

/// Stream direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PcmDirection {
    /// Playback.
    Out,
    /// Capture.
    In,
}

// ── Configuration ────────────────────────────────────────────────────────────

/// Sample format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PcmFormat {
    /// Signed 16-bit little-endian.
    S16Le,
    /// Signed 24-bit in a 32-bit little-endian container.
    S24Le,
    /// Packed signed 24-bit little-endian.
    S24Le3,
    /// Signed 32-bit little-endian.
    S32Le,
}

impl PcmFormat {
    /// Bytes one sample of one channel occupies in memory.
    pub const fn bytes_per_sample(self) -> u32 {
        match self {
            Self::S16Le => 2,
            Self::S24Le3 => 3,
            Self::S24Le | Self::S32Le => 4,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Channel count outside 1–8.
    #[error("unsupported channel count {0}")]
    Channels(u32),
    /// Sample rate outside 8 kHz–768 kHz.
    #[error("unsupported sample rate {0} Hz")]
    SampleRate(u32),
    /// Zero-length period.
    #[error("period size must be non-zero")]
    PeriodSize,
    /// Fewer than two periods; the ring cannot double-buffer.
    #[error("need at least 2 periods, got {0}")]
    PeriodCount(u32),
    /// `period_size * period_count` does not fit a `u32`.
    #[error("buffer size overflows")]
    BufferOverflow,
}

/// PCM stream configuration.
///
/// Thresholds are in frames. A `start_threshold` of 0 leaves the driver's
/// default in place; a `stop_threshold` of [`PcmConfig::STOP_THRESHOLD_NEVER`]
/// keeps the stream running however full the buffer gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcmConfig {
    /// Interleaved channel count.
    pub channels: u32,
    /// Sample rate in Hz.
    pub rate: u32,
    /// Frames per period.
    pub period_size: u32,
    /// Periods in the ring buffer.
    pub period_count: u32,
    /// Sample format.
    pub format: PcmFormat,
    /// Frames queued before the stream auto-starts.
    pub start_threshold: u32,
    /// Fill level at which the stream stops.
    pub stop_threshold: u32,
    /// Fill level below which silence is inserted.
    pub silence_threshold: u32,
}

impl PcmConfig {
    /// Stop threshold that disables stop-on-fill (the kernel's `INT_MAX` boundary).
    pub const STOP_THRESHOLD_NEVER: u32 = i32::MAX.unsigned_abs();

    /// Minimum supported sample rate.
    pub const MIN_RATE_HZ: u32 = 8_000;

    /// Maximum supported sample rate.
    pub const MAX_RATE_HZ: u32 = 768_000;

    /// Check the configuration is something a driver can be asked to open.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=8).contains(&self.channels) {
            return Err(ConfigError::Channels(self.channels));
        }
        if !(Self::MIN_RATE_HZ..=Self::MAX_RATE_HZ).contains(&self.rate) {
            return Err(ConfigError::SampleRate(self.rate));
        }
        if self.period_size == 0 {
            return Err(ConfigError::PeriodSize);
        }
        if self.period_count < 2 {
            return Err(ConfigError::PeriodCount(self.period_count));
        }
        self.buffer_frames().ok_or(ConfigError::BufferOverflow)?;
        Ok(())
    }

    /// Ring buffer length in frames, `None` on overflow.
    pub fn buffer_frames(&self) -> Option<u32> {
        self.period_size.checked_mul(self.period_count)
    }

    /// Bytes per interleaved frame, `None` on overflow.
    pub fn frame_bytes(&self) -> Option<u32> {
        self.format.bytes_per_sample().checked_mul(self.channels)
    }

    /// Bytes per period, `None` on overflow.
    pub fn period_bytes(&self) -> Option<u32> {
        self.frame_bytes()?.checked_mul(self.period_size)
    }
}

// ── Driver ───────────────────────────────────────────────────────────────────

/// PCM driver trait.
///
/// Calls are synchronous and may block in the kernel.
pub trait PcmDriver {
    /// Owned handle to an open stream.
    type Handle;

    /// Error type for [`start`](Self::start).
    type Error: core::fmt::Debug;

    /// Open a stream.
    ///
    /// Returns `None` when the driver could not even allocate a handle. A
    /// returned handle may still have failed to come up; check
    /// [`is_ready`](Self::is_ready).
    fn open(
        &mut self,
        card: CardId,
        device: PcmDeviceId,
        direction: PcmDirection,
        config: &PcmConfig,
    ) -> Option<Self::Handle>;

    /// `true` if the handle is usable.
    fn is_ready(&self, handle: &Self::Handle) -> bool;

    /// Last error the driver recorded on `handle`.
    fn error_message<'a>(&'a self, handle: &'a Self::Handle) -> &'a str;

    /// Arm the stream.
    fn start(&mut self, handle: &mut Self::Handle) -> Result<(), Self::Error>;

    /// Close the stream and release the handle.
    fn close(&mut self, handle: Self::Handle);
}

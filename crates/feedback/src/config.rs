//! Feedback capture configuration
//!
//! The smart amplifier streams its voltage and current sense data back over a
//! dedicated capture front end. The format is fixed by the amplifier firmware:
//! 16-bit stereo (one channel per sense line) at 48 kHz.

use platform::{PcmConfig, PcmFormat, SndDevice, UsecaseId, UsecaseType};

/// Usecase the feedback capture registers under.
pub const FEEDBACK_USECASE: UsecaseId = UsecaseId::SpkrCalibTx;

/// Stream type of [`FEEDBACK_USECASE`].
pub const FEEDBACK_USECASE_TYPE: UsecaseType = UsecaseType::PcmCapture;

/// Sound device enabled while feedback capture runs.
pub const FEEDBACK_SND_DEVICE: SndDevice = SndDevice::InCaptureViFeedback;

/// Capture stream configuration.
///
/// - 256-frame periods, 4 periods deep
/// - start threshold 0: driver default
/// - stop threshold [`PcmConfig::STOP_THRESHOLD_NEVER`]: nobody reads the
///   buffer from the host, so it must not stop when it fills
pub const FEEDBACK_PCM_CONFIG: PcmConfig = PcmConfig {
    channels: 2,
    rate: 48_000,
    period_size: 256,
    period_count: 4,
    format: PcmFormat::S16Le,
    start_threshold: 0,
    stop_threshold: PcmConfig::STOP_THRESHOLD_NEVER,
    silence_threshold: 0,
};

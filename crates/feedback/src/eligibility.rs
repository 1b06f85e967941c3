//! Which output devices need VI feedback.
//!
//! Only paths that drive the protected loudspeaker do. Combined devices
//! (speaker plus headset, speaker plus line) count because the speaker is
//! still driven.

use platform::SndDevice;

/// Output devices that drive the protected loudspeaker.
pub const FEEDBACK_ELIGIBLE_DEVICES: [SndDevice; 10] = [
    SndDevice::OutSpeaker,
    SndDevice::OutSpeakerProtected,
    SndDevice::OutSpeakerReverse,
    SndDevice::OutSpeakerVbat,
    SndDevice::OutSpeakerAndHeadphones,
    SndDevice::OutSpeakerAndLine,
    SndDevice::OutSpeakerAndAncHeadset,
    SndDevice::OutSpeakerAndUsbHeadset,
    SndDevice::OutVoiceSpeaker,
    SndDevice::OutVoiceSpeaker2,
];

/// `true` if playing to `device` needs feedback capture running.
pub fn is_feedback_eligible(device: SndDevice) -> bool {
    FEEDBACK_ELIGIBLE_DEVICES.contains(&device)
}

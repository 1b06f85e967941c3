//! Sound device catalogue.
//!
//! A sound device is a logical endpoint the routing layer knows how to enable:
//! a speaker, a headset, a microphone, or a codec-internal capture path such as
//! the VI feedback loop used by speaker protection.
//!
//! Each device carries a stable backend name. The routing layer looks mixer
//! paths up by that name, so renaming one is a breaking change.

use core::fmt;

/// Logical sound device, output or input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SndDevice {
    /// No device selected.
    #[default]
    None,

    // ── Output ──────────────────────────────────────────────────────────────
    /// Earpiece receiver.
    OutHandset,
    /// Loudspeaker.
    OutSpeaker,
    /// Loudspeaker with left/right swapped (device held upside down).
    OutSpeakerReverse,
    /// Loudspeaker behind the speaker-protection module.
    OutSpeakerProtected,
    /// Loudspeaker with battery-voltage-aware gain limiting.
    OutSpeakerVbat,
    /// Wired headphones.
    OutHeadphones,
    /// Line out.
    OutLine,
    /// ANC headset.
    OutAncHeadset,
    /// USB headset.
    OutUsbHeadset,
    /// Loudspeaker and wired headphones together (ringtone while plugged in).
    OutSpeakerAndHeadphones,
    /// Loudspeaker and line out together.
    OutSpeakerAndLine,
    /// Loudspeaker and ANC headset together.
    OutSpeakerAndAncHeadset,
    /// Loudspeaker and USB headset together.
    OutSpeakerAndUsbHeadset,
    /// Loudspeaker during a voice call.
    OutVoiceSpeaker,
    /// Second loudspeaker during a voice call.
    OutVoiceSpeaker2,
    /// Earpiece during a voice call.
    OutVoiceHandset,
    /// Wired headphones during a voice call.
    OutVoiceHeadphones,
    /// Bluetooth SCO headset.
    OutBtSco,
    /// HDMI.
    OutHdmi,

    // ── Input ───────────────────────────────────────────────────────────────
    /// Primary handset microphone.
    InHandsetMic,
    /// Speakerphone microphone.
    InSpeakerMic,
    /// Wired headset microphone.
    InHeadsetMic,
    /// Bluetooth SCO microphone.
    InBtScoMic,
    /// Voltage/current feedback from a smart amplifier.
    InCaptureViFeedback,
}

impl SndDevice {
    /// Every device in declaration order.
    pub const ALL: [SndDevice; 25] = [
        Self::None,
        Self::OutHandset,
        Self::OutSpeaker,
        Self::OutSpeakerReverse,
        Self::OutSpeakerProtected,
        Self::OutSpeakerVbat,
        Self::OutHeadphones,
        Self::OutLine,
        Self::OutAncHeadset,
        Self::OutUsbHeadset,
        Self::OutSpeakerAndHeadphones,
        Self::OutSpeakerAndLine,
        Self::OutSpeakerAndAncHeadset,
        Self::OutSpeakerAndUsbHeadset,
        Self::OutVoiceSpeaker,
        Self::OutVoiceSpeaker2,
        Self::OutVoiceHandset,
        Self::OutVoiceHeadphones,
        Self::OutBtSco,
        Self::OutHdmi,
        Self::InHandsetMic,
        Self::InSpeakerMic,
        Self::InHeadsetMic,
        Self::InBtScoMic,
        Self::InCaptureViFeedback,
    ];

    /// Backend name used to look up mixer paths.
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::OutHandset => "handset",
            Self::OutSpeaker => "speaker",
            Self::OutSpeakerReverse => "speaker-reverse",
            Self::OutSpeakerProtected => "speaker-protected",
            Self::OutSpeakerVbat => "speaker-vbat",
            Self::OutHeadphones => "headphones",
            Self::OutLine => "line",
            Self::OutAncHeadset => "anc-headphones",
            Self::OutUsbHeadset => "usb-headphones",
            Self::OutSpeakerAndHeadphones => "speaker-and-headphones",
            Self::OutSpeakerAndLine => "speaker-and-line",
            Self::OutSpeakerAndAncHeadset => "speaker-and-anc-headphones",
            Self::OutSpeakerAndUsbHeadset => "speaker-and-usb-headphones",
            Self::OutVoiceSpeaker => "voice-speaker",
            Self::OutVoiceSpeaker2 => "voice-speaker-2",
            Self::OutVoiceHandset => "voice-handset",
            Self::OutVoiceHeadphones => "voice-headphones",
            Self::OutBtSco => "bt-sco-headset",
            Self::OutHdmi => "hdmi",
            Self::InHandsetMic => "handset-mic",
            Self::InSpeakerMic => "speaker-mic",
            Self::InHeadsetMic => "headset-mic",
            Self::InBtScoMic => "bt-sco-mic",
            Self::InCaptureViFeedback => "vi-feedback",
        }
    }

    /// `true` for playback endpoints.
    pub const fn is_output(self) -> bool {
        matches!(
            self,
            Self::OutHandset
                | Self::OutSpeaker
                | Self::OutSpeakerReverse
                | Self::OutSpeakerProtected
                | Self::OutSpeakerVbat
                | Self::OutHeadphones
                | Self::OutLine
                | Self::OutAncHeadset
                | Self::OutUsbHeadset
                | Self::OutSpeakerAndHeadphones
                | Self::OutSpeakerAndLine
                | Self::OutSpeakerAndAncHeadset
                | Self::OutSpeakerAndUsbHeadset
                | Self::OutVoiceSpeaker
                | Self::OutVoiceSpeaker2
                | Self::OutVoiceHandset
                | Self::OutVoiceHeadphones
                | Self::OutBtSco
                | Self::OutHdmi
        )
    }

    /// `true` for capture endpoints.
    pub const fn is_input(self) -> bool {
        matches!(
            self,
            Self::InHandsetMic
                | Self::InSpeakerMic
                | Self::InHeadsetMic
                | Self::InBtScoMic
                | Self::InCaptureViFeedback
        )
    }
}

impl fmt::Display for SndDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

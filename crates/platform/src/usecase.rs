//! Usecases and the usecase registry.
//!
//! A usecase binds a logical audio use (deep-buffer playback, a voice call,
//! speaker calibration capture, ...) to the sound devices and route it holds.
//! The HAL keeps every active usecase in one insertion-ordered registry; device
//! selection elsewhere walks that order, so appends always go to the tail.

use core::fmt;

use thiserror_no_std::Error;

use crate::snd_device::SndDevice;

/// Logical audio usecase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UsecaseId {
    /// Primary deep-buffer playback.
    DeepBufferPlayback,
    /// Low-latency playback (UI sounds, games).
    LowLatencyPlayback,
    /// Compressed offload playback.
    CompressOffloadPlayback,
    /// Regular microphone recording.
    AudioRecord,
    /// Circuit-switched voice call.
    VoiceCall,
    /// Speaker calibration playback (excitation tone).
    SpkrCalibRx,
    /// Speaker calibration capture (VI feedback).
    SpkrCalibTx,
}

impl UsecaseId {
    /// Backend name used in mixer paths and logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::DeepBufferPlayback => "deep-buffer-playback",
            Self::LowLatencyPlayback => "low-latency-playback",
            Self::CompressOffloadPlayback => "compress-offload-playback",
            Self::AudioRecord => "audio-record",
            Self::VoiceCall => "voice-call",
            Self::SpkrCalibRx => "spkr-rx-calib",
            Self::SpkrCalibTx => "spkr-vi-record",
        }
    }
}

impl fmt::Display for UsecaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stream type a usecase runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UsecaseType {
    /// PCM playback stream.
    PcmPlayback,
    /// PCM capture stream.
    PcmCapture,
    /// Voice call (modem-driven, no host PCM).
    VoiceCall,
}

/// A registered usecase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UsecaseRecord {
    /// Which usecase this is.
    pub id: UsecaseId,
    /// Stream type.
    pub kind: UsecaseType,
    /// Output device held by the usecase, [`SndDevice::None`] if none.
    pub out_snd_device: SndDevice,
    /// Input device held by the usecase, [`SndDevice::None`] if none.
    pub in_snd_device: SndDevice,
}

impl UsecaseRecord {
    /// Capture usecase holding `in_device` and no output device.
    #[must_use]
    pub const fn capture(id: UsecaseId, in_device: SndDevice) -> Self {
        Self {
            id,
            kind: UsecaseType::PcmCapture,
            out_snd_device: SndDevice::None,
            in_snd_device: in_device,
        }
    }

    /// Playback usecase holding `out_device` and no input device.
    #[must_use]
    pub const fn playback(id: UsecaseId, out_device: SndDevice) -> Self {
        Self {
            id,
            kind: UsecaseType::PcmPlayback,
            out_snd_device: out_device,
            in_snd_device: SndDevice::None,
        }
    }
}

/// Registry errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// No room for another record.
    #[error("usecase registry full ({capacity} records)")]
    Full {
        /// Registry capacity.
        capacity: usize,
    },
}

/// Insertion-ordered collection of active usecases.
pub trait UsecaseRegistry {
    /// Append `record` at the tail.
    ///
    /// On error nothing was inserted.
    fn append(&mut self, record: UsecaseRecord) -> Result<(), RegistryError>;

    /// Remove the most recently appended record with `id` and return it.
    fn remove(&mut self, id: UsecaseId) -> Option<UsecaseRecord>;

    /// Remove the first record equal to `record` and return it.
    ///
    /// Pairs with [`find`](Self::find): the record found is the record removed.
    fn remove_record(&mut self, record: &UsecaseRecord) -> Option<UsecaseRecord>;

    /// First record with `id`, in insertion order.
    fn find(&self, id: UsecaseId) -> Option<&UsecaseRecord>;

    /// Number of registered records.
    fn len(&self) -> usize;

    /// `true` when nothing is registered.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fixed-capacity [`UsecaseRegistry`] backed by a `heapless::Vec`.
#[derive(Debug, Clone, Default)]
pub struct UsecaseList<const N: usize> {
    records: heapless::Vec<UsecaseRecord, N>,
}

impl<const N: usize> UsecaseList<N> {
    /// Empty list.
    pub const fn new() -> Self {
        Self {
            records: heapless::Vec::new(),
        }
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &UsecaseRecord> {
        self.records.iter()
    }

    /// Number of records with `id`.
    pub fn count(&self, id: UsecaseId) -> usize {
        self.records.iter().filter(|r| r.id == id).count()
    }
}

impl<const N: usize> UsecaseRegistry for UsecaseList<N> {
    fn append(&mut self, record: UsecaseRecord) -> Result<(), RegistryError> {
        self.records
            .push(record)
            .map_err(|_| RegistryError::Full { capacity: N })
    }

    fn remove(&mut self, id: UsecaseId) -> Option<UsecaseRecord> {
        let index = self.records.iter().rposition(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    fn remove_record(&mut self, record: &UsecaseRecord) -> Option<UsecaseRecord> {
        let index = self.records.iter().position(|r| r == record)?;
        Some(self.records.remove(index))
    }

    fn find(&self, id: UsecaseId) -> Option<&UsecaseRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

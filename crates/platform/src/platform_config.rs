//! Platform configuration: usecase → PCM device lookup.
//!
//! Every usecase runs on a front-end PCM device whose index differs between
//! boards. The lookup reports the index for the requested stream direction,
//! or [`NO_PCM_DEVICE`] when the board has no such front end.

use crate::usecase::{RegistryError, UsecaseId, UsecaseType};

/// Lookup result meaning "this usecase has no PCM device in that direction".
pub const NO_PCM_DEVICE: i32 = -1;

/// Platform lookups.
pub trait PlatformConfig {
    /// PCM device index for `usecase` running as `kind`. Negative when absent.
    ///
    /// [`UsecaseType::PcmPlayback`] selects the playback index; every other
    /// type selects the capture index.
    fn pcm_device_id(&self, usecase: UsecaseId, kind: UsecaseType) -> i32;
}

/// Playback and capture indices of one usecase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcmDeviceIds {
    /// Playback front end, negative if none.
    pub playback: i32,
    /// Capture front end, negative if none.
    pub capture: i32,
}

impl PcmDeviceIds {
    /// Capture-only usecase.
    pub const fn capture_only(capture: i32) -> Self {
        Self {
            playback: NO_PCM_DEVICE,
            capture,
        }
    }

    /// Playback-only usecase.
    pub const fn playback_only(playback: i32) -> Self {
        Self {
            playback,
            capture: NO_PCM_DEVICE,
        }
    }
}

/// Static per-board lookup table.
///
/// Usecases that were never inserted resolve to [`NO_PCM_DEVICE`].
#[derive(Debug, Clone, Default)]
pub struct PcmDeviceTable<const N: usize> {
    entries: heapless::Vec<(UsecaseId, PcmDeviceIds), N>,
}

impl<const N: usize> PcmDeviceTable<N> {
    /// Empty table.
    pub const fn new() -> Self {
        Self {
            entries: heapless::Vec::new(),
        }
    }

    /// Set the indices for `usecase`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// [`RegistryError::Full`] if the table has no room for a new usecase.
    pub fn insert(&mut self, usecase: UsecaseId, ids: PcmDeviceIds) -> Result<(), RegistryError> {
        if let Some(slot) = self.entries.iter_mut().find(|(u, _)| *u == usecase) {
            slot.1 = ids;
            return Ok(());
        }
        self.entries
            .push((usecase, ids))
            .map_err(|_| RegistryError::Full { capacity: N })
    }

    /// Builder-style [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// See [`insert`](Self::insert).
    pub fn with(mut self, usecase: UsecaseId, ids: PcmDeviceIds) -> Result<Self, RegistryError> {
        self.insert(usecase, ids)?;
        Ok(self)
    }

    /// Entry for `usecase`.
    pub fn get(&self, usecase: UsecaseId) -> Option<PcmDeviceIds> {
        self.entries
            .iter()
            .find(|(u, _)| *u == usecase)
            .map(|(_, ids)| *ids)
    }
}

impl<const N: usize> PlatformConfig for PcmDeviceTable<N> {
    fn pcm_device_id(&self, usecase: UsecaseId, kind: UsecaseType) -> i32 {
        match (self.get(usecase), kind) {
            (None, _) => NO_PCM_DEVICE,
            (Some(ids), UsecaseType::PcmPlayback) => ids.playback,
            (Some(ids), _) => ids.capture,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unknown_usecase_has_no_device() {
        let table = PcmDeviceTable::<2>::new();
        assert_eq!(
            table.pcm_device_id(UsecaseId::SpkrCalibTx, UsecaseType::PcmCapture),
            NO_PCM_DEVICE
        );
    }

    #[test]
    fn capture_lookup_uses_capture_column() {
        let table = PcmDeviceTable::<2>::new()
            .with(UsecaseId::SpkrCalibTx, PcmDeviceIds::capture_only(33))
            .unwrap();
        assert_eq!(
            table.pcm_device_id(UsecaseId::SpkrCalibTx, UsecaseType::PcmCapture),
            33
        );
        assert_eq!(
            table.pcm_device_id(UsecaseId::SpkrCalibTx, UsecaseType::PcmPlayback),
            NO_PCM_DEVICE
        );
    }

    #[test]
    fn voice_call_reads_capture_column() {
        let table = PcmDeviceTable::<1>::new()
            .with(
                UsecaseId::VoiceCall,
                PcmDeviceIds {
                    playback: 2,
                    capture: 3,
                },
            )
            .unwrap();
        assert_eq!(
            table.pcm_device_id(UsecaseId::VoiceCall, UsecaseType::VoiceCall),
            3
        );
    }

    #[test]
    fn insert_replaces_existing_entry() {
        let mut table = PcmDeviceTable::<1>::new();
        table
            .insert(UsecaseId::SpkrCalibRx, PcmDeviceIds::playback_only(5))
            .unwrap();
        table
            .insert(UsecaseId::SpkrCalibRx, PcmDeviceIds::playback_only(6))
            .unwrap();
        assert_eq!(
            table.get(UsecaseId::SpkrCalibRx),
            Some(PcmDeviceIds::playback_only(6))
        );
    }

    #[test]
    fn full_table_rejects_new_usecase() {
        let mut table = PcmDeviceTable::<1>::new();
        table
            .insert(UsecaseId::AudioRecord, PcmDeviceIds::capture_only(0))
            .unwrap();
        assert_eq!(
            table.insert(UsecaseId::SpkrCalibTx, PcmDeviceIds::capture_only(1)),
            Err(RegistryError::Full { capacity: 1 })
        );
    }
}

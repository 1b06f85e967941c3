//! Audio routing abstraction

use crate::snd_device::SndDevice;
use crate::usecase::UsecaseRecord;

/// Routing layer: sound device power and mixer paths.
///
/// Enabling a device powers up its codec path; enabling a route connects a
/// usecase's front end to the devices it holds.
pub trait RouteManager {
    /// Error type
    type Error: core::fmt::Debug;

    /// Enable a sound device.
    fn enable_snd_device(&mut self, device: SndDevice) -> Result<(), Self::Error>;

    /// Disable a sound device.
    fn disable_snd_device(&mut self, device: SndDevice) -> Result<(), Self::Error>;

    /// Apply the mixer path for `usecase`.
    fn enable_audio_route(&mut self, usecase: &UsecaseRecord) -> Result<(), Self::Error>;

    /// Reset the mixer path for `usecase`.
    fn disable_audio_route(&mut self, usecase: &UsecaseRecord) -> Result<(), Self::Error>;
}

//! Feedback capture lifecycle.
//!
//! ```text
//!              start(eligible) ok
//!   Inactive ──────────────────────▶ Active ──┐ start(any): no-op
//!      ▲  │                            │  ◀──┘
//!      │  └─ start fails, unwound      │
//!      └───────────────────────────────┘
//!              stop(eligible)
//! ```
//!
//! Devices that are not feedback-eligible never cause a transition and never
//! reach a collaborator.
//!
//! Bring-up is recorded step by step in a `Setup` ledger. Any failure after
//! the usecase is registered unwinds the ledger in reverse order before the
//! error is returned, so a failed `start` leaves no record, no enabled device
//! and no open stream behind.

use platform::{
    PcmDeviceId, PcmDirection, PcmDriver, PlatformConfig, RouteManager, SndDevice, UsecaseRecord,
    UsecaseRegistry,
};
use tracing::{debug, error, info, warn};

use crate::config::{
    FEEDBACK_PCM_CONFIG, FEEDBACK_SND_DEVICE, FEEDBACK_USECASE, FEEDBACK_USECASE_TYPE,
};
use crate::device::AudioDevice;
use crate::eligibility::is_feedback_eligible;
use crate::error::FeedbackError;

/// Resources acquired so far during bring-up.
struct Setup<H> {
    record: Option<UsecaseRecord>,
    device_enabled: bool,
    handle: Option<H>,
}

impl<H> Setup<H> {
    const fn new() -> Self {
        Self {
            record: None,
            device_enabled: false,
            handle: None,
        }
    }

    /// Release everything acquired, newest first.
    fn unwind<U, R, P, D>(self, adev: &mut AudioDevice<U, R, P, D>)
    where
        U: UsecaseRegistry,
        R: RouteManager,
        P: PlatformConfig,
        D: PcmDriver<Handle = H>,
    {
        if let Some(handle) = self.handle {
            adev.pcm.close(handle);
        }
        adev.feedback = None;

        if self.device_enabled {
            if let Err(err) = adev.routes.disable_snd_device(FEEDBACK_SND_DEVICE) {
                warn!(?err, device = %FEEDBACK_SND_DEVICE, "disable sound device failed during unwind");
            }
        }

        if let Some(record) = self.record {
            if adev.usecases.remove(record.id).is_none() {
                warn!(usecase = %record.id, "usecase vanished from registry during unwind");
            }
            if let Err(err) = adev.routes.disable_audio_route(&record) {
                warn!(?err, usecase = %record.id, "disable audio route failed during unwind");
            }
        }
    }
}

/// Start VI feedback capture if `device` drives the protected speaker.
///
/// Returns `Ok(())` without touching anything when `device` is not eligible
/// or capture is already running.
///
/// # Errors
///
/// - [`FeedbackError::InvalidArgument`] — `adev` is `None`, no stream handle
///   could be allocated, or the stream failed to start
/// - [`FeedbackError::OutOfMemory`] — the usecase registry is full
/// - [`FeedbackError::NoSuchDevice`] — the platform has no capture front end
/// - [`FeedbackError::Io`] — the stream opened but is not ready
pub fn start<U, R, P, D>(
    adev: Option<&mut AudioDevice<U, R, P, D>>,
    device: SndDevice,
) -> Result<(), FeedbackError>
where
    U: UsecaseRegistry,
    R: RouteManager,
    P: PlatformConfig,
    D: PcmDriver,
{
    if !is_feedback_eligible(device) {
        return Ok(());
    }

    let Some(adev) = adev else {
        error!(%device, "feedback start: invalid params");
        return Err(FeedbackError::InvalidArgument);
    };

    if adev.feedback.is_some() {
        debug!(%device, "feedback capture already running");
        return Ok(());
    }

    let mut setup = Setup::new();
    match bring_up(adev, &mut setup) {
        Ok(()) => {
            adev.feedback = setup.handle;
            info!(%device, card = %adev.snd_card, "feedback capture started");
            Ok(())
        }
        Err(err) => {
            setup.unwind(adev);
            Err(err)
        }
    }
}

fn bring_up<U, R, P, D>(
    adev: &mut AudioDevice<U, R, P, D>,
    setup: &mut Setup<D::Handle>,
) -> Result<(), FeedbackError>
where
    U: UsecaseRegistry,
    R: RouteManager,
    P: PlatformConfig,
    D: PcmDriver,
{
    let record = UsecaseRecord::capture(FEEDBACK_USECASE, FEEDBACK_SND_DEVICE);
    adev.usecases.append(record).map_err(|err| {
        error!(%err, usecase = %record.id, "cannot register feedback usecase");
        FeedbackError::OutOfMemory
    })?;
    setup.record = Some(record);

    // Routing failures are logged only; unwind still disables device and route.
    if let Err(err) = adev.routes.enable_snd_device(FEEDBACK_SND_DEVICE) {
        warn!(?err, device = %FEEDBACK_SND_DEVICE, "enable sound device failed");
    }
    setup.device_enabled = true;
    if let Err(err) = adev.routes.enable_audio_route(&record) {
        warn!(?err, usecase = %record.id, "enable audio route failed");
    }

    let raw = adev
        .platform
        .pcm_device_id(FEEDBACK_USECASE, FEEDBACK_USECASE_TYPE);
    debug!(pcm_device = raw, "feedback capture device resolved");
    let Some(device_id) = PcmDeviceId::from_raw(raw) else {
        error!(usecase = %FEEDBACK_USECASE, pcm_device = raw, "invalid pcm device for usecase");
        return Err(FeedbackError::NoSuchDevice);
    };

    let Some(handle) = adev.pcm.open(
        adev.snd_card,
        device_id,
        PcmDirection::In,
        &FEEDBACK_PCM_CONFIG,
    ) else {
        error!(card = %adev.snd_card, device = %device_id, "pcm open returned no handle");
        return Err(FeedbackError::InvalidArgument);
    };
    let handle = setup.handle.insert(handle);

    if !adev.pcm.is_ready(handle) {
        error!(reason = adev.pcm.error_message(handle), "feedback capture stream not ready");
        return Err(FeedbackError::Io);
    }

    if let Err(err) = adev.pcm.start(handle) {
        error!(?err, "pcm start for feedback capture failed");
        return Err(FeedbackError::InvalidArgument);
    }

    Ok(())
}

/// Stop VI feedback capture if `device` drives the protected speaker.
///
/// Teardown always runs to completion. The stream slot and the registry are
/// cleaned independently, so a stream without a record (or a record without
/// a stream) is still cleaned up. Collaborator errors are logged, not returned.
pub fn stop<U, R, P, D>(adev: Option<&mut AudioDevice<U, R, P, D>>, device: SndDevice)
where
    U: UsecaseRegistry,
    R: RouteManager,
    P: PlatformConfig,
    D: PcmDriver,
{
    if !is_feedback_eligible(device) {
        return;
    }

    let Some(adev) = adev else {
        error!(%device, "feedback stop: invalid params");
        return;
    };

    let record = adev.usecases.find(FEEDBACK_USECASE).copied();

    if let Some(handle) = adev.feedback.take() {
        adev.pcm.close(handle);
        info!(%device, "feedback capture stopped");
    }

    if let Err(err) = adev.routes.disable_snd_device(FEEDBACK_SND_DEVICE) {
        warn!(?err, device = %FEEDBACK_SND_DEVICE, "disable sound device failed");
    }

    if let Some(record) = record {
        if adev.usecases.remove_record(&record).is_none() {
            warn!(usecase = %record.id, "usecase vanished from registry during stop");
        }
        if let Err(err) = adev.routes.disable_audio_route(&record) {
            warn!(?err, usecase = %record.id, "disable audio route failed");
        }
    }
}

impl<U, R, P, D> AudioDevice<U, R, P, D>
where
    U: UsecaseRegistry,
    R: RouteManager,
    P: PlatformConfig,
    D: PcmDriver,
{
    /// [`start`] on this context.
    ///
    /// # Errors
    ///
    /// See [`start`].
    pub fn start_feedback(&mut self, device: SndDevice) -> Result<(), FeedbackError> {
        start(Some(self), device)
    }

    /// [`stop`] on this context.
    pub fn stop_feedback(&mut self, device: SndDevice) {
        stop(Some(self), device);
    }
}

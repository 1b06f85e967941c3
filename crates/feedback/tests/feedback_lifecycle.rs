//! Feedback capture lifecycle tests — the full start/stop contract against
//! mock collaborators.
// Integration test file: expect/unwrap/panic are intentional test mechanisms.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//!
//! Run with: cargo test -p vi-feedback --test feedback_lifecycle

use platform::mocks::{MockPcm, MockPlatform, MockRoutes, OpenBehaviour, PcmCall, RouteCall};
use platform::{
    CardId, PcmDeviceId, PcmDeviceIds, PcmDeviceTable, PcmDirection, SndDevice, UsecaseId,
    UsecaseList, UsecaseRecord, UsecaseRegistry, UsecaseType,
};
use vi_feedback::config::FEEDBACK_PCM_CONFIG;
use vi_feedback::{start, status, stop, AudioDevice, FeedbackError, FeedbackState};

type MockDevice = AudioDevice<UsecaseList<8>, MockRoutes, MockPlatform, MockPcm>;

const CALIB_PCM: i32 = 33;

fn mock_device() -> MockDevice {
    AudioDevice::new(
        CardId::new(0),
        UsecaseList::new(),
        MockRoutes::new(),
        MockPlatform::new(CALIB_PCM),
        MockPcm::new(),
    )
}

fn assert_untouched(adev: &MockDevice) {
    assert_eq!(adev.feedback_state(), FeedbackState::Inactive);
    assert!(adev.usecases.is_empty(), "no usecase may be registered");
    assert!(adev.routes.calls.is_empty(), "routing must not be touched");
    assert!(adev.pcm.calls.is_empty(), "pcm driver must not be touched");
    assert_eq!(adev.platform.lookups(), 0, "platform must not be queried");
}

fn assert_fully_unwound(adev: &MockDevice) {
    assert_eq!(adev.feedback_state(), FeedbackState::Inactive);
    assert!(adev.feedback_stream().is_none());
    assert_eq!(adev.pcm.open_handles(), 0, "no handle may stay open");
    assert!(adev.usecases.find(UsecaseId::SpkrCalibTx).is_none());
    assert!(!adev.routes.is_enabled(SndDevice::InCaptureViFeedback));
}

// ── Speaker start ────────────────────────────────────────────────────────────

#[test]
fn speaker_start_registers_usecase_and_enables_vi_feedback() {
    let mut adev = mock_device();

    assert_eq!(status(adev.start_feedback(SndDevice::OutSpeaker)), 0);

    assert_eq!(adev.feedback_state(), FeedbackState::Active);
    let record = adev
        .usecases
        .find(UsecaseId::SpkrCalibTx)
        .copied()
        .expect("feedback usecase registered");
    assert_eq!(
        record,
        UsecaseRecord::capture(UsecaseId::SpkrCalibTx, SndDevice::InCaptureViFeedback)
    );
    assert!(adev.routes.is_enabled(SndDevice::InCaptureViFeedback));
    assert!(adev.feedback_stream().unwrap().is_started());
}

#[test]
fn start_enables_device_before_route_then_opens_capture() {
    let mut adev = mock_device();
    adev.start_feedback(SndDevice::OutSpeakerVbat).unwrap();

    assert_eq!(
        adev.routes.calls.as_slice(),
        &[
            RouteCall::EnableDevice(SndDevice::InCaptureViFeedback),
            RouteCall::EnableRoute(UsecaseId::SpkrCalibTx),
        ]
    );
    assert_eq!(
        adev.platform.last_query(),
        Some((UsecaseId::SpkrCalibTx, UsecaseType::PcmCapture))
    );
    assert_eq!(
        adev.pcm.calls.as_slice(),
        &[
            PcmCall::Open {
                card: CardId::new(0),
                device: PcmDeviceId::new(33),
                direction: PcmDirection::In,
            },
            PcmCall::Start(1),
        ]
    );
    assert_eq!(adev.pcm.last_config, Some(FEEDBACK_PCM_CONFIG));
}

#[test]
fn usecase_is_appended_after_existing_usecases() {
    let mut adev = mock_device();
    adev.usecases
        .append(UsecaseRecord::playback(
            UsecaseId::DeepBufferPlayback,
            SndDevice::OutSpeaker,
        ))
        .unwrap();

    adev.start_feedback(SndDevice::OutSpeaker).unwrap();

    let order: Vec<UsecaseId> = adev.usecases.iter().map(|r| r.id).collect();
    assert_eq!(
        order,
        vec![UsecaseId::DeepBufferPlayback, UsecaseId::SpkrCalibTx]
    );
}

#[test]
fn every_speaker_class_device_starts_capture() {
    for dev in vi_feedback::FEEDBACK_ELIGIBLE_DEVICES {
        let mut adev = mock_device();
        adev.start_feedback(dev)
            .unwrap_or_else(|e| panic!("{dev}: {e}"));
        assert_eq!(adev.feedback_state(), FeedbackState::Active, "{dev}");
    }
}

// ── Non-eligible devices ─────────────────────────────────────────────────────

#[test]
fn wired_headset_start_has_zero_side_effects() {
    let mut adev = mock_device();
    assert_eq!(status(adev.start_feedback(SndDevice::OutHeadphones)), 0);
    assert_untouched(&adev);
}

#[test]
fn non_eligible_stop_has_zero_side_effects() {
    let mut adev = mock_device();
    adev.stop_feedback(SndDevice::OutHandset);
    assert_untouched(&adev);
}

#[test]
fn non_eligible_stop_leaves_active_capture_running() {
    let mut adev = mock_device();
    adev.start_feedback(SndDevice::OutSpeaker).unwrap();
    adev.stop_feedback(SndDevice::OutUsbHeadset);
    assert_eq!(adev.feedback_state(), FeedbackState::Active);
    assert_eq!(adev.usecases.len(), 1);
}

#[test]
fn non_eligible_device_with_missing_context_is_ok() {
    let result =
        start::<UsecaseList<1>, MockRoutes, MockPlatform, MockPcm>(None, SndDevice::OutHdmi);
    assert_eq!(result, Ok(()));
}

// ── Idempotence ──────────────────────────────────────────────────────────────

#[test]
fn second_start_is_a_no_op() {
    let mut adev = mock_device();
    adev.start_feedback(SndDevice::OutSpeaker).unwrap();
    let calls_before = adev.pcm.calls.len();

    adev.start_feedback(SndDevice::OutSpeakerAndHeadphones).unwrap();

    assert_eq!(adev.usecases.count(UsecaseId::SpkrCalibTx), 1);
    assert_eq!(adev.pcm.open_handles(), 1);
    assert_eq!(adev.pcm.calls.len(), calls_before);
    assert_eq!(adev.feedback_state(), FeedbackState::Active);
}

#[test]
fn missing_context_fails_for_eligible_device() {
    let result = start::<UsecaseList<1>, MockRoutes, MockPlatform, MockPcm>(
        None,
        SndDevice::OutSpeaker,
    );
    assert_eq!(result, Err(FeedbackError::InvalidArgument));
    assert_eq!(status(result), -22);
}

// ── Stop ─────────────────────────────────────────────────────────────────────

#[test]
fn start_then_stop_returns_to_inactive() {
    let mut adev = mock_device();
    adev.start_feedback(SndDevice::OutSpeaker).unwrap();
    adev.stop_feedback(SndDevice::OutSpeaker);

    assert_fully_unwound(&adev);
    assert!(adev.usecases.is_empty());
    assert_eq!(
        adev.routes.calls.as_slice(),
        &[
            RouteCall::EnableDevice(SndDevice::InCaptureViFeedback),
            RouteCall::EnableRoute(UsecaseId::SpkrCalibTx),
            RouteCall::DisableDevice(SndDevice::InCaptureViFeedback),
            RouteCall::DisableRoute(UsecaseId::SpkrCalibTx),
        ]
    );
    assert_eq!(adev.pcm.calls.last(), Some(&PcmCall::Close(1)));
}

#[test]
fn stop_with_a_different_speaker_device_still_stops() {
    let mut adev = mock_device();
    adev.start_feedback(SndDevice::OutSpeaker).unwrap();
    adev.stop_feedback(SndDevice::OutVoiceSpeaker);
    assert_fully_unwound(&adev);
}

#[test]
fn stop_while_inactive_is_safe() {
    let mut adev = mock_device();
    adev.stop_feedback(SndDevice::OutSpeaker);

    assert_eq!(adev.feedback_state(), FeedbackState::Inactive);
    assert!(adev.pcm.calls.is_empty());
    // The sound device is disabled unconditionally; nothing else happens.
    assert_eq!(
        adev.routes.calls.as_slice(),
        &[RouteCall::DisableDevice(SndDevice::InCaptureViFeedback)]
    );
}

#[test]
fn double_stop_is_safe() {
    let mut adev = mock_device();
    adev.start_feedback(SndDevice::OutSpeaker).unwrap();
    adev.stop_feedback(SndDevice::OutSpeaker);
    adev.stop_feedback(SndDevice::OutSpeaker);
    assert_fully_unwound(&adev);
    assert_eq!(
        adev.pcm
            .calls
            .iter()
            .filter(|c| matches!(c, PcmCall::Close(_)))
            .count(),
        1
    );
}

#[test]
fn stop_cleans_stale_record_without_stream() {
    let mut adev = mock_device();
    adev.usecases
        .append(UsecaseRecord::capture(
            UsecaseId::SpkrCalibTx,
            SndDevice::InCaptureViFeedback,
        ))
        .unwrap();

    adev.stop_feedback(SndDevice::OutSpeaker);

    assert!(adev.usecases.is_empty());
    assert!(adev.pcm.calls.is_empty());
    assert_eq!(
        adev.routes.calls.last(),
        Some(&RouteCall::DisableRoute(UsecaseId::SpkrCalibTx))
    );
}

#[test]
fn stop_removes_the_record_whose_route_it_disables() {
    let mut adev = mock_device();
    let foreign = UsecaseRecord::capture(UsecaseId::SpkrCalibTx, SndDevice::InSpeakerMic);
    adev.usecases.append(foreign).unwrap();
    adev.start_feedback(SndDevice::OutSpeaker).unwrap();
    let found = adev.usecases.find(UsecaseId::SpkrCalibTx).copied().unwrap();
    adev.routes.calls.clear();

    adev.stop_feedback(SndDevice::OutSpeaker);

    assert_eq!(adev.feedback_state(), FeedbackState::Inactive);
    assert_eq!(
        adev.routes.calls.last(),
        Some(&RouteCall::DisableRoute(found.id))
    );
    assert!(
        adev.usecases.iter().all(|r| *r != found),
        "deactivated record must leave the registry"
    );
    assert_eq!(adev.usecases.count(UsecaseId::SpkrCalibTx), 1);
}

#[test]
fn stop_completes_when_routing_fails() {
    let mut adev = mock_device();
    adev.start_feedback(SndDevice::OutSpeaker).unwrap();
    adev.routes.fail = true;

    adev.stop_feedback(SndDevice::OutSpeaker);

    assert_eq!(adev.feedback_state(), FeedbackState::Inactive);
    assert_eq!(adev.pcm.open_handles(), 0);
    assert!(adev.usecases.is_empty());
}

#[test]
fn stop_without_context_does_nothing() {
    stop::<UsecaseList<1>, MockRoutes, MockPlatform, MockPcm>(None, SndDevice::OutSpeaker);
}

#[test]
fn restart_after_stop_opens_a_fresh_stream() {
    let mut adev = mock_device();
    adev.start_feedback(SndDevice::OutSpeaker).unwrap();
    adev.stop_feedback(SndDevice::OutSpeaker);
    adev.start_feedback(SndDevice::OutSpeaker).unwrap();

    assert_eq!(adev.feedback_stream().unwrap().serial(), 2);
    assert_eq!(adev.usecases.count(UsecaseId::SpkrCalibTx), 1);
}

// ── Failure and unwind ───────────────────────────────────────────────────────

#[test]
fn negative_device_id_fails_with_no_such_device_and_unwinds() {
    let mut adev = mock_device();
    adev.platform.device_id = -1;

    let result = adev.start_feedback(SndDevice::OutSpeaker);

    assert_eq!(result, Err(FeedbackError::NoSuchDevice));
    assert_eq!(status(result), -19);
    assert_fully_unwound(&adev);
    assert!(adev.usecases.is_empty());
    assert_eq!(adev.pcm.open_calls(), 0, "no open after failed lookup");
    assert_eq!(
        adev.routes.calls.as_slice(),
        &[
            RouteCall::EnableDevice(SndDevice::InCaptureViFeedback),
            RouteCall::EnableRoute(UsecaseId::SpkrCalibTx),
            RouteCall::DisableDevice(SndDevice::InCaptureViFeedback),
            RouteCall::DisableRoute(UsecaseId::SpkrCalibTx),
        ]
    );
}

#[test]
fn not_ready_stream_fails_with_io_and_closes_handle() {
    let mut adev = mock_device();
    adev.pcm.open_behaviour = OpenBehaviour::NotReady;

    let result = adev.start_feedback(SndDevice::OutSpeaker);

    assert_eq!(result, Err(FeedbackError::Io));
    assert_eq!(status(result), -5);
    assert_fully_unwound(&adev);
    assert_eq!(
        adev.pcm.calls.as_slice(),
        &[
            PcmCall::Open {
                card: CardId::new(0),
                device: PcmDeviceId::new(33),
                direction: PcmDirection::In,
            },
            PcmCall::Close(1),
        ]
    );
}

#[test]
fn stream_start_failure_closes_handle_and_removes_record() {
    let mut adev = mock_device();
    adev.pcm.fail_start = true;

    let result = adev.start_feedback(SndDevice::OutSpeaker);

    assert_eq!(result, Err(FeedbackError::InvalidArgument));
    assert_fully_unwound(&adev);
    assert!(adev.usecases.is_empty());
    assert_eq!(
        adev.pcm.calls.as_slice(),
        &[
            PcmCall::Open {
                card: CardId::new(0),
                device: PcmDeviceId::new(33),
                direction: PcmDirection::In,
            },
            PcmCall::Start(1),
            PcmCall::Close(1),
        ]
    );
}

#[test]
fn full_registry_fails_with_out_of_memory_and_no_side_effects() {
    let mut adev = AudioDevice::new(
        CardId::new(0),
        UsecaseList::<1>::new(),
        MockRoutes::new(),
        MockPlatform::new(CALIB_PCM),
        MockPcm::new(),
    );
    adev.usecases
        .append(UsecaseRecord::playback(
            UsecaseId::DeepBufferPlayback,
            SndDevice::OutSpeaker,
        ))
        .unwrap();

    let result = adev.start_feedback(SndDevice::OutSpeaker);

    assert_eq!(result, Err(FeedbackError::OutOfMemory));
    assert_eq!(status(result), -12);
    assert_eq!(adev.usecases.len(), 1, "existing usecase untouched");
    assert!(adev.routes.calls.is_empty());
    assert!(adev.pcm.calls.is_empty());
    assert_eq!(adev.platform.lookups(), 0);
}

#[test]
fn unwind_keeps_unrelated_usecases() {
    let mut adev = mock_device();
    adev.usecases
        .append(UsecaseRecord::playback(
            UsecaseId::LowLatencyPlayback,
            SndDevice::OutSpeaker,
        ))
        .unwrap();
    adev.platform.device_id = -1;

    assert!(adev.start_feedback(SndDevice::OutSpeaker).is_err());

    let order: Vec<UsecaseId> = adev.usecases.iter().map(|r| r.id).collect();
    assert_eq!(order, vec![UsecaseId::LowLatencyPlayback]);
}

#[test]
fn failed_start_can_be_retried_once_the_fault_clears() {
    let mut adev = mock_device();
    adev.pcm.fail_start = true;
    assert!(adev.start_feedback(SndDevice::OutSpeaker).is_err());

    adev.pcm.fail_start = false;
    adev.start_feedback(SndDevice::OutSpeaker).unwrap();

    assert_eq!(adev.feedback_state(), FeedbackState::Active);
    assert_eq!(adev.usecases.count(UsecaseId::SpkrCalibTx), 1);
    assert_eq!(adev.pcm.open_handles(), 1);
}

// ── Platform table ───────────────────────────────────────────────────────────

#[test]
fn table_without_feedback_entry_reports_no_such_device() {
    let table = PcmDeviceTable::<4>::new()
        .with(
            UsecaseId::DeepBufferPlayback,
            PcmDeviceIds::playback_only(0),
        )
        .unwrap();
    let mut adev = AudioDevice::new(
        CardId::new(1),
        UsecaseList::<8>::new(),
        MockRoutes::new(),
        table,
        MockPcm::new(),
    );

    assert_eq!(
        adev.start_feedback(SndDevice::OutSpeaker),
        Err(FeedbackError::NoSuchDevice)
    );
    assert!(adev.usecases.is_empty());
    assert_eq!(adev.pcm.open_handles(), 0);
}

#[test]
fn table_entry_selects_capture_front_end_on_context_card() {
    let table = PcmDeviceTable::<4>::new()
        .with(UsecaseId::SpkrCalibTx, PcmDeviceIds::capture_only(41))
        .unwrap();
    let mut adev = AudioDevice::new(
        CardId::new(1),
        UsecaseList::<8>::new(),
        MockRoutes::new(),
        table,
        MockPcm::new(),
    );

    adev.start_feedback(SndDevice::OutSpeakerReverse).unwrap();

    assert_eq!(
        adev.pcm.calls.first(),
        Some(&PcmCall::Open {
            card: CardId::new(1),
            device: PcmDeviceId::new(41),
            direction: PcmDirection::In,
        })
    );
}

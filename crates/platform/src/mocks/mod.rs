//! Mock implementations for testing
//!
//! Mocks of the routing, PCM and platform collaborators. Each records every
//! call in order so tests can assert both what happened and what did not.

#![cfg(any(test, feature = "std"))]

use core::cell::Cell;

use crate::*;

/// Calls kept per mock before further calls are dropped from the log.
pub const CALL_LOG_CAPACITY: usize = 64;

// ── Routing ─────────────────────────────────────────────────────────────────

/// One call made on [`MockRoutes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteCall {
    /// `enable_snd_device`
    EnableDevice(SndDevice),
    /// `disable_snd_device`
    DisableDevice(SndDevice),
    /// `enable_audio_route`
    EnableRoute(UsecaseId),
    /// `disable_audio_route`
    DisableRoute(UsecaseId),
}

/// Error returned by [`MockRoutes`] when `fail` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockRouteError;

/// Mock routing layer.
#[derive(Debug, Default)]
pub struct MockRoutes {
    /// Calls in order.
    pub calls: heapless::Vec<RouteCall, CALL_LOG_CAPACITY>,
    /// When set every call is logged and then fails without changing state.
    pub fail: bool,
    enabled: heapless::Vec<SndDevice, 16>,
}

impl MockRoutes {
    /// Create new mock routing layer
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// `true` if `device` is currently enabled.
    pub fn is_enabled(&self, device: SndDevice) -> bool {
        self.enabled.contains(&device)
    }

    fn log(&mut self, call: RouteCall) -> Result<(), MockRouteError> {
        let _ = self.calls.push(call);
        if self.fail {
            Err(MockRouteError)
        } else {
            Ok(())
        }
    }
}

impl RouteManager for MockRoutes {
    type Error = MockRouteError;

    fn enable_snd_device(&mut self, device: SndDevice) -> Result<(), Self::Error> {
        self.log(RouteCall::EnableDevice(device))?;
        if !self.enabled.contains(&device) {
            let _ = self.enabled.push(device);
        }
        Ok(())
    }

    fn disable_snd_device(&mut self, device: SndDevice) -> Result<(), Self::Error> {
        self.log(RouteCall::DisableDevice(device))?;
        self.enabled.retain(|d| *d != device);
        Ok(())
    }

    fn enable_audio_route(&mut self, usecase: &UsecaseRecord) -> Result<(), Self::Error> {
        self.log(RouteCall::EnableRoute(usecase.id))
    }

    fn disable_audio_route(&mut self, usecase: &UsecaseRecord) -> Result<(), Self::Error> {
        self.log(RouteCall::DisableRoute(usecase.id))
    }
}

// ── PCM ─────────────────────────────────────────────────────────────────────

/// What [`MockPcm::open`] hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenBehaviour {
    /// A ready handle.
    #[default]
    Ready,
    /// A handle that reports not-ready.
    NotReady,
    /// No handle at all.
    NoHandle,
}

/// Handle issued by [`MockPcm`]. Deliberately not `Clone`.
#[derive(Debug, PartialEq, Eq)]
pub struct MockPcmHandle {
    serial: u32,
    ready: bool,
    started: bool,
}

impl MockPcmHandle {
    /// Serial number assigned at open, starting from 1.
    pub fn serial(&self) -> u32 {
        self.serial
    }

    /// `true` once started.
    pub fn is_started(&self) -> bool {
        self.started
    }
}

/// One call made on [`MockPcm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PcmCall {
    /// `open`
    Open {
        /// Card
        card: CardId,
        /// Device
        device: PcmDeviceId,
        /// Direction
        direction: PcmDirection,
    },
    /// `start` on the handle with this serial
    Start(u32),
    /// `close` on the handle with this serial
    Close(u32),
}

/// Error returned by [`MockPcm::start`] when `fail_start` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPcmError;

/// Mock PCM driver.
#[derive(Debug, Default)]
pub struct MockPcm {
    /// Outcome of the next `open` calls.
    pub open_behaviour: OpenBehaviour,
    /// When set `start` fails.
    pub fail_start: bool,
    /// Calls in order.
    pub calls: heapless::Vec<PcmCall, CALL_LOG_CAPACITY>,
    /// Config passed to the last `open`.
    pub last_config: Option<PcmConfig>,
    open_handles: usize,
    next_serial: u32,
}

impl MockPcm {
    /// Create new mock PCM driver
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles opened and not yet closed.
    pub fn open_handles(&self) -> usize {
        self.open_handles
    }

    /// Number of `open` calls so far.
    pub fn open_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, PcmCall::Open { .. }))
            .count()
    }
}

impl PcmDriver for MockPcm {
    type Handle = MockPcmHandle;
    type Error = MockPcmError;

    fn open(
        &mut self,
        card: CardId,
        device: PcmDeviceId,
        direction: PcmDirection,
        config: &PcmConfig,
    ) -> Option<Self::Handle> {
        let _ = self.calls.push(PcmCall::Open {
            card,
            device,
            direction,
        });
        self.last_config = Some(*config);
        let ready = match self.open_behaviour {
            OpenBehaviour::NoHandle => return None,
            OpenBehaviour::Ready => true,
            OpenBehaviour::NotReady => false,
        };
        self.next_serial = self.next_serial.saturating_add(1);
        self.open_handles = self.open_handles.saturating_add(1);
        Some(MockPcmHandle {
            serial: self.next_serial,
            ready,
            started: false,
        })
    }

    fn is_ready(&self, handle: &Self::Handle) -> bool {
        handle.ready
    }

    fn error_message<'a>(&'a self, handle: &'a Self::Handle) -> &'a str {
        if handle.ready {
            ""
        } else {
            "cannot open device: No such file or directory"
        }
    }

    fn start(&mut self, handle: &mut Self::Handle) -> Result<(), Self::Error> {
        let _ = self.calls.push(PcmCall::Start(handle.serial));
        if self.fail_start || !handle.ready {
            return Err(MockPcmError);
        }
        handle.started = true;
        Ok(())
    }

    fn close(&mut self, handle: Self::Handle) {
        let _ = self.calls.push(PcmCall::Close(handle.serial));
        self.open_handles = self.open_handles.saturating_sub(1);
    }
}

// ── Platform ────────────────────────────────────────────────────────────────

/// Mock platform lookup returning one fixed device index for every query.
#[derive(Debug, Default)]
pub struct MockPlatform {
    /// Index returned by every lookup.
    pub device_id: i32,
    lookups: Cell<usize>,
    last_query: Cell<Option<(UsecaseId, UsecaseType)>>,
}

impl MockPlatform {
    /// Lookup answering `device_id`.
    pub fn new(device_id: i32) -> Self {
        Self {
            device_id,
            ..Self::default()
        }
    }

    /// Number of lookups so far.
    pub fn lookups(&self) -> usize {
        self.lookups.get()
    }

    /// Arguments of the last lookup.
    pub fn last_query(&self) -> Option<(UsecaseId, UsecaseType)> {
        self.last_query.get()
    }
}

impl PlatformConfig for MockPlatform {
    fn pcm_device_id(&self, usecase: UsecaseId, kind: UsecaseType) -> i32 {
        self.lookups.set(self.lookups.get().saturating_add(1));
        self.last_query.set(Some((usecase, kind)));
        self.device_id
    }
}

//! Audio device context.
//!
//! The HAL keeps one context per opened audio device. It owns the
//! collaborators feedback capture drives and the slot holding the open
//! feedback stream. Callers serialise access through `&mut`.

use platform::{CardId, PcmDriver, PlatformConfig, RouteManager, UsecaseRegistry};

/// Whether feedback capture is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackState {
    /// No capture stream open.
    Inactive,
    /// Capture stream open and started.
    Active,
}

/// Audio device context.
///
/// - `U` — active usecase registry
/// - `R` — routing layer
/// - `P` — platform lookups
/// - `D` — PCM driver
pub struct AudioDevice<U, R, P, D: PcmDriver> {
    /// Sound card streams are opened on.
    pub snd_card: CardId,
    /// Active usecases.
    pub usecases: U,
    /// Routing layer.
    pub routes: R,
    /// Platform lookups.
    pub platform: P,
    /// PCM driver.
    pub pcm: D,
    pub(crate) feedback: Option<D::Handle>,
}

impl<U, R, P, D> AudioDevice<U, R, P, D>
where
    U: UsecaseRegistry,
    R: RouteManager,
    P: PlatformConfig,
    D: PcmDriver,
{
    /// Context with feedback capture inactive.
    pub fn new(snd_card: CardId, usecases: U, routes: R, platform: P, pcm: D) -> Self {
        Self {
            snd_card,
            usecases,
            routes,
            platform,
            pcm,
            feedback: None,
        }
    }

    /// Current feedback capture state.
    pub fn feedback_state(&self) -> FeedbackState {
        if self.feedback.is_some() {
            FeedbackState::Active
        } else {
            FeedbackState::Inactive
        }
    }

    /// Open feedback stream, if any.
    pub fn feedback_stream(&self) -> Option<&D::Handle> {
        self.feedback.as_ref()
    }
}

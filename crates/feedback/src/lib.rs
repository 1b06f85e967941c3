//! VI feedback capture for smart-speaker protection
//!
//! A smart amplifier protecting the loudspeaker needs its voltage/current
//! sense data captured whenever the speaker is driven. This crate starts that
//! capture when a speaker-class output device comes up and stops it when the
//! device goes down.
//!
//! # Structure
//!
//! - `eligibility` — which output devices drive the protected speaker
//! - `config` — usecase, sound device and PCM configuration of the capture
//! - `device` — [`AudioDevice`] context owning the collaborators and the stream
//! - `controller` — [`start`] / [`stop`] lifecycle with unwind-on-error
//! - `error` — [`FeedbackError`] and the integer status contract
//!
//! # Dependency Injection
//!
//! The context is generic over the [`platform`] contracts. Concrete types are
//! injected at the call site:
//!
//! ```
//! use platform::mocks::{MockPcm, MockPlatform, MockRoutes};
//! use platform::{CardId, SndDevice, UsecaseList};
//! use vi_feedback::{AudioDevice, FeedbackState};
//!
//! let mut adev = AudioDevice::new(
//!     CardId::new(0),
//!     UsecaseList::<8>::new(),
//!     MockRoutes::new(),
//!     MockPlatform::new(33),
//!     MockPcm::new(),
//! );
//! adev.start_feedback(SndDevice::OutSpeaker).unwrap();
//! assert_eq!(adev.feedback_state(), FeedbackState::Active);
//! adev.stop_feedback(SndDevice::OutSpeaker);
//! assert_eq!(adev.feedback_state(), FeedbackState::Inactive);
//! ```
//!
//! # Concurrency
//!
//! None of this is thread-safe on its own: the HAL calls in under its device
//! lock, which the `&mut AudioDevice` receiver encodes.

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing over println! in lib code
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod controller;
pub mod device;
pub mod eligibility;
pub mod error;

pub use controller::{start, stop};
pub use device::{AudioDevice, FeedbackState};
pub use eligibility::{is_feedback_eligible, FEEDBACK_ELIGIBLE_DEVICES};
pub use error::{status, FeedbackError};

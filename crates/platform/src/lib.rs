//! Audio HAL collaborator contracts
//!
//! This crate provides the trait-based abstractions an audio HAL extension
//! talks to, so that extensions can be built and tested without a sound card.
//!
//! # Architecture Layers
//!
//! ```text
//! HAL extensions (feedback capture, ...)
//!         ↓
//! Platform contracts (this crate - traits and plain data)
//!         ↓
//! Routing layer, platform tables, PCM kernel driver
//! ```
//!
//! # Contracts
//!
//! - [`UsecaseRegistry`] - insertion-ordered list of active usecases
//! - [`RouteManager`] - sound device power and mixer paths
//! - [`PlatformConfig`] - usecase → PCM device lookup
//! - [`PcmDriver`] - open / start / close of PCM streams
//!
//! # Features
//!
//! - `std`: expose [`mocks`] outside this crate's unit tests
//! - `serde`: `Serialize`/`Deserialize` on configuration and catalogue types
//! - `defmt`: `defmt::Format` on all plain data types
//!
//! # Example
//!
//! ```
//! use platform::{PcmDeviceIds, PcmDeviceTable, PlatformConfig, UsecaseId, UsecaseType};
//!
//! let table = PcmDeviceTable::<4>::new()
//!     .with(UsecaseId::SpkrCalibTx, PcmDeviceIds::capture_only(33))
//!     .unwrap();
//! assert_eq!(table.pcm_device_id(UsecaseId::SpkrCalibTx, UsecaseType::PcmCapture), 33);
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
// Pedantic lints suppressed for this HAL contract crate:
#![allow(clippy::must_use_candidate)] // plain accessors
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod mocks;
pub mod pcm;
pub mod platform_config;
pub mod route;
pub mod snd_device;
pub mod usecase;

pub use pcm::{CardId, ConfigError, PcmConfig, PcmDeviceId, PcmDirection, PcmDriver, PcmFormat};
pub use platform_config::{PcmDeviceIds, PcmDeviceTable, PlatformConfig, NO_PCM_DEVICE};
pub use route::RouteManager;
pub use snd_device::SndDevice;
pub use usecase::{RegistryError, UsecaseId, UsecaseList, UsecaseRecord, UsecaseRegistry, UsecaseType};

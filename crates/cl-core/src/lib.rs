//! Campaign Loader Core Library
//!
//! This library provides the campaign orchestration pattern shared by
//! per-campaign loader programs:
//! - Typed campaign descriptors (platforms, time windows, terrain scenes)
//! - Run-option resolution (test mode, stride override)
//! - Sequential load dispatch with per-platform failure isolation
//! - Post-load terrain registration
//!
//! The external loader (remote fetch/parse/decimate/insert) is modeled as
//! the [`loader::CampaignLoader`] trait; this layer performs no network I/O.
//! The binary entry point is in `main.rs`.

pub mod campaign;
pub mod campaigns;
pub mod dispatch;
pub mod exit_codes;
pub mod loader;
pub mod logging;
pub mod options;

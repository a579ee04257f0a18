//! Run-option resolution.
//!
//! A campaign run takes two knobs from the command line: test mode and an
//! explicit stride override. The effective decimation stride is resolved
//! here, in priority order: test mode, explicit override, loader default.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Stride forced by test mode, regardless of any override.
pub const TEST_STRIDE: u32 = 100;

/// Runtime options for a campaign run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RunOptions {
    /// Test mode: force stride to [`TEST_STRIDE`] to shrink run volume.
    pub test_mode: bool,

    /// Explicit stride override (load every Nth record).
    pub stride_override: Option<NonZeroU32>,
}

impl RunOptions {
    /// Resolve the effective stride against the loader's default.
    pub fn effective_stride(&self, default_stride: u32) -> u32 {
        resolve_stride(self.test_mode, self.stride_override, default_stride)
    }
}

/// Resolve the effective decimation stride.
///
/// Pure function; test mode short-circuits to [`TEST_STRIDE`] before the
/// override is even considered.
pub fn resolve_stride(
    test_mode: bool,
    stride_override: Option<NonZeroU32>,
    default_stride: u32,
) -> u32 {
    if test_mode {
        return TEST_STRIDE;
    }
    match stride_override {
        Some(stride) => stride.get(),
        None => default_stride,
    }
}

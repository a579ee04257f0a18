//! Per-platform configuration records.
//!
//! Each observing platform declares where its data lives (an OPeNDAP/THREDDS
//! base plus relative file paths), which physical parameters to extract, a
//! time window, and optional fixed sensor depths. Free-form extras carry
//! loader-specific knobs such as minimum-depth-change thresholds used to
//! reject degenerate vertical tracks.

use crate::campaign::TimeWindow;
use cl_common::PlatformId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of observing platform, used for log grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformKind {
    Glider,
    Waveglider,
    Mooring,
    /// Autonomous underwater vehicle; dispatched through the specialized
    /// vehicle load operation rather than the generic time-series one.
    Auv,
}

impl std::fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformKind::Glider => write!(f, "glider"),
            PlatformKind::Waveglider => write!(f, "waveglider"),
            PlatformKind::Mooring => write!(f, "mooring"),
            PlatformKind::Auv => write!(f, "auv"),
        }
    }
}

/// A scalar value in a platform's free-form extra options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Bool(v) => write!(f, "{v}"),
            OptionValue::Int(v) => write!(f, "{v}"),
            OptionValue::Float(v) => write!(f, "{v}"),
            OptionValue::Text(v) => write!(f, "{v}"),
        }
    }
}

/// Configuration record for one observing platform.
///
/// Immutable after campaign construction. A platform with an empty file
/// list or empty parameter list is legal to declare; it is simply not
/// enabled and will be skipped (and accounted for) at dispatch time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Unique platform key.
    pub id: PlatformId,

    /// Platform kind (glider, waveglider, mooring, auv).
    pub kind: PlatformKind,

    /// Remote base location (OPeNDAP/THREDDS URL).
    pub base: String,

    /// Source files, relative to `base`, in declaration order.
    pub files: Vec<String>,

    /// Physical parameters to extract. Semantically a set; declaration
    /// order is preserved for display only.
    pub parameters: Vec<String>,

    /// Time window for this platform's load.
    pub window: TimeWindow,

    /// Fixed sensor depths, when the data source does not carry its own
    /// depth coordinate (e.g. waveglider surface instruments).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depths: Option<Vec<f64>>,

    /// Free-form loader options (e.g. decimation-tolerance thresholds).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, OptionValue>,
}

impl PlatformConfig {
    /// Create a platform record bound to an explicit window.
    pub fn new(
        id: PlatformId,
        kind: PlatformKind,
        base: impl Into<String>,
        files: Vec<String>,
        parameters: Vec<String>,
        window: TimeWindow,
    ) -> Self {
        PlatformConfig {
            id,
            kind,
            base: base.into(),
            files,
            parameters,
            window,
            depths: None,
            extra: BTreeMap::new(),
        }
    }

    /// Attach fixed sensor depths.
    pub fn with_depths(mut self, depths: Vec<f64>) -> Self {
        self.depths = Some(depths);
        self
    }

    /// Attach one free-form loader option.
    pub fn with_extra(mut self, key: impl Into<String>, value: OptionValue) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Whether this platform participates in dispatch.
    ///
    /// Derived, never stored: a platform is enabled when it has at least
    /// one file and at least one parameter. This keeps "declared but
    /// empty" visibly distinct from "never declared".
    pub fn is_enabled(&self) -> bool {
        !self.files.is_empty() && !self.parameters.is_empty()
    }
}

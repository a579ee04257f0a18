//! Campaign descriptors.
//!
//! A campaign is a named, time-bounded data-collection effort aggregating
//! multiple platforms' observations. The descriptor set is built once at
//! process start from static declarations, validated fail-fast, and is
//! immutable for the rest of the run. The campaign window is the shared
//! default; individual platforms may declare their own override window
//! (e.g. a glider deployed weeks before the campaign start).
//!
//! No network access happens here. Construction only checks shape:
//! non-empty campaign id, start <= end on every window, well-formed base
//! and scene URIs, unique platform ids.

pub mod platform;
pub mod terrain;

pub use platform::{OptionValue, PlatformConfig, PlatformKind};
pub use terrain::TerrainScene;

use chrono::{DateTime, Utc};
use cl_common::{uri, Error, PlatformId, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Inclusive time window, invariant `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Create a window, rejecting `start > end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(Error::Config(format!(
                "time window start {start} is after end {end}"
            )));
        }
        Ok(TimeWindow { start, end })
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// Immutable, validated campaign descriptor set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignConfig {
    /// Campaign identifier (e.g. database name).
    pub id: String,

    /// Human-readable title.
    pub title: String,

    /// Free-text description.
    pub description: String,

    /// Shared default time window.
    pub window: TimeWindow,

    /// Platform records in declaration order, unique by id.
    pub platforms: Vec<PlatformConfig>,

    /// 3-D terrain scenes to register after the loads.
    pub scenes: Vec<TerrainScene>,

    /// Optional ground-relief grid resource.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relief: Option<PathBuf>,
}

impl CampaignConfig {
    /// Start building a campaign descriptor.
    pub fn builder(
        id: impl Into<String>,
        title: impl Into<String>,
        window: TimeWindow,
    ) -> CampaignBuilder {
        CampaignBuilder {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            window,
            platforms: Vec::new(),
            scenes: Vec::new(),
            relief: None,
        }
    }

    /// Look up a platform record by id.
    pub fn platform(&self, id: &PlatformId) -> Option<&PlatformConfig> {
        self.platforms.iter().find(|p| &p.id == id)
    }
}

/// Builder assembling a [`CampaignConfig`] from literal declarations.
///
/// `build` fails fast on the first malformed declaration; a campaign that
/// constructs is safe to dispatch.
#[derive(Debug)]
pub struct CampaignBuilder {
    id: String,
    title: String,
    description: String,
    window: TimeWindow,
    platforms: Vec<PlatformConfig>,
    scenes: Vec<TerrainScene>,
    relief: Option<PathBuf>,
}

impl CampaignBuilder {
    /// Set the free-text description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The campaign's shared default window, for platform declarations
    /// that do not override it.
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// Declare a platform. Declaration order is preserved.
    pub fn platform(mut self, platform: PlatformConfig) -> Self {
        self.platforms.push(platform);
        self
    }

    /// Declare a terrain scene.
    pub fn scene(mut self, scene: TerrainScene) -> Self {
        self.scenes.push(scene);
        self
    }

    /// Declare the ground-relief grid resource.
    pub fn relief(mut self, path: impl Into<PathBuf>) -> Self {
        self.relief = Some(path.into());
        self
    }

    /// Validate and freeze the descriptor set.
    pub fn build(self) -> Result<CampaignConfig> {
        if self.id.trim().is_empty() {
            return Err(Error::Config("campaign id is empty".to_string()));
        }

        for (i, p) in self.platforms.iter().enumerate() {
            uri::validate_http_uri(&p.base).map_err(|reason| Error::InvalidPlatform {
                platform: p.id.to_string(),
                reason: format!("base location '{}': {reason}", p.base),
            })?;
            if self.platforms[..i].iter().any(|q| q.id == p.id) {
                return Err(Error::InvalidPlatform {
                    platform: p.id.to_string(),
                    reason: "duplicate platform id".to_string(),
                });
            }
        }

        // TimeWindow and TerrainScene enforce their own invariants at
        // construction, so reaching this point means they are sound.
        Ok(CampaignConfig {
            id: self.id,
            title: self.title,
            description: self.description,
            window: self.window,
            platforms: self.platforms,
            scenes: self.scenes,
            relief: self.relief,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn window() -> TimeWindow {
        TimeWindow::new(
            Utc.with_ymd_and_hms(2020, 7, 15, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2020, 7, 31, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn mooring(id: &str) -> PlatformConfig {
        PlatformConfig::new(
            PlatformId::parse(id).unwrap(),
            PlatformKind::Mooring,
            "http://dods.mbari.org/opendap/data/ssdsdata/deployments/m1/",
            vec!["201907/OS_M1_20190729hourly_CMSTV.nc".into()],
            vec!["SEA_WATER_TEMPERATURE_HR".into()],
            window(),
        )
    }

    #[test]
    fn test_window_rejects_inverted_range() {
        let err = TimeWindow::new(
            Utc.with_ymd_and_hms(2020, 7, 31, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2020, 7, 15, 0, 0, 0).unwrap(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_window_accepts_instant() {
        let t = Utc.with_ymd_and_hms(2020, 7, 15, 0, 0, 0).unwrap();
        assert!(TimeWindow::new(t, t).is_ok());
    }

    #[test]
    fn test_build_minimal_campaign() {
        let campaign = CampaignConfig::builder("stoqs_canon_july2020", "CANON - July 2020", window())
            .description("July 2020 shipless campaign in Monterey Bay")
            .platform(mooring("m1"))
            .build()
            .unwrap();

        assert_eq!(campaign.id, "stoqs_canon_july2020");
        assert_eq!(campaign.platforms.len(), 1);
        assert!(campaign
            .platform(&PlatformId::parse("m1").unwrap())
            .is_some());
    }

    #[test]
    fn test_build_rejects_empty_id() {
        let err = CampaignConfig::builder("  ", "title", window())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_build_rejects_duplicate_platform() {
        let err = CampaignConfig::builder("c", "t", window())
            .platform(mooring("m1"))
            .platform(mooring("m1"))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPlatform { .. }));
    }

    #[test]
    fn test_build_rejects_bad_base_uri() {
        let mut p = mooring("m1");
        p.base = "dods.mbari.org/opendap/".to_string();
        let err = CampaignConfig::builder("c", "t", window())
            .platform(p)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPlatform { .. }));
    }
}

//! Shared test support: a recording loader with scriptable failures.

use cl_common::{Error, PlatformId, Result};
use cl_core::campaign::{PlatformConfig, TerrainScene, TimeWindow};
use cl_core::loader::{CampaignLoader, LoadStats, VehicleOptions};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One observed loader invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Timeseries {
        platform: String,
        window: TimeWindow,
        stride: u32,
    },
    Vehicle {
        platform: String,
        window: TimeWindow,
        options: VehicleOptions,
        stride: u32,
    },
    Terrain {
        scene_uris: Vec<String>,
        relief: Option<PathBuf>,
    },
}

/// Loader that records every call and fails on request.
#[derive(Debug, Default)]
pub struct RecordingLoader {
    pub calls: Vec<Call>,
    pub default_stride: u32,
    pub fail_platforms: HashSet<String>,
    pub fail_terrain: bool,
}

impl RecordingLoader {
    pub fn new(default_stride: u32) -> Self {
        RecordingLoader {
            default_stride,
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, platforms: &[&str]) -> Self {
        self.fail_platforms = platforms.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn failing_terrain(mut self) -> Self {
        self.fail_terrain = true;
        self
    }

    /// Platform names in load-call order (terrain calls excluded).
    pub fn load_order(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Timeseries { platform, .. } | Call::Vehicle { platform, .. } => {
                    Some(platform.as_str())
                }
                Call::Terrain { .. } => None,
            })
            .collect()
    }

    pub fn terrain_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Terrain { .. }))
            .count()
    }

    fn check_failure(&self, platform: &str) -> Result<()> {
        if self.fail_platforms.contains(platform) {
            return Err(Error::PlatformLoad {
                platform: platform.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

impl CampaignLoader for RecordingLoader {
    fn default_stride(&self) -> u32 {
        self.default_stride
    }

    fn load_timeseries(&mut self, platform: &PlatformConfig, stride: u32) -> Result<LoadStats> {
        self.calls.push(Call::Timeseries {
            platform: platform.id.to_string(),
            window: platform.window,
            stride,
        });
        self.check_failure(platform.id.as_str())?;
        Ok(LoadStats {
            files: platform.files.len(),
            records: 0,
        })
    }

    fn load_vehicle(
        &mut self,
        id: &PlatformId,
        window: TimeWindow,
        options: &VehicleOptions,
        stride: u32,
    ) -> Result<LoadStats> {
        self.calls.push(Call::Vehicle {
            platform: id.to_string(),
            window,
            options: options.clone(),
            stride,
        });
        self.check_failure(id.as_str())?;
        Ok(LoadStats::default())
    }

    fn register_terrain(&mut self, scenes: &[TerrainScene], relief: Option<&Path>) -> Result<()> {
        self.calls.push(Call::Terrain {
            scene_uris: scenes.iter().map(|s| s.uri.clone()).collect(),
            relief: relief.map(Path::to_path_buf),
        });
        if self.fail_terrain {
            return Err(Error::TerrainRegistration(
                "injected terrain failure".to_string(),
            ));
        }
        Ok(())
    }
}

//! The external loader seam.
//!
//! The actual fetch/parse/decimate/insert machinery lives outside this
//! layer; the orchestrator only ever talks to the [`CampaignLoader`] trait.
//! Implementations own whatever connections and caches they need; the
//! dispatcher constructs one loader, borrows it mutably for the run, and
//! never aliases it.

use crate::campaign::{PlatformConfig, TerrainScene, TimeWindow};
use cl_common::{PlatformId, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Counters reported back by a loader for one platform load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    /// Source files consumed.
    pub files: usize,

    /// Records inserted after decimation.
    pub records: usize,
}

/// Options for the specialized autonomous-vehicle load operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleOptions {
    /// Minimum vertical displacement over time (m/s). Records from a
    /// near-stationary vehicle below this threshold are rejected as
    /// degenerate vertical tracks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_depth_time: Option<f64>,

    /// Read the telemetered short-burst-data log format instead of the
    /// full mission logs.
    pub sbd_logs: bool,

    /// Further loader-specific knobs, passed through untouched.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Interface to the external data loader.
///
/// # Contract
///
/// - `load_timeseries` and `load_vehicle` are independent per call: a
///   failure must leave the loader usable for the next platform.
/// - `register_terrain` is an upsert keyed by scene URI: registering the
///   same scene twice updates the existing registration.
pub trait CampaignLoader {
    /// The stride used when the run specifies none.
    fn default_stride(&self) -> u32;

    /// Load a mooring/glider/waveglider time series.
    fn load_timeseries(&mut self, platform: &PlatformConfig, stride: u32) -> Result<LoadStats>;

    /// Load an autonomous vehicle's mission data.
    fn load_vehicle(
        &mut self,
        id: &PlatformId,
        window: TimeWindow,
        options: &VehicleOptions,
        stride: u32,
    ) -> Result<LoadStats>;

    /// Register terrain scenes and the relief grid with the campaign record.
    fn register_terrain(&mut self, scenes: &[TerrainScene], relief: Option<&Path>) -> Result<()>;
}

/// Loader that announces each request without touching the network.
///
/// Used to exercise a campaign declaration end to end: every load is
/// validated, logged, and reported as successful with zeroed counters.
/// Production runs substitute the real ingestion loader behind the same
/// trait.
#[derive(Debug, Default)]
pub struct PlanLoader {
    scenes: Vec<TerrainScene>,
}

impl PlanLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scenes registered so far (upserted by URI).
    pub fn scenes(&self) -> &[TerrainScene] {
        &self.scenes
    }
}

impl CampaignLoader for PlanLoader {
    fn default_stride(&self) -> u32 {
        1
    }

    fn load_timeseries(&mut self, platform: &PlatformConfig, stride: u32) -> Result<LoadStats> {
        info!(
            platform = %platform.id,
            kind = %platform.kind,
            base = %platform.base,
            files = platform.files.len(),
            parameters = platform.parameters.len(),
            window = %platform.window,
            stride,
            "would load time series"
        );
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
        info!(
            platform = %id,
            window = %window,
            critical_depth_time = ?options.critical_depth_time,
            sbd_logs = options.sbd_logs,
            stride,
            "would load vehicle mission data"
        );
        Ok(LoadStats::default())
    }

    fn register_terrain(&mut self, scenes: &[TerrainScene], relief: Option<&Path>) -> Result<()> {
        for scene in scenes {
            match self.scenes.iter_mut().find(|s| s.uri == scene.uri) {
                Some(existing) => *existing = scene.clone(),
                None => self.scenes.push(scene.clone()),
            }
        }
        info!(
            scenes = scenes.len(),
            relief = ?relief,
            "would register terrain resources"
        );
        Ok(())
    }
}

//! Load dispatch orchestration.
//!
//! The dispatcher executes an explicit, ordered plan of load steps against
//! one loader, then registers terrain resources exactly once. The plan is
//! declared next to the campaign (mirroring the execute section of a
//! campaign script), so "declared but never scheduled" platforms stay
//! queryable for auditing.
//!
//! # Failure semantics
//!
//! Each dispatched load is independent. A platform failure is caught at the
//! dispatch boundary, recorded, and the run continues with the next step;
//! the full dispatch order always runs. Terrain registration happens after
//! the last load attempt regardless of individual outcomes. Loads are
//! order-independent in data effect but run in declaration order so logs
//! are reproducible.
//!
//! Orchestrator phases: `Configured → Dispatching → TerrainRegistered →
//! Done`. Only descriptor construction can fail before dispatch begins.

use crate::campaign::{CampaignConfig, PlatformConfig, TimeWindow};
use crate::loader::{CampaignLoader, LoadStats, VehicleOptions};
use crate::options::RunOptions;
use cl_common::error::StructuredError;
use cl_common::{Error, PlatformId, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One step in the dispatch plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum LoadStep {
    /// Generic mooring/glider/waveglider time-series load; the platform
    /// must be declared in the campaign.
    Timeseries { platform: PlatformId },

    /// Specialized autonomous-vehicle load. Vehicles carry their own
    /// options and default to the campaign window.
    Vehicle {
        platform: PlatformId,
        #[serde(skip_serializing_if = "Option::is_none")]
        window: Option<TimeWindow>,
        options: VehicleOptions,
    },
}

impl LoadStep {
    /// Shorthand for a time-series step.
    pub fn timeseries(platform: PlatformId) -> Self {
        LoadStep::Timeseries { platform }
    }

    /// Shorthand for a vehicle step on the campaign window.
    pub fn vehicle(platform: PlatformId, options: VehicleOptions) -> Self {
        LoadStep::Vehicle {
            platform,
            window: None,
            options,
        }
    }

    /// The platform this step addresses.
    pub fn platform(&self) -> &PlatformId {
        match self {
            LoadStep::Timeseries { platform } => platform,
            LoadStep::Vehicle { platform, .. } => platform,
        }
    }
}

/// Outcome of one dispatched step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadOutcome {
    /// The loader completed the load.
    Loaded { stats: LoadStats },

    /// The platform is declared but not enabled (empty files or
    /// parameters); the loader was never invoked.
    Skipped { reason: String },

    /// The loader failed; sibling steps were still attempted.
    Failed { error: StructuredError },
}

impl LoadOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadOutcome::Failed { .. })
    }
}

/// Per-step entry in the dispatch report, in dispatch order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    pub platform: PlatformId,
    pub outcome: LoadOutcome,
}

/// Aggregate counters for a dispatch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchSummary {
    /// Scheduled steps.
    pub total: usize,

    /// Steps the loader completed.
    pub loaded: usize,

    /// Steps skipped because the platform was not enabled.
    pub skipped: usize,

    /// Steps whose load failed.
    pub failed: usize,

    /// True when nothing failed.
    pub all_succeeded: bool,
}

/// Full accounting for one campaign run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchReport {
    pub campaign_id: String,

    /// Effective decimation stride used for every load.
    pub stride: u32,

    /// Per-step outcomes, in dispatch order.
    pub steps: Vec<StepReport>,

    /// Platforms declared in the campaign but absent from the plan
    /// (configured, not scheduled). Audit surface only.
    pub unscheduled: Vec<PlatformId>,

    /// Error from terrain registration, if it failed. Registration is
    /// attempted exactly once, after the last load attempt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terrain_error: Option<StructuredError>,

    pub summary: DispatchSummary,
}

impl DispatchReport {
    /// True when every scheduled load succeeded or was skipped, and
    /// terrain registration succeeded.
    pub fn is_clean(&self) -> bool {
        self.summary.all_succeeded && self.terrain_error.is_none()
    }

    /// Platforms whose loads failed, in dispatch order.
    pub fn failed_platforms(&self) -> Vec<&PlatformId> {
        self.steps
            .iter()
            .filter(|s| s.outcome.is_failed())
            .map(|s| &s.platform)
            .collect()
    }
}

/// Orchestrator lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Configured,
    Dispatching,
    TerrainRegistered,
    Done,
}

/// Executes a dispatch plan against a campaign.
#[derive(Debug)]
pub struct Dispatcher {
    campaign: CampaignConfig,
    plan: Vec<LoadStep>,
    phase: RunPhase,
}

impl Dispatcher {
    /// Bind a plan to a campaign, checking that every time-series step
    /// references a declared platform. This is the last point a
    /// configuration error can surface; after it, the run always
    /// completes with a report.
    pub fn new(campaign: CampaignConfig, plan: Vec<LoadStep>) -> Result<Self> {
        for step in &plan {
            if matches!(step, LoadStep::Timeseries { .. })
                && campaign.platform(step.platform()).is_none()
            {
                return Err(Error::Config(format!(
                    "dispatch plan references undeclared platform '{}'",
                    step.platform()
                )));
            }
        }
        Ok(Dispatcher {
            campaign,
            plan,
            phase: RunPhase::Configured,
        })
    }

    /// The campaign being dispatched.
    pub fn campaign(&self) -> &CampaignConfig {
        &self.campaign
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Platforms declared in the campaign but absent from the plan.
    pub fn unscheduled(&self) -> Vec<&PlatformConfig> {
        self.campaign
            .platforms
            .iter()
            .filter(|p| self.plan.iter().all(|s| s.platform() != &p.id))
            .collect()
    }

    /// Run the full plan, then register terrain exactly once.
    ///
    /// Never short-circuits: per-platform failures are recorded and the
    /// remaining steps still dispatch. Terrain registration runs even when
    /// every load failed; its error is carried in the report rather than
    /// raised, so callers always get the full accounting.
    pub fn run<L: CampaignLoader>(
        &mut self,
        loader: &mut L,
        options: &RunOptions,
    ) -> DispatchReport {
        let stride = options.effective_stride(loader.default_stride());
        info!(
            campaign = %self.campaign.id,
            steps = self.plan.len(),
            stride,
            "dispatching campaign loads"
        );

        self.phase = RunPhase::Dispatching;
        let mut steps = Vec::with_capacity(self.plan.len());
        for step in &self.plan {
            let outcome = dispatch_step(&self.campaign, step, loader, stride);
            if let LoadOutcome::Failed { error } = &outcome {
                warn!(platform = %step.platform(), code = error.code, "load failed; continuing");
            }
            steps.push(StepReport {
                platform: step.platform().clone(),
                outcome,
            });
        }

        // Must run after the last load attempt, on success and failure alike.
        let terrain_error = loader
            .register_terrain(&self.campaign.scenes, self.campaign.relief.as_deref())
            .err()
            .map(|e| StructuredError::from(&e));
        self.phase = RunPhase::TerrainRegistered;

        let loaded = steps
            .iter()
            .filter(|s| matches!(s.outcome, LoadOutcome::Loaded { .. }))
            .count();
        let skipped = steps
            .iter()
            .filter(|s| matches!(s.outcome, LoadOutcome::Skipped { .. }))
            .count();
        let failed = steps.iter().filter(|s| s.outcome.is_failed()).count();

        let report = DispatchReport {
            campaign_id: self.campaign.id.clone(),
            stride,
            unscheduled: self
                .unscheduled()
                .iter()
                .map(|p| p.id.clone())
                .collect(),
            summary: DispatchSummary {
                total: steps.len(),
                loaded,
                skipped,
                failed,
                all_succeeded: failed == 0,
            },
            steps,
            terrain_error,
        };

        self.phase = RunPhase::Done;
        report
    }
}

fn dispatch_step<L: CampaignLoader>(
    campaign: &CampaignConfig,
    step: &LoadStep,
    loader: &mut L,
    stride: u32,
) -> LoadOutcome {
    match step {
        LoadStep::Timeseries { platform } => {
            let Some(config) = campaign.platform(platform) else {
                // Unreachable after Dispatcher::new validation; accounted
                // for rather than panicking.
                return LoadOutcome::Failed {
                    error: StructuredError::from(&Error::Config(format!(
                        "platform '{platform}' is not declared"
                    ))),
                };
            };
            if config.files.is_empty() {
                return LoadOutcome::Skipped {
                    reason: "no files declared".to_string(),
                };
            }
            if config.parameters.is_empty() {
                return LoadOutcome::Skipped {
                    reason: "no parameters declared".to_string(),
                };
            }
            match loader.load_timeseries(config, stride) {
                Ok(stats) => LoadOutcome::Loaded { stats },
                Err(e) => LoadOutcome::Failed {
                    error: StructuredError::from(&e),
                },
            }
        }
        LoadStep::Vehicle {
            platform,
            window,
            options,
        } => {
            let window = window.unwrap_or(campaign.window);
            match loader.load_vehicle(platform, window, options, stride) {
                Ok(stats) => LoadOutcome::Loaded { stats },
                Err(e) => LoadOutcome::Failed {
                    error: StructuredError::from(&e),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::{PlatformConfig, PlatformKind};
    use chrono::{TimeZone, Utc};
    use std::path::Path;

    struct OkLoader;

    impl CampaignLoader for OkLoader {
        fn default_stride(&self) -> u32 {
            1
        }
        fn load_timeseries(&mut self, p: &PlatformConfig, _stride: u32) -> Result<LoadStats> {
            Ok(LoadStats {
                files: p.files.len(),
                records: 0,
            })
        }
        fn load_vehicle(
            &mut self,
            _id: &PlatformId,
            _window: TimeWindow,
            _options: &VehicleOptions,
            _stride: u32,
        ) -> Result<LoadStats> {
            Ok(LoadStats::default())
        }
        fn register_terrain(
            &mut self,
            _scenes: &[crate::campaign::TerrainScene],
            _relief: Option<&Path>,
        ) -> Result<()> {
            Ok(())
        }
    }

    fn campaign() -> CampaignConfig {
        let window = TimeWindow::new(
            Utc.with_ymd_and_hms(2020, 7, 15, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2020, 7, 31, 0, 0, 0).unwrap(),
        )
        .unwrap();
        CampaignConfig::builder("c", "t", window)
            .platform(PlatformConfig::new(
                PlatformId::parse("m1").unwrap(),
                PlatformKind::Mooring,
                "http://dods.mbari.org/opendap/data/m1/",
                vec!["m1.nc".into()],
                vec!["sal".into()],
                window,
            ))
            .platform(PlatformConfig::new(
                PlatformId::parse("wg_Tiny").unwrap(),
                PlatformKind::Waveglider,
                "http://dods.mbari.org/opendap/data/waveglider/",
                vec!["20190513.nc".into()],
                vec!["sal".into()],
                window,
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn test_plan_must_reference_declared_platforms() {
        let plan = vec![LoadStep::timeseries(PlatformId::parse("nope").unwrap())];
        let err = Dispatcher::new(campaign(), plan).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_vehicle_steps_need_no_declaration() {
        // AUVs dispatch by id + window + options only; they carry no
        // file or parameter declarations.
        let plan = vec![LoadStep::vehicle(
            PlatformId::parse("brizo").unwrap(),
            VehicleOptions::default(),
        )];
        assert!(Dispatcher::new(campaign(), plan).is_ok());
    }

    #[test]
    fn test_phase_transitions() {
        let plan = vec![LoadStep::timeseries(PlatformId::parse("m1").unwrap())];
        let mut dispatcher = Dispatcher::new(campaign(), plan).unwrap();
        assert_eq!(dispatcher.phase(), RunPhase::Configured);

        let report = dispatcher.run(&mut OkLoader, &RunOptions::default());
        assert_eq!(dispatcher.phase(), RunPhase::Done);
        assert!(report.is_clean());
    }

    #[test]
    fn test_unscheduled_platforms_are_queryable() {
        let plan = vec![LoadStep::timeseries(PlatformId::parse("m1").unwrap())];
        let dispatcher = Dispatcher::new(campaign(), plan).unwrap();

        let unscheduled = dispatcher.unscheduled();
        assert_eq!(unscheduled.len(), 1);
        assert_eq!(unscheduled[0].id.as_str(), "wg_Tiny");
    }

    #[test]
    fn test_report_counts_skipped_separately() {
        let window = campaign().window;
        let empty = PlatformConfig::new(
            PlatformId::parse("oa2").unwrap(),
            PlatformKind::Mooring,
            "http://dods.mbari.org/opendap/data/oa/",
            vec![],
            vec!["pH".into()],
            window,
        );
        let campaign = {
            let c = campaign();
            CampaignConfig::builder(c.id, c.title, c.window)
                .platform(c.platforms[0].clone())
                .platform(empty)
                .build()
                .unwrap()
        };
        let plan = vec![
            LoadStep::timeseries(PlatformId::parse("m1").unwrap()),
            LoadStep::timeseries(PlatformId::parse("oa2").unwrap()),
        ];
        let mut dispatcher = Dispatcher::new(campaign, plan).unwrap();
        let report = dispatcher.run(&mut OkLoader, &RunOptions::default());

        assert_eq!(report.summary.total, 2);
        assert_eq!(report.summary.loaded, 1);
        assert_eq!(report.summary.skipped, 1);
        assert_eq!(report.summary.failed, 0);
        assert!(report.is_clean());
    }
}

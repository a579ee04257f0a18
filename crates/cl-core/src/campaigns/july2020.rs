//! CANON July (Summer) Campaign 2020.
//!
//! Shipless campaign in Monterey Bay: coastal gliders on Line 66, the M1
//! and OA2 moorings, two wavegliders, and four LRAUVs reporting over
//! short-burst data.

use crate::campaign::{CampaignConfig, PlatformConfig, PlatformKind, TerrainScene, TimeWindow};
use crate::dispatch::LoadStep;
use crate::loader::VehicleOptions;
use chrono::{TimeZone, Utc};
use cl_common::{Error, PlatformId, Result};

const CENCOOS_GLIDERS: &str = "http://legacy.cencoos.org/thredds/dodsC/gliders/Line66/";
const WAVEGLIDER_DEPLOYMENTS: &str =
    "http://dods.mbari.org/opendap/data/waveglider/deployment_data/";

fn pid(s: &str) -> Result<PlatformId> {
    PlatformId::parse(s).ok_or_else(|| Error::Config(format!("invalid platform id '{s}'")))
}

/// Camera transform shared by both Monterey Bay scenes.
const SCENE_POSITION: [f64; 3] = [-2_822_317.31255, -4_438_600.53640, 3_786_150.85474];
const SCENE_ORIENTATION: [f64; 4] = [0.89575, -0.31076, -0.31791, 1.63772];
const SCENE_CENTER: [f64; 3] = [
    -2_711_557.940_382_987_3,
    -4_331_414.329_506_527,
    3_801_353.469_146_523_6,
];

/// Build the campaign descriptor set.
pub fn campaign() -> Result<CampaignConfig> {
    let window = TimeWindow::new(
        Utc.with_ymd_and_hms(2020, 7, 15, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2020, 7, 31, 0, 0, 0).unwrap(),
    )?;

    let builder = CampaignConfig::builder("stoqs_canon_july2020", "CANON - July 2020", window)
        .description("July 2020 shipless campaign in Monterey Bay")
        .scene(TerrainScene::new(
            "https://stoqs.mbari.org/x3d/Monterey25_10x/Monterey25_10x_scene.x3d",
            SCENE_POSITION,
            SCENE_ORIENTATION,
            SCENE_CENTER,
            10.0,
        )?)
        .scene(
            TerrainScene::new(
                "https://stoqs.mbari.org/x3d/Monterey25_1x/Monterey25_1x_src_scene.x3d",
                SCENE_POSITION,
                SCENE_ORIENTATION,
                SCENE_CENTER,
                1.0,
            )?
            .with_name("Monterey25_1x"),
        )
        .relief("Monterey25.grd");

    // Gliders: data files from the CeNCOOS thredds server.
    // L_662a and NPS_G34 carry updated parameter names in their netCDF
    // files; NPS_G29 still uses the uppercase names.
    let builder = builder
        .platform(PlatformConfig::new(
            pid("l_662a")?,
            PlatformKind::Glider,
            CENCOOS_GLIDERS,
            vec!["OS_Glider_L_662_20200615_TS.nc".into()],
            vec![
                "temperature".into(),
                "salinity".into(),
                "fluorescence".into(),
                "oxygen".into(),
            ],
            window,
        ))
        .platform(PlatformConfig::new(
            pid("nps34a")?,
            PlatformKind::Glider,
            CENCOOS_GLIDERS,
            // Decimated subset of data telemetered during deployment
            vec!["OS_Glider_NPS_G34_20180514_TS.nc".into()],
            vec![
                "temperature".into(),
                "salinity".into(),
                "fluorescence".into(),
            ],
            window,
        ))
        .platform(PlatformConfig::new(
            pid("nps29")?,
            PlatformKind::Glider,
            CENCOOS_GLIDERS,
            vec!["OS_Glider_NPS_G29_20190528_TS.nc".into()],
            vec!["TEMP".into(), "PSAL".into(), "FLU2".into(), "OXYG".into()],
            window,
        ));

    // Wavegliders: all instruments combined into one file, one time
    // coordinate, fixed at the surface.
    let builder = builder
        .platform(
            PlatformConfig::new(
                pid("wg_Hansen")?,
                PlatformKind::Waveglider,
                WAVEGLIDER_DEPLOYMENTS,
                vec!["wgHansen/20190522/realTime/20190522.nc".into()],
                // Two CTDs (_float, _sub), no CO2
                vec![
                    "wind_dir".into(),
                    "avg_wind_spd".into(),
                    "max_wind_spd".into(),
                    "atm_press".into(),
                    "air_temp".into(),
                    "water_temp_float".into(),
                    "sal_float".into(),
                    "water_temp_sub".into(),
                    "sal_sub".into(),
                    "bb_470".into(),
                    "bb_650".into(),
                    "chl".into(),
                    "beta_470".into(),
                    "beta_650".into(),
                    "pH".into(),
                    "O2_conc_float".into(),
                    "O2_conc_sub".into(),
                ],
                window,
            )
            .with_depths(vec![0.0]),
        )
        .platform(
            PlatformConfig::new(
                pid("wg_Tiny")?,
                PlatformKind::Waveglider,
                WAVEGLIDER_DEPLOYMENTS,
                vec!["wgTiny/20190513/realTime/20190513.nc".into()],
                vec![
                    "wind_dir".into(),
                    "avg_wind_spd".into(),
                    "max_wind_spd".into(),
                    "atm_press".into(),
                    "air_temp".into(),
                    "water_temp".into(),
                    "sal".into(),
                    "bb_470".into(),
                    "bb_650".into(),
                    "chl".into(),
                    "beta_470".into(),
                    "beta_650".into(),
                    "pCO2_water".into(),
                    "pCO2_air".into(),
                    "pH".into(),
                    "O2_conc".into(),
                ],
                window,
            )
            .with_depths(vec![0.0]),
        );

    // Moorings
    let builder = builder
        .platform(PlatformConfig::new(
            pid("m1")?,
            PlatformKind::Mooring,
            "http://dods.mbari.org/opendap/data/ssdsdata/deployments/m1/",
            vec!["201907/OS_M1_20190729hourly_CMSTV.nc".into()],
            vec![
                "eastward_sea_water_velocity_HR".into(),
                "northward_sea_water_velocity_HR".into(),
                "SEA_WATER_SALINITY_HR".into(),
                "SEA_WATER_TEMPERATURE_HR".into(),
                "SW_FLUX_HR".into(),
                "AIR_TEMPERATURE_HR".into(),
                "EASTWARD_WIND_HR".into(),
                "NORTHWARD_WIND_HR".into(),
                "WIND_SPEED_HR".into(),
            ],
            window,
        ))
        .platform(PlatformConfig::new(
            pid("oa2")?,
            PlatformKind::Mooring,
            "http://dods.mbari.org/opendap/data/oa_moorings/deployment_data/OA2/201812/",
            vec!["realTime/OA2_201812.nc".into()],
            vec![
                "wind_dir".into(),
                "avg_wind_spd".into(),
                "atm_press".into(),
                "air_temp".into(),
                "water_temp".into(),
                "sal".into(),
                "O2_conc".into(),
                "chl".into(),
                "pCO2_water".into(),
                "pCO2_air".into(),
                "pH".into(),
            ],
            window,
        ));

    builder.build()
}

/// Dispatch plan for this campaign. The remaining declared platforms
/// (nps34a, nps29, wg_Hansen, wg_Tiny, oa2) stay configured but
/// unscheduled, pending re-activation.
pub fn plan() -> Result<Vec<LoadStep>> {
    let lrauv = VehicleOptions {
        critical_depth_time: Some(0.1),
        sbd_logs: true,
        extra: Default::default(),
    };

    Ok(vec![
        LoadStep::timeseries(pid("m1")?),
        LoadStep::timeseries(pid("l_662a")?),
        LoadStep::vehicle(pid("brizo")?, lrauv.clone()),
        LoadStep::vehicle(pid("daphne")?, lrauv.clone()),
        LoadStep::vehicle(pid("makai")?, lrauv.clone()),
        LoadStep::vehicle(pid("tethys")?, lrauv),
    ])
}

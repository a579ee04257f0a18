//! End-to-end dispatch of the built-in July 2020 campaign against the
//! recording loader.

mod support;

use cl_core::campaigns::july2020;
use cl_core::dispatch::Dispatcher;
use cl_core::options::RunOptions;
use support::{Call, RecordingLoader};

#[test]
fn full_campaign_dispatches_in_execute_order() {
    let mut loader = RecordingLoader::new(1);
    let mut dispatcher =
        Dispatcher::new(july2020::campaign().unwrap(), july2020::plan().unwrap()).unwrap();

    let report = dispatcher.run(&mut loader, &RunOptions::default());

    assert_eq!(
        loader.load_order(),
        ["m1", "l_662a", "brizo", "daphne", "makai", "tethys"]
    );
    assert_eq!(loader.terrain_calls(), 1);
    assert!(report.is_clean());
    assert_eq!(report.unscheduled.len(), 5);
}

#[test]
fn lrauv_calls_carry_sbd_options() {
    let mut loader = RecordingLoader::new(1);
    let mut dispatcher =
        Dispatcher::new(july2020::campaign().unwrap(), july2020::plan().unwrap()).unwrap();

    dispatcher.run(&mut loader, &RunOptions::default());

    let vehicles: Vec<_> = loader
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::Vehicle {
                platform, options, ..
            } => Some((platform.as_str(), options)),
            _ => None,
        })
        .collect();

    assert_eq!(vehicles.len(), 4);
    for (_, options) in &vehicles {
        assert_eq!(options.critical_depth_time, Some(0.1));
        assert!(options.sbd_logs);
    }
}

#[test]
fn daphne_failure_leaves_campaign_partially_loaded() {
    let mut loader = RecordingLoader::new(1).failing_on(&["daphne"]);
    let mut dispatcher =
        Dispatcher::new(july2020::campaign().unwrap(), july2020::plan().unwrap()).unwrap();

    let report = dispatcher.run(&mut loader, &RunOptions::default());

    assert_eq!(
        loader.load_order(),
        ["m1", "l_662a", "brizo", "daphne", "makai", "tethys"]
    );
    assert_eq!(loader.terrain_calls(), 1);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.summary.loaded, 5);
    assert!(!report.is_clean());
}

#[test]
fn terrain_registration_carries_both_scenes_and_relief() {
    let mut loader = RecordingLoader::new(1);
    let mut dispatcher =
        Dispatcher::new(july2020::campaign().unwrap(), july2020::plan().unwrap()).unwrap();

    dispatcher.run(&mut loader, &RunOptions::default());

    match loader.calls.last() {
        Some(Call::Terrain { scene_uris, relief }) => {
            assert_eq!(scene_uris.len(), 2);
            assert!(scene_uris[0].contains("Monterey25_10x"));
            assert!(scene_uris[1].contains("Monterey25_1x"));
            assert_eq!(
                relief.as_deref(),
                Some(std::path::Path::new("Monterey25.grd"))
            );
        }
        other => panic!("expected terrain call, got {other:?}"),
    }
}

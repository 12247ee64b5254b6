//! Unit tests for the `waypoints` command.

use super::helpers::{CatalogFile, StubCatalogBuilder};
use super::*;
use crate::catalog::DefaultCatalogBuilder;
use crate::waypoints::run_waypoints_with;
use mainstreet_core::Waypoint;
use rstest::rstest;

fn listed(output: &[u8]) -> Vec<Waypoint> {
    serde_json::from_slice(output).expect("output should be a JSON waypoint list")
}

#[rstest]
fn lists_the_catalog_in_route_order() {
    let file = CatalogFile::route_66();
    let args = WaypointsArgs {
        catalog: Some(file.path().to_path_buf()),
        ..WaypointsArgs::default()
    };
    let mut output = Vec::new();
    run_waypoints_with(args, &DefaultCatalogBuilder, &mut output).expect("listing should succeed");

    let waypoints = listed(&output);
    assert_eq!(waypoints.first().map(|w| w.id.as_str()), Some("chicago"));
    let orders: Vec<_> = waypoints.iter().map(|w| w.sequence_order).collect();
    let sequenced = orders.iter().take_while(|order| order.is_some()).count();
    assert_eq!(sequenced, 40);
    assert!(orders.windows(2).take(sequenced - 1).all(|pair| pair[0] < pair[1]));
    let unsequenced: Vec<_> = waypoints.iter().skip(sequenced).map(|w| w.id.as_str()).collect();
    assert_eq!(unsequenced, ["66-drive-in", "blue-whale", "cadillac-ranch", "wigwam"]);
}

#[rstest]
fn missing_source_names_the_waypoints_variable() {
    let builder = StubCatalogBuilder::default();
    let mut output = Vec::new();
    let err = run_waypoints_with(WaypointsArgs::default(), &builder, &mut output)
        .expect_err("listing should fail");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_CATALOG);
            assert_eq!(env, ENV_WAYPOINTS_CATALOG);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
    assert!(builder.requested.borrow().is_none());
}

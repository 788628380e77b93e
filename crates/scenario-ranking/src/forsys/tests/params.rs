use serde_json::json;

use super::common::*;
use crate::forsys::params::validators::{
    read_cluster_algorithm_type, read_cluster_parameters, read_num_clusters,
    read_pixel_index_weight, read_positive_float, read_weighted_priorities, MAX_AREA,
};
use crate::forsys::params::{
    ClusterAlgorithmType, GenerationRequest, GenerationRequestParameters, QueryParams,
    RankingRequest, RankingRequestParameters, RequestParamsError, DEFAULT_PRIORITIES,
    DEFAULT_REGION, DEFAULT_SRID, USE_URL_DEFAULTS,
};

fn explicit() -> QueryParams {
    QueryParams::new().with(USE_URL_DEFAULTS, "1")
}

fn area_json(id: i64, srid: Option<i32>, ring: &[[f64; 2]]) -> String {
    let mut value = json!({ "id": id, "polygons": [{ "coordinates": ring }] });
    if let Some(srid) = srid {
        value["srid"] = json!(srid);
    }
    value.to_string()
}

const RING: [[f64; 2]; 4] = [[-120.0, 39.0], [-119.0, 39.0], [-119.0, 40.0], [-120.0, 39.0]];

#[test]
fn cluster_values_pass_through_unchanged() {
    let lookup = QueryParams::new()
        .with("cluster_algorithm_type", "1")
        .with("num_clusters", "25")
        .with("cluster_pixel_index_weight", "0.35");

    let params = read_cluster_parameters(&lookup).expect("valid cluster params");

    assert_eq!(params.algorithm(), ClusterAlgorithmType::HierarchicalInProcess);
    assert_eq!(params.num_clusters(), 25);
    assert_eq!(params.pixel_index_weight(), 0.35);
}

#[test]
fn cluster_defaults_apply_when_absent() {
    let params = read_cluster_parameters(&QueryParams::new()).expect("defaults");

    assert_eq!(params.algorithm(), ClusterAlgorithmType::None);
    assert_eq!(params.num_clusters(), 500);
    assert_eq!(params.pixel_index_weight(), 0.01);
}

#[test]
fn non_positive_cluster_counts_are_rejected() {
    for raw in ["0", "-3"] {
        let lookup = QueryParams::new().with("num_clusters", raw);
        let error = read_num_clusters(&lookup).expect_err("non-positive");
        assert_eq!(error.to_string(), "expected num_clusters to be > 0");
    }
}

#[test]
fn non_positive_pixel_index_weights_are_rejected() {
    for raw in ["0", "-0.5"] {
        let lookup = QueryParams::new().with("cluster_pixel_index_weight", raw);
        let error = read_pixel_index_weight(&lookup).expect_err("non-positive");
        assert_eq!(error.to_string(), "expected pixel_index_weight to be > 0");
    }
}

#[test]
fn unknown_cluster_algorithms_are_rejected() {
    let lookup = QueryParams::new().with("cluster_algorithm_type", "7");

    let error = read_cluster_algorithm_type(&lookup).expect_err("no such algorithm");

    assert!(matches!(error, RequestParamsError::InvalidEnumValue(_)));
    assert_eq!(error.to_string(), "7 is not a valid ClusterAlgorithmType");
}

#[test]
fn mismatched_priority_weights_report_both_counts() {
    let lookup = QueryParams::new()
        .with("priorities", "foo")
        .with("priorities", "bar")
        .with("priorities", "baz")
        .with("priority_weights", "5")
        .with("priority_weights", "2");

    let error = read_weighted_priorities(&lookup, &DEFAULT_PRIORITIES).expect_err("3 vs 2");

    assert_eq!(
        error.to_string(),
        "expected 3 priority weights, instead, 2 were given"
    );
}

#[test]
fn priorities_default_to_uniform_weights() {
    let weighted = read_weighted_priorities(&QueryParams::new(), &DEFAULT_PRIORITIES)
        .expect("defaults");

    assert_eq!(weighted.priorities(), &names(&DEFAULT_PRIORITIES));
    assert_eq!(weighted.weights(), &[1.0, 1.0, 1.0]);
}

#[test]
fn positive_ceilings_are_optional_but_checked() {
    assert_eq!(read_positive_float(&QueryParams::new(), MAX_AREA).expect("absent"), None);

    let lookup = QueryParams::new().with(MAX_AREA, "-1");
    let error = read_positive_float(&lookup, MAX_AREA).expect_err("negative");
    assert_eq!(
        error.to_string(),
        "expected param, max_area, to have a positive value"
    );
}

#[test]
fn explicit_ranking_uses_defaults_for_absent_fields() {
    let lookup = explicit();

    let params = RankingRequestParameters::from_lookup(&lookup).expect("defaults");

    assert_eq!(params.region(), DEFAULT_REGION);
    assert_eq!(params.priorities().priorities(), &names(&DEFAULT_PRIORITIES));
    assert_eq!(params.project_areas().keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(params.project_areas()[&1].polygons().0.len(), 2);
    assert_eq!(params.max_area_km2(), None);
    assert_eq!(params.max_cost_usd(), None);
}

#[test]
fn explicit_ranking_reads_every_field() {
    let lookup = explicit()
        .with("region", "southern_california")
        .with("priorities", "fire_dynamics")
        .with("priority_weights", "4")
        .with("project_areas", area_json(5, Some(3310), &RING))
        .with("project_areas", area_json(6, None, &RING))
        .with("max_area", "120.5")
        .with("max_cost", "80000");

    let params = RankingRequestParameters::from_lookup(&lookup).expect("valid request");

    assert_eq!(params.region(), "southern_california");
    assert_eq!(params.priorities().weights(), &[4.0]);
    assert_eq!(params.project_areas()[&5].srid(), 3310);
    assert_eq!(params.project_areas()[&6].srid(), DEFAULT_SRID);
    assert_eq!(params.max_area_km2(), Some(120.5));
    assert_eq!(params.max_cost_usd(), Some(80000.0));
}

/// Geometry errors for one record, read through the assembler owning `field`.
fn geometry_error(field: &str, record: serde_json::Value) -> RequestParamsError {
    let lookup = explicit().with(field, record.to_string());
    let result = match field {
        "planning_area" => GenerationRequestParameters::from_lookup(&lookup).map(|_| ()),
        _ => RankingRequestParameters::from_lookup(&lookup).map(|_| ()),
    };
    match result {
        Ok(()) => panic!("{field} record should be rejected: {record}"),
        Err(error) => error,
    }
}

#[test]
fn geometry_records_need_an_id() {
    for field in ["project_areas", "planning_area"] {
        let error = geometry_error(field, json!({ "polygons": [{ "coordinates": RING }] }));

        assert!(matches!(error, RequestParamsError::MissingField(_)));
        assert_eq!(
            error.to_string(),
            format!("url params, {field}, missing field, \"id\"")
        );
    }
}

#[test]
fn geometry_records_need_polygons() {
    for field in ["project_areas", "planning_area"] {
        let error = geometry_error(field, json!({ "id": 1, "srid": 4269 }));

        assert!(matches!(error, RequestParamsError::MissingField(_)));
        assert_eq!(
            error.to_string(),
            format!("url parameter, {field}, missing field, \"polygons\"")
        );
    }
}

#[test]
fn empty_polygon_lists_name_the_field() {
    for field in ["project_areas", "planning_area"] {
        let error = geometry_error(field, json!({ "id": 1, "polygons": [] }));

        assert!(matches!(error, RequestParamsError::EmptyList(_)));
        assert_eq!(
            error.to_string(),
            format!("url parameter, {field}, field, \"polygons\" is an empty list")
        );
    }
}

#[test]
fn short_rings_fail_geometry_construction() {
    let ring = [[-120.0, 39.0], [-119.0, 39.0], [-119.0, 40.0]];
    let lookup = explicit().with("project_areas", area_json(1, None, &ring));

    let error = RankingRequestParameters::from_lookup(&lookup).expect_err("three points");

    assert!(matches!(error, RequestParamsError::GeometryConstruction(_)));
    assert!(error
        .to_string()
        .contains("LinearRing requires at least 4 points, got 3"));
}

#[test]
fn repeated_project_area_ids_are_rejected() {
    let lookup = explicit()
        .with("project_areas", area_json(3, None, &RING))
        .with("project_areas", area_json(3, None, &RING));

    let error = RankingRequestParameters::from_lookup(&lookup).expect_err("id 3 twice");

    assert_eq!(error.to_string(), "url parameter, project_areas, repeats id 3");
}

#[test]
fn stored_mode_needs_a_project_id() {
    let lookup = QueryParams::new();

    let Err(error) = RankingRequest::from_lookup(&lookup) else {
        panic!("stored mode without project_id should fail");
    };

    assert_eq!(error.to_string(), "missing url parameter, project_id");
}

#[test]
fn flag_selects_explicit_mode() {
    let lookup = explicit().with("project_id", "11");
    assert!(matches!(
        RankingRequest::from_lookup(&lookup),
        Ok(RankingRequest::Explicit(_))
    ));

    let lookup = QueryParams::new()
        .with(USE_URL_DEFAULTS, "false")
        .with("project_id", "11");
    assert!(matches!(
        RankingRequest::from_lookup(&lookup),
        Ok(RankingRequest::Stored { project_id: 11 })
    ));
}

#[test]
fn explicit_generation_uses_defaults_for_absent_fields() {
    let lookup = explicit().with("num_clusters", "12");
    let request = GenerationRequest::from_lookup(&lookup, None).expect("explicit");

    let params = GenerationRequestParameters::assemble(request, &MemoryRepository::default())
        .expect("defaults");

    assert_eq!(params.region(), DEFAULT_REGION);
    assert_eq!(params.planning_area().id(), 1);
    assert_eq!(params.planning_area().srid(), DEFAULT_SRID);
    assert_eq!(params.cluster_params().num_clusters(), 12);
    assert_eq!(params.priorities().len(), DEFAULT_PRIORITIES.len());
}

#[test]
fn explicit_generation_reads_a_planning_area() {
    let lookup = explicit().with("planning_area", area_json(77, Some(26910), &RING));

    let params = GenerationRequestParameters::from_lookup(&lookup).expect("valid");

    assert_eq!(params.planning_area().id(), 77);
    assert_eq!(params.planning_area().srid(), 26910);
    assert_eq!(params.planning_area().rings()[0].len(), 4);
}

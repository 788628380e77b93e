//! Single-field readers over a [`ParamLookup`].
//!
//! Each reader applies its field's default when the key is absent and fails
//! with the field's documented message when the value violates a bound.

use std::str::FromStr;

use super::cluster::{
    ClusterAlgorithmType, ClusterParameters, DEFAULT_NUM_CLUSTERS, DEFAULT_PIXEL_INDEX_WEIGHT,
};
use super::error::RequestParamsError;
use super::geometry::{parse_geometry, ProjectAreaGeometry};
use super::lookup::ParamLookup;
use crate::forsys::priorities::WeightedPriorities;

pub const CLUSTER_ALGORITHM_TYPE: &str = "cluster_algorithm_type";
pub const NUM_CLUSTERS: &str = "num_clusters";
pub const CLUSTER_PIXEL_INDEX_WEIGHT: &str = "cluster_pixel_index_weight";
pub const PRIORITIES: &str = "priorities";
pub const PRIORITY_WEIGHTS: &str = "priority_weights";
pub const MAX_AREA: &str = "max_area";
pub const MAX_COST: &str = "max_cost";
pub const PROJECT_AREAS: &str = "project_areas";
pub const PLANNING_AREA: &str = "planning_area";

pub fn read_cluster_algorithm_type(
    lookup: &dyn ParamLookup,
) -> Result<ClusterAlgorithmType, RequestParamsError> {
    let Some(raw) = lookup.get(CLUSTER_ALGORITHM_TYPE) else {
        return Ok(ClusterAlgorithmType::default());
    };
    let raw = raw.trim();
    raw.parse::<i64>()
        .ok()
        .and_then(ClusterAlgorithmType::from_code)
        .ok_or_else(|| {
            RequestParamsError::InvalidEnumValue(format!(
                "{raw} is not a valid ClusterAlgorithmType"
            ))
        })
}

pub fn read_num_clusters(lookup: &dyn ParamLookup) -> Result<u32, RequestParamsError> {
    let Some(raw) = lookup.get(NUM_CLUSTERS) else {
        return Ok(DEFAULT_NUM_CLUSTERS);
    };
    let value: i64 = parse_number(NUM_CLUSTERS, raw)?;
    if value <= 0 {
        return Err(RequestParamsError::InvalidParameter(
            "expected num_clusters to be > 0".to_string(),
        ));
    }
    u32::try_from(value).map_err(|_| {
        RequestParamsError::InvalidParameter(format!(
            "expected num_clusters to be at most {}",
            u32::MAX
        ))
    })
}

pub fn read_pixel_index_weight(lookup: &dyn ParamLookup) -> Result<f64, RequestParamsError> {
    let Some(raw) = lookup.get(CLUSTER_PIXEL_INDEX_WEIGHT) else {
        return Ok(DEFAULT_PIXEL_INDEX_WEIGHT);
    };
    let value: f64 = parse_number(CLUSTER_PIXEL_INDEX_WEIGHT, raw)?;
    if !(value.is_finite() && value > 0.0) {
        return Err(RequestParamsError::InvalidParameter(
            "expected pixel_index_weight to be > 0".to_string(),
        ));
    }
    Ok(value)
}

pub fn read_cluster_parameters(
    lookup: &dyn ParamLookup,
) -> Result<ClusterParameters, RequestParamsError> {
    let algorithm = read_cluster_algorithm_type(lookup)?;
    let num_clusters = read_num_clusters(lookup)?;
    let pixel_index_weight = read_pixel_index_weight(lookup)?;
    Ok(ClusterParameters::new(
        algorithm,
        num_clusters,
        pixel_index_weight,
    ))
}

/// Reads `priorities` and `priority_weights`. Missing priorities fall back to
/// `defaults`; missing weights default to 1 each.
pub fn read_weighted_priorities(
    lookup: &dyn ParamLookup,
    defaults: &[&str],
) -> Result<WeightedPriorities, RequestParamsError> {
    let mut priorities: Vec<String> = lookup
        .get_all(PRIORITIES)
        .into_iter()
        .map(str::to_string)
        .collect();
    if priorities.is_empty() {
        priorities = defaults.iter().map(|name| name.to_string()).collect();
    }

    let raw_weights = lookup.get_all(PRIORITY_WEIGHTS);
    if raw_weights.is_empty() {
        return WeightedPriorities::uniform(priorities);
    }

    let weights = raw_weights
        .into_iter()
        .map(|raw| parse_number::<f64>(PRIORITY_WEIGHTS, raw))
        .collect::<Result<Vec<_>, _>>()?;
    WeightedPriorities::new(priorities, weights)
}

/// Optional ceiling such as `max_area` or `max_cost`; must be positive when
/// present.
pub fn read_positive_float(
    lookup: &dyn ParamLookup,
    name: &'static str,
) -> Result<Option<f64>, RequestParamsError> {
    let Some(raw) = lookup.get(name) else {
        return Ok(None);
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(Some(value)),
        _ => Err(RequestParamsError::InvalidParameter(format!(
            "expected param, {name}, to have a positive value"
        ))),
    }
}

/// Every geometry record carried by the repeated field `field`.
pub fn read_geometries(
    lookup: &dyn ParamLookup,
    field: &'static str,
) -> Result<Vec<ProjectAreaGeometry>, RequestParamsError> {
    lookup
        .get_all(field)
        .into_iter()
        .map(|raw| parse_geometry(field, raw))
        .collect()
}

/// The first geometry record carried by `field`, if any.
pub fn read_geometry(
    lookup: &dyn ParamLookup,
    field: &'static str,
) -> Result<Option<ProjectAreaGeometry>, RequestParamsError> {
    lookup
        .get(field)
        .map(|raw| parse_geometry(field, raw))
        .transpose()
}

pub(crate) fn parse_number<T: FromStr>(
    field: &'static str,
    raw: &str,
) -> Result<T, RequestParamsError> {
    raw.trim().parse::<T>().map_err(|_| {
        RequestParamsError::InvalidParameter(format!(
            "expected {field} to be a number, got \"{raw}\""
        ))
    })
}

use std::collections::BTreeMap;

use super::geometry::{geometry_from_rings, ProjectAreaGeometry};

pub const DEFAULT_REGION: &str = "sierra_cascade_inyo";

pub const DEFAULT_PRIORITIES: [&str; 3] =
    ["fire_dynamics", "forest_resilience", "species_diversity"];

const NORTH_RING: [[f64; 2]; 5] = [
    [-120.14015536869722, 39.05413814388948],
    [-120.18409937110482, 39.48622140686506],
    [-119.93422142411087, 39.48622140686506],
    [-119.93422142411087, 39.05413814388948],
    [-120.14015536869722, 39.05413814388948],
];

const SOUTH_RING: [[f64; 2]; 5] = [
    [-120.14015536869722, 38.05413814388948],
    [-120.18409937110482, 38.48622140686506],
    [-119.93422142411087, 38.48622140686506],
    [-119.93422142411087, 38.05413814388948],
    [-120.14015536869722, 38.05413814388948],
];

const WEST_RING: [[f64; 2]; 5] = [
    [-121.14015536869722, 39.05413814388948],
    [-121.18409937110482, 39.48622140686506],
    [-120.53422142411087, 39.48622140686506],
    [-120.53422142411087, 39.05413814388948],
    [-121.14015536869722, 39.05413814388948],
];

/// Project areas used when an explicit-mode ranking request names none.
pub fn default_project_areas() -> BTreeMap<i64, ProjectAreaGeometry> {
    [
        geometry_from_rings(1, &[&NORTH_RING, &SOUTH_RING]),
        geometry_from_rings(2, &[&WEST_RING]),
    ]
    .into_iter()
    .map(|geometry| (geometry.id(), geometry))
    .collect()
}

/// Planning area used when an explicit-mode generation request names none.
pub fn default_planning_area() -> ProjectAreaGeometry {
    geometry_from_rings(1, &[&NORTH_RING, &SOUTH_RING])
}

//! Request parameter validation for ranking and generation requests.

mod cluster;
mod defaults;
mod error;
mod generation;
mod geometry;
mod lookup;
mod ranking;
pub mod validators;

pub use cluster::{
    ClusterAlgorithmType, ClusterParameters, DEFAULT_NUM_CLUSTERS, DEFAULT_PIXEL_INDEX_WEIGHT,
};
pub use defaults::{
    default_planning_area, default_project_areas, DEFAULT_PRIORITIES, DEFAULT_REGION,
};
pub use error::RequestParamsError;
pub use generation::{GenerationRequest, GenerationRequestParameters, PLAN_ID};
pub use geometry::{ProjectAreaGeometry, DEFAULT_SRID};
pub use lookup::{is_truthy, ParamLookup, QueryParams};
pub use ranking::{RankingRequest, RankingRequestParameters, PROJECT_ID};

pub const REGION: &str = "region";

/// When truthy, every parameter is read from the request itself.
pub const USE_URL_DEFAULTS: &str = "set_all_params_via_url_with_default_values";

//! Scenario ranking for forest treatment planning: request parameters in,
//! ranked scenarios out.

pub mod output;
pub mod params;
pub mod priorities;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use output::{
    ForsysHeaders, ForsysOutputError, ForsysRawOutput, ForsysTable, RankedProject, Scenario,
    ScenarioSetResult,
};
pub use params::{
    ClusterAlgorithmType, ClusterParameters, GenerationRequest, GenerationRequestParameters,
    ParamLookup, ProjectAreaGeometry, QueryParams, RankingRequest, RankingRequestParameters,
    RequestParamsError,
};
pub use priorities::WeightedPriorities;
pub use repository::{
    ConditionRecord, PlanRecord, PlanningRepository, ProjectAreaRecord, ProjectRecord,
    RepositoryError, StoredGeometry, UserId,
};
pub use router::{forsys_router, ScenarioRequest, ScenarioSetRequest, USER_HEADER};
pub use service::{ScenarioPlanningService, ScenarioServiceError};

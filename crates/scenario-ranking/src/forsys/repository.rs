use geo::MultiPolygon;

/// Identity of the user a request is made on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

/// Geometry as persisted alongside plans and project areas.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredGeometry {
    pub srid: i32,
    pub polygons: MultiPolygon<f64>,
}

/// A planning area drawn by a user.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRecord {
    pub id: i64,
    pub owner: Option<UserId>,
    pub region_name: String,
    pub geometry: StoredGeometry,
}

/// A treatment project inside a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    pub id: i64,
    pub plan_id: i64,
    pub max_budget: Option<f64>,
}

/// A candidate treatment unit belonging to a project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectAreaRecord {
    pub id: i64,
    pub geometry: StoredGeometry,
}

/// A condition (priority) attached to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionRecord {
    pub id: i64,
    pub condition_name: String,
}

/// Storage abstraction so the assemblers can be exercised in isolation.
pub trait PlanningRepository: Send + Sync {
    fn plan(&self, id: i64) -> Result<Option<PlanRecord>, RepositoryError>;
    fn project(&self, id: i64) -> Result<Option<ProjectRecord>, RepositoryError>;
    fn project_areas(&self, project_id: i64) -> Result<Vec<ProjectAreaRecord>, RepositoryError>;
    fn project_priorities(&self, project_id: i64)
        -> Result<Vec<ConditionRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{record} record not found")]
    NotFound { record: &'static str },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

pub(crate) fn require<T>(record: Option<T>, kind: &'static str) -> Result<T, RepositoryError> {
    record.ok_or(RepositoryError::NotFound { record: kind })
}

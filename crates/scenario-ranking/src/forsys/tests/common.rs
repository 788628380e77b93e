use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use geo::{polygon, MultiPolygon};
use serde_json::Value;

use crate::forsys::output::{ForsysHeaders, ForsysRawOutput, ForsysTable};
use crate::forsys::repository::{
    ConditionRecord, PlanRecord, PlanningRepository, ProjectAreaRecord, ProjectRecord,
    RepositoryError, StoredGeometry, UserId,
};
use crate::forsys::service::ScenarioPlanningService;

pub(super) const OWNER: UserId = UserId(42);
pub(super) const PLAN_ID: i64 = 7;
pub(super) const PROJECT_ID: i64 = 11;

pub(super) fn square(x: f64, y: f64, srid: i32) -> StoredGeometry {
    StoredGeometry {
        srid,
        polygons: MultiPolygon::new(vec![polygon![
            (x: x, y: y),
            (x: x + 1.0, y: y),
            (x: x + 1.0, y: y + 1.0),
            (x: x, y: y + 1.0),
        ]]),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    plans: BTreeMap<i64, PlanRecord>,
    projects: BTreeMap<i64, ProjectRecord>,
    areas: BTreeMap<i64, Vec<ProjectAreaRecord>>,
    priorities: BTreeMap<i64, Vec<ConditionRecord>>,
}

impl MemoryRepository {
    /// One plan owned by [`OWNER`] with a budgeted project of two areas.
    pub(super) fn seeded() -> Self {
        Self::default()
            .with_plan(PlanRecord {
                id: PLAN_ID,
                owner: Some(OWNER),
                region_name: "sierra_cascade_inyo".to_string(),
                geometry: square(-120.2, 39.0, 3310),
            })
            .with_project(ProjectRecord {
                id: PROJECT_ID,
                plan_id: PLAN_ID,
                max_budget: Some(2500.0),
            })
            .with_area(PROJECT_ID, ProjectAreaRecord {
                id: 101,
                geometry: square(-120.2, 39.0, 4269),
            })
            .with_area(PROJECT_ID, ProjectAreaRecord {
                id: 102,
                geometry: square(-120.1, 39.1, 4269),
            })
            .with_priority(PROJECT_ID, "fire_dynamics")
            .with_priority(PROJECT_ID, "species_diversity")
    }

    pub(super) fn with_plan(mut self, plan: PlanRecord) -> Self {
        self.plans.insert(plan.id, plan);
        self
    }

    pub(super) fn with_project(mut self, project: ProjectRecord) -> Self {
        self.projects.insert(project.id, project);
        self
    }

    pub(super) fn with_area(mut self, project_id: i64, area: ProjectAreaRecord) -> Self {
        self.areas.entry(project_id).or_default().push(area);
        self
    }

    pub(super) fn with_priority(mut self, project_id: i64, name: &str) -> Self {
        let conditions = self.priorities.entry(project_id).or_default();
        let id = conditions.len() as i64 + 1;
        conditions.push(ConditionRecord {
            id,
            condition_name: name.to_string(),
        });
        self
    }
}

impl PlanningRepository for MemoryRepository {
    fn plan(&self, id: i64) -> Result<Option<PlanRecord>, RepositoryError> {
        Ok(self.plans.get(&id).cloned())
    }

    fn project(&self, id: i64) -> Result<Option<ProjectRecord>, RepositoryError> {
        Ok(self.projects.get(&id).cloned())
    }

    fn project_areas(&self, project_id: i64) -> Result<Vec<ProjectAreaRecord>, RepositoryError> {
        Ok(self.areas.get(&project_id).cloned().unwrap_or_default())
    }

    fn project_priorities(
        &self,
        project_id: i64,
    ) -> Result<Vec<ConditionRecord>, RepositoryError> {
        Ok(self.priorities.get(&project_id).cloned().unwrap_or_default())
    }
}

pub(super) struct UnavailableRepository;

impl PlanningRepository for UnavailableRepository {
    fn plan(&self, _id: i64) -> Result<Option<PlanRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn project(&self, _id: i64) -> Result<Option<ProjectRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn project_areas(&self, _project_id: i64) -> Result<Vec<ProjectAreaRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn project_priorities(
        &self,
        _project_id: i64,
    ) -> Result<Vec<ConditionRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> Arc<ScenarioPlanningService<MemoryRepository>> {
    Arc::new(ScenarioPlanningService::new(
        Arc::new(MemoryRepository::seeded()),
        ForsysHeaders::default(),
    ))
}

pub(super) fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Wraps named columns as the engine's project output table.
pub(super) fn raw_output(columns: Vec<(&str, Vec<f64>)>) -> ForsysRawOutput {
    let table = ForsysTable::from_columns(columns).expect("equal length columns");
    ForsysRawOutput::from_project_output(table)
}

/// Two ranked rows contributing to a single priority `p1`.
pub(super) fn two_project_columns() -> Vec<(&'static str, Vec<f64>)> {
    vec![
        ("proj_id", vec![1.0, 2.0]),
        ("treatment_rank", vec![1.0, 2.0]),
        ("ETrt_area", vec![10.0, 5.0]),
        ("ETrt_cost", vec![100.0, 50.0]),
        ("ETrt_p1", vec![2.0, 1.0]),
    ]
}

pub(super) const TWO_SCENARIO_CSV: &str = "\
proj_id,treatment_rank,Pr_1_p1,Pr_2_p2,ETrt_p1,ETrt_p2,ETrt_area,ETrt_cost
1,1,5,2,1.5,0.5,10,100
1,1,1,3,1.5,0.5,10,100
2,2,5,2,0.5,1.0,4,40
2,2,1,3,0.5,1.0,4,40
";

pub(super) async fn read_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

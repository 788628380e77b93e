use geo::{polygon, MultiPolygon};
use metrics_exporter_prometheus::PrometheusHandle;
use scenario_ranking::forsys::{
    ConditionRecord, PlanRecord, PlanningRepository, ProjectAreaRecord, ProjectRecord,
    RepositoryError, StoredGeometry, UserId,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read-only planning records served until a database is attached.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPlanningRepository {
    plans: HashMap<i64, PlanRecord>,
    projects: HashMap<i64, ProjectRecord>,
    areas: HashMap<i64, Vec<ProjectAreaRecord>>,
    conditions: HashMap<i64, Vec<ConditionRecord>>,
}

pub(crate) const DEMO_OWNER: UserId = UserId(1);

impl InMemoryPlanningRepository {
    /// One plan owned by [`DEMO_OWNER`] holding project 1 with two areas.
    pub(crate) fn seeded() -> Self {
        let mut repository = Self::default();
        repository.plans.insert(
            1,
            PlanRecord {
                id: 1,
                owner: Some(DEMO_OWNER),
                region_name: "sierra_cascade_inyo".to_string(),
                geometry: block(-120.184, 39.054, 0.25),
            },
        );
        repository.projects.insert(
            1,
            ProjectRecord {
                id: 1,
                plan_id: 1,
                max_budget: Some(250_000.0),
            },
        );
        repository.areas.insert(
            1,
            vec![
                ProjectAreaRecord {
                    id: 1,
                    geometry: block(-120.14, 39.06, 0.05),
                },
                ProjectAreaRecord {
                    id: 2,
                    geometry: block(-120.02, 39.2, 0.05),
                },
            ],
        );
        repository.conditions.insert(
            1,
            ["fire_dynamics", "forest_resilience", "species_diversity"]
                .into_iter()
                .enumerate()
                .map(|(index, name)| ConditionRecord {
                    id: index as i64 + 1,
                    condition_name: name.to_string(),
                })
                .collect(),
        );
        repository
    }
}

impl PlanningRepository for InMemoryPlanningRepository {
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
        Ok(self.conditions.get(&project_id).cloned().unwrap_or_default())
    }
}

fn block(x: f64, y: f64, size: f64) -> StoredGeometry {
    StoredGeometry {
        srid: 4269,
        polygons: MultiPolygon::new(vec![polygon![
            (x: x, y: y),
            (x: x + size, y: y),
            (x: x + size, y: y + size),
            (x: x, y: y + size),
        ]]),
    }
}

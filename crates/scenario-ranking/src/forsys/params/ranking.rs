use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::defaults::{default_project_areas, DEFAULT_PRIORITIES, DEFAULT_REGION};
use super::error::RequestParamsError;
use super::geometry::ProjectAreaGeometry;
use super::lookup::{is_truthy, ParamLookup};
use super::validators::{
    parse_number, read_geometries, read_positive_float, read_weighted_priorities, MAX_AREA,
    MAX_COST, PROJECT_AREAS,
};
use super::{REGION, USE_URL_DEFAULTS};
use crate::forsys::priorities::WeightedPriorities;
use crate::forsys::repository::{require, PlanningRepository};

pub const PROJECT_ID: &str = "project_id";

/// How a ranking request supplies its inputs.
#[derive(Clone, Copy)]
pub enum RankingRequest<'a> {
    /// Every field comes from the request, with defaults for absent ones.
    Explicit(&'a dyn ParamLookup),
    /// Inputs are loaded from a stored project and its project areas.
    Stored { project_id: i64 },
}

impl<'a> RankingRequest<'a> {
    /// Chooses the mode the way url queries express it: the defaults flag
    /// selects explicit mode, otherwise `project_id` is required.
    pub fn from_lookup(lookup: &'a dyn ParamLookup) -> Result<Self, RequestParamsError> {
        if lookup.get(USE_URL_DEFAULTS).is_some_and(is_truthy) {
            return Ok(Self::Explicit(lookup));
        }
        let raw = lookup
            .get(PROJECT_ID)
            .ok_or(RequestParamsError::MissingParameter(PROJECT_ID))?;
        Ok(Self::Stored {
            project_id: parse_number(PROJECT_ID, raw)?,
        })
    }
}

/// Validated inputs for ranking the project areas of one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingRequestParameters {
    region: String,
    priorities: WeightedPriorities,
    project_areas: BTreeMap<i64, ProjectAreaGeometry>,
    max_area_km2: Option<f64>,
    max_cost_usd: Option<f64>,
}

impl RankingRequestParameters {
    pub fn assemble<R>(
        request: RankingRequest<'_>,
        repository: &R,
    ) -> Result<Self, RequestParamsError>
    where
        R: PlanningRepository + ?Sized,
    {
        match request {
            RankingRequest::Explicit(lookup) => Self::from_lookup(lookup),
            RankingRequest::Stored { project_id } => Self::from_stored(project_id, repository),
        }
    }

    pub fn from_lookup(lookup: &dyn ParamLookup) -> Result<Self, RequestParamsError> {
        let region = lookup.get(REGION).unwrap_or(DEFAULT_REGION).to_string();
        let priorities = read_weighted_priorities(lookup, &DEFAULT_PRIORITIES)?;

        let geometries = read_geometries(lookup, PROJECT_AREAS)?;
        let project_areas = if geometries.is_empty() {
            default_project_areas()
        } else {
            key_by_id(geometries)?
        };

        let max_area_km2 = read_positive_float(lookup, MAX_AREA)?;
        let max_cost_usd = read_positive_float(lookup, MAX_COST)?;

        debug!(
            %region,
            project_areas = project_areas.len(),
            "ranking parameters read from request"
        );
        Ok(Self {
            region,
            priorities,
            project_areas,
            max_area_km2,
            max_cost_usd,
        })
    }

    pub fn from_stored<R>(project_id: i64, repository: &R) -> Result<Self, RequestParamsError>
    where
        R: PlanningRepository + ?Sized,
    {
        let project = require(repository.project(project_id)?, "Project")?;
        let plan = require(repository.plan(project.plan_id)?, "Plan")?;

        let project_areas = repository
            .project_areas(project.id)?
            .into_iter()
            .map(|area| (area.id, ProjectAreaGeometry::from_stored(area.id, &area.geometry)))
            .collect::<BTreeMap<_, _>>();

        let priorities = repository
            .project_priorities(project.id)?
            .into_iter()
            .map(|condition| condition.condition_name)
            .collect();
        let priorities = WeightedPriorities::uniform(priorities)?;

        debug!(
            project_id,
            plan_id = plan.id,
            project_areas = project_areas.len(),
            "ranking parameters loaded from stored project"
        );
        Ok(Self {
            region: plan.region_name,
            priorities,
            project_areas,
            max_area_km2: None,
            max_cost_usd: project.max_budget.filter(|budget| *budget > 0.0),
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn priorities(&self) -> &WeightedPriorities {
        &self.priorities
    }

    pub fn project_areas(&self) -> &BTreeMap<i64, ProjectAreaGeometry> {
        &self.project_areas
    }

    pub fn max_area_km2(&self) -> Option<f64> {
        self.max_area_km2
    }

    pub fn max_cost_usd(&self) -> Option<f64> {
        self.max_cost_usd
    }
}

fn key_by_id(
    geometries: Vec<ProjectAreaGeometry>,
) -> Result<BTreeMap<i64, ProjectAreaGeometry>, RequestParamsError> {
    let mut keyed = BTreeMap::new();
    for geometry in geometries {
        let id = geometry.id();
        if keyed.insert(id, geometry).is_some() {
            return Err(RequestParamsError::InvalidParameter(format!(
                "url parameter, {PROJECT_AREAS}, repeats id {id}"
            )));
        }
    }
    Ok(keyed)
}

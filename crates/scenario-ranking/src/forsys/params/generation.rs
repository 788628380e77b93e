use serde::Serialize;
use tracing::debug;

use super::cluster::ClusterParameters;
use super::defaults::{default_planning_area, DEFAULT_PRIORITIES, DEFAULT_REGION};
use super::error::RequestParamsError;
use super::geometry::ProjectAreaGeometry;
use super::lookup::{is_truthy, ParamLookup};
use super::validators::{
    parse_number, read_cluster_parameters, read_geometry, read_weighted_priorities, PLANNING_AREA,
};
use super::{REGION, USE_URL_DEFAULTS};
use crate::forsys::priorities::WeightedPriorities;
use crate::forsys::repository::{require, PlanningRepository, UserId};

pub const PLAN_ID: &str = "id";

const PERMISSION_DENIED: &str = "You do not have permission to view this plan.";

/// How a generation request supplies its inputs.
#[derive(Clone, Copy)]
pub enum GenerationRequest<'a> {
    /// Every field comes from the request, with defaults for absent ones.
    Explicit(&'a dyn ParamLookup),
    /// Region and planning area come from a stored plan the caller owns.
    Stored {
        plan_id: i64,
        identity: Option<UserId>,
    },
}

impl<'a> GenerationRequest<'a> {
    pub fn from_lookup(
        lookup: &'a dyn ParamLookup,
        identity: Option<UserId>,
    ) -> Result<Self, RequestParamsError> {
        if lookup.get(USE_URL_DEFAULTS).is_some_and(is_truthy) {
            return Ok(Self::Explicit(lookup));
        }
        let raw = lookup
            .get(PLAN_ID)
            .ok_or(RequestParamsError::MissingParameter(PLAN_ID))?;
        Ok(Self::Stored {
            plan_id: parse_number(PLAN_ID, raw)?,
            identity,
        })
    }
}

/// Validated inputs for generating candidate projects inside a planning area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequestParameters {
    region: String,
    priorities: WeightedPriorities,
    planning_area: ProjectAreaGeometry,
    cluster_params: ClusterParameters,
}

impl GenerationRequestParameters {
    pub fn assemble<R>(
        request: GenerationRequest<'_>,
        repository: &R,
    ) -> Result<Self, RequestParamsError>
    where
        R: PlanningRepository + ?Sized,
    {
        match request {
            GenerationRequest::Explicit(lookup) => Self::from_lookup(lookup),
            GenerationRequest::Stored { plan_id, identity } => {
                Self::from_stored(plan_id, identity, repository)
            }
        }
    }

    pub fn from_lookup(lookup: &dyn ParamLookup) -> Result<Self, RequestParamsError> {
        let region = lookup.get(REGION).unwrap_or(DEFAULT_REGION).to_string();
        let priorities = read_weighted_priorities(lookup, &DEFAULT_PRIORITIES)?;
        let planning_area =
            read_geometry(lookup, PLANNING_AREA)?.unwrap_or_else(default_planning_area);
        let cluster_params = read_cluster_parameters(lookup)?;

        debug!(%region, planning_area = planning_area.id(), "generation parameters read from request");
        Ok(Self {
            region,
            priorities,
            planning_area,
            cluster_params,
        })
    }

    pub fn from_stored<R>(
        plan_id: i64,
        identity: Option<UserId>,
        repository: &R,
    ) -> Result<Self, RequestParamsError>
    where
        R: PlanningRepository + ?Sized,
    {
        let identity = identity.ok_or(RequestParamsError::Unauthenticated)?;
        let plan = require(repository.plan(plan_id)?, "Plan")?;
        if plan.owner != Some(identity) {
            return Err(RequestParamsError::PermissionDenied(
                PERMISSION_DENIED.to_string(),
            ));
        }

        let priorities = WeightedPriorities::uniform(
            DEFAULT_PRIORITIES.iter().map(|name| name.to_string()).collect(),
        )?;

        debug!(plan_id, "generation parameters loaded from stored plan");
        Ok(Self {
            region: plan.region_name,
            priorities,
            planning_area: ProjectAreaGeometry::from_stored(plan.id, &plan.geometry),
            cluster_params: ClusterParameters::default(),
        })
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn priorities(&self) -> &WeightedPriorities {
        &self.priorities
    }

    pub fn planning_area(&self) -> &ProjectAreaGeometry {
        &self.planning_area
    }

    pub fn cluster_params(&self) -> &ClusterParameters {
        &self.cluster_params
    }
}

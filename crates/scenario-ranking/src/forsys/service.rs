use std::sync::Arc;

use super::output::{
    ForsysHeaders, ForsysOutputError, ForsysRawOutput, ForsysTable, Scenario, ScenarioSetResult,
};
use super::params::{
    GenerationRequest, GenerationRequestParameters, RankingRequest, RankingRequestParameters,
    RequestParamsError,
};
use super::priorities::WeightedPriorities;
use super::repository::PlanningRepository;

/// Service tying the parameter assemblers to stored planning records and
/// reshaping engine output under the deployment's column naming.
pub struct ScenarioPlanningService<R> {
    repository: Arc<R>,
    headers: ForsysHeaders,
}

impl<R> ScenarioPlanningService<R>
where
    R: PlanningRepository + 'static,
{
    pub fn new(repository: Arc<R>, headers: ForsysHeaders) -> Self {
        Self {
            repository,
            headers,
        }
    }

    pub fn headers(&self) -> &ForsysHeaders {
        &self.headers
    }

    pub fn ranking_params(
        &self,
        request: RankingRequest<'_>,
    ) -> Result<RankingRequestParameters, ScenarioServiceError> {
        Ok(RankingRequestParameters::assemble(
            request,
            self.repository.as_ref(),
        )?)
    }

    pub fn generation_params(
        &self,
        request: GenerationRequest<'_>,
    ) -> Result<GenerationRequestParameters, ScenarioServiceError> {
        Ok(GenerationRequestParameters::assemble(
            request,
            self.repository.as_ref(),
        )?)
    }

    pub fn scenario_set(
        &self,
        raw: &ForsysRawOutput,
        priorities: &[String],
    ) -> Result<ScenarioSetResult, ScenarioServiceError> {
        Ok(ScenarioSetResult::from_raw_output(
            raw,
            priorities,
            &self.headers,
        )?)
    }

    pub fn scenario(
        &self,
        raw: &ForsysRawOutput,
        priorities: &WeightedPriorities,
    ) -> Result<Scenario, ScenarioServiceError> {
        Ok(Scenario::from_raw_output(raw, priorities, &self.headers)?)
    }

    /// Reads a project output table from CSV text and builds the scenario set.
    pub fn scenario_set_from_csv(
        &self,
        csv: &str,
        priorities: &[String],
    ) -> Result<ScenarioSetResult, ScenarioServiceError> {
        let raw = raw_output_from_csv(csv)?;
        self.scenario_set(&raw, priorities)
    }

    pub fn scenario_from_csv(
        &self,
        csv: &str,
        priorities: &WeightedPriorities,
    ) -> Result<Scenario, ScenarioServiceError> {
        let raw = raw_output_from_csv(csv)?;
        self.scenario(&raw, priorities)
    }
}

fn raw_output_from_csv(csv: &str) -> Result<ForsysRawOutput, ForsysOutputError> {
    let table = ForsysTable::from_csv_reader(csv.as_bytes())?;
    Ok(ForsysRawOutput::from_project_output(table))
}

/// Errors surfaced by the scenario planning service.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioServiceError {
    #[error(transparent)]
    Params(#[from] RequestParamsError),
    #[error(transparent)]
    Output(#[from] ForsysOutputError),
}

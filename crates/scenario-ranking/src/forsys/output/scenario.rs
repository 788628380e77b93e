use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use tracing::{info, warn};

use super::{ForsysHeaders, ForsysOutputError, ForsysRawOutput, ForsysTable};
use crate::forsys::priorities::{first_duplicate, scenario_key, WeightedPriorities};

/// One project area as ranked by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedProject {
    id: i64,
    weighted_priority_scores: BTreeMap<String, f64>,
    total_score: f64,
    rank: i64,
}

impl RankedProject {
    pub fn new(id: i64, rank: i64, weighted_priority_scores: BTreeMap<String, f64>) -> Self {
        let total_score = weighted_priority_scores.values().sum();
        Self {
            id,
            weighted_priority_scores,
            total_score,
            rank,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn weighted_priority_scores(&self) -> &BTreeMap<String, f64> {
        &self.weighted_priority_scores
    }

    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    pub fn rank(&self) -> i64 {
        self.rank
    }
}

/// Ranked projects for one weight combination, with running area and cost.
///
/// Cumulative series follow the row order of the engine output, so entry `i`
/// is the sum of the first `i + 1` projects' area (or cost) contributions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    priority_weights: BTreeMap<String, f64>,
    ranked_projects: Vec<RankedProject>,
    cumulative_ranked_project_area: Vec<f64>,
    cumulative_ranked_project_cost: Vec<f64>,
}

impl Scenario {
    fn empty(priority_weights: BTreeMap<String, f64>) -> Self {
        Self {
            priority_weights,
            ranked_projects: Vec::new(),
            cumulative_ranked_project_area: Vec::new(),
            cumulative_ranked_project_cost: Vec::new(),
        }
    }

    fn push(&mut self, project: RankedProject, area: f64, cost: f64) {
        let area = self.cumulative_ranked_project_area.last().map_or(area, |sum| sum + area);
        let cost = self.cumulative_ranked_project_cost.last().map_or(cost, |sum| sum + cost);
        self.ranked_projects.push(project);
        self.cumulative_ranked_project_area.push(area);
        self.cumulative_ranked_project_cost.push(cost);
    }

    /// Builds a single scenario; every row is weighted by `priorities`.
    pub fn from_raw_output(
        raw: &ForsysRawOutput,
        priorities: &WeightedPriorities,
        headers: &ForsysHeaders,
    ) -> Result<Self, ForsysOutputError> {
        let table = raw.project_output()?;
        let columns = ProjectColumns::resolve(table, priorities.priorities(), headers)?;

        let mut scenario = Self::empty(priorities.weight_map());
        for row in 0..table.row_count() {
            let project =
                columns.ranked_project(row, priorities.priorities(), priorities.weights())?;
            scenario.push(project, columns.area[row], columns.cost[row]);
        }

        scenario.warn_if_unordered(&priorities.scenario_key());
        info!(projects = scenario.len(), "scenario built from forsys output");
        Ok(scenario)
    }

    pub fn priority_weights(&self) -> &BTreeMap<String, f64> {
        &self.priority_weights
    }

    pub fn ranked_projects(&self) -> &[RankedProject] {
        &self.ranked_projects
    }

    pub fn cumulative_ranked_project_area(&self) -> &[f64] {
        &self.cumulative_ranked_project_area
    }

    pub fn cumulative_ranked_project_cost(&self) -> &[f64] {
        &self.cumulative_ranked_project_cost
    }

    pub fn len(&self) -> usize {
        self.ranked_projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked_projects.is_empty()
    }

    /// True when engine ranks never decrease along the row order.
    pub fn ranks_ascending(&self) -> bool {
        self.ranked_projects
            .windows(2)
            .all(|pair| pair[0].rank <= pair[1].rank)
    }

    fn warn_if_unordered(&self, key: &str) {
        if !self.ranks_ascending() {
            warn!(
                scenario = key,
                "forsys rows are not in rank order; cumulative sums follow row order"
            );
        }
    }
}

/// Scenarios of one batched engine run, keyed by their weight combination.
///
/// Scenarios keep the order in which the engine output first mentions
/// their weight combination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioSetResult {
    scenarios: Vec<(String, Scenario)>,
    index: BTreeMap<String, usize>,
}

impl ScenarioSetResult {
    /// Buckets rows by the per-row weights the engine reports for each
    /// priority. Weights are truncated to integers before use.
    pub fn from_raw_output(
        raw: &ForsysRawOutput,
        priorities: &[String],
        headers: &ForsysHeaders,
    ) -> Result<Self, ForsysOutputError> {
        if let Some(duplicate) = first_duplicate(priorities) {
            return Err(ForsysOutputError::DuplicatePriority(duplicate.to_string()));
        }

        let table = raw.project_output()?;
        let weight_columns = priorities
            .iter()
            .enumerate()
            .map(|(index, priority)| {
                let name = headers.priority_weight(index, priority);
                table.column(&name).map(|values| (name, values))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let columns = ProjectColumns::resolve(table, priorities, headers)?;

        let mut result = Self::default();
        for row in 0..table.row_count() {
            let weights = weight_columns
                .iter()
                .map(|(name, values)| finite_cell(name, values, row).map(f64::trunc))
                .collect::<Result<Vec<_>, _>>()?;
            let project = columns.ranked_project(row, priorities, &weights)?;
            let key = scenario_key(
                priorities
                    .iter()
                    .map(String::as_str)
                    .zip(weights.iter().copied()),
            );

            let position = match result.index.get(&key) {
                Some(position) => *position,
                None => {
                    let weights = priorities
                        .iter()
                        .cloned()
                        .zip(weights.iter().copied())
                        .collect();
                    result.index.insert(key.clone(), result.scenarios.len());
                    result.scenarios.push((key, Scenario::empty(weights)));
                    result.scenarios.len() - 1
                }
            };
            result.scenarios[position]
                .1
                .push(project, columns.area[row], columns.cost[row]);
        }

        for (key, scenario) in &result.scenarios {
            scenario.warn_if_unordered(key);
        }
        info!(
            scenarios = result.len(),
            rows = table.row_count(),
            "scenario set built from forsys output"
        );
        Ok(result)
    }

    pub fn get(&self, key: &str) -> Option<&Scenario> {
        self.index
            .get(key)
            .map(|position| &self.scenarios[*position].1)
    }

    /// Key and scenario pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scenario)> + '_ {
        self.scenarios
            .iter()
            .map(|(key, scenario)| (key.as_str(), scenario))
    }

    pub fn scenarios(&self) -> impl Iterator<Item = &Scenario> + '_ {
        self.scenarios.iter().map(|(_, scenario)| scenario)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.scenarios.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

impl Serialize for ScenarioSetResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Columns shared by both builders, resolved before any row is read.
struct ProjectColumns<'t> {
    contributions: Vec<&'t [f64]>,
    area: &'t [f64],
    cost: &'t [f64],
    project_id: (String, &'t [f64]),
    rank: (String, &'t [f64]),
}

impl<'t> ProjectColumns<'t> {
    fn resolve(
        table: &'t ForsysTable,
        priorities: &[String],
        headers: &ForsysHeaders,
    ) -> Result<Self, ForsysOutputError> {
        let contributions = priorities
            .iter()
            .map(|priority| table.column(&headers.contribution(priority)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            contributions,
            area: table.column(&headers.area_contribution())?,
            cost: table.column(&headers.cost_contribution())?,
            project_id: named(table, headers.project_id())?,
            rank: named(table, headers.rank())?,
        })
    }

    /// Ids and ranks must be finite; they are truncated to integers.
    fn ranked_project(
        &self,
        row: usize,
        priorities: &[String],
        weights: &[f64],
    ) -> Result<RankedProject, ForsysOutputError> {
        let id = finite_cell(&self.project_id.0, self.project_id.1, row)?;
        let rank = finite_cell(&self.rank.0, self.rank.1, row)?;
        let scores = priorities
            .iter()
            .zip(weights)
            .zip(&self.contributions)
            .map(|((priority, weight), column)| (priority.clone(), column[row] * weight))
            .collect();
        Ok(RankedProject::new(id as i64, rank as i64, scores))
    }
}

fn named<'t>(
    table: &'t ForsysTable,
    name: &str,
) -> Result<(String, &'t [f64]), ForsysOutputError> {
    Ok((name.to_string(), table.column(name)?))
}

fn finite_cell(column: &str, values: &[f64], row: usize) -> Result<f64, ForsysOutputError> {
    let value = values[row];
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ForsysOutputError::InvalidCell {
            column: column.to_string(),
            row,
            value: value.to_string(),
        })
    }
}

//! Reshapes raw ranking-engine output into scenarios.

mod scenario;
mod table;

pub use scenario::{RankedProject, Scenario, ScenarioSetResult};
pub use table::{ForsysRawOutput, ForsysTable, PROJECT_OUTPUT_INDEX};

use thiserror::Error;

pub const TREATMENT_RANK_HEADER: &str = "treatment_rank";

const CONTRIBUTION_PREFIX: &str = "ETrt_";

#[derive(Debug, Error)]
pub enum ForsysOutputError {
    #[error("header, {0}, is not a forsys output header")]
    UnknownColumn(String),
    #[error("forsys output has no project output table at index {}", PROJECT_OUTPUT_INDEX)]
    MissingProjectOutput,
    #[error("column, {column}, has {found} values but the table has {expected} rows")]
    RaggedColumn {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("column, {0}, appears more than once")]
    DuplicateColumn(String),
    #[error("column, {column}, row {row}: \"{value}\" is not a number")]
    InvalidCell {
        column: String,
        row: usize,
        value: String,
    },
    #[error("priority, {0}, was given more than once")]
    DuplicatePriority(String),
    #[error("invalid forsys output csv: {0}")]
    Csv(#[from] csv::Error),
}

/// Column naming used by the ranking engine for one deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForsysHeaders {
    project_id: String,
    area: String,
    cost: String,
}

impl ForsysHeaders {
    pub fn new(project_id: String, area: String, cost: String) -> Self {
        Self {
            project_id,
            area,
            cost,
        }
    }

    /// Per-row weight column for the priority at `index` (zero based).
    pub fn priority_weight(&self, index: usize, priority: &str) -> String {
        format!("Pr_{}_{}", index + 1, priority)
    }

    pub fn contribution(&self, name: &str) -> String {
        format!("{CONTRIBUTION_PREFIX}{name}")
    }

    pub fn area_contribution(&self) -> String {
        self.contribution(&self.area)
    }

    pub fn cost_contribution(&self) -> String {
        self.contribution(&self.cost)
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn rank(&self) -> &str {
        TREATMENT_RANK_HEADER
    }
}

impl Default for ForsysHeaders {
    fn default() -> Self {
        Self::new("proj_id".to_string(), "area".to_string(), "cost".to_string())
    }
}

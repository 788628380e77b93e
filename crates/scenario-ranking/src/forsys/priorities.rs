use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::params::RequestParamsError;

/// Priorities paired positionally with their weights.
///
/// Order is significant: it must match the order the ranking engine was
/// invoked with, since engine output columns are keyed by position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedPriorities {
    priorities: Vec<String>,
    weights: Vec<f64>,
}

impl WeightedPriorities {
    pub fn new(priorities: Vec<String>, weights: Vec<f64>) -> Result<Self, RequestParamsError> {
        if priorities.len() != weights.len() {
            return Err(RequestParamsError::InvalidParameter(format!(
                "expected {} priority weights, instead, {} were given",
                priorities.len(),
                weights.len()
            )));
        }
        if let Some(duplicate) = first_duplicate(&priorities) {
            return Err(RequestParamsError::InvalidParameter(format!(
                "priority, {duplicate}, was given more than once"
            )));
        }
        if let Some((priority, _)) = priorities
            .iter()
            .zip(&weights)
            .find(|(_, weight)| !(weight.is_finite() && **weight > 0.0))
        {
            return Err(RequestParamsError::InvalidParameter(format!(
                "expected weight for priority, {priority}, to have a positive value"
            )));
        }
        Ok(Self {
            priorities,
            weights,
        })
    }

    /// Every priority weighted 1.
    pub fn uniform(priorities: Vec<String>) -> Result<Self, RequestParamsError> {
        let weights = vec![1.0; priorities.len()];
        Self::new(priorities, weights)
    }

    pub fn priorities(&self) -> &[String] {
        &self.priorities
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.priorities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.priorities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.priorities
            .iter()
            .map(String::as_str)
            .zip(self.weights.iter().copied())
    }

    pub fn weight_map(&self) -> BTreeMap<String, f64> {
        self.iter()
            .map(|(priority, weight)| (priority.to_string(), weight))
            .collect()
    }

    /// Key under which a scenario with these weights is reported.
    pub fn scenario_key(&self) -> String {
        scenario_key(self.iter())
    }
}

/// `"name:weight"` pairs, space separated, in the given order. Weights are
/// truncated to integers, matching how the engine reports them.
pub fn scenario_key<'a>(weights: impl IntoIterator<Item = (&'a str, f64)>) -> String {
    weights
        .into_iter()
        .map(|(priority, weight)| format!("{priority}:{}", weight.trunc() as i64))
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn first_duplicate(priorities: &[String]) -> Option<&str> {
    let mut seen = HashSet::new();
    priorities
        .iter()
        .find(|priority| !seen.insert(priority.as_str()))
        .map(String::as_str)
}

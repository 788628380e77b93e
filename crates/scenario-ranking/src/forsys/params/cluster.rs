use std::fmt::{Display, Formatter};

use serde::Serialize;

pub const DEFAULT_NUM_CLUSTERS: u32 = 500;
pub const DEFAULT_PIXEL_INDEX_WEIGHT: f64 = 0.01;

/// Clustering applied to planning-area pixels before project generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterAlgorithmType {
    #[default]
    None,
    HierarchicalInProcess,
}

impl ClusterAlgorithmType {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::HierarchicalInProcess),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::None => 0,
            Self::HierarchicalInProcess => 1,
        }
    }
}

impl Display for ClusterAlgorithmType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::HierarchicalInProcess => write!(f, "hierarchical_in_process"),
        }
    }
}

/// Validated clustering options; `num_clusters` and `pixel_index_weight` are
/// strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClusterParameters {
    algorithm: ClusterAlgorithmType,
    num_clusters: u32,
    pixel_index_weight: f64,
}

impl ClusterParameters {
    pub(crate) fn new(
        algorithm: ClusterAlgorithmType,
        num_clusters: u32,
        pixel_index_weight: f64,
    ) -> Self {
        Self {
            algorithm,
            num_clusters,
            pixel_index_weight,
        }
    }

    pub fn algorithm(&self) -> ClusterAlgorithmType {
        self.algorithm
    }

    pub fn num_clusters(&self) -> u32 {
        self.num_clusters
    }

    pub fn pixel_index_weight(&self) -> f64 {
        self.pixel_index_weight
    }
}

impl Default for ClusterParameters {
    fn default() -> Self {
        Self::new(
            ClusterAlgorithmType::None,
            DEFAULT_NUM_CLUSTERS,
            DEFAULT_PIXEL_INDEX_WEIGHT,
        )
    }
}

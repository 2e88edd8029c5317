//! Misalignment severity bins.
//!
//! Bins are right-inclusive steps of 0.2 over misalignment (1 − similarity):
//! Low (0, 0.2], Moderate (0.2, 0.4], High (0.4, 0.6], Severe (0.6, 0.8],
//! Critical (0.8, 1.0]. Exactly 0 counts as Low.

use crate::records::SubtaskRow;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum MisalignmentCluster {
    Low,
    Moderate,
    High,
    Severe,
    Critical,
}

impl MisalignmentCluster {
    pub const ALL: [MisalignmentCluster; 5] = [
        MisalignmentCluster::Low,
        MisalignmentCluster::Moderate,
        MisalignmentCluster::High,
        MisalignmentCluster::Severe,
        MisalignmentCluster::Critical,
    ];

    pub fn classify(misalignment: f64) -> Self {
        if misalignment <= 0.2 {
            MisalignmentCluster::Low
        } else if misalignment <= 0.4 {
            MisalignmentCluster::Moderate
        } else if misalignment <= 0.6 {
            MisalignmentCluster::High
        } else if misalignment <= 0.8 {
            MisalignmentCluster::Severe
        } else {
            MisalignmentCluster::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MisalignmentCluster::Low => "Low",
            MisalignmentCluster::Moderate => "Moderate",
            MisalignmentCluster::High => "High",
            MisalignmentCluster::Severe => "Severe",
            MisalignmentCluster::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for MisalignmentCluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Subtask count per cluster, every cluster listed in severity order.
pub fn cluster_counts(subtasks: &[SubtaskRow]) -> Vec<(MisalignmentCluster, usize)> {
    MisalignmentCluster::ALL
        .iter()
        .map(|&cluster| {
            let count = subtasks.iter().filter(|s| s.cluster == cluster).count();
            (cluster, count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bin_edges_are_right_inclusive() {
        assert_eq!(MisalignmentCluster::classify(0.0), MisalignmentCluster::Low);
        assert_eq!(MisalignmentCluster::classify(0.2), MisalignmentCluster::Low);
        assert_eq!(MisalignmentCluster::classify(0.21), MisalignmentCluster::Moderate);
        assert_eq!(MisalignmentCluster::classify(0.4), MisalignmentCluster::Moderate);
        assert_eq!(MisalignmentCluster::classify(0.6), MisalignmentCluster::High);
        assert_eq!(MisalignmentCluster::classify(0.8), MisalignmentCluster::Severe);
        assert_eq!(MisalignmentCluster::classify(0.81), MisalignmentCluster::Critical);
        assert_eq!(MisalignmentCluster::classify(1.0), MisalignmentCluster::Critical);
    }

    #[test]
    fn counts_include_empty_bins() {
        let counts = cluster_counts(&[]);
        assert_eq!(counts.len(), 5);
        assert!(counts.iter().all(|(_, n)| *n == 0));
        assert_eq!(counts[4].0.to_string(), "Critical");
    }
}

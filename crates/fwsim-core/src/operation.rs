//! Relaxation checks produced by one stepper pass.

use serde::Serialize;

use crate::distance::Distance;
use crate::store::CellUpdate;

/// One candidate relaxation of `dist[i][j]` through pivot `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateOperation {
    /// Source vertex.
    pub i: usize,
    /// Destination vertex.
    pub j: usize,
    /// Pivot vertex of the iteration.
    pub k: usize,
    /// `dist[i][j]` before the iteration.
    pub old_dist: Distance,
    /// `dist[i][k] + dist[k][j]` before the iteration, saturating.
    pub new_dist: Distance,
    /// Whether the candidate is strictly shorter.
    pub updated: bool,
}

impl UpdateOperation {
    /// Evaluate the relaxation of `(i, j)` through `k`.
    #[must_use]
    pub fn evaluate(
        i: usize,
        j: usize,
        k: usize,
        old_dist: Distance,
        via_k: (Distance, Distance),
    ) -> Self {
        let new_dist = via_k.0.saturating_add(via_k.1);
        Self {
            i,
            j,
            k,
            old_dist,
            new_dist,
            updated: new_dist < old_dist,
        }
    }

    /// The write this operation commits, if it relaxes the distance.
    #[must_use]
    pub fn cell_update(&self) -> Option<CellUpdate> {
        self.updated.then_some(CellUpdate {
            i: self.i,
            j: self.j,
            distance: self.new_dist,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorter_path_is_updated() {
        let op = UpdateOperation::evaluate(
            0,
            2,
            1,
            Distance::INFINITY,
            (Distance::new(1), Distance::new(1)),
        );
        assert!(op.updated);
        assert_eq!(op.new_dist, Distance::new(2));
        assert_eq!(
            op.cell_update(),
            Some(CellUpdate {
                i: 0,
                j: 2,
                distance: Distance::new(2)
            })
        );
    }

    #[test]
    fn equal_path_is_not_updated() {
        let op = UpdateOperation::evaluate(
            0,
            1,
            2,
            Distance::new(4),
            (Distance::new(2), Distance::new(2)),
        );
        assert!(!op.updated);
        assert_eq!(op.cell_update(), None);
    }

    #[test]
    fn infinite_leg_never_updates() {
        let op = UpdateOperation::evaluate(
            1,
            0,
            2,
            Distance::INFINITY,
            (Distance::INFINITY, Distance::new(1)),
        );
        assert!(op.new_dist.is_infinite());
        assert!(!op.updated);
    }
}

//! Distance store: the original graph and the working distances.
//!
//! The store owns both matrices. The original is only replaced by
//! [`DistanceStore::initialize`]; the working copy is only written through
//! [`DistanceStore::apply_updates`] and [`DistanceStore::restore`].

use tracing::info;

use crate::distance::Distance;
use crate::error::SimError;
use crate::matrix::{DistanceMatrix, VertexBounds};

/// A relaxed distance to write into the working matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellUpdate {
    /// Source vertex.
    pub i: usize,
    /// Destination vertex.
    pub j: usize,
    /// New distance from `i` to `j`.
    pub distance: Distance,
}

/// Holds the immutable original graph and the mutable working distances.
#[derive(Debug, Clone)]
pub struct DistanceStore {
    original: DistanceMatrix,
    working: DistanceMatrix,
    bounds: VertexBounds,
}

impl DistanceStore {
    /// Create an empty store (no vertices) accepting `bounds`.
    #[must_use]
    pub fn new(bounds: VertexBounds) -> Self {
        Self {
            original: DistanceMatrix::disconnected(0),
            working: DistanceMatrix::disconnected(0),
            bounds,
        }
    }

    /// Create a store initialized with `matrix` under the default bounds.
    pub fn with_matrix(matrix: &DistanceMatrix) -> Result<Self, SimError> {
        let mut store = Self::new(VertexBounds::default());
        store.initialize(matrix)?;
        Ok(store)
    }

    /// Replace both matrices with a copy of `matrix`.
    ///
    /// The matrix is fully validated first; on error the store is unchanged.
    pub fn initialize(&mut self, matrix: &DistanceMatrix) -> Result<(), SimError> {
        matrix.validate(self.bounds)?;
        self.original = matrix.clone();
        self.working = matrix.clone();
        info!(vertices = matrix.len(), "Distance store initialized");
        Ok(())
    }

    /// Write relaxed distances into the working matrix.
    pub fn apply_updates<I>(&mut self, updates: I)
    where
        I: IntoIterator<Item = CellUpdate>,
    {
        for update in updates {
            self.working.set(update.i, update.j, update.distance);
        }
    }

    /// Reset the working matrix to the original graph.
    pub fn restore(&mut self) {
        self.working.clone_from(&self.original);
    }

    /// Current distance from `i` to `j`.
    #[must_use]
    pub fn cell(&self, i: usize, j: usize) -> Distance {
        self.working.get(i, j)
    }

    /// Original edge weight from `i` to `j`.
    #[must_use]
    pub fn original(&self, i: usize, j: usize) -> Distance {
        self.original.get(i, j)
    }

    /// Whether the distance from `i` to `j` has been shortened since initialization.
    #[must_use]
    pub fn is_improved(&self, i: usize, j: usize) -> bool {
        self.cell(i, j) != self.original(i, j)
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.working.len()
    }

    /// The working distances.
    #[must_use]
    pub fn working_matrix(&self) -> &DistanceMatrix {
        &self.working
    }

    /// The original graph.
    #[must_use]
    pub fn original_matrix(&self) -> &DistanceMatrix {
        &self.original
    }

    /// Vertex bounds enforced by [`DistanceStore::initialize`].
    #[must_use]
    pub fn bounds(&self) -> VertexBounds {
        self.bounds
    }
}

impl Default for DistanceStore {
    fn default() -> Self {
        Self::new(VertexBounds::default())
    }
}

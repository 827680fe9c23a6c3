//! Random graph generation.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::constants::{
    DEFAULT_EDGE_PROBABILITY, DEFAULT_MAX_WEIGHT, DEFAULT_MIN_WEIGHT, DEFAULT_RANDOM_VERTICES,
};
use crate::distance::Distance;
use crate::error::SimError;
use crate::matrix::DistanceMatrix;

/// Parameters of a random directed graph.
///
/// Every ordered pair `(i, j)` with `i != j` independently receives an edge
/// with probability `edge_probability`, weighted uniformly from `weights`.
/// Missing edges are infinite; the diagonal is zero.
///
/// # Example
/// ```
/// use fwsim_core::RandomGraph;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let matrix = RandomGraph::with_vertices(4).generate(&mut rng).unwrap();
/// assert_eq!(matrix.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RandomGraph {
    /// Number of vertices.
    pub vertices: usize,
    /// Probability that a given directed edge exists, in `[0, 1]`.
    pub edge_probability: f64,
    /// Range edge weights are drawn from.
    pub weights: RangeInclusive<u32>,
}

impl RandomGraph {
    /// Default parameters with a different vertex count.
    #[must_use]
    pub fn with_vertices(vertices: usize) -> Self {
        Self {
            vertices,
            ..Self::default()
        }
    }

    /// Check the parameters without generating anything.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.vertices.checked_mul(self.vertices).is_none() {
            return Err(SimError::Config(format!(
                "too many vertices for a distance matrix: {}",
                self.vertices
            )));
        }
        if !(0.0..=1.0).contains(&self.edge_probability) {
            return Err(SimError::Config(format!(
                "edge probability must be within [0, 1], got {}",
                self.edge_probability
            )));
        }
        if self.weights.is_empty() {
            return Err(SimError::Config(format!(
                "empty weight range {}..={}",
                self.weights.start(),
                self.weights.end()
            )));
        }
        if Distance::new(*self.weights.end()).is_infinite() {
            return Err(SimError::Config(
                "weight range must not include the infinity sentinel".into(),
            ));
        }
        Ok(())
    }

    /// Generate a matrix using `rng`.
    ///
    /// The result is square with a zero diagonal; vertex bounds are checked
    /// later, when the matrix is loaded into a store.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<DistanceMatrix, SimError> {
        self.validate()?;
        let n = self.vertices;
        let mut matrix = DistanceMatrix::disconnected(n);
        for i in 0..n {
            for j in 0..n {
                if i != j && rng.gen_bool(self.edge_probability) {
                    let weight = rng.gen_range(self.weights.clone());
                    matrix.set(i, j, Distance::new(weight));
                }
            }
        }
        Ok(matrix)
    }
}

impl Default for RandomGraph {
    fn default() -> Self {
        Self {
            vertices: DEFAULT_RANDOM_VERTICES,
            edge_probability: DEFAULT_EDGE_PROBABILITY,
            weights: DEFAULT_MIN_WEIGHT..=DEFAULT_MAX_WEIGHT,
        }
    }
}

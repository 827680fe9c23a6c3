//! Square distance matrices and their validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_VERTICES, MIN_INTERACTIVE_VERTICES, MIN_VERTICES};
use crate::distance::Distance;
use crate::error::SimError;

/// Inclusive range of vertex counts a store accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBounds {
    /// Smallest accepted vertex count.
    pub min: usize,
    /// Largest accepted vertex count.
    pub max: usize,
}

impl VertexBounds {
    /// Bounds used by interactive front ends (3 to 10 vertices).
    pub const INTERACTIVE: Self = Self {
        min: MIN_INTERACTIVE_VERTICES,
        max: MAX_VERTICES,
    };

    /// Create bounds, rejecting an empty or zero-based range.
    pub fn new(min: usize, max: usize) -> Result<Self, SimError> {
        if min == 0 || min > max {
            return Err(SimError::Config(format!(
                "invalid vertex bounds {min}..={max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Whether `n` vertices fall inside the bounds.
    #[must_use]
    pub fn contains(&self, n: usize) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

impl Default for VertexBounds {
    fn default() -> Self {
        Self {
            min: MIN_VERTICES,
            max: MAX_VERTICES,
        }
    }
}

/// An `n × n` matrix of distances stored row-major.
///
/// Construction guarantees the matrix is square; size and diagonal checks
/// are applied by [`DistanceMatrix::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Distance>>", into = "Vec<Vec<Distance>>")]
pub struct DistanceMatrix {
    n: usize,
    cells: Vec<Distance>,
}

impl DistanceMatrix {
    /// Create an `n × n` matrix with a zero diagonal and infinity elsewhere.
    #[must_use]
    pub fn disconnected(n: usize) -> Self {
        let mut cells = vec![Distance::INFINITY; n * n];
        for i in 0..n {
            cells[i * n + i] = Distance::ZERO;
        }
        Self { n, cells }
    }

    /// Build a matrix from rows, failing if it is not square.
    ///
    /// # Example
    /// ```
    /// use fwsim_core::{Distance, DistanceMatrix};
    ///
    /// let inf = u32::MAX;
    /// let m = DistanceMatrix::from_rows([[0, 4, inf], [4, 0, 1], [inf, 1, 0]]).unwrap();
    /// assert_eq!(m.len(), 3);
    /// assert_eq!(m.get(1, 2), Distance::new(1));
    /// assert!(m.get(0, 2).is_infinite());
    ///
    /// assert!(DistanceMatrix::from_rows(vec![vec![0u32, 1], vec![1]]).is_err());
    /// ```
    pub fn from_rows<R, D>(rows: impl IntoIterator<Item = R>) -> Result<Self, SimError>
    where
        R: IntoIterator<Item = D>,
        D: Into<Distance>,
    {
        let rows: Vec<Vec<Distance>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        let n = rows.len();
        let mut cells = Vec::with_capacity(n * n);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n {
                return Err(SimError::InvalidShape {
                    row,
                    len: values.len(),
                    expected: n,
                });
            }
            cells.extend(values);
        }
        Ok(Self { n, cells })
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Whether the matrix has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance from `i` to `j`.
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Distance {
        self.cells[self.index(i, j)]
    }

    /// Overwrite the distance from `i` to `j`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: Distance) {
        let idx = self.index(i, j);
        self.cells[idx] = value;
    }

    /// Iterate over the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Distance]> {
        // chunks(0) panics, and an empty matrix has no rows anyway.
        self.cells.chunks(self.n.max(1))
    }

    /// Copy the matrix into nested rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<Distance>> {
        self.rows().map(<[Distance]>::to_vec).collect()
    }

    /// Check the vertex count against `bounds` and that the diagonal is zero.
    pub fn validate(&self, bounds: VertexBounds) -> Result<(), SimError> {
        if !bounds.contains(self.n) {
            return Err(SimError::InvalidSize {
                size: self.n,
                min: bounds.min,
                max: bounds.max,
            });
        }
        for i in 0..self.n {
            let value = self.get(i, i);
            if value != Distance::ZERO {
                return Err(SimError::InvalidDiagonal { index: i, value });
            }
        }
        Ok(())
    }

    #[inline]
    fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.n && j < self.n, "cell ({i}, {j}) out of range");
        i * self.n + j
    }
}

impl TryFrom<Vec<Vec<Distance>>> for DistanceMatrix {
    type Error = SimError;

    fn try_from(rows: Vec<Vec<Distance>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<DistanceMatrix> for Vec<Vec<Distance>> {
    fn from(matrix: DistanceMatrix) -> Self {
        matrix.to_rows()
    }
}

impl fmt::Display for DistanceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INF: u32 = u32::MAX;

    #[test]
    fn from_rows_square() {
        let m = DistanceMatrix::from_rows([[0, 1, INF], [INF, 0, 1], [1, INF, 0]]).unwrap();
        assert_eq!(m.len(), 3);
        assert_eq!(m.get(0, 1), Distance::new(1));
        assert!(m.get(1, 0).is_infinite());
        assert_eq!(m.rows().count(), 3);
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let err = DistanceMatrix::from_rows(vec![vec![0u32, 1, 2], vec![1, 0], vec![2, 1, 0]])
            .unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidShape {
                row: 1,
                len: 2,
                expected: 3
            }
        );
    }

    #[test]
    fn from_rows_rejects_wide() {
        let err = DistanceMatrix::from_rows([[0u32, 1, 2], [1, 0, 2]]).unwrap_err();
        assert!(matches!(err, SimError::InvalidShape { row: 0, len: 3, expected: 2 }));
    }

    #[test]
    fn disconnected_has_zero_diagonal() {
        let m = DistanceMatrix::disconnected(4);
        for i in 0..4 {
            for j in 0..4 {
                if i == j {
                    assert_eq!(m.get(i, j), Distance::ZERO);
                } else {
                    assert!(m.get(i, j).is_infinite());
                }
            }
        }
        assert!(m.validate(VertexBounds::default()).is_ok());
    }

    #[test]
    fn validate_size() {
        let m = DistanceMatrix::disconnected(2);
        let err = m.validate(VertexBounds::INTERACTIVE).unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidSize {
                size: 2,
                min: 3,
                max: 10
            }
        );

        let empty = DistanceMatrix::disconnected(0);
        assert!(empty.is_empty());
        assert!(matches!(
            empty.validate(VertexBounds::default()),
            Err(SimError::InvalidSize { size: 0, .. })
        ));
    }

    #[test]
    fn validate_diagonal() {
        let m = DistanceMatrix::from_rows([[0u32, 1], [1, 3]]).unwrap();
        let err = m.validate(VertexBounds::default()).unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidDiagonal {
                index: 1,
                value: Distance::new(3)
            }
        );
    }

    #[test]
    fn validate_infinite_diagonal() {
        let m = DistanceMatrix::from_rows([[INF]]).unwrap();
        assert!(matches!(
            m.validate(VertexBounds::default()),
            Err(SimError::InvalidDiagonal { index: 0, .. })
        ));
    }

    #[test]
    fn vertex_bounds_new() {
        assert!(VertexBounds::new(3, 10).is_ok());
        assert!(VertexBounds::new(0, 10).is_err());
        assert!(VertexBounds::new(5, 4).is_err());
        let b = VertexBounds::new(2, 2).unwrap();
        assert!(b.contains(2));
        assert!(!b.contains(3));
    }

    #[test]
    fn set_and_get() {
        let mut m = DistanceMatrix::disconnected(3);
        m.set(0, 2, Distance::new(9));
        assert_eq!(m.get(0, 2), Distance::new(9));
        assert!(m.get(2, 0).is_infinite());
    }

    #[test]
    fn display_rows() {
        let m = DistanceMatrix::from_rows([[0, INF], [2, 0]]).unwrap();
        assert_eq!(m.to_string(), "0 ∞\n2 0\n");
    }

    #[test]
    fn serde_round_trip_and_shape_check() {
        let m = DistanceMatrix::from_rows([[0, 5], [INF, 0]]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[[0,5],[null,0]]");
        let back: DistanceMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);

        assert!(serde_json::from_str::<DistanceMatrix>("[[0,1],[1]]").is_err());
    }
}

//! Unitary circuit matrices.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::{MatrixAxis, StateError, StateResult};
use crate::vector::AmplitudeVector;

/// A `2^n × 2^n` unitary matrix equivalent to a built circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitMatrix {
    matrix: Array2<Complex64>,
    num_used_gates: usize,
}

impl CircuitMatrix {
    /// Build a matrix from rows without checking unitarity.
    pub fn new(rows: Vec<Vec<Complex64>>, num_used_gates: usize) -> StateResult<Self> {
        let n = rows.len();
        if !n.is_power_of_two() {
            return Err(StateError::InvalidShape {
                rows: n,
                cols: rows.first().map_or(0, Vec::len),
            });
        }
        if let Some(bad) = rows.iter().find(|r| r.len() != n) {
            return Err(StateError::InvalidShape {
                rows: n,
                cols: bad.len(),
            });
        }
        let flat: Vec<Complex64> = rows.into_iter().flatten().collect();
        let matrix = Array2::from_shape_vec((n, n), flat).map_err(|_| StateError::InvalidShape {
            rows: n,
            cols: n,
        })?;
        Ok(Self {
            matrix,
            num_used_gates,
        })
    }

    /// Build a matrix from backend output, rejecting non-unitary input.
    pub fn from_backend(
        rows: Vec<Vec<Complex64>>,
        num_used_gates: usize,
        tolerance: f64,
    ) -> StateResult<Self> {
        let matrix = Self::new(rows, num_used_gates)?;
        Self::check_validity(&matrix.matrix, tolerance)?;
        Ok(matrix)
    }

    /// The identity over `num_qubits` qubits.
    pub fn create_identity(num_qubits: usize) -> Self {
        Self {
            matrix: Array2::eye(1 << num_qubits),
            num_used_gates: 0,
        }
    }

    /// Check that every row and every column has unit squared norm.
    pub fn check_validity(matrix: &Array2<Complex64>, tolerance: f64) -> StateResult<()> {
        for (index, row) in matrix.rows().into_iter().enumerate() {
            let sum: f64 = row.iter().map(Complex64::norm_sqr).sum();
            if (sum - 1.0).abs() > tolerance {
                return Err(StateError::NotUnitary {
                    axis: MatrixAxis::Row,
                    index,
                    sum,
                });
            }
        }
        for (index, col) in matrix.columns().into_iter().enumerate() {
            let sum: f64 = col.iter().map(Complex64::norm_sqr).sum();
            if (sum - 1.0).abs() > tolerance {
                return Err(StateError::NotUnitary {
                    axis: MatrixAxis::Column,
                    index,
                    sum,
                });
            }
        }
        Ok(())
    }

    /// Apply this matrix to `vector`.
    ///
    /// The result is tagged with the gate counts of both operands.
    pub fn multiply(&self, vector: &AmplitudeVector) -> StateResult<AmplitudeVector> {
        if self.num_qubits() != vector.num_qubits() {
            return Err(StateError::DimensionMismatch {
                matrix: self.num_qubits(),
                vector: vector.num_qubits(),
            });
        }
        let v = Array1::from(vector.amplitudes().to_vec());
        let result = self.matrix.dot(&v);
        AmplitudeVector::new(
            result.to_vec(),
            self.num_used_gates + vector.num_used_gates(),
        )
    }

    /// Entry at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> Complex64 {
        self.matrix[[row, col]]
    }

    /// Side length of the matrix (2^n).
    pub fn size(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of qubits the matrix acts on.
    pub fn num_qubits(&self) -> usize {
        self.size().trailing_zeros() as usize
    }

    /// Number of gates used to build this matrix.
    pub fn num_used_gates(&self) -> usize {
        self.num_used_gates
    }

    /// Underlying array.
    pub fn as_array(&self) -> &Array2<Complex64> {
        &self.matrix
    }
}

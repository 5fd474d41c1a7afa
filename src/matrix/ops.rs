//! Algebraic operations on [`DenseMatrix`]
//!
//! Every operation here is pure: the operands are borrowed and a freshly
//! allocated matrix is returned. Binary elementwise operations require
//! identical shapes; [`DenseMatrix::dot`] requires `lhs.width == rhs.height`.
//!
//! Scalar multiplication and division, and negation, cannot fail and are also
//! available through the `*`, `/` and unary `-` operators.

use std::ops::{Div, Mul, Neg};

use super::DenseMatrix;
use crate::error::{Error, Result};

impl DenseMatrix {
    fn check_same_shape(&self, other: &DenseMatrix, operation: &'static str) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(Error::DimensionMismatch {
                operation,
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }
        Ok(())
    }

    fn zip_map<F>(&self, other: &DenseMatrix, operation: &'static str, f: F) -> Result<DenseMatrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.check_same_shape(other, operation)?;
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(DenseMatrix::from_raw(self.height, self.width, data))
    }

    /// Elementwise sum.
    pub fn add(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        self.zip_map(other, "add", |a, b| a + b)
    }

    /// Elementwise difference `self - other`.
    pub fn subtract(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        self.zip_map(other, "subtract", |a, b| a - b)
    }

    /// Elementwise (Hadamard) product.
    pub fn multiply_elementwise(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        self.zip_map(other, "multiply_elementwise", |a, b| a * b)
    }

    /// Elementwise quotient `self / other`. Division by zero follows IEEE 754.
    pub fn divide_elementwise(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        self.zip_map(other, "divide_elementwise", |a, b| a / b)
    }

    /// Multiplies every element by `scalar`. Same as `&m * scalar` or `scalar * &m`.
    pub fn scalar_multiply(&self, scalar: f64) -> DenseMatrix {
        self.apply(|v| v * scalar)
    }

    /// Divides every element by `scalar`.
    pub fn scalar_divide(&self, scalar: f64) -> DenseMatrix {
        self.apply(|v| v / scalar)
    }

    /// Elementwise negation. Same as `-&m`.
    pub fn negate(&self) -> DenseMatrix {
        self.apply(|v| -v)
    }

    /// Matrix product `self · other`.
    ///
    /// The result has shape `(self.height, other.width)`. Each element is
    /// accumulated from `0.0` in increasing `k`, so results are bit-for-bit
    /// reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use dense_network::matrix::DenseMatrix;
    ///
    /// let a = DenseMatrix::from_array(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
    /// let b = DenseMatrix::from_array(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
    /// let c = a.dot(&b).unwrap();
    /// assert_eq!(c.to_array(), vec![vec![22.0, 28.0], vec![49.0, 64.0]]);
    /// ```
    pub fn dot(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        if self.width != other.height {
            return Err(Error::DimensionMismatch {
                operation: "dot",
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }

        let (m, n, p) = (self.height, self.width, other.width);
        let mut data = vec![0.0; m * p];
        for i in 0..m {
            let lhs_row = &self.data[i * n..(i + 1) * n];
            for j in 0..p {
                let mut sum = 0.0;
                for (k, &a) in lhs_row.iter().enumerate() {
                    sum += a * other.data[k * p + j];
                }
                data[i * p + j] = sum;
            }
        }
        Ok(DenseMatrix::from_raw(m, p, data))
    }

    /// Applies `f` to every element.
    pub fn apply<F>(&self, f: F) -> DenseMatrix
    where
        F: Fn(f64) -> f64,
    {
        let data = self.data.iter().map(|&v| f(v)).collect();
        DenseMatrix::from_raw(self.height, self.width, data)
    }

    /// Combines two equally shaped matrices element by element with `g`.
    pub fn apply_with<F>(&self, other: &DenseMatrix, g: F) -> Result<DenseMatrix>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.zip_map(other, "apply_with", g)
    }

    /// Swaps rows and columns.
    ///
    /// # Returns
    ///
    /// A new `(width, height)` matrix with `result[j][i] == self[i][j]`.
    ///
    /// # Example
    ///
    /// ```
    /// use dense_network::matrix::DenseMatrix;
    ///
    /// let m = DenseMatrix::from_array(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// assert_eq!(m.transpose().to_array(), vec![vec![1.0, 3.0], vec![2.0, 4.0]]);
    /// ```
    pub fn transpose(&self) -> DenseMatrix {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.width {
            for row in 0..self.height {
                data.push(self.data[row * self.width + col]);
            }
        }
        DenseMatrix::from_raw(self.width, self.height, data)
    }

    /// Sum of all elements, accumulated in row-major order.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}

impl Mul<f64> for &DenseMatrix {
    type Output = DenseMatrix;

    fn mul(self, scalar: f64) -> DenseMatrix {
        self.scalar_multiply(scalar)
    }
}

impl Mul<f64> for DenseMatrix {
    type Output = DenseMatrix;

    fn mul(self, scalar: f64) -> DenseMatrix {
        self.scalar_multiply(scalar)
    }
}

impl Mul<&DenseMatrix> for f64 {
    type Output = DenseMatrix;

    fn mul(self, matrix: &DenseMatrix) -> DenseMatrix {
        matrix.scalar_multiply(self)
    }
}

impl Mul<DenseMatrix> for f64 {
    type Output = DenseMatrix;

    fn mul(self, matrix: DenseMatrix) -> DenseMatrix {
        matrix.scalar_multiply(self)
    }
}

impl Div<f64> for &DenseMatrix {
    type Output = DenseMatrix;

    fn div(self, scalar: f64) -> DenseMatrix {
        self.scalar_divide(scalar)
    }
}

impl Div<f64> for DenseMatrix {
    type Output = DenseMatrix;

    fn div(self, scalar: f64) -> DenseMatrix {
        self.scalar_divide(scalar)
    }
}

impl Neg for &DenseMatrix {
    type Output = DenseMatrix;

    fn neg(self) -> DenseMatrix {
        self.negate()
    }
}

impl Neg for DenseMatrix {
    type Output = DenseMatrix;

    fn neg(self) -> DenseMatrix {
        self.negate()
    }
}

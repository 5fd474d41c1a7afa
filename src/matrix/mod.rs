//! Dense two-dimensional matrix engine
//!
//! [`DenseMatrix`] owns a contiguous row-major buffer of `f64` whose shape is
//! fixed at construction. Algebraic operations (see [`ops`]) and sub-matrix
//! operations (see [`slicing`]) always return a new matrix; only [`fill`],
//! [`fill_random`], [`sanitize`] and [`clamp`] mutate the receiver.
//!
//! Every index and shape check runs before the buffer is touched.
//!
//! [`fill`]: DenseMatrix::fill
//! [`fill_random`]: DenseMatrix::fill_random
//! [`sanitize`]: DenseMatrix::sanitize
//! [`clamp`]: DenseMatrix::clamp

pub mod ops;
pub mod slicing;

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::error::{Error, Result};

/// Fixed-size dense matrix of `f64` values stored row-major.
///
/// # Example
///
/// ```
/// use dense_network::matrix::DenseMatrix;
///
/// let m = DenseMatrix::from_array(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
/// assert_eq!(m.shape(), (2, 2));
/// assert_eq!(m.get(1, 0).unwrap(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    height: usize,
    width: usize,
    data: Vec<f64>,
}

impl DenseMatrix {
    /// Creates a zero-filled matrix of `height` rows and `width` columns.
    ///
    /// Fails with [`Error::InvalidDimension`] if either extent is zero.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        check_extents(height, width)?;
        Ok(Self {
            height,
            width,
            data: vec![0.0; height * width],
        })
    }

    /// Copies a fixed-size 2-D array literal.
    pub fn from_array<const R: usize, const C: usize>(rows: &[[f64; C]; R]) -> Result<Self> {
        check_extents(R, C)?;
        let mut data = Vec::with_capacity(R * C);
        for row in rows {
            data.extend_from_slice(row);
        }
        Ok(Self {
            height: R,
            width: C,
            data,
        })
    }

    /// Builds a matrix from a list of rows.
    ///
    /// All rows must have the same length; ragged input fails with
    /// [`Error::InvalidArgument`].
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        check_extents(height, width)?;
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(Error::InvalidArgument(format!(
                "row {} has {} columns, expected {}",
                index,
                row.len(),
                width
            )));
        }
        Ok(Self {
            height,
            width,
            data: rows.into_iter().flatten().collect(),
        })
    }

    /// Creates a matrix filled with independent uniform draws from `[min, max)`.
    pub fn random<R: Rng + ?Sized>(
        height: usize,
        width: usize,
        rng: &mut R,
        min: f64,
        max: f64,
    ) -> Result<Self> {
        let mut matrix = Self::new(height, width)?;
        matrix.fill_random(rng, min, max)?;
        Ok(matrix)
    }

    pub(crate) fn from_raw(height: usize, width: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), height * width);
        Self {
            height,
            width,
            data,
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// `(height, width)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Row-major view of the whole buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.height {
            return Err(Error::IndexOutOfRange {
                axis: "row",
                index: row,
                bound: self.height,
            });
        }
        if col >= self.width {
            return Err(Error::IndexOutOfRange {
                axis: "column",
                index: col,
                bound: self.width,
            });
        }
        Ok(())
    }

    /// Reads the element at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.check_index(row, col)?;
        Ok(self.data[self.offset(row, col)])
    }

    /// Overwrites the element at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.check_index(row, col)?;
        let offset = self.offset(row, col);
        self.data[offset] = value;
        Ok(())
    }

    /// Borrowed view of one row.
    pub fn row_slice(&self, row: usize) -> Result<&[f64]> {
        self.check_index(row, 0)?;
        let start = self.offset(row, 0);
        Ok(&self.data[start..start + self.width])
    }

    /// Sets every element to `value`, in place.
    pub fn fill(&mut self, value: f64) {
        self.data.iter_mut().for_each(|v| *v = value);
    }

    /// Fills the matrix in place with independent uniform draws from `[min, max)`.
    ///
    /// Any generator works: pass `&mut rand::thread_rng()` for ambient
    /// randomness or a seeded `StdRng` for reproducible output.
    ///
    /// Any pair of finite bounds with `min < max` is accepted, including
    /// `[f64::MIN, f64::MAX)`.
    pub fn fill_random<R: Rng + ?Sized>(&mut self, rng: &mut R, min: f64, max: f64) -> Result<()> {
        let range = SamplingRange::new(min, max)?;
        for value in &mut self.data {
            *value = range.sample(rng);
        }
        Ok(())
    }

    /// Replaces non-finite elements in place: NaN becomes zero and infinities
    /// become `f64::MAX` / `f64::MIN`.
    ///
    /// Returns the number of elements that were rewritten.
    pub fn sanitize(&mut self) -> usize {
        let mut rewritten = 0;
        for value in &mut self.data {
            if value.is_nan() {
                *value = 0.0;
            } else if *value == f64::INFINITY {
                *value = f64::MAX;
            } else if *value == f64::NEG_INFINITY {
                *value = f64::MIN;
            } else {
                continue;
            }
            rewritten += 1;
        }
        rewritten
    }

    /// Clamps every element into `[min, max]` in place; NaN becomes the
    /// midpoint of the range.
    ///
    /// Infinite bounds stand for the representable extremes, so the result
    /// is always finite: `clamp(-inf, inf)` maps NaN to zero and infinities
    /// to `f64::MIN` / `f64::MAX`.
    ///
    /// Fails with [`Error::InvalidArgument`] unless `min < max`. Returns the
    /// number of elements that were rewritten.
    pub fn clamp(&mut self, min: f64, max: f64) -> Result<usize> {
        check_bounds(min, max)?;
        let (min, max) = (min.max(f64::MIN), max.min(f64::MAX));
        let midpoint = min / 2.0 + max / 2.0;
        let mut rewritten = 0;
        for value in &mut self.data {
            let clamped = if value.is_nan() {
                midpoint
            } else {
                (*value).clamp(min, max)
            };
            if clamped.to_bits() != value.to_bits() {
                *value = clamped;
                rewritten += 1;
            }
        }
        Ok(rewritten)
    }

    /// Snapshot of the matrix as nested rows; the result shares nothing with
    /// the matrix buffer.
    pub fn to_array(&self) -> Vec<Vec<f64>> {
        self.data.chunks_exact(self.width).map(<[f64]>::to_vec).collect()
    }
}

fn check_extents(height: usize, width: usize) -> Result<()> {
    if height == 0 || width == 0 {
        return Err(Error::InvalidDimension(format!(
            "matrix must be at least 1x1, got {}x{}",
            height, width
        )));
    }
    Ok(())
}

pub(crate) fn check_bounds(min: f64, max: f64) -> Result<()> {
    // Negated comparison so NaN bounds are rejected too.
    if !(min < max) {
        return Err(Error::InvalidArgument(format!(
            "lower bound {} must be less than upper bound {}",
            min, max
        )));
    }
    Ok(())
}

pub(crate) fn check_sampling_range(min: f64, max: f64) -> Result<()> {
    check_bounds(min, max)?;
    if !(min.is_finite() && max.is_finite()) {
        return Err(Error::InvalidArgument(format!(
            "sampling range [{}, {}) must have finite bounds",
            min, max
        )));
    }
    Ok(())
}

/// Uniform sampler over `[min, max)`.
///
/// When `max - min` overflows, draws come from `[min/2, max/2)` and are
/// doubled; scaling by two is exact, so every draw stays below `max`.
struct SamplingRange {
    uniform: Uniform<f64>,
    scale: f64,
}

impl SamplingRange {
    fn new(min: f64, max: f64) -> Result<Self> {
        check_sampling_range(min, max)?;
        if (max - min).is_finite() {
            Ok(Self {
                uniform: Uniform::new(min, max),
                scale: 1.0,
            })
        } else {
            Ok(Self {
                uniform: Uniform::new(min / 2.0, max / 2.0),
                scale: 2.0,
            })
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.uniform.sample(rng) * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_is_zeroed() {
        let m = DenseMatrix::new(3, 2).unwrap();
        assert_eq!(m.shape(), (3, 2));
        assert!(m.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_zero_extent_rejected() {
        assert!(matches!(
            DenseMatrix::new(0, 3),
            Err(Error::InvalidDimension(_))
        ));
        assert!(matches!(
            DenseMatrix::new(3, 0),
            Err(Error::InvalidDimension(_))
        ));
    }

    #[test]
    fn test_from_rows_ragged() {
        let result = DenseMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_get_out_of_range() {
        let m = DenseMatrix::new(2, 2).unwrap();
        assert!(matches!(
            m.get(2, 0),
            Err(Error::IndexOutOfRange { axis: "row", index: 2, bound: 2 })
        ));
        assert!(matches!(
            m.get(0, 5),
            Err(Error::IndexOutOfRange { axis: "column", .. })
        ));
    }

    #[test]
    fn test_set_out_of_range_leaves_matrix_untouched() {
        let mut m = DenseMatrix::from_array(&[[1.0, 2.0]]).unwrap();
        assert!(m.set(1, 0, 9.0).is_err());
        assert_eq!(m.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_fill_random_range_and_determinism() {
        let mut a = DenseMatrix::new(4, 5).unwrap();
        let mut b = DenseMatrix::new(4, 5).unwrap();
        a.fill_random(&mut StdRng::seed_from_u64(7), -0.5, 0.5).unwrap();
        b.fill_random(&mut StdRng::seed_from_u64(7), -0.5, 0.5).unwrap();

        assert_eq!(a, b);
        assert!(a.as_slice().iter().all(|&v| (-0.5..0.5).contains(&v)));
    }

    #[test]
    fn test_fill_random_inverted_bounds() {
        let mut m = DenseMatrix::from_array(&[[1.0]]).unwrap();
        let result = m.fill_random(&mut StdRng::seed_from_u64(1), 1.0, -1.0);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
        assert_eq!(m.as_slice(), &[1.0]);
    }

    #[test]
    fn test_sanitize() {
        let mut m =
            DenseMatrix::from_array(&[[f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1.5]]).unwrap();
        assert_eq!(m.sanitize(), 3);
        assert_eq!(m.as_slice(), &[0.0, f64::MAX, f64::MIN, 1.5]);
    }

    #[test]
    fn test_clamp() {
        let mut m = DenseMatrix::from_array(&[[f64::NAN, 10.0, -10.0, 0.25]]).unwrap();
        assert_eq!(m.clamp(-1.0, 2.0).unwrap(), 3);
        assert_eq!(m.as_slice(), &[0.5, 2.0, -1.0, 0.25]);
        assert!(matches!(m.clamp(1.0, 1.0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_clamp_infinite_bounds_stays_finite() {
        let mut m =
            DenseMatrix::from_array(&[[f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 3.0]]).unwrap();
        assert_eq!(m.clamp(f64::NEG_INFINITY, f64::INFINITY).unwrap(), 3);
        assert_eq!(m.as_slice(), &[0.0, f64::MAX, f64::MIN, 3.0]);

        let mut upper_open = DenseMatrix::from_array(&[[f64::NAN, -4.0]]).unwrap();
        upper_open.clamp(-2.0, f64::INFINITY).unwrap();
        assert!(upper_open.as_slice().iter().all(|v| v.is_finite()));
        assert_eq!(upper_open.get(0, 1).unwrap(), -2.0);

        let mut lower_open = DenseMatrix::from_array(&[[f64::NAN]]).unwrap();
        lower_open.clamp(f64::NEG_INFINITY, 1.0).unwrap();
        assert!(lower_open.get(0, 0).unwrap().is_finite());
    }

    #[test]
    fn test_fill_random_full_representable_range() {
        let mut m = DenseMatrix::new(8, 8).unwrap();
        m.fill_random(&mut StdRng::seed_from_u64(1), f64::MIN, f64::MAX)
            .unwrap();
        assert!(m
            .as_slice()
            .iter()
            .all(|&v| v.is_finite() && (f64::MIN..f64::MAX).contains(&v)));
    }

    #[test]
    fn test_fill_random_rejects_infinite_bounds() {
        let mut m = DenseMatrix::from_array(&[[1.0]]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            m.fill_random(&mut rng, f64::NEG_INFINITY, 0.0),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            m.fill_random(&mut rng, 0.0, f64::INFINITY),
            Err(Error::InvalidArgument(_))
        ));
        assert!(m.fill_random(&mut rng, 0.0, f64::NAN).is_err());
        assert_eq!(m.as_slice(), &[1.0]);
    }

    #[test]
    fn test_to_array_is_a_copy() {
        let mut m = DenseMatrix::from_array(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let snapshot = m.to_array();
        m.fill(0.0);
        assert_eq!(snapshot, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }
}

//! Row and column extraction, concatenation and removal
//!
//! Extraction and removal take a `start` index and a `count`. A span is valid
//! when `count > 0`, `start < extent` and `start + count <= extent`; the same
//! rule applies on both axes.

use super::DenseMatrix;
use crate::error::{Error, Result};

fn check_span(axis: &'static str, start: usize, count: usize, extent: usize) -> Result<()> {
    if count == 0 {
        return Err(Error::InvalidArgument(format!(
            "{} count must be positive",
            axis
        )));
    }
    if start >= extent {
        return Err(Error::IndexOutOfRange {
            axis,
            index: start,
            bound: extent,
        });
    }
    match start.checked_add(count) {
        Some(end) if end <= extent => Ok(()),
        _ => Err(Error::IndexOutOfRange {
            axis,
            index: start.saturating_add(count),
            bound: extent,
        }),
    }
}

impl DenseMatrix {
    /// Copies `count` rows starting at `start`.
    pub fn get_rows(&self, start: usize, count: usize) -> Result<DenseMatrix> {
        check_span("row", start, count, self.height)?;
        let data = self.data[start * self.width..(start + count) * self.width].to_vec();
        Ok(DenseMatrix::from_raw(count, self.width, data))
    }

    /// Copies a single row as a `1 x width` matrix.
    pub fn get_row(&self, row: usize) -> Result<DenseMatrix> {
        self.get_rows(row, 1)
    }

    /// Copies `count` columns starting at `start`.
    pub fn get_columns(&self, start: usize, count: usize) -> Result<DenseMatrix> {
        check_span("column", start, count, self.width)?;
        let mut data = Vec::with_capacity(self.height * count);
        for row in self.data.chunks_exact(self.width) {
            data.extend_from_slice(&row[start..start + count]);
        }
        Ok(DenseMatrix::from_raw(self.height, count, data))
    }

    /// Copies a single column as a `height x 1` matrix.
    pub fn get_column(&self, col: usize) -> Result<DenseMatrix> {
        self.get_columns(col, 1)
    }

    /// Stacks `other` below `self`. Widths must match.
    pub fn append_rows(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        if self.width != other.width {
            return Err(Error::DimensionMismatch {
                operation: "append_rows",
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }
        let mut data = Vec::with_capacity(self.data.len() + other.data.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&other.data);
        Ok(DenseMatrix::from_raw(
            self.height + other.height,
            self.width,
            data,
        ))
    }

    /// Places `other` to the right of `self`. Heights must match.
    pub fn append_columns(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        if self.height != other.height {
            return Err(Error::DimensionMismatch {
                operation: "append_columns",
                lhs: self.shape(),
                rhs: other.shape(),
            });
        }
        let width = self.width + other.width;
        let mut data = Vec::with_capacity(self.height * width);
        for (left, right) in self
            .data
            .chunks_exact(self.width)
            .zip(other.data.chunks_exact(other.width))
        {
            data.extend_from_slice(left);
            data.extend_from_slice(right);
        }
        Ok(DenseMatrix::from_raw(self.height, width, data))
    }

    /// Copies the matrix without rows `start..start + count`.
    ///
    /// Removing every row would leave an empty matrix and fails with
    /// [`Error::InvalidDimension`].
    pub fn remove_rows(&self, start: usize, count: usize) -> Result<DenseMatrix> {
        check_span("row", start, count, self.height)?;
        if count == self.height {
            return Err(Error::InvalidDimension(format!(
                "removing {} rows would leave an empty matrix",
                count
            )));
        }
        let mut data = Vec::with_capacity((self.height - count) * self.width);
        data.extend_from_slice(&self.data[..start * self.width]);
        data.extend_from_slice(&self.data[(start + count) * self.width..]);
        Ok(DenseMatrix::from_raw(
            self.height - count,
            self.width,
            data,
        ))
    }

    /// Copies the matrix without row `row`.
    pub fn remove_row(&self, row: usize) -> Result<DenseMatrix> {
        self.remove_rows(row, 1)
    }

    /// Copies the matrix without columns `start..start + count`.
    ///
    /// Removing every column fails with [`Error::InvalidDimension`].
    pub fn remove_columns(&self, start: usize, count: usize) -> Result<DenseMatrix> {
        check_span("column", start, count, self.width)?;
        if count == self.width {
            return Err(Error::InvalidDimension(format!(
                "removing {} columns would leave an empty matrix",
                count
            )));
        }
        let width = self.width - count;
        let mut data = Vec::with_capacity(self.height * width);
        for row in self.data.chunks_exact(self.width) {
            data.extend_from_slice(&row[..start]);
            data.extend_from_slice(&row[start + count..]);
        }
        Ok(DenseMatrix::from_raw(self.height, width, data))
    }

    /// Copies the matrix without column `col`.
    pub fn remove_column(&self, col: usize) -> Result<DenseMatrix> {
        self.remove_columns(col, 1)
    }
}

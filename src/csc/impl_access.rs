use ndarray::{Array1, Array2, Data};
use num_traits::ToPrimitive;

use super::CscBase;
use crate::error::{Result, SparseError};
use crate::Float;

/// Element, slice and dense materialization access.
impl<'a, F: Float, S: Data<Elem = F>> CscBase<'a, S> {
    /// Value at `(row, col)`, or zero when nothing is stored there.
    ///
    /// Scans the column's entries and stops at the first row index past `row`.
    pub fn at<R: ToPrimitive, C: ToPrimitive>(&self, row: R, col: C) -> Result<F> {
        let i = self.check_row(&row)?;
        let j = self.check_col(&col)?;
        Ok(self.lookup(i, j))
    }

    #[inline]
    pub(crate) fn lookup(&self, row: usize, col: usize) -> F {
        for k in self.col_span(col) {
            let r = self.indices[k] as usize;
            if r == row {
                return self.data[k];
            } else if r > row {
                break;
            }
        }
        F::zero()
    }

    /// Values of `row` across the requested columns.
    pub fn at_cols<R: ToPrimitive, C: ToPrimitive>(
        &self,
        row: R,
        cols: &[C],
    ) -> Result<Array1<F>> {
        let i = self.check_row(&row)?;
        let mut res = Array1::<F>::zeros(cols.len());
        for (k, col) in cols.iter().enumerate() {
            res[k] = self.lookup(i, self.check_col(col)?);
        }
        Ok(res)
    }

    /// Values of `col` across the requested rows.
    pub fn at_rows<R: ToPrimitive, C: ToPrimitive>(
        &self,
        rows: &[R],
        col: C,
    ) -> Result<Array1<F>> {
        let j = self.check_col(&col)?;
        let mut res = Array1::<F>::zeros(rows.len());
        for (k, row) in rows.iter().enumerate() {
            res[k] = self.lookup(self.check_row(row)?, j);
        }
        Ok(res)
    }

    /// Dense `rows.len() x cols.len()` block of the requested cells.
    pub fn at_block<R: ToPrimitive, C: ToPrimitive>(
        &self,
        rows: &[R],
        cols: &[C],
    ) -> Result<Array2<F>> {
        let rows = rows
            .iter()
            .map(|r| self.check_row(r))
            .collect::<Result<Vec<usize>>>()?;
        let cols = cols
            .iter()
            .map(|c| self.check_col(c))
            .collect::<Result<Vec<usize>>>()?;
        Ok(Array2::from_shape_fn((rows.len(), cols.len()), |(a, b)| {
            self.lookup(rows[a], cols[b])
        }))
    }

    /// Dense copy of column `col`, of length `nrows`.
    ///
    /// O(nrows + nnz in the column).
    pub fn column<C: ToPrimitive>(&self, col: C) -> Result<Array1<F>> {
        let j = self.check_col(&col)?;
        Ok(self.dense_column(j))
    }

    fn dense_column(&self, j: usize) -> Array1<F> {
        let mut c = Array1::<F>::zeros(self.nrows);
        for k in self.col_span(j) {
            c[self.indices[k] as usize] = self.data[k];
        }
        c
    }

    /// Dense copy of row `row`, of length `ncols`.
    ///
    /// Every column is scanned up to the requested row, so this costs
    /// O(ncols * average column nnz), unlike [`CscBase::column`].
    pub fn row<R: ToPrimitive>(&self, row: R) -> Result<Array1<F>> {
        let i = self.check_row(&row)?;
        Ok(self.dense_row(i))
    }

    fn dense_row(&self, i: usize) -> Array1<F> {
        let mut r = Array1::<F>::zeros(self.ncols);
        for j in 0..self.ncols {
            r[j] = self.lookup(i, j);
        }
        r
    }

    /// Dense `nrows x cols.len()` matrix made of the requested columns.
    pub fn select_columns<C: ToPrimitive>(&self, cols: &[C]) -> Result<Array2<F>> {
        let mut res = Array2::<F>::zeros((self.nrows, cols.len()));
        for (k, col) in cols.iter().enumerate() {
            let j = self.check_col(col)?;
            res.column_mut(k).assign(&self.dense_column(j));
        }
        Ok(res)
    }

    /// Dense `rows.len() x ncols` matrix made of the requested rows.
    pub fn select_rows<R: ToPrimitive>(&self, rows: &[R]) -> Result<Array2<F>> {
        let mut res = Array2::<F>::zeros((rows.len(), self.ncols));
        for (k, row) in rows.iter().enumerate() {
            let i = self.check_row(row)?;
            res.row_mut(k).assign(&self.dense_row(i));
        }
        Ok(res)
    }

    /// Main diagonal of a square matrix.
    pub fn diagonal(&self) -> Result<Array1<F>> {
        if self.nrows != self.ncols {
            return Err(SparseError::NotSquare {
                rows: self.nrows,
                cols: self.ncols,
            });
        }
        Ok(Array1::from_shape_fn(self.ncols, |j| self.lookup(j, j)))
    }

    /// Dense `nrows x ncols` copy, for handing the matrix to dense routines.
    pub fn to_dense(&self) -> Array2<F> {
        let mut res = Array2::<F>::zeros((self.nrows, self.ncols));
        for j in 0..self.ncols {
            for k in self.col_span(j) {
                res[[self.indices[k] as usize, j]] = self.data[k];
            }
        }
        res
    }
}

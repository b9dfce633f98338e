use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use super::CscBase;
use crate::error::Result;
use crate::params::{CrossprodParams, ParamGuard};
use crate::traits::MatrixReductions;
use crate::Float;

/// Reductions over stored entries. Accumulation always follows storage order,
/// i.e. increasing row within a column.
impl<'a, F: Float, S: Data<Elem = F>> CscBase<'a, S> {
    /// Sum of each column. O(nnz).
    pub fn col_sums(&self) -> Array1<F> {
        let mut sums = Array1::<F>::zeros(self.ncols);
        for j in 0..self.ncols {
            for k in self.col_span(j) {
                sums[j] += self.data[k];
            }
        }
        sums
    }

    /// Sum of each row, scattered from a single pass over the stored entries.
    /// O(nnz), where calling [`CscBase::row`] for every row would not be.
    pub fn row_sums(&self) -> Array1<F> {
        let mut sums = Array1::<F>::zeros(self.nrows);
        for j in 0..self.ncols {
            for k in self.col_span(j) {
                sums[self.indices[k] as usize] += self.data[k];
            }
        }
        sums
    }

    /// Column means, implicit zeros included.
    pub fn col_means(&self) -> Array1<F> {
        let n = F::cast(self.nrows);
        self.col_sums().mapv(|s| s / n)
    }

    /// Row means, implicit zeros included.
    pub fn row_means(&self) -> Array1<F> {
        let n = F::cast(self.ncols);
        self.row_sums().mapv(|s| s / n)
    }

    /// Dot product of two columns by merging their sorted row indices, in
    /// O(nnz of both columns).
    fn merge_dot(&self, c1: usize, c2: usize) -> F {
        let (mut a, a_end) = (self.indptr[c1] as usize, self.indptr[c1 + 1] as usize);
        let (mut b, b_end) = (self.indptr[c2] as usize, self.indptr[c2 + 1] as usize);
        let mut acc = F::zero();
        while a < a_end && b < b_end {
            let (row_a, row_b) = (self.indices[a], self.indices[b]);
            if row_a == row_b {
                acc += self.data[a] * self.data[b];
                a += 1;
                b += 1;
            } else if row_a < row_b {
                a += 1;
            } else {
                b += 1;
            }
        }
        acc
    }

    fn sum_of_squares(&self, c: usize) -> F {
        self.col_span(c)
            .fold(F::zero(), |acc, k| acc + self.data[k] * self.data[k])
    }

    #[inline]
    fn pair_product(&self, c1: usize, c2: usize) -> F {
        if c1 == c2 {
            self.sum_of_squares(c1)
        } else {
            self.merge_dot(c1, c2)
        }
    }

    /// The symmetric `ncols x ncols` matrix `X^T X`. Only the upper triangle is
    /// computed, the lower one is mirrored from it.
    pub fn crossprod(&self) -> Array2<F> {
        let n = self.ncols;
        let mut res = Array2::<F>::zeros((n, n));
        for c1 in 0..n {
            for c2 in c1..n {
                let v = self.pair_product(c1, c2);
                res[[c1, c2]] = v;
                res[[c2, c1]] = v;
            }
        }
        res
    }
}

impl<'a, F: Float, S: Data<Elem = F> + Sync> CscBase<'a, S> {
    /// [`CscBase::crossprod`] with explicit evaluation parameters. The parallel
    /// path hands one row of the upper triangle to each task and yields the
    /// same values as the serial one.
    pub fn crossprod_with(&self, params: &CrossprodParams) -> Result<Array2<F>> {
        let params = params.check_ref()?;
        let go_parallel = cfg!(feature = "rayon")
            && params.parallel()
            && self.ncols >= params.min_parallel_cols();
        if params.verbose() {
            println!(
                "crossprod of {} columns ({} stored entries), {} path",
                self.ncols,
                self.n_nonzero(),
                if go_parallel { "parallel" } else { "serial" }
            );
        }
        if go_parallel {
            return Ok(self.crossprod_parallel());
        }
        Ok(self.crossprod())
    }

    #[cfg(feature = "rayon")]
    fn crossprod_parallel(&self) -> Array2<F> {
        let n = self.ncols;
        let upper: Vec<Vec<F>> = (0..n)
            .into_par_iter()
            .map(|c1| (c1..n).map(|c2| self.pair_product(c1, c2)).collect())
            .collect();
        let mut res = Array2::<F>::zeros((n, n));
        for (c1, row) in upper.into_iter().enumerate() {
            for (offset, v) in row.into_iter().enumerate() {
                res[[c1, c1 + offset]] = v;
                res[[c1 + offset, c1]] = v;
            }
        }
        res
    }

    #[cfg(not(feature = "rayon"))]
    fn crossprod_parallel(&self) -> Array2<F> {
        self.crossprod()
    }
}

/// This implements the [`MatrixReductions`] trait for sparse views.
impl<'a, F: Float, S: Data<Elem = F>> MatrixReductions for CscBase<'a, S> {
    type Elem = F;

    fn n_rows(&self) -> usize {
        self.nrows
    }

    fn n_cols(&self) -> usize {
        self.ncols
    }

    fn column_sums(&self) -> Array1<F> {
        self.col_sums()
    }

    fn row_totals(&self) -> Array1<F> {
        self.row_sums()
    }

    fn cross_product(&self) -> Array2<F> {
        self.crossprod()
    }
}

/// This implements the [`MatrixReductions`] trait for dense matrices.
impl<F: 'static + Float, S: Data<Elem = F>> MatrixReductions for ArrayBase<S, Ix2> {
    type Elem = F;

    fn n_rows(&self) -> usize {
        self.len_of(Axis(0))
    }

    fn n_cols(&self) -> usize {
        self.len_of(Axis(1))
    }

    fn column_sums(&self) -> Array1<F> {
        self.sum_axis(Axis(0))
    }

    fn row_totals(&self) -> Array1<F> {
        self.sum_axis(Axis(1))
    }

    fn cross_product(&self) -> Array2<F> {
        self.t().dot(self)
    }
}

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

use ndarray::{ArrayBase, ArrayView1, Data, Ix1, RawData, RawDataClone, ViewRepr};
use num_traits::ToPrimitive;

use crate::error::{Margin, Result, SparseError};
use crate::Float;


mod impl_access;
mod impl_iter;
mod impl_reductions;

pub use impl_iter::{ColumnIter, ColumnIterMut, Entry, EntryMut, Iter, IterMut};

/// Row and column labels carried alongside a matrix. Either side may be
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimNames {
    pub rows: Option<Vec<String>>,
    pub cols: Option<Vec<String>>,
}

impl DimNames {
    pub fn new(rows: Option<Vec<String>>, cols: Option<Vec<String>>) -> DimNames {
        DimNames { rows, cols }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_none() && self.cols.is_none()
    }
}

/// A compressed sparse column matrix whose backing arrays live elsewhere.
///
/// `indices[k]` is the 0-based row of the k-th stored entry and `data[k]` its
/// value; the entries of column `j` occupy `indptr[j]..indptr[j + 1]`. None of
/// the three arrays is copied on construction: the view borrows them for `'a`
/// and must not outlive their owner. Dropping the view frees nothing.
///
/// The storage parameter `S` decides whether stored values may be edited in
/// place, see [`CscView`] and [`CscViewMut`]. The sparsity pattern is always
/// read-only.
pub struct CscBase<'a, S: RawData> {
    data: ArrayBase<S, Ix1>,
    indices: ArrayView1<'a, i32>,
    indptr: ArrayView1<'a, i32>,
    nrows: usize,
    ncols: usize,
    dimnames: Option<Cow<'a, DimNames>>,
}

impl<'a, S: RawDataClone> Clone for CscBase<'a, S> {
    fn clone(&self) -> Self {
        CscBase {
            data: self.data.clone(),
            indices: self.indices,
            indptr: self.indptr,
            nrows: self.nrows,
            ncols: self.ncols,
            dimnames: self.dimnames.clone(),
        }
    }
}

impl<'a, S> fmt::Debug for CscBase<'a, S>
where
    S: Data,
    S::Elem: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CscBase")
            .field("shape", &(self.nrows, self.ncols))
            .field("data", &self.data)
            .field("indices", &self.indices)
            .field("indptr", &self.indptr)
            .field("dimnames", &self.dimnames)
            .finish()
    }
}

/// Read-only view
pub type CscView<'a, F> = CscBase<'a, ViewRepr<&'a F>>;

/// View whose stored values can be edited in place. Concurrent editors must
/// work on disjoint column ranges, nothing is locked here.
pub type CscViewMut<'a, F> = CscBase<'a, ViewRepr<&'a mut F>>;

impl<'a, F: Float, S: Data<Elem = F>> CscBase<'a, S> {
    /// Wraps the three backing arrays as a `nrows x ncols` matrix.
    ///
    /// Only the lengths are checked: `indptr` must hold `ncols + 1` offsets and
    /// `indices` as many entries as `data`. Everything else about the layout is
    /// trusted, use [`CscBase::validate`] to check it.
    pub fn attach(
        data: ArrayBase<S, Ix1>,
        indices: ArrayView1<'a, i32>,
        indptr: ArrayView1<'a, i32>,
        nrows: usize,
        ncols: usize,
    ) -> Result<Self> {
        let expected_len = ncols
            .checked_add(1)
            .ok_or_else(|| SparseError::InvalidShape("ncols overflow when adding 1".into()))?;
        if indptr.len() != expected_len {
            return Err(SparseError::InvalidShape(format!(
                "indptr has {} entries, expected ncols + 1 = {}",
                indptr.len(),
                expected_len
            )));
        }
        if indices.len() != data.len() {
            return Err(SparseError::InvalidShape(format!(
                "indices and data must have equal length, got {} and {}",
                indices.len(),
                data.len()
            )));
        }
        Ok(CscBase {
            data,
            indices,
            indptr,
            nrows,
            ncols,
            dimnames: None,
        })
    }

    /// Like [`CscBase::attach`], with the column count read off `indptr`.
    pub fn from_nrow(
        data: ArrayBase<S, Ix1>,
        indices: ArrayView1<'a, i32>,
        indptr: ArrayView1<'a, i32>,
        nrows: usize,
    ) -> Result<Self> {
        let ncols = indptr
            .len()
            .checked_sub(1)
            .ok_or_else(|| SparseError::InvalidShape("indptr must not be empty".into()))?;
        Self::attach(data, indices, indptr, nrows, ncols)
    }

    /// Attaches row and column labels without copying them.
    pub fn with_dimnames(mut self, dimnames: &'a DimNames) -> Self {
        self.dimnames = Some(Cow::Borrowed(dimnames));
        self
    }

    pub(crate) fn with_owned_dimnames(mut self, dimnames: Option<DimNames>) -> Self {
        self.dimnames = dimnames.map(Cow::Owned);
        self
    }

    /// Checks every compressed-column invariant in O(nnz + ncols).
    pub fn validate(&self) -> Result<()> {
        let nnz = self.n_nonzero();
        if self.indptr[0] != 0 {
            return Err(SparseError::InvalidShape(
                "indptr first element must be 0".into(),
            ));
        }
        if self.indptr[self.ncols].to_usize() != Some(nnz) {
            return Err(SparseError::InvalidShape(format!(
                "indptr last element must equal nnz = {}",
                nnz
            )));
        }
        for j in 0..self.ncols {
            let (start, end) = (self.indptr[j], self.indptr[j + 1]);
            if start < 0 {
                return Err(SparseError::InvalidShape(
                    "indptr must be non-negative".into(),
                ));
            }
            if end < start {
                return Err(SparseError::InvalidShape(format!(
                    "indptr must be non-decreasing, column {} ends before it starts",
                    j
                )));
            }
            if end as usize > nnz {
                return Err(SparseError::InvalidShape(format!(
                    "indptr elements must be within [0, {}]",
                    nnz
                )));
            }
            let mut prev_row = -1_i32;
            for k in start as usize..end as usize {
                let row = self.indices[k];
                if row < 0 || row as usize >= self.nrows {
                    return Err(SparseError::InvalidShape(format!(
                        "row index {} out of bounds for {} rows",
                        row, self.nrows
                    )));
                }
                if row <= prev_row {
                    return Err(SparseError::InvalidShape(format!(
                        "row indices must be strictly increasing within column {}",
                        j
                    )));
                }
                prev_row = row;
            }
        }
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.nrows
    }

    pub fn cols(&self) -> usize {
        self.ncols
    }

    pub fn nrow(&self) -> usize {
        self.nrows
    }

    pub fn ncol(&self) -> usize {
        self.ncols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Number of stored entries.
    pub fn n_nonzero(&self) -> usize {
        self.data.len()
    }

    /// The stored values, in column-major order.
    pub fn nonzeros(&self) -> ArrayView1<'_, F> {
        self.data.view()
    }

    pub fn indices(&self) -> ArrayView1<'_, i32> {
        self.indices.view()
    }

    pub fn indptr(&self) -> ArrayView1<'_, i32> {
        self.indptr.view()
    }

    pub fn dimnames(&self) -> Option<&DimNames> {
        self.dimnames.as_deref()
    }

    /// Sum of every stored value, in storage order.
    pub fn sum(&self) -> F {
        self.data.fold(F::zero(), |acc, &x| acc + x)
    }

    /// Offsets of the stored entries of column `j`, unchecked.
    #[inline]
    pub(crate) fn col_span(&self, j: usize) -> Range<usize> {
        self.indptr[j] as usize..self.indptr[j + 1] as usize
    }

    /// Offsets of the stored entries of column `col`: the first element is
    /// where iteration over the column begins, the end is its sentinel.
    pub fn col_range<C: ToPrimitive>(&self, col: C) -> Result<Range<usize>> {
        let j = self.check_col(&col)?;
        Ok(self.col_span(j))
    }

    /// Column holding the stored entry at offset `k`, or `None` past the end.
    pub fn column_of(&self, k: usize) -> Option<usize> {
        if k >= self.n_nonzero() {
            return None;
        }
        // first column whose end lies beyond k
        let (mut lo, mut hi) = (0, self.ncols);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if (self.indptr[mid + 1] as usize) <= k {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        Some(lo)
    }

    pub(crate) fn check_row<R: ToPrimitive>(&self, row: &R) -> Result<usize> {
        checked_index(row, self.nrows, Margin::Row)
    }

    pub(crate) fn check_col<C: ToPrimitive>(&self, col: &C) -> Result<usize> {
        checked_index(col, self.ncols, Margin::Column)
    }
}

/// Converts a caller-supplied index, rejecting negative and too large values.
fn checked_index<I: ToPrimitive>(index: &I, bound: usize, margin: Margin) -> Result<usize> {
    match index.to_usize() {
        Some(i) if i < bound => Ok(i),
        _ => Err(SparseError::IndexOutOfBounds {
            margin,
            index: index.to_i64().unwrap_or(i64::MAX),
            bound,
        }),
    }
}

use ndarray::iter::{Iter as NdIter, IterMut as NdIterMut};
use ndarray::{s, ArrayView1, Data, DataMut, Ix1};
use num_traits::ToPrimitive;

use super::CscBase;
use crate::error::Result;
use crate::Float;

/// A stored entry reached through an iterator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<'v, F> {
    position: usize,
    row: usize,
    col: usize,
    value: &'v F,
}

impl<'v, F: Float> Entry<'v, F> {
    /// Offset of the entry in the stored arrays.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn value(&self) -> F {
        *self.value
    }
}

/// A stored entry whose value can be overwritten in place.
#[derive(Debug)]
pub struct EntryMut<'v, F> {
    position: usize,
    row: usize,
    col: usize,
    value: &'v mut F,
}

impl<'v, F: Float> EntryMut<'v, F> {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn value(&self) -> F {
        *self.value
    }

    pub fn value_mut(&mut self) -> &mut F {
        &mut *self.value
    }

    pub fn into_value_mut(self) -> &'v mut F {
        self.value
    }
}

/// Stored entries of one column, by increasing row.
pub struct ColumnIter<'v, F> {
    col: usize,
    position: usize,
    rows: NdIter<'v, i32, Ix1>,
    values: NdIter<'v, F, Ix1>,
}

impl<'v, F: Float> Iterator for ColumnIter<'v, F> {
    type Item = Entry<'v, F>;

    fn next(&mut self) -> Option<Entry<'v, F>> {
        let row = *self.rows.next()?;
        let value = self.values.next()?;
        let entry = Entry {
            position: self.position,
            row: row as usize,
            col: self.col,
            value,
        };
        self.position += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl<'v, F: Float> ExactSizeIterator for ColumnIter<'v, F> {}

/// Mutable counterpart of [`ColumnIter`].
pub struct ColumnIterMut<'v, F> {
    col: usize,
    position: usize,
    rows: NdIter<'v, i32, Ix1>,
    values: NdIterMut<'v, F, Ix1>,
}

impl<'v, F: Float> Iterator for ColumnIterMut<'v, F> {
    type Item = EntryMut<'v, F>;

    fn next(&mut self) -> Option<EntryMut<'v, F>> {
        let row = *self.rows.next()?;
        let value = self.values.next()?;
        let entry = EntryMut {
            position: self.position,
            row: row as usize,
            col: self.col,
            value,
        };
        self.position += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.rows.size_hint()
    }
}

impl<'v, F: Float> ExactSizeIterator for ColumnIterMut<'v, F> {}

/// Every stored entry in column-major order.
pub struct Iter<'v, F> {
    position: usize,
    col: usize,
    indices: ArrayView1<'v, i32>,
    indptr: ArrayView1<'v, i32>,
    values: NdIter<'v, F, Ix1>,
}

/// Moves `col` forward until it owns the entry at `position`. Empty columns are
/// skipped.
#[inline]
fn settle_col(indptr: &ArrayView1<i32>, col: &mut usize, position: usize) {
    while *col + 1 < indptr.len() && indptr[*col + 1] as usize <= position {
        *col += 1;
    }
}

impl<'v, F: Float> Iterator for Iter<'v, F> {
    type Item = Entry<'v, F>;

    fn next(&mut self) -> Option<Entry<'v, F>> {
        let value = self.values.next()?;
        settle_col(&self.indptr, &mut self.col, self.position);
        let entry = Entry {
            position: self.position,
            row: self.indices[self.position] as usize,
            col: self.col,
            value,
        };
        self.position += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<'v, F: Float> ExactSizeIterator for Iter<'v, F> {}

/// Mutable counterpart of [`Iter`].
pub struct IterMut<'v, F> {
    position: usize,
    col: usize,
    indices: ArrayView1<'v, i32>,
    indptr: ArrayView1<'v, i32>,
    values: NdIterMut<'v, F, Ix1>,
}

impl<'v, F: Float> Iterator for IterMut<'v, F> {
    type Item = EntryMut<'v, F>;

    fn next(&mut self) -> Option<EntryMut<'v, F>> {
        let value = self.values.next()?;
        settle_col(&self.indptr, &mut self.col, self.position);
        let entry = EntryMut {
            position: self.position,
            row: self.indices[self.position] as usize,
            col: self.col,
            value,
        };
        self.position += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<'v, F: Float> ExactSizeIterator for IterMut<'v, F> {}

/// Forward traversal over stored entries. Iterators are restartable: every call
/// hands out a fresh one positioned at the start of its range.
impl<'a, F: Float, S: Data<Elem = F>> CscBase<'a, S> {
    /// Stored entries of column `col`, from `indptr[col]` up to the
    /// `indptr[col + 1]` sentinel.
    pub fn col_iter<C: ToPrimitive>(&self, col: C) -> Result<ColumnIter<'_, F>> {
        let j = self.check_col(&col)?;
        let span = self.col_span(j);
        Ok(ColumnIter {
            col: j,
            position: span.start,
            rows: self.indices.slice(s![span.clone()]).into_iter(),
            values: self.data.slice(s![span]).into_iter(),
        })
    }

    /// Every stored entry, column by column.
    pub fn iter(&self) -> Iter<'_, F> {
        Iter {
            position: 0,
            col: 0,
            indices: self.indices.view(),
            indptr: self.indptr.view(),
            values: self.data.view().into_iter(),
        }
    }
}

/// In-place edits of stored values. The sparsity pattern never changes.
impl<'a, F: Float, S: DataMut<Elem = F>> CscBase<'a, S> {
    pub fn col_iter_mut<C: ToPrimitive>(&mut self, col: C) -> Result<ColumnIterMut<'_, F>> {
        let j = self.check_col(&col)?;
        let span = self.col_span(j);
        Ok(ColumnIterMut {
            col: j,
            position: span.start,
            rows: self.indices.slice(s![span.clone()]).into_iter(),
            values: self.data.slice_mut(s![span]).into_iter(),
        })
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, F> {
        IterMut {
            position: 0,
            col: 0,
            indices: self.indices.view(),
            indptr: self.indptr.view(),
            values: self.data.view_mut().into_iter(),
        }
    }

    /// Mutable access to the stored values, in column-major order.
    pub fn nonzeros_mut(&mut self) -> ndarray::ArrayViewMut1<'_, F> {
        self.data.view_mut()
    }

    /// Multiplies every stored value by `factor`.
    pub fn scale(&mut self, factor: F) {
        self.data.mapv_inplace(|x| x * factor);
    }

    pub fn map_inplace<M: FnMut(F) -> F>(&mut self, f: M) {
        self.data.mapv_inplace(f);
    }
}

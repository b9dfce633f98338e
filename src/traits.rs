use ndarray::{Array1, Array2};

/// Whole-matrix reductions
///
/// Implemented by sparse views and by dense two-dimensional arrays, so that the
/// two representations of a matrix can be reduced through the same interface
/// and checked against each other.
pub trait MatrixReductions {
    type Elem;

    fn n_rows(&self) -> usize;
    fn n_cols(&self) -> usize;

    /// Sum of each column, of length `n_cols`.
    fn column_sums(&self) -> Array1<Self::Elem>;

    /// Sum of each row, of length `n_rows`.
    fn row_totals(&self) -> Array1<Self::Elem>;

    /// The symmetric `n_cols x n_cols` matrix `X^T X`.
    fn cross_product(&self) -> Array2<Self::Elem>;
}

/// This implements the [`MatrixReductions`] trait for references.
impl<M: MatrixReductions> MatrixReductions for &M {
    type Elem = M::Elem;

    fn n_rows(&self) -> usize {
        (*self).n_rows()
    }

    fn n_cols(&self) -> usize {
        (*self).n_cols()
    }

    fn column_sums(&self) -> Array1<Self::Elem> {
        (*self).column_sums()
    }

    fn row_totals(&self) -> Array1<Self::Elem> {
        (*self).row_totals()
    }

    fn cross_product(&self) -> Array2<Self::Elem> {
        (*self).cross_product()
    }
}

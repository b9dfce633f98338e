#[cfg(test)]
mod tests;

/// This module contains helpers functions to efficiently write tests and
/// benchmarks.
pub mod test_helpers {
    use crate::csc::CscView;
    use crate::host::S4Object;
    use crate::Float;
    use approx::AbsDiffEq;
    use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rand_distr::{Distribution, Normal};

    pub fn assert_array_all_close<F>(x: ArrayView1<F>, y: ArrayView1<F>, delta: F)
    where
        F: Float + AbsDiffEq<Epsilon = F>,
    {
        assert_eq!(x.len(), y.len());
        for i in 0..x.len() {
            if x[i].abs_diff_ne(&y[i], delta) {
                panic!("x: {}, y: {} ; with precision level {}", x[i], y[i], delta);
            }
        }
    }

    pub fn assert_array2d_all_close<F>(x: ArrayView2<F>, y: ArrayView2<F>, delta: F)
    where
        F: Float + AbsDiffEq<Epsilon = F>,
    {
        assert_eq!(x.shape()[0], y.shape()[0]);
        assert_eq!(x.shape()[1], y.shape()[1]);
        for i in 0..x.shape()[0] {
            for j in 0..x.shape()[1] {
                if x[[i, j]].abs_diff_ne(&y[[i, j]], delta) {
                    panic!(
                        "x: {}, y: {} ; with precision level {}",
                        x[[i, j]],
                        y[[i, j]],
                        delta
                    );
                }
            }
        }
    }

    /// Owned backing arrays of a compressed sparse column matrix, standing in
    /// for host-owned storage in tests and benchmarks.
    #[derive(Debug, Clone, PartialEq)]
    pub struct CscParts {
        pub data: Array1<f64>,
        pub indices: Array1<i32>,
        pub indptr: Array1<i32>,
        pub nrows: usize,
        pub ncols: usize,
    }

    impl CscParts {
        pub fn new(
            data: Vec<f64>,
            indices: Vec<i32>,
            indptr: Vec<i32>,
            nrows: usize,
            ncols: usize,
        ) -> CscParts {
            CscParts {
                data: Array1::from(data),
                indices: Array1::from(indices),
                indptr: Array1::from(indptr),
                nrows,
                ncols,
            }
        }

        pub fn view(&self) -> CscView<'_, f64> {
            CscView::attach(
                self.data.view(),
                self.indices.view(),
                self.indptr.view(),
                self.nrows,
                self.ncols,
            )
            .unwrap()
        }

        /// The same matrix as a host `"dgCMatrix"` object.
        pub fn to_host(&self) -> S4Object {
            S4Object::dgcmatrix(
                self.indices.to_vec(),
                self.indptr.to_vec(),
                self.data.to_vec(),
                (self.nrows, self.ncols),
                None,
            )
        }

        /// Dense reference copy built straight from the parts.
        pub fn dense(&self) -> Array2<f64> {
            let mut res = Array2::<f64>::zeros((self.nrows, self.ncols));
            for j in 0..self.ncols {
                for k in self.indptr[j] as usize..self.indptr[j + 1] as usize {
                    res[[self.indices[k] as usize, j]] = self.data[k];
                }
            }
            res
        }
    }

    /// The 3 x 3 matrix with entries (0,0)=5, (2,1)=7 and (1,2)=9.
    pub fn diagonal_like() -> CscParts {
        CscParts::new(vec![5., 7., 9.], vec![0, 2, 1], vec![0, 1, 2, 3], 3, 3)
    }

    /// A 4 x 4 matrix whose columns overlap on some rows and not on others,
    /// with one empty column:
    ///
    /// ```text
    /// 1 0 0 4
    /// 2 3 0 0
    /// 0 0 0 5
    /// 0 6 0 7
    /// ```
    pub fn overlapping() -> CscParts {
        CscParts::new(
            vec![1., 2., 3., 6., 4., 5., 7.],
            vec![0, 1, 1, 3, 0, 2, 3],
            vec![0, 2, 4, 4, 7],
            4,
            4,
        )
    }

    /// Random matrix in canonical compressed-column form, each cell stored with
    /// probability `density` and holding a standard normal value.
    pub fn generate_random_csc(nrows: usize, ncols: usize, density: f64, seed: u64) -> CscParts {
        let mut r = StdRng::seed_from_u64(seed);
        let normal = Normal::new(0., 1.).unwrap();

        let mut data = Vec::new();
        let mut indices = Vec::new();
        let mut indptr = Vec::with_capacity(ncols + 1);
        indptr.push(0);
        for _ in 0..ncols {
            for i in 0..nrows {
                if r.gen_bool(density) {
                    indices.push(i as i32);
                    data.push(normal.sample(&mut r));
                }
            }
            indptr.push(indices.len() as i32);
        }
        CscParts::new(data, indices, indptr, nrows, ncols)
    }
}

use crate::error::{Result, SparseError};

#[cfg(test)]
mod tests;

mod param_guard;

pub use param_guard::ParamGuard;

/// A verified parameter set for attaching a view to a host object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachValidParams {
    check_structure: bool,
    verbose: bool,
}

impl AttachValidParams {
    pub fn check_structure(&self) -> bool {
        self.check_structure
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

/// A parameter set for attaching during construction
///
/// By default only the shape of the backing arrays is checked and the host's
/// compressed-column invariants are trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachParams(AttachValidParams);

impl Default for AttachParams {
    fn default() -> Self {
        Self::new()
    }
}

impl AttachParams {
    /// Create default attach parameters
    pub fn new() -> AttachParams {
        Self(AttachValidParams {
            check_structure: false,
            verbose: false,
        })
    }

    /// Run the full O(nnz + ncols) well-formedness check on attach: column
    /// pointers start at zero, never decrease and end at the stored-entry count,
    /// row indices are in range and strictly increasing within each column.
    /// Defaults to `false` if not set.
    pub fn check_structure(mut self, check_structure: bool) -> Self {
        self.0.check_structure = check_structure;
        self
    }

    /// Print a one-line summary of every attached matrix.
    /// Defaults to `false` if not set.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.0.verbose = verbose;
        self
    }
}

impl ParamGuard for AttachParams {
    type Checked = AttachValidParams;
    type Error = SparseError;

    fn check_ref(&self) -> Result<&AttachValidParams> {
        Ok(&self.0)
    }

    fn check(self) -> Result<AttachValidParams> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// A verified parameter set for the cross-product of a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossprodValidParams {
    parallel: bool,
    min_parallel_cols: usize,
    verbose: bool,
}

impl CrossprodValidParams {
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    pub fn min_parallel_cols(&self) -> usize {
        self.min_parallel_cols
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

/// A parameter set for the cross-product during construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossprodParams(CrossprodValidParams);

impl Default for CrossprodParams {
    fn default() -> Self {
        Self::new()
    }
}

impl CrossprodParams {
    /// Create default cross-product parameters (serial evaluation)
    pub fn new() -> CrossprodParams {
        Self(CrossprodValidParams {
            parallel: false,
            min_parallel_cols: 64,
            verbose: false,
        })
    }

    /// Spread the upper triangle over the rayon thread pool. Ignored unless the
    /// crate is built with the `rayon` feature.
    /// Defaults to `false` if not set.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.0.parallel = parallel;
        self
    }

    /// Below this many columns the serial path is used even when `parallel` is
    /// set.
    /// Defaults to `64` if not set.
    pub fn min_parallel_cols(mut self, min_parallel_cols: usize) -> Self {
        self.0.min_parallel_cols = min_parallel_cols;
        self
    }

    /// Defaults to `false` if not set.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.0.verbose = verbose;
        self
    }
}

impl ParamGuard for CrossprodParams {
    type Checked = CrossprodValidParams;
    type Error = SparseError;

    fn check_ref(&self) -> Result<&CrossprodValidParams> {
        if self.0.min_parallel_cols == 0 {
            return Err(SparseError::InvalidParams(
                "min_parallel_cols must be at least 1".to_string(),
            ));
        }
        Ok(&self.0)
    }

    fn check(self) -> Result<CrossprodValidParams> {
        self.check_ref()?;
        Ok(self.0)
    }
}

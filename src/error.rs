use std::alloc::Layout;
use std::fmt;

use thiserror::Error;

/// One of the two axes of a matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// Failures that can happen while building a matrix.
///
/// Shape preconditions between static and dynamic extents are checked by the
/// type system; the only shape error left for runtime is a mixed-shape matrix
/// (one `Const` axis, one `Dyn` axis) given a count that disagrees with its
/// static axis.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("capacity overflow: the requested matrix does not fit in memory")]
    CapacityOverflow,
    #[error("memory allocation of {} bytes failed", .layout.size())]
    AllocFailed { layout: Layout },
    #[error("{axis} extent is fixed at {expected} but {found} was requested")]
    ShapeMismatch {
        axis: Axis,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, MatrixError>;

/// Turn a failed construction into the allocator's failure mode, the way the
/// infallible `Vec` constructors do.
pub(crate) fn unwrap_or_abort<T>(res: Result<T>) -> T {
    match res {
        Ok(value) => value,
        Err(MatrixError::AllocFailed { layout }) => std::alloc::handle_alloc_error(layout),
        Err(err) => panic!("Error: {}", err),
    }
}

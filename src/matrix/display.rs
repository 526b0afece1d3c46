use std::fmt;

use itertools::Itertools;

use crate::alloc::RawAllocator;
use crate::dim::Dim;
use crate::matrix::Matrix;
use crate::storage::ShapeStorage;

impl<T: fmt::Display, R: Dim, C: Dim, A: RawAllocator> Matrix<T, R, C, A>
where
    (R, C): ShapeStorage<T, A>,
{
    /// Append the rendering of the matrix to any text sink.
    pub fn render_into<W: fmt::Write>(&self, sink: &mut W) -> fmt::Result {
        write!(sink, "{}", self)
    }
}

/// Rows in braces, elements separated by `", "`, rows by `",\n"`, no
/// trailing newline:
/// ```text
/// {1, 2},
/// {3, 4}
/// ```
/// A matrix that stores no element renders as the empty string. Format
/// options such as precision are applied to every element.
impl<T: fmt::Display, R: Dim, C: Dim, A: RawAllocator> fmt::Display for Matrix<T, R, C, A>
where
    (R, C): ShapeStorage<T, A>,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                f.write_str(",\n")?;
            }
            f.write_str("{")?;
            fmt::Display::fmt(&row.iter().format(", "), f)?;
            f.write_str("}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Const, DMatrix, Dyn, Matrix, SMatrix};

    #[test]
    fn test_render_rows() {
        let mut m = SMatrix::<i32, 2, 2>::new();
        m[(0, 0)] = 1;
        m[(0, 1)] = 2;
        m[(1, 0)] = 3;
        m[(1, 1)] = 4;
        assert_eq!(m.to_string(), "{1, 2},\n{3, 4}");
    }

    #[test]
    fn test_render_single_row_and_column() {
        let row = SMatrix::<i32, 1, 3>::from_slice(&[7, 8, 9]);
        assert_eq!(row.to_string(), "{7, 8, 9}");
        let col = DMatrix::<i32>::from_slice_with_shape(&[7, 8, 9], 3, 1);
        assert_eq!(col.to_string(), "{7},\n{8},\n{9}");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(DMatrix::<f64>::new().to_string(), "");
        assert_eq!(DMatrix::<f64>::with_shape(2, 3).to_string(), "");
        assert_eq!(SMatrix::<f64, 0, 3>::new().to_string(), "");
    }

    #[test]
    fn test_render_equal_contents_alike() {
        let rows = [[1, 2, 3], [4, 5, 6]];
        let a = SMatrix::<i32, 2, 3>::from_rows(&rows);
        let b = DMatrix::<i32>::from_slice_with_shape(&[1, 2, 3, 4, 5, 6], 2, 3);
        let c = Matrix::<i32, Dyn, Const<3>>::from_iter_with_shape(1..=6, 2, 3);
        assert_eq!(a.as_slice(), b.as_slice());
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(b.to_string(), c.to_string());
        assert_eq!(c.to_string(), c.clone().to_string());
        assert_eq!(a.to_string(), "{1, 2, 3},\n{4, 5, 6}");
    }

    #[test]
    fn test_render_default_static() {
        assert_eq!(SMatrix::<i32, 2, 2>::new().to_string(), "{0, 0},\n{0, 0}");
        assert_eq!(Matrix::<i32, Dyn, Const<2>>::new().to_string(), "");
    }

    #[test]
    fn test_render_precision() {
        let m = SMatrix::<f64, 1, 2>::from([[1.0, 0.25]]);
        assert_eq!(format!("{:.2}", m), "{1.00, 0.25}");
        assert_eq!(m.to_string(), "{1, 0.25}");
    }

    #[test]
    fn test_render_into_sink() {
        let m = DMatrix::from_fill_with_shape("x", 2, 1);
        let mut sink = String::from("> ");
        m.render_into(&mut sink).unwrap();
        assert_eq!(sink, "> {x},\n{x}");
    }
}

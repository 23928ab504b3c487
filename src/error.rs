use thiserror::Error;

/// Errors produced by the fallible vector operations.
///
/// Collision queries never fail, they only go through operations whose
/// divisor is known to be non-zero.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// A vector was divided by a zero scalar.
    #[error("division of a vector by zero")]
    DivisionByZero,
    /// A vector was projected onto the zero vector.
    #[error("cannot project onto a zero-length axis")]
    DegenerateAxis,
}

pub type Result<T> = std::result::Result<T, GeometryError>;

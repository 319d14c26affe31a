use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "input arrays differ in length: {directions} directions, {frequencies} frequencies, {speeds} speeds"
    )]
    LengthMismatch {
        directions: usize,
        frequencies: usize,
        speeds: usize,
    },
    #[error("{positions} turbine positions but {diameters} rotor diameters")]
    LayoutMismatch { positions: usize, diameters: usize },
    #[error("no samples given")]
    Empty,
    #[error("number of output directions must be positive")]
    NoDirections,
    #[error("quadrature count {0} is odd")]
    OddQuadrature(usize),
    #[error("quadrature count {0} is below the minimum of 4")]
    SparseQuadrature(usize),
    #[error("invalid {field} at index {index}: {value}")]
    InvalidValue {
        field: &'static str,
        index: usize,
        value: f64,
    },
    #[error("direction {0} appears more than once")]
    DuplicateDirection(f64),
    #[error("resampled frequencies sum to zero")]
    ZeroFrequency,
    #[error("curve needs at least two strictly increasing knots")]
    DegenerateCurve,
    #[error("boundary needs at least three points, got {0}")]
    SparseBoundary(usize),
    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EllipticCurveError {
    #[error("Coordinates do not satisfy the curve equation")]
    InvalidPoint,
}

// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("Invalid sample grid: {message}")]
    InvalidGrid { message: String },

    #[error("Sphere radius must be positive and finite, got {radius}")]
    InvalidRadius { radius: f64 },

    #[error("Invalid contour levels: {message}")]
    InvalidLevels { message: String },

    #[error("Invalid parameters: {message}")]
    InvalidParameters { message: String },
}

pub type FieldResult<T> = Result<T, FieldError>;

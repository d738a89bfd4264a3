pub mod contour;
pub mod error;
pub mod grid;
pub mod marching_squares;
pub mod scalar_field;
pub mod utils;

// Re-exports
pub use error::{FieldError, FieldResult};

pub mod prelude {
    pub use super::{
        contour::ContourLevels,
        error::{FieldError, FieldResult},
        grid::SampleGrid,
        marching_squares::{IsoSegment, MarchingSquares},
        scalar_field::{FieldSamples, ScalarField2D},
    };
}

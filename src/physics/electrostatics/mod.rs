pub mod sphere;

pub use sphere::{
    ChargedSphere, DEFAULT_CHARGE_DENSITY, DEFAULT_RADIUS, VACUUM_PERMITTIVITY,
    charge_from_density, coulomb_constant, evaluate_on_grid,
};

pub mod electrostatics;
pub mod sim;

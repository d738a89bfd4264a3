pub mod animation;
pub mod history;
pub mod probe;
pub mod resources;
pub mod state;
pub mod systems;

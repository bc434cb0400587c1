pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod solver;
pub mod state;

pub use error::FluidError;
pub use grid::Grid;
pub use solver::SolverParams;
pub use state::FluidState;

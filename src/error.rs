use thiserror::Error;

/// Failures surfaced by the fluid core.
///
/// All of them come from caller misuse (bad configuration, bad coordinates)
/// or from the allocator; the per-step numerics never fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("cell ({i}, {j}) is outside the {n}x{n} grid")]
    IndexOutOfRange { i: usize, j: usize, n: usize },
    #[error("failed to allocate a grid of {cells} cells")]
    Allocation { cells: usize },
}

use crate::error::FluidError;
use crate::grid::Grid;
use crate::solver::{diagnostics, SolverParams};

/// Smallest grid with a non-empty interior.
pub const MIN_GRID: usize = 3;

/// Complete simulation state: six attribute grids, two projection scratch
/// grids and the parameters they were built with.
///
/// Every grid is allocated once in [`FluidState::with_params`] and mutated
/// in place afterwards. Dropping the state releases all of them.
pub struct FluidState {
    pub(crate) n: usize,
    pub(crate) params: SolverParams,
    /// Diffusion target; holds the diffused density mid-step.
    pub(crate) density: Grid,
    /// Source accumulator and, after a step, the advected result.
    pub(crate) density_prev: Grid,
    pub(crate) vx: Grid,
    pub(crate) vx_prev: Grid,
    pub(crate) vy: Grid,
    pub(crate) vy_prev: Grid,
    /// Projection scratch (pressure solve).
    pub(crate) pressure: Grid,
    /// Projection scratch (divergence field).
    pub(crate) divergence: Grid,
}

impl FluidState {
    /// Build an `n x n` state with the default relaxation sweep counts.
    pub fn new(n: usize, dt: f64, density_diff: f64, velocity_diff: f64) -> Result<Self, FluidError> {
        Self::with_params(n, SolverParams::new(dt, density_diff, velocity_diff))
    }

    /// Build an `n x n` state with explicit solver parameters.
    pub fn with_params(n: usize, params: SolverParams) -> Result<Self, FluidError> {
        if n < MIN_GRID {
            return Err(FluidError::Configuration(format!(
                "grid side must be at least {MIN_GRID}, got {n}"
            )));
        }
        params.validate()?;

        let state = Self {
            n,
            density: Grid::zeroed(n)?,
            density_prev: Grid::zeroed(n)?,
            vx: Grid::zeroed(n)?,
            vx_prev: Grid::zeroed(n)?,
            vy: Grid::zeroed(n)?,
            vy_prev: Grid::zeroed(n)?,
            pressure: Grid::zeroed(n)?,
            divergence: Grid::zeroed(n)?,
            params,
        };
        log::info!(
            "allocated {n}x{n} fluid grid (dt={}, density_diff={}, velocity_diff={})",
            state.params.dt,
            state.params.density_diff,
            state.params.velocity_diff
        );
        Ok(state)
    }

    /// Grid side length.
    pub fn n(&self) -> usize {
        self.n
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    /// Add `amount` of dye at `(i, j)`. Picked up by the next density step.
    pub fn add_density_source(&mut self, i: usize, j: usize, amount: f64) -> Result<(), FluidError> {
        self.density_prev.checked_index(i, j)?;
        self.density_prev[(i, j)] += amount;
        Ok(())
    }

    /// Add `(dx, dy)` to the velocity at `(i, j)`. Picked up by the next velocity step.
    pub fn add_velocity_source(&mut self, i: usize, j: usize, dx: f64, dy: f64) -> Result<(), FluidError> {
        self.vx.checked_index(i, j)?;
        self.vx[(i, j)] += dx;
        self.vy[(i, j)] += dy;
        Ok(())
    }

    /// Density as of the last completed step, sources added since included.
    pub fn density(&self) -> &Grid {
        &self.density_prev
    }

    pub fn velocity_x(&self) -> &Grid {
        &self.vx
    }

    pub fn velocity_y(&self) -> &Grid {
        &self.vy
    }

    /// Sum of interior density.
    pub fn mass(&self) -> f64 {
        diagnostics::total_density(self.density())
    }

    /// Largest interior divergence of the current velocity field.
    pub fn max_divergence(&self) -> f64 {
        diagnostics::max_divergence(&self.vx, &self.vy)
    }

    /// Zero every grid without reallocating.
    pub fn reset(&mut self) {
        for grid in [
            &mut self.density,
            &mut self.density_prev,
            &mut self.vx,
            &mut self.vx_prev,
            &mut self.vy,
            &mut self.vy_prev,
            &mut self.pressure,
            &mut self.divergence,
        ] {
            grid.fill(0.0);
        }
    }

    /// Advance density by one step.
    pub fn density_step(&mut self) {
        crate::solver::density_step(self);
    }

    /// Advance velocity by one step.
    pub fn velocity_step(&mut self) {
        crate::solver::velocity_step(self);
    }

    /// Advance the whole simulation by one step: velocity first, then density.
    pub fn simulation_step(&mut self) {
        crate::solver::fluid_step(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_allocates_equal_zeroed_grids() {
        let state = FluidState::new(10, 0.1, 0.0, 0.0).unwrap();
        assert_eq!(state.n(), 10);
        for g in [
            &state.density,
            &state.density_prev,
            &state.vx,
            &state.vx_prev,
            &state.vy,
            &state.vy_prev,
            &state.pressure,
            &state.divergence,
        ] {
            assert_eq!(g.len(), 100);
            assert!(g.as_slice().iter().all(|&v| v == 0.0));
        }
        assert_eq!(state.params().diffuse_iter, 20);
    }

    #[test]
    fn test_new_rejects_small_grid() {
        for n in [0, 1, 2] {
            let err = FluidState::new(n, 0.1, 0.0, 0.0).err().unwrap();
            assert!(matches!(err, FluidError::Configuration(_)), "n={n} gave {err:?}");
        }
        assert!(FluidState::new(MIN_GRID, 0.1, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_new_rejects_non_positive_dt() {
        assert!(matches!(
            FluidState::new(10, 0.0, 0.0, 0.0),
            Err(FluidError::Configuration(_))
        ));
        assert!(matches!(
            FluidState::new(10, -0.5, 0.0, 0.0),
            Err(FluidError::Configuration(_))
        ));
    }

    #[test]
    fn test_add_density_source_accumulates() {
        let mut state = FluidState::new(10, 0.1, 0.0, 0.0).unwrap();
        state.add_density_source(5, 5, 1.0).unwrap();
        state.add_density_source(5, 5, 0.25).unwrap();
        state.add_density_source(0, 9, 2.0).unwrap();
        assert_eq!(state.density()[(5, 5)], 1.25);
        assert_eq!(state.density()[(0, 9)], 2.0);
        assert_eq!(state.density()[(9, 0)], 0.0);
    }

    #[test]
    fn test_add_velocity_source_accumulates() {
        let mut state = FluidState::new(10, 0.1, 0.0, 0.0).unwrap();
        state.add_velocity_source(3, 4, 1.0, -2.0).unwrap();
        state.add_velocity_source(3, 4, 0.5, 0.5).unwrap();
        assert_eq!(state.velocity_x()[(3, 4)], 1.5);
        assert_eq!(state.velocity_y()[(3, 4)], -1.5);
        assert_eq!(state.velocity_x()[(4, 3)], 0.0);
    }

    #[test]
    fn test_sources_reject_out_of_range() {
        let mut state = FluidState::new(10, 0.1, 0.0, 0.0).unwrap();
        assert_eq!(
            state.add_density_source(10, 0, 1.0),
            Err(FluidError::IndexOutOfRange { i: 10, j: 0, n: 10 })
        );
        assert_eq!(
            state.add_velocity_source(2, 10, 1.0, 1.0),
            Err(FluidError::IndexOutOfRange { i: 2, j: 10, n: 10 })
        );
        // A failed call leaves nothing behind.
        assert_eq!(state.mass(), 0.0);
        assert!(state.velocity_x().as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = FluidState::new(8, 0.1, 0.0, 0.0).unwrap();
        state.add_density_source(4, 4, 1.0).unwrap();
        state.add_velocity_source(4, 4, 1.0, 1.0).unwrap();
        state.simulation_step();
        state.reset();
        assert_eq!(state.mass(), 0.0);
        assert_eq!(state.max_divergence(), 0.0);
        assert!(state.vx_prev.as_slice().iter().all(|&v| v == 0.0));
        assert!(state.pressure.as_slice().iter().all(|&v| v == 0.0));
    }
}

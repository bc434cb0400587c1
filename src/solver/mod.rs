mod boundary;
mod core;
pub mod diagnostics;
mod params;

// Re-export public API
pub use boundary::{set_bnd, BoundaryRule, Quantity};
pub use core::{advect, diffuse, lin_solve, project, Relaxation};
pub use params::SolverParams;

use crate::state::FluidState;

/// Density step: diffuse the accumulated sources into `density`, then advect
/// them back into `density_prev` along the current velocity field.
///
/// `density_prev` ends up holding the result, which is what the renderer
/// reads and where the next frame's sources accumulate.
pub fn density_step(state: &mut FluidState) {
    let FluidState { params, density, density_prev, vx, vy, .. } = state;
    let rule = Quantity::Density.boundary_rule();

    diffuse(rule, density, density_prev, params.density_diff, params.dt, params.diffuse_iter);
    advect(rule, density_prev, density, vx, vy, params.dt);
}

/// Velocity step: diffuse, project, self-advect, project.
pub fn velocity_step(state: &mut FluidState) {
    let FluidState { params, vx, vx_prev, vy, vy_prev, pressure, divergence, .. } = state;
    let dt = params.dt;
    let rule_x = Quantity::VelocityX.boundary_rule();
    let rule_y = Quantity::VelocityY.boundary_rule();

    // Diffuse velocity
    diffuse(rule_x, vx_prev, vx, params.velocity_diff, dt, params.diffuse_iter);
    diffuse(rule_y, vy_prev, vy, params.velocity_diff, dt, params.diffuse_iter);

    // Project to make diffused velocity divergence-free
    project(vx_prev, vy_prev, pressure, divergence, params.project_iter);

    // Advect velocity along itself
    advect(rule_x, vx, vx_prev, vx_prev, vy_prev, dt);
    advect(rule_y, vy, vy_prev, vx_prev, vy_prev, dt);

    // Project again to remove divergence introduced by self-advection
    project(vx, vy, pressure, divergence, params.project_iter);
}

/// Full fluid simulation step. Velocity goes first because density
/// advection reads the finished velocity field.
pub fn fluid_step(state: &mut FluidState) {
    velocity_step(state);
    density_step(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn interior_max_divergence(state: &FluidState) -> f64 {
        diagnostics::max_divergence(state.velocity_x(), state.velocity_y())
    }

    #[test]
    fn test_fluid_step_no_panic() {
        let mut state = FluidState::new(32, 0.1, 0.0001, 0.0001).unwrap();
        for step in 0..10 {
            state.add_density_source(16, 16, 1.0).unwrap();
            state.add_velocity_source(16, 16, (step as f64 * 0.7).sin(), 0.5).unwrap();
            fluid_step(&mut state);
        }
        assert!(state.density().as_slice().iter().all(|v| v.is_finite()));
        assert!(state.velocity_x().as_slice().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_mass_preserved_without_motion() {
        let mut state = FluidState::new(10, 0.1, 0.0, 0.0).unwrap();
        state.add_density_source(5, 5, 1.0).unwrap();
        state.simulation_step();

        let mass = state.mass();
        assert!((mass - 1.0).abs() < 1e-12, "injected unit should remain, got {}", mass);
        assert!((state.density()[(5, 5)] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_velocity_step_is_nearly_divergence_free() {
        let mut state = FluidState::new(10, 0.1, 0.0, 0.0).unwrap();
        state.add_velocity_source(5, 5, 1.0, 0.0).unwrap();
        let before = interior_max_divergence(&state);

        state.velocity_step();

        let after = interior_max_divergence(&state);
        assert!(before > 0.04, "point source should start divergent, got {}", before);
        assert!(after < 0.01, "divergence should be near zero, got {}", after);
        assert!(after < before / 5.0, "before={} after={}", before, after);
    }

    #[test]
    fn test_velocity_step_keeps_wall_rules() {
        let mut state = FluidState::new(12, 0.1, 0.001, 0.001).unwrap();
        state.add_velocity_source(2, 6, -3.0, 1.0).unwrap();
        state.add_velocity_source(9, 10, 0.5, 2.0).unwrap();
        state.velocity_step();

        let n = state.n();
        let (vx, vy) = (state.velocity_x(), state.velocity_y());
        for k in 1..(n - 1) {
            assert_eq!(vx[(0, k)], -vx[(1, k)]);
            assert_eq!(vx[(n - 1, k)], -vx[(n - 2, k)]);
            assert_eq!(vy[(k, 0)], -vy[(k, 1)]);
            assert_eq!(vy[(k, n - 1)], -vy[(k, n - 2)]);
        }
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let run = || {
            let mut state = FluidState::new(24, 0.1, 0.0002, 0.0001).unwrap();
            for step in 0..5 {
                state.add_density_source(12, 12, 0.8).unwrap();
                state.add_density_source(6 + step, 8, 0.3).unwrap();
                state.add_velocity_source(12, 12, 0.4, -0.9).unwrap();
                state.simulation_step();
            }
            (
                state.density().clone(),
                state.velocity_x().clone(),
                state.velocity_y().clone(),
            )
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_density_follows_flow() {
        let mut state = FluidState::new(20, 0.1, 0.0, 0.0).unwrap();
        // Steady rightward push in the middle of the box.
        for _ in 0..5 {
            for j in 8..12 {
                state.add_velocity_source(6, j, 2.0, 0.0).unwrap();
            }
            state.velocity_step();
        }
        state.add_density_source(6, 10, 1.0).unwrap();
        state.density_step();

        let d = state.density();
        let right: f64 = (7..19).map(|i| d[(i, 10)]).sum();
        let left: f64 = (1..6).map(|i| d[(i, 10)]).sum();
        assert!(right > left, "dye should drift right: right={} left={}", right, left);
    }

    #[test]
    fn test_density_step_reads_velocity_not_prev() {
        // Density advection must use the finished velocity field: with only
        // the scratch buffers populated nothing moves.
        let mut state = FluidState::new(10, 0.1, 0.0, 0.0).unwrap();
        state.vx_prev.fill(3.0);
        state.add_density_source(5, 5, 1.0).unwrap();
        state.density_step();
        assert!((state.density()[(5, 5)] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_y_advection_lands_in_y_buffer() {
        let mut state = FluidState::new(12, 0.1, 0.0, 0.0).unwrap();
        state.add_velocity_source(6, 6, 0.0, 1.0).unwrap();
        state.velocity_step();
        // A purely vertical source must not leak into the x component at its own cell.
        assert!(state.velocity_y()[(6, 6)].abs() > 0.0);
        let vx_center = state.velocity_x()[(6, 6)].abs();
        let vy_center = state.velocity_y()[(6, 6)].abs();
        assert!(vy_center > vx_center, "vy={} vx={}", vy_center, vx_center);
    }

    #[test]
    fn test_free_functions_match_methods() {
        let mut a = FluidState::new(10, 0.1, 0.0, 0.0).unwrap();
        let mut b = FluidState::new(10, 0.1, 0.0, 0.0).unwrap();
        for s in [&mut a, &mut b] {
            s.add_density_source(4, 4, 1.0).unwrap();
            s.add_velocity_source(4, 4, 0.3, 0.2).unwrap();
        }
        fluid_step(&mut a);
        b.simulation_step();
        let da: &Grid = a.density();
        assert_eq!(da, b.density());
    }
}

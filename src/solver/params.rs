use crate::error::FluidError;

/// Solver parameters for the fluid simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverParams {
    pub dt: f64,
    /// Density (dye) diffusion rate.
    pub density_diff: f64,
    /// Velocity diffusion rate (viscosity).
    pub velocity_diff: f64,
    /// Gauss-Seidel sweeps per diffusion solve.
    pub diffuse_iter: usize,
    /// Gauss-Seidel sweeps per pressure solve.
    pub project_iter: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            dt: 0.2,
            density_diff: 0.0,
            velocity_diff: 0.000001,
            diffuse_iter: 20,
            project_iter: 20,
        }
    }
}

impl SolverParams {
    /// Parameters with the given time step and rates and the default sweep counts.
    pub fn new(dt: f64, density_diff: f64, velocity_diff: f64) -> Self {
        Self {
            dt,
            density_diff,
            velocity_diff,
            ..Self::default()
        }
    }

    /// Reject values the solver cannot step with.
    pub fn validate(&self) -> Result<(), FluidError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(FluidError::Configuration(format!(
                "dt must be a positive finite number, got {}",
                self.dt
            )));
        }
        for (name, rate) in [
            ("density_diff", self.density_diff),
            ("velocity_diff", self.velocity_diff),
        ] {
            if !rate.is_finite() || rate < 0.0 {
                return Err(FluidError::Configuration(format!(
                    "{name} must be a non-negative finite number, got {rate}"
                )));
            }
        }
        if self.diffuse_iter == 0 || self.project_iter == 0 {
            return Err(FluidError::Configuration(
                "relaxation sweep counts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

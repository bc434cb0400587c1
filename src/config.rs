use std::path::Path;

use serde::Deserialize;

use crate::solver::SolverParams;

pub const DEFAULT_PATH: &str = "dyeflow.yaml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub physics: PhysicsConfig,
    pub display: DisplayConfig,
    pub brush: BrushConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub grid_size: usize,
    pub dt: f64,
    pub density_diff: f64,
    pub velocity_diff: f64,
    pub diffuse_iter: usize,
    pub project_iter: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Pixels per grid cell along each axis.
    pub cell_size: usize,
    pub target_fps: usize,
    pub steps_per_frame: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    /// Half-width of the square of cells that receive dye.
    pub radius: usize,
    pub density_min: f64,
    pub density_max: f64,
    pub velocity_max: f64,
    pub seed: u64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let params = SolverParams::default();
        Self {
            grid_size: 128,
            dt: params.dt,
            density_diff: params.density_diff,
            velocity_diff: params.velocity_diff,
            diffuse_iter: params.diffuse_iter,
            project_iter: params.project_iter,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_size: 4,
            target_fps: 60,
            steps_per_frame: 1,
        }
    }
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            radius: 1,
            density_min: 0.0,
            density_max: 1.0,
            velocity_max: 1.0,
            seed: 42,
        }
    }
}

impl PhysicsConfig {
    /// Solver parameters as configured. Range checks happen when the state is built.
    pub fn solver_params(&self) -> SolverParams {
        SolverParams {
            dt: self.dt,
            density_diff: self.density_diff,
            velocity_diff: self.velocity_diff,
            diffuse_iter: self.diffuse_iter,
            project_iter: self.project_iter,
        }
    }
}

/// Load `dyeflow.yaml` from the working directory.
pub fn load() -> Config {
    load_from(Path::new(DEFAULT_PATH))
}

/// Load a config file. A missing file gives defaults; a broken one gives
/// defaults and a warning.
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str(&contents) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("failed to parse {}: {e}; using defaults", path.display());
                Config::default()
            }
        },
        Err(e) => {
            log::warn!("failed to read {}: {e}; using defaults", path.display());
            Config::default()
        }
    }
}

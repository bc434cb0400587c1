use crate::config::BrushConfig;
use crate::renderer::RenderConfig;
use crate::state::FluidState;

/// Xorshift128 generator. Small, seedable and reproducible across runs.
#[derive(Clone, Debug)]
pub struct Xor128 {
    x: u32,
    y: u32,
    z: u32,
    w: u32,
}

impl Xor128 {
    pub fn new(seed: u32) -> Self {
        Self {
            x: seed,
            y: seed.wrapping_mul(1812433253).wrapping_add(1),
            z: seed.wrapping_mul(1812433253).wrapping_mul(2).wrapping_add(2),
            w: seed.wrapping_mul(1812433253).wrapping_mul(3).wrapping_add(3),
        }
    }

    pub fn next(&mut self) -> u32 {
        let t = self.x ^ (self.x << 11);
        self.x = self.y;
        self.y = self.z;
        self.z = self.w;
        self.w = self.w ^ (self.w >> 19) ^ (t ^ (t >> 8));
        self.w
    }

    /// Float in [0.0, 1.0).
    pub fn next_unit(&mut self) -> f64 {
        self.next() as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Float in [lo, hi).
    pub fn next_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_unit()
    }
}

/// Map a window pixel to the grid cell under it. `None` outside the grid area.
pub fn cell_at(cfg: &RenderConfig, x: f32, y: f32) -> Option<(usize, usize)> {
    if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
        return None;
    }
    let (px, py) = (x as usize, y as usize);
    if px >= cfg.display_width || py >= cfg.display_height {
        return None;
    }
    let i = px / cfg.cell_size;
    let j = cfg.grid_size - 1 - py / cfg.cell_size;
    Some((i, j))
}

/// Dye brush: stamps random density over a square and a random kick of
/// velocity at its centre.
pub struct Brush {
    radius: usize,
    density_min: f64,
    density_max: f64,
    velocity_max: f64,
    rng: Xor128,
}

impl Brush {
    pub fn new(cfg: &BrushConfig) -> Self {
        let seed = (cfg.seed ^ (cfg.seed >> 32)) as u32;
        Self {
            radius: cfg.radius,
            density_min: cfg.density_min,
            density_max: cfg.density_max,
            velocity_max: cfg.velocity_max,
            rng: Xor128::new(seed),
        }
    }

    /// Stamp the brush around `cell`. Cells of the square that fall outside
    /// the grid are skipped. Returns how many cells received density.
    pub fn stamp(&mut self, state: &mut FluidState, cell: (usize, usize)) -> usize {
        let n = state.n();
        let (ci, cj) = cell;
        if ci >= n || cj >= n {
            log::debug!("brush centre ({ci}, {cj}) outside {n}x{n} grid, skipped");
            return 0;
        }

        // A square wider than the grid covers the same cells as one of side 2n+1.
        let r = self.radius.min(n);
        let mut stamped = 0;
        for j in cj.saturating_sub(r)..=(cj + r).min(n - 1) {
            for i in ci.saturating_sub(r)..=(ci + r).min(n - 1) {
                let amount = self.rng.next_range(self.density_min, self.density_max);
                if state.add_density_source(i, j, amount).is_ok() {
                    stamped += 1;
                }
            }
        }
        let clipped = (2 * r + 1) * (2 * r + 1) - stamped;
        if clipped > 0 {
            log::debug!("brush at ({ci}, {cj}) clipped {clipped} cells at the wall");
        }

        let vmax = self.velocity_max;
        let dx = self.rng.next_range(-vmax, vmax);
        let dy = self.rng.next_range(-vmax, vmax);
        if let Err(e) = state.add_velocity_source(ci, cj, dx, dy) {
            log::debug!("brush velocity skipped: {e}");
        }
        stamped
    }
}

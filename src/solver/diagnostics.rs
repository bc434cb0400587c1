use crate::grid::Grid;

/// Discrete divergence at interior cell `(i, j)`, scaled exactly as the
/// projection step computes it: `-0.5/N * (dvx/di + dvy/dj)`.
pub fn divergence_at(vx: &Grid, vy: &Grid, i: usize, j: usize) -> f64 {
    let nf = vx.n() as f64;
    -0.5 / nf * (vx[(i + 1, j)] - vx[(i - 1, j)] + vy[(i, j + 1)] - vy[(i, j - 1)])
}

/// Largest divergence magnitude over the interior.
pub fn max_divergence(vx: &Grid, vy: &Grid) -> f64 {
    let n = vx.n();
    let mut max = 0.0_f64;
    for j in 1..(n - 1) {
        for i in 1..(n - 1) {
            max = max.max(divergence_at(vx, vy, i, j).abs());
        }
    }
    max
}

/// Total density over interior cells.
pub fn total_density(density: &Grid) -> f64 {
    density.interior_sum()
}

/// Compute interior-averaged kinetic energy: KE = 0.5 * <vx² + vy²>.
pub fn kinetic_energy(vx: &Grid, vy: &Grid) -> f64 {
    let n = vx.n();
    let mut sum = 0.0;
    let mut count = 0usize;
    for j in 1..(n - 1) {
        for i in 1..(n - 1) {
            sum += vx[(i, j)] * vx[(i, j)] + vy[(i, j)] * vy[(i, j)];
            count += 1;
        }
    }
    if count > 0 { 0.5 * sum / count as f64 } else { 0.0 }
}

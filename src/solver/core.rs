use crate::grid::Grid;
use super::boundary::{set_bnd, BoundaryRule};

/// Which linear system a relaxation solve belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Relaxation {
    /// Backward-Euler diffusion with coupling `k`: denominator `1 + 4k`.
    Diffusion { k: f64 },
    /// Pressure Poisson equation: unit coupling, denominator 4.
    Pressure,
}

impl Relaxation {
    /// `(a, c)` in `x = (x0 + a * neighbours) / c`.
    pub fn coefficients(self) -> (f64, f64) {
        match self {
            Relaxation::Diffusion { k } => (k, 1.0 + 4.0 * k),
            Relaxation::Pressure => (1.0, 4.0),
        }
    }
}

/// Gauss-Seidel iterative linear solver.
/// Solves: x[i,j] = (x0[i,j] + a * (neighbors)) / c over the interior,
/// refreshing the boundary ring after every sweep.
pub fn lin_solve(rule: BoundaryRule, x: &mut Grid, x0: &Grid, relax: Relaxation, iter: usize) {
    let n = x.n();
    debug_assert_eq!(n, x0.n());
    let (a, c) = relax.coefficients();
    let c_inv = 1.0 / c;
    for _ in 0..iter {
        for j in 1..(n - 1) {
            for i in 1..(n - 1) {
                let neighbors = x[(i - 1, j)] + x[(i + 1, j)] + x[(i, j - 1)] + x[(i, j + 1)];
                x[(i, j)] = (x0[(i, j)] + a * neighbors) * c_inv;
            }
        }
        set_bnd(rule, x);
    }
}

/// Diffusion step: spreads the field over time.
/// k = dt * diff * (N-2)^2
///
/// Relaxes `x` from whatever it currently holds.
pub fn diffuse(rule: BoundaryRule, x: &mut Grid, x0: &Grid, diff: f64, dt: f64, iter: usize) {
    let inner = (x.n() - 2) as f64;
    let k = dt * diff * inner * inner;
    lin_solve(rule, x, x0, Relaxation::Diffusion { k }, iter);
}

/// Semi-Lagrangian advection: traces each interior cell backwards through
/// the velocity field and samples `d0` bilinearly at the departure point.
pub fn advect(rule: BoundaryRule, d: &mut Grid, d0: &Grid, vx: &Grid, vy: &Grid, dt: f64) {
    let n = d.n();
    debug_assert!(d0.n() == n && vx.n() == n && vy.n() == n);
    let dt0 = dt * (n - 2) as f64;
    let lo = 0.5;
    let hi = (n - 2) as f64 + 0.5;

    for j in 1..(n - 1) {
        for i in 1..(n - 1) {
            // Trace backwards
            let x = (i as f64 - dt0 * vx[(i, j)]).clamp(lo, hi);
            let y = (j as f64 - dt0 * vy[(i, j)]).clamp(lo, hi);

            let i0 = x.floor() as usize;
            let i1 = i0 + 1;
            let j0 = y.floor() as usize;
            let j1 = j0 + 1;
            let s1 = x - i0 as f64;
            let s0 = 1.0 - s1;
            let t1 = y - j0 as f64;
            let t0 = 1.0 - t1;

            d[(i, j)] = s0 * (t0 * d0[(i0, j0)] + t1 * d0[(i0, j1)])
                + s1 * (t0 * d0[(i1, j0)] + t1 * d0[(i1, j1)]);
        }
    }
    set_bnd(rule, d);
}

/// Pressure projection: enforces incompressibility (divergence-free velocity field).
///
/// `div` and `p` are scratch grids; their previous contents are discarded.
pub fn project(vx: &mut Grid, vy: &mut Grid, p: &mut Grid, div: &mut Grid, iter: usize) {
    let n = vx.n();
    debug_assert!(vy.n() == n && p.n() == n && div.n() == n);
    let nf = n as f64;

    // Calculate divergence
    for j in 1..(n - 1) {
        for i in 1..(n - 1) {
            div[(i, j)] = -0.5 / nf
                * (vx[(i + 1, j)] - vx[(i - 1, j)] + vy[(i, j + 1)] - vy[(i, j - 1)]);
            p[(i, j)] = 0.0;
        }
    }
    // Pressure copies at the walls like any scalar.
    set_bnd(BoundaryRule::Continuous, div);
    set_bnd(BoundaryRule::Continuous, p);

    // Solve for pressure
    lin_solve(BoundaryRule::Continuous, p, div, Relaxation::Pressure, iter);

    // Subtract pressure gradient from velocity
    for j in 1..(n - 1) {
        for i in 1..(n - 1) {
            vx[(i, j)] -= 0.5 * nf * (p[(i + 1, j)] - p[(i - 1, j)]);
            vy[(i, j)] -= 0.5 * nf * (p[(i, j + 1)] - p[(i, j - 1)]);
        }
    }
    set_bnd(BoundaryRule::ReflectX, vx);
    set_bnd(BoundaryRule::ReflectY, vy);
}

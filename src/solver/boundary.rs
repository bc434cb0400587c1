use crate::grid::Grid;

/// Physical quantity carried by a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Density,
    VelocityX,
    VelocityY,
}

impl Quantity {
    /// Wall rule for this quantity in a closed box.
    pub fn boundary_rule(self) -> BoundaryRule {
        match self {
            Quantity::Density => BoundaryRule::Continuous,
            Quantity::VelocityX => BoundaryRule::ReflectX,
            Quantity::VelocityY => BoundaryRule::ReflectY,
        }
    }
}

/// How the boundary ring is derived from the interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryRule {
    /// Copy the neighbour on every wall (scalars, pressure).
    Continuous,
    /// Negate on the left/right walls (`i = 0`, `i = N-1`), copy on the others.
    ReflectX,
    /// Negate on the bottom/top walls (`j = 0`, `j = N-1`), copy on the others.
    ReflectY,
}

/// Boundary condition handler: rebuilds the outer ring of `x` from its interior.
///   - `BoundaryRule::Continuous`: Neumann (copy neighbor) at walls
///   - `BoundaryRule::ReflectX`: x component negated at the vertical walls (no-penetration)
///   - `BoundaryRule::ReflectY`: y component negated at the horizontal walls (no-penetration)
///
/// Corners are the mean of their two edge neighbours, computed after the edges.
pub fn set_bnd(rule: BoundaryRule, x: &mut Grid) {
    let n = x.n();
    let flip_y = if rule == BoundaryRule::ReflectY { -1.0 } else { 1.0 };
    let flip_x = if rule == BoundaryRule::ReflectX { -1.0 } else { 1.0 };

    // Bottom/top rows
    for i in 1..(n - 1) {
        x[(i, 0)] = flip_y * x[(i, 1)];
        x[(i, n - 1)] = flip_y * x[(i, n - 2)];
    }
    // Left/right columns
    for j in 1..(n - 1) {
        x[(0, j)] = flip_x * x[(1, j)];
        x[(n - 1, j)] = flip_x * x[(n - 2, j)];
    }

    x[(0, 0)] = 0.5 * (x[(1, 0)] + x[(0, 1)]);
    x[(n - 1, 0)] = 0.5 * (x[(n - 2, 0)] + x[(n - 1, 1)]);
    x[(0, n - 1)] = 0.5 * (x[(1, n - 1)] + x[(0, n - 2)]);
    x[(n - 1, n - 1)] = 0.5 * (x[(n - 2, n - 1)] + x[(n - 1, n - 2)]);
}

mod color;
mod font;

// Re-export public API
pub use color::{blend, density_alpha, pack, Palette};
pub use font::render_status;
pub(crate) use font::STATUS_BAR_HEIGHT;

use crate::state::FluidState;

/// Window layout computed once from the grid side and the cell size.
///
/// The grid fills the top `display_height` rows of the frame, the status
/// bar the rest. Grid row `j = 0` is drawn at the bottom of the grid area.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub grid_size: usize,
    /// Pixels per grid cell along each axis.
    pub cell_size: usize,
    pub display_width: usize,
    pub display_height: usize,
    pub frame_width: usize,
    pub frame_height: usize,
}

impl RenderConfig {
    /// Layout for an `grid_size x grid_size` grid. A zero cell size is treated as 1.
    pub fn fit(grid_size: usize, cell_size: usize) -> Self {
        let cell_size = cell_size.max(1);
        let side = grid_size * cell_size;
        Self {
            grid_size,
            cell_size,
            display_width: side,
            display_height: side,
            frame_width: side,
            frame_height: side + STATUS_BAR_HEIGHT,
        }
    }

    /// Framebuffer length in pixels.
    pub fn pixel_count(&self) -> usize {
        self.frame_width * self.frame_height
    }

    /// Top-left pixel of cell `(i, j)`.
    pub fn cell_origin(&self, i: usize, j: usize) -> (usize, usize) {
        let row_from_top = self.grid_size - 1 - j;
        (i * self.cell_size, row_from_top * self.cell_size)
    }
}

/// Rasterise the density grid into `buf` (`0RGB` pixels, minifb layout).
///
/// The buffer is resized to the frame. Only the grid area is written; the
/// status bar rows are left for [`render_status`].
pub fn render_into(buf: &mut Vec<u32>, state: &FluidState, cfg: &RenderConfig, palette: Palette) {
    buf.resize(cfg.pixel_count(), 0);

    let density = state.density();
    let n = density.n().min(cfg.grid_size);
    let wall = palette.wall();
    let fw = cfg.frame_width;
    let cs = cfg.cell_size;

    for j in 0..n {
        for i in 0..n {
            let on_wall = i == 0 || j == 0 || i == n - 1 || j == n - 1;
            let pixel = if on_wall { wall } else { palette.shade(density[(i, j)]) };
            let (x0, y0) = cfg.cell_origin(i, j);
            for y in y0..y0 + cs {
                let row = y * fw;
                buf[row + x0..row + x0 + cs].fill(pixel);
            }
        }
    }
}

/// Allocate a fresh framebuffer and render into it.
pub fn render(state: &FluidState, cfg: &RenderConfig, palette: Palette) -> Vec<u32> {
    let mut buf = Vec::with_capacity(cfg.pixel_count());
    render_into(&mut buf, state, cfg, palette);
    buf
}

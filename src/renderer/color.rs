/// Selects the colours used for the background, the dye and the wall ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Palette {
    /// White dye on black, yellow walls.
    Ink,
    /// Tokyo Night: orange dye on deep navy, blue walls.
    TokyoNight,
}

impl Palette {
    /// Cycle to the next palette.
    pub fn next(self) -> Self {
        match self {
            Palette::Ink => Palette::TokyoNight,
            Palette::TokyoNight => Palette::Ink,
        }
    }

    pub fn background(self) -> [u8; 3] {
        match self {
            Palette::Ink => [0, 0, 0],
            Palette::TokyoNight => [26, 27, 38], // #1a1b26
        }
    }

    pub fn dye(self) -> [u8; 3] {
        match self {
            Palette::Ink => [255, 255, 255],
            Palette::TokyoNight => [255, 158, 100], // #ff9e64
        }
    }

    pub fn border(self) -> [u8; 3] {
        match self {
            Palette::Ink => [255, 255, 0],
            Palette::TokyoNight => [122, 162, 247], // #7aa2f7
        }
    }

    /// Pixel for an interior cell holding `density`.
    pub fn shade(self, density: f64) -> u32 {
        pack(blend(self.background(), self.dye(), density_alpha(density)))
    }

    /// Pixel for a boundary-ring cell.
    pub fn wall(self) -> u32 {
        pack(self.border())
    }
}

/// Opacity of a cell: density clamped to [0, 1]. NaN draws as empty.
pub fn density_alpha(density: f64) -> f64 {
    if density.is_nan() {
        0.0
    } else {
        density.clamp(0.0, 1.0)
    }
}

/// Source-over blend of `fg` onto `bg`.
pub fn blend(bg: [u8; 3], fg: [u8; 3], alpha: f64) -> [u8; 3] {
    let mix = |b: u8, f: u8| (b as f64 + alpha * (f as f64 - b as f64)).round() as u8;
    [mix(bg[0], fg[0]), mix(bg[1], fg[1]), mix(bg[2], fg[2])]
}

/// Pack RGB into minifb's `0RGB` pixel layout.
pub const fn pack(c: [u8; 3]) -> u32 {
    ((c[0] as u32) << 16) | ((c[1] as u32) << 8) | c[2] as u32
}

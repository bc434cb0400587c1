use super::RenderConfig;

/// Status bar layout constants.
pub(crate) const FONT_WIDTH: usize = 5;
pub(crate) const FONT_HEIGHT: usize = 7;
pub(crate) const STATUS_PAD_TOP: usize = 3;
pub(crate) const STATUS_PAD_BOTTOM: usize = 2;
pub(crate) const STATUS_BAR_HEIGHT: usize = STATUS_PAD_TOP + FONT_HEIGHT + STATUS_PAD_BOTTOM;

const STATUS_BG: u32 = 0x000D_0D0D;
const STATUS_SEPARATOR: u32 = 0x0033_3333;
const STATUS_TEXT: u32 = 0x0088_8888;

/// 5x7 bitmap font glyph lookup. Each row is a u8 with lower 5 bits = pixels (bit4=left).
pub(crate) const fn glyph(ch: u8) -> [u8; FONT_HEIGHT] {
    match ch {
        b' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        b'.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x00],
        b'-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        b'|' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        b'0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        b'1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        b'2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        b'3' => [0x0E, 0x11, 0x01, 0x06, 0x01, 0x11, 0x0E],
        b'4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        b'5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        b'6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        b'7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        b'8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        b'9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        b'a' => [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F],
        b'b' => [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x1E],
        b'c' => [0x00, 0x00, 0x0E, 0x10, 0x10, 0x11, 0x0E],
        b'd' => [0x01, 0x01, 0x0D, 0x13, 0x11, 0x11, 0x0F],
        b'e' => [0x00, 0x00, 0x0E, 0x11, 0x1F, 0x10, 0x0E],
        b'f' => [0x06, 0x09, 0x08, 0x1C, 0x08, 0x08, 0x08],
        b'g' => [0x00, 0x00, 0x0F, 0x11, 0x0F, 0x01, 0x0E],
        b'h' => [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x11],
        b'i' => [0x04, 0x00, 0x0C, 0x04, 0x04, 0x04, 0x0E],
        b'j' => [0x02, 0x00, 0x06, 0x02, 0x02, 0x12, 0x0C],
        b'k' => [0x10, 0x10, 0x12, 0x14, 0x18, 0x14, 0x12],
        b'l' => [0x0C, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        b'm' => [0x00, 0x00, 0x1A, 0x15, 0x15, 0x11, 0x11],
        b'n' => [0x00, 0x00, 0x16, 0x19, 0x11, 0x11, 0x11],
        b'o' => [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E],
        b'p' => [0x00, 0x00, 0x1E, 0x11, 0x1E, 0x10, 0x10],
        b'q' => [0x00, 0x00, 0x0D, 0x13, 0x0F, 0x01, 0x01],
        b'r' => [0x00, 0x00, 0x16, 0x19, 0x10, 0x10, 0x10],
        b's' => [0x00, 0x00, 0x0E, 0x10, 0x0E, 0x01, 0x1E],
        b't' => [0x08, 0x08, 0x1C, 0x08, 0x08, 0x09, 0x06],
        b'u' => [0x00, 0x00, 0x11, 0x11, 0x11, 0x13, 0x0D],
        b'v' => [0x00, 0x00, 0x11, 0x11, 0x11, 0x0A, 0x04],
        b'w' => [0x00, 0x00, 0x11, 0x11, 0x15, 0x15, 0x0A],
        b'x' => [0x00, 0x00, 0x11, 0x0A, 0x04, 0x0A, 0x11],
        b'y' => [0x00, 0x00, 0x11, 0x11, 0x0F, 0x01, 0x0E],
        b'z' => [0x00, 0x00, 0x1F, 0x02, 0x04, 0x08, 0x1F],
        _ => [0x00; FONT_HEIGHT],
    }
}


/// Draw one glyph with its top-left at (x, y). Pixels past the buffer are dropped.
pub(crate) fn draw_char(buf: &mut [u32], frame_width: usize, x: usize, y: usize, ch: u8, color: u32) {
    let g = glyph(ch);
    for (row, bits) in g.iter().enumerate() {
        for col in 0..FONT_WIDTH {
            if bits & (1 << (FONT_WIDTH - 1 - col)) == 0 {
                continue;
            }
            let px = x + col;
            if px >= frame_width {
                continue;
            }
            if let Some(pixel) = buf.get_mut((y + row) * frame_width + px) {
                *pixel = color;
            }
        }
    }
}

/// Draw a string of text at (x, y). Returns the x position after the last character.
pub(crate) fn draw_text(buf: &mut [u32], frame_width: usize, x: usize, y: usize, text: &str, color: u32) -> usize {
    let char_step = FONT_WIDTH + 1;
    let mut cx = x;
    for &ch in text.as_bytes() {
        draw_char(buf, frame_width, cx, y, ch, color);
        cx += char_step;
    }
    cx
}

/// Draw status text in the bar below the grid. Text that does not fit is cut.
pub fn render_status(buf: &mut [u32], cfg: &RenderConfig, text: &str) {
    let fw = cfg.frame_width;
    let y_start = cfg.display_height;
    let bar_start = y_start * fw;
    let bar_end = (cfg.frame_height * fw).min(buf.len());
    if bar_start >= bar_end {
        return;
    }

    let bar = &mut buf[bar_start..bar_end];
    bar.fill(STATUS_BG);
    // Separator line
    let sep = fw.min(bar.len());
    bar[..sep].fill(STATUS_SEPARATOR);

    let text_y = y_start + STATUS_PAD_TOP;
    let fits = fw.saturating_sub(4) / (FONT_WIDTH + 1);
    let end = text.char_indices().nth(fits).map_or(text.len(), |(i, _)| i);
    draw_text(buf, fw, 4, text_y, &text[..end], STATUS_TEXT);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> RenderConfig {
        RenderConfig::fit(64, 4)
    }

    #[test]
    fn test_glyphs_cover_status_text() {
        for ch in b"mass 0.123 | div 0.00045 | fps 60 | paused" {
            if *ch == b' ' {
                continue;
            }
            let has_bits = glyph(*ch).iter().any(|&row| row != 0);
            assert!(has_bits, "glyph {:?} should have non-zero bits", *ch as char);
        }
    }

    #[test]
    fn test_draw_text_returns_end_position() {
        let cfg = test_config();
        let mut buf = vec![0u32; cfg.frame_width * cfg.frame_height];
        let end_x = draw_text(&mut buf, cfg.frame_width, 10, 10, "hello", 0x00FF_FFFF);
        // "hello" = 5 chars, each FONT_WIDTH + 1 pixel spacing = 6 * 5 = 30
        let expected = 10 + 5 * (FONT_WIDTH + 1);
        assert_eq!(end_x, expected, "draw_text should return cursor position after text");

        let mut found = false;
        for y in 10..10 + FONT_HEIGHT {
            for x in 10..end_x {
                if buf[y * cfg.frame_width + x] != 0 {
                    found = true;
                }
            }
        }
        assert!(found, "draw_text should have drawn some pixels");
    }

    #[test]
    fn test_draw_char_clips_at_right_edge() {
        let mut buf = vec![0u32; 8 * 8];
        draw_char(&mut buf, 8, 6, 0, b'0', 1);
        // Columns 6 and 7 only; nothing wraps onto the next row's left edge.
        for y in 0..8 {
            for x in 0..6 {
                assert_eq!(buf[y * 8 + x], 0, "pixel ({x}, {y}) should be untouched");
            }
        }
    }

    #[test]
    fn test_render_status_draws_text() {
        let cfg = test_config();
        let mut buf = vec![0u32; cfg.frame_width * cfg.frame_height];
        render_status(&mut buf, &cfg, "mass 1.0");

        let status_area = &buf[cfg.display_height * cfg.frame_width..];
        assert!(status_area.iter().all(|&p| p != 0), "Status bar should be fully painted");
        assert!(status_area.contains(&STATUS_TEXT), "Status bar should contain text");
        // Grid area untouched
        assert!(buf[..cfg.display_height * cfg.frame_width].iter().all(|&p| p == 0));
    }

    #[test]
    fn test_render_status_separator_line() {
        let cfg = test_config();
        let mut buf = vec![0u32; cfg.frame_width * cfg.frame_height];
        render_status(&mut buf, &cfg, "hello");
        let sep_row = cfg.display_height * cfg.frame_width;
        assert!(buf[sep_row..sep_row + cfg.frame_width].iter().all(|&p| p == STATUS_SEPARATOR));
    }

    #[test]
    fn test_render_status_truncates_long_text() {
        let cfg = RenderConfig::fit(3, 4);
        let mut buf = vec![0u32; cfg.frame_width * cfg.frame_height];
        render_status(&mut buf, &cfg, "mass 123.456 | div 0.0001 | fps 60");
        assert_eq!(buf.len(), cfg.frame_width * cfg.frame_height);
    }
}

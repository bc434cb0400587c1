use std::error::Error;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use dyeflow::config;
use dyeflow::input::{self, Brush};
use dyeflow::renderer::{self, Palette, RenderConfig};
use dyeflow::FluidState;

/// Frames between diagnostic log lines.
const DIAGNOSTIC_INTERVAL: u64 = 120;

fn format_status(mass: f64, max_div: f64, fps: u32, paused: bool) -> String {
    let mut text = format!("mass {mass:.3} | div {max_div:.6} | fps {fps}");
    if paused {
        text.push_str(" | paused");
    }
    text
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = match std::env::args_os().nth(1) {
        Some(path) => config::load_from(&PathBuf::from(path)),
        None => config::load(),
    };

    let n = cfg.physics.grid_size;
    let mut state = FluidState::with_params(n, cfg.physics.solver_params())?;
    let mut brush = Brush::new(&cfg.brush);
    let render_cfg = RenderConfig::fit(n, cfg.display.cell_size);
    let (w, h) = (render_cfg.frame_width, render_cfg.frame_height);
    let steps_per_frame = cfg.display.steps_per_frame.max(1);

    let mut window = Window::new("dyeflow", w, h, WindowOptions::default())?;
    window.set_target_fps(cfg.display.target_fps);

    // Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    log::info!("viewer started: {w}x{h} px, {steps_per_frame} step(s) per frame");

    let mut framebuf: Vec<u32> = Vec::with_capacity(render_cfg.pixel_count());
    let mut palette = Palette::Ink;
    let mut selected = (n / 2, n / 2);
    let mut paused = false;
    let mut frames = 0u64;
    let mut fps_frames = 0u32;
    let mut display_fps = 0u32;
    let mut last_fps_time = Instant::now();

    while window.is_open() && running.load(Ordering::SeqCst) {
        // --- Keyboard handling ---
        if window.is_key_pressed(Key::Escape, KeyRepeat::No) {
            break;
        }
        if window.is_key_pressed(Key::Space, KeyRepeat::No) {
            paused = !paused;
        }
        if window.is_key_pressed(Key::R, KeyRepeat::No) {
            state.reset();
            log::info!("grids cleared");
        }
        if window.is_key_pressed(Key::C, KeyRepeat::No) {
            palette = palette.next();
        }

        // --- Mouse: choose the injection cell ---
        if window.get_mouse_down(MouseButton::Left) {
            if let Some(cell) = window
                .get_mouse_pos(MouseMode::Discard)
                .and_then(|(x, y)| input::cell_at(&render_cfg, x, y))
            {
                selected = cell;
            }
        }

        // --- Physics ---
        if !paused {
            brush.stamp(&mut state, selected);
            for _ in 0..steps_per_frame {
                state.simulation_step();
            }
        }

        // --- Render ---
        renderer::render_into(&mut framebuf, &state, &render_cfg, palette);
        let status = format_status(state.mass(), state.max_divergence(), display_fps, paused);
        renderer::render_status(&mut framebuf, &render_cfg, &status);
        window.update_with_buffer(&framebuf, w, h)?;

        frames += 1;
        if frames % DIAGNOSTIC_INTERVAL == 0 {
            log::debug!(
                "frame {frames}: mass={:.6} max_div={:.3e}",
                state.mass(),
                state.max_divergence()
            );
        }

        fps_frames += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            display_fps = fps_frames;
            fps_frames = 0;
            last_fps_time = now;
            window.set_title(&format!("dyeflow - {display_fps} fps"));
        }
    }

    log::info!("viewer stopped after {frames} frames");
    Ok(())
}

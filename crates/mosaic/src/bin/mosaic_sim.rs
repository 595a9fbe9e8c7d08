//! Multi-window canvas simulator.
//!
//! Hosts several "windows" inside one process, all sharing one in-memory
//! store, and runs their frame loops round-robin at a fixed cadence. The
//! script moves one window mid-run and closes another, exercising the
//! whole reconcile/animate/render path the way real windows would.
//!
//! Run with: `cargo run --bin mosaic_sim`

use std::sync::Arc;

use mosaic::core::{DisplayScheduler, FrameError, FrameLoop, LayerConfig};
use mosaic::registry::{MemoryStore, WindowTracker};
use mosaic::rendering::HeadlessSurface;
use mosaic::shared::{EngineConfig, WindowShape};
use mosaic::FixedRateScheduler;

/// Frames to simulate (~4 seconds at 60 FPS).
const FRAMES: u64 = 240;

/// Frame at which window B starts drifting right.
const MOVE_FRAME: u64 = 60;

/// Frame at which window C closes.
const CLOSE_FRAME: u64 = 120;

/// Aggressive heartbeat timeout so the close is visible within the run.
const HEARTBEAT_TIMEOUT_MS: u64 = 150;

struct SimWindow {
    name: &'static str,
    frame_loop: FrameLoop<WindowTracker, HeadlessSurface>,
}

impl SimWindow {
    fn spawn(
        name: &'static str,
        store: &MemoryStore,
        config: &EngineConfig,
        shape: WindowShape,
    ) -> Result<Self, FrameError> {
        let tracker = WindowTracker::new(
            Arc::new(store.clone()),
            shape,
            HEARTBEAT_TIMEOUT_MS,
        );
        let surface = HeadlessSurface::new(shape.w, shape.h);
        let mut frame_loop = FrameLoop::new(
            config,
            serde_json::json!({ "name": name }),
            tracker,
            surface,
            LayerConfig::canvas_default(),
        );
        frame_loop.handle_visibility(true)?;
        Ok(Self { name, frame_loop })
    }
}

fn main() -> Result<(), FrameError> {
    let config = EngineConfig::default();
    let store = MemoryStore::new();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║                     MOSAIC CANVAS SIMULATOR                      ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();
    println!("  3 windows, {FRAMES} frames @ {} FPS", config.target_fps);
    println!("  frame {MOVE_FRAME}: window B starts drifting right");
    println!("  frame {CLOSE_FRAME}: window C closes (heartbeat goes silent)");
    println!();

    let mut windows = vec![
        SimWindow::spawn("A", &store, &config, WindowShape::new(0.0, 0.0, 800.0, 600.0))?,
        SimWindow::spawn("B", &store, &config, WindowShape::new(900.0, 50.0, 800.0, 600.0))?,
        SimWindow::spawn("C", &store, &config, WindowShape::new(450.0, 700.0, 800.0, 600.0))?,
    ];

    let mut scheduler = FixedRateScheduler::new(config.target_fps);
    let mut b_shape = WindowShape::new(900.0, 50.0, 800.0, 600.0);

    for frame in 0..FRAMES {
        if frame == CLOSE_FRAME {
            // Dropping the loop silences its heartbeat; the survivors
            // prune it once the timeout elapses.
            windows.retain(|w| w.name != "C");
            println!("  [frame {frame:>3}] window C closed");
        }

        if frame >= MOVE_FRAME {
            b_shape.x += 4.0;
            if let Some(b) = windows.iter_mut().find(|w| w.name == "B") {
                b.frame_loop.registry_mut().set_local_shape(b_shape, true)?;
            }
        }

        for window in &mut windows {
            window.frame_loop.tick()?;
        }
        scheduler.await_next_frame();
    }

    println!();
    println!("┌─ RESULTS ──────────────────────────────────────────────────────┐");
    for window in &windows {
        let frame_loop = &window.frame_loop;
        let stats = frame_loop.stats();
        println!(
            "│ window {}: {} frames, avg {:.3} ms ({:.1} FPS logic), {} slow",
            window.name,
            stats.frames_recorded,
            stats.avg_frame_ms(),
            stats.avg_fps(),
            stats.slow_frames,
        );
        println!(
            "│   roster slots: {}, draws last frame: {}, offset: ({:.1}, {:.1})",
            frame_loop.driver().slot_count(),
            frame_loop.surface().last_batch().len(),
            frame_loop.offset().current().x,
            frame_loop.offset().current().y,
        );
    }
    println!("└────────────────────────────────────────────────────────────────┘");

    let survivors = &windows[0];
    assert_eq!(
        survivors.frame_loop.driver().slot_count(),
        windows.len(),
        "survivors must agree the roster shrank to {}",
        windows.len()
    );

    println!();
    println!("  canvas consistent across {} windows ✓", windows.len());
    Ok(())
}

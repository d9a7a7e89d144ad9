mod core;
mod panel;
mod platform;

use crate::core::config::{self, PanelConfig};
use crate::core::types::{Color, Vec2};
use log::{error, info, warn};
use panel::pan_gesture::PanRecognizer;
use panel::panel_controller::PanelController;
use panel::panel_view::PanelView;
use platform::error::PlatformError;
use platform::renderer::Renderer;
use platform::renderer_cairo::RendererCairo;
use platform::window_x11::WindowX11;
use std::time::Instant;

const KEYCODE_Q: u32 = 24;

struct Args {
    width: i32,
    height: i32,
}

fn parse_args() -> Args {
    let mut args = Args {
        width: config::WINDOW_DEFAULT_W,
        height: config::WINDOW_DEFAULT_H,
    };

    let argv: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "--width" if i + 1 < argv.len() => {
                i += 1;
                match argv[i].parse() {
                    Ok(w) => args.width = w,
                    Err(_) => warn!("ignoring invalid --width '{}'", argv[i]),
                }
            }
            "--height" if i + 1 < argv.len() => {
                i += 1;
                match argv[i].parse() {
                    Ok(h) => args.height = h,
                    Err(_) => warn!("ignoring invalid --height '{}'", argv[i]),
                }
            }
            other => warn!("ignoring unknown argument '{}'", other),
        }
        i += 1;
    }

    args
}

fn main() {
    env_logger::init();

    let args = parse_args();

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), PlatformError> {
    let mut window = WindowX11::new();
    window.create(args.width, args.height, "Drag Panel")?;

    let mut renderer = RendererCairo::new(window.create_cairo_context()?);

    let mut controller = PanelController::new(
        PanelView::new(),
        window.height() as f64,
        PanelConfig::default(),
    );
    let mut pan = PanRecognizer::new();

    info!(
        "panel ready in {}x{} window, drag the panel to expand or collapse",
        window.width(),
        window.height()
    );

    let start = Instant::now();
    let mut last_time = Instant::now();
    let mut drawn_pass = None;

    // Main loop
    'frame: loop {
        if !window.poll_events() {
            break;
        }

        if window.take_resized() {
            controller.set_container_height(window.height() as f64);
        }

        let container_w = window.width() as f64;
        let container_h = window.height() as f64;
        let now_ms = start.elapsed().as_secs_f64() * 1000.0;

        for event in window.take_mouse_events() {
            let inside = controller.surface().hit_test(
                Vec2::new(event.x, event.y),
                container_w,
                container_h,
            );
            if let Some(pan_event) = pan.handle_mouse(&event, now_ms, inside) {
                controller.handle_pan(&pan_event);
            }
        }
        for event in window.take_key_events() {
            if event.pressed && event.ctrl && event.keycode == KEYCODE_Q {
                break 'frame;
            }
        }

        // Delta time
        let now = Instant::now();
        let dt = now.duration_since(last_time).as_secs_f64() * 1000.0;
        last_time = now;

        controller.update(dt);

        // Render only when the panel moved or the window was damaged
        let pass = controller.surface().layout_passes();
        if !window.take_damaged() && drawn_pass == Some(pass) {
            std::thread::sleep(std::time::Duration::from_millis(config::FRAME_MS));
            continue;
        }
        drawn_pass = Some(pass);

        match window.create_cairo_context() {
            Ok(cr) => renderer.set_context(cr),
            Err(e) => warn!("keeping previous Cairo context: {}", e),
        }

        renderer.begin_frame(window.width(), window.height());
        renderer.fill_rect(
            0.0,
            0.0,
            container_w,
            container_h,
            Color::from_hex(config::BG_COLOR, 1.0),
        );
        controller.surface().render(&renderer, container_w, container_h);
        renderer.end_frame();

        window.flush();

        // Cap at ~60fps
        std::thread::sleep(std::time::Duration::from_millis(config::FRAME_MS));
    }

    info!("panel closed in {:?} state", controller.state());
    Ok(())
}

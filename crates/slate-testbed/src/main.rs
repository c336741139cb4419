use anyhow::Result;

use slate_engine::canvas::Canvas;
use slate_engine::coords::Point;
use slate_engine::core::{App, AppControl};
use slate_engine::device::GpuInit;
use slate_engine::input::Key;
use slate_engine::logging::{LoggingConfig, init_logging};
use slate_engine::paint::Color;
use slate_engine::window::{Runtime, RuntimeConfig};

/// Exercises every canvas operation once per frame: clear, filled and
/// outlined rectangles/circles, a line and a polygon, with the fill hue
/// cycling over time.
struct Testbed {
    elapsed: f32,
}

impl App for Testbed {
    fn on_startup(&mut self, args: &[String]) -> AppControl {
        log::info!("provided arguments:");
        for arg in args {
            log::info!("  {arg}");
        }
        AppControl::Continue
    }

    fn on_update(&mut self, dt: f32) -> AppControl {
        self.elapsed += dt;
        AppControl::Continue
    }

    fn on_paint(&mut self, canvas: &mut Canvas) -> AppControl {
        canvas.clear(Color::from_hex("#1e2430").unwrap_or(Color::BLACK));

        let hue = (self.elapsed * 0.1).fract();
        canvas.set_fill_color(Color::from_hsv(hue, 0.8, 0.9, 1.0));
        canvas.set_stroke_color(Color::WHITE);

        if let Err(err) = canvas.draw_rect(40.0, 40.0, 220.0, 130.0, true) {
            log::warn!("rect draw rejected: {err}");
        }
        let _ = canvas.draw_rect(40.0, 210.0, 220.0, 130.0, false);

        let _ = canvas.draw_circle(460.0, 190.0, 95.0, 48, true);
        canvas.set_stroke_color(Color::GRAY_LIGHT);
        let _ = canvas.draw_circle(460.0, 190.0, 120.0, 48, false);

        canvas.set_stroke_color(Color::YELLOW.with_alpha(0.8));
        canvas.draw_line(Point::new(40.0, 420.0), Point::new(700.0, 420.0));

        canvas.set_fill_color(Color::from_hsv((hue + 0.5).fract(), 0.7, 0.8, 0.9));
        canvas.draw_polygon(
            &[
                Point::new(640.0, 60.0),
                Point::new(730.0, 110.0),
                Point::new(700.0, 210.0),
                Point::new(580.0, 210.0),
                Point::new(550.0, 110.0),
            ],
            true,
        );

        AppControl::Continue
    }

    fn on_key_press(&mut self, key: Key) -> AppControl {
        if key == Key::Escape {
            AppControl::Exit
        } else {
            AppControl::Continue
        }
    }

    fn on_window_resize(&mut self, width: u32, height: u32) -> AppControl {
        log::debug!("resized to {width}x{height}");
        AppControl::Continue
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "Slate Testbed".to_string(),
        ..Default::default()
    };

    Runtime::run(config, GpuInit::default(), Testbed { elapsed: 0.0 })
}

use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::canvas::Canvas;
use crate::core::{App, AppControl};
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::input;
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,

    /// Initial window size in logical pixels.
    pub initial_size: LogicalSize<f64>,

    /// Process arguments handed to `App::on_startup`; opaque to the runtime.
    pub args: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "slate".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            args: std::env::args().collect(),
        }
    }
}

/// Entry point for the runtime: creates the window, GPU context and canvas,
/// then drives the application until a callback returns `Exit` or the
/// window is closed.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        anyhow::ensure!(
            !config.args.is_empty(),
            "runtime configured with empty process arguments"
        );

        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = RuntimeState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

// The wgpu surface borrows the window; ouroboros keeps both in one movable
// entry so the borrow never dangles.
#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct RuntimeState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    canvas: Option<Canvas>,
    clock: FrameClock,
    window_id: Option<WindowId>,

    started: bool,
    exit_requested: bool,
}

impl<A> RuntimeState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            canvas: None,
            clock: FrameClock::new(),
            window_id: None,
            started: false,
            exit_requested: false,
        }
    }

    fn apply(&mut self, control: AppControl, event_loop: &ActiveEventLoop) {
        if control == AppControl::Exit {
            self.exit_requested = true;
            event_loop.exit();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let ft = self.clock.tick();
        let control = self.app.on_update(ft.dt);
        self.apply(control, event_loop);
        if self.exit_requested {
            return;
        }

        let (Some(entry), Some(canvas)) = (self.entry.as_mut(), self.canvas.as_mut()) else {
            return;
        };

        let frame = match entry.with_gpu(|gpu| gpu.begin_frame()) {
            Ok(frame) => frame,
            Err(err) => {
                let action = entry.with_gpu_mut(|gpu| gpu.handle_surface_error(err));
                if action == SurfaceErrorAction::Fatal {
                    log::error!("fatal surface error; shutting down");
                    self.exit_requested = true;
                    event_loop.exit();
                }
                return;
            }
        };

        canvas.begin(&frame.view);
        let control = self.app.on_paint(canvas);
        canvas.end();

        entry.with_window(|w| w.pre_present_notify());
        entry.with_gpu(|gpu| gpu.present(frame));

        self.apply(control, event_loop);
    }

    fn resize(&mut self, width: u32, height: u32, event_loop: &ActiveEventLoop) {
        if let Some(entry) = self.entry.as_mut() {
            entry.with_gpu_mut(|gpu| gpu.resize(winit::dpi::PhysicalSize::new(width, height)));
        }
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.resize(width, height);
        }

        let control = self.app.on_window_resize(width, height);
        self.apply(control, event_loop);

        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }
}

impl<A> ApplicationHandler for RuntimeState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = match event_loop.create_window(attrs) {
            Ok(window) => window,
            Err(err) => {
                log::error!("failed to create window: {err}");
                self.exit_requested = true;
                event_loop.exit();
                return;
            }
        };

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryBuilder {
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).expect("GPU initialization failed")
            },
        }
        .build();

        self.window_id = Some(entry.with_window(|w| w.id()));

        let size = entry.with_window(|w| w.inner_size());
        let canvas = entry.with_gpu(|gpu| {
            Canvas::new(
                gpu.device(),
                gpu.queue(),
                gpu.surface_format(),
                size.width,
                size.height,
            )
        });

        entry.with_window(|w| w.request_redraw());

        self.entry = Some(entry);
        self.canvas = Some(canvas);

        if !self.started {
            self.started = true;
            self.clock.reset();
            let control = self.app.on_startup(&self.config.args);
            self.apply(control, event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: the canvas retains nothing, so every frame is
        // repainted from scratch.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }
        if Some(window_id) != self.window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.exit_requested = true;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                self.resize(new_size.width, new_size.height, event_loop);
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = &self.entry {
                    let size = entry.with_window(|w| w.inner_size());
                    self.resize(size.width, size.height, event_loop);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed {
                    let control = self.app.on_key_press(input::map_key(event.physical_key));
                    self.apply(control, event_loop);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if state == ElementState::Pressed {
                    let control = self
                        .app
                        .on_mouse_button_press(input::map_mouse_button(button));
                    self.apply(control, event_loop);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let control = self
                    .app
                    .on_cursor_move(position.x as f32, position.y as f32);
                self.apply(control, event_loop);
            }

            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if self.started {
            self.app.on_shutdown();
        }
    }
}

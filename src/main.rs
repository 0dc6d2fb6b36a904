use std::num::NonZeroU32;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::{debug, error, info};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use orez_pillars::Vec2;
use orez_pillars::camera::Viewport;
use orez_pillars::config::Config;
use orez_pillars::error::AppError;
use orez_pillars::framebuffer::Framebuffer;
use orez_pillars::layout;
use orez_pillars::player::{Heading, Player};
use orez_pillars::renderer::{Palette, render_scene};
use orez_pillars::scaler::{ScaleLut, blit_letterboxed, build_scale_lut};
use orez_pillars::world::{Wall, WorldState};

struct App {
    config: Config,
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    world: WorldState,
    palette: Palette,

    // Fixed-size viewport buffers; the cap layer is composited onto screen.
    screen: Framebuffer,
    cap: Framebuffer,
    scale_lut: ScaleLut,

    // Frame pacing
    tick_period: Duration,
    next_tick: Instant,

    // HUD
    redraw_counter: u32,
    last_stats_print: Instant,

    error: Option<AppError>,
}

impl App {
    fn new(config: Config, walls: Vec<Wall>) -> Self {
        let viewport = Viewport::new(config.viewport_width, config.viewport_height);
        let player = Player::new(
            Vec2::new(config.start[0], config.start[1]),
            config.player_radius,
            config.step,
        );
        let palette = Palette::default();
        let (w, h) = (
            config.viewport_width as usize,
            config.viewport_height as usize,
        );

        Self {
            tick_period: Duration::from_secs_f64(1.0 / f64::from(config.tick_rate)),
            config,
            window: None,
            surface: None,
            world: WorldState::new(walls, player, viewport),
            palette,
            screen: Framebuffer::new(w, h),
            cap: Framebuffer::with_color_key(w, h, palette.cap_key),
            scale_lut: ScaleLut::empty(),
            next_tick: Instant::now(),
            redraw_counter: 0,
            last_stats_print: Instant::now(),
            error: None,
        }
    }

    /// Stash the error for `run` to return and stop the loop.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        self.error = Some(err);
        event_loop.exit();
    }

    fn redraw_scene(&mut self) {
        render_scene(&mut self.screen, &mut self.cap, &mut self.world, &self.palette);
        self.redraw_counter += 1;

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_stats_print).as_secs_f32();
        if elapsed >= 1.0 {
            debug!(
                "redraws/s: {:.1}, player at ({:.1}, {:.1})",
                self.redraw_counter as f32 / elapsed,
                self.world.player.position.x,
                self.world.player.position.y
            );
            self.redraw_counter = 0;
            self.last_stats_print = now;
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Stretch the viewport buffer onto the window.
    fn present(&mut self) -> Result<(), softbuffer::SoftBufferError> {
        let (Some(window), Some(surface)) = (&self.window, &mut self.surface) else {
            return Ok(());
        };
        let size = window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return Ok(()); // Minimized window, skip drawing
        };
        surface.resize(w, h)?;

        let (dw, dh) = (size.width as usize, size.height as usize);
        if self.scale_lut.dst_size() != (dw, dh) {
            self.scale_lut = build_scale_lut(dw, dh, self.screen.width, self.screen.height);
        }

        let mut buf = surface.buffer_mut()?;
        blit_letterboxed(
            &mut buf,
            &self.screen.pixels,
            self.screen.width,
            &self.scale_lut,
            self.palette.background,
        );
        buf.present()
    }
}

fn heading_for(code: KeyCode) -> Option<Heading> {
    match code {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(Heading::NORTH),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(Heading::WEST),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(Heading::SOUTH),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(Heading::EAST),
        _ => None,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title(self.config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                f64::from(self.config.viewport_width),
                f64::from(self.config.viewport_height),
            ));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Rc::new(window),
            Err(err) => return self.fail(event_loop, AppError::CreateWindow(err)),
        };
        let surface = softbuffer::Context::new(window.clone())
            .and_then(|context| softbuffer::Surface::new(&context, window.clone()));
        match surface {
            Ok(surface) => self.surface = Some(surface),
            Err(err) => return self.fail(event_loop, AppError::Surface(err)),
        }
        self.window = Some(window);

        self.redraw_scene();
        self.next_tick = Instant::now() + self.tick_period;
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape && state == ElementState::Pressed {
                    info!("Escape pressed, exiting.");
                    event_loop.exit();
                    return;
                }
                if let Some(heading) = heading_for(code) {
                    let held = &mut self.world.player.heading;
                    match state {
                        ElementState::Pressed => held.insert(heading),
                        ElementState::Released => held.remove(heading),
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if self.window.as_ref().map(|w| w.id()) != Some(id) {
                    return;
                }
                if let Err(err) = self.present() {
                    self.fail(event_loop, AppError::Surface(err));
                }
            }

            WindowEvent::Resized(size) => {
                info!("Resized to {}x{}", size.width, size.height);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if now >= self.next_tick {
            if self.world.tick() {
                self.redraw_scene();
            }
            self.next_tick += self.tick_period;
            // Don't try to catch up after a stall.
            if self.next_tick < now {
                self.next_tick = now + self.tick_period;
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_tick));
    }
}

fn run() -> Result<(), AppError> {
    let config = Config::from_env()?;
    let walls = layout::orez_pillars()?;
    info!(
        "{}: {} walls, viewport {}x{}, radius {}, step {}, {} Hz",
        config.window_title,
        walls.len(),
        config.viewport_width,
        config.viewport_height,
        config.player_radius,
        config.step,
        config.tick_rate
    );

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let mut app = App::new(config, walls);
    event_loop.run_app(&mut app).map_err(AppError::EventLoopRun)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

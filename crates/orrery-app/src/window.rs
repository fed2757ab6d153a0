//! Interactive window: winit event handling feeding the session and renderer.

use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use orrery_config::Config;
use orrery_render::{OrreryRenderer, RenderContext, SurfaceError, init_render_context_blocking};
use orrery_sim::{BodyId, Session, SessionEvent, cursor_to_ndc};
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::input::{PointerState, scroll_lines};
use crate::reload::ConfigSource;

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// Window title for the current focus.
pub fn window_title(base: &str, focus: Option<&str>) -> String {
    match focus {
        Some(name) => format!("{base} - {name}"),
        None => base.to_string(),
    }
}

/// Whether a key event requests a camera reset.
fn is_reset_key(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed
        && !event.repeat
        && matches!(
            event.physical_key,
            PhysicalKey::Code(KeyCode::KeyR | KeyCode::Home)
        )
}

/// Whether a key event asks to re-read `config.ron`.
fn is_reload_key(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed
        && !event.repeat
        && event.physical_key == PhysicalKey::Code(KeyCode::F5)
}

/// Window, GPU and session state driven by the winit event loop.
pub struct OrreryApp {
    source: ConfigSource,
    config: Config,
    session: Session,
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    renderer: Option<OrreryRenderer>,
    pointer: PointerState,
    start_time: Instant,
    shown_focus: Option<BodyId>,
}

impl OrreryApp {
    pub fn new(source: ConfigSource, session: Session) -> Self {
        Self {
            config: source.effective(),
            source,
            session,
            window: None,
            gpu: None,
            renderer: None,
            pointer: PointerState::new(),
            start_time: Instant::now(),
            shown_focus: None,
        }
    }

    fn now(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    fn viewport(&self) -> Vec2 {
        self.window
            .as_ref()
            .map(|w| {
                let size = w.inner_size();
                Vec2::new(size.width as f32, size.height as f32)
            })
            .unwrap_or(Vec2::ONE)
    }

    fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let now = self.now();
        let viewport = self.viewport();
        let delta = self.pointer.on_cursor_moved(x, y);
        if self.pointer.is_dragging() && delta != Vec2::ZERO {
            self.session.handle(
                SessionEvent::Orbit {
                    delta,
                    viewport_height: viewport.y,
                },
                now,
            );
        }
        if let Some(cursor) = self.pointer.position() {
            let ndc = cursor_to_ndc(cursor, viewport);
            self.session.handle(SessionEvent::PointerMoved { ndc }, now);
        }
    }

    /// Re-read `config.ron` and rebuild the session if it changed.
    ///
    /// Returns whether the session was replaced. A file that fails to load or
    /// describes an invalid system leaves the running session untouched.
    /// Window and logging settings apply on the next start.
    fn reload_config(&mut self) -> bool {
        let config = match self.source.reload() {
            Ok(Some(config)) => config,
            Ok(None) => {
                info!("Config unchanged");
                return false;
            }
            Err(e) => {
                warn!("Config reload failed: {e}");
                return false;
            }
        };
        let mut session = match Session::from_config(&config) {
            Ok(session) => session,
            Err(e) => {
                warn!("Reloaded config rejected: {e}");
                return false;
            }
        };

        if let Some(window) = &self.window {
            let size = window.inner_size();
            session.resize(size.width, size.height);
            window.set_title(&self.config.window.title);
        }
        if let Some(gpu) = &self.gpu {
            self.renderer = Some(OrreryRenderer::new(gpu, session.scene()));
        }
        self.session = session;
        let window = std::mem::replace(&mut self.config, config).window;
        self.config.window = window;
        self.start_time = Instant::now();
        self.shown_focus = None;
        info!("Session rebuilt from reloaded config");
        true
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = self.now();
        let report = self.session.frame(now);

        if report.focus != self.shown_focus {
            self.shown_focus = report.focus;
            if let Some(window) = &self.window {
                let name = self.session.focused_body().map(|b| b.name());
                window.set_title(&window_title(&self.config.window.title, name));
            }
        }

        let (Some(gpu), Some(renderer)) = (&self.gpu, &mut self.renderer) else {
            return;
        };
        match renderer.render(gpu, self.session.scene()) {
            Ok(()) => {}
            Err(SurfaceError::Timeout) => warn!("Surface timeout, skipping frame"),
            Err(e) => {
                error!("Render failed: {e}");
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for OrreryApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window = match event_loop.create_window(window_attributes_from_config(&self.config)) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.session.resize(size.width, size.height);

        match init_render_context_blocking(window.clone(), self.config.window.vsync) {
            Ok(ctx) => {
                self.renderer = Some(OrreryRenderer::new(&ctx, self.session.scene()));
                self.gpu = Some(ctx);
            }
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        }

        info!("Window {}x{} ready", size.width, size.height);
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.session.handle(
                    SessionEvent::Resized {
                        width: size.width,
                        height: size.height,
                    },
                    self.now(),
                );
                if let (Some(gpu), Some(renderer)) = (&mut self.gpu, &mut self.renderer) {
                    renderer.resize(gpu, size.width, size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::CursorLeft { .. } => self.pointer.on_cursor_left(),
            WindowEvent::MouseInput { state, button, .. } => {
                self.pointer.on_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = scroll_lines(delta);
                self.session.handle(SessionEvent::Zoom { lines }, self.now());
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if is_reset_key(&event) {
                    self.session.handle(SessionEvent::Reset, self.now());
                } else if is_reload_key(&event) {
                    self.reload_config();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Open the window and run until it is closed.
pub fn run(source: ConfigSource, session: Session) -> Result<(), winit::error::EventLoopError> {
    let event_loop = EventLoop::new()?;
    let mut app = OrreryApp::new(source, session);
    event_loop.run_app(&mut app)
}

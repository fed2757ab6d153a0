//! The top-level session: owns the scene and drives one frame at a time.
//!
//! Input arrives as discrete [`SessionEvent`]s between frames; [`Session::frame`]
//! is the only periodic driver. Everything runs on one thread, so a focus or
//! reset request simply overwrites whatever move is in flight.

use glam::{Vec2, Vec3};
use orrery_config::Config;
use tracing::{debug, info, warn};

use crate::body::{Body, BodyId, BodyRegistry};
use crate::camera::PerspectiveCamera;
use crate::clock::FrameClock;
use crate::error::SimError;
use crate::kinematics::OrbitalKinematics;
use crate::orbit_controls::OrbitControls;
use crate::selection::pick;
use crate::starfield::StarfieldGenerator;
use crate::transition::{CameraPose, CameraTransitionController};

/// Everything that gets drawn, plus the interactive camera rig.
#[derive(Clone, Debug)]
pub struct Scene {
    /// All bodies. Only the kinematics engine writes positions.
    pub bodies: BodyRegistry,
    /// The viewing camera.
    pub camera: PerspectiveCamera,
    /// Free-orbit controls; their target is the camera's look-target.
    pub controls: OrbitControls,
    /// Static background star positions.
    pub stars: Vec<Vec3>,
}

impl Scene {
    /// Current camera position and look-target.
    pub fn camera_pose(&self) -> CameraPose {
        CameraPose::new(self.camera.position, self.controls.target)
    }

    fn apply_pose(&mut self, pose: CameraPose) {
        self.camera.position = pose.position;
        self.controls.target = pose.target;
    }
}

/// Discrete input delivered between frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionEvent {
    /// Pointer moved to `ndc` (normalized device coordinates).
    PointerMoved { ndc: Vec2 },
    /// Return the camera to its default pose.
    Reset,
    /// Viewport resized, in physical pixels.
    Resized { width: u32, height: u32 },
    /// Pointer drag while orbiting, in pixels.
    Orbit { delta: Vec2, viewport_height: f32 },
    /// Wheel input in lines. Positive zooms in.
    Zoom { lines: f32 },
}

/// What happened during one [`Session::frame`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Session time of the frame in seconds.
    pub time: f64,
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Focused body after the frame.
    pub focus: Option<BodyId>,
    /// Whether a camera move is still in flight after the frame.
    pub transitioning: bool,
}

/// An interactive orrery session.
#[derive(Clone, Debug)]
pub struct Session {
    scene: Scene,
    kinematics: OrbitalKinematics,
    transitions: CameraTransitionController,
    focus: Option<BodyId>,
    clock: FrameClock,
}

impl Session {
    /// Validate the configuration and build the initial scene.
    ///
    /// Body positions are evaluated at time zero so the first pick, before
    /// any frame has run, already sees the bodies where they will be drawn.
    pub fn from_config(config: &Config) -> Result<Self, SimError> {
        let mut bodies = BodyRegistry::from_config(&config.bodies)?;
        let aspect_ratio = config.window.width as f32 / config.window.height.max(1) as f32;
        let camera = PerspectiveCamera::from_config(&config.camera, aspect_ratio);
        let controls = OrbitControls::from_config(&config.camera);
        let home = CameraPose::new(
            Vec3::from_array(config.camera.home_position),
            Vec3::from_array(config.camera.home_target),
        );
        let transitions = CameraTransitionController::from_config(&config.transition, home)?;
        let kinematics = OrbitalKinematics::from_config(&config.system);
        kinematics.update(&mut bodies, 0.0, 0.0);

        let stars = StarfieldGenerator::from_config(&config.starfield).generate();

        info!(
            bodies = bodies.len(),
            stars = stars.len(),
            "Session created, central body {}",
            bodies.central().name()
        );

        Ok(Self {
            scene: Scene {
                bodies,
                camera,
                controls,
                stars,
            },
            kinematics,
            transitions,
            focus: None,
            clock: FrameClock::new(),
        })
    }

    /// Route one input event.
    pub fn handle(&mut self, event: SessionEvent, now: f64) {
        match event {
            SessionEvent::PointerMoved { ndc } => {
                self.pointer_moved(ndc, now);
            }
            SessionEvent::Reset => self.reset(now),
            SessionEvent::Resized { width, height } => self.resize(width, height),
            SessionEvent::Orbit {
                delta,
                viewport_height,
            } => {
                if !self.transitions.is_transitioning() {
                    self.scene.controls.rotate(delta, viewport_height);
                }
            }
            SessionEvent::Zoom { lines } => {
                if !self.transitions.is_transitioning() {
                    self.scene.controls.dolly(lines);
                }
            }
        }
    }

    /// Hit-test the pointer and focus a newly hovered body.
    ///
    /// Returns the body under the pointer, if any. Hovering the body that is
    /// already focused, or empty space, changes nothing.
    pub fn pointer_moved(&mut self, ndc: Vec2, now: f64) -> Option<BodyId> {
        let hit = pick(&self.scene.bodies, &self.scene.camera, ndc)?;
        if self.focus != Some(hit) {
            self.focus_on(hit, now);
        }
        Some(hit)
    }

    /// Focus `id` and start moving the camera toward it.
    ///
    /// Unknown ids and the central body are ignored; returns whether a move
    /// was armed.
    pub fn focus_on(&mut self, id: BodyId, now: f64) -> bool {
        let Some(body) = self.scene.bodies.get(id) else {
            warn!(index = id.index(), "Ignoring focus request for unknown body");
            return false;
        };
        if body.is_central() {
            warn!("Ignoring focus request for central body {}", body.name());
            return false;
        }
        let (position, radius) = (body.position(), body.radius());
        info!("Focusing {}", body.name());

        let current = self.scene.camera_pose();
        self.transitions.request_focus(current, position, radius, now);
        self.focus = Some(id);
        true
    }

    /// Clear the focus and move the camera back to its default pose.
    ///
    /// Safe to call at any time, including while already at home.
    pub fn reset(&mut self, now: f64) {
        debug!(previous = ?self.focus, "Camera reset requested");
        self.focus = None;
        let current = self.scene.camera_pose();
        self.transitions.request_reset(current, now);
    }

    /// Update the projection for a new viewport size.
    ///
    /// A zero-area viewport (a minimized window) keeps the previous projection.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            debug!(width, height, "Ignoring zero-area resize");
            return;
        }
        self.scene.camera.set_aspect_ratio(width as f32, height as f32);
        debug!(width, height, "Viewport resized");
    }

    /// Run one frame at `now` seconds since session start.
    pub fn frame(&mut self, now: f64) -> FrameReport {
        let timing = self.clock.advance(now);
        self.kinematics
            .update(&mut self.scene.bodies, timing.time, timing.delta);

        if let Some(outcome) = self.transitions.tick(timing.time) {
            self.scene.apply_pose(outcome.pose);
            self.scene.controls.cancel_motion();
        }
        self.scene.controls.update(&mut self.scene.camera);

        FrameReport {
            time: timing.time,
            delta: timing.delta,
            focus: self.focus,
            transitioning: self.transitions.is_transitioning(),
        }
    }

    /// The scene, for rendering and inspection.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Currently focused body, if any.
    pub fn focus(&self) -> Option<BodyId> {
        self.focus
    }

    /// The focused body itself.
    pub fn focused_body(&self) -> Option<&Body> {
        self.focus.and_then(|id| self.scene.bodies.get(id))
    }

    /// The camera transition controller.
    pub fn transitions(&self) -> &CameraTransitionController {
        &self.transitions
    }

    /// Number of frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }
}

//! Scripted camera moves between the free-orbit pose and a focused pose.
//!
//! The controller is either [`TransitionState::Idle`], leaving the camera to
//! the orbit controls, or [`TransitionState::Transitioning`], linearly
//! interpolating position and look-target over a fixed duration. Any new
//! request re-arms from the camera's *current* pose, so pre-empting an
//! in-flight move never jumps.

use glam::Vec3;
use orrery_config::TransitionConfig;
use tracing::debug;

use crate::error::SimError;

/// Camera position plus the point it looks at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    /// Camera position.
    pub position: Vec3,
    /// Look-target.
    pub target: Vec3,
}

impl CameraPose {
    /// Create a pose from position and look-target.
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Component-wise linear interpolation. `t == 1.0` returns `other` exactly.
    pub fn lerp(&self, other: &CameraPose, t: f32) -> CameraPose {
        if t >= 1.0 {
            return *other;
        }
        CameraPose {
            position: self.position.lerp(other.position, t),
            target: self.target.lerp(other.target, t),
        }
    }
}

/// One armed camera move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTransition {
    /// Pose captured when the move was armed.
    pub from: CameraPose,
    /// Destination pose.
    pub to: CameraPose,
    /// Session time at which the move was armed, in seconds.
    pub start_time: f64,
    /// Length of the move in seconds.
    pub duration: f64,
}

impl CameraTransition {
    /// Elapsed fraction in `[0, 1]`.
    ///
    /// A zero-length move, or one whose endpoints coincide, is complete at once.
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 || self.from == self.to {
            return 1.0;
        }
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0) as f32
    }

    /// Interpolated pose at `now`.
    pub fn pose_at(&self, now: f64) -> CameraPose {
        self.from.lerp(&self.to, self.progress(now))
    }
}

/// Whether a scripted move currently owns the camera.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum TransitionState {
    /// The orbit controls own the camera.
    #[default]
    Idle,
    /// A scripted move is in flight.
    Transitioning(CameraTransition),
}

/// Result of one [`CameraTransitionController::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickOutcome {
    /// Pose to apply to the camera and orbit-control target this frame.
    pub pose: CameraPose,
    /// True on the tick that retired the move.
    pub finished: bool,
}

/// Two-state controller driving focus and reset moves.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraTransitionController {
    state: TransitionState,
    duration: f64,
    focus_distance_radii: f32,
    home: CameraPose,
}

impl CameraTransitionController {
    /// Create an idle controller.
    ///
    /// `duration` must be finite and non-negative.
    pub fn new(duration: f64, focus_distance_radii: f32, home: CameraPose) -> Result<Self, SimError> {
        if !(duration.is_finite() && duration >= 0.0) {
            return Err(SimError::InvalidDuration(duration));
        }
        Ok(Self {
            state: TransitionState::Idle,
            duration,
            focus_distance_radii,
            home,
        })
    }

    /// Create an idle controller from configuration.
    pub fn from_config(config: &TransitionConfig, home: CameraPose) -> Result<Self, SimError> {
        Self::new(config.duration_secs, config.focus_distance_radii, home)
    }

    /// Current state.
    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    /// Whether a move is in flight.
    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, TransitionState::Transitioning(_))
    }

    /// The default pose targeted by resets.
    pub fn home(&self) -> CameraPose {
        self.home
    }

    /// Duration of every move in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Destination for focusing a body of `body_radius` at `body_position`
    /// from a camera at `current.position`.
    ///
    /// The camera backs off along the body-to-camera direction; if the camera
    /// sits exactly on the body it backs off along +Z.
    pub fn focus_pose(&self, current: &CameraPose, body_position: Vec3, body_radius: f32) -> CameraPose {
        let direction = (current.position - body_position)
            .try_normalize()
            .unwrap_or(Vec3::Z);
        CameraPose {
            position: body_position + direction * (body_radius * self.focus_distance_radii),
            target: body_position,
        }
    }

    /// Arm a move toward a body, replacing any move in flight.
    pub fn request_focus(&mut self, current: CameraPose, body_position: Vec3, body_radius: f32, now: f64) {
        let to = self.focus_pose(&current, body_position, body_radius);
        debug!(?to, "Arming focus transition");
        self.arm(current, to, now);
    }

    /// Arm a move back to the default pose, replacing any move in flight.
    pub fn request_reset(&mut self, current: CameraPose, now: f64) {
        debug!("Arming reset transition");
        self.arm(current, self.home, now);
    }

    fn arm(&mut self, from: CameraPose, to: CameraPose, now: f64) {
        self.state = TransitionState::Transitioning(CameraTransition {
            from,
            to,
            start_time: now,
            duration: self.duration,
        });
    }

    /// Advance an in-flight move to `now`.
    ///
    /// Returns `None` while idle. The tick on which progress reaches 1 returns
    /// the exact destination and switches back to idle.
    pub fn tick(&mut self, now: f64) -> Option<TickOutcome> {
        let TransitionState::Transitioning(transition) = self.state else {
            return None;
        };
        let t = transition.progress(now);
        let pose = transition.from.lerp(&transition.to, t);
        let finished = t >= 1.0;
        if finished {
            self.state = TransitionState::Idle;
            debug!("Camera transition complete");
        }
        Some(TickOutcome { pose, finished })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> CameraPose {
        CameraPose::new(Vec3::new(0.0, 60.0, 120.0), Vec3::ZERO)
    }

    fn controller() -> CameraTransitionController {
        CameraTransitionController::new(1.2, 3.0, home()).unwrap()
    }

    #[test]
    fn test_new_controller_is_idle() {
        let mut c = controller();
        assert_eq!(*c.state(), TransitionState::Idle);
        assert!(c.tick(5.0).is_none());
    }

    #[test]
    fn test_invalid_duration_rejected() {
        assert_eq!(
            CameraTransitionController::new(-1.0, 3.0, home()).unwrap_err(),
            SimError::InvalidDuration(-1.0)
        );
        assert!(CameraTransitionController::new(f64::INFINITY, 3.0, home()).is_err());
    }

    #[test]
    fn test_focus_pose_backs_off_three_radii() {
        let c = controller();
        let current = CameraPose::new(Vec3::new(50.0, 0.0, 100.0), Vec3::ZERO);
        let pose = c.focus_pose(&current, Vec3::new(50.0, 0.0, 0.0), 5.0);
        assert!((pose.position - Vec3::new(50.0, 0.0, 15.0)).length() < 1e-5);
        assert_eq!(pose.target, Vec3::new(50.0, 0.0, 0.0));
    }

    #[test]
    fn test_focus_pose_with_camera_on_body() {
        let c = controller();
        let current = CameraPose::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
        let pose = c.focus_pose(&current, Vec3::new(1.0, 2.0, 3.0), 2.0);
        assert!((pose.position - Vec3::new(1.0, 2.0, 9.0)).length() < 1e-5);
    }

    #[test]
    fn test_midpoint_is_linear() {
        let mut c = controller();
        let start = CameraPose::new(Vec3::new(0.0, 0.0, 100.0), Vec3::ZERO);
        c.request_reset(start, 10.0);
        let outcome = c.tick(10.6).unwrap();
        assert!(!outcome.finished);
        let expected = start.position.lerp(home().position, 0.5);
        assert!((outcome.pose.position - expected).length() < 1e-4);
        assert!(c.is_transitioning());
    }

    #[test]
    fn test_completion_snaps_and_goes_idle() {
        let mut c = controller();
        let start = CameraPose::new(Vec3::new(-40.0, 5.0, 7.0), Vec3::new(1.0, 1.0, 1.0));
        c.request_reset(start, 2.0);
        let outcome = c.tick(3.2).unwrap();
        assert!(outcome.finished);
        assert_eq!(outcome.pose, home());
        assert_eq!(*c.state(), TransitionState::Idle);
        assert!(c.tick(3.3).is_none());
    }

    #[test]
    fn test_late_tick_clamps_to_destination() {
        let mut c = controller();
        c.request_reset(CameraPose::new(Vec3::X, Vec3::ZERO), 0.0);
        let outcome = c.tick(100.0).unwrap();
        assert!(outcome.finished);
        assert_eq!(outcome.pose, home());
    }

    #[test]
    fn test_progress_is_monotonic() {
        let transition = CameraTransition {
            from: CameraPose::new(Vec3::ZERO, Vec3::ZERO),
            to: home(),
            start_time: 1.0,
            duration: 1.2,
        };
        let mut last = 0.0;
        for i in 0..40 {
            let t = transition.progress(1.0 + i as f64 * 0.05);
            assert!(t >= last);
            assert!((0.0..=1.0).contains(&t));
            last = t;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut c = CameraTransitionController::new(0.0, 3.0, home()).unwrap();
        c.request_reset(CameraPose::new(Vec3::ONE, Vec3::ZERO), 4.0);
        let outcome = c.tick(4.0).unwrap();
        assert!(outcome.finished);
        assert_eq!(outcome.pose, home());
    }

    #[test]
    fn test_reset_at_home_is_a_no_op() {
        let mut c = controller();
        c.request_reset(home(), 7.0);
        let outcome = c.tick(7.0).unwrap();
        assert!(outcome.finished);
        assert_eq!(outcome.pose, home());
        assert!(!c.is_transitioning());
    }

    #[test]
    fn test_double_reset_rearms_identically() {
        let mut c = controller();
        let current = CameraPose::new(Vec3::new(9.0, 9.0, 9.0), Vec3::ONE);
        c.request_reset(current, 1.0);
        let first = *c.state();
        c.request_reset(current, 1.0);
        assert_eq!(*c.state(), first);
    }

    #[test]
    fn test_preemption_starts_from_current_pose() {
        let mut c = controller();
        let origin = CameraPose::new(Vec3::new(0.0, 0.0, 200.0), Vec3::ZERO);
        c.request_reset(origin, 0.0);
        let mid = c.tick(0.6).unwrap().pose;

        c.request_focus(mid, Vec3::new(80.0, 0.0, 0.0), 11.0, 0.6);
        let TransitionState::Transitioning(second) = *c.state() else {
            panic!("expected a transition in flight");
        };
        assert_eq!(second.from, mid);
        assert_eq!(second.start_time, 0.6);

        let first_tick = c.tick(0.6).unwrap();
        assert_eq!(first_tick.pose, mid);
    }
}

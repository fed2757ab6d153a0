//! Orrery simulation core.
//!
//! Bodies follow closed-form circular orbits driven by session time. The
//! pointer picks an orbiting body; a two-state transition controller flies
//! the camera to it, or back to the home pose on reset. Between moves the
//! orbit controls own the camera.
//!
//! Nothing here touches the GPU; [`Session`] can be driven headless.

pub mod body;
pub mod camera;
pub mod clock;
pub mod error;
pub mod kinematics;
pub mod orbit_controls;
pub mod selection;
pub mod session;
pub mod starfield;
pub mod transition;

pub use body::{Body, BodyId, BodyRegistry, Orbit, RenderHandle};
pub use camera::PerspectiveCamera;
pub use clock::{FrameClock, FrameTime};
pub use error::SimError;
pub use kinematics::{OrbitalKinematics, orbit_position};
pub use orbit_controls::OrbitControls;
pub use selection::{Ray, cursor_to_ndc, pick, pick_with_ray};
pub use session::{FrameReport, Scene, Session, SessionEvent};
pub use starfield::StarfieldGenerator;
pub use transition::{
    CameraPose, CameraTransition, CameraTransitionController, TickOutcome, TransitionState,
};

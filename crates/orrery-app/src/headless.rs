//! Headless mode: drive a session at a fixed rate without a window.

use glam::Vec3;
use orrery_sim::Session;
use tracing::info;

/// Fixed headless frame step: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Failures setting up a headless run.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum HeadlessError {
    #[error("no body named {0:?}")]
    UnknownBody(String),

    #[error("body {0:?} cannot be focused")]
    NotFocusable(String),
}

/// State at the end of a headless run.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSummary {
    pub frames: u32,
    pub time: f64,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub focus: Option<String>,
    pub transitioning: bool,
}

/// Run `frames` frames at [`FIXED_DT`], focusing `focus` after the first one.
pub fn run_headless(
    session: &mut Session,
    frames: u32,
    focus: Option<&str>,
) -> Result<HeadlessSummary, HeadlessError> {
    let target = focus
        .map(|name| {
            session
                .scene()
                .bodies
                .find(name)
                .ok_or_else(|| HeadlessError::UnknownBody(name.to_string()))
        })
        .transpose()?;

    let mut report = session.frame(0.0);
    if let Some(id) = target
        && !session.focus_on(id, report.time)
    {
        return Err(HeadlessError::NotFocusable(
            focus.unwrap_or_default().to_string(),
        ));
    }

    for i in 1..frames {
        report = session.frame(f64::from(i) * FIXED_DT);
    }

    let scene = session.scene();
    for (_, body) in scene.bodies.iter() {
        let p = body.position();
        info!(
            "{:>8}: ({:8.2}, {:8.2}, {:8.2}) spin {:.3}",
            body.name(),
            p.x,
            p.y,
            p.z,
            body.spin()
        );
    }
    info!(
        "Camera at {} looking at {} after {:.2}s",
        scene.camera.position, scene.controls.target, report.time
    );

    Ok(HeadlessSummary {
        frames,
        time: report.time,
        camera_position: scene.camera.position,
        camera_target: scene.controls.target,
        focus: session.focused_body().map(|b| b.name().to_string()),
        transitioning: report.transitioning,
    })
}

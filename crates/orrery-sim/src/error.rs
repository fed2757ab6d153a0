//! Startup validation errors.
//!
//! Per-frame operations never fail; only building a session from
//! configuration can.

/// Errors raised while building the body registry or session from config.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SimError {
    /// No body has an orbit radius of zero.
    #[error("no central body: exactly one body must have orbit_radius 0")]
    NoCentralBody,

    /// More than one body has an orbit radius of zero.
    #[error("bodies `{first}` and `{second}` both have orbit_radius 0")]
    MultipleCentralBodies { first: String, second: String },

    /// Two bodies share a name.
    #[error("duplicate body name `{0}`")]
    DuplicateName(String),

    /// A body's render radius is zero, negative, or not finite.
    #[error("body `{name}` has invalid radius {radius}")]
    InvalidRadius { name: String, radius: f32 },

    /// A body's orbit radius is negative or not finite.
    #[error("body `{name}` has invalid orbit radius {orbit_radius}")]
    InvalidOrbitRadius { name: String, orbit_radius: f32 },

    /// A body's speed, inclination, or phase is not finite.
    #[error("body `{name}` has a non-finite {field}")]
    NonFiniteParameter { name: String, field: &'static str },

    /// The transition duration is negative or not finite.
    #[error("invalid transition duration {0}s")]
    InvalidDuration(f64),
}

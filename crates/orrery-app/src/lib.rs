//! Windowed and headless front ends for the orrery session.

pub mod headless;
pub mod input;
pub mod platform;
pub mod reload;
pub mod window;

//! wgpu rendering for the orrery: surface management, an unlit line/point
//! pipeline, and wireframe geometry for the bodies and starfield.

pub mod gpu;
pub mod pipeline;
pub mod renderer;
pub mod vertex;
pub mod wireframe;

pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use pipeline::{CameraUniform, LINE_SHADER_SOURCE, LinePipeline, camera_bind_group_layout};
pub use renderer::{CLEAR_COLOR, OrreryRenderer};
pub use vertex::VertexPositionColor;
pub use wireframe::{
    HEIGHT_SEGMENTS, STAR_COLOR, WIDTH_SEGMENTS, body_vertices, star_vertices,
    unit_sphere_lines,
};

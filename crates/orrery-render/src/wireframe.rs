//! CPU-side wireframe geometry for bodies and stars.

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Quat, Vec3};
use orrery_sim::{Body, BodyRegistry};

use crate::vertex::VertexPositionColor;

/// Segments around each latitude ring.
pub const WIDTH_SEGMENTS: u32 = 32;
/// Segments from pole to pole.
pub const HEIGHT_SEGMENTS: u32 = 32;
/// Stars are drawn plain white.
pub const STAR_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

fn sphere_point(ix: u32, iy: u32) -> Vec3 {
    let u = ix as f32 / WIDTH_SEGMENTS as f32 * TAU;
    let v = iy as f32 / HEIGHT_SEGMENTS as f32 * PI;
    Vec3::new(-u.cos() * v.sin(), v.cos(), u.sin() * v.sin())
}

/// Line-list vertices of a unit UV sphere: latitude rings plus meridians.
///
/// Rings at the poles collapse to a point and are skipped.
pub fn unit_sphere_lines() -> Vec<Vec3> {
    let rings = (HEIGHT_SEGMENTS - 1) * WIDTH_SEGMENTS;
    let meridians = WIDTH_SEGMENTS * HEIGHT_SEGMENTS;
    let mut lines = Vec::with_capacity(2 * (rings + meridians) as usize);

    for iy in 1..HEIGHT_SEGMENTS {
        for ix in 0..WIDTH_SEGMENTS {
            lines.push(sphere_point(ix, iy));
            lines.push(sphere_point(ix + 1, iy));
        }
    }
    for ix in 0..WIDTH_SEGMENTS {
        for iy in 0..HEIGHT_SEGMENTS {
            lines.push(sphere_point(ix, iy));
            lines.push(sphere_point(ix, iy + 1));
        }
    }
    lines
}

fn body_transform(body: &Body) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(body.radius()),
        Quat::from_rotation_y(body.spin()),
        body.position(),
    )
}

/// World-space wireframe vertices for every body, written into `out`.
///
/// Each body owns the `sphere.len()` vertices starting at its render handle
/// times `sphere.len()`.
pub fn body_vertices(registry: &BodyRegistry, sphere: &[Vec3], out: &mut Vec<VertexPositionColor>) {
    out.clear();
    out.resize(registry.len() * sphere.len(), bytemuck::Zeroable::zeroed());
    for (_, body) in registry.iter() {
        let transform = body_transform(body);
        let [r, g, b] = body.color();
        let color = [r, g, b, 1.0];
        let start = body.handle().raw() as usize * sphere.len();
        let Some(slot) = out.get_mut(start..start + sphere.len()) else {
            continue;
        };
        for (vertex, p) in slot.iter_mut().zip(sphere) {
            *vertex = VertexPositionColor {
                position: transform.transform_point3(*p).to_array(),
                color,
            };
        }
    }
}

/// Point vertices for the starfield.
pub fn star_vertices(stars: &[Vec3]) -> Vec<VertexPositionColor> {
    stars
        .iter()
        .map(|s| VertexPositionColor {
            position: s.to_array(),
            color: STAR_COLOR,
        })
        .collect()
}

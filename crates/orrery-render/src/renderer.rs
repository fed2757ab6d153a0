//! Per-frame drawing of the orrery scene.

use glam::Vec3;
use orrery_sim::Scene;

use crate::gpu::{RenderContext, SurfaceError};
use crate::pipeline::{CameraUniform, LINE_SHADER_SOURCE, LinePipeline, camera_bind_group_layout};
use crate::vertex::{VertexPositionColor, create_vertex_buffer};
use crate::wireframe::{body_vertices, star_vertices, unit_sphere_lines};

/// Space is black.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

/// Draws the starfield and body wireframes for a [`Scene`].
pub struct OrreryRenderer {
    lines: LinePipeline,
    points: LinePipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    unit_sphere: Vec<Vec3>,
    body_buffer: wgpu::Buffer,
    body_vertex_count: u32,
    star_buffer: wgpu::Buffer,
    star_count: u32,
    scratch: Vec<VertexPositionColor>,
}

impl OrreryRenderer {
    /// Create pipelines and upload the static starfield.
    pub fn new(ctx: &RenderContext, scene: &Scene) -> Self {
        let device = &ctx.device;
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("orrery-line-shader"),
            source: wgpu::ShaderSource::Wgsl(LINE_SHADER_SOURCE.into()),
        });
        let camera_layout = camera_bind_group_layout(device);
        let lines = LinePipeline::new(
            device,
            &shader,
            &camera_layout,
            ctx.surface_format,
            wgpu::PrimitiveTopology::LineList,
        );
        let points = LinePipeline::new(
            device,
            &shader,
            &camera_layout,
            ctx.surface_format,
            wgpu::PrimitiveTopology::PointList,
        );

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("camera-uniform"),
            size: CameraUniform::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera-bind-group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let unit_sphere = unit_sphere_lines();
        let mut scratch = Vec::new();
        body_vertices(&scene.bodies, &unit_sphere, &mut scratch);
        let body_buffer = create_vertex_buffer(device, "body-wireframes", &scratch);

        let stars = star_vertices(&scene.stars);
        let star_buffer = create_vertex_buffer(device, "starfield", &stars);

        log::info!(
            "Renderer ready: {} body vertices, {} stars",
            scratch.len(),
            stars.len()
        );

        Self {
            lines,
            points,
            camera_buffer,
            camera_bind_group,
            unit_sphere,
            body_vertex_count: scratch.len() as u32,
            body_buffer,
            star_count: stars.len() as u32,
            star_buffer,
            scratch,
        }
    }

    /// Surface resize. The camera aspect ratio is owned by the session.
    pub fn resize(&mut self, ctx: &mut RenderContext, width: u32, height: u32) {
        ctx.resize(width, height);
    }

    /// Draw one frame and present it.
    pub fn render(&mut self, ctx: &RenderContext, scene: &Scene) -> Result<(), SurfaceError> {
        let frame = ctx.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let uniform = CameraUniform::from_matrix(scene.camera.view_projection_matrix());
        ctx.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&uniform));

        body_vertices(&scene.bodies, &self.unit_sphere, &mut self.scratch);
        ctx.queue
            .write_buffer(&self.body_buffer, 0, bytemuck::cast_slice(&self.scratch));

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("orrery-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            self.points.draw(
                &mut pass,
                &self.camera_bind_group,
                &self.star_buffer,
                self.star_count,
            );
            self.lines.draw(
                &mut pass,
                &self.camera_bind_group,
                &self.body_buffer,
                self.body_vertex_count,
            );
        }

        ctx.queue.submit([encoder.finish()]);
        frame.present();
        Ok(())
    }
}

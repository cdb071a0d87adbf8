//! GPU-side layout of the flower uniforms and, with the `gpu` feature, the
//! wgpu pipeline both hosts draw with.

use crate::camera::OrbitCamera;
use crate::field::PointField;
use crate::params::FlowerUniforms;

/// Matches `struct Uniforms` in `shaders/flower.wgsl` (160 bytes, no padding).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuUniforms {
    pub model_view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub resolution: [f32; 2],
    pub flower: FlowerUniforms,
}

impl GpuUniforms {
    /// Pack the field's current state for a `width` x `height` px framebuffer.
    pub fn new(field: &PointField, camera: &OrbitCamera, width: u32, height: u32) -> Self {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        let model_view = camera.view_matrix() * field.transform().model_matrix();
        Self {
            model_view: model_view.to_cols_array_2d(),
            projection: camera.projection_matrix(w / h).to_cols_array_2d(),
            resolution: [w, h],
            flower: *field.uniforms(),
        }
    }
}

/// Two triangles spanning `[-0.5, 0.5]²`, drawn once per point.
pub const QUAD_CORNERS: [[f32; 2]; 6] = [
    [-0.5, -0.5],
    [0.5, -0.5],
    [0.5, 0.5],
    [-0.5, -0.5],
    [0.5, 0.5],
    [-0.5, 0.5],
];

#[cfg(feature = "gpu")]
pub use pipeline::*;

#[cfg(feature = "gpu")]
mod pipeline {
    use super::{GpuUniforms, QUAD_CORNERS};
    use crate::field::PointField;
    use wgpu::util::DeviceExt;

    // src * alpha + dst: overlapping dots brighten.
    const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Add,
        },
    };

    pub struct PointsPipeline {
        pipeline: wgpu::RenderPipeline,
        uniform_buffer: wgpu::Buffer,
        bind_group: wgpu::BindGroup,
        quad_vb: wgpu::Buffer,
        instance_vb: wgpu::Buffer,
        instance_count: u32,
    }

    impl PointsPipeline {
        /// Build the pipeline and upload the field's points once.
        pub fn new(
            device: &wgpu::Device,
            color_format: wgpu::TextureFormat,
            field: &PointField,
        ) -> Self {
            let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("flower_shader"),
                source: wgpu::ShaderSource::Wgsl(crate::FLOWER_WGSL.into()),
            });
            let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("flower_bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });
            let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("flower_pl"),
                bind_group_layouts: &[&bgl],
                push_constant_ranges: &[],
            });
            let vertex_buffers = [
                // slot 0: quad corners
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 2]>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x2,
                        offset: 0,
                        shader_location: 0,
                    }],
                },
                // slot 1: one ring point per instance
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<[f32; 3]>() as u64,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &[wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 1,
                    }],
                },
            ];
            let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("flower_pipeline"),
                layout: Some(&pl),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &vertex_buffers,
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: color_format,
                        blend: Some(ADDITIVE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            });
            let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("flower_uniforms"),
                size: std::mem::size_of::<GpuUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("flower_bg"),
                layout: &bgl,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });
            let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("quad_vb"),
                contents: bytemuck::cast_slice(&QUAD_CORNERS),
                usage: wgpu::BufferUsages::VERTEX,
            });
            let instance_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("points_vb"),
                contents: bytemuck::cast_slice(field.vertices()),
                usage: wgpu::BufferUsages::VERTEX,
            });
            log::info!("[gpu] pipeline ready, {} point instances", field.count());

            Self {
                pipeline,
                uniform_buffer,
                bind_group,
                quad_vb,
                instance_vb,
                instance_count: field.count() as u32,
            }
        }

        /// Upload this frame's uniforms, then clear `view` and draw every point.
        pub fn encode(
            &self,
            queue: &wgpu::Queue,
            encoder: &mut wgpu::CommandEncoder,
            view: &wgpu::TextureView,
            clear: wgpu::Color,
            uniforms: &GpuUniforms,
        ) {
            queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("flower_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_vb.slice(..));
            rpass.draw(0..QUAD_CORNERS.len() as u32, 0..self.instance_count);
        }
    }
}

//! Immediate-mode canvas.
//!
//! One shader, one vertex buffer, no retained geometry: every draw call
//! tessellates its shape, re-populates the vertex buffer, writes the color
//! uniform, and submits its own command buffer. Draw calls are therefore
//! strictly serialized — a deliberate trade for low-volume UI/diagnostic
//! drawing, not a high-throughput renderer.
//!
//! Convention:
//! - Shape parameters are in pixels (top-left origin, +Y down).
//! - Positions are converted to clip space on the CPU (the `geometry`
//!   module), recomputed from the viewport on every call.

mod geometry;

use bytemuck::{Pod, Zeroable};
use thiserror::Error;

use crate::coords::{Point, Viewport};
use crate::paint::Color;

/// Precondition violations detected at the drawing API boundary.
///
/// Degenerate shape parameters are rejected up front rather than being
/// handed to the GPU as zero-area or self-degenerate geometry.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CanvasError {
    #[error("rectangle size {width}x{height} is degenerate; both dimensions must be positive")]
    DegenerateRect { width: f32, height: f32 },

    #[error("circle radius {radius} must be positive")]
    DegenerateRadius { radius: f32 },

    #[error("circle needs at least 3 segments, got {segments}")]
    TooFewSegments { segments: u32 },
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Vertex {
    pos: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Primitive class of a draw call: picks the pipeline and decides whether
/// the uploaded vertex run is closed back onto its first vertex.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Topology {
    Triangles,
    Lines,
    ClosedLoop,
}

/// Straight-alpha blending (source-over), matching the straight-alpha
/// colors produced by [`crate::paint::Color`].
fn straight_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

const INITIAL_VERTEX_CAPACITY: usize = 256;

/// Immediate-mode drawing surface bound to one window.
///
/// Owns its GPU objects (shader pipelines, vertex buffer, color uniform)
/// exclusively; they are released when the canvas is dropped. Not safe for
/// concurrent use — one thread, one owner.
pub struct Canvas {
    device: wgpu::Device,
    queue: wgpu::Queue,

    viewport: Viewport,

    fill_color: Color,
    stroke_color: Color,
    stroke_width: f32,

    // `None` when shader/pipeline validation failed at construction; every
    // draw is then silently inert.
    fill_pipeline: Option<wgpu::RenderPipeline>,
    stroke_pipeline: Option<wgpu::RenderPipeline>,

    color_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    vbo: wgpu::Buffer,
    vbo_capacity: usize, // vertices

    // Target view for the current begin()/end() bracket.
    frame_view: Option<wgpu::TextureView>,

    // Clip-space vertices of the most recent draw, before loop closing.
    last_vertices: Vec<[f32; 2]>,

    warned_inert: bool,
}

impl Canvas {
    /// Builds the canvas's GPU state against `surface_format`.
    ///
    /// Shader and pipeline creation run inside a validation error scope: a
    /// failure is logged and leaves the canvas without pipelines, so later
    /// draw calls produce no output instead of crashing the process.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let color_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("slate canvas color ubo"),
            size: std::mem::size_of::<[f32; 4]>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("slate canvas bgl"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<[f32; 4]>() as u64
                        ),
                    },
                    count: None,
                }],
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("slate canvas bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: color_ubo.as_entire_binding(),
            }],
        });

        let vbo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("slate canvas vbo"),
            size: (INITIAL_VERTEX_CAPACITY * std::mem::size_of::<Vertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Validation failures inside this scope (bad WGSL, mismatched
        // layouts) must not take the process down; the canvas degrades to
        // drawing nothing.
        let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipelines = build_pipelines(device, surface_format, &bind_group_layout);
        let (fill_pipeline, stroke_pipeline) =
            match pollster::block_on(error_scope.pop()) {
                None => pipelines,
                Some(err) => {
                    log::error!("canvas pipeline validation failed: {err}");
                    (None, None)
                }
            };

        Self {
            device: device.clone(),
            queue: queue.clone(),
            viewport: Viewport::new(width, height),
            fill_color: Color::TRANSPARENT,
            stroke_color: Color::TRANSPARENT,
            stroke_width: 0.0,
            fill_pipeline,
            stroke_pipeline,
            color_ubo,
            bind_group,
            vbo,
            vbo_capacity: INITIAL_VERTEX_CAPACITY,
            frame_view: None,
            last_vertices: Vec::new(),
            warned_inert: false,
        }
    }

    // ── session state ──────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> u32 {
        self.viewport.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.viewport.height()
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    #[inline]
    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    #[inline]
    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    /// Sets the stroke width session state.
    ///
    /// Line and outline drawing currently renders 1-pixel GPU line
    /// primitives regardless of this value; the width is stored so callers
    /// can round-trip it.
    // TODO: consume stroke_width by extruding segments into triangle quads.
    pub fn set_stroke_width(&mut self, width: f32) {
        self.stroke_width = width;
    }

    #[inline]
    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    /// Updates the pixel dimensions used for clip-space mapping.
    ///
    /// A request with a zero dimension is ignored (the previous size is
    /// kept). Reconfiguring the surface itself is the host's job.
    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.viewport.resize(width, height) {
            log::debug!("canvas: ignoring degenerate resize to {width}x{height}");
        }
    }

    /// Clip-space vertices uploaded by the most recent draw call, before
    /// any loop-closing vertex. Intended for inspection and tests.
    pub fn last_vertices(&self) -> &[[f32; 2]] {
        &self.last_vertices
    }

    // ── frame bracketing ───────────────────────────────────────────────────

    /// Starts a frame: all subsequent draws target `view` until [`end`].
    ///
    /// [`end`]: Canvas::end
    pub fn begin(&mut self, view: &wgpu::TextureView) {
        self.frame_view = Some(view.clone());
    }

    /// Ends the frame, releasing the target view.
    pub fn end(&mut self) {
        self.frame_view = None;
    }

    // ── drawing ────────────────────────────────────────────────────────────

    /// Clears the frame's surface to `color`.
    pub fn clear(&mut self, color: Color) {
        if self.fill_pipeline.is_none() {
            // Clearing needs no pipeline; draws this frame will be inert.
            log::warn!("canvas: clear with no valid pipeline");
        }
        let Some(view) = self.frame_view.clone() else {
            log::warn!("canvas: clear outside begin()/end(); skipped");
            return;
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("slate canvas clear"),
            });
        {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("slate canvas clear pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(color.r),
                            g: f64::from(color.g),
                            b: f64::from(color.b),
                            a: f64::from(color.a),
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }
        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Draws a single 1-pixel segment in the stroke color.
    pub fn draw_line(&mut self, start: Point, end: Point) {
        let vertices = geometry::line(self.viewport, start, end);
        self.submit_vertices(&vertices, Topology::Lines, self.stroke_color);
    }

    /// Draws a rectangle: filled with the fill color, or outlined with the
    /// stroke color.
    pub fn draw_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        filled: bool,
    ) -> Result<(), CanvasError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(CanvasError::DegenerateRect { width, height });
        }

        if filled {
            let vertices = geometry::rect_filled(self.viewport, x, y, width, height);
            self.submit_vertices(&vertices, Topology::Triangles, self.fill_color);
        } else {
            let vertices = geometry::rect_outline(self.viewport, x, y, width, height);
            self.submit_vertices(&vertices, Topology::ClosedLoop, self.stroke_color);
        }
        Ok(())
    }

    /// Draws a circle approximated by a regular `segments`-gon.
    ///
    /// Filled circles tessellate as a triangle fan around the center;
    /// outlines are a closed loop of exactly `segments` perimeter vertices.
    pub fn draw_circle(
        &mut self,
        x: f32,
        y: f32,
        radius: f32,
        segments: u32,
        filled: bool,
    ) -> Result<(), CanvasError> {
        if radius <= 0.0 {
            return Err(CanvasError::DegenerateRadius { radius });
        }
        if segments < 3 {
            return Err(CanvasError::TooFewSegments { segments });
        }

        if filled {
            let vertices = geometry::circle_filled(self.viewport, x, y, radius, segments);
            self.submit_vertices(&vertices, Topology::Triangles, self.fill_color);
        } else {
            let vertices = geometry::circle_outline(self.viewport, x, y, radius, segments);
            self.submit_vertices(&vertices, Topology::ClosedLoop, self.stroke_color);
        }
        Ok(())
    }

    /// Draws a polygon from an arbitrary vertex list.
    ///
    /// Filled polygons use a fan from the first vertex and are only correct
    /// for convex input. Fewer than 3 points is a no-op.
    pub fn draw_polygon(&mut self, points: &[Point], filled: bool) {
        if points.len() < 3 {
            return;
        }

        if filled {
            let vertices = geometry::polygon_filled(self.viewport, points);
            self.submit_vertices(&vertices, Topology::Triangles, self.fill_color);
        } else {
            let vertices = geometry::polygon_outline(self.viewport, points);
            self.submit_vertices(&vertices, Topology::ClosedLoop, self.stroke_color);
        }
    }

    // ── upload/draw protocol ───────────────────────────────────────────────

    /// Re-populates the vertex buffer with exactly this call's vertices,
    /// writes the color uniform, and submits one draw.
    ///
    /// Each call submits its own command buffer. That keeps `write_buffer`
    /// ordering correct while reusing a single vertex buffer: wgpu applies
    /// queued writes at submission boundaries, so draws must not share a
    /// submission if they share the buffer.
    fn submit_vertices(&mut self, vertices: &[[f32; 2]], topology: Topology, color: Color) {
        self.last_vertices.clear();
        self.last_vertices.extend_from_slice(vertices);

        let Some(view) = self.frame_view.clone() else {
            log::warn!("canvas: draw call outside begin()/end(); skipped");
            return;
        };

        let upload = upload_run(vertices, topology);
        self.ensure_vertex_capacity(upload.len());

        let pipeline = match topology {
            Topology::Triangles => self.fill_pipeline.as_ref(),
            Topology::Lines | Topology::ClosedLoop => self.stroke_pipeline.as_ref(),
        };
        let Some(pipeline) = pipeline else {
            if !self.warned_inert {
                log::warn!("canvas: draw call with no valid pipeline; output is inert");
                self.warned_inert = true;
            }
            return;
        };

        self.queue
            .write_buffer(&self.vbo, 0, bytemuck::cast_slice(&upload));
        self.queue
            .write_buffer(&self.color_ubo, 0, bytemuck::bytes_of(&color.to_array()));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("slate canvas draw"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("slate canvas draw pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            let bytes = (upload.len() * std::mem::size_of::<Vertex>()) as u64;
            rpass.set_vertex_buffer(0, self.vbo.slice(0..bytes));
            rpass.draw(0..upload.len() as u32, 0..1);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
    }

    fn ensure_vertex_capacity(&mut self, required: usize) {
        if required <= self.vbo_capacity {
            return;
        }

        let new_cap = required.next_power_of_two().max(INITIAL_VERTEX_CAPACITY);
        self.vbo = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("slate canvas vbo"),
            size: (new_cap * std::mem::size_of::<Vertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        self.vbo_capacity = new_cap;
    }
}

/// Vertex run as uploaded to the GPU. Line strips have no loop primitive,
/// so closed loops re-upload their first vertex at the tail.
fn upload_run(vertices: &[[f32; 2]], topology: Topology) -> Vec<Vertex> {
    let mut upload: Vec<Vertex> = vertices.iter().map(|&pos| Vertex { pos }).collect();
    if topology == Topology::ClosedLoop {
        if let Some(&first) = upload.first() {
            upload.push(first);
        }
    }
    upload
}

/// Builds the fill (triangle-list) and stroke (line-strip) pipelines from
/// the one canvas shader. wgpu bakes primitive topology into the pipeline,
/// so the single-program/per-call-mode model becomes two pipelines sharing
/// one module.
fn build_pipelines(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
    bind_group_layout: &wgpu::BindGroupLayout,
) -> (Option<wgpu::RenderPipeline>, Option<wgpu::RenderPipeline>) {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("slate canvas shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shaders/canvas.wgsl").into()),
    });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("slate canvas pipeline layout"),
        bind_group_layouts: &[bind_group_layout],
        immediate_size: 0,
    });

    let build = |label: &str, topology: wgpu::PrimitiveTopology| {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(straight_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    };

    (
        Some(build(
            "slate canvas fill pipeline",
            wgpu::PrimitiveTopology::TriangleList,
        )),
        Some(build(
            "slate canvas stroke pipeline",
            wgpu::PrimitiveTopology::LineStrip,
        )),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_loops_upload_their_first_vertex_again() {
        let corners = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let upload = upload_run(&corners, Topology::ClosedLoop);
        assert_eq!(upload.len(), 5);
        assert_eq!(upload[4].pos, upload[0].pos);
    }

    #[test]
    fn triangles_and_lines_upload_verbatim() {
        let verts = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];
        assert_eq!(upload_run(&verts, Topology::Triangles).len(), 3);
        assert_eq!(upload_run(&verts[..2], Topology::Lines).len(), 2);
    }

    #[test]
    fn canvas_error_messages_name_the_offending_value() {
        let err = CanvasError::DegenerateRect {
            width: -1.0,
            height: 5.0,
        };
        assert!(err.to_string().contains("-1"));

        let err = CanvasError::TooFewSegments { segments: 2 };
        assert!(err.to_string().contains("at least 3"));
    }
}

use crate::shaders::TriangleShaders;
use bytemuck::{Pod, Zeroable};
use nyanchu_common::WindowSize;
use nyanchu_render::{MeshRequests, RenderError, RenderTarget, Renderer, ShaderLoader};
use wgpu::util::DeviceExt;

/// View clear color, packed as `0xRRGGBBAA`.
pub const CLEAR_COLOR: u32 = 0x3030_30ff;

/// Vertex with a position and a packed ABGR color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PosColorVertex {
    pub position: [f32; 3],
    pub abgr: u32,
}

/// The hardcoded triangle drawn every frame.
#[rustfmt::skip]
pub const TRIANGLE_VERTICES: [PosColorVertex; 3] = [
    PosColorVertex { position: [-0.5, -0.5, 0.0], abgr: 0xff00_00ff }, // bottom-left, red
    PosColorVertex { position: [ 0.5, -0.5, 0.0], abgr: 0xff00_ff00 }, // bottom-right, green
    PosColorVertex { position: [ 0.0,  0.5, 0.0], abgr: 0xffff_0000 }, // top, blue
];

/// Convert a `0xRRGGBBAA` color to a wgpu clear color.
pub fn rgba_to_color(rgba: u32) -> wgpu::Color {
    let [r, g, b, a] = rgba.to_be_bytes();
    wgpu::Color {
        r: r as f64 / 255.0,
        g: g as f64 / 255.0,
        b: b as f64 / 255.0,
        a: a as f64 / 255.0,
    }
}

/// GPU resources owned between `initialize` and `shutdown`.
struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
}

/// wgpu-based renderer: one triangle per frame.
#[derive(Default)]
pub struct WgpuRenderer {
    gpu: Option<GpuState>,
    requests: MeshRequests,
    frames: u64,
}

impl WgpuRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames successfully presented since `initialize`.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Current surface size, if initialized.
    pub fn surface_size(&self) -> Option<WindowSize> {
        self.gpu
            .as_ref()
            .map(|g| WindowSize::new(g.config.width, g.config.height))
    }

    fn create_state(target: RenderTarget) -> Result<GpuState, RenderError> {
        let window = target.window.ok_or(RenderError::NoWindow)?;
        let shaders = TriangleShaders::load(&ShaderLoader::new(target.shader_roots))?;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| RenderError::Surface(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(RenderError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("nyanchu_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| RenderError::Device(e.to_string()))?;

        // Validation errors outside an error scope are logged instead of panicking.
        device.on_uncaptured_error(Box::new(|e: wgpu::Error| {
            tracing::error!("wgpu error: {e}");
        }));

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::NoSurfaceFormat)?;

        let size = target.size.clamped();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = Self::create_pipeline(&device, surface_format, &shaders);
        if let Some(e) = pollster::block_on(device.pop_error_scope()) {
            return Err(RenderError::Pipeline(e.to_string()));
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("triangle_vertex_buffer"),
            contents: bytemuck::cast_slice(&TRIANGLE_VERTICES[..]),
            usage: wgpu::BufferUsages::VERTEX,
        });

        tracing::info!(
            "GPU initialized with {} backend ({})",
            adapter.get_info().backend.to_str(),
            adapter.get_info().name
        );

        Ok(GpuState {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
        })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        shaders: &TriangleShaders,
    ) -> wgpu::RenderPipeline {
        let vs_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("vs_triangle"),
            source: wgpu::ShaderSource::Wgsl(shaders.vertex.source.as_str().into()),
        });
        let fs_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("fs_triangle"),
            source: wgpu::ShaderSource::Wgsl(shaders.fragment.source.as_str().into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("triangle_pipeline_layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("triangle_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vs_module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<PosColorVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Unorm8x4,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fs_module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        })
    }
}

impl Renderer for WgpuRenderer {
    fn backend_name(&self) -> &'static str {
        "wgpu"
    }

    fn initialize(&mut self, target: RenderTarget) -> Result<(), RenderError> {
        if self.gpu.is_some() {
            return Err(RenderError::AlreadyInitialized);
        }
        let state = Self::create_state(target)?;
        self.gpu = Some(state);
        self.frames = 0;
        Ok(())
    }

    fn render(&mut self) {
        self.requests.clear();
        let Some(gpu) = &self.gpu else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::warn!("skipping frame, surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(rgba_to_color(CLEAR_COLOR)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            pass.set_pipeline(&gpu.pipeline);
            pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
            pass.draw(0..TRIANGLE_VERTICES.len() as u32, 0..1);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        self.frames += 1;
    }

    fn shutdown(&mut self) {
        if let Some(gpu) = self.gpu.take() {
            // Drain in-flight work before the surface goes away.
            let _ = gpu.device.poll(wgpu::Maintain::Wait);
            drop(gpu);
            tracing::info!("wgpu renderer shut down after {} frames", self.frames);
        }
        self.requests.clear();
    }

    fn draw_mesh(&mut self, name: &str) {
        let backend = self.backend_name();
        self.requests.record(backend, name);
    }

    fn mesh_requests(&self) -> &[String] {
        self.requests.as_slice()
    }

    fn is_ready(&self) -> bool {
        self.gpu.is_some()
    }

    fn resize(&mut self, size: WindowSize) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };
        if size.is_empty() {
            return;
        }
        gpu.config.width = size.width;
        gpu.config.height = size.height;
        gpu.surface.configure(&gpu.device, &gpu.config);
        tracing::debug!("surface resized to {size}");
    }
}

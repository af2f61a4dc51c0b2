//! Presents a CPU-rasterized backdrop frame on the GPU surface.
//!
//! Each frame the premultiplied RGBA8 pixels are uploaded into a texture the
//! size of the surface and drawn with a fullscreen triangle, blended over the
//! render pass clear color.

/// WGSL shader source for the backdrop blit.
pub const BACKDROP_SHADER_SOURCE: &str = r#"
@group(0) @binding(0)
var backdrop_texture: texture_2d<f32>;
@group(0) @binding(1)
var backdrop_sampler: sampler;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_backdrop(@builtin(vertex_index) idx: u32) -> VertexOutput {
    // Fullscreen triangle
    let uv = vec2<f32>(f32((idx << 1u) & 2u), f32(idx & 2u));
    var out: VertexOutput;
    out.position = vec4<f32>(uv.x * 2.0 - 1.0, 1.0 - uv.y * 2.0, 0.0, 1.0);
    out.uv = uv;
    return out;
}

@fragment
fn fs_backdrop(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(backdrop_texture, backdrop_sampler, in.uv);
}
"#;

/// Texture format of the uploaded canvas.
pub const BACKDROP_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Errors from uploading a frame.
#[derive(Debug, thiserror::Error)]
pub enum PresentError {
    /// The pixel buffer does not hold exactly `width * height` RGBA8 texels.
    #[error("frame is {actual} bytes but {width}x{height} RGBA8 needs {expected}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Bytes an RGBA8 frame of the given size must contain.
pub fn frame_byte_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

/// GPU texture and pipeline that draw the backdrop canvas.
pub struct BackdropPresenter {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    size: (u32, u32),
}

impl BackdropPresenter {
    /// Build the pipeline and an initial texture of `width` x `height`.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("backdrop-shader"),
            source: wgpu::ShaderSource::Wgsl(BACKDROP_SHADER_SOURCE.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("backdrop-texture-bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("backdrop-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("backdrop-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_backdrop"),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_backdrop"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        // Texels map 1:1 onto surface pixels.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("backdrop-sampler"),
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let (width, height) = (width.max(1), height.max(1));
        let texture = create_backdrop_texture(device, width, height);
        let bind_group = create_bind_group(device, &bind_group_layout, &texture, &sampler);

        log::info!("Backdrop presenter initialized: {width}x{height} {surface_format:?}");

        Self {
            pipeline,
            bind_group_layout,
            sampler,
            texture,
            bind_group,
            size: (width, height),
        }
    }

    /// Current texture dimensions.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Upload a premultiplied RGBA8 frame, reallocating the texture if the size changed.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> Result<(), PresentError> {
        let expected = frame_byte_len(width, height);
        if rgba.len() != expected || expected == 0 {
            return Err(PresentError::SizeMismatch {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }

        if self.size != (width, height) {
            log::debug!("Reallocating backdrop texture: {width}x{height}");
            self.texture = create_backdrop_texture(device, width, height);
            self.bind_group =
                create_bind_group(device, &self.bind_group_layout, &self.texture, &self.sampler);
            self.size = (width, height);
        }

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        Ok(())
    }

    /// Draw the most recently uploaded frame.
    pub fn render<'a>(&'a self, pass: &mut wgpu::RenderPass<'a>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

fn create_backdrop_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("backdrop-texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: BACKDROP_TEXTURE_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    })
}

fn create_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &wgpu::Texture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("backdrop-texture-bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

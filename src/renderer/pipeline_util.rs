use std::num::NonZeroU64;

use crate::error::GeolineError;

/// Single alpha-blended color target in the given format.
pub fn blended_color_target(
    format: wgpu::TextureFormat,
) -> [Option<wgpu::ColorTargetState>; 1] {
    [Some(wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
        write_mask: wgpu::ColorWrites::ALL,
    })]
}

/// Uniform buffer binding visible to both shader stages.
pub fn uniform_entry(binding: u32, size: u64) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(size),
        },
        count: None,
    }
}

/// Vertex format for an attribute of `size` floats.
///
/// # Errors
///
/// Returns [`GeolineError::UnsupportedAttributeSize`] outside 1..=4.
pub fn float_vertex_format(
    name: &'static str,
    size: usize,
) -> Result<wgpu::VertexFormat, GeolineError> {
    match size {
        1 => Ok(wgpu::VertexFormat::Float32),
        2 => Ok(wgpu::VertexFormat::Float32x2),
        3 => Ok(wgpu::VertexFormat::Float32x3),
        4 => Ok(wgpu::VertexFormat::Float32x4),
        _ => Err(GeolineError::UnsupportedAttributeSize { name, size }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_formats_by_size() {
        assert_eq!(
            float_vertex_format("a", 3).unwrap(),
            wgpu::VertexFormat::Float32x3
        );
        assert_eq!(
            float_vertex_format("a", 4).unwrap(),
            wgpu::VertexFormat::Float32x4
        );
        assert!(matches!(
            float_vertex_format("wide", 5),
            Err(GeolineError::UnsupportedAttributeSize { name: "wide", size: 5 })
        ));
        assert!(float_vertex_format("empty", 0).is_err());
    }
}

use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor, ShaderLanguage,
    ShaderType,
};

use crate::error::GeolineError;

/// Shared WGSL modules, registered in dependency order.
const MODULES: &[ModuleDef] = &[ModuleDef {
    source: include_str!("../../assets/shaders/modules/project64.wgsl"),
    file_path: "modules/project64.wgsl",
}];

struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Layer shaders pull in shared code with `#import geoline::project64`.
/// The composer produces `naga::Module` IR directly, skipping a WGSL
/// re-parse inside wgpu.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Build a composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// Returns [`GeolineError::ShaderCompose`] if a shared module fails to
    /// parse.
    pub fn new() -> Result<Self, GeolineError> {
        let mut composer = Composer::default();
        for m in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| {
                    GeolineError::ShaderCompose(format!(
                        "failed to register '{}': {e}",
                        m.file_path
                    ))
                })?;
        }
        Ok(Self { composer })
    }

    /// Compose a shader source (which may contain `#import` directives)
    /// into a `wgpu::ShaderModule`.
    ///
    /// # Errors
    ///
    /// Returns [`GeolineError::ShaderCompose`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        source: &str,
        file_path: &str,
    ) -> Result<wgpu::ShaderModule, GeolineError> {
        let module = self.compose_naga(source, file_path)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(module)),
        }))
    }

    /// Compose a shader into a `naga::Module` without a GPU device.
    ///
    /// # Errors
    ///
    /// Returns [`GeolineError::ShaderCompose`] if composition fails.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, GeolineError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| {
                GeolineError::ShaderCompose(format!("'{file_path}': {e}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_shader_composes() {
        let mut composer = ShaderComposer::new().unwrap();
        let module = composer
            .compose_naga(crate::layer::line::LINE_SHADER, "line.wgsl")
            .unwrap_or_else(|e| panic!("line shader failed to compose: {e}"));
        let entry_points: Vec<&str> =
            module.entry_points.iter().map(|e| e.name.as_str()).collect();
        assert!(entry_points.contains(&"vs_main"));
        assert!(entry_points.contains(&"fs_main"));
    }

    #[test]
    fn unknown_import_is_an_error() {
        let mut composer = ShaderComposer::new().unwrap();
        let source = "#import geoline::missing\n\
            @fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(missing::f()); }";
        let err = composer.compose_naga(source, "bad.wgsl").unwrap_err();
        assert!(matches!(err, GeolineError::ShaderCompose(ref msg) if msg.contains("bad.wgsl")));
    }
}

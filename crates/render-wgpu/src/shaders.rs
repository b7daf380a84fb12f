use nyanchu_render::{ShaderError, ShaderFile, ShaderLoader};

/// Vertex stage source file, entry point `vs_main`.
pub const VERTEX_SHADER: &str = "vs_triangle.wgsl";
/// Fragment stage source file, entry point `fs_main`.
pub const FRAGMENT_SHADER: &str = "fs_triangle.wgsl";

/// The vertex and fragment sources of the triangle program.
#[derive(Debug, Clone)]
pub struct TriangleShaders {
    pub vertex: ShaderFile,
    pub fragment: ShaderFile,
}

impl TriangleShaders {
    /// Load both stages. Fails if either file is missing from every root.
    pub fn load(loader: &ShaderLoader) -> Result<Self, ShaderError> {
        let vertex = loader.load(VERTEX_SHADER)?;
        let fragment = loader.load(FRAGMENT_SHADER)?;
        Ok(Self { vertex, fragment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn stages_may_come_from_different_roots() {
        let primary = tempfile::tempdir().unwrap();
        let secondary = tempfile::tempdir().unwrap();
        fs::write(primary.path().join(VERTEX_SHADER), "// vs").unwrap();
        fs::write(secondary.path().join(FRAGMENT_SHADER), "// fs").unwrap();

        let loader = ShaderLoader::new([primary.path(), secondary.path()]);
        let shaders = TriangleShaders::load(&loader).unwrap();
        assert!(shaders.vertex.path.starts_with(primary.path()));
        assert!(shaders.fragment.path.starts_with(secondary.path()));
    }

    #[test]
    fn missing_fragment_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(VERTEX_SHADER), "// vs").unwrap();

        let loader = ShaderLoader::new([dir.path()]);
        assert!(matches!(
            TriangleShaders::load(&loader),
            Err(ShaderError::NotFound { .. })
        ));
    }

    #[test]
    fn workspace_shaders_are_present() {
        let root = concat!(env!("CARGO_MANIFEST_DIR"), "/../../shaders");
        let loader = ShaderLoader::new([root]);
        let shaders = TriangleShaders::load(&loader).unwrap();
        assert!(shaders.vertex.source.contains("fn vs_main"));
        assert!(shaders.fragment.source.contains("fn fs_main"));
    }
}

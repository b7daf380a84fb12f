use std::path::{Path, PathBuf};

/// Shader directories tried in order: next to the working directory first,
/// then the workspace copy as seen from `target/<profile>/`.
pub const DEFAULT_SHADER_ROOTS: &[&str] = &["shaders", "../../shaders"];

/// Errors from shader file lookup.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("shader `{name}` not found in any of {searched:?}")]
    NotFound { name: String, searched: Vec<PathBuf> },
    #[error("failed to read shader {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("shader {} is empty", .path.display())]
    Empty { path: PathBuf },
}

/// A shader file read from disk.
#[derive(Debug, Clone)]
pub struct ShaderFile {
    pub name: String,
    /// The path the source was actually read from.
    pub path: PathBuf,
    pub source: String,
}

/// Locates shader files across an ordered list of root directories.
#[derive(Debug, Clone)]
pub struct ShaderLoader {
    roots: Vec<PathBuf>,
}

impl Default for ShaderLoader {
    fn default() -> Self {
        Self::new(DEFAULT_SHADER_ROOTS.iter().map(PathBuf::from))
    }
}

impl ShaderLoader {
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Read `name` from the first root that yields a usable file.
    ///
    /// Any per-root failure (missing, unreadable, empty) is logged and the
    /// next root is tried. `NotFound` is returned once every root has missed.
    pub fn load(&self, name: &str) -> Result<ShaderFile, ShaderError> {
        let mut searched = Vec::with_capacity(self.roots.len());

        for root in &self.roots {
            let path = root.join(name);
            match read_shader(&path) {
                Ok(source) => {
                    tracing::debug!("loaded shader {}", path.display());
                    return Ok(ShaderFile {
                        name: name.to_owned(),
                        path,
                        source,
                    });
                }
                Err(e) => {
                    tracing::warn!("failed to open shader file: {e}");
                    searched.push(path);
                }
            }
        }

        Err(ShaderError::NotFound {
            name: name.to_owned(),
            searched,
        })
    }
}

fn read_shader(path: &Path) -> Result<String, ShaderError> {
    let source = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if source.trim().is_empty() {
        return Err(ShaderError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SOURCE: &str = "@fragment fn fs_main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }";

    #[test]
    fn primary_root_wins() {
        let primary = tempfile::tempdir().unwrap();
        let secondary = tempfile::tempdir().unwrap();
        fs::write(primary.path().join("fs.wgsl"), SOURCE).unwrap();
        fs::write(secondary.path().join("fs.wgsl"), "// other").unwrap();

        let loader = ShaderLoader::new([primary.path(), secondary.path()]);
        let shader = loader.load("fs.wgsl").unwrap();
        assert_eq!(shader.path, primary.path().join("fs.wgsl"));
        assert_eq!(shader.source, SOURCE);
    }

    #[test]
    fn falls_back_to_secondary_root() {
        let primary = tempfile::tempdir().unwrap();
        let secondary = tempfile::tempdir().unwrap();
        fs::write(secondary.path().join("vs.wgsl"), SOURCE).unwrap();

        let loader = ShaderLoader::new([primary.path(), secondary.path()]);
        let shader = loader.load("vs.wgsl").unwrap();
        assert_eq!(shader.path, secondary.path().join("vs.wgsl"));
        assert_eq!(shader.name, "vs.wgsl");
    }

    #[test]
    fn both_roots_missing_is_an_error() {
        let primary = tempfile::tempdir().unwrap();
        let secondary = tempfile::tempdir().unwrap();

        let loader = ShaderLoader::new([primary.path(), secondary.path()]);
        match loader.load("missing.wgsl") {
            Err(ShaderError::NotFound { name, searched }) => {
                assert_eq!(name, "missing.wgsl");
                assert_eq!(searched.len(), 2);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn nonexistent_roots_are_skipped() {
        let secondary = tempfile::tempdir().unwrap();
        fs::write(secondary.path().join("vs.wgsl"), SOURCE).unwrap();

        let loader = ShaderLoader::new([
            secondary.path().join("does-not-exist"),
            secondary.path().to_path_buf(),
        ]);
        assert!(loader.load("vs.wgsl").is_ok());
    }

    #[test]
    fn empty_file_counts_as_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blank.wgsl"), "  \n").unwrap();

        let loader = ShaderLoader::new([dir.path()]);
        match loader.load("blank.wgsl") {
            Err(ShaderError::NotFound { searched, .. }) => {
                assert_eq!(searched, [dir.path().join("blank.wgsl")]);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn empty_primary_falls_back_to_secondary() {
        let primary = tempfile::tempdir().unwrap();
        let secondary = tempfile::tempdir().unwrap();
        fs::write(primary.path().join("vs.wgsl"), "").unwrap();
        fs::write(secondary.path().join("vs.wgsl"), SOURCE).unwrap();

        let loader = ShaderLoader::new([primary.path(), secondary.path()]);
        let shader = loader.load("vs.wgsl").unwrap();
        assert_eq!(shader.path, secondary.path().join("vs.wgsl"));
        assert_eq!(shader.source, SOURCE);
    }

    #[test]
    fn primary_root_that_is_a_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("shaders");
        fs::write(&not_a_dir, "not a directory").unwrap();
        let secondary = dir.path().join("fallback");
        fs::create_dir(&secondary).unwrap();
        fs::write(secondary.join("vs.wgsl"), SOURCE).unwrap();

        let loader = ShaderLoader::new([not_a_dir, secondary.clone()]);
        let shader = loader.load("vs.wgsl").unwrap();
        assert_eq!(shader.path, secondary.join("vs.wgsl"));
    }

    #[test]
    fn default_roots() {
        let loader = ShaderLoader::default();
        assert_eq!(
            loader.roots(),
            [PathBuf::from("shaders"), PathBuf::from("../../shaders")]
        );
    }
}

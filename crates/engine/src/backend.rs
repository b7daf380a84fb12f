//! Compile-time backend selection. There is no runtime switch.

/// Renderer used by the default `Engine`.
#[cfg(target_os = "macos")]
pub type PlatformRenderer = nyanchu_render::MetalRenderer;

/// Renderer used by the default `Engine`.
#[cfg(not(target_os = "macos"))]
pub type PlatformRenderer = nyanchu_render_wgpu::WgpuRenderer;

/// Window host used by the default `Engine`.
#[cfg(not(any(target_arch = "wasm32", target_os = "ios")))]
pub type PlatformHost = nyanchu_platform::DesktopHost;

/// Window host used by the default `Engine`.
#[cfg(any(target_arch = "wasm32", target_os = "ios"))]
pub type PlatformHost = nyanchu_platform::HeadlessHost;

#[cfg(test)]
mod tests {
    use super::*;
    use nyanchu_render::Renderer;

    #[test]
    fn platform_renderer_matches_target() {
        let name = PlatformRenderer::default().backend_name();
        if cfg!(target_os = "macos") {
            assert_eq!(name, "metal");
        } else {
            assert_eq!(name, "wgpu");
        }
    }
}

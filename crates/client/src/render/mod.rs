//! Frame rendering: background pass, then the overlay.

mod overlay;

use overlay::build;

use anyhow::Result;

use crate::state::ScreenState;

/// Draw one frame. A lost or outdated surface is reconfigured and the frame
/// skipped.
pub fn run(state: &mut ScreenState) -> Result<()> {
    let (output, mut encoder) = match state.renderer.begin_frame() {
        Ok(frame) => frame,
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
            state.renderer.reconfigure();
            return Ok(());
        }
        Err(wgpu::SurfaceError::Timeout) => {
            log::debug!("Surface timeout, skipping frame");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    let view = output
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    let alpha = state.background_alpha();
    state.renderer.render_background(&mut encoder, &view, alpha);

    let (sw, sh) = state.renderer.dimensions();
    let overlay = build(state.screen.registry(), sw as f32, sh as f32);
    state.audio_button = overlay.audio_button;
    state.renderer.render_overlay(
        &mut encoder,
        &view,
        &overlay.builder.vertices,
        &overlay.builder.indices,
    );

    state.renderer.end_frame(output, encoder);
    Ok(())
}

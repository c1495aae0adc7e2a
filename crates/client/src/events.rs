//! Window and user event handling for ScreenState.

use loadscreen::HookCall;
use renderer::{AssetError, ImageData};
use winit::event::WindowEvent;

use crate::state::ScreenState;

/// Events sent to the event loop from other threads.
#[derive(Debug)]
pub enum UserEvent {
    /// A host hook call from the bridge.
    Hook(HookCall),
    /// The bridge's input ended.
    HostClosed,
    /// The background image finished decoding (or failed to).
    Background(Result<ImageData, AssetError>),
}

impl ScreenState {
    /// Handle a window event. Returns true if the app should exit.
    pub(crate) fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                self.running = false;
                true
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(size);
                self.renderer.window.request_redraw();
                false
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let winit::keyboard::PhysicalKey::Code(key) = event.physical_key {
                    if !event.repeat {
                        self.input.process_keyboard(key, event.state);
                    }
                }
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.process_mouse_button(button, state);
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.process_cursor_position((position.x, position.y));
                false
            }
            WindowEvent::RedrawRequested => {
                self.update();
                if let Err(e) = self.render() {
                    log::error!("Render failed: {:#}", e);
                }
                !self.running
            }
            _ => false,
        }
    }

    /// Handle an event from a bridge or loader thread.
    pub(crate) fn handle_user_event(&mut self, event: UserEvent) {
        match event {
            UserEvent::Hook(call) => self.screen.dispatch(call),
            UserEvent::HostClosed => log::info!("Host bridge closed"),
            UserEvent::Background(Ok(image)) => {
                self.renderer.set_background(&image);
                self.screen.background_loaded(true);
            }
            UserEvent::Background(Err(e)) => {
                log::debug!("Background unavailable: {}", e);
                self.screen.background_loaded(false);
            }
        }
        self.renderer.window.request_redraw();
    }
}

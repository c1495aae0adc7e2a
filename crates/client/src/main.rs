//! Imperial Uplink: a themed loading screen driven by host hook calls.

mod config;
mod events;
mod host;
mod render;
mod state;

use std::sync::Arc;

use anyhow::Result;
use loadscreen::HookCall;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    window::{Fullscreen, Window, WindowId},
};

use config::ClientConfig;
use events::UserEvent;
use state::ScreenState;

/// Application handler for winit.
struct App {
    config: ClientConfig,
    proxy: EventLoopProxy<UserEvent>,
    state: Option<ScreenState>,
    /// Hook calls that arrived before the window existed.
    pending: Vec<HookCall>,
}

impl App {
    fn new(config: ClientConfig, proxy: EventLoopProxy<UserEvent>) -> Self {
        Self {
            config,
            proxy,
            state: None,
            pending: Vec::new(),
        }
    }
}

impl ApplicationHandler<UserEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let mut window_attrs = Window::default_attributes()
            .with_title("Imperial Uplink")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));
        if self.config.fullscreen {
            window_attrs = window_attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = match event_loop.create_window(window_attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match pollster::block_on(ScreenState::new(window.clone(), &self.config)) {
            Ok(mut s) => {
                for call in self.pending.drain(..) {
                    s.screen.dispatch(call);
                }
                state::load_background(self.config.background_image.clone(), self.proxy.clone());
                self.state = Some(s);
                window.request_redraw();
            }
            Err(e) => {
                log::error!("Failed to initialize loading screen: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        match (&mut self.state, event) {
            (Some(state), event) => state.handle_user_event(event),
            (None, UserEvent::Hook(call)) => self.pending.push(call),
            (None, other) => log::debug!("Event before window: {:?}", other),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(state) = &mut self.state {
            if state.handle_window_event(event) || !state.running {
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            let next_frame = state.time.next_frame_at();
            if std::time::Instant::now() >= next_frame {
                state.renderer.window.request_redraw();
            }
            event_loop.set_control_flow(ControlFlow::WaitUntil(next_frame));
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ClientConfig::load();
    log::info!(
        "Starting Imperial Uplink ({}x{}, host {:?})",
        config.window_width,
        config.window_height,
        config.host
    );

    let event_loop = EventLoop::<UserEvent>::with_user_event().build()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let proxy = event_loop.create_proxy();

    // The bridge thread is detached; it ends with its input or the event loop.
    let _bridge = host::spawn(config.host, proxy.clone())?;

    let mut app = App::new(config, proxy);
    event_loop.run_app(&mut app)?;

    Ok(())
}

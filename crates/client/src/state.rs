//! Everything that lives for as long as the window does.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use audio::{AmbiencePlayer, AudioController, KiraAmbience};
use engine_core::{SystemRandom, Time};
use input::{InputState, Rect};
use loadscreen::{LocalClock, LoadingScreen, RegionId, StyleClass, UiRegistry};
use renderer::{ImageData, Renderer};
use winit::event_loop::EventLoopProxy;
use winit::window::Window;

use crate::config::ClientConfig;
use crate::events::UserEvent;
use crate::render;

/// Fade-in time of the background once it is ready.
pub const REVEAL_DURATION: Duration = Duration::from_millis(1_200);

pub struct ScreenState {
    pub renderer: Renderer,
    pub input: InputState,
    pub screen: LoadingScreen,
    pub time: Time,
    /// Hit box of the audio button from the last layout.
    pub audio_button: Option<Rect>,
    pub running: bool,
    reveal_started: Option<Instant>,
}

impl ScreenState {
    pub async fn new(window: Arc<Window>, config: &ClientConfig) -> Result<Self> {
        let renderer = Renderer::new(window, config.vsync).await?;

        let player: Box<dyn AmbiencePlayer> = Box::new(KiraAmbience::new(&config.ambience_track));
        let audio = AudioController::new(Some(player))
            .with_volume(config.audio_volume)
            .with_retry_delay(Duration::from_millis(config.audio_retry_delay_ms));

        let rng = SystemRandom::detect();
        if !rng.is_strong() {
            log::info!("OS entropy unavailable, using fallback random source");
        }

        if !config.hidden_regions.is_empty() {
            log::info!("Hidden regions: {:?}", config.hidden_regions);
        }
        let registry = UiRegistry::bind(&config.hidden_regions);

        let mut screen = LoadingScreen::new(registry, audio, Box::new(rng), Box::new(LocalClock));
        let time = Time::new();
        screen.start();

        Ok(Self {
            renderer,
            input: InputState::new(),
            screen,
            time,
            audio_button: None,
            running: true,
            reveal_started: None,
        })
    }

    /// Advance timers and apply this frame's input.
    pub fn update(&mut self) {
        self.time.update();
        self.screen.update(self.time.elapsed());

        if self.input.is_audio_toggle_requested(self.audio_button) {
            self.screen.toggle_audio();
        }
        if self.input.is_quit_pressed() {
            self.running = false;
        }
        self.input.end_frame();

        if self.reveal_started.is_none() && self.background_ready() {
            self.reveal_started = Some(Instant::now());
        }
    }

    fn background_ready(&self) -> bool {
        self.screen
            .registry()
            .get(RegionId::Background)
            .is_some_and(|bg| bg.has_class(StyleClass::Ready))
    }

    /// Current background opacity: 0 until ready, then a linear fade.
    pub fn background_alpha(&self) -> f32 {
        reveal_alpha(self.reveal_started.map(|t| t.elapsed()))
    }

    pub fn render(&mut self) -> Result<()> {
        render::run(self)
    }
}

pub fn reveal_alpha(since_ready: Option<Duration>) -> f32 {
    match since_ready {
        None => 0.0,
        Some(t) => (t.as_secs_f32() / REVEAL_DURATION.as_secs_f32()).min(1.0),
    }
}

/// Decode the background image off the event-loop thread.
pub fn load_background(path: PathBuf, proxy: EventLoopProxy<UserEvent>) {
    let spawned = std::thread::Builder::new()
        .name("background-loader".into())
        .spawn(move || {
            let result = ImageData::load(&path);
            let _ = proxy.send_event(UserEvent::Background(result));
        });
    if let Err(e) = spawned {
        log::debug!("Could not start background loader: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_fades_linearly_and_saturates() {
        assert_eq!(reveal_alpha(None), 0.0);
        assert_eq!(reveal_alpha(Some(Duration::ZERO)), 0.0);
        assert!((reveal_alpha(Some(REVEAL_DURATION / 2)) - 0.5).abs() < 1e-4);
        assert_eq!(reveal_alpha(Some(Duration::from_secs(10))), 1.0);
    }
}

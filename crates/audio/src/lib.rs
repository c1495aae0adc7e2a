//! Background ambience: a looping track played through Kira, and the
//! controller that tracks whether the user wants it.

mod controller;

pub use controller::*;

use anyhow::Result;
use kira::{
    manager::{backend::DefaultBackend, AudioManager, AudioManagerSettings},
    sound::{
        static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
        PlaybackState,
    },
    tween::Tween,
};
use std::path::{Path, PathBuf};

/// Something that can play and pause the ambience track.
pub trait AmbiencePlayer {
    /// Start or resume playback. An error means the attempt was rejected.
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn set_volume(&mut self, volume: f64);
}

/// Looping ambience track. The audio device and the decoded sound are
/// acquired on the first play attempt, so a missing device only rejects
/// that attempt and a later one may still succeed.
pub struct KiraAmbience {
    path: PathBuf,
    manager: Option<AudioManager>,
    sound: Option<StaticSoundData>,
    handle: Option<StaticSoundHandle>,
    volume: f64,
}

impl KiraAmbience {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            manager: None,
            sound: None,
            handle: None,
            volume: DEFAULT_VOLUME,
        }
    }

    fn start(&mut self) -> Result<()> {
        if self.manager.is_none() {
            self.manager = Some(AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())?);
        }
        if self.sound.is_none() {
            self.sound = Some(StaticSoundData::from_file(&self.path)?);
        }
        let (Some(manager), Some(sound)) = (self.manager.as_mut(), self.sound.as_ref()) else {
            anyhow::bail!("ambience not initialised");
        };

        let settings = StaticSoundSettings::new().loop_region(..).volume(self.volume);
        let handle = manager.play(sound.clone().with_settings(settings))?;
        self.handle = Some(handle);
        log::info!("Ambience playing from {:?}", self.path);
        Ok(())
    }
}

impl AmbiencePlayer for KiraAmbience {
    fn play(&mut self) -> Result<()> {
        if let Some(handle) = &mut self.handle {
            match handle.state() {
                PlaybackState::Paused | PlaybackState::Pausing => {
                    let _ = handle.resume(Tween::default());
                    return Ok(());
                }
                PlaybackState::Stopped | PlaybackState::Stopping => {}
                _ => return Ok(()),
            }
        }
        self.start()
    }

    fn pause(&mut self) {
        if let Some(handle) = &mut self.handle {
            let _ = handle.pause(Tween::default());
        }
    }

    fn is_paused(&self) -> bool {
        match &self.handle {
            Some(handle) => matches!(
                handle.state(),
                PlaybackState::Paused
                    | PlaybackState::Pausing
                    | PlaybackState::Stopped
                    | PlaybackState::Stopping
            ),
            None => true,
        }
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
        if let Some(handle) = &mut self.handle {
            let _ = handle.set_volume(volume, Tween::default());
        }
    }
}

// Re-export for convenience
pub use kira;

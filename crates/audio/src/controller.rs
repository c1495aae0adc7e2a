//! Audio intent and the autoplay/retry policy.

use crate::AmbiencePlayer;
use std::time::Duration;

/// Ambience is kept quiet under the loading screen.
pub const DEFAULT_VOLUME: f64 = 0.08;
/// Delay before the single autoplay retry.
pub const RETRY_DELAY: Duration = Duration::from_secs(15);

/// Result of one play/pause attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// No ambience track is attached.
    NoPlayer,
    /// Audio is not wanted; the track is paused.
    Paused,
    Playing,
    /// The player refused to start (no device, unreadable file…).
    Rejected,
}

/// Tracks whether the user wants ambience and drives the player to match.
pub struct AudioController {
    player: Option<Box<dyn AmbiencePlayer>>,
    wanted: bool,
    volume: f64,
    retry_delay: Duration,
    retry_pending: bool,
}

impl AudioController {
    pub fn new(player: Option<Box<dyn AmbiencePlayer>>) -> Self {
        Self {
            player,
            wanted: true,
            volume: DEFAULT_VOLUME,
            retry_delay: RETRY_DELAY,
            retry_pending: false,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn wanted(&self) -> bool {
        self.wanted
    }

    /// Label for the toggle button. Reflects intent, not playback.
    pub fn button_label(&self) -> &'static str {
        if self.wanted {
            "AUDIO: ON"
        } else {
            "AUDIO: OFF"
        }
    }

    pub fn is_playing(&self) -> bool {
        self.player.as_ref().is_some_and(|p| !p.is_paused())
    }

    /// Bring playback in line with intent.
    pub fn try_play(&mut self) -> PlayOutcome {
        let Some(player) = self.player.as_mut() else {
            return PlayOutcome::NoPlayer;
        };
        player.set_volume(self.volume);

        if !self.wanted {
            if !player.is_paused() {
                player.pause();
            }
            return PlayOutcome::Paused;
        }

        match player.play() {
            Ok(()) => PlayOutcome::Playing,
            Err(e) => {
                log::debug!("Ambience playback rejected: {:#}", e);
                PlayOutcome::Rejected
            }
        }
    }

    /// Flip intent and apply it.
    pub fn toggle(&mut self) -> PlayOutcome {
        self.wanted = !self.wanted;
        if self.wanted {
            self.try_play()
        } else {
            match self.player.as_mut() {
                Some(player) => {
                    player.pause();
                    PlayOutcome::Paused
                }
                None => PlayOutcome::NoPlayer,
            }
        }
    }

    /// First playback attempt at startup. Returns the delay after which
    /// [`retry`](Self::retry) should be called when the attempt was rejected.
    pub fn autoplay(&mut self) -> (PlayOutcome, Option<Duration>) {
        let outcome = self.try_play();
        if outcome == PlayOutcome::Rejected {
            self.retry_pending = true;
            (outcome, Some(self.retry_delay))
        } else {
            (outcome, None)
        }
    }

    /// The delayed retry. Only the first call after a rejected autoplay does
    /// anything.
    pub fn retry(&mut self) -> Option<PlayOutcome> {
        if !self.retry_pending {
            return None;
        }
        self.retry_pending = false;
        Some(self.try_play())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct Probe {
        plays: u32,
        pauses: u32,
        paused: bool,
        volume: f64,
        reject_next: u32,
    }

    struct FakePlayer(Rc<RefCell<Probe>>);

    impl AmbiencePlayer for FakePlayer {
        fn play(&mut self) -> anyhow::Result<()> {
            let mut p = self.0.borrow_mut();
            p.plays += 1;
            if p.reject_next > 0 {
                p.reject_next -= 1;
                anyhow::bail!("no output device");
            }
            p.paused = false;
            Ok(())
        }
        fn pause(&mut self) {
            let mut p = self.0.borrow_mut();
            p.pauses += 1;
            p.paused = true;
        }
        fn is_paused(&self) -> bool {
            self.0.borrow().paused
        }
        fn set_volume(&mut self, volume: f64) {
            self.0.borrow_mut().volume = volume;
        }
    }

    fn controller(reject_next: u32) -> (AudioController, Rc<RefCell<Probe>>) {
        let probe = Rc::new(RefCell::new(Probe {
            paused: true,
            reject_next,
            ..Default::default()
        }));
        let c = AudioController::new(Some(Box::new(FakePlayer(probe.clone()))));
        (c, probe)
    }

    #[test]
    fn autoplay_success_schedules_no_retry() {
        let (mut c, probe) = controller(0);
        assert_eq!(c.autoplay(), (PlayOutcome::Playing, None));
        assert!(c.is_playing());
        assert_eq!(probe.borrow().volume, DEFAULT_VOLUME);
        assert_eq!(c.retry(), None);
    }

    #[test]
    fn rejected_autoplay_retries_exactly_once() {
        let (mut c, probe) = controller(5);
        assert_eq!(c.autoplay(), (PlayOutcome::Rejected, Some(RETRY_DELAY)));
        assert_eq!(c.button_label(), "AUDIO: ON");
        assert_eq!(c.retry(), Some(PlayOutcome::Rejected));
        assert_eq!(c.retry(), None);
        assert_eq!(probe.borrow().plays, 2);
    }

    #[test]
    fn retry_respects_intent_changed_meanwhile() {
        let (mut c, probe) = controller(1);
        c.autoplay();
        assert_eq!(c.toggle(), PlayOutcome::Paused);
        assert_eq!(c.retry(), Some(PlayOutcome::Paused));
        assert_eq!(probe.borrow().plays, 1);
    }

    #[test]
    fn toggle_flips_label_and_playback() {
        let (mut c, probe) = controller(0);
        c.autoplay();
        assert_eq!(c.toggle(), PlayOutcome::Paused);
        assert_eq!(c.button_label(), "AUDIO: OFF");
        assert!(!c.is_playing());
        assert_eq!(c.toggle(), PlayOutcome::Playing);
        assert_eq!(c.button_label(), "AUDIO: ON");
        assert_eq!(probe.borrow().pauses, 1);
    }

    #[test]
    fn missing_player_is_harmless() {
        let mut c = AudioController::new(None);
        assert_eq!(c.autoplay(), (PlayOutcome::NoPlayer, None));
        assert_eq!(c.toggle(), PlayOutcome::NoPlayer);
        assert_eq!(c.button_label(), "AUDIO: OFF");
        assert!(!c.is_playing());
    }

    #[test]
    fn volume_is_clamped() {
        let (c, probe) = controller(0);
        let mut c = c.with_volume(3.0).with_retry_delay(Duration::from_secs(1));
        c.try_play();
        assert_eq!(probe.borrow().volume, 1.0);
    }
}

//! The loading screen controller.
//!
//! One `LoadingScreen` owns every piece of mutable state: the region
//! registry, progress counters, rotation cursors, tickers, audio intent and
//! the timer queue. Host hooks and timer tasks are plain method calls that
//! run to completion on the caller's thread.

use std::time::Duration;

use audio::AudioController;
use chrono::Datelike;
use engine_core::{RandomSource, Scheduler};

use crate::clock::WallClock;
use crate::feed::{Feed, Rotation};
use crate::format::{
    ambient_temperature, cycle_date, feed_clock, format_planet, format_temperature, imperial_id,
    transport_code,
};
use crate::glitch::{glitch_text, roll};
use crate::hooks::{classify_status, HookCall, HookValue, Phase};
use crate::pools::{
    BOOT_LOG, COMMS_TIPS, DOCTRINE, MILITARY_CAPTIONS, MILITARY_FEED, NEWS_CAPTIONS, NEWS_FEED,
};
use crate::progress::ProgressTracker;
use crate::registry::{RegionId, StyleClass, UiRegistry};

pub const BOOT_INTERVAL: Duration = Duration::from_millis(1_700);
pub const DOCTRINE_INTERVAL: Duration = Duration::from_millis(5_200);
pub const FEED_CLOCK_INTERVAL: Duration = Duration::from_secs(30);
pub const CYCLE_DATE_INTERVAL: Duration = Duration::from_secs(60);
pub const SIGNAL_LOCK_DELAY: Duration = Duration::from_millis(2_200);

const BOOT_GLITCH_ODDS: u32 = 12;
const TIP_GLITCH_ODDS: u32 = 10;
const FEED_GLITCH_ODDS: u32 = 11;

const PLACEHOLDER: &str = "—";
const SERVER_FALLBACK: &str = "SECURE-CHANNEL";
const MODE_FALLBACK: &str = "ACTIVE OPERATION";
const FILE_FALLBACK: &str = "resource";

/// The two tickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Military,
    News,
}

impl FeedKind {
    /// Line, caption and clock regions.
    pub fn regions(self) -> (RegionId, RegionId, RegionId) {
        match self {
            FeedKind::Military => (RegionId::MilLine, RegionId::MilSub, RegionId::MilClock),
            FeedKind::News => (RegionId::NewsLine, RegionId::NewsSub, RegionId::NewsClock),
        }
    }

    pub fn interval(self) -> Duration {
        match self {
            FeedKind::Military => Duration::from_millis(3_800),
            FeedKind::News => Duration::from_millis(4_100),
        }
    }

    fn pools(self) -> (&'static [&'static str], &'static [&'static str]) {
        match self {
            FeedKind::Military => (MILITARY_FEED, MILITARY_CAPTIONS),
            FeedKind::News => (NEWS_FEED, NEWS_CAPTIONS),
        }
    }
}

/// Timer work items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    BootTick,
    DoctrineTick,
    FeedTick(FeedKind),
    FeedClock(FeedKind),
    CycleDate,
    LockSignal,
    AudioRetry,
    RestoreGlitch(RegionId),
}

pub struct LoadingScreen {
    registry: UiRegistry,
    progress: ProgressTracker,
    boot: Rotation,
    doctrine: Rotation,
    military: Option<Feed>,
    news: Option<Feed>,
    audio: AudioController,
    scheduler: Scheduler<Task>,
    rng: Box<dyn RandomSource>,
    clock: Box<dyn WallClock>,
}

impl LoadingScreen {
    pub fn new(
        registry: UiRegistry,
        audio: AudioController,
        rng: Box<dyn RandomSource>,
        clock: Box<dyn WallClock>,
    ) -> Self {
        Self {
            registry,
            progress: ProgressTracker::new(),
            boot: Rotation::new(BOOT_LOG),
            doctrine: Rotation::new(DOCTRINE),
            military: None,
            news: None,
            audio,
            scheduler: Scheduler::new(),
            rng,
            clock,
        }
    }

    pub fn registry(&self) -> &UiRegistry {
        &self.registry
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn audio(&self) -> &AudioController {
        &self.audio
    }

    pub fn feed(&self, kind: FeedKind) -> Option<&Feed> {
        match kind {
            FeedKind::Military => self.military.as_ref(),
            FeedKind::News => self.news.as_ref(),
        }
    }

    /// Initial texts, session seed, timers and autoplay.
    pub fn start(&mut self) {
        self.seed_placeholders();
        self.set_signal_boot();
        self.scheduler.after(SIGNAL_LOCK_DELAY, Task::LockSignal);

        self.seed_session_fields();
        self.refresh_cycle_date();
        self.scheduler.every(CYCLE_DATE_INTERVAL, Task::CycleDate);

        self.scheduler.every(BOOT_INTERVAL, Task::BootTick);
        self.scheduler.every(DOCTRINE_INTERVAL, Task::DoctrineTick);

        self.start_feed(FeedKind::Military);
        self.start_feed(FeedKind::News);

        self.refresh_audio_button();
        let (outcome, retry) = self.audio.autoplay();
        log::debug!("Ambience autoplay: {:?}", outcome);
        self.refresh_audio_button();
        if let Some(delay) = retry {
            self.scheduler.after(delay, Task::AudioRetry);
        }
    }

    /// Run every timer task due at `elapsed`.
    pub fn update(&mut self, elapsed: Duration) {
        for task in self.scheduler.advance(elapsed) {
            self.run(task);
        }
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::BootTick => {
                if let Some(line) = self.boot.advance() {
                    self.registry.set_text(RegionId::BootLine, line);
                }
                self.maybe_glitch(RegionId::BootLine, BOOT_GLITCH_ODDS);
            }
            Task::DoctrineTick => {
                if let Some(line) = self.doctrine.advance() {
                    self.registry.set_text(RegionId::DoctrineLine, line);
                }
                if let Some(tip) = self.doctrine.paired(COMMS_TIPS) {
                    self.registry.set_text(RegionId::TipLine, tip);
                }
                self.maybe_glitch(RegionId::TipLine, TIP_GLITCH_ODDS);
            }
            Task::FeedTick(kind) => self.push_feed(kind),
            Task::FeedClock(kind) => self.refresh_feed_clock(kind),
            Task::CycleDate => self.refresh_cycle_date(),
            Task::LockSignal => self.set_signal_locked(),
            Task::AudioRetry => {
                if let Some(outcome) = self.audio.retry() {
                    log::debug!("Ambience retry: {:?}", outcome);
                    self.refresh_audio_button();
                }
            }
            Task::RestoreGlitch(id) => {
                if let Some(region) = self.registry.get_mut(id) {
                    region.clear_glitch();
                }
            }
        }
    }

    // ── Host hooks ─────────────────────────────────────────────────────────

    pub fn dispatch(&mut self, call: HookCall) {
        log::debug!("Hook {}", call.name());
        match call {
            HookCall::GameDetails {
                server_name,
                server_url,
                map_name,
                max_players,
                steam_id,
                game_mode,
            } => self.game_details(
                &server_name,
                &server_url,
                &map_name,
                &max_players,
                &steam_id,
                &game_mode,
            ),
            HookCall::SetStatusChanged(status) => self.set_status_changed(&status),
            HookCall::SetFilesNeeded(n) => self.set_files_needed(&n),
            HookCall::SetFilesTotal(n) => self.set_files_total(&n),
            HookCall::SetFilesDownloaded(n) => self.set_files_downloaded(&n),
            HookCall::DownloadingFile(name) => self.downloading_file(&name),
        }
    }

    pub fn game_details(
        &mut self,
        server_name: &HookValue,
        server_url: &HookValue,
        map_name: &HookValue,
        max_players: &HookValue,
        steam_id: &HookValue,
        game_mode: &HookValue,
    ) {
        if let Some(url) = server_url.as_text() {
            log::debug!("Server URL {} (not displayed)", url);
        }

        let server = server_name
            .as_text()
            .map(|s| s.to_uppercase())
            .unwrap_or_else(|| SERVER_FALLBACK.to_string());
        self.registry.set_text(RegionId::ServerName, server);

        let planet = format_planet(map_name.as_text().as_deref());
        self.registry.set_text(RegionId::MapName, planet);

        let mode = game_mode
            .as_text()
            .map(|s| s.to_uppercase())
            .unwrap_or_else(|| MODE_FALLBACK.to_string());
        self.registry.set_text(RegionId::ModeName, mode);

        let id = steam_id.as_text();
        self.registry
            .set_text(RegionId::PlayerId, id.clone().unwrap_or_else(|| PLACEHOLDER.to_string()));
        self.registry
            .set_text(RegionId::ImperialId, imperial_id(id.as_deref().unwrap_or("0")));
        self.registry.set_text(RegionId::ChannelEcho, "SECURE");

        let slots = match max_players.as_count() {
            0 => PLACEHOLDER.to_string(),
            n => format!("{} SLOTS", n),
        };
        self.registry.set_text(RegionId::MaxPlayers, slots);
    }

    pub fn set_status_changed(&mut self, status: &HookValue) {
        let raw = status.as_text().unwrap_or_default();
        let (phase, line) = classify_status(&raw);
        self.set_phase(phase);
        self.registry.set_text(RegionId::StatusText, line);
    }

    pub fn set_files_needed(&mut self, needed: &HookValue) {
        self.progress.set_needed(needed.as_count());
        self.refresh_progress();
    }

    pub fn set_files_total(&mut self, total: &HookValue) {
        self.progress.set_total(total.as_count());
        self.refresh_progress();
    }

    pub fn set_files_downloaded(&mut self, downloaded: &HookValue) {
        self.progress.set_downloaded(downloaded.as_count());
        self.refresh_progress();
    }

    pub fn downloading_file(&mut self, file_name: &HookValue) {
        let name = file_name.as_text().unwrap_or_else(|| FILE_FALLBACK.to_string());
        self.set_phase(Phase::Download);
        self.registry.set_text(RegionId::StatusText, format!("[DL] Downloading: {}", name));
        self.progress.file_started();
        self.refresh_progress();
    }

    // ── User and asset events ──────────────────────────────────────────────

    pub fn toggle_audio(&mut self) {
        let outcome = self.audio.toggle();
        log::debug!("Ambience toggled: {:?}", outcome);
        self.refresh_audio_button();
    }

    /// Reveal the background once its image has loaded. A failed load leaves
    /// it as it was.
    pub fn background_loaded(&mut self, ok: bool) {
        if !ok {
            return;
        }
        if let Some(bg) = self.registry.get_mut(RegionId::Background) {
            bg.add_class(StyleClass::Ready);
        }
    }

    // ── Display helpers ────────────────────────────────────────────────────

    fn seed_placeholders(&mut self) {
        for id in [
            RegionId::ServerName,
            RegionId::MapName,
            RegionId::ModeName,
            RegionId::PlayerId,
            RegionId::ImperialId,
            RegionId::MaxPlayers,
        ] {
            self.registry.set_text(id, PLACEHOLDER);
        }
        self.registry.set_text(RegionId::ChannelEcho, "PENDING");
        self.registry.set_text(RegionId::StatusText, "[SYS] Awaiting uplink...");
        self.set_phase(Phase::Loading);
        if let Some(line) = self.boot.current() {
            self.registry.set_text(RegionId::BootLine, line);
        }
        if let Some(line) = self.doctrine.current() {
            self.registry.set_text(RegionId::DoctrineLine, line);
        }
        if let Some(tip) = self.doctrine.paired(COMMS_TIPS) {
            self.registry.set_text(RegionId::TipLine, tip);
        }
        self.refresh_progress();
    }

    fn seed_session_fields(&mut self) {
        let month = self.clock.now().month();
        let t = ambient_temperature(month, &mut *self.rng);
        self.registry.set_text(RegionId::TempExt, format_temperature(t));
        let code = transport_code(&mut *self.rng);
        self.registry.set_text(RegionId::TransportId, code);
    }

    fn set_signal_boot(&mut self) {
        if let Some(chip) = self.registry.get_mut(RegionId::SignalChip) {
            chip.set_text("SIGNAL: IMPERIAL CONTROL");
            chip.add_class(StyleClass::Alert);
            chip.remove_class(StyleClass::Ok);
        }
    }

    fn set_signal_locked(&mut self) {
        if let Some(chip) = self.registry.get_mut(RegionId::SignalChip) {
            chip.set_text("SIGNAL: LOCKED");
            chip.remove_class(StyleClass::Alert);
            chip.add_class(StyleClass::Ok);
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        self.registry.set_text(RegionId::Phase, phase.label());
        self.registry.set_text(RegionId::ProgressStatus, phase.label());
    }

    fn refresh_progress(&mut self) {
        if let Some(fill) = self.registry.get_mut(RegionId::ProgressFill) {
            fill.set_width_pct(self.progress.rounded_percent());
        }
        self.registry.set_text(RegionId::ProgressPct, self.progress.percent_label());
        self.registry.set_text(RegionId::ProgressFiles, self.progress.files_label());
    }

    fn refresh_audio_button(&mut self) {
        let label = self.audio.button_label();
        self.registry.set_text(RegionId::AudioButton, label);
    }

    fn refresh_cycle_date(&mut self) {
        let stamp = cycle_date(self.clock.now().date());
        self.registry.set_text(RegionId::CycleDate, stamp);
    }

    fn refresh_feed_clock(&mut self, kind: FeedKind) {
        let (_, _, clock) = kind.regions();
        let stamp = feed_clock(self.clock.now());
        self.registry.set_text(clock, stamp);
    }

    fn start_feed(&mut self, kind: FeedKind) {
        let (line, sub, clock) = kind.regions();
        if ![line, sub, clock].iter().all(|id| self.registry.is_bound(*id)) {
            log::debug!("{:?} feed has no regions bound; not started", kind);
            return;
        }
        let (pool, captions) = kind.pools();
        let feed = Feed::start(pool, captions, &mut *self.rng);
        match kind {
            FeedKind::Military => self.military = Some(feed),
            FeedKind::News => self.news = Some(feed),
        }
        self.push_feed(kind);
        self.scheduler.every(kind.interval(), Task::FeedTick(kind));
        self.scheduler.every(FEED_CLOCK_INTERVAL, Task::FeedClock(kind));
    }

    fn push_feed(&mut self, kind: FeedKind) {
        let feed = match kind {
            FeedKind::Military => self.military.as_mut(),
            FeedKind::News => self.news.as_mut(),
        };
        let Some(item) = feed.and_then(|f| f.next(&mut *self.rng)) else {
            return;
        };
        let (line, sub, _) = kind.regions();
        self.registry.set_text(line, item.line);
        self.registry.set_text(sub, item.caption);
        self.maybe_glitch(line, FEED_GLITCH_ODDS);
        self.refresh_feed_clock(kind);
    }

    fn maybe_glitch(&mut self, id: RegionId, one_in: u32) {
        if !roll(&mut *self.rng, one_in) {
            return;
        }
        let Some(region) = self.registry.get_mut(id) else {
            return;
        };
        if let Some(glitch) = glitch_text(region.text(), &mut *self.rng) {
            region.show_glitch(glitch.text);
            self.scheduler.after(glitch.duration, Task::RestoreGlitch(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use audio::AmbiencePlayer;
    use chrono::{NaiveDate, NaiveDateTime};
    use engine_core::{ScriptedRandom, SeededRandom};
    use std::cell::Cell;
    use std::rc::Rc;

    fn fixed_clock() -> Box<FixedClock> {
        let now = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        Box::new(FixedClock(now))
    }

    fn screen_with(hidden: &[RegionId], rng: Box<dyn RandomSource>) -> LoadingScreen {
        let mut s = LoadingScreen::new(
            UiRegistry::bind(hidden),
            AudioController::new(None),
            rng,
            fixed_clock(),
        );
        s.start();
        s
    }

    fn screen() -> LoadingScreen {
        screen_with(&[], Box::new(SeededRandom::new(2024)))
    }

    /// A clock the test can move.
    struct SharedClock(Rc<Cell<NaiveDateTime>>);

    impl WallClock for SharedClock {
        fn now(&self) -> NaiveDateTime {
            self.0.get()
        }
    }

    fn text(s: &LoadingScreen, id: RegionId) -> &str {
        s.registry().get(id).map(|r| r.text()).unwrap_or("<absent>")
    }

    #[test]
    fn three_downloads_against_ten_files() {
        let mut s = screen();
        s.set_files_needed(&HookValue::Int(10));
        for name in ["a.vtf", "b.mdl", "c.wav"] {
            s.downloading_file(&HookValue::from(name));
        }
        assert_eq!(s.progress().downloaded(), 3);
        assert_eq!(text(&s, RegionId::ProgressPct), "30%");
        assert_eq!(text(&s, RegionId::ProgressFiles), "3/10 files");
        assert_eq!(s.registry().progress_fill.as_ref().unwrap().width_pct(), 30.0);
        assert_eq!(text(&s, RegionId::Phase), "DOWNLOAD");
        assert_eq!(text(&s, RegionId::StatusText), "[DL] Downloading: c.wav");
    }

    #[test]
    fn half_percent_label_matches_bar() {
        let mut s = screen();
        s.set_files_needed(&HookValue::Int(8));
        s.downloading_file(&HookValue::from("a.vtf"));
        assert_eq!(text(&s, RegionId::ProgressPct), "13%");
        assert_eq!(s.registry().progress_fill.as_ref().unwrap().width_pct(), 13.0);
    }

    #[test]
    fn downloading_without_name_uses_fallback() {
        let mut s = screen();
        s.downloading_file(&HookValue::Null);
        assert_eq!(text(&s, RegionId::StatusText), "[DL] Downloading: resource");
        assert_eq!(text(&s, RegionId::ProgressPct), "2%");
    }

    #[test]
    fn displayed_percentage_never_regresses() {
        let mut s = screen();
        s.set_files_needed(&HookValue::Text("4".into()));
        s.set_files_downloaded(&HookValue::Int(3));
        s.set_files_downloaded(&HookValue::Int(1));
        assert_eq!(text(&s, RegionId::ProgressPct), "75%");
        assert_eq!(text(&s, RegionId::ProgressFiles), "1/4 files");
    }

    #[test]
    fn files_total_keeps_denominator_on_garbage() {
        let mut s = screen();
        s.set_files_total(&HookValue::Int(12));
        s.set_files_total(&HookValue::Text("n/a".into()));
        assert_eq!(s.progress().needed(), 12);
        s.set_files_needed(&HookValue::Text("n/a".into()));
        assert_eq!(s.progress().needed(), 0);
    }

    #[test]
    fn status_hook_sets_phase_and_line() {
        let mut s = screen();
        s.set_status_changed(&HookValue::from("retrieving SERVER info..."));
        assert_eq!(text(&s, RegionId::Phase), "SERVER INFO");
        assert_eq!(text(&s, RegionId::ProgressStatus), "SERVER INFO");

        s.set_status_changed(&HookValue::from("Starting Lua..."));
        assert_eq!(text(&s, RegionId::Phase), "LOADING");
        assert_eq!(text(&s, RegionId::StatusText), "[SYS] Starting Lua...");

        s.set_status_changed(&HookValue::Null);
        assert_eq!(text(&s, RegionId::StatusText), "[SYS] ");
    }

    #[test]
    fn game_details_fill_session_fields() {
        let mut s = screen();
        s.dispatch(HookCall::GameDetails {
            server_name: "Outer Rim RP".into(),
            server_url: "https://example.invalid".into(),
            map_name: "rp_tatooine-dune_sea".into(),
            max_players: HookValue::Int(64),
            steam_id: "76561197960287930".into(),
            game_mode: "starwarsrp".into(),
        });
        assert_eq!(text(&s, RegionId::ServerName), "OUTER RIM RP");
        assert_eq!(text(&s, RegionId::MapName), "RP TATOOINE DUNE SEA");
        assert_eq!(text(&s, RegionId::ModeName), "STARWARSRP");
        assert_eq!(text(&s, RegionId::PlayerId), "76561197960287930");
        assert_eq!(text(&s, RegionId::ImperialId), imperial_id("76561197960287930"));
        assert_eq!(text(&s, RegionId::ChannelEcho), "SECURE");
        assert_eq!(text(&s, RegionId::MaxPlayers), "64 SLOTS");
    }

    #[test]
    fn game_details_fall_back_on_missing_values() {
        let mut s = screen();
        s.dispatch(HookCall::from_positional("GameDetails", Vec::new()).unwrap());
        assert_eq!(text(&s, RegionId::ServerName), "SECURE-CHANNEL");
        assert_eq!(text(&s, RegionId::MapName), "UNKNOWN");
        assert_eq!(text(&s, RegionId::ModeName), "ACTIVE OPERATION");
        assert_eq!(text(&s, RegionId::PlayerId), "—");
        assert_eq!(text(&s, RegionId::ImperialId), imperial_id("0"));
        assert_eq!(text(&s, RegionId::MaxPlayers), "—");
    }

    #[test]
    fn signal_locks_after_delay() {
        let mut s = screen();
        let chip = s.registry().signal_chip.as_ref().unwrap();
        assert_eq!(chip.text(), "SIGNAL: IMPERIAL CONTROL");
        assert!(chip.has_class(StyleClass::Alert));

        s.update(Duration::from_millis(2_199));
        assert!(s.registry().signal_chip.as_ref().unwrap().has_class(StyleClass::Alert));

        s.update(SIGNAL_LOCK_DELAY);
        let chip = s.registry().signal_chip.as_ref().unwrap();
        assert_eq!(chip.text(), "SIGNAL: LOCKED");
        assert!(chip.has_class(StyleClass::Ok));
        assert!(!chip.has_class(StyleClass::Alert));
    }

    #[test]
    fn session_fields_are_seeded_once() {
        let s = screen();
        let temp = text(&s, RegionId::TempExt);
        assert!(temp.ends_with("°C"));
        let n: i32 = temp.trim_end_matches("°C").parse().unwrap();
        assert!((7..=19).contains(&n), "October range, got {}", n);
        assert!(text(&s, RegionId::TransportId).starts_with("TRN-"));
        assert_eq!(text(&s, RegionId::CycleDate), "CYC-43.1910.26");
    }

    #[test]
    fn boot_and_doctrine_rotate_on_their_intervals() {
        let mut s = screen();
        assert_eq!(text(&s, RegionId::BootLine), BOOT_LOG[0]);
        s.update(BOOT_INTERVAL);
        assert_eq!(text(&s, RegionId::BootLine), BOOT_LOG[1]);

        assert_eq!(text(&s, RegionId::DoctrineLine), DOCTRINE[0]);
        s.update(DOCTRINE_INTERVAL);
        assert_eq!(text(&s, RegionId::DoctrineLine), DOCTRINE[1]);
        assert_eq!(text(&s, RegionId::TipLine), COMMS_TIPS[1]);
    }

    #[test]
    fn feed_ticks_walk_the_shuffled_order() {
        let mut s = screen();
        let order: Vec<&str> = s.feed(FeedKind::Military).unwrap().order().to_vec();
        assert_eq!(text(&s, RegionId::MilLine), order[0]);
        assert_eq!(text(&s, RegionId::MilClock), "CYC CYC-43.1910.26 • 14:05");

        let period = FeedKind::Military.interval();
        for (i, expected) in order.iter().enumerate().skip(1) {
            s.update(period * i as u32);
            assert_eq!(text(&s, RegionId::MilLine), *expected);
            assert!(MILITARY_CAPTIONS.contains(&text(&s, RegionId::MilSub)));
        }
        // Wraps to the same permutation.
        s.update(period * order.len() as u32);
        assert_eq!(text(&s, RegionId::MilLine), order[0]);
    }

    #[test]
    fn feed_clock_refreshes_without_advancing_feed() {
        let now = Rc::new(Cell::new(fixed_clock().0));
        let mut s = LoadingScreen::new(
            UiRegistry::bind(&[]),
            AudioController::new(None),
            Box::new(SeededRandom::new(11)),
            Box::new(SharedClock(now.clone())),
        );
        s.start();

        // Seventh military tick lands at 26.6 s; the eighth is due at 30.4 s.
        s.update(FeedKind::Military.interval() * 7);
        let line = text(&s, RegionId::MilLine).to_string();
        let cursor = s.feed(FeedKind::Military).unwrap().cursor();
        assert_eq!(text(&s, RegionId::MilClock), "CYC CYC-43.1910.26 • 14:05");

        now.set(now.get() + chrono::Duration::minutes(1));
        s.update(FEED_CLOCK_INTERVAL);
        assert_eq!(text(&s, RegionId::MilClock), "CYC CYC-43.1910.26 • 14:06");
        assert_eq!(text(&s, RegionId::MilLine), line);
        assert_eq!(s.feed(FeedKind::Military).unwrap().cursor(), cursor);
    }

    #[test]
    fn doctrine_glitch_hits_tip_only() {
        let mut s = screen_with(&[], Box::new(ScriptedRandom::new(vec![0])));
        s.update(DOCTRINE_INTERVAL);
        let reg = s.registry();
        assert!(reg.tip_line.as_ref().unwrap().is_glitched());
        assert!(!reg.doctrine_line.as_ref().unwrap().is_glitched());
        assert_eq!(text(&s, RegionId::DoctrineLine), DOCTRINE[1]);
    }

    #[test]
    fn feed_without_all_regions_is_not_started() {
        let mut s = screen_with(&[RegionId::NewsClock], Box::new(SeededRandom::new(1)));
        assert!(s.feed(FeedKind::News).is_none());
        assert!(s.feed(FeedKind::Military).is_some());
        assert_eq!(text(&s, RegionId::NewsLine), "");
        s.update(Duration::from_secs(60));
        assert_eq!(text(&s, RegionId::NewsLine), "");
    }

    #[test]
    fn every_region_absent_is_harmless() {
        let mut s = screen_with(RegionId::ALL, Box::new(SeededRandom::new(3)));
        s.dispatch(HookCall::parse_line(r#"["GameDetails","a","b","c",1,"2","d"]"#).unwrap());
        s.set_status_changed(&HookValue::from("Mounting"));
        s.set_files_needed(&HookValue::Int(5));
        s.downloading_file(&HookValue::from("x"));
        s.toggle_audio();
        s.background_loaded(true);
        s.update(Duration::from_secs(120));
        assert_eq!(s.progress().downloaded(), 1);
        assert!(s.registry().get(RegionId::Phase).is_none());
    }

    #[test]
    fn glitch_shows_then_restores() {
        // All draws zero: every roll hits, glitch covers two characters for 90 ms.
        let mut s = screen_with(&[], Box::new(ScriptedRandom::new(vec![0])));
        let boot = s.registry().boot_line.as_ref().unwrap();
        assert!(!boot.is_glitched());

        s.update(BOOT_INTERVAL);
        let boot = s.registry().boot_line.as_ref().unwrap();
        assert!(boot.is_glitched());
        assert_eq!(boot.text(), BOOT_LOG[1]);
        assert!(boot.displayed().starts_with("██"));

        s.update(BOOT_INTERVAL + Duration::from_millis(90));
        let boot = s.registry().boot_line.as_ref().unwrap();
        assert!(!boot.is_glitched());
        assert_eq!(boot.displayed(), BOOT_LOG[1]);
    }

    #[test]
    fn background_reveals_only_on_success() {
        let mut s = screen();
        s.background_loaded(false);
        assert!(!s.registry().background.as_ref().unwrap().has_class(StyleClass::Ready));
        s.background_loaded(true);
        assert!(s.registry().background.as_ref().unwrap().has_class(StyleClass::Ready));
    }

    struct RefusingPlayer(Rc<Cell<u32>>);

    impl AmbiencePlayer for RefusingPlayer {
        fn play(&mut self) -> anyhow::Result<()> {
            self.0.set(self.0.get() + 1);
            anyhow::bail!("autoplay blocked")
        }
        fn pause(&mut self) {}
        fn is_paused(&self) -> bool {
            true
        }
        fn set_volume(&mut self, _volume: f64) {}
    }

    #[test]
    fn rejected_autoplay_retries_once_after_delay() {
        let attempts = Rc::new(Cell::new(0));
        let audio = AudioController::new(Some(Box::new(RefusingPlayer(attempts.clone()))));
        let mut s = LoadingScreen::new(
            UiRegistry::bind(&[]),
            audio,
            Box::new(SeededRandom::new(4)),
            fixed_clock(),
        );
        s.start();
        assert_eq!(attempts.get(), 1);
        assert_eq!(text(&s, RegionId::AudioButton), "AUDIO: ON");

        s.update(audio::RETRY_DELAY - Duration::from_millis(1));
        assert_eq!(attempts.get(), 1);
        s.update(audio::RETRY_DELAY);
        assert_eq!(attempts.get(), 2);
        s.update(Duration::from_secs(600));
        assert_eq!(attempts.get(), 2);
        assert_eq!(text(&s, RegionId::AudioButton), "AUDIO: ON");
    }

    #[test]
    fn toggle_updates_button_label() {
        let attempts = Rc::new(Cell::new(0));
        let audio = AudioController::new(Some(Box::new(RefusingPlayer(attempts.clone()))));
        let mut s = LoadingScreen::new(
            UiRegistry::bind(&[]),
            audio,
            Box::new(SeededRandom::new(4)),
            fixed_clock(),
        );
        s.start();
        s.toggle_audio();
        assert_eq!(text(&s, RegionId::AudioButton), "AUDIO: OFF");
        assert!(!s.audio().wanted());
        s.toggle_audio();
        assert_eq!(text(&s, RegionId::AudioButton), "AUDIO: ON");
        assert_eq!(attempts.get(), 2);
    }
}

//! Download progress: file counters and a percentage that only moves forward.

/// Points added per file when the host never announced a total.
const FALLBACK_STEP: f64 = 2.0;
/// The fallback never claims completion.
const FALLBACK_CAP: f64 = 95.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressTracker {
    needed: u64,
    downloaded: u64,
    last_shown: f64,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn needed(&self) -> u64 {
        self.needed
    }

    pub fn downloaded(&self) -> u64 {
        self.downloaded
    }

    /// Last percentage shown, 0–100.
    pub fn percent(&self) -> f64 {
        self.last_shown
    }

    /// Offer a new percentage. Values below the last shown one are dropped.
    /// Returns whether the display changed.
    pub fn set_progress(&mut self, pct: f64) -> bool {
        if pct.is_nan() {
            return false;
        }
        let pct = pct.clamp(0.0, 100.0);
        if pct < self.last_shown {
            return false;
        }
        self.last_shown = pct;
        true
    }

    pub fn set_needed(&mut self, needed: u64) {
        self.needed = needed;
    }

    /// Like [`set_needed`](Self::set_needed) but a zero total keeps the
    /// previous denominator.
    pub fn set_total(&mut self, total: u64) {
        if total > 0 {
            self.needed = total;
        }
    }

    /// Set the numerator; the percentage follows when a total is known.
    pub fn set_downloaded(&mut self, downloaded: u64) {
        self.downloaded = downloaded;
        if self.needed > 0 {
            self.set_progress(self.ratio_percent());
        }
    }

    /// One more file started downloading. Without a known total the bar is
    /// nudged forward instead.
    pub fn file_started(&mut self) {
        if self.needed > 0 {
            self.downloaded = (self.downloaded + 1).min(self.needed);
            self.set_progress(self.ratio_percent());
        } else {
            self.set_progress((self.last_shown + FALLBACK_STEP).min(FALLBACK_CAP));
        }
    }

    fn ratio_percent(&self) -> f64 {
        self.downloaded as f64 / self.needed as f64 * 100.0
    }

    /// Whole percentage for display, halves rounded up. The label and the
    /// bar width both use this.
    pub fn rounded_percent(&self) -> f64 {
        self.last_shown.round()
    }

    /// `"75%"`.
    pub fn percent_label(&self) -> String {
        format!("{}%", self.rounded_percent())
    }

    /// `"3/10 files"`.
    pub fn files_label(&self) -> String {
        format!("{}/{} files", self.downloaded, self.needed)
    }
}

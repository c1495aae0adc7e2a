//! Named display regions, bound once at startup.
//!
//! Each region is optional. Whoever updates the screen goes through
//! [`UiRegistry::get_mut`] or one of the setters and silently does nothing
//! when the region was not bound.

use serde::{Deserialize, Serialize};

/// Visual state flags a renderer can key styling off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleClass {
    Alert,
    Ok,
    Ready,
}

/// One display region: text, a transient glitch overlay, style classes and,
/// for bars, a fill width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Region {
    text: String,
    glitch: Option<String>,
    classes: Vec<StyleClass>,
    width_pct: f64,
}

impl Region {
    /// The underlying text, ignoring any glitch.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// What should be drawn right now.
    pub fn displayed(&self) -> &str {
        self.glitch.as_deref().unwrap_or(&self.text)
    }

    pub fn is_glitched(&self) -> bool {
        self.glitch.is_some()
    }

    /// Replace the text; a pending glitch is discarded.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.glitch = None;
    }

    pub fn show_glitch(&mut self, text: String) {
        self.glitch = Some(text);
    }

    pub fn clear_glitch(&mut self) {
        self.glitch = None;
    }

    pub fn add_class(&mut self, class: StyleClass) {
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
    }

    pub fn remove_class(&mut self, class: StyleClass) {
        self.classes.retain(|c| *c != class);
    }

    pub fn has_class(&self, class: StyleClass) -> bool {
        self.classes.contains(&class)
    }

    pub fn width_pct(&self) -> f64 {
        self.width_pct
    }

    pub fn set_width_pct(&mut self, pct: f64) {
        self.width_pct = pct.clamp(0.0, 100.0);
    }
}

macro_rules! regions {
    ($($field:ident => $id:ident),+ $(,)?) => {
        /// Every region the screen knows about.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum RegionId {
            $($id),+
        }

        impl RegionId {
            pub const ALL: &'static [RegionId] = &[$(RegionId::$id),+];
        }

        /// Typed registry of display regions. `None` means the region is not
        /// part of this layout.
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct UiRegistry {
            $(pub $field: Option<Region>),+
        }

        impl UiRegistry {
            /// Bind every region except the `hidden` ones.
            pub fn bind(hidden: &[RegionId]) -> Self {
                Self {
                    $($field: (!hidden.contains(&RegionId::$id)).then(Region::default)),+
                }
            }

            pub fn get(&self, id: RegionId) -> Option<&Region> {
                match id {
                    $(RegionId::$id => self.$field.as_ref()),+
                }
            }

            pub fn get_mut(&mut self, id: RegionId) -> Option<&mut Region> {
                match id {
                    $(RegionId::$id => self.$field.as_mut()),+
                }
            }
        }
    };
}

regions! {
    background => Background,
    server_name => ServerName,
    map_name => MapName,
    mode_name => ModeName,
    signal_chip => SignalChip,
    status_text => StatusText,
    boot_line => BootLine,
    progress_fill => ProgressFill,
    progress_pct => ProgressPct,
    progress_files => ProgressFiles,
    progress_status => ProgressStatus,
    phase => Phase,
    player_id => PlayerId,
    channel_echo => ChannelEcho,
    cycle_date => CycleDate,
    temp_ext => TempExt,
    transport_id => TransportId,
    imperial_id => ImperialId,
    max_players => MaxPlayers,
    doctrine_line => DoctrineLine,
    tip_line => TipLine,
    mil_clock => MilClock,
    mil_line => MilLine,
    mil_sub => MilSub,
    news_clock => NewsClock,
    news_line => NewsLine,
    news_sub => NewsSub,
    audio_button => AudioButton,
}

impl UiRegistry {
    pub fn is_bound(&self, id: RegionId) -> bool {
        self.get(id).is_some()
    }

    /// Set a region's text if it is bound. Returns whether it was.
    pub fn set_text(&mut self, id: RegionId, text: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(region) => {
                region.set_text(text);
                true
            }
            None => false,
        }
    }

    /// Displayed text of a bound region.
    pub fn text(&self, id: RegionId) -> Option<&str> {
        self.get(id).map(Region::displayed)
    }
}

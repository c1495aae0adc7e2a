//! The host-facing hook surface: loosely typed arguments, the six named
//! calls, and parsing of bridge lines.
//!
//! The host's call discipline is not guaranteed, so every argument may be
//! missing, null, or of the wrong type. Coercion never fails; it falls back.

use thiserror::Error;

/// A positional argument as the host passed it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HookValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl HookValue {
    /// Truthiness used for label fallbacks: non-empty text, non-zero
    /// numbers and `true` count as present.
    pub fn is_present(&self) -> bool {
        match self {
            HookValue::Null => false,
            HookValue::Bool(b) => *b,
            HookValue::Int(i) => *i != 0,
            HookValue::Float(f) => *f != 0.0 && !f.is_nan(),
            HookValue::Text(s) => !s.is_empty(),
        }
    }

    /// Text rendition of a present value.
    pub fn as_text(&self) -> Option<String> {
        if !self.is_present() {
            return None;
        }
        Some(match self {
            HookValue::Null => return None,
            HookValue::Bool(b) => b.to_string(),
            HookValue::Int(i) => i.to_string(),
            HookValue::Float(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
            HookValue::Float(f) => f.to_string(),
            HookValue::Text(s) => s.clone(),
        })
    }

    /// Numeric value, or `None` when the argument is not a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            HookValue::Null => Some(0.0),
            HookValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            HookValue::Int(i) => Some(*i as f64),
            HookValue::Float(f) if f.is_finite() => Some(*f),
            HookValue::Float(_) => None,
            HookValue::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    Some(0.0)
                } else {
                    s.parse::<f64>().ok().filter(|f| f.is_finite())
                }
            }
        }
    }

    /// File count: non-numeric, negative or absent values become 0,
    /// fractions are truncated.
    pub fn as_count(&self) -> u64 {
        match self.as_number() {
            Some(n) if n > 0.0 => n.trunc() as u64,
            _ => 0,
        }
    }
}

impl From<serde_json::Value> for HookValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => HookValue::Null,
            Value::Bool(b) => HookValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => HookValue::Int(i),
                None => n.as_f64().map(HookValue::Float).unwrap_or_default(),
            },
            Value::String(s) => HookValue::Text(s),
            other => HookValue::Text(other.to_string()),
        }
    }
}

impl From<&str> for HookValue {
    fn from(s: &str) -> Self {
        HookValue::Text(s.to_string())
    }
}

impl From<i64> for HookValue {
    fn from(i: i64) -> Self {
        HookValue::Int(i)
    }
}

/// One call of the hook surface, named as the host names it.
#[derive(Debug, Clone, PartialEq)]
pub enum HookCall {
    GameDetails {
        server_name: HookValue,
        server_url: HookValue,
        map_name: HookValue,
        max_players: HookValue,
        steam_id: HookValue,
        game_mode: HookValue,
    },
    SetStatusChanged(HookValue),
    SetFilesNeeded(HookValue),
    SetFilesTotal(HookValue),
    SetFilesDownloaded(HookValue),
    DownloadingFile(HookValue),
}

#[derive(Debug, Error)]
pub enum HostLineError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array whose first element is a hook name")]
    NotACall,
    #[error("unknown hook `{0}`")]
    UnknownHook(String),
}

impl HookCall {
    pub const NAMES: &'static [&'static str] = &[
        "GameDetails",
        "SetStatusChanged",
        "SetFilesNeeded",
        "SetFilesTotal",
        "SetFilesDownloaded",
        "DownloadingFile",
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HookCall::GameDetails { .. } => "GameDetails",
            HookCall::SetStatusChanged(_) => "SetStatusChanged",
            HookCall::SetFilesNeeded(_) => "SetFilesNeeded",
            HookCall::SetFilesTotal(_) => "SetFilesTotal",
            HookCall::SetFilesDownloaded(_) => "SetFilesDownloaded",
            HookCall::DownloadingFile(_) => "DownloadingFile",
        }
    }

    /// Build a call from its name and positional arguments. Missing
    /// arguments are null; extra ones are ignored.
    pub fn from_positional(name: &str, args: Vec<HookValue>) -> Result<Self, HostLineError> {
        let mut args = args.into_iter();
        let mut next = || args.next().unwrap_or_default();
        let call = match name {
            "GameDetails" => HookCall::GameDetails {
                server_name: next(),
                server_url: next(),
                map_name: next(),
                max_players: next(),
                steam_id: next(),
                game_mode: next(),
            },
            "SetStatusChanged" => HookCall::SetStatusChanged(next()),
            "SetFilesNeeded" => HookCall::SetFilesNeeded(next()),
            "SetFilesTotal" => HookCall::SetFilesTotal(next()),
            "SetFilesDownloaded" => HookCall::SetFilesDownloaded(next()),
            "DownloadingFile" => HookCall::DownloadingFile(next()),
            other => return Err(HostLineError::UnknownHook(other.to_string())),
        };
        Ok(call)
    }

    /// Parse a bridge line: `["HookName", arg0, arg1, ...]`.
    pub fn parse_line(line: &str) -> Result<Self, HostLineError> {
        let value: serde_json::Value = serde_json::from_str(line.trim())?;
        let serde_json::Value::Array(items) = value else {
            return Err(HostLineError::NotACall);
        };
        let mut items = items.into_iter();
        let name = match items.next() {
            Some(serde_json::Value::String(name)) => name,
            _ => return Err(HostLineError::NotACall),
        };
        Self::from_positional(&name, items.map(HookValue::from).collect())
    }
}

/// Coarse loading stage shown in the phase labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ClientInfo,
    ServerInfo,
    Workshop,
    Mount,
    Download,
    Loading,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::ClientInfo => "CLIENT INFO",
            Phase::ServerInfo => "SERVER INFO",
            Phase::Workshop => "WORKSHOP",
            Phase::Mount => "MOUNT",
            Phase::Download => "DOWNLOAD",
            Phase::Loading => "LOADING",
        }
    }
}

/// Known status fragments, matched case-insensitively in order.
const STATUS_PHASES: &[(&str, Phase, &str)] = &[
    ("sending client info", Phase::ClientInfo, "[SYS] Sending identification data..."),
    ("retrieving server info", Phase::ServerInfo, "[SYS] Retrieving link data..."),
    ("workshop", Phase::Workshop, "[DL] Synchronising resources..."),
    ("mounting", Phase::Mount, "[SYS] Mounting modules..."),
];

/// Phase and status line for a raw host status string.
pub fn classify_status(status: &str) -> (Phase, String) {
    let low = status.to_lowercase();
    STATUS_PHASES
        .iter()
        .find(|(needle, _, _)| low.contains(needle))
        .map(|(_, phase, line)| (*phase, line.to_string()))
        .unwrap_or_else(|| (Phase::Loading, format!("[SYS] {}", status)))
}

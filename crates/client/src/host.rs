//! Host bridges: threads that turn host input into hook calls and forward
//! them to the event loop.

use std::io::BufRead;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use loadscreen::HookCall;
use winit::event_loop::EventLoopProxy;

use crate::config::HostSource;
use crate::events::UserEvent;

/// Replay of a typical connection: delay before each line, then the line.
const DEMO_SCRIPT: &[(u64, &str)] = &[
    (400, r#"["GameDetails", "Imperial Remnant | Outer Rim RP", "https://example.invalid/load", "rp_tatooine_dune_sea", 64, "76561197960287930", "starwarsrp"]"#),
    (700, r#"["SetStatusChanged", "Sending client info..."]"#),
    (900, r#"["SetStatusChanged", "Retrieving server info..."]"#),
    (800, r#"["SetFilesNeeded", 8]"#),
    (300, r#"["SetStatusChanged", "Downloading Workshop addon 1/3"]"#),
    (600, r#"["DownloadingFile", "materials/imperial/floor_grate.vtf"]"#),
    (700, r#"["DownloadingFile", "models/stormtrooper/e11.mdl"]"#),
    (500, r#"["DownloadingFile", "sound/imperial/march_loop.wav"]"#),
    (900, r#"["DownloadingFile", "materials/hud/isb_badge.png"]"#),
    (600, r#"["DownloadingFile", "maps/rp_tatooine_dune_sea.bsp"]"#),
    (1200, r#"["DownloadingFile", "resource/fonts/aurebesh.ttf"]"#),
    (500, r#"["DownloadingFile", "lua/autorun/client/cl_holonet.lua"]"#),
    (700, r#"["DownloadingFile", null]"#),
    (400, r#"["SetFilesDownloaded", 8]"#),
    (900, r#"["SetStatusChanged", "Mounting Addons"]"#),
    (1500, r#"["SetStatusChanged", "Starting Lua..."]"#),
    (2000, r#"["SetStatusChanged", "Client initialised, joining..."]"#),
];

/// Start the bridge for `source` on its own thread.
pub fn spawn(source: HostSource, proxy: EventLoopProxy<UserEvent>) -> std::io::Result<JoinHandle<()>> {
    log::info!("Host bridge: {:?}", source);
    thread::Builder::new()
        .name("host-bridge".into())
        .spawn(move || {
            let send = |call: HookCall| proxy.send_event(UserEvent::Hook(call)).is_ok();
            let forwarded = match source {
                HostSource::Stdin => forward_lines(std::io::stdin().lock(), send),
                HostSource::Demo => replay(demo_calls(), thread::sleep, send),
            };
            log::info!("Host bridge finished after {} calls", forwarded);
            let _ = proxy.send_event(UserEvent::HostClosed);
        })
}

/// Parse one bridge line. Blank lines and bad input are dropped.
pub fn parse_line(line: &str) -> Option<HookCall> {
    if line.trim().is_empty() {
        return None;
    }
    match HookCall::parse_line(line) {
        Ok(call) => Some(call),
        Err(e) => {
            log::debug!("Dropped host line {:?}: {}", line, e);
            None
        }
    }
}

/// Forward every parsable line until input ends or `send` refuses.
/// Returns the number of calls forwarded.
pub fn forward_lines<R: BufRead>(reader: R, mut send: impl FnMut(HookCall) -> bool) -> usize {
    let mut forwarded = 0;
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::debug!("Host input closed: {}", e);
                break;
            }
        };
        if let Some(call) = parse_line(&line) {
            if !send(call) {
                break;
            }
            forwarded += 1;
        }
    }
    forwarded
}

pub fn demo_calls() -> Vec<(Duration, HookCall)> {
    DEMO_SCRIPT
        .iter()
        .filter_map(|(delay, line)| parse_line(line).map(|call| (Duration::from_millis(*delay), call)))
        .collect()
}

/// Send each call after its delay.
pub fn replay(
    calls: Vec<(Duration, HookCall)>,
    mut sleep: impl FnMut(Duration),
    mut send: impl FnMut(HookCall) -> bool,
) -> usize {
    let mut forwarded = 0;
    for (delay, call) in calls {
        sleep(delay);
        if !send(call) {
            break;
        }
        forwarded += 1;
    }
    forwarded
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadscreen::HookValue;
    use std::io::Cursor;

    #[test]
    fn every_demo_line_parses() {
        assert_eq!(demo_calls().len(), DEMO_SCRIPT.len());
        let names: Vec<_> = demo_calls().iter().map(|(_, c)| c.name()).collect();
        assert_eq!(names[0], "GameDetails");
        assert!(names.contains(&"DownloadingFile"));
    }

    #[test]
    fn stdin_lines_skip_garbage() {
        let input = concat!(
            "[\"SetFilesNeeded\", 10]\n",
            "\n",
            "not json\n",
            "[\"Unknown\", 1]\n",
            "{\"SetFilesNeeded\": 3}\n",
            "[\"DownloadingFile\", \"maps/x.bsp\"]\n",
        );
        let mut got = Vec::new();
        let n = forward_lines(Cursor::new(input), |c| {
            got.push(c);
            true
        });
        assert_eq!(n, 2);
        assert_eq!(got[0], HookCall::SetFilesNeeded(HookValue::Int(10)));
        assert_eq!(got[1], HookCall::DownloadingFile(HookValue::from("maps/x.bsp")));
    }

    #[test]
    fn forwarding_stops_when_receiver_is_gone() {
        let input = "[\"SetFilesNeeded\", 1]\n[\"SetFilesNeeded\", 2]\n";
        let n = forward_lines(Cursor::new(input), |_| false);
        assert_eq!(n, 0);
    }

    #[test]
    fn replay_sleeps_before_each_call() {
        let mut slept = Vec::new();
        let mut sent = 0;
        let n = replay(
            demo_calls().into_iter().take(3).collect(),
            |d| slept.push(d),
            |_| {
                sent += 1;
                true
            },
        );
        assert_eq!(n, 3);
        assert_eq!(sent, 3);
        assert_eq!(slept[0], Duration::from_millis(400));
        assert_eq!(slept.len(), 3);
    }
}

//! Overlay layout: places every bound region on screen.

use input::Rect;
use loadscreen::{RegionId, StyleClass, UiRegistry};
use renderer::{fit_text, OverlayTextBuilder, GLYPH_PX_W};

const WHITE: [f32; 4] = [0.92, 0.93, 0.95, 1.0];
const GREY: [f32; 4] = [0.62, 0.65, 0.7, 1.0];
const DIM: [f32; 4] = [0.42, 0.45, 0.5, 1.0];
const RED: [f32; 4] = [0.86, 0.16, 0.13, 1.0];
const GREEN: [f32; 4] = [0.35, 0.9, 0.45, 1.0];
const AMBER: [f32; 4] = [1.0, 0.67, 0.0, 1.0];
const PANEL: [f32; 4] = [0.02, 0.03, 0.04, 0.62];
const FRAME: [f32; 4] = [0.55, 0.58, 0.62, 0.45];
const BAR_BG: [f32; 4] = [0.1, 0.11, 0.13, 0.9];

/// Built overlay geometry plus the hit boxes input needs.
pub struct Overlay {
    pub builder: OverlayTextBuilder,
    pub audio_button: Option<Rect>,
}

/// Text scale for a screen height; 720p draws 12x16 glyph cells.
pub fn ui_scale(sh: f32) -> f32 {
    (sh / 360.0).clamp(1.0, 4.0).floor()
}

/// Greedy word wrap to `max_chars` per line, at most `max_lines` lines.
pub fn wrap_text(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let len = current.chars().count();
        let word_len = word.chars().count();
        if len > 0 && len + 1 + word_len > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.len() > max_lines {
        let rest = lines.split_off(max_lines.saturating_sub(1));
        lines.push(rest.join(" "));
    }
    let max_w = max_chars as f32 * GLYPH_PX_W;
    lines.into_iter().map(|l| fit_text(&l, max_w, 1.0)).collect()
}

fn chip_color(reg: &UiRegistry, id: RegionId) -> [f32; 4] {
    match reg.get(id) {
        Some(r) if r.has_class(StyleClass::Ok) => GREEN,
        Some(r) if r.has_class(StyleClass::Alert) => RED,
        _ => GREY,
    }
}

fn any_bound(reg: &UiRegistry, ids: &[RegionId]) -> bool {
    ids.iter().any(|id| reg.is_bound(*id))
}

pub fn build(reg: &UiRegistry, sw: f32, sh: f32) -> Overlay {
    let mut tb = OverlayTextBuilder::new(sw, sh);
    let s = ui_scale(sh);
    let small = (s * 0.5).max(1.0);
    let pad = 10.0 * s;
    let lh = OverlayTextBuilder::line_height(s) + 4.0 * s;
    let small_lh = OverlayTextBuilder::line_height(small) + 3.0 * s;
    let chars_in = |w: f32, scale: f32| ((w / (GLYPH_PX_W * scale)).floor().max(0.0)) as usize;

    // ---- Top band: server, signal, session headline ----
    let top_h = pad * 2.0 + small_lh + lh * 2.0;
    tb.add_rect(0.0, 0.0, sw, top_h, PANEL);
    tb.add_rect(0.0, top_h - s, sw, s, RED);
    let mut y = pad;
    tb.add_text(pad, y, "IMPERIAL UPLINK // GALACTIC EMPIRE", small, DIM);

    if let Some(chip) = reg.text(RegionId::SignalChip) {
        let w = OverlayTextBuilder::text_width(chip, small) + 4.0 * small;
        tb.add_text_with_bg(sw - pad - w, y, chip, small, chip_color(reg, RegionId::SignalChip), PANEL);
    }
    y += small_lh;

    if let Some(server) = reg.text(RegionId::ServerName) {
        let line = fit_text(server, sw - pad * 2.0, s * 1.5);
        tb.add_text(pad, y, &line, s * 1.5, WHITE);
    }
    y += lh;

    let mut x = pad;
    for (label, id) in [
        ("PLANET ", RegionId::MapName),
        ("OPERATION ", RegionId::ModeName),
        ("CAPACITY ", RegionId::MaxPlayers),
    ] {
        if let Some(value) = reg.text(id) {
            tb.add_text(x, y + 4.0 * s, label, small, DIM);
            x += OverlayTextBuilder::text_width(label, small);
            tb.add_text(x, y, value, s, AMBER);
            x += OverlayTextBuilder::text_width(value, s) + pad * 2.0;
        }
    }

    // ---- Left panel: session dossier ----
    let panel_y = top_h + pad;
    let left_w = sw * 0.36;
    let dossier = [
        ("OPERATOR", RegionId::PlayerId),
        ("ISB TAG", RegionId::ImperialId),
        ("CHANNEL", RegionId::ChannelEcho),
        ("CYCLE", RegionId::CycleDate),
        ("EXT TEMP", RegionId::TempExt),
        ("TRANSPORT", RegionId::TransportId),
    ];
    let mut left_bottom = panel_y;
    if any_bound(reg, &dossier.map(|(_, id)| id)) {
        let rows = dossier.iter().filter(|(_, id)| reg.is_bound(*id)).count() as f32;
        let h = pad * 2.0 + small_lh + rows * lh;
        tb.add_rect(pad, panel_y, left_w, h, PANEL);
        tb.add_frame(pad, panel_y, left_w, h, s, FRAME);
        let mut ry = panel_y + pad;
        tb.add_text(pad * 2.0, ry, "DOSSIER", small, RED);
        ry += small_lh;
        let value_x = pad * 2.0 + GLYPH_PX_W * small * 11.0;
        let value_chars = chars_in(left_w - (value_x - pad) - pad, s);
        for (label, id) in dossier {
            if let Some(value) = reg.text(id) {
                tb.add_text(pad * 2.0, ry + 4.0 * s, label, small, DIM);
                let v = fit_text(value, value_chars as f32 * GLYPH_PX_W * s, s);
                tb.add_text(value_x, ry, &v, s, WHITE);
                ry += lh;
            }
        }
        left_bottom = panel_y + h;
    }

    if let Some(boot) = reg.text(RegionId::BootLine) {
        let line = format!("> {}", boot);
        let line = fit_text(&line, left_w, small);
        tb.add_text(pad, left_bottom + pad, &line, small, GREEN);
    }

    // ---- Right panel: doctrine and comms tip ----
    let right_x = sw * 0.36 + pad * 2.0;
    let right_w = sw - right_x - pad;
    if any_bound(reg, &[RegionId::DoctrineLine, RegionId::TipLine]) {
        let wrap = chars_in(right_w - pad * 2.0, s).max(8);
        let doctrine = reg
            .text(RegionId::DoctrineLine)
            .map(|t| wrap_text(t, wrap, 3))
            .unwrap_or_default();
        let tip = reg
            .text(RegionId::TipLine)
            .map(|t| wrap_text(t, wrap, 2))
            .unwrap_or_default();
        let h = pad * 3.0 + small_lh * 2.0 + (doctrine.len() + tip.len()) as f32 * lh;
        tb.add_rect(right_x, panel_y, right_w, h, PANEL);
        tb.add_frame(right_x, panel_y, right_w, h, s, FRAME);
        let mut ry = panel_y + pad;
        for (header, lines, color) in [("DOCTRINE", &doctrine, WHITE), ("COMMS", &tip, GREY)] {
            tb.add_text(right_x + pad, ry, header, small, RED);
            ry += small_lh;
            for line in lines {
                tb.add_text(right_x + pad, ry, line, s, color);
                ry += lh;
            }
            ry += pad;
        }
    }

    // ---- Bottom band: tickers, status, progress, audio ----
    let bottom_h = pad * 2.0 + small_lh * 2.0 + lh * 2.0;
    let ticker_h = lh + small_lh + pad;
    let bottom_y = sh - bottom_h;
    let mut ty = bottom_y - ticker_h * 2.0 - pad;
    for (tag, clock, line, sub) in [
        ("IMPERIAL MILITARY NET", RegionId::MilClock, RegionId::MilLine, RegionId::MilSub),
        ("HOLONET NEWS", RegionId::NewsClock, RegionId::NewsLine, RegionId::NewsSub),
    ] {
        if any_bound(reg, &[clock, line, sub]) {
            tb.add_rect(0.0, ty, sw, ticker_h - s, PANEL);
            let mut tx = pad;
            tb.add_text(tx, ty + s, tag, small, RED);
            tx += OverlayTextBuilder::text_width(tag, small) + pad;
            if let Some(c) = reg.text(clock) {
                tb.add_text(tx, ty + s, c, small, DIM);
            }
            if let Some(l) = reg.text(line) {
                let l = fit_text(l, sw - pad * 2.0, s);
                tb.add_text(pad, ty + small_lh, &l, s, WHITE);
            }
            if let Some(c) = reg.text(sub) {
                tb.add_text(pad, ty + small_lh + lh, c, small, GREY);
            }
        }
        ty += ticker_h;
    }

    tb.add_rect(0.0, bottom_y, sw, bottom_h, PANEL);
    tb.add_rect(0.0, bottom_y, sw, s, RED);
    let mut by = bottom_y + pad;
    let mut bx = pad;
    if let Some(phase) = reg.text(RegionId::Phase) {
        tb.add_text_with_bg(bx, by, phase, small, [0.0, 0.0, 0.0, 1.0], AMBER);
        bx += OverlayTextBuilder::text_width(phase, small) + 4.0 * small + pad;
    }
    if let Some(status) = reg.text(RegionId::StatusText) {
        let st = fit_text(status, sw - bx - pad, small);
        tb.add_text(bx, by + small, &st, small, GREY);
    }
    by += small_lh + s;

    // Bar and percentage.
    let pct_w = OverlayTextBuilder::text_width("100%", s) + pad;
    let bar_w = sw - pad * 2.0 - pct_w;
    let bar_h = lh * 0.75;
    if reg.is_bound(RegionId::ProgressFill) {
        tb.add_rect(pad, by, bar_w, bar_h, BAR_BG);
        if let Some(fill) = reg.get(RegionId::ProgressFill) {
            let w = bar_w * (fill.width_pct() as f32 / 100.0);
            tb.add_rect(pad, by, w, bar_h, RED);
        }
        tb.add_frame(pad, by, bar_w, bar_h, s, FRAME);
    }
    if let Some(pct) = reg.text(RegionId::ProgressPct) {
        let w = OverlayTextBuilder::text_width(pct, s);
        tb.add_text(sw - pad - w, by + (bar_h - 8.0 * s) * 0.5, pct, s, WHITE);
    }
    by += bar_h + pad * 0.5;

    if let Some(files) = reg.text(RegionId::ProgressFiles) {
        tb.add_text(pad, by, files, small, GREY);
    }
    if let Some(stage) = reg.text(RegionId::ProgressStatus) {
        let w = OverlayTextBuilder::text_width(stage, small);
        tb.add_text((sw - w) * 0.5, by, stage, small, DIM);
    }

    let mut audio_button = None;
    if let Some(label) = reg.text(RegionId::AudioButton) {
        let w = OverlayTextBuilder::text_width(label, small) + 4.0 * small;
        let x = sw - pad - w;
        let h = tb.add_text_with_bg(x, by - 2.0 * small, label, small, WHITE, [0.2, 0.05, 0.05, 0.9]);
        tb.add_frame(x, by - 2.0 * small, w, h, 1.0, RED);
        audio_button = Some(Rect::new(x, by - 2.0 * small, w, h));
    }

    Overlay {
        builder: tb,
        audio_button,
    }
}

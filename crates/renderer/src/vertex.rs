//! Screen-space overlay geometry: solid quads and bitmap-font text.

use bytemuck::{Pod, Zeroable};

/// One corner of an overlay quad.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct OverlayVertex {
    /// NDC position, -1..1.
    pub position: [f32; 2],
    /// Font atlas UV. A negative `x` marks a solid quad.
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

impl OverlayVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32x4];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<OverlayVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Atlas: 16 columns x 6 rows of 6x8 glyph cells covering ASCII 32..127.
const FONT_COLS: u32 = 16;
const FONT_ROWS: u32 = 6;
pub const GLYPH_PX_W: f32 = 6.0;
pub const GLYPH_PX_H: f32 = 8.0;

const SOLID_UV: [f32; 2] = [-1.0, -1.0];

/// How a character is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Glyph {
    /// Atlas cell for a printable ASCII code.
    Ascii(u8),
    /// Full-cell block at the given coverage (block shade characters).
    Shade(f32),
    /// Small centred square, for bullets.
    Dot,
    /// Small raised square, for the degree sign.
    Degree,
    Blank,
}

/// Map any character onto something the 6x8 font can draw. Accented Latin
/// letters lose their accent, dashes become `-`, unknown symbols become `?`.
pub fn glyph_for(ch: char) -> Glyph {
    match ch {
        ' '..='~' => Glyph::Ascii(ch as u8),
        '█' => Glyph::Shade(1.0),
        '▓' => Glyph::Shade(0.75),
        '▒' => Glyph::Shade(0.5),
        '░' => Glyph::Shade(0.25),
        '•' | '·' => Glyph::Dot,
        '°' => Glyph::Degree,
        '—' | '–' | '‐' | '−' => Glyph::Ascii(b'-'),
        '‘' | '’' => Glyph::Ascii(b'\''),
        '“' | '”' | '«' | '»' => Glyph::Ascii(b'"'),
        '…' => Glyph::Ascii(b'.'),
        '\t' => Glyph::Blank,
        c if c.is_control() => Glyph::Blank,
        c => fold_accent(c).map(|a| Glyph::Ascii(a as u8)).unwrap_or(Glyph::Ascii(b'?')),
    }
}

fn fold_accent(c: char) -> Option<char> {
    let base = match c {
        'À'..='Å' => 'A',
        'à'..='å' => 'a',
        'Ç' => 'C',
        'ç' => 'c',
        'È'..='Ë' => 'E',
        'è'..='ë' => 'e',
        'Ì'..='Ï' => 'I',
        'ì'..='ï' => 'i',
        'Ñ' => 'N',
        'ñ' => 'n',
        'Ò'..='Ö' | 'Ø' => 'O',
        'ò'..='ö' | 'ø' => 'o',
        'Ù'..='Ü' => 'U',
        'ù'..='ü' => 'u',
        'Ý' => 'Y',
        'ý' | 'ÿ' => 'y',
        'ß' => 's',
        _ => return None,
    };
    Some(base)
}

/// Accumulates overlay quads in pixel coordinates.
pub struct OverlayTextBuilder {
    pub vertices: Vec<OverlayVertex>,
    pub indices: Vec<u32>,
    screen_w: f32,
    screen_h: f32,
}

impl OverlayTextBuilder {
    pub fn new(screen_w: f32, screen_h: f32) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            screen_w: screen_w.max(1.0),
            screen_h: screen_h.max(1.0),
        }
    }

    pub fn screen_size(&self) -> (f32, f32) {
        (self.screen_w, self.screen_h)
    }

    /// Width in pixels of `text` drawn at `scale`.
    pub fn text_width(text: &str, scale: f32) -> f32 {
        text.chars().count() as f32 * GLYPH_PX_W * scale
    }

    pub fn line_height(scale: f32) -> f32 {
        GLYPH_PX_H * scale
    }

    fn px_to_ndc(&self, px: f32, py: f32) -> [f32; 2] {
        [
            (px / self.screen_w) * 2.0 - 1.0,
            1.0 - (py / self.screen_h) * 2.0,
        ]
    }

    fn push_quad(&mut self, x: f32, y: f32, w: f32, h: f32, uv: [[f32; 2]; 2], color: [f32; 4]) {
        let tl = self.px_to_ndc(x, y);
        let br = self.px_to_ndc(x + w, y + h);
        let [[u0, v0], [u1, v1]] = uv;
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&[
            OverlayVertex { position: [tl[0], tl[1]], tex_coords: [u0, v0], color },
            OverlayVertex { position: [br[0], tl[1]], tex_coords: [u1, v0], color },
            OverlayVertex { position: [br[0], br[1]], tex_coords: [u1, v1], color },
            OverlayVertex { position: [tl[0], br[1]], tex_coords: [u0, v1], color },
        ]);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Solid rectangle.
    pub fn add_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        self.push_quad(x, y, w, h, [SOLID_UV, SOLID_UV], color);
    }

    /// Rectangle outline `t` pixels thick.
    pub fn add_frame(&mut self, x: f32, y: f32, w: f32, h: f32, t: f32, color: [f32; 4]) {
        self.add_rect(x, y, w, t, color);
        self.add_rect(x, y + h - t, w, t, color);
        self.add_rect(x, y + t, t, h - 2.0 * t, color);
        self.add_rect(x + w - t, y + t, t, h - 2.0 * t, color);
    }

    /// Text at pixel position (x, y). `scale` 1.0 draws 6x8 pixel cells.
    pub fn add_text(&mut self, x: f32, y: f32, text: &str, scale: f32, color: [f32; 4]) {
        let gw = GLYPH_PX_W * scale;
        let gh = GLYPH_PX_H * scale;
        let mut cx = x;
        for ch in text.chars() {
            match glyph_for(ch) {
                Glyph::Ascii(b' ') | Glyph::Blank => {}
                Glyph::Ascii(code) => {
                    let idx = (code - 32) as u32;
                    let col = (idx % FONT_COLS) as f32;
                    let row = (idx / FONT_COLS) as f32;
                    let uv = [
                        [col / FONT_COLS as f32, row / FONT_ROWS as f32],
                        [(col + 1.0) / FONT_COLS as f32, (row + 1.0) / FONT_ROWS as f32],
                    ];
                    self.push_quad(cx, y, gw, gh, uv, color);
                }
                Glyph::Shade(coverage) => {
                    let shaded = [color[0], color[1], color[2], color[3] * coverage];
                    self.add_rect(cx, y, gw, gh, shaded);
                }
                Glyph::Dot => {
                    let s = 2.0 * scale;
                    self.add_rect(cx + (gw - s) * 0.5, y + (gh - s) * 0.5, s, s, color);
                }
                Glyph::Degree => {
                    let s = 2.0 * scale;
                    self.add_rect(cx + scale, y, s, s, color);
                }
            }
            cx += gw;
        }
    }

    /// Text on a padded background box. Returns the box height.
    pub fn add_text_with_bg(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        scale: f32,
        text_color: [f32; 4],
        bg_color: [f32; 4],
    ) -> f32 {
        let padding = 2.0 * scale;
        let w = Self::text_width(text, scale) + padding * 2.0;
        let h = Self::line_height(scale) + padding * 2.0;
        self.add_rect(x, y, w, h, bg_color);
        self.add_text(x + padding, y + padding, text, scale, text_color);
        h
    }
}

/// Cut `text` to at most `max_w` pixels at `scale`, ending in `...` when cut.
pub fn fit_text(text: &str, max_w: f32, scale: f32) -> String {
    let max_chars = (max_w / (GLYPH_PX_W * scale)).floor().max(0.0) as usize;
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let mut out: String = text.chars().take(max_chars - 3).collect();
    out.push_str("...");
    out
}

/// Build the R8 font atlas (96x48). Returns pixels, width, height.
pub fn generate_font_atlas() -> (Vec<u8>, u32, u32) {
    let cell_w = GLYPH_PX_W as u32;
    let cell_h = GLYPH_PX_H as u32;
    let atlas_w = FONT_COLS * cell_w;
    let atlas_h = FONT_ROWS * cell_h;
    let mut pixels = vec![0u8; (atlas_w * atlas_h) as usize];

    for (idx, rows) in FONT_5X7.iter().enumerate() {
        let idx = idx as u32;
        let ox = (idx % FONT_COLS) * cell_w;
        let oy = (idx / FONT_COLS) * cell_h;
        for (gy, &bits) in rows.iter().enumerate() {
            for gx in 0..5u32 {
                if (bits >> (4 - gx)) & 1 != 0 {
                    let p = (oy + gy as u32) * atlas_w + ox + gx;
                    pixels[p as usize] = 255;
                }
            }
        }
    }

    (pixels, atlas_w, atlas_h)
}

/// 5x7 glyph rows for ASCII 32..127; bit 4 is the leftmost column.
#[rustfmt::skip]
const FONT_5X7: [[u8; 7]; 96] = [
    [0x00,0x00,0x00,0x00,0x00,0x00,0x00], // 32 ' '
    [0x04,0x04,0x04,0x04,0x04,0x00,0x04], // 33 '!'
    [0x0A,0x0A,0x00,0x00,0x00,0x00,0x00], // 34 '"'
    [0x0A,0x1F,0x0A,0x0A,0x1F,0x0A,0x00], // 35 '#'
    [0x04,0x0F,0x14,0x0E,0x05,0x1E,0x04], // 36 '$'
    [0x18,0x19,0x02,0x04,0x08,0x13,0x03], // 37 '%'
    [0x08,0x14,0x14,0x08,0x15,0x12,0x0D], // 38 '&'
    [0x04,0x04,0x00,0x00,0x00,0x00,0x00], // 39 '''
    [0x02,0x04,0x08,0x08,0x08,0x04,0x02], // 40 '('
    [0x08,0x04,0x02,0x02,0x02,0x04,0x08], // 41 ')'
    [0x04,0x15,0x0E,0x1F,0x0E,0x15,0x04], // 42 '*'
    [0x00,0x04,0x04,0x1F,0x04,0x04,0x00], // 43 '+'
    [0x00,0x00,0x00,0x00,0x00,0x04,0x08], // 44 ','
    [0x00,0x00,0x00,0x1F,0x00,0x00,0x00], // 45 '-'
    [0x00,0x00,0x00,0x00,0x00,0x00,0x04], // 46 '.'
    [0x01,0x01,0x02,0x04,0x08,0x10,0x10], // 47 '/'
    [0x0E,0x11,0x13,0x15,0x19,0x11,0x0E], // 48 '0'
    [0x04,0x0C,0x04,0x04,0x04,0x04,0x0E], // 49 '1'
    [0x0E,0x11,0x01,0x06,0x08,0x10,0x1F], // 50 '2'
    [0x0E,0x11,0x01,0x06,0x01,0x11,0x0E], // 51 '3'
    [0x02,0x06,0x0A,0x12,0x1F,0x02,0x02], // 52 '4'
    [0x1F,0x10,0x1E,0x01,0x01,0x11,0x0E], // 53 '5'
    [0x06,0x08,0x10,0x1E,0x11,0x11,0x0E], // 54 '6'
    [0x1F,0x01,0x02,0x04,0x08,0x08,0x08], // 55 '7'
    [0x0E,0x11,0x11,0x0E,0x11,0x11,0x0E], // 56 '8'
    [0x0E,0x11,0x11,0x0F,0x01,0x02,0x0C], // 57 '9'
    [0x00,0x00,0x04,0x00,0x00,0x04,0x00], // 58 ':'
    [0x00,0x00,0x04,0x00,0x00,0x04,0x08], // 59 ';'
    [0x02,0x04,0x08,0x10,0x08,0x04,0x02], // 60 '<'
    [0x00,0x00,0x1F,0x00,0x1F,0x00,0x00], // 61 '='
    [0x08,0x04,0x02,0x01,0x02,0x04,0x08], // 62 '>'
    [0x0E,0x11,0x01,0x02,0x04,0x00,0x04], // 63 '?'
    [0x0E,0x11,0x17,0x15,0x17,0x10,0x0E], // 64 '@'
    [0x0E,0x11,0x11,0x1F,0x11,0x11,0x11], // 65 'A'
    [0x1E,0x11,0x11,0x1E,0x11,0x11,0x1E], // 66 'B'
    [0x0E,0x11,0x10,0x10,0x10,0x11,0x0E], // 67 'C'
    [0x1E,0x11,0x11,0x11,0x11,0x11,0x1E], // 68 'D'
    [0x1F,0x10,0x10,0x1E,0x10,0x10,0x1F], // 69 'E'
    [0x1F,0x10,0x10,0x1E,0x10,0x10,0x10], // 70 'F'
    [0x0E,0x11,0x10,0x17,0x11,0x11,0x0F], // 71 'G'
    [0x11,0x11,0x11,0x1F,0x11,0x11,0x11], // 72 'H'
    [0x0E,0x04,0x04,0x04,0x04,0x04,0x0E], // 73 'I'
    [0x07,0x02,0x02,0x02,0x02,0x12,0x0C], // 74 'J'
    [0x11,0x12,0x14,0x18,0x14,0x12,0x11], // 75 'K'
    [0x10,0x10,0x10,0x10,0x10,0x10,0x1F], // 76 'L'
    [0x11,0x1B,0x15,0x15,0x11,0x11,0x11], // 77 'M'
    [0x11,0x19,0x15,0x13,0x11,0x11,0x11], // 78 'N'
    [0x0E,0x11,0x11,0x11,0x11,0x11,0x0E], // 79 'O'
    [0x1E,0x11,0x11,0x1E,0x10,0x10,0x10], // 80 'P'
    [0x0E,0x11,0x11,0x11,0x15,0x12,0x0D], // 81 'Q'
    [0x1E,0x11,0x11,0x1E,0x14,0x12,0x11], // 82 'R'
    [0x0E,0x11,0x10,0x0E,0x01,0x11,0x0E], // 83 'S'
    [0x1F,0x04,0x04,0x04,0x04,0x04,0x04], // 84 'T'
    [0x11,0x11,0x11,0x11,0x11,0x11,0x0E], // 85 'U'
    [0x11,0x11,0x11,0x11,0x0A,0x0A,0x04], // 86 'V'
    [0x11,0x11,0x11,0x15,0x15,0x1B,0x11], // 87 'W'
    [0x11,0x11,0x0A,0x04,0x0A,0x11,0x11], // 88 'X'
    [0x11,0x11,0x0A,0x04,0x04,0x04,0x04], // 89 'Y'
    [0x1F,0x01,0x02,0x04,0x08,0x10,0x1F], // 90 'Z'
    [0x0E,0x08,0x08,0x08,0x08,0x08,0x0E], // 91 '['
    [0x10,0x10,0x08,0x04,0x02,0x01,0x01], // 92 '\'
    [0x0E,0x02,0x02,0x02,0x02,0x02,0x0E], // 93 ']'
    [0x04,0x0A,0x11,0x00,0x00,0x00,0x00], // 94 '^'
    [0x00,0x00,0x00,0x00,0x00,0x00,0x1F], // 95 '_'
    [0x08,0x04,0x00,0x00,0x00,0x00,0x00], // 96 '`'
    [0x00,0x00,0x0E,0x01,0x0F,0x11,0x0F], // 97 'a'
    [0x10,0x10,0x1E,0x11,0x11,0x11,0x1E], // 98 'b'
    [0x00,0x00,0x0E,0x11,0x10,0x11,0x0E], // 99 'c'
    [0x01,0x01,0x0F,0x11,0x11,0x11,0x0F], // 100 'd'
    [0x00,0x00,0x0E,0x11,0x1F,0x10,0x0E], // 101 'e'
    [0x06,0x08,0x1E,0x08,0x08,0x08,0x08], // 102 'f'
    [0x00,0x00,0x0F,0x11,0x0F,0x01,0x0E], // 103 'g'
    [0x10,0x10,0x1E,0x11,0x11,0x11,0x11], // 104 'h'
    [0x04,0x00,0x0C,0x04,0x04,0x04,0x0E], // 105 'i'
    [0x02,0x00,0x06,0x02,0x02,0x12,0x0C], // 106 'j'
    [0x10,0x10,0x12,0x14,0x18,0x14,0x12], // 107 'k'
    [0x0C,0x04,0x04,0x04,0x04,0x04,0x0E], // 108 'l'
    [0x00,0x00,0x1A,0x15,0x15,0x15,0x11], // 109 'm'
    [0x00,0x00,0x1E,0x11,0x11,0x11,0x11], // 110 'n'
    [0x00,0x00,0x0E,0x11,0x11,0x11,0x0E], // 111 'o'
    [0x00,0x00,0x1E,0x11,0x1E,0x10,0x10], // 112 'p'
    [0x00,0x00,0x0F,0x11,0x0F,0x01,0x01], // 113 'q'
    [0x00,0x00,0x16,0x19,0x10,0x10,0x10], // 114 'r'
    [0x00,0x00,0x0F,0x10,0x0E,0x01,0x1E], // 115 's'
    [0x08,0x08,0x1E,0x08,0x08,0x09,0x06], // 116 't'
    [0x00,0x00,0x11,0x11,0x11,0x13,0x0D], // 117 'u'
    [0x00,0x00,0x11,0x11,0x11,0x0A,0x04], // 118 'v'
    [0x00,0x00,0x11,0x15,0x15,0x15,0x0A], // 119 'w'
    [0x00,0x00,0x11,0x0A,0x04,0x0A,0x11], // 120 'x'
    [0x00,0x00,0x11,0x11,0x0F,0x01,0x0E], // 121 'y'
    [0x00,0x00,0x1F,0x02,0x04,0x08,0x1F], // 122 'z'
    [0x02,0x04,0x04,0x08,0x04,0x04,0x02], // 123 '{'
    [0x04,0x04,0x04,0x04,0x04,0x04,0x04], // 124 '|'
    [0x08,0x04,0x04,0x02,0x04,0x04,0x08], // 125 '}'
    [0x00,0x08,0x15,0x02,0x00,0x00,0x00], // 126 '~'
    [0x1F,0x1F,0x1F,0x1F,0x1F,0x1F,0x1F], // 127 DEL (solid block - useful for bg)
];


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_folding() {
        assert_eq!(glyph_for('A'), Glyph::Ascii(b'A'));
        assert_eq!(glyph_for('é'), Glyph::Ascii(b'e'));
        assert_eq!(glyph_for('Ö'), Glyph::Ascii(b'O'));
        assert_eq!(glyph_for('—'), Glyph::Ascii(b'-'));
        assert_eq!(glyph_for('█'), Glyph::Shade(1.0));
        assert_eq!(glyph_for('░'), Glyph::Shade(0.25));
        assert_eq!(glyph_for('•'), Glyph::Dot);
        assert_eq!(glyph_for('°'), Glyph::Degree);
        assert_eq!(glyph_for('漢'), Glyph::Ascii(b'?'));
    }

    #[test]
    fn text_emits_one_quad_per_visible_glyph() {
        let mut b = OverlayTextBuilder::new(800.0, 600.0);
        b.add_text(0.0, 0.0, "AB C", 1.0, [1.0; 4]);
        assert_eq!(b.vertices.len(), 12);
        assert_eq!(b.indices.len(), 18);
        assert!(b.vertices.iter().all(|v| v.tex_coords[0] >= 0.0));
    }

    #[test]
    fn shade_glyph_is_a_solid_quad_with_scaled_alpha() {
        let mut b = OverlayTextBuilder::new(100.0, 100.0);
        b.add_text(0.0, 0.0, "▒", 1.0, [1.0, 1.0, 1.0, 0.8]);
        assert_eq!(b.vertices.len(), 4);
        assert_eq!(b.vertices[0].tex_coords, SOLID_UV);
        assert!((b.vertices[0].color[3] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn rect_maps_pixels_to_ndc() {
        let mut b = OverlayTextBuilder::new(200.0, 100.0);
        b.add_rect(0.0, 0.0, 200.0, 100.0, [0.0; 4]);
        assert_eq!(b.vertices[0].position, [-1.0, 1.0]);
        assert_eq!(b.vertices[2].position, [1.0, -1.0]);
        b.add_rect(10.0, 10.0, 0.0, 5.0, [0.0; 4]);
        assert_eq!(b.vertices.len(), 4);
    }

    #[test]
    fn width_counts_characters_not_bytes() {
        assert_eq!(OverlayTextBuilder::text_width("CYC • 12", 1.0), 8.0 * GLYPH_PX_W);
        assert_eq!(OverlayTextBuilder::text_width("", 2.0), 0.0);
    }

    #[test]
    fn fit_text_truncates_with_ellipsis() {
        let w = GLYPH_PX_W * 8.0;
        assert_eq!(fit_text("SHORT", w, 1.0), "SHORT");
        assert_eq!(fit_text("A LONGER HEADLINE", w, 1.0), "A LON...");
        assert_eq!(fit_text("ABCDEF", GLYPH_PX_W * 2.0, 1.0), "AB");
    }

    #[test]
    fn atlas_has_expected_size_and_ink() {
        let (pixels, w, h) = generate_font_atlas();
        assert_eq!((w, h), (96, 48));
        assert_eq!(pixels.len(), 96 * 48);
        // Space is empty, 'A' (cell 33) has ink.
        assert!(pixels[0..6].iter().all(|p| *p == 0));
        let a_x = (33 % 16) * 6;
        let a_y = (33 / 16) * 8;
        let ink = (0..8)
            .flat_map(|y| (0..6).map(move |x| (a_y + y) * 96 + a_x + x))
            .filter(|i| pixels[*i as usize] == 255)
            .count();
        assert!(ink > 10);
    }
}

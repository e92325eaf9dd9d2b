//! Cosmetic capture filters.
//!
//! Each filter maps to a fixed CSS filter expression. The same expression is
//! used for the live preview (as a CSS `filter` style) and replayed on the
//! captured pixels before encoding, so the uploaded still matches what the
//! guest saw.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    None,
    Vintage,
    Bw,
    Bright,
}

/// A single CSS filter function
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterOp {
    Sepia(f32),
    Grayscale(f32),
    Contrast(f32),
    Brightness(f32),
    Saturate(f32),
}

impl Filter {
    pub const ALL: [Filter; 4] = [Filter::None, Filter::Vintage, Filter::Bw, Filter::Bright];

    pub fn id(&self) -> &'static str {
        match self {
            Filter::None => "none",
            Filter::Vintage => "vintage",
            Filter::Bw => "bw",
            Filter::Bright => "bright",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Filter::None => "None",
            Filter::Vintage => "Vintage",
            Filter::Bw => "B&W",
            Filter::Bright => "Bright",
        }
    }

    /// Unknown identifiers fall back to no filter.
    pub fn from_id(id: &str) -> Self {
        match id {
            "vintage" => Filter::Vintage,
            "bw" => Filter::Bw,
            "bright" => Filter::Bright,
            _ => Filter::None,
        }
    }

    /// Value for the `filter` upload field; `None` means omit the field.
    pub fn upload_tag(&self) -> Option<String> {
        match self {
            Filter::None => None,
            other => Some(other.id().to_string()),
        }
    }

    pub fn ops(&self) -> &'static [FilterOp] {
        match self {
            Filter::None => &[],
            Filter::Vintage => &[
                FilterOp::Sepia(0.5),
                FilterOp::Contrast(1.2),
                FilterOp::Brightness(0.9),
            ],
            Filter::Bw => &[FilterOp::Grayscale(1.0), FilterOp::Contrast(1.1)],
            Filter::Bright => &[FilterOp::Brightness(1.3), FilterOp::Saturate(1.2)],
        }
    }

    /// CSS expression for the preview surface
    pub fn css(&self) -> String {
        let ops = self.ops();
        if ops.is_empty() {
            return "none".to_string();
        }
        ops.iter().map(FilterOp::css).collect::<Vec<_>>().join(" ")
    }

    /// Bakes the filter into an RGBA buffer in place. Alpha is untouched.
    pub fn apply_rgba(&self, rgba: &mut [u8]) {
        let ops = self.ops();
        if ops.is_empty() {
            return;
        }
        for px in rgba.chunks_exact_mut(4) {
            let mut rgb = [
                px[0] as f32 / 255.0,
                px[1] as f32 / 255.0,
                px[2] as f32 / 255.0,
            ];
            for op in ops {
                rgb = op.apply(rgb);
            }
            px[0] = to_byte(rgb[0]);
            px[1] = to_byte(rgb[1]);
            px[2] = to_byte(rgb[2]);
        }
    }
}

impl FilterOp {
    pub fn css(&self) -> String {
        match self {
            FilterOp::Sepia(a) => format!("sepia({})", a),
            FilterOp::Grayscale(a) => format!("grayscale({})", a),
            FilterOp::Contrast(a) => format!("contrast({})", a),
            FilterOp::Brightness(a) => format!("brightness({})", a),
            FilterOp::Saturate(a) => format!("saturate({})", a),
        }
    }

    // Colour matrices as defined by W3C Filter Effects.
    fn apply(&self, [r, g, b]: [f32; 3]) -> [f32; 3] {
        let out = match *self {
            FilterOp::Grayscale(a) => {
                let k = 1.0 - a.clamp(0.0, 1.0);
                matrix(
                    [
                        [0.2126 + 0.7874 * k, 0.7152 - 0.7152 * k, 0.0722 - 0.0722 * k],
                        [0.2126 - 0.2126 * k, 0.7152 + 0.2848 * k, 0.0722 - 0.0722 * k],
                        [0.2126 - 0.2126 * k, 0.7152 - 0.7152 * k, 0.0722 + 0.9278 * k],
                    ],
                    [r, g, b],
                )
            }
            FilterOp::Sepia(a) => {
                let k = 1.0 - a.clamp(0.0, 1.0);
                matrix(
                    [
                        [0.393 + 0.607 * k, 0.769 - 0.769 * k, 0.189 - 0.189 * k],
                        [0.349 - 0.349 * k, 0.686 + 0.314 * k, 0.168 - 0.168 * k],
                        [0.272 - 0.272 * k, 0.534 - 0.534 * k, 0.131 + 0.869 * k],
                    ],
                    [r, g, b],
                )
            }
            FilterOp::Saturate(s) => matrix(
                [
                    [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
                    [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
                    [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
                ],
                [r, g, b],
            ),
            FilterOp::Brightness(f) => [r * f, g * f, b * f],
            FilterOp::Contrast(c) => [
                (r - 0.5) * c + 0.5,
                (g - 0.5) * c + 0.5,
                (b - 0.5) * c + 0.5,
            ],
        };
        [
            out[0].clamp(0.0, 1.0),
            out[1].clamp(0.0, 1.0),
            out[2].clamp(0.0, 1.0),
        ]
    }
}

fn matrix(m: [[f32; 3]; 3], v: [f32; 3]) -> [f32; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

fn to_byte(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_expressions() {
        assert_eq!(Filter::None.css(), "none");
        assert_eq!(
            Filter::Vintage.css(),
            "sepia(0.5) contrast(1.2) brightness(0.9)"
        );
        assert_eq!(Filter::Bw.css(), "grayscale(1) contrast(1.1)");
        assert_eq!(Filter::Bright.css(), "brightness(1.3) saturate(1.2)");
    }

    #[test]
    fn test_upload_tag_omits_none() {
        assert_eq!(Filter::None.upload_tag(), None);
        assert_eq!(Filter::Vintage.upload_tag().as_deref(), Some("vintage"));
        assert_eq!(Filter::from_id("unknown"), Filter::None);
    }

    #[test]
    fn test_bw_produces_neutral_grey() {
        let mut px = vec![200, 30, 90, 255];
        Filter::Bw.apply_rgba(&mut px);
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn test_none_leaves_pixels_untouched() {
        let mut px = vec![1, 2, 3, 4, 250, 251, 252, 253];
        let before = px.clone();
        Filter::None.apply_rgba(&mut px);
        assert_eq!(px, before);
    }

    #[test]
    fn test_bright_lightens_midtones() {
        let mut px = vec![100, 100, 100, 255];
        Filter::Bright.apply_rgba(&mut px);
        assert_eq!(px[0], 130);
    }
}

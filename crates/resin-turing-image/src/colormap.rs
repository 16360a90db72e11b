//! Palettes and lookup tables mapping pattern values to colours.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of entries in a [`Colormap`].
pub const COLORMAP_DEPTH: usize = 256;

/// Named sets of anchor colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Palette {
    /// Black to white.
    #[default]
    Bw,
    /// Red through violet.
    Rainbow,
    /// Pastel blue, yellow, orange, pink and green.
    Holiday,
    /// Saturated blue, yellow, magenta, cyan and green.
    Neon,
    /// Black through red and yellow to white.
    Lava,
    /// Black through blues and cyan to white.
    Ice,
    /// Dark blue through purple to pale yellow.
    Dawn,
    /// Black through greens to white.
    Toxic,
}

impl Palette {
    /// Every palette, in display order.
    pub const ALL: [Palette; 8] = [
        Palette::Bw,
        Palette::Rainbow,
        Palette::Holiday,
        Palette::Neon,
        Palette::Lava,
        Palette::Ice,
        Palette::Dawn,
        Palette::Toxic,
    ];

    /// Lowercase name used on the command line and in configs.
    pub fn name(&self) -> &'static str {
        match self {
            Palette::Bw => "bw",
            Palette::Rainbow => "rainbow",
            Palette::Holiday => "holiday",
            Palette::Neon => "neon",
            Palette::Lava => "lava",
            Palette::Ice => "ice",
            Palette::Dawn => "dawn",
            Palette::Toxic => "toxic",
        }
    }

    /// Looks up a palette by name, falling back to [`Palette::Bw`].
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// Anchor colours as RGB triples, evenly spaced over `[0, 1]`.
    pub fn anchors(&self) -> &'static [[u8; 3]] {
        match self {
            Palette::Bw => &[[0x00, 0x00, 0x00], [0xFF, 0xFF, 0xFF]],
            Palette::Rainbow => &[
                [0xFF, 0x00, 0x00],
                [0xFF, 0x80, 0x00],
                [0xFF, 0xFF, 0x00],
                [0x00, 0xFF, 0x00],
                [0x00, 0x00, 0xFF],
                [0x4B, 0x00, 0x82],
                [0x80, 0x00, 0xFF],
            ],
            Palette::Holiday => &[
                [0x63, 0x86, 0xFF],
                [0xFF, 0xE5, 0x74],
                [0xFF, 0xBC, 0x8F],
                [0xFF, 0xBF, 0xD4],
                [0x53, 0xDF, 0xBD],
            ],
            Palette::Neon => &[
                [0x00, 0x00, 0xFF],
                [0xFF, 0xFF, 0x00],
                [0xFF, 0x00, 0xFF],
                [0x00, 0xFF, 0xFF],
                [0x00, 0xFF, 0x00],
            ],
            Palette::Lava => &[
                [0x00, 0x00, 0x00],
                [0xFF, 0x00, 0x00],
                [0xFF, 0x80, 0x00],
                [0xFF, 0xFF, 0x00],
                [0xFF, 0xFF, 0xFF],
            ],
            Palette::Ice => &[
                [0x00, 0x00, 0x00],
                [0x00, 0x00, 0x80],
                [0x00, 0x00, 0xFF],
                [0x00, 0xFF, 0xFF],
                [0xFF, 0xFF, 0xFF],
            ],
            Palette::Dawn => &[
                [0x00, 0x00, 0x80],
                [0x80, 0x00, 0x80],
                [0xFF, 0x80, 0x80],
                [0xFF, 0xFF, 0x80],
                [0xFF, 0xFF, 0xC0],
            ],
            Palette::Toxic => &[
                [0x00, 0x00, 0x00],
                [0x00, 0x80, 0x00],
                [0x80, 0xFF, 0x00],
                [0xFF, 0xFF, 0x80],
                [0xFF, 0xFF, 0xFF],
            ],
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Palette {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Palette::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown palette: {s}"))
    }
}

/// Precomputed RGBA lookup table for a palette.
#[derive(Clone, PartialEq, Eq)]
pub struct Colormap {
    palette: Palette,
    table: Box<[[u8; 4]; COLORMAP_DEPTH]>,
}

impl Colormap {
    /// Builds the table by interpolating linearly between evenly spaced anchors.
    pub fn new(palette: Palette) -> Self {
        let anchors = palette.anchors();
        let segments = (anchors.len() - 1) as f32;
        let mut table = Box::new([[0, 0, 0, 0xFF]; COLORMAP_DEPTH]);

        for (k, entry) in table.iter_mut().enumerate() {
            let t = k as f32 / (COLORMAP_DEPTH - 1) as f32 * segments;
            let lower = (t.floor() as usize).min(anchors.len() - 2);
            let local = t - lower as f32;
            let (a, b) = (anchors[lower], anchors[lower + 1]);
            for c in 0..3 {
                let v = a[c] as f32 + (b[c] as f32 - a[c] as f32) * local;
                entry[c] = v.round().clamp(0.0, 255.0) as u8;
            }
        }

        Self { palette, table }
    }

    /// Palette this table was built from.
    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Colour for a pattern value. Values outside `[0, 1]` are clamped and
    /// NaN maps to the first entry.
    pub fn map(&self, value: f32) -> [u8; 4] {
        let value = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        self.table[(value * (COLORMAP_DEPTH - 1) as f32).round() as usize]
    }

    /// Raw table entry.
    pub fn lookup(&self, index: u8) -> [u8; 4] {
        self.table[index as usize]
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

impl fmt::Debug for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Colormap")
            .field("palette", &self.palette)
            .finish_non_exhaustive()
    }
}

impl From<Palette> for Colormap {
    fn from(palette: Palette) -> Self {
        Self::new(palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_names() {
        for palette in Palette::ALL {
            assert_eq!(palette.name().parse::<Palette>().unwrap(), palette);
            assert_eq!(Palette::from_name(&palette.to_string()), palette);
        }
        assert_eq!("LAVA".parse::<Palette>().unwrap(), Palette::Lava);
        assert!("plaid".parse::<Palette>().is_err());
        assert_eq!(Palette::from_name("plaid"), Palette::Bw);
    }

    #[test]
    fn test_anchor_counts() {
        assert_eq!(Palette::Bw.anchors().len(), 2);
        assert_eq!(Palette::Rainbow.anchors().len(), 7);
        for palette in Palette::ALL {
            assert!(palette.anchors().len() >= 2);
        }
    }

    #[test]
    fn test_bw_is_grayscale_ramp() {
        let map = Colormap::new(Palette::Bw);
        for k in 0..=255u8 {
            assert_eq!(map.lookup(k), [k, k, k, 0xFF]);
        }
    }

    #[test]
    fn test_endpoints_hit_anchors() {
        for palette in Palette::ALL {
            let map = Colormap::new(palette);
            let anchors = palette.anchors();
            let [r, g, b] = anchors[0];
            assert_eq!(map.map(0.0), [r, g, b, 0xFF]);
            let [r, g, b] = anchors[anchors.len() - 1];
            assert_eq!(map.map(1.0), [r, g, b, 0xFF]);
        }
    }

    #[test]
    fn test_lava_midpoint() {
        // Five anchors: 0.5 lands exactly on orange.
        let map = Colormap::new(Palette::Lava);
        let mid = map.map(0.5);
        assert_eq!(mid[0], 0xFF);
        assert!((mid[1] as i32 - 0x80).abs() <= 1);
        assert_eq!(mid[2], 0x00);
    }

    #[test]
    fn test_map_clamps() {
        let map = Colormap::new(Palette::Ice);
        assert_eq!(map.map(-3.0), map.map(0.0));
        assert_eq!(map.map(7.5), map.map(1.0));
        assert_eq!(map.map(f32::NAN), map.lookup(0));
    }
}

//! Colour conversion helpers.
//!
//! Plot configurations accept either SVG colour names (`"red"`,
//! `"lightgrey"`) or `#RRGGBB` strings. The helpers here convert between hex
//! and RGB and build linear gradients between two hex colours.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::wet;

/// WET number reported for malformed hex colours.
const WET_INVALID_HEX: u32 = 27;

/// Converts `#RRGGBB` to `[r, g, b]`.
///
/// # Example
///
/// ```
/// use farseer_plot::color::hex_to_rgb;
///
/// assert_eq!(hex_to_rgb("#FF8000").unwrap(), [255, 128, 0]);
/// ```
pub fn hex_to_rgb(hex: &str) -> Result<[u8; 3]> {
    let digits = hex
        .strip_prefix('#')
        .filter(|d| d.len() == 6 && d.is_ascii())
        .ok_or_else(|| invalid_hex(hex))?;

    let mut rgb = [0u8; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        *channel =
            u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).map_err(|_| invalid_hex(hex))?;
    }
    Ok(rgb)
}

/// Converts `[r, g, b]` to a lower-case `#rrggbb` string.
#[must_use]
pub fn rgb_to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Returns true for strings that look like hex colours (start with `#`).
#[must_use]
pub fn is_hex(color: &str) -> bool {
    color.starts_with('#')
}

/// A sequence of colours in both hex and channel form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    /// Hex strings.
    pub hex: Vec<String>,
    /// Red channel.
    pub r: Vec<u8>,
    /// Green channel.
    pub g: Vec<u8>,
    /// Blue channel.
    pub b: Vec<u8>,
}

impl Gradient {
    fn from_rgb(colors: &[[u8; 3]]) -> Self {
        Self {
            hex: colors.iter().map(|&c| rgb_to_hex(c)).collect(),
            r: colors.iter().map(|c| c[0]).collect(),
            g: colors.iter().map(|c| c[1]).collect(),
            b: colors.iter().map(|c| c[2]).collect(),
        }
    }

    /// Number of colours.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hex.len()
    }

    /// Returns true if the gradient has no colours.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hex.is_empty()
    }
}

/// Returns `n` colours evenly spaced from `start` to `finish`.
///
/// Channels are truncated toward zero, so the last colour equals `finish`
/// exactly. `n == 0` yields an empty gradient and `n == 1` just `start`.
pub fn linear_gradient(start: &str, finish: &str, n: usize) -> Result<Gradient> {
    let s = hex_to_rgb(start)?;
    let f = hex_to_rgb(finish)?;

    if n == 0 {
        return Ok(Gradient::from_rgb(&[]));
    }

    let mut colors = Vec::with_capacity(n);
    colors.push(s);
    for t in 1..n {
        let frac = t as f64 / (n - 1) as f64;
        let mut c = [0u8; 3];
        for j in 0..3 {
            let v = f64::from(s[j]) + frac * (f64::from(f[j]) - f64::from(s[j]));
            c[j] = v.trunc() as u8;
        }
        colors.push(c);
    }
    Ok(Gradient::from_rgb(&colors))
}

fn invalid_hex(hex: &str) -> Error {
    let msg = format!("The input colour is not in HEX format: '{hex}'.");
    log::info!("{}", wet::generate("ERROR", &msg, WET_INVALID_HEX));
    Error::InvalidColor(hex.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#FFFFFF").unwrap(), [255, 255, 255]);
        assert_eq!(hex_to_rgb("#000000").unwrap(), [0, 0, 0]);
        assert_eq!(hex_to_rgb("#1a2B3c").unwrap(), [0x1a, 0x2b, 0x3c]);
    }

    #[test]
    fn test_hex_to_rgb_rejects_bad_input() {
        for bad in ["FFFFFF", "#FFF", "#GGGGGG", "#FFFFFFF", "", "#ééé"] {
            assert!(
                matches!(hex_to_rgb(bad), Err(Error::InvalidColor(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(rgb_to_hex([255, 255, 255]), "#ffffff");
        assert_eq!(rgb_to_hex([1, 2, 255]), "#0102ff");
    }

    #[test]
    fn test_linear_gradient() {
        let g = linear_gradient("#000000", "#FFFFFF", 3).unwrap();
        assert_eq!(g.len(), 3);
        assert_eq!(g.r, vec![0, 127, 255]);
        assert_eq!(g.hex.first().map(String::as_str), Some("#000000"));
        assert_eq!(g.hex.last().map(String::as_str), Some("#ffffff"));
    }

    #[test]
    fn test_linear_gradient_edges() {
        assert!(linear_gradient("#000000", "#FFFFFF", 0).unwrap().is_empty());
        let single = linear_gradient("#102030", "#FFFFFF", 1).unwrap();
        assert_eq!(single.hex, vec!["#102030".to_string()]);
        assert!(linear_gradient("red", "#FFFFFF", 3).is_err());
    }
}

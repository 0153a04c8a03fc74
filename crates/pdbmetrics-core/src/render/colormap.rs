use plotters::style::RGBColor;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

type Anchors = [(u8, u8, u8); 9];

// Samples at t = 0, 1/8, ..., 1 of the matplotlib perceptually uniform maps.
const VIRIDIS: Anchors = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 82, 139),
    (44, 114, 142),
    (33, 145, 140),
    (39, 173, 129),
    (94, 201, 98),
    (170, 220, 50),
    (253, 231, 37),
];

const PLASMA: Anchors = [
    (13, 8, 135),
    (76, 2, 161),
    (126, 3, 168),
    (170, 35, 149),
    (204, 71, 120),
    (230, 108, 92),
    (248, 149, 64),
    (253, 196, 39),
    (240, 249, 33),
];

const INFERNO: Anchors = [
    (0, 0, 4),
    (31, 12, 72),
    (85, 15, 109),
    (136, 34, 106),
    (186, 54, 85),
    (227, 89, 51),
    (249, 140, 10),
    (249, 201, 50),
    (252, 255, 164),
];

const GRAYSCALE: Anchors = [
    (0, 0, 0),
    (32, 32, 32),
    (64, 64, 64),
    (96, 96, 96),
    (128, 128, 128),
    (159, 159, 159),
    (191, 191, 191),
    (223, 223, 223),
    (255, 255, 255),
];

/// Sequential colormaps available for point colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Colormap {
    #[default]
    Viridis,
    Plasma,
    Inferno,
    Grayscale,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown colormap '{0}'. Expected one of: viridis, plasma, inferno, grayscale")]
pub struct ParseColormapError(pub String);

impl Colormap {
    fn anchors(&self) -> &'static Anchors {
        match self {
            Colormap::Viridis => &VIRIDIS,
            Colormap::Plasma => &PLASMA,
            Colormap::Inferno => &INFERNO,
            Colormap::Grayscale => &GRAYSCALE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Colormap::Viridis => "viridis",
            Colormap::Plasma => "plasma",
            Colormap::Inferno => "inferno",
            Colormap::Grayscale => "grayscale",
        }
    }

    /// Colour at position `t`, clamped to `[0, 1]`. Non-finite input maps to the low end.
    pub fn color(&self, t: f64) -> RGBColor {
        let anchors = self.anchors();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let scaled = t * (anchors.len() - 1) as f64;
        let lower = (scaled.floor() as usize).min(anchors.len() - 2);
        let frac = scaled - lower as f64;

        let (r0, g0, b0) = anchors[lower];
        let (r1, g1, b1) = anchors[lower + 1];
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
    }
}

impl FromStr for Colormap {
    type Err = ParseColormapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "viridis" => Ok(Colormap::Viridis),
            "plasma" => Ok(Colormap::Plasma),
            "inferno" => Ok(Colormap::Inferno),
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(Colormap::Grayscale),
            _ => Err(ParseColormapError(s.to_string())),
        }
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_anchor_table() {
        assert_eq!(Colormap::Viridis.color(0.0), RGBColor(68, 1, 84));
        assert_eq!(Colormap::Viridis.color(1.0), RGBColor(253, 231, 37));
        assert_eq!(Colormap::Plasma.color(0.5), RGBColor(204, 71, 120));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        assert_eq!(Colormap::Inferno.color(-3.0), Colormap::Inferno.color(0.0));
        assert_eq!(Colormap::Inferno.color(7.0), Colormap::Inferno.color(1.0));
        assert_eq!(Colormap::Viridis.color(f64::NAN), Colormap::Viridis.color(0.0));
    }

    #[test]
    fn interpolates_between_anchors() {
        assert_eq!(Colormap::Grayscale.color(1.0 / 16.0), RGBColor(16, 16, 16));
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Viridis".parse(), Ok(Colormap::Viridis));
        assert_eq!("GREY".parse(), Ok(Colormap::Grayscale));
        assert!("jet".parse::<Colormap>().is_err());
        assert_eq!(Colormap::Plasma.to_string(), "plasma");
    }
}

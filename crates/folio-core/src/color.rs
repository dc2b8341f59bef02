//! Color values and the theme-dependent palettes used by the effects.
//!
//! Colors are kept as plain 8-bit RGB plus a floating alpha so they can be
//! serialized straight into CSS `rgba()` strings for a 2D canvas.

use crate::constants::{ACCENT_PRIMARY_WEIGHT, ACCENT_SECONDARY_WEIGHT};
use crate::error::CoreError;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba {
            rgb: self,
            a: a.clamp(0.0, 1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f64,
}

impl Rgba {
    /// CSS color string accepted by canvas `fillStyle` / `strokeStyle`.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {:.3})",
            self.rgb.r, self.rgb.g, self.rgb.b, self.a
        )
    }
}

/// Light/dark page theme; the only external configuration the ambient field takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    #[inline]
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    #[inline]
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn style(self) -> &'static ThemeStyle {
        match self {
            Theme::Dark => &DARK_STYLE,
            Theme::Light => &LIGHT_STYLE,
        }
    }
}

impl FromStr for Theme {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(CoreError::UnknownTheme(s.to_string())),
        }
    }
}

/// Which of the three palette buckets a color came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaletteBucket {
    PrimaryAccent,
    SecondaryAccent,
    Neutral,
}

/// Weighted 3-bucket palette: two rare accent hues and one common neutral.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub neutral: Rgb,
}

impl Palette {
    /// Map a uniform sample in [0, 1) onto a bucket.
    #[inline]
    pub fn bucket_for(sample: f64) -> PaletteBucket {
        if sample < ACCENT_PRIMARY_WEIGHT {
            PaletteBucket::PrimaryAccent
        } else if sample < ACCENT_PRIMARY_WEIGHT + ACCENT_SECONDARY_WEIGHT {
            PaletteBucket::SecondaryAccent
        } else {
            PaletteBucket::Neutral
        }
    }

    #[inline]
    pub fn color(&self, bucket: PaletteBucket) -> Rgb {
        match bucket {
            PaletteBucket::PrimaryAccent => self.primary,
            PaletteBucket::SecondaryAccent => self.secondary,
            PaletteBucket::Neutral => self.neutral,
        }
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Rgb {
        self.color(Self::bucket_for(rng.gen::<f64>()))
    }
}

/// Everything the ambient field needs to know about a theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeStyle {
    pub palette: Palette,
    pub particle_alpha: f64,
    pub line: Rgb,
    pub line_alpha: f64, // alpha of a connection at zero distance
    pub pointer_line_alpha: f64,
}

pub static DARK_STYLE: ThemeStyle = ThemeStyle {
    palette: Palette {
        primary: Rgb::new(99, 102, 241),   // indigo
        secondary: Rgb::new(236, 72, 153), // pink
        neutral: Rgb::new(148, 163, 184),  // slate
    },
    particle_alpha: 0.8,
    line: Rgb::new(148, 163, 184),
    line_alpha: 0.15,
    pointer_line_alpha: 0.2,
};

pub static LIGHT_STYLE: ThemeStyle = ThemeStyle {
    palette: Palette {
        primary: Rgb::new(79, 70, 229),
        secondary: Rgb::new(219, 39, 119),
        neutral: Rgb::new(100, 116, 139),
    },
    particle_alpha: 0.6,
    line: Rgb::new(71, 85, 105),
    line_alpha: 0.1,
    pointer_line_alpha: 0.15,
};

/// Fixed trail colors; the trail does not follow the page theme.
pub const TRAIL_PALETTE: [Rgb; 3] = [
    Rgb::new(99, 102, 241),
    Rgb::new(168, 85, 247),
    Rgb::new(236, 72, 153),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_string_formats_alpha() {
        let c = Rgb::new(1, 2, 3).with_alpha(0.5);
        assert_eq!(c.to_css(), "rgba(1, 2, 3, 0.500)");
    }

    #[test]
    fn with_alpha_clamps() {
        assert_eq!(Rgb::new(0, 0, 0).with_alpha(1.7).a, 1.0);
        assert_eq!(Rgb::new(0, 0, 0).with_alpha(-0.2).a, 0.0);
    }

    #[test]
    fn theme_parses_case_insensitively() {
        assert_eq!("Dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!(" light ".parse::<Theme>(), Ok(Theme::Light));
        assert!(matches!(
            "sepia".parse::<Theme>(),
            Err(CoreError::UnknownTheme(_))
        ));
    }

    #[test]
    fn bucket_boundaries() {
        assert_eq!(Palette::bucket_for(0.0), PaletteBucket::PrimaryAccent);
        assert_eq!(Palette::bucket_for(0.15), PaletteBucket::SecondaryAccent);
        assert_eq!(Palette::bucket_for(0.2), PaletteBucket::Neutral);
        assert_eq!(Palette::bucket_for(0.99), PaletteBucket::Neutral);
    }
}

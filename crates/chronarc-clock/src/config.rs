//! Command-line configuration.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use chrono_tz::Tz;
use clap::Parser;

use chronarc_engine::paint::Color;

use crate::debug::DEBUG_FRAGMENT;
use crate::scenario::SceneParams;
use crate::time::{parse_timezone, TimeField};

/// Fonts tried, in order, when `--font` is not given.
pub const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, Clone, Parser)]
#[command(name = "chronarc", version, about = "Animated analog clock.")]
pub struct Cli {
    #[arg(help = "Location fragment. `#debug` opens the debug panel.")]
    pub fragment: Option<String>,
    #[arg(long, help = "Open the debug panel. Same as passing `#debug`.")]
    pub debug: bool,
    #[arg(
        long,
        default_value = "UTC",
        value_parser = parse_timezone,
        help = "Show time in IANA timezone <TIMEZONE>."
    )]
    pub timezone: Tz,
    #[arg(long, default_value_t = 2.0, help = "Stroke width in logical pixels.")]
    pub line_width: f32,
    #[arg(
        long,
        default_value_t = 1.0,
        allow_negative_numbers = true,
        help = "Ring rotation in radians per second."
    )]
    pub speed: f32,
    #[arg(
        long,
        default_value = "#ffffff",
        value_parser = Color::from_hex,
        help = "Stroke color as #rgb or #rrggbb."
    )]
    pub color: Color,
    #[arg(long, help = "Start with ring rotation paused.")]
    pub no_animate: bool,
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..24), help = "Freeze the clock at hour <HOUR>.")]
    pub hour: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..60), help = "Freeze the clock at minute <MINUTE>.")]
    pub minute: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(0..60), help = "Freeze the clock at second <SECOND>.")]
    pub second: Option<u32>,
    #[arg(long, default_value_t = 1280.0, help = "Initial window width in logical pixels.")]
    pub width: f64,
    #[arg(long, default_value_t = 720.0, help = "Initial window height in logical pixels.")]
    pub height: f64,
    #[arg(long, help = "Seed ring spans with <SEED>.")]
    pub seed: Option<u64>,
    #[arg(long, help = "Load readout and panel font from <FONT>.")]
    pub font: Option<PathBuf>,
    #[arg(long, help = "Log filter, e.g. `debug` or `chronarc_clock=trace`.")]
    pub log: Option<String>,
}

impl Cli {
    /// Effective location fragment; `--debug` wins over the positional value.
    pub fn fragment(&self) -> &str {
        if self.debug {
            DEBUG_FRAGMENT
        } else {
            self.fragment.as_deref().unwrap_or("")
        }
    }

    pub fn scene_params(&self) -> Result<SceneParams> {
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            bail!("line width must be positive, got {}", self.line_width);
        }
        if !self.speed.is_finite() {
            bail!("speed must be finite, got {}", self.speed);
        }
        Ok(SceneParams {
            line_width: self.line_width,
            speed: self.speed,
            color: self.color,
            animate: !self.no_animate,
        })
    }

    /// Time override fields given on the command line.
    pub fn time_fields(&self) -> Vec<(TimeField, u32)> {
        [
            (TimeField::Hour, self.hour),
            (TimeField::Minute, self.minute),
            (TimeField::Second, self.second),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

/// Resolves the font file to load: `explicit` if given, else the first existing candidate.
pub fn find_font(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    FONT_CANDIDATES.iter().map(|p| PathBuf::from(*p)).find(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("chronarc").chain(args.iter().copied()))
    }

    // ── defaults ──────────────────────────────────────────────────────────

    #[test]
    fn defaults() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.fragment(), "");
        assert_eq!(cli.timezone, Tz::UTC);
        assert_eq!(cli.scene_params().unwrap(), SceneParams::default());
        assert!(cli.time_fields().is_empty());
        assert_eq!((cli.width, cli.height), (1280.0, 720.0));
    }

    // ── fragment ──────────────────────────────────────────────────────────

    #[test]
    fn positional_fragment() {
        assert_eq!(parse(&["#debug"]).unwrap().fragment(), "#debug");
        assert_eq!(parse(&["#other"]).unwrap().fragment(), "#other");
    }

    #[test]
    fn debug_flag_implies_fragment() {
        assert_eq!(parse(&["--debug"]).unwrap().fragment(), DEBUG_FRAGMENT);
    }

    // ── values ────────────────────────────────────────────────────────────

    #[test]
    fn parses_scene_values() {
        let cli = parse(&["--line-width", "4", "--speed", "-1.5", "--color", "#ff0000", "--no-animate"]).unwrap();
        let p = cli.scene_params().unwrap();
        assert_eq!(p.line_width, 4.0);
        assert_eq!(p.speed, -1.5);
        assert_eq!(p.color, Color::RED);
        assert!(!p.animate);
    }

    #[test]
    fn rejects_bad_color_and_timezone() {
        assert!(parse(&["--color", "orange"]).is_err());
        assert!(parse(&["--timezone", "Moon/Base"]).is_err());
    }

    #[test]
    fn parses_timezone() {
        let cli = parse(&["--timezone", "America/New_York"]).unwrap();
        assert_eq!(cli.timezone, Tz::America__New_York);
    }

    #[test]
    fn non_positive_line_width_is_rejected() {
        let cli = parse(&["--line-width", "0"]).unwrap();
        assert!(cli.scene_params().is_err());
    }

    #[test]
    fn time_fields_are_range_checked() {
        let cli = parse(&["--hour", "23", "--second", "5"]).unwrap();
        assert_eq!(cli.time_fields(), vec![(TimeField::Hour, 23), (TimeField::Second, 5)]);
        assert!(parse(&["--hour", "24"]).is_err());
        assert!(parse(&["--minute", "60"]).is_err());
    }

    // ── fonts ─────────────────────────────────────────────────────────────

    #[test]
    fn explicit_font_wins() {
        let p = Path::new("/tmp/some.ttf");
        assert_eq!(find_font(Some(p)), Some(p.to_path_buf()));
    }
}

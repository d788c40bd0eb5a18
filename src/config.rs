//! Render-request configuration
//!
//! The CLI reads a RON [`RenderRequest`]; validation here enforces the
//! invariants the render core assumes (positive dimensions and field of
//! view). Angle strings follow the observatory-form conventions: RA as
//! `"12h 34m 56s"` (seconds of time), DE as `"-05 10 15"` (arcseconds).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::points::PointSet;
use crate::render::Rgb;

/// Background specification: a grey intensity, a named color, or a triple.
///
/// In a request file: `bg_color: Intensity(40)`, `bg_color: Name("white")`
/// or `bg_color: Triple(10, 20, 30)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Background {
    Intensity(u8),
    Name(String),
    Triple(u8, u8, u8),
}

impl Default for Background {
    fn default() -> Self {
        Background::Name("white".to_string())
    }
}

impl Background {
    pub fn resolve(&self) -> Result<Rgb, RenderError> {
        match self {
            Background::Intensity(v) => Ok(Rgb::grey(*v)),
            Background::Triple(r, g, b) => Ok(Rgb::new(*r, *g, *b)),
            Background::Name(name) => match name.as_str() {
                "white" => Ok(Rgb::WHITE),
                "black" => Ok(Rgb::BLACK),
                "grey" | "gray" => Ok(Rgb::grey(128)),
                other => Err(RenderError::Configuration(format!(
                    "unknown background color {other:?}"
                ))),
            },
        }
    }
}

/// One render request, as read from the CLI's RON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderRequest {
    pub object_name: String,
    pub observatory_code: String,
    /// Observation epoch, `YYYY-MM-DDTHH:MM:SS`.
    pub image_date: String,
    pub image_width: usize,
    pub image_height: usize,
    /// Field of view spanned by the canvas, arcseconds per axis.
    pub field_width: u32,
    pub field_height: u32,
    #[serde(default)]
    pub flip_horizontally: bool,
    #[serde(default)]
    pub flip_vertically: bool,
    #[serde(default)]
    pub bg_color: Background,
    /// Optional manual field center, `"Hh Mm Ss"`. When set together with
    /// `center_de`, the windowed map re-centers on it.
    #[serde(default)]
    pub center_ra: Option<String>,
    /// Optional manual field center, `"±Dd Mm Ss"`.
    #[serde(default)]
    pub center_de: Option<String>,
    /// Directory holding `{object_name}.ron` point sets.
    #[serde(default = "default_points_dir")]
    pub points_dir: PathBuf,
    /// Directory rendered PNGs are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Also render the full-field overview map.
    #[serde(default)]
    pub overview: bool,
}

fn default_points_dir() -> PathBuf {
    PathBuf::from("points")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

impl RenderRequest {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Ok(ron::from_str(&text)?)
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(RenderError::Configuration(format!(
                "image dimensions must be positive, got {}x{}",
                self.image_width, self.image_height
            )));
        }
        if self.field_width == 0 || self.field_height == 0 {
            return Err(RenderError::Configuration(format!(
                "field of view must be positive, got {}x{} arcsec",
                self.field_width, self.field_height
            )));
        }
        if self.object_name.is_empty() {
            return Err(RenderError::Configuration(
                "object name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Center offset for the windowed map: manual center minus the
    /// provider's reference center, or (0,0) when no manual center is given.
    pub fn center_offsets(&self, set: &PointSet) -> Result<(i32, i32), RenderError> {
        match (&self.center_ra, &self.center_de) {
            (Some(ra), Some(de)) => {
                let ra_sec = parse_angle(ra)?;
                let de_sec = parse_angle(de)?;
                Ok((ra_sec - set.center_ra_sec, de_sec - set.center_de_sec))
            }
            _ => Ok((0, 0)),
        }
    }
}

/// Parse an astronomical angle string into total seconds.
///
/// Accepts `"12h 34m 56s"`, `"12:34:56"`, `"-05 10 15"` and close variants;
/// decimals after the seconds field are ignored. The sign applies to the
/// leading component only, matching the observatory form convention.
pub fn parse_angle(value: &str) -> Result<i32, RenderError> {
    let bad = || RenderError::Configuration(format!("invalid angle {value:?}"));
    let mut fields: Vec<i32> = Vec::with_capacity(3);
    let mut current = String::new();
    let mut seen_decimal = false;
    for c in value.trim().chars() {
        match c {
            // digits after a decimal point are ignored
            '0'..='9' => {
                if !seen_decimal {
                    current.push(c);
                }
            }
            '+' | '-' if current.is_empty() && fields.is_empty() => current.push(c),
            '.' => seen_decimal = true,
            'h' | 'm' | 's' | ':' | ' ' | '°' | '\'' | '"' => {
                if !current.is_empty() {
                    fields.push(current.parse().map_err(|_| bad())?);
                    current.clear();
                }
                seen_decimal = false;
            }
            _ => return Err(bad()),
        }
    }
    if !current.is_empty() {
        fields.push(current.parse().map_err(|_| bad())?);
    }
    let &[first, minutes, seconds] = fields.as_slice() else {
        return Err(bad());
    };
    if !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
        return Err(bad());
    }
    Ok(first * 3600 + minutes * 60 + seconds)
}

/// Format total seconds of RA as `"12h 34m 56s"`.
pub fn format_ra(total_sec: i32) -> String {
    let (h, m, s) = split_angle(total_sec);
    format!("{h}h {m}m {s}s")
}

/// Format total arcseconds of DE as `"-05°10'15\""`.
pub fn format_de(total_sec: i32) -> String {
    let (d, m, s) = split_angle(total_sec);
    format!("{d}\u{00b0}{m}'{s}\"")
}

fn split_angle(total_sec: i32) -> (i32, i32, i32) {
    let first = total_sec.div_euclid(3600);
    let rest = total_sec - first * 3600;
    (first, rest / 60, rest % 60)
}

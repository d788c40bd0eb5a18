//! The uncertainty-map renderer

use log::debug;

use super::canvas::Canvas;
use super::palette::{Palette, Rgb};
use super::transform::{fitting_scale, sec_to_pixel};
use crate::error::RenderError;
use crate::points::SkyPoint;

/// Windowing policy for a rendered map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Windowing {
    /// Apply the spec's center offset before projection and silently drop
    /// points landing outside the canvas. Uncertainty clouds routinely
    /// extend off-frame; clipping is expected, not an error.
    Clipped,
    /// Draw every point unconditionally: no re-centering, no bounds filter.
    /// The caller sizes the canvas to contain the whole field.
    FullField,
}

/// Canvas geometry, field of view and orientation for one rendered map.
#[derive(Debug, Clone)]
pub struct MapSpec {
    pub width_px: usize,
    pub height_px: usize,
    /// Angular extent the canvas spans horizontally, arcseconds.
    pub fov_ra_arcsec: u32,
    /// Angular extent the canvas spans vertically, arcseconds.
    pub fov_de_arcsec: u32,
    /// Re-centering applied before projection (Clipped policy only).
    pub center_ra_offset: i32,
    pub center_de_offset: i32,
    /// Mirror the finished image left-right.
    pub flip_ra: bool,
    /// Mirror the finished image top-bottom.
    pub flip_de: bool,
    pub background: Rgb,
    /// Field rotation in degrees. Reserved: carried but not applied; a real
    /// rotation would compose an affine transform before the flip step.
    pub rotation: f32,
}

impl MapSpec {
    pub fn new(width_px: usize, height_px: usize, fov_ra_arcsec: u32, fov_de_arcsec: u32) -> Self {
        Self {
            width_px,
            height_px,
            fov_ra_arcsec,
            fov_de_arcsec,
            center_ra_offset: 0,
            center_de_offset: 0,
            flip_ra: false,
            flip_de: false,
            background: Rgb::WHITE,
            rotation: 0.0,
        }
    }

    /// Spec for a full-field overview: same pixel dimensions, square
    /// arcsecond scale chosen with [`fitting_scale`] so the point extent
    /// exactly fills the larger-relative axis.
    pub fn full_field(width_px: usize, height_px: usize, points: &[SkyPoint], background: Rgb) -> Self {
        let extent = |f: fn(&SkyPoint) -> i32| -> u32 {
            let half = points.iter().map(|p| f(p).unsigned_abs()).max().unwrap_or(0);
            // +2 arcsec so edge markers get a little breathing room
            (2 * half + 2).max(1)
        };
        let ext_ra = extent(|p| p.ra_offset_arcsec);
        let ext_de = extent(|p| p.de_offset_arcsec);
        let scale = fitting_scale(width_px as u32, height_px as u32, ext_ra, ext_de);
        let fov_ra = (width_px as f64 / scale).ceil() as u32;
        let fov_de = (height_px as f64 / scale).ceil() as u32;
        let mut spec = Self::new(width_px, height_px, fov_ra.max(1), fov_de.max(1));
        spec.background = background;
        spec
    }

    fn validate(&self) -> Result<(), RenderError> {
        if self.width_px == 0 || self.height_px == 0 {
            return Err(RenderError::Configuration(format!(
                "canvas dimensions must be positive, got {}x{}",
                self.width_px, self.height_px
            )));
        }
        if self.fov_ra_arcsec == 0 || self.fov_de_arcsec == 0 {
            return Err(RenderError::Configuration(format!(
                "field of view must be positive, got {}x{} arcsec",
                self.fov_ra_arcsec, self.fov_de_arcsec
            )));
        }
        Ok(())
    }
}

/// Renders one point list onto one owned canvas.
///
/// The windowed and full-field variants share this single core; only the
/// [`Windowing`] policy differs. Markers draw independently and later draws
/// may overwrite earlier ones at shared pixels.
pub struct UncertaintyMap {
    spec: MapSpec,
    windowing: Windowing,
    palette: Palette,
    canvas: Canvas,
    points: Vec<SkyPoint>,
}

impl UncertaintyMap {
    pub fn new(spec: MapSpec, points: Vec<SkyPoint>, windowing: Windowing) -> Result<Self, RenderError> {
        spec.validate()?;
        let palette = Palette::for_background(spec.background);
        let canvas = Canvas::new(spec.width_px, spec.height_px, spec.background);
        Ok(Self {
            spec,
            windowing,
            palette,
            canvas,
            points,
        })
    }

    /// Project every point, draw its marker, then apply the flips.
    ///
    /// Every point's color resolves before anything is painted, so an
    /// unknown tag aborts the draw with the canvas still blank.
    pub fn draw(&mut self) -> Result<(), RenderError> {
        let placements = self.placements()?;
        let drawn = placements.len();
        for (x, y, color) in placements {
            self.canvas.draw_marker(x, y, color);
        }
        if self.spec.flip_ra {
            self.canvas.mirror_horizontal();
        }
        if self.spec.flip_de {
            self.canvas.mirror_vertical();
        }
        debug!(
            "drew {drawn} of {} markers ({:?})",
            self.points.len(),
            self.windowing
        );
        Ok(())
    }

    fn placements(&self) -> Result<Vec<(i32, i32, Rgb)>, RenderError> {
        let (center_ra, center_de) = match self.windowing {
            Windowing::Clipped => (self.spec.center_ra_offset, self.spec.center_de_offset),
            Windowing::FullField => (0, 0),
        };
        // increasing RA runs left on an un-flipped image (east is left),
        // hence the negation; DE is negated for the same reason against the
        // downward pixel axis
        let half_w = (self.spec.width_px / 2) as i64;
        let half_h = (self.spec.height_px / 2) as i64;

        // widened so a saturated projection plus the half-canvas offset
        // cannot overflow; full-field points may land arbitrarily far out
        let mut placements = Vec::with_capacity(self.points.len());
        for point in &self.points {
            let x = sec_to_pixel(
                -point.ra_offset_arcsec - center_ra,
                self.spec.width_px,
                self.spec.fov_ra_arcsec,
            ) as i64
                + half_w;
            let y = sec_to_pixel(
                -point.de_offset_arcsec - center_de,
                self.spec.height_px,
                self.spec.fov_de_arcsec,
            ) as i64
                + half_h;
            if self.windowing == Windowing::Clipped && !self.contains(x, y) {
                continue;
            }
            let color = self.palette.resolve(&point.color_tag)?;
            placements.push((clamp_px(x), clamp_px(y), color));
        }
        Ok(placements)
    }

    fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.spec.width_px as u64 && (y as u64) < self.spec.height_px as u64
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Persist the canvas as PNG. Terminal operation, not retried.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), RenderError> {
        self.canvas.save(path)
    }
}

/// Narrow a widened coordinate back to pixel space. Anything this far
/// off-canvas is skipped pixel by pixel anyway; the clamp range leaves room
/// for the marker ring offsets.
fn clamp_px(v: i64) -> i32 {
    const LIMIT: i64 = 1 << 30;
    v.clamp(-LIMIT, LIMIT) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(ra: i32, de: i32, tag: &str) -> SkyPoint {
        SkyPoint {
            ra_offset_arcsec: ra,
            de_offset_arcsec: de,
            color_tag: tag.to_string(),
        }
    }

    fn ring_at(canvas: &Canvas, x: i32, y: i32, color: Rgb) -> bool {
        [(-1, -1), (0, -1), (1, -1), (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0)]
            .iter()
            .all(|&(dx, dy)| canvas.get_pixel((x + dx) as usize, (y + dy) as usize) == color)
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let spec = MapSpec::new(0, 100, 100, 100);
        assert!(matches!(
            UncertaintyMap::new(spec, vec![], Windowing::Clipped),
            Err(RenderError::Configuration(_))
        ));
    }

    #[test]
    fn test_zero_fov_rejected() {
        let spec = MapSpec::new(100, 100, 100, 0);
        assert!(matches!(
            UncertaintyMap::new(spec, vec![], Windowing::Clipped),
            Err(RenderError::Configuration(_))
        ));
    }

    #[test]
    fn test_projection_places_ring() {
        // (10,10) arcsec -> pixel offset (-10,-10) -> (40,40) on 100x100
        let spec = MapSpec::new(100, 100, 100, 100);
        let mut map =
            UncertaintyMap::new(spec, vec![point(10, 10, "red")], Windowing::Clipped).unwrap();
        map.draw().unwrap();
        assert!(ring_at(map.canvas(), 40, 40, Rgb::new(229, 32, 39)));
        assert_eq!(map.canvas().get_pixel(40, 40), Rgb::WHITE);
    }

    #[test]
    fn test_center_offset_shifts_projection() {
        let mut spec = MapSpec::new(100, 100, 100, 100);
        spec.center_ra_offset = 10;
        spec.center_de_offset = 10;
        let mut map =
            UncertaintyMap::new(spec, vec![point(10, 10, "red")], Windowing::Clipped).unwrap();
        map.draw().unwrap();
        assert!(ring_at(map.canvas(), 30, 30, Rgb::new(229, 32, 39)));
    }

    #[test]
    fn test_clipped_point_not_drawn() {
        let spec = MapSpec::new(100, 100, 100, 100);
        let mut map =
            UncertaintyMap::new(spec, vec![point(500, 0, "red")], Windowing::Clipped).unwrap();
        map.draw().unwrap();
        let canvas = map.canvas();
        for y in 0..100 {
            for x in 0..100 {
                assert_eq!(canvas.get_pixel(x, y), Rgb::WHITE);
            }
        }
    }

    #[test]
    fn test_edge_point_is_drawn() {
        // lands exactly at (0,0): ra = 50 arcsec east, de = 50 arcsec north
        let spec = MapSpec::new(100, 100, 100, 100);
        let mut map =
            UncertaintyMap::new(spec, vec![point(50, 50, "blue")], Windowing::Clipped).unwrap();
        map.draw().unwrap();
        assert_eq!(map.canvas().get_pixel(1, 0), Rgb::new(32, 70, 246));
        assert_eq!(map.canvas().get_pixel(0, 1), Rgb::new(32, 70, 246));
        assert_eq!(map.canvas().get_pixel(0, 0), Rgb::WHITE);
    }

    #[test]
    fn test_far_corner_point_is_drawn() {
        // lands exactly at (99,99): ra = 49 arcsec west, de = 49 arcsec south
        let spec = MapSpec::new(100, 100, 100, 100);
        let mut map =
            UncertaintyMap::new(spec, vec![point(-49, -49, "blue")], Windowing::Clipped).unwrap();
        map.draw().unwrap();
        assert_eq!(map.canvas().get_pixel(98, 98), Rgb::new(32, 70, 246));
        assert_eq!(map.canvas().get_pixel(99, 98), Rgb::new(32, 70, 246));
        assert_eq!(map.canvas().get_pixel(98, 99), Rgb::new(32, 70, 246));
        assert_eq!(map.canvas().get_pixel(99, 99), Rgb::WHITE);
    }

    #[test]
    fn test_extreme_projection_does_not_overflow() {
        // 1 arcsec fov on a 100px axis: 100 px per arcsec, so a distant
        // point saturates the projection; adding the half-canvas offset
        // must not wrap
        let spec = MapSpec::new(100, 100, 1, 1);
        let points = vec![point(-30_000_000, 20_000_000, "red")];
        let mut full =
            UncertaintyMap::new(spec.clone(), points.clone(), Windowing::FullField).unwrap();
        full.draw().unwrap();

        let mut clipped = UncertaintyMap::new(spec, points, Windowing::Clipped).unwrap();
        clipped.draw().unwrap();
        for y in 0..100 {
            for x in 0..100 {
                assert_eq!(clipped.canvas().get_pixel(x, y), Rgb::WHITE);
            }
        }
    }

    #[test]
    fn test_full_field_ignores_center_offset() {
        let mut spec = MapSpec::new(100, 100, 100, 100);
        spec.center_ra_offset = 10;
        spec.center_de_offset = 10;
        let mut map =
            UncertaintyMap::new(spec, vec![point(10, 10, "red")], Windowing::FullField).unwrap();
        map.draw().unwrap();
        assert!(ring_at(map.canvas(), 40, 40, Rgb::new(229, 32, 39)));
    }

    #[test]
    fn test_full_field_draws_out_of_frame_point() {
        // way off-canvas: no clipping, no error, just no visible pixels
        let spec = MapSpec::new(100, 100, 100, 100);
        let mut map =
            UncertaintyMap::new(spec, vec![point(500, 0, "red")], Windowing::FullField).unwrap();
        map.draw().unwrap();
    }

    #[test]
    fn test_invalid_color_aborts_draw() {
        let spec = MapSpec::new(100, 100, 100, 100);
        let mut map = UncertaintyMap::new(
            spec,
            vec![point(10, 10, "red"), point(0, 0, "mauve")],
            Windowing::Clipped,
        )
        .unwrap();
        match map.draw() {
            Err(RenderError::InvalidColorKind(tag)) => assert_eq!(tag, "mauve"),
            other => panic!("expected InvalidColorKind, got {:?}", other.map(|_| ())),
        }
        // nothing was painted
        assert_eq!(map.canvas().get_pixel(40, 39), Rgb::WHITE);
    }

    #[test]
    fn test_flip_ra_mirrors_marker() {
        let mut spec = MapSpec::new(100, 100, 100, 100);
        spec.flip_ra = true;
        let mut map =
            UncertaintyMap::new(spec, vec![point(10, 10, "red")], Windowing::Clipped).unwrap();
        map.draw().unwrap();
        // marker at (40,40) mirrors to (99-40, 40) = (59,40)
        assert!(ring_at(map.canvas(), 59, 40, Rgb::new(229, 32, 39)));
    }

    #[test]
    fn test_flip_de_mirrors_marker() {
        let mut spec = MapSpec::new(100, 100, 100, 100);
        spec.flip_de = true;
        let mut map =
            UncertaintyMap::new(spec, vec![point(10, 10, "red")], Windowing::Clipped).unwrap();
        map.draw().unwrap();
        assert!(ring_at(map.canvas(), 40, 59, Rgb::new(229, 32, 39)));
    }

    #[test]
    fn test_full_field_spec_fits_extent() {
        let points = vec![point(-25, 5, "green"), point(25, -5, "green")];
        let spec = MapSpec::full_field(50, 50, &points, Rgb::WHITE);
        // extent is 52x12 arcsec; the wider axis governs the square scale
        assert!(spec.fov_ra_arcsec >= 52);
        assert_eq!(spec.center_ra_offset, 0);
        assert_eq!(spec.center_de_offset, 0);
        // scale is square: fov ratio matches the pixel aspect ratio
        assert_eq!(spec.fov_ra_arcsec, spec.fov_de_arcsec);
    }
}

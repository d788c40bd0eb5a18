//! Angular-to-pixel coordinate math
//!
//! The two canvas axes scale independently: the field can be non-square and
//! the horizontal/vertical arcsecond scales never couple.

/// Convert an angular offset in arcseconds to a pixel offset.
///
/// `axis_px` is the canvas size along the axis in pixels, `axis_fov_s` the
/// angular extent the canvas spans on that axis. The result is rounded to
/// the nearest pixel, ties away from zero.
///
/// `axis_fov_s` must be non-zero; [`MapSpec`](super::MapSpec) validation
/// guarantees this before any point is transformed.
pub fn sec_to_pixel(arc_s: i32, axis_px: usize, axis_fov_s: u32) -> i32 {
    let scale = axis_px as f64 / axis_fov_s as f64;
    (arc_s as f64 * scale).round() as i32
}

/// Uniform scale factor that fits content of `content_w` x `content_h` into
/// a `frame_w` x `frame_h` frame, such that the content's larger-relative
/// dimension exactly fills the frame.
pub fn fitting_scale(frame_w: u32, frame_h: u32, content_w: u32, content_h: u32) -> f64 {
    let frame_ratio = frame_w as f64 / frame_h as f64;
    let content_ratio = content_w as f64 / content_h as f64;
    if frame_ratio > content_ratio {
        frame_h as f64 / content_h as f64
    } else {
        frame_w as f64 / content_w as f64
    }
}

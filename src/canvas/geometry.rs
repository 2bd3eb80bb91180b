//! Rounded-rectangle path construction.
//!
//! Pure shape math: builds a closed polygon tracing a rectangle with
//! per-corner radii, corners flattened from quadratic curves.

use egui::{Pos2, Rect};

/// Segments each corner curve is flattened into.
const CORNER_SEGMENTS: usize = 4;

/// Per-corner radii of a rounded rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CornerRadii {
    /// Top left.
    pub tl: f32,
    /// Top right.
    pub tr: f32,
    /// Bottom right.
    pub br: f32,
    /// Bottom left.
    pub bl: f32,
}

impl CornerRadii {
    /// The same radius on all four corners.
    pub const fn uniform(radius: f32) -> Self {
        Self {
            tl: radius,
            tr: radius,
            br: radius,
            bl: radius,
        }
    }
}

/// Evaluates a quadratic curve from `p0` to `p1` with control point `ctrl`.
fn quad_point(p0: Pos2, ctrl: Pos2, p1: Pos2, t: f32) -> Pos2 {
    let u = 1.0 - t;
    Pos2::new(
        u * u * p0.x + 2.0 * u * t * ctrl.x + t * t * p1.x,
        u * u * p0.y + 2.0 * u * t * ctrl.y + t * t * p1.y,
    )
}

fn push_corner(path: &mut Vec<Pos2>, from: Pos2, ctrl: Pos2, to: Pos2) {
    for step in 1..=CORNER_SEGMENTS {
        let t = step as f32 / CORNER_SEGMENTS as f32;
        path.push(quad_point(from, ctrl, to, t));
    }
}

/// Builds the closed outline of `rect` with the given corner radii.
///
/// The path starts at the top edge just right of the top-left corner and
/// winds clockwise; callers fill it as a convex polygon.
pub fn rounded_rect_path(rect: Rect, radii: CornerRadii) -> Vec<Pos2> {
    let (x, y) = (rect.min.x, rect.min.y);
    let (w, h) = (rect.width(), rect.height());
    let CornerRadii { tl, tr, br, bl } = radii;

    let mut path = Vec::with_capacity(4 + 4 * CORNER_SEGMENTS);

    path.push(Pos2::new(x + tl, y));
    path.push(Pos2::new(x + w - tr, y));
    push_corner(
        &mut path,
        Pos2::new(x + w - tr, y),
        Pos2::new(x + w, y),
        Pos2::new(x + w, y + tr),
    );
    path.push(Pos2::new(x + w, y + h - br));
    push_corner(
        &mut path,
        Pos2::new(x + w, y + h - br),
        Pos2::new(x + w, y + h),
        Pos2::new(x + w - br, y + h),
    );
    path.push(Pos2::new(x + bl, y + h));
    push_corner(
        &mut path,
        Pos2::new(x + bl, y + h),
        Pos2::new(x, y + h),
        Pos2::new(x, y + h - bl),
    );
    path.push(Pos2::new(x, y + tl));
    push_corner(
        &mut path,
        Pos2::new(x, y + tl),
        Pos2::new(x, y),
        Pos2::new(x + tl, y),
    );

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    #[test]
    fn test_path_stays_inside_rect() {
        let rect = Rect::from_min_size(Pos2::new(10.0, 20.0), vec2(100.0, 50.0));
        let path = rounded_rect_path(rect, CornerRadii::uniform(5.0));
        for point in &path {
            assert!(rect.contains(*point), "{:?} escapes {:?}", point, rect);
        }
    }

    #[test]
    fn test_zero_radius_reduces_to_rectangle_corners() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(40.0, 30.0));
        let path = rounded_rect_path(rect, CornerRadii::default());
        for corner in [
            Pos2::new(0.0, 0.0),
            Pos2::new(40.0, 0.0),
            Pos2::new(40.0, 30.0),
            Pos2::new(0.0, 30.0),
        ] {
            assert!(
                path.iter().any(|p| (*p - corner).length() < 1e-4),
                "missing corner {:?}",
                corner
            );
        }
    }

    #[test]
    fn test_path_closes_where_it_started() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(40.0, 30.0));
        let radii = CornerRadii::uniform(6.0);
        let path = rounded_rect_path(rect, radii);
        let first = path.first().unwrap();
        let last = path.last().unwrap();
        // The final corner curve ends at the path's starting point.
        assert!((*first - *last).length() < 1e-4);
    }

    #[test]
    fn test_asymmetric_radii() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(40.0, 30.0));
        let path = rounded_rect_path(
            rect,
            CornerRadii {
                tl: 8.0,
                ..Default::default()
            },
        );
        // Sharp bottom-right corner is on the path, rounded top-left is not.
        assert!(path.iter().any(|p| (*p - Pos2::new(40.0, 30.0)).length() < 1e-4));
        assert!(!path.iter().any(|p| (*p - Pos2::new(0.0, 0.0)).length() < 1e-4));
    }
}

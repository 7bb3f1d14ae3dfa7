//! Glyph outline geometry
//!
//! Conversion from UFO contours to kurbo bez paths, bounding-box
//! queries, and affine transforms over outlines. A glyph's geometry is
//! a snapshot: any transform invalidates it, so callers re-measure
//! after every scale or translate.

use kurbo::{Affine, BezPath, Point, Rect, Shape};
use norad::{Contour, PointType};

/// Bounding box and derived extents of a single glyph outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphGeometry {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
    pub width: f64,
    pub height: f64,
}

impl GlyphGeometry {
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            xmin: rect.min_x(),
            ymin: rect.min_y(),
            xmax: rect.max_x(),
            ymax: rect.max_y(),
            width: rect.max_x() - rect.min_x(),
            height: rect.max_y() - rect.min_y(),
        }
    }

    /// Whether the outline has any extent in both directions.
    ///
    /// Zero-dimension outlines belong to combining/overlay marks and
    /// are left untouched by scaling.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// The same geometry under a uniform scale about the origin.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            xmin: self.xmin * factor,
            ymin: self.ymin * factor,
            xmax: self.xmax * factor,
            ymax: self.ymax * factor,
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// Convert a UFO transformation record to a kurbo affine.
pub fn affine_from_ufo(t: &norad::AffineTransform) -> Affine {
    Affine::new([
        t.x_scale, t.xy_scale, t.yx_scale, t.y_scale, t.x_offset, t.y_offset,
    ])
}

/// Convert a kurbo affine back to a UFO transformation record.
pub fn affine_to_ufo(affine: Affine) -> norad::AffineTransform {
    let [x_scale, xy_scale, yx_scale, y_scale, x_offset, y_offset] = affine.as_coeffs();
    norad::AffineTransform {
        x_scale,
        xy_scale,
        yx_scale,
        y_scale,
        x_offset,
        y_offset,
    }
}

/// Apply an affine transform to every point of the given contours.
///
/// Scaling is about the origin, matching how glyph outlines are scaled
/// relative to the baseline.
pub fn transform_contours(contours: &mut [Contour], affine: Affine) {
    for contour in contours.iter_mut() {
        for point in contour.points.iter_mut() {
            let p = affine * Point::new(point.x, point.y);
            point.x = p.x;
            point.y = p.y;
        }
    }
}

/// Tight bounding box of a set of contours, or `None` when they contain
/// no points at all.
pub fn contours_bounds(contours: &[Contour]) -> Option<Rect> {
    let mut bounds: Option<Rect> = None;
    for contour in contours {
        if contour.points.is_empty() {
            continue;
        }
        let bbox = contour_to_bezpath(contour).bounding_box();
        bounds = Some(match bounds {
            Some(b) => b.union(bbox),
            None => bbox,
        });
    }
    bounds
}

/// Convert a single UFO contour into a kurbo path.
///
/// UFO closed contours have no explicit move point: the first point is
/// the start position and the segment leading back to it is defined by
/// the first point's own type.
pub fn contour_to_bezpath(contour: &Contour) -> BezPath {
    let mut path = BezPath::new();
    let points = &contour.points;
    if points.is_empty() {
        return path;
    }

    let first = Point::new(points[0].x, points[0].y);
    path.move_to(first);

    let mut pending: Vec<Point> = Vec::new();
    // Walk the remaining points, then close the loop with the first
    // point's type defining the final segment.
    let on_points = points
        .iter()
        .skip(1)
        .map(|p| (Point::new(p.x, p.y), p.typ.clone()))
        .chain(std::iter::once((first, points[0].typ.clone())));

    for (pt, typ) in on_points {
        match typ {
            PointType::Move => {
                path.move_to(pt);
                pending.clear();
            }
            PointType::Line => {
                path.line_to(pt);
                pending.clear();
            }
            PointType::OffCurve => {
                pending.push(pt);
            }
            PointType::Curve => {
                emit_cubic(&mut path, &pending, pt);
                pending.clear();
            }
            PointType::QCurve => {
                emit_quads(&mut path, &pending, pt);
                pending.clear();
            }
        }
    }

    path.close_path();
    path
}

fn emit_cubic(path: &mut BezPath, pending: &[Point], end: Point) {
    match pending.len() {
        0 => path.line_to(end),
        1 => path.quad_to(pending[0], end),
        n => path.curve_to(pending[n - 2], pending[n - 1], end),
    }
}

/// TrueType-style quadratic run: interior off-curves imply on-curve
/// points at their midpoints.
fn emit_quads(path: &mut BezPath, pending: &[Point], end: Point) {
    if pending.is_empty() {
        path.line_to(end);
        return;
    }
    for (i, &cp) in pending.iter().enumerate() {
        let seg_end = if i == pending.len() - 1 {
            end
        } else {
            let next = pending[i + 1];
            Point::new((cp.x + next.x) / 2.0, (cp.y + next.y) / 2.0)
        };
        path.quad_to(cp, seg_end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::rect_contour;

    #[test]
    fn rectangle_bounds() {
        let contour = rect_contour(10.0, -20.0, 110.0, 180.0);
        let bounds = contours_bounds(&[contour]).unwrap();
        let geom = GlyphGeometry::from_rect(bounds);
        assert_eq!(geom.xmin, 10.0);
        assert_eq!(geom.ymin, -20.0);
        assert_eq!(geom.xmax, 110.0);
        assert_eq!(geom.ymax, 180.0);
        assert_eq!(geom.width, 100.0);
        assert_eq!(geom.height, 200.0);
    }

    #[test]
    fn empty_contours_have_no_bounds() {
        assert!(contours_bounds(&[]).is_none());
    }

    #[test]
    fn scale_about_origin() {
        let mut contours = vec![rect_contour(100.0, 100.0, 200.0, 200.0)];
        transform_contours(&mut contours, Affine::scale_non_uniform(2.0, 0.5));
        let geom = GlyphGeometry::from_rect(contours_bounds(&contours).unwrap());
        assert_eq!(geom.xmin, 200.0);
        assert_eq!(geom.xmax, 400.0);
        assert_eq!(geom.ymin, 50.0);
        assert_eq!(geom.ymax, 100.0);
    }

    #[test]
    fn translate_preserves_extent() {
        let mut contours = vec![rect_contour(0.0, 0.0, 50.0, 50.0)];
        transform_contours(&mut contours, Affine::translate((-10.0, 25.0)));
        let geom = GlyphGeometry::from_rect(contours_bounds(&contours).unwrap());
        assert_eq!(geom.xmin, -10.0);
        assert_eq!(geom.ymin, 25.0);
        assert_eq!(geom.width, 50.0);
        assert_eq!(geom.height, 50.0);
    }

    #[test]
    fn ufo_affine_conversion() {
        let t = norad::AffineTransform {
            x_scale: 2.0,
            xy_scale: 0.0,
            yx_scale: 0.0,
            y_scale: 2.0,
            x_offset: 10.0,
            y_offset: -5.0,
        };
        let p = affine_from_ufo(&t) * Point::new(3.0, 4.0);
        assert_eq!(p, Point::new(16.0, 3.0));
    }
}

//! Geometry primitives: native bounding boxes and canonical page rectangles.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Coordinate origin convention of a native bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordOrigin {
    /// The y axis grows downward from the top-left page corner (canonical).
    #[default]
    TopLeft,
    /// The y axis grows upward from the bottom-left page corner (PDF native).
    BottomLeft,
}

/// A rectangle in the producing pipeline's native coordinate system.
///
/// Edges are named after the page sides they touch: `l`/`r` on the x axis,
/// `t`/`b` on the y axis. With a bottom-left origin, `t > b` since both are
/// distances from the page bottom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub l: f32,
    /// Top edge
    pub t: f32,
    /// Right edge
    pub r: f32,
    /// Bottom edge
    pub b: f32,
    /// Origin convention of the coordinates
    #[serde(default)]
    pub coord_origin: CoordOrigin,
}

impl BoundingBox {
    /// Create a box already expressed in top-left-origin coordinates.
    pub fn top_left(l: f32, t: f32, r: f32, b: f32) -> Self {
        Self {
            l,
            t,
            r,
            b,
            coord_origin: CoordOrigin::TopLeft,
        }
    }

    /// Create a box expressed in bottom-left-origin coordinates.
    pub fn bottom_left(l: f32, t: f32, r: f32, b: f32) -> Self {
        Self {
            l,
            t,
            r,
            b,
            coord_origin: CoordOrigin::BottomLeft,
        }
    }

    /// Convert to the canonical top-left-origin convention.
    ///
    /// A no-op for boxes that are already canonical. For bottom-left input
    /// the vertical axis is flipped against `page_height`; the inverse
    /// transformation is the same flip.
    pub fn to_top_left_origin(&self, page_height: f32) -> BoundingBox {
        match self.coord_origin {
            CoordOrigin::TopLeft => *self,
            CoordOrigin::BottomLeft => BoundingBox {
                l: self.l,
                t: page_height - self.t,
                r: self.r,
                b: page_height - self.b,
                coord_origin: CoordOrigin::TopLeft,
            },
        }
    }

    /// Project this box onto `page` as a canonical [`Rect`].
    ///
    /// The caller is responsible for origin conversion first; this only
    /// enforces coordinate ordering.
    pub fn to_rect(&self, page: u32) -> Rect {
        Rect::new(page, self.l, self.t, self.r, self.b)
    }
}

/// A page-relative rectangle in canonical top-left-origin coordinates.
///
/// Invariants: `x1 <= x2`, `y1 <= y2`, `page >= 1`. Field names follow the
/// Papermage box schema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Page number (1-indexed)
    pub page: u32,
    /// Left edge
    pub x1: f32,
    /// Top edge
    pub y1: f32,
    /// Right edge
    pub x2: f32,
    /// Bottom edge
    pub y2: f32,
}

impl Rect {
    /// Create a rectangle, enforcing coordinate ordering.
    pub fn new(page: u32, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            page,
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Rectangle width.
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Rectangle height.
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Grow this rectangle to cover `other`.
    pub fn merge(&mut self, other: &Rect) {
        self.x1 = self.x1.min(other.x1);
        self.y1 = self.y1.min(other.y1);
        self.x2 = self.x2.max(other.x2);
        self.y2 = self.y2.max(other.y2);
    }

    /// Minimal rectangle covering all inputs, computed per coordinate.
    ///
    /// The result carries the first rectangle's page. Returns
    /// [`Error::EmptyUnion`] for zero inputs; callers must special-case
    /// the empty collection rather than rely on a sentinel.
    pub fn enclosing(rects: &[Rect]) -> Result<Rect> {
        let (first, rest) = rects.split_first().ok_or(Error::EmptyUnion)?;
        let mut out = *first;
        for rect in rest {
            out.merge(rect);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_left_is_identity() {
        let bbox = BoundingBox::top_left(10.0, 20.0, 110.0, 40.0);
        assert_eq!(bbox.to_top_left_origin(792.0), bbox);
    }

    #[test]
    fn test_bottom_left_flips_vertical_axis() {
        // Bottom-left: top edge 700, bottom edge 650, on a 792pt page.
        let bbox = BoundingBox::bottom_left(10.0, 700.0, 110.0, 650.0);
        let canonical = bbox.to_top_left_origin(792.0);
        assert_eq!(canonical.coord_origin, CoordOrigin::TopLeft);
        assert_eq!(canonical.t, 92.0);
        assert_eq!(canonical.b, 142.0);
        assert_eq!(canonical.l, 10.0);
        assert_eq!(canonical.r, 110.0);

        let rect = canonical.to_rect(1);
        assert_eq!(rect.y1, 92.0);
        assert_eq!(rect.y2, 142.0);
    }

    #[test]
    fn test_rect_new_enforces_ordering() {
        let rect = Rect::new(1, 100.0, 50.0, 10.0, 20.0);
        assert!(rect.x1 <= rect.x2);
        assert!(rect.y1 <= rect.y2);
        assert_eq!(rect.x1, 10.0);
        assert_eq!(rect.y2, 50.0);
    }

    #[test]
    fn test_enclosing_per_coordinate() {
        let r1 = Rect::new(1, 0.0, 0.0, 2.0, 2.0);
        let r2 = Rect::new(1, 1.0, -1.0, 3.0, 1.5);
        let out = Rect::enclosing(&[r1, r2]).unwrap();
        assert_eq!(out.x1, r1.x1.min(r2.x1));
        assert_eq!(out.y1, r1.y1.min(r2.y1));
        assert_eq!(out.x2, r1.x2.max(r2.x2));
        assert_eq!(out.y2, r1.y2.max(r2.y2));
        assert_eq!(out.page, 1);
    }

    #[test]
    fn test_enclosing_single_is_identity() {
        let r = Rect::new(3, 5.0, 5.0, 6.0, 9.0);
        assert_eq!(Rect::enclosing(&[r]).unwrap(), r);
    }

    #[test]
    fn test_enclosing_empty_is_an_error() {
        assert!(matches!(Rect::enclosing(&[]), Err(Error::EmptyUnion)));
    }
}

//! Geometric primitives for layout analysis.
//!
//! Layout elements arrive as polygons (ordered point lists drawn by the
//! upstream layout tool); everything in this crate works off their
//! axis-aligned bounding boxes.

use serde::{Deserialize, Serialize};

/// A 2D point in page space, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use broadsheet::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding box `(min x, min y, max x, max y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    /// Left edge (minimum x)
    pub x1: f32,
    /// Top edge (minimum y)
    pub y1: f32,
    /// Right edge (maximum x)
    pub x2: f32,
    /// Bottom edge (maximum y)
    pub y2: f32,
}

impl BBox {
    /// Create a bounding box from explicit edges.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Compute the bounding box of a polygon's points.
    ///
    /// Fewer than 2 points is malformed geometry; the box degenerates to
    /// `(0, 0, 0, 0)` so the shape still participates in classification with
    /// an uninformative center rather than aborting the page.
    ///
    /// # Examples
    ///
    /// ```
    /// use broadsheet::geometry::{BBox, Point};
    ///
    /// let bbox = BBox::of_points(&[
    ///     Point::new(10.0, 40.0),
    ///     Point::new(110.0, 20.0),
    ///     Point::new(60.0, 90.0),
    /// ]);
    /// assert_eq!(bbox, BBox::new(10.0, 20.0, 110.0, 90.0));
    ///
    /// assert_eq!(BBox::of_points(&[Point::new(5.0, 5.0)]), BBox::new(0.0, 0.0, 0.0, 0.0));
    /// ```
    pub fn of_points(points: &[Point]) -> Self {
        if points.len() < 2 {
            return Self::new(0.0, 0.0, 0.0, 0.0);
        }
        let mut bbox = Self::new(f32::MAX, f32::MAX, f32::MIN, f32::MIN);
        for p in points {
            bbox.x1 = bbox.x1.min(p.x);
            bbox.y1 = bbox.y1.min(p.y);
            bbox.x2 = bbox.x2.max(p.x);
            bbox.y2 = bbox.y2.max(p.y);
        }
        bbox
    }

    /// Horizontal center of the box.
    ///
    /// # Examples
    ///
    /// ```
    /// use broadsheet::geometry::BBox;
    ///
    /// let bbox = BBox::new(100.0, 0.0, 300.0, 50.0);
    /// assert_eq!(bbox.center_x(), 200.0);
    /// ```
    pub fn center_x(&self) -> f32 {
        (self.x1 + self.x2) / 2.0
    }

    /// Top edge y-coordinate (page coordinates grow downward).
    pub fn top(&self) -> f32 {
        self.y1
    }

    /// Bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y2
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Check whether the horizontal extents of two boxes overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use broadsheet::geometry::BBox;
    ///
    /// let a = BBox::new(0.0, 0.0, 100.0, 10.0);
    /// let b = BBox::new(90.0, 500.0, 200.0, 510.0);
    /// let c = BBox::new(150.0, 0.0, 200.0, 10.0);
    ///
    /// assert!(a.overlaps_horizontally(&b));
    /// assert!(!a.overlaps_horizontally(&c));
    /// ```
    pub fn overlaps_horizontally(&self, other: &BBox) -> bool {
        !(other.x2 < self.x1 || other.x1 > self.x2)
    }
}

use anyhow::Result;
use anyhow::ensure;

use crate::geometry::Transformation;
use crate::geometry::geo_traits::{CollidesWith, DistanceTo, Transformable};
use crate::geometry::primitives::Point;

/// Line segment between two [`Point`]s
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

impl Edge {
    pub fn new(start: Point, end: Point) -> Result<Self> {
        ensure!(start != end, "degenerate edge, {start:?} == {end:?}");
        Ok(Edge { start, end })
    }

    pub fn vector(&self) -> Point {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn centroid(&self) -> Point {
        Point(
            (self.start.0 + self.end.0) / 2.0,
            (self.start.1 + self.end.1) / 2.0,
        )
    }

    /// Linear interpolation between start (`f == 0.0`) and end (`f == 1.0`)
    pub fn point_at(&self, f: f64) -> Point {
        self.start + self.vector().scale(f)
    }

    pub fn x_min(&self) -> f64 {
        f64::min(self.start.0, self.end.0)
    }

    pub fn y_min(&self) -> f64 {
        f64::min(self.start.1, self.end.1)
    }

    pub fn x_max(&self) -> f64 {
        f64::max(self.start.0, self.end.0)
    }

    pub fn y_max(&self) -> f64 {
        f64::max(self.start.1, self.end.1)
    }
}

impl Transformable for Edge {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        let Edge { start, end } = self;
        start.transform(t);
        end.transform(t);

        self
    }
}

impl CollidesWith<Edge> for Edge {
    #[inline(always)]
    fn collides_with(&self, other: &Edge) -> bool {
        if f64::max(self.x_min(), other.x_min()) > f64::min(self.x_max(), other.x_max())
            || f64::max(self.y_min(), other.y_min()) > f64::min(self.y_max(), other.y_max())
        {
            //bounding boxes do not overlap
            return false;
        }

        //based on: https://en.wikipedia.org/wiki/Line%E2%80%93line_intersection#Given_two_points_on_each_line_segment
        let Point(x1, y1) = self.start;
        let Point(x2, y2) = self.end;
        let Point(x3, y3) = other.start;
        let Point(x4, y4) = other.end;

        let t_nom = (x2 - x4) * (y4 - y3) - (y2 - y4) * (x4 - x3);
        let t_denom = (x2 - x1) * (y4 - y3) - (y2 - y1) * (x4 - x3);
        let u_nom = (x2 - x4) * (y2 - y1) - (y2 - y4) * (x2 - x1);
        let u_denom = (x2 - x1) * (y4 - y3) - (y2 - y1) * (x4 - x3);

        if t_denom == 0.0 || u_denom == 0.0 {
            //parallel edges
            false
        } else {
            let t = t_nom / t_denom;
            let u = u_nom / u_denom;
            (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_edge_is_rejected() {
        assert!(Edge::new(Point(1.0, 1.0), Point(1.0, 1.0)).is_err());
    }

    #[test]
    fn point_at_interpolates_linearly() {
        let e = Edge::new(Point(0.0, 0.0), Point(100.0, 0.0)).unwrap();
        assert_eq!(e.point_at(0.5), Point(50.0, 0.0));
        assert_eq!(e.point_at(0.1), Point(10.0, 0.0));
        assert_eq!(e.point_at(0.9), Point(90.0, 0.0));
    }

    #[test]
    fn crossing_edges_collide() {
        let e1 = Edge::new(Point(0.0, 0.0), Point(10.0, 10.0)).unwrap();
        let e2 = Edge::new(Point(0.0, 10.0), Point(10.0, 0.0)).unwrap();
        let e3 = Edge::new(Point(20.0, 0.0), Point(30.0, 0.0)).unwrap();
        assert!(e1.collides_with(&e2));
        assert!(!e1.collides_with(&e3));
    }
}

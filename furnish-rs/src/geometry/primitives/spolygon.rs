use anyhow::{Result, bail};
use itertools::Itertools;

use crate::geometry::Transformation;
use crate::geometry::geo_traits::{CollidesWith, Shape, Transformable};
use crate::geometry::primitives::Edge;
use crate::geometry::primitives::Point;
use crate::geometry::primitives::Rect;
use crate::util::FPA;

/// Two convex footprints are only considered colliding if they overlap in more
/// than `OVERLAP_TOL` along every separating axis. Poses computed from wall
/// offsets regularly produce exactly touching edges, which must not collide.
pub const OVERLAP_TOL: f64 = 1e-6;

/// A simple polygon: a closed shape with a finite number of vertices and edges,
/// which does not intersect itself and contains no holes.
/// [read more](https://en.wikipedia.org/wiki/Simple_polygon)
#[derive(Clone, Debug)]
pub struct SPolygon {
    /// Set of points that form the polygon
    pub vertices: Vec<Point>,
    /// Bounding box
    pub bbox: Rect,
    /// Area of its interior
    pub area: f64,
}

impl SPolygon {
    pub fn new(mut points: Vec<Point>) -> Result<Self> {
        if points.len() < 3 {
            bail!("simple polygon must have at least 3 points: {points:?}");
        }
        if points.iter().unique().count() != points.len() {
            bail!("simple polygon should not contain duplicate points: {points:?}");
        }

        let area = match SPolygon::calculate_area(&points) {
            0.0 => bail!("simple polygon has no area: {points:?}"),
            area if area < 0.0 => {
                //vertices are normalized to a positive shoelace area
                points.reverse();
                -area
            }
            area => area,
        };

        let bbox = SPolygon::generate_bounding_box(&points);

        Ok(SPolygon {
            vertices: points,
            bbox,
            area,
        })
    }

    pub fn vertex(&self, i: usize) -> Point {
        self.vertices[i]
    }

    pub fn edge(&self, i: usize) -> Edge {
        let j = (i + 1) % self.n_vertices();
        Edge::new(self.vertices[i], self.vertices[j]).expect("polygon contains degenerate edge")
    }

    pub fn edge_iter(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.n_vertices()).map(move |i| self.edge(i))
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn generate_bounding_box(points: &[Point]) -> Rect {
        let (mut x_min, mut y_min) = (f64::MAX, f64::MAX);
        let (mut x_max, mut y_max) = (f64::MIN, f64::MIN);

        for point in points.iter() {
            x_min = x_min.min(point.0);
            y_min = y_min.min(point.1);
            x_max = x_max.max(point.0);
            y_max = y_max.max(point.1);
        }
        Rect::new(x_min, y_min, x_max, y_max)
    }

    //https://en.wikipedia.org/wiki/Shoelace_formula
    pub fn calculate_area(points: &[Point]) -> f64 {
        let mut sigma: f64 = 0.0;
        for i in 0..points.len() {
            //next point
            let j = (i + 1) % points.len();

            let (x_i, y_i) = points[i].into();
            let (x_j, y_j) = points[j].into();

            sigma += (y_i + y_j) * (x_i - x_j)
        }

        0.5 * sigma
    }

    /// True iff `self` and `other` overlap in area, assuming both are convex.
    /// Exactly touching edges or corners (within [`OVERLAP_TOL`]) do not count
    /// as an overlap. Separating axis theorem over the edge normals of both polygons.
    pub fn overlaps(&self, other: &SPolygon) -> bool {
        if !self.bbox.collides_with(&other.bbox) {
            return false;
        }

        let axes = self
            .edge_iter()
            .chain(other.edge_iter())
            .map(|e| Point(-e.vector().1, e.vector().0).unit());

        for axis in axes {
            let (min_a, max_a) = project(&self.vertices, &axis);
            let (min_b, max_b) = project(&other.vertices, &axis);

            let overlap = f64::min(max_a, max_b) - f64::max(min_a, min_b);
            if overlap <= OVERLAP_TOL {
                return false;
            }
        }
        true
    }
}

fn project(vertices: &[Point], axis: &Point) -> (f64, f64) {
    let (mut min, mut max) = (f64::MAX, f64::MIN);
    for v in vertices {
        let d = v.dot(axis);
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}

impl Shape for SPolygon {
    fn centroid(&self) -> Point {
        //based on: https://en.wikipedia.org/wiki/Centroid#Of_a_polygon
        let area = self.area();
        let mut c_x = 0.0;
        let mut c_y = 0.0;

        for i in 0..self.n_vertices() {
            let j = (i + 1) % self.n_vertices();
            let Point(x_i, y_i) = self.vertex(i);
            let Point(x_j, y_j) = self.vertex(j);
            c_x += (x_i + x_j) * (x_i * y_j - x_j * y_i);
            c_y += (y_i + y_j) * (x_i * y_j - x_j * y_i);
        }

        c_x /= 6.0 * area;
        c_y /= 6.0 * area;

        (c_x, c_y).into()
    }

    fn area(&self) -> f64 {
        self.area
    }

    fn bbox(&self) -> Rect {
        self.bbox
    }
}

impl Transformable for SPolygon {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        let SPolygon {
            vertices,
            bbox,
            area: _,
        } = self;

        vertices.iter_mut().for_each(|p| {
            p.transform(t);
        });

        //regenerate bounding box
        *bbox = SPolygon::generate_bounding_box(vertices);

        self
    }
}

impl CollidesWith<Point> for SPolygon {
    fn collides_with(&self, point: &Point) -> bool {
        //based on the ray casting algorithm: https://en.wikipedia.org/wiki/Point_in_polygon#Ray_casting_algorithm
        match self.bbox.collides_with(point) {
            false => false,
            true => {
                //horizontal ray shot to the right.
                //Starting from the point to another point that is certainly outside the shape
                let point_outside = Point(self.bbox.x_max + self.bbox.width(), point.1);
                let ray = Edge {
                    start: *point,
                    end: point_outside,
                };

                let mut n_intersections = 0;
                for edge in self.edge_iter() {
                    //Check if the ray does not go through (or almost through) a vertex.
                    //This can result in funky behaviour, which could cause incorrect results.
                    //Therefore we handle this case explicitly.
                    let (s_x, s_y) = (FPA(edge.start.0), FPA(edge.start.1));
                    let (e_x, e_y) = (FPA(edge.end.0), FPA(edge.end.1));
                    let (p_x, p_y) = (FPA(point.0), FPA(point.1));

                    if (s_y == p_y && s_x > p_x) || (e_y == p_y && e_x > p_x) {
                        //in this case, the ray passes through (or dangerously close to) a vertex
                        //only count an intersection if the edge is below the ray
                        if s_y < p_y || e_y < p_y {
                            n_intersections += 1;
                        }
                    } else if ray.collides_with(&edge) {
                        n_intersections += 1;
                    }
                }

                n_intersections % 2 == 1
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, size: f64) -> SPolygon {
        SPolygon::new(vec![
            Point(x, y),
            Point(x + size, y),
            Point(x + size, y + size),
            Point(x, y + size),
        ])
        .unwrap()
    }

    #[test]
    fn area_and_centroid_of_a_square() {
        let sq = square(0.0, 0.0, 10.0);
        assert_eq!(sq.area(), 100.0);
        assert_eq!(sq.centroid(), Point(5.0, 5.0));
    }

    #[test]
    fn degenerate_polygons_are_rejected() {
        assert!(SPolygon::new(vec![Point(0.0, 0.0), Point(1.0, 0.0)]).is_err());
        assert!(
            SPolygon::new(vec![Point(0.0, 0.0), Point(1.0, 0.0), Point(2.0, 0.0)]).is_err(),
            "collinear points enclose no area"
        );
    }

    #[test]
    fn point_in_polygon() {
        let sq = square(0.0, 0.0, 10.0);
        assert!(sq.collides_with(&Point(5.0, 5.0)));
        assert!(!sq.collides_with(&Point(15.0, 5.0)));
        assert!(!sq.collides_with(&Point(5.0, -5.0)));

        //L-shaped (non-convex) room
        let l_shape = SPolygon::new(vec![
            Point(0.0, 0.0),
            Point(20.0, 0.0),
            Point(20.0, 10.0),
            Point(10.0, 10.0),
            Point(10.0, 20.0),
            Point(0.0, 20.0),
        ])
        .unwrap();
        assert!(l_shape.collides_with(&Point(5.0, 15.0)));
        assert!(!l_shape.collides_with(&Point(15.0, 15.0)));
    }

    #[test]
    fn overlapping_squares_overlap() {
        assert!(square(0.0, 0.0, 10.0).overlaps(&square(5.0, 5.0, 10.0)));
        assert!(square(0.0, 0.0, 10.0).overlaps(&square(2.0, 2.0, 4.0)));
    }

    #[test]
    fn disjoint_squares_do_not_overlap() {
        assert!(!square(0.0, 0.0, 10.0).overlaps(&square(20.0, 0.0, 10.0)));
    }

    #[test]
    fn exactly_touching_squares_do_not_overlap() {
        //shared edge
        assert!(!square(0.0, 0.0, 10.0).overlaps(&square(10.0, 0.0, 10.0)));
        //shared corner
        assert!(!square(0.0, 0.0, 10.0).overlaps(&square(10.0, 10.0, 10.0)));
    }
}

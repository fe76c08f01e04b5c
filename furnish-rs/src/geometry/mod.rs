/// Traits shared by geometric primitives
pub mod geo_traits;

/// The primitives themselves
pub mod primitives;

mod transformation;

#[doc(inline)]
pub use transformation::Transformation;

use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::{Point, SPolygon};

/// Distance at which a point is probed along a candidate normal to decide
/// whether it points into the room interior.
pub const NORMAL_PROBE_DIST: f64 = 5.0;

/// Computes the unit normal of `wall_vector`, oriented towards the interior of `room`.
/// The initial perpendicular `(-dy, dx)` is kept if a probe point offset from
/// `point_on_wall` along it lies inside the room polygon, and negated otherwise.
pub fn inward_normal(point_on_wall: Point, wall_vector: Point, room: &SPolygon) -> Point {
    let normal = Point(-wall_vector.1, wall_vector.0).unit();
    let probe = point_on_wall + normal.scale(NORMAL_PROBE_DIST);
    match room.collides_with(&probe) {
        true => normal,
        false => normal.scale(-1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inward_normal_points_into_the_room() {
        // y-down pixel space: the top wall's inward normal points towards +y
        let room = SPolygon::new(vec![
            Point(0.0, 0.0),
            Point(100.0, 0.0),
            Point(100.0, 100.0),
            Point(0.0, 100.0),
        ])
        .unwrap();

        let n_top = inward_normal(Point(50.0, 0.0), Point(100.0, 0.0), &room);
        assert_eq!(n_top, Point(0.0, 1.0));

        let n_right = inward_normal(Point(100.0, 50.0), Point(0.0, 100.0), &room);
        assert_eq!(n_right, Point(-1.0, 0.0));
    }
}

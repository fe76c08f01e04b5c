//! The generic wall-fitting search: given a footprint and a room, find a
//! collision-free, room-contained, wall-adjacent pose. Searches are pure; they
//! return the accepted [`Pose`] and leave committing to the caller.

use furnish_rs::entities::{Pose, Room, Wall};
use furnish_rs::geometry::geo_traits::{CollidesWith, Shape};
use furnish_rs::geometry::primitives::SPolygon;
use log::trace;

/// Fractional positions along a wall, tried in this fixed priority order:
/// center first, then the quarter points, then near the edges.
pub const WALL_FRACTIONS: [f64; 5] = [0.5, 0.25, 0.75, 0.1, 0.9];

/// Candidate orientations for a `w x h` footprint: as-is and, unless the item
/// is square or the caller fixed the orientation, with the sides swapped.
pub fn candidate_orientations(w: f64, h: f64, fixed: bool) -> Vec<(f64, f64)> {
    if fixed || w == h {
        vec![(w, h)]
    } else {
        vec![(w, h), (h, w)]
    }
}

/// Searches for a valid pose of a `w x h` footprint against a single wall.
///
/// For each orientation whose wall-parallel extent fits the wall, the five
/// [`WALL_FRACTIONS`] are probed: the footprint is centered at the fractional
/// position, offset inward by half its wall-perpendicular extent so its outer
/// edge touches the wall, and rotated to the wall's angle. The first pose that
/// collides with no placed footprint and whose centroid lies inside the room
/// boundary is returned; there is no optimization over candidates.
pub fn fit_on_wall(
    w: f64,
    h: f64,
    wall: &Wall,
    room: &Room,
    placed: &[SPolygon],
    fixed_orientation: bool,
) -> Option<Pose> {
    let wall_len = wall.length();
    let angle = wall.angle_deg();
    let normal = wall.inward_normal(&room.boundary);

    for (f_w, f_h) in candidate_orientations(w, h, fixed_orientation) {
        if f_w > wall_len {
            continue;
        }
        for fraction in WALL_FRACTIONS {
            let position = wall.point_at(fraction) + normal.scale(f_h / 2.0);
            let pose = Pose::new(position, angle, f_w, f_h);
            if check_pose(&pose, room, placed).is_some() {
                trace!(
                    "[{}] fit {f_w:.0}x{f_h:.0} at fraction {fraction} of wall {:?}",
                    room.id,
                    wall.start()
                );
                return Some(pose);
            }
        }
    }
    None
}

/// Tries [`fit_on_wall`] against every wall in the given order (longest first
/// when coming from [`Room::walls`]) and returns on the first success. `None`
/// means the item is unplaceable in this room; it is never retried later.
pub fn fit_against_any_wall(
    w: f64,
    h: f64,
    walls: &[Wall],
    room: &Room,
    placed: &[SPolygon],
    fixed_orientation: bool,
) -> Option<Pose> {
    walls
        .iter()
        .find_map(|wall| fit_on_wall(w, h, wall, room, placed, fixed_orientation))
}

/// Validates a single explicit pose: no collision with any placed footprint and
/// footprint centroid inside the room boundary. Returns the footprint polygon
/// on acceptance so the caller can accumulate it into the placed set.
pub fn check_pose(pose: &Pose, room: &Room, placed: &[SPolygon]) -> Option<SPolygon> {
    let footprint = pose.footprint();
    let collision = placed.iter().any(|p| footprint.overlaps(p));
    match !collision && room.boundary.collides_with(&footprint.centroid()) {
        true => Some(footprint),
        false => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use furnish_rs::entities::{RoomKind, RotatedRect};
    use furnish_rs::geometry::primitives::Point;
    use float_cmp::approx_eq;
    use test_case::test_case;

    fn rect_room(width: f64, height: f64) -> Room {
        Room::new(
            "test_room",
            RoomKind::Bedroom,
            vec![
                Point(0.0, 0.0),
                Point(width, 0.0),
                Point(width, height),
                Point(0.0, height),
            ],
            RotatedRect {
                center: Point(width / 2.0, height / 2.0),
                width,
                height,
                angle_deg: 0.0,
            },
        )
        .unwrap()
    }

    #[test_case(50.0, 50.0, false, vec![(50.0, 50.0)]; "square items are never swapped")]
    #[test_case(50.0, 30.0, false, vec![(50.0, 30.0), (30.0, 50.0)]; "free orientation tries both")]
    #[test_case(50.0, 30.0, true, vec![(50.0, 30.0)]; "fixed orientation is respected")]
    fn candidate_orientation_sets(w: f64, h: f64, fixed: bool, expected: Vec<(f64, f64)>) {
        assert_eq!(candidate_orientations(w, h, fixed), expected);
    }

    #[test]
    fn bed_lands_centered_on_the_longest_wall() {
        //400x300 room, 180x120 bed, empty placed set: the search must succeed
        //on the longest wall, at the 0.5 fraction, long side wall-parallel
        let room = rect_room(400.0, 300.0);
        let walls = room.walls();

        let pose = fit_against_any_wall(180.0, 120.0, &walls, &room, &[], false).unwrap();
        assert!(approx_eq!(f64, pose.position.0, 200.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, pose.position.1, 60.0, epsilon = 1e-9));
        assert_eq!(pose.angle_deg, 0.0);
        assert_eq!((pose.width, pose.height), (180.0, 120.0));
    }

    #[test]
    fn search_is_deterministic() {
        let room = rect_room(250.0, 180.0);
        let walls = room.walls();
        let blocker = Pose::new(Point(125.0, 30.0), 0.0, 100.0, 60.0).footprint();

        let a = fit_on_wall(90.0, 40.0, &walls[0], &room, &[blocker.clone()], false);
        let b = fit_on_wall(90.0, 40.0, &walls[0], &room, &[blocker], false);
        assert_eq!(a, b);
        assert!(a.is_some());
    }

    #[test]
    fn oversized_item_is_rejected_by_the_wall_length_check() {
        let room = rect_room(100.0, 80.0);
        let walls = room.walls();
        assert!(fit_against_any_wall(150.0, 150.0, &walls, &room, &[], false).is_none());
    }

    #[test]
    fn orientation_swap_rescues_an_item_too_long_for_the_short_wall() {
        //only the swapped orientation fits the 80-length wall
        let room = rect_room(100.0, 80.0);
        let short_wall = &room.walls()[3];
        assert!(short_wall.length() < 100.0);

        let pose = fit_on_wall(90.0, 40.0, short_wall, &room, &[], false).unwrap();
        assert_eq!((pose.width, pose.height), (40.0, 90.0));
    }

    #[test]
    fn fractions_are_walked_in_priority_order() {
        //block the center of the top wall; the item must land at fraction 0.25
        let room = rect_room(400.0, 300.0);
        let top_wall = &room.walls()[0];
        let blocker = Pose::new(Point(200.0, 25.0), 0.0, 80.0, 50.0).footprint();

        let pose = fit_on_wall(60.0, 40.0, top_wall, &room, &[blocker], false).unwrap();
        assert!(approx_eq!(f64, pose.position.0, 100.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, pose.position.1, 20.0, epsilon = 1e-9));
    }

    #[test]
    fn rejected_when_every_fraction_collides() {
        let room = rect_room(100.0, 100.0);
        let walls = room.walls();
        let first = fit_against_any_wall(90.0, 90.0, &walls, &room, &[], false).unwrap();
        let placed = vec![first.footprint()];

        //a second 90x90 item cannot coexist with the first in a 100x100 room
        assert!(fit_against_any_wall(90.0, 90.0, &walls, &room, &placed, false).is_none());
    }
}

use furnish_rs::entities::{FurnitureInstance, Pose, Wall};
use furnish_rs::geometry::geo_traits::DistanceTo;
use furnish_rs::geometry::primitives::Point;

use crate::categories::{BATHTUB, SHOWER, SINK};
use crate::strategies::{RoomCtx, RoomStrategy, take_category};
use crate::wall_fit::{candidate_orientations, fit_against_any_wall};

/// Bathroom composition: sink and bathtub are forced long-side-parallel against
/// the walls, the shower tucks into a corner along the bisector of the two
/// meeting walls, and the commode takes whatever wall span remains.
pub struct BathroomStrategy;

impl RoomStrategy for BathroomStrategy {
    fn furnish(&self, mut items: Vec<FurnitureInstance>, ctx: &mut RoomCtx) {
        let sink = take_category(&mut items, SINK);
        let bathtub = take_category(&mut items, BATHTUB);
        let shower = take_category(&mut items, SHOWER);

        if let Some(sink) = sink {
            place_long_side_parallel(sink, ctx);
        }
        if let Some(bathtub) = bathtub {
            place_long_side_parallel(bathtub, ctx);
        }
        if let Some(shower) = shower {
            place_shower(shower, ctx);
        }

        ctx.place_remaining(items);
    }
}

/// Wall placement with the longer side forced wall-parallel, every wall in turn.
fn place_long_side_parallel(item: FurnitureInstance, ctx: &mut RoomCtx) {
    let long = f64::max(item.width, item.height);
    let short = f64::min(item.width, item.height);

    match fit_against_any_wall(long, short, &ctx.walls, ctx.room, &ctx.placed_footprints, true) {
        Some(pose) => ctx.commit(item, pose),
        None => {
            ctx.fail(&item);
        }
    }
}

/// The shower preferentially targets a corner: at each point shared by two
/// walls, a pose offset inward along the bisector of the meeting walls is
/// probed with both orientations and two candidate angles.
fn place_shower(shower: FurnitureInstance, ctx: &mut RoomCtx) {
    let corners = corners(&ctx.walls, ctx.config.corner_tolerance);
    let offset = shower.width.hypot(shower.height) / 2.0;

    let mut shower = shower;
    for corner in corners {
        let position = corner.point + corner.bisector.scale(offset);
        for (f_w, f_h) in candidate_orientations(shower.width, shower.height, false) {
            for angle in [corner.wall_angle, corner.wall_angle + 45.0] {
                let pose = Pose::new(position, angle, f_w, f_h);
                match ctx.try_explicit(shower, pose) {
                    Ok(()) => return,
                    Err(rejected) => shower = rejected,
                }
            }
        }
    }
    ctx.place_against_wall(shower);
}

struct Corner {
    point: Point,
    /// Unit vector splitting the angle between the two meeting walls, pointing
    /// into the room
    bisector: Point,
    /// Angle of the first of the two meeting walls
    wall_angle: f64,
}

/// Detects room corners by matching wall endpoints within `tolerance`.
fn corners(walls: &[Wall], tolerance: f64) -> Vec<Corner> {
    let mut corners = vec![];
    for (i, a) in walls.iter().enumerate() {
        for b in walls.iter().skip(i + 1) {
            let candidates = [
                (a.end(), a.start(), b.start(), b.end()),
                (a.end(), a.start(), b.end(), b.start()),
                (a.start(), a.end(), b.start(), b.end()),
                (a.start(), a.end(), b.end(), b.start()),
            ];
            for (pa, other_a, pb, other_b) in candidates {
                if pa.distance_to(&pb) <= tolerance {
                    let bisector = ((other_a - pa).unit() + (other_b - pb).unit()).unit();
                    if bisector.norm() > 0.0 {
                        corners.push(Corner {
                            point: pa,
                            bisector,
                            wall_angle: a.angle_deg(),
                        });
                    }
                    break;
                }
            }
        }
    }
    corners
}

#[cfg(test)]
mod tests {
    use super::*;
    use furnish_rs::entities::{Room, RoomKind, RotatedRect};

    #[test]
    fn rectangular_room_has_four_corners() {
        let room = Room::new(
            "bathroom_1",
            RoomKind::Bathroom,
            vec![
                Point(0.0, 0.0),
                Point(200.0, 0.0),
                Point(200.0, 150.0),
                Point(0.0, 150.0),
            ],
            RotatedRect {
                center: Point(100.0, 75.0),
                width: 200.0,
                height: 150.0,
                angle_deg: 0.0,
            },
        )
        .unwrap();

        let corners = corners(&room.walls(), 1.0);
        assert_eq!(corners.len(), 4);
        //every bisector points into the room interior
        for corner in &corners {
            let probe = corner.point + corner.bisector.scale(5.0);
            assert!(probe.0 > 0.0 && probe.0 < 200.0);
            assert!(probe.1 > 0.0 && probe.1 < 150.0);
        }
    }
}

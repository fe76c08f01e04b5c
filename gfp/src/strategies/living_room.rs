use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use furnish_rs::entities::{FurnitureInstance, Pose, Wall};
use furnish_rs::geometry::geo_traits::{DistanceTo, Shape};
use furnish_rs::geometry::primitives::Point;

use crate::categories::{DINING_TABLE, KITCHEN, L_SOFA, SOFA, STOVE, TABLE, TV};
use crate::strategies::{RoomCtx, RoomStrategy, take_categories, take_category};
use crate::wall_fit::fit_on_wall;

/// Fixed fallback angles for the dining table after the room's own wall angles.
const DINING_FALLBACK_ANGLES: [f64; 4] = [0.0, 45.0, 90.0, 135.0];

/// Living room composition: the kitchen counter claims a short wall, the stove
/// joins it, the television maximizes its distance from the kitchen, the
/// largest sofa faces the television across the viewing axis, a coffee table
/// sits on that axis, and a dining table gravitates to the centroid away from
/// both the kitchen and the television.
pub struct LivingRoomStrategy;

impl RoomStrategy for LivingRoomStrategy {
    fn furnish(&self, mut items: Vec<FurnitureInstance>, ctx: &mut RoomCtx) {
        let kitchen = take_category(&mut items, KITCHEN);
        let stove = take_category(&mut items, STOVE);
        let tv = take_category(&mut items, TV);
        let mut sofas = take_categories(&mut items, &[L_SOFA, SOFA]);
        let coffee_table = take_category(&mut items, TABLE);
        let dining_table = take_category(&mut items, DINING_TABLE);

        let kitchen_fit = kitchen.and_then(|k| place_kitchen(k, ctx));
        if let Some(stove) = stove {
            place_stove(stove, kitchen_fit.as_ref(), ctx);
        }

        let kitchen_pose = kitchen_fit.map(|(pose, _)| pose);
        let tv_pose = tv.and_then(|tv| place_tv(tv, kitchen_pose, ctx));

        //the largest sofa faces the television; the rest are placed generically
        sofas.sort_by_key(|s| Reverse(OrderedFloat(s.area())));
        let sofa_pose = match sofas.is_empty() {
            true => None,
            false => place_sofa(sofas.remove(0), tv_pose, ctx),
        };

        if let Some(table) = coffee_table {
            place_coffee_table(table, tv_pose, sofa_pose, ctx);
        }
        if let Some(table) = dining_table {
            place_dining_table(table, kitchen_pose, tv_pose, ctx);
        }

        items.extend(sofas);
        ctx.place_remaining(items);
    }
}

/// The counter is forced long-side-parallel onto one of the two shortest walls,
/// shortest first. Returns the committed pose and the claimed wall.
fn place_kitchen(kitchen: FurnitureInstance, ctx: &mut RoomCtx) -> Option<(Pose, Wall)> {
    let (long, short) = long_short(&kitchen);
    let two_shortest: Vec<Wall> = ctx.walls.iter().rev().take(2).copied().collect();

    for wall in two_shortest {
        if let Some(pose) = fit_on_wall(long, short, &wall, ctx.room, &ctx.placed_footprints, true)
        {
            ctx.commit(kitchen, pose);
            return Some((pose, wall));
        }
    }
    ctx.fail(&kitchen);
    None
}

/// The stove adopts the counter's orientation and tries four adjacent spots
/// along the wall-parallel axis: right-near, left-near, right-far, left-far.
fn place_stove(stove: FurnitureInstance, kitchen_fit: Option<&(Pose, Wall)>, ctx: &mut RoomCtx) {
    let Some((kitchen, wall)) = kitchen_fit else {
        ctx.place_against_wall(stove);
        return;
    };

    let (long, short) = long_short(&stove);
    let along = wall.vector().unit();
    let normal = wall.inward_normal(&ctx.room.boundary);
    //keep the stove's outer edge on the wall line, accounting for its own depth
    let base = kitchen.position + normal.scale((short - kitchen.height) / 2.0);

    let near = (kitchen.width + long) / 2.0;
    let far = near + long;

    let mut stove = stove;
    for offset in [near, -near, far, -far] {
        let pose = Pose::new(base + along.scale(offset), kitchen.angle_deg, long, short);
        match ctx.try_explicit(stove, pose) {
            Ok(()) => return,
            Err(rejected) => stove = rejected,
        }
    }
    ctx.place_against_wall(stove);
}

/// The television goes on the wall whose midpoint is farthest from the kitchen,
/// maximizing separation between the cooking and seating areas.
fn place_tv(tv: FurnitureInstance, kitchen_pose: Option<Pose>, ctx: &mut RoomCtx) -> Option<Pose> {
    let Some(kitchen) = kitchen_pose else {
        ctx.place_against_wall(tv);
        return ctx.committed_pose(TV);
    };

    let mut walls = ctx.walls.clone();
    walls.sort_by_key(|w| Reverse(OrderedFloat(w.midpoint().distance_to(&kitchen.position))));

    let pose = walls.iter().find_map(|wall| {
        fit_on_wall(
            tv.width,
            tv.height,
            wall,
            ctx.room,
            &ctx.placed_footprints,
            false,
        )
    });
    match pose {
        Some(pose) => {
            ctx.commit(tv, pose);
            Some(pose)
        }
        None => {
            ctx.fail(&tv);
            None
        }
    }
}

/// The sofa sits on the viewing axis: offset from the television towards the
/// room centroid by half its depth plus a fixed clearance, facing back at it.
fn place_sofa(sofa: FurnitureInstance, tv_pose: Option<Pose>, ctx: &mut RoomCtx) -> Option<Pose> {
    let category = sofa.category.clone();
    let explicit = tv_pose.and_then(|tv| {
        let axis = (ctx.room.boundary.centroid() - tv.position).unit();
        match axis.norm() {
            0.0 => None,
            _ => Some(Pose::new(
                tv.position
                    + axis.scale(sofa.height / 2.0 + ctx.config.sofa_tv_clearance),
                tv.angle_deg + 180.0,
                sofa.width,
                sofa.height,
            )),
        }
    });

    let fallback = match explicit {
        Some(pose) => match ctx.try_explicit(sofa, pose) {
            Ok(()) => return ctx.committed_pose(&category),
            Err(sofa) => sofa,
        },
        None => sofa,
    };
    ctx.place_against_wall(fallback);
    ctx.committed_pose(&category)
}

/// The coffee table sits at the midpoint of the viewing axis, oriented like the
/// television.
fn place_coffee_table(
    table: FurnitureInstance,
    tv_pose: Option<Pose>,
    sofa_pose: Option<Pose>,
    ctx: &mut RoomCtx,
) {
    let explicit = match (tv_pose, sofa_pose) {
        (Some(tv), Some(sofa)) => Some(Pose::new(
            (tv.position + sofa.position).scale(0.5),
            tv.angle_deg,
            table.width,
            table.height,
        )),
        _ => None,
    };

    let fallback = match explicit {
        Some(pose) => match ctx.try_explicit(table, pose) {
            Ok(()) => return,
            Err(table) => table,
        },
        None => table,
    };
    ctx.place_against_wall(fallback);
}

/// The dining table gravitates to the room centroid, biased away from both the
/// kitchen and the television; wall-parallel angles are preferred for a tidy
/// look before resorting to fixed angles.
fn place_dining_table(
    table: FurnitureInstance,
    kitchen_pose: Option<Pose>,
    tv_pose: Option<Pose>,
    ctx: &mut RoomCtx,
) {
    let centroid = ctx.room.boundary.centroid();
    let bias = [kitchen_pose, tv_pose]
        .iter()
        .flatten()
        .map(|p| (centroid - p.position).unit())
        .fold(Point(0.0, 0.0), |acc, v| acc + v);

    let position = match bias.norm() {
        0.0 => centroid,
        _ => centroid + bias.unit().scale(f64::max(table.width, table.height) / 2.0),
    };

    let wall_angles: Vec<f64> = ctx.walls.iter().map(|w| w.angle_deg()).collect();
    let mut table = table;
    for angle in wall_angles.into_iter().chain(DINING_FALLBACK_ANGLES) {
        let pose = Pose::new(position, angle, table.width, table.height);
        match ctx.try_explicit(table, pose) {
            Ok(()) => return,
            Err(rejected) => table = rejected,
        }
    }
    ctx.place_against_wall(table);
}

fn long_short(item: &FurnitureInstance) -> (f64, f64) {
    (
        f64::max(item.width, item.height),
        f64::min(item.width, item.height),
    )
}

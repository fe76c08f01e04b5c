use std::cmp::Reverse;

use ordered_float::OrderedFloat;

use furnish_rs::entities::{FurnitureInstance, Pose};
use furnish_rs::geometry::geo_traits::DistanceTo;
use furnish_rs::geometry::primitives::Point;

use crate::categories::{BED, BEDSIDE, SINGLE_BED, STUDY};
use crate::strategies::{RoomCtx, RoomStrategy, take_categories, take_category};
use crate::wall_fit::fit_on_wall;

/// Strategy shared by all bedroom variants; which category list applies is
/// decided upstream by the room map.
///
/// The bed is compulsory and conventionally sits against a long wall: the two
/// longest walls are tried before any wall. Bedside items go at fixed offsets
/// on either side of the bed, the study desk on the walls farthest from it.
pub struct BedroomStrategy;

impl RoomStrategy for BedroomStrategy {
    fn furnish(&self, mut items: Vec<FurnitureInstance>, ctx: &mut RoomCtx) {
        let bed = take_category(&mut items, BED).or_else(|| take_category(&mut items, SINGLE_BED));
        let mut bedsides = take_categories(&mut items, &[BEDSIDE]);
        let study = take_category(&mut items, STUDY);

        //only two explicit beside-the-bed spots exist; surplus bedside items
        //join the generic leftovers
        items.extend(bedsides.split_off(bedsides.len().min(2)));

        let bed_pose = bed.and_then(|bed| place_bed(bed, ctx));

        for (bedside, side) in bedsides.into_iter().zip([1.0, -1.0]) {
            place_bedside(bedside, bed_pose, side, ctx);
        }

        if let Some(study) = study {
            place_study(study, bed_pose, ctx);
        }

        ctx.place_remaining(items);
    }
}

fn place_bed(bed: FurnitureInstance, ctx: &mut RoomCtx) -> Option<Pose> {
    let two_longest = &ctx.walls[..ctx.walls.len().min(2)];
    let pose = two_longest
        .iter()
        .find_map(|wall| {
            fit_on_wall(
                bed.width,
                bed.height,
                wall,
                ctx.room,
                &ctx.placed_footprints,
                false,
            )
        })
        .or_else(|| {
            crate::wall_fit::fit_against_any_wall(
                bed.width,
                bed.height,
                &ctx.walls,
                ctx.room,
                &ctx.placed_footprints,
                false,
            )
        });

    match pose {
        Some(pose) => {
            ctx.commit(bed, pose);
            Some(pose)
        }
        None => {
            ctx.fail_compulsory(&bed);
            None
        }
    }
}

/// A bedside table goes next to the bed's head end, offset along the bed's
/// wall-parallel axis; `side` selects left or right.
fn place_bedside(bedside: FurnitureInstance, bed_pose: Option<Pose>, side: f64, ctx: &mut RoomCtx) {
    let explicit = bed_pose.map(|bed| {
        let along = unit_at_angle(bed.angle_deg);
        let offset = (bed.width + bedside.width) / 2.0;
        Pose::new(
            bed.position + along.scale(side * offset),
            bed.angle_deg,
            bedside.width,
            bedside.height,
        )
    });

    let fallback = match explicit {
        Some(pose) => match ctx.try_explicit(bedside, pose) {
            Ok(()) => return,
            Err(bedside) => bedside,
        },
        None => bedside,
    };
    ctx.place_against_wall(fallback);
}

/// The study desk conventionally faces away from the sleeping area: the two
/// walls whose midpoints are farthest from the bed are tried first.
fn place_study(study: FurnitureInstance, bed_pose: Option<Pose>, ctx: &mut RoomCtx) {
    if let Some(bed) = bed_pose {
        let mut walls = ctx.walls.clone();
        walls.sort_by_key(|w| Reverse(OrderedFloat(w.midpoint().distance_to(&bed.position))));

        let pose = walls[..walls.len().min(2)].iter().find_map(|wall| {
            fit_on_wall(
                study.width,
                study.height,
                wall,
                ctx.room,
                &ctx.placed_footprints,
                false,
            )
        });
        if let Some(pose) = pose {
            ctx.commit(study, pose);
            return;
        }
    }
    ctx.place_against_wall(study);
}

fn unit_at_angle(angle_deg: f64) -> Point {
    let rad = angle_deg.to_radians();
    Point(rad.cos(), rad.sin())
}

//! Room-type-specific composition strategies. Each strategy decides the order
//! and special rules for the items drawn for its room, ultimately committing
//! poses found by the wall-fit search or computed explicitly. Anything a
//! strategy does not specially handle falls back to generic wall placement.

use std::cmp::Reverse;

use log::{debug, error};
use ordered_float::OrderedFloat;

use furnish_rs::entities::{FurnitureInstance, Pose, Room, RoomKind, Wall};
use furnish_rs::geometry::primitives::SPolygon;

use crate::config::GFPConfig;
use crate::stats::PlacementStats;
use crate::wall_fit::{check_pose, fit_against_any_wall};

mod bathroom;
mod bedroom;
mod default;
mod living_room;

pub use bathroom::BathroomStrategy;
pub use bedroom::BedroomStrategy;
pub use default::DefaultStrategy;
pub use living_room::LivingRoomStrategy;

/// A placement strategy for one family of room kinds.
pub trait RoomStrategy {
    fn furnish(&self, items: Vec<FurnitureInstance>, ctx: &mut RoomCtx);
}

/// Closed dispatch from room kind to strategy. The three bedroom variants share
/// one implementation; hallways and empty rooms use the default strategy.
pub fn strategy_for(kind: RoomKind) -> &'static dyn RoomStrategy {
    match kind {
        RoomKind::LivingRoom => &LivingRoomStrategy,
        RoomKind::Bedroom | RoomKind::BedroomMaster | RoomKind::BedroomGuest => &BedroomStrategy,
        RoomKind::Bathroom => &BathroomStrategy,
        RoomKind::Hallway | RoomKind::EmptyRoom => &DefaultStrategy,
    }
}

/// Per-room placement state: the collision set, the committed items and a
/// handle to the run statistics. Nothing escapes the room except through
/// [`RoomCtx::into_placed`].
pub struct RoomCtx<'a> {
    pub room: &'a Room,
    /// Walls of the room, longest first
    pub walls: Vec<Wall>,
    /// Footprints of everything committed so far in this room
    pub placed_footprints: Vec<SPolygon>,
    pub config: &'a GFPConfig,
    placed_items: Vec<FurnitureInstance>,
    stats: &'a mut PlacementStats,
}

impl<'a> RoomCtx<'a> {
    pub fn new(room: &'a Room, config: &'a GFPConfig, stats: &'a mut PlacementStats) -> Self {
        RoomCtx {
            walls: room.walls(),
            placed_footprints: vec![],
            placed_items: vec![],
            room,
            config,
            stats,
        }
    }

    /// Commits an accepted pose: the instance's placement is written once, its
    /// footprint joins the collision set and the counters are updated.
    pub fn commit(&mut self, mut item: FurnitureInstance, pose: Pose) {
        self.placed_footprints.push(pose.footprint());
        debug!(
            "[{}] placed '{}' at ({:.1}, {:.1}), {:.0}°",
            self.room.id, item.category, pose.position.0, pose.position.1, pose.angle_deg
        );
        item.commit(pose);
        self.stats.record_placed(self.room.kind);
        self.placed_items.push(item);
    }

    /// Reports an unplaceable item: omitted from the result, counters updated,
    /// processing continues.
    pub fn fail(&mut self, item: &FurnitureInstance) {
        debug!("[{}] no valid pose for '{}'", self.room.id, item.category);
        self.stats.record_failed(self.room.kind);
    }

    /// Like [`RoomCtx::fail`], but for items whose absence leaves the room
    /// materially incomplete (e.g. a bedroom without its bed).
    pub fn fail_compulsory(&mut self, item: &FurnitureInstance) {
        error!(
            "[{}] could not place compulsory '{}'",
            self.room.id, item.category
        );
        self.stats.record_failed(self.room.kind);
    }

    /// Generic wall placement for a single item: any wall, free orientation.
    pub fn place_against_wall(&mut self, item: FurnitureInstance) -> bool {
        match fit_against_any_wall(
            item.width,
            item.height,
            &self.walls,
            self.room,
            &self.placed_footprints,
            false,
        ) {
            Some(pose) => {
                self.commit(item, pose);
                true
            }
            None => {
                self.fail(&item);
                false
            }
        }
    }

    /// Validates `pose` and commits `item` at it, or hands the item back for a
    /// fallback path.
    pub fn try_explicit(
        &mut self,
        item: FurnitureInstance,
        pose: Pose,
    ) -> Result<(), FurnitureInstance> {
        match check_pose(&pose, self.room, &self.placed_footprints) {
            Some(_) => {
                self.commit(item, pose);
                Ok(())
            }
            None => Err(item),
        }
    }

    /// Bulkiest items first, each against any wall: the shared tail of every
    /// strategy.
    pub fn place_remaining(&mut self, mut items: Vec<FurnitureInstance>) {
        items.sort_by_key(|f| Reverse(OrderedFloat(f.area())));
        for item in items {
            self.place_against_wall(item);
        }
    }

    /// The pose committed for the most recently placed item of `category`.
    pub fn committed_pose(&self, category: &str) -> Option<Pose> {
        self.placed_items
            .iter()
            .rev()
            .find(|f| f.category == category)
            .and_then(|f| f.placement)
    }

    pub fn into_placed(self) -> Vec<FurnitureInstance> {
        self.placed_items
    }
}

/// Removes and returns the first item of `category`, preserving order of the rest.
pub(crate) fn take_category(
    items: &mut Vec<FurnitureInstance>,
    category: &str,
) -> Option<FurnitureInstance> {
    let i = items.iter().position(|f| f.category == category)?;
    Some(items.remove(i))
}

/// Removes and returns all items matching any of `categories`.
pub(crate) fn take_categories(
    items: &mut Vec<FurnitureInstance>,
    categories: &[&str],
) -> Vec<FurnitureInstance> {
    let mut taken = vec![];
    let mut i = 0;
    while i < items.len() {
        if categories.contains(&items[i].category.as_str()) {
            taken.push(items.remove(i));
        } else {
            i += 1;
        }
    }
    taken
}

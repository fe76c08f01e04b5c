use std::cmp::Reverse;
use std::collections::HashMap;

use anyhow::{Result, ensure};
use log::info;
use ordered_float::OrderedFloat;
use serde::Serialize;

use furnish_rs::entities::{FurnitureSpec, PlacedFurniture, Room, RoomKind};
use furnish_rs::geometry::geo_traits::Shape;

use crate::config::GFPConfig;
use crate::pool::FurniturePool;
use crate::stats::PlacementStats;
use crate::strategies::{RoomCtx, strategy_for};

/// Drives furniture placement across all rooms of a floor plan.
///
/// Rooms are processed strictly sequentially in supplied order; the pool is a
/// single shared resource mutated in place, so earlier rooms have first claim
/// on scarce categories. Single-threaded by design: every placement decision is
/// a pure function of the room's placed set and the pool's remaining stock.
pub struct Placer {
    rooms: Vec<Room>,
    pool: FurniturePool,
    config: GFPConfig,
}

impl Placer {
    /// Builds the pool from the catalog and duplicates essential categories so
    /// every room of a kind can be guaranteed its required items. Fails on a
    /// non-positive unit ratio, which would blow every footprint up to
    /// infinity at pool build.
    pub fn new(rooms: Vec<Room>, specs: &[FurnitureSpec], config: GFPConfig) -> Result<Self> {
        ensure!(
            config.unit_ratio.is_finite() && config.unit_ratio > 0.0,
            "unit_ratio must be positive and finite, got {}",
            config.unit_ratio
        );
        let mut pool = FurniturePool::build(specs, config.unit_ratio);

        let mut room_counts: HashMap<RoomKind, usize> = HashMap::new();
        for room in &rooms {
            *room_counts.entry(room.kind).or_default() += 1;
        }
        pool.ensure_essential(&room_counts, &config.essential_map);

        Ok(Placer {
            rooms,
            pool,
            config,
        })
    }

    /// Furnishes every room and returns the per-room placements plus the
    /// aggregate per-room-kind statistics.
    pub fn place_all(mut self) -> Placement {
        let mut stats = PlacementStats::default();
        let mut layouts = vec![];

        for room in &self.rooms {
            let items = self.pool.draw_for_room(room.kind, &self.config.room_map);
            info!(
                "[{}] furnishing {} with {} item(s)",
                room.id,
                room.kind,
                items.len()
            );

            let mut ctx = RoomCtx::new(room, &self.config, &mut stats);
            strategy_for(room.kind).furnish(items, &mut ctx);

            let furniture = ctx
                .into_placed()
                .iter()
                .filter_map(PlacedFurniture::from_instance)
                .collect();
            layouts.push(RoomLayout {
                room_id: room.id.clone(),
                kind: room.kind,
                furniture,
            });
        }

        info!("placement complete:\n{stats}");
        Placement {
            rooms: layouts,
            stats,
        }
    }
}

/// Relabels rooms when more than one plain bedroom exists: the largest (by
/// boundary area) becomes the master bedroom, the rest guest bedrooms.
pub fn differentiate_bedrooms(rooms: &mut [Room]) {
    let mut bedrooms: Vec<usize> = rooms
        .iter()
        .enumerate()
        .filter(|(_, r)| r.kind == RoomKind::Bedroom)
        .map(|(i, _)| i)
        .collect();
    if bedrooms.len() < 2 {
        return;
    }

    bedrooms.sort_by_key(|&i| Reverse(OrderedFloat(rooms[i].boundary.area())));
    let master = bedrooms[0];
    rooms[master].kind = RoomKind::BedroomMaster;
    info!("identified '{}' as master bedroom", rooms[master].id);
    for &guest in &bedrooms[1..] {
        rooms[guest].kind = RoomKind::BedroomGuest;
        info!("identified '{}' as guest bedroom", rooms[guest].id);
    }
}

/// The furnished floor plan: ordered per-room placements for downstream
/// rendering, plus run statistics.
#[derive(Debug, Clone, Serialize)]
pub struct Placement {
    pub rooms: Vec<RoomLayout>,
    pub stats: PlacementStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomLayout {
    pub room_id: String,
    pub kind: RoomKind,
    pub furniture: Vec<PlacedFurniture>,
}

impl Placement {
    pub fn layout_for(&self, room_id: &str) -> Option<&RoomLayout> {
        self.rooms.iter().find(|l| l.room_id == room_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use furnish_rs::entities::RotatedRect;
    use furnish_rs::geometry::primitives::Point;

    fn bedroom(id: &str, size: f64) -> Room {
        Room::new(
            id,
            RoomKind::Bedroom,
            vec![
                Point(0.0, 0.0),
                Point(size, 0.0),
                Point(size, size),
                Point(0.0, size),
            ],
            RotatedRect {
                center: Point(size / 2.0, size / 2.0),
                width: size,
                height: size,
                angle_deg: 0.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn largest_bedroom_becomes_master() {
        let mut rooms = vec![bedroom("a", 200.0), bedroom("b", 350.0), bedroom("c", 150.0)];
        differentiate_bedrooms(&mut rooms);
        assert_eq!(rooms[0].kind, RoomKind::BedroomGuest);
        assert_eq!(rooms[1].kind, RoomKind::BedroomMaster);
        assert_eq!(rooms[2].kind, RoomKind::BedroomGuest);
    }

    #[test]
    fn non_positive_unit_ratio_is_rejected() {
        let rooms = vec![bedroom("a", 200.0)];
        let config = GFPConfig {
            unit_ratio: 0.0,
            ..GFPConfig::default()
        };
        assert!(Placer::new(rooms, &[], config).is_err());
    }

    #[test]
    fn single_bedroom_keeps_its_label() {
        let mut rooms = vec![bedroom("only", 200.0)];
        differentiate_bedrooms(&mut rooms);
        assert_eq!(rooms[0].kind, RoomKind::Bedroom);
    }
}

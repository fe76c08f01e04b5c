use furnish_rs::entities::FurnitureInstance;

use crate::strategies::{RoomCtx, RoomStrategy};

/// Strategy for hallways and empty rooms: bulkiest items first, each against
/// any wall, while wall space is least contended.
pub struct DefaultStrategy;

impl RoomStrategy for DefaultStrategy {
    fn furnish(&self, items: Vec<FurnitureInstance>, ctx: &mut RoomCtx) {
        ctx.place_remaining(items);
    }
}

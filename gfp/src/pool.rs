use std::collections::{HashMap, VecDeque};

use log::{debug, warn};

use furnish_rs::entities::{FurnitureInstance, FurnitureSpec, RoomKind};

/// Shared stock of furniture instances, one FIFO queue per category.
///
/// Queues hold catalog entries in catalog order, with essential duplicates
/// appended after the originals. Every `draw` irrevocably removes an instance,
/// so rooms processed earlier have first claim on scarce categories.
#[derive(Debug, Clone)]
pub struct FurniturePool {
    queues: HashMap<String, VecDeque<FurnitureInstance>>,
}

impl FurniturePool {
    /// Builds the pool from catalog specs, converting every footprint to pixels
    /// with `unit_ratio` (meters per pixel) exactly once.
    pub fn build(specs: &[FurnitureSpec], unit_ratio: f64) -> Self {
        let mut queues: HashMap<String, VecDeque<FurnitureInstance>> = HashMap::new();
        for spec in specs {
            queues
                .entry(spec.category.clone())
                .or_default()
                .push_back(FurnitureInstance::from_spec(spec, unit_ratio));
        }
        FurniturePool { queues }
    }

    /// Draws one instance of `category`: the first essential-flagged duplicate
    /// if any is queued, otherwise the head of the queue. `None` means the
    /// category is absent or exhausted; the requesting room simply receives
    /// fewer items, this is not an error.
    pub fn draw(&mut self, category: &str) -> Option<FurnitureInstance> {
        let queue = self.queues.get_mut(category)?;
        let i = queue.iter().position(|f| f.essential).unwrap_or(0);
        queue.remove(i)
    }

    /// One draw per category mapped to `kind`, in map priority order.
    pub fn draw_for_room(
        &mut self,
        kind: RoomKind,
        room_map: &HashMap<RoomKind, Vec<String>>,
    ) -> Vec<FurnitureInstance> {
        let categories = room_map.get(&kind).map(Vec::as_slice).unwrap_or_default();
        categories
            .iter()
            .filter_map(|category| self.draw(category))
            .collect()
    }

    /// Guarantees essential coverage before placement begins: for every room
    /// kind with a nonzero count and every category flagged essential for it,
    /// the first existing instance is cloned (flagged essential) until the
    /// queue holds at least one instance per room. A category with zero stock
    /// is left empty; duplicates are never synthesized from nothing.
    pub fn ensure_essential(
        &mut self,
        room_counts: &HashMap<RoomKind, usize>,
        essential_map: &HashMap<RoomKind, Vec<String>>,
    ) {
        for (kind, &count) in room_counts {
            if count == 0 {
                continue;
            }
            for category in essential_map.get(kind).map(Vec::as_slice).unwrap_or_default() {
                let Some(queue) = self.queues.get_mut(category) else {
                    warn!(
                        "essential category '{category}' for {kind} has no stock to duplicate"
                    );
                    continue;
                };
                let Some(template) = queue.front().cloned() else {
                    warn!(
                        "essential category '{category}' for {kind} has no stock to duplicate"
                    );
                    continue;
                };
                while queue.len() < count {
                    let mut duplicate = template.clone();
                    duplicate.essential = true;
                    queue.push_back(duplicate);
                    debug!("duplicated essential '{category}' for {kind} rooms");
                }
            }
        }
    }

    /// Remaining stock of a category.
    pub fn stock(&self, category: &str) -> usize {
        self.queues.get(category).map_or(0, VecDeque::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    fn specs() -> Vec<FurnitureSpec> {
        ["sofa", "sofa", "tv"]
            .iter()
            .map(|c| FurnitureSpec::new(*c, 2.0, 1.0))
            .collect::<Result<_>>()
            .unwrap()
    }

    #[test]
    fn draw_is_fifo_and_exhausts() {
        let mut pool = FurniturePool::build(&specs(), 1.0);
        assert_eq!(pool.stock("sofa"), 2);
        assert!(pool.draw("sofa").is_some());
        assert!(pool.draw("sofa").is_some());
        assert!(pool.draw("sofa").is_none(), "exhausted category yields None");
        assert!(pool.draw("piano").is_none(), "absent category yields None");
    }

    #[test]
    fn essential_duplication_covers_all_rooms_of_a_kind() {
        let mut pool = FurniturePool::build(&specs(), 1.0);
        let room_counts = HashMap::from([(RoomKind::LivingRoom, 4)]);
        let essential_map = HashMap::from([(RoomKind::LivingRoom, vec!["sofa".to_string()])]);

        pool.ensure_essential(&room_counts, &essential_map);
        assert_eq!(pool.stock("sofa"), 4);

        //duplicates carry the essential flag and are drawn before the originals
        let first = pool.draw("sofa").unwrap();
        assert!(first.essential, "essential duplicates are drawn first");
    }

    #[test]
    fn zero_stock_category_is_not_synthesized() {
        let mut pool = FurniturePool::build(&specs(), 1.0);
        let room_counts = HashMap::from([(RoomKind::Bathroom, 2)]);
        let essential_map = HashMap::from([(RoomKind::Bathroom, vec!["commode".to_string()])]);

        pool.ensure_essential(&room_counts, &essential_map);
        assert_eq!(pool.stock("commode"), 0);
    }

    #[test]
    fn no_duplication_when_stock_suffices() {
        let mut pool = FurniturePool::build(&specs(), 1.0);
        let room_counts = HashMap::from([(RoomKind::LivingRoom, 2)]);
        let essential_map = HashMap::from([(RoomKind::LivingRoom, vec!["sofa".to_string()])]);

        pool.ensure_essential(&room_counts, &essential_map);
        assert_eq!(pool.stock("sofa"), 2);
        assert!(!pool.draw("sofa").unwrap().essential);
    }
}

use std::collections::HashMap;
use std::fmt::Display;

use itertools::Itertools;
use serde::Serialize;

use furnish_rs::entities::RoomKind;

/// Per-room-kind placement counters, accumulated across the whole run.
/// Observability only: nothing reads these to make placement decisions.
#[derive(Debug, Default, Clone, Serialize)]
pub struct PlacementStats {
    per_kind: HashMap<RoomKind, KindStats>,
}

#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct KindStats {
    pub attempted: usize,
    pub placed: usize,
    pub failed: usize,
}

impl PlacementStats {
    pub fn record_placed(&mut self, kind: RoomKind) {
        let stats = self.per_kind.entry(kind).or_default();
        stats.attempted += 1;
        stats.placed += 1;
    }

    pub fn record_failed(&mut self, kind: RoomKind) {
        let stats = self.per_kind.entry(kind).or_default();
        stats.attempted += 1;
        stats.failed += 1;
    }

    pub fn for_kind(&self, kind: RoomKind) -> KindStats {
        self.per_kind.get(&kind).copied().unwrap_or_default()
    }

    pub fn total_placed(&self) -> usize {
        self.per_kind.values().map(|s| s.placed).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.per_kind.values().map(|s| s.failed).sum()
    }
}

impl Display for PlacementStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:<16}{:>10}{:>8}{:>8}", "room kind", "attempted", "placed", "failed")?;
        for (kind, s) in self.per_kind.iter().sorted_by_key(|(kind, _)| kind.to_string()) {
            writeln!(
                f,
                "{:<16}{:>10}{:>8}{:>8}",
                kind.to_string(),
                s.attempted,
                s.placed,
                s.failed
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_per_kind() {
        let mut stats = PlacementStats::default();
        stats.record_placed(RoomKind::Bedroom);
        stats.record_placed(RoomKind::Bedroom);
        stats.record_failed(RoomKind::Bedroom);
        stats.record_failed(RoomKind::Bathroom);

        let bedroom = stats.for_kind(RoomKind::Bedroom);
        assert_eq!(
            (bedroom.attempted, bedroom.placed, bedroom.failed),
            (3, 2, 1)
        );
        assert_eq!(stats.total_placed(), 2);
        assert_eq!(stats.total_failed(), 2);
    }
}

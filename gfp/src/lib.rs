//! Greedy Furniture Placement (GFP): the reference placement heuristic for
//! `furnish-rs`. Deterministic, non-backtracking and explainable: every search
//! runs over a fixed, bounded candidate set and reports failure at most once.

use std::sync::LazyLock;
use std::time::Instant;

pub mod config;
pub mod io;
pub mod placer;
pub mod pool;
pub mod stats;
pub mod strategies;
pub mod wall_fit;

pub static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Category keys understood by the room strategies. The catalog may carry any
/// category; only these receive special composition rules.
pub mod categories {
    pub const L_SOFA: &str = "Lsofa";
    pub const SOFA: &str = "sofa";
    pub const TV: &str = "tv";
    pub const TABLE: &str = "table";
    pub const DINING_TABLE: &str = "diningtable";
    pub const KITCHEN: &str = "kitchen";
    pub const STOVE: &str = "stove";
    pub const SINK: &str = "sink";
    pub const CHAIR: &str = "chair";
    pub const BED: &str = "bed";
    pub const SINGLE_BED: &str = "singlebed";
    pub const BEDSIDE: &str = "bedside";
    pub const STUDY: &str = "study";
    pub const BATHTUB: &str = "bathtub";
    pub const SHOWER: &str = "shower";
    pub const COMMODE: &str = "commode";
}

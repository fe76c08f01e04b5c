use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use furnish_rs::entities::RoomKind;

use crate::categories::*;

/// Configuration for the GFP placer.
///
/// The defaults reproduce the stock room/category mapping; a custom mapping can
/// be supplied through a JSON config file (see [`crate::io::read_config`]).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GFPConfig {
    /// Which furniture categories belong in which room kind, in placement
    /// priority order. One instance is drawn per listed category per room.
    pub room_map: HashMap<RoomKind, Vec<String>>,
    /// Categories that must be guaranteed present for every room of a kind;
    /// scarce categories are duplicated at pool build.
    pub essential_map: HashMap<RoomKind, Vec<String>>,
    /// Meters-per-pixel ratio, applied once to every catalog footprint.
    pub unit_ratio: f64,
    /// Clearance between a television and the sofa facing it, in pixels.
    pub sofa_tv_clearance: f64,
    /// Two wall endpoints within this distance are considered a shared corner.
    pub corner_tolerance: f64,
}

impl Default for GFPConfig {
    fn default() -> Self {
        let owned = |cats: &[&str]| cats.iter().map(|c| c.to_string()).collect();
        Self {
            room_map: HashMap::from([
                (
                    RoomKind::LivingRoom,
                    owned(&[
                        L_SOFA,
                        SOFA,
                        TV,
                        TABLE,
                        DINING_TABLE,
                        KITCHEN,
                        STOVE,
                        SINK,
                        CHAIR,
                    ]),
                ),
                (
                    RoomKind::BedroomMaster,
                    owned(&[BED, BEDSIDE, STUDY, CHAIR]),
                ),
                (
                    RoomKind::BedroomGuest,
                    owned(&[SINGLE_BED, BEDSIDE, STUDY]),
                ),
                (RoomKind::Bedroom, owned(&[SINGLE_BED, BEDSIDE, STUDY])),
                (
                    RoomKind::Bathroom,
                    owned(&[BATHTUB, SHOWER, SINK, COMMODE]),
                ),
                (RoomKind::Hallway, vec![]),
                (RoomKind::EmptyRoom, vec![]),
            ]),
            essential_map: HashMap::from([
                (RoomKind::LivingRoom, owned(&[SOFA, TV])),
                (RoomKind::BedroomMaster, owned(&[BED])),
                (RoomKind::BedroomGuest, owned(&[SINGLE_BED])),
                (RoomKind::Bedroom, owned(&[SINGLE_BED])),
                (RoomKind::Bathroom, owned(&[SINK, COMMODE])),
            ]),
            unit_ratio: 0.1,
            sofa_tv_clearance: 100.0,
            corner_tolerance: 1.0,
        }
    }
}

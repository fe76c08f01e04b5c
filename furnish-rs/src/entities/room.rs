use std::cmp::Reverse;
use std::fmt::Display;

use anyhow::{Context, Result};
use log::warn;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::geometry::inward_normal;
use crate::geometry::primitives::{Edge, Point, SPolygon};

/// Closed set of room type labels produced by the floor-plan classifier.
/// Drives which placement strategy and category mapping apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    LivingRoom,
    BedroomMaster,
    BedroomGuest,
    Bedroom,
    Bathroom,
    Hallway,
    EmptyRoom,
}

impl RoomKind {
    /// Parses a classifier label. Unknown labels map to `None`; callers
    /// typically fall back to [`RoomKind::EmptyRoom`].
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "living_room" => Some(RoomKind::LivingRoom),
            "bedroom_master" => Some(RoomKind::BedroomMaster),
            "bedroom_guest" => Some(RoomKind::BedroomGuest),
            "bedroom" => Some(RoomKind::Bedroom),
            "bathroom" => Some(RoomKind::Bathroom),
            "hallway" => Some(RoomKind::Hallway),
            "empty_room" => Some(RoomKind::EmptyRoom),
            _ => None,
        }
    }

    pub fn is_bedroom(&self) -> bool {
        matches!(
            self,
            RoomKind::Bedroom | RoomKind::BedroomMaster | RoomKind::BedroomGuest
        )
    }
}

impl Display for RoomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RoomKind::LivingRoom => "living_room",
            RoomKind::BedroomMaster => "bedroom_master",
            RoomKind::BedroomGuest => "bedroom_guest",
            RoomKind::Bedroom => "bedroom",
            RoomKind::Bathroom => "bathroom",
            RoomKind::Hallway => "hallway",
            RoomKind::EmptyRoom => "empty_room",
        };
        write!(f, "{label}")
    }
}

/// Axis-free bounding rectangle of a room, as fitted by the upstream analyzer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotatedRect {
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub angle_deg: f64,
}

/// A room extracted from the classified floor plan: type label, boundary polygon
/// and axis-free bounding rectangle. Walls are derived fresh from the boundary.
#[derive(Clone, Debug)]
pub struct Room {
    pub id: String,
    pub kind: RoomKind,
    pub boundary: SPolygon,
    pub bounding_rect: RotatedRect,
}

impl Room {
    pub fn new(
        id: impl Into<String>,
        kind: RoomKind,
        boundary_points: Vec<Point>,
        bounding_rect: RotatedRect,
    ) -> Result<Self> {
        let id = id.into();
        let boundary = SPolygon::new(boundary_points)
            .with_context(|| format!("invalid boundary for room '{id}'"))?;
        Ok(Room {
            id,
            kind,
            boundary,
            bounding_rect,
        })
    }

    /// One wall per boundary edge (consecutive vertices, including wrap-around),
    /// ordered longest to shortest so large items preferentially claim the
    /// longest available span. Zero-length edges are skipped.
    pub fn walls(&self) -> Vec<Wall> {
        let n = self.boundary.n_vertices();
        let mut walls: Vec<Wall> = (0..n)
            .filter_map(|i| {
                let (p1, p2) = (self.boundary.vertex(i), self.boundary.vertex((i + 1) % n));
                match Edge::new(p1, p2) {
                    Ok(edge) => Some(Wall { edge }),
                    Err(_) => {
                        warn!("[{}] skipping zero-length wall at vertex {i}", self.id);
                        None
                    }
                }
            })
            .collect();
        walls.sort_by_key(|w| Reverse(OrderedFloat(w.length())));
        walls
    }
}

/// One edge of a room's boundary polygon, treated as a candidate surface for
/// wall-adjacent placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall {
    pub edge: Edge,
}

impl Wall {
    pub fn start(&self) -> Point {
        self.edge.start
    }

    pub fn end(&self) -> Point {
        self.edge.end
    }

    pub fn vector(&self) -> Point {
        self.edge.vector()
    }

    pub fn length(&self) -> f64 {
        self.edge.length()
    }

    /// `atan2(dy, dx)` of the wall vector, in degrees
    pub fn angle_deg(&self) -> f64 {
        let v = self.vector();
        v.1.atan2(v.0).to_degrees()
    }

    pub fn midpoint(&self) -> Point {
        self.edge.centroid()
    }

    /// Fractional position along the wall, `0.0` at start, `1.0` at end
    pub fn point_at(&self, f: f64) -> Point {
        self.edge.point_at(f)
    }

    /// Unit normal of this wall oriented towards the interior of `room`
    pub fn inward_normal(&self, room: &SPolygon) -> Point {
        inward_normal(self.midpoint(), self.vector(), room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn rect_room(width: f64, height: f64) -> Room {
        Room::new(
            "room_1",
            RoomKind::EmptyRoom,
            vec![
                Point(0.0, 0.0),
                Point(width, 0.0),
                Point(width, height),
                Point(0.0, height),
            ],
            RotatedRect {
                center: Point(width / 2.0, height / 2.0),
                width,
                height,
                angle_deg: 0.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn walls_are_ordered_longest_first() {
        let room = rect_room(400.0, 300.0);
        let walls = room.walls();
        assert_eq!(walls.len(), 4);
        assert_eq!(
            walls.iter().map(|w| w.length()).collect::<Vec<_>>(),
            vec![400.0, 400.0, 300.0, 300.0]
        );
        //stable sort: the top wall (first boundary edge) comes before the bottom one
        assert_eq!(walls[0].start(), Point(0.0, 0.0));
    }

    #[test]
    fn degenerate_boundary_is_rejected() {
        let result = Room::new(
            "bad",
            RoomKind::Hallway,
            vec![Point(0.0, 0.0), Point(10.0, 0.0)],
            RotatedRect {
                center: Point(5.0, 0.0),
                width: 10.0,
                height: 0.0,
                angle_deg: 0.0,
            },
        );
        assert!(result.is_err());
    }

    #[test_case("living_room", Some(RoomKind::LivingRoom))]
    #[test_case("bedroom_master", Some(RoomKind::BedroomMaster))]
    #[test_case("bathroom", Some(RoomKind::Bathroom))]
    #[test_case("garage", None)]
    fn room_kind_from_label(label: &str, expected: Option<RoomKind>) {
        assert_eq!(RoomKind::from_label(label), expected);
    }

    #[test]
    fn wall_angle_follows_the_wall_vector() {
        let room = rect_room(100.0, 50.0);
        let walls = room.walls();
        //longest wall runs along the x-axis
        assert_eq!(walls[0].angle_deg(), 0.0);
    }
}

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use crate::geometry::Transformation;
use crate::geometry::geo_traits::Transformable;
use crate::geometry::primitives::{Point, SPolygon};

/// Immutable catalog template for a furniture category entry.
/// Dimensions are in length units (meters), as measured in the dimension table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FurnitureSpec {
    /// Category key, e.g. "sofa" or "bed"
    pub category: String,
    pub width: f64,
    pub height: f64,
    /// Filename of the catalog crop this entry was measured from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl FurnitureSpec {
    pub fn new(category: impl Into<String>, width: f64, height: f64) -> Result<Self> {
        let category = category.into();
        ensure!(
            width > 0.0 && height > 0.0,
            "furniture spec '{category}' must have positive dimensions: {width} x {height}"
        );
        Ok(FurnitureSpec {
            category,
            width,
            height,
            source: None,
        })
    }
}

/// A draw from a [`FurnitureSpec`], with its footprint converted to pixels.
/// Placement state is written exactly once, by [`FurnitureInstance::commit`].
#[derive(Clone, Debug)]
pub struct FurnitureInstance {
    pub category: String,
    /// Footprint in pixels, as drawn from the catalog (before any orientation swap)
    pub width: f64,
    pub height: f64,
    /// Marks a duplicate synthesized to guarantee category coverage
    pub essential: bool,
    /// Set once by a successful placement, `None` until then
    pub placement: Option<Pose>,
}

impl FurnitureInstance {
    /// Creates an instance from a spec, converting its footprint to pixels
    /// with the given meters-per-pixel ratio.
    pub fn from_spec(spec: &FurnitureSpec, unit_ratio: f64) -> Self {
        FurnitureInstance {
            category: spec.category.clone(),
            width: spec.width / unit_ratio,
            height: spec.height / unit_ratio,
            essential: false,
            placement: None,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn is_placed(&self) -> bool {
        self.placement.is_some()
    }

    /// Commits the accepted pose. The pose carries the final width/height, so a
    /// swapped orientation chosen by the search is part of the committed result.
    pub fn commit(&mut self, pose: Pose) {
        debug_assert!(self.placement.is_none(), "instance placed twice");
        self.placement = Some(pose);
    }
}

/// A candidate or committed placement: position, rotation and final footprint
/// dimensions. Plain value type, no identity; probe footprints are derived from
/// it without touching any instance.
#[derive(Clone, Debug, PartialEq, Copy, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point,
    /// Rotation in degrees, counter-clockwise in y-down pixel space
    pub angle_deg: f64,
    /// Extent along the footprint's own x-axis before rotation. Placed against a
    /// wall, this is the wall-parallel side.
    pub width: f64,
    pub height: f64,
}

impl Pose {
    pub fn new(position: Point, angle_deg: f64, width: f64, height: f64) -> Self {
        Pose {
            position,
            angle_deg,
            width,
            height,
        }
    }

    /// The rectangular footprint occupied at this pose: a `width x height`
    /// rectangle centered at the origin, rotated by `angle_deg` about its own
    /// center, then translated to `position`.
    pub fn footprint(&self) -> SPolygon {
        let (w, h) = (self.width, self.height);
        let corners = vec![
            Point(-w / 2.0, -h / 2.0),
            Point(w / 2.0, -h / 2.0),
            Point(w / 2.0, h / 2.0),
            Point(-w / 2.0, h / 2.0),
        ];
        let t = Transformation::from_rotation(self.angle_deg.to_radians())
            .translate(self.position.into());
        let mut footprint =
            SPolygon::new(corners).expect("footprint of a valid pose is a proper rectangle");
        footprint.transform(&t);
        footprint
    }
}

/// Export record for a successfully placed item, consumed downstream for rendering.
#[derive(Clone, Debug, Serialize)]
pub struct PlacedFurniture {
    pub category: String,
    pub position: Point,
    pub angle_deg: f64,
    pub width: f64,
    pub height: f64,
    pub essential: bool,
}

impl PlacedFurniture {
    /// `None` if the instance was never placed.
    pub fn from_instance(instance: &FurnitureInstance) -> Option<Self> {
        instance.placement.map(|pose| PlacedFurniture {
            category: instance.category.clone(),
            position: pose.position,
            angle_deg: pose.angle_deg,
            width: pose.width,
            height: pose.height,
            essential: instance.essential,
        })
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.angle_deg, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::geo_traits::Shape;
    use float_cmp::approx_eq;

    #[test]
    fn footprint_is_centered_on_the_pose_position() {
        let pose = Pose::new(Point(100.0, 50.0), 0.0, 40.0, 20.0);
        let fp = pose.footprint();
        assert_eq!(fp.centroid(), Point(100.0, 50.0));
        assert_eq!(fp.bbox.width(), 40.0);
        assert_eq!(fp.bbox.height(), 20.0);
    }

    #[test]
    fn rotating_a_footprint_by_90_degrees_swaps_its_extents() {
        let pose = Pose::new(Point(0.0, 0.0), 90.0, 40.0, 20.0);
        let fp = pose.footprint();
        assert!(approx_eq!(f64, fp.bbox.width(), 20.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, fp.bbox.height(), 40.0, epsilon = 1e-9));
    }

    #[test]
    fn unit_conversion_happens_at_instance_creation() {
        let spec = FurnitureSpec::new("bed", 1.8, 1.2).unwrap();
        let instance = FurnitureInstance::from_spec(&spec, 0.01);
        assert!(approx_eq!(f64, instance.width, 180.0));
        assert!(approx_eq!(f64, instance.height, 120.0));
        assert!(!instance.is_placed());
    }
}

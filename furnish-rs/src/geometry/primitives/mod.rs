mod edge;
mod point;
mod rect;
mod spolygon;

#[doc(inline)]
pub use edge::Edge;
#[doc(inline)]
pub use point::Point;
#[doc(inline)]
pub use rect::Rect;
#[doc(inline)]
pub use spolygon::OVERLAP_TOL;
#[doc(inline)]
pub use spolygon::SPolygon;

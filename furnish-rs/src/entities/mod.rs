mod furniture;
mod room;

#[doc(inline)]
pub use furniture::FurnitureInstance;
#[doc(inline)]
pub use furniture::FurnitureSpec;
#[doc(inline)]
pub use furniture::PlacedFurniture;
#[doc(inline)]
pub use furniture::Pose;
#[doc(inline)]
pub use room::Room;
#[doc(inline)]
pub use room::RoomKind;
#[doc(inline)]
pub use room::RotatedRect;
#[doc(inline)]
pub use room::Wall;

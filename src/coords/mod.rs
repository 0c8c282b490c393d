pub mod point_map;
pub mod resolve;

pub use point_map::{PointMap, RelPoint};
pub use resolve::{
    absolute_point, absolute_point_at, resolve, AbsolutePoint, DeviceFrame, ReferenceFrame,
};

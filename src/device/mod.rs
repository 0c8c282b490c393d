pub mod gestures;
pub mod session;
pub mod wait;

pub use gestures::{scroll, tap};
pub use session::{DeviceSession, PointerAction};

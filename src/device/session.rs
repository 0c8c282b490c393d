use std::time::Duration;

use async_trait::async_trait;

use crate::coords::resolve::{AbsolutePoint, DeviceFrame};
use crate::errors::HarnessResult;

/// One step of a single-pointer gesture, executed in sequence by the
/// automation backend (W3C pointer-actions style).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    MoveTo(AbsolutePoint),
    Down,
    Up,
    Pause(Duration),
}

/// The remote device-automation session, reduced to the five
/// operations the harness core actually needs. Session creation and
/// the wire protocol live behind this seam; tests substitute a stub.
#[async_trait]
pub trait DeviceSession: Send + Sync {
    /// Current screen resolution in physical pixels.
    async fn window_size(&self) -> HarnessResult<DeviceFrame>;

    /// Full-screen screenshot as encoded PNG bytes.
    async fn screenshot_png(&self) -> HarnessResult<Vec<u8>>;

    /// Executes one pointer-action sequence as a single gesture.
    async fn perform_pointer(&self, actions: &[PointerAction]) -> HarnessResult<()>;

    /// Whether an element with the given resource id is currently
    /// present (no wait — polling belongs to `wait::wait_for_element`).
    async fn element_exists(&self, id: &str) -> HarnessResult<bool>;

    /// Tears the session down. Callers scope this around the whole
    /// scenario.
    async fn quit(&self) -> HarnessResult<()>;
}

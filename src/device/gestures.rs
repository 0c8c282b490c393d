use std::time::Duration;

use crate::coords::resolve::AbsolutePoint;
use crate::device::session::{DeviceSession, PointerAction};
use crate::device::wait;
use crate::errors::HarnessResult;

/// Dwell between down and up; shorter taps register as flicks on some
/// backends.
pub const TAP_DWELL: Duration = Duration::from_millis(100);

/// Pause after pointer-down and after the move, so the backend's
/// gesture heuristics read the sequence as a controlled drag, not a
/// fling, and the UI gets a beat to render before release.
pub const DRAG_PAUSE: Duration = Duration::from_millis(400);

/// Delay after each scroll repetition so animations finish before the
/// next capture.
pub const SCROLL_SETTLE: Duration = Duration::from_secs(2);

pub fn tap_sequence(point: AbsolutePoint) -> Vec<PointerAction> {
    vec![
        PointerAction::MoveTo(point),
        PointerAction::Down,
        PointerAction::Pause(TAP_DWELL),
        PointerAction::Up,
    ]
}

pub fn drag_sequence(start: AbsolutePoint, end: AbsolutePoint) -> Vec<PointerAction> {
    vec![
        PointerAction::MoveTo(start),
        PointerAction::Down,
        PointerAction::Pause(DRAG_PAUSE),
        PointerAction::MoveTo(end),
        PointerAction::Pause(DRAG_PAUSE),
        PointerAction::Up,
    ]
}

/// Single tap at a device-absolute point.
pub async fn tap(session: &dyn DeviceSession, point: AbsolutePoint) -> HarnessResult<()> {
    tracing::debug!(x = point.x, y = point.y, "tap");
    session.perform_pointer(&tap_sequence(point)).await
}

/// Repeated controlled drag from `start` to `end`, with a settle delay
/// after each repetition. Coordinates are caller-supplied; no
/// coordinate math happens here.
pub async fn scroll(
    session: &dyn DeviceSession,
    start: AbsolutePoint,
    end: AbsolutePoint,
    repetitions: u32,
) -> HarnessResult<()> {
    let sequence = drag_sequence(start, end);
    for i in 0..repetitions {
        tracing::debug!(
            step = i + 1,
            total = repetitions,
            from = ?(start.x, start.y),
            to = ?(end.x, end.y),
            "scroll"
        );
        session.perform_pointer(&sequence).await?;
        wait::settle(SCROLL_SETTLE).await;
    }
    Ok(())
}

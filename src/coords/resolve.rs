use serde::{Deserialize, Serialize};

use crate::coords::point_map::{PointMap, RelPoint};
use crate::device::session::DeviceSession;
use crate::errors::{HarnessError, HarnessResult};

/// Live screen resolution of the device under test, fetched fresh per
/// conversion (it changes across devices and test runs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceFrame {
    pub width: u32,
    pub height: u32,
}

/// The resolution the pixel-space points in a map were authored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceFrame {
    pub width: u32,
    pub height: u32,
}

/// Device-absolute pixel position, clamped to `[1, dim-1]` — edge
/// pixels make some automation backends drop the gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsolutePoint {
    pub x: i32,
    pub y: i32,
}

/// Converts a raw coordinate pair to device-absolute pixels.
///
/// Both components in `[0, 1]` are read as ratios of the live screen;
/// anything else is read as pixels in `reference` space and rescaled
/// proportionally. Pixel mode without a reference is a config error.
pub fn resolve(
    rel_x: f64,
    rel_y: f64,
    device: DeviceFrame,
    reference: Option<ReferenceFrame>,
) -> HarnessResult<AbsolutePoint> {
    let (abs_x, abs_y) = if (0.0..=1.0).contains(&rel_x) && (0.0..=1.0).contains(&rel_y) {
        (
            (rel_x * device.width as f64).round() as i32,
            (rel_y * device.height as f64).round() as i32,
        )
    } else {
        let reference = reference.ok_or_else(|| {
            HarnessError::Config(
                "reference frame required to resolve a pixel-space coordinate".into(),
            )
        })?;
        if reference.width == 0 || reference.height == 0 {
            return Err(HarnessError::Config(
                "reference frame dimensions must be positive".into(),
            ));
        }
        (
            (rel_x / reference.width as f64 * device.width as f64).round() as i32,
            (rel_y / reference.height as f64 * device.height as f64).round() as i32,
        )
    };

    Ok(AbsolutePoint {
        x: clamp_axis(abs_x, device.width),
        y: clamp_axis(abs_y, device.height),
    })
}

fn clamp_axis(value: i32, dim: u32) -> i32 {
    value.clamp(1, dim as i32 - 1)
}

impl RelPoint {
    pub fn resolve(
        &self,
        device: DeviceFrame,
        reference: Option<ReferenceFrame>,
    ) -> HarnessResult<AbsolutePoint> {
        let (x, y) = self.xy();
        resolve(x, y, device, reference)
    }
}

/// Looks up `name` in the map and resolves it against an explicit
/// device frame.
pub fn absolute_point_at(
    map: &PointMap,
    name: &str,
    device: DeviceFrame,
) -> HarnessResult<AbsolutePoint> {
    let point = map.lookup(name)?;
    point.resolve(device, Some(map.reference))
}

/// Looks up `name` and resolves it against the session's current
/// window size, fetched fresh for this call.
pub async fn absolute_point(
    session: &dyn DeviceSession,
    map: &PointMap,
    name: &str,
) -> HarnessResult<AbsolutePoint> {
    let device = session.window_size().await?;
    absolute_point_at(map, name, device)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVICE: DeviceFrame = DeviceFrame {
        width: 1080,
        height: 2400,
    };
    const REFERENCE: ReferenceFrame = ReferenceFrame {
        width: 1080,
        height: 2400,
    };

    #[test]
    fn ratio_fixture_explore_btn() {
        let p = resolve(0.22, 0.8705, DEVICE, Some(REFERENCE)).unwrap();
        assert_eq!(p, AbsolutePoint { x: 238, y: 2089 });
    }

    #[test]
    fn pixel_point_scales_to_smaller_device() {
        let device = DeviceFrame {
            width: 720,
            height: 1600,
        };
        let p = resolve(500.0, 1200.0, device, Some(REFERENCE)).unwrap();
        assert!((p.x - 333).abs() <= 1, "x = {}", p.x);
        assert!((p.y - 800).abs() <= 1, "y = {}", p.y);
    }

    #[test]
    fn pixel_resolve_is_identity_when_device_matches_reference() {
        for (x, y) in [(500.0, 1200.0), (81.0, 2165.0), (1079.0, 2399.0)] {
            let p = resolve(x, y, DEVICE, Some(REFERENCE)).unwrap();
            assert!((p.x as f64 - x).abs() <= 1.0);
            assert!((p.y as f64 - y).abs() <= 1.0);
        }
    }

    #[test]
    fn ratio_results_stay_inside_clamp_bounds() {
        let sizes = [
            DeviceFrame {
                width: 1080,
                height: 2400,
            },
            DeviceFrame {
                width: 720,
                height: 1600,
            },
            DeviceFrame {
                width: 320,
                height: 480,
            },
        ];
        let ratios = [0.0, 0.001, 0.22, 0.5, 0.8705, 0.999, 1.0];
        for device in sizes {
            for rx in ratios {
                for ry in ratios {
                    let p = resolve(rx, ry, device, None).unwrap();
                    assert!(p.x >= 1 && p.x <= device.width as i32 - 1);
                    assert!(p.y >= 1 && p.y <= device.height as i32 - 1);
                }
            }
        }
    }

    #[test]
    fn pixel_mode_without_reference_is_config_error() {
        assert!(matches!(
            resolve(500.0, 1200.0, DEVICE, None),
            Err(HarnessError::Config(_))
        ));
    }

    #[test]
    fn out_of_range_pixel_values_clamp() {
        let p = resolve(5000.0, -20.0, DEVICE, Some(REFERENCE)).unwrap();
        assert_eq!(p, AbsolutePoint { x: 1079, y: 1 });
    }

    #[test]
    fn lookup_then_resolve_composes() {
        let data: serde_json::Value = serde_json::from_str(
            r#"{
                "reference": {"width": 1080, "height": 2400},
                "explore_btn": {"x": 0.22, "y": 0.8705},
                "login_btn": {"x": 478, "y": 1942}
            }"#,
        )
        .unwrap();
        let map = PointMap::from_value(&data).unwrap();

        let p = absolute_point_at(&map, "explore_btn", DEVICE).unwrap();
        assert_eq!(p, AbsolutePoint { x: 238, y: 2089 });

        let p = absolute_point_at(&map, "login_btn", DEVICE).unwrap();
        assert_eq!(p, AbsolutePoint { x: 478, y: 1942 });

        assert!(matches!(
            absolute_point_at(&map, "nope", DEVICE),
            Err(HarnessError::NotFound { .. })
        ));
    }
}

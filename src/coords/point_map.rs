use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::coords::resolve::ReferenceFrame;
use crate::errors::{HarnessError, HarnessResult};

/// A stored screen position in one of the two authoring spaces.
///
/// Classified once at load time by magnitude: both components in
/// `[0, 1]` means a ratio of the live screen, anything else means
/// pixels against the map's reference frame. A point legitimately at
/// pixel (1,1) is indistinguishable from a ratio — accepted limitation,
/// never occurs in authored maps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RelPoint {
    Ratio { x: f64, y: f64 },
    ReferencePixel { x: f64, y: f64 },
}

impl RelPoint {
    pub fn classify(x: f64, y: f64) -> Self {
        if (0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y) {
            RelPoint::Ratio { x, y }
        } else {
            RelPoint::ReferencePixel { x, y }
        }
    }

    pub fn xy(&self) -> (f64, f64) {
        match *self {
            RelPoint::Ratio { x, y } | RelPoint::ReferencePixel { x, y } => (x, y),
        }
    }
}

/// Named UI anchors loaded from the persisted point-map file, plus the
/// reference resolution the pixel-space entries were authored against.
#[derive(Debug, Clone)]
pub struct PointMap {
    pub reference: ReferenceFrame,
    points: BTreeMap<String, RelPoint>,
}

impl PointMap {
    /// Loads a point map. Two layouts are accepted: entries at the top
    /// level next to the `reference` block, or nested under a `points`
    /// key. Each entry is either an `{x, y}` object or a 2-element
    /// array; anything else is skipped. The reference block may also
    /// use the legacy `_reference` key.
    pub fn load(path: impl AsRef<Path>) -> HarnessResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(HarnessError::Config(format!(
                "point map not found: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let data: Value = serde_json::from_str(&content)?;
        let map = Self::from_value(&data)?;
        tracing::debug!(path = %path.display(), points = map.len(), "point map loaded");
        Ok(map)
    }

    pub fn from_value(data: &Value) -> HarnessResult<Self> {
        let reference = extract_reference(data)?;

        let source = match data.get("points") {
            Some(Value::Object(nested)) => nested,
            _ => match data {
                Value::Object(top) => top,
                _ => {
                    return Err(HarnessError::Config(
                        "point map root must be a JSON object".into(),
                    ))
                }
            },
        };

        let mut points = BTreeMap::new();
        for (name, val) in source {
            if name == "reference" || name == "_reference" || name == "points" {
                continue;
            }
            if let Some((x, y)) = parse_point_value(val) {
                points.insert(name.clone(), RelPoint::classify(x, y));
            }
        }

        Ok(Self { reference, points })
    }

    pub fn get(&self, name: &str) -> Option<RelPoint> {
        self.points.get(name).copied()
    }

    /// Strict lookup. The error carries a sample of available keys so
    /// a failed scenario log is enough to spot a typo.
    pub fn lookup(&self, name: &str) -> HarnessResult<RelPoint> {
        self.get(name).ok_or_else(|| HarnessError::NotFound {
            name: name.to_string(),
            available: self.points.keys().take(10).cloned().collect(),
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.points.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn extract_reference(data: &Value) -> HarnessResult<ReferenceFrame> {
    let block = data
        .get("reference")
        .or_else(|| data.get("_reference"))
        .ok_or_else(|| HarnessError::Config("point map is missing a reference block".into()))?;

    let width = block.get("width").and_then(Value::as_u64).unwrap_or(0);
    let height = block.get("height").and_then(Value::as_u64).unwrap_or(0);
    if width == 0 || height == 0 {
        return Err(HarnessError::Config(
            "reference.width/height must be positive".into(),
        ));
    }

    Ok(ReferenceFrame {
        width: width as u32,
        height: height as u32,
    })
}

fn parse_point_value(val: &Value) -> Option<(f64, f64)> {
    match val {
        Value::Object(obj) => {
            let x = obj.get("x")?.as_f64()?;
            let y = obj.get("y")?.as_f64()?;
            Some((x, y))
        }
        Value::Array(arr) if arr.len() == 2 => {
            let x = arr[0].as_f64()?;
            let y = arr[1].as_f64()?;
            Some((x, y))
        }
        _ => None,
    }
}

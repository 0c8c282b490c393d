use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{HarnessError, HarnessResult};

/// Harness-level settings: where screenshots land and where the
/// named-point map lives. Loaded from `tapsight.toml`; every field
/// has a default so an empty file (or `HarnessConfig::default()`)
/// works out of the box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    #[serde(default = "default_screenshot_dir")]
    pub screenshot_dir: PathBuf,
    #[serde(default = "default_point_map")]
    pub point_map: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            screenshot_dir: default_screenshot_dir(),
            point_map: default_point_map(),
        }
    }
}

fn default_screenshot_dir() -> PathBuf {
    PathBuf::from("reports/screenshots")
}

fn default_point_map() -> PathBuf {
    PathBuf::from("rel_position.json")
}

/// Desired capabilities for the remote automation session, read from
/// the environment (`.env` is loaded by `crate::init`). The variable
/// names match the ones test operators already export for the
/// Appium-based flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub server_url: String,
    pub platform_name: String,
    pub automation_name: String,
    pub device_name: String,
    pub udid: Option<String>,
    pub app_package: Option<String>,
    pub app_activity: Option<String>,
    pub no_reset: bool,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        fn var(name: &str) -> Option<String> {
            std::env::var(name).ok().filter(|v| !v.is_empty())
        }

        Self {
            server_url: var("APPIUM_SERVER_URL")
                .unwrap_or_else(|| "http://localhost:4723".to_string()),
            platform_name: var("APPIUM_PLATFORM_NAME").unwrap_or_else(|| "Android".to_string()),
            automation_name: var("APPIUM_AUTOMATION_NAME")
                .unwrap_or_else(|| "UiAutomator2".to_string()),
            device_name: var("APPIUM_DEVICE_NAME").unwrap_or_else(|| "Test Device".to_string()),
            udid: var("APPIUM_UDID"),
            app_package: var("APPIUM_APP_PACKAGE"),
            app_activity: var("APPIUM_APP_ACTIVITY"),
            no_reset: var("APPIUM_NO_RESET")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

fn resolve_config_path() -> HarnessResult<PathBuf> {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            let candidate = parent.join("tapsight.toml");
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "config found next to executable");
                return Ok(candidate);
            }
        }
    }

    let cwd = std::env::current_dir()?;
    let candidate = cwd.join("tapsight.toml");
    if candidate.exists() {
        tracing::debug!(path = %candidate.display(), "config found in working directory");
        return Ok(candidate);
    }

    Err(HarnessError::Config(
        "tapsight.toml not found next to executable or in working directory".into(),
    ))
}

pub fn load_config() -> HarnessResult<HarnessConfig> {
    let path = resolve_config_path()?;
    let content = std::fs::read_to_string(&path)?;
    let config: HarnessConfig = toml::from_str(&content)?;
    tracing::info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Like `load_config` but falls back to defaults when no config file
/// exists; malformed files still surface as errors.
pub fn load_config_or_default() -> HarnessResult<HarnessConfig> {
    match load_config() {
        Ok(cfg) => Ok(cfg),
        Err(HarnessError::Config(_)) => Ok(HarnessConfig::default()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg: HarnessConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.screenshot_dir, PathBuf::from("reports/screenshots"));
        assert_eq!(cfg.point_map, PathBuf::from("rel_position.json"));
    }

    // One test for both cases: env vars are process-global and the
    // test harness runs in parallel.
    #[test]
    fn session_config_env_contract() {
        const VARS: [&str; 8] = [
            "APPIUM_SERVER_URL",
            "APPIUM_PLATFORM_NAME",
            "APPIUM_AUTOMATION_NAME",
            "APPIUM_DEVICE_NAME",
            "APPIUM_UDID",
            "APPIUM_APP_PACKAGE",
            "APPIUM_APP_ACTIVITY",
            "APPIUM_NO_RESET",
        ];
        for name in VARS {
            std::env::remove_var(name);
        }

        let cfg = SessionConfig::from_env();
        assert_eq!(cfg.server_url, "http://localhost:4723");
        assert_eq!(cfg.platform_name, "Android");
        assert_eq!(cfg.automation_name, "UiAutomator2");
        assert_eq!(cfg.device_name, "Test Device");
        assert_eq!(cfg.udid, None);
        assert_eq!(cfg.app_package, None);
        assert_eq!(cfg.app_activity, None);
        assert!(!cfg.no_reset);

        std::env::set_var("APPIUM_SERVER_URL", "http://10.0.0.5:4723");
        std::env::set_var("APPIUM_DEVICE_NAME", "Pixel 7");
        std::env::set_var("APPIUM_UDID", "emulator-5554");
        std::env::set_var("APPIUM_APP_PACKAGE", "com.example.app");
        std::env::set_var("APPIUM_NO_RESET", "TRUE");
        // Empty values read as unset.
        std::env::set_var("APPIUM_APP_ACTIVITY", "");

        let cfg = SessionConfig::from_env();
        assert_eq!(cfg.server_url, "http://10.0.0.5:4723");
        assert_eq!(cfg.device_name, "Pixel 7");
        assert_eq!(cfg.udid.as_deref(), Some("emulator-5554"));
        assert_eq!(cfg.app_package.as_deref(), Some("com.example.app"));
        assert_eq!(cfg.app_activity, None);
        assert!(cfg.no_reset);

        for name in VARS {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let cfg: HarnessConfig =
            toml::from_str("screenshot_dir = \"out/shots\"\npoint_map = \"anchors.json\"\n")
                .unwrap();
        assert_eq!(cfg.screenshot_dir, PathBuf::from("out/shots"));
        assert_eq!(cfg.point_map, PathBuf::from("anchors.json"));
    }
}

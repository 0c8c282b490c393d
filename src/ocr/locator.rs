use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::HarnessConfig;
use crate::device::gestures;
use crate::device::session::DeviceSession;
use crate::errors::HarnessResult;
use crate::ocr::preprocess;
use crate::ocr::recognizer::{OcrHit, Recognizer};

/// Misread-tolerant spellings of the home-screen header ("홈 채널" and
/// the substitutions the engine actually produces for it).
const HOME_SCREEN_KEYWORDS: [&str; 5] = ["홈채널", "홈", "채널", "채녈", "혼채널"];

/// Result of a visual keyword search. A miss is data, not an error —
/// scenarios assert absence as often as presence.
#[derive(Debug, Clone)]
pub struct FindOutcome {
    pub found: bool,
    /// Everything the recognizer read, newline-joined, for assertion
    /// and diagnosis without a re-run.
    pub recognized_text: String,
}

/// Finds and taps UI elements by expected on-screen text when no
/// reliable coordinate exists (dynamic lists, localized labels).
/// Holds the process-wide recognizer instance.
pub struct TextLocator {
    recognizer: Arc<dyn Recognizer>,
    screenshot_dir: PathBuf,
}

impl TextLocator {
    pub fn new(recognizer: Arc<dyn Recognizer>, screenshot_dir: impl Into<PathBuf>) -> Self {
        Self {
            recognizer,
            screenshot_dir: screenshot_dir.into(),
        }
    }

    pub fn from_config(recognizer: Arc<dyn Recognizer>, config: &HarnessConfig) -> Self {
        Self::new(recognizer, config.screenshot_dir.clone())
    }

    /// Deterministic path for a label. Reusing a label overwrites the
    /// previous frame on purpose — callers rely on that to pin
    /// "same screen" semantics across retries.
    pub fn screenshot_path(&self, label: &str) -> PathBuf {
        self.screenshot_dir.join(format!("{label}.png"))
    }

    /// Screenshots the device and persists the frame under `label`.
    pub async fn capture(&self, session: &dyn DeviceSession, label: &str) -> HarnessResult<PathBuf> {
        let bytes = session.screenshot_png().await?;
        let path = self.screenshot_path(label);
        write_screenshot(&path, &bytes)?;
        Ok(path)
    }

    /// Like `capture`, but with a timestamped filename so successive
    /// frames of the same scenario are all kept.
    pub async fn capture_timestamped(
        &self,
        session: &dyn DeviceSession,
        label: &str,
    ) -> HarnessResult<PathBuf> {
        let bytes = session.screenshot_png().await?;
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = self.screenshot_dir.join(format!("{label}_{stamp}.png"));
        write_screenshot(&path, &bytes)?;
        Ok(path)
    }

    /// Capture + fixed preprocessing + recognition. Capture and engine
    /// failures are fatal; an empty hit list is not.
    pub async fn capture_and_recognize(
        &self,
        session: &dyn DeviceSession,
        label: &str,
    ) -> HarnessResult<(PathBuf, Vec<OcrHit>)> {
        let path = self.capture(session, label).await?;
        let bytes = std::fs::read(&path)?;
        let image = preprocess::preprocess_encoded(&bytes)?;
        let hits = self.recognizer.recognize(&image)?;
        tracing::debug!(label, hits = hits.len(), "recognition complete");
        Ok((path, hits))
    }

    /// Scans hits in recognizer order and keywords in caller order;
    /// the first hit whose text contains any keyword wins and gets
    /// tapped at its quad centre. Hit order approximates screen layout
    /// order, so the topmost candidate is taken — confidence never
    /// ranks.
    pub async fn find_and_tap(
        &self,
        session: &dyn DeviceSession,
        keywords: &[&str],
        label: &str,
    ) -> HarnessResult<FindOutcome> {
        let (_path, hits) = self.capture_and_recognize(session, label).await?;

        let mut seen: Vec<&str> = Vec::with_capacity(hits.len());
        for hit in &hits {
            seen.push(&hit.text);
            for keyword in keywords {
                if hit.text.contains(keyword) {
                    let center = hit.center();
                    tracing::info!(
                        text = %hit.text,
                        keyword,
                        x = center.x,
                        y = center.y,
                        "keyword located, tapping"
                    );
                    gestures::tap(session, center).await?;
                    return Ok(FindOutcome {
                        found: true,
                        recognized_text: seen.join("\n"),
                    });
                }
            }
        }

        let recognized_text = seen.join("\n");
        tracing::warn!(?keywords, "no keyword matched on screen");
        Ok(FindOutcome {
            found: false,
            recognized_text,
        })
    }

    /// Full newline-joined text of the current screen.
    pub async fn extract_text(
        &self,
        session: &dyn DeviceSession,
        label: &str,
    ) -> HarnessResult<String> {
        let (_path, hits) = self.capture_and_recognize(session, label).await?;
        let text = hits
            .iter()
            .map(|h| h.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Ok(text.trim().to_string())
    }

    /// Captures and checks the screen for a single keyword.
    pub async fn contains_keyword(
        &self,
        session: &dyn DeviceSession,
        keyword: &str,
        label: &str,
    ) -> HarnessResult<bool> {
        let text = self.extract_text(session, label).await?;
        tracing::debug!(label, %text, "screen text");
        Ok(text.contains(keyword))
    }
}

fn write_screenshot(path: &Path, bytes: &[u8]) -> HarnessResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), "screenshot saved");
    Ok(())
}

/// Whether OCR output looks like the home screen. Strips spaces and
/// lower-cases before testing containment against the fixed keyword
/// set. Pure, no I/O.
pub fn is_home_screen_text(text: &str) -> bool {
    let normalized = text.replace(' ', "").to_lowercase();
    HOME_SCREEN_KEYWORDS.iter().any(|k| normalized.contains(k))
}

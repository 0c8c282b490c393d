pub mod locator;
pub mod preprocess;
pub mod recognizer;

pub use locator::{is_home_screen_text, FindOutcome, TextLocator};
pub use recognizer::{OcrHit, Quad, Recognizer};

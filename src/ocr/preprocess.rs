use image::{imageops, GrayImage};

use crate::errors::HarnessResult;

// Standard sharpen kernel.
const SHARPEN_KERNEL: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];

// +100% contrast after sharpening.
const CONTRAST_BOOST: f32 = 100.0;

/// Fixed pipeline applied to every frame before recognition:
/// grayscale → sharpen → contrast boost. Not configurable.
pub fn preprocess(gray: GrayImage) -> GrayImage {
    let sharpened = imageops::filter3x3(&gray, &SHARPEN_KERNEL);
    imageops::contrast(&sharpened, CONTRAST_BOOST)
}

/// Decodes encoded screenshot bytes and runs the fixed pipeline.
pub fn preprocess_encoded(bytes: &[u8]) -> HarnessResult<GrayImage> {
    let image = image::load_from_memory(bytes)?;
    Ok(preprocess(image.to_luma8()))
}

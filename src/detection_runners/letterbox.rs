//! Letterbox preprocessing: scale-to-fit, centre on a padded square canvas, and
//! convert to a normalised NCHW tensor.

use fast_image_resize::{
    images::{CroppedImageMut, Image as FirImage, ImageRef},
    FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer,
};
use rayon::prelude::*;

use crate::common::{DetectError, LetterboxMapping, SourceImage, MODEL_SIZE, PAD_VALUE};
use crate::data::Tensor;

/// Largest canvas side accepted, keeps the `side * side * 4` buffer addressable.
pub const MAX_MODEL_SIZE: u32 = 8192;

/// Letterboxes `image` onto the default 640x640 canvas padded with 114.
pub fn preprocess(image: &SourceImage) -> Result<(Tensor, LetterboxMapping), DetectError> {
    preprocess_with(image, MODEL_SIZE, PAD_VALUE)
}

/// Letterboxes `image` onto a `model_size` square filled with `pad_value`.
///
/// Returns a `[1, 3, model_size, model_size]` RGB tensor scaled to `[0, 1]` and the
/// mapping needed to bring canvas coordinates back to the original image.
pub fn preprocess_with(
    image: &SourceImage,
    model_size: u32,
    pad_value: u8,
) -> Result<(Tensor, LetterboxMapping), DetectError> {
    let (w0, h0) = image.dimensions();
    if w0 == 0 || h0 == 0 {
        return Err(DetectError::InvalidInput(format!(
            "image must have a positive size, got {w0}x{h0}"
        )));
    }
    if model_size == 0 {
        return Err(DetectError::InvalidInput("model size must be positive".to_string()));
    }
    if model_size > MAX_MODEL_SIZE {
        return Err(DetectError::InvalidInput(format!(
            "model size {model_size} exceeds {MAX_MODEL_SIZE}"
        )));
    }

    let (mapping, new_w, new_h) = letterbox_params(w0, h0, model_size);
    log::debug!(
        "Letterbox {}x{} -> {}x{} at ({}, {}) on {}x{}",
        w0, h0, new_w, new_h, mapping.pad_x, mapping.pad_y, model_size, model_size
    );

    let canvas = letterbox_canvas(image, model_size, new_w, new_h, &mapping, pad_value)?;
    let planes = nchw_normalize_flat(canvas.buffer(), model_size as usize, pad_value);

    let s = model_size as usize;
    let tensor = Tensor::from_shape_vec(&[1, 3, s, s], planes)?;
    Ok((tensor, mapping))
}

/// Scale, resized size and centred padding for a `width` x `height` image.
pub fn letterbox_params(width: u32, height: u32, model_size: u32) -> (LetterboxMapping, u32, u32) {
    let target = model_size as f64;
    let scale = (target / width as f64).min(target / height as f64);
    let new_w = ((width as f64 * scale).round() as u32).min(model_size);
    let new_h = ((height as f64 * scale).round() as u32).min(model_size);
    let pad_x = (model_size - new_w) / 2;
    let pad_y = (model_size - new_h) / 2;

    let mapping = LetterboxMapping {
        scale: scale as f32,
        pad_x: pad_x as f32,
        pad_y: pad_y as f32,
        original_width: width,
        original_height: height,
    };
    (mapping, new_w, new_h)
}

fn letterbox_canvas<'a>(
    image: &SourceImage,
    model_size: u32,
    new_w: u32,
    new_h: u32,
    mapping: &LetterboxMapping,
    pad_value: u8,
) -> Result<FirImage<'a>, DetectError> {
    let fill = [pad_value, pad_value, pad_value, u8::MAX];
    let pixels = model_size as usize * model_size as usize;
    let mut padded = FirImage::from_vec_u8(
        model_size,
        model_size,
        fill.repeat(pixels),
        PixelType::U8x4,
    )?;

    // Very thin images can round to nothing, the canvas then stays pure padding.
    if new_w == 0 || new_h == 0 {
        return Ok(padded);
    }

    let (w0, h0) = image.dimensions();
    let src = ImageRef::new(w0, h0, image.as_raw(), PixelType::U8x4)?;
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear));
    let mut resizer = Resizer::new();

    let mut cropped = CroppedImageMut::new(
        &mut padded,
        mapping.pad_x as u32,
        mapping.pad_y as u32,
        new_w,
        new_h,
    )?;
    resizer.resize(&src, &mut cropped, &options)?;

    Ok(padded)
}

/// RGBA canvas to planar RGB floats. Alpha is composited over the pad colour and dropped.
fn nchw_normalize_flat(buf: &[u8], size: usize, pad_value: u8) -> Vec<f32> {
    let hw = size * size;
    let mut out = vec![0.0f32; 3 * hw];

    out.par_chunks_mut(hw).enumerate().for_each(|(c, plane)| {
        for (i, v) in plane.iter_mut().enumerate() {
            let px = &buf[4 * i..4 * i + 4];
            *v = composite(px[c], px[3], pad_value) as f32 / 255.0;
        }
    });

    out
}

fn composite(value: u8, alpha: u8, background: u8) -> u8 {
    if alpha == u8::MAX {
        return value;
    }
    let a = alpha as u32;
    ((value as u32 * a + background as u32 * (255 - a) + 127) / 255) as u8
}

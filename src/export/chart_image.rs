use std::path::Path;

use image::{ImageFormat, RgbaImage, imageops::FilterType};

use crate::config::DF;
use crate::export::ExportError;

/// Unmultiplied RGBA pixels of a captured screen region, row-major.
#[derive(Debug, Clone)]
pub struct RgbaCapture {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl RgbaCapture {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba,
        }
    }
}

/// Upscales the capture by `scale` and writes it as PNG. Returns the written size.
pub fn write_png(capture: RgbaCapture, scale: u32, path: &Path) -> Result<(u32, u32), ExportError> {
    if path.as_os_str().is_empty() {
        return Err(ExportError::EmptyPath);
    }
    if capture.width == 0 || capture.height == 0 {
        return Err(ExportError::InvalidImage("capture is empty".into()));
    }

    let (w, h) = (capture.width, capture.height);
    let expected = w as usize * h as usize * 4;
    if capture.rgba.len() != expected {
        return Err(ExportError::InvalidImage(format!(
            "{} bytes for {}x{} pixels",
            capture.rgba.len(),
            w,
            h
        )));
    }
    let img = RgbaImage::from_raw(w, h, capture.rgba)
        .ok_or_else(|| ExportError::InvalidImage(format!("{}x{} buffer rejected", w, h)))?;

    let scale = scale.max(1);
    let out = if scale == 1 {
        img
    } else {
        image::imageops::resize(&img, w * scale, h * scale, FilterType::Lanczos3)
    };
    out.save_with_format(path, ImageFormat::Png)?;

    if DF.log_exports {
        log::info!(
            "Exported chart {}x{} (x{}) to {}",
            out.width(),
            out.height(),
            scale,
            path.display()
        );
    }
    Ok((out.width(), out.height()))
}

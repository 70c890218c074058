//! Screen capture domain — region type, the capture port, and the
//! xcap-backed adapter.
//!
//! External code should only use the types and functions exported here.

use crate::config::{OVERLAY_MARGIN, OVERLAY_WIDTH};
use crate::error::CaptureError;
use image::DynamicImage;

/// A capture rectangle in screen pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Narrow port over the screen grab. Returns PNG bytes so callers never
/// touch pixel buffers. `None` means the default region: the full
/// screen minus the overlay column on the right.
pub trait ScreenSource: Send + Sync {
    fn capture(&self, region: Option<CaptureRegion>) -> Result<Vec<u8>, CaptureError>;
}

/// Everything left of the overlay column, so the assistant does not
/// read its own window.
pub fn default_region(screen_width: u32, screen_height: u32) -> CaptureRegion {
    let reserved = OVERLAY_WIDTH + OVERLAY_MARGIN;
    let width = if screen_width > reserved {
        screen_width - reserved
    } else {
        screen_width
    };
    CaptureRegion {
        x: 0,
        y: 0,
        width,
        height: screen_height,
    }
}

/// Intersect a requested region with the screenshot bounds.
fn clamp_region(region: CaptureRegion, width: u32, height: u32) -> Result<CaptureRegion, CaptureError> {
    if region.x >= width || region.y >= height {
        return Err(CaptureError::EmptyRegion(region.width, region.height));
    }
    let clamped_width = region.width.min(width - region.x);
    let clamped_height = region.height.min(height - region.y);
    if clamped_width == 0 || clamped_height == 0 {
        return Err(CaptureError::EmptyRegion(clamped_width, clamped_height));
    }
    Ok(CaptureRegion {
        x: region.x,
        y: region.y,
        width: clamped_width,
        height: clamped_height,
    })
}

/// Primary-monitor grab via xcap.
pub struct XcapSource;

impl ScreenSource for XcapSource {
    fn capture(&self, region: Option<CaptureRegion>) -> Result<Vec<u8>, CaptureError> {
        let start = std::time::Instant::now();

        let monitors = xcap::Monitor::all().map_err(|e| CaptureError::Grab(e.to_string()))?;
        let monitor = monitors
            .into_iter()
            .find(|m| m.is_primary().unwrap_or(false))
            .ok_or(CaptureError::NoMonitor)?;
        let frame = monitor
            .capture_image()
            .map_err(|e| CaptureError::Grab(e.to_string()))?;
        let grab_ms = start.elapsed().as_millis();

        let screenshot = DynamicImage::ImageRgba8(frame);
        let region = region
            .unwrap_or_else(|| default_region(screenshot.width(), screenshot.height()));
        let region = clamp_region(region, screenshot.width(), screenshot.height())?;
        let cropped = screenshot.crop_imm(region.x, region.y, region.width, region.height);

        // Encode in memory — no disk I/O on the capture path.
        let encode_start = std::time::Instant::now();
        let mut png_bytes = Vec::new();
        cropped.write_to(
            &mut std::io::Cursor::new(&mut png_bytes),
            image::ImageFormat::Png,
        )?;

        log::info!(
            "[CAPTURE] {}x{} at ({},{}) — grab {}ms, encode {}ms, {} bytes",
            region.width,
            region.height,
            region.x,
            region.y,
            grab_ms,
            encode_start.elapsed().as_millis(),
            png_bytes.len()
        );
        Ok(png_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_region_reserves_overlay_column() {
        let region = default_region(1920, 1080);
        assert_eq!(region.x, 0);
        assert_eq!(region.width, 1920 - OVERLAY_WIDTH - OVERLAY_MARGIN);
        assert_eq!(region.height, 1080);
    }

    #[test]
    fn narrow_screen_falls_back_to_full_width() {
        let region = default_region(640, 480);
        assert_eq!(region.width, 640);
    }

    #[test]
    fn clamp_shrinks_oversized_regions() {
        let region = CaptureRegion { x: 100, y: 50, width: 5000, height: 5000 };
        let clamped = clamp_region(region, 1920, 1080).unwrap();
        assert_eq!(clamped.width, 1820);
        assert_eq!(clamped.height, 1030);
    }

    #[test]
    fn clamp_rejects_regions_outside_the_screen() {
        let region = CaptureRegion { x: 2000, y: 0, width: 10, height: 10 };
        assert!(clamp_region(region, 1920, 1080).is_err());
    }

    #[test]
    fn clamp_rejects_zero_sized_regions() {
        let region = CaptureRegion { x: 0, y: 0, width: 0, height: 10 };
        assert!(clamp_region(region, 1920, 1080).is_err());
    }
}

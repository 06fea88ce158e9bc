//! Image ingestion: pixel luminance splatted into the grid.
//!
//! Each destination pixel receives `intensity * (r + g + b) / 765` as a point
//! splat, so placement at fractional offsets is anti-aliased like any other
//! point.

use crate::image::PixelSource;
use crate::render::splat::Plot;

/// Full channel sum of a white pixel.
const WHITE: f32 = 765.0;

/// Place `src` 1:1 with its top-left pixel at `(x, y)`.
pub fn stamp_image<S>(out: &mut impl Plot, src: &S, x: f32, y: f32, intensity: f32)
where
    S: PixelSource + ?Sized,
{
    for row in 0..src.height() {
        for col in 0..src.width() {
            let val = intensity * src.channel_sum(col, row) as f32 / WHITE;
            out.plot(col as f32 + x, row as f32 + y, val);
        }
    }
}

/// Resample `src` bilinearly onto a `size_x`×`size_y` block at `(x, y)`.
///
/// Sizes are floored to whole pixels. The first and last destination pixels
/// of each axis sample the first and last source pixels exactly; a
/// destination axis of one pixel samples the first source pixel.
pub fn resample_image<S>(
    out: &mut impl Plot,
    src: &S,
    x: f32,
    y: f32,
    size_x: f32,
    size_y: f32,
    intensity: f32,
) where
    S: PixelSource + ?Sized,
{
    let (src_w, src_h) = (src.width(), src.height());
    if src_w == 0 || src_h == 0 || !size_x.is_finite() || !size_y.is_finite() {
        return;
    }

    let cols = size_x.floor().max(0.0) as u32;
    let rows = size_y.floor().max(0.0) as u32;
    let step_x = sample_step(src_w, cols);
    let step_y = sample_step(src_h, rows);

    for i in 0..rows {
        let pyf = i as f32 * step_y;
        let py = (pyf.floor() as u32).min(src_h - 1);
        let pyn = (py + 1).min(src_h - 1);
        let ry = pyf - py as f32;

        for j in 0..cols {
            let pxf = j as f32 * step_x;
            let px = (pxf.floor() as u32).min(src_w - 1);
            let pxn = (px + 1).min(src_w - 1);
            let rx = pxf - px as f32;

            let sum = (1.0 - rx) * (1.0 - ry) * src.channel_sum(px, py) as f32
                + (1.0 - rx) * ry * src.channel_sum(px, pyn) as f32
                + rx * ry * src.channel_sum(pxn, pyn) as f32
                + rx * (1.0 - ry) * src.channel_sum(pxn, py) as f32;

            out.plot(j as f32 + x, i as f32 + y, intensity * sum / WHITE);
        }
    }
}

/// Source distance between neighboring destination samples.
fn sample_step(src: u32, dst: u32) -> f32 {
    if dst > 1 {
        (src - 1) as f32 / (dst - 1) as f32
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::RgbImage;
    use crate::render::splat::Record;
    use crate::render::stroke::{Compose, StrokeBuffer};
    use approx::assert_abs_diff_eq;

    fn cells(buf: &StrokeBuffer, len: usize) -> Vec<f32> {
        let mut out = vec![0.0; len];
        for (index, weight) in buf.iter() {
            out[index] = weight;
        }
        out
    }

    #[test]
    fn test_stamp_luminance() {
        // White, gray, black, red.
        let data = [255, 255, 255, 51, 51, 51, 0, 0, 0, 255, 0, 0];
        let img = RgbImage::new(2, 2, &data).unwrap();

        let mut buf = StrokeBuffer::new(4, 4);
        stamp_image(&mut Record::new(&mut buf, Compose::Sum), &img, 1.0, 1.0, 2.0);
        let grid = cells(&buf, 16);

        assert_abs_diff_eq!(grid[5], 2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(grid[6], 0.4, epsilon = 1e-6);
        assert_abs_diff_eq!(grid[9], 0.0);
        assert_abs_diff_eq!(grid[10], 2.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_stamp_clips_to_grid() {
        let data = [255u8; 3 * 9];
        let img = RgbImage::new(3, 3, &data).unwrap();

        let mut buf = StrokeBuffer::new(2, 2);
        stamp_image(&mut Record::new(&mut buf, Compose::Sum), &img, -1.0, -1.0, 1.0);

        assert_eq!(buf.len(), 4);
        assert!(cells(&buf, 4).iter().all(|&v| (v - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_resample_stretches_gradient() {
        // Black to white, two pixels wide.
        let data = [0, 0, 0, 255, 255, 255];
        let img = RgbImage::new(2, 1, &data).unwrap();

        let mut buf = StrokeBuffer::new(5, 1);
        resample_image(&mut Record::new(&mut buf, Compose::Sum), &img, 0.0, 0.0, 5.0, 1.0, 1.0);
        let grid = cells(&buf, 5);

        for (x, expected) in [0.0, 0.25, 0.5, 0.75, 1.0].into_iter().enumerate() {
            assert_abs_diff_eq!(grid[x], expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_resample_single_pixel_axis() {
        let data = [30, 30, 30, 255, 255, 255];
        let img = RgbImage::new(2, 1, &data).unwrap();

        let mut buf = StrokeBuffer::new(2, 2);
        resample_image(&mut Record::new(&mut buf, Compose::Sum), &img, 0.0, 0.0, 1.0, 1.0, 1.0);

        let grid = cells(&buf, 4);
        assert_abs_diff_eq!(grid[0], 90.0 / 765.0, epsilon = 1e-6);
        assert_abs_diff_eq!(grid.iter().sum::<f32>(), 90.0 / 765.0, epsilon = 1e-6);
    }

    #[test]
    fn test_resample_empty_size() {
        let data = [255u8; 3];
        let img = RgbImage::new(1, 1, &data).unwrap();

        let mut buf = StrokeBuffer::new(2, 2);
        resample_image(&mut Record::new(&mut buf, Compose::Sum), &img, 0.0, 0.0, 0.9, 4.0, 1.0);
        resample_image(&mut Record::new(&mut buf, Compose::Sum), &img, 0.0, 0.0, f32::NAN, 4.0, 1.0);
        assert!(buf.is_empty());
    }
}

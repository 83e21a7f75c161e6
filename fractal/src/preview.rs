use image::{GrayImage, Luma, Rgb, RgbImage};
use palette::{Gradient, LinSrgb};

use crate::grid::Grid2D;
use crate::value::{CellValue, ValueRange};

// Scale values to 0..=255 grey, 0 black and max_value white
pub fn to_gray_image<T: CellValue>(grid: &Grid2D<T>, range: ValueRange) -> GrayImage {
    let max = f64::from(range.max());
    GrayImage::from_fn(grid.nx() as u32, grid.ny() as u32, |x, y| {
        let v = f64::from(range.clamp(i64::from(grid[(x as usize, y as usize)].to_i32())));
        Luma([(v / max * 255.0).round() as u8])
    })
}

// Colour a map as water at or below `sea_level` and land above it
pub fn to_terrain_image<T: CellValue>(
    grid: &Grid2D<T>,
    range: ValueRange,
    sea_level: i32,
) -> RgbImage {
    let water = Gradient::new(vec![
        LinSrgb::new(0.0, 0.0, 0.5), // deep
        LinSrgb::new(0.0, 0.5, 1.0), // shallow
    ]);
    let land = Gradient::with_domain(vec![
        (0.00, LinSrgb::new(0.76, 0.7, 0.5)), // sand
        (0.25, LinSrgb::new(0.13, 0.55, 0.13)), // grass
        (0.70, LinSrgb::new(0.5, 0.5, 0.5)), // rock
        (1.00, LinSrgb::new(1.0, 1.0, 1.0)), // snow
    ]);

    let sea_level = sea_level.clamp(0, range.max());
    RgbImage::from_fn(grid.nx() as u32, grid.ny() as u32, |x, y| {
        let h = range.clamp(i64::from(grid[(x as usize, y as usize)].to_i32()));
        let col: LinSrgb = if h <= sea_level {
            let t = if sea_level == 0 { 1.0 } else { h as f32 / sea_level as f32 };
            water.get(t)
        } else {
            let span = (range.max() - sea_level).max(1) as f32;
            land.get((h - sea_level) as f32 / span)
        };
        let rgb = col.into_format::<u8>();
        Rgb([rgb.red, rgb.green, rgb.blue])
    })
}

#[cfg(test)]
mod tests {
    use super::{to_gray_image, to_terrain_image};
    use crate::{Grid2D, ValueRange};

    #[test]
    fn gray_image_spans_black_to_white() {
        let grid = Grid2D::from_rows(vec![vec![0u16, 500, 1000]]).unwrap();
        let img = to_gray_image(&grid, ValueRange::new(1000).unwrap());
        assert_eq!(img.dimensions(), (3, 1));
        assert_eq!(img.get_pixel(0, 0).0, [0]);
        assert_eq!(img.get_pixel(1, 0).0, [128]);
        assert_eq!(img.get_pixel(2, 0).0, [255]);
    }

    #[test]
    fn terrain_image_splits_at_sea_level() {
        let grid = Grid2D::from_rows(vec![vec![10u8, 200]]).unwrap();
        let img = to_terrain_image(&grid, ValueRange::BYTE, 100);
        let water = img.get_pixel(0, 0).0;
        let land = img.get_pixel(1, 0).0;
        assert!(water[2] > water[0], "water should be blue: {water:?}");
        assert!(land[0] > land[2] || land[1] > land[2], "land should not be blue: {land:?}");
    }
}

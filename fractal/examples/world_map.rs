// Generates a 257×257 world, picks a sea level from the histogram and saves:
// world_gray.png (raw heights)
// world_terrain.png (water below sea level, land above)

use fractal::preview::{to_gray_image, to_terrain_image};
use fractal::{ByteMap, DiamondSquare, DiamondSquareConfig, Grid2D, Histogram, ValueRange};
use std::path::Path;

const OCEAN_SHARE: f64 = 0.55;

fn main() {
    let size = 257; // 2^8 + 1

    let mut config = DiamondSquareConfig::byte_range().with_seed(2025);
    config.free_steps = 2; // a few extra landmasses
    config.smoothing = 0.78;
    config.variance = 128.0;

    // Ocean rim: the border is pre-seeded, so generation keeps it
    let mut map: ByteMap = Grid2D::new(size, size);
    map.fill_border(1);

    let mut hist = Histogram::new(255);
    let summary = DiamondSquare::new(config)
        .generate(&mut map, Some(&mut hist))
        .expect("257 is a valid side");
    println!(
        "{} iterations, {} cells written, final variance {:.2}",
        summary.iterations, summary.cells_written, summary.final_variance
    );

    let sea_level = hist.threshold_for_fraction(OCEAN_SHARE);
    println!("Sea level for {:.0}% ocean: {}", OCEAN_SHARE * 100.0, sea_level);

    to_gray_image(&map, ValueRange::BYTE)
        .save(Path::new("world_gray.png"))
        .unwrap();
    println!("Saved world_gray.png");

    to_terrain_image(&map, ValueRange::BYTE, sea_level)
        .save(Path::new("world_terrain.png"))
        .unwrap();
    println!("Saved world_terrain.png");
}

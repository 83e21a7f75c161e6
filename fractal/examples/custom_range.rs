use fractal::{DiamondSquare, DiamondSquareConfig, Grid2D, Histogram, WideMap};

fn main() {
    // 0..=4095 gives rare-resource placement finer odds than a byte map
    let max_value = 4095;
    let config = DiamondSquareConfig::from_toml_str(
        r#"
        seed = 7
        max_value = 4095
        variance = 2048.0
        smoothing = 0.76
        "#,
    )
    .unwrap();

    let mut map: WideMap = Grid2D::new(129, 129);
    let mut hist = Histogram::new(max_value);
    DiamondSquare::new(config)
        .generate(&mut map, Some(&mut hist))
        .unwrap();

    // Top 0.5% of cells become ore deposits
    let cutoff = hist.threshold_for_fraction(0.995);
    let deposits = map.as_slice().iter().filter(|&&v| v > cutoff).count();
    println!("Ore above {cutoff}: {deposits} of {} cells", map.len());

    // Print the top-left 16×16 corner of the map
    for y in 0..16 {
        for x in 0..16 {
            print!("{:>5} ", map[(x, y)]);
        }
        println!();
    }
}

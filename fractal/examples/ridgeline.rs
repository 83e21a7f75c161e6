use fractal::LinearMidpoint;

fn main() {
    // 65-cell mountain profile with heights 0..=20
    let width = 65;
    let height = 20;
    let mut ridge = vec![0i32; width];
    LinearMidpoint::seeded(2025)
        .generate(&mut ridge, height)
        .unwrap();

    // Print it sideways as a silhouette, top row first
    for level in (1..=height as i32).rev() {
        let row: String = ridge
            .iter()
            .map(|&h| if h >= level { '#' } else { ' ' })
            .collect();
        println!("{row}");
    }
}

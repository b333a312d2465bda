//! Headless frame export: simulate ten seconds and write a PNG.
//!
//! Run with: `cargo run --example snapshot [output.png]`

use driftmesh::Background;

fn main() {
    let mut renderer = Background::new().with_seed(42).build(1200.0, 800.0);

    let mut now = 0.0;
    for _ in 0..600 {
        renderer.frame(now);
        now += 1000.0 / 60.0;
    }

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "background.png".to_string());
    match renderer.canvas().save_png(&path) {
        Ok(()) => println!("wrote {path}"),
        Err(e) => {
            eprintln!("snapshot failed: {e}");
            std::process::exit(1);
        }
    }
}

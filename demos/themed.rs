//! Themed background: blue accent, denser field, frequent snap pulses.
//!
//! Run with: `cargo run --example themed`

use driftmesh::Background;

fn main() {
    if let Err(e) = Background::new()
        .with_title("driftmesh - themed")
        .with_accent_css("hsl(210 80% 55%)")
        .with_density(1.4)
        .with_snap_every(10.0, 20.0)
        .with_snap_envelope(2.0, 3.0, 3.0)
        .run()
    {
        eprintln!("background failed: {e}");
    }
}

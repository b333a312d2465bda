use driftmesh::Background;

fn main() {
    if let Err(e) = Background::new().run() {
        eprintln!("background failed: {e}");
        std::process::exit(1);
    }
}

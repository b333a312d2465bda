//! End-to-end tests driving the renderer with synthetic timestamps.

use driftmesh::field::VIEW_PAD;
use driftmesh::renderer::CLEAR_COLOR;
use driftmesh::{Background, BackgroundConfig, RenderState, Renderer};
use rand::{Rng, SeedableRng};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn drive(r: &mut Renderer, frames: usize) -> f64 {
    let mut now = 0.0;
    for _ in 0..frames {
        r.frame(now);
        now += FRAME_MS;
    }
    now
}

#[test]
fn test_sizing_scenarios() {
    // count = round(w * h / 12000 * density), clamped to [36, 180]
    let cases = [
        (1200.0, 800.0, 1.0, 80),
        (1920.0, 1080.0, 1.0, 173),
        (320.0, 200.0, 1.0, 36),
        (3840.0, 2160.0, 1.0, 180),
        (1200.0, 800.0, 0.5, 40),
    ];
    for (w, h, density, expected) in cases {
        let r = Background::new().with_density(density).build(w, h);
        assert_eq!(r.particle_count(), expected, "{w}x{h} @ {density}");
    }
}

#[test]
fn test_two_runs_identical() {
    let mut a = Background::new().with_seed(1234).build(1200.0, 800.0);
    let mut b = Background::new().with_seed(1234).build(1200.0, 800.0);
    drive(&mut a, 300);
    drive(&mut b, 300);

    for i in 0..a.particle_count() {
        assert_eq!(a.field().base_pos(i), b.field().base_pos(i), "particle {i}");
        assert_eq!(a.field().screen_pos(i), b.field().screen_pos(i));
    }
    assert_eq!(a.mesh().sorted_entries(), b.mesh().sorted_entries());
    assert_eq!(a.canvas().data(), b.canvas().data());
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = Background::new().with_seed(1).build(1200.0, 800.0);
    let mut b = Background::new().with_seed(2).build(1200.0, 800.0);
    drive(&mut a, 10);
    drive(&mut b, 10);
    let moved = (0..a.particle_count()).any(|i| a.field().base_pos(i) != b.field().base_pos(i));
    assert!(moved, "different seeds should place particles differently");
}

#[test]
fn test_positions_stay_bounded() {
    let mut r = Background::new().build(1200.0, 800.0);
    // several minutes of simulated time, including snap pulses
    let mut now = 0.0;
    for _ in 0..2000 {
        r.frame(now);
        now += 100.0;
        for i in 0..r.particle_count() {
            let s = r.field().screen_pos(i);
            assert!(s.x.is_finite() && s.y.is_finite());
            assert!((-VIEW_PAD..=1200.0 + VIEW_PAD).contains(&s.x));
            assert!((-VIEW_PAD..=800.0 + VIEW_PAD).contains(&s.y));
        }
    }
}

#[test]
fn test_irregular_frame_timing_is_safe() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let mut r = Background::new().build(1200.0, 800.0);
    let mut now = 0.0;
    for _ in 0..1000 {
        // jittery cadence with occasional long stalls
        now += if rng.gen_bool(0.05) {
            rng.gen_range(200.0..2000.0)
        } else {
            rng.gen_range(1.0..50.0)
        };
        r.frame(now);
    }
    for i in 0..r.particle_count() {
        let b = r.field().base_pos(i);
        // a clamped 32 ms delta bounds drift; bases stay near the viewport
        assert!((-10.0..=1210.0).contains(&b.x));
        assert!((-10.0..=810.0).contains(&b.y));
    }
}

#[test]
fn test_governor_degrades_and_recovers() {
    let mut r = Background::new().build(1200.0, 800.0);
    let initial = r.particle_count();
    assert!(r.shading_enabled());

    // ~3 s at 20 fps: three windows below threshold, each sheds 10%
    let mut now = 0.0;
    for _ in 0..62 {
        r.frame(now);
        now += 50.0;
    }
    assert!(!r.shading_enabled());
    let degraded = r.particle_count();
    assert!(degraded < initial);

    // 2 s at 60 fps: shading returns, the count does not
    for _ in 0..120 {
        r.frame(now);
        now += FRAME_MS;
    }
    assert!(r.shading_enabled());
    assert_eq!(r.particle_count(), degraded);
}

#[test]
fn test_triangles_off_never_shades() {
    let mut r = Background::new().with_triangles(false).build(1200.0, 800.0);
    let mut now = 0.0;
    for _ in 0..200 {
        r.frame(now);
        now += FRAME_MS;
    }
    assert!(!r.shading_enabled());
    assert!(r.mesh().is_empty());
}

#[test]
fn test_disabled_renderer_is_inert() {
    let mut r = Background::new().reduced_motion(true).build(1200.0, 800.0);
    assert_eq!(r.state(), RenderState::Disabled);
    drive(&mut r, 60);
    assert_eq!(r.state(), RenderState::Disabled);
    assert_eq!(r.particle_count(), 0);
    // canvas untouched: still the initial black fill
    assert!(r.canvas().data().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn test_pause_skips_time() {
    let mut r = Background::new().build(1200.0, 800.0);
    let now = drive(&mut r, 10);
    r.pause();
    let frozen: Vec<_> = (0..r.particle_count()).map(|i| r.field().screen_pos(i)).collect();
    r.frame(now + 10_000.0);
    for (i, s) in frozen.iter().enumerate() {
        assert_eq!(r.field().screen_pos(i), *s);
    }
    r.resume(now + 20_000.0);
    r.frame(now + 20_000.0 + FRAME_MS);
    assert_eq!(r.state(), RenderState::Running);
}

#[test]
fn test_resize_midway_keeps_running() {
    let mut r = Background::new().build(1200.0, 800.0);
    drive(&mut r, 30);
    let kept = r.field().base_pos(0);
    r.resize(1920.0, 1080.0);
    assert_eq!(r.particle_count(), 173);
    assert_eq!(r.field().base_pos(0), kept);
    r.frame(30.0 * FRAME_MS);
    assert_eq!(r.canvas().width(), 1920);
    assert_eq!(r.canvas().height(), 1080);
}

#[test]
fn test_shrink_resize_frees_stranded_particles() {
    let mut r = Background::new().with_seed(1234).build(1920.0, 1080.0);
    let mut now = drive(&mut r, 10);

    r.resize(800.0, 500.0);
    for i in 0..r.particle_count() {
        let b = r.field().base_pos(i);
        assert!((0.0..=800.0).contains(&b.x), "particle {i} x {}", b.x);
        assert!((0.0..=500.0).contains(&b.y), "particle {i} y {}", b.y);
    }

    // two minutes of frames: no survivor pinned outside the viewport
    for _ in 0..7200 {
        r.frame(now);
        now += FRAME_MS;
    }
    for i in 0..r.particle_count() {
        let b = r.field().base_pos(i);
        assert!((-1.0..=801.0).contains(&b.x), "particle {i} x {}", b.x);
        assert!((-1.0..=501.0).contains(&b.y), "particle {i} y {}", b.y);
    }
}

#[test]
fn test_frame_renders_over_clear_color() {
    let mut r = Background::new().build(640.0, 480.0);
    drive(&mut r, 5);
    let data = r.canvas().data();
    assert!(data.chunks_exact(4).any(|px| px != CLEAR_COLOR.as_slice()));
    // most of the frame is still background
    let clear = data
        .chunks_exact(4)
        .filter(|px| *px == CLEAR_COLOR.as_slice())
        .count();
    assert!(clear * 2 > (640 * 480));
}

#[test]
fn test_snapshot_export() {
    let mut r = Background::new().build(320.0, 240.0);
    drive(&mut r, 10);
    let path = std::env::temp_dir().join("driftmesh_snapshot_test.png");
    r.canvas().save_png(&path).unwrap();
    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (320, 240));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_reconfigure_on_the_fly() {
    let mut r = Background::new().build(1200.0, 800.0);
    drive(&mut r, 30);
    let mut cfg = BackgroundConfig::default();
    cfg.density = 0.5;
    cfg.hue = Some(300.0);
    r.reconfigure(cfg);
    assert_eq!(r.particle_count(), 40);
    assert_eq!(r.hue(), 300.0);
    r.frame(30.0 * FRAME_MS);
    assert_eq!(r.state(), RenderState::Running);
}

use glam::Vec3;

use festival_viz::composer::{apply, SceneComposer};
use festival_viz::config::{GalleryConfig, TunnelConfig};
use festival_viz::progress::ScrollProgress;
use festival_viz::scene::SceneGraph;
use festival_viz::timeline::Timeline;

const TILE_TEXTURES: usize = 15;
const PANELS: usize = 5;
const DT: f32 = 1.0 / 60.0;

fn composer() -> SceneComposer {
    SceneComposer::new(
        Timeline::default(),
        TunnelConfig::default(),
        GalleryConfig::default(),
        TILE_TEXTURES,
        PANELS,
        0xfe57,
    )
}

fn graph() -> SceneGraph {
    let cfg = TunnelConfig::default();
    SceneGraph::new(cfg.tile_count, cfg.ribbon_count, PANELS, cfg.base_fov)
}

fn at(r: f32) -> ScrollProgress {
    ScrollProgress::new(r)
}

#[test]
fn detached_slots_are_skipped() {
    let mut composer = composer();
    let mut graph = graph();

    for step in 0..=100 {
        composer.compose(at(step as f32 / 100.0), DT, &mut graph);
    }

    assert!(graph.tunnel_group.is_none());
    assert!(graph.about_group.is_none());
    assert!(graph.tiles.iter().all(Option::is_none));
    assert!(graph.ribbons.iter().all(Option::is_none));
    assert!(graph.panels.iter().all(Option::is_none));
}

#[test]
fn late_attached_slots_pick_up_the_next_frame() {
    let mut composer = composer();
    let mut graph = graph();
    composer.compose(at(0.42), DT, &mut graph);

    graph.attach_static();
    graph.attach_tile(0);
    composer.compose(at(0.42), DT, &mut graph);

    assert!(graph.tunnel_group.is_some_and(|g| g.visible));
    let tile = graph.tiles[0].expect("attached");
    assert_eq!(tile.visible, composer.frame().tunnel.tile_active[0]);
    assert!(graph.tiles[1].is_none());
}

#[test]
fn tunnel_is_idle_at_the_top_of_the_page() {
    let mut composer = composer();
    let frame = composer.update(at(0.0), DT);
    assert!(!frame.tunnel.visible);
    assert!(!frame.tunnel.ribbons_visible);
    assert_eq!(frame.tunnel.active_tiles, 0);
    assert_eq!(frame.tunnel.speed.ribbon, 0.0);
}

#[test]
fn tunnel_fills_up_while_scrolling_through() {
    let mut composer = composer();
    let mut graph = graph();
    graph.attach_static();
    for i in 0..graph.tiles.len() {
        graph.attach_tile(i);
    }

    composer.compose(at(0.42), DT, &mut graph);
    let frame = composer.frame();
    assert!(frame.tunnel.visible);
    assert!(frame.tunnel.ribbons_visible);
    assert!(frame.tunnel.active_tiles > 0);
    assert!(frame.tunnel.active_tiles < graph.tiles.len());

    let visible = graph.tiles.iter().flatten().filter(|t| t.visible).count();
    assert_eq!(visible, frame.tunnel.active_tiles);
    assert!(graph.ribbons.iter().flatten().all(|r| r.visible));
    assert!(graph.ribbon_opacity > 0.0);
    for (node, &texture) in graph.tiles.iter().flatten().zip(&frame.tunnel.tile_textures) {
        if node.visible {
            assert_eq!(node.texture, texture);
            assert!(texture < TILE_TEXTURES);
        }
    }
}

#[test]
fn camera_widens_its_view_in_the_tunnel() {
    let mut composer = composer();
    let base = TunnelConfig::default().base_fov;

    // A fast scroll into the tunnel builds up velocity.
    let mut r = 0.30;
    for _ in 0..20 {
        r += 0.01;
        composer.update(at(r), DT);
    }
    assert!(composer.velocity().boost() > 0.0);
    assert!(composer.frame().camera.fov > base);

    // Sitting still well past the tunnel lets it settle back.
    for _ in 0..600 {
        composer.update(at(0.65), DT);
    }
    assert!((composer.frame().camera.fov - base).abs() < 1e-3);
    assert!(composer.velocity().boost() < 1e-3);
}

#[test]
fn gallery_owns_the_camera_once_it_shows() {
    let cfg = GalleryConfig::default();
    let mut composer = composer();

    let frame = composer.update(at(1.0), DT);
    assert!(frame.gallery.visible);
    assert_eq!(frame.camera.position, cfg.camera_end);
    let to_origin = (Vec3::ZERO - cfg.camera_end).normalize();
    assert!(frame.camera.forward.abs_diff_eq(to_origin, 1e-5));

    let frame = composer.update(at(0.78), DT);
    assert!(frame.gallery.visible);
    let z = frame.camera.position.z;
    assert!(z > cfg.camera_start.z && z < cfg.camera_end.z);
}

#[test]
fn base_camera_pose_returns_when_scrolling_back() {
    let cfg = GalleryConfig::default();
    let mut composer = composer();

    composer.update(at(1.0), DT);
    let frame = composer.update(at(0.6), DT);
    assert!(!frame.gallery.visible);
    assert_eq!(frame.camera.position, cfg.camera_start);
    assert_eq!(frame.camera.forward, Vec3::NEG_Z);
}

#[test]
fn about_panel_is_only_placed_while_visible() {
    let mut composer = composer();
    let mut graph = graph();
    graph.attach_static();

    composer.compose(at(0.64), DT, &mut graph);
    let about = graph.about_group.expect("attached");
    assert!(about.visible);
    assert_eq!(about.transform.opacity, 1.0);

    composer.compose(at(0.2), DT, &mut graph);
    let hidden = graph.about_group.expect("attached");
    assert!(!hidden.visible);
    // Left where it was while hidden.
    assert_eq!(hidden.transform, about.transform);
}

#[test]
fn panel_opacity_follows_focus() {
    let mut composer = composer();
    let mut graph = graph();
    graph.attach_static();
    for i in 0..PANELS {
        graph.attach_panel(i, i);
    }

    composer.compose(at(0.9), DT, &mut graph);
    let frame = composer.frame();
    assert!(graph.gallery_group.is_some_and(|g| g.visible));
    for (node, &opacity) in graph.panels.iter().flatten().zip(&frame.gallery.panel_opacity) {
        assert!(node.visible);
        assert_eq!(node.transform.opacity, opacity);
        assert!((0.3..=1.0).contains(&opacity));
    }
}

#[test]
fn apply_writes_camera_from_frame() {
    let mut composer = composer();
    let mut graph = graph();
    let frame = composer.update(at(0.95), DT).clone();
    apply(&frame, &mut graph);
    assert_eq!(graph.camera, frame.camera);
}

#[test]
fn tunnel_children_are_left_alone_outside_the_window() {
    let mut composer = composer();
    let mut graph = graph();
    graph.attach_static();
    for i in 0..graph.tiles.len() {
        graph.attach_tile(i);
    }
    composer.compose(at(0.42), DT, &mut graph);
    assert!(composer.frame().tunnel.active_tiles > 0);

    let tiles: Vec<_> = graph.tiles.iter().map(|n| n.map(|n| n.transform)).collect();
    let ribbons: Vec<_> = graph.ribbons.iter().map(|n| n.map(|n| n.transform)).collect();
    let depths: Vec<f32> = composer.tiles().tiles().iter().map(|t| t.z).collect();

    composer.compose(at(0.9), DT, &mut graph);

    let frame = composer.frame();
    assert!(!frame.tunnel.visible);
    assert_eq!(frame.tunnel.speed, Default::default());
    assert_eq!(frame.tunnel.active_tiles, 0);
    assert!(graph.tunnel_group.is_some_and(|g| !g.visible));

    let tiles_after: Vec<_> = graph.tiles.iter().map(|n| n.map(|n| n.transform)).collect();
    let ribbons_after: Vec<_> = graph.ribbons.iter().map(|n| n.map(|n| n.transform)).collect();
    let depths_after: Vec<f32> = composer.tiles().tiles().iter().map(|t| t.z).collect();
    assert_eq!(tiles_after, tiles);
    assert_eq!(ribbons_after, ribbons);
    assert_eq!(depths_after, depths);
}

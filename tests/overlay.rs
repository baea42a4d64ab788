use festival_viz::config::{HandoffConfig, TimelineBoundaries};
use festival_viz::overlay::{LayerStyle, OverlaySync};
use festival_viz::progress::{ProgressSource, VirtualScroll};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn sync() -> OverlaySync {
    OverlaySync::new(TimelineBoundaries::default(), 8.0, 15)
}

#[test]
fn hero_holds_then_zooms_then_hands_off() {
    let overlay = sync();
    let h = HandoffConfig::from_timeline(&TimelineBoundaries::default());

    assert_eq!(overlay.hero(0.0), (1.0, 1.0));
    assert_eq!(overlay.hero(h.hero_hold_end * 0.5), (1.0, 1.0));

    let (scale, opacity) = overlay.hero((h.hero_hold_end + h.hero_zoom_end) / 2.0);
    assert!(scale > 1.0 && scale < h.hero_zoom_scale);
    assert_eq!(opacity, 1.0);

    let (scale, opacity) = overlay.hero((h.hero_zoom_end + h.hero_handoff_end) / 2.0);
    assert!(scale > h.hero_zoom_scale && scale < h.hero_exit_scale);
    assert!(approx(opacity, 0.5));

    assert_eq!(overlay.hero(h.hero_handoff_end), (h.hero_exit_scale, 0.0));
    assert_eq!(overlay.hero(0.9), (h.hero_exit_scale, 0.0));
}

#[test]
fn background_zooms_less_than_the_headline() {
    let overlay = sync();
    let h = HandoffConfig::from_timeline(&TimelineBoundaries::default());
    let r = h.hero_zoom_end;
    assert!(overlay.background(r).0 < overlay.hero(r).0);
    assert_eq!(overlay.background(1.0), (h.bg_exit_scale, 0.0));
}

#[test]
fn matte_covers_the_handoff_and_releases_in_the_tunnel() {
    let overlay = sync();
    let h = HandoffConfig::from_timeline(&TimelineBoundaries::default());

    assert_eq!(overlay.matte(0.0), 0.0);
    assert!(approx(overlay.matte((h.hero_zoom_end + h.hero_handoff_end) / 2.0), 0.5));
    assert_eq!(overlay.matte(h.hero_handoff_end), 1.0);
    assert_eq!(overlay.matte(h.blackout_release_end), 0.0);
    assert_eq!(overlay.matte(0.9), 0.0);
}

#[test]
fn vignette_builds_through_the_void() {
    let overlay = sync();
    let b = TimelineBoundaries::default();
    assert_eq!(overlay.vignette(0.0), 0.0);
    assert!(approx(overlay.vignette(b.tunnel_start), 0.9));
    assert!(approx(overlay.vignette(b.gallery_start), 0.45));
}

#[test]
fn captions_step_through_the_tunnel() {
    let overlay = sync();
    let b = TimelineBoundaries::default();
    assert_eq!(overlay.caption(b.hero_end), None);
    assert_eq!(overlay.caption(b.tunnel_start), Some(0));
    assert_eq!(overlay.caption(b.tunnel_end - 1e-4), Some(14));
    assert_eq!(overlay.caption(b.tunnel_end), None);

    let silent = OverlaySync::new(b, 8.0, 0);
    assert_eq!(silent.caption(0.4), None);
}

#[test]
fn loading_veil_tracks_asset_readiness() {
    let overlay = sync();
    assert_eq!(overlay.loading(0.0), 1.0);
    assert!(approx(overlay.loading(0.5), 0.5));
    assert_eq!(overlay.loading(1.0), 0.0);
}

#[test]
fn compensation_only_in_moving_containers() {
    let overlay = sync();
    let native = overlay.compute(0.5, 900.0, false, 1.0);
    assert_eq!(native.hero.translate_y, 0.0);

    let moving = overlay.compute(0.5, 900.0, true, 1.0);
    assert!(approx(moving.hero.translate_y, 900.0 * 7.0 * 0.5));
    assert_eq!(moving.background.translate_y, moving.hero.translate_y);
}

#[test]
fn virtual_scroll_keeps_fixed_layers_in_place() {
    let overlay = sync();
    let scroll = VirtualScroll::new(6300.0, 1.2);
    let state = overlay.compute(0.12, 900.0, scroll.moves_overlays(), 1.0);

    assert!(state.hero.opacity > 0.0);
    assert_eq!(state.hero.translate_y, 0.0);
    assert_eq!(state.background.translate_y, 0.0);
}

#[test]
fn hidden_hero_stops_taking_input() {
    let overlay = sync();
    let top = overlay.compute(0.0, 900.0, false, 0.0);
    assert!(top.hero.pointer_events);
    assert!(top.background.displayed);
    assert_eq!(top.loading_opacity, 1.0);

    let deep = overlay.compute(0.5, 900.0, false, 1.0);
    assert!(!deep.hero.pointer_events);
    assert!(!deep.background.displayed);
    assert_eq!(deep.loading_opacity, 0.0);
}

#[test]
fn layer_style_formats_css() {
    let layer = LayerStyle {
        opacity: 1.4,
        scale: 1.5,
        translate_y: 12.5,
        ..LayerStyle::default()
    };
    let mut css = String::from("stale");
    layer.write_transform_css(&mut css);
    assert_eq!(css, "translate3d(0, 12.50px, 0) scale(1.5000)");
    layer.write_opacity_css(&mut css);
    assert_eq!(css, "1.0000");
}

#[test]
fn css_buffer_is_reused_between_frames() {
    let overlay = sync();
    let mut css = String::with_capacity(64);
    let capacity = css.capacity();
    let ptr = css.as_ptr();

    for step in 0..=50 {
        let state = overlay.compute(step as f32 / 50.0, 900.0, false, 1.0);
        state.hero.write_transform_css(&mut css);
        assert!(css.starts_with("translate3d("));
        state.background.write_opacity_css(&mut css);
        assert!(css.parse::<f32>().is_ok());
    }
    assert_eq!(css.capacity(), capacity);
    assert_eq!(css.as_ptr(), ptr);
}

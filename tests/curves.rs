use std::f32::consts::PI;

use glam::Vec3;

use festival_viz::config::{GalleryConfig, TimelineBoundaries};
use festival_viz::curves::about::{self, AboutCurve, PANEL_ORIGIN};
use festival_viz::curves::gallery::{self, focus_opacity, panel_layouts, wrap_angle};
use festival_viz::curves::tunnel::{self, speed_profile, tile_opacity, tile_transform};
use festival_viz::easing::{map_range, smoothstep, Easing};
use festival_viz::pool::TileState;
use festival_viz::scene::Blend;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn tile_at(z: f32) -> TileState {
    TileState {
        z,
        spawn_z: -200.0,
        theta: 0.4,
        spin: 2.0,
        speed_jitter: 0.5,
        target_radius: 9.0,
        base_scale: 3.0,
        brightness: 0.8,
        texture_index: 0,
    }
}

#[test]
fn tile_travel_runs_from_spawn_to_pass_depth() {
    assert_eq!(tile_at(-200.0).travel(20.0), 0.0);
    assert_eq!(tile_at(20.0).travel(20.0), 1.0);
    assert!(approx(tile_at(-90.0).travel(20.0), 0.5));
}

#[test]
fn tile_fades_at_both_ends_of_its_travel() {
    assert_eq!(tile_opacity(0.0, 0.8, 1.0), 0.0);
    assert_eq!(tile_opacity(1.0, 0.8, 1.0), 0.0);
    for t in [0.05, 0.1, 0.2, 0.28, 0.5, 0.9] {
        assert!(tile_opacity(t, 0.8, 1.0) > 0.0, "t = {t}");
    }
    assert_eq!(tile_opacity(0.5, 0.8, 0.0), 0.0);

    assert_eq!(tile_transform(&tile_at(-200.0), 20.0, 0.0, 0.0, 1.0).opacity, 0.0);
    assert_eq!(tile_transform(&tile_at(20.0), 20.0, 0.0, 0.0, 1.0).opacity, 0.0);
}

#[test]
fn tile_opens_outward_as_it_approaches() {
    let near = tile_transform(&tile_at(0.0), 20.0, 0.0, 0.0, 1.0);
    let far = tile_transform(&tile_at(-180.0), 20.0, 0.0, 0.0, 1.0);
    let radius = |v: Vec3| v.truncate().length();
    assert!(radius(near.position) > radius(far.position));
    assert!(near.scale.x > far.scale.x);
    assert_eq!(near.position.z, 0.0);
}

#[test]
fn boost_stretches_tiles_sideways() {
    let calm = tile_transform(&tile_at(-50.0), 20.0, 0.0, 0.0, 1.0);
    let rushed = tile_transform(&tile_at(-50.0), 20.0, 0.0, 1.0, 1.0);
    assert!(approx(rushed.scale.x / calm.scale.x, 1.65));
    assert_eq!(rushed.scale.y, calm.scale.y);
}

#[test]
fn curves_are_pure() {
    let tile = tile_at(-37.5);
    assert_eq!(
        tile_transform(&tile, 20.0, 1.3, 0.4, 0.7),
        tile_transform(&tile, 20.0, 1.3, 0.4, 0.7)
    );

    let about = AboutCurve::from_timeline(&TimelineBoundaries::default());
    assert_eq!(about.sample(0.83), about.sample(0.83));

    let cfg = GalleryConfig::default();
    assert_eq!(gallery::transition_camera(&cfg, 0.3), gallery::transition_camera(&cfg, 0.3));
    assert_eq!(speed_profile(0.7, 0.2), speed_profile(0.7, 0.2));
}

#[test]
fn speed_profile_is_continuous_and_accelerating() {
    assert!(approx(speed_profile(0.0, 0.0).ribbon, 25.0));
    assert!(approx(speed_profile(0.2, 0.0).ribbon, 50.0));
    assert!(approx(speed_profile(0.6, 0.0).ribbon, 180.0));
    assert!(approx(speed_profile(1.0, 0.0).ribbon, 650.0));

    let mut last = 0.0;
    for step in 0..=100 {
        let s = speed_profile(step as f32 / 100.0, 0.0);
        assert!(s.ribbon >= last);
        assert!(approx(s.image, s.ribbon * 0.5));
        last = s.ribbon;
    }

    let boosted = speed_profile(0.5, 1.0);
    assert!(boosted.ribbon > speed_profile(0.5, 0.0).ribbon);
}

#[test]
fn void_takes_the_first_share_of_the_speed_curve() {
    let b = TimelineBoundaries::default();
    assert_eq!(tunnel::speed_progress(0.05, &b), 0.0);
    assert_eq!(tunnel::speed_progress(b.hero_end, &b), 0.0);
    assert!(approx(tunnel::speed_progress(b.tunnel_start, &b), 0.2));
    assert!(approx(tunnel::speed_progress(b.tunnel_end, &b), 1.0));
    assert!(approx(tunnel::tile_progress(b.tunnel_start, &b), 0.15));
    assert_eq!(tunnel::speed_progress(0.9, &b), 0.0);
}

#[test]
fn active_tiles_follow_progress_and_boost() {
    assert_eq!(tunnel::active_tile_count(24, 0.9, 0.0, false), 0);
    assert_eq!(tunnel::active_tile_count(24, 0.5, 0.0, true), 12);
    assert_eq!(tunnel::active_tile_count(24, 0.5, 1.0, true), 16);
    assert_eq!(tunnel::active_tile_count(24, 1.0, 1.0, true), 24);
}

#[test]
fn fov_widens_only_inside_the_tunnel() {
    assert_eq!(tunnel::target_fov(75.0, false, 1.0), 75.0);
    assert_eq!(tunnel::target_fov(75.0, true, 0.0), 75.0);
    assert_eq!(tunnel::target_fov(75.0, true, 1.0), 85.0);
}

#[test]
fn transition_camera_follows_smoothstep() {
    let cfg = GalleryConfig::default();
    assert_eq!(gallery::transition_camera(&cfg, 0.0), Vec3::ZERO);
    assert_eq!(gallery::transition_camera(&cfg, 1.0), Vec3::new(0.0, -2.0, 60.0));
    assert_eq!(smoothstep(0.5), 0.5);
    assert_eq!(gallery::transition_camera(&cfg, 0.5), Vec3::new(0.0, -1.0, 30.0));
}

#[test]
fn gallery_group_grows_and_turns_through_transition() {
    let start = gallery::transition_group(0.0);
    let end = gallery::transition_group(1.0);
    assert!(approx(start.scale.x, 0.8));
    assert!(approx(end.scale.x, 1.0));
    assert!(approx(gallery::transition_yaw(1.0), gallery::gallery_yaw(0.0)));
    assert!(approx(gallery::gallery_yaw(1.0), 0.2 + 1.5 * PI));
}

#[test]
fn about_panel_fades_in_holds_and_sweeps_left() {
    let about = AboutCurve::from_timeline(&TimelineBoundaries::default());

    let entering = about.sample(0.0);
    assert_eq!(entering.opacity, 0.0);
    assert_eq!(entering.position, PANEL_ORIGIN);

    let held = about.sample((about.fade_in_end + about.exit_start) / 2.0);
    assert_eq!(held.opacity, 1.0);
    assert_eq!(held.position, PANEL_ORIGIN);

    let leaving = about.sample(1.0);
    assert!(approx(leaving.position.x, PANEL_ORIGIN.x - 30.0));
    assert_eq!(leaving.opacity, 0.0);

    let halfway = about.sample(about.exit_start + (1.0 - about.exit_start) * 0.5);
    assert!(halfway.position.x < 0.0);
    assert!(approx(halfway.opacity, 0.25));
}

#[test]
fn panels_tile_the_arc_around_the_far_side() {
    let cfg = GalleryConfig::default();
    let panels = panel_layouts(&cfg, 5);
    assert_eq!(panels.len(), 5);
    for pair in panels.windows(2) {
        assert!(approx(pair[0].theta_start, pair[1].theta_start + pair[1].theta_length));
    }
    let total: f32 = panels.iter().map(|p| p.theta_length).sum();
    assert!(approx(total, cfg.arc));
    assert!(approx(panels[2].center_angle(), PI));
    assert!(panel_layouts(&cfg, 0).is_empty());
}

#[test]
fn centered_panel_is_brightest() {
    let panels = panel_layouts(&GalleryConfig::default(), 5);
    let max_offset = gallery::outer_panel_offset(&panels);

    assert!(approx(focus_opacity(&panels[2], 0.0, max_offset), 1.0));
    assert!(approx(focus_opacity(&panels[0], 0.0, max_offset), 0.3));
    assert!(approx(focus_opacity(&panels[4], 0.0, max_offset), 0.3));

    let side = focus_opacity(&panels[1], 0.0, max_offset);
    assert!(side > 0.3 && side < 1.0);

    // Rotating the group by one panel width brings the neighbour to the center.
    let step = panels[0].theta_length;
    assert!(approx(focus_opacity(&panels[1], -step, max_offset), 1.0));
}

#[test]
fn wrap_angle_lands_in_half_open_range() {
    assert!(approx(wrap_angle(3.0 * PI), PI));
    assert!(approx(wrap_angle(-PI), PI));
    assert!(approx(wrap_angle(0.5), 0.5));
    assert!(approx(wrap_angle(-2.5 * PI), -0.5 * PI));
}

#[test]
fn easings_pin_their_endpoints() {
    let all = [
        Easing::Linear,
        Easing::InQuad,
        Easing::OutQuad,
        Easing::InOutQuad,
        Easing::InCubic,
        Easing::OutCubic,
        Easing::InOutCubic,
        Easing::InQuart,
        Easing::OutQuart,
        Easing::InExpo,
        Easing::OutExpo,
        Easing::Smoothstep,
        Easing::Smootherstep,
    ];
    for easing in all {
        assert!(approx(easing.apply(0.0), 0.0), "{easing:?}");
        assert!(approx(easing.apply(1.0), 1.0), "{easing:?}");
        assert!(approx(easing.apply(-3.0), 0.0), "{easing:?}");
        assert!(approx(easing.interpolate(10.0, 20.0, 2.0), 20.0), "{easing:?}");
    }
}

#[test]
fn map_range_handles_empty_input_span() {
    assert_eq!(map_range(5.0, 0.0, 10.0, 100.0, 200.0), 150.0);
    assert_eq!(map_range(-5.0, 0.0, 10.0, 100.0, 200.0), 50.0);
    assert_eq!(map_range(3.0, 2.0, 2.0, 0.0, 7.0), 7.0);
}

#[test]
fn about_divider_separates_copy_from_call_to_action() {
    assert!(about::TITLE_Y > about::BODY_Y);
    assert!(about::DIVIDER_Y < about::BODY_Y);
    assert!(about::DIVIDER_Y > about::CTA_Y);
}

#[test]
fn floor_reflection_adds_light() {
    assert_eq!(gallery::REFLECTION_BLEND, Blend::Additive);
    assert!(gallery::REFLECTION_OPACITY < 1.0);
}

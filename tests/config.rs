use festival_viz::config::{HandoffConfig, SiteConfig, TimelineBoundaries};
use festival_viz::VizError;

#[test]
fn default_boundaries_are_ordered() {
    let bounds = TimelineBoundaries::default();
    bounds.validate().unwrap();
    assert!((bounds.tunnel_len() - 0.28).abs() < 1e-6);
}

#[test]
fn handoff_scales_with_the_hero() {
    let h = HandoffConfig::from_timeline(&TimelineBoundaries::default());
    assert!(h.hero_hold_end < h.hero_zoom_end);
    assert!(h.hero_zoom_end < h.hero_handoff_end);
    assert_eq!(h.hero_handoff_end, 0.14);
    assert!(h.blackout_release_end > h.hero_handoff_end);
    assert!(h.bg_exit_scale < h.hero_exit_scale);
}

#[test]
fn overrides_replace_defaults() {
    let mut config = SiteConfig::default();
    config
        .apply_overrides([
            ("seed", "1234"),
            ("logLevel", "debug"),
            ("pages", "6"),
            ("autoScroll", "off"),
            ("stats", ""),
            ("scroll", "virtual"),
        ])
        .unwrap();

    assert_eq!(config.seed, 1234);
    assert_eq!(config.log_level, log::Level::Debug);
    assert_eq!(config.pages, 6.0);
    assert!(!config.auto_scroll);
    assert!(config.stats);
    assert!(config.virtual_scroll);
}

#[test]
fn unknown_keys_are_ignored() {
    let mut config = SiteConfig::default();
    config.apply_overrides([("theme", "dark")]).unwrap();
    assert_eq!(config, SiteConfig::default());
}

#[test]
fn bad_values_name_their_key() {
    let cases = [
        ("seed", "-1"),
        ("pages", "0.5"),
        ("pages", "NaN"),
        ("log-level", "loud"),
        ("auto-scroll", "maybe"),
        ("scroll", "smooth"),
    ];
    for (key, value) in cases {
        let mut config = SiteConfig::default();
        match config.apply_overrides([(key, value)]) {
            Err(VizError::InvalidOverride { key: k, value: v }) => {
                assert_eq!(k, key);
                assert_eq!(v, value);
            }
            other => panic!("{key}={value}: expected InvalidOverride, got {other:?}"),
        }
    }
}

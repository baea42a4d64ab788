use festival_viz::stats::FrameStats;

#[test]
fn empty_stats_report_zero() {
    let stats = FrameStats::new(10);
    assert_eq!(stats.report().fps, 0.0);
    assert_eq!(stats.frames(), 0);
}

#[test]
fn steady_sixty_drops_nothing() {
    let mut stats = FrameStats::new(60);
    for _ in 0..120 {
        stats.record(1000.0 / 60.0);
    }
    let report = stats.report();
    assert!((report.fps - 60.0).abs() < 1e-6);
    assert!((report.avg_fps - 60.0).abs() < 1e-6);
    assert_eq!(report.dropped_pct, 0.0);
    assert_eq!(stats.frames(), 120);
}

#[test]
fn slow_frames_count_as_dropped() {
    let mut stats = FrameStats::new(4);
    for delta in [16.0, 16.0, 50.0, 100.0] {
        stats.record(delta);
    }
    let report = stats.report();
    assert_eq!(report.dropped_pct, 50.0);
    assert_eq!(report.frame_time_ms, 100.0);
    assert_eq!(report.fps, 10.0);
}

#[test]
fn window_rolls_and_ignores_bogus_deltas() {
    let mut stats = FrameStats::new(2);
    stats.record(100.0);
    stats.record(10.0);
    stats.record(10.0);
    stats.record(0.0);
    stats.record(f64::NAN);
    assert_eq!(stats.frames(), 3);
    assert!((stats.report().avg_fps - 100.0).abs() < 1e-9);
}

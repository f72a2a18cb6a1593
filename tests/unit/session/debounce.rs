use super::*;

#[test]
fn a_burst_releases_only_the_last_size() {
    let t0 = Instant::now();
    let mut d = ResizeDebounce::new(Duration::from_millis(200));
    d.schedule(100, 50, t0);
    d.schedule(120, 50, t0 + Duration::from_millis(150));
    d.schedule(140, 60, t0 + Duration::from_millis(300));

    assert_eq!(d.take_due(t0 + Duration::from_millis(450)), None);
    assert_eq!(d.take_due(t0 + Duration::from_millis(500)), Some((140, 60)));
    assert!(!d.is_pending());
    assert_eq!(d.take_due(t0 + Duration::from_secs(5)), None);
}

#[test]
fn timeout_counts_down_to_the_deadline() {
    let t0 = Instant::now();
    let mut d = ResizeDebounce::new(Duration::from_millis(200));
    assert_eq!(d.timeout(t0), None);
    d.schedule(1, 1, t0);
    assert_eq!(d.timeout(t0 + Duration::from_millis(50)), Some(Duration::from_millis(150)));
    assert_eq!(d.timeout(t0 + Duration::from_secs(1)), Some(Duration::ZERO));
}

#[test]
fn zero_quiet_period_is_due_immediately() {
    let t0 = Instant::now();
    let mut d = ResizeDebounce::new(Duration::ZERO);
    d.schedule(3, 4, t0);
    assert_eq!(d.take_due(t0), Some((3, 4)));
}

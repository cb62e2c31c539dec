use super::*;

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn rng_f64_is_half_open_unit() {
    let mut rng = Rng64::new(7);
    for _ in 0..1000 {
        let v = rng.next_f64_01();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u16(255, 255), 255);
    assert_eq!(mul_div255_u16(0, 255), 0);
    assert_eq!(mul_div255_u16(128, 255), 128);
}

#[test]
fn progress_clamps_to_window() {
    assert_eq!(progress(0.0, 500.0, 1000.0), 0.0);
    assert!((progress(1000.0, 500.0, 1000.0) - 0.5).abs() < 1e-12);
    assert_eq!(progress(5000.0, 500.0, 1000.0), 1.0);
    assert_eq!(progress(10.0, 0.0, 0.0), 1.0);
    assert!((lerp(2.0, 4.0, 0.25) - 2.5).abs() < 1e-12);
}

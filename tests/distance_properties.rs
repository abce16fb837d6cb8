use histmatch::{
    dist_chi2, dist_intersect, dist_l2, distance_by_name, DistanceKind, HistMatchError,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DistanceCase {
    name: String,
    x: Vec<f32>,
    y: Vec<f32>,
    chi2: f32,
    intersect: f32,
    l2: f32,
}

fn load_cases() -> Vec<DistanceCase> {
    let text = include_str!("data/distance_cases.json");
    serde_json::from_str(text).unwrap()
}

fn random_histogram(rng: &mut StdRng, len: usize) -> Vec<f32> {
    let raw: Vec<f32> = (0..len).map(|_| rng.random_range(0.0..1.0f32)).collect();
    let total: f32 = raw.iter().sum();
    raw.into_iter().map(|v| v / total).collect()
}

fn sparse_histogram(rng: &mut StdRng, len: usize) -> Vec<f32> {
    let mut hist = vec![0.0f32; len];
    for _ in 0..3 {
        hist[rng.random_range(0..len)] += 1.0 / 3.0;
    }
    hist
}

#[test]
fn fixture_cases_match_reference_values() {
    for case in load_cases() {
        for (kind, expected) in [
            (DistanceKind::Chi2, case.chi2),
            (DistanceKind::Intersect, case.intersect),
            (DistanceKind::L2, case.l2),
        ] {
            let got = kind.distance(&case.x, &case.y).unwrap();
            assert!(
                (got - expected).abs() < 1e-5,
                "{} {kind}: got {got}, expected {expected}",
                case.name
            );
            let by_name = distance_by_name(&case.x, &case.y, kind.name()).unwrap();
            assert_eq!(by_name, got);
        }
    }
}

#[test]
fn identity_holds_for_random_histograms() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for len in [1usize, 7, 64, 512] {
        let x = random_histogram(&mut rng, len);
        assert_eq!(dist_l2(&x, &x).unwrap(), 0.0);
        assert_eq!(dist_chi2(&x, &x).unwrap(), 0.0);
        assert!(dist_intersect(&x, &x).unwrap() < 1e-6);
    }
}

#[test]
fn symmetry_and_range_laws_hold() {
    let mut rng = StdRng::seed_from_u64(1234);
    for trial in 0..50 {
        let len = rng.random_range(2..300usize);
        let (x, y) = if trial % 2 == 0 {
            (random_histogram(&mut rng, len), random_histogram(&mut rng, len))
        } else {
            (sparse_histogram(&mut rng, len), sparse_histogram(&mut rng, len))
        };

        let l2 = dist_l2(&x, &y).unwrap();
        assert!((l2 - dist_l2(&y, &x).unwrap()).abs() < 1e-6);
        assert!((0.0..=2.0 + 1e-5).contains(&l2), "l2 {l2}");

        let inter = dist_intersect(&x, &y).unwrap();
        assert!((inter - dist_intersect(&y, &x).unwrap()).abs() < 1e-6);
        assert!((0.0..=1.0).contains(&inter), "intersect {inter}");

        let chi2 = dist_chi2(&x, &y).unwrap();
        assert!(chi2 >= 0.0);
        assert!((chi2 - dist_chi2(&y, &x).unwrap()).abs() < 1e-5);
    }
}

#[test]
fn chi2_leaves_inputs_untouched_between_calls() {
    let x = vec![0.1f32, 0.2, 0.7];
    let y = vec![0.3f32, 0.3, 0.4];
    let first = dist_chi2(&x, &y).unwrap();
    let second = dist_chi2(&x, &y).unwrap();
    assert_eq!(first, second);
    assert_eq!(x, vec![0.1, 0.2, 0.7]);
    assert_eq!(y, vec![0.3, 0.3, 0.4]);
}

#[test]
fn malformed_inputs_are_rejected() {
    assert_eq!(
        dist_l2(&[0.5, 0.5], &[1.0]).unwrap_err(),
        HistMatchError::LengthMismatch { left: 2, right: 1 }
    );
    assert!(matches!(
        dist_chi2(&[0.5, f32::NAN], &[0.5, 0.5]),
        Err(HistMatchError::InvalidValue { index: 1, .. })
    ));
    assert!(matches!(
        dist_intersect(&[0.0, 0.0], &[0.5, 0.5]),
        Err(HistMatchError::ZeroMass { .. })
    ));
    assert_eq!(
        distance_by_name(&[1.0], &[1.0], "cosine").unwrap_err(),
        HistMatchError::UnknownDistance {
            name: "cosine".to_string()
        }
    );
}

use histmatch::histogram::{flat_index_2d, gray_histogram, unflatten_2d};
use histmatch::{HistMatchError, HistogramExtractor, HistogramKind, Image};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_rgb(rng: &mut StdRng, width: usize, height: usize) -> Image {
    let data: Vec<u8> = (0..width * height * 3)
        .map(|_| rng.random_range(0..=255))
        .collect();
    Image::from_u8(&data, width, height, 3).unwrap()
}

#[test]
fn histograms_are_normalized_for_every_kind() {
    let mut rng = StdRng::seed_from_u64(42);
    for (width, height) in [(32usize, 32usize), (37, 19), (1, 9)] {
        let image = random_rgb(&mut rng, width, height);
        for kind in HistogramKind::ALL {
            for num_bins in [1usize, 4, 8] {
                let extractor = HistogramExtractor::new(kind, num_bins).unwrap();
                let hist = extractor.extract_image(image.clone()).unwrap();
                assert_eq!(hist.len(), extractor.histogram_len());
                assert!(hist.as_slice().iter().all(|&v| v >= 0.0));

                let tolerance = if kind == HistogramKind::GrayValue {
                    num_bins as f32 * 0.005
                } else {
                    1e-5
                };
                assert!(
                    (hist.sum() - 1.0).abs() <= tolerance,
                    "{kind} n={num_bins} {width}x{height}: sum {}",
                    hist.sum()
                );
            }
        }
    }
}

#[test]
fn histogram_lengths_follow_dimensionality() {
    let image = Image::filled(8, 8, 3, 90.0).unwrap();
    for (kind, expected) in [
        (HistogramKind::GrayValue, 5usize),
        (HistogramKind::Rgb, 125),
        (HistogramKind::Rg, 25),
        (HistogramKind::DxDy, 25),
    ] {
        let hist = HistogramExtractor::new(kind, 5)
            .unwrap()
            .extract_image(image.clone())
            .unwrap();
        assert_eq!(hist.len(), expected, "{kind}");
    }
}

#[test]
fn constant_gray_image_fills_the_top_bin() {
    let image = Image::filled(128, 128, 1, 200.0).unwrap();
    let (hist, edges) = gray_histogram(image.view(), 4).unwrap();
    assert_eq!(edges.edges(), &[0.0, 63.75, 127.5, 191.25, 255.0]);
    assert_eq!(hist.as_slice(), &[0.0, 0.0, 0.0, 1.0]);
    assert_eq!(hist.sum(), 1.0);
}

#[test]
fn rg_histogram_ignores_blue() {
    let mut rng = StdRng::seed_from_u64(7);
    let base = random_rgb(&mut rng, 16, 16);
    let mut data = base.data().to_vec();
    for pixel in data.chunks_exact_mut(3) {
        pixel[2] = rng.random_range(0.0..=255.0f32);
    }
    let recolored = Image::rgb(data, 16, 16).unwrap();

    let extractor = HistogramExtractor::new(HistogramKind::Rg, 6).unwrap();
    assert_eq!(
        extractor.extract_image(base).unwrap(),
        extractor.extract_image(recolored).unwrap()
    );
}

#[test]
fn flat_image_gradients_concentrate_near_zero() {
    // With 13 bins over [-6, 7] each bin is one unit wide, so bins 5 and 6
    // hold derivatives in [-1, 1). Zero padding only disturbs the border.
    let image = Image::filled(96, 96, 1, 77.0).unwrap();
    let extractor = HistogramExtractor::new(HistogramKind::DxDy, 13).unwrap();
    let hist = extractor.extract_image(image).unwrap();
    let near_zero: f32 = hist
        .as_slice()
        .iter()
        .enumerate()
        .filter(|(idx, _)| {
            let (bx, by) = unflatten_2d(*idx, 13);
            (5..=6).contains(&bx) && (5..=6).contains(&by)
        })
        .map(|(_, &v)| v)
        .sum();
    assert!(near_zero > 0.5, "near-zero mass {near_zero}");
}

#[test]
fn flat_indices_round_trip() {
    let n = 9;
    for row in 0..n {
        for col in 0..n {
            assert_eq!(unflatten_2d(flat_index_2d(row, col, n), n), (row, col));
        }
    }
}

#[test]
fn color_kinds_reject_gray_input() {
    let extractor = HistogramExtractor::new(HistogramKind::Rgb, 4).unwrap();
    let gray = Image::filled(4, 4, 1, 10.0).unwrap();
    assert_eq!(
        extractor.extract_image(gray).unwrap_err(),
        HistMatchError::ChannelMismatch {
            expected: 3,
            got: 1
        }
    );
    assert_eq!(
        HistogramExtractor::new(HistogramKind::Rg, 0).unwrap_err(),
        HistMatchError::InvalidBinCount { num_bins: 0 }
    );
}

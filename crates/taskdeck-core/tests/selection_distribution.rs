//! Statistical checks of dice selection against the exact mapping odds.
//!
//! Every run uses a fixed seed, so results are reproducible. Thresholds are
//! the chi-square critical values at p = 0.0001.

use taskdeck_core::{select, selection_weights, SeededDice};

const SAMPLES: usize = 60_000;

/// Chi-square critical values at p = 0.0001, indexed by degrees of freedom.
const CRITICAL: [f64; 12] = [
    0.0, 15.14, 18.42, 21.11, 23.51, 25.74, 27.86, 29.88, 31.83, 33.72, 35.56, 37.37,
];

fn histogram(len: usize, seed: u64) -> Vec<usize> {
    let items: Vec<String> = (0..len).map(|i| format!("item-{i}")).collect();
    let mut dice = SeededDice::from_seed(seed);
    let mut counts = vec![0usize; len];
    for _ in 0..SAMPLES {
        let selection = select(&items, &mut dice).unwrap();
        counts[selection.index] += 1;
    }
    counts
}

/// Chi-square statistic over reachable indices, plus their count.
fn chi_square(counts: &[usize], weights: &[f64]) -> (f64, usize) {
    let mut stat = 0.0;
    let mut cells = 0;
    for (&observed, &p) in counts.iter().zip(weights) {
        if p == 0.0 {
            continue;
        }
        let expected = p * SAMPLES as f64;
        stat += (observed as f64 - expected).powi(2) / expected;
        cells += 1;
    }
    (stat, cells)
}

fn assert_matches_weights(len: usize, seed: u64) {
    let counts = histogram(len, seed);
    let weights = selection_weights(len);

    for (index, (&observed, &p)) in counts.iter().zip(&weights).enumerate() {
        if p == 0.0 {
            assert_eq!(observed, 0, "len {len}: unreachable index {index} was selected");
        }
    }

    let (stat, cells) = chi_square(&counts, &weights);
    let df = cells - 1;
    if df == 0 {
        return;
    }
    let critical = CRITICAL[df.min(CRITICAL.len() - 1)];
    assert!(
        stat < critical,
        "len {len}: chi-square {stat:.2} exceeds {critical} (df {df}), counts {counts:?}"
    );
}

#[test]
fn single_die_lists_follow_exact_weights() {
    for len in 1..=6 {
        assert_matches_weights(len, 0xD1CE + len as u64);
    }
}

#[test]
fn two_dice_lists_follow_exact_weights() {
    for len in 7..=12 {
        assert_matches_weights(len, 0x2D6 + len as u64);
    }
}

#[test]
fn long_lists_never_reach_first_or_tail_indices() {
    let len = 15;
    let counts = histogram(len, 99);
    assert_eq!(counts[0], 0);
    assert!(counts[12..].iter().all(|&c| c == 0));
    assert_matches_weights(len, 99);
}

#[test]
fn divisors_of_six_are_uniform() {
    for len in [1usize, 2, 3, 6] {
        let weights = selection_weights(len);
        let expected = 1.0 / len as f64;
        assert!(
            weights.iter().all(|w| (w - expected).abs() < 1e-12),
            "len {len}: {weights:?}"
        );
    }
}

#[test]
fn four_and_five_favour_low_indices() {
    let four = selection_weights(4);
    assert!((four[0] - 2.0 / 6.0).abs() < 1e-12);
    assert!((four[3] - 1.0 / 6.0).abs() < 1e-12);

    let five = selection_weights(5);
    assert!((five[0] - 2.0 / 6.0).abs() < 1e-12);
    assert!(five[1..].iter().all(|w| (w - 1.0 / 6.0).abs() < 1e-12));
}

//! Random numbers covering the edges of the `i64` and finite `f64` ranges.

use rand::Rng;

const INT_EDGES: [i64; 6] = [0, -1, 1, i64::MIN, i64::MAX, i64::MIN + 1];

const DOUBLE_EDGES: [f64; 8] = [
    0.0,
    -0.0,
    f64::MAX,
    f64::MIN,
    f64::MIN_POSITIVE,
    f64::EPSILON,
    5e-324,
    1e300,
];

/// Random integer: mostly small magnitudes, sometimes the full range or a
/// boundary value.
pub fn random_int<R: Rng>(rng: &mut R) -> i64 {
    match rng.gen_range(0..10) {
        0..=4 => rng.gen_range(-1000..=1000),
        5..=6 => rng.gen_range(-1_000_000_000..=1_000_000_000),
        7..=8 => rng.gen(),
        _ => INT_EDGES[rng.gen_range(0..INT_EDGES.len())],
    }
}

/// Random finite double. Includes integral values, subnormals, extreme
/// magnitudes and arbitrary bit patterns.
pub fn random_double<R: Rng>(rng: &mut R) -> f64 {
    let sign = if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
    match rng.gen_range(0..10) {
        0..=3 => sign * rng.gen::<f64>() * 10f64.powi(rng.gen_range(-10..=10)),
        4..=5 => f64::from(rng.gen_range(-1000i32..=1000)),
        6 => sign * f64::from(rng.gen_range(1u32..=999)) / 8.0,
        7 => DOUBLE_EDGES[rng.gen_range(0..DOUBLE_EDGES.len())],
        _ => loop {
            let d = f64::from_bits(rng.gen());
            if d.is_finite() {
                break d;
            }
        },
    }
}

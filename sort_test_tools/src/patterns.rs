//! Input generators for tests and benchmarks.
//!
//! Integer patterns produce `i32`, the float patterns produce `f64` with a controlled share of
//! NaN, infinities and signed zeros. All random patterns draw from one seed per process, see
//! [`random_init_seed`].

use std::env;
use std::str::FromStr;
use std::sync::Mutex;

use rand::distributions::{Distribution, Uniform};
use rand::prelude::*;

use zipf::ZipfDistribution;

// --- Integer patterns ---

pub fn random(len: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    let mut rng = seeded_rng();
    (0..len).map(|_| rng.gen::<i32>()).collect()
}

/// Uniformly distributed values in `range`, e.g. `0..4` for an input with few distinct keys.
pub fn random_uniform<R>(len: usize, range: R) -> Vec<i32>
where
    R: Into<Uniform<i32>>,
{
    // :.:.:.::

    let mut rng = seeded_rng();
    let dist: Uniform<i32> = range.into();

    (0..len).map(|_| dist.sample(&mut rng)).collect()
}

/// Zipf distributed values in `1..=len`, a few values are very frequent.
pub fn random_zipf(len: usize, exponent: f64) -> Vec<i32> {
    if len == 0 {
        return Vec::new();
    }

    let mut rng = seeded_rng();
    let dist = ZipfDistribution::new(len, exponent).unwrap();

    (0..len).map(|_| dist.sample(&mut rng) as i32).collect()
}

/// Random values where the first `sorted_percent` are already sorted.
pub fn random_sorted(len: usize, sorted_percent: f64) -> Vec<i32> {
    //     .:
    //   .:::. :
    // .::::::.::
    // [----][--]
    // sorted  unsorted

    let mut v = random(len);
    let sorted_len = ((len as f64) * (sorted_percent / 100.0)).round() as usize;
    v[..sorted_len.min(len)].sort_unstable();

    v
}

pub fn all_equal(len: usize) -> Vec<i32> {
    // ......
    // ::::::

    vec![66; len]
}

pub fn ascending(len: usize) -> Vec<i32> {
    //     .:
    //   .:::
    // .:::::

    (0..len as i32).collect()
}

pub fn descending(len: usize) -> Vec<i32> {
    // :.
    // :::.
    // :::::.

    (0..len as i32).rev().collect()
}

/// `saw_count` sorted chunks of random values.
pub fn saw_ascending(len: usize, saw_count: usize) -> Vec<i32> {
    //   .:  .:
    // .:::.:::

    saw(len, saw_count, |_| false)
}

/// `saw_count` reverse sorted chunks of random values.
pub fn saw_descending(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.
    // :::.:::.

    saw(len, saw_count, |_| true)
}

/// `saw_count` chunks, each sorted in a random direction.
pub fn saw_mixed(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    let chunk_count = len / saw_chunk_len(len, saw_count) + 1;
    let directions = random_uniform(chunk_count, 0..=1);
    saw(len, saw_count, |i| directions[i] == 1)
}

/// Chunks with random length in `range`, each sorted in a random direction.
pub fn saw_mixed_range(len: usize, range: std::ops::Range<usize>) -> Vec<i32> {
    //     :.
    // :.  :::.    .::.      .:
    // :::.:::::..::::::..:.:::

    if len == 0 {
        return Vec::new();
    }

    let mut v = random(len);

    let max_chunks = len / range.start.max(1) + 1;
    let directions = random_uniform(max_chunks, 0..=1);
    let chunk_lens = random_uniform(max_chunks, (range.start as i32)..(range.end as i32));

    let mut start = 0;
    for (chunk_len, direction) in chunk_lens.iter().zip(directions.iter()) {
        if start >= len {
            break;
        }

        let end = (start + *chunk_len as usize).min(len);
        sort_chunk(&mut v[start..end], *direction == 1);
        start = end;
    }

    v
}

pub fn pipe_organ(len: usize) -> Vec<i32> {
    //   .:.
    // .:::::.

    let mut v = random(len);
    let (first_half, second_half) = v.split_at_mut(len / 2);
    sort_chunk(first_half, false);
    sort_chunk(second_half, true);

    v
}

// --- Float patterns ---

/// Random finite values with roughly `special_percent` percent replaced by NaN (both signs),
/// infinities and signed zeros.
pub fn random_f64(len: usize, special_percent: f64) -> Vec<f64> {
    const SPECIALS: [f64; 6] = [
        f64::NAN,
        -f64::NAN,
        f64::INFINITY,
        f64::NEG_INFINITY,
        0.0,
        -0.0,
    ];

    let mut rng = seeded_rng();
    let special_threshold = (special_percent / 100.0).clamp(0.0, 1.0);

    (0..len)
        .map(|_| {
            if rng.gen::<f64>() < special_threshold {
                SPECIALS[rng.gen_range(0..SPECIALS.len())]
            } else {
                // Few distinct magnitudes, so equal keys show up regularly.
                f64::from(rng.gen_range(-1000i32..1000)) / 8.0
            }
        })
        .collect()
}

// --- Seed control ---

/// Makes every subsequent call to a random pattern draw a new seed.
///
/// By default `patterns::random(4)` yields the same values for the whole process, which keeps
/// test failures reproducible. Benchmarks want fresh inputs and call this first.
pub fn use_random_seed_each_time() {
    let (seed_type, _) = seed_type_and_value();
    if seed_type == SeedType::ExternalOverride {
        panic!("use_random_seed_each_time conflicts with the OVERRIDE_SEED env var.");
    }

    *SEED_STATE.lock().unwrap() = Some((SeedType::RandomEachTime, 0));
}

/// Returns the seed random patterns currently use. Set the `OVERRIDE_SEED` env var to replay a
/// failure.
pub fn random_init_seed() -> u64 {
    seed_type_and_value().1
}

// --- Private ---

#[derive(Copy, Clone, PartialEq, Eq)]
enum SeedType {
    RandomEachTime,
    RandomOncePerProcess,
    ExternalOverride,
}

static SEED_STATE: Mutex<Option<(SeedType, u64)>> = Mutex::new(None);

fn seed_type_and_value() -> (SeedType, u64) {
    let (seed_type, seed) = *SEED_STATE.lock().unwrap().get_or_insert_with(|| {
        match env::var("OVERRIDE_SEED") {
            Ok(seed) => (
                SeedType::ExternalOverride,
                u64::from_str(&seed).expect("OVERRIDE_SEED must be a u64"),
            ),
            Err(_) => (SeedType::RandomOncePerProcess, thread_rng().gen()),
        }
    });

    match seed_type {
        SeedType::RandomEachTime => (seed_type, thread_rng().gen()),
        _ => (seed_type, seed),
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(random_init_seed())
}

fn saw(len: usize, saw_count: usize, mut is_descending: impl FnMut(usize) -> bool) -> Vec<i32> {
    if len == 0 {
        return Vec::new();
    }

    let mut v = random(len);

    for (i, chunk) in v.chunks_mut(saw_chunk_len(len, saw_count)).enumerate() {
        sort_chunk(chunk, is_descending(i));
    }

    v
}

fn saw_chunk_len(len: usize, saw_count: usize) -> usize {
    (len / saw_count.max(1)).max(1)
}

fn sort_chunk(chunk: &mut [i32], descending: bool) {
    if descending {
        chunk.sort_unstable_by(|a, b| b.cmp(a));
    } else {
        chunk.sort_unstable();
    }
}

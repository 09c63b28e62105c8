use std::env;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use once_cell::sync::OnceCell;
use regex::Regex;

use sort_test_tools::{patterns, Sort};

use sortkit::{float, stable, unstable, Algorithm};

fn pin_thread_to_core() {
    use std::cell::Cell;
    let pin_core_id: usize = 2;

    thread_local! {static AFFINITY_ALREADY_SET: Cell<bool> = Cell::new(false); }

    // Set affinity only once per thread.
    AFFINITY_ALREADY_SET.with(|affinity_already_set| {
        if !affinity_already_set.get() {
            if let Some(core_id) = core_affinity::get_core_ids()
                .as_ref()
                .and_then(|ids| ids.get(pin_core_id))
            {
                core_affinity::set_for_current(*core_id);
            }

            affinity_already_set.set(true);
        }
    });
}

/// Benchmarks whose name doesn't match the `BENCH_REGEX` env var are skipped.
fn should_run_benchmark(name: &str) -> bool {
    static FILTER_REGEX: OnceCell<Option<Regex>> = OnceCell::new();

    FILTER_REGEX
        .get_or_init(|| {
            env::var("BENCH_REGEX")
                .ok()
                .map(|filter_regex| Regex::new(&filter_regex).expect("invalid BENCH_REGEX"))
        })
        .as_ref()
        .map(|reg| reg.is_match(name))
        .unwrap_or(true)
}

fn measure_comp_count<S: Sort, T: Ord>(
    name: &str,
    test_len: usize,
    transform: fn(Vec<i32>) -> Vec<T>,
    pattern_provider: fn(usize) -> Vec<i32>,
) {
    // Number of comparisons for a specific implementation and input combination.
    let run_count: usize = if test_len <= 20 {
        100_000
    } else if test_len < 10_000 {
        3000
    } else if test_len < 100_000 {
        1000
    } else {
        100
    };

    let mut comp_count = 0u64;

    // Instrument via sort_by so the type properties of T don't change.
    for _ in 0..run_count {
        let mut test_data = transform(pattern_provider(test_len));
        S::sort_by(black_box(test_data.as_mut_slice()), |a, b| {
            comp_count += 1;
            a.cmp(b)
        })
    }

    // If there is on average less than a single comparison this will be wrong.
    let total = comp_count / (run_count as u64);
    println!("{name}: mean comparisons: {total}");
}

#[inline(never)]
fn bench_sort<T>(
    c: &mut Criterion,
    bench_name: &str,
    test_len: usize,
    make_input: impl Fn() -> Vec<T>,
    sort_func: impl Fn(&mut [T]),
) {
    if !should_run_benchmark(bench_name) {
        return;
    }

    // Pin the benchmark to the same core to improve repeatability. Doing it this way allows
    // criterion to do other stuff with other threads.
    pin_thread_to_core();

    let batch_size = if test_len > 30 {
        BatchSize::LargeInput
    } else {
        BatchSize::SmallInput
    };

    c.bench_function(bench_name, |b| {
        b.iter_batched_ref(
            &make_input,
            |test_data| {
                sort_func(black_box(test_data.as_mut_slice()));
                black_box(test_data); // side-effect
            },
            batch_size,
        )
    });
}

fn bench_impl<S: Sort, T: Ord>(
    c: &mut Criterion,
    test_len: usize,
    transform_name: &str,
    transform: fn(Vec<i32>) -> Vec<T>,
    pattern_name: &str,
    pattern_provider: fn(usize) -> Vec<i32>,
) {
    if test_len > S::max_len() {
        return;
    }

    let sort_name = S::name();

    if env::var("MEASURE_COMP").is_ok() {
        let name = format!("{sort_name}-comp-{transform_name}-{pattern_name}-{test_len}");
        if should_run_benchmark(&name) {
            measure_comp_count::<S, T>(&name, test_len, transform, pattern_provider);
        }
    } else {
        bench_sort(
            c,
            &format!("{sort_name}-hot-{transform_name}-{pattern_name}-{test_len}"),
            test_len,
            || transform(pattern_provider(test_len)),
            S::sort,
        );
    }
}

fn split_len(len: usize, part_a_percent: f64) -> (usize, usize) {
    let len_a = ((len as f64 / 100.0) * part_a_percent).round() as usize;

    (len_a, len - len_a)
}

fn shuffle_vec<T>(mut v: Vec<T>) -> Vec<T> {
    use rand::seq::SliceRandom;

    v.shuffle(&mut rand::thread_rng());
    v
}

fn bench_patterns<T: Ord>(
    c: &mut Criterion,
    test_len: usize,
    transform_name: &str,
    transform: fn(Vec<i32>) -> Vec<T>,
) {
    let pattern_providers: [(&str, fn(usize) -> Vec<i32>); 8] = [
        ("random", patterns::random),
        ("random_dense", |len| {
            patterns::random_uniform(len, 0..=((len as f64).log2().round() as i32))
        }),
        ("random_binary", |len| patterns::random_uniform(len, 0..=1)),
        ("random_5p", |len| {
            let (len_95p, len_5p) = split_len(len, 95.0);
            let v = std::iter::repeat(0)
                .take(len_95p)
                .chain(patterns::random(len_5p))
                .collect();

            shuffle_vec(v)
        }),
        ("ascending", patterns::ascending),
        ("descending", patterns::descending),
        ("saws_long", |len| {
            patterns::saw_mixed(len, (len as f64).log2().round() as usize)
        }),
        ("pipe_organ", patterns::pipe_organ),
    ];

    for (pattern_name, pattern_provider) in pattern_providers {
        macro_rules! bench_inst {
            ($sort_impl:ty) => {
                bench_impl::<$sort_impl, T>(
                    c,
                    test_len,
                    transform_name,
                    transform,
                    pattern_name,
                    pattern_provider,
                );
            };
        }

        // --- Stable sorts ---

        bench_inst!(stable::binary_insertion::SortImpl);
        bench_inst!(stable::merge::SortImpl);
        bench_inst!(stable::tim::SortImpl);

        // --- Unstable sorts ---

        bench_inst!(unstable::shell::SortImpl);
        bench_inst!(unstable::selection::SortImpl);
        bench_inst!(unstable::heap::SortImpl);
        bench_inst!(unstable::quick::SortImpl);
    }
}

fn bench_f64(c: &mut Criterion, test_len: usize) {
    if env::var("MEASURE_COMP").is_ok() {
        return;
    }

    for algorithm in Algorithm::ALL {
        // Same limits as the Sort impls.
        if (algorithm == Algorithm::Selection && test_len > 5_000)
            || (algorithm == Algorithm::BinaryInsertion && test_len > 100_000)
        {
            continue;
        }

        bench_sort(
            c,
            &format!("sortkit_{algorithm}-hot-f64-random_nan_5p-{test_len}"),
            test_len,
            || patterns::random_f64(test_len, 5.0),
            |v| float::sort_f64(v, algorithm),
        );
    }
}

fn ensure_true_random() {
    // Benchmarks must not reuse the fixed per-process seed of the tests.
    let random_vec_a = patterns::random(5);
    let random_vec_b = patterns::random(5);

    assert_ne!(random_vec_a, random_vec_b);
}

fn criterion_benchmark(c: &mut Criterion) {
    let test_lens = [
        0, 1, 2, 3, 7, 8, 15, 16, 17, 20, 31, 50, 64, 101, 200, 500, 1_000, 2_048, 10_000, 100_000,
        1_000_000,
    ];

    patterns::use_random_seed_each_time();
    ensure_true_random();

    for test_len in test_lens {
        // Basic type often used to test sorting algorithms.
        bench_patterns(c, test_len, "i32", |values| values);

        // Common type for usize on 64-bit machines.
        bench_patterns(c, test_len, "u64", |values| {
            values
                .into_iter()
                .map(|val| (i64::from(val) + i64::from(i32::MAX) + 1) as u64 * 2)
                .collect()
        });

        if test_len <= 100_000 {
            // Not Copy, heap access on every comparison.
            bench_patterns(c, test_len, "string", |values| {
                values
                    .into_iter()
                    .map(|val| format!("{:010}", val.saturating_abs()))
                    .collect()
            });
        }

        bench_f64(c, test_len);
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

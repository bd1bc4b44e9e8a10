//! Property-based tests for the performance model
//!
//! Properties covered:
//! 1. Component times are non-negative and totals add up exactly
//! 2. Evaluation is deterministic
//! 3. Runtime and breakdown are invariant under input permutation
//! 4. Breakdown fractions plus overhead share sum to one
//! 5. Full send overlap removes communication time

use perfmodel::counters::RankRecord;
use perfmodel::model::{evaluate, AnalyticalModel, CostModel};
use perfmodel::params::ModelParameters;
use proptest::prelude::*;

fn arb_params() -> impl Strategy<Value = ModelParameters> {
    (
        1e8f64..5e9,
        0.1f64..8.0,
        0.0f64..1e-8,
        0.0f64..1e-7,
        0.0f64..1e-7,
        0.0f64..1e-5,
        0.0f64..=1.0,
        0.0f64..1.0,
    )
        .prop_map(
            |(clock_freq, ipc, cache_hit, mem_read, mem_write, send, overlap, overhead)| {
                ModelParameters {
                    clock_freq,
                    ipc,
                    cache_hit_latency: cache_hit,
                    mem_read_latency: mem_read,
                    mem_write_latency: mem_write,
                    send_latency: send,
                    send_overlap: overlap,
                    fixed_overhead: overhead,
                }
            },
        )
}

fn arb_counters() -> impl Strategy<Value = (f64, f64, f64, f64, f64, f64)> {
    (
        0.0f64..1e11,
        0.0f64..1e6,
        0.0f64..1e9,
        0.0f64..1e8,
        0.0f64..1e8,
        0.0f64..1e9,
    )
}

fn arb_records() -> impl Strategy<Value = Vec<RankRecord>> {
    prop::collection::vec(arb_counters(), 1..32).prop_map(|counters| {
        counters
            .into_iter()
            .enumerate()
            .map(
                |(rank, (instrs, sends, cache_hits, mem_reads, mem_writes, overhead_instrs))| {
                    RankRecord {
                        instrs,
                        sends,
                        cache_hits,
                        mem_reads,
                        mem_writes,
                        overhead_instrs,
                        ..RankRecord::new(rank as u32)
                    }
                },
            )
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_components_non_negative(params in arb_params(), records in arb_records()) {
        let model = AnalyticalModel::new(params).unwrap();
        let result = evaluate(&records, &params).unwrap();

        for (record, rank) in records.iter().zip(&result.ranks) {
            let d = model.decompose(record);
            prop_assert!(d.compute >= 0.0);
            prop_assert!(d.cache_and_mem >= 0.0);
            prop_assert!(d.communication >= 0.0);
            prop_assert_eq!(rank.decomposition, d);
            prop_assert_eq!(
                rank.total,
                d.compute + d.cache_and_mem + d.communication + params.fixed_overhead
            );
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_evaluate_deterministic(params in arb_params(), records in arb_records()) {
        let first = evaluate(&records, &params).unwrap();
        let second = evaluate(&records, &params).unwrap();
        prop_assert_eq!(first, second);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_runtime_is_max_total(params in arb_params(), records in arb_records()) {
        let result = evaluate(&records, &params).unwrap();
        let max = result.ranks.iter().map(|r| r.total).fold(f64::MIN, f64::max);

        prop_assert_eq!(result.overall_runtime, max);
        let bottleneck = result
            .ranks
            .iter()
            .find(|r| r.total == max)
            .unwrap();
        prop_assert_eq!(result.bottleneck_rank, bottleneck.rank);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_permutation_invariant(
        params in arb_params(),
        records in arb_records(),
        seed in any::<u64>(),
    ) {
        let mut shuffled = records.clone();
        // Deterministic rotation + reversal from the seed
        let len = shuffled.len();
        shuffled.rotate_left((seed as usize) % len);
        if seed % 2 == 0 {
            shuffled.reverse();
        }

        let a = evaluate(&records, &params).unwrap();
        let b = evaluate(&shuffled, &params).unwrap();

        prop_assert_eq!(a.overall_runtime, b.overall_runtime);
        prop_assert_eq!(a.breakdown, b.breakdown);
        prop_assert_eq!(a.bottleneck_rank, b.bottleneck_rank);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_fractions_sum_to_one(params in arb_params(), records in arb_records()) {
        let result = evaluate(&records, &params).unwrap();
        if result.overall_runtime > 0.0 {
            let sum = result.breakdown.total() + result.overhead_share;
            prop_assert!((sum - 1.0).abs() <= 1e-9, "sum = {}", sum);
        } else {
            prop_assert_eq!(result.breakdown.total(), 0.0);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_full_overlap_hides_communication(
        params in arb_params(),
        records in arb_records(),
    ) {
        let params = ModelParameters { send_overlap: 1.0, ..params };
        let result = evaluate(&records, &params).unwrap();

        for rank in &result.ranks {
            prop_assert_eq!(rank.decomposition.communication, 0.0);
        }
    }
}

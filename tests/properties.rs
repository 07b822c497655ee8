use proptest::prelude::*;
use rosu_hitstats::{
    any::{reconstructor, ReconstructParams},
    model::statistics::resolve,
    GameMode, Judgment, ObjectCensus, PartialStatistics,
};

fn mode() -> impl Strategy<Value = GameMode> {
    prop_oneof![
        Just(GameMode::Osu),
        Just(GameMode::Taiko),
        Just(GameMode::Catch),
        Just(GameMode::Mania),
    ]
}

fn catch_census() -> impl Strategy<Value = ObjectCensus> {
    (0_u32..2000, 0_u32..2000, 0_u32..2000).prop_map(|(fruits, droplets, tiny)| {
        ObjectCensus::from_catch_counts(fruits, fruits, droplets, tiny)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    #[test]
    fn conservation(
        mode in prop_oneof![Just(GameMode::Osu), Just(GameMode::Taiko), Just(GameMode::Mania)],
        total in 0_u32..10_000,
        miss_share in 0.0..=1.0_f64,
        accuracy in 0.0..=100.0_f64,
    ) {
        let misses = (f64::from(total) * miss_share) as u32;

        let params = ReconstructParams {
            accuracy,
            census: ObjectCensus::from_total(total),
            misses,
        };

        let counts = reconstructor(mode).reconstruct(&params);

        prop_assert_eq!(counts.total(), total);
    }

    #[test]
    fn catch_conservation(
        census in catch_census(),
        misses in 0_u32..500,
        accuracy in 0.0..=100.0_f64,
    ) {
        prop_assume!(misses <= census.max_catch_combo());

        let params = ReconstructParams { accuracy, census, misses };
        let counts = reconstructor(GameMode::Catch).reconstruct(&params);

        let caught = counts.get(Judgment::Great) + counts.get(Judgment::LargeTickHit);
        prop_assert_eq!(caught + counts.get(Judgment::Miss), census.max_catch_combo());

        let tiny = counts.get(Judgment::SmallTickHit) + counts.get(Judgment::SmallTickMiss);
        prop_assert_eq!(tiny, census.max_small_ticks);
    }

    #[test]
    fn misses_are_kept(
        mode in mode(),
        total in 0_u32..10_000,
        misses in 0_u32..10_000,
        accuracy in 0.0..=100.0_f64,
    ) {
        let params = ReconstructParams {
            accuracy,
            census: ObjectCensus {
                total,
                max_fruits: total,
                max_large_ticks: total / 2,
                max_small_ticks: total / 4,
            },
            misses,
        };

        let counts = reconstructor(mode).reconstruct(&params);

        // only osu!standard turns extra objects into misses
        if mode == GameMode::Osu {
            prop_assert!(counts.get(Judgment::Miss) >= misses.min(total));
        } else {
            prop_assert_eq!(counts.get(Judgment::Miss), misses);
        }

        if misses >= total && mode != GameMode::Catch {
            prop_assert_eq!(counts.total(), misses);
        }
    }

    #[test]
    fn only_mode_judgments(
        mode in mode(),
        total in 0_u32..1000,
        accuracy in any::<f64>(),
    ) {
        let params = ReconstructParams {
            accuracy,
            census: ObjectCensus::from_catch_counts(total, total, total / 2, total / 3),
            misses: 0,
        };

        let counts = reconstructor(mode).reconstruct(&params);
        let kinds = Judgment::kinds(mode);

        prop_assert!(counts.iter().all(|(judgment, _)| kinds.contains(&judgment)));
    }

    #[test]
    fn explicit_path_is_verbatim(
        mode in mode(),
        counts in proptest::collection::vec(0_u32..1000, 9),
        provided_misses in 0_u32..100,
    ) {
        let statistics: PartialStatistics = Judgment::ALL
            .iter()
            .copied()
            .zip(counts.iter().copied())
            .collect();

        let resolved = resolve(Some(&statistics), provided_misses);

        if counts.iter().any(|&n| n > 0) {
            let explicit = resolved.explicit.expect("explicit path");
            let judgments = explicit.judgments(mode);

            for &kind in Judgment::kinds(mode) {
                prop_assert_eq!(judgments.get(kind), statistics.get(kind).unwrap_or(0));
            }

            prop_assert_eq!(resolved.misses, statistics.get(Judgment::Miss).unwrap_or(0));
        } else {
            prop_assert!(resolved.explicit.is_none());
            prop_assert_eq!(resolved.misses, provided_misses);
        }
    }
}

use rand::rngs::StdRng;
use rand::SeedableRng;
use secret_santa::{
    generate_constrained_derangements, generate_derangement, DerangementSampler, DrawError,
    Exclusions, Permutation, SamplerConfig,
};

fn assert_no_repeats(rounds: &[Permutation]) {
    for (i, a) in rounds.iter().enumerate() {
        for b in &rounds[i + 1..] {
            for k in 0..a.len() {
                assert_ne!(a.apply(k), b.apply(k), "index {k} repeats a target across rounds");
            }
        }
    }
}

fn couple_exclusions() -> Exclusions {
    Exclusions::from_groups(4, &[vec![0, 1]]).unwrap()
}

#[test]
fn generated_derangements_are_fixed_point_free_bijections() {
    let mut rng = StdRng::seed_from_u64(1);
    for n in 2..40 {
        for _ in 0..25 {
            let p = generate_derangement(n, &mut rng).unwrap();
            assert_eq!(p.len(), n);
            assert!(p.is_derangement());
            assert!(Permutation::from_vec(p.into_vec()).is_ok());
        }
    }
}

#[test]
fn derangement_needs_two_elements() {
    let mut rng = StdRng::seed_from_u64(2);
    assert!(matches!(
        generate_derangement(0, &mut rng),
        Err(DrawError::ImpossibleConstraint { n: 0 })
    ));
    assert!(matches!(
        generate_derangement(1, &mut rng),
        Err(DrawError::ImpossibleConstraint { n: 1 })
    ));
}

#[test]
fn two_participants_always_swap() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
        let rounds = generate_constrained_derangements(2, 1, None, &mut rng).unwrap();
        assert_eq!(rounds.len(), 1);
        assert_eq!(rounds[0].as_slice(), &[1, 0]);
    }
}

#[test]
fn zero_rounds_returns_immediately() {
    let mut rng = StdRng::seed_from_u64(4);
    let sampled = DerangementSampler::default()
        .sample(0, 0, None, &mut rng)
        .unwrap();
    assert!(sampled.permutations.is_empty());
    assert_eq!(sampled.stats.candidates, 0);
    assert!(generate_constrained_derangements(1, 0, None, &mut rng)
        .unwrap()
        .is_empty());
}

#[test]
fn rounds_over_fewer_than_two_participants_are_rejected() {
    let mut rng = StdRng::seed_from_u64(5);
    for n in [0, 1] {
        assert!(matches!(
            generate_constrained_derangements(n, 1, None, &mut rng),
            Err(DrawError::InvalidArgument(_))
        ));
    }
}

#[test]
fn exclusions_must_cover_every_index() {
    let mut rng = StdRng::seed_from_u64(6);
    let exclusions = Exclusions::new(3);
    assert!(matches!(
        generate_constrained_derangements(4, 1, Some(&exclusions), &mut rng),
        Err(DrawError::InvalidArgument(_))
    ));
}

#[test]
fn eight_participants_two_rounds_never_repeat() {
    let mut rng = StdRng::seed_from_u64(0x5A17A);
    for _ in 0..10_000 {
        let rounds = generate_constrained_derangements(8, 2, None, &mut rng).unwrap();
        assert_eq!(rounds.len(), 2);
        assert!(rounds.iter().all(|p| p.len() == 8 && p.is_derangement()));
        assert_no_repeats(&rounds);
    }
}

#[test]
fn many_rounds_stay_pairwise_distinct() {
    let mut rng = StdRng::seed_from_u64(8);
    for (n, d) in [(3, 2), (4, 3), (6, 4), (10, 5)] {
        for _ in 0..100 {
            let rounds = generate_constrained_derangements(n, d, None, &mut rng).unwrap();
            assert_eq!(rounds.len(), d);
            assert!(rounds.iter().all(Permutation::is_derangement));
            assert_no_repeats(&rounds);
        }
    }
}

#[test]
fn couple_exclusion_is_respected_in_every_round() {
    let exclusions = couple_exclusions();
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..500 {
        let rounds = generate_constrained_derangements(4, 2, Some(&exclusions), &mut rng).unwrap();
        assert_eq!(rounds.len(), 2);
        for round in &rounds {
            assert!(round.is_derangement());
            assert!(round.verifies_exclusions(&exclusions));
            assert_ne!(round.apply(0), 1);
            assert_ne!(round.apply(1), 0);
        }
        assert_no_repeats(&rounds);
    }
}

#[test]
fn couple_exclusion_with_three_rounds_exhausts_bound() {
    // Index 0 may only give to 2 or 3, so a third round cannot exist.
    let exclusions = couple_exclusions();
    let sampler = DerangementSampler::new(SamplerConfig::bounded(2_000));
    let mut rng = StdRng::seed_from_u64(10);
    let err = sampler
        .sample(4, 3, Some(&exclusions), &mut rng)
        .unwrap_err();
    match err {
        DrawError::SamplingExhausted {
            n,
            d,
            accepted,
            attempts,
            exclusions: reported,
        } => {
            assert_eq!((n, d), (4, 3));
            assert_eq!(accepted, 2);
            assert_eq!(attempts, 2_000);
            assert_eq!(reported, Some(exclusions));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn infeasible_round_count_fails_when_bounded() {
    let sampler = DerangementSampler::new(SamplerConfig::bounded(500));
    let mut rng = StdRng::seed_from_u64(12);
    let err = sampler.sample(3, 10, None, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        DrawError::SamplingExhausted {
            n: 3,
            d: 10,
            attempts: 500,
            exclusions: None,
            ..
        }
    ));
    assert!(err.to_string().contains("n = 3"));
}

#[test]
fn stats_account_for_every_candidate() {
    let sampler = DerangementSampler::new(SamplerConfig::unbounded());
    let exclusions = Exclusions::from_groups(6, &[vec![0, 1], vec![2, 3], vec![4, 5]]).unwrap();
    let mut rng = StdRng::seed_from_u64(13);
    let sampled = sampler.sample(6, 3, Some(&exclusions), &mut rng).unwrap();
    let stats = sampled.stats;
    assert_eq!(
        stats.candidates,
        3 + stats.exclusion_rejections + stats.collision_rejections
    );

    let sampled = sampler.sample(2, 1, None, &mut rng).unwrap();
    assert_eq!(sampled.stats.candidates, 1);
    assert_eq!(sampled.stats.collision_rejections, 0);
}

#[test]
fn same_seed_gives_same_draw() {
    let first =
        generate_constrained_derangements(12, 3, None, &mut StdRng::seed_from_u64(99)).unwrap();
    let second =
        generate_constrained_derangements(12, 3, None, &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(first, second);
}

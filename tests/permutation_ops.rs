use rand::rngs::StdRng;
use rand::SeedableRng;
use secret_santa::{DrawError, Exclusions, Permutation};
use std::collections::BTreeSet;

fn perm(v: &[usize]) -> Permutation {
    Permutation::from_vec(v.to_vec()).expect("valid permutation")
}

#[test]
fn identity_maps_every_index_to_itself() {
    let id = Permutation::identity(5);
    assert_eq!(id.as_slice(), &[0, 1, 2, 3, 4]);
    assert!((0..5).all(|i| id.apply(i) == i));
    assert!(Permutation::identity(0).is_empty());
}

#[test]
fn from_vec_rejects_non_bijections() {
    assert!(matches!(
        Permutation::from_vec(vec![0, 0, 1]),
        Err(DrawError::InvalidPermutation(_))
    ));
    assert!(matches!(
        Permutation::from_vec(vec![0, 3, 1]),
        Err(DrawError::InvalidPermutation(_))
    ));
    assert!(Permutation::from_vec(vec![2, 0, 1]).is_ok());
}

#[test]
fn compose_applies_right_operand_first() {
    let a = perm(&[1, 2, 0]);
    let b = perm(&[0, 2, 1]);
    let ab = a.compose(&b).unwrap();
    for i in 0..3 {
        assert_eq!(ab.apply(i), a.apply(b.apply(i)));
    }
    assert_eq!(ab.as_slice(), &[1, 0, 2]);
}

#[test]
fn compose_rejects_mismatched_sizes() {
    let err = perm(&[1, 0]).compose(&Permutation::identity(3)).unwrap_err();
    assert!(matches!(err, DrawError::DimensionMismatch { left: 2, right: 3 }));
}

#[test]
fn composition_is_associative() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in [1, 2, 5, 13] {
        for _ in 0..50 {
            let a = Permutation::random(n, &mut rng);
            let b = Permutation::random(n, &mut rng);
            let c = Permutation::random(n, &mut rng);
            let left = a.compose(&b).unwrap().compose(&c).unwrap();
            let right = a.compose(&b.compose(&c).unwrap()).unwrap();
            assert_eq!(left, right);
        }
    }
}

#[test]
fn composing_with_inverse_yields_identity() {
    let mut rng = StdRng::seed_from_u64(11);
    for n in 0..12 {
        let p = Permutation::random(n, &mut rng);
        let inv = p.inverse();
        assert_eq!(p.compose(&inv).unwrap(), Permutation::identity(n));
        assert_eq!(inv.compose(&p).unwrap(), Permutation::identity(n));
        for i in 0..n {
            assert_eq!(inv.apply(p.apply(i)), i);
        }
    }
}

#[test]
fn derangement_predicate() {
    assert!(perm(&[1, 0]).is_derangement());
    assert!(perm(&[1, 2, 0]).is_derangement());
    assert!(!perm(&[0, 2, 1]).is_derangement());
    assert!(!Permutation::identity(1).is_derangement());
    assert!(Permutation::identity(0).is_derangement());
}

#[test]
#[should_panic]
fn apply_out_of_range_panics() {
    Permutation::identity(3).apply(3);
}

#[test]
fn exclusions_are_checked_per_index() {
    let mut exclusions = Exclusions::new(4);
    exclusions.exclude_pair(0, 1).unwrap();

    assert!(!perm(&[1, 0, 3, 2]).verifies_exclusions(&exclusions));
    assert!(!perm(&[2, 0, 3, 1]).verifies_exclusions(&exclusions));
    assert!(perm(&[2, 3, 0, 1]).verifies_exclusions(&exclusions));
}

#[test]
fn groups_build_symmetric_exclusions() {
    let exclusions = Exclusions::from_groups(6, &[vec![0, 1, 2], vec![4, 5]]).unwrap();
    assert!(exclusions.is_symmetric());
    assert!(exclusions.forbids(0, 2) && exclusions.forbids(2, 0));
    assert!(exclusions.forbids(5, 4));
    assert!(!exclusions.forbids(0, 0));
    assert!(exclusions.forbidden(3).is_empty());
    assert_eq!(exclusions.pair_count(), 8);
    assert_eq!(
        exclusions.to_string(),
        "0 -/-> {1,2}; 1 -/-> {0,2}; 2 -/-> {0,1}; 4 -/-> {5}; 5 -/-> {4}"
    );
}

#[test]
fn exclusions_reject_out_of_range_indices() {
    assert!(matches!(
        Exclusions::new(3).exclude_pair(0, 3),
        Err(DrawError::InvalidArgument(_))
    ));
    let sets = vec![BTreeSet::from([1]), BTreeSet::from([5])];
    assert!(matches!(
        Exclusions::from_sets(sets),
        Err(DrawError::InvalidArgument(_))
    ));
}

#[test]
fn deserialized_exclusions_are_range_checked() {
    assert!(serde_json::from_str::<Exclusions>("[[1],[5]]").is_err());

    let exclusions = Exclusions::from_groups(4, &[vec![0, 1]]).unwrap();
    let json = serde_json::to_string(&exclusions).unwrap();
    assert_eq!(json, "[[1],[0],[],[]]");
    let parsed: Exclusions = serde_json::from_str(&json).unwrap();
    assert!(parsed.is_symmetric());
    assert_eq!(parsed, exclusions);
}

//! End-to-end vault scenarios spanning generation, serialization, and
//! recovery: the literal scenarios of spec §8, using the fixed parameters
//! `p=17, n=5, c=4, t=2, corpus_size=16`.

use fuzzy_vault::field::{Poly, Scalar};
use fuzzy_vault::recovery::{recover_words, RecoveryError};
use fuzzy_vault::{generate_secret, recover_secret, InputParams};

fn scenario_params() -> InputParams {
    InputParams {
        setsize: 5,
        correctthreshold: 4,
        corpus_size: 16,
        prime: 17,
        salt: [0x42; 32],
        extractor: vec![2, 3, 5, 7, 11],
    }
}

#[test]
fn serialization_round_trips_and_recomputes_error_threshold() {
    let params = scenario_params();
    let words = [1u64, 2, 3, 4, 5];
    let (state, _keys) = generate_secret(&params, &words, 1).unwrap();

    let dumped = state.dump();
    let reloaded = fuzzy_vault::FuzzyState::load(&dumped).unwrap();

    assert_eq!(reloaded.sketch, vec![0, 2]);
    assert_eq!(reloaded.error_threshold(), 2);
    assert_eq!(reloaded.setsize, state.setsize);
    assert_eq!(reloaded.corpus_size, state.corpus_size);
    assert_eq!(reloaded.correctthreshold, state.correctthreshold);
    assert_eq!(reloaded.prime, state.prime);
    assert_eq!(reloaded.extractor, state.extractor);
    assert_eq!(reloaded.salt, state.salt);
    assert_eq!(reloaded.hash, state.hash);
}

#[test]
fn recovery_after_round_trip_through_serialization_still_works() {
    let params = scenario_params();
    let words = [1u64, 2, 3, 4, 5];
    let (state, keys) = generate_secret(&params, &words, 2).unwrap();
    let reloaded = fuzzy_vault::FuzzyState::load(&state.dump()).unwrap();

    let guess = [1u64, 2, 3, 4, 7];
    let recovered_keys = recover_secret(&reloaded, &guess, 2).unwrap();
    assert_eq!(keys, recovered_keys);
}

#[test]
fn corrupted_sketch_producing_a_repeated_root_is_rejected() {
    // Directly engineer spec §8 scenario 5: a sketch whose reconstructed
    // `p_high`, combined with a guess, makes the decoder's `p_low` satisfy
    // `p_high - p_low == (z-1)^2 (z-2)(z-3)(z-4)` (a repeated root at 1).
    let p = 17u64;
    let n = 5usize;
    let t = 2u64;

    let mut target = Poly::new(p, vec![Scalar::one(p)]);
    for root in [1u64, 1, 2, 3, 4] {
        let factor = Poly::new(p, vec![Scalar::new(root, p).neg(), Scalar::one(p)]);
        target = target.mul(&factor);
    }
    assert!(target.has_repeated_roots());

    // Choose the sketch so p_high agrees with `target` on its top 2
    // coefficients (degrees 3 and 4); p_high is otherwise monic of degree 5
    // with its low 3 coefficients set to zero, per spec §4.5.
    let target_coeffs = target.coeffs();
    let sketch = vec![target_coeffs[3].value(), target_coeffs[4].value()];
    let p_high = fuzzy_vault::sketch::reconstruct_high_poly(&sketch, n, p);

    // p_low := p_high - target has degree <= 2 (the two polynomials agree
    // on degrees 3..5, so those terms cancel), well under k = n - t = 3.
    let p_low = p_high.sub(&target);
    assert!(p_low.degree() < n - t as usize);

    // Four guess points at target's distinct roots make b_i = p_high(a_i)
    // agree with p_low(a_i) exactly (since target(a_i) = 0 there); the
    // fifth point is the decoder's one allowed error.
    let guess = [1u64, 2, 3, 4, 6];
    assert!(target.eval(Scalar::new(6, p)) != Scalar::zero(p));

    match recover_words(&sketch, &guess, n, t, p) {
        Err(RecoveryError::RepeatedRoots) => {}
        other => panic!("expected RepeatedRoots, got {other:?}"),
    }
}

#[test]
fn threshold_law_holds_across_many_overlaps() {
    let params = scenario_params();
    let words = [1u64, 2, 3, 4, 5];
    let (state, keys) = generate_secret(&params, &words, 1).unwrap();

    // Every guess sharing >= correctthreshold(=4) positions with `words`
    // recovers the same keys.
    let good_guesses: [[u64; 5]; 3] = [[1, 2, 3, 4, 5], [1, 2, 3, 4, 7], [1, 2, 3, 4, 9]];
    for guess in good_guesses {
        let recovered_keys = recover_secret(&state, &guess, 1).unwrap();
        assert_eq!(recovered_keys, keys, "guess {guess:?} should recover the original keys");
    }
}

#[test]
fn below_threshold_guess_never_returns_wrong_keys_silently() {
    let params = scenario_params();
    let words = [1u64, 2, 3, 4, 5];
    let (state, keys) = generate_secret(&params, &words, 1).unwrap();

    let bad_guess = [1u64, 2, 3, 7, 9]; // only 3 of 5 correct
    match recover_secret(&state, &bad_guess, 1) {
        Err(_) => {}
        Ok(recovered) => assert_ne!(recovered, keys),
    }
}

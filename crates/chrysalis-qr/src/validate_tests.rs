use crate::{
    BitmapMatrix, EccLevel, MIN_DENSITY, Target, Verdict, check_mining_criteria, is_valid,
    matrix_hash, validate,
};

/// `"hello"` with nonce 31: the first nonce whose matrix passes the
/// structural rules.
fn passing_matrix() -> BitmapMatrix {
    let mut payload = b"hello".to_vec();
    payload.extend_from_slice(&31u64.to_le_bytes());
    BitmapMatrix::build(&payload, EccLevel::H).unwrap()
}

#[test]
fn max_target_accepts_structurally_sound_matrix() {
    let matrix = passing_matrix();
    assert!(matrix.density() >= MIN_DENSITY);
    assert_eq!(validate(&matrix, &Target::MAX), Verdict::Accepted);
    assert!(is_valid(&matrix, &Target::MAX));
}

#[test]
fn zero_target_rejects_on_hash() {
    assert_eq!(validate(&passing_matrix(), &Target::ZERO), Verdict::AboveTarget);
}

#[test]
fn sparse_matrix_fails_density() {
    let matrix = BitmapMatrix::build(b"X", EccLevel::H).unwrap();

    assert!(matches!(
        validate(&matrix, &Target::MAX),
        Verdict::DensityOutOfRange(d) if d < MIN_DENSITY
    ));
    assert!(!is_valid(&matrix, &Target::MAX));
    assert!(check_mining_criteria(&matrix, 0.20, 0.20));
    assert!(!check_mining_criteria(&matrix, 0.20, 0.10));
}

#[test]
fn noisy_matrix_is_rejected() {
    // 0b01100110 flips the two-column pair on every row: a checkerboard
    let matrix = BitmapMatrix::build(&[0x66; 55], EccLevel::H).unwrap();

    assert!(matrix.noise() > 0.20, "noise {}", matrix.noise());
    assert!(matches!(validate(&matrix, &Target::MAX), Verdict::TooNoisy(_)));
}

#[test]
fn hash_comparison_is_inclusive_and_monotonic() {
    let matrix = passing_matrix();
    let hash = matrix_hash(&matrix);

    assert!(is_valid(&matrix, &Target::new(hash)));

    let mut below = hash;
    let last = below.iter().rposition(|&b| b > 0).unwrap();
    below[last] -= 1;
    assert!(!is_valid(&matrix, &Target::new(below)));

    for zeros in (0..=256).rev() {
        let target = Target::with_leading_zeros(zeros);
        if is_valid(&matrix, &target) {
            for looser in 0..zeros {
                assert!(is_valid(&matrix, &Target::with_leading_zeros(looser)));
            }
            return;
        }
    }
    panic!("max target must accept");
}

#[test]
fn target_parsing() {
    let hex = "00000000ffffffffffffffffffffffffffffffffffffffffffffffffffffffff";
    let target = Target::from_hex(hex).unwrap();

    assert_eq!(target, Target::with_leading_zeros(32));
    assert_eq!(target.to_hex(), hex);
    assert!(Target::from_hex("ff").is_err());
    assert!(Target::from_hex("zz").is_err());
    assert!(Target::from_slice(&[0; 31]).is_err());
    assert_eq!(Target::with_leading_zeros(4).as_bytes()[0], 0x0F);
}

use quorum_p384::*;
use rand::thread_rng;

#[test]
fn check_group_laws() {
    let rng = thread_rng();

    quorum_core::tests::group_generic::check_group_laws::<P384Group, _>(rng);
}

#[test]
fn check_scalar_laws() {
    let rng = thread_rng();

    quorum_core::tests::group_generic::check_scalar_laws::<P384Group, _>(rng);
}

#[test]
fn check_encoding_roundtrip() {
    let rng = thread_rng();

    quorum_core::tests::group_generic::check_encoding_roundtrip::<P384Group, _>(rng);
}

#[test]
fn check_reject_noncanonical() {
    quorum_core::tests::group_generic::check_reject_noncanonical::<P384Group>();
}

#[test]
fn check_hash_to_group() {
    quorum_core::tests::group_generic::check_hash_to_group::<P384Group>();
}

#[test]
fn check_polynomial_evaluation() {
    quorum_core::tests::secret_sharing::check_polynomial_evaluation::<P384Group>();
}

#[test]
fn check_lagrange_errors() {
    quorum_core::tests::secret_sharing::check_lagrange_errors::<P384Group>();
}

#[test]
fn check_shamir() {
    let rng = thread_rng();

    quorum_core::tests::secret_sharing::check_shamir::<P384Group, _>(rng);
}

#[test]
fn check_feldman() {
    let rng = thread_rng();

    quorum_core::tests::secret_sharing::check_feldman::<P384Group, _>(rng);
}

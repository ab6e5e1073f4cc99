//! Ciphersuite-generic serde checks, using JSON.

use rand_core::{CryptoRng, RngCore};

use crate::{
    keys::{KeyShare, PublicKeyPackage},
    round1::SigningCommitments,
    round2::SignatureShare,
    tests::ciphersuite_generic::{commit_all, deal, sign_all, MESSAGE},
    Combiner, Ciphersuite, Group, Identifier, PeerSigner, Signature,
};

/// Sends a full signing session through JSON and checks the result still verifies.
pub fn check_serde_session<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (key_shares, signers, public_key_package) = deal::<C, _>(&mut rng);

    let json = serde_json::to_string(&key_shares[0]).unwrap();
    let decoded: KeyShare<C> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, key_shares[0]);
    assert_eq!(PeerSigner::try_from(decoded).unwrap(), signers[0]);

    let json = serde_json::to_string(&public_key_package).unwrap();
    let public_key_package: PublicKeyPackage<C> = serde_json::from_str(&json).unwrap();
    let combiner = Combiner::new(public_key_package).unwrap();

    let participants: Vec<&PeerSigner<C>> = signers.iter().take(4).collect();
    let (nonces, commitments) = commit_all(&participants, &mut rng);
    let json = serde_json::to_string(&commitments).unwrap();
    let commitments: Vec<SigningCommitments<C>> = serde_json::from_str(&json).unwrap();

    let shares = sign_all(&participants, nonces, &commitments, MESSAGE);
    let json = serde_json::to_string(&shares).unwrap();
    let shares: Vec<SignatureShare<C>> = serde_json::from_str(&json).unwrap();

    let signature = combiner
        .aggregate_verified(MESSAGE, &commitments, &shares)
        .unwrap();
    let json = serde_json::to_string(&signature).unwrap();
    let signature: Signature<C> = serde_json::from_str(&json).unwrap();
    combiner.verifying_key().verify(MESSAGE, &signature).unwrap();
}

/// Checks that JSON inputs violating the wire invariants are rejected.
pub fn check_serde_rejects_invalid<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (_, signers, _) = deal::<C, _>(&mut rng);
    let (_, commitments) = signers[0].commit(&mut rng).unwrap();

    let valid = serde_json::to_value(commitments).unwrap();

    let mut zero_identifier = valid.clone();
    zero_identifier["identifier"] = serde_json::json!(0);
    assert!(serde_json::from_value::<SigningCommitments<C>>(zero_identifier).is_err());

    let mut unknown_field = valid.clone();
    unknown_field["extra"] = serde_json::json!(1);
    assert!(serde_json::from_value::<SigningCommitments<C>>(unknown_field).is_err());

    // The identity is rejected wherever it can be encoded at all.
    if let Ok(identity) = <C::Group>::serialize(&<C::Group>::identity()) {
        let mut identity_commitment = valid;
        identity_commitment["hiding"] = serde_json::json!(hex::encode(identity.as_ref()));
        assert!(serde_json::from_value::<SigningCommitments<C>>(identity_commitment).is_err());
    }

    assert_eq!(
        serde_json::from_str::<Identifier>("5").unwrap(),
        Identifier::try_from(5).unwrap()
    );
}

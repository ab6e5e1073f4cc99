//! Ciphersuite-generic test functions.
#![allow(clippy::type_complexity)]

use std::collections::BTreeSet;

use rand_core::{CryptoRng, RngCore};

use crate as quorum;
use crate::{
    keys::{KeyShare, PublicKeyPackage, SigningShare},
    round1::{NonceCommitment, SigningCommitments, SigningNonces},
    round2::SignatureShare,
    Ciphersuite, Combiner, Error, Field, FieldError, Group, Identifier, PeerSigner, Signature,
    SigningKey, VerifyingKey,
};

/// The message every FROST session in these tests signs.
pub const MESSAGE: &[u8] = b"it's cold here";

/// Runs round 1 for `signers`, returning their nonces and the sorted commitment list.
pub fn commit_all<C: Ciphersuite, R: RngCore + CryptoRng>(
    signers: &[&PeerSigner<C>],
    rng: &mut R,
) -> (Vec<SigningNonces<C>>, Vec<SigningCommitments<C>>) {
    let mut nonces = Vec::new();
    let mut commitments = Vec::new();
    for signer in signers {
        let (signer_nonces, signer_commitments) = signer.commit(rng).unwrap();
        nonces.push(signer_nonces);
        commitments.push(signer_commitments);
    }
    commitments.sort_by_key(|c| *c.identifier());
    (nonces, commitments)
}

/// Runs round 2 for `signers`, consuming their nonces.
pub fn sign_all<C: Ciphersuite>(
    signers: &[&PeerSigner<C>],
    nonces: Vec<SigningNonces<C>>,
    commitments: &[SigningCommitments<C>],
    message: &[u8],
) -> Vec<SignatureShare<C>> {
    signers
        .iter()
        .zip(nonces)
        .map(|(signer, nonces)| signer.sign(message, nonces, commitments).unwrap())
        .collect()
}

/// Deals `t = 3`, `n = 5` key shares and turns them into verified signers.
pub fn deal<C: Ciphersuite, R: RngCore + CryptoRng>(
    rng: &mut R,
) -> (Vec<KeyShare<C>>, Vec<PeerSigner<C>>, PublicKeyPackage<C>) {
    let (key_shares, public_key_package) =
        quorum::keys::generate_with_dealer(3, 5, rng).unwrap();

    let signers: Vec<PeerSigner<C>> = key_shares
        .iter()
        .cloned()
        .map(|k| PeerSigner::try_from(k).unwrap())
        .collect();

    (key_shares, signers, public_key_package)
}

/// Test if creating a zero SigningKey fails
pub fn check_zero_key_fails<C: Ciphersuite>() {
    let zero = <<<C as Ciphersuite>::Group as Group>::Field>::zero();
    let encoded_zero = <<<C as Ciphersuite>::Group as Group>::Field>::serialize(&zero);
    let r = SigningKey::<C>::deserialize(encoded_zero.as_ref());
    assert_eq!(r, Err(Error::MalformedSigningKey));
    assert_eq!(
        SigningKey::<C>::from_scalar(zero),
        Err(Error::FieldError(FieldError::InvalidZeroScalar))
    );
}

/// Checks the dealer's parameter validation.
pub fn check_dealer_parameters<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    for (threshold, max_signers) in [(0, 5), (5, 5), (6, 5)] {
        assert_eq!(
            quorum::keys::generate_with_dealer::<C, _>(threshold, max_signers, &mut rng)
                .unwrap_err(),
            Error::BadParameters
        );
    }
}

/// Test FROST signing with trusted dealer with a Ciphersuite: `t = 3`, `n = 5`.
///
/// Every signer checks its key share; every quorum of four signers, and all five, produce a
/// valid signature; three signers are refused.
pub fn check_sign_with_dealer<C: Ciphersuite, R: RngCore + CryptoRng>(
    mut rng: R,
) -> (Vec<u8>, Signature<C>, VerifyingKey<C>) {
    let (key_shares, signers, public_key_package) = deal::<C, _>(&mut rng);

    for (signer, key_share) in signers.iter().zip(&key_shares) {
        assert!(signer.check_key_share(key_share.commitment()));
        assert_eq!(signer.verifying_key(), public_key_package.verifying_key());
        assert_eq!(
            signer.verifying_share(),
            &public_key_package.verifying_shares()[signer.identifier()]
        );
    }

    let combiner = Combiner::new(public_key_package.clone()).unwrap();

    let mut quorums: Vec<Vec<&PeerSigner<C>>> = (0..signers.len())
        .map(|skip| {
            signers
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, s)| s)
                .collect()
        })
        .collect();
    quorums.push(signers.iter().collect());

    let mut last = None;
    for participants in quorums {
        let (nonces, commitments) = commit_all(&participants, &mut rng);
        let shares = sign_all(&participants, nonces, &commitments, MESSAGE);

        assert!(combiner.check_signature_shares(MESSAGE, &commitments, &shares));
        for share in &shares {
            combiner
                .verify_signature_share(MESSAGE, &commitments, share)
                .unwrap();
        }

        let signature = combiner.sign(MESSAGE, &commitments, &shares).unwrap();
        quorum::verify(MESSAGE, &signature, public_key_package.verifying_key()).unwrap();
        assert_eq!(
            combiner
                .aggregate_verified(MESSAGE, &commitments, &shares)
                .unwrap(),
            signature
        );
        assert_eq!(
            quorum::verify(
                b"it's warm here",
                &signature,
                public_key_package.verifying_key()
            ),
            Err(Error::InvalidSignature)
        );
        last = Some(signature);
    }

    // t signers are not enough
    let participants: Vec<&PeerSigner<C>> = signers.iter().take(3).collect();
    let (nonces, commitments) = commit_all(&participants, &mut rng);
    assert_eq!(
        combiner.sign(MESSAGE, &commitments, &[]).unwrap_err(),
        Error::InsufficientShares
    );
    assert!(!combiner.check_signature_shares(MESSAGE, &commitments, &[]));
    for (signer, nonces) in participants.iter().zip(nonces) {
        assert_eq!(
            signer.sign(MESSAGE, nonces, &commitments).unwrap_err(),
            Error::InsufficientShares
        );
    }

    (
        MESSAGE.to_vec(),
        last.unwrap(),
        *public_key_package.verifying_key(),
    )
}

/// Checks that the signers and the combiner reject malformed commitment lists.
pub fn check_commitment_list_errors<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (_, signers, public_key_package) = deal::<C, _>(&mut rng);
    let combiner = Combiner::new(public_key_package).unwrap();
    let participants: Vec<&PeerSigner<C>> = signers.iter().take(4).collect();

    // Unsorted
    let (mut nonces, commitments) = commit_all(&participants, &mut rng);
    let mut reversed = commitments.clone();
    reversed.reverse();
    assert_eq!(
        participants[0]
            .sign(MESSAGE, nonces.remove(0), &reversed)
            .unwrap_err(),
        Error::UnsortedCommitments
    );
    assert_eq!(
        combiner.sign(MESSAGE, &reversed, &[]).unwrap_err(),
        Error::UnsortedCommitments
    );

    // Duplicated
    let duplicated = vec![commitments[0], commitments[0], commitments[1], commitments[2]];
    assert_eq!(
        participants[1]
            .sign(MESSAGE, nonces.remove(0), &duplicated)
            .unwrap_err(),
        Error::UnsortedCommitments
    );

    // Missing own commitment
    let (_, fifth) = signers[4].commit(&mut rng).unwrap();
    let mut others: Vec<_> = commitments
        .iter()
        .filter(|c| c.identifier() != participants[2].identifier())
        .copied()
        .chain([fifth])
        .collect();
    others.sort_by_key(|c| *c.identifier());
    assert_eq!(
        participants[2]
            .sign(MESSAGE, nonces.remove(0), &others)
            .unwrap_err(),
        Error::MissingCommitment
    );

    // Listed commitment does not match the nonces
    let (stale, _) = participants[3].commit(&mut rng).unwrap();
    assert_eq!(
        participants[3].sign(MESSAGE, stale, &commitments).unwrap_err(),
        Error::IncorrectCommitment
    );
    drop(nonces);

    // A signer outside the group
    let signer = PeerSigner::<C>::new(
        Identifier::try_from(9).unwrap(),
        SigningShare::new(<<C::Group as Group>::Field>::one()),
        *signers[0].verifying_key(),
        3,
        5,
    )
    .unwrap();
    let (outsider_nonces, outsider_commitments) = signer.commit(&mut rng).unwrap();
    let mut with_outsider = commitments.clone();
    with_outsider.push(outsider_commitments);
    let share = signer
        .sign(MESSAGE, outsider_nonces, &with_outsider)
        .unwrap();
    assert_eq!(
        combiner
            .verify_signature_share(MESSAGE, &with_outsider, &share)
            .unwrap_err(),
        Error::InvalidSignatureShare {
            culprit: *signer.identifier()
        }
    );
}

/// Checks that a commitment to the identity element is refused.
pub fn check_identity_commitment<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (_, signers, public_key_package) = deal::<C, _>(&mut rng);
    let combiner = Combiner::new(public_key_package).unwrap();
    let participants: Vec<&PeerSigner<C>> = signers.iter().take(4).collect();

    let (mut nonces, mut commitments) = commit_all(&participants, &mut rng);
    commitments[1] = SigningCommitments::new(
        *commitments[1].identifier(),
        NonceCommitment::new(<C::Group>::identity()),
        *commitments[1].binding(),
    );

    assert_eq!(
        participants[0]
            .sign(MESSAGE, nonces.remove(0), &commitments)
            .unwrap_err(),
        Error::IdentityCommitment
    );
    assert_eq!(
        combiner.sign(MESSAGE, &commitments, &[]).unwrap_err(),
        Error::IdentityCommitment
    );
}

/// Checks that invalid, missing and duplicated signature shares are caught by the combiner.
pub fn check_invalid_signature_shares<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (_, signers, public_key_package) = deal::<C, _>(&mut rng);
    let combiner = Combiner::new(public_key_package.clone()).unwrap();
    let participants: Vec<&PeerSigner<C>> = signers.iter().skip(1).collect();

    let (nonces, commitments) = commit_all(&participants, &mut rng);
    let shares = sign_all(&participants, nonces, &commitments, MESSAGE);

    let culprit = *shares[1].identifier();
    let mut tampered = shares.clone();
    tampered[1] = SignatureShare::new(
        culprit,
        tampered[1].to_scalar() + <<C::Group as Group>::Field>::one(),
    );

    assert!(!combiner.check_signature_shares(MESSAGE, &commitments, &tampered));
    assert_eq!(
        combiner
            .verify_signature_share(MESSAGE, &commitments, &tampered[1])
            .unwrap_err(),
        Error::InvalidSignatureShare { culprit }
    );
    assert_eq!(
        combiner
            .aggregate_verified(MESSAGE, &commitments, &tampered)
            .unwrap_err(),
        Error::InvalidSignatureShare { culprit }
    );

    // Aggregating without checking yields a signature that does not verify.
    let signature = combiner.sign(MESSAGE, &commitments, &tampered).unwrap();
    assert_eq!(
        quorum::verify(MESSAGE, &signature, public_key_package.verifying_key()),
        Err(Error::InvalidSignature)
    );

    assert_eq!(
        combiner
            .sign(MESSAGE, &commitments, &shares[1..])
            .unwrap_err(),
        Error::MissingSignatureShare
    );

    let mut duplicated = shares.clone();
    duplicated[0] = duplicated[1];
    assert_eq!(
        combiner
            .sign(MESSAGE, &commitments, &duplicated)
            .unwrap_err(),
        Error::DuplicatedIdentifier
    );

    // A share for a signer without a commitment
    let (_, first_commitments) = signers[0].commit(&mut rng).unwrap();
    let mut extra = shares.clone();
    extra.push(SignatureShare::new(
        *first_commitments.identifier(),
        <<C::Group as Group>::Field>::one(),
    ));
    assert_eq!(
        combiner.sign(MESSAGE, &commitments, &extra).unwrap_err(),
        Error::MissingCommitment
    );
}

/// Checks that a key share that does not match the dealer's commitment is rejected.
pub fn check_tampered_key_share<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (key_shares, signers, _) = deal::<C, _>(&mut rng);

    let key_share = &key_shares[2];
    let tampered = KeyShare::<C>::new(
        *key_share.identifier(),
        SigningShare::new(
            key_share.signing_share().to_scalar() + <<C::Group as Group>::Field>::one(),
        ),
        key_share.commitment().clone(),
        *key_share.max_signers(),
    );
    assert_eq!(tampered.verify().unwrap_err(), Error::InvalidSecretShare);
    assert_eq!(
        PeerSigner::try_from(tampered).unwrap_err(),
        Error::InvalidSecretShare
    );

    // A signer checked against someone else's commitment
    let (other_shares, _) = quorum::keys::generate_with_dealer::<C, _>(3, 5, &mut rng).unwrap();
    assert!(!signers[0].check_key_share(other_shares[0].commitment()));
}

/// Checks that protocol state compares by value: rebuilding a signer from its key share
/// yields an equal signer, and distinct participants differ.
pub fn check_state_equality<C: Ciphersuite + Eq, R: RngCore + CryptoRng>(mut rng: R) {
    fn assert_total_eq<T: Eq>(_: &T) {}

    let (key_shares, signers, public_key_package) = deal::<C, _>(&mut rng);

    assert_total_eq(&key_shares[0]);
    assert_total_eq(&signers[0]);
    assert_total_eq(&public_key_package);

    let rebuilt = PeerSigner::try_from(key_shares[0].clone()).unwrap();
    assert_eq!(rebuilt, signers[0]);
    assert_ne!(signers[0], signers[1]);
    assert_eq!(public_key_package.clone(), public_key_package);
    assert_eq!(key_shares[1].signing_share(), signers[1].signing_share());

    let (nonces, commitments) = signers[0].commit(&mut rng).unwrap();
    assert_total_eq(&nonces);
    assert_eq!(commitments, commitments.clone());
    let (_, other_commitments) = signers[0].commit(&mut rng).unwrap();
    assert_ne!(commitments, other_commitments);
}

/// Checks recovering the group key from key shares.
pub fn check_reconstruct<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let secret = SigningKey::<C>::new(&mut rng);
    let (key_shares, public_key_package) =
        quorum::keys::split(&secret, 3, 5, &mut rng).unwrap();
    assert_eq!(
        public_key_package.verifying_key(),
        &VerifyingKey::from(&secret)
    );

    let recovered = quorum::keys::reconstruct::<C>(&key_shares[1..]).unwrap();
    assert_eq!(recovered.serialize(), secret.serialize());
    let recovered = quorum::keys::reconstruct::<C>(&key_shares).unwrap();
    assert_eq!(recovered.serialize(), secret.serialize());

    assert_eq!(
        quorum::keys::reconstruct::<C>(&[]).unwrap_err(),
        Error::Threshold
    );
    assert_eq!(
        quorum::keys::reconstruct::<C>(&key_shares[..3]).unwrap_err(),
        Error::Threshold
    );

    let mut duplicated = key_shares[..4].to_vec();
    duplicated[0] = duplicated[1].clone();
    assert_eq!(
        quorum::keys::reconstruct::<C>(&duplicated).unwrap_err(),
        Error::DuplicatedIdentifier
    );
}

/// Checks single-party Schnorr signing and verification with the suite.
pub fn check_schnorr_sign<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let signing_key = SigningKey::<C>::new(&mut rng);
    let verifying_key = VerifyingKey::from(&signing_key);

    let signature = signing_key.sign(&mut rng, MESSAGE).unwrap();
    verifying_key.verify(MESSAGE, &signature).unwrap();

    let bytes = signature.serialize().unwrap();
    let decoded = Signature::<C>::deserialize(bytes.as_ref()).unwrap();
    assert_eq!(decoded, signature);
    verifying_key.verify(MESSAGE, &decoded).unwrap();

    assert_eq!(
        verifying_key.verify(b"other message", &signature),
        Err(Error::InvalidSignature)
    );
    let other_key = VerifyingKey::from(&SigningKey::<C>::new(&mut rng));
    assert_eq!(
        other_key.verify(MESSAGE, &signature),
        Err(Error::InvalidSignature)
    );

    assert_eq!(
        Signature::<C>::deserialize(&bytes.as_ref()[1..]).unwrap_err(),
        Error::MalformedSignature
    );

    let key_bytes = verifying_key.serialize().unwrap();
    assert_eq!(
        VerifyingKey::<C>::deserialize(&key_bytes).unwrap(),
        verifying_key
    );
}

/// Checks that nonces drawn for the same signer are pairwise distinct and look independent:
/// the average fraction of differing bits between consecutive nonces is close to one half.
pub fn check_nonce_independence<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (_, signers, _) = deal::<C, _>(&mut rng);
    let signer = &signers[0];

    let mut encodings = Vec::new();
    let mut seen = BTreeSet::new();
    for _ in 0..64 {
        let (nonces, commitments) = signer.commit(&mut rng).unwrap();
        for nonce in [&nonces.hiding, &nonces.binding] {
            let bytes = <<C::Group as Group>::Field>::serialize(&nonce.to_scalar())
                .as_ref()
                .to_vec();
            assert!(seen.insert(bytes.clone()), "repeated nonce");
            encodings.push(bytes);
        }
        assert_ne!(commitments.hiding(), commitments.binding());
    }

    let bits = (encodings[0].len() * 8) as f64;
    let fractions: Vec<f64> = encodings
        .windows(2)
        .map(|pair| {
            let differing: u32 = pair[0]
                .iter()
                .zip(&pair[1])
                .map(|(a, b)| (a ^ b).count_ones())
                .sum();
            differing as f64 / bits
        })
        .collect();
    let average = fractions.iter().sum::<f64>() / fractions.len() as f64;
    assert!(
        (0.35..0.65).contains(&average),
        "average Hamming fraction {average}"
    );
}

/// Checks the fixed-width encodings of the round messages.
pub fn check_round_message_encodings<C: Ciphersuite, R: RngCore + CryptoRng>(mut rng: R) {
    let (_, signers, _) = deal::<C, _>(&mut rng);
    let participants: Vec<&PeerSigner<C>> = signers.iter().take(4).collect();
    let (nonces, commitments) = commit_all(&participants, &mut rng);

    let bytes = commitments[0].serialize().unwrap();
    assert_eq!(&bytes[..2], &commitments[0].identifier().serialize());
    assert_eq!(
        SigningCommitments::<C>::deserialize(&bytes).unwrap(),
        commitments[0]
    );
    assert_eq!(
        SigningCommitments::<C>::deserialize(&bytes[1..]).unwrap_err(),
        Error::MalformedCommitments
    );

    let shares = sign_all(&participants, nonces, &commitments, MESSAGE);
    let bytes = shares[0].serialize();
    assert_eq!(SignatureShare::<C>::deserialize(&bytes).unwrap(), shares[0]);
    assert_eq!(
        SignatureShare::<C>::deserialize(&[0x01]).unwrap_err(),
        Error::MalformedIdentifier
    );
}

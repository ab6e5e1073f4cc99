//! Ciphersuite-generic benchmark functions.
#![allow(clippy::unwrap_used)]

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput};
use rand_core::{CryptoRng, RngCore};

use crate as quorum;
use crate::{
    tests::ciphersuite_generic::{commit_all, sign_all},
    Ciphersuite, Combiner, Group, PeerSigner, SigningKey, VerifyingKey,
};

/// Benchmark hashing to the group and to the scalar field.
pub fn bench_hash_to_group<G: Group>(c: &mut Criterion, name: &str) {
    let mut group = c.benchmark_group(format!("Hash to group {name}"));
    let dst = b"QUORUM-BENCH-hash-to-group";

    for &len in [32usize, 1024].iter() {
        let msg = vec![0x5au8; len];
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::new("hash_to_element", len), &msg, |b, msg| {
            b.iter(|| G::hash_to_element(msg, dst).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("hash_to_scalar", len), &msg, |b, msg| {
            b.iter(|| G::hash_to_scalar(msg, dst).unwrap())
        });
    }
    group.finish();
}

/// Benchmark single-party Schnorr signing and verification.
pub fn bench_schnorr<C: Ciphersuite, R: RngCore + CryptoRng + Clone>(
    c: &mut Criterion,
    name: &str,
    rng: &mut R,
) {
    let mut group = c.benchmark_group(format!("Schnorr {name}"));
    let msg = b"Bench";

    let sk = SigningKey::<C>::new(rng);
    let vk = VerifyingKey::from(&sk);
    let sig = sk.sign(&mut *rng, msg).unwrap();

    group.bench_function("Sign", |b| {
        let mut rng = rng.clone();
        b.iter(|| sk.sign(&mut rng, msg).unwrap())
    });
    group.bench_function("Verify", |b| b.iter(|| vk.verify(msg, &sig).unwrap()));
    group.finish();
}

/// Benchmark FROST signing with the specified ciphersuite.
pub fn bench_sign<C: Ciphersuite, R: RngCore + CryptoRng + Clone>(
    c: &mut Criterion,
    name: &str,
    rng: &mut R,
) {
    let mut group = c.benchmark_group(format!("FROST Signing {name}"));
    for &n in [3u16, 10, 100].iter() {
        let max_signers = n;
        let threshold = (n * 2) / 3;

        group.bench_with_input(
            BenchmarkId::new("Key Generation with Dealer", max_signers),
            &(threshold, max_signers),
            |b, (threshold, max_signers)| {
                let mut rng = rng.clone();
                b.iter(|| {
                    quorum::keys::generate_with_dealer::<C, R>(*threshold, *max_signers, &mut rng)
                        .unwrap();
                })
            },
        );

        let (key_shares, public_key_package) =
            quorum::keys::generate_with_dealer::<C, R>(threshold, max_signers, rng).unwrap();

        // Verifies the secret shares from the dealer
        let signers: Vec<PeerSigner<C>> = key_shares
            .into_iter()
            .map(|k| PeerSigner::try_from(k).unwrap())
            .collect();
        let participants: Vec<&PeerSigner<C>> =
            signers.iter().take(threshold as usize + 1).collect();

        group.bench_with_input(
            BenchmarkId::new("Round 1", threshold + 1),
            &signers[0],
            |b, signer| {
                let mut rng = rng.clone();
                b.iter(|| signer.commit(&mut rng).unwrap())
            },
        );

        let (nonces, commitments) = commit_all(&participants, rng);
        let message = b"message to sign";

        group.bench_function(BenchmarkId::new("Round 2", threshold + 1), |b| {
            let mut rng = rng.clone();
            b.iter_batched(
                || commit_all(&participants, &mut rng),
                |(mut nonces, commitments)| {
                    participants[0]
                        .sign(message, nonces.remove(0), &commitments)
                        .unwrap()
                },
                BatchSize::SmallInput,
            )
        });

        let shares = sign_all(&participants, nonces, &commitments, message);
        let combiner = Combiner::new(public_key_package).unwrap();

        group.bench_with_input(
            BenchmarkId::new("Check Signature Shares", threshold + 1),
            &(&commitments, &shares),
            |b, (commitments, shares)| {
                b.iter(|| combiner.check_signature_shares(message, commitments, shares))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("Aggregate", threshold + 1),
            &(&commitments, &shares),
            |b, (commitments, shares)| {
                b.iter(|| combiner.sign(message, commitments, shares).unwrap())
            },
        );
    }
    group.finish();
}

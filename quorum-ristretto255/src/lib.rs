#![allow(non_snake_case)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![doc = document_features::document_features!()]

use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_POINT,
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
    traits::Identity,
};
use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha512};

use quorum_core::{ExpandError, Expander, ExpanderMd, GroupId};


pub use quorum_core::{
    self as quorum, Ciphersuite, Error, Field, FieldError, Group, GroupError, Identifier,
};

/// The order of the Ristretto255 group, `2^252 + 27742317777372353535851937790883648493`,
/// big-endian.
const ORDER: [u8; 32] = [
    0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x14, 0xde, 0xf9, 0xde, 0xa2, 0xf7, 0x9c, 0xd6, 0x58, 0x12, 0x63, 0x1a, 0x5c, 0xf5, 0xd3, 0xed,
];

#[derive(Clone, Copy)]
/// An implementation of the Ristretto255 scalar field.
pub struct RistrettoScalarField;

impl Field for RistrettoScalarField {
    type Scalar = Scalar;

    type Serialization = [u8; 32];

    const BITS: usize = 253;

    fn zero() -> Self::Scalar {
        Scalar::ZERO
    }

    fn one() -> Self::Scalar {
        Scalar::ONE
    }

    fn from_u64(value: u64) -> Self::Scalar {
        Scalar::from(value)
    }

    fn invert(scalar: &Self::Scalar) -> Result<Self::Scalar, FieldError> {
        // [`curve25519_dalek::scalar::Scalar`]'s Eq/PartialEq does a constant-time comparison using
        // `ConstantTimeEq`
        if *scalar == <Self as Field>::zero() {
            Err(FieldError::InvalidZeroScalar)
        } else {
            Ok(scalar.invert())
        }
    }

    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Scalar {
        Scalar::random(rng)
    }

    fn serialize(scalar: &Self::Scalar) -> Self::Serialization {
        scalar.to_bytes()
    }

    fn deserialize(buf: &Self::Serialization) -> Result<Self::Scalar, FieldError> {
        Option::from(Scalar::from_canonical_bytes(*buf)).ok_or(FieldError::MalformedScalar)
    }

    fn little_endian_serialize(scalar: &Self::Scalar) -> Self::Serialization {
        Self::serialize(scalar)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// An implementation of the Ristretto255 group, hashed into with
/// `ristretto255_XMD:SHA-512_R255MAP_RO_`.
pub struct RistrettoGroup;

impl Group for RistrettoGroup {
    type Field = RistrettoScalarField;

    type Element = RistrettoPoint;

    /// The canonical 32-byte encoding. The identity encodes as all zeros.
    type Serialization = [u8; 32];

    /// Ristretto255 has a single encoding.
    type UncompressedSerialization = [u8; 32];

    type Expander = ExpanderMd<Sha512>;

    const ID: GroupId = GroupId::Ristretto255;

    const SECURITY_BITS: usize = 128;

    fn identity() -> Self::Element {
        RistrettoPoint::identity()
    }

    fn generator() -> Self::Element {
        RISTRETTO_BASEPOINT_POINT
    }

    fn order() -> &'static [u8] {
        &ORDER
    }

    fn mul_base(scalar: &Scalar) -> Self::Element {
        RistrettoPoint::mul_base(scalar)
    }

    fn expander(dst: &[u8]) -> Result<Self::Expander, ExpandError> {
        ExpanderMd::new(dst)
    }

    fn hash_to_element(msg: &[u8], dst: &[u8]) -> Result<Self::Element, ExpandError> {
        let uniform_bytes: [u8; 64] = Self::expander(dst)?
            .expand(msg, 64)?
            .try_into()
            .map_err(|_| ExpandError::InvalidLength)?;
        Ok(RistrettoPoint::from_uniform_bytes(&uniform_bytes))
    }

    fn serialize(element: &Self::Element) -> Result<Self::Serialization, GroupError> {
        Ok(element.compress().to_bytes())
    }

    fn deserialize(buf: &Self::Serialization) -> Result<Self::Element, GroupError> {
        // Decompression rejects every non-canonical encoding.
        CompressedRistretto(*buf)
            .decompress()
            .ok_or(GroupError::MalformedElement)
    }

    fn serialize_uncompressed(
        element: &Self::Element,
    ) -> Result<Self::UncompressedSerialization, GroupError> {
        Self::serialize(element)
    }

    fn deserialize_uncompressed(
        buf: &Self::UncompressedSerialization,
    ) -> Result<Self::Element, GroupError> {
        Self::deserialize(buf)
    }
}

/// Context string of the FROST(ristretto255, SHA-512) ciphersuite, prefixed to every hash
/// label.
const CONTEXT_STRING: &str = "FROST-RISTRETTO255-SHA512-v1";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// An implementation of the FROST(ristretto255, SHA-512) ciphersuite.
pub struct Ristretto255Sha512;

impl Ciphersuite for Ristretto255Sha512 {
    const ID: &'static str = CONTEXT_STRING;

    type Group = RistrettoGroup;

    type HashOutput = [u8; 64];

    type SignatureSerialization = [u8; 64];

    /// H3 for FROST(ristretto255, SHA-512)
    fn H3(m: &[u8]) -> Self::HashOutput {
        Sha512::new()
            .chain_update(CONTEXT_STRING.as_bytes())
            .chain_update(b"digest")
            .chain_update(m)
            .finalize()
            .into()
    }
}

type R = Ristretto255Sha512;

/// A FROST(ristretto255, SHA-512) signing key.
pub type SigningKey = quorum_core::SigningKey<R>;

/// A FROST(ristretto255, SHA-512) verifying key.
pub type VerifyingKey = quorum_core::VerifyingKey<R>;

/// A FROST(ristretto255, SHA-512) Schnorr signature.
pub type Signature = quorum_core::Signature<R>;

/// A FROST(ristretto255, SHA-512) signer holding a verified key share.
pub type PeerSigner = quorum_core::PeerSigner<R>;

/// A FROST(ristretto255, SHA-512) combiner.
pub type Combiner = quorum_core::Combiner<R>;

/// FROST(ristretto255, SHA-512) keys, key generation, key shares.
pub mod keys {
    use super::*;

    /// Allows all participants' keys to be generated using a central, trusted dealer.
    pub fn generate_with_dealer<RNG: RngCore + CryptoRng>(
        threshold: u16,
        max_signers: u16,
        rng: &mut RNG,
    ) -> Result<(Vec<KeyShare>, PublicKeyPackage), Error> {
        quorum_core::keys::generate_with_dealer(threshold, max_signers, rng)
    }

    /// Splits an existing key into FROST shares.
    pub fn split<RNG: RngCore + CryptoRng>(
        key: &SigningKey,
        threshold: u16,
        max_signers: u16,
        rng: &mut RNG,
    ) -> Result<(Vec<KeyShare>, PublicKeyPackage), Error> {
        quorum_core::keys::split(key, threshold, max_signers, rng)
    }

    /// Recovers the group signing key from more than `threshold` key shares.
    pub fn reconstruct(key_shares: &[KeyShare]) -> Result<SigningKey, Error> {
        quorum_core::keys::reconstruct(key_shares)
    }

    /// A participant's secret signing share.
    pub type SigningShare = quorum_core::keys::SigningShare<R>;

    /// A participant's public verifying share.
    pub type VerifyingShare = quorum_core::keys::VerifyingShare<R>;

    /// The key share a dealer sends to one participant.
    pub type KeyShare = quorum_core::keys::KeyShare<R>;

    /// Public data that contains all the signers' verifying shares as well as the group
    /// verifying key.
    pub type PublicKeyPackage = quorum_core::keys::PublicKeyPackage<R>;
}

/// FROST(ristretto255, SHA-512) Round 1 functionality and types.
pub mod round1 {
    use super::*;

    use super::keys::SigningShare;

    /// Comprised of FROST(ristretto255, SHA-512) hiding and binding nonces.
    ///
    /// Note that [`SigningNonces`] must be used *only once* for a signing operation;
    /// re-using nonces will result in leakage of a signer's long-lived signing key.
    pub type SigningNonces = quorum_core::round1::SigningNonces<R>;

    /// Published by each participant in the first round of the signing protocol.
    pub type SigningCommitments = quorum_core::round1::SigningCommitments<R>;

    /// A commitment to a single signing nonce.
    pub type NonceCommitment = quorum_core::round1::NonceCommitment<R>;

    /// Performed once by each participant selected for the signing operation.
    pub fn commit<RNG>(
        identifier: Identifier,
        secret: &SigningShare,
        rng: &mut RNG,
    ) -> Result<(SigningNonces, SigningCommitments), Error>
    where
        RNG: CryptoRng + RngCore,
    {
        quorum_core::round1::commit::<R, RNG>(identifier, secret, rng)
    }
}

/// FROST(ristretto255, SHA-512) Round 2 functionality and types.
pub mod round2 {
    use super::*;

    use super::round1::{SigningCommitments, SigningNonces};

    /// A FROST(ristretto255, SHA-512) participant's signature share.
    pub type SignatureShare = quorum_core::round2::SignatureShare<R>;

    /// Performed once by each participant selected for the signing operation.
    pub fn sign(
        message: &[u8],
        signer_nonces: SigningNonces,
        signing_commitments: &[SigningCommitments],
        signer: &PeerSigner,
    ) -> Result<SignatureShare, Error> {
        quorum_core::round2::sign(message, signer_nonces, signing_commitments, signer)
    }
}

/// Verifies a FROST(ristretto255, SHA-512) signature against the group verifying key.
pub fn verify(
    message: &[u8],
    signature: &Signature,
    verifying_key: &VerifyingKey,
) -> Result<(), Error> {
    quorum_core::verify(message, signature, verifying_key)
}

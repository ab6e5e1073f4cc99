#![allow(non_snake_case)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![doc = document_features::document_features!()]

use p256::{
    elliptic_curve::{
        hash2curve::{ExpandMsgXmd, GroupDigest},
        sec1::{FromEncodedPoint, ToEncodedPoint},
        Field as FFField, PrimeField,
    },
    AffinePoint, EncodedPoint, FieldBytes, NistP256, ProjectivePoint, Scalar,
};
use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};

use quorum_core::{ExpandError, ExpanderMd, GroupId};


pub use quorum_core::{
    self as quorum, Ciphersuite, Error, Field, FieldError, Group, GroupError, Identifier,
};

/// The order of the P-256 scalar field, big-endian.
const ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xbc, 0xe6, 0xfa, 0xad, 0xa7, 0x17, 0x9e, 0x84, 0xf3, 0xb9, 0xca, 0xc2, 0xfc, 0x63, 0x25, 0x51,
];

#[derive(Clone, Copy)]
/// An implementation of the P-256 scalar field.
pub struct P256ScalarField;

impl Field for P256ScalarField {
    type Scalar = Scalar;

    type Serialization = [u8; 32];

    const BITS: usize = 256;

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
        // [`p256::Scalar`]'s Eq/PartialEq does a constant-time comparison
        Option::from(scalar.invert()).ok_or(FieldError::InvalidZeroScalar)
    }

    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Scalar {
        <Scalar as FFField>::random(rng)
    }

    fn serialize(scalar: &Self::Scalar) -> Self::Serialization {
        scalar.to_bytes().into()
    }

    fn deserialize(buf: &Self::Serialization) -> Result<Self::Scalar, FieldError> {
        let field_bytes = FieldBytes::from(*buf);
        Option::from(Scalar::from_repr(field_bytes)).ok_or(FieldError::MalformedScalar)
    }

    fn little_endian_serialize(scalar: &Self::Scalar) -> Self::Serialization {
        let mut array = Self::serialize(scalar);
        array.reverse();
        array
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// An implementation of the NIST P-256 group, hashed into with
/// `P256_XMD:SHA-256_SSWU_RO_`.
pub struct P256Group;

impl Group for P256Group {
    type Field = P256ScalarField;

    type Element = ProjectivePoint;

    /// [SEC 1][1] serialization of a compressed point in P-256 takes 33 bytes
    /// (1-byte prefix and 32 bytes for the coordinate).
    ///
    /// The identity is encoded as a single null byte in SEC 1, which does not fit this fixed
    /// width, so it is not serializable here.
    ///
    /// [1]: https://secg.org/sec1-v2.pdf
    type Serialization = [u8; 33];

    /// SEC 1 uncompressed serialization: the `0x04` prefix and both coordinates.
    type UncompressedSerialization = [u8; 65];

    type Expander = ExpanderMd<Sha256>;

    const ID: GroupId = GroupId::P256;

    const SECURITY_BITS: usize = 128;

    fn identity() -> Self::Element {
        ProjectivePoint::IDENTITY
    }

    fn generator() -> Self::Element {
        ProjectivePoint::GENERATOR
    }

    fn order() -> &'static [u8] {
        &ORDER
    }

    fn expander(dst: &[u8]) -> Result<Self::Expander, ExpandError> {
        ExpanderMd::new(dst)
    }

    fn hash_to_element(msg: &[u8], dst: &[u8]) -> Result<Self::Element, ExpandError> {
        if dst.is_empty() {
            return Err(ExpandError::EmptyDst);
        }
        NistP256::hash_from_bytes::<ExpandMsgXmd<Sha256>>(&[msg], &[dst])
            .map_err(|_| ExpandError::InvalidLength)
    }

    fn serialize(element: &Self::Element) -> Result<Self::Serialization, GroupError> {
        if *element == Self::identity() {
            return Err(GroupError::InvalidIdentityElement);
        }
        element
            .to_affine()
            .to_encoded_point(true)
            .as_bytes()
            .try_into()
            .map_err(|_| GroupError::MalformedElement)
    }

    fn deserialize(buf: &Self::Serialization) -> Result<Self::Element, GroupError> {
        decode_point(buf)
    }

    fn serialize_uncompressed(
        element: &Self::Element,
    ) -> Result<Self::UncompressedSerialization, GroupError> {
        if *element == Self::identity() {
            return Err(GroupError::InvalidIdentityElement);
        }
        element
            .to_affine()
            .to_encoded_point(false)
            .as_bytes()
            .try_into()
            .map_err(|_| GroupError::MalformedElement)
    }

    fn deserialize_uncompressed(
        buf: &Self::UncompressedSerialization,
    ) -> Result<Self::Element, GroupError> {
        decode_point(buf)
    }
}

/// Decodes a SEC 1 point, rejecting the identity.
fn decode_point(buf: &[u8]) -> Result<ProjectivePoint, GroupError> {
    let encoded_point = EncodedPoint::from_bytes(buf).map_err(|_| GroupError::MalformedElement)?;

    match Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded_point)) {
        Some(point) => {
            if point.is_identity().into() {
                // The identity is a single byte in SEC 1, so a fixed-width buffer never
                // decodes to it; the check is kept for consistency.
                Err(GroupError::InvalidIdentityElement)
            } else {
                Ok(ProjectivePoint::from(point))
            }
        }
        None => Err(GroupError::MalformedElement),
    }
}

/// Context string of the FROST(P-256, SHA-256) ciphersuite, prefixed to every hash label.
const CONTEXT_STRING: &str = "FROST-P256-SHA256-v1";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// An implementation of the FROST(P-256, SHA-256) ciphersuite.
pub struct P256Sha256;

impl Ciphersuite for P256Sha256 {
    const ID: &'static str = CONTEXT_STRING;

    type Group = P256Group;

    type HashOutput = [u8; 32];

    type SignatureSerialization = [u8; 65];

    /// H3 for FROST(P-256, SHA-256): SHA-256 over the context string, the `digest` label and
    /// the message.
    fn H3(m: &[u8]) -> Self::HashOutput {
        Sha256::new()
            .chain_update(CONTEXT_STRING.as_bytes())
            .chain_update(b"digest")
            .chain_update(m)
            .finalize()
            .into()
    }
}

// Shorthand alias for the ciphersuite
type S = P256Sha256;

/// A FROST(P-256, SHA-256) signing key, for single-party Schnorr signatures or as the secret
/// a dealer splits.
pub type SigningKey = quorum_core::SigningKey<S>;

/// A FROST(P-256, SHA-256) verifying key, for both threshold and single-party signatures.
pub type VerifyingKey = quorum_core::VerifyingKey<S>;

/// A FROST(P-256, SHA-256) Schnorr signature.
pub type Signature = quorum_core::Signature<S>;

/// A FROST(P-256, SHA-256) signer holding a verified key share.
pub type PeerSigner = quorum_core::PeerSigner<S>;

/// A FROST(P-256, SHA-256) combiner, which checks and aggregates signature shares.
pub type Combiner = quorum_core::Combiner<S>;

/// FROST(P-256, SHA-256) keys, key generation, key shares.
pub mod keys {
    use super::*;

    /// Allows all participants' keys to be generated using a central, trusted dealer.
    ///
    /// `threshold` is the degree of the sharing polynomial: signing needs `threshold + 1`
    /// signers out of `max_signers`.
    pub fn generate_with_dealer<R: RngCore + CryptoRng>(
        threshold: u16,
        max_signers: u16,
        rng: &mut R,
    ) -> Result<(Vec<KeyShare>, PublicKeyPackage), Error> {
        quorum_core::keys::generate_with_dealer(threshold, max_signers, rng)
    }

    /// Splits an existing key into FROST shares.
    pub fn split<R: RngCore + CryptoRng>(
        key: &SigningKey,
        threshold: u16,
        max_signers: u16,
        rng: &mut R,
    ) -> Result<(Vec<KeyShare>, PublicKeyPackage), Error> {
        quorum_core::keys::split(key, threshold, max_signers, rng)
    }

    /// Recovers the group signing key from more than `threshold` key shares.
    pub fn reconstruct(key_shares: &[KeyShare]) -> Result<SigningKey, Error> {
        quorum_core::keys::reconstruct(key_shares)
    }

    /// A participant's secret signing share.
    pub type SigningShare = quorum_core::keys::SigningShare<S>;

    /// A participant's public verifying share.
    pub type VerifyingShare = quorum_core::keys::VerifyingShare<S>;

    /// The key share a dealer sends to one participant, with the Feldman commitment to check
    /// it against.
    pub type KeyShare = quorum_core::keys::KeyShare<S>;

    /// Public data that contains all the signers' verifying shares as well as the group
    /// verifying key.
    pub type PublicKeyPackage = quorum_core::keys::PublicKeyPackage<S>;
}

/// FROST(P-256, SHA-256) Round 1 functionality and types.
pub mod round1 {
    use super::*;

    use super::keys::SigningShare;

    /// Comprised of FROST(P-256, SHA-256) hiding and binding nonces.
    ///
    /// Note that [`SigningNonces`] must be used *only once* for a signing operation;
    /// re-using nonces will result in leakage of a signer's long-lived signing key.
    pub type SigningNonces = quorum_core::round1::SigningNonces<S>;

    /// Published by each participant in the first round of the signing protocol.
    pub type SigningCommitments = quorum_core::round1::SigningCommitments<S>;

    /// A commitment to a single signing nonce.
    pub type NonceCommitment = quorum_core::round1::NonceCommitment<S>;

    /// Performed once by each participant selected for the signing operation.
    ///
    /// Generates the signing nonces and commitments to be used in the signing operation.
    pub fn commit<R>(
        identifier: Identifier,
        secret: &SigningShare,
        rng: &mut R,
    ) -> Result<(SigningNonces, SigningCommitments), Error>
    where
        R: CryptoRng + RngCore,
    {
        quorum_core::round1::commit::<S, R>(identifier, secret, rng)
    }
}

/// FROST(P-256, SHA-256) Round 2 functionality and types, for signature share generation.
pub mod round2 {
    use super::*;

    use super::round1::{SigningCommitments, SigningNonces};

    /// A FROST(P-256, SHA-256) participant's signature share, which the combiner will
    /// aggregate with all other signers' shares into the group signature.
    pub type SignatureShare = quorum_core::round2::SignatureShare<S>;

    /// Performed once by each participant selected for the signing operation.
    ///
    /// Receives the message to be signed, the signer's nonces and the sorted list of every
    /// signer's commitments, and produces this signer's share.
    pub fn sign(
        message: &[u8],
        signer_nonces: SigningNonces,
        signing_commitments: &[SigningCommitments],
        signer: &PeerSigner,
    ) -> Result<SignatureShare, Error> {
        quorum_core::round2::sign(message, signer_nonces, signing_commitments, signer)
    }
}

/// Verifies a FROST(P-256, SHA-256) signature against the group verifying key.
pub fn verify(
    message: &[u8],
    signature: &Signature,
    verifying_key: &VerifyingKey,
) -> Result<(), Error> {
    quorum_core::verify(message, signature, verifying_key)
}

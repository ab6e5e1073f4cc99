#![allow(non_snake_case)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![doc = document_features::document_features!()]

use core::fmt::{self, Debug};

use rand_core::{CryptoRng, RngCore};

#[cfg(feature = "test-impl")]
pub mod benches;
pub mod combiner;
mod error;
pub mod expander;
pub mod hash_to_field;
mod identifier;
pub mod keys;
pub mod round1;
pub mod round2;
mod scalar_mul;
pub mod secret_sharing;
mod serialization;
mod signature;
pub mod signer;
mod signing_key;
mod traits;
mod verifying_key;

pub use combiner::Combiner;
pub use error::{Error, ExpandError, FieldError, GroupError};
pub use expander::{Expander, ExpanderMd, ExpanderXof};
pub use identifier::Identifier;
pub use signature::Signature;
pub use signer::PeerSigner;
pub use signing_key::SigningKey;
pub use traits::{Ciphersuite, Element, Field, Group, GroupId, GroupScalar, Scalar};
pub use verifying_key::VerifyingKey;

// Re-exports in our public API
pub use rand_core;
#[cfg(feature = "serde")]
pub use serde;

use crate::{
    round1::{encode_group_commitments, SigningCommitments},
    secret_sharing::lagrange_coefficient,
};

/// Generates a random nonzero scalar.
///
/// It assumes that the Scalar Eq/PartialEq implementation is constant-time.
pub(crate) fn random_nonzero<G: Group, R: RngCore + CryptoRng>(rng: &mut R) -> GroupScalar<G> {
    loop {
        let scalar = <G::Field>::random(rng);

        if scalar != <G::Field>::zero() {
            return scalar;
        }
    }
}

/// A type refinement for the scalar field element representing the per-message _[challenge]_.
///
/// [challenge]: https://datatracker.ietf.org/doc/html/rfc9591#name-signature-challenge-computa
#[derive(Copy, Clone)]
pub struct Challenge<C: Ciphersuite>(pub(crate) Scalar<C>);

impl<C> Challenge<C>
where
    C: Ciphersuite,
{
    /// Creates a challenge from a scalar.
    #[cfg_attr(feature = "internals", visibility::make(pub))]
    #[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
    #[allow(dead_code)]
    pub(crate) fn from_scalar(scalar: Scalar<C>) -> Self {
        Self(scalar)
    }

    /// Return the underlying scalar.
    #[cfg_attr(feature = "internals", visibility::make(pub))]
    #[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
    pub(crate) fn to_scalar(self) -> Scalar<C> {
        self.0
    }
}

impl<C> Debug for Challenge<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Challenge")
            .field(&hex::encode(<<C::Group as Group>::Field>::serialize(
                &self.0,
            )))
            .finish()
    }
}

/// Generates the challenge as is required for Schnorr signatures:
/// `H2(serialize(R) || serialize(PK) || msg)`.
///
/// Deals in bytes, so that FROST and singleton signing and verification can use it with
/// different types.
#[cfg_attr(feature = "internals", visibility::make(pub))]
#[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
pub(crate) fn challenge<C>(
    R: &Element<C>,
    verifying_key: &VerifyingKey<C>,
    msg: &[u8],
) -> Result<Challenge<C>, Error>
where
    C: Ciphersuite,
{
    let mut preimage = Vec::new();

    preimage.extend_from_slice(<C::Group>::serialize(R)?.as_ref());
    preimage.extend_from_slice(<C::Group>::serialize(&verifying_key.to_element())?.as_ref());
    preimage.extend_from_slice(msg);

    Ok(Challenge(C::H2(&preimage[..])?))
}

/// The binding factor, also known as _rho_ (ρ).
///
/// Binds every signature share to the full set of commitments and to the message.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BindingFactor<C: Ciphersuite>(pub(crate) Scalar<C>);

impl<C> BindingFactor<C>
where
    C: Ciphersuite,
{
    /// Serializes [`BindingFactor`] to bytes.
    pub fn serialize(&self) -> Vec<u8> {
        <<C::Group as Group>::Field>::serialize(&self.0)
            .as_ref()
            .to_vec()
    }
}

impl<C> Debug for BindingFactor<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("BindingFactor")
            .field(&hex::encode(self.serialize()))
            .finish()
    }
}

/// Computes `H1(encode(commitments) || H3(message))`.
#[cfg_attr(feature = "internals", visibility::make(pub))]
#[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
pub(crate) fn compute_binding_factor<C: Ciphersuite>(
    signing_commitments: &[SigningCommitments<C>],
    message: &[u8],
) -> Result<BindingFactor<C>, Error> {
    let mut preimage = encode_group_commitments(signing_commitments)?;
    preimage.extend_from_slice(C::H3(message).as_ref());

    Ok(BindingFactor(C::H1(&preimage[..])?))
}

/// The product of all signers' individual commitments, published as part of the final
/// signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct GroupCommitment<C: Ciphersuite>(pub(crate) Element<C>);

impl<C> GroupCommitment<C>
where
    C: Ciphersuite,
{
    /// Return the underlying element.
    pub fn to_element(self) -> Element<C> {
        self.0
    }
}

impl<C> Debug for GroupCommitment<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("GroupCommitment")
            .field(
                &<C::Group>::serialize(&self.0)
                    .map(|s| hex::encode(s.as_ref()))
                    .unwrap_or("<invalid>".to_string()),
            )
            .finish()
    }
}

/// Computes `R = sum_i hiding_i + rho * sum_i binding_i`.
///
/// Fails with [`Error::IdentityCommitment`] if any nonce commitment is the identity.
#[cfg_attr(feature = "internals", visibility::make(pub))]
#[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
pub(crate) fn compute_group_commitment<C: Ciphersuite>(
    signing_commitments: &[SigningCommitments<C>],
    binding_factor: &BindingFactor<C>,
) -> Result<GroupCommitment<C>, Error> {
    let identity = <C::Group>::identity();

    let mut hiding_sum = identity;
    let mut binding_sum = identity;
    for commitment in signing_commitments {
        let hiding = commitment.hiding.value();
        let binding = commitment.binding.value();
        if hiding == identity || binding == identity {
            return Err(Error::IdentityCommitment);
        }
        hiding_sum = hiding_sum + hiding;
        binding_sum = binding_sum + binding;
    }

    Ok(GroupCommitment(hiding_sum + binding_sum * binding_factor.0))
}

/// Checks that commitments are sorted by strictly ascending identifier and that no nonce
/// commitment is the identity.
pub(crate) fn validate_signing_commitments<C: Ciphersuite>(
    signing_commitments: &[SigningCommitments<C>],
) -> Result<(), Error> {
    if !signing_commitments
        .windows(2)
        .all(|pair| pair[0].identifier < pair[1].identifier)
    {
        return Err(Error::UnsortedCommitments);
    }

    let identity = <C::Group>::identity();
    if signing_commitments
        .iter()
        .any(|c| c.hiding.value() == identity || c.binding.value() == identity)
    {
        return Err(Error::IdentityCommitment);
    }

    Ok(())
}

/// Generates the Lagrange coefficient of `signer_id` over the identifiers of the (sorted)
/// signing commitments.
#[cfg_attr(feature = "internals", visibility::make(pub))]
#[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
pub(crate) fn derive_interpolating_value<C: Ciphersuite>(
    signer_id: &Identifier,
    signing_commitments: &[SigningCommitments<C>],
) -> Result<Scalar<C>, Error> {
    let index = signing_commitments
        .binary_search_by_key(signer_id, |c| c.identifier)
        .map_err(|_| Error::MissingCommitment)?;

    let xs: Vec<_> = signing_commitments
        .iter()
        .map(|c| c.identifier.to_scalar::<<C::Group as Group>::Field>())
        .collect();

    lagrange_coefficient::<C::Group>(index, &xs, &<<C::Group as Group>::Field>::zero())
}

/// Verifies a Schnorr signature, threshold-produced or not: `z * G == R + c * PK`.
pub fn verify<C: Ciphersuite>(
    message: &[u8],
    signature: &Signature<C>,
    verifying_key: &VerifyingKey<C>,
) -> Result<(), Error> {
    verifying_key.verify(message, signature)
}

//! FROST keys, keygen, key shares
#![allow(clippy::type_complexity)]

use core::fmt::{self, Debug};
use std::collections::BTreeMap;

use derive_getters::Getters;
use rand_core::{CryptoRng, RngCore};
use zeroize::{DefaultIsZeroes, Zeroize};

use crate::{
    secret_sharing::{recover, Feldman, SecretCommitment, SecretShare},
    serialization::{SerializableElement, SerializableScalar},
    Ciphersuite, Element, Error, Field, Group, Identifier, Scalar, SigningKey, VerifyingKey,
};

/// A secret scalar value representing a signer's share of the group secret.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SigningShare<C: Ciphersuite>(pub(crate) SerializableScalar<C::Group>);

impl<C> SigningShare<C>
where
    C: Ciphersuite,
{
    /// Create a new [`SigningShare`] from a scalar.
    #[cfg_attr(feature = "internals", visibility::make(pub))]
    #[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
    pub(crate) fn new(scalar: Scalar<C>) -> Self {
        Self(SerializableScalar(scalar))
    }

    /// Get the inner scalar.
    #[cfg_attr(feature = "internals", visibility::make(pub))]
    #[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
    pub(crate) fn to_scalar(&self) -> Scalar<C> {
        self.0 .0
    }

    /// Deserialize from bytes
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self(SerializableScalar::deserialize(bytes)?))
    }

    /// Serialize to bytes
    pub fn serialize(&self) -> Vec<u8> {
        self.0.serialize()
    }
}

impl<C> Debug for SigningShare<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningShare").field(&"<redacted>").finish()
    }
}

impl<C> Default for SigningShare<C>
where
    C: Ciphersuite,
{
    fn default() -> Self {
        Self::new(<<C::Group as Group>::Field>::zero())
    }
}

// Implements [`Zeroize`] by overwriting a value with the [`Default::default()`] value
impl<C> DefaultIsZeroes for SigningShare<C> where C: Ciphersuite {}

/// A public group element that represents a single signer's public verification share.
#[derive(Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VerifyingShare<C: Ciphersuite>(pub(crate) SerializableElement<C::Group>);

impl<C> VerifyingShare<C>
where
    C: Ciphersuite,
{
    /// Create a new [`VerifyingShare`] from an element.
    #[cfg_attr(feature = "internals", visibility::make(pub))]
    #[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
    pub(crate) fn new(element: Element<C>) -> Self {
        Self(SerializableElement(element))
    }

    /// Get the inner element.
    pub fn to_element(&self) -> Element<C> {
        self.0 .0
    }

    /// Deserialize from bytes
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self(SerializableElement::deserialize_non_identity(bytes)?))
    }

    /// Serialize to bytes
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        self.0.serialize()
    }
}

impl<C> Debug for VerifyingShare<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VerifyingShare")
            .field(
                &self
                    .serialize()
                    .map(hex::encode)
                    .unwrap_or("<invalid>".to_string()),
            )
            .finish()
    }
}

impl<C> From<SigningShare<C>> for VerifyingShare<C>
where
    C: Ciphersuite,
{
    fn from(secret: SigningShare<C>) -> VerifyingShare<C> {
        VerifyingShare::new(<C::Group>::mul_base(&secret.to_scalar()))
    }
}

/// A key share as handed out by the dealer, before the participant has checked it.
///
/// Holds the participant's signing share together with the dealer's Feldman commitment to the
/// sharing polynomial. [`KeyShare::verify`] checks one against the other.
#[derive(Clone, Debug, PartialEq, Eq, Getters, Zeroize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct KeyShare<C: Ciphersuite> {
    /// The participant identifier of this share.
    #[zeroize(skip)]
    pub(crate) identifier: Identifier,
    /// Secret Key.
    pub(crate) signing_share: SigningShare<C>,
    /// The commitments to the coefficients of the dealer's secret polynomial.
    #[zeroize(skip)]
    pub(crate) commitment: SecretCommitment<C::Group>,
    /// The total number of shares the dealer handed out.
    #[zeroize(skip)]
    pub(crate) max_signers: u16,
}

impl<C> KeyShare<C>
where
    C: Ciphersuite,
{
    /// Create a new [`KeyShare`] instance.
    pub fn new(
        identifier: Identifier,
        signing_share: SigningShare<C>,
        commitment: SecretCommitment<C::Group>,
        max_signers: u16,
    ) -> Self {
        Self {
            identifier,
            signing_share,
            commitment,
            max_signers,
        }
    }

    /// The signing threshold, i.e. the degree of the committed polynomial.
    pub fn threshold(&self) -> Result<u16, Error> {
        self.commitment
            .degree()
            .and_then(|d| u16::try_from(d).ok())
            .ok_or(Error::InvalidSecretShare)
    }

    /// Verifies that the signing share is consistent with the dealer's commitment, and
    /// derives the participant's verifying share and the group verifying key.
    ///
    /// Fails with [`Error::InvalidSecretShare`] if the share does not match the commitment.
    pub fn verify(&self) -> Result<(VerifyingShare<C>, VerifyingKey<C>), Error> {
        let share = SecretShare::<C::Group>::new(self.identifier, self.signing_share.to_scalar());
        if !Feldman::verify_share(&share, &self.commitment) {
            tracing::warn!(identifier = %self.identifier, "key share does not match commitment");
            return Err(Error::InvalidSecretShare);
        }

        let verifying_share = VerifyingShare::from(self.signing_share);
        let verifying_key = VerifyingKey::new(self.commitment.public_key()?);

        Ok((verifying_share, verifying_key))
    }
}

/// Public data that contains all the signers' verifying shares as well as the group verifying
/// key.
///
/// Used by the combiner to check signature shares and to aggregate them.
#[derive(Clone, Debug, PartialEq, Eq, Getters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct PublicKeyPackage<C: Ciphersuite> {
    /// The verifying shares for all participants.
    pub(crate) verifying_shares: BTreeMap<Identifier, VerifyingShare<C>>,
    /// The joint public key for the entire group.
    pub(crate) verifying_key: VerifyingKey<C>,
    /// The polynomial degree: more than this many signers are needed.
    pub(crate) threshold: u16,
    /// The total number of participants.
    pub(crate) max_signers: u16,
}

impl<C> PublicKeyPackage<C>
where
    C: Ciphersuite,
{
    /// Create a new [`PublicKeyPackage`] instance.
    pub fn new(
        verifying_shares: BTreeMap<Identifier, VerifyingShare<C>>,
        verifying_key: VerifyingKey<C>,
        threshold: u16,
        max_signers: u16,
    ) -> Self {
        Self {
            verifying_shares,
            verifying_key,
            threshold,
            max_signers,
        }
    }
}

/// Validates the number of signers for threshold signing: `0 < threshold < max_signers`.
///
/// Signing needs `threshold + 1` participants, so the threshold must leave room for them.
pub(crate) fn validate_num_of_signers(threshold: u16, max_signers: u16) -> Result<(), Error> {
    if threshold == 0 || threshold >= max_signers {
        return Err(Error::BadParameters);
    }
    Ok(())
}

/// Allows all participants' keys to be generated using a central, trusted dealer.
///
/// Under the hood, this performs verifiable secret sharing, which itself uses Shamir secret
/// sharing, from which each share becomes a participant's secret key. The output from this
/// function is a set of shares along with one single commitment that participants use to
/// verify the integrity of the share.
///
/// `threshold` is the degree of the sharing polynomial: signing needs `threshold + 1` signers.
pub fn generate_with_dealer<C: Ciphersuite, R: RngCore + CryptoRng>(
    threshold: u16,
    max_signers: u16,
    rng: &mut R,
) -> Result<(Vec<KeyShare<C>>, PublicKeyPackage<C>), Error> {
    let group_key = SigningKey::new(rng);
    split(&group_key, threshold, max_signers, rng)
}

/// Splits an existing key into FROST shares.
///
/// This is identical to [`generate_with_dealer`] but receives an existing key instead of
/// generating a fresh one. This is useful in scenarios where the key needs to be generated
/// externally or must be derived from e.g. a seed phrase.
pub fn split<C: Ciphersuite, R: RngCore + CryptoRng>(
    key: &SigningKey<C>,
    threshold: u16,
    max_signers: u16,
    rng: &mut R,
) -> Result<(Vec<KeyShare<C>>, PublicKeyPackage<C>), Error> {
    validate_num_of_signers(threshold, max_signers)?;

    let feldman = Feldman::<C::Group>::new(threshold, max_signers)?;
    let (secret_shares, commitment) = feldman.shard_secret(rng, &key.to_scalar());

    let mut verifying_shares = BTreeMap::new();
    let key_shares: Vec<_> = secret_shares
        .into_iter()
        .map(|share| {
            let signing_share = SigningShare::new(share.value());
            verifying_shares.insert(share.identifier, VerifyingShare::from(signing_share));
            KeyShare::new(
                share.identifier,
                signing_share,
                commitment.clone(),
                max_signers,
            )
        })
        .collect();

    let public_key_package = PublicKeyPackage::new(
        verifying_shares,
        VerifyingKey::from(key),
        threshold,
        max_signers,
    );

    tracing::debug!(threshold, max_signers, "dealt key shares");

    Ok((key_shares, public_key_package))
}

/// Recompute the secret from more than `threshold` key shares.
///
/// This can be used if for some reason the original key must be restored; e.g. if threshold
/// signing is not required anymore.
///
/// This is NOT required to sign with FROST; the point of FROST is being able to generate
/// signatures only using the shares, without having to reconstruct the original key.
pub fn reconstruct<C: Ciphersuite>(key_shares: &[KeyShare<C>]) -> Result<SigningKey<C>, Error> {
    let first = key_shares.first().ok_or(Error::Threshold)?;
    let threshold = first.threshold()?;
    if key_shares.len() <= threshold as usize || key_shares.len() > first.max_signers as usize {
        return Err(Error::Threshold);
    }

    let shares: Vec<_> = key_shares
        .iter()
        .map(|k| SecretShare::<C::Group>::new(k.identifier, k.signing_share.to_scalar()))
        .collect();

    SigningKey::from_scalar(recover(&shares)?)
}

//! FROST Round 1 functionality and types

use core::fmt::{self, Debug};

use derive_getters::Getters;
use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    keys::SigningShare,
    serialization::{SerializableElement, SerializableScalar},
    Ciphersuite, Element, Error, Field, Group, Identifier, Scalar,
};

/// A scalar that is a signing nonce.
///
/// Not `Clone`: a nonce must be used for exactly one signature.
#[derive(PartialEq, Eq)]
pub struct Nonce<C: Ciphersuite>(pub(crate) SerializableScalar<C::Group>);

impl<C> Nonce<C>
where
    C: Ciphersuite,
{
    /// Generates a new uniformly random signing nonce by sourcing fresh randomness and
    /// combining with our signing secret, to hedge against a bad RNG.
    ///
    /// Each participant generates signing nonces before performing a signing operation.
    pub fn new<R>(secret: &SigningShare<C>, rng: &mut R) -> Result<Self, Error>
    where
        R: CryptoRng + RngCore,
    {
        let mut random_bytes = [0; 32];
        rng.fill_bytes(&mut random_bytes[..]);

        let nonce = Self::nonce_generate_from_random_bytes(secret, random_bytes);
        random_bytes.zeroize();
        nonce
    }

    /// Creates a nonce from a scalar.
    #[cfg_attr(feature = "internals", visibility::make(pub))]
    #[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
    pub(crate) fn from_scalar(scalar: Scalar<C>) -> Self {
        Self(SerializableScalar(scalar))
    }

    /// Convert a nonce into a scalar.
    #[cfg_attr(feature = "internals", visibility::make(pub))]
    #[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
    pub(crate) fn to_scalar(&self) -> Scalar<C> {
        self.0 .0
    }

    /// Generates a nonce from the given random bytes: `H4(random_bytes || secret)`.
    pub(crate) fn nonce_generate_from_random_bytes(
        secret: &SigningShare<C>,
        random_bytes: [u8; 32],
    ) -> Result<Self, Error> {
        let mut secret_enc = secret.serialize();

        let mut input = Vec::with_capacity(random_bytes.len() + secret_enc.len());
        input.extend_from_slice(&random_bytes);
        input.extend_from_slice(&secret_enc);

        let scalar = C::H4(input.as_slice());
        input.zeroize();
        secret_enc.zeroize();

        Ok(Self::from_scalar(scalar?))
    }
}

impl<C> Zeroize for Nonce<C>
where
    C: Ciphersuite,
{
    fn zeroize(&mut self) {
        self.0 = SerializableScalar(<<C::Group as Group>::Field>::zero());
    }
}

/// A group element that is a commitment to a signing nonce share.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NonceCommitment<C: Ciphersuite>(pub(crate) SerializableElement<C::Group>);

impl<C> NonceCommitment<C>
where
    C: Ciphersuite,
{
    /// Create a new [`NonceCommitment`] from an [`Element`]
    #[cfg_attr(feature = "internals", visibility::make(pub))]
    #[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
    pub(crate) fn new(value: Element<C>) -> Self {
        Self(SerializableElement(value))
    }

    /// Get the inner [`Element`] of the [`NonceCommitment`]
    pub fn value(&self) -> Element<C> {
        self.0 .0
    }

    /// Deserialize [`NonceCommitment`] from bytes, rejecting the identity.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self(SerializableElement::deserialize_non_identity(bytes)?))
    }

    /// Serialize [`NonceCommitment`] to bytes
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        self.0.serialize()
    }
}

impl<C> Debug for NonceCommitment<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NonceCommitment")
            .field(
                &self
                    .serialize()
                    .map(hex::encode)
                    .unwrap_or("<invalid>".to_string()),
            )
            .finish()
    }
}

impl<C> From<&Nonce<C>> for NonceCommitment<C>
where
    C: Ciphersuite,
{
    fn from(nonce: &Nonce<C>) -> Self {
        Self::new(<C::Group>::mul_base(&nonce.to_scalar()))
    }
}

/// Comprised of hiding and binding nonces.
///
/// Note that [`SigningNonces`] must be used *only once* for a signing operation; re-using
/// nonces will result in leakage of a signer's long-lived signing key. For that reason the
/// type is neither `Clone` nor `Copy`, signing takes it by value, and it is zeroized on drop.
#[derive(PartialEq, Eq)]
pub struct SigningNonces<C: Ciphersuite> {
    /// The hiding [`Nonce`].
    pub(crate) hiding: Nonce<C>,
    /// The binding [`Nonce`].
    pub(crate) binding: Nonce<C>,
    /// The commitments to the nonces, precomputed to check against the commitment list at
    /// signing time.
    pub(crate) commitments: SigningCommitments<C>,
}

impl<C> SigningNonces<C>
where
    C: Ciphersuite,
{
    /// Generates a new signing nonce pair for the participant `identifier`.
    ///
    /// Each participant generates signing nonces before performing a signing operation.
    pub fn new<R>(
        identifier: Identifier,
        secret: &SigningShare<C>,
        rng: &mut R,
    ) -> Result<Self, Error>
    where
        R: CryptoRng + RngCore,
    {
        let hiding = Nonce::<C>::new(secret, rng)?;
        let binding = Nonce::<C>::new(secret, rng)?;

        Ok(Self::from_nonces(identifier, hiding, binding))
    }

    /// Generates a new [`SigningNonces`] from a pair of [`Nonce`].
    ///
    /// # Security
    ///
    /// SigningNonces MUST NOT be repeated in different FROST signings.
    /// Thus, if you're using this method (because e.g. you're writing it
    /// to disk and reading it back), make sure you're not reusing them.
    pub fn from_nonces(identifier: Identifier, hiding: Nonce<C>, binding: Nonce<C>) -> Self {
        let hiding_commitment = (&hiding).into();
        let binding_commitment = (&binding).into();
        let commitments =
            SigningCommitments::new(identifier, hiding_commitment, binding_commitment);

        Self {
            hiding,
            binding,
            commitments,
        }
    }

    /// The public commitments to these nonces.
    pub fn commitments(&self) -> &SigningCommitments<C> {
        &self.commitments
    }
}

impl<C> Debug for SigningNonces<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningNonces")
            .field("hiding", &"<redacted>")
            .field("binding", &"<redacted>")
            .field("commitments", &self.commitments)
            .finish()
    }
}

impl<C> Drop for SigningNonces<C>
where
    C: Ciphersuite,
{
    fn drop(&mut self) {
        self.hiding.zeroize();
        self.binding.zeroize();
    }
}

impl<C> ZeroizeOnDrop for SigningNonces<C> where C: Ciphersuite {}

/// Published by each participant in the first round of the signing protocol.
///
/// This step can be batched if desired by the implementation. Each
/// SigningCommitment can be used for exactly *one* signature.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Getters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct SigningCommitments<C: Ciphersuite> {
    /// The participant who committed.
    pub(crate) identifier: Identifier,
    /// Commitment to the hiding [`Nonce`].
    pub(crate) hiding: NonceCommitment<C>,
    /// Commitment to the binding [`Nonce`].
    pub(crate) binding: NonceCommitment<C>,
}

impl<C> SigningCommitments<C>
where
    C: Ciphersuite,
{
    /// Create new SigningCommitments
    pub fn new(
        identifier: Identifier,
        hiding: NonceCommitment<C>,
        binding: NonceCommitment<C>,
    ) -> Self {
        Self {
            identifier,
            hiding,
            binding,
        }
    }

    /// Serializes as `identifier || hiding || binding`, the encoding that enters the binding
    /// factor computation.
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = self.identifier.serialize().to_vec();
        bytes.extend_from_slice(&self.hiding.serialize()?);
        bytes.extend_from_slice(&self.binding.serialize()?);
        Ok(bytes)
    }

    /// Deserializes `identifier || hiding || binding`.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        let element_len = <C::Group>::serialize(&<C::Group>::generator())?
            .as_ref()
            .len();
        if bytes.len() != 2 + 2 * element_len {
            return Err(Error::MalformedCommitments);
        }

        let (identifier, rest) = bytes.split_at(2);
        let (hiding, binding) = rest.split_at(element_len);

        Ok(Self::new(
            Identifier::deserialize(identifier)?,
            NonceCommitment::deserialize(hiding)?,
            NonceCommitment::deserialize(binding)?,
        ))
    }
}

/// Encodes the list of signing commitments into a byte string: the concatenation of each
/// commitment's serialization, in list order.
pub(crate) fn encode_group_commitments<C: Ciphersuite>(
    signing_commitments: &[SigningCommitments<C>],
) -> Result<Vec<u8>, Error> {
    let mut bytes = vec![];

    for commitment in signing_commitments {
        bytes.extend_from_slice(&commitment.serialize()?);
    }

    Ok(bytes)
}

/// Performed once by each participant selected for the signing operation.
///
/// Generates the signing nonces and commitments to be used in the signing operation. The
/// nonces stay with the participant; the commitments are sent to the combiner.
pub fn commit<C, R>(
    identifier: Identifier,
    secret: &SigningShare<C>,
    rng: &mut R,
) -> Result<(SigningNonces<C>, SigningCommitments<C>), Error>
where
    C: Ciphersuite,
    R: CryptoRng + RngCore,
{
    let signing_nonces = SigningNonces::new(identifier, secret, rng)?;
    let signing_commitments = *signing_nonces.commitments();

    tracing::debug!(identifier = %identifier, "generated signing commitments");

    Ok((signing_nonces, signing_commitments))
}

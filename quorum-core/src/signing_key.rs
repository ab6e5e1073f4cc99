//! Schnorr signature signing keys

use core::fmt::{self, Debug};

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::{
    challenge, random_nonzero, serialization::SerializableScalar, Ciphersuite, Error, Field,
    FieldError, Group, Scalar, Signature, VerifyingKey,
};

/// A signing key for a Schnorr signature on a FROST [`Ciphersuite::Group`].
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct SigningKey<C>
where
    C: Ciphersuite,
{
    pub(crate) scalar: Scalar<C>,
}

impl<C> SigningKey<C>
where
    C: Ciphersuite,
{
    /// Generate a new signing key.
    pub fn new<R: RngCore + CryptoRng>(rng: &mut R) -> SigningKey<C> {
        let scalar = random_nonzero::<C::Group, R>(rng);

        SigningKey { scalar }
    }

    /// Deserialize from bytes. Zero is not a valid key.
    pub fn deserialize(bytes: &[u8]) -> Result<SigningKey<C>, Error> {
        let scalar = SerializableScalar::<C::Group>::deserialize(bytes)
            .map_err(|_| Error::MalformedSigningKey)?
            .0;
        Self::from_scalar(scalar).map_err(|_| Error::MalformedSigningKey)
    }

    /// Serialize `SigningKey` to bytes
    pub fn serialize(&self) -> Vec<u8> {
        SerializableScalar::<C::Group>(self.scalar).serialize()
    }

    /// Create a signature `msg` using this `SigningKey`.
    ///
    /// The nonce is `H4(random || serialize(sk))`, hedging against a weak RNG.
    pub fn sign<R: RngCore + CryptoRng>(
        &self,
        mut rng: R,
        message: &[u8],
    ) -> Result<Signature<C>, Error> {
        let mut random_bytes = [0u8; 32];
        rng.fill_bytes(&mut random_bytes);

        let mut input = random_bytes.to_vec();
        input.extend_from_slice(&self.serialize());
        let k = C::H4(&input);
        input.zeroize();
        random_bytes.zeroize();
        let k = k?;

        let R = <C::Group>::mul_base(&k);

        // Generate Schnorr challenge
        let c = challenge::<C>(&R, &VerifyingKey::<C>::from(*self), message)?;

        let z = k + (c.0 * self.scalar);

        Ok(Signature { R, z })
    }

    /// Creates a SigningKey from a scalar. Returns an error if the scalar is zero.
    pub fn from_scalar(scalar: Scalar<C>) -> Result<Self, Error> {
        if scalar == <<C::Group as Group>::Field as Field>::zero() {
            return Err(FieldError::InvalidZeroScalar.into());
        }
        Ok(Self { scalar })
    }

    /// Return the underlying scalar.
    pub fn to_scalar(self) -> Scalar<C> {
        self.scalar
    }
}

impl<C> Debug for SigningKey<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey").field(&"<redacted>").finish()
    }
}

impl<C> From<&SigningKey<C>> for VerifyingKey<C>
where
    C: Ciphersuite,
{
    fn from(signing_key: &SigningKey<C>) -> Self {
        VerifyingKey::new(C::Group::mul_base(&signing_key.scalar))
    }
}

impl<C> From<SigningKey<C>> for VerifyingKey<C>
where
    C: Ciphersuite,
{
    fn from(signing_key: SigningKey<C>) -> Self {
        VerifyingKey::<C>::from(&signing_key)
    }
}

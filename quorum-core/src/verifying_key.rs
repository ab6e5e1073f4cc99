//! Schnorr signature verifying keys

use core::fmt::{self, Debug};

use crate::{
    challenge, scalar_mul::vartime_multiscalar_mul, serialization::SerializableElement,
    Challenge, Ciphersuite, Element, Error, Group, Signature,
};

/// A valid verifying key for Schnorr signatures over a FROST [`Ciphersuite::Group`].
#[derive(Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VerifyingKey<C>
where
    C: Ciphersuite,
{
    pub(crate) element: SerializableElement<C::Group>,
}

impl<C> VerifyingKey<C>
where
    C: Ciphersuite,
{
    /// Create a new VerifyingKey from the given element.
    #[cfg_attr(feature = "internals", visibility::make(pub))]
    #[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
    pub(crate) fn new(element: Element<C>) -> Self {
        Self {
            element: SerializableElement(element),
        }
    }

    /// Return the underlying element.
    pub fn to_element(self) -> Element<C> {
        self.element.0
    }

    /// Deserialize from bytes, rejecting the identity.
    pub fn deserialize(bytes: &[u8]) -> Result<VerifyingKey<C>, Error> {
        SerializableElement::deserialize_non_identity(bytes)
            .map(|element| Self { element })
            .map_err(|_| Error::MalformedVerifyingKey)
    }

    /// Serialize `VerifyingKey` to bytes
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        self.element.serialize()
    }

    /// Verify a purported `signature` with a pre-computed [`Challenge`] made by this
    /// verification key: `z * G - c * PK == R`.
    pub(crate) fn verify_prehashed(
        &self,
        challenge: Challenge<C>,
        signature: &Signature<C>,
    ) -> Result<(), Error> {
        let R = vartime_multiscalar_mul::<C::Group>(
            &[signature.z, -challenge.0],
            &[<C::Group>::generator(), self.element.0],
        );

        if R == signature.R {
            Ok(())
        } else {
            Err(Error::InvalidSignature)
        }
    }

    /// Verify a purported `signature` over `msg` made by this verification key.
    pub fn verify(&self, msg: &[u8], signature: &Signature<C>) -> Result<(), Error> {
        let c = challenge::<C>(&signature.R, self, msg)?;

        self.verify_prehashed(c, signature)
    }
}

impl<C> Debug for VerifyingKey<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VerifyingKey")
            .field(
                &self
                    .serialize()
                    .map(hex::encode)
                    .unwrap_or("<invalid>".to_string()),
            )
            .finish()
    }
}

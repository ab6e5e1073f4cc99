//! Schnorr signatures over prime order groups (or subgroups)

use core::fmt::{self, Debug};

use crate::{Ciphersuite, Element, Error, Field, Group, Scalar};

/// A Schnorr signature over some prime order group (or subgroup).
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature<C: Ciphersuite> {
    /// The commitment `R` to the signature nonce.
    pub(crate) R: Element<C>,
    /// The response `z` to the challenge computed from the commitment `R`, the verifying key,
    /// and the message.
    pub(crate) z: Scalar<C>,
}

impl<C> Signature<C>
where
    C: Ciphersuite,
{
    /// Create a new Signature.
    pub fn new(R: Element<C>, z: Scalar<C>) -> Self {
        Self { R, z }
    }

    /// Get the commitment `R` component of this signature.
    pub fn R(&self) -> &Element<C> {
        &self.R
    }

    /// Get the response `z` component of this signature.
    pub fn z(&self) -> &Scalar<C> {
        &self.z
    }

    /// Converts bytes as [`Ciphersuite::SignatureSerialization`] into a `Signature<C>`.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        let R_len = <C::Group>::serialize(&<C::Group>::generator())?
            .as_ref()
            .len();
        if bytes.len() <= R_len {
            return Err(Error::MalformedSignature);
        }

        let (R_bytes, z_bytes) = bytes.split_at(R_len);

        let R_serialization: <C::Group as Group>::Serialization = R_bytes
            .to_vec()
            .try_into()
            .map_err(|_| Error::MalformedSignature)?;
        let z_serialization: <<C::Group as Group>::Field as Field>::Serialization = z_bytes
            .to_vec()
            .try_into()
            .map_err(|_| Error::MalformedSignature)?;

        Ok(Self {
            R: <C::Group>::deserialize(&R_serialization)?,
            z: <<C::Group as Group>::Field>::deserialize(&z_serialization)?,
        })
    }

    /// Converts this signature to its [`Ciphersuite::SignatureSerialization`] in bytes:
    /// `serialize(R) || serialize(z)`.
    pub fn serialize(&self) -> Result<C::SignatureSerialization, Error> {
        let mut bytes = <C::Group>::serialize(&self.R)?.as_ref().to_vec();
        bytes.extend_from_slice(<<C::Group as Group>::Field>::serialize(&self.z).as_ref());

        bytes.try_into().map_err(|_| Error::MalformedSignature)
    }
}

#[cfg(feature = "serde")]
impl<C> serde::Serialize for Signature<C>
where
    C: Ciphersuite,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let bytes = self
            .serialize()
            .map_err(|err| serde::ser::Error::custom(format!("{err}")))?;
        serdect::slice::serialize_hex_lower_or_bin(&bytes.as_ref(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, C> serde::Deserialize<'de> for Signature<C>
where
    C: Ciphersuite,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
        Self::deserialize(&bytes).map_err(|err| serde::de::Error::custom(format!("{err}")))
    }
}

impl<C: Ciphersuite> Debug for Signature<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field(
                "R",
                &<C::Group>::serialize(&self.R)
                    .map(|s| hex::encode(s.as_ref()))
                    .unwrap_or("<invalid>".to_string()),
            )
            .field(
                "z",
                &hex::encode(<<C::Group as Group>::Field>::serialize(&self.z)),
            )
            .finish()
    }
}

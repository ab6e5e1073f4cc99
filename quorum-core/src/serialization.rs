//! Serialization support.

use crate::{Error, Field, FieldError, Group, GroupError, GroupScalar};

/// Helper struct to serialize a Scalar.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "internals", visibility::make(pub))]
#[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
pub(crate) struct SerializableScalar<G: Group>(pub GroupScalar<G>);

impl<G> SerializableScalar<G>
where
    G: Group,
{
    /// Serialize a Scalar.
    pub fn serialize(&self) -> Vec<u8> {
        <G::Field>::serialize(&self.0).as_ref().to_vec()
    }

    /// Deserialize a Scalar from a serialized buffer.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        let serialized: <G::Field as Field>::Serialization = bytes
            .to_vec()
            .try_into()
            .map_err(|_| FieldError::MalformedScalar)?;
        let scalar = <G::Field>::deserialize(&serialized)?;
        Ok(Self(scalar))
    }
}

#[cfg(feature = "serde")]
impl<G> serde::Serialize for SerializableScalar<G>
where
    G: Group,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serdect::slice::serialize_hex_lower_or_bin(&self.serialize(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, G> serde::Deserialize<'de> for SerializableScalar<G>
where
    G: Group,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
        Self::deserialize(&bytes).map_err(|err| serde::de::Error::custom(format!("{err}")))
    }
}

/// Helper struct to serialize an Element.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "internals", visibility::make(pub))]
#[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
pub(crate) struct SerializableElement<G: Group>(pub G::Element);

impl<G> SerializableElement<G>
where
    G: Group,
{
    /// Serialize an Element. Returns an error if it's the identity and the group cannot encode
    /// it.
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        Ok(<G>::serialize(&self.0)?.as_ref().to_vec())
    }

    /// Deserialize an Element.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        let serialized: G::Serialization = bytes
            .to_vec()
            .try_into()
            .map_err(|_| GroupError::MalformedElement)?;
        let element = <G>::deserialize(&serialized)?;
        Ok(Self(element))
    }

    /// Deserialize an Element, also rejecting the identity.
    pub fn deserialize_non_identity(bytes: &[u8]) -> Result<Self, Error> {
        let element = Self::deserialize(bytes)?;
        if element.0 == G::identity() {
            return Err(GroupError::InvalidIdentityElement.into());
        }
        Ok(element)
    }
}

#[cfg(feature = "serde")]
impl<G> serde::Serialize for SerializableElement<G>
where
    G: Group,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let bytes = self
            .serialize()
            .map_err(|err| serde::ser::Error::custom(format!("{err}")))?;
        serdect::slice::serialize_hex_lower_or_bin(&bytes, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, G> serde::Deserialize<'de> for SerializableElement<G>
where
    G: Group,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
        Self::deserialize_non_identity(&bytes)
            .map_err(|err| serde::de::Error::custom(format!("{err}")))
    }
}

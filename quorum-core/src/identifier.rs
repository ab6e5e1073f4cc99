//! Participant identifiers

use core::fmt::{self, Debug};

use crate::{Error, Field};

/// A participant identifier.
///
/// The identifier is the x-coordinate at which the secret polynomial f(x) is evaluated to
/// produce the participant's share. It MUST NOT be zero, as f(0) is the shared secret, so
/// identifiers are positive integers by construction. Identifiers order by their integer value,
/// which is the order commitment lists must follow.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u16"))]
#[cfg_attr(feature = "serde", serde(into = "u16"))]
pub struct Identifier(pub(crate) u16);

impl Identifier {
    /// Create a new Identifier, failing on zero.
    pub fn new(id: u16) -> Result<Self, Error> {
        if id == 0 {
            Err(Error::InvalidZeroIdentifier)
        } else {
            Ok(Self(id))
        }
    }

    /// The identifier as an integer.
    pub fn to_u16(&self) -> u16 {
        self.0
    }

    /// The identifier as an element of the scalar field `F`.
    pub fn to_scalar<F: Field>(&self) -> F::Scalar {
        F::from_u64(u64::from(self.0))
    }

    /// Serialize the identifier as two big-endian bytes.
    pub fn serialize(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Deserialize an Identifier from two big-endian bytes.
    /// Returns an error if it attempts to deserialize zero.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; 2] = bytes.try_into().map_err(|_| Error::MalformedIdentifier)?;
        Self::new(u16::from_be_bytes(bytes))
    }
}

impl Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Identifier")
            .field(&hex::encode(self.serialize()))
            .finish()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Identifier {
    type Error = Error;

    fn try_from(n: u16) -> Result<Identifier, Self::Error> {
        Self::new(n)
    }
}

impl From<Identifier> for u16 {
    fn from(identifier: Identifier) -> Self {
        identifier.0
    }
}

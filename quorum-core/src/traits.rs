//! Traits used to abstract prime-order groups and FROST ciphersuites.

use core::{
    fmt::{self, Debug},
    ops::{Add, Mul, Neg, Sub},
    str::FromStr,
};

use rand_core::{CryptoRng, RngCore};

use crate::{hash_to_field::hash_to_field, Error, ExpandError, Expander, FieldError, GroupError};

/// A prime order finite field GF(q) over which all scalar values for our prime order group can be
/// multiplied are defined.
///
/// This trait does not have to be implemented for a finite field scalar itself, it can be a
/// pass-through, implemented for a type just for the group, and calls through to another
/// implementation underneath, so that this trait does not have to be implemented for types you
/// don't own.
pub trait Field: Copy + Clone {
    /// An element of the scalar field GF(p).
    /// The Eq/PartialEq implementation MUST be constant-time.
    type Scalar: Add<Output = Self::Scalar>
        + Copy
        + Clone
        + Eq
        + Mul<Output = Self::Scalar>
        + Neg<Output = Self::Scalar>
        + PartialEq
        + Sub<Output = Self::Scalar>;

    /// A unique byte array buf of fixed length N.
    type Serialization: AsRef<[u8]> + Debug + TryFrom<Vec<u8>>;

    /// Bit length of the field modulus, `ceil(log2(p))`.
    const BITS: usize;

    /// Returns the zero element of the field, the additive identity.
    fn zero() -> Self::Scalar;

    /// Returns the one element of the field, the multiplicative identity.
    fn one() -> Self::Scalar;

    /// Maps an integer into the field.
    fn from_u64(value: u64) -> Self::Scalar;

    /// Computes the multiplicative inverse of an element of the scalar field, failing if the
    /// element is zero.
    fn invert(scalar: &Self::Scalar) -> Result<Self::Scalar, FieldError>;

    /// Generate a random scalar from the entire space [0, l-1]
    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Scalar;

    /// Maps a [`Field::Scalar`] to a unique byte array buf of fixed length Ns, in the byte
    /// order of the group's canonical encoding.
    fn serialize(scalar: &Self::Scalar) -> Self::Serialization;

    /// Maps a [`Field::Scalar`] to a unique byte array buf of fixed length Ns, in
    /// little-endian order.
    ///
    /// This is used internally.
    fn little_endian_serialize(scalar: &Self::Scalar) -> Self::Serialization;

    /// Attempts to map a byte array `buf` to a [`Field::Scalar`].
    ///
    /// Fails if the input is not the canonical byte representation of a scalar, in particular
    /// if the encoded integer is not reduced modulo the field order.
    fn deserialize(buf: &Self::Serialization) -> Result<Self::Scalar, FieldError>;
}

/// An element of the [`Group`] `G`'s scalar [`Field`].
pub type GroupScalar<G> = <<G as Group>::Field as Field>::Scalar;

/// Registered prime-order groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupId {
    /// NIST P-256.
    P256,
    /// NIST P-384.
    P384,
    /// NIST P-521.
    P521,
    /// The Ristretto255 quotient group of Curve25519.
    Ristretto255,
    /// The Decaf448 quotient group of edwards448.
    Decaf448,
}

impl GroupId {
    /// All registered groups.
    pub const ALL: [GroupId; 5] = [
        GroupId::P256,
        GroupId::P384,
        GroupId::P521,
        GroupId::Ristretto255,
        GroupId::Decaf448,
    ];

    /// The registered name of the group.
    pub fn name(&self) -> &'static str {
        match self {
            GroupId::P256 => "P256",
            GroupId::P384 => "P384",
            GroupId::P521 => "P521",
            GroupId::Ristretto255 => "ristretto255",
            GroupId::Decaf448 => "decaf448",
        }
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GroupId {
    type Err = GroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GroupId::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(s))
            .ok_or(GroupError::UnknownGroup)
    }
}

/// A prime-order group (or subgroup) that provides everything we need to hash into it, share
/// secrets over it and create and verify Schnorr signatures.
///
/// This trait does not have to be implemented for the curve/element/point itself, it can be a
/// pass-through, implemented for a type just for the group, and calls through to another
/// implementation underneath, so that this trait does not have to be implemented for types you
/// don't own.
pub trait Group: Copy + Clone + PartialEq + Eq + Debug + 'static {
    /// A prime order finite field GF(q) over which all scalar values for our prime order group can
    /// be multiplied are defined.
    type Field: Field;

    /// An element of our group that we will be computing over.
    ///
    /// The Eq/PartialEq implementation MUST be constant-time and MUST compare group elements,
    /// not internal coordinate representations.
    type Element: Add<Output = Self::Element>
        + Copy
        + Clone
        + Eq
        + Mul<<Self::Field as Field>::Scalar, Output = Self::Element>
        + Neg<Output = Self::Element>
        + PartialEq
        + Sub<Output = Self::Element>;

    /// The compressed encoding of an element, a byte array of fixed length Ne.
    type Serialization: AsRef<[u8]> + Debug + TryFrom<Vec<u8>>;

    /// The uncompressed encoding of an element. Groups without a distinct uncompressed form use
    /// the compressed encoding here too.
    type UncompressedSerialization: AsRef<[u8]> + Debug + TryFrom<Vec<u8>>;

    /// The expander used to hash into this group.
    type Expander: Expander;

    /// The registry identifier of the group.
    const ID: GroupId;

    /// The security level, in bits, used to size hash-to-field outputs.
    const SECURITY_BITS: usize;

    /// Additive identity of the prime order group.
    fn identity() -> Self::Element;

    /// The fixed generator element of the prime order group.
    fn generator() -> Self::Element;

    /// The order of the group, as big-endian bytes.
    fn order() -> &'static [u8];

    /// Returns `2 * element`.
    fn double(element: &Self::Element) -> Self::Element {
        *element + *element
    }

    /// Multiplies the generator by `scalar`.
    ///
    /// Backends should override this with their fixed-base tables.
    fn mul_base(scalar: &<Self::Field as Field>::Scalar) -> Self::Element {
        Self::generator() * *scalar
    }

    /// Samples a uniformly random element.
    fn random_element<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Element {
        Self::mul_base(&<Self::Field as Field>::random(rng))
    }

    /// Builds this group's expander for the domain separation tag `dst`.
    fn expander(dst: &[u8]) -> Result<Self::Expander, ExpandError>;

    /// Hashes `msg` to an element of the group under the domain separation tag `dst`.
    fn hash_to_element(msg: &[u8], dst: &[u8]) -> Result<Self::Element, ExpandError>;

    /// Hashes `msg` to a scalar under the domain separation tag `dst`.
    fn hash_to_scalar(
        msg: &[u8],
        dst: &[u8],
    ) -> Result<<Self::Field as Field>::Scalar, ExpandError> {
        hash_to_field::<Self>(msg, dst, 1)?
            .pop()
            .ok_or(ExpandError::InvalidLength)
    }

    /// Maps an [`Group::Element`] to its compressed, canonical encoding.
    ///
    /// Fails with [`GroupError::InvalidIdentityElement`] for groups whose encoding cannot
    /// represent the identity.
    fn serialize(element: &Self::Element) -> Result<Self::Serialization, GroupError>;

    /// Attempts to map a compressed encoding to an [`Group::Element`], rejecting any encoding
    /// that is not canonical.
    fn deserialize(buf: &Self::Serialization) -> Result<Self::Element, GroupError>;

    /// Maps an [`Group::Element`] to its uncompressed encoding.
    fn serialize_uncompressed(
        element: &Self::Element,
    ) -> Result<Self::UncompressedSerialization, GroupError>;

    /// Attempts to map an uncompressed encoding to an [`Group::Element`].
    fn deserialize_uncompressed(
        buf: &Self::UncompressedSerialization,
    ) -> Result<Self::Element, GroupError>;
}

/// A FROST ciphersuite binds a prime-order group to a hash function and a context string.
pub trait Ciphersuite: Copy + Clone + PartialEq + Debug + 'static {
    /// The ciphersuite ID string, used as the context string prefix of every hash label.
    const ID: &'static str;

    /// The prime order group (or subgroup) that this ciphersuite operates over.
    type Group: Group;

    /// A unique byte array of fixed length.
    type HashOutput: AsRef<[u8]>;

    /// A unique byte array of fixed length that is the `Group::Serialization` +
    /// `Field::Serialization`
    type SignatureSerialization: AsRef<[u8]> + TryFrom<Vec<u8>>;

    /// H1, used to derive the binding factor. Label `rho`.
    fn H1(m: &[u8]) -> Result<Scalar<Self>, Error> {
        hash_to_scalar_with_label::<Self>("rho", m)
    }

    /// H2, used to derive the Schnorr challenge. Label `chal`.
    fn H2(m: &[u8]) -> Result<Scalar<Self>, Error> {
        hash_to_scalar_with_label::<Self>("chal", m)
    }

    /// H3, the ciphersuite hash with domain separation applied. Label `digest`.
    fn H3(m: &[u8]) -> Self::HashOutput;

    /// H4, used to derive signing nonces. Label `nonce`.
    fn H4(m: &[u8]) -> Result<Scalar<Self>, Error> {
        hash_to_scalar_with_label::<Self>("nonce", m)
    }
}

/// An element of the [`Ciphersuite`] `C`'s [`Group`]'s scalar [`Field`].
pub type Scalar<C> = <<<C as Ciphersuite>::Group as Group>::Field as Field>::Scalar;

/// An element of the [`Ciphersuite`] `C`'s [`Group`].
pub type Element<C> = <<C as Ciphersuite>::Group as Group>::Element;

fn hash_to_scalar_with_label<C: Ciphersuite>(label: &str, m: &[u8]) -> Result<Scalar<C>, Error> {
    let dst = [C::ID.as_bytes(), label.as_bytes()].concat();
    Ok(<C::Group>::hash_to_scalar(m, &dst)?)
}

#![allow(non_snake_case)]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

use core::ops::{Add, Mul, Neg, Sub};

use crrl::decaf448::{Point, Scalar};
use rand_core::{CryptoRng, RngCore};
use sha3::Shake256;

use quorum_core::{ExpandError, Expander, ExpanderXof, GroupId};

pub use quorum_core::{Field, FieldError, Group, GroupError};


/// The order of the Decaf448 group, `2^446 - 13818066809895115352007386748515426880336692474882178609894547503885`, big-endian.
const ORDER: [u8; 56] = [
    0x3f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7c, 0xca, 0x23, 0xe9,
    0xc4, 0x4e, 0xdb, 0x49, 0xae, 0xd6, 0x36, 0x90, 0x21, 0x6c, 0xc2, 0x72, 0x8d, 0xc5, 0x8f, 0x55,
    0x23, 0x78, 0xc2, 0x92, 0xab, 0x58, 0x44, 0xf3,
];

/// Security level of the hash-to-group and hash-to-field constructions, in bits.
const SECURITY_BITS: usize = 224;

/// Bytes of randomness reduced into one random scalar.
const WIDE_SCALAR_BYTES: usize = (446 + SECURITY_BITS).div_ceil(8);

/// Constant-time mask returned by `crrl` comparisons on equality.
const CT_TRUE: u32 = 0xFFFF_FFFF;

/// An integer modulo the Decaf448 group order.
#[derive(Clone, Copy, Debug)]
pub struct Decaf448Scalar(pub Scalar);

impl PartialEq for Decaf448Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.0.equals(other.0) == CT_TRUE
    }
}

impl Eq for Decaf448Scalar {}

impl Add for Decaf448Scalar {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Decaf448Scalar {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul for Decaf448Scalar {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl Neg for Decaf448Scalar {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

/// An element of the Decaf448 group.
#[derive(Clone, Copy, Debug)]
pub struct Decaf448Element(pub Point);

impl PartialEq for Decaf448Element {
    /// Compares group elements, not the internal curve representatives.
    fn eq(&self, other: &Self) -> bool {
        self.0.equals(other.0) == CT_TRUE
    }
}

impl Eq for Decaf448Element {}

impl Add for Decaf448Element {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Decaf448Element {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<Decaf448Scalar> for Decaf448Element {
    type Output = Self;

    fn mul(self, rhs: Decaf448Scalar) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl Neg for Decaf448Element {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

#[derive(Clone, Copy)]
/// An implementation of the Decaf448 scalar field.
pub struct Decaf448ScalarField;

impl Field for Decaf448ScalarField {
    type Scalar = Decaf448Scalar;

    /// Little-endian, as in the Decaf448 scalar encoding.
    type Serialization = [u8; 56];

    const BITS: usize = 446;

    fn zero() -> Self::Scalar {
        Decaf448Scalar(Scalar::ZERO)
    }

    fn one() -> Self::Scalar {
        Decaf448Scalar(Scalar::ONE)
    }

    fn from_u64(value: u64) -> Self::Scalar {
        Decaf448Scalar(Scalar::from_u64(value))
    }

    fn invert(scalar: &Self::Scalar) -> Result<Self::Scalar, FieldError> {
        if scalar.0.iszero() == CT_TRUE {
            Err(FieldError::InvalidZeroScalar)
        } else {
            Ok(Decaf448Scalar(scalar.0.invert()))
        }
    }

    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Scalar {
        let mut bytes = [0u8; WIDE_SCALAR_BYTES];
        rng.fill_bytes(&mut bytes);
        Decaf448Scalar(Scalar::decode_reduce(&bytes))
    }

    fn serialize(scalar: &Self::Scalar) -> Self::Serialization {
        scalar.0.encode()
    }

    fn deserialize(buf: &Self::Serialization) -> Result<Self::Scalar, FieldError> {
        Scalar::decode(buf)
            .map(Decaf448Scalar)
            .ok_or(FieldError::MalformedScalar)
    }

    fn little_endian_serialize(scalar: &Self::Scalar) -> Self::Serialization {
        Self::serialize(scalar)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// An implementation of the Decaf448 group.
pub struct Decaf448Group;

impl Group for Decaf448Group {
    type Field = Decaf448ScalarField;

    type Element = Decaf448Element;

    /// The canonical 56-byte encoding. The identity encodes as all zeros.
    type Serialization = [u8; 56];

    /// Decaf448 has a single encoding.
    type UncompressedSerialization = [u8; 56];

    type Expander = ExpanderXof<Shake256>;

    const ID: GroupId = GroupId::Decaf448;

    const SECURITY_BITS: usize = SECURITY_BITS;

    fn identity() -> Self::Element {
        Decaf448Element(Point::NEUTRAL)
    }

    fn generator() -> Self::Element {
        Decaf448Element(Point::BASE)
    }

    fn order() -> &'static [u8] {
        &ORDER
    }

    fn double(element: &Self::Element) -> Self::Element {
        Decaf448Element(element.0.double())
    }

    fn mul_base(scalar: &Decaf448Scalar) -> Self::Element {
        Decaf448Element(Point::mulgen(&scalar.0))
    }

    fn expander(dst: &[u8]) -> Result<Self::Expander, ExpandError> {
        ExpanderXof::new(dst, SECURITY_BITS)
    }

    fn hash_to_element(msg: &[u8], dst: &[u8]) -> Result<Self::Element, ExpandError> {
        // The one-way map takes exactly 112 bytes.
        let uniform_bytes = Self::expander(dst)?.expand(msg, 112)?;
        Ok(Decaf448Element(Point::one_way_map(&uniform_bytes)))
    }

    fn serialize(element: &Self::Element) -> Result<Self::Serialization, GroupError> {
        Ok(element.0.encode())
    }

    fn deserialize(buf: &Self::Serialization) -> Result<Self::Element, GroupError> {
        Point::decode(buf)
            .map(Decaf448Element)
            .ok_or(GroupError::MalformedElement)
    }

    fn serialize_uncompressed(
        element: &Self::Element,
    ) -> Result<Self::UncompressedSerialization, GroupError> {
        Self::serialize(element)
    }

    fn deserialize_uncompressed(
        buf: &Self::UncompressedSerialization,
    ) -> Result<Self::Element, GroupError> {
        Self::deserialize(buf)
    }
}

#![allow(non_snake_case)]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

use p384::{
    elliptic_curve::{
        hash2curve::{ExpandMsgXmd, GroupDigest},
        sec1::{FromEncodedPoint, ToEncodedPoint},
        Field as FFField, PrimeField,
    },
    AffinePoint, EncodedPoint, FieldBytes, NistP384, ProjectivePoint, Scalar,
};
use rand_core::{CryptoRng, RngCore};
use sha2::Sha384;

use quorum_core::{ExpandError, ExpanderMd, GroupId};

pub use quorum_core::{Field, FieldError, Group, GroupError};


/// The order of the P-384 scalar field, big-endian.
const ORDER: [u8; 48] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xc7, 0x63, 0x4d, 0x81, 0xf4, 0x37, 0x2d, 0xdf,
    0x58, 0x1a, 0x0d, 0xb2, 0x48, 0xb0, 0xa7, 0x7a, 0xec, 0xec, 0x19, 0x6a, 0xcc, 0xc5, 0x29, 0x73,
];

#[derive(Clone, Copy)]
/// An implementation of the P-384 scalar field.
pub struct P384ScalarField;

impl Field for P384ScalarField {
    type Scalar = Scalar;

    type Serialization = [u8; 48];

    const BITS: usize = 384;

    fn zero() -> Self::Scalar {
        Scalar::ZERO
    }

    fn one() -> Self::Scalar {
        Scalar::ONE
    }

    fn from_u64(value: u64) -> Self::Scalar {
        Scalar::from(value)
    }

    fn invert(scalar: &Self::Scalar) -> Result<Self::Scalar, FieldError> {
        Option::from(FFField::invert(scalar)).ok_or(FieldError::InvalidZeroScalar)
    }

    fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Scalar {
        <Scalar as FFField>::random(rng)
    }

    fn serialize(scalar: &Self::Scalar) -> Self::Serialization {
        scalar.to_repr().into()
    }

    fn deserialize(buf: &Self::Serialization) -> Result<Self::Scalar, FieldError> {
        let field_bytes = FieldBytes::from(*buf);
        Option::from(Scalar::from_repr(field_bytes)).ok_or(FieldError::MalformedScalar)
    }

    fn little_endian_serialize(scalar: &Self::Scalar) -> Self::Serialization {
        let mut array = Self::serialize(scalar);
        array.reverse();
        array
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// An implementation of the NIST P-384 group, hashed into with
/// `P384_XMD:SHA-384_SSWU_RO_`.
pub struct P384Group;

impl Group for P384Group {
    type Field = P384ScalarField;

    type Element = ProjectivePoint;

    /// Compressed SEC 1 encoding: a 1-byte prefix and 48 bytes for the x coordinate. The
    /// identity has no encoding of this width.
    type Serialization = [u8; 49];

    type UncompressedSerialization = [u8; 97];

    type Expander = ExpanderMd<Sha384>;

    const ID: GroupId = GroupId::P384;

    const SECURITY_BITS: usize = 192;

    fn identity() -> Self::Element {
        ProjectivePoint::IDENTITY
    }

    fn generator() -> Self::Element {
        ProjectivePoint::GENERATOR
    }

    fn order() -> &'static [u8] {
        &ORDER
    }

    fn expander(dst: &[u8]) -> Result<Self::Expander, ExpandError> {
        ExpanderMd::new(dst)
    }

    fn hash_to_element(msg: &[u8], dst: &[u8]) -> Result<Self::Element, ExpandError> {
        if dst.is_empty() {
            return Err(ExpandError::EmptyDst);
        }
        NistP384::hash_from_bytes::<ExpandMsgXmd<Sha384>>(&[msg], &[dst])
            .map_err(|_| ExpandError::InvalidLength)
    }

    fn serialize(element: &Self::Element) -> Result<Self::Serialization, GroupError> {
        if *element == Self::identity() {
            return Err(GroupError::InvalidIdentityElement);
        }
        element
            .to_affine()
            .to_encoded_point(true)
            .as_bytes()
            .try_into()
            .map_err(|_| GroupError::MalformedElement)
    }

    fn deserialize(buf: &Self::Serialization) -> Result<Self::Element, GroupError> {
        decode_point(buf)
    }

    fn serialize_uncompressed(
        element: &Self::Element,
    ) -> Result<Self::UncompressedSerialization, GroupError> {
        if *element == Self::identity() {
            return Err(GroupError::InvalidIdentityElement);
        }
        element
            .to_affine()
            .to_encoded_point(false)
            .as_bytes()
            .try_into()
            .map_err(|_| GroupError::MalformedElement)
    }

    fn deserialize_uncompressed(
        buf: &Self::UncompressedSerialization,
    ) -> Result<Self::Element, GroupError> {
        decode_point(buf)
    }
}

fn decode_point(buf: &[u8]) -> Result<ProjectivePoint, GroupError> {
    let encoded_point = EncodedPoint::from_bytes(buf).map_err(|_| GroupError::MalformedElement)?;

    match Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded_point)) {
        Some(point) if point.is_identity().into() => Err(GroupError::InvalidIdentityElement),
        Some(point) => Ok(ProjectivePoint::from(point)),
        None => Err(GroupError::MalformedElement),
    }
}

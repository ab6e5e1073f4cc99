#![allow(non_snake_case)]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

use p521::{
    elliptic_curve::{
        hash2curve::{ExpandMsgXmd, GroupDigest},
        sec1::{FromEncodedPoint, ToEncodedPoint},
        Field as FFField, PrimeField,
    },
    AffinePoint, EncodedPoint, FieldBytes, NistP521, ProjectivePoint, Scalar,
};
use rand_core::{CryptoRng, RngCore};
use sha2::Sha512;

use quorum_core::{ExpandError, ExpanderMd, GroupId};

pub use quorum_core::{Field, FieldError, Group, GroupError};


/// Length of a scalar or base field encoding: 521 bits rounded up to whole bytes.
const FIELD_BYTES: usize = 66;

/// The order of the P-521 scalar field, big-endian.
const ORDER: [u8; FIELD_BYTES] = [
    0x01, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xfa, 0x51, 0x86, 0x87, 0x83, 0xbf, 0x2f, 0x96, 0x6b, 0x7f, 0xcc, 0x01, 0x48, 0xf7, 0x09,
    0xa5, 0xd0, 0x3b, 0xb5, 0xc9, 0xb8, 0x89, 0x9c, 0x47, 0xae, 0xbb, 0x6f, 0xb7, 0x1e, 0x91, 0x38,
    0x64, 0x09,
];

#[derive(Clone, Copy)]
/// An implementation of the P-521 scalar field.
pub struct P521ScalarField;

impl Field for P521ScalarField {
    type Scalar = Scalar;

    /// Big-endian, left-padded to 66 bytes.
    type Serialization = [u8; FIELD_BYTES];

    const BITS: usize = 521;

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
        let mut bytes = [0u8; FIELD_BYTES];
        bytes.copy_from_slice(&scalar.to_repr());
        bytes
    }

    fn deserialize(buf: &Self::Serialization) -> Result<Self::Scalar, FieldError> {
        let field_bytes = FieldBytes::clone_from_slice(buf);
        Option::from(Scalar::from_repr(field_bytes)).ok_or(FieldError::MalformedScalar)
    }

    fn little_endian_serialize(scalar: &Self::Scalar) -> Self::Serialization {
        let mut array = Self::serialize(scalar);
        array.reverse();
        array
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// An implementation of the NIST P-521 group, hashed into with
/// `P521_XMD:SHA-512_SSWU_RO_`.
pub struct P521Group;

impl Group for P521Group {
    type Field = P521ScalarField;

    type Element = ProjectivePoint;

    /// Compressed SEC 1 encoding: a 1-byte prefix and 66 bytes for the x coordinate.
    type Serialization = [u8; FIELD_BYTES + 1];

    type UncompressedSerialization = [u8; 2 * FIELD_BYTES + 1];

    type Expander = ExpanderMd<Sha512>;

    const ID: GroupId = GroupId::P521;

    const SECURITY_BITS: usize = 256;

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
        NistP521::hash_from_bytes::<ExpandMsgXmd<Sha512>>(&[msg], &[dst])
            .map_err(|_| ExpandError::InvalidLength)
    }

    fn serialize(element: &Self::Element) -> Result<Self::Serialization, GroupError> {
        encode_point(element, true)
    }

    fn deserialize(buf: &Self::Serialization) -> Result<Self::Element, GroupError> {
        decode_point(buf)
    }

    fn serialize_uncompressed(
        element: &Self::Element,
    ) -> Result<Self::UncompressedSerialization, GroupError> {
        encode_point(element, false)
    }

    fn deserialize_uncompressed(
        buf: &Self::UncompressedSerialization,
    ) -> Result<Self::Element, GroupError> {
        decode_point(buf)
    }
}

fn encode_point<const N: usize>(
    element: &ProjectivePoint,
    compress: bool,
) -> Result<[u8; N], GroupError> {
    if *element == ProjectivePoint::IDENTITY {
        return Err(GroupError::InvalidIdentityElement);
    }
    element
        .to_affine()
        .to_encoded_point(compress)
        .as_bytes()
        .try_into()
        .map_err(|_| GroupError::MalformedElement)
}

fn decode_point(buf: &[u8]) -> Result<ProjectivePoint, GroupError> {
    let encoded_point = EncodedPoint::from_bytes(buf).map_err(|_| GroupError::MalformedElement)?;

    match Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded_point)) {
        Some(point) if point.is_identity().into() => Err(GroupError::InvalidIdentityElement),
        Some(point) => Ok(ProjectivePoint::from(point)),
        None => Err(GroupError::MalformedElement),
    }
}

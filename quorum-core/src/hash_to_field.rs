//! Hashing to the scalar field of a prime-order group, following `hash_to_field` from
//! [RFC 9380].
//!
//! The expanded bytes are oversampled by the group's security level and reduced without
//! rejection, so the output bias is bounded by `2^-k`.
//!
//! [RFC 9380]: https://datatracker.ietf.org/doc/html/rfc9380#name-hash_to_field-implementatio

use crate::{ExpandError, Expander, Field, Group, GroupScalar};

/// Number of expanded bytes consumed per field element: `ceil((ceil(log2(p)) + k) / 8)`.
pub fn field_element_length<G: Group>() -> usize {
    (<G::Field as Field>::BITS + G::SECURITY_BITS).div_ceil(8)
}

/// Hashes `msg` to `count` scalars of `G`'s field under the domain separation tag `dst`.
pub fn hash_to_field<G: Group>(
    msg: &[u8],
    dst: &[u8],
    count: usize,
) -> Result<Vec<GroupScalar<G>>, ExpandError> {
    let length = field_element_length::<G>();
    let uniform_bytes = G::expander(dst)?.expand(msg, count * length)?;

    Ok(uniform_bytes
        .chunks_exact(length)
        .map(reduce::<G::Field>)
        .collect())
}

/// Interprets `bytes` as a big-endian integer and reduces it into the field.
fn reduce<F: Field>(bytes: &[u8]) -> F::Scalar {
    // 7-byte limbs keep every limb and its radix within a u64.
    bytes.chunks(7).fold(F::zero(), |acc, limb| {
        let radix = F::from_u64(1 << (8 * limb.len()));
        let value = limb.iter().fold(0u64, |v, b| (v << 8) | u64::from(*b));
        acc * radix + F::from_u64(value)
    })
}

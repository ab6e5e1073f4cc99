//! Message expanders from [RFC 9380], used to hash into fields and groups.
//!
//! [RFC 9380]: https://datatracker.ietf.org/doc/html/rfc9380#name-expand_message

use core::marker::PhantomData;

use digest::{core_api::BlockSizeUser, Digest, ExtendableOutput, Update, XofReader};

use crate::ExpandError;

const OVERSIZE_DST_PREFIX: &[u8] = b"H2C-OVERSIZE-DST-";
const MAX_DST_LEN: usize = 255;

/// Deterministically expands a message into a pseudorandom byte string of any requested length,
/// under a domain separation tag fixed at construction.
///
/// An expander can be reused for any number of messages; the derived tag is computed once.
pub trait Expander {
    /// Expands `msg` into `len` bytes.
    fn expand(&self, msg: &[u8], len: usize) -> Result<Vec<u8>, ExpandError>;
}

/// `expand_message_xmd`, for Merkle-Damgård hash functions.
pub struct ExpanderMd<H> {
    dst_prime: Vec<u8>,
    _hash: PhantomData<H>,
}

impl<H> ExpanderMd<H>
where
    H: Digest + BlockSizeUser,
{
    /// Creates an expander for the domain separation tag `dst`.
    ///
    /// Tags longer than 255 bytes are replaced by `H("H2C-OVERSIZE-DST-" || dst)`.
    pub fn new(dst: &[u8]) -> Result<Self, ExpandError> {
        if dst.is_empty() {
            return Err(ExpandError::EmptyDst);
        }
        let mut dst_prime = if dst.len() > MAX_DST_LEN {
            H::new()
                .chain_update(OVERSIZE_DST_PREFIX)
                .chain_update(dst)
                .finalize()
                .to_vec()
        } else {
            dst.to_vec()
        };
        if dst_prime.len() > MAX_DST_LEN {
            return Err(ExpandError::InvalidLength);
        }
        dst_prime.push(dst_prime.len() as u8);

        Ok(Self {
            dst_prime,
            _hash: PhantomData,
        })
    }
}

impl<H> Expander for ExpanderMd<H>
where
    H: Digest + BlockSizeUser,
{
    fn expand(&self, msg: &[u8], len: usize) -> Result<Vec<u8>, ExpandError> {
        let b_len = <H as Digest>::output_size();
        let ell = len.div_ceil(b_len);
        if len == 0 || ell > 255 || len > u16::MAX as usize {
            return Err(ExpandError::InvalidLength);
        }

        let z_pad = vec![0u8; H::block_size()];
        let b_0 = H::new()
            .chain_update(&z_pad)
            .chain_update(msg)
            .chain_update((len as u16).to_be_bytes())
            .chain_update([0u8])
            .chain_update(&self.dst_prime)
            .finalize();

        let mut uniform_bytes = Vec::with_capacity(ell * b_len);
        // b_1 hashes b_0 itself, which is b_0 XOR an all-zero block.
        let mut b_prev = vec![0u8; b_len];
        for i in 1..=ell {
            let chained: Vec<u8> = b_0.iter().zip(b_prev.iter()).map(|(a, b)| a ^ b).collect();
            let b_i = H::new()
                .chain_update(&chained)
                .chain_update([i as u8])
                .chain_update(&self.dst_prime)
                .finalize();
            uniform_bytes.extend_from_slice(&b_i);
            b_prev = b_i.to_vec();
        }
        uniform_bytes.truncate(len);

        Ok(uniform_bytes)
    }
}

/// `expand_message_xof`, for extendable-output functions.
pub struct ExpanderXof<X> {
    dst_prime: Vec<u8>,
    _xof: PhantomData<X>,
}

impl<X> ExpanderXof<X>
where
    X: Default + Update + ExtendableOutput,
{
    /// Creates an expander for the domain separation tag `dst` at a security level of
    /// `security_bits`.
    ///
    /// Tags longer than 255 bytes are replaced by `ceil(2 * security_bits / 8)` bytes of
    /// `X("H2C-OVERSIZE-DST-" || dst)`.
    pub fn new(dst: &[u8], security_bits: usize) -> Result<Self, ExpandError> {
        if dst.is_empty() {
            return Err(ExpandError::EmptyDst);
        }
        let mut dst_prime = if dst.len() > MAX_DST_LEN {
            let mut xof = X::default();
            xof.update(OVERSIZE_DST_PREFIX);
            xof.update(dst);
            let mut hashed = vec![0u8; (2 * security_bits).div_ceil(8)];
            xof.finalize_xof().read(&mut hashed);
            hashed
        } else {
            dst.to_vec()
        };
        if dst_prime.len() > MAX_DST_LEN {
            return Err(ExpandError::InvalidLength);
        }
        dst_prime.push(dst_prime.len() as u8);

        Ok(Self {
            dst_prime,
            _xof: PhantomData,
        })
    }
}

impl<X> Expander for ExpanderXof<X>
where
    X: Default + Update + ExtendableOutput,
{
    fn expand(&self, msg: &[u8], len: usize) -> Result<Vec<u8>, ExpandError> {
        if len == 0 || len > u16::MAX as usize {
            return Err(ExpandError::InvalidLength);
        }

        let mut xof = X::default();
        xof.update(msg);
        xof.update(&(len as u16).to_be_bytes());
        xof.update(&self.dst_prime);

        let mut uniform_bytes = vec![0u8; len];
        xof.finalize_xof().read(&mut uniform_bytes);

        Ok(uniform_bytes)
    }
}

#[cfg(test)]
mod tests {
    use hex::FromHex;
    use sha2::{Sha256, Sha512};
    use sha3::{Shake128, Shake256};

    use super::*;

    const XMD_DST: &[u8] = b"QUUX-V01-CS02-with-expander-SHA256-128";
    const XOF_DST: &[u8] = b"QUUX-V01-CS02-with-expander-SHAKE128";

    fn bytes(s: &str) -> Vec<u8> {
        Vec::from_hex(s).unwrap()
    }

    #[test]
    fn xmd_sha256_vectors() {
        let expander = ExpanderMd::<Sha256>::new(XMD_DST).unwrap();

        assert_eq!(
            expander.expand(b"", 0x20).unwrap(),
            bytes("68a985b87eb6b46952128911f2a4412bbc302a9d759667f87f7a21d803f07235")
        );
        assert_eq!(
            expander.expand(b"abc", 0x20).unwrap(),
            bytes("d8ccab23b5985ccea865c6c97b6e5b8350e794e603b4b97902f53a8a0d605615")
        );
        assert_eq!(
            expander.expand(b"", 0x80).unwrap(),
            bytes(
                "af84c27ccfd45d41914fdff5df25293e221afc53d8ad2ac06d5e3e29485dadbe\
                 e0d121587713a3e0dd4d5e69e93eb7cd4f5df4cd103e188cf60cb02edc3edf18\
                 eda8576c412b18ffb658e3dd6ec849469b979d444cf7b26911a08e63cf31f9dc\
                 c541708d3491184472c2c29bb749d4286b004ceb5ee6b9a7fa5b646c993f0ced"
            )
        );
    }

    #[test]
    fn xmd_sha256_oversize_dst() {
        let dst = [
            b"QUUX-V01-CS02-with-expander-SHA256-128-long-DST-".as_slice(),
            &[b'1'; 250],
        ]
        .concat();
        assert_eq!(dst.len(), 298);
        let expander = ExpanderMd::<Sha256>::new(&dst).unwrap();

        assert_eq!(
            expander.expand(b"", 0x20).unwrap(),
            bytes("868c54ab0d2d9649f2021e47ba9f4af7ac9c694d6fcdd23cb887fbd14df21597")
        );
    }

    #[test]
    fn xof_shake128_vectors() {
        let expander = ExpanderXof::<Shake128>::new(XOF_DST, 128).unwrap();

        assert_eq!(
            expander.expand(b"", 0x20).unwrap(),
            bytes("86518c9cd86581486e9485aa74ab35ba150d1c75c88e26b7043e44e2acd735a2")
        );
        assert_eq!(
            expander.expand(b"abc", 0x20).unwrap(),
            bytes("8696af52a4d862417c0763556073f47bc9b9ba43c99b505305cb1ec04a9ab468")
        );
    }

    #[test]
    fn xof_shake128_oversize_dst() {
        let dst = [
            b"QUUX-V01-CS02-with-expander-SHAKE128-long-DST-".as_slice(),
            &[b'1'; 249],
        ]
        .concat();
        assert_eq!(dst.len(), 295);
        let expander = ExpanderXof::<Shake128>::new(&dst, 128).unwrap();

        assert_eq!(
            expander.expand(b"", 0x20).unwrap(),
            bytes("e7aaf1ab0c7e6e11d289cf47a288fef733147fc7202df4739843725140fcffca")
        );
    }

    #[test]
    fn expander_is_reusable() {
        let expander = ExpanderMd::<Sha512>::new(b"reuse").unwrap();
        let first = expander.expand(b"message", 64).unwrap();
        let other = expander.expand(b"another message", 64).unwrap();
        let again = expander.expand(b"message", 64).unwrap();

        assert_eq!(first, again);
        assert_ne!(first, other);
    }

    #[test]
    fn output_length_bounds() {
        let md = ExpanderMd::<Sha256>::new(XMD_DST).unwrap();
        assert_eq!(md.expand(b"", 0), Err(ExpandError::InvalidLength));
        assert_eq!(md.expand(b"", 255 * 32).map(|v| v.len()), Ok(255 * 32));
        assert_eq!(md.expand(b"", 255 * 32 + 1), Err(ExpandError::InvalidLength));

        let xof = ExpanderXof::<Shake256>::new(XOF_DST, 224).unwrap();
        assert_eq!(xof.expand(b"", 0xffff).map(|v| v.len()), Ok(0xffff));
        assert_eq!(xof.expand(b"", 0x10000), Err(ExpandError::InvalidLength));
    }

    #[test]
    fn empty_dst_is_rejected() {
        assert!(matches!(
            ExpanderMd::<Sha256>::new(b""),
            Err(ExpandError::EmptyDst)
        ));
        assert!(matches!(
            ExpanderXof::<Shake128>::new(b"", 128),
            Err(ExpandError::EmptyDst)
        ));
    }
}

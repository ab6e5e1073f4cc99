//! Non-adjacent form (NAF) of a scalar, and variable-time multiscalar multiplication.
//!
//! Only for public inputs: signature and share verification.

use core::fmt::{self, Debug};

use byteorder::{ByteOrder, LittleEndian};

use crate::{Field, Group, GroupScalar};

/// Computes a width-\\(w\\) "Non-Adjacent Form" of this scalar.
///
/// Follows the width-w NAF computation of curve25519-dalek.
///
/// The output has one more digit than the scalar has bits, since the recoding can carry out of
/// the top bit.
pub(crate) fn non_adjacent_form<F: Field>(scalar: &F::Scalar, w: usize) -> Vec<i8> {
    // required by the NAF definition
    debug_assert!(w >= 2);
    // required so that the NAF digits fit in i8
    debug_assert!(w <= 8);

    let bytes = F::little_endian_serialize(scalar);
    let bytes = bytes.as_ref();
    let bits = bytes.len() * 8;

    // One spare limb so that windows straddling the top limb read zeroes.
    let mut x_u64 = vec![0u64; bytes.len().div_ceil(8) + 1];
    for (limb, chunk) in x_u64.iter_mut().zip(bytes.chunks(8)) {
        let mut buf = [0u8; 8];
        buf[..chunk.len()].copy_from_slice(chunk);
        *limb = LittleEndian::read_u64(&buf);
    }

    let mut naf = vec![0i8; bits + 1];

    let width = 1 << w;
    let window_mask = width - 1;

    let mut pos = 0;
    let mut carry = 0;
    while pos <= bits {
        // Construct a buffer of bits of the scalar, starting at bit `pos`
        let u64_idx = pos / 64;
        let bit_idx = pos % 64;
        let bit_buf: u64 = if bit_idx < 64 - w {
            // This window's bits are contained in a single u64
            x_u64[u64_idx] >> bit_idx
        } else {
            // Combine the current u64's bits with the bits from the next u64
            (x_u64[u64_idx] >> bit_idx) | (x_u64[1 + u64_idx] << (64 - bit_idx))
        };

        // Add the carry into the current window
        let window = carry + (bit_buf & window_mask);

        if window & 1 == 0 {
            // If the window value is even, preserve the carry and continue.
            pos += 1;
            continue;
        }

        if window < width / 2 {
            carry = 0;
            naf[pos] = window as i8;
        } else {
            carry = 1;
            naf[pos] = (window as i8).wrapping_sub(width as i8);
        }

        pos += w;
    }

    naf
}

/// Holds odd multiples 1A, 3A, ..., 15A of a point A.
#[derive(Copy, Clone)]
pub(crate) struct LookupTable5<T>(pub(crate) [T; 8]);

impl<T: Copy> LookupTable5<T> {
    /// Given public, odd \\( x \\) with \\( 0 < x < 2^4 \\), return \\(xA\\).
    pub fn select(&self, x: usize) -> T {
        debug_assert_eq!(x & 1, 1);
        debug_assert!(x < 16);

        self.0[x / 2]
    }
}

impl<T: Debug> Debug for LookupTable5<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LookupTable5({:?})", self.0)
    }
}

fn lookup_table<G: Group>(A: &G::Element) -> LookupTable5<G::Element> {
    let mut Ai = [*A; 8];
    let A2 = G::double(A);
    for i in 0..7 {
        Ai[i + 1] = Ai[i] + A2;
    }
    // Now Ai = [A, 3A, 5A, 7A, 9A, 11A, 13A, 15A]
    LookupTable5(Ai)
}

/// Computes `c_1 E_1 + ... + c_n E_n` in variable time.
///
/// It is an error to call this function with slices of different lengths.
pub(crate) fn vartime_multiscalar_mul<G: Group>(
    scalars: &[GroupScalar<G>],
    elements: &[G::Element],
) -> G::Element {
    debug_assert_eq!(scalars.len(), elements.len());

    let nafs: Vec<_> = scalars
        .iter()
        .map(|c| non_adjacent_form::<G::Field>(c, 5))
        .collect();

    let lookup_tables: Vec<_> = elements
        .iter()
        .map(lookup_table::<G>)
        .collect();

    let digits = nafs.iter().map(|naf| naf.len()).max().unwrap_or(0);
    let mut r = G::identity();

    for i in (0..digits).rev() {
        r = G::double(&r);

        for (naf, lookup_table) in nafs.iter().zip(lookup_tables.iter()) {
            match naf.get(i).copied().unwrap_or(0) {
                d if d > 0 => r = r + lookup_table.select(d as usize),
                d if d < 0 => r = r - lookup_table.select(-d as usize),
                _ => {}
            }
        }
    }

    r
}

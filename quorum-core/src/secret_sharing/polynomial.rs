//! Polynomials over a group's scalar field, and Lagrange interpolation.

use core::sync::atomic;

use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{Error, Field, Group, GroupScalar};

use super::{CoefficientCommitment, SecretCommitment};

/// A polynomial over the scalar field of `G`, stored constant term first.
///
/// When used for secret sharing, the constant term is the secret.
pub struct Polynomial<G: Group> {
    coefficients: Vec<GroupScalar<G>>,
}

impl<G> Polynomial<G>
where
    G: Group,
{
    /// Creates a polynomial of the given degree with `constant` as its constant term and the
    /// other coefficients sampled uniformly at random.
    pub fn random<R: RngCore + CryptoRng>(
        rng: &mut R,
        degree: usize,
        constant: GroupScalar<G>,
    ) -> Self {
        let mut coefficients = Vec::with_capacity(degree + 1);
        coefficients.push(constant);
        coefficients.extend((0..degree).map(|_| <G::Field>::random(rng)));
        Self { coefficients }
    }

    /// Creates a polynomial from its coefficients, constant term first.
    pub fn from_coefficients(coefficients: Vec<GroupScalar<G>>) -> Result<Self, Error> {
        if coefficients.is_empty() {
            return Err(Error::BadParameters);
        }
        Ok(Self { coefficients })
    }

    /// The degree of the polynomial (its number of coefficients minus one).
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// The coefficients, constant term first.
    pub fn coefficients(&self) -> &[GroupScalar<G>] {
        &self.coefficients
    }

    /// Evaluates the polynomial at `x` using Horner's method.
    pub fn evaluate(&self, x: &GroupScalar<G>) -> GroupScalar<G> {
        self.coefficients
            .iter()
            .rev()
            .fold(<G::Field>::zero(), |acc, coefficient| acc * *x + *coefficient)
    }

    /// Commits to every coefficient as `coefficient * G`.
    pub fn commit(&self) -> SecretCommitment<G> {
        SecretCommitment::new(
            self.coefficients
                .iter()
                .map(|c| CoefficientCommitment::new(G::mul_base(c)))
                .collect(),
        )
    }
}

impl<G> Zeroize for Polynomial<G>
where
    G: Group,
{
    fn zeroize(&mut self) {
        for coefficient in self.coefficients.iter_mut() {
            *coefficient = <G::Field>::zero();
        }
        atomic::compiler_fence(atomic::Ordering::SeqCst);
    }
}

impl<G> Drop for Polynomial<G>
where
    G: Group,
{
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<G> ZeroizeOnDrop for Polynomial<G> where G: Group {}

/// Computes the Lagrange coefficient of the `index`-th point of `xs`, evaluated at `at`:
///
/// `L_i(at) = prod_{j != i} (at - x_j) / (x_i - x_j)`
///
/// At `at = 0` this is `prod_{j != i} x_j / (x_j - x_i)`, the weight of the i-th share when
/// recovering the secret. Fails with [`Error::ZeroEvaluation`] if any point is zero (reserved
/// for the secret), and with [`Error::DuplicatedIdentifier`] if two points coincide.
pub fn lagrange_coefficient<G: Group>(
    index: usize,
    xs: &[GroupScalar<G>],
    at: &GroupScalar<G>,
) -> Result<GroupScalar<G>, Error> {
    let zero = <G::Field>::zero();
    let x_i = *xs.get(index).ok_or(Error::BadParameters)?;

    let mut num = <G::Field>::one();
    let mut den = <G::Field>::one();
    for (j, x_j) in xs.iter().enumerate() {
        if *x_j == zero {
            return Err(Error::ZeroEvaluation);
        }
        if j == index {
            continue;
        }
        num = num * (*at - *x_j);
        den = den * (x_i - *x_j);
    }

    let den = <G::Field>::invert(&den).map_err(|_| Error::DuplicatedIdentifier)?;
    Ok(num * den)
}

/// Interpolates the polynomial through `points` and evaluates it at zero.
pub fn interpolate_at_zero<G: Group>(
    points: &[(GroupScalar<G>, GroupScalar<G>)],
) -> Result<GroupScalar<G>, Error> {
    let zero = <G::Field>::zero();
    let xs: Vec<_> = points.iter().map(|(x, _)| *x).collect();

    points
        .iter()
        .enumerate()
        .try_fold(zero, |acc, (i, (_, y))| {
            Ok(acc + lagrange_coefficient::<G>(i, &xs, &zero)? * *y)
        })
}

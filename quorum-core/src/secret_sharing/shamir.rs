//! Shamir secret sharing.

use core::fmt::{self, Debug};
use std::collections::BTreeSet;

use derive_getters::Getters;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::{serialization::SerializableScalar, Error, Field, Group, GroupScalar, Identifier};

use super::{interpolate_at_zero, Polynomial};

/// A share of a secret: the evaluation of the sharing polynomial at `x = identifier`.
#[derive(Clone, Copy, PartialEq, Eq, Getters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "G: Group"))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct SecretShare<G: Group> {
    /// The evaluation point.
    pub(crate) identifier: Identifier,
    /// The polynomial evaluated at the identifier.
    #[getter(skip)]
    pub(crate) value: SerializableScalar<G>,
}

impl<G> SecretShare<G>
where
    G: Group,
{
    /// Create a new [`SecretShare`].
    pub fn new(identifier: Identifier, value: GroupScalar<G>) -> Self {
        Self {
            identifier,
            value: SerializableScalar(value),
        }
    }

    /// The share value.
    pub fn value(&self) -> GroupScalar<G> {
        self.value.0
    }
}

impl<G> Debug for SecretShare<G>
where
    G: Group,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretShare")
            .field("identifier", &self.identifier)
            .field("value", &"<redacted>")
            .finish()
    }
}

impl<G> Zeroize for SecretShare<G>
where
    G: Group,
{
    fn zeroize(&mut self) {
        self.value = SerializableScalar(<G::Field>::zero());
    }
}

/// A `t`-of-`n` Shamir secret sharing scheme over the scalar field of `G`.
///
/// The secret is the constant term of a random polynomial of degree `t`; any `t + 1` of the `n`
/// shares recover it and `t` or fewer reveal nothing about it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shamir<G: Group> {
    threshold: u16,
    max_participants: u16,
    _group: core::marker::PhantomData<G>,
}

impl<G> Shamir<G>
where
    G: Group,
{
    /// Creates a scheme with polynomial degree `threshold` over `max_participants` shares.
    ///
    /// Fails with [`Error::BadParameters`] unless `0 < threshold <= max_participants`.
    pub fn new(threshold: u16, max_participants: u16) -> Result<Self, Error> {
        if threshold == 0 || threshold > max_participants {
            return Err(Error::BadParameters);
        }
        Ok(Self {
            threshold,
            max_participants,
            _group: core::marker::PhantomData,
        })
    }

    /// The polynomial degree `t`.
    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    /// The number of shares `n`.
    pub fn max_participants(&self) -> u16 {
        self.max_participants
    }

    /// Splits `secret` into `n` shares with identifiers `1..=n`.
    pub fn shard_secret<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        secret: &GroupScalar<G>,
    ) -> Vec<SecretShare<G>> {
        let polynomial = Polynomial::<G>::random(rng, self.threshold as usize, *secret);
        self.shard_secret_with_polynomial(&polynomial)
    }

    /// Evaluates a caller-supplied polynomial at `1..=n`.
    pub(crate) fn shard_secret_with_polynomial(
        &self,
        polynomial: &Polynomial<G>,
    ) -> Vec<SecretShare<G>> {
        (1..=self.max_participants)
            .map(|id| {
                let identifier = Identifier(id);
                let x = identifier.to_scalar::<G::Field>();
                SecretShare::new(identifier, polynomial.evaluate(&x))
            })
            .collect()
    }

    /// Recovers the secret from more than `t` and at most `n` shares, given in any order.
    pub fn recover_secret(&self, shares: &[SecretShare<G>]) -> Result<GroupScalar<G>, Error> {
        if shares.len() <= self.threshold as usize || shares.len() > self.max_participants as usize
        {
            return Err(Error::Threshold);
        }
        recover(shares)
    }
}

/// Lagrange-interpolates the secret from `shares`, rejecting duplicated identifiers.
pub(crate) fn recover<G: Group>(shares: &[SecretShare<G>]) -> Result<GroupScalar<G>, Error> {
    let identifiers: BTreeSet<_> = shares.iter().map(|s| s.identifier).collect();
    if identifiers.len() != shares.len() {
        return Err(Error::DuplicatedIdentifier);
    }

    let points: Vec<_> = shares
        .iter()
        .map(|s| (s.identifier.to_scalar::<G::Field>(), s.value()))
        .collect();
    interpolate_at_zero::<G>(&points)
}

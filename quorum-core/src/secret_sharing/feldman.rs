//! Feldman verifiable secret sharing.

use core::fmt::{self, Debug};

use rand_core::{CryptoRng, RngCore};

use crate::{serialization::SerializableElement, Error, Group, GroupScalar};

use super::{Polynomial, SecretShare, Shamir};

/// A commitment to a single polynomial coefficient, `coefficient * G`.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "G: Group"))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CoefficientCommitment<G: Group>(pub(crate) SerializableElement<G>);

impl<G> CoefficientCommitment<G>
where
    G: Group,
{
    /// Create a new CoefficientCommitment.
    pub fn new(value: G::Element) -> Self {
        Self(SerializableElement(value))
    }

    /// Returns inner element value
    pub fn value(&self) -> G::Element {
        self.0 .0
    }

    /// Serialize the commitment.
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        self.0.serialize()
    }

    /// Deserialize a commitment.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self(SerializableElement::deserialize(bytes)?))
    }
}

impl<G> Debug for CoefficientCommitment<G>
where
    G: Group,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CoefficientCommitment")
            .field(
                &self
                    .serialize()
                    .map(hex::encode)
                    .unwrap_or("<invalid>".to_string()),
            )
            .finish()
    }
}

/// The public commitment to a sharing polynomial: `t + 1` coefficient commitments, constant
/// term first. The first entry commits to the secret itself.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "G: Group"))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SecretCommitment<G: Group>(pub(crate) Vec<CoefficientCommitment<G>>);

impl<G> SecretCommitment<G>
where
    G: Group,
{
    /// Create a new SecretCommitment.
    pub fn new(coefficients: Vec<CoefficientCommitment<G>>) -> Self {
        Self(coefficients)
    }

    /// The coefficient commitments, constant term first.
    pub fn coefficients(&self) -> &[CoefficientCommitment<G>] {
        &self.0
    }

    /// The polynomial degree the commitment binds.
    pub fn degree(&self) -> Option<usize> {
        self.0.len().checked_sub(1)
    }

    /// The commitment to the secret, `secret * G`.
    pub fn public_key(&self) -> Result<G::Element, Error> {
        self.0
            .first()
            .map(|c| c.value())
            .ok_or(Error::InvalidSecretShare)
    }

    /// Serialize every coefficient commitment.
    pub fn serialize(&self) -> Result<Vec<Vec<u8>>, Error> {
        self.0.iter().map(|cc| cc.serialize()).collect()
    }

    /// Deserialize from a list of serialized coefficient commitments.
    pub fn deserialize<I, V>(serialized_coefficient_commitments: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = V>,
        V: AsRef<[u8]>,
    {
        serialized_coefficient_commitments
            .into_iter()
            .map(|cc| CoefficientCommitment::deserialize(cc.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Evaluates the committed polynomial "in the exponent" at `x`,
    /// `sum_i commitment[i] * x^i`, using Horner's method.
    pub fn evaluate(&self, x: &GroupScalar<G>) -> G::Element {
        self.0
            .iter()
            .rev()
            .fold(G::identity(), |acc, c| acc * *x + c.value())
    }
}

/// Feldman's verifiable secret sharing: Shamir sharing plus public commitments that let every
/// participant check its share without learning the secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Feldman<G: Group> {
    shamir: Shamir<G>,
}

impl<G> Feldman<G>
where
    G: Group,
{
    /// Creates a scheme with polynomial degree `threshold` over `max_participants` shares.
    pub fn new(threshold: u16, max_participants: u16) -> Result<Self, Error> {
        Ok(Self {
            shamir: Shamir::new(threshold, max_participants)?,
        })
    }

    /// The underlying Shamir scheme.
    pub fn shamir(&self) -> &Shamir<G> {
        &self.shamir
    }

    /// Splits `secret` into `n` shares and commits to the sharing polynomial.
    pub fn shard_secret<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
        secret: &GroupScalar<G>,
    ) -> (Vec<SecretShare<G>>, SecretCommitment<G>) {
        let polynomial = Polynomial::<G>::random(rng, self.shamir.threshold() as usize, *secret);
        let commitment = polynomial.commit();
        let shares = self.shamir.shard_secret_with_polynomial(&polynomial);
        (shares, commitment)
    }

    /// Recovers the secret from more than `t` and at most `n` shares.
    pub fn recover_secret(&self, shares: &[SecretShare<G>]) -> Result<GroupScalar<G>, Error> {
        self.shamir.recover_secret(shares)
    }

    /// Checks `share.value * G == sum_i commitment[i] * share.identifier^i`.
    ///
    /// A mismatch means the dealer misbehaved or the share was corrupted in transit.
    pub fn verify_share(share: &SecretShare<G>, commitment: &SecretCommitment<G>) -> bool {
        if commitment.0.is_empty() {
            return false;
        }
        let x = share.identifier.to_scalar::<G::Field>();
        G::mul_base(&share.value()) == commitment.evaluate(&x)
    }
}


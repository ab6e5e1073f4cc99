//! Shamir and Feldman secret sharing over the scalar field of a prime-order group.

mod feldman;
mod polynomial;
mod shamir;

pub use feldman::{CoefficientCommitment, Feldman, SecretCommitment};
pub use polynomial::{interpolate_at_zero, lagrange_coefficient, Polynomial};
pub use shamir::{SecretShare, Shamir};

pub(crate) use shamir::recover;

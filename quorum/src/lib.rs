#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![doc = document_features::document_features!()]

use core::{fmt, str::FromStr};

use thiserror::Error;

pub use quorum_core::{Ciphersuite, Field, Group, GroupError, GroupId};
pub use quorum_decaf448::Decaf448Group;
pub use quorum_p256::{P256Group, P256Sha256};
pub use quorum_p384::P384Group;
pub use quorum_p521::P521Group;
pub use quorum_ristretto255::{Ristretto255Sha512, RistrettoGroup};

/// An error raised by a registry lookup.
#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum RegistryError {
    /// The group name is not registered.
    #[error("Unknown group name.")]
    UnknownGroup,
    /// The ciphersuite name is not registered.
    #[error("Unknown ciphersuite name.")]
    UnknownSuite,
    /// No ciphersuite is registered over this group.
    #[error("No ciphersuite is registered over this group.")]
    NoSuiteForGroup,
}

impl From<GroupError> for RegistryError {
    fn from(_: GroupError) -> Self {
        RegistryError::UnknownGroup
    }
}

/// Registered FROST ciphersuites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SuiteId {
    /// FROST(P-256, SHA-256).
    P256Sha256,
    /// FROST(ristretto255, SHA-512).
    Ristretto255Sha512,
}

impl SuiteId {
    /// All registered ciphersuites.
    pub const ALL: [SuiteId; 2] = [SuiteId::P256Sha256, SuiteId::Ristretto255Sha512];

    /// The group the ciphersuite operates over.
    pub fn group(&self) -> GroupId {
        match self {
            SuiteId::P256Sha256 => GroupId::P256,
            SuiteId::Ristretto255Sha512 => GroupId::Ristretto255,
        }
    }

    /// The context string prefixed to every hash label of the ciphersuite.
    pub fn context_string(&self) -> &'static str {
        match self {
            SuiteId::P256Sha256 => P256Sha256::ID,
            SuiteId::Ristretto255Sha512 => Ristretto255Sha512::ID,
        }
    }

    /// The ciphersuite registered over `group`, if any.
    pub fn for_group(group: GroupId) -> Result<SuiteId, RegistryError> {
        SuiteId::ALL
            .into_iter()
            .find(|suite| suite.group() == group)
            .ok_or(RegistryError::NoSuiteForGroup)
    }
}

impl fmt::Display for SuiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.context_string())
    }
}

impl FromStr for SuiteId {
    type Err = RegistryError;

    /// Parses a ciphersuite from its context string, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SuiteId::ALL
            .into_iter()
            .find(|suite| suite.context_string().eq_ignore_ascii_case(s))
            .ok_or(RegistryError::UnknownSuite)
    }
}

/// Code that is generic over a [`Group`], run by [`with_group`] for a group chosen at runtime.
pub trait GroupVisitor {
    /// The result of the visit.
    type Output;

    /// Runs with `G` set to the selected group.
    fn visit<G: Group>(self) -> Self::Output;
}

/// Code that is generic over a [`Ciphersuite`], run by [`with_suite`] for a ciphersuite chosen
/// at runtime.
pub trait SuiteVisitor {
    /// The result of the visit.
    type Output;

    /// Runs with `C` set to the selected ciphersuite.
    fn visit<C: Ciphersuite>(self) -> Self::Output;
}

/// Runs `visitor` over the group registered as `id`.
pub fn with_group<V: GroupVisitor>(id: GroupId, visitor: V) -> V::Output {
    tracing::trace!(group = %id, "dispatching to group backend");

    match id {
        GroupId::P256 => visitor.visit::<P256Group>(),
        GroupId::P384 => visitor.visit::<P384Group>(),
        GroupId::P521 => visitor.visit::<P521Group>(),
        GroupId::Ristretto255 => visitor.visit::<RistrettoGroup>(),
        GroupId::Decaf448 => visitor.visit::<Decaf448Group>(),
    }
}

/// Runs `visitor` over the ciphersuite registered as `id`.
pub fn with_suite<V: SuiteVisitor>(id: SuiteId, visitor: V) -> V::Output {
    tracing::trace!(suite = %id, "dispatching to ciphersuite backend");

    match id {
        SuiteId::P256Sha256 => visitor.visit::<P256Sha256>(),
        SuiteId::Ristretto255Sha512 => visitor.visit::<Ristretto255Sha512>(),
    }
}

/// Looks a group up by name, as accepted by [`GroupId`]'s `FromStr`, and runs `visitor` over
/// it.
pub fn with_group_name<V: GroupVisitor>(
    name: &str,
    visitor: V,
) -> Result<V::Output, RegistryError> {
    let id = name.parse::<GroupId>()?;
    Ok(with_group(id, visitor))
}

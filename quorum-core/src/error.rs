//! Error types

use thiserror::Error;

use crate::Identifier;

/// An error related to a scalar field.
#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum FieldError {
    /// The encoding of a field scalar was malformed or not canonical.
    #[error("Malformed scalar encoding.")]
    MalformedScalar,
    /// This scalar MUST NOT be zero.
    #[error("Invalid for this scalar to be zero.")]
    InvalidZeroScalar,
}

/// An error related to a prime-order group.
#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum GroupError {
    /// The encoding of a group element was malformed or not canonical.
    #[error("Malformed group element encoding.")]
    MalformedElement,
    /// This element MUST NOT be the identity.
    #[error("Invalid for this element to be the identity.")]
    InvalidIdentityElement,
    /// The group name is not registered.
    #[error("Unknown group name.")]
    UnknownGroup,
}

/// An error raised while expanding a message with an [`crate::Expander`].
#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExpandError {
    /// The domain separation tag is empty.
    #[error("Domain separation tag must not be empty.")]
    EmptyDst,
    /// The requested output length is zero or too large for the expander.
    #[error("Requested expansion length is out of range.")]
    InvalidLength,
}

/// An error related to secret sharing or threshold signing.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// The threshold and the number of participants are inconsistent.
    #[error("threshold must be positive and not larger than the number of participants")]
    BadParameters,
    /// The number of shares or signers is outside the (threshold, max] range.
    #[error("Number of shares is outside of the accepted range.")]
    Threshold,
    /// Not enough signers took part in the signing operation.
    #[error("Not enough signature shares to reach the threshold.")]
    InsufficientShares,
    /// A zero x-coordinate was used for interpolation.
    #[error("Cannot interpolate with a zero evaluation point.")]
    ZeroEvaluation,
    /// The same identifier appears more than once.
    #[error("Duplicated identifier.")]
    DuplicatedIdentifier,
    /// Identifiers MUST NOT be zero.
    #[error("Invalid for the identifier to be zero.")]
    InvalidZeroIdentifier,
    /// This identifier is unserializable.
    #[error("Malformed identifier is unserializable.")]
    MalformedIdentifier,
    /// The encoding of a signing key was malformed.
    #[error("Malformed signing key encoding.")]
    MalformedSigningKey,
    /// The encoding of a verifying key was malformed.
    #[error("Malformed verifying key encoding.")]
    MalformedVerifyingKey,
    /// The encoding of a signature was malformed.
    #[error("Malformed signature encoding.")]
    MalformedSignature,
    /// The encoding of signing commitments was malformed.
    #[error("Malformed signing commitments encoding.")]
    MalformedCommitments,
    /// Signature verification failed.
    #[error("Invalid signature.")]
    InvalidSignature,
    /// Signature share verification failed.
    #[error("Invalid signature share.")]
    InvalidSignatureShare {
        /// The identifier of the signer whose share validation failed.
        culprit: Identifier,
    },
    /// Secret share verification failed.
    #[error("Invalid secret share.")]
    InvalidSecretShare,
    /// The commitment list is not sorted by identifier, or contains duplicates.
    #[error("Commitments must be sorted by identifier without duplicates.")]
    UnsortedCommitments,
    /// The signer's commitment is missing from the commitment list.
    #[error("Signer's commitment is missing.")]
    MissingCommitment,
    /// The signer's commitment in the list does not match its nonces.
    #[error("Signer's commitment does not match its nonces.")]
    IncorrectCommitment,
    /// A nonce commitment equals the identity.
    #[error("Commitment equals the identity.")]
    IdentityCommitment,
    /// A signature share is missing for a committed signer.
    #[error("Signature share is missing for a committed signer.")]
    MissingSignatureShare,
    /// The group commitment equals the identity.
    #[error("Group commitment equals the identity.")]
    IdentityGroupCommitment,
    /// Error in scalar field.
    #[error("Error in scalar field.")]
    FieldError(#[from] FieldError),
    /// Error in elliptic curve group.
    #[error("Error in elliptic curve group.")]
    GroupError(#[from] GroupError),
    /// Error while hashing to the field or group.
    #[error("Error while expanding a message.")]
    ExpandError(#[from] ExpandError),
}

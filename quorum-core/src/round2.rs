//! FROST Round 2 functionality and types, for signature share generation

use core::fmt::{self, Debug};

use derive_getters::Getters;

use crate::{
    challenge, compute_binding_factor, compute_group_commitment, derive_interpolating_value,
    round1::{SigningCommitments, SigningNonces},
    scalar_mul::vartime_multiscalar_mul,
    serialization::SerializableScalar,
    validate_signing_commitments, BindingFactor, Challenge, Ciphersuite, Element, Error, Group,
    Identifier, PeerSigner, Scalar,
};

use crate::keys::{SigningShare, VerifyingShare};

/// A participant's signature share, which the combiner aggregates with all other signer's
/// shares into the joint signature.
#[derive(Clone, Copy, Eq, PartialEq, Getters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct SignatureShare<C: Ciphersuite> {
    /// The signer that produced the share.
    pub(crate) identifier: Identifier,
    /// This participant's signature over the message.
    #[getter(skip)]
    pub(crate) share: SerializableScalar<C::Group>,
}

impl<C> SignatureShare<C>
where
    C: Ciphersuite,
{
    /// Create a new [`SignatureShare`] from an identifier and a scalar.
    #[cfg_attr(feature = "internals", visibility::make(pub))]
    #[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
    pub(crate) fn new(identifier: Identifier, scalar: Scalar<C>) -> Self {
        Self {
            identifier,
            share: SerializableScalar(scalar),
        }
    }

    /// Get the inner scalar.
    pub fn to_scalar(&self) -> Scalar<C> {
        self.share.0
    }

    /// Deserialize [`SignatureShare`] from `identifier || share` bytes.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < 2 {
            return Err(Error::MalformedIdentifier);
        }
        let (identifier, share) = bytes.split_at(2);
        Ok(Self {
            identifier: Identifier::deserialize(identifier)?,
            share: SerializableScalar::deserialize(share)?,
        })
    }

    /// Serialize [`SignatureShare`] to `identifier || share` bytes.
    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = self.identifier.serialize().to_vec();
        bytes.extend_from_slice(&self.share.serialize());
        bytes
    }

    /// Tests if a signature share issued by a participant is valid before aggregating it into
    /// a final joint signature: `z_i * G == R_i + (c * lambda_i) * Y_i`.
    pub(crate) fn verify(
        &self,
        group_commitment_share: &Element<C>,
        verifying_share: &VerifyingShare<C>,
        lambda_i: Scalar<C>,
        challenge: &Challenge<C>,
    ) -> Result<(), Error> {
        let z_i = self.to_scalar();
        let c_lambda = challenge.0 * lambda_i;

        let R_i = vartime_multiscalar_mul::<C::Group>(
            &[z_i, -c_lambda],
            &[<C::Group>::generator(), verifying_share.to_element()],
        );

        if R_i != *group_commitment_share {
            return Err(Error::InvalidSignatureShare {
                culprit: self.identifier,
            });
        }

        Ok(())
    }
}

impl<C> Debug for SignatureShare<C>
where
    C: Ciphersuite,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureShare")
            .field("identifier", &self.identifier)
            .field("share", &hex::encode(self.share.serialize()))
            .finish()
    }
}

/// A signer's contribution to the group commitment: `hiding + rho * binding`.
pub(crate) fn compute_group_commitment_share<C: Ciphersuite>(
    signing_commitments: &SigningCommitments<C>,
    binding_factor: &BindingFactor<C>,
) -> Element<C> {
    signing_commitments.hiding.value() + signing_commitments.binding.value() * binding_factor.0
}

/// Compute the signature share for a signing operation:
/// `z_i = d_i + (e_i * rho) + (lambda_i * s_i * c)`.
#[cfg_attr(feature = "internals", visibility::make(pub))]
#[cfg_attr(docsrs, doc(cfg(feature = "internals")))]
fn compute_signature_share<C: Ciphersuite>(
    identifier: Identifier,
    signer_nonces: &SigningNonces<C>,
    binding_factor: BindingFactor<C>,
    lambda_i: Scalar<C>,
    signing_share: &SigningShare<C>,
    challenge: Challenge<C>,
) -> SignatureShare<C> {
    let z_share: Scalar<C> = signer_nonces.hiding.to_scalar()
        + (signer_nonces.binding.to_scalar() * binding_factor.0)
        + (lambda_i * signing_share.to_scalar() * challenge.0);

    SignatureShare::<C>::new(identifier, z_share)
}

/// Performed once by each participant selected for the signing operation.
///
/// Receives the message to be signed and the full list of signing commitments (sorted by
/// identifier, one per signer), the signer's nonces (consumed here) and its [`PeerSigner`].
///
/// Assuming the checks pass, the nonces are used to produce a signature share and are then
/// dropped, which zeroizes them.
pub fn sign<C: Ciphersuite>(
    message: &[u8],
    signer_nonces: SigningNonces<C>,
    signing_commitments: &[SigningCommitments<C>],
    signer: &PeerSigner<C>,
) -> Result<SignatureShare<C>, Error> {
    if signing_commitments.len() <= *signer.threshold() as usize {
        return Err(Error::InsufficientShares);
    }
    if signing_commitments.len() > *signer.max_signers() as usize {
        return Err(Error::Threshold);
    }
    validate_signing_commitments(signing_commitments)?;

    let identifier = *signer.identifier();

    // Validate the signer's commitment is present in the commitment list
    let own_commitment = signing_commitments
        .binary_search_by_key(&identifier, |c| c.identifier)
        .map(|index| &signing_commitments[index])
        .map_err(|_| Error::MissingCommitment)?;

    // The listed commitment must be the one these nonces produced
    if own_commitment != signer_nonces.commitments() {
        return Err(Error::IncorrectCommitment);
    }

    let binding_factor = compute_binding_factor(signing_commitments, message)?;
    let group_commitment = compute_group_commitment(signing_commitments, &binding_factor)?;
    if group_commitment.0 == <C::Group>::identity() {
        return Err(Error::IdentityGroupCommitment);
    }

    let lambda_i = derive_interpolating_value(&identifier, signing_commitments)?;
    let challenge = challenge::<C>(&group_commitment.0, signer.verifying_key(), message)?;

    let signature_share = compute_signature_share(
        identifier,
        &signer_nonces,
        binding_factor,
        lambda_i,
        signer.signing_share(),
        challenge,
    );

    tracing::debug!(
        identifier = %identifier,
        signers = signing_commitments.len(),
        "produced signature share"
    );

    Ok(signature_share)
}


//! The coordinator of a threshold signing session: checks signature shares and aggregates them.

use std::collections::BTreeMap;

use crate::{
    challenge, compute_binding_factor, compute_group_commitment, derive_interpolating_value,
    keys::{validate_num_of_signers, PublicKeyPackage},
    round1::SigningCommitments,
    round2::{compute_group_commitment_share, SignatureShare},
    validate_signing_commitments, BindingFactor, Challenge, Ciphersuite, Error, Field, Group,
    GroupCommitment, Identifier, Signature, VerifyingKey,
};

/// Aggregates signature shares from more than `threshold` signers into a group signature.
///
/// The combiner holds only public data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combiner<C: Ciphersuite> {
    public_key_package: PublicKeyPackage<C>,
}

/// The per-session values every share check and the aggregation derive from.
struct Session<C: Ciphersuite> {
    binding_factor: BindingFactor<C>,
    group_commitment: GroupCommitment<C>,
    challenge: Challenge<C>,
}

impl<C> Combiner<C>
where
    C: Ciphersuite,
{
    /// Creates a combiner for the group described by `public_key_package`.
    ///
    /// Fails with [`Error::BadParameters`] unless `0 < threshold < max_signers`.
    pub fn new(public_key_package: PublicKeyPackage<C>) -> Result<Self, Error> {
        validate_num_of_signers(
            public_key_package.threshold,
            public_key_package.max_signers,
        )?;
        Ok(Self { public_key_package })
    }

    /// The polynomial degree `t`.
    pub fn threshold(&self) -> u16 {
        self.public_key_package.threshold
    }

    /// The total number of participants `n`.
    pub fn max_signers(&self) -> u16 {
        self.public_key_package.max_signers
    }

    /// The group verifying key.
    pub fn verifying_key(&self) -> &VerifyingKey<C> {
        &self.public_key_package.verifying_key
    }

    /// The public key package this combiner was built from.
    pub fn public_key_package(&self) -> &PublicKeyPackage<C> {
        &self.public_key_package
    }

    fn session(
        &self,
        message: &[u8],
        signing_commitments: &[SigningCommitments<C>],
    ) -> Result<Session<C>, Error> {
        if signing_commitments.len() <= self.threshold() as usize {
            return Err(Error::InsufficientShares);
        }
        if signing_commitments.len() > self.max_signers() as usize {
            return Err(Error::Threshold);
        }
        validate_signing_commitments(signing_commitments)?;

        let binding_factor = compute_binding_factor(signing_commitments, message)?;
        let group_commitment = compute_group_commitment(signing_commitments, &binding_factor)?;
        if group_commitment.0 == <C::Group>::identity() {
            return Err(Error::IdentityGroupCommitment);
        }
        let challenge = challenge::<C>(&group_commitment.0, self.verifying_key(), message)?;

        Ok(Session {
            binding_factor,
            group_commitment,
            challenge,
        })
    }

    /// Pairs every commitment with the share from the same signer.
    ///
    /// Every committed signer must have sent exactly one share, and no share may come from a
    /// signer without a commitment.
    fn match_shares<'a>(
        signing_commitments: &'a [SigningCommitments<C>],
        signature_shares: &'a [SignatureShare<C>],
    ) -> Result<Vec<(&'a SigningCommitments<C>, &'a SignatureShare<C>)>, Error> {
        let mut by_identifier: BTreeMap<Identifier, &SignatureShare<C>> = BTreeMap::new();
        for share in signature_shares {
            if by_identifier.insert(share.identifier, share).is_some() {
                return Err(Error::DuplicatedIdentifier);
            }
        }
        if by_identifier.len() > signing_commitments.len() {
            return Err(Error::MissingCommitment);
        }

        signing_commitments
            .iter()
            .map(|commitment| {
                by_identifier
                    .get(&commitment.identifier)
                    .map(|share| (commitment, *share))
                    .ok_or(Error::MissingSignatureShare)
            })
            .collect()
    }

    fn verify_share_in_session(
        &self,
        session: &Session<C>,
        signing_commitments: &[SigningCommitments<C>],
        commitment: &SigningCommitments<C>,
        signature_share: &SignatureShare<C>,
    ) -> Result<(), Error> {
        let culprit = signature_share.identifier;
        let verifying_share = self
            .public_key_package
            .verifying_shares
            .get(&culprit)
            .ok_or(Error::InvalidSignatureShare { culprit })?;

        let lambda_i = derive_interpolating_value(&culprit, signing_commitments)?;
        let R_i = compute_group_commitment_share(commitment, &session.binding_factor);

        signature_share.verify(&R_i, verifying_share, lambda_i, &session.challenge)
    }

    /// Verifies a single signer's share against its commitment and verifying share.
    ///
    /// Fails with [`Error::InvalidSignatureShare`] naming the signer if the share is invalid.
    pub fn verify_signature_share(
        &self,
        message: &[u8],
        signing_commitments: &[SigningCommitments<C>],
        signature_share: &SignatureShare<C>,
    ) -> Result<(), Error> {
        let session = self.session(message, signing_commitments)?;
        let commitment = signing_commitments
            .binary_search_by_key(&signature_share.identifier, |c| c.identifier)
            .map(|index| &signing_commitments[index])
            .map_err(|_| Error::MissingCommitment)?;

        self.verify_share_in_session(&session, signing_commitments, commitment, signature_share)
    }

    /// Checks that there is exactly one valid share per committed signer.
    pub fn check_signature_shares(
        &self,
        message: &[u8],
        signing_commitments: &[SigningCommitments<C>],
        signature_shares: &[SignatureShare<C>],
    ) -> bool {
        let check = || -> Result<(), Error> {
            let session = self.session(message, signing_commitments)?;
            for (commitment, share) in Self::match_shares(signing_commitments, signature_shares)? {
                self.verify_share_in_session(&session, signing_commitments, commitment, share)?;
            }
            Ok(())
        };

        match check() {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%err, "signature share check failed");
                false
            }
        }
    }

    /// Aggregates the signature shares into a group signature `(R, z)` with
    /// `z = sum_i z_i`.
    ///
    /// The shares are not verified here: a single invalid share yields a signature that fails
    /// verification, with no indication of which signer sent it. Call
    /// [`Combiner::check_signature_shares`] first, or use [`Combiner::aggregate_verified`].
    pub fn sign(
        &self,
        message: &[u8],
        signing_commitments: &[SigningCommitments<C>],
        signature_shares: &[SignatureShare<C>],
    ) -> Result<Signature<C>, Error> {
        let session = self.session(message, signing_commitments)?;
        let pairs = Self::match_shares(signing_commitments, signature_shares)?;

        let z = pairs
            .iter()
            .fold(<<C::Group as Group>::Field>::zero(), |z, (_, share)| {
                z + share.to_scalar()
            });

        tracing::debug!(signers = pairs.len(), "aggregated signature shares");

        Ok(Signature::new(session.group_commitment.0, z))
    }

    /// Aggregates the signature shares and verifies the result against the group verifying
    /// key.
    ///
    /// If the group signature does not verify, every share is checked so that the error names
    /// the misbehaving signer ([`Error::InvalidSignatureShare`]).
    pub fn aggregate_verified(
        &self,
        message: &[u8],
        signing_commitments: &[SigningCommitments<C>],
        signature_shares: &[SignatureShare<C>],
    ) -> Result<Signature<C>, Error> {
        let signature = self.sign(message, signing_commitments, signature_shares)?;

        if let Err(err) = self.verifying_key().verify(message, &signature) {
            let session = self.session(message, signing_commitments)?;
            for (commitment, share) in Self::match_shares(signing_commitments, signature_shares)? {
                self.verify_share_in_session(&session, signing_commitments, commitment, share)
                    .inspect_err(|err| tracing::warn!(%err, "found invalid signature share"))?;
            }
            return Err(err);
        }

        Ok(signature)
    }
}

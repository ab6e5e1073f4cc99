//! A participant in threshold signing.

use derive_getters::Getters;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

use crate::{
    keys::{validate_num_of_signers, KeyShare, SigningShare, VerifyingShare},
    round1::{self, SigningCommitments, SigningNonces},
    round2::{self, SignatureShare},
    secret_sharing::{Feldman, SecretCommitment, SecretShare},
    Ciphersuite, Error, Identifier, VerifyingKey,
};

/// A FROST participant, holding its signing share along with the public data it needs to
/// produce signature shares.
///
/// Build one from a [`KeyShare`] with `PeerSigner::try_from`, which checks the share against
/// the dealer's commitment first.
#[derive(Clone, Debug, PartialEq, Eq, Getters, Zeroize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "C: Ciphersuite"))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct PeerSigner<C: Ciphersuite> {
    /// Denotes the participant identifier each secret share key package is owned by.
    #[zeroize(skip)]
    pub(crate) identifier: Identifier,
    /// This participant's signing share. This is secret.
    pub(crate) signing_share: SigningShare<C>,
    /// This participant's public key.
    #[zeroize(skip)]
    pub(crate) verifying_share: VerifyingShare<C>,
    /// The public verifying key that represents the entire group.
    #[zeroize(skip)]
    pub(crate) verifying_key: VerifyingKey<C>,
    /// The polynomial degree: more than this many signers must take part.
    #[zeroize(skip)]
    pub(crate) threshold: u16,
    /// The total number of participants.
    #[zeroize(skip)]
    pub(crate) max_signers: u16,
}

impl<C> PeerSigner<C>
where
    C: Ciphersuite,
{
    /// Create a new [`PeerSigner`].
    ///
    /// Fails with [`Error::BadParameters`] unless `0 < threshold < max_signers`.
    pub fn new(
        identifier: Identifier,
        signing_share: SigningShare<C>,
        verifying_key: VerifyingKey<C>,
        threshold: u16,
        max_signers: u16,
    ) -> Result<Self, Error> {
        validate_num_of_signers(threshold, max_signers)?;

        Ok(Self {
            identifier,
            signing_share,
            verifying_share: VerifyingShare::from(signing_share),
            verifying_key,
            threshold,
            max_signers,
        })
    }

    /// Round 1: draws fresh hiding and binding nonces and commits to them.
    ///
    /// The nonces stay with this signer and must be passed to [`PeerSigner::sign`] exactly
    /// once; the commitments go to the combiner.
    pub fn commit<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> Result<(SigningNonces<C>, SigningCommitments<C>), Error> {
        round1::commit(self.identifier, &self.signing_share, rng)
    }

    /// Checks this signer's share against a Feldman commitment, and that the commitment binds
    /// the group verifying key this signer holds.
    pub fn check_key_share(&self, commitment: &SecretCommitment<C::Group>) -> bool {
        let share = SecretShare::<C::Group>::new(self.identifier, self.signing_share.to_scalar());

        Feldman::verify_share(&share, commitment)
            && commitment
                .public_key()
                .is_ok_and(|pk| pk == self.verifying_key.to_element())
    }

    /// Round 2: produces this signer's share of the signature over `message`.
    ///
    /// `signing_commitments` must hold one commitment per signer, sorted by identifier, and
    /// include this signer's own. The nonces are consumed.
    pub fn sign(
        &self,
        message: &[u8],
        signer_nonces: SigningNonces<C>,
        signing_commitments: &[SigningCommitments<C>],
    ) -> Result<SignatureShare<C>, Error> {
        round2::sign(message, signer_nonces, signing_commitments, self)
    }
}

impl<C> TryFrom<KeyShare<C>> for PeerSigner<C>
where
    C: Ciphersuite,
{
    type Error = Error;

    /// Tries to verify a share and construct a [`PeerSigner`] from it.
    ///
    /// When participants receive a [`KeyShare`] from the dealer, they *MUST* verify the
    /// integrity of the share before continuing on to transform it into a signing/verification
    /// keypair. Here, we assume that every participant has the same view of the commitment
    /// issued by the dealer, but implementations *MUST* make sure that all participants have a
    /// consistent view of this commitment in practice.
    fn try_from(key_share: KeyShare<C>) -> Result<Self, Error> {
        let (verifying_share, verifying_key) = key_share.verify()?;
        let threshold = key_share.threshold()?;

        let signer = Self::new(
            key_share.identifier,
            key_share.signing_share,
            verifying_key,
            threshold,
            key_share.max_signers,
        )?;
        debug_assert_eq!(signer.verifying_share, verifying_share);

        Ok(signer)
    }
}

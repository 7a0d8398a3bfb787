#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use crate::{primitives::Signature, versions::VersionedMessage};

/// A transaction carrying either a legacy or a v0 message.
///
/// Signatures come first on the wire so that signature verification can
/// run over `message` bytes without reparsing them.
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct VersionedTransaction {
    /// List of signatures, one per required signer.
    #[cfg_attr(feature = "serde", serde(with = "limcode_short_vec"))]
    pub signatures: Vec<Signature>,
    /// Message to sign.
    pub message: VersionedMessage,
}

impl VersionedTransaction {
    /// Number of signatures the message's header requires.
    pub fn required_signature_count(&self) -> usize {
        usize::from(self.header_signature_count())
    }

    fn header_signature_count(&self) -> u8 {
        self.message.header().num_required_signatures
    }
}

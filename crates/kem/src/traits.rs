//! Collaborator-facing interface

/// Text encryption as the chat layer consumes it
///
/// Neither method fails: encryption falls back to the plaintext and
/// decryption to the plaintext (for non-ciphertext input) or a fixed
/// placeholder.
pub trait MessageCipher {
    /// Encrypt `plaintext` to its wire form
    fn encrypt(&self, plaintext: &str) -> String;

    /// Decrypt a wire form produced by [`MessageCipher::encrypt`]
    fn decrypt(&self, ciphertext: &str) -> String;
}

//! Encryption public key of the deploying account.
//!
//! Clients encrypt data for the account with the X25519 public key that
//! belongs to the account's private key. This is the key wallets hand out
//! for `eth_getEncryptionPublicKey`: the 32 private key bytes are used as
//! the X25519 secret and the resulting public key is base64 encoded.

use {
    alloy::primitives::B256,
    anyhow::{Context, Result},
    base64::{Engine, engine::general_purpose::STANDARD},
    std::path::Path,
    x25519_dalek::{PublicKey, StaticSecret},
};

pub fn encryption_public_key(private_key: &B256) -> String {
    let secret = StaticSecret::from(private_key.0);
    let public = PublicKey::from(&secret);
    STANDARD.encode(public.as_bytes())
}

/// Derives the encryption public key and writes it to `path`, replacing
/// whatever was there.
pub fn export(private_key: &B256, path: &Path) -> Result<String> {
    let key = encryption_public_key(private_key);
    tracing::info!("Encryption public key: {key}");
    std::fs::write(path, &key)
        .with_context(|| format!("failed to write encryption public key to {path:?}"))?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::b256};

    #[test]
    fn rfc7748_test_vector() {
        // RFC 7748 section 6.1, Alice's key pair.
        let private_key =
            b256!("0x77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a");
        assert_eq!(
            encryption_public_key(&private_key),
            "hSDwCYkwp1R0i33ctD73Wg2/Og0mOBr066SpjqqbTmo="
        );
    }

    #[test]
    fn writes_key_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("encryption-public-key.txt");
        std::fs::write(&path, "stale content from a previous run").unwrap();

        let private_key =
            b256!("0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80");
        let key = export(&private_key, &path).unwrap();

        assert_eq!(key, "mtrHp1WHZM9rxF2Ilot9Hie5XmQcKCf7oDQ1DpGkTSI=");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), key);
    }

    #[test]
    fn fails_on_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("encryption-public-key.txt");
        assert!(export(&B256::repeat_byte(1), &path).is_err());
    }
}

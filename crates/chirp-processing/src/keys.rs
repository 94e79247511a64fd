use rand::Rng;

const KEY_ENTROPY_BYTES: usize = 16;

/// Generate a storage key `<32 hex chars>.<extension>` from 128 random bits.
///
/// The client filename is never part of the key.
pub fn generate_storage_key(extension: &str) -> String {
    let mut token = [0u8; KEY_ENTROPY_BYTES];
    rand::rng().fill(&mut token);
    format!("{}.{}", hex::encode(token), extension.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_shape() {
        let key = generate_storage_key("JPG");
        let (token, ext) = key.split_once('.').unwrap();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(ext, "jpg");
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<String> = (0..10_000).map(|_| generate_storage_key("png")).collect();
        assert_eq!(keys.len(), 10_000);
    }
}

use rand::{rngs::OsRng, RngCore};

const TOKEN_BYTES: usize = 24;

/// Opaque capability token printed into a table's QR code.
pub fn generate() -> String {
    let mut buf = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tokens_are_hex_and_fixed_length() {
        let token = generate();
        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_do_not_repeat() {
        assert_ne!(generate(), generate());
    }
}

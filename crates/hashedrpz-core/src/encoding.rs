//! Label encoding: RFC4648 base32hex, lowercased, without padding.
//!
//! This is the same alphabet DNSSEC uses for NSEC3 owner names, so encoded
//! labels are valid DNS labels.

use data_encoding::BASE32_DNSSEC;

/// The output alphabet.
pub const ALPHABET: &str = "0123456789abcdefghijklmnopqrstuv";

/// Encode digest bytes into a DNS-safe label.
#[must_use]
pub fn encode_label(digest: &[u8]) -> String {
    BASE32_DNSSEC.encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::encoded_len;

    #[test]
    fn rfc4648_base32hex_vectors_lowercased() {
        // RFC4648 section 10, with padding removed
        assert_eq!(encode_label(b""), "");
        assert_eq!(encode_label(b"f"), "co");
        assert_eq!(encode_label(b"fo"), "cpng");
        assert_eq!(encode_label(b"foo"), "cpnmu");
        assert_eq!(encode_label(b"foob"), "cpnmuog");
        assert_eq!(encode_label(b"fooba"), "cpnmuoj1");
        assert_eq!(encode_label(b"foobar"), "cpnmuoj1e8");
    }

    #[test]
    fn only_alphabet_characters() {
        let encoded = encode_label(&[0xff; 16]);
        assert_eq!(encoded.len(), encoded_len(16));
        assert!(encoded.chars().all(|c| ALPHABET.contains(c)));
    }
}

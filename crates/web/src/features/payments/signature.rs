use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn hmac_hex(secret: &str, message: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Signature the gateway computes for a checkout: HMAC-SHA256 over
/// `"<order_id>|<payment_id>"` with the key secret, hex encoded.
pub fn compute_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    hmac_hex(secret, &format!("{}|{}", order_id, payment_id))
}

/// Exact match against the signature supplied in the callback payload.
pub fn verify_signature(secret: &str, order_id: &str, payment_id: &str, supplied: &str) -> bool {
    compute_signature(secret, order_id, payment_id) == supplied
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4231 test case 2 for HMAC-SHA-256.
    #[test]
    fn hmac_matches_known_vector() {
        assert_eq!(
            hmac_hex("Jefe", "what do ya want for nothing?"),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn valid_signature_verifies() {
        let secret = "test_key_secret";
        let signature = compute_signature(secret, "order_MFq3Zr2ab", "pay_MFq4Bq9cd");
        assert!(verify_signature(
            secret,
            "order_MFq3Zr2ab",
            "pay_MFq4Bq9cd",
            &signature
        ));
    }

    #[test]
    fn mutated_payload_fails_verification() {
        let secret = "test_key_secret";
        let signature = compute_signature(secret, "order_MFq3Zr2ab", "pay_MFq4Bq9cd");

        assert!(!verify_signature(
            secret,
            "order_MFq3Zr2aX",
            "pay_MFq4Bq9cd",
            &signature
        ));
        assert!(!verify_signature(
            secret,
            "order_MFq3Zr2ab",
            "pay_MFq4Bq9cX",
            &signature
        ));

        let mut tampered = signature.clone();
        tampered.replace_range(0..1, if &signature[0..1] == "0" { "1" } else { "0" });
        assert!(!verify_signature(
            secret,
            "order_MFq3Zr2ab",
            "pay_MFq4Bq9cd",
            &tampered
        ));
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let signature = compute_signature("right_secret", "order_1", "pay_1");
        assert!(!verify_signature("wrong_secret", "order_1", "pay_1", &signature));
    }
}

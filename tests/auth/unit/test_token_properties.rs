use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use learngate::auth::codec::{self, CodecError, Header};
use proptest::prelude::*;
use serde_json::{json, Value};

const SECRET: &[u8] = b"property-test-secret";

proptest! {
    // Flipping any single bit of the payload segment must invalidate the
    // signature, regardless of where the flip lands.
    #[test]
    fn flipping_any_payload_bit_invalidates_the_token(
        byte_index in 0usize..256,
        bit in 0u8..8,
    ) {
        let payload = json!({"userId": "42", "username": "alice", "type": "ACCESS"});
        let token = codec::encode(&Header::hs512(), &payload, SECRET).unwrap();

        let parts: Vec<&str> = token.split('.').collect();
        let mut payload_bytes = URL_SAFE_NO_PAD.decode(parts[1]).unwrap();
        let idx = byte_index % payload_bytes.len();
        payload_bytes[idx] ^= 1 << bit;
        let tampered =
            format!("{}.{}.{}", parts[0], URL_SAFE_NO_PAD.encode(&payload_bytes), parts[2]);

        let err = codec::decode::<Value>(&tampered, SECRET).unwrap_err();
        prop_assert!(matches!(err, CodecError::InvalidSignature));
    }

    #[test]
    fn round_trip_preserves_arbitrary_claims(
        username in "[a-zA-Z0-9_]{1,32}",
        subject in "[1-9][0-9]{0,8}",
    ) {
        let payload = json!({"userId": subject, "username": username});
        let token = codec::encode(&Header::hs512(), &payload, SECRET).unwrap();

        let (header, decoded): (Header, Value) = codec::decode(&token, SECRET).unwrap();
        prop_assert_eq!(header, Header::hs512());
        prop_assert_eq!(decoded, payload);
    }

    #[test]
    fn tokens_never_verify_under_a_different_secret(
        other_secret in proptest::collection::vec(any::<u8>(), 1..64),
    ) {
        prop_assume!(other_secret.as_slice() != SECRET);

        let payload = json!({"userId": "42"});
        let token = codec::encode(&Header::hs512(), &payload, SECRET).unwrap();

        let err = codec::decode::<Value>(&token, &other_secret).unwrap_err();
        prop_assert!(matches!(err, CodecError::InvalidSignature));
    }
}

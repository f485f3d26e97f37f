//! # Metrics Collection
//!
//! Authentication counters for the auth service, emitted through the
//! `metrics` facade so any exporter installed by the embedding process
//! picks them up.

use metrics::counter;

/// Record the outcome of an authentication attempt.
///
/// `result` is a short outcome label: `success`, `missing_credential`,
/// `unsupported_scheme`, `invalid_signature`, `expired`, `wrong_kind`,
/// `account_not_found`, `account_disabled`, `invalid_credentials` or `error`.
pub fn record_authentication(result: &str) {
    let labels = [("result", result.to_string())];
    counter!("auth_attempts_total", &labels).increment(1);
}

/// Record that a fresh access/refresh token pair was issued.
pub fn record_pair_issued(trigger: &str) {
    let labels = [("trigger", trigger.to_string())];
    counter!("auth_token_pairs_issued_total", &labels).increment(1);
}

/// Record a completed account registration.
pub fn record_registration() {
    counter!("auth_registrations_total").increment(1);
}

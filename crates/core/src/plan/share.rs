//! Share codes for public plans.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Length of a generated share code.
pub const SHARE_CODE_LEN: usize = 10;

/// Generates a random alphanumeric share code.
#[must_use]
pub fn generate_share_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SHARE_CODE_LEN)
        .map(char::from)
        .collect()
}

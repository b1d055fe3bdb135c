//! URL-safe text encoding used by share tokens.
//!
//! Standard base64 with `+` -> `-`, `/` -> `_` and the trailing `=` padding
//! removed. Decoding reverses the substitution and re-pads to a multiple of 4
//! before handing the text to the standard alphabet. Leftover bits in the
//! last symbol are ignored, so hand-trimmed tokens still decode.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD as BASE64};
use base64::Engine as _;
use tracing::debug;

use crate::{CoreError, CoreResult};

const LENIENT_DECODER: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

pub fn encode_url_safe(text: &str) -> String {
    let encoded = BASE64.encode(text.as_bytes());
    let token: String = encoded
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();

    debug!(input_len = text.len(), token_len = token.len(), "Encoded URL-safe token");
    token
}

pub fn decode_url_safe(token: &str) -> CoreResult<String> {
    let mut padded: String = token
        .trim()
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }

    let bytes = LENIENT_DECODER
        .decode(padded.as_bytes())
        .map_err(|e| CoreError::DecodingError(format!("Invalid share token: {e}")))?;

    String::from_utf8(bytes)
        .map_err(|e| CoreError::DecodingError(format!("Share token is not valid UTF-8: {e}")))
}

// OAuth 1.0a request signing (HMAC-SHA1) for the Twitter REST API.
//
// Every request carries an `Authorization: OAuth ...` header whose signature
// covers the HTTP method, the base URL and every query/form parameter:
//
//   base string = METHOD & enc(url) & enc(sorted "k=v" pairs joined by '&')
//   signing key = enc(consumer_secret) & enc(token_secret)
//   signature   = base64(hmac_sha1(key, base string))
//
// Nothing is validated up front. Bad credentials only show up as a 401 on the
// first signed call.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::RngCore;
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 unreserved characters are the only ones left unescaped.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// The four opaque strings that authorize calls on behalf of one account.
#[derive(Clone)]
pub struct Credentials {
    pub access_token: String,
    pub access_token_secret: String,
    pub consumer_key: String,
    pub consumer_key_secret: String,
}

impl Credentials {
    pub fn new(
        access_token: impl Into<String>,
        access_token_secret: impl Into<String>,
        consumer_key: impl Into<String>,
        consumer_key_secret: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            access_token_secret: access_token_secret.into(),
            consumer_key: consumer_key.into(),
            consumer_key_secret: consumer_key_secret.into(),
        }
    }
}

// Secrets stay out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .field("consumer_key", &"<redacted>")
            .field("consumer_key_secret", &"<redacted>")
            .finish()
    }
}

/// Percent-encode a string the way OAuth 1.0a requires.
pub fn encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

/// Build the `Authorization` header value for a request, using a fresh
/// nonce and the current time.
pub fn authorization_header(
    credentials: &Credentials,
    method: &str,
    url: &str,
    params: &[(&str, &str)],
) -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
        .to_string();

    let mut nonce_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut nonce_bytes);
    let nonce = hex::encode(nonce_bytes);

    authorization_header_with(credentials, method, url, params, &nonce, &timestamp)
}

/// Deterministic variant of [`authorization_header`] with caller-supplied
/// nonce and timestamp.
pub fn authorization_header_with(
    credentials: &Credentials,
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    nonce: &str,
    timestamp: &str,
) -> String {
    let unsigned = [
        ("oauth_consumer_key", credentials.consumer_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp),
        ("oauth_token", credentials.access_token.as_str()),
        ("oauth_version", "1.0"),
    ];

    let base = signature_base_string(method, url, params, &unsigned);
    let signature = sign(
        &credentials.consumer_key_secret,
        &credentials.access_token_secret,
        &base,
    );

    let mut oauth_params = unsigned.to_vec();
    oauth_params.push(("oauth_signature", signature.as_str()));
    oauth_params.sort_by(|a, b| a.0.cmp(b.0));

    let fields: Vec<String> = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
        .collect();
    format!("OAuth {}", fields.join(", "))
}

/// Assemble the signature base string from request and oauth parameters.
pub fn signature_base_string(
    method: &str,
    url: &str,
    params: &[(&str, &str)],
    oauth_params: &[(&str, &str)],
) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .chain(oauth_params.iter())
        .map(|(k, v)| (encode(k), encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_ascii_uppercase(),
        encode(url),
        encode(&param_string)
    )
}

fn sign(consumer_secret: &str, token_secret: &str, base: &str) -> String {
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC key of any size is valid"));
    mac.update(base.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

//! Salt, password, and HMAC-SHA256 credential derivation.

use crate::constants;
use crate::error::{ProvisionError, Result};
use crate::models::credential::Credential;
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use dialoguer::Password;
use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;
use std::io::{self, BufRead};
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Source of a password when the operator passes `-`.
pub trait PasswordPrompt {
    fn read_password(&self, username: &str) -> Result<Zeroizing<String>>;
}

/// No-echo terminal prompt.
pub struct TerminalPrompt;

impl PasswordPrompt for TerminalPrompt {
    fn read_password(&self, username: &str) -> Result<Zeroizing<String>> {
        Password::new()
            .with_prompt(format!("Password for {}", username))
            .allow_empty_password(false)
            .interact()
            .map(Zeroizing::new)
            .map_err(|e| ProvisionError::Prompt(io::Error::other(e)))
    }
}

/// Reads a single line from stdin, for automation.
pub struct StdinPrompt;

impl PasswordPrompt for StdinPrompt {
    fn read_password(&self, _username: &str) -> Result<Zeroizing<String>> {
        let mut buf = Zeroizing::new(String::new());
        io::stdin()
            .lock()
            .read_line(&mut buf)
            .map_err(ProvisionError::Prompt)?;
        Ok(Zeroizing::new(buf.trim_end_matches(['\r', '\n']).to_string()))
    }
}

fn random_bytes(size: usize) -> Result<Zeroizing<Vec<u8>>> {
    let mut buf = Zeroizing::new(vec![0u8; size]);
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(ProvisionError::EntropyUnavailable)?;
    Ok(buf)
}

/// `size` random bytes as lowercase hex.
pub fn generate_salt(size: usize) -> Result<String> {
    Ok(hex::encode(random_bytes(size)?.as_slice()))
}

/// 32 random bytes, URL-safe base64 with padding.
pub fn generate_password() -> Result<Zeroizing<String>> {
    let bytes = random_bytes(constants::GENERATED_PASSWORD_BYTES)?;
    Ok(Zeroizing::new(URL_SAFE.encode(bytes.as_slice())))
}

/// Resolve the password argument: absent or empty → generated, `-` → prompt,
/// anything else verbatim.
pub fn resolve_password(
    provided: Option<&str>,
    username: &str,
    prompt: &dyn PasswordPrompt,
) -> Result<Zeroizing<String>> {
    match provided {
        None | Some("") => generate_password(),
        Some(constants::PROMPT_SENTINEL) => prompt.read_password(username),
        Some(password) => Ok(Zeroizing::new(password.to_string())),
    }
}

/// HMAC-SHA256 keyed with the salt's text bytes over the password, hex encoded.
pub fn derive_digest(salt: &str, password: &str) -> String {
    // infallible: HMAC takes keys of any length
    let mut mac =
        HmacSha256::new_from_slice(salt.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(password.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// `username:salt$digest`
pub fn format_credential(username: &str, salt: &str, digest: &str) -> String {
    format!("{}:{}${}", username, salt, digest)
}

pub fn validate_username(username: &str) -> Result<()> {
    let reject = |reason| {
        Err(ProvisionError::InvalidUsername {
            username: username.to_string(),
            reason,
        })
    };
    if username.is_empty() {
        return reject("username cannot be empty");
    }
    if username.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return reject("whitespace and control characters not allowed");
    }
    if username.contains(constants::FORBIDDEN_USERNAME_CHARS) {
        return reject("':', '$' and '=' not allowed");
    }
    Ok(())
}

impl Credential {
    /// Generate a fresh salt and bind it to `password`.
    pub fn generate(username: &str, password: Zeroizing<String>, salt_size: usize) -> Result<Self> {
        let salt = generate_salt(salt_size)?;
        let digest = derive_digest(&salt, &password);
        Ok(Self {
            username: username.to_string(),
            password,
            salt,
            digest,
        })
    }
}

//! Derivation of the `X-Auth` credential.

use chrono::{DateTime, Utc};
use derive_more::Display;
use md5::{Digest, Md5};

/// Date format mixed into the credential, e.g. `20240307`.
const CREDENTIAL_DATE_FORMAT: &str = "%Y%m%d";

/// Value of the `X-Auth` header.
///
/// Only valid for the UTC calendar day it was derived for,
/// so it is derived again for every request rather than stored.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct Credential(String);

impl Credential {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Derive the credential for `secret` on the UTC day of `now`.
///
/// The credential is the hex encoded MD5 digest of `{secret}_{YYYYMMDD}`.
pub fn derive_credential(secret: &str, now: DateTime<Utc>) -> Credential {
    let date = now.format(CREDENTIAL_DATE_FORMAT);
    let mut hasher = Md5::new();
    hasher.update(format!("{secret}_{date}").as_bytes());
    Credential(format!("{:x}", hasher.finalize()))
}

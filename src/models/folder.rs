//! Validated folder identifier and the store keys derived from it.

use thiserror::Error;

const MAX_FOLDER_NAME_LEN: usize = 512;

#[derive(Debug, Error)]
#[error("folder name `{name}` invalid: {reason}")]
pub struct InvalidFolderName {
    pub name: String,
    pub reason: String,
}

/// A caller-supplied folder identifier that has passed validation.
///
/// The raw identifier comes straight out of the request path and is used
/// verbatim to build store keys, so anything that could widen or escape the
/// key prefix is rejected up front: empty names, embedded separators, `..`
/// sequences, control bytes, and surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderName(String);

impl FolderName {
    pub fn parse(name: &str) -> Result<Self, InvalidFolderName> {
        let reject = |reason: &str| {
            Err(InvalidFolderName {
                name: name.to_string(),
                reason: reason.to_string(),
            })
        };

        if name.is_empty() {
            return reject("cannot be empty");
        }
        if name.len() > MAX_FOLDER_NAME_LEN {
            return reject("exceeds maximum length");
        }
        if name.trim() != name {
            return reject("cannot begin or end with whitespace");
        }
        if name.contains('/') {
            return reject("cannot contain `/`");
        }
        if name.contains("..") {
            return reject("cannot contain `..`");
        }
        if name
            .bytes()
            .any(|b| b.is_ascii_control() || b == b'\\' || b == b'\0')
        {
            return reject("cannot contain control characters or backslashes");
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Listing prefix for this folder: `<base>/<name>/`, or `<name>/` when no
    /// base path is configured. The trailing slash keeps `reports` from
    /// matching `reports-old/`.
    pub fn key_prefix(&self, base_path: &str) -> String {
        match trimmed_base(base_path) {
            "" => format!("{}/", self.0),
            base => format!("{}/{}/", base, self.0),
        }
    }

    /// Key the finished archive is written to: `<base>/<name>.zip`.
    pub fn destination_key(&self, base_path: &str) -> String {
        match trimmed_base(base_path) {
            "" => format!("{}.zip", self.0),
            base => format!("{}/{}.zip", base, self.0),
        }
    }
}

impl std::fmt::Display for FolderName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn trimmed_base(base_path: &str) -> &str {
    base_path.trim_end_matches('/')
}

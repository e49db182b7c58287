/// Parameter field layout: priority vs. other groups

use crate::config::{NONCE_KEY, PRIORITY_KEYS};
use crate::error::{PopupError, PopupResult};
use crate::params::QueryParams;

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// One editable field as shown in the popup
#[derive(Debug, Clone, PartialEq)]
pub struct ParamEntry {
    pub key: String,
    pub value: String,
    pub can_generate: bool,
}

/// Which keys get a field, and in which group
///
/// Built once per loaded URL. Edits only change values, so a field the
/// user clears stays on screen even though its key left the mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamLayout {
    pub priority: Vec<String>,
    pub other: Vec<String>,
}

impl ParamLayout {
    pub fn from_params(params: &QueryParams) -> ParamLayout {
        let mut priority = vec![NONCE_KEY.to_string()];
        let mut other = Vec::new();

        for key in params.keys() {
            if key == NONCE_KEY {
                continue;
            }
            if PRIORITY_KEYS.contains(&key) {
                priority.push(key.to_string());
            } else {
                other.push(key.to_string());
            }
        }

        ParamLayout { priority, other }
    }

    /// Join the layout with current values; missing keys show as empty
    pub fn entries(&self, params: &QueryParams) -> (Vec<ParamEntry>, Vec<ParamEntry>) {
        let to_entry = |key: &String| ParamEntry {
            key: key.clone(),
            value: params.get(key).unwrap_or_default().to_string(),
            can_generate: key == NONCE_KEY,
        };

        (
            self.priority.iter().map(to_entry).collect(),
            self.other.iter().map(to_entry).collect(),
        )
    }
}

/// Random lowercase alphanumeric token, e.g. for `preview_nonce`
pub fn generate_token(len: usize) -> PopupResult<String> {
    let mut bytes = vec![0u8; len];
    getrandom::getrandom(&mut bytes).map_err(|e| PopupError::Token(e.to_string()))?;

    Ok(bytes
        .iter()
        .map(|b| TOKEN_ALPHABET[*b as usize % TOKEN_ALPHABET.len()] as char)
        .collect())
}

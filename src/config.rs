/// Fixed configuration for the popup

/// Hostname suffixes accepted by the validator
pub const ALLOWED_DOMAINS: &[&str] = &["cardcritics.com", "gobankingrates.com"];

/// Parameters rendered ahead of everything else, in this order
pub const PRIORITY_KEYS: &[&str] = &["subid", "preview_nonce"];

/// Always rendered, with a generate button
pub const NONCE_KEY: &str = "preview_nonce";

/// Length of a generated preview nonce
pub const TOKEN_LENGTH: usize = 8;

/// Keys owned in chrome.storage.local
pub const STORAGE_KEY_URL: &str = "url";
pub const STORAGE_KEY_TICKET: &str = "ticketId";
pub const STORAGE_KEY_ENV: &str = "env";

pub const STORAGE_KEYS: &[&str] = &[STORAGE_KEY_URL, STORAGE_KEY_TICKET, STORAGE_KEY_ENV];

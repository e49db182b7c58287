/// Deployment environments and hostname rewriting
use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::{PopupError, PopupResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Stage,
    Local,
    Ticket,
}

impl Environment {
    pub const ALL: [Environment; 4] = [
        Environment::Production,
        Environment::Stage,
        Environment::Local,
        Environment::Ticket,
    ];

    /// Value stored in chrome.storage and used for `<option value>`
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Stage => "stage",
            Environment::Local => "local",
            Environment::Ticket => "ticket",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Environment::Production => "Production",
            Environment::Stage => "Stage",
            Environment::Local => "Local",
            Environment::Ticket => "Ticket",
        }
    }

    /// Parse a stored selection; anything unrecognized (including "") is unset
    pub fn from_selection(value: &str) -> Option<Environment> {
        value.parse().ok()
    }

    /// First hostname label for this environment, or None when the
    /// ticket environment has no usable ticket id
    pub fn first_label(&self, ticket_id: &str) -> Option<String> {
        match self {
            Environment::Production => Some("www".to_string()),
            Environment::Stage => Some("stage".to_string()),
            Environment::Local => Some("l-www".to_string()),
            Environment::Ticket => {
                let ticket = ticket_id.trim();
                if ticket.is_empty() {
                    None
                } else {
                    Some(format!("{}-www", ticket))
                }
            }
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Environment::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or(())
    }
}

/// Rewrite the first hostname label for the selected environment
///
/// Returns a new URL; path, query and fragment are carried through and every
/// label after the first is left alone. With no selection, or the ticket
/// environment without a ticket id, the URL is returned unchanged.
///
/// Examples:
/// - foo.gobankingrates.com + Local → l-www.gobankingrates.com
/// - stage.cardcritics.com + Ticket("JIRA123") → jira123-www.cardcritics.com
/// - stage.cardcritics.com + Production → www.cardcritics.com
pub fn rewrite(url: &Url, selection: Option<Environment>, ticket_id: &str) -> PopupResult<Url> {
    let mut rewritten = url.clone();

    let label = match selection.and_then(|env| env.first_label(ticket_id)) {
        Some(label) => label,
        None => return Ok(rewritten),
    };

    let hostname = url
        .host_str()
        .ok_or_else(|| PopupError::InvalidHost(url.to_string()))?;

    let mut parts: Vec<&str> = hostname.split('.').collect();
    parts[0] = &label;
    let new_host = parts.join(".");

    rewritten
        .set_host(Some(&new_host))
        .map_err(|e| PopupError::InvalidHost(format!("{}: {}", new_host, e)))?;

    // set_host stops at a ':' in the label; the labels after the first must survive
    let tail = hostname.find('.').map(|i| &hostname[i..]).unwrap_or("");
    match rewritten.host_str() {
        Some(host) if host.len() > tail.len() && host.ends_with(tail) => Ok(rewritten),
        _ => Err(PopupError::InvalidHost(new_host)),
    }
}

/// Whether the open action is allowed
pub fn can_open(has_url: bool, selection: Option<Environment>, ticket_id: &str) -> bool {
    match selection {
        None => false,
        Some(Environment::Ticket) => has_url && !ticket_id.trim().is_empty(),
        Some(_) => has_url,
    }
}

/// Popup state and its event transitions
use url::Url;

use crate::environment::{Environment, can_open, rewrite};
use crate::error::PopupResult;
use crate::params::ParsedUrl;
use crate::render::{ParamEntry, ParamLayout};
use crate::storage::PersistedState;

#[derive(Debug, Clone, PartialEq)]
pub enum PopupEvent {
    /// Saved inputs read back from storage at startup
    Restore(PersistedState),
    /// URL field committed
    UrlChanged(String),
    EnvChanged(Option<Environment>),
    TicketChanged(String),
    /// A parameter field was edited; a blank value removes the key
    ParamEdited { key: String, value: String },
    Open,
}

/// Side effects requested by a transition, run by the UI shell
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    pub persist: Option<PersistedState>,
    pub open_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopupState {
    pub url_text: String,
    pub ticket_id: String,
    pub env: Option<Environment>,
    pub parsed: Option<ParsedUrl>,
    pub layout: ParamLayout,
    pub url_error: Option<String>,
    pub open_error: Option<String>,
}

impl PopupState {
    pub fn handle(&mut self, event: PopupEvent) -> Effects {
        log::debug!("popup event: {:?}", event);

        match event {
            PopupEvent::Restore(saved) => {
                self.ticket_id = saved.ticket_id.clone();
                self.env = saved.environment();
                self.url_text = saved.url;
                if !self.url_text.is_empty() {
                    let text = self.url_text.clone();
                    self.load_url(&text);
                }
                Effects::default()
            }
            PopupEvent::UrlChanged(text) => {
                self.url_text = text;
                let text = self.url_text.clone();
                if self.load_url(&text) {
                    self.persist()
                } else {
                    Effects::default()
                }
            }
            PopupEvent::EnvChanged(env) => {
                self.env = env;
                self.open_error = None;
                self.persist()
            }
            PopupEvent::TicketChanged(ticket_id) => {
                self.ticket_id = ticket_id;
                self.open_error = None;
                self.persist()
            }
            PopupEvent::ParamEdited { key, value } => {
                if let Some(parsed) = self.parsed.as_mut() {
                    parsed.params.apply_edit(&key, &value);
                }
                self.persist()
            }
            PopupEvent::Open => {
                if !self.can_open() {
                    return Effects::default();
                }

                match self.final_url() {
                    Some(Ok(url)) => {
                        log::info!("opening {}", url);
                        self.open_error = None;
                        Effects {
                            persist: None,
                            open_url: Some(url.to_string()),
                        }
                    }
                    Some(Err(e)) => {
                        log::warn!("rewrite failed: {}", e);
                        self.open_error = Some(e.to_string());
                        Effects::default()
                    }
                    None => Effects::default(),
                }
            }
        }
    }

    /// Validate and load `text`; on failure the parameter view is dropped
    fn load_url(&mut self, text: &str) -> bool {
        match ParsedUrl::parse(text) {
            Ok(parsed) => {
                self.layout = ParamLayout::from_params(&parsed.params);
                self.parsed = Some(parsed);
                self.url_error = None;
                true
            }
            Err(e) => {
                log::warn!("rejected url: {}", e);
                self.parsed = None;
                self.layout = ParamLayout::default();
                self.url_error = Some(e.to_string());
                false
            }
        }
    }

    fn persist(&self) -> Effects {
        Effects {
            persist: Some(self.snapshot()),
            open_url: None,
        }
    }

    pub fn snapshot(&self) -> PersistedState {
        PersistedState::new(&self.url_text, &self.ticket_id, self.env)
    }

    pub fn can_open(&self) -> bool {
        can_open(self.parsed.is_some(), self.env, &self.ticket_id)
    }

    pub fn ticket_error(&self) -> bool {
        self.env == Some(Environment::Ticket) && self.ticket_id.trim().is_empty()
    }

    /// Edited and rewritten URL, or None when no URL is loaded
    pub fn final_url(&self) -> Option<PopupResult<Url>> {
        self.parsed
            .as_ref()
            .map(|parsed| rewrite(&parsed.finalized(), self.env, &self.ticket_id))
    }

    pub fn entries(&self) -> (Vec<ParamEntry>, Vec<ParamEntry>) {
        match &self.parsed {
            Some(parsed) => self.layout.entries(&parsed.params),
            None => (Vec::new(), Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(url: &str) -> PopupState {
        let mut state = PopupState::default();
        state.handle(PopupEvent::UrlChanged(url.to_string()));
        state
    }

    fn edit(key: &str, value: &str) -> PopupEvent {
        PopupEvent::ParamEdited {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_valid_url_loads_and_persists() {
        let mut state = PopupState::default();
        let effects = state.handle(PopupEvent::UrlChanged(
            "https://www.cardcritics.com/path?subid=abc".to_string(),
        ));

        assert!(state.parsed.is_some());
        assert!(state.url_error.is_none());
        assert_eq!(state.layout.priority, vec!["preview_nonce", "subid"]);
        assert_eq!(
            effects.persist.unwrap().url,
            "https://www.cardcritics.com/path?subid=abc"
        );
    }

    #[test]
    fn test_invalid_url_hides_params() {
        let mut state = loaded("https://www.cardcritics.com/path?subid=abc");
        let effects = state.handle(PopupEvent::UrlChanged("https://www.example.com/?a=1".to_string()));

        assert!(state.parsed.is_none());
        assert!(state.url_error.is_some());
        assert_eq!(state.entries(), (Vec::new(), Vec::new()));
        assert!(effects.persist.is_none());
        assert!(!state.can_open());
    }

    #[test]
    fn test_malformed_url_is_treated_as_invalid() {
        let mut state = PopupState::default();
        let effects = state.handle(PopupEvent::UrlChanged("::::".to_string()));

        assert!(state.parsed.is_none());
        assert!(state.url_error.is_some());
        assert_eq!(effects, Effects::default());
    }

    #[test]
    fn test_cleared_param_removed_but_visible() {
        let mut state = loaded("https://www.cardcritics.com/path?subid=abc&x=1");
        let effects = state.handle(edit("subid", ""));

        let parsed = state.parsed.as_ref().unwrap();
        assert_eq!(parsed.params.get("subid"), None);

        let (priority, _) = state.entries();
        assert_eq!(priority[1].key, "subid");
        assert_eq!(priority[1].value, "");
        assert!(effects.persist.is_some());
    }

    #[test]
    fn test_generated_nonce_written_to_params() {
        let mut state = loaded("https://www.cardcritics.com/path");
        let (priority, _) = state.entries();
        assert_eq!(priority[0].key, "preview_nonce");
        assert_eq!(priority[0].value, "");

        state.handle(edit("preview_nonce", "abcd1234"));
        let (priority, _) = state.entries();
        assert_eq!(priority[0].value, "abcd1234");
        assert_eq!(
            state.parsed.as_ref().unwrap().finalized().query(),
            Some("preview_nonce=abcd1234")
        );
    }

    #[test]
    fn test_gate_with_ticket() {
        let mut state = loaded("https://stage.cardcritics.com/");
        state.handle(PopupEvent::EnvChanged(Some(Environment::Ticket)));
        assert!(!state.can_open());
        assert!(state.ticket_error());

        state.handle(PopupEvent::TicketChanged("   ".to_string()));
        assert!(!state.can_open());

        state.handle(PopupEvent::TicketChanged("JIRA123".to_string()));
        assert!(state.can_open());
        assert!(!state.ticket_error());
    }

    #[test]
    fn test_gate_requires_environment() {
        let state = loaded("https://www.cardcritics.com/");
        assert!(!state.can_open());
    }

    #[test]
    fn test_env_and_ticket_changes_persist() {
        let mut state = PopupState::default();

        let effects = state.handle(PopupEvent::TicketChanged("T-9".to_string()));
        assert_eq!(effects.persist.unwrap().ticket_id, "T-9");

        let effects = state.handle(PopupEvent::EnvChanged(Some(Environment::Stage)));
        let saved = effects.persist.unwrap();
        assert_eq!(saved.env, "stage");
        assert_eq!(saved.ticket_id, "T-9");
    }

    #[test]
    fn test_open_blocked_emits_nothing() {
        let mut state = loaded("https://www.cardcritics.com/");
        state.handle(PopupEvent::EnvChanged(Some(Environment::Ticket)));

        assert_eq!(state.handle(PopupEvent::Open), Effects::default());
    }

    #[test]
    fn test_open_local() {
        let mut state = loaded("https://foo.gobankingrates.com/x?preview_nonce=zz");
        state.handle(PopupEvent::EnvChanged(Some(Environment::Local)));

        let effects = state.handle(PopupEvent::Open);
        assert_eq!(
            effects.open_url.as_deref(),
            Some("https://l-www.gobankingrates.com/x?preview_nonce=zz")
        );
        assert!(effects.persist.is_none());
    }

    #[test]
    fn test_open_applies_edits_then_rewrite() {
        let mut state = loaded("https://stage.cardcritics.com/p?subid=abc&x=1");
        state.handle(edit("subid", "new"));
        state.handle(edit("x", ""));
        state.handle(PopupEvent::TicketChanged(" t42 ".to_string()));
        state.handle(PopupEvent::EnvChanged(Some(Environment::Ticket)));

        let effects = state.handle(PopupEvent::Open);
        assert_eq!(
            effects.open_url.as_deref(),
            Some("https://t42-www.cardcritics.com/p?subid=new")
        );
    }

    #[test]
    fn test_open_reports_rewrite_failure() {
        let mut state = loaded("https://www.cardcritics.com/");
        state.handle(PopupEvent::TicketChanged("bad ticket".to_string()));
        state.handle(PopupEvent::EnvChanged(Some(Environment::Ticket)));

        let effects = state.handle(PopupEvent::Open);
        assert!(effects.open_url.is_none());
        assert!(state.open_error.is_some());

        state.handle(PopupEvent::TicketChanged("good".to_string()));
        assert!(state.open_error.is_none());
    }

    #[test]
    fn test_open_with_colon_ticket_stays_on_domain() {
        let mut state = loaded("https://www.cardcritics.com/p?a=1");
        state.handle(PopupEvent::TicketChanged("a:b".to_string()));
        state.handle(PopupEvent::EnvChanged(Some(Environment::Ticket)));

        let effects = state.handle(PopupEvent::Open);
        assert!(effects.open_url.is_none());
        assert!(state.open_error.is_some());
    }

    #[test]
    fn test_restore_rebuilds_view() {
        let mut state = PopupState::default();
        let saved = PersistedState::new(
            "https://www.gobankingrates.com/?subid=s&utm=u",
            "JIRA123",
            Some(Environment::Ticket),
        );

        let effects = state.handle(PopupEvent::Restore(saved));

        assert_eq!(effects, Effects::default());
        assert_eq!(state.ticket_id, "JIRA123");
        assert_eq!(state.env, Some(Environment::Ticket));
        assert_eq!(state.layout.other, vec!["utm"]);
        assert!(state.can_open());
    }

    #[test]
    fn test_restore_empty_url() {
        let mut state = PopupState::default();
        state.handle(PopupEvent::Restore(PersistedState::new("", "T-1", Some(Environment::Stage))));

        assert!(state.parsed.is_none());
        assert!(state.url_error.is_none());
        assert_eq!(state.env, Some(Environment::Stage));
    }

    #[test]
    fn test_reload_replaces_layout() {
        let mut state = loaded("https://www.cardcritics.com/?a=1&b=2");
        state.handle(PopupEvent::UrlChanged("https://www.cardcritics.com/?c=3".to_string()));

        assert_eq!(state.layout.other, vec!["c"]);
    }
}

//! Observable events for planfix
//!
//! Events are explicit and typed; the string form is what appears in the
//! `event` field of a log line.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration file loaded
    ConfigLoaded,
    /// Catalog file loaded
    CatalogLoaded,
    /// Session created
    SessionStart,
    /// Session finished
    SessionEnd,

    // Configuration updates
    /// A configuration update replaced the directive set
    DirectivesReplaced,
    /// A configuration update was rejected
    DirectivesRejected,
    /// The directive set was cleared
    DirectivesCleared,

    // Planning
    /// A relation's candidate list was narrowed
    RelationFiltered,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::CatalogLoaded => "CATALOG_LOADED",
            Event::SessionStart => "SESSION_START",
            Event::SessionEnd => "SESSION_END",
            Event::DirectivesReplaced => "DIRECTIVES_REPLACED",
            Event::DirectivesRejected => "DIRECTIVES_REJECTED",
            Event::DirectivesCleared => "DIRECTIVES_CLEARED",
            Event::RelationFiltered => "RELATION_FILTERED",
        }
    }

    /// Rejected updates are logged at WARN, everything else at INFO or below
    pub fn is_warning(&self) -> bool {
        matches!(self, Event::DirectivesRejected)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_unique() {
        let events = [
            Event::ConfigLoaded,
            Event::CatalogLoaded,
            Event::SessionStart,
            Event::SessionEnd,
            Event::DirectivesReplaced,
            Event::DirectivesRejected,
            Event::DirectivesCleared,
            Event::RelationFiltered,
        ];
        let mut names: Vec<_> = events.iter().map(Event::as_str).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), events.len());
    }

    #[test]
    fn test_only_rejection_warns() {
        assert!(Event::DirectivesRejected.is_warning());
        assert!(!Event::DirectivesReplaced.is_warning());
    }
}

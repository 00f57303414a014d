//! Subscription identity and handles.

use crate::types::{PatternFlags, Placement, Rule};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Weak;

/// Event name → rules in subscription order, keyed by structure.
pub(super) type EventMap = HashMap<String, IndexMap<RuleKey, Rule>>;

/// Structural identity of a rule.
///
/// Two rules with the same placement, text, pattern source and flags produce
/// the same key, so subscribing both under one event stores a single entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RuleKey {
    pub placement: Placement,
    pub append_text: String,
    pub pattern: String,
    pub flags: PatternFlags,
}

impl RuleKey {
    pub fn from_rule(rule: &Rule) -> Self {
        Self {
            placement: rule.placement(),
            append_text: rule.append_text().to_string(),
            pattern: rule.pattern().source().to_string(),
            flags: rule.pattern().flags(),
        }
    }
}

/// Handle returned by [`Registry::subscribe`](super::Registry::subscribe).
///
/// Holds a weak reference to the registry state, so it never keeps a
/// registry alive. Dropping the handle does not unsubscribe.
#[derive(Clone, Debug)]
pub struct SubscriptionHandle {
    pub(super) event_name: String,
    pub(super) key: RuleKey,
    pub(super) events: Weak<RwLock<EventMap>>,
}

impl SubscriptionHandle {
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn key(&self) -> &RuleKey {
        &self.key
    }

    /// Remove the rule this handle points at.
    ///
    /// Returns true if an entry was removed. Calling it again, or after the
    /// registry is gone, is a no-op that returns false. Handles to
    /// structurally identical rules share one entry, so unsubscribing either
    /// removes it for both.
    pub fn unsubscribe(&self) -> bool {
        match self.events.upgrade() {
            Some(events) => super::manager::remove_rule(&events, &self.event_name, &self.key),
            None => false,
        }
    }
}

//! Registry for event-scoped text rules.

use crate::config::RegistryConfig;
use crate::error::Result;
use crate::types::{Rule, RuleOptions};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, trace};

use super::types::{EventMap, RuleKey, SubscriptionHandle};

/// Remove `key` from `event_name`, dropping the event entry once empty.
pub(super) fn remove_rule(events: &RwLock<EventMap>, event_name: &str, key: &RuleKey) -> bool {
    let mut events = events.write();

    let (removed, now_empty) = match events.get_mut(event_name) {
        Some(rules) => (rules.shift_remove(key).is_some(), rules.is_empty()),
        None => return false,
    };

    if now_empty {
        events.remove(event_name);
    }

    debug!(event = event_name, removed, "unsubscribed rule");
    removed
}

/// Maps event names to ordered rule sets and applies them on trigger.
///
/// Clones share the same state.
#[derive(Clone, Debug)]
pub struct Registry {
    /// Active rules by event name.
    events: Arc<RwLock<EventMap>>,
    /// Rule merged under every `subscribe` call.
    defaults: Arc<Rule>,
}

impl Registry {
    /// Create an empty registry with the stock defaults (end placement,
    /// empty text, match-all pattern).
    pub fn new() -> Self {
        Self::with_defaults(Rule::default())
    }

    /// Create an empty registry with custom defaults for omitted fields.
    pub fn with_defaults(defaults: Rule) -> Self {
        Self {
            events: Arc::new(RwLock::new(EventMap::new())),
            defaults: Arc::new(defaults),
        }
    }

    /// Build a registry from config, subscribing every configured rule.
    ///
    /// Handles are returned in config order (events in file order, rules in
    /// list order).
    pub fn from_config(config: &RegistryConfig) -> Result<(Self, Vec<SubscriptionHandle>)> {
        let defaults = config.defaults.to_options("<defaults>")?;
        let registry = Self::with_defaults(defaults.merge_over(&Rule::default()));

        let mut handles = Vec::new();
        for (event_name, rules) in &config.events {
            for rule in rules {
                handles.push(registry.subscribe(event_name, rule.to_options(event_name)?));
            }
        }

        debug!(
            events = config.events.len(),
            rules = handles.len(),
            "loaded registry from config"
        );
        Ok((registry, handles))
    }

    /// The rule supplying values for omitted fields.
    pub fn defaults(&self) -> &Rule {
        &self.defaults
    }

    /// Subscribe a rule under `event_name`.
    ///
    /// Unset fields in `options` come from the registry defaults. A rule
    /// structurally equal to one already under this event replaces it in
    /// place.
    pub fn subscribe(&self, event_name: &str, options: RuleOptions) -> SubscriptionHandle {
        self.subscribe_rule(event_name, options.merge_over(&self.defaults))
    }

    /// Subscribe a fully built rule under `event_name`.
    pub fn subscribe_rule(&self, event_name: &str, rule: Rule) -> SubscriptionHandle {
        let key = RuleKey::from_rule(&rule);

        {
            let mut events = self.events.write();
            let rules = events
                .entry(event_name.to_string())
                .or_insert_with(IndexMap::new);
            let replaced = rules.insert(key.clone(), rule).is_some();

            debug!(
                event = event_name,
                placement = %key.placement,
                pattern = %key.pattern,
                replaced,
                "subscribed rule"
            );
        }

        SubscriptionHandle {
            event_name: event_name.to_string(),
            key,
            events: Arc::downgrade(&self.events),
        }
    }

    /// Apply every rule under `event_name` to `value`.
    ///
    /// Returns one entry per rule in subscription order: `Some(text)` when the
    /// rule matched, `None` when it did not. An unknown event yields an empty
    /// vector.
    pub fn trigger(&self, event_name: &str, value: &str) -> Vec<Option<String>> {
        let events = self.events.read();
        let Some(rules) = events.get(event_name) else {
            trace!(event = event_name, "trigger on unknown event");
            return Vec::new();
        };

        let results: Vec<Option<String>> = rules.values().map(|rule| rule.apply(value)).collect();

        trace!(
            event = event_name,
            rules = results.len(),
            matched = results.iter().filter(|r| r.is_some()).count(),
            "triggered event"
        );
        results
    }

    // --- Inspection ---

    /// Number of rules under `event_name`.
    pub fn rule_count(&self, event_name: &str) -> usize {
        self.events.read().get(event_name).map_or(0, IndexMap::len)
    }

    /// Names of events with at least one rule, sorted.
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.events.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Snapshot of the rules under `event_name`, in subscription order.
    pub fn rules(&self, event_name: &str) -> Vec<Rule> {
        self.events
            .read()
            .get(event_name)
            .map(|rules| rules.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether a rule structurally equal to `rule` is under `event_name`.
    pub fn is_subscribed(&self, event_name: &str, rule: &Rule) -> bool {
        self.events
            .read()
            .get(event_name)
            .is_some_and(|rules| rules.contains_key(&RuleKey::from_rule(rule)))
    }

    /// Drop every rule under `event_name`. Returns how many were removed.
    pub fn clear_event(&self, event_name: &str) -> usize {
        let removed = self
            .events
            .write()
            .remove(event_name)
            .map_or(0, |rules| rules.len());
        debug!(event = event_name, removed, "cleared event");
        removed
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

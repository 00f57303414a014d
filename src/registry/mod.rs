//! Event registry for text-modification rules.
//!
//! Rules are grouped under event names. Triggering an event runs every rule
//! under that name against one input and returns one result per rule:
//! - `Some(text)` when the rule's pattern matched (text inserted)
//! - `None` when it did not
//!
//! Rules are deduplicated by structure, not by identity. Subscribing the same
//! placement, text and pattern twice under one event stores one entry.
//!
//! # Example
//!
//! ```
//! use text_modifier::{Pattern, Placement, Registry, RuleOptions};
//!
//! let registry = Registry::new();
//! let handle = registry.subscribe(
//!     "textChange",
//!     RuleOptions::new()
//!         .placement(Placement::Start)
//!         .append_text("Hello ")
//!         .pattern(Pattern::new(".+").unwrap()),
//! );
//!
//! assert_eq!(
//!     registry.trigger("textChange", "World"),
//!     vec![Some("Hello World".to_string())]
//! );
//!
//! handle.unsubscribe();
//! assert!(registry.trigger("textChange", "World").is_empty());
//! ```

mod manager;
mod types;

pub use manager::Registry;
pub use types::{RuleKey, SubscriptionHandle};

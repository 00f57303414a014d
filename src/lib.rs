//! # Text Modifier
//!
//! An in-process, event-driven text modifier. Rules that prepend or append
//! text are subscribed under event names; triggering an event applies every
//! rule whose pattern matches the input.
//!
//! ## Core Concepts
//!
//! - **Rules**: placement (start or end), text to insert, and a gating regex
//! - **Registry**: event name → rules in subscription order, deduplicated by
//!   structure
//! - **Handles**: returned by `subscribe`, used to unsubscribe
//! - **Config**: JSON description of defaults and startup rules
//!
//! ## Example
//!
//! ```
//! use text_modifier::{Pattern, Placement, Registry, RuleOptions};
//!
//! let registry = Registry::new();
//!
//! registry.subscribe(
//!     "textChange",
//!     RuleOptions::new()
//!         .placement(Placement::Start)
//!         .append_text("Start-")
//!         .pattern(Pattern::new(".+").unwrap()),
//! );
//! registry.subscribe(
//!     "textChange",
//!     RuleOptions::new()
//!         .placement(Placement::End)
//!         .append_text("-End")
//!         .pattern(Pattern::new(".+").unwrap()),
//! );
//!
//! let results = registry.trigger("textChange", "Hello");
//! assert_eq!(
//!     results,
//!     vec![Some("Start-Hello".to_string()), Some("Hello-End".to_string())]
//! );
//! ```

pub mod config;
pub mod error;
pub mod registry;
pub mod types;

// Re-exports
pub use config::{RegistryConfig, RuleConfig};
pub use error::{ModifierError, Result};
pub use registry::{Registry, RuleKey, SubscriptionHandle};
pub use types::{Pattern, PatternFlags, Placement, Rule, RuleOptions};

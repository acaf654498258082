//! Synthetic violation codes and rule ids for the `system` category.
//!
//! These are data, not error codes: they travel inside violations so
//! consumers can distinguish "the text is non-compliant" from "the
//! engine malfunctioned" and render them differently.

/// Rule id used on all synthetic system violations.
pub const SYS_RULE_ID: &str = "SYS";

/// No active rule matched the request context.
pub const GEEN_REGELS_ACTIEF: &str = "geen-regels-actief";

/// A rule implementation panicked; its outcome is synthetic.
pub const REGEL_PANIEK: &str = "regel-paniek";

/// The item's pipeline failed outside any single rule.
pub const ITEM_FOUT: &str = "item-fout";

/// The item exceeded its time budget.
pub const TIJDSLIMIET: &str = "tijdslimiet-overschreden";

/// The batch was cancelled before this item ran.
pub const GEANNULEERD: &str = "geannuleerd";

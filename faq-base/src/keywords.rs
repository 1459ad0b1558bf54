//! Keyword overrides checked before lexical matching.
//!
//! Matching is a case-insensitive substring test. When several triggers
//! occur in one query the longest trigger wins; equal lengths keep
//! declaration order. So "cybersecurity" beats "security" even though the
//! former contains the latter.

use std::cmp::Reverse;

use tracing::warn;

use crate::structs::selector_config::KeywordOverride;

#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    /// Lower-cased triggers, longest first.
    entries: Vec<KeywordOverride>,
}

impl KeywordTable {
    pub fn new(overrides: impl IntoIterator<Item = KeywordOverride>) -> Self {
        let mut entries: Vec<KeywordOverride> = overrides
            .into_iter()
            .filter_map(|k| {
                // surrounding spaces are part of the trigger (" vpn " only matches the word)
                let trigger = k.trigger.to_lowercase();
                if trigger.trim().is_empty() {
                    warn!(target: "faq_base::keywords", "ignoring keyword override with empty trigger");
                    return None;
                }
                Some(KeywordOverride {
                    trigger,
                    response: k.response,
                })
            })
            .collect();
        // stable: equal lengths keep declaration order
        entries.sort_by_key(|k| Reverse(k.trigger.chars().count()));
        Self { entries }
    }

    /// First override whose trigger occurs in `query`.
    pub fn lookup(&self, query: &str) -> Option<&KeywordOverride> {
        let lower = query.to_lowercase();
        self.entries.iter().find(|k| lower.contains(&k.trigger))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::selector_config::default_keyword_overrides;

    #[test]
    fn match_is_case_insensitive_substring() {
        let table = KeywordTable::new(default_keyword_overrides());
        let hit = table.lookup("How do I pick a good PassWord?").unwrap();
        assert_eq!(hit.trigger, "password");
        assert!(table.lookup("what is a VPN").is_some());
        assert!(table.lookup("how do I save an excel file").is_none());
    }

    #[test]
    fn longest_trigger_wins() {
        let table = KeywordTable::new(default_keyword_overrides());
        assert_eq!(
            table.lookup("what is cybersecurity?").unwrap().trigger,
            "cybersecurity"
        );
        assert_eq!(table.lookup("home security tips").unwrap().trigger, "security");
    }

    #[test]
    fn equal_lengths_keep_declaration_order() {
        let table = KeywordTable::new([
            KeywordOverride::new("wifi", "first"),
            KeywordOverride::new("mesh", "second"),
        ]);
        assert_eq!(table.lookup("mesh wifi setup").unwrap().response, "first");
    }

    #[test]
    fn triggers_are_lowercased_and_blank_ones_dropped() {
        let table = KeywordTable::new([
            KeywordOverride::new("VPN", "vpn answer"),
            KeywordOverride::new("   ", "never"),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("my vpn is slow").unwrap().response, "vpn answer");
    }

    #[test]
    fn padded_trigger_keeps_its_spaces() {
        let table = KeywordTable::new([KeywordOverride::new(" VPN ", "vpn answer")]);
        assert_eq!(table.lookup("my vpn is slow").unwrap().trigger, " vpn ");
        assert!(table.lookup("install vpnclient now").is_none());
        assert!(table.lookup("vpn").is_none());
    }
}

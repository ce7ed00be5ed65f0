//! Pattern registry - fixed part-number format rules per prefix
//!
//! Each known prefix maps to one anchored regular expression. The table is
//! domain-fixed and compiled once per process.

use regex::Regex;
use std::sync::LazyLock;

/// Known part-number prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemPrefix {
    Pcb,
    Cap,
    Res,
    Ic,
    Conn,
    Diode,
}

impl ItemPrefix {
    /// All prefixes in registry order
    pub fn all() -> &'static [ItemPrefix] {
        &[
            ItemPrefix::Pcb,
            ItemPrefix::Cap,
            ItemPrefix::Res,
            ItemPrefix::Ic,
            ItemPrefix::Conn,
            ItemPrefix::Diode,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemPrefix::Pcb => "PCB",
            ItemPrefix::Cap => "CAP",
            ItemPrefix::Res => "RES",
            ItemPrefix::Ic => "IC",
            ItemPrefix::Conn => "CONN",
            ItemPrefix::Diode => "DIODE",
        }
    }

    /// Regular expression an item number with this prefix must match
    pub fn pattern(&self) -> &'static str {
        match self {
            ItemPrefix::Pcb => r"^PCB-[A-Z]\d{4}$",
            ItemPrefix::Cap => r"^CAP-\d{4}-\d{1,3}V$",
            ItemPrefix::Res => r"^RES-\d+[KM]?-\d+\.\d+W$",
            ItemPrefix::Ic => r"^IC-\d{4}[A-Z]?$",
            ItemPrefix::Conn => r"^CONN-[A-Z0-9]+-[MF]$",
            ItemPrefix::Diode => r"^DIODE-\d{1}N\d{4}$",
        }
    }

    /// A conforming example
    pub fn example(&self) -> &'static str {
        match self {
            ItemPrefix::Pcb => "PCB-X7700",
            ItemPrefix::Cap => "CAP-3300-10V",
            ItemPrefix::Res => "RES-2K-0.25W",
            ItemPrefix::Ic => "IC-8085",
            ItemPrefix::Conn => "CONN-DB9-F",
            ItemPrefix::Diode => "DIODE-1N4001",
        }
    }
}

impl std::fmt::Display for ItemPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ItemPrefix {
    type Err = String;

    /// Exact, case-sensitive match
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemPrefix::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Unknown item number prefix: {}", s))
    }
}

/// A compiled format rule for one prefix
#[derive(Debug)]
pub struct PatternRule {
    prefix: ItemPrefix,
    regex: Regex,
}

impl PatternRule {
    pub fn prefix(&self) -> ItemPrefix {
        self.prefix
    }

    /// The rule as written, used in validation messages
    pub fn pattern(&self) -> &'static str {
        self.prefix.pattern()
    }

    pub fn is_match(&self, item_number: &str) -> bool {
        self.regex.is_match(item_number)
    }
}

static RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    ItemPrefix::all()
        .iter()
        .map(|&prefix| PatternRule {
            prefix,
            // Built-in patterns are constants covered by tests
            regex: Regex::new(prefix.pattern()).expect("built-in item pattern must compile"),
        })
        .collect()
});

/// Look up the rule for a prefix string
pub fn rule_for(prefix: &str) -> Option<&'static PatternRule> {
    RULES.iter().find(|rule| rule.prefix.as_str() == prefix)
}

/// All rules in registry order
pub fn rules() -> &'static [PatternRule] {
    &RULES
}

/// Substring before the first `-`, or empty when there is no delimiter
pub fn prefix_of(item_number: &str) -> &str {
    item_number
        .split_once('-')
        .map(|(prefix, _)| prefix)
        .unwrap_or("")
}

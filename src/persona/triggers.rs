use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Builtin topic table, validated on first use and never mutated afterwards.
pub static TRIGGERS: Lazy<TriggerTable> = Lazy::new(|| {
    TriggerTable::new(builtin_entries()).expect("builtin trigger table is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEntry {
    pub key: &'static str,
    /// Lowercase substrings; any one of them activates the entry.
    pub keywords: &'static [&'static str],
    pub expansion: &'static str,
}

impl TriggerEntry {
    /// Substring containment against already-lowercased text. Keywords are not
    /// word-bounded, so "ova" also fires inside "innovation".
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TriggerTableError {
    #[error("Duplicate trigger key: {0}")]
    DuplicateKey(&'static str),

    #[error("Trigger '{0}' has no keywords")]
    NoKeywords(&'static str),

    #[error("Trigger '{key}' has invalid keyword '{keyword}' (must be non-empty lowercase)")]
    InvalidKeyword {
        key: &'static str,
        keyword: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct TriggerTable {
    entries: Vec<TriggerEntry>,
}

impl TriggerTable {
    pub fn new(entries: Vec<TriggerEntry>) -> Result<Self, TriggerTableError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.key) {
                return Err(TriggerTableError::DuplicateKey(entry.key));
            }
            if entry.keywords.is_empty() {
                return Err(TriggerTableError::NoKeywords(entry.key));
            }
            if let Some(keyword) = entry
                .keywords
                .iter()
                .copied()
                .find(|keyword| keyword.is_empty() || keyword.to_lowercase() != *keyword)
            {
                return Err(TriggerTableError::InvalidKeyword {
                    key: entry.key,
                    keyword,
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn expansion(&self, key: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.expansion)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TriggerEntry> {
        self.entries.iter()
    }

    /// Keys of every entry triggered by `lowered`, in table order.
    pub fn matching_keys<'a>(&'a self, lowered: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.matches(lowered))
            .map(|entry| entry.key)
    }

}

fn builtin_entries() -> Vec<TriggerEntry> {
    vec![
        TriggerEntry {
            key: "ova",
            keywords: &["ova", "cycle tracking", "period app", "fertility"],
            expansion: r#"DEEP DIVE: OVA
Ova is a cycle-tracking app I designed and co-built over about a year with a two-person engineering team.
- My role: lead product designer and front-end engineer (React Native). I owned research, the design system and most of the UI code.
- Problem: existing trackers felt clinical and pushed users to log a dozen data points a day. Our interviews showed people quit within two weeks.
- Approach: we cut daily logging to a single tap plus optional details, and moved predictions to a calm weekly summary instead of constant notifications.
- Biggest challenge: making predictions honest about uncertainty. We replaced single-day predictions with confidence ranges, which took several rounds of testing before people trusted them.
- Outcome: retention after 30 days roughly doubled compared to the first beta, and the weekly summary became the most-used screen."#,
        },
        TriggerEntry {
            key: "greex",
            keywords: &["greex", "marketplace", "produce", "farmers"],
            expansion: r#"DEEP DIVE: GREEX
Greex is a marketplace connecting small local growers with nearby buyers: restaurants, co-ops and households.
- My role: product designer for the buyer and seller apps, plus front-end work on the seller dashboard in React and TypeScript.
- Problem: growers listed inventory by text message and spreadsheets, so buyers never knew what was actually available.
- Approach: a seller flow built around a weekly harvest list that takes under five minutes to publish, and a buyer view that groups produce by farm and pickup day.
- Biggest challenge: perishable inventory. Quantities change hourly at harvest time, so we designed soft reservations that expire, and a quick 'sold out' toggle growers could hit from the field.
- Outcome: onboarding time for new growers dropped from a guided call to a self-serve ten-minute setup."#,
        },
        TriggerEntry {
            key: "process",
            keywords: &[
                "process",
                "methodology",
                "workflow",
                "approach",
                "how do you work",
            ],
            expansion: r#"DEEP DIVE: HOW I WORK
- Start with conversations, not screens: short interviews and reviewing support tickets or analytics before sketching anything.
- Frame the problem in one sentence and agree on what success looks like with the team.
- Prototype early in Figma, then in code as soon as interaction details matter. I test with five or so real users per round.
- Ship in thin slices behind flags, watch the numbers, and keep a running decision log so trade-offs stay visible.
- I pair closely with engineers; most of my handoff is a shared component library rather than static specs."#,
        },
        TriggerEntry {
            key: "skills",
            keywords: &["skill", "tools", "tech stack", "figma", "react", "typescript"],
            expansion: r#"DEEP DIVE: SKILLS AND TOOLS
- Design: Figma (including variables and prototyping), user research, interaction and visual design, accessibility reviews.
- Engineering: TypeScript, React and React Native, CSS architecture, Storybook, basic Node services.
- Collaboration: running workshops, writing product briefs, mentoring junior designers."#,
        },
        TriggerEntry {
            key: "experience",
            keywords: &["experience", "career", "background", "worked at", "resume"],
            expansion: r#"DEEP DIVE: BACKGROUND
- About six years in product design, starting as a front-end developer at a small agency before moving into design.
- Two years at a health-tech startup (where Ova started) and about two years consulting for marketplace and climate-focused teams (including Greex).
- Before that: a degree in cognitive science, which is where my interest in research came from."#,
        },
        TriggerEntry {
            key: "design_system",
            keywords: &["design system", "component library", "design tokens"],
            expansion: r#"DEEP DIVE: DESIGN SYSTEMS
- I built the Ova design system from scratch: tokens for color, type and spacing synced from Figma into code, and about forty React Native components.
- I keep components small and composable, document them in Storybook, and treat the system as a product with its own changelog."#,
        },
        TriggerEntry {
            key: "contact",
            keywords: &["contact", "hire", "email", "available", "freelance"],
            expansion: r#"DEEP DIVE: WORKING TOGETHER
- I'm open to full-time product design roles and selected freelance projects.
- The best way to reach me is the email link at the bottom of this page; I usually reply within two days."#,
        },
    ]
}

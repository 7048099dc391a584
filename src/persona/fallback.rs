/// Reply used when nothing in the message matches a known topic.
pub const DEFAULT_FALLBACK_REPLY: &str = "Thanks for stopping by! The live chat isn't connected right now, but you can ask me about Ova, Greex, my process or my background, or reach me through the email link below.";

/// Keyword groups checked in priority order; the first hit wins.
const CANNED_REPLIES: &[(&[&str], &str)] = &[
    (
        &["ova", "cycle", "fertility"],
        "Ova is a cycle-tracking app I designed and helped build. The big idea was one-tap logging and honest, range-based predictions instead of a wall of daily inputs.",
    ),
    (
        &["greex", "marketplace", "produce", "farm"],
        "Greex connects small local growers with nearby buyers. I designed both sides of the marketplace, built around a weekly harvest list growers can publish in minutes.",
    ),
    (
        &["process", "workflow", "approach", "methodology"],
        "I start with research conversations, frame the problem in a sentence, prototype early, and ship in thin slices while pairing closely with engineers.",
    ),
    (
        &["skill", "tools", "stack", "figma", "react"],
        "Mostly Figma on the design side and TypeScript with React or React Native on the engineering side, plus plenty of user research.",
    ),
    (
        &["experience", "background", "career", "resume"],
        "I've spent about six years in product design, after starting out as a front-end developer. Most of that time has been in health-tech and marketplaces.",
    ),
    (
        &["contact", "hire", "email", "freelance", "available"],
        "I'm open to new roles and selected freelance work. The email link at the bottom of the page is the quickest way to reach me.",
    ),
    (
        &["hello", "hey", "hi"],
        "Hi! Great to meet you. What would you like to know about my work?",
    ),
];

/// Canned answer for `message`, used when no model credential is configured.
pub fn fallback_reply(message: &str) -> &'static str {
    let text = message.to_lowercase();
    CANNED_REPLIES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(_, reply)| *reply)
        .unwrap_or(DEFAULT_FALLBACK_REPLY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_topic_case_insensitively() {
        assert!(fallback_reply("Tell me about OVA").starts_with("Ova is"));
        assert!(fallback_reply("What's GREEX?").starts_with("Greex connects"));
    }

    #[test]
    fn earlier_group_wins() {
        // Both "ova" and "greex" appear; ova is checked first.
        assert!(fallback_reply("greex or ova?").starts_with("Ova is"));
        // "hi" would match the greeting group, but the process group is earlier.
        assert!(fallback_reply("hi, what's your process").starts_with("I start with"));
    }

    #[test]
    fn unmatched_returns_default() {
        assert_eq!(fallback_reply("what's the weather like"), DEFAULT_FALLBACK_REPLY);
        assert_eq!(fallback_reply(""), DEFAULT_FALLBACK_REPLY);
    }

    #[test]
    fn is_pure() {
        let message = "How did you get into design?";
        assert_eq!(fallback_reply(message), fallback_reply(message));
    }
}

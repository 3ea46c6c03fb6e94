//! Slash commands answered locally, without a network round trip.

/// A literal chat command and its canned reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatCommand {
    pub name: &'static str,
    pub reply: &'static str,
}

pub const COMMANDS: &[ChatCommand] = &[
    ChatCommand {
        name: "/help",
        reply: "Here are some things you can do:\n\
                • Share your feelings and thoughts\n\
                • Ask for coping strategies\n\
                • Talk about your day\n\
                • Request mindfulness exercises\n\n\
                I'm here to listen and support you.",
    },
    ChatCommand {
        name: "/mood",
        reply: "How are you feeling right now? You can describe your mood, or if you prefer, \
                you can use our structured check-in feature.",
    },
    ChatCommand {
        name: "/breathe",
        reply: "Let's try a breathing exercise together:\n\n\
                1. Breathe in slowly for 4 counts\n\
                2. Hold for 4 counts\n\
                3. Breathe out slowly for 6 counts\n\
                4. Repeat 4 times\n\n\
                Focus on the rhythm and let your thoughts settle.",
    },
    ChatCommand {
        name: "/resources",
        reply: "Here are some helpful resources:\n\n\
                🆘 Crisis Support: 988\n\
                💬 Crisis Text Line: Text HOME to 741741\n\
                🌐 Mental Health Resources: https://www.mentalhealth.gov\n\n\
                Remember, seeking help is a sign of strength.",
    },
];

/// Look up a command by exact name, ignoring case and surrounding whitespace.
pub fn lookup(input: &str) -> Option<&'static ChatCommand> {
    let needle = input.trim().to_lowercase();
    COMMANDS.iter().find(|c| c.name == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_exact() {
        for cmd in COMMANDS {
            assert_eq!(lookup(cmd.name).map(|c| c.reply), Some(cmd.reply));
        }
    }

    #[test]
    fn test_lookup_normalises() {
        assert_eq!(lookup("  /HELP ").map(|c| c.name), Some("/help"));
    }

    #[test]
    fn test_lookup_rejects_partial() {
        assert!(lookup("/help me").is_none());
        assert!(lookup("help").is_none());
        assert!(lookup("/unknown").is_none());
    }

    #[test]
    fn test_reply_line_breaks() {
        let breathe = lookup("/breathe").unwrap();
        assert!(breathe.reply.contains("together:\n\n1. Breathe in"));
    }
}

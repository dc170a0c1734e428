//! Parsing of REPL input lines

use askboard_domain::{AuthState, BoardVariant};

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Board,
    List,
    Leaderboard,
    Edit { id: String, text: String },
    Delete { id: String },
    Logout,
    Name(String),
    Retry,
    /// Abandon a pending code and enter a different email
    Back,
    Help,
    Quit,
    /// A slash command missing its arguments; carries the usage line
    Usage(&'static str),
    Unknown(String),
    /// Anything that is not a command: a question, an email or a code
    Text(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if !line.starts_with('/') {
            return Some(ReplCommand::Text(line.to_string()));
        }

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        Some(match cmd {
            "/board" | "/b" => ReplCommand::Board,
            "/list" | "/ls" => ReplCommand::List,
            "/leaderboard" | "/top" => ReplCommand::Leaderboard,
            "/edit" => match rest.split_once(char::is_whitespace) {
                Some((id, text)) if !text.trim().is_empty() => ReplCommand::Edit {
                    id: id.to_string(),
                    text: text.trim().to_string(),
                },
                _ => ReplCommand::Usage("/edit <id> <new text>"),
            },
            "/delete" | "/rm" => match rest {
                "" => ReplCommand::Usage("/delete <id>"),
                id => ReplCommand::Delete { id: id.to_string() },
            },
            "/logout" => ReplCommand::Logout,
            "/name" => match rest {
                "" => ReplCommand::Usage("/name <your name>"),
                name => ReplCommand::Name(name.to_string()),
            },
            "/retry" => ReplCommand::Retry,
            "/back" => ReplCommand::Back,
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            other => ReplCommand::Unknown(other.to_string()),
        })
    }
}

/// Prompt for the current board state
pub fn prompt_for(variant: BoardVariant, auth: &AuthState, name: Option<&str>) -> String {
    match (variant, auth) {
        (BoardVariant::Authenticated, AuthState::Unauthenticated) => "email> ".to_string(),
        (BoardVariant::Authenticated, AuthState::CodeSent { .. }) => "code> ".to_string(),
        (BoardVariant::Authenticated, AuthState::Authenticated { user }) => {
            format!("[{}] ask> ", user.email)
        }
        (BoardVariant::Open, _) => match name {
            Some(name) => format!("[{}] ask> ", name),
            None => "ask> ".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askboard_domain::{Email, User, UserId};

    #[test]
    fn test_plain_text() {
        assert_eq!(
            ReplCommand::parse("  why is the sky blue?  "),
            Some(ReplCommand::Text("why is the sky blue?".to_string()))
        );
        assert_eq!(ReplCommand::parse("   "), None);
    }

    #[test]
    fn test_edit_parsing() {
        assert_eq!(
            ReplCommand::parse("/edit q1 a better   question"),
            Some(ReplCommand::Edit {
                id: "q1".to_string(),
                text: "a better   question".to_string(),
            })
        );
        assert_eq!(
            ReplCommand::parse("/edit q1"),
            Some(ReplCommand::Usage("/edit <id> <new text>"))
        );
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(ReplCommand::parse("/board"), Some(ReplCommand::Board));
        assert_eq!(ReplCommand::parse("/top"), Some(ReplCommand::Leaderboard));
        assert_eq!(
            ReplCommand::parse("/delete q9"),
            Some(ReplCommand::Delete { id: "q9".to_string() })
        );
        assert_eq!(
            ReplCommand::parse("/name Ada Lovelace"),
            Some(ReplCommand::Name("Ada Lovelace".to_string()))
        );
        assert_eq!(ReplCommand::parse("/q"), Some(ReplCommand::Quit));
        assert_eq!(
            ReplCommand::parse("/dance"),
            Some(ReplCommand::Unknown("/dance".to_string()))
        );
    }

    #[test]
    fn test_prompts() {
        let user = User::new(UserId::new("u"), Email::parse("a@b.io").unwrap());
        assert_eq!(
            prompt_for(BoardVariant::Authenticated, &AuthState::Unauthenticated, None),
            "email> "
        );
        assert_eq!(
            prompt_for(
                BoardVariant::Authenticated,
                &AuthState::CodeSent {
                    email: user.email.clone()
                },
                None
            ),
            "code> "
        );
        assert_eq!(
            prompt_for(
                BoardVariant::Authenticated,
                &AuthState::Authenticated { user },
                None
            ),
            "[a@b.io] ask> "
        );
        assert_eq!(
            prompt_for(BoardVariant::Open, &AuthState::Unauthenticated, Some("ada")),
            "[ada] ask> "
        );
    }
}

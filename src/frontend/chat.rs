/*!
Chat front end: line-oriented stand-in for a chat channel.

Each input line is one chat message. Messages that start with the configured
prefix (default `!f1`) are split shell-style into tokens and dispatched; all
other messages are ignored. Replies:

  OK     one message per primitive, fenced with ```
  error  a single unfenced message "INTERNAL_ERROR: <text>"
*/

use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::dispatch::{CommandResult, Dispatcher};
use crate::render;

pub struct ChatSession<'a> {
    dispatcher: &'a Dispatcher,
    prefix: String,
}

impl<'a> ChatSession<'a> {
    pub fn new(dispatcher: &'a Dispatcher, prefix: impl Into<String>) -> Self {
        Self {
            dispatcher,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Tokens after the prefix, or `None` when the message is not for us.
    fn strip_prefix<'m>(&self, message: &'m str) -> Option<&'m str> {
        let rest = message.trim_start().strip_prefix(self.prefix.as_str())?;
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            Some(rest)
        } else {
            None
        }
    }

    /// Replies for one incoming message; empty when the message is ignored.
    pub fn handle(&self, message: &str) -> Vec<String> {
        let Some(rest) = self.strip_prefix(message) else {
            return Vec::new();
        };
        let result = match shell_words::split(rest) {
            Ok(tokens) => {
                debug!(?tokens, "chat command");
                self.dispatcher.run_command(&tokens)
            }
            Err(e) => {
                info!(error = %e, "could not tokenize chat message");
                CommandResult::error(format!("Could not split message into arguments: {e}"))
            }
        };
        replies(&result)
    }

    /// Serve messages from `input` until EOF, writing replies separated by a blank line.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> io::Result<()> {
        info!(prefix = %self.prefix(), "chat session started");
        for line in input.lines() {
            for reply in self.handle(&line?) {
                writeln!(output, "{reply}\n")?;
            }
            output.flush()?;
        }
        info!("chat session ended");
        Ok(())
    }
}

fn replies(result: &CommandResult) -> Vec<String> {
    if result.is_error() {
        let body = render::render_cli(result.value(), &render::StyleOptions::plain());
        return vec![format!("{}: {body}", result.status())];
    }
    render::chat_messages(result.value())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::build_dispatcher;
    use crate::testing;

    fn dispatcher() -> Dispatcher {
        build_dispatcher(testing::services()).unwrap()
    }

    #[test]
    fn ignores_messages_without_prefix() {
        let d = dispatcher();
        let chat = ChatSession::new(&d, "!f1");
        assert!(chat.handle("hello there").is_empty());
        assert!(chat.handle("!f1schedule 2023").is_empty());
        assert_eq!(chat.prefix(), "!f1");
    }

    #[test]
    fn bare_prefix_is_an_error_reply() {
        let d = dispatcher();
        let replies = ChatSession::new(&d, "!f1").handle("!f1");
        assert_eq!(replies.len(), 1);
        assert!(replies[0].starts_with("INTERNAL_ERROR: "));
    }

    #[test]
    fn quoted_race_names_stay_one_token() {
        let d = dispatcher();
        let replies = ChatSession::new(&d, "!f1").handle("!f1 results 2021 'abu dhabi' -s q");
        assert_eq!(replies.len(), 2);
        assert!(replies[0].contains("Abu Dhabi Grand Prix"));
        assert!(replies[1].starts_with("```\nPosition"));
        assert!(replies[1].contains("Max Verstappen"));
    }

    #[test]
    fn errors_are_prefixed_and_unfenced() {
        let d = dispatcher();
        let replies = ChatSession::new(&d, "!f1").handle("!f1 schedule 1949");
        assert_eq!(
            replies,
            vec![
                "INTERNAL_ERROR: Failed to run command 'schedule' with error:\n\
                 F1's first race was in 1950."
                    .to_string()
            ]
        );
    }

    #[test]
    fn unbalanced_quotes_do_not_reach_dispatcher() {
        let d = dispatcher();
        let replies = ChatSession::new(&d, "!f1").handle("!f1 results 2021 'abu");
        assert_eq!(replies.len(), 1);
        assert!(replies[0].starts_with("INTERNAL_ERROR: Could not split message"));
    }

    #[test]
    fn run_serves_until_eof() {
        let d = dispatcher();
        let input = b"!f1 help\nnot for us\n!f1 schedule 2023\n";
        let mut out = Vec::new();
        ChatSession::new(&d, "!f1")
            .run(&input[..], &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("```\nAvailable commands:"));
        assert!(text.contains("Saudi Arabian Grand Prix"));
        assert!(!text.contains("not for us"));
    }
}

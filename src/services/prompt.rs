use std::io::{BufRead, Write};

/// Source of yes/no answers for destructive actions.
pub trait Confirm {
    fn confirm(&self, question: &str) -> bool;
}

/// Asks on stdout and blocks for one line from stdin.
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, question: &str) -> bool {
        let mut stdout = std::io::stdout();
        // best effort
        let _ = write!(stdout, "{} (Y/n) ", question);
        let _ = stdout.flush();
        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        is_affirmative(&line)
    }
}

/// Answers every question the same way; used for `--yes` and in tests.
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&self, _question: &str) -> bool {
        self.0
    }
}

/// Empty input counts as yes, matching the `(Y/n)` default.
pub fn is_affirmative(answer: &str) -> bool {
    let a = answer.trim().to_ascii_lowercase();
    a.is_empty() || a == "y" || a == "yes"
}

//! Colored terminal output utilities.

use console::{Style, Term};

/// Styled progress and result messages on stderr.
///
/// Write failures are ignored.
pub(crate) struct Output {
    term: Term,
    ok: Style,
    notice: Style,
    failure: Style,
    heading: Style,
    detail: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            ok: Style::new().green(),
            notice: Style::new().yellow(),
            failure: Style::new().red().bold(),
            heading: Style::new().cyan().bold(),
            detail: Style::new().dim(),
        }
    }

    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }

    /// Plain line.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Final result of a command.
    pub(crate) fn success(&self, msg: &str) {
        self.styled(&self.ok, msg);
    }

    /// Something was skipped or looks off, but the command goes on.
    pub(crate) fn warning(&self, msg: &str) {
        self.styled(&self.notice, msg);
    }

    /// Fatal error, printed right before exiting.
    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.failure, msg);
    }

    /// Title line of a listing.
    pub(crate) fn highlight(&self, msg: &str) {
        self.styled(&self.heading, msg);
    }

    /// Per-item detail under a listing.
    pub(crate) fn muted(&self, msg: &str) {
        self.styled(&self.detail, msg);
    }
}

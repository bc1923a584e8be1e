//! Non-interactive presenter for the command line

use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

use super::form::FormPresenter;

/// Writes dialogs as lines on a writer (stderr by default) and saves to a
/// fixed location chosen up front
pub struct TerminalPresenter<W = std::io::Stderr> {
    out: W,
    save_to: Option<PathBuf>,
}

impl TerminalPresenter {
    pub fn new(save_to: Option<PathBuf>) -> Self {
        Self::with_writer(std::io::stderr(), save_to)
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn with_writer(out: W, save_to: Option<PathBuf>) -> Self {
        Self { out, save_to }
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    fn line(&mut self, level: &str, title: &str, text: &str) {
        if let Err(err) = writeln!(self.out, "[{}] {}: {}", level, title, text) {
            debug!(title = title, "Failed to write message: {}", err);
        }
    }
}

impl<W: Write + Send> FormPresenter for TerminalPresenter<W> {
    fn show_warning(&mut self, title: &str, text: &str) {
        self.line("warning", title, text);
    }

    fn show_critical(&mut self, title: &str, text: &str) {
        self.line("error", title, text);
    }

    fn show_information(&mut self, title: &str, text: &str) {
        self.line("info", title, text);
    }

    fn set_busy(&mut self, busy: bool) {
        if busy {
            self.line("info", "Request", "Processing... (Ctrl-C to cancel)");
        }
    }

    /// Uses the configured location, falling back to the suggested file name
    fn choose_save_path(&mut self, suggested: &str) -> Option<PathBuf> {
        let path = self
            .save_to
            .clone()
            .or_else(|| (!suggested.is_empty()).then(|| PathBuf::from(suggested)));
        debug!(path = ?path, "Save location chosen");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_written_as_lines() {
        let mut presenter = TerminalPresenter::with_writer(Vec::new(), None);
        presenter.show_warning("Input Error", "Table name cannot be empty.");
        presenter.show_critical("Network Error", "unknown table");
        presenter.set_busy(false);

        let out = String::from_utf8(presenter.into_writer()).unwrap();
        assert_eq!(
            out,
            "[warning] Input Error: Table name cannot be empty.\n[error] Network Error: unknown table\n"
        );
    }

    struct ClosedWriter;

    impl Write for ClosedWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_does_not_interrupt_the_form() {
        let mut presenter = TerminalPresenter::with_writer(ClosedWriter, None);
        presenter.show_critical("Network Error", "unknown table");
        presenter.set_busy(true);
        assert_eq!(
            presenter.choose_save_path("users.csv"),
            Some(PathBuf::from("users.csv"))
        );
    }

    #[test]
    fn test_save_path_prefers_explicit_location() {
        let mut presenter =
            TerminalPresenter::with_writer(Vec::new(), Some(PathBuf::from("/tmp/out.csv")));
        assert_eq!(
            presenter.choose_save_path("users.csv"),
            Some(PathBuf::from("/tmp/out.csv"))
        );

        let mut presenter = TerminalPresenter::with_writer(Vec::new(), None);
        assert_eq!(
            presenter.choose_save_path("users.csv"),
            Some(PathBuf::from("users.csv"))
        );
        assert_eq!(presenter.choose_save_path(""), None);
    }
}

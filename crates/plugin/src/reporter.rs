//! Human-readable progress lines for lifecycle hooks.

use std::fmt::Display;
use std::io::{self, Stdout, Write};

use console::{StyledObject, style};

/// Writes one unstructured line per lifecycle event.
///
/// Write errors are dropped: hooks have no failure path back to the host.
pub struct Reporter<W: Write = Stdout> {
    out: W,
    styled: bool,
}

impl Reporter<Stdout> {
    /// Creates a reporter on standard output, styled when the terminal allows.
    pub fn stdout() -> Self {
        Self {
            out: io::stdout(),
            styled: console::colors_enabled(),
        }
    }
}

impl Default for Reporter<Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write> Reporter<W> {
    /// Creates an unstyled reporter on an arbitrary writer.
    pub fn new(out: W) -> Self {
        Self { out, styled: false }
    }

    /// Returns the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consumes the reporter, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn build_started(&mut self, command: &str, mode: &str) {
        let line = format!(
            "{} build started ({}, mode {})",
            self.tag(),
            self.paint(style(command).cyan().bold()),
            self.paint(style(mode).cyan())
        );
        self.line(&line);
    }

    pub fn build_finished(&mut self) {
        let line = format!("{} build finished", self.tag());
        self.line(&line);
    }

    /// Prints a header followed by one line per emitted file.
    pub fn bundle_generated(&mut self, dir: &str, file_names: &[&str]) {
        let header = format!(
            "{} generated {} file(s) in {}",
            self.tag(),
            file_names.len(),
            self.paint(style(dir).bold())
        );
        self.line(&header);

        for name in file_names {
            let line = format!("  {} {}", self.paint(style("-").dim()), name);
            self.line(&line);
        }
    }

    pub fn bundle_closed(&mut self) {
        let line = format!(
            "{} {}",
            self.tag(),
            self.paint(style("bundle closed").green())
        );
        self.line(&line);
    }

    pub fn file_changed(&mut self, timestamp: &str, event: &str, id: &str) {
        let line = format!(
            "[{}] {} {}",
            self.paint(style(timestamp).dim()),
            self.paint(style(event).yellow().bold()),
            id
        );
        self.line(&line);
    }

    pub fn hot_update(&mut self, file: &str) {
        let line = format!(
            "{} {} {}",
            self.tag(),
            self.paint(style("hot update:").yellow()),
            file
        );
        self.line(&line);
    }

    fn tag(&self) -> StyledObject<&'static str> {
        self.paint(style("[vite-info]").cyan().dim())
    }

    fn paint<D: Display>(&self, object: StyledObject<D>) -> StyledObject<D> {
        object.force_styling(self.styled)
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(reporter: Reporter<Vec<u8>>) -> Vec<String> {
        String::from_utf8(reporter.into_inner())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_build_started_line() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.build_started("build", "production");
        assert_eq!(
            lines(reporter),
            vec!["[vite-info] build started (build, mode production)"]
        );
    }

    #[test]
    fn test_bundle_generated_lists_every_file() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.bundle_generated("dist", &["assets/index-1a2b3c4d.js", "assets/admin-5e6f7a8b.js"]);
        assert_eq!(
            lines(reporter),
            vec![
                "[vite-info] generated 2 file(s) in dist",
                "  - assets/index-1a2b3c4d.js",
                "  - assets/admin-5e6f7a8b.js",
            ]
        );
    }

    #[test]
    fn test_file_changed_line() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.file_changed("2026-10-16T09:30:00.000Z", "update", "/proj/src/main.ts");
        assert_eq!(
            lines(reporter),
            vec!["[2026-10-16T09:30:00.000Z] update /proj/src/main.ts"]
        );
    }

    #[test]
    fn test_closing_lines() {
        let mut reporter = Reporter::new(Vec::new());
        reporter.build_finished();
        reporter.bundle_closed();
        reporter.hot_update("/proj/src/App.ts");
        assert_eq!(
            lines(reporter),
            vec![
                "[vite-info] build finished",
                "[vite-info] bundle closed",
                "[vite-info] hot update: /proj/src/App.ts",
            ]
        );
    }
}

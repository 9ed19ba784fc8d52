//! # Generation Report
//!
//! Every generator returns its decisions as [`Notice`]s instead of printing
//! them. The CLI prints the collected [`Report`] once the run is over, so
//! the same information is available to tests and dry runs.

use std::fmt;

/// Which part of the run produced a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Schema,
    Scaffold,
    Routes,
    Infrastructure,
    Rewrite,
    Format,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Schema => "schema",
            Stage::Scaffold => "scaffold",
            Stage::Routes => "routes",
            Stage::Infrastructure => "infra",
            Stage::Rewrite => "rewrite",
            Stage::Format => "format",
        };
        f.write_str(s)
    }
}

/// What happened to the subject of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A new artifact was (or, in a dry run, would be) written
    Generated,
    /// An existing artifact was (or would be) modified
    Updated,
    /// The artifact already matched and was left alone
    Unchanged,
    /// The subject was deliberately not processed
    Skipped,
    /// The subject could not be processed; the run continues
    Warning,
}

/// One human-readable line of the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub stage: Stage,
    pub action: Action,
    /// The artifact, path or handler the notice is about
    pub subject: String,
    pub message: String,
}

impl Notice {
    pub fn new(
        stage: Stage,
        action: Action,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Notice {
            stage,
            action,
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.action == Action::Warning
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.action {
            Action::Generated => "✅",
            Action::Updated => "📝",
            Action::Unchanged => "ℹ️ ",
            Action::Skipped => "⏭️ ",
            Action::Warning => "⚠️ ",
        };
        write!(f, "{icon} [{}] {}: {}", self.stage, self.subject, self.message)
    }
}

/// Ordered collection of notices for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    notices: Vec<Notice>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        match notice.action {
            Action::Warning => tracing::warn!(
                stage = %notice.stage,
                subject = %notice.subject,
                "{}",
                notice.message
            ),
            _ => tracing::debug!(
                stage = %notice.stage,
                subject = %notice.subject,
                action = ?notice.action,
                "{}",
                notice.message
            ),
        }
        self.notices.push(notice);
    }

    pub fn extend(&mut self, other: Report) {
        self.notices.extend(other.notices);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter().filter(|n| n.is_warning())
    }

    pub fn has_warnings(&self) -> bool {
        self.notices.iter().any(Notice::is_warning)
    }

    /// Notices for one stage with the given action
    pub fn filter(&self, stage: Stage, action: Action) -> Vec<&Notice> {
        self.notices
            .iter()
            .filter(|n| n.stage == stage && n.action == action)
            .collect()
    }

    /// Whether the run wrote (or would write) anything
    pub fn has_changes(&self) -> bool {
        self.notices
            .iter()
            .any(|n| matches!(n.action, Action::Generated | Action::Updated))
    }

    /// Print every notice to stdout, one per line
    pub fn print(&self) {
        for notice in &self.notices {
            println!("{notice}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_queries() {
        let mut report = Report::new();
        report.push(Notice::new(
            Stage::Scaffold,
            Action::Generated,
            "api/get_user.resolver.go",
            "generated",
        ));
        report.push(Notice::new(
            Stage::Infrastructure,
            Action::Warning,
            "/a/b",
            "nested paths not supported",
        ));
        report.push(Notice::new(Stage::Routes, Action::Skipped, "/user", "already registered"));

        assert!(report.has_warnings());
        assert!(report.has_changes());
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(report.filter(Stage::Routes, Action::Skipped).len(), 1);
        assert_eq!(report.notices().len(), 3);
    }

    #[test]
    fn test_notice_display_names_subject() {
        let notice = Notice::new(
            Stage::Infrastructure,
            Action::Warning,
            "/a/b",
            "nested paths not supported",
        );
        let line = notice.to_string();
        assert!(line.contains("[infra]"));
        assert!(line.contains("/a/b"));
        assert!(line.contains("nested paths not supported"));
    }
}

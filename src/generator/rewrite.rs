//! Batch rewrite of generated database model files from `float64` to
//! `decimal.Decimal` (github.com/shopspring/decimal).

use anyhow::Context;
use std::fs;
use std::path::Path;

use crate::report::{Action, Notice, Report, Stage};

/// Import path of the decimal package
pub const DECIMAL_IMPORT: &str = "github.com/shopspring/decimal";

/// Rewrite one Go source file; `None` when it has no `float64` to replace
///
/// The decimal import goes after a `"time"` line inside an import block when
/// there is one, otherwise into a new import block after the package clause.
/// A file that already imports the package does not get a second import.
pub fn rewrite_decimal(contents: &str) -> Option<String> {
    if !contents.contains("float64") {
        return None;
    }
    let rewritten = contents.replace("float64", "decimal.Decimal");
    let quoted_import = format!("\"{DECIMAL_IMPORT}\"");
    if rewritten.contains(&quoted_import) {
        return Some(rewritten);
    }

    let mut lines: Vec<String> = rewritten.split('\n').map(str::to_string).collect();
    let time_line = lines
        .iter()
        .position(|line| line.trim() == "\"time\"" && line.starts_with(char::is_whitespace));
    if let Some(index) = time_line {
        let indent: String = lines[index].chars().take_while(|c| c.is_whitespace()).collect();
        lines.insert(index + 1, String::new());
        lines.insert(index + 2, format!("{indent}{quoted_import}"));
    } else if let Some(index) = lines.iter().position(|line| line.starts_with("package ")) {
        let block = ["", "import (", &format!("\t{quoted_import}"), ")"];
        for (offset, line) in block.iter().enumerate() {
            lines.insert(index + 1 + offset, (*line).to_string());
        }
    }
    Some(lines.join("\n"))
}

/// Rewrite every file in `root/dir` whose name contains one of `targets`
///
/// Files are visited in name order. Nothing is written with `dry_run`.
///
/// # Errors
///
/// Fails if the directory cannot be listed or a matching file cannot be read
/// or written.
pub fn rewrite_decimal_models(
    root: &Path,
    dir: &Path,
    targets: &[String],
    dry_run: bool,
) -> anyhow::Result<Report> {
    let full = root.join(dir);
    let mut names = Vec::new();
    let entries =
        fs::read_dir(&full).with_context(|| format!("Failed to list {}", full.display()))?;
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();

    let mut report = Report::new();
    let mut matched = vec![false; targets.len()];
    for name in names {
        let mut hit = false;
        for (target, seen) in targets.iter().zip(matched.iter_mut()) {
            if name.contains(target.as_str()) {
                *seen = true;
                hit = true;
            }
        }
        if !hit {
            continue;
        }
        let relative = dir.join(&name);
        let subject = relative.display().to_string();
        let path = full.join(&name);
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        match rewrite_decimal(&contents) {
            Some(rewritten) => {
                if !dry_run {
                    fs::write(&path, rewritten)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                }
                report.push(Notice::new(
                    Stage::Rewrite,
                    Action::Updated,
                    subject,
                    "float64 replaced with decimal.Decimal",
                ));
            }
            None => report.push(Notice::new(
                Stage::Rewrite,
                Action::Unchanged,
                subject,
                "no float64 fields",
            )),
        }
    }

    for (target, seen) in targets.iter().zip(matched) {
        if !seen {
            report.push(Notice::new(
                Stage::Rewrite,
                Action::Warning,
                target.as_str(),
                format!("no file in {} matches this name", dir.display()),
            ));
        }
    }
    Ok(report)
}

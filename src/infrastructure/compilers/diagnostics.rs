//! Parsing of `javac` diagnostic output.
//!
//! `javac` prints each diagnostic as a header line
//! (`path/A.java:12: error: message`) followed by indented context lines
//! (source excerpt, caret, symbol/location notes). The Error Prone plugin
//! uses the same format with the check name in brackets at the start of the
//! message. Trailing `N errors` / `N warnings` summaries are dropped.

use crate::domain::models::{Diagnostic, Severity};

/// Parse compiler output into diagnostics, in the order they were printed.
pub fn parse_javac_output(output: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut current: Option<Diagnostic> = None;

    for line in output.lines() {
        if is_summary_line(line) {
            diagnostics.extend(current.take());
            continue;
        }

        if let Some(diag) = parse_header(line) {
            diagnostics.extend(current.replace(diag));
            continue;
        }

        if let Some(diag) = current.as_mut() {
            diag.rendered.push('\n');
            diag.rendered.push_str(line);
        }
    }

    diagnostics.extend(current);
    diagnostics
}

/// Parse a header line, with or without a `file:line` location.
fn parse_header(line: &str) -> Option<Diagnostic> {
    if line.starts_with(char::is_whitespace) {
        return None;
    }

    for (severity, tag) in [
        (Severity::Error, "error"),
        (Severity::Warning, "warning"),
        (Severity::Note, "note"),
    ] {
        let marker = format!(": {tag}: ");
        if let Some(idx) = line.find(&marker) {
            let (location, rest) = line.split_at(idx);
            if let Some((file, line_no)) = split_location(location) {
                return Some(build(
                    Some(file.to_string()),
                    Some(line_no),
                    severity,
                    &rest[marker.len()..],
                    line,
                ));
            }
        }
    }

    for (severity, prefix) in [
        (Severity::Error, "error: "),
        (Severity::Warning, "warning: "),
        (Severity::Note, "Note: "),
        (Severity::Note, "note: "),
    ] {
        if let Some(rest) = line.strip_prefix(prefix) {
            return Some(build(None, None, severity, rest, line));
        }
    }

    None
}

fn split_location(location: &str) -> Option<(&str, u32)> {
    let (file, line_no) = location.rsplit_once(':')?;
    let line_no = line_no.parse::<u32>().ok()?;
    if file.is_empty() {
        return None;
    }
    Some((file, line_no))
}

fn build(
    file: Option<String>,
    line: Option<u32>,
    severity: Severity,
    message: &str,
    rendered: &str,
) -> Diagnostic {
    let (check, message) = split_check(message);
    Diagnostic {
        file,
        line,
        severity,
        check,
        message: message.to_string(),
        rendered: rendered.to_string(),
    }
}

/// Split a leading `[CheckName] ` off a message.
fn split_check(message: &str) -> (Option<String>, &str) {
    if let Some(rest) = message.strip_prefix('[') {
        if let Some((name, tail)) = rest.split_once("] ") {
            if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return (Some(name.to_string()), tail);
            }
        }
    }
    (None, message)
}

/// `1 error`, `12 warnings`, etc.
fn is_summary_line(line: &str) -> bool {
    let mut parts = line.trim().splitn(2, ' ');
    let count = parts.next().unwrap_or_default();
    let noun = parts.next().unwrap_or_default();
    !count.is_empty()
        && count.chars().all(|c| c.is_ascii_digit())
        && matches!(noun, "error" | "errors" | "warning" | "warnings")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_output() {
        assert!(parse_javac_output("").is_empty());
    }

    #[test]
    fn parse_error_with_context() {
        let output = "\
src/A.java:3: error: cannot find symbol
    Foo x;
    ^
  symbol:   class Foo
  location: class A
1 error
";
        let diags = parse_javac_output(output);
        assert_eq!(diags.len(), 1);
        let diag = &diags[0];
        assert_eq!(diag.file.as_deref(), Some("src/A.java"));
        assert_eq!(diag.line, Some(3));
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "cannot find symbol");
        assert!(diag.rendered.contains("location: class A"));
        assert!(!diag.rendered.contains("1 error"));
    }

    #[test]
    fn parse_error_prone_check_name() {
        let output = "\
src/B.java:5: warning: [DeadException] Exception created but not thrown
    new RuntimeException();
    ^
    (see https://errorprone.info/bugpattern/DeadException)
src/B.java:9: error: [ArrayEquals] Reference equality used to compare arrays
    a.equals(b);
     ^
1 error
1 warning
";
        let diags = parse_javac_output(output);
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].check.as_deref(), Some("DeadException"));
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[0].message, "Exception created but not thrown");
        assert_eq!(diags[1].check.as_deref(), Some("ArrayEquals"));
        assert!(diags[1].is_error());
    }

    #[test]
    fn parse_locationless_diagnostics() {
        let output = "\
warning: [options] bootstrap class path not set in conjunction with -source 8
error: invalid flag: -bogus
Note: Some input files use unchecked or unsafe operations.
";
        let diags = parse_javac_output(output);
        assert_eq!(diags.len(), 3);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[0].file, None);
        assert_eq!(diags[1].message, "invalid flag: -bogus");
        assert_eq!(diags[2].severity, Severity::Note);
    }

    #[test]
    fn bracketed_text_without_check_name_is_kept() {
        let (check, message) = split_check("[not a check] text");
        assert_eq!(check, None);
        assert_eq!(message, "[not a check] text");
    }

    #[test]
    fn windows_paths_keep_drive_letter() {
        let diags = parse_javac_output("C:\\src\\A.java:7: error: boom\n");
        assert_eq!(diags[0].file.as_deref(), Some("C:\\src\\A.java"));
        assert_eq!(diags[0].line, Some(7));
    }

    #[test]
    fn summary_lines() {
        assert!(is_summary_line("1 error"));
        assert!(is_summary_line("100 warnings"));
        assert!(!is_summary_line("error"));
        assert!(!is_summary_line("1 thing"));
    }
}

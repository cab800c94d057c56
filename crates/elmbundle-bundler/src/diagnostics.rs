//! Diagnostic extraction from Rolldown errors.
//!
//! Rolldown reports failures as batched build diagnostics whose structure is
//! not part of its stable API. We work from their debug rendering and pull
//! out the pieces needed for a readable report.

/// Extracted diagnostic information from Rolldown.
#[derive(Debug, Clone)]
pub struct ExtractedDiagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub file: Option<String>,
    pub help: Option<String>,
    /// Error chain (causes) extracted from the error
    pub error_chain: Vec<String>,
}

/// Diagnostic kind (subset of Rolldown's EventKind we distinguish).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    UnresolvedEntry,
    UnresolvedImport,
    ParseError,
    Plugin,
    Other(String),
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::UnresolvedEntry => write!(f, "UnresolvedEntry"),
            DiagnosticKind::UnresolvedImport => write!(f, "UnresolvedImport"),
            DiagnosticKind::ParseError => write!(f, "ParseError"),
            DiagnosticKind::Plugin => write!(f, "Plugin"),
            DiagnosticKind::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Extract diagnostics from a Rolldown error value.
pub fn extract_from_rolldown_error(error: &dyn std::fmt::Debug) -> Vec<ExtractedDiagnostic> {
    let error_str = unescape_debug(&format!("{error:?}"));

    let parts: Vec<&str> = error_str
        .split("BatchedBuildDiagnostic")
        .filter(|s| !s.trim().is_empty())
        .collect();

    if parts.len() > 1 {
        parts.iter().map(|part| extract_single(part)).collect()
    } else {
        vec![extract_single(&error_str)]
    }
}

fn extract_single(error_str: &str) -> ExtractedDiagnostic {
    let kind = if error_str.contains("UnresolvedEntry") {
        DiagnosticKind::UnresolvedEntry
    } else if error_str.contains("UnresolvedImport") || error_str.contains("Could not resolve") {
        DiagnosticKind::UnresolvedImport
    } else if error_str.contains("Plugin") || error_str.contains("plugin") {
        DiagnosticKind::Plugin
    } else if error_str.contains("Parse error")
        || error_str.contains("Syntax")
        || error_str.contains("Unexpected token")
    {
        DiagnosticKind::ParseError
    } else {
        DiagnosticKind::Other("Error".to_string())
    };

    ExtractedDiagnostic {
        kind,
        message: error_str.trim().to_string(),
        file: extract_file_path(error_str),
        help: extract_help_text(error_str),
        error_chain: extract_error_chain(error_str),
    }
}

/// Turn escaped newlines and quotes from `{:?}` output back into text.
fn unescape_debug(text: &str) -> String {
    text.replace("\\n", "\n")
        .replace("\\t", "\t")
        .replace("\\\"", "\"")
}

/// Extract error chain from "Caused by:" lines (anyhow formatting).
fn extract_error_chain(text: &str) -> Vec<String> {
    let mut chain = Vec::new();
    let mut in_causes = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(pos) = trimmed.find("Caused by:") {
            in_causes = true;
            let cause = trimmed[pos + 10..].trim();
            if !cause.is_empty() {
                chain.push(cause.to_string());
            }
        } else if in_causes {
            // "    0: message" entries following a Caused by: header
            if let Some((idx, cause)) = trimmed.split_once(": ") {
                if idx.chars().all(|c| c.is_ascii_digit()) && !cause.is_empty() {
                    chain.push(cause.trim().to_string());
                }
            }
        }
    }

    chain
}

/// Extract the first source path mentioned in the message.
fn extract_file_path(text: &str) -> Option<String> {
    for ext in &[".elm", ".js", ".mjs", ".cjs", ".ts"] {
        let mut search_from = 0;
        while let Some(rel) = text[search_from..].find(ext) {
            let end = search_from + rel + ext.len();
            search_from = end;

            // Must end the token, not be a prefix like `.json`
            if text[end..]
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric())
            {
                continue;
            }

            let before = &text[..end];
            let start = before
                .rfind(|c: char| c.is_whitespace() || matches!(c, '"' | '\'' | '(' | '`'))
                .map(|i| i + 1)
                .unwrap_or(0);
            let path = before[start..].trim_end_matches([',', ':']);
            if !path.is_empty() && path != *ext {
                return Some(path.to_string());
            }
        }
    }
    None
}

fn extract_help_text(text: &str) -> Option<String> {
    for indicator in &["help: ", "Help: ", "hint: ", "Hint: "] {
        if let Some(pos) = text.find(indicator) {
            let after = &text[pos + indicator.len()..];
            let help_str = after.lines().next().unwrap_or("").trim().to_string();
            if !help_str.is_empty() {
                return Some(help_str);
            }
        }
    }
    None
}

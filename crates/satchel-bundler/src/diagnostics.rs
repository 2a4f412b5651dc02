//! Diagnostic extraction from rolldown errors.
//!
//! Rolldown reports failures as batched diagnostic values whose concrete
//! types are not stable across versions. This module flattens them into a
//! small owned record by classifying the formatted output, which insulates
//! the rest of the crate from upstream API churn.

/// One diagnostic extracted from a rolldown build failure.
#[derive(Debug, Clone)]
pub struct BuildDiagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub help: Option<String>,
}

/// Coarse classification of a rolldown diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    ParseError,
    UnresolvedEntry,
    UnresolvedImport,
    Plugin,
    Other,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::ParseError => write!(f, "ParseError"),
            DiagnosticKind::UnresolvedEntry => write!(f, "UnresolvedEntry"),
            DiagnosticKind::UnresolvedImport => write!(f, "UnresolvedImport"),
            DiagnosticKind::Plugin => write!(f, "Plugin"),
            DiagnosticKind::Other => write!(f, "Error"),
        }
    }
}

/// Extract diagnostics from a rolldown error value.
///
/// Rolldown does not expose a stable public accessor for its batched
/// diagnostics, so this classifies the formatted representation. A batch
/// formats as a bracketed list, yielding one diagnostic per element.
pub fn extract_from_rolldown(error: &dyn std::fmt::Debug) -> Vec<BuildDiagnostic> {
    let formatted = format!("{error:?}");
    split_batch(&formatted).into_iter().map(classify).collect()
}

/// Split the formatted form of a diagnostic batch into its elements.
///
/// Elements separate at top-level commas only; commas nested inside
/// brackets, braces, parens, or string literals stay put. Input that is not
/// a bracketed list comes back whole.
fn split_batch(formatted: &str) -> Vec<&str> {
    let trimmed = formatted.trim();
    let Some(inner) = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
    else {
        return vec![trimmed];
    };

    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '(' | '[' | '{' if !in_string => depth += 1,
            ')' | ']' | '}' if !in_string => depth = depth.saturating_sub(1),
            ',' if !in_string && depth == 0 => {
                let part = inner[start..i].trim();
                if !part.is_empty() {
                    parts.push(part);
                }
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = inner[start..].trim();
    if !last.is_empty() {
        parts.push(last);
    }

    if parts.is_empty() {
        vec![trimmed]
    } else {
        parts
    }
}

fn classify(message: &str) -> BuildDiagnostic {
    let kind = if message.contains("Parse") || message.contains("Syntax") {
        DiagnosticKind::ParseError
    } else if message.contains("UnresolvedEntry") || message.contains("Could not resolve entry") {
        DiagnosticKind::UnresolvedEntry
    } else if message.contains("UnresolvedImport") || message.contains("Could not resolve") {
        DiagnosticKind::UnresolvedImport
    } else if message.contains("Plugin") || message.contains("plugin") {
        DiagnosticKind::Plugin
    } else {
        DiagnosticKind::Other
    };

    let help = match kind {
        DiagnosticKind::UnresolvedEntry => {
            Some("Check that the entry file exists relative to the working directory.".to_string())
        }
        DiagnosticKind::UnresolvedImport => Some(
            "Check the import path, or add the package to the externals list if the host provides it."
                .to_string(),
        ),
        _ => None,
    };

    BuildDiagnostic {
        kind,
        message: message.to_string(),
        help,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_unresolved_import() {
        let diag = classify("UnresolvedImport: Could not resolve './missing.ts'");
        assert_eq!(diag.kind, DiagnosticKind::UnresolvedImport);
        assert!(diag.help.is_some());
    }

    #[test]
    fn classifies_parse_error() {
        let diag = classify("ParseError: Syntax error at line 3");
        assert_eq!(diag.kind, DiagnosticKind::ParseError);
    }

    #[test]
    fn unknown_messages_fall_back_to_other() {
        let diag = classify("something exploded");
        assert_eq!(diag.kind, DiagnosticKind::Other);
        assert!(diag.help.is_none());
    }

    #[test]
    fn extract_keeps_full_message() {
        let diags = extract_from_rolldown(&"Could not resolve 'obsidian'");
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("obsidian"));
    }

    #[test]
    fn extract_yields_one_diagnostic_per_batch_element() {
        let batch = vec![
            "ParseError: unexpected token at src/main.ts:3".to_string(),
            "Could not resolve './missing.ts' from src/main.ts".to_string(),
        ];
        let diags = extract_from_rolldown(&batch);
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].kind, DiagnosticKind::ParseError);
        assert_eq!(diags[1].kind, DiagnosticKind::UnresolvedImport);
    }

    #[test]
    fn batch_split_keeps_nested_commas_together() {
        let parts = split_batch(r#"[Diag { kind: Parse, spans: [1, 2] }, Diag { msg: "a, b" }]"#);
        assert_eq!(parts.len(), 2);
        assert!(parts[0].contains("spans: [1, 2]"));
        assert!(parts[1].contains(r#""a, b""#));
    }

    #[test]
    fn non_list_output_stays_a_single_diagnostic() {
        assert_eq!(split_batch("plain failure"), vec!["plain failure"]);
        assert_eq!(split_batch("[]").len(), 1);
    }
}

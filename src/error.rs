use std::collections::HashMap;
use std::fmt;

/// Which stratum of the engine produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Compilation,
    InvalidPattern,
    UnsupportedFeature,
    Runtime,
}

/// Stable machine-readable identifier for an error family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UnclosedGroup,
    UnclosedClass,
    UnclosedName,
    EmptyGroupName,
    UnknownGroupSyntax,
    TruncatedEscape,
    MalformedBound,
    StrayParen,
    UnknownCallTarget,
    TargetlessQuantifier,
    Unsupported,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::UnclosedGroup => "UNCLOSED_GROUP",
            ErrorCode::UnclosedClass => "UNCLOSED_CLASS",
            ErrorCode::UnclosedName => "UNCLOSED_NAME",
            ErrorCode::EmptyGroupName => "EMPTY_GROUP_NAME",
            ErrorCode::UnknownGroupSyntax => "UNKNOWN_GROUP_SYNTAX",
            ErrorCode::TruncatedEscape => "TRUNCATED_ESCAPE",
            ErrorCode::MalformedBound => "MALFORMED_BOUND",
            ErrorCode::StrayParen => "STRAY_PAREN",
            ErrorCode::UnknownCallTarget => "UNKNOWN_CALL_TARGET",
            ErrorCode::TargetlessQuantifier => "TARGETLESS_QUANTIFIER",
            ErrorCode::Unsupported => "UNSUPPORTED",
        };
        write!(f, "{}", name)
    }
}

/// A compile- or run-time regex failure.
///
/// Always carries the original pattern; parse failures additionally carry the
/// 0-based offset of the offending construct. `context` holds auxiliary data
/// such as the feature name and a suggestion for unsupported constructs.
#[derive(Debug, Clone)]
pub struct RegexError {
    pub kind: ErrorKind,
    pub message: String,
    pub pattern: String,
    pub position: Option<usize>,
    pub code: Option<ErrorCode>,
    pub context: HashMap<String, String>,
}

impl RegexError {
    pub(crate) fn invalid(
        pattern: &str,
        position: usize,
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Self {
        RegexError {
            kind: ErrorKind::InvalidPattern,
            message: message.into(),
            pattern: pattern.to_string(),
            position: Some(position),
            code: Some(code),
            context: HashMap::new(),
        }
    }

    pub(crate) fn unsupported(
        pattern: &str,
        position: usize,
        feature: &str,
        suggestion: &str,
    ) -> Self {
        let mut context = HashMap::new();
        context.insert("feature".to_string(), feature.to_string());
        context.insert("suggestion".to_string(), suggestion.to_string());
        RegexError {
            kind: ErrorKind::UnsupportedFeature,
            message: format!("{} is not supported; {}", feature, suggestion),
            pattern: pattern.to_string(),
            position: Some(position),
            code: Some(ErrorCode::Unsupported),
            context,
        }
    }
}

impl fmt::Display for RegexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(pos) = self.position {
            write!(f, " at offset {}", pos)?;
        }
        write!(f, " in /{}/", self.pattern)
    }
}

impl std::error::Error for RegexError {}

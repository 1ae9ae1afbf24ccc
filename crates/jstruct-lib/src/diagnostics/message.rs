use rowan::TextRange;

use jstruct_core::Span;

/// Diagnostic kinds, grouped by the stage that reports them.
///
/// The parser reports at most one diagnostic per source position, so when two
/// problems start at the same token the one raised first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    // Lexer
    UnrecognizedCharacter,
    UnterminatedString,
    UnterminatedChar,
    UnterminatedComment,
    TooManyLexErrors,

    // The file could not be parsed at all
    ParseAborted,

    // Cascades into everything after it
    UnclosedBody,

    // User omitted something required
    ExpectedTypeDeclaration,
    ExpectedIdentifier,
    ExpectedTypeName,
    ExpectedMember,
    ExpectedAnnotationValue,
    ExpectedSemicolon,
    ExpectedClassBody,

    // User wrote something that doesn't belong
    UnexpectedToken,
    MultipleSuperclasses,
    ExtendsNotAllowed,
    ImplementsNotAllowed,
    DefaultNotAllowed,
    UnsupportedDeclaration,
    MissingReturnType,
    DuplicateModifier,

    // Batch resolution
    AmbiguousNestedName,
    DuplicateTypeDeclaration,
    CyclicInheritance,
    InvalidSuperclass,
    InvalidInterface,
    MultiplePublicTypes,
    PublicTypeFileMismatch,
    UnresolvedReference,
}

/// Coarse grouping of diagnostic kinds by pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Lex,
    Syntax,
    Resolve,
}

impl DiagnosticKind {
    /// Default severity for this kind.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::UnresolvedReference | Self::TooManyLexErrors => Severity::Info,
            Self::MultiplePublicTypes | Self::PublicTypeFileMismatch | Self::DuplicateModifier => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    pub fn category(&self) -> DiagnosticCategory {
        match self {
            Self::UnrecognizedCharacter
            | Self::UnterminatedString
            | Self::UnterminatedChar
            | Self::UnterminatedComment
            | Self::TooManyLexErrors => DiagnosticCategory::Lex,
            Self::AmbiguousNestedName
            | Self::DuplicateTypeDeclaration
            | Self::CyclicInheritance
            | Self::InvalidSuperclass
            | Self::InvalidInterface
            | Self::MultiplePublicTypes
            | Self::PublicTypeFileMismatch
            | Self::UnresolvedReference => DiagnosticCategory::Resolve,
            _ => DiagnosticCategory::Syntax,
        }
    }

    /// Default hint for this kind, rendered as a help line.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::MultipleSuperclasses => {
                Some("a class can extend one class; use `implements` for interfaces")
            }
            Self::ImplementsNotAllowed => Some("interfaces inherit with `extends`"),
            Self::UnsupportedDeclaration => Some("the declaration is skipped"),
            Self::UnresolvedReference => Some("treated as an external type"),
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnrecognizedCharacter => "unrecognized character",
            Self::UnterminatedString => "unterminated string literal",
            Self::UnterminatedChar => "unterminated character literal",
            Self::UnterminatedComment => "unterminated block comment",
            Self::TooManyLexErrors => "too many lexer errors; further ones are not reported",

            Self::ParseAborted => "parsing aborted",

            Self::UnclosedBody => "missing closing `}`",

            Self::ExpectedTypeDeclaration => "expected a type declaration",
            Self::ExpectedIdentifier => "expected an identifier",
            Self::ExpectedTypeName => "expected a type name",
            Self::ExpectedMember => "expected a member declaration",
            Self::ExpectedAnnotationValue => "expected an annotation value",
            Self::ExpectedSemicolon => "expected `;`",
            Self::ExpectedClassBody => "expected `{`",

            Self::UnexpectedToken => "unexpected token",
            Self::MultipleSuperclasses => "a class cannot extend more than one class",
            Self::ExtendsNotAllowed => "`extends` is not allowed here",
            Self::ImplementsNotAllowed => "`implements` is not allowed here",
            Self::DefaultNotAllowed => "`default` value is only allowed on annotation elements",
            Self::UnsupportedDeclaration => "unsupported declaration",
            Self::MissingReturnType => "method is missing a return type",
            Self::DuplicateModifier => "repeated modifier",

            Self::AmbiguousNestedName => "duplicate nested type name",
            Self::DuplicateTypeDeclaration => "duplicate type declaration",
            Self::CyclicInheritance => "cyclic inheritance",
            Self::InvalidSuperclass => "a class can only extend a class",
            Self::InvalidInterface => "expected an interface",
            Self::MultiplePublicTypes => "more than one public top-level type in this file",
            Self::PublicTypeFileMismatch => "public type name does not match the file name",
            Self::UnresolvedReference => "unresolved type reference",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnsupportedDeclaration => "`{}` declarations are not supported".to_string(),
            Self::DuplicateModifier => "repeated modifier `{}`".to_string(),
            Self::AmbiguousNestedName => "nested type `{}` is already declared here".to_string(),
            Self::DuplicateTypeDeclaration => "type `{}` is already declared".to_string(),
            Self::CyclicInheritance => "cyclic inheritance involving `{}`".to_string(),
            Self::InvalidSuperclass => "`{}` is not a class".to_string(),
            Self::InvalidInterface => "`{}` is not an interface".to_string(),
            Self::PublicTypeFileMismatch => {
                "public type `{}` should be declared in a file of the same name".to_string()
            }
            Self::UnresolvedReference => "`{}` is not declared in this batch".to_string(),
            Self::ParseAborted => "parsing aborted: {}".to_string(),
            Self::UnclosedBody => format!("{}; {{}}", self.fallback_message()),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }

    pub fn span(&self) -> Span {
        span_of(self.range)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A single reported problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub(crate) kind: DiagnosticKind,
    pub(crate) severity: Severity,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl Diagnostic {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        let hints = kind.default_hint().map(str::to_owned).into_iter().collect();
        Self {
            kind,
            severity: kind.default_severity(),
            range,
            message: message.into(),
            related: Vec::new(),
            hints,
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn category(&self) -> DiagnosticCategory {
        self.kind.category()
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn span(&self) -> Span {
        span_of(self.range)
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn related(&self) -> &[RelatedInfo] {
        &self.related
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity,
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}

pub(crate) fn span_of(range: TextRange) -> Span {
    Span::new(range.start().into(), range.end().into())
}

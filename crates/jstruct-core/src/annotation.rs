use serde::{Deserialize, Serialize};

use crate::Span;

/// Value of an annotation argument or an annotation element default.
///
/// Closed set: anything that is not one of the literal forms below is kept
/// verbatim as an [`AnnotationValue::Expression`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnnotationValue {
    /// String literal, escapes decoded.
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Char(char),
    /// Dotted name such as `RetentionPolicy.RUNTIME`.
    EnumConstant(String),
    /// `Type.class`; holds the type name.
    ClassLiteral(String),
    Annotation(Box<AnnotationUsage>),
    Array(Vec<AnnotationValue>),
    /// Constant expression the engine does not evaluate (`1 + 2`, `A.B * 2`).
    Expression(String),
}

impl AnnotationValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl std::fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Char(c) => write!(f, "{c:?}"),
            Self::EnumConstant(name) => f.write_str(name),
            Self::ClassLiteral(name) => write!(f, "{name}.class"),
            Self::Annotation(usage) => write!(f, "{usage}"),
            Self::Array(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
            Self::Expression(text) => f.write_str(text),
        }
    }
}

/// `name = value` pair of an annotation usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationArg {
    /// `value` when the argument was written without a name.
    pub name: String,
    pub value: AnnotationValue,
}

/// An `@Name` or `@Name(args)` occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationUsage {
    /// Name as written, possibly qualified (`java.lang.Deprecated`).
    pub name: String,
    pub args: Vec<AnnotationArg>,
    pub span: Span,
}

impl AnnotationUsage {
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn arg(&self, name: &str) -> Option<&AnnotationValue> {
        self.args.iter().find(|a| a.name == name).map(|a| &a.value)
    }

    pub fn is_marker(&self) -> bool {
        self.args.is_empty()
    }
}

/// Renders in Java source form; a lone `value` argument is written unnamed.
impl std::fmt::Display for AnnotationUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.name)?;
        if self.args.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        if let [single] = self.args.as_slice()
            && single.name == "value"
        {
            write!(f, "{}", single.value)?;
        } else {
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{} = {}", arg.name, arg.value)?;
            }
        }
        f.write_str(")")
    }
}

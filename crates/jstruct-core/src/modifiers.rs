use serde::{Deserialize, Serialize};

/// Declaration modifier keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Native,
    Synchronized,
    Transient,
    Volatile,
    Strictfp,
    Default,
    Sealed,
    NonSealed,
}

impl Modifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Static => "static",
            Self::Final => "final",
            Self::Abstract => "abstract",
            Self::Native => "native",
            Self::Synchronized => "synchronized",
            Self::Transient => "transient",
            Self::Volatile => "volatile",
            Self::Strictfp => "strictfp",
            Self::Default => "default",
            Self::Sealed => "sealed",
            Self::NonSealed => "non-sealed",
        }
    }

    pub fn from_keyword(text: &str) -> Option<Self> {
        Some(match text {
            "public" => Self::Public,
            "protected" => Self::Protected,
            "private" => Self::Private,
            "static" => Self::Static,
            "final" => Self::Final,
            "abstract" => Self::Abstract,
            "native" => Self::Native,
            "synchronized" => Self::Synchronized,
            "transient" => Self::Transient,
            "volatile" => Self::Volatile,
            "strictfp" => Self::Strictfp,
            "default" => Self::Default,
            "sealed" => Self::Sealed,
            "non-sealed" => Self::NonSealed,
            _ => return None,
        })
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Modifier set in source order. Repeated modifiers are kept once.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Modifiers(Vec<Modifier>);

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a modifier; returns `false` if it was already present.
    pub fn insert(&mut self, modifier: Modifier) -> bool {
        if self.contains(modifier) {
            return false;
        }
        self.0.push(modifier);
        true
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    pub fn is_static(&self) -> bool {
        self.contains(Modifier::Static)
    }

    pub fn is_public(&self) -> bool {
        self.contains(Modifier::Public)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<T: IntoIterator<Item = Modifier>>(iter: T) -> Self {
        let mut modifiers = Self::new();
        for modifier in iter {
            modifiers.insert(modifier);
        }
        modifiers
    }
}

impl std::fmt::Display for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, modifier) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{modifier}")?;
        }
        Ok(())
    }
}

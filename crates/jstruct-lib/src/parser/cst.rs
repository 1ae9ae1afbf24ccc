//! Syntax kinds for Java source.
//!
//! `SyntaxKind` serves dual roles: token kinds (from lexer) and node kinds (from parser).
//! Logos derives token recognition; node kinds lack token/regex attributes.
//! `JavaLang` implements Rowan's `Language` trait for tree construction.

use logos::{Lexer, Logos};
use rowan::Language;

/// All token and node kinds. Tokens first, then nodes, then `__LAST` sentinel.
/// `#[repr(u16)]` enables safe transmute in `kind_from_raw`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("...")]
    Ellipsis,

    #[token("@")]
    At,

    #[token("=")]
    Equals,

    /// Single character; `<<`, `<=` lex as two tokens so generics never need splitting.
    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("?")]
    Question,

    #[token("&")]
    Amp,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    /// Any other operator. Never contains `<` or `>` except `->`.
    #[token("+")]
    #[token("/")]
    #[token("%")]
    #[token("!")]
    #[token("~")]
    #[token("|")]
    #[token("^")]
    #[token(":")]
    #[token("==")]
    #[token("!=")]
    #[token("&&")]
    #[token("||")]
    #[token("++")]
    #[token("--")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("->")]
    #[token("::")]
    Operator,

    #[regex(r"0[xX][0-9a-fA-F_]+[lL]?")]
    #[regex(r"0[bB][01_]+[lL]?")]
    #[regex(r"[0-9][0-9_]*[lL]?")]
    IntLiteral,

    #[regex(r"[0-9][0-9_]*\.[0-9_]*(?:[eE][+-]?[0-9_]+)?[fFdD]?")]
    #[regex(r"\.[0-9][0-9_]*(?:[eE][+-]?[0-9_]+)?[fFdD]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9_]+[fFdD]?")]
    #[regex(r"[0-9][0-9_]*[fFdD]")]
    FloatLiteral,

    #[regex(r#""(?:[^"\\\n]|\\.)*""#)]
    StringLiteral,

    #[token("\"\"\"", text_block)]
    TextBlock,

    #[regex(r"'(?:[^'\\\n]|\\.)+'")]
    CharLiteral,

    /// String literal running into end of line.
    #[regex(r#""(?:[^"\\\n]|\\.)*"#)]
    UnterminatedString,

    #[regex(r"'(?:[^'\\\n]|\\.)*")]
    UnterminatedChar,

    #[token("boolean")]
    #[token("byte")]
    #[token("char")]
    #[token("short")]
    #[token("int")]
    #[token("long")]
    #[token("float")]
    #[token("double")]
    PrimitiveType,

    #[token("void")]
    KwVoid,

    #[token("public")]
    KwPublic,

    #[token("protected")]
    KwProtected,

    #[token("private")]
    KwPrivate,

    #[token("static")]
    KwStatic,

    #[token("final")]
    KwFinal,

    #[token("abstract")]
    KwAbstract,

    #[token("native")]
    KwNative,

    #[token("synchronized")]
    KwSynchronized,

    #[token("transient")]
    KwTransient,

    #[token("volatile")]
    KwVolatile,

    #[token("strictfp")]
    KwStrictfp,

    #[token("default")]
    KwDefault,

    #[token("class")]
    KwClass,

    #[token("interface")]
    KwInterface,

    #[token("enum")]
    KwEnum,

    #[token("extends")]
    KwExtends,

    #[token("implements")]
    KwImplements,

    #[token("throws")]
    KwThrows,

    #[token("package")]
    KwPackage,

    #[token("import")]
    KwImport,

    #[token("new")]
    KwNew,

    #[token("this")]
    KwThis,

    #[token("super")]
    KwSuper,

    #[token("true")]
    KwTrue,

    #[token("false")]
    KwFalse,

    #[token("null")]
    KwNull,

    /// Statement keywords; only ever seen inside skipped bodies.
    #[token("assert")]
    #[token("break")]
    #[token("case")]
    #[token("catch")]
    #[token("const")]
    #[token("continue")]
    #[token("do")]
    #[token("else")]
    #[token("finally")]
    #[token("for")]
    #[token("goto")]
    #[token("if")]
    #[token("instanceof")]
    #[token("return")]
    #[token("switch")]
    #[token("throw")]
    #[token("try")]
    #[token("while")]
    KwStatement,

    /// Identifier, including contextual keywords (`record`, `sealed`, `permits`, `var`).
    /// Defined after keywords so they take precedence.
    #[regex(r"[\p{L}_$][\p{L}\p{N}_$]*")]
    Id,

    #[regex(r"[ \t\r\n\x0C]+")]
    Whitespace,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    /// `/** ... */`. The degenerate `/**/` is re-tagged as `BlockComment` by the lexer.
    #[token("/**", block_comment)]
    Javadoc,

    /// Coalesced unrecognized characters
    Garbage,
    /// `/*` with no closing `*/`; runs to end of input
    UnterminatedComment,
    Error,

    // --- Node kinds (non-terminals) ---
    CompilationUnit,
    PackageDecl,
    ImportDecl,
    Name,
    ClassDecl,
    InterfaceDecl,
    AnnotationTypeDecl,
    UnsupportedDecl,
    Modifiers,
    Annotation,
    AnnotationArgs,
    ElementValuePair,
    ElementValue,
    ElementArray,
    TypeParams,
    ExtendsClause,
    ImplementsClause,
    PermitsClause,
    TypeRef,
    TypeArgs,
    ClassBody,
    FieldDecl,
    VarDeclarator,
    VarInit,
    MethodDecl,
    ConstructorDecl,
    ElementDecl,
    DefaultValue,
    ParamList,
    Param,
    ThrowsClause,
    Block,
    InitializerBlock,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

/// Skips to the end of a `/* */` or `/** */` comment.
///
/// Returning `false` turns the rest of the input into a lexer error, which the
/// lexer reports as an unterminated comment.
fn block_comment(lex: &mut Lexer<SyntaxKind>) -> bool {
    let rest = lex.remainder();
    // `/**/` matches the `/**` token with the closing `/` left over.
    if lex.slice() == "/**" && rest.starts_with('/') {
        lex.bump(1);
        return true;
    }
    match rest.find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(rest.len());
            false
        }
    }
}

fn text_block(lex: &mut Lexer<SyntaxKind>) -> bool {
    let rest = lex.remainder();
    match rest.find("\"\"\"") {
        Some(end) => {
            lex.bump(end + 3);
            true
        }
        None => {
            lex.bump(rest.len());
            false
        }
    }
}

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | LineComment | BlockComment | Javadoc) || self.is_lex_error()
    }

    /// Tokens already reported by the lexer; the parser steps over them like trivia.
    #[inline]
    pub fn is_lex_error(self) -> bool {
        matches!(
            self,
            Garbage | UnterminatedComment | UnterminatedString | UnterminatedChar
        )
    }

    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(self, LineComment | BlockComment | Javadoc)
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error) || self.is_lex_error()
    }

    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            IntLiteral
                | FloatLiteral
                | StringLiteral
                | TextBlock
                | CharLiteral
                | KwTrue
                | KwFalse
                | KwNull
        )
    }

    #[inline]
    pub fn is_type_decl(self) -> bool {
        matches!(self, ClassDecl | InterfaceDecl | AnnotationTypeDecl)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language tag for Rowan's tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JavaLang {}

impl Language for JavaLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 < __LAST as u16);
        // SAFETY: We've verified the value is in bounds, and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for Rowan types parameterized by our language.
pub type SyntaxNode = rowan::SyntaxNode<JavaLang>;
pub type SyntaxToken = rowan::SyntaxToken<JavaLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// 128-bit bitset of token `SyntaxKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    /// Creates an empty token set.
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 128.
    #[inline]
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u16;
            assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn single(kind: SyntaxKind) -> Self {
        let kind = kind as u16;
        assert!(kind < 128, "SyntaxKind value exceeds TokenSet capacity");
        TokenSet(1 << kind)
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let kind = kind as u16;
        if kind >= 128 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for i in 0..128u16 {
            if self.0 & (1 << i) != 0 && i < __LAST as u16 {
                // SAFETY: bounds checked against `__LAST` above
                let kind: SyntaxKind = unsafe { std::mem::transmute(i) };
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    pub const MODIFIER_KEYWORDS: TokenSet = TokenSet::new(&[
        KwPublic,
        KwProtected,
        KwPrivate,
        KwStatic,
        KwFinal,
        KwAbstract,
        KwNative,
        KwSynchronized,
        KwTransient,
        KwVolatile,
        KwStrictfp,
        KwDefault,
    ]);

    /// Tokens that can open a declaration: recovery stops here.
    pub const DECL_START: TokenSet = MODIFIER_KEYWORDS.union(TokenSet::new(&[
        KwClass,
        KwInterface,
        KwEnum,
        At,
    ]));

    pub const ROOT_RECOVERY: TokenSet =
        DECL_START.union(TokenSet::new(&[KwImport, KwPackage, Semicolon]));

    /// Type name start; primitives included for member types.
    pub const TYPE_FIRST: TokenSet = TokenSet::new(&[Id, PrimitiveType, KwVoid]);

    pub const HEADER_RECOVERY: TokenSet = TokenSet::new(&[
        BraceOpen,
        KwExtends,
        KwImplements,
        Semicolon,
    ]);
}

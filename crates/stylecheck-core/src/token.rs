//! Token types used as dispatch keys between the walker and checks.

use std::fmt;
use std::str::FromStr;

/// Fieldless tag of a syntax node, used to key the walker's dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenType {
    /// Root of a source unit.
    CompilationUnit,
    /// `class Foo { … }`
    ClassDef,
    /// `interface Foo { … }`
    InterfaceDef,
    /// `enum Foo { … }`
    EnumDef,
    /// `@interface Foo { … }`
    AnnotationDef,
    /// `record Foo(…) { … }`
    RecordDef,
    /// Body of `new Foo() { … }` or of an enum constant.
    AnonymousClass,
    /// Method declaration.
    MethodDef,
    /// Constructor declaration.
    CtorDef,
    /// Field declaration.
    VariableDef,
    /// Lambda expression.
    Lambda,
    /// Formal, catch, receiver or lambda parameter.
    ParameterDef,
}

impl TokenType {
    /// Every token type, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::CompilationUnit,
        Self::ClassDef,
        Self::InterfaceDef,
        Self::EnumDef,
        Self::AnnotationDef,
        Self::RecordDef,
        Self::AnonymousClass,
        Self::MethodDef,
        Self::CtorDef,
        Self::VariableDef,
        Self::Lambda,
        Self::ParameterDef,
    ];

    /// Returns the configuration name of this token (e.g. `PARAMETER_DEF`).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CompilationUnit => "COMPILATION_UNIT",
            Self::ClassDef => "CLASS_DEF",
            Self::InterfaceDef => "INTERFACE_DEF",
            Self::EnumDef => "ENUM_DEF",
            Self::AnnotationDef => "ANNOTATION_DEF",
            Self::RecordDef => "RECORD_DEF",
            Self::AnonymousClass => "ANONYMOUS_CLASS",
            Self::MethodDef => "METHOD_DEF",
            Self::CtorDef => "CTOR_DEF",
            Self::VariableDef => "VARIABLE_DEF",
            Self::Lambda => "LAMBDA",
            Self::ParameterDef => "PARAMETER_DEF",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a token name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown token type '{0}'")]
pub struct UnknownToken(pub String);

impl FromStr for TokenType {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownToken(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_ignores_case_and_whitespace() {
        assert_eq!(
            " parameter_def ".parse::<TokenType>(),
            Ok(TokenType::ParameterDef)
        );
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "IDENT".parse::<TokenType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown token type 'IDENT'");
    }
}

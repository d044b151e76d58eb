use std::path::Path;

use tracing::debug;

use crate::consumer::{Scanner, ScopeKind};
use crate::context::{Context, SourceDialect};
use crate::defs::{
    AliasKind, ClassKind, ClassLikeDef, ConstantDef, EnumDef, FunctionDef, Scope, TypeAliasDef,
};
use crate::error::{Result, ScanError};
use crate::lexer::Lexer;
use crate::queue::TokenQueue;

/// Scans one source unit and answers definition queries against the result.
#[derive(Debug, Clone, PartialEq)]
pub struct FileParser {
    dialect: SourceDialect,
    scope: Scope,
}

impl FileParser {
    pub fn from_data(source: &str) -> Result<Self> {
        let (dialect, tokens) = Lexer::new(source).tokenize();
        debug!(?dialect, tokens = tokens.len(), "scanning source unit");
        let mut scanner = Scanner::new(TokenQueue::new(source, tokens));
        let scope = scanner.consume_scope(&Context::root(dialect), ScopeKind::File)?;
        Ok(Self { dialect, scope })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ScanError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_data(&source)
    }

    pub fn dialect(&self) -> SourceDialect {
        self.dialect
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn get_class(&self, name: &str) -> Option<&ClassLikeDef> {
        self.scope.find_class_of_kind(name, ClassKind::Class)
    }

    pub fn get_interface(&self, name: &str) -> Option<&ClassLikeDef> {
        self.scope.find_class_of_kind(name, ClassKind::Interface)
    }

    pub fn get_trait(&self, name: &str) -> Option<&ClassLikeDef> {
        self.scope.find_class_of_kind(name, ClassKind::Trait)
    }

    /// Any class-like regardless of kind.
    pub fn get_class_like(&self, name: &str) -> Option<&ClassLikeDef> {
        self.scope.find_class_like(name)
    }

    pub fn get_function(&self, name: &str) -> Option<&FunctionDef> {
        self.scope.find_function(name)
    }

    pub fn get_enum(&self, name: &str) -> Option<&EnumDef> {
        self.scope.find_enum(name)
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeAliasDef> {
        self.scope
            .find_type_alias(name)
            .filter(|t| t.kind == AliasKind::Type)
    }

    pub fn get_newtype(&self, name: &str) -> Option<&TypeAliasDef> {
        self.scope
            .find_type_alias(name)
            .filter(|t| t.kind == AliasKind::Newtype)
    }

    pub fn get_constant(&self, name: &str) -> Option<&ConstantDef> {
        self.scope.find_constant(name)
    }

    pub fn class_names(&self) -> Vec<String> {
        self.scope.class_names_of_kind(ClassKind::Class)
    }

    pub fn interface_names(&self) -> Vec<String> {
        self.scope.class_names_of_kind(ClassKind::Interface)
    }

    pub fn trait_names(&self) -> Vec<String> {
        self.scope.class_names_of_kind(ClassKind::Trait)
    }

    pub fn function_names(&self) -> Vec<String> {
        self.scope.function_names()
    }

    pub fn enum_names(&self) -> Vec<String> {
        self.scope.enum_names()
    }

    pub fn type_names(&self) -> Vec<String> {
        self.scope.type_alias_names(AliasKind::Type)
    }

    pub fn newtype_names(&self) -> Vec<String> {
        self.scope.type_alias_names(AliasKind::Newtype)
    }
}

//! Immutable definition records produced by the consumers, and the `Scope`
//! aggregate that holds them in source order.

use indexmap::IndexMap;
use serde::Serialize;

/// Attribute name -> ordered literal arguments. Bare attributes map to an
/// empty list.
pub type AttributeMap = IndexMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClassKind {
    Class,
    Interface,
    Trait,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Variance {
    Covariant,
    Contravariant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConstraintKind {
    As,
    Super,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AliasKind {
    Type,
    Newtype,
}

/// A parsed type reference: written name (resolved per the context's dialect
/// and alias table), nullability, nested generic arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Typehint {
    pub name: String,
    pub nullable: bool,
    pub generics: Vec<Typehint>,
    /// True for `this` and for bare generic parameters in scope. These names
    /// are recorded verbatim and never namespace-resolved.
    pub is_alias: bool,
}

impl Typehint {
    pub fn type_name(&self) -> &str {
        &self.name
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericConstraint {
    pub relation: ConstraintKind,
    pub typehint: Typehint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericParam {
    pub name: String,
    pub variance: Option<Variance>,
    pub constraints: Vec<GenericConstraint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamDef {
    pub name: String,
    pub typehint: Option<Typehint>,
    pub is_variadic: bool,
    pub is_inout: bool,
    pub by_ref: bool,
    pub has_default: bool,
    /// Raw token span of the default value; never evaluated.
    pub default: Option<String>,
    /// Constructor promotion visibility, if any.
    pub visibility: Option<Visibility>,
    pub attributes: AttributeMap,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDef {
    pub name: String,
    /// The function's own declared generics. Enclosing class generics stay
    /// visible through the context but are not copied here.
    pub generics: Vec<GenericParam>,
    pub params: Vec<ParamDef>,
    pub return_type: Option<Typehint>,
    pub returns_by_ref: bool,
    pub is_async: bool,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    pub visibility: Option<Visibility>,
    pub attributes: AttributeMap,
    pub docblock: Option<String>,
}

impl FunctionDef {
    pub fn return_type(&self) -> Option<&Typehint> {
        self.return_type.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDef {
    pub name: String,
    pub typehint: Option<Typehint>,
    pub is_static: bool,
    pub visibility: Visibility,
    pub default: Option<String>,
    pub attributes: AttributeMap,
    pub docblock: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstantDef {
    pub name: String,
    pub typehint: Option<Typehint>,
    /// Raw initializer token span; `None` only for abstract constants.
    pub value: Option<String>,
    pub is_abstract: bool,
    pub attributes: AttributeMap,
    pub docblock: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeConstantDef {
    pub name: String,
    pub constraint: Option<Typehint>,
    pub value: Option<Typehint>,
    pub is_abstract: bool,
    pub docblock: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValue {
    pub name: String,
    /// Raw initializer token span; never evaluated.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDef {
    pub name: String,
    pub base: Option<Typehint>,
    pub constraint: Option<Typehint>,
    pub values: Vec<EnumValue>,
    pub attributes: AttributeMap,
    pub docblock: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeAliasDef {
    pub name: String,
    pub kind: AliasKind,
    pub generics: Vec<GenericParam>,
    pub constraint: Option<Typehint>,
    pub value: Typehint,
    pub attributes: AttributeMap,
    pub docblock: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassLikeDef {
    pub name: String,
    pub kind: ClassKind,
    pub is_abstract: bool,
    pub is_final: bool,
    pub generics: Vec<GenericParam>,
    /// `extends` typehint for classes; interfaces record theirs in
    /// `interfaces` instead.
    pub parent: Option<Typehint>,
    pub interfaces: Vec<Typehint>,
    pub contents: Scope,
    pub attributes: AttributeMap,
    pub docblock: Option<String>,
}

impl ClassLikeDef {
    pub fn methods(&self) -> &[FunctionDef] {
        &self.contents.functions
    }

    pub fn properties(&self) -> &[PropertyDef] {
        &self.contents.properties
    }

    pub fn constants(&self) -> &[ConstantDef] {
        &self.contents.constants
    }

    pub fn type_constants(&self) -> &[TypeConstantDef] {
        &self.contents.type_constants
    }

    pub fn used_traits(&self) -> &[Typehint] {
        &self.contents.used_traits
    }

    pub fn parent_class_name(&self) -> Option<&str> {
        self.parent.as_ref().map(|t| t.name.as_str())
    }

    pub fn method(&self, name: &str) -> Option<&FunctionDef> {
        self.contents.functions.iter().find(|m| m.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamespaceDef {
    pub name: String,
    pub scope: Scope,
    pub docblock: Option<String>,
}

/// Everything declared directly inside one file top level, namespace body or
/// class-like body. Nested definitions live in the owning record's own scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scope {
    pub namespaces: Vec<NamespaceDef>,
    pub classes: Vec<ClassLikeDef>,
    pub functions: Vec<FunctionDef>,
    pub properties: Vec<PropertyDef>,
    pub constants: Vec<ConstantDef>,
    pub type_constants: Vec<TypeConstantDef>,
    pub enums: Vec<EnumDef>,
    pub type_aliases: Vec<TypeAliasDef>,
    /// Traits pulled in with `use` inside a class-like body.
    pub used_traits: Vec<Typehint>,
}

impl Scope {
    pub fn find_class_like(&self, name: &str) -> Option<&ClassLikeDef> {
        self.classes
            .iter()
            .find(|c| c.name == name)
            .or_else(|| self.namespaces.iter().find_map(|ns| ns.scope.find_class_like(name)))
    }

    pub fn find_class_of_kind(&self, name: &str, kind: ClassKind) -> Option<&ClassLikeDef> {
        self.find_class_like(name).filter(|c| c.kind == kind)
    }

    pub fn find_function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions
            .iter()
            .find(|f| f.name == name)
            .or_else(|| self.namespaces.iter().find_map(|ns| ns.scope.find_function(name)))
    }

    pub fn find_enum(&self, name: &str) -> Option<&EnumDef> {
        self.enums
            .iter()
            .find(|e| e.name == name)
            .or_else(|| self.namespaces.iter().find_map(|ns| ns.scope.find_enum(name)))
    }

    pub fn find_type_alias(&self, name: &str) -> Option<&TypeAliasDef> {
        self.type_aliases
            .iter()
            .find(|t| t.name == name)
            .or_else(|| self.namespaces.iter().find_map(|ns| ns.scope.find_type_alias(name)))
    }

    pub fn find_constant(&self, name: &str) -> Option<&ConstantDef> {
        self.constants
            .iter()
            .find(|c| c.name == name)
            .or_else(|| self.namespaces.iter().find_map(|ns| ns.scope.find_constant(name)))
    }

    /// Names of all class-likes of `kind`, in source order, nested namespaces
    /// included.
    pub fn class_names_of_kind(&self, kind: ClassKind) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_class_names(kind, &mut names);
        names
    }

    fn collect_class_names(&self, kind: ClassKind, out: &mut Vec<String>) {
        for class in &self.classes {
            if class.kind == kind {
                out.push(class.name.clone());
            }
        }
        for ns in &self.namespaces {
            ns.scope.collect_class_names(kind, out);
        }
    }

    pub fn function_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_function_names(&mut names);
        names
    }

    fn collect_function_names(&self, out: &mut Vec<String>) {
        for f in &self.functions {
            out.push(f.name.clone());
        }
        for ns in &self.namespaces {
            ns.scope.collect_function_names(out);
        }
    }

    pub fn enum_names(&self) -> Vec<String> {
        let mut names: Vec<String> =
            self.enums.iter().map(|e| e.name.clone()).collect();
        for ns in &self.namespaces {
            names.extend(ns.scope.enum_names());
        }
        names
    }

    pub fn type_alias_names(&self, kind: AliasKind) -> Vec<String> {
        let mut names: Vec<String> = self
            .type_aliases
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.name.clone())
            .collect();
        for ns in &self.namespaces {
            names.extend(ns.scope.type_alias_names(kind));
        }
        names
    }
}

use std::collections::{HashMap, HashSet};

use serde::Serialize;

/// The two source variants. They differ in how unqualified type names are
/// resolved: the legacy dialect prefixes the active namespace, the strict
/// dialect leaves them as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceDialect {
    /// `<?php`
    Php,
    /// `<?hh`
    Hack,
}

/// Scanner context, propagated top-down. A nested consumer always receives a
/// derived copy; siblings never observe each other's changes.
#[derive(Debug, Clone)]
pub struct Context {
    pub dialect: SourceDialect,
    pub namespace: String,
    pub aliases: HashMap<String, String>,
    pub generics: HashSet<String>,
    pub enclosing_class: Option<String>,
}

/// Type names that are never namespace-resolved, in either dialect.
const BUILTIN_TYPES: &[&str] = &[
    "string", "int", "bool", "boolean", "float", "double", "num", "arraykey",
    "void", "noreturn", "mixed", "dynamic", "nonnull", "null", "resource",
    "callable", "array", "object", "self", "parent", "static", "classname",
    "typename", "dict", "vec", "keyset", "varray", "darray", "tuple", "shape",
];

impl Context {
    pub fn root(dialect: SourceDialect) -> Self {
        Self {
            dialect,
            namespace: String::new(),
            aliases: HashMap::new(),
            generics: HashSet::new(),
            enclosing_class: None,
        }
    }

    pub fn with_namespace(&self, namespace: &str) -> Self {
        let mut child = self.clone();
        child.namespace = namespace.to_owned();
        child
    }

    /// Derived context with additional generic parameters in scope. The new
    /// names are unioned with the enclosing set, so methods see their class's
    /// generics and nested class-likes see outer ones.
    pub fn with_generics<I>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut child = self.clone();
        child.generics.extend(names);
        child
    }

    pub fn with_enclosing_class(&self, name: &str) -> Self {
        let mut child = self.clone();
        child.enclosing_class = Some(name.to_owned());
        child
    }

    /// Register a `use` import. Only the scope consumer's own local copy is
    /// ever extended this way.
    pub fn add_alias(&mut self, alias: String, qualified: String) {
        self.aliases.insert(alias, qualified);
    }

    pub fn is_generic(&self, name: &str) -> bool {
        self.generics.contains(name)
    }

    /// Qualified name for a definition declared in this context.
    pub fn qualify(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            name.to_owned()
        } else {
            format!("{}\\{}", self.namespace, name)
        }
    }

    /// Resolve a written type name. `absolute` means the source spelled a
    /// leading `\`. Aliases apply uniformly wherever a typehint is parsed,
    /// including nested generic argument positions.
    pub fn resolve_type_name(&self, name: &str, absolute: bool) -> String {
        if absolute {
            return name.to_owned();
        }
        let (head, rest) = match name.split_once('\\') {
            Some((head, rest)) => (head, Some(rest)),
            None => (name, None),
        };
        if let Some(target) = self.aliases.get(head) {
            return match rest {
                Some(rest) => format!("{}\\{}", target, rest),
                None => target.clone(),
            };
        }
        if rest.is_none() && BUILTIN_TYPES.contains(&name) {
            return name.to_owned();
        }
        match self.dialect {
            SourceDialect::Php => self.qualify(name),
            SourceDialect::Hack => name.to_owned(),
        }
    }
}

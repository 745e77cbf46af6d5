// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type references.
//!
//! A [`TypeRef`] is a qualified name with optional type arguments and an
//! array flag. The textual form is `name<arg, ...>[]`.

use std::fmt;

use crate::naming;

/// Reference to a (possibly generic) type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeRef {
    /// Qualified (or bare) type name, without arguments.
    pub name:  String,
    /// Type arguments in declaration order.
    pub args:  Vec<TypeRef>,
    /// Whether this is an array of `name<args>`.
    pub array: bool
}

impl TypeRef {
    /// Non-generic type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:  name.into(),
            args:  Vec::new(),
            array: false
        }
    }

    /// Generic type with the given arguments.
    pub fn generic(name: impl Into<String>, args: impl IntoIterator<Item = TypeRef>) -> Self {
        Self {
            name:  name.into(),
            args:  args.into_iter().collect(),
            array: false
        }
    }

    /// Parse the textual form.
    ///
    /// Returns `None` for empty or malformed input.
    ///
    /// ```rust
    /// use entity_synth_engine::meta::TypeRef;
    ///
    /// let ty = TypeRef::parse("java.util.Map<java.lang.String, a.B[]>").unwrap();
    /// assert_eq!(ty.args.len(), 2);
    /// assert!(ty.args[1].array);
    /// assert_eq!(ty.to_string(), "java.util.Map<java.lang.String, a.B[]>");
    /// ```
    pub fn parse(input: &str) -> Option<Self> {
        let mut cursor = Cursor {
            rest: input
        };
        let ty = cursor.ty()?;
        cursor.skip_ws();
        cursor.rest.is_empty().then_some(ty)
    }

    /// Same type marked as an array.
    #[must_use]
    pub fn into_array(mut self) -> Self {
        self.array = true;
        self
    }

    /// Same type with `args` appended.
    #[must_use]
    pub fn narrow(mut self, args: impl IntoIterator<Item = TypeRef>) -> Self {
        self.args.extend(args);
        self
    }

    /// Raw type without arguments (array flag kept).
    #[must_use]
    pub fn erasure(&self) -> Self {
        Self {
            name:  self.name.clone(),
            args:  Vec::new(),
            array: self.array
        }
    }

    /// Last segment of the name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        naming::simple_name(&self.name)
    }

    /// Whether this is the `void` pseudo-type.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.name == "void" && !self.array
    }

    /// Qualify the name (and all argument names) with `package` when bare.
    #[must_use]
    pub fn qualified_in(&self, package: &str) -> Self {
        Self {
            name:  naming::qualify(&self.name, package),
            args:  self.args.iter().map(|arg| arg.qualified_in(package)).collect(),
            array: self.array
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (index, arg) in self.args.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        if self.array {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

struct Cursor<'a> {
    rest: &'a str
}

impl<'a> Cursor<'a> {
    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, token: char) -> bool {
        self.skip_ws();
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let end = self
            .rest
            .find(|c: char| !(c.is_alphanumeric() || matches!(c, '_' | '.' | '$' | '?')))
            .unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }
        let (ident, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(ident)
    }

    fn ty(&mut self) -> Option<TypeRef> {
        let mut ty = TypeRef::new(self.ident()?);
        if self.eat('<') {
            loop {
                ty.args.push(self.ty()?);
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return None;
            }
        }
        while self.eat('[') {
            if !self.eat(']') {
                return None;
            }
            ty.array = true;
        }
        Some(ty)
    }
}

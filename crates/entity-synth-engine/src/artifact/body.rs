// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Method body model.
//!
//! Only what generated accessors and converters need: declarations,
//! assignments, setter calls, null guards, loops and returns over a small
//! expression language. `Display` renders both in a C-family syntax for
//! logs and emitters that do not need anything richer.

use std::fmt;

use crate::meta::TypeRef;

/// Body of a generated method.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MethodBody {
    /// No body (abstract or interface method).
    #[default]
    None,
    /// Structured statements.
    Statements(Vec<Statement>),
    /// Source text copied from the entity.
    Source(String)
}

impl MethodBody {
    /// Structured statements, if any.
    pub fn statements(&self) -> &[Statement] {
        match self {
            Self::Statements(statements) => statements,
            _ => &[]
        }
    }
}

/// Expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// `null`.
    Null,
    /// Local variable or parameter.
    Var(String),
    /// Field of `this`.
    Field(String),
    /// Literal as source text (`"text"`, `0`).
    Literal(String),
    /// `target.getter()`.
    Getter {
        /// Receiver.
        target: Box<Expr>,
        /// Getter name.
        getter: String
    },
    /// `target.getter() != null ? target.getter().keyGetter() : null`.
    ForeignKey {
        /// Receiver.
        target:     Box<Expr>,
        /// Getter of the related entity.
        getter:     String,
        /// Getter of the related entity's key.
        key_getter: String
    },
    /// Conversion through the generic entrypoint, typed as `ty`.
    Dispatch {
        /// Value to convert.
        value: Box<Expr>,
        /// Expected result type.
        ty:    TypeRef
    },
    /// Invoke the overload registered for the runtime type of `value`;
    /// fails when there is none.
    Lookup {
        /// Value to convert.
        value: Box<Expr>
    },
    /// `new ty()`.
    New(TypeRef),
    /// `new ty<>(value)`: copy of a collection.
    CopyOf {
        /// Concrete collection type.
        ty:    TypeRef,
        /// Source collection.
        value: Box<Expr>
    },
    /// `target.method(args)`, or an unqualified call without target.
    Invoke {
        /// Receiver.
        target: Option<Box<Expr>>,
        /// Method name.
        method: String,
        /// Arguments.
        args:   Vec<Expr>
    },
    /// `(ty) value`.
    Cast {
        /// Target type.
        ty:    TypeRef,
        /// Value.
        value: Box<Expr>
    },
    /// `value instanceof ty`.
    InstanceOf {
        /// Value.
        value: Box<Expr>,
        /// Tested type.
        ty:    TypeRef
    },
    /// `value == null`.
    IsNull(Box<Expr>)
}

impl Expr {
    /// Variable reference.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    /// `self.getter()`.
    #[must_use]
    pub fn get(self, getter: impl Into<String>) -> Self {
        Self::Getter {
            target: Box::new(self),
            getter: getter.into()
        }
    }

    /// `self == null`.
    #[must_use]
    pub fn is_null(self) -> Self {
        Self::IsNull(Box::new(self))
    }

    /// `(ty) self`.
    #[must_use]
    pub fn cast(self, ty: TypeRef) -> Self {
        Self::Cast {
            ty,
            value: Box::new(self)
        }
    }
}

/// Statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `ty name = value;`
    Declare {
        /// Variable name.
        name:  String,
        /// Declared type.
        ty:    TypeRef,
        /// Initial value.
        value: Expr
    },
    /// `this.field = value;`
    Assign {
        /// Field of `this`.
        field: String,
        /// Value.
        value: Expr
    },
    /// `target.setter(value);`
    Set {
        /// Receiver variable.
        target: String,
        /// Setter name.
        setter: String,
        /// Value.
        value:  Expr
    },
    /// `if (var != null) target.setter(value);`
    SetIfPresent {
        /// Receiver variable.
        target: String,
        /// Setter name.
        setter: String,
        /// Variable tested for null.
        var:    String,
        /// Value passed to the setter, usually `var` itself.
        value:  Expr
    },
    /// `if (condition) { then }`
    If {
        /// Condition.
        condition: Expr,
        /// Statements run when it holds.
        then:      Vec<Statement>
    },
    /// `for (ty var : iterable) { body }`
    ForEach {
        /// Loop variable.
        var:      String,
        /// Element type.
        ty:       TypeRef,
        /// Iterated value.
        iterable: Expr,
        /// Loop body.
        body:     Vec<Statement>
    },
    /// `continue;`
    Continue,
    /// Expression statement.
    Expr(Expr),
    /// `return value;`
    Return(Expr),
    /// `throw new ty(message);`
    Throw {
        /// Exception type.
        ty:      TypeRef,
        /// Message.
        message: String
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Var(name) => f.write_str(name),
            Self::Field(name) => write!(f, "this.{name}"),
            Self::Literal(text) => f.write_str(text),
            Self::Getter {
                target,
                getter
            } => write!(f, "{target}.{getter}()"),
            Self::ForeignKey {
                target,
                getter,
                key_getter
            } => write!(
                f,
                "{target}.{getter}() != null ? {target}.{getter}().{key_getter}() : null"
            ),
            Self::Dispatch {
                value,
                ty
            } => write!(f, "({ty}) this.convertToDto({value})"),
            Self::Lookup {
                value
            } => write!(f, "lookup({value})"),
            Self::New(ty) => write!(f, "new {ty}()"),
            Self::CopyOf {
                ty,
                value
            } => write!(f, "new {ty}<>({value})"),
            Self::Invoke {
                target,
                method,
                args
            } => {
                if let Some(target) = target {
                    write!(f, "{target}.")?;
                }
                write!(f, "{method}(")?;
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Self::Cast {
                ty,
                value
            } => write!(f, "({ty}) {value}"),
            Self::InstanceOf {
                value,
                ty
            } => write!(f, "{value} instanceof {ty}"),
            Self::IsNull(value) => write!(f, "{value} == null")
        }
    }
}

impl Statement {
    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "    ".repeat(depth);
        match self {
            Self::Declare {
                name,
                ty,
                value
            } => writeln!(f, "{indent}{ty} {name} = {value};"),
            Self::Assign {
                field,
                value
            } => writeln!(f, "{indent}this.{field} = {value};"),
            Self::Set {
                target,
                setter,
                value
            } => writeln!(f, "{indent}{target}.{setter}({value});"),
            Self::SetIfPresent {
                target,
                setter,
                var,
                value
            } => writeln!(f, "{indent}if ({var} != null) {target}.{setter}({value});"),
            Self::If {
                condition,
                then
            } => {
                writeln!(f, "{indent}if ({condition}) {{")?;
                for statement in then {
                    statement.render(f, depth + 1)?;
                }
                writeln!(f, "{indent}}}")
            }
            Self::ForEach {
                var,
                ty,
                iterable,
                body
            } => {
                writeln!(f, "{indent}for ({ty} {var} : {iterable}) {{")?;
                for statement in body {
                    statement.render(f, depth + 1)?;
                }
                writeln!(f, "{indent}}}")
            }
            Self::Continue => writeln!(f, "{indent}continue;"),
            Self::Expr(expr) => writeln!(f, "{indent}{expr};"),
            Self::Return(expr) => writeln!(f, "{indent}return {expr};"),
            Self::Throw {
                ty,
                message
            } => writeln!(f, "{indent}throw new {ty}({message:?});")
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

impl fmt::Display for MethodBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Statements(statements) => {
                for statement in statements {
                    statement.render(f, 0)?;
                }
                Ok(())
            }
            Self::Source(source) => f.write_str(source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_key_is_null_guarded() {
        let expr = Expr::ForeignKey {
            target:     Box::new(Expr::var("value")),
            getter:     "getOwner".into(),
            key_getter: "getId".into()
        };
        assert_eq!(
            expr.to_string(),
            "value.getOwner() != null ? value.getOwner().getId() : null"
        );
    }

    #[test]
    fn nested_statements_indent() {
        let body = MethodBody::Statements(vec![
            Statement::ForEach {
                var:      "record".into(),
                ty:       TypeRef::new("java.lang.Object"),
                iterable: Expr::var("records"),
                body:     vec![Statement::If {
                    condition: Expr::var("record").is_null(),
                    then:      vec![Statement::Continue]
                }]
            },
            Statement::Return(Expr::var("result"))
        ]);
        assert_eq!(
            body.to_string(),
            "for (java.lang.Object record : records) {\n    if (record == null) {\n        \
             continue;\n    }\n}\nreturn result;\n"
        );
    }

    #[test]
    fn builders_and_calls() {
        let call = Expr::Invoke {
            target: Some(Box::new(Expr::var("result"))),
            method: "add".into(),
            args:   vec![Expr::var("a"), Expr::Null]
        };
        assert_eq!(call.to_string(), "result.add(a, null)");
        assert_eq!(
            Expr::var("value").get("getName").to_string(),
            "value.getName()"
        );
        assert_eq!(
            Expr::var("v").cast(TypeRef::new("T")).to_string(),
            "(T) v"
        );
        assert!(MethodBody::None.statements().is_empty());
    }

    #[test]
    fn guarded_setter_may_copy() {
        let copy = Statement::SetIfPresent {
            target: "result".into(),
            setter: "setTags".into(),
            var:    "tagsConverted".into(),
            value:  Expr::CopyOf {
                ty:    TypeRef::new("java.util.TreeSet"),
                value: Box::new(Expr::var("tagsConverted"))
            }
        };
        assert_eq!(
            copy.to_string(),
            "if (tagsConverted != null) result.setTags(new java.util.TreeSet<>(tagsConverted));\n"
        );
    }
}

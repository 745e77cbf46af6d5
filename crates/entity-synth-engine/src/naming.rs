// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Artifact name derivation.
//!
//! Every artifact name is derived from the entity's qualified name by a pure
//! function, so two requests for the same entity within one run always land
//! on the same registry key.
//!
//! # Algorithm
//!
//! ```text
//! app.model.shop.Order
//!   (a) base package -> target   app.api.shop.Order
//!   (b) suffix segment           app.api.dto.shop.Order
//!   (c) prefix on simple name    app.api.dto.shop.IOrder      (DAO only)
//!   (d) postfix                  app.api.dto.shop.OrderDTO
//! ```
//!
//! Steps run in that order, each on the output of the previous one, and each
//! can be switched off through [`AffixToggles`].

/// Prefix, suffix and postfix of one artifact family.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Affixes {
    /// Prepended to the simple name.
    pub prefix:  String,
    /// Package segment inserted after the target package.
    pub suffix:  String,
    /// Appended to the qualified name.
    pub postfix: String
}

impl Affixes {
    /// Create a family from its three affixes.
    pub fn new(
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        postfix: impl Into<String>
    ) -> Self {
        Self {
            prefix:  prefix.into(),
            suffix:  suffix.into(),
            postfix: postfix.into()
        }
    }

    /// DTO family: no prefix, `dto` segment, `DTO` postfix.
    pub fn dto() -> Self {
        Self::new("", "dto", "DTO")
    }

    /// DAO family: `I` prefix, `dao` segment, `DAO` postfix.
    pub fn dao() -> Self {
        Self::new("I", "dao", "DAO")
    }

    /// Replace the suffix segment.
    #[must_use]
    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }
}

/// Switches for the individual affix steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffixToggles {
    /// Apply step (c).
    pub prefixes:  bool,
    /// Apply step (b).
    pub suffixes:  bool,
    /// Apply step (d).
    pub postfixes: bool,
    /// Master switch; `true` disables (b), (c) and (d).
    pub disabled:  bool
}

impl Default for AffixToggles {
    fn default() -> Self {
        Self {
            prefixes:  true,
            suffixes:  true,
            postfixes: true,
            disabled:  false
        }
    }
}

impl AffixToggles {
    /// All affixes off.
    pub const fn none() -> Self {
        Self {
            prefixes:  false,
            suffixes:  false,
            postfixes: false,
            disabled:  true
        }
    }

    /// Whether step (b) runs.
    pub const fn suffixes_enabled(&self) -> bool {
        self.suffixes && !self.disabled
    }

    /// Whether step (c) runs.
    pub const fn prefixes_enabled(&self) -> bool {
        self.prefixes && !self.disabled
    }

    /// Whether step (d) runs.
    pub const fn postfixes_enabled(&self) -> bool {
        self.postfixes && !self.disabled
    }
}

/// Derive an artifact name.
///
/// # Example
///
/// ```rust
/// use entity_synth_engine::naming::{AffixToggles, Affixes, resolve};
///
/// let name = resolve(
///     "app.model.Order",
///     "app.model",
///     "app.data",
///     &Affixes::dao(),
///     AffixToggles::default()
/// );
/// assert_eq!(name, "app.data.dao.IOrderDAO");
/// ```
pub fn resolve(
    name: &str,
    base_package: &str,
    target_package: &str,
    affixes: &Affixes,
    toggles: AffixToggles
) -> String {
    let mut resolved = match strip_package(name, base_package) {
        Some(rest) => format!("{target_package}{rest}"),
        None => name.to_string()
    };

    if toggles.suffixes_enabled()
        && !affixes.suffix.is_empty()
        && let Some(rest) = strip_package(&resolved, target_package)
    {
        resolved = format!("{target_package}.{}{rest}", affixes.suffix);
    }

    if toggles.prefixes_enabled() && !affixes.prefix.is_empty() {
        resolved = match resolved.rsplit_once('.') {
            Some((package, simple)) => format!("{package}.{}{simple}", affixes.prefix),
            None => format!("{}{resolved}", affixes.prefix)
        };
    }

    if toggles.postfixes_enabled() {
        resolved.push_str(&affixes.postfix);
    }

    resolved
}

/// Remainder of `name` after `package`, if `name` lies inside it.
///
/// The remainder keeps its leading dot; a name equal to the package yields
/// an empty remainder.
fn strip_package<'a>(name: &'a str, package: &str) -> Option<&'a str> {
    if package.is_empty() {
        return None;
    }
    let rest = name.strip_prefix(package)?;
    (rest.is_empty() || rest.starts_with('.')).then_some(rest)
}

/// Upper-case the first character.
pub fn ucfirst(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new()
    }
}

/// Getter name of a field (`name` -> `getName`).
pub fn getter_name(field: &str) -> String {
    format!("get{}", ucfirst(field))
}

/// Setter name of a field (`name` -> `setName`).
pub fn setter_name(field: &str) -> String {
    format!("set{}", ucfirst(field))
}

/// Last segment of a qualified name.
pub fn simple_name(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(_, simple)| simple)
}

/// Package part of a qualified name; empty for unqualified names.
pub fn package_of(name: &str) -> &str {
    name.rsplit_once('.').map_or("", |(package, _)| package)
}

/// Qualify an unqualified name with `package`.
///
/// Names that already contain a dot, and empty packages, pass through.
pub fn qualify(name: &str, package: &str) -> String {
    if name.contains('.') || package.is_empty() {
        name.to_string()
    } else {
        format!("{package}.{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTITY: &str = "com.shop.model.billing.Invoice";

    fn dto(toggles: AffixToggles) -> String {
        resolve(ENTITY, "com.shop.model", "com.shop.api", &Affixes::dto(), toggles)
    }

    #[test]
    fn dto_family_full_affixes() {
        assert_eq!(
            dto(AffixToggles::default()),
            "com.shop.api.dto.billing.InvoiceDTO"
        );
    }

    #[test]
    fn dao_family_full_affixes() {
        let name = resolve(
            ENTITY,
            "com.shop.model",
            "com.shop.data",
            &Affixes::dao(),
            AffixToggles::default()
        );
        assert_eq!(name, "com.shop.data.dao.billing.IInvoiceDAO");
    }

    #[test]
    fn individual_toggles() {
        let no_suffix = AffixToggles {
            suffixes: false,
            ..AffixToggles::default()
        };
        assert_eq!(dto(no_suffix), "com.shop.api.billing.InvoiceDTO");

        let no_postfix = AffixToggles {
            postfixes: false,
            ..AffixToggles::default()
        };
        assert_eq!(dto(no_postfix), "com.shop.api.dto.billing.Invoice");
    }

    #[test]
    fn master_switch_wins() {
        let toggles = AffixToggles {
            disabled: true,
            ..AffixToggles::default()
        };
        assert_eq!(dto(toggles), "com.shop.api.billing.Invoice");
        assert_eq!(dto(AffixToggles::none()), "com.shop.api.billing.Invoice");
    }

    #[test]
    fn base_package_respects_segment_boundary() {
        let name = resolve(
            "com.shopping.Cart",
            "com.shop",
            "com.api",
            &Affixes::dto(),
            AffixToggles::default()
        );
        assert_eq!(name, "com.shopping.CartDTO");
    }

    #[test]
    fn resolve_is_idempotent() {
        let toggles = AffixToggles::default();
        let first = resolve(ENTITY, "com.shop.model", "com.shop.data", &Affixes::dao(), toggles);
        let second = resolve(ENTITY, "com.shop.model", "com.shop.data", &Affixes::dao(), toggles);
        assert_eq!(first, second);
    }

    #[test]
    fn accessor_names() {
        assert_eq!(getter_name("relatedTest"), "getRelatedTest");
        assert_eq!(setter_name("relatedTestAId"), "setRelatedTestAId");
        assert_eq!(getter_name(""), "get");
    }

    #[test]
    fn name_parts() {
        assert_eq!(simple_name(ENTITY), "Invoice");
        assert_eq!(package_of(ENTITY), "com.shop.model.billing");
        assert_eq!(simple_name("Invoice"), "Invoice");
        assert_eq!(package_of("Invoice"), "");
        assert_eq!(qualify("Invoice", "a.b"), "a.b.Invoice");
        assert_eq!(qualify("x.Invoice", "a.b"), "x.Invoice");
        assert_eq!(qualify("Invoice", ""), "Invoice");
    }
}

// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Doc comment extraction.
//!
//! `///` and `/** */` comments reach the parser as `#[doc = "..."]`
//! attributes. The reflected model keeps them as one string per item so
//! they can be carried over to generated DTOs and DAOs.
//!
//! ```rust,ignore
//! /// Customer order.
//! ///
//! /// One per checkout.
//! #[entity]
//! pub struct Order { ... }
//!
//! // Extracts to: "Customer order.\n\nOne per checkout."
//! ```

use syn::{Attribute, Expr, ExprLit, Lit, Meta};

/// Combined doc comment of `attrs`, each line trimmed.
///
/// Returns `None` when there is no doc attribute or only blank ones.
pub fn extract_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| {
            if let Meta::NameValue(meta) = &attr.meta
                && let Expr::Lit(ExprLit {
                    lit: Lit::Str(text),
                    ..
                }) = &meta.value
            {
                return Some(text.value());
            }
            None
        })
        .collect();

    let combined = lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n");
    let trimmed = combined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use syn::{ItemStruct, parse_quote};

    use super::*;

    #[test]
    fn multi_line_with_blank() {
        let item: ItemStruct = parse_quote! {
            /// Summary.
            ///
            /// Details here.
            struct Order;
        };
        assert_eq!(
            extract_doc_comments(&item.attrs),
            Some("Summary.\n\nDetails here.".to_string())
        );
    }

    #[test]
    fn no_docs() {
        let item: ItemStruct = parse_quote! {
            #[derive(Debug)]
            struct Order;
        };
        assert_eq!(extract_doc_comments(&item.attrs), None);
    }

    #[test]
    fn blank_docs_are_none() {
        let item: ItemStruct = parse_quote! {
            ///
            struct Order;
        };
        assert_eq!(extract_doc_comments(&item.attrs), None);
    }
}

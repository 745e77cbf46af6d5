// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generator configuration surface.
//!
//! Options use camelCase keys so an existing plugin configuration block can
//! be carried over unchanged. Everything except the three package options
//! has a default.
//!
//! # Options
//!
//! | Key | Default | Effect |
//! |-----|---------|--------|
//! | `basePackage` | required | Package prefix replaced in artifact names |
//! | `dtoPackage` | required | Target package of DTO classes |
//! | `daoPackage` | required | Target package of DAO interfaces |
//! | `daoSuffix` | `"dao"` | Package segment inserted after `daoPackage` |
//! | `convertersPackage` | `dtoPackage` | Package of the shared converter |
//! | `attachPrefixes` | `true` | Prefix the simple name |
//! | `attachSuffixes` | `true` | Insert the suffix segment |
//! | `attachPostfixes` | `true` | Append the postfix |
//! | `disableAffixesAttach` | `false` | Master switch for all affixes |
//! | `skipStaticFields` | `false` | Drop static fields before projection |
//! | `generateMethods` | `true` | Mirror `DtoMethod` methods |
//! | `dtoInterfaceClass` | `java.io.Serializable` | Marker interface of root DTOs |
//! | `objectType` | `java.lang.Object` | Universal object type |
//! | `defaultKeyType` | `java.lang.Long` | Key type when a related entity has none |
//!
//! The `[repository]` table names the framework types used by DAOs.
//!
//! # Example
//!
//! ```rust
//! use entity_synth_engine::config::GeneratorConfig;
//!
//! let config = GeneratorConfig::from_toml_str(
//!     r#"
//!     basePackage = "app.model"
//!     dtoPackage = "app.api"
//!     daoPackage = "app.data"
//!     attachPrefixes = false
//!     "#
//! )
//! .unwrap();
//!
//! assert_eq!(config.dto_name("app.model.User"), "app.api.dto.UserDTO");
//! assert_eq!(config.dao_name("app.model.User"), "app.data.dao.UserDAO");
//! ```

use serde::Deserialize;
use thiserror::Error as ThisError;

use crate::naming::{self, AffixToggles, Affixes};

/// Simple name of the shared converter class.
pub const CONVERTER_CLASS_NAME: &str = "DtoConversionService";

/// Errors related to configuration parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ConfigError {
    /// TOML could not be parsed into the expected structure.
    #[error("toml error: {0}")]
    CannotParseToml(String),

    /// A required option is empty.
    #[error("required option `{0}` is not set")]
    MissingOption(&'static str)
}

/// Framework type names used when building DAO interfaces.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepositoryConfig {
    /// Base repository every root DAO extends.
    pub base_repository: String,

    /// Annotation placed on every DAO.
    pub repository_annotation: String,

    /// Annotation carrying native query text.
    pub query_annotation: String,

    /// Annotation naming a query parameter.
    pub param_annotation: String,

    /// Annotation on modifying queries.
    pub modifying_annotation: String,

    /// Annotation on transactional queries.
    pub transactional_annotation: String,

    /// Page wrapper returned by pageable variants.
    pub page_type: String,

    /// Pager parameter type of pageable variants.
    pub pageable_type: String,

    /// Sort parameter type of sortable variants.
    pub sort_type: String,

    /// List wrapper of collection results.
    pub list_type: String
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            base_repository:          "org.springframework.data.jpa.repository.JpaRepository".into(),
            repository_annotation:    "org.springframework.stereotype.Repository".into(),
            query_annotation:         "org.springframework.data.jpa.repository.Query".into(),
            param_annotation:         "org.springframework.data.repository.query.Param".into(),
            modifying_annotation:     "org.springframework.data.jpa.repository.Modifying".into(),
            transactional_annotation: "org.springframework.transaction.annotation.Transactional"
                .into(),
            page_type:                "org.springframework.data.domain.Page".into(),
            pageable_type:            "org.springframework.data.domain.Pageable".into(),
            sort_type:                "org.springframework.data.domain.Sort".into(),
            list_type:                "java.util.List".into()
        }
    }
}

/// Generator options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Package prefix of the entity model.
    pub base_package: String,

    /// Target package of DTO classes.
    pub dto_package: String,

    /// Target package of DAO interfaces.
    pub dao_package: String,

    /// Package segment inserted after `dao_package`.
    pub dao_suffix: String,

    /// Package of the shared converter; empty means `dto_package`.
    pub converters_package: String,

    /// Prefix the simple name of artifacts.
    pub attach_prefixes: bool,

    /// Insert the suffix package segment.
    pub attach_suffixes: bool,

    /// Append the postfix to artifact names.
    pub attach_postfixes: bool,

    /// Disable every affix regardless of the individual toggles.
    pub disable_affixes_attach: bool,

    /// Skip static fields before projection.
    pub skip_static_fields: bool,

    /// Mirror `DtoMethod` methods onto DTOs.
    pub generate_methods: bool,

    /// Interface implemented by DTOs without a DTO supertype.
    pub dto_interface_class: String,

    /// Universal object type.
    pub object_type: String,

    /// Key type used when a related entity declares no key.
    pub default_key_type: String,

    /// DAO framework types.
    pub repository: RepositoryConfig
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_package:           String::new(),
            dto_package:            String::new(),
            dao_package:            String::new(),
            dao_suffix:             "dao".into(),
            converters_package:     String::new(),
            attach_prefixes:        true,
            attach_suffixes:        true,
            attach_postfixes:       true,
            disable_affixes_attach: false,
            skip_static_fields:     false,
            generate_methods:       true,
            dto_interface_class:    "java.io.Serializable".into(),
            object_type:            "java.lang.Object".into(),
            default_key_type:       "java.lang.Long".into(),
            repository:             RepositoryConfig::default()
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with the three required packages set.
    pub fn new(
        base_package: impl Into<String>,
        dto_package: impl Into<String>,
        dao_package: impl Into<String>
    ) -> Self {
        Self {
            base_package: base_package.into(),
            dto_package: dto_package.into(),
            dao_package: dao_package.into(),
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::CannotParseToml`] on malformed input
    /// - [`ConfigError::MissingOption`] if a required package is empty
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(input).map_err(|e| ConfigError::CannotParseToml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the required packages are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingOption`] naming the first empty one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("basePackage", &self.base_package),
            ("dtoPackage", &self.dto_package),
            ("daoPackage", &self.dao_package)
        ];
        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((key, _)) => Err(ConfigError::MissingOption(*key)),
            None => Ok(())
        }
    }

    /// Affix toggles derived from the attach options.
    #[must_use]
    pub const fn toggles(&self) -> AffixToggles {
        AffixToggles {
            prefixes:  self.attach_prefixes,
            suffixes:  self.attach_suffixes,
            postfixes: self.attach_postfixes,
            disabled:  self.disable_affixes_attach
        }
    }

    /// Affixes of the DTO family.
    #[must_use]
    pub fn dto_affixes(&self) -> Affixes {
        Affixes::dto()
    }

    /// Affixes of the DAO family, with `dao_suffix` applied.
    #[must_use]
    pub fn dao_affixes(&self) -> Affixes {
        Affixes::dao().with_suffix(&self.dao_suffix)
    }

    /// DTO name of an entity.
    #[must_use]
    pub fn dto_name(&self, entity: &str) -> String {
        naming::resolve(
            entity,
            &self.base_package,
            &self.dto_package,
            &self.dto_affixes(),
            self.toggles()
        )
    }

    /// DAO name of an entity.
    #[must_use]
    pub fn dao_name(&self, entity: &str) -> String {
        naming::resolve(
            entity,
            &self.base_package,
            &self.dao_package,
            &self.dao_affixes(),
            self.toggles()
        )
    }

    /// Qualified name of the shared converter class.
    #[must_use]
    pub fn converter_name(&self) -> String {
        let package = if self.converters_package.trim().is_empty() {
            &self.dto_package
        } else {
            &self.converters_package
        };
        naming::qualify(CONVERTER_CLASS_NAME, package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_plugin_defaults() {
        let config = GeneratorConfig::default();
        assert!(config.attach_prefixes);
        assert!(config.attach_suffixes);
        assert!(config.attach_postfixes);
        assert!(!config.disable_affixes_attach);
        assert!(!config.skip_static_fields);
        assert!(config.generate_methods);
        assert_eq!(config.dao_suffix, "dao");
        assert_eq!(config.dto_interface_class, "java.io.Serializable");
        assert_eq!(config.default_key_type, "java.lang.Long");
    }

    #[test]
    fn parses_camel_case_keys() {
        let config = GeneratorConfig::from_toml_str(
            r#"
            basePackage = "com.shop.model"
            dtoPackage = "com.shop.api"
            daoPackage = "com.shop.data"
            daoSuffix = "repo"
            skipStaticFields = true
            dtoInterfaceClass = "com.shop.api.Transferable"

            [repository]
            pageType = "com.shop.Page"
            "#
        )
        .unwrap();

        assert_eq!(config.dao_suffix, "repo");
        assert!(config.skip_static_fields);
        assert_eq!(config.dto_interface_class, "com.shop.api.Transferable");
        assert_eq!(config.repository.page_type, "com.shop.Page");
        assert_eq!(
            config.repository.sort_type,
            "org.springframework.data.domain.Sort"
        );
        assert_eq!(config.dao_name("com.shop.model.Cart"), "com.shop.data.repo.ICartDAO");
    }

    #[test]
    fn rejects_missing_package() {
        let err = GeneratorConfig::from_toml_str(r#"basePackage = "a""#).unwrap_err();
        assert_eq!(err, ConfigError::MissingOption("dtoPackage"));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = GeneratorConfig::from_toml_str("basePackage = ").unwrap_err();
        assert!(matches!(err, ConfigError::CannotParseToml(_)));
    }

    #[test]
    fn converter_falls_back_to_dto_package() {
        let mut config = GeneratorConfig::new("a.model", "a.api", "a.data");
        assert_eq!(config.converter_name(), "a.api.DtoConversionService");

        config.converters_package = "a.conv".into();
        assert_eq!(config.converter_name(), "a.conv.DtoConversionService");
    }
}

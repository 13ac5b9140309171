//! JSON-loadable converter configuration.

use crate::{
    auth::Policy,
    limits::Limits,
    schema::{FieldDecl, Schema},
};
use model::core::value_type::ValueType;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One filterable field. `column` defaults to `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

/// Converter settings. Limits left at 0 fall back to the secure defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub fields: Vec<FieldConfig>,
    pub max_expression_length: usize,
    pub max_expression_depth: usize,
    pub max_in_clause_size: usize,
    pub public_fields: Vec<String>,
    pub field_acl: BTreeMap<String, Vec<String>>,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn field(mut self, name: impl Into<String>, ty: ValueType) -> Self {
        self.fields.push(FieldConfig {
            name: name.into(),
            ty,
            column: None,
        });
        self
    }

    pub fn mapped_field(
        mut self,
        name: impl Into<String>,
        ty: ValueType,
        column: impl Into<String>,
    ) -> Self {
        self.fields.push(FieldConfig {
            name: name.into(),
            ty,
            column: Some(column.into()),
        });
        self
    }

    pub fn public_field(mut self, name: impl Into<String>) -> Self {
        self.public_fields.push(name.into());
        self
    }

    pub fn acl<I, S>(mut self, field: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_acl
            .entry(field.into())
            .or_default()
            .extend(roles.into_iter().map(Into::into));
        self
    }

    pub fn max_expression_length(mut self, value: usize) -> Self {
        self.max_expression_length = value;
        self
    }

    pub fn max_expression_depth(mut self, value: usize) -> Self {
        self.max_expression_depth = value;
        self
    }

    pub fn max_in_clause_size(mut self, value: usize) -> Self {
        self.max_in_clause_size = value;
        self
    }

    pub fn schema(&self) -> Schema {
        Schema::new(
            self.fields
                .iter()
                .map(|f| FieldDecl::new(f.name.clone(), f.ty.clone(), f.column.clone())),
        )
    }

    pub fn limits(&self) -> Limits {
        Limits::new(
            self.max_expression_length,
            self.max_expression_depth,
            self.max_in_clause_size,
        )
    }

    pub fn policy(&self) -> Policy {
        Policy::new(self.public_fields.iter().cloned(), self.field_acl.clone())
    }
}

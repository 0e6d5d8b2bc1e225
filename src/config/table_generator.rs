//! Table-based ID generator settings

use crate::error::Result;
use serde::{Deserialize, Serialize};

use super::environment::Environment;
use super::properties::property_key;

/// Property group holding the table generator overrides
pub const TABLE_GENERATOR: &str = "table-generator";

/// Parameters of a table-backed ID generator
///
/// Every field is independently optional. A `None` field means "not set here",
/// so merging never clears a value that is already present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TableGeneratorConfig {
    /// How many IDs are reserved per round trip to the generator table
    pub allocation_size: Option<i32>,
    pub table: Option<String>,
    pub schema: Option<String>,
    pub catalog: Option<String>,
    /// Column holding the generator key
    pub pk_column_name: Option<String>,
    /// Column holding the next value
    pub value_column_name: Option<String>,
    /// Generator key for this generator's row
    pub pk_column_value: Option<String>,
    pub initial_value: Option<i32>,
}

impl TableGeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocation_size(mut self, size: i32) -> Self {
        self.allocation_size = Some(size);
        self
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn pk_column_name(mut self, name: impl Into<String>) -> Self {
        self.pk_column_name = Some(name.into());
        self
    }

    pub fn value_column_name(mut self, name: impl Into<String>) -> Self {
        self.value_column_name = Some(name.into());
        self
    }

    pub fn pk_column_value(mut self, value: impl Into<String>) -> Self {
        self.pk_column_value = Some(value.into());
        self
    }

    pub fn initial_value(mut self, value: i32) -> Self {
        self.initial_value = Some(value);
        self
    }

    /// True when no field is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Read the overrides present under `<prefix>.table-generator.*`
    ///
    /// Fields without a property stay `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`](crate::Error::TypeMismatch) if a property
    /// is present but has the wrong type (e.g. a non-numeric allocation size).
    pub fn from_environment(env: &Environment, prefix: &str) -> Result<Self> {
        let key = |field: &str| property_key(prefix, &format!("{TABLE_GENERATOR}.{field}"));

        Ok(Self {
            allocation_size: env.get_property(&key("allocation-size"))?,
            table: env.get_property(&key("table"))?,
            schema: env.get_property(&key("schema"))?,
            catalog: env.get_property(&key("catalog"))?,
            pk_column_name: env.get_property(&key("pk-column-name"))?,
            value_column_name: env.get_property(&key("value-column-name"))?,
            pk_column_value: env.get_property(&key("pk-column-value"))?,
            initial_value: env.get_property(&key("initial-value"))?,
        })
    }

    /// Overlay `overrides` onto `self`, field by field
    ///
    /// Set fields in `overrides` replace the current value; unset fields leave it.
    pub fn merge(&mut self, overrides: TableGeneratorConfig) {
        fn overlay<T>(target: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *target = value;
            }
        }

        overlay(&mut self.allocation_size, overrides.allocation_size);
        overlay(&mut self.table, overrides.table);
        overlay(&mut self.schema, overrides.schema);
        overlay(&mut self.catalog, overrides.catalog);
        overlay(&mut self.pk_column_name, overrides.pk_column_name);
        overlay(&mut self.value_column_name, overrides.value_column_name);
        overlay(&mut self.pk_column_value, overrides.pk_column_value);
        overlay(&mut self.initial_value, overrides.initial_value);
    }
}

//! Column allowlists
//!
//! Filterable columns per table, the subset stored as JSON, and the SQL type
//! of the non-text columns.

/// Storage type of a filterable column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnType {
    #[default]
    Text,
    Integer,
    Date,
    Timestamp,
    Boolean,
    Json,
}

impl ColumnType {
    /// PostgreSQL type a text bind is cast to, `None` when text compares as is
    pub fn postgres_cast(self) -> Option<&'static str> {
        match self {
            Self::Integer => Some("bigint"),
            Self::Date => Some("date"),
            Self::Timestamp => Some("timestamp"),
            Self::Boolean => Some("boolean"),
            Self::Text | Self::Json => None,
        }
    }
}

/// Set of fields a filter may reference at its top level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaAllowlist {
    fields: Vec<String>,
    json_fields: Vec<String>,
    typed_fields: Vec<(String, ColumnType)>,
}

impl SchemaAllowlist {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut allowlist = Self::default();
        for field in fields {
            let field = field.into();
            if !allowlist.fields.contains(&field) {
                allowlist.fields.push(field);
            }
        }
        allowlist
    }

    /// Mark fields as JSON columns (adding them if missing)
    pub fn with_json_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for field in fields {
            let field = field.into();
            if !self.fields.contains(&field) {
                self.fields.push(field.clone());
            }
            if !self.json_fields.contains(&field) {
                self.json_fields.push(field);
            }
        }
        self
    }

    /// Record the storage type of already allowed fields
    pub fn with_column_types(mut self, types: &[(&str, ColumnType)]) -> Self {
        for (field, ty) in types {
            if self.contains(field) && self.column_type(field) == ColumnType::Text {
                self.typed_fields.push((field.to_string(), *ty));
            }
        }
        self
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// Whether nested keys may be traversed below `field`
    pub fn is_json(&self, field: &str) -> bool {
        self.json_fields.iter().any(|f| f == field)
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Storage type of `field`; unknown and untyped fields are text
    pub fn column_type(&self, field: &str) -> ColumnType {
        if self.is_json(field) {
            return ColumnType::Json;
        }
        self.typed_fields
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, ty)| *ty)
            .unwrap_or_default()
    }
}

pub const JOB_FILTERABLE: &[&str] = &[
    "id",
    "name",
    "description",
    "owner_id",
    "due_date",
    "status",
    "created_at",
    "updated_at",
    "metadata",
    "invitation_only",
    "start_date",
    "finish_date",
    "closed_date",
];

pub const OFFER_FILTERABLE: &[&str] = &[
    "id",
    "job_id",
    "description",
    "provider_id",
    "status",
    "created_at",
    "updated_at",
    "metadata",
];

pub const INVITATION_FILTERABLE: &[&str] = &[
    "id",
    "status",
    "created_at",
    "updated_at",
    "provider_id",
    "job_id",
    "description",
];

pub const OFFER_RECORD_FILTERABLE: &[&str] = &[
    "id",
    "offer_id",
    "record_type",
    "reason",
    "created_at",
    "updated_at",
    "metadata",
];

/// JSON columns shared by jobs, offers and offer records
pub const METADATA_COLUMNS: &[&str] = &["metadata"];

/// Non-text columns across all tables; a column missing from a table is skipped
pub const COLUMN_TYPES: &[(&str, ColumnType)] = &[
    ("id", ColumnType::Integer),
    ("job_id", ColumnType::Integer),
    ("offer_id", ColumnType::Integer),
    ("due_date", ColumnType::Date),
    ("start_date", ColumnType::Date),
    ("finish_date", ColumnType::Date),
    ("closed_date", ColumnType::Date),
    ("created_at", ColumnType::Timestamp),
    ("updated_at", ColumnType::Timestamp),
    ("invitation_only", ColumnType::Boolean),
];

//! Searchable entities
//!
//! Each entity maps to one table and the set of columns filters may touch.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::data::filters::{SchemaAllowlist, columns};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Job,
    Offer,
    Invitation,
    OfferRecord,
}

impl Entity {
    pub const ALL: [Entity; 4] = [
        Entity::Job,
        Entity::Offer,
        Entity::Invitation,
        Entity::OfferRecord,
    ];

    /// Backing table name
    pub fn table(&self) -> &'static str {
        match self {
            Entity::Job => "jobs",
            Entity::Offer => "offers",
            Entity::Invitation => "invitations",
            Entity::OfferRecord => "offer_records",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Entity::Job => "job",
            Entity::Offer => "offer",
            Entity::Invitation => "invitation",
            Entity::OfferRecord => "offer_record",
        }
    }

    /// Filterable columns, with JSON and typed columns marked
    pub fn allowlist(&self) -> SchemaAllowlist {
        let fields = match self {
            Entity::Job => columns::JOB_FILTERABLE,
            Entity::Offer => columns::OFFER_FILTERABLE,
            Entity::Invitation => columns::INVITATION_FILTERABLE,
            Entity::OfferRecord => columns::OFFER_RECORD_FILTERABLE,
        };
        let json = columns::METADATA_COLUMNS
            .iter()
            .copied()
            .filter(|c| fields.contains(c));
        SchemaAllowlist::new(fields.iter().copied())
            .with_json_fields(json)
            .with_column_types(columns::COLUMN_TYPES)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Entity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let singular = lower.strip_suffix('s').unwrap_or(&lower);
        Entity::ALL
            .into_iter()
            .find(|e| e.name() == singular)
            .ok_or_else(|| {
                format!(
                    "Unknown entity '{}'. Valid entities: job, offer, invitation, offer_record",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_from_str() {
        assert_eq!("job".parse::<Entity>().unwrap(), Entity::Job);
        assert_eq!("Jobs".parse::<Entity>().unwrap(), Entity::Job);
        assert_eq!("OFFERS".parse::<Entity>().unwrap(), Entity::Offer);
        assert_eq!("invitation".parse::<Entity>().unwrap(), Entity::Invitation);
        assert_eq!(
            "offer_records".parse::<Entity>().unwrap(),
            Entity::OfferRecord
        );
        assert!("users".parse::<Entity>().is_err());
        assert!("".parse::<Entity>().is_err());
    }

    #[test]
    fn test_entity_tables() {
        let tables: Vec<&str> = Entity::ALL.iter().map(|e| e.table()).collect();
        assert_eq!(tables, ["jobs", "offers", "invitations", "offer_records"]);
    }

    #[test]
    fn test_metadata_is_json_where_present() {
        assert!(Entity::Job.allowlist().is_json("metadata"));
        assert!(Entity::Offer.allowlist().is_json("metadata"));
        assert!(Entity::OfferRecord.allowlist().is_json("metadata"));

        let invitations = Entity::Invitation.allowlist();
        assert!(!invitations.contains("metadata"));
        assert!(!invitations.is_json("metadata"));
    }

    #[test]
    fn test_typed_columns() {
        use crate::data::filters::columns::ColumnType;

        let offers = Entity::Offer.allowlist();
        assert_eq!(offers.column_type("job_id"), ColumnType::Integer);
        assert_eq!(offers.column_type("created_at"), ColumnType::Timestamp);
        assert_eq!(offers.column_type("provider_id"), ColumnType::Text);
        assert_eq!(
            Entity::Job.allowlist().column_type("invitation_only"),
            ColumnType::Boolean
        );
    }

    #[test]
    fn test_allowlist_matches_columns() {
        assert_eq!(
            Entity::Offer.allowlist().fields(),
            columns::OFFER_FILTERABLE
        );
    }

    #[test]
    fn test_display_and_serialize() {
        assert_eq!(Entity::OfferRecord.to_string(), "offer_record");
        assert_eq!(
            serde_json::to_string(&Entity::OfferRecord).unwrap(),
            "\"offer_record\""
        );
    }
}

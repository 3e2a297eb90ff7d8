//! Named-entity types extracted from resume transcripts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The entity classifications the service keeps. Anything else the NLP
/// backend reports is dropped when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Person,
    Organization,
    Date,
    Location,
}

impl EntityType {
    pub const ALL: [EntityType; 4] = [
        EntityType::Person,
        EntityType::Organization,
        EntityType::Date,
        EntityType::Location,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityType::Person => "PERSON",
            EntityType::Organization => "ORGANIZATION",
            EntityType::Date => "DATE",
            EntityType::Location => "LOCATION",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEntityType(pub String);

impl fmt::Display for UnknownEntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown entity type '{}'", self.0)
    }
}

impl std::error::Error for UnknownEntityType {}

impl FromStr for EntityType {
    type Err = UnknownEntityType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PERSON" => Ok(EntityType::Person),
            "ORGANIZATION" => Ok(EntityType::Organization),
            "DATE" => Ok(EntityType::Date),
            "LOCATION" => Ok(EntityType::Location),
            _ => Err(UnknownEntityType(s.to_string())),
        }
    }
}

/// A classified span of transcript text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntity {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: EntityType,
}

impl ExtractedEntity {
    pub fn new(text: impl Into<String>, kind: EntityType) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// Entities grouped by classification. Each list holds distinct strings in
/// first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedEntities {
    #[serde(rename = "PERSON", default)]
    pub person: Vec<String>,
    #[serde(rename = "ORGANIZATION", default)]
    pub organization: Vec<String>,
    #[serde(rename = "DATE", default)]
    pub date: Vec<String>,
    #[serde(rename = "LOCATION", default)]
    pub location: Vec<String>,
}

impl GroupedEntities {
    pub fn from_entities<'a, I>(entities: I) -> Self
    where
        I: IntoIterator<Item = &'a ExtractedEntity>,
    {
        let mut grouped = GroupedEntities::default();
        for entity in entities {
            grouped.insert(entity.kind, &entity.text);
        }
        grouped
    }

    /// Adds `text` under `kind` unless the exact string is already present.
    pub fn insert(&mut self, kind: EntityType, text: &str) {
        let bucket = self.bucket_mut(kind);
        if !bucket.iter().any(|existing| existing == text) {
            bucket.push(text.to_string());
        }
    }

    pub fn get(&self, kind: EntityType) -> &[String] {
        match kind {
            EntityType::Person => &self.person,
            EntityType::Organization => &self.organization,
            EntityType::Date => &self.date,
            EntityType::Location => &self.location,
        }
    }

    fn bucket_mut(&mut self, kind: EntityType) -> &mut Vec<String> {
        match kind {
            EntityType::Person => &mut self.person,
            EntityType::Organization => &mut self.organization,
            EntityType::Date => &mut self.date,
            EntityType::Location => &mut self.location,
        }
    }

    /// Flattens back into entities, type by type in `EntityType::ALL` order.
    #[cfg(test)]
    pub fn entities(&self) -> Vec<ExtractedEntity> {
        EntityType::ALL
            .iter()
            .flat_map(|&kind| {
                self.get(kind)
                    .iter()
                    .map(move |text| ExtractedEntity::new(text.clone(), kind))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        EntityType::ALL.iter().map(|&k| self.get(k).len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_parses_case_insensitively() {
        assert_eq!("person".parse::<EntityType>(), Ok(EntityType::Person));
        assert_eq!(" LOCATION ".parse::<EntityType>(), Ok(EntityType::Location));
    }

    #[test]
    fn test_unknown_entity_type_rejected() {
        assert!("COMMERCIAL_ITEM".parse::<EntityType>().is_err());
        assert!("QUANTITY".parse::<EntityType>().is_err());
    }

    #[test]
    fn test_grouping_dedups_and_keeps_order() {
        let entities = vec![
            ExtractedEntity::new("John Doe", EntityType::Person),
            ExtractedEntity::new("Acme Corp", EntityType::Organization),
            ExtractedEntity::new("John Doe", EntityType::Person),
        ];
        let grouped = GroupedEntities::from_entities(&entities);
        assert_eq!(grouped.person, vec!["John Doe"]);
        assert_eq!(grouped.organization, vec!["Acme Corp"]);
        assert!(grouped.date.is_empty());
        assert!(grouped.location.is_empty());
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let entities = vec![
            ExtractedEntity::new("2019", EntityType::Date),
            ExtractedEntity::new("Pune", EntityType::Location),
            ExtractedEntity::new("MIT", EntityType::Organization),
            ExtractedEntity::new("2019", EntityType::Date),
            ExtractedEntity::new("2021", EntityType::Date),
            ExtractedEntity::new("Acme", EntityType::Organization),
        ];
        let once = GroupedEntities::from_entities(&entities);
        let twice = GroupedEntities::from_entities(&once.entities());
        assert_eq!(once, twice);
        assert_eq!(once.date, vec!["2019", "2021"]);
    }

    #[test]
    fn test_dedup_is_exact_match_only() {
        let entities = vec![
            ExtractedEntity::new("Acme Corp", EntityType::Organization),
            ExtractedEntity::new("acme corp", EntityType::Organization),
        ];
        let grouped = GroupedEntities::from_entities(&entities);
        assert_eq!(grouped.organization.len(), 2);
    }

    #[test]
    fn test_serializes_with_fixed_keys() {
        let json = serde_json::to_value(GroupedEntities::default()).unwrap();
        for key in ["PERSON", "ORGANIZATION", "DATE", "LOCATION"] {
            assert_eq!(json[key], serde_json::json!([]), "missing key {key}");
        }
    }

    #[test]
    fn test_extracted_entity_uses_type_field() {
        let json = serde_json::to_value(ExtractedEntity::new("Pune", EntityType::Location)).unwrap();
        assert_eq!(json, serde_json::json!({"text": "Pune", "type": "LOCATION"}));
    }
}

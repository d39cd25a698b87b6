//! Generic entity references and entity details.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::entertainment::{ContentRating, MusicType, ProgramType, WayToWatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChannelType {
    Streaming,
    OverTheAir,
}

/// Reference to an entity inside the app's catalog.
///
/// The platform accepts several entity shapes (program, music, channel,
/// playlist, untyped). The common keys are typed here; anything else the
/// platform or app attaches is preserved in `extra` and written back verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    pub entity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_type: Option<ProgramType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_type: Option<MusicType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_type: Option<ChannelType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_content_data: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity {
    #[must_use]
    pub fn untyped(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn program(entity_id: impl Into<String>, program_type: ProgramType) -> Self {
        Self {
            entity_type: Some("program".to_string()),
            entity_id: entity_id.into(),
            program_type: Some(program_type),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChannelEntityType {
    #[default]
    Channel,
}

/// A linear or streaming channel, the target of a tune intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelEntity {
    #[serde(default)]
    pub entity_type: ChannelEntityType,
    pub channel_type: ChannelType,
    pub entity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_content_data: Option<String>,
}

/// Display metadata for an entity. All fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_ratings: Option<Vec<ContentRating>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDetails {
    pub identifiers: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ways_to_watch: Option<Vec<WayToWatch>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_untyped_entity_is_minimal() {
        let entity = Entity::untyped("abc");
        assert_eq!(serde_json::to_value(&entity).unwrap(), json!({"entityId": "abc"}));
    }

    #[test]
    fn test_entity_preserves_unknown_keys() {
        let json = json!({
            "entityType": "playlist",
            "entityId": "p-1",
            "playlistType": "queue",
            "position": 3
        });
        let entity: Entity = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(entity.entity_type.as_deref(), Some("playlist"));
        assert_eq!(entity.extra.get("playlistType"), Some(&json!("queue")));
        assert_eq!(serde_json::to_value(&entity).unwrap(), json);
    }

    #[test]
    fn test_program_entity() {
        let entity = Entity::program("movie/xyz", ProgramType::Movie);
        assert_eq!(
            serde_json::to_value(&entity).unwrap(),
            json!({"entityType": "program", "entityId": "movie/xyz", "programType": "movie"})
        );
    }

    #[test]
    fn test_channel_entity_defaults_type() {
        let json = json!({"channelType": "overTheAir", "entityId": "ch-7"});
        let channel: ChannelEntity = serde_json::from_value(json).unwrap();
        assert_eq!(channel.entity_type, ChannelEntityType::Channel);
        assert_eq!(channel.channel_type, ChannelType::OverTheAir);

        let value = serde_json::to_value(&channel).unwrap();
        assert_eq!(value["entityType"], "channel");
    }

    #[test]
    fn test_entity_details_nested_info() {
        let details = EntityDetails {
            identifiers: Entity::untyped("e-1"),
            info: Some(Metadata {
                title: Some("A Title".to_string()),
                episode_count: Some(10),
                ..Metadata::default()
            }),
            ways_to_watch: None,
        };
        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(
            value,
            json!({
                "identifiers": {"entityId": "e-1"},
                "info": {"title": "A Title", "episodeCount": 10}
            })
        );
    }
}

//! Navigation intents.
//!
//! The platform delivers every navigation request on a single wire event and
//! tells the variants apart by the `action` field. [`NavigationIntent`] is the
//! tagged sum; each concrete intent struct converts into it and can be
//! projected back out through [`NavigationIntentVariant`].

use serde::{Deserialize, Serialize};

use crate::entertainment::{MusicType, ProgramType};
use crate::entity::{ChannelEntity, Entity};

/// Where the intent originated (e.g. `voice`, `editorial`, `deeplink`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentContext {
    pub source: String,
}

impl IntentContext {
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeIntent {
    pub context: IntentContext,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchIntent {
    pub context: IntentContext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityIntent {
    pub data: Entity,
    pub context: IntentContext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackIntent {
    pub data: Entity,
    pub context: IntentContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIntentData {
    pub query: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIntent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SearchIntentData>,
    pub context: IntentContext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionIntentData {
    pub section_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionIntent {
    pub data: SectionIntentData,
    pub context: IntentContext,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TuneIntentOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart_current_program: Option<bool>,
    /// ISO 8601 start time for time-shifted tuning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuneIntentData {
    pub entity: ChannelEntity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<TuneIntentOptions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuneIntent {
    pub data: TuneIntentData,
    pub context: IntentContext,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayEntityIntentOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_first_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_first_track: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayEntityIntentData {
    pub entity: Entity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<PlayEntityIntentOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayEntityIntent {
    pub data: PlayEntityIntentData,
    pub context: IntentContext,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayQueryIntentOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_types: Option<Vec<ProgramType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_types: Option<Vec<MusicType>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayQueryIntentData {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<PlayQueryIntentOptions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayQueryIntent {
    pub data: PlayQueryIntentData,
    pub context: IntentContext,
}

/// Any navigation intent, tagged by `action` on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum NavigationIntent {
    #[serde(rename = "home")]
    Home(HomeIntent),
    #[serde(rename = "launch")]
    Launch(LaunchIntent),
    #[serde(rename = "entity")]
    Entity(EntityIntent),
    #[serde(rename = "playback")]
    Playback(PlaybackIntent),
    #[serde(rename = "search")]
    Search(SearchIntent),
    #[serde(rename = "section")]
    Section(SectionIntent),
    #[serde(rename = "tune")]
    Tune(TuneIntent),
    #[serde(rename = "play-entity")]
    PlayEntity(PlayEntityIntent),
    #[serde(rename = "play-query")]
    PlayQuery(PlayQueryIntent),
}

impl NavigationIntent {
    /// The wire `action` discriminator
    #[must_use]
    pub fn action(&self) -> &'static str {
        match self {
            Self::Home(_) => HomeIntent::ACTION,
            Self::Launch(_) => LaunchIntent::ACTION,
            Self::Entity(_) => EntityIntent::ACTION,
            Self::Playback(_) => PlaybackIntent::ACTION,
            Self::Search(_) => SearchIntent::ACTION,
            Self::Section(_) => SectionIntent::ACTION,
            Self::Tune(_) => TuneIntent::ACTION,
            Self::PlayEntity(_) => PlayEntityIntent::ACTION,
            Self::PlayQuery(_) => PlayQueryIntent::ACTION,
        }
    }

    #[must_use]
    pub fn context(&self) -> &IntentContext {
        match self {
            Self::Home(i) => &i.context,
            Self::Launch(i) => &i.context,
            Self::Entity(i) => &i.context,
            Self::Playback(i) => &i.context,
            Self::Search(i) => &i.context,
            Self::Section(i) => &i.context,
            Self::Tune(i) => &i.context,
            Self::PlayEntity(i) => &i.context,
            Self::PlayQuery(i) => &i.context,
        }
    }
}

/// A concrete intent type that can be carved out of a [`NavigationIntent`].
///
/// Typed `onNavigateTo` listeners use this to receive only the variant they
/// registered for.
pub trait NavigationIntentVariant: Into<NavigationIntent> + Sized {
    const ACTION: &'static str;

    fn from_intent(intent: NavigationIntent) -> Option<Self>;
}

macro_rules! navigation_variant {
    ($ty:ident, $variant:ident, $action:literal) => {
        impl NavigationIntentVariant for $ty {
            const ACTION: &'static str = $action;

            fn from_intent(intent: NavigationIntent) -> Option<Self> {
                match intent {
                    NavigationIntent::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$ty> for NavigationIntent {
            fn from(intent: $ty) -> Self {
                NavigationIntent::$variant(intent)
            }
        }
    };
}

navigation_variant!(HomeIntent, Home, "home");
navigation_variant!(LaunchIntent, Launch, "launch");
navigation_variant!(EntityIntent, Entity, "entity");
navigation_variant!(PlaybackIntent, Playback, "playback");
navigation_variant!(SearchIntent, Search, "search");
navigation_variant!(SectionIntent, Section, "section");
navigation_variant!(TuneIntent, Tune, "tune");
navigation_variant!(PlayEntityIntent, PlayEntity, "play-entity");
navigation_variant!(PlayQueryIntent, PlayQuery, "play-query");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ChannelType;
    use serde_json::json;

    #[test]
    fn test_home_intent_wire_shape() {
        let intent: NavigationIntent = HomeIntent {
            context: IntentContext::new("voice"),
        }
        .into();
        assert_eq!(
            serde_json::to_value(&intent).unwrap(),
            json!({"action": "home", "context": {"source": "voice"}})
        );
    }

    #[test]
    fn test_search_intent_without_data() {
        let json = json!({"action": "search", "context": {"source": "voice"}});
        let intent: NavigationIntent = serde_json::from_value(json.clone()).unwrap();
        let NavigationIntent::Search(search) = &intent else {
            panic!("Expected Search intent");
        };
        assert!(search.data.is_none());
        assert_eq!(serde_json::to_value(&intent).unwrap(), json);
    }

    #[test]
    fn test_tune_intent_decodes_options() {
        let json = json!({
            "action": "tune",
            "data": {
                "entity": {
                    "entityType": "channel",
                    "channelType": "streaming",
                    "entityId": "ch-1"
                },
                "options": {"restartCurrentProgram": true}
            },
            "context": {"source": "editorial"}
        });
        let intent: NavigationIntent = serde_json::from_value(json).unwrap();
        let tune = TuneIntent::from_intent(intent).expect("tune variant");
        assert_eq!(tune.data.entity.channel_type, ChannelType::Streaming);
        let options = tune.data.options.unwrap();
        assert_eq!(options.restart_current_program, Some(true));
        assert!(options.asset_id.is_none());
        assert!(options.time.is_none());
    }

    #[test]
    fn test_play_query_intent_with_types() {
        let intent: NavigationIntent = PlayQueryIntent {
            data: PlayQueryIntentData {
                query: "jazz".to_string(),
                options: Some(PlayQueryIntentOptions {
                    program_types: None,
                    music_types: Some(vec![MusicType::Album]),
                }),
            },
            context: IntentContext::new("voice"),
        }
        .into();
        assert_eq!(
            serde_json::to_value(&intent).unwrap(),
            json!({
                "action": "play-query",
                "data": {"query": "jazz", "options": {"musicTypes": ["album"]}},
                "context": {"source": "voice"}
            })
        );
    }

    #[test]
    fn test_play_entity_intent_roundtrip_keeps_entity() {
        let json = json!({
            "action": "play-entity",
            "data": {
                "entity": {"entityType": "playlist", "entityId": "pl-1"},
                "options": {"playFirstId": "track-3"}
            },
            "context": {"source": "voice"}
        });
        let intent: NavigationIntent = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(intent.action(), "play-entity");
        assert_eq!(serde_json::to_value(&intent).unwrap(), json);
    }

    #[test]
    fn test_from_intent_rejects_other_variants() {
        let intent: NavigationIntent = LaunchIntent::default().into();
        assert!(HomeIntent::from_intent(intent.clone()).is_none());
        assert!(LaunchIntent::from_intent(intent).is_some());
    }

    #[test]
    fn test_action_matches_wire_tag() {
        let intents: Vec<NavigationIntent> = vec![
            HomeIntent::default().into(),
            LaunchIntent::default().into(),
            EntityIntent {
                data: Entity::untyped("e"),
                context: IntentContext::default(),
            }
            .into(),
            SectionIntent {
                data: SectionIntentData {
                    section_name: "settings".to_string(),
                },
                context: IntentContext::default(),
            }
            .into(),
        ];
        for intent in intents {
            let value = serde_json::to_value(&intent).unwrap();
            assert_eq!(value["action"], intent.action());
        }
    }

    #[test]
    fn test_unknown_action_fails() {
        let json = json!({"action": "teleport", "context": {"source": "x"}});
        assert!(serde_json::from_value::<NavigationIntent>(json).is_err());
    }

    #[test]
    fn test_context_accessor() {
        let intent: NavigationIntent = SearchIntent {
            data: Some(SearchIntentData {
                query: "news".to_string(),
            }),
            context: IntentContext::new("deeplink"),
        }
        .into();
        assert_eq!(intent.context().source, "deeplink");
    }
}

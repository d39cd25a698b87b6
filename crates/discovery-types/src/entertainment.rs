//! Entertainment schema shared by the discovery and intent payloads.

use serde::{Deserialize, Serialize};

use crate::deserialize_null_as_empty_vec;

/// Identifiers for a piece of content. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentIdentifiers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<String>,
    /// Opaque app-specific data echoed back in intents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_content_data: Option<String>,
}

impl ContentIdentifiers {
    #[must_use]
    pub fn entity(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: Some(entity_id.into()),
            ..Self::default()
        }
    }
}

/// A user entitlement, optionally time-bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entitlement {
    pub entitlement_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl Entitlement {
    #[must_use]
    pub fn new(entitlement_id: impl Into<String>) -> Self {
        Self {
            entitlement_id: entitlement_id.into(),
            start_time: None,
            end_time: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentRatingScheme {
    #[serde(rename = "CA-Movie")]
    CaMovie,
    #[serde(rename = "CA-TV")]
    CaTv,
    #[serde(rename = "CA-Movie-Fr")]
    CaMovieFr,
    #[serde(rename = "CA-TV-Fr")]
    CaTvFr,
    #[serde(rename = "US-Movie")]
    UsMovie,
    #[serde(rename = "US-TV")]
    UsTv,
}

/// A rating within a scheme, e.g. `US-TV` / `TV14`, plus advisories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRating {
    pub scheme: ContentRatingScheme,
    pub rating: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisories: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgramType {
    Movie,
    Episode,
    Season,
    Series,
    Other,
    Preview,
    Extra,
    Concert,
    SportingEvent,
    Advertisement,
    MusicVideo,
    Minisode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MusicType {
    Song,
    Album,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OfferingType {
    Free,
    Subscribe,
    Buy,
    Rent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoQuality {
    #[serde(rename = "SD")]
    Sd,
    #[serde(rename = "HD")]
    Hd,
    #[serde(rename = "UHD")]
    Uhd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioProfile {
    #[serde(rename = "stereo")]
    Stereo,
    #[serde(rename = "dolbyDigital5.1")]
    DolbyDigital5_1,
    #[serde(rename = "dolbyDigital7.1")]
    DolbyDigital7_1,
    #[serde(rename = "dolbyDigital5.1+")]
    DolbyDigital5_1Plus,
    #[serde(rename = "dolbyDigital7.1+")]
    DolbyDigital7_1Plus,
    #[serde(rename = "dolbyAtmos")]
    DolbyAtmos,
}

/// One way the user can watch an entity: an asset plus its access terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WayToWatch {
    pub identifiers: ContentIdentifiers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entitled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entitled_expires: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offering_type: Option<OfferingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_ads: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_quality: Option<Vec<VideoQuality>>,
    /// Required by the schema, so always emitted even when empty
    #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
    pub audio_profile: Vec<AudioProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_languages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_captions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitles: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_descriptions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityType {
    #[default]
    Program,
    Music,
}

/// Program or music metadata describing an entity and how to watch it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityInfo {
    pub identifiers: ContentIdentifiers,
    pub title: String,
    pub entity_type: EntityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_type: Option<ProgramType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_type: Option<MusicType>,
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ways_to_watch: Option<Vec<WayToWatch>>,
}

impl EntityInfo {
    #[must_use]
    pub fn program(
        identifiers: ContentIdentifiers,
        title: impl Into<String>,
        program_type: ProgramType,
    ) -> Self {
        Self {
            identifiers,
            title: title.into(),
            entity_type: EntityType::Program,
            program_type: Some(program_type),
            ..Self::default()
        }
    }
}

//! Discovery schema: content access, policy, pull results and provider requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::deserialize_null_as_empty_vec;
use crate::entertainment::{Entitlement, EntityInfo, OfferingType, ProgramType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityType {
    ChannelLineup,
    ProgramLineup,
}

/// Content the user can discover: a channel or program lineup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    #[serde(rename = "type")]
    pub availability_type: AvailabilityType,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

/// Availabilities and entitlements reported together by `contentAccess`.
///
/// An empty list clears that kind of access; an absent list leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAccessIdentifiers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availabilities: Option<Vec<Availability>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entitlements: Option<Vec<Entitlement>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryPolicy {
    #[serde(default)]
    pub enable_recommendations: bool,
    #[serde(default)]
    pub share_watch_history: bool,
    #[serde(default)]
    pub remember_watched_programs: bool,
}

/// Result pushed for `discovery.entityInfo`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityInfoResult {
    pub expires: String,
    pub entity: EntityInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<Vec<EntityInfo>>,
}

/// Result pushed for `discovery.purchasedContent`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedContentResult {
    pub expires: String,
    /// Total number of purchases, which may exceed `entries.len()`
    pub total_count: i32,
    #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
    pub entries: Vec<EntityInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityInfoParameters {
    pub entity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedContentParameters {
    pub limit: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offering_type: Option<OfferingType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_type: Option<ProgramType>,
}

/// A platform-initiated pull. The answer must echo `correlation_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FederatedRequest<P> {
    pub correlation_id: String,
    pub parameters: P,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterestType {
    Interest,
    Disinterest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterestReason {
    Playlist,
    Reaction,
    Recording,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInterestParameters {
    #[serde(rename = "type")]
    pub interest_type: InterestType,
    pub reason: InterestReason,
}

pub type UserInterestRequest = FederatedRequest<UserInterestParameters>;

/// Artwork keyed by aspect ratio, then by locale, to a URL
pub type Images = BTreeMap<String, BTreeMap<String, String>>;

//! Shared wire types for the Discovery capability SDK.
//!
//! Every type in this crate is a plain data record that serializes to the
//! JSON shape the platform expects. Optional fields are omitted from the wire
//! document when unset and decode as `None` when missing.
//!
//! The types are grouped the same way the platform groups its schemas:
//!
//! - [`entertainment`]: content identifiers, entitlements, ratings, ways to watch
//! - [`discovery`]: content access, policy, pull results and provider requests
//! - [`entity`]: generic entity references and entity details
//! - [`intents`]: navigation intents delivered by `discovery.onNavigateTo`

use serde::{Deserialize, Deserializer};

pub mod discovery;
pub mod entertainment;
pub mod entity;
pub mod intents;

pub use discovery::{
    Availability, AvailabilityType, ContentAccessIdentifiers, DiscoveryPolicy,
    EntityInfoParameters, EntityInfoResult, FederatedRequest, Images, InterestReason,
    InterestType, PurchasedContentParameters, PurchasedContentResult, UserInterestParameters,
    UserInterestRequest,
};
pub use entertainment::{
    AudioProfile, ContentIdentifiers, ContentRating, ContentRatingScheme, Entitlement, EntityInfo,
    EntityType, MusicType, OfferingType, ProgramType, VideoQuality, WayToWatch,
};
pub use entity::{ChannelEntity, ChannelEntityType, ChannelType, Entity, EntityDetails, Metadata};
pub use intents::{
    EntityIntent, HomeIntent, IntentContext, LaunchIntent, NavigationIntent,
    NavigationIntentVariant, PlayEntityIntent, PlayEntityIntentData, PlayEntityIntentOptions,
    PlayQueryIntent, PlayQueryIntentData, PlayQueryIntentOptions, PlaybackIntent, SearchIntent,
    SearchIntentData, SectionIntent, SectionIntentData, TuneIntent, TuneIntentData,
    TuneIntentOptions,
};

/// Deserialize a Vec that may be null or missing (both become empty vec)
pub(crate) fn deserialize_null_as_empty_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Property-based tests for the wire shape of the optional-heavy records.
///
/// The platform rejects explicit `null` for optional fields, so these check
/// that unset fields never reach the wire and that set fields survive a trip.
#[cfg(test)]
mod proptest_wire_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_json_string() -> BoxedStrategy<String> {
        proptest::string::string_regex("[a-zA-Z0-9_\\-.: ]{0,40}")
            .unwrap()
            .boxed()
    }

    fn arb_opt_string() -> impl Strategy<Value = Option<String>> {
        proptest::option::of(arb_json_string())
    }

    prop_compose! {
        fn arb_identifiers()(
            asset_id in arb_opt_string(),
            entity_id in arb_opt_string(),
            season_id in arb_opt_string(),
            series_id in arb_opt_string(),
            app_content_data in arb_opt_string()
        ) -> ContentIdentifiers {
            ContentIdentifiers { asset_id, entity_id, season_id, series_id, app_content_data }
        }
    }

    prop_compose! {
        fn arb_entitlement()(
            entitlement_id in arb_json_string(),
            start_time in arb_opt_string(),
            end_time in arb_opt_string()
        ) -> Entitlement {
            Entitlement { entitlement_id, start_time, end_time }
        }
    }

    fn arb_offering_type() -> impl Strategy<Value = OfferingType> {
        prop_oneof![
            Just(OfferingType::Free),
            Just(OfferingType::Subscribe),
            Just(OfferingType::Buy),
            Just(OfferingType::Rent),
        ]
    }

    prop_compose! {
        fn arb_way_to_watch()(
            identifiers in arb_identifiers(),
            expires in arb_opt_string(),
            entitled in proptest::option::of(any::<bool>()),
            offering_type in proptest::option::of(arb_offering_type()),
            has_ads in proptest::option::of(any::<bool>()),
            audio_languages in proptest::option::of(proptest::collection::vec(arb_json_string(), 0..4))
        ) -> WayToWatch {
            WayToWatch {
                identifiers,
                expires,
                entitled,
                offering_type,
                has_ads,
                audio_languages,
                ..WayToWatch::default()
            }
        }
    }

    fn object_has_no_nulls(value: &serde_json::Value) -> bool {
        match value {
            serde_json::Value::Null => false,
            serde_json::Value::Array(items) => items.iter().all(object_has_no_nulls),
            serde_json::Value::Object(map) => map.values().all(object_has_no_nulls),
            _ => true,
        }
    }

    proptest! {
        #[test]
        fn identifiers_never_emit_null(ids in arb_identifiers()) {
            let json = serde_json::to_value(&ids).unwrap();
            prop_assert!(object_has_no_nulls(&json));
            let present = [&ids.asset_id, &ids.entity_id, &ids.season_id, &ids.series_id, &ids.app_content_data]
                .iter()
                .filter(|f| f.is_some())
                .count();
            prop_assert_eq!(json.as_object().unwrap().len(), present);
        }

        #[test]
        fn identifiers_survive_wire(ids in arb_identifiers()) {
            let json = serde_json::to_string(&ids).unwrap();
            let parsed: ContentIdentifiers = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(ids, parsed);
        }

        #[test]
        fn entitlement_survives_wire(entitlement in arb_entitlement()) {
            let json = serde_json::to_value(&entitlement).unwrap();
            prop_assert!(object_has_no_nulls(&json));
            prop_assert_eq!(json["entitlementId"].as_str(), Some(entitlement.entitlement_id.as_str()));
            let parsed: Entitlement = serde_json::from_value(json).unwrap();
            prop_assert_eq!(entitlement, parsed);
        }

        #[test]
        fn way_to_watch_always_carries_audio_profile(way in arb_way_to_watch()) {
            let json = serde_json::to_value(&way).unwrap();
            prop_assert!(object_has_no_nulls(&json));
            prop_assert!(json["audioProfile"].is_array());
            let parsed: WayToWatch = serde_json::from_value(json).unwrap();
            prop_assert_eq!(way, parsed);
        }
    }
}

use plotagent_ingest::{IngestError, ResponseIngestor};
use plotagent_schema::{PlotterSettings, SettingField};
use plotagent_test_utils::{
    invalid_payload, malformed_text, non_default_settings, valid_payload, RecordingTarget,
};
use proptest::prelude::*;
use serde_json::Value;

proptest! {
    #[test]
    fn prop_valid_payload_writes_exactly_its_fields(map in valid_payload()) {
        let ingestor = ResponseIngestor::new();
        let mut target = RecordingTarget::new();
        let raw = Value::Object(map.clone()).to_string();

        let report = ingestor.ingest_and_apply(&raw, &mut target).unwrap();

        let mut expected: Vec<SettingField> = map
            .keys()
            .map(|key| key.parse::<SettingField>().unwrap())
            .collect();
        expected.sort();
        prop_assert_eq!(report.applied(), expected.as_slice());
        prop_assert_eq!(target.writes, expected);
    }

    #[test]
    fn prop_fields_outside_payload_are_untouched(map in valid_payload()) {
        let ingestor = ResponseIngestor::new();
        let before = non_default_settings();
        let mut settings = before.clone();
        let raw = Value::Object(map.clone()).to_string();

        ingestor.ingest_and_apply(&raw, &mut settings).unwrap();

        use plotagent_schema::SettingsTarget;
        let after = settings.snapshot();
        let original = before.snapshot();
        for field in SettingField::ALL {
            if !map.contains_key(field.name()) {
                prop_assert_eq!(after.get(field), original.get(field));
            }
        }
    }

    #[test]
    fn prop_ingestion_is_idempotent(map in valid_payload()) {
        let ingestor = ResponseIngestor::new();
        let raw = Value::Object(map).to_string();

        let mut once = PlotterSettings::default();
        ingestor.ingest_and_apply(&raw, &mut once).unwrap();

        let mut twice = once.clone();
        ingestor.ingest_and_apply(&raw, &mut twice).unwrap();

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_invalid_payload_leaves_target_unchanged((map, bad_field) in invalid_payload()) {
        let ingestor = ResponseIngestor::new();
        let mut target = RecordingTarget::new();
        let raw = Value::Object(map).to_string();

        let err = ingestor.ingest_and_apply(&raw, &mut target).unwrap_err();

        prop_assert!(matches!(err, IngestError::Validation(_)));
        prop_assert!(err.fields().contains(&bad_field));
        prop_assert!(target.writes.is_empty());
        prop_assert_eq!(target.settings, PlotterSettings::default());
    }

    #[test]
    fn prop_malformed_text_is_decode_error(text in malformed_text()) {
        let ingestor = ResponseIngestor::new();
        let before = non_default_settings();
        let mut settings = before.clone();

        let err = ingestor.ingest_and_apply(&text, &mut settings).unwrap_err();

        prop_assert_eq!(err.kind(), "decode");
        prop_assert_eq!(settings, before);
    }
}

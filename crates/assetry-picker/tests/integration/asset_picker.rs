//! Asset classification picker against the in-memory backend.

use assetry_core::{AssetLevel, Level, LoadState, SelectionValue};
use assetry_picker::{Applied, IdentifierOrigin};

use crate::common::{FakeBackend, SUNGROW_ID, SUNGROW_PATH, asset_picker, select_all};

#[tokio::test]
async fn test_new_path_generates_identifier() {
    let backend = FakeBackend::new();
    let mut picker = asset_picker(&backend).await;

    select_all(&mut picker, &SUNGROW_PATH).await;

    let identifier = picker.identifier().expect("identifier should be resolved");
    assert_eq!(identifier.value, SUNGROW_ID);
    assert_eq!(identifier.origin, IdentifierOrigin::Generated);
    assert_eq!(backend.generate_calls(), 1);
}

#[tokio::test]
async fn test_second_session_finds_generated_identifier() {
    let backend = FakeBackend::new();

    let mut first = asset_picker(&backend).await;
    select_all(&mut first, &SUNGROW_PATH).await;
    drop(first);

    let mut second = asset_picker(&backend).await;
    select_all(&mut second, &SUNGROW_PATH).await;

    let identifier = second.identifier().unwrap();
    assert_eq!(identifier.value, SUNGROW_ID);
    assert_eq!(identifier.origin, IdentifierOrigin::Existing);
    assert_eq!(backend.generate_calls(), 1);
    // One load and one lookup per session.
    assert_eq!(backend.dropdown_calls(), 4);
}

#[tokio::test]
async fn test_changing_category_resets_everything_below() {
    let backend = FakeBackend::new();
    let mut picker = asset_picker(&backend).await;
    select_all(&mut picker, &SUNGROW_PATH).await;
    assert!(picker.identifier().is_some());

    let transition = picker.set_value(AssetLevel::Category, "Civil").unwrap();

    assert_eq!(transition.cleared, 5);
    assert_eq!(transition.options, vec!["Mounting"]);
    for level in AssetLevel::Category.deeper() {
        assert!(picker.path().get(*level).is_none(), "{level} not cleared");
    }
    assert!(picker.identifier().is_none());

    let lists = picker.option_lists();
    assert_eq!(lists[1].options, vec!["Mounting"]);
    assert!(lists[1].reachable);
    for list in &lists[2..] {
        assert!(!list.reachable);
        assert!(list.options.is_empty());
    }
}

#[tokio::test]
async fn test_every_level_write_clears_deeper_levels_and_identifier() {
    let backend = FakeBackend::new();
    let mut picker = asset_picker(&backend).await;

    for level in AssetLevel::ALL {
        select_all(&mut picker, &SUNGROW_PATH).await;
        assert!(picker.identifier().is_some());

        picker.set_value(*level, "Replacement").unwrap();

        assert_eq!(picker.path().value(*level), Some("Replacement"));
        for deeper in level.deeper() {
            assert!(picker.path().get(*deeper).is_none());
        }
        assert!(picker.identifier().is_none());
    }
    assert_eq!(backend.generate_calls(), 1);
}

#[tokio::test]
async fn test_prefill_keeps_retired_model_as_freeform() {
    let backend = FakeBackend::new();
    let mut picker = asset_picker(&backend).await;

    let ticket = picker.prefill(
        ["Electrical", "Battery", "Lithium", "Rack", "LG Energy", "RESU10H"],
        Some("ELEC-BAT-LIT-RAC-LGENERGY-RESU10H-001"),
    );

    assert!(ticket.is_none());
    assert_eq!(
        picker.path().get(AssetLevel::Model),
        Some(&SelectionValue::Freeform("RESU10H".into()))
    );
    assert_eq!(
        picker.path().get(AssetLevel::Make),
        Some(&SelectionValue::Suggested("LG Energy".into()))
    );
    assert_eq!(picker.options_for(AssetLevel::Model), &["RESU16H Prime"]);
    assert_eq!(
        picker.identifier().unwrap().value,
        "ELEC-BAT-LIT-RAC-LGENERGY-RESU10H-001"
    );
    assert_eq!(backend.generate_calls(), 0);
}

#[tokio::test]
async fn test_prefill_populates_every_level_exactly() {
    let backend = FakeBackend::new();
    let mut picker = asset_picker(&backend).await;
    select_all(&mut picker, &["Civil", "Mounting"]).await;

    let stored = ["Electrical", "Inverter", "Central", "MV Skid", "ABB", "PVS980"];
    picker.prefill(stored, None);

    assert_eq!(picker.path().to_strings(), stored.to_vec());
    assert!(picker.path().is_complete());
}

#[tokio::test]
async fn test_options_are_served_from_memory() {
    let backend = FakeBackend::new();
    let mut picker = asset_picker(&backend).await;
    picker.set_value(AssetLevel::Category, "Electrical").unwrap();

    let first = picker.options_for(AssetLevel::SubCategory).to_vec();
    let second = picker.options_for(AssetLevel::SubCategory).to_vec();

    assert_eq!(first, vec!["Inverter", "Battery"]);
    assert_eq!(first, second);
    assert_eq!(backend.dropdown_calls(), 1);
}

#[tokio::test]
async fn test_options_use_partial_ancestor_keys() {
    let backend = FakeBackend::new();
    let mut picker = asset_picker(&backend).await;
    select_all(&mut picker, &SUNGROW_PATH[..4]).await;

    assert_eq!(picker.options_for(AssetLevel::Make), &["Sungrow", "Huawei"]);
    picker.set_value(AssetLevel::Make, "huawei").unwrap();
    assert_eq!(
        picker.path().get(AssetLevel::Make),
        Some(&SelectionValue::Suggested("Huawei".into()))
    );
    assert_eq!(picker.options_for(AssetLevel::Model), &["SUN2000"]);
}

#[tokio::test]
async fn test_existing_model_is_adopted_without_generation() {
    let backend = FakeBackend::new();
    let mut picker = asset_picker(&backend).await;
    select_all(&mut picker, &SUNGROW_PATH[..4]).await;
    picker.select(AssetLevel::Make, "Huawei").await.unwrap();

    let step = picker.select(AssetLevel::Model, "SUN2000").await.unwrap();

    let Some(Applied::Adopted(identifier)) = step.applied.clone() else {
        unreachable!("expected adopted identifier, got {:?}", step.applied);
    };
    assert_eq!(identifier.value, "ELEC-INV-STR-3PH-HUAWEI-SUN2000-001");
    assert_eq!(identifier.origin, IdentifierOrigin::Existing);
    assert_eq!(backend.generate_calls(), 0);
}

#[tokio::test]
async fn test_failed_dropdown_load_degrades_to_empty() {
    let backend = FakeBackend::new();
    backend.fail_dropdowns(true);
    let mut picker = asset_picker(&backend).await;

    assert!(matches!(picker.load_state(), LoadState::Degraded(_)));
    assert!(picker.options_for(AssetLevel::Category).is_empty());

    // Free text still fills the path. Nothing is generated while the
    // backend cannot be asked for an existing identifier.
    select_all(&mut picker, &SUNGROW_PATH).await;
    assert!(
        picker
            .path()
            .iter()
            .all(|(_, value)| !value.unwrap().is_suggested())
    );
    assert!(picker.identifier().is_none());
    assert!(picker.machine().last_failure().unwrap().contains("500"));
    assert_eq!(backend.generate_calls(), 0);

    backend.fail_dropdowns(false);
    assert!(matches!(
        picker.resolve_pending().await,
        Some(Applied::Adopted(_))
    ));
    assert_eq!(picker.identifier().unwrap().value, SUNGROW_ID);
}

#[tokio::test]
async fn test_locked_level_is_rejected() {
    let backend = FakeBackend::new();
    let mut picker = asset_picker(&backend).await;
    picker.set_value(AssetLevel::Category, "Electrical").unwrap();

    let err = picker.set_value(AssetLevel::Model, "SG110CX").unwrap_err();
    assert_eq!(
        err.to_string(),
        "asset level 'Model' is locked until 'Sub Category' is selected"
    );
    assert_eq!(picker.path().filled_depth(), 1);
}

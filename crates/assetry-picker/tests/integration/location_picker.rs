//! Location picker against the in-memory backend.

use assetry_core::{Level, LocationLevel};
use assetry_picker::{Applied, IdentifierOrigin};

use crate::common::{FakeBackend, location_picker, select_all};

const ROOFTOP: [&str; 5] = ["India", "Gujarat", "Surat", "Plant A", "Rooftop 1"];

#[tokio::test]
async fn test_known_site_resolves_embedded_id() {
    let backend = FakeBackend::new();
    let mut picker = location_picker(&backend).await;

    select_all(&mut picker, &ROOFTOP).await;

    let identifier = picker.identifier().unwrap();
    assert_eq!(identifier.value, "LOC-0001");
    assert_eq!(identifier.origin, IdentifierOrigin::Existing);
}

#[tokio::test]
async fn test_options_keyed_by_full_ancestor_path() {
    let backend = FakeBackend::new();
    let mut picker = location_picker(&backend).await;
    select_all(&mut picker, &ROOFTOP[..2]).await;

    assert_eq!(
        picker.options_for(LocationLevel::City),
        &["Surat", "Ahmedabad"]
    );
    picker.set_value(LocationLevel::City, "Surat").unwrap();
    let transition = picker.set_value(LocationLevel::Unit, "plant a").unwrap();
    assert_eq!(transition.options, vec!["Rooftop 1", "Ground Mount"]);

    picker.set_value(LocationLevel::State, "Rajasthan").unwrap();
    assert!(picker.options_for(LocationLevel::City).is_empty());
    assert!(picker.path().is_reachable(LocationLevel::City));
    assert!(!picker.path().is_reachable(LocationLevel::Unit));
}

#[tokio::test]
async fn test_new_site_is_not_generated() {
    let backend = FakeBackend::new();
    let mut picker = location_picker(&backend).await;
    select_all(&mut picker, &ROOFTOP[..4]).await;

    let step = picker
        .select(LocationLevel::Name, "Carport East")
        .await
        .unwrap();

    assert_eq!(step.applied, Some(Applied::Unresolved));
    assert!(picker.identifier().is_none());
    assert_eq!(backend.generate_calls(), 0);
}

#[tokio::test]
async fn test_switching_site_replaces_identifier() {
    let backend = FakeBackend::new();
    let mut picker = location_picker(&backend).await;
    select_all(&mut picker, &ROOFTOP).await;

    let step = picker
        .select(LocationLevel::Name, "Ground Mount")
        .await
        .unwrap();

    assert_eq!(step.transition.cleared, 0);
    assert_eq!(picker.identifier().unwrap().value, "LOC-0002");
    assert_eq!(
        picker.path().identifier_key().unwrap().as_str(),
        "India|Gujarat|Surat|Plant A|Ground Mount"
    );
}

#[tokio::test]
async fn test_option_lists_follow_reachability() {
    let backend = FakeBackend::new();
    let mut picker = location_picker(&backend).await;
    select_all(&mut picker, &ROOFTOP[..3]).await;

    let lists = picker.option_lists();
    assert_eq!(lists.len(), LocationLevel::depth());
    let reachable: Vec<bool> = lists.iter().map(|list| list.reachable).collect();
    assert_eq!(reachable, vec![true, true, true, true, false]);
    assert_eq!(lists[3].options, vec!["Plant A"]);
}

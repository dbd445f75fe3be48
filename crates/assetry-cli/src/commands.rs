//! `options`, `resolve`, and `master` commands.
//!
//! Each command returns a JSON document; printing is left to the caller.

use serde_json::{Map, Value, json};

use assetry_client::MastersBackend;
use assetry_core::{AssetLevel, Level, LocationLevel};
use assetry_picker::{AssetSource, HierarchySource, LocationSource, Picker};

use crate::cli::{Hierarchy, ResolveTarget, split_path};
use crate::error::{Error, Result};

/// Options for every level under the `a/b/c` path.
pub async fn options<B: MastersBackend>(
    backend: B,
    hierarchy: Hierarchy,
    path: &str,
) -> Result<Value> {
    let values = split_path(path);
    let report = match hierarchy {
        Hierarchy::Asset => {
            option_report::<AssetLevel, _>(AssetSource::new(backend), &values).await
        }
        Hierarchy::Location => {
            option_report::<LocationLevel, _>(LocationSource::new(backend), &values).await
        }
    };
    Ok(report)
}

/// The identifier for a complete path.
///
/// When no identifier comes back and `require_identifier` is set the
/// command fails; otherwise `identifier` is `null`.
pub async fn resolve<B: MastersBackend>(
    backend: B,
    target: &ResolveTarget,
    require_identifier: bool,
) -> Result<Value> {
    match target {
        ResolveTarget::Asset(args) => {
            resolve_path::<AssetLevel, _>(
                AssetSource::new(backend),
                &args.values(),
                require_identifier,
            )
            .await
        }
        ResolveTarget::Location(args) => {
            resolve_path::<LocationLevel, _>(
                LocationSource::new(backend),
                &args.values(),
                require_identifier,
            )
            .await
        }
    }
}

/// One stored master record.
pub async fn master<B: MastersBackend>(backend: B, hierarchy: Hierarchy, id: &str) -> Result<Value> {
    let record = match hierarchy {
        Hierarchy::Asset => serde_json::to_value(backend.asset_master(id).await?)?,
        Hierarchy::Location => serde_json::to_value(backend.location_master(id).await?)?,
    };
    Ok(record)
}

async fn option_report<L, S>(source: S, values: &[&str]) -> Value
where
    L: Level,
    S: HierarchySource<L>,
{
    let mut picker: Picker<L, S> = Picker::open(source).await;
    picker.prefill(values.iter().copied(), None);

    let levels: Vec<Value> = picker
        .option_lists()
        .into_iter()
        .map(|list| {
            json!({
                "level": list.level.label(),
                "field": list.level.field(),
                "selected": picker.path().value(list.level),
                "reachable": list.reachable,
                "options": list.options,
            })
        })
        .collect();

    json!({
        "hierarchy": L::HIERARCHY,
        "dropdowns": picker.load_state().to_string(),
        "levels": levels,
    })
}

async fn resolve_path<L, S>(source: S, values: &[&str], require_identifier: bool) -> Result<Value>
where
    L: Level,
    S: HierarchySource<L>,
{
    let mut picker: Picker<L, S> = Picker::open(source).await;
    picker.prefill(values.iter().copied(), None);
    let applied = picker.resolve_pending().await;
    tracing::debug!(hierarchy = L::HIERARCHY, ?applied, "resolved {}", picker.path());

    let mut fields = Map::new();
    let mut freeform = Vec::new();
    for (level, value) in picker.path().iter() {
        let text = value.map(|v| v.as_str().to_string());
        if value.is_some_and(|v| !v.is_suggested()) {
            freeform.push(level.field());
        }
        fields.insert(level.field().to_string(), json!(text));
    }

    let identifier = match picker.identifier() {
        Some(identifier) => json!(identifier),
        None if require_identifier => {
            return Err(Error::Unresolved {
                hierarchy: L::HIERARCHY,
                path: picker.path().to_string(),
                reason: unresolved_reason(&picker),
            });
        }
        None => Value::Null,
    };

    Ok(json!({
        "hierarchy": L::HIERARCHY,
        "path": fields,
        "freeform": freeform,
        "identifier": identifier,
    }))
}

fn unresolved_reason<L, S>(picker: &Picker<L, S>) -> String
where
    L: Level,
    S: HierarchySource<L> + ?Sized,
{
    if let Some(level) = picker.path().first_missing() {
        return format!("'{}' is empty", level.label());
    }
    picker
        .machine()
        .last_failure()
        .unwrap_or("no identifier was returned")
        .to_string()
}

//! Common test utilities and harness for picker integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use assetry_client::{
    AssetDropdowns, AssetMaster, ClientError, GenerateModelIdRequest, LocationDropdowns,
    LocationMaster, LocationOption, MasterQuery, MastersBackend, ModelDetail,
};
use assetry_core::{AssetLevel, CompositeKey, LocationLevel};
use assetry_picker::{AssetSource, LocationSource, Picker};
use async_trait::async_trait;
use tokio::sync::Notify;

/// The classification path of scenario 1.
pub const SUNGROW_PATH: [&str; 6] = [
    "Electrical",
    "Inverter",
    "String",
    "3-Phase",
    "Sungrow",
    "SG110CX",
];

/// Identifier the fake backend mints for [`SUNGROW_PATH`].
pub const SUNGROW_ID: &str = "ELEC-INV-STR-3PH-SUNGROW-SG110CX-001";

pub type AssetPicker = Picker<AssetLevel, AssetSource<Arc<FakeBackend>>>;
pub type LocationPicker = Picker<LocationLevel, LocationSource<Arc<FakeBackend>>>;

/// Open an asset picker session on `backend`.
pub async fn asset_picker(backend: &Arc<FakeBackend>) -> AssetPicker {
    Picker::open(AssetSource::new(Arc::clone(backend))).await
}

/// Open a location picker session on `backend`.
pub async fn location_picker(backend: &Arc<FakeBackend>) -> LocationPicker {
    Picker::open(LocationSource::new(Arc::clone(backend))).await
}

/// Select `values` level by level from the root, resolving at the leaf.
pub async fn select_all<L, S>(picker: &mut Picker<L, S>, values: &[&str])
where
    L: assetry_core::Level,
    S: assetry_picker::HierarchySource<L>,
{
    for (level, value) in L::ALL.iter().zip(values) {
        picker.select(*level, value).await.unwrap();
    }
}

/// In-memory masters backend with call counters.
///
/// Generated identifiers are written back into `model_details`, so a later
/// dropdown fetch sees them the way the real service would.
#[derive(Default)]
pub struct FakeBackend {
    assets: Mutex<AssetDropdowns>,
    locations: Mutex<LocationDropdowns>,
    asset_masters: Mutex<HashMap<String, AssetMaster>>,
    location_masters: Mutex<HashMap<String, LocationMaster>>,
    serials: Mutex<HashMap<String, usize>>,
    generate_gate: Mutex<Option<Arc<Notify>>>,
    fail_dropdowns: AtomicBool,
    fail_generate: AtomicBool,
    dropdown_calls: AtomicUsize,
    generate_calls: AtomicUsize,
    write_calls: AtomicUsize,
}

impl FakeBackend {
    /// A backend serving the solar catalogue below.
    pub fn new() -> Arc<Self> {
        let backend = Self::default();
        *backend.assets.lock().unwrap() = asset_catalogue();
        *backend.locations.lock().unwrap() = location_catalogue();
        Arc::new(backend)
    }

    /// Make dropdown fetches fail with HTTP 500 until switched back off.
    pub fn fail_dropdowns(&self, fail: bool) {
        self.fail_dropdowns.store(fail, Ordering::SeqCst);
    }

    /// Make generate calls fail with HTTP 503 until switched back off.
    pub fn fail_generate(&self, fail: bool) {
        self.fail_generate.store(fail, Ordering::SeqCst);
    }

    /// Hold generate calls until the returned notify fires.
    pub fn gate_generate(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.generate_gate.lock().unwrap() = Some(Arc::clone(&notify));
        notify
    }

    /// Store an asset master.
    pub fn insert_asset_master(&self, master: AssetMaster) {
        self.asset_masters
            .lock()
            .unwrap()
            .insert(master.model_id.clone(), master);
    }

    /// Store a location master.
    pub fn insert_location_master(&self, master: LocationMaster) {
        self.location_masters
            .lock()
            .unwrap()
            .insert(master.location_id.clone(), master);
    }

    /// A stored asset master.
    pub fn stored_asset(&self, model_id: &str) -> Option<AssetMaster> {
        self.asset_masters.lock().unwrap().get(model_id).cloned()
    }

    /// A stored location master.
    pub fn stored_location(&self, location_id: &str) -> Option<LocationMaster> {
        self.location_masters
            .lock()
            .unwrap()
            .get(location_id)
            .cloned()
    }

    pub fn dropdown_calls(&self) -> usize {
        self.dropdown_calls.load(Ordering::SeqCst)
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    fn dropdown_failure(&self, endpoint: &str) -> Option<ClientError> {
        self.fail_dropdowns
            .load(Ordering::SeqCst)
            .then(|| ClientError::Status {
                endpoint: endpoint.into(),
                status: 500,
                body: "internal error".into(),
            })
    }

    fn mint(&self, request: &GenerateModelIdRequest) -> String {
        let group = format!("{}|{}", request.make, request.model);
        let mut serials = self.serials.lock().unwrap();
        let serial = serials.entry(group).or_insert(0);
        *serial += 1;
        format!(
            "{}-{}-{}-{}-{}-{}-{:03}",
            abbrev(&request.category, 4),
            abbrev(&request.sub_category, 3),
            abbrev(&request.asset_group, 3),
            abbrev(&request.asset_type, 3),
            abbrev(&request.make, usize::MAX),
            abbrev(&request.model, usize::MAX),
            serial
        )
    }
}

fn abbrev(value: &str, len: usize) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(len)
        .collect::<String>()
        .to_uppercase()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn map(entries: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(key, values)| (key.to_string(), strings(values)))
        .collect()
}

/// Solar equipment classification. `LG Energy|RESU10H` was retired from
/// the model list; `Huawei|SUN2000` already has a master.
pub fn asset_catalogue() -> AssetDropdowns {
    AssetDropdowns {
        categories: strings(&["Electrical", "Civil"]),
        sub_categories: map(&[
            ("Electrical", &["Inverter", "Battery"]),
            ("Civil", &["Mounting"]),
        ]),
        asset_groups: map(&[
            ("Electrical|Inverter", &["String", "Central"]),
            ("Electrical|Battery", &["Lithium"]),
            ("Civil|Mounting", &["Rooftop"]),
        ]),
        asset_types: map(&[
            ("String", &["3-Phase", "1-Phase"]),
            ("Central", &["MV Skid"]),
            ("Lithium", &["Rack"]),
        ]),
        makes: map(&[
            ("3-Phase", &["Sungrow", "Huawei"]),
            ("Rack", &["LG Energy"]),
        ]),
        models: map(&[
            ("Sungrow", &["SG110CX", "SG250HX"]),
            ("Huawei", &["SUN2000"]),
            ("LG Energy", &["RESU16H Prime"]),
        ]),
        model_details: [(
            "Huawei|SUN2000".to_string(),
            ModelDetail {
                model_id: "ELEC-INV-STR-3PH-HUAWEI-SUN2000-001".into(),
            },
        )]
        .into_iter()
        .collect(),
    }
}

/// Two named sites under Plant A in Surat.
pub fn location_catalogue() -> LocationDropdowns {
    LocationDropdowns {
        countries: strings(&["India"]),
        states: map(&[("India", &["Gujarat", "Rajasthan"])]),
        cities: map(&[("India|Gujarat", &["Surat", "Ahmedabad"])]),
        units: map(&[("India|Gujarat|Surat", &["Plant A"])]),
        names: [(
            "India|Gujarat|Surat|Plant A".to_string(),
            vec![
                LocationOption {
                    name: "Rooftop 1".into(),
                    id: "LOC-0001".into(),
                },
                LocationOption {
                    name: "Ground Mount".into(),
                    id: "LOC-0002".into(),
                },
            ],
        )]
        .into_iter()
        .collect(),
    }
}

#[async_trait]
impl MastersBackend for FakeBackend {
    async fn asset_dropdowns(&self) -> assetry_client::Result<AssetDropdowns> {
        self.dropdown_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.dropdown_failure("/masters/dropdowns/assets") {
            return Err(err);
        }
        Ok(self.assets.lock().unwrap().clone())
    }

    async fn location_dropdowns(&self) -> assetry_client::Result<LocationDropdowns> {
        self.dropdown_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.dropdown_failure("/masters/dropdowns/locations") {
            return Err(err);
        }
        Ok(self.locations.lock().unwrap().clone())
    }

    async fn generate_model_id(
        &self,
        request: &GenerateModelIdRequest,
    ) -> assetry_client::Result<String> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.generate_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.fail_generate.load(Ordering::SeqCst) {
            return Err(ClientError::Status {
                endpoint: "/masters/asset-masters/generate-id".into(),
                status: 503,
                body: String::new(),
            });
        }

        let id = self.mint(request);
        let key = CompositeKey::from_parts([request.make.as_str(), request.model.as_str()]);
        self.assets.lock().unwrap().model_details.insert(
            key.to_string(),
            ModelDetail {
                model_id: id.clone(),
            },
        );
        Ok(id)
    }

    async fn list_asset_masters(
        &self,
        query: &MasterQuery,
    ) -> assetry_client::Result<Vec<AssetMaster>> {
        let masters = self.asset_masters.lock().unwrap();
        Ok(masters
            .values()
            .filter(|m| {
                query
                    .search
                    .as_deref()
                    .is_none_or(|term| m.make.contains(term) || m.model.contains(term))
            })
            .cloned()
            .collect())
    }

    async fn asset_master(&self, model_id: &str) -> assetry_client::Result<AssetMaster> {
        self.stored_asset(model_id)
            .ok_or_else(|| ClientError::NotFound {
                resource: format!("/masters/asset-masters/{model_id}"),
            })
    }

    async fn create_asset_master(
        &self,
        master: &AssetMaster,
    ) -> assetry_client::Result<AssetMaster> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.insert_asset_master(master.clone());
        Ok(master.clone())
    }

    async fn update_asset_master(
        &self,
        model_id: &str,
        master: &AssetMaster,
    ) -> assetry_client::Result<AssetMaster> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.asset_masters
            .lock()
            .unwrap()
            .insert(model_id.to_string(), master.clone());
        Ok(master.clone())
    }

    async fn list_location_masters(
        &self,
        _query: &MasterQuery,
    ) -> assetry_client::Result<Vec<LocationMaster>> {
        Ok(self
            .location_masters
            .lock()
            .unwrap()
            .values()
            .cloned()
            .collect())
    }

    async fn location_master(&self, location_id: &str) -> assetry_client::Result<LocationMaster> {
        self.stored_location(location_id)
            .ok_or_else(|| ClientError::NotFound {
                resource: format!("/masters/location-masters/{location_id}"),
            })
    }

    async fn create_location_master(
        &self,
        master: &LocationMaster,
    ) -> assetry_client::Result<LocationMaster> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.insert_location_master(master.clone());
        Ok(master.clone())
    }

    async fn update_location_master(
        &self,
        location_id: &str,
        master: &LocationMaster,
    ) -> assetry_client::Result<LocationMaster> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.location_masters
            .lock()
            .unwrap()
            .insert(location_id.to_string(), master.clone());
        Ok(master.clone())
    }
}

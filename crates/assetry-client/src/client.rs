//! reqwest implementation of [`MastersBackend`].

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::backend::MastersBackend;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::types::{
    AssetDropdowns, AssetMaster, GenerateModelIdRequest, GenerateModelIdResponse,
    LocationDropdowns, LocationMaster, MasterQuery,
};

/// Longest error body kept in [`ClientError::Status`].
const MAX_ERROR_BODY: usize = 512;

const ASSET_DROPDOWNS: &[&str] = &["masters", "dropdowns", "assets"];
const LOCATION_DROPDOWNS: &[&str] = &["masters", "dropdowns", "locations"];
const GENERATE_MODEL_ID: &[&str] = &["masters", "asset-masters", "generate-id"];
const ASSET_MASTERS: &str = "asset-masters";
const LOCATION_MASTERS: &str = "location-masters";

/// HTTP client for the masters API.
#[derive(Clone)]
pub struct MastersClient {
    http: reqwest::Client,
    base: Url,
    token: Option<String>,
}

impl MastersClient {
    /// Build a client from its configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            ClientError::config(format!("invalid base URL '{}': {e}", config.base_url))
        })?;
        if base.cannot_be_a_base() {
            return Err(ClientError::config(format!(
                "base URL '{}' cannot carry a path",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base,
            token: config.token,
        })
    }

    /// The API root every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ClientError::config("base URL cannot carry a path"))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        log::debug!("{method} {url}");
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder, endpoint: &str) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            log::warn!("{endpoint} rejected the session token");
            return Err(ClientError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                resource: endpoint.to_string(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        let endpoint = url.path().to_string();
        self.send(self.request(Method::GET, url), &endpoint).await
    }

    async fn list<T: DeserializeOwned>(&self, collection: &str, query: &MasterQuery) -> Result<T> {
        let url = self.endpoint(&["masters", collection])?;
        let endpoint = url.path().to_string();
        let builder = self.request(Method::GET, url).query(query);
        self.send(builder, &endpoint).await
    }

    async fn write<B, T>(&self, method: Method, segments: &[&str], body: &B) -> Result<T>
    where
        B: serde::Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let endpoint = url.path().to_string();
        let builder = self.request(method, url).json(body);
        self.send(builder, &endpoint).await
    }
}

impl std::fmt::Debug for MastersClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MastersClient")
            .field("base", &self.base.as_str())
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

#[async_trait]
impl MastersBackend for MastersClient {
    async fn asset_dropdowns(&self) -> Result<AssetDropdowns> {
        self.get(ASSET_DROPDOWNS).await
    }

    async fn location_dropdowns(&self) -> Result<LocationDropdowns> {
        self.get(LOCATION_DROPDOWNS).await
    }

    async fn generate_model_id(&self, request: &GenerateModelIdRequest) -> Result<String> {
        let response: GenerateModelIdResponse = self
            .write(Method::POST, GENERATE_MODEL_ID, request)
            .await?;
        match response.model_id {
            Some(id) if !id.is_empty() => {
                log::info!("Generated model id {id} for {} {}", request.make, request.model);
                Ok(id)
            }
            _ => Err(ClientError::MissingField {
                endpoint: GENERATE_MODEL_ID.join("/"),
                field: "model_id",
            }),
        }
    }

    async fn list_asset_masters(&self, query: &MasterQuery) -> Result<Vec<AssetMaster>> {
        self.list(ASSET_MASTERS, query).await
    }

    async fn asset_master(&self, model_id: &str) -> Result<AssetMaster> {
        self.get(&["masters", ASSET_MASTERS, model_id]).await
    }

    async fn create_asset_master(&self, master: &AssetMaster) -> Result<AssetMaster> {
        self.write(Method::POST, &["masters", ASSET_MASTERS], master)
            .await
    }

    async fn update_asset_master(
        &self,
        model_id: &str,
        master: &AssetMaster,
    ) -> Result<AssetMaster> {
        self.write(Method::PUT, &["masters", ASSET_MASTERS, model_id], master)
            .await
    }

    async fn list_location_masters(&self, query: &MasterQuery) -> Result<Vec<LocationMaster>> {
        self.list(LOCATION_MASTERS, query).await
    }

    async fn location_master(&self, location_id: &str) -> Result<LocationMaster> {
        self.get(&["masters", LOCATION_MASTERS, location_id]).await
    }

    async fn create_location_master(&self, master: &LocationMaster) -> Result<LocationMaster> {
        self.write(Method::POST, &["masters", LOCATION_MASTERS], master)
            .await
    }

    async fn update_location_master(
        &self,
        location_id: &str,
        master: &LocationMaster,
    ) -> Result<LocationMaster> {
        self.write(
            Method::PUT,
            &["masters", LOCATION_MASTERS, location_id],
            master,
        )
        .await
    }
}

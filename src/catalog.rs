use crate::config::ApiConfig;
use crate::error::NetworkError;
use crate::model::{DetailRecord, MoleculeDetail, MoleculeId, MoleculeListing, MoleculeSummary, StructurePayload};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/api";

/// Read-only access to the molecule catalog. Every call goes to the source;
/// nothing is cached and nothing is retried.
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    /// `GET /molecules`, in the order the server returns it.
    async fn fetch_summary_list(&self) -> Result<Vec<MoleculeListing>, NetworkError>;

    /// `GET /molecules/chart`
    async fn fetch_chart_data(&self) -> Result<Vec<MoleculeSummary>, NetworkError>;

    /// `GET /molecule/{id}`
    async fn fetch_structure(&self, id: MoleculeId) -> Result<StructurePayload, NetworkError>;

    /// `GET /molecule/{id}/details`
    async fn fetch_detail(&self, id: MoleculeId) -> Result<MoleculeDetail, NetworkError>;
}

#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(api: &ApiConfig) -> Result<Self, NetworkError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = api.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|source| NetworkError::Transport {
            url: api.base_url.clone(),
            source,
        })?;
        Ok(Self {
            client,
            base_url: api.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn get_text(&self, path: &str) -> Result<(String, String), NetworkError> {
        let url = self.url(path);
        debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| NetworkError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| NetworkError::Transport {
                url: url.clone(),
                source,
            })?;
        Ok((url, body))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, NetworkError> {
        let (url, body) = self.get_text(path).await?;
        serde_json::from_str(&body).map_err(|e| NetworkError::Decode {
            url,
            message: e.to_string(),
        })
    }
}

impl CatalogSource for HttpCatalog {
    async fn fetch_summary_list(&self) -> Result<Vec<MoleculeListing>, NetworkError> {
        self.get_json("molecules").await
    }

    async fn fetch_chart_data(&self) -> Result<Vec<MoleculeSummary>, NetworkError> {
        self.get_json("molecules/chart").await
    }

    async fn fetch_structure(&self, id: MoleculeId) -> Result<StructurePayload, NetworkError> {
        let (_, body) = self.get_text(&format!("molecule/{id}")).await?;
        Ok(StructurePayload::new(body))
    }

    async fn fetch_detail(&self, id: MoleculeId) -> Result<MoleculeDetail, NetworkError> {
        let record: DetailRecord = self.get_json(&format!("molecule/{id}/details")).await?;
        Ok(MoleculeDetail::from_record(id, record))
    }
}

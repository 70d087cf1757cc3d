use crate::api::{Api, ApiRequest, Context, TransportError};
use crate::models::{DeploymentsSearchResponse, SearchRequest};
use reqwest::Method;

pub const SEARCH_DEPLOYMENTS_PATH: &str = "/deployments/_search";
pub const MINIMAL_METADATA_PARAM: &str = "minimal_metadata";

/// Parameters of `POST /deployments/_search`.
#[derive(Debug, Clone, Default)]
pub struct SearchDeploymentsParams {
    pub body: Option<SearchRequest>,
    /// Comma-separated metadata fields to keep in the response.
    pub minimal_metadata: Option<String>,
    pub context: Context,
}

impl SearchDeploymentsParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, body: SearchRequest) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    pub fn set_minimal_metadata(&mut self, fields: String) {
        self.minimal_metadata = Some(fields);
    }

    pub fn into_request(self) -> Result<ApiRequest, TransportError> {
        let mut request = ApiRequest::new(Method::POST, SEARCH_DEPLOYMENTS_PATH)
            .with_context(self.context);

        if let Some(body) = &self.body {
            request = request.with_body(body)?;
        }
        if let Some(fields) = self.minimal_metadata {
            request = request.with_query(MINIMAL_METADATA_PARAM, fields);
        }

        Ok(request)
    }
}

/// Deployments endpoints of an [`Api`].
pub struct Deployments<'a> {
    api: &'a Api,
}

impl<'a> Deployments<'a> {
    pub fn new(api: &'a Api) -> Self {
        Self { api }
    }

    pub async fn search_deployments(
        &self,
        params: SearchDeploymentsParams,
    ) -> Result<DeploymentsSearchResponse, TransportError> {
        let payload = self.api.send(params.into_request()?).await?;
        Ok(serde_json::from_value(payload)?)
    }
}

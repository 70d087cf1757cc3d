use crate::api::{Api, Context};
use crate::apierror::{self, MissingApi};
use crate::client::deployments::SearchDeploymentsParams;
use crate::error::Error;
use crate::models::{DeploymentsSearchResponse, SearchRequest};
use crate::multierror::Prefixed;

/// Parameters consumed by [`search`].
#[derive(Debug, Clone, Default)]
pub struct SearchParams<'a> {
    pub api: Option<&'a Api>,
    pub context: Context,
    pub request: Option<SearchRequest>,
    /// Metadata fields to keep in the response. Empty sends no directive.
    pub minimal_metadata: Vec<String>,
}

impl<'a> SearchParams<'a> {
    /// Ensures the parameters are usable by [`search`].
    pub fn validate(&self) -> Result<(), Prefixed> {
        self.validated().map(|_| ())
    }

    fn validated(&self) -> Result<(&'a Api, &SearchRequest), Prefixed> {
        let mut merr = Prefixed::new("deployment search");
        if self.api.is_none() {
            merr.push(MissingApi);
        }
        if self.request.is_none() {
            merr.push("request cannot be empty");
        }

        match (self.api, &self.request) {
            (Some(api), Some(request)) => Ok((api, request)),
            _ => Err(merr),
        }
    }
}

/// Searches deployments with the parameters' request.
pub async fn search(params: &SearchParams<'_>) -> Result<DeploymentsSearchResponse, Error> {
    let (api, request) = params.validated()?;

    let mut request_params = SearchDeploymentsParams::new()
        .with_body(request.clone())
        .with_context(params.context.clone());

    if !params.minimal_metadata.is_empty() {
        request_params.set_minimal_metadata(params.minimal_metadata.join(","));
    }

    let res = api
        .deployments()
        .search_deployments(request_params)
        .await
        .map_err(apierror::wrap)?;

    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiKey, ApiRequest, AuthWriter, Transport, TransportError};
    use crate::client::deployments::MINIMAL_METADATA_PARAM;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    /// Records every request and answers with a canned result, honouring the request context.
    struct RecordingTransport {
        requests: Mutex<Vec<ApiRequest>>,
        reply: fn() -> Result<Value, TransportError>,
    }

    impl RecordingTransport {
        fn new(reply: fn() -> Result<Value, TransportError>) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                reply,
            })
        }

        fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(
            &self,
            request: ApiRequest,
            _auth: &dyn AuthWriter,
        ) -> Result<Value, TransportError> {
            let context = request.context.clone();
            self.requests.lock().unwrap().push(request);
            context.run(async { (self.reply)() }).await?
        }
    }

    fn payload() -> Value {
        json!({
            "deployments": [{
                "id": "3531aaf988594efa87c1aabb7caed337",
                "name": "search-prod",
                "healthy": true,
                "resources": {"elasticsearch": [{"ref_id": "main-elasticsearch"}]},
                "metadata": {"owner_id": "1234", "system_owned": false}
            }],
            "match_count": 1,
            "return_count": 1
        })
    }

    fn ok_reply() -> Result<Value, TransportError> {
        Ok(payload())
    }

    fn not_found_reply() -> Result<Value, TransportError> {
        Err(TransportError::Status {
            status: 404,
            body: r#"{"errors":[{"code":"root.resource_not_found","message":"not found"}]}"#
                .to_string(),
        })
    }

    fn api_with(transport: Arc<RecordingTransport>) -> Api {
        Api::with_transport(transport, Arc::new(ApiKey::new("test-key").unwrap()))
    }

    #[test]
    fn validate_reports_missing_api() {
        let params = SearchParams {
            request: Some(SearchRequest::match_all()),
            ..Default::default()
        };

        let err = params.validate().unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err.to_string().starts_with("deployment search: "));
        assert!(err
            .to_string()
            .contains("api reference is required for the operation"));
    }

    #[test]
    fn validate_reports_missing_request() {
        let api = api_with(RecordingTransport::new(ok_reply));
        let params = SearchParams {
            api: Some(&api),
            ..Default::default()
        };

        let err = params.validate().unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err.to_string().contains("request cannot be empty"));
    }

    #[test]
    fn validate_reports_every_missing_field() {
        let err = SearchParams::default().validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "deployment search: 2 errors occurred:\n\
             \t* api reference is required for the operation\n\
             \t* request cannot be empty\n\n"
        );
    }

    #[test]
    fn validate_accepts_complete_params() {
        let api = api_with(RecordingTransport::new(ok_reply));
        let params = SearchParams {
            api: Some(&api),
            request: Some(SearchRequest::match_all()),
            ..Default::default()
        };

        assert!(params.validate().is_ok());
    }

    #[tokio::test]
    async fn invalid_params_never_reach_the_transport() {
        let transport = RecordingTransport::new(ok_reply);
        let api = api_with(transport.clone());
        let params = SearchParams {
            api: Some(&api),
            ..Default::default()
        };

        let err = search(&params).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn empty_metadata_list_sends_no_directive() {
        let transport = RecordingTransport::new(ok_reply);
        let api = api_with(transport.clone());
        let params = SearchParams {
            api: Some(&api),
            request: Some(SearchRequest::match_all()),
            minimal_metadata: Vec::new(),
            ..Default::default()
        };

        search(&params).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query_param(MINIMAL_METADATA_PARAM), None);
        assert!(requests[0].query.is_empty());
    }

    #[tokio::test]
    async fn metadata_list_is_comma_joined() {
        let transport = RecordingTransport::new(ok_reply);
        let api = api_with(transport.clone());
        let params = SearchParams {
            api: Some(&api),
            request: Some(SearchRequest::match_all()),
            minimal_metadata: vec!["a".into(), "b".into(), "c".into()],
            ..Default::default()
        };

        search(&params).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].query_param(MINIMAL_METADATA_PARAM), Some("a,b,c"));
    }

    #[tokio::test]
    async fn request_body_is_sent_as_given() {
        let transport = RecordingTransport::new(ok_reply);
        let api = api_with(transport.clone());
        let body = SearchRequest::query_string("name:search-prod").with_size(50);
        let params = SearchParams {
            api: Some(&api),
            request: Some(body.clone()),
            ..Default::default()
        };

        search(&params).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].path, "/deployments/_search");
        assert_eq!(requests[0].body, Some(serde_json::to_value(&body).unwrap()));
    }

    #[tokio::test]
    async fn successful_payload_is_returned_unmodified() {
        let api = api_with(RecordingTransport::new(ok_reply));
        let params = SearchParams {
            api: Some(&api),
            request: Some(SearchRequest::match_all()),
            ..Default::default()
        };

        let res = search(&params).await.unwrap();

        let expected: DeploymentsSearchResponse = serde_json::from_value(payload()).unwrap();
        assert_eq!(res, expected);
        assert_eq!(serde_json::to_value(&res).unwrap(), payload());
    }

    #[tokio::test]
    async fn transport_failures_are_wrapped() {
        let api = api_with(RecordingTransport::new(not_found_reply));
        let params = SearchParams {
            api: Some(&api),
            request: Some(SearchRequest::match_all()),
            ..Default::default()
        };

        match search(&params).await {
            Err(Error::Api(err)) => {
                assert_eq!(err.status(), Some(404));
                assert!(err.has_code("root.resource_not_found"));
            }
            other => panic!("expected an api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn undecodable_payload_is_an_api_error() {
        fn garbage() -> Result<Value, TransportError> {
            Ok(json!({"deployments": "not-a-list"}))
        }

        let api = api_with(RecordingTransport::new(garbage));
        let params = SearchParams {
            api: Some(&api),
            request: Some(SearchRequest::match_all()),
            ..Default::default()
        };

        let err = search(&params).await.unwrap_err();
        assert!(matches!(err, Error::Api(_)));
    }

    #[tokio::test]
    async fn repeated_calls_are_independent() {
        let transport = RecordingTransport::new(ok_reply);
        let api = api_with(transport.clone());
        let params = SearchParams {
            api: Some(&api),
            request: Some(SearchRequest::match_all()),
            minimal_metadata: vec!["id".into(), "name".into()],
            ..Default::default()
        };

        let first = search(&params).await.unwrap();
        let second = search(&params).await.unwrap();
        assert_eq!(first, second);

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].path, requests[1].path);
        assert_eq!(requests[0].query, requests[1].query);
        assert_eq!(requests[0].body, requests[1].body);
    }

    #[tokio::test]
    async fn cancelled_context_aborts_the_call() {
        let transport = RecordingTransport::new(ok_reply);
        let api = api_with(transport.clone());
        let (context, handle) = Context::background().with_cancel();
        handle.cancel();

        let params = SearchParams {
            api: Some(&api),
            context,
            request: Some(SearchRequest::match_all()),
            ..Default::default()
        };

        match search(&params).await {
            Err(Error::Api(err)) => {
                assert!(matches!(err.transport(), TransportError::Cancelled));
                assert_eq!(err.to_string(), "operation cancelled");
            }
            other => panic!("expected a cancellation, got {:?}", other),
        }

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].context.is_cancelled());
    }
}

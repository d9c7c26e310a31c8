//! GraphQL HTTP client.

use std::fmt;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, trace};

use talawa_core::error::{Error, InvalidInputError, ProtocolError, QueryError, TransportError};
use talawa_core::types::ApiUrl;

use crate::queries::{GraphqlRequest, GraphqlResponse};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

fn map_reqwest(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

/// HTTP client for one GraphQL endpoint.
#[derive(Clone)]
pub struct GraphqlClient {
    client: reqwest::Client,
    endpoint: ApiUrl,
    headers: HeaderMap,
}

impl GraphqlClient {
    /// Create a client for `endpoint` with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a network URL or the HTTP
    /// client cannot be built.
    pub fn new(endpoint: ApiUrl) -> Result<Self, Error> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    /// Create a client for `endpoint` with a per-request timeout.
    pub fn with_timeout(endpoint: ApiUrl, timeout: Duration) -> Result<Self, Error> {
        if !endpoint.is_network() {
            return Err(InvalidInputError::ApiUrl {
                value: endpoint.to_string(),
                reason: "GraphQL endpoint must be http:// or https://".to_string(),
            }
            .into());
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("talawa/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(map_reqwest)?;

        Ok(Self {
            client,
            endpoint,
            headers: HeaderMap::new(),
        })
    }

    /// Send `token` as a bearer token with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the token contains characters that cannot appear
    /// in an HTTP header.
    pub fn with_token(mut self, token: &str) -> Result<Self, Error> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            InvalidInputError::Other {
                message: "token contains invalid header characters".to_string(),
            }
        })?;
        value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, value);
        Ok(self)
    }

    /// Returns the endpoint this client posts to.
    pub fn endpoint(&self) -> &ApiUrl {
        &self.endpoint
    }

    /// Run a query and return its `data` object.
    #[instrument(skip(self, document, variables), fields(endpoint = %self.endpoint))]
    pub async fn query<V, D>(
        &self,
        operation: &str,
        document: &str,
        variables: &V,
    ) -> Result<D, Error>
    where
        V: Serialize + fmt::Debug,
        D: DeserializeOwned,
    {
        debug!(operation, "GraphQL query");
        trace!(?variables, "query variables");

        let request = GraphqlRequest {
            operation_name: operation,
            query: document,
            variables,
        };

        let response = self
            .client
            .post(self.endpoint.as_str())
            .headers(self.headers.clone())
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest)?;

        let status = response.status();
        trace!(status = %status, "GraphQL response");

        if !status.is_success() {
            return Err(Self::parse_error_response(response).await.into());
        }

        let body: GraphqlResponse<D> = response.json().await.map_err(map_reqwest)?;
        body.into_data()
    }

    /// Build a protocol error from a non-success response, keeping the first
    /// GraphQL error message if the body carries one.
    async fn parse_error_response(response: reqwest::Response) -> ProtocolError {
        let status = response.status().as_u16();

        match response.json::<GraphqlResponse<serde_json::Value>>().await {
            Ok(body) => ProtocolError::new(status, body.first_message()),
            Err(_) => ProtocolError::new(status, None),
        }
    }
}

impl<D> GraphqlResponse<D> {
    fn first_message(&self) -> Option<String> {
        self.errors
            .as_ref()
            .and_then(|errors| errors.first())
            .map(|e| e.message.clone())
    }

    fn into_data(self) -> Result<D, Error> {
        if let Some(errors) = self.errors
            && !errors.is_empty()
        {
            return Err(QueryError::Graphql {
                messages: errors.into_iter().map(|e| e.message).collect(),
            }
            .into());
        }

        self.data.ok_or_else(|| {
            QueryError::Malformed {
                message: "response has neither data nor errors".to_string(),
            }
            .into()
        })
    }
}

impl fmt::Debug for GraphqlClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphqlClient")
            .field("endpoint", &self.endpoint)
            .field("authorized", &self.headers.contains_key(AUTHORIZATION))
            .finish()
    }
}

//! Octocrab implementation of the pull request gateway over GraphQL.

use async_trait::async_trait;
use http::Uri;
use octocrab::Octocrab;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::github::error::ScanError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};
use crate::github::models::{ApiPullRequest, ApiRateLimit, FileChange, PullRequestSummary};
use crate::github::pagination::{Page, PageCursor, PageInfo, PageSize};

use super::PullRequestGateway;
use super::client::build_octocrab_client;
use super::error_mapping::{
    GraphQlErrorDetail, map_graphql_errors, map_http_error, map_octocrab_error,
};
use super::http_utils::extract_github_message;
use super::queries::{
    CHANGED_FILES_QUERY, ChangedFilesVariables, GraphQlRequest, PULL_REQUESTS_QUERY,
    PullRequestsVariables,
};

/// Path of the GraphQL endpoint, relative to the API base.
const GRAPHQL_PATH: &str = "/graphql";

/// Octocrab-backed GraphQL gateway.
pub struct OctocrabGraphqlGateway {
    client: Octocrab,
}

impl OctocrabGraphqlGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and API base URL.
    ///
    /// Queries are posted to `{api_base}/graphql`.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::InvalidUrl` when the base URI cannot be parsed or
    /// `ScanError::Api` when Octocrab fails to construct a client.
    pub fn for_token(token: &PersonalAccessToken, api_base: &str) -> Result<Self, ScanError> {
        let octocrab = build_octocrab_client(token, api_base)?;
        Ok(Self::new(octocrab))
    }

    async fn execute<Data, Variables>(
        &self,
        operation: &str,
        request: &GraphQlRequest<'_, Variables>,
        repository: &RepositoryLocator,
    ) -> Result<Data, ScanError>
    where
        Data: DeserializeOwned,
        Variables: serde::Serialize + Sync,
    {
        let uri = GRAPHQL_PATH
            .parse::<Uri>()
            .map_err(|error| ScanError::InvalidUrl(format!("invalid GraphQL path: {error}")))?;
        let response = self
            .client
            ._post(uri, Some(request))
            .await
            .map_err(|error| map_octocrab_error(operation, &error))?;

        let status = response.status();
        if !status.is_success() {
            let body = self
                .client
                .body_to_string(response)
                .await
                .unwrap_or_else(|_| String::new());
            return Err(map_http_error(
                operation,
                status,
                extract_github_message(&body),
            ));
        }

        let text = self
            .client
            .body_to_string(response)
            .await
            .map_err(|error| map_octocrab_error(operation, &error))?;
        let parsed: GraphQlResponse<Data> =
            serde_json::from_str(&text).map_err(|error| ScanError::Api {
                message: format!("{operation} response deserialisation failed: {error}"),
            })?;

        if !parsed.errors.is_empty() {
            let details: Vec<GraphQlErrorDetail<'_>> = parsed
                .errors
                .iter()
                .map(|error| GraphQlErrorDetail {
                    error_type: error.error_type.as_deref(),
                    message: error.message.as_str(),
                })
                .collect();
            return Err(map_graphql_errors(
                &details,
                repository.owner().as_str(),
                repository.repository().as_str(),
            ));
        }

        parsed.data.ok_or_else(|| ScanError::GraphQl {
            message: format!("{operation} returned no data"),
        })
    }
}

#[async_trait]
impl PullRequestGateway for OctocrabGraphqlGateway {
    async fn pull_request_page(
        &self,
        repository: &RepositoryLocator,
        cursor: &PageCursor,
        page_size: PageSize,
    ) -> Result<Page<PullRequestSummary>, ScanError> {
        tracing::debug!(%repository, %cursor, "requesting pull request page");

        let request = GraphQlRequest {
            query: PULL_REQUESTS_QUERY,
            variables: PullRequestsVariables {
                owner: repository.owner().as_str(),
                name: repository.repository().as_str(),
                first: page_size.get(),
                after: cursor.as_variable(),
            },
        };

        let data: PullRequestsData = self
            .execute("list pull requests", &request, repository)
            .await?;

        let connection = data
            .repository
            .ok_or_else(|| not_found(repository))?
            .pull_requests;

        Ok(connection.into_page(data.rate_limit))
    }

    async fn changed_files_page(
        &self,
        repository: &RepositoryLocator,
        number: u64,
        cursor: &PageCursor,
        page_size: PageSize,
    ) -> Result<Page<FileChange>, ScanError> {
        tracing::debug!(%repository, number, %cursor, "requesting changed files page");

        let request = GraphQlRequest {
            query: CHANGED_FILES_QUERY,
            variables: ChangedFilesVariables {
                owner: repository.owner().as_str(),
                name: repository.repository().as_str(),
                number,
                first: page_size.get(),
                after: cursor.as_variable(),
            },
        };

        let data: FilesData = self
            .execute("list changed files", &request, repository)
            .await?;

        let files = data
            .repository
            .ok_or_else(|| not_found(repository))?
            .pull_request
            .and_then(|pull_request| pull_request.files);

        // A vanished pull request or a null file list reads as an empty final page.
        Ok(files.map_or_else(
            || Page {
                items: Vec::new(),
                page_info: PageInfo::last(),
                rate_limit: data.rate_limit.map(Into::into),
            },
            |connection| connection.into_page(data.rate_limit),
        ))
    }
}

fn not_found(repository: &RepositoryLocator) -> ScanError {
    ScanError::RepositoryNotFound {
        owner: repository.owner().as_str().to_owned(),
        name: repository.repository().as_str().to_owned(),
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<Data> {
    data: Option<Data>,
    #[serde(default)]
    errors: Vec<ApiGraphQlError>,
}

#[derive(Debug, Deserialize)]
struct ApiGraphQlError {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestsData {
    repository: Option<PullRequestsRepository>,
    rate_limit: Option<ApiRateLimit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestsRepository {
    pull_requests: ApiConnection<ApiPullRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilesData {
    repository: Option<FilesRepository>,
    rate_limit: Option<ApiRateLimit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilesRepository {
    pull_request: Option<FilesPullRequest>,
}

#[derive(Debug, Deserialize)]
struct FilesPullRequest {
    files: Option<ApiConnection<FileChange>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiConnection<Node> {
    #[serde(default = "Vec::new")]
    edges: Vec<ApiEdge<Node>>,
    page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
struct ApiEdge<Node> {
    node: Option<Node>,
}

impl<Node> ApiConnection<Node> {
    fn into_page<Item>(self, rate_limit: Option<ApiRateLimit>) -> Page<Item>
    where
        Item: From<Node>,
    {
        Page {
            items: self
                .edges
                .into_iter()
                .filter_map(|edge| edge.node)
                .map(Item::from)
                .collect(),
            page_info: self.page_info,
            rate_limit: rate_limit.map(Into::into),
        }
    }
}

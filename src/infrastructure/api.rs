//! HTTP client for the platform's GraphQL API.

use crate::domain::{ApiError, ApiResult, CreatedEntity, OrganizationDraft, UpdateDraft};
use reqwest::blocking::Client;
use serde_json::{Value, json};
use std::time::Duration;

const USER_AGENT: &str = concat!("gatherly/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const CREATE_ORGANIZATION: &str = "\
mutation CreateOrganization($organization: OrganizationInput!) {
  createOrganization(organization: $organization) { id slug }
}";

const CREATE_UPDATE: &str = "\
mutation CreateUpdate($update: UpdateInput!) {
  createUpdate(update: $update) { id slug }
}";

/// Authenticated client bound to one API endpoint.
pub struct ApiClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl ApiClient {
    pub fn new(endpoint: &str, token: &str) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        })
    }

    /// Runs the create-organization mutation.
    ///
    /// The authorization confirmation is a client-side gate and is not
    /// part of the payload.
    pub fn create_organization(&self, draft: &OrganizationDraft) -> ApiResult<CreatedEntity> {
        let variables = json!({
            "organization": {
                "name": draft.name.trim(),
                "slug": draft.slug,
                "description": draft.description.trim(),
                "website": draft.website.trim(),
                "coAdmin": draft.co_admin.trim(),
                "type": "ORGANIZATION",
            }
        });
        let data = self.execute(CREATE_ORGANIZATION, variables)?;
        entity_from(&data, "createOrganization")
    }

    /// Runs the create-update mutation against an existing organization.
    pub fn create_update(
        &self,
        organization_id: &str,
        draft: &UpdateDraft,
    ) -> ApiResult<CreatedEntity> {
        let variables = json!({
            "update": {
                "title": draft.title.trim(),
                "body": draft.body,
                "organization": { "id": organization_id },
            }
        });
        let data = self.execute(CREATE_UPDATE, variables)?;
        entity_from(&data, "createUpdate")
    }

    fn execute(&self, query: &str, variables: Value) -> ApiResult<Value> {
        let body = json!({ "query": query, "variables": variables });
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode_graphql_response(status, &text)
    }
}

/// Maps a raw GraphQL HTTP response to its `data` payload or a failure.
///
/// The first message in a GraphQL `errors` array wins regardless of
/// HTTP status; the platform reports domain rejections that way even
/// on 200 responses.
fn decode_graphql_response(status: u16, body: &str) -> ApiResult<Value> {
    let ok = (200..300).contains(&status);
    let parsed: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            return if ok {
                Err(ApiError::InvalidResponse(e.to_string()))
            } else {
                Err(ApiError::Network(format!("HTTP {}", status)))
            };
        }
    };

    if let Some(message) = parsed["errors"]
        .as_array()
        .and_then(|errors| errors.first())
        .and_then(|error| error["message"].as_str())
    {
        return Err(ApiError::Rejected(message.to_string()));
    }

    if !ok {
        return Err(ApiError::Network(format!("HTTP {}", status)));
    }

    match parsed.get("data") {
        Some(data) if !data.is_null() => Ok(data.clone()),
        _ => Err(ApiError::InvalidResponse("missing data field".to_string())),
    }
}

fn entity_from(data: &Value, field: &str) -> ApiResult<CreatedEntity> {
    serde_json::from_value(data[field].clone())
        .map_err(|e| ApiError::InvalidResponse(format!("bad {} payload: {}", field, e)))
}

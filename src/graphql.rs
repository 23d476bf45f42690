use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::models::{ClassDetails, Event, EventOccurrence};
use crate::queries::{
    GET_CLASS_BY_SLUG, GET_EVENT_OCCURRENCES_BY_CLASS, GET_FEATURED_EVENTS, GET_UPCOMING_EVENTS,
};
use crate::records::{ClassEventsData, ClassesData};
use crate::transform::{class_details_from_record, event_from_record, occurrence_from_record};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("GraphQL error: {0}")]
    GraphQl(String),
    #[error("GraphQL response carried no data")]
    MissingData,
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

/// Client for the events GraphQL backend.
#[derive(Clone)]
pub struct GraphqlClient {
    client: reqwest::Client,
    endpoint: Arc<Url>,
    occurrences_limit: u16,
}

impl GraphqlClient {
    pub fn new(endpoint: Url, occurrences_limit: u16) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: Arc::new(endpoint),
            occurrences_limit,
        }
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, FetchError> {
        debug!(endpoint = %self.endpoint, %variables, "sending GraphQL request");
        let response = self
            .client
            .post(self.endpoint.as_str())
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?
            .error_for_status()?;
        let body: GraphQlResponse<T> = response.json().await?;

        if !body.errors.is_empty() {
            let message = body
                .errors
                .into_iter()
                .map(|err| err.message)
                .collect::<Vec<_>>()
                .join("; ");
            warn!(error = %message, "GraphQL request returned errors");
            return Err(FetchError::GraphQl(message));
        }
        body.data.ok_or(FetchError::MissingData)
    }

    pub async fn fetch_occurrences_by_class(
        &self,
        class_id: &str,
    ) -> Result<Vec<EventOccurrence>, FetchError> {
        if class_id.trim().is_empty() {
            return Err(FetchError::Validation("No class ID provided".into()));
        }
        let data: ClassEventsData = self
            .request(
                GET_EVENT_OCCURRENCES_BY_CLASS,
                json!({ "classId": class_id, "limit": self.occurrences_limit }),
            )
            .await?;
        debug!(class_id, count = data.class_events.len(), "fetched occurrences");
        Ok(data.class_events.iter().map(occurrence_from_record).collect())
    }

    pub async fn fetch_class_by_slug(&self, slug: &str) -> Result<ClassDetails, FetchError> {
        if slug.trim().is_empty() {
            return Err(FetchError::Validation("No slug provided".into()));
        }
        let data: ClassesData = self
            .request(GET_CLASS_BY_SLUG, json!({ "slug": slug }))
            .await?;
        data.classes
            .first()
            .map(class_details_from_record)
            .ok_or_else(|| FetchError::NotFound(format!("Class '{slug}'")))
    }

    pub async fn fetch_featured_events(&self, limit: u8) -> Result<Vec<Event>, FetchError> {
        self.fetch_listing(GET_FEATURED_EVENTS, limit).await
    }

    pub async fn fetch_upcoming_events(&self, limit: u8) -> Result<Vec<Event>, FetchError> {
        self.fetch_listing(GET_UPCOMING_EVENTS, limit).await
    }

    async fn fetch_listing(&self, query: &str, limit: u8) -> Result<Vec<Event>, FetchError> {
        let data: ClassEventsData = self.request(query, json!({ "limit": limit })).await?;
        Ok(data.class_events.iter().map(event_from_record).collect())
    }
}

use reqwest::blocking::Client;
use reqwest::StatusCode;
use url::Url;

use crate::{ApiError, ContactCollection, Result};
use rolodex_core::domain::{Contact, ContactId, ContactInput};
use rolodex_core::time::now_rfc3339;

const DEFAULT_USER_AGENT: &str = "rolodex";

/// Blocking HTTP implementation of [`ContactCollection`] against a REST
/// collection endpoint at `{base_url}/contacts`, JSON bodies both ways.
#[derive(Debug, Clone)]
pub struct HttpCollection {
    client: Client,
    base_url: String,
}

impl HttpCollection {
    pub fn new(base_url: &Url, user_agent: Option<&str>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/contacts", self.base_url)
    }

    fn record_url(&self, id: ContactId) -> String {
        format!("{}/contacts/{}", self.base_url, id)
    }
}

impl ContactCollection for HttpCollection {
    fn list_all(&self) -> Result<Vec<Contact>> {
        let response = self
            .client
            .get(self.collection_url())
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    fn get_one(&self, id: ContactId) -> Result<Contact> {
        let response = self.client.get(self.record_url(id)).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id));
        }
        Ok(response.error_for_status()?.json()?)
    }

    fn create(&self, input: ContactInput) -> Result<Contact> {
        let record = Contact::from_input(ContactId::new(), input, now_rfc3339());
        let response = self
            .client
            .post(self.collection_url())
            .json(&record)
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    fn update(&self, id: ContactId, input: ContactInput) -> Result<Contact> {
        // Re-read the current remote copy so fields the input does not carry
        // (id, createdAt) survive the whole-record replacement.
        let existing = self.get_one(id)?;
        let merged = existing.merged_with(&input, now_rfc3339());
        let response = self
            .client
            .put(self.record_url(id))
            .json(&merged)
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    fn delete(&self, id: ContactId) -> Result<()> {
        self.client
            .delete(self.record_url(id))
            .send()?
            .error_for_status()?;
        Ok(())
    }
}

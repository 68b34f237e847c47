//! Google Books volume search, used to prefill the add-book form.
//!
//! Thin passthrough: one request, one mapping, no caching or retries.

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    items: Option<Vec<VolumeItem>>,
}

#[derive(Debug, Deserialize)]
struct VolumeItem {
    id: String,
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    #[serde(rename = "publishedDate")]
    published_date: Option<String>,
    description: Option<String>,
    #[serde(rename = "imageLinks")]
    image_links: Option<ImageLinks>,
    #[serde(rename = "industryIdentifiers")]
    industry_identifiers: Option<Vec<IndustryIdentifier>>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub id_type: String,
    pub identifier: String,
}

/// One candidate book from the catalog search.
#[derive(Debug, Serialize, Clone)]
pub struct VolumeHit {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub identifiers: Vec<IndustryIdentifier>,
}

#[derive(Clone)]
pub struct GoogleBooksClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleBooksClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<VolumeHit>, DomainError> {
        let url = format!("{}/volumes", self.base_url);

        let mut params: Vec<(&str, &str)> = vec![("q", query)];
        if let Some(key) = &self.api_key {
            params.push(("key", key));
        }

        let resp = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| DomainError::External(format!("Book search request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(DomainError::External(format!(
                "Book search returned status {}",
                resp.status()
            )));
        }

        let parsed: VolumesResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::External(format!("Invalid book search response: {}", e)))?;

        let hits = parsed
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| {
                let info = item.volume_info;
                // Entries without a title are unusable for form prefill
                let title = info.title?;
                Some(VolumeHit {
                    id: item.id,
                    title,
                    authors: info.authors.unwrap_or_default(),
                    published_date: info.published_date,
                    description: info.description,
                    // Google Books often returns http links, upgrade to https
                    thumbnail: info
                        .image_links
                        .and_then(|l| l.thumbnail)
                        .map(|t| t.replace("http://", "https://")),
                    identifiers: info.industry_identifiers.unwrap_or_default(),
                })
            })
            .collect();

        Ok(hits)
    }
}

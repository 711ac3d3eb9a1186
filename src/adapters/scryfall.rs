use crate::domain::model::{ColorIdentity, Legality, ResolvedCard};
use crate::domain::ports::{CardResolver, ConfigProvider};
use crate::utils::error::{AssistError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.scryfall.com";
pub const DEFAULT_USER_AGENT: &str = "commander-assist/0.1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const SERVICE: &str = "Scryfall";

#[derive(Debug, Deserialize)]
struct ScryfallCard {
    name: String,
    type_line: Option<String>,
    oracle_text: Option<String>,
    #[serde(default)]
    color_identity: ColorIdentity,
    #[serde(default)]
    legalities: BTreeMap<String, Legality>,
    #[serde(default)]
    card_faces: Vec<ScryfallCardFace>,
}

#[derive(Debug, Deserialize)]
struct ScryfallCardFace {
    type_line: Option<String>,
    oracle_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScryfallErrorBody {
    details: Option<String>,
}

impl From<ScryfallCard> for ResolvedCard {
    fn from(card: ScryfallCard) -> Self {
        // 雙面牌的文字在 card_faces 裡
        let type_line = card.type_line.unwrap_or_else(|| {
            card.card_faces
                .iter()
                .filter_map(|face| face.type_line.as_deref())
                .collect::<Vec<_>>()
                .join(" // ")
        });
        let oracle_text = card.oracle_text.unwrap_or_else(|| {
            card.card_faces
                .iter()
                .filter_map(|face| face.oracle_text.as_deref())
                .collect::<Vec<_>>()
                .join("\n\n")
        });

        ResolvedCard {
            name: card.name,
            type_line,
            oracle_text,
            color_identity: card.color_identity,
            legalities: card.legalities,
        }
    }
}

/// Card resolver backed by Scryfall's fuzzy named-card lookup.
#[derive(Debug, Clone)]
pub struct ScryfallResolver {
    client: Client,
    endpoint: String,
}

impl ScryfallResolver {
    pub fn new(endpoint: impl Into<String>, timeout: Duration, user_agent: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.to_string())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(
            config.resolver_endpoint(),
            config.request_timeout(),
            config.user_agent(),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn classify_request_error(e: reqwest::Error) -> AssistError {
    if e.is_timeout() || e.is_connect() {
        AssistError::transient(SERVICE, e.to_string())
    } else {
        AssistError::ApiError(e)
    }
}

#[async_trait]
impl CardResolver for ScryfallResolver {
    async fn resolve(&self, name: &str) -> Result<ResolvedCard> {
        let url = format!("{}/cards/named", self.endpoint);
        tracing::debug!("Resolving '{}' via {}", name, url);

        let response = self
            .client
            .get(&url)
            .query(&[("fuzzy", name)])
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        tracing::debug!("Scryfall response status for '{}': {}", name, status);

        if status == StatusCode::NOT_FOUND {
            return Err(AssistError::CardNotFound {
                name: name.to_string(),
            });
        }

        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(AssistError::transient(SERVICE, format!("HTTP {}", status)));
        }

        if !status.is_success() {
            let details = response
                .json::<ScryfallErrorBody>()
                .await
                .ok()
                .and_then(|body| body.details)
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(AssistError::input(format!(
                "Scryfall rejected lookup for '{}': {}",
                name, details
            )));
        }

        let card: ScryfallCard = response.json().await.map_err(classify_request_error)?;
        Ok(card.into())
    }
}

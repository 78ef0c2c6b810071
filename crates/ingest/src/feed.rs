//! HTTP client for the MFDS easy-drug-info list.
//!
//! Each request asks for one page as JSON:
//! `GET <feed_url>?serviceKey=..&pageNo=..&numOfRows=..&type=json`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use yakbot_db::models::drug::UpsertDrug;

/// Errors from the upstream feed.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The feed answered with a non-2xx status code.
    #[error("feed returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The body was not the expected JSON document.
    #[error("malformed feed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can serve pages of drug items.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch page `page_no` (1-based) holding up to `page_size` items.
    async fn fetch_page(&self, page_no: u32, page_size: u32) -> Result<FeedPage, FeedError>;
}

/// One page of the feed.
#[derive(Debug, Clone, Default)]
pub struct FeedPage {
    pub items: Vec<FeedItem>,
    pub total_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct FeedEnvelope {
    #[serde(default)]
    body: Option<FeedBody>,
}

#[derive(Debug, Deserialize)]
struct FeedBody {
    #[serde(default)]
    items: Option<Vec<FeedItem>>,
    #[serde(default, rename = "totalCount")]
    total_count: Option<u64>,
}

impl From<FeedEnvelope> for FeedPage {
    fn from(envelope: FeedEnvelope) -> Self {
        let body = envelope.body;
        Self {
            total_count: body.as_ref().and_then(|b| b.total_count),
            items: body.and_then(|b| b.items).unwrap_or_default(),
        }
    }
}

/// Parse a raw feed response body.
pub fn parse_page(body: &str) -> Result<FeedPage, FeedError> {
    let envelope: FeedEnvelope = serde_json::from_str(body)?;
    Ok(envelope.into())
}

/// A single upstream item.
///
/// The easy-drug list serves camelCase keys; older registry dumps use
/// upper snake case. Both spellings are accepted for every field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedItem {
    #[serde(default, rename = "itemSeq", alias = "ITEM_SEQ", deserialize_with = "text")]
    pub item_seq: Option<String>,
    #[serde(default, rename = "itemName", alias = "ITEM_NAME", deserialize_with = "text")]
    pub item_name: Option<String>,
    #[serde(default, rename = "entpName", alias = "ENTP_NAME", deserialize_with = "text")]
    pub entp_name: Option<String>,
    #[serde(default, rename = "mainItemIngr", alias = "MAIN_ITEM_INGR", deserialize_with = "text")]
    pub main_item_ingr: Option<String>,
    #[serde(default, rename = "chart", alias = "CHART", deserialize_with = "text")]
    pub chart: Option<String>,
    #[serde(default, rename = "drugShape", alias = "DRUG_SHAPE", deserialize_with = "text")]
    pub drug_shape: Option<String>,
    #[serde(default, rename = "efcyQesitm", alias = "EFCY_QESITM", deserialize_with = "text")]
    pub efcy_qesitm: Option<String>,
    #[serde(default, rename = "useMethodQesitm", alias = "USE_METHOD_QESITM", deserialize_with = "text")]
    pub use_method_qesitm: Option<String>,
    #[serde(default, rename = "atpnWarnQesitm", alias = "ATPN_WARN_QESITM", deserialize_with = "text")]
    pub atpn_warn_qesitm: Option<String>,
    #[serde(default, rename = "atpnQesitm", alias = "ATPN_QESITM", deserialize_with = "text")]
    pub atpn_qesitm: Option<String>,
    #[serde(default, rename = "intrcQesitm", alias = "INTRC_QESITM", deserialize_with = "text")]
    pub intrc_qesitm: Option<String>,
    #[serde(default, rename = "seQesitm", alias = "SE_QESITM", deserialize_with = "text")]
    pub se_qesitm: Option<String>,
    #[serde(default, rename = "depositMethodQesitm", alias = "DEPOSIT_METHOD_QESITM", deserialize_with = "text")]
    pub deposit_method_qesitm: Option<String>,
    #[serde(default, rename = "itemImage", alias = "ITEM_IMAGE", deserialize_with = "text")]
    pub item_image: Option<String>,
}

impl FeedItem {
    /// Map to the cache row, or `None` when the item code or name is missing.
    pub fn to_upsert(&self) -> Option<UpsertDrug> {
        Some(UpsertDrug {
            id: self.item_seq.clone()?,
            name: self.item_name.clone()?,
            company: self.entp_name.clone(),
            ingredient: self.main_item_ingr.clone(),
            appearance: self.chart.clone(),
            shape: self.drug_shape.clone(),
            effect: self.efcy_qesitm.clone(),
            usage: self.use_method_qesitm.clone(),
            caution_before_taking: self.atpn_warn_qesitm.clone(),
            caution_normal: self.atpn_qesitm.clone(),
            interaction: self.intrc_qesitm.clone(),
            side_effect: self.se_qesitm.clone(),
            storage: self.deposit_method_qesitm.clone(),
            image_url: self.item_image.clone(),
        })
    }
}

/// Accept strings or numbers; blank strings and `null` become `None`.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// HTTP client for the upstream feed.
pub struct FeedClient {
    client: reqwest::Client,
    feed_url: String,
    service_key: String,
}

impl FeedClient {
    /// Build a client whose requests time out after `timeout`.
    pub fn new(
        feed_url: String,
        service_key: String,
        timeout: Duration,
    ) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, feed_url, service_key))
    }

    /// Create a feed client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, feed_url: String, service_key: String) -> Self {
        Self {
            client,
            feed_url,
            service_key,
        }
    }

    /// Ensure the response has a success status code, capturing the body
    /// for the error otherwise.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, FeedError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(FeedError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl FeedSource for FeedClient {
    async fn fetch_page(&self, page_no: u32, page_size: u32) -> Result<FeedPage, FeedError> {
        let page_no = page_no.to_string();
        let page_size = page_size.to_string();
        let response = self
            .client
            .get(&self.feed_url)
            .query(&[
                ("serviceKey", self.service_key.as_str()),
                ("pageNo", page_no.as_str()),
                ("numOfRows", page_size.as_str()),
                ("type", "json"),
            ])
            .send()
            .await?;

        let body = Self::ensure_success(response).await?.text().await?;
        parse_page(&body)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_camel_case_items() {
        let page = parse_page(
            r#"{
                "header": {"resultCode": "00", "resultMsg": "NORMAL SERVICE."},
                "body": {
                    "pageNo": 1, "totalCount": 4743, "numOfRows": 100,
                    "items": [{
                        "entpName": "한국얀센(주)",
                        "itemName": "타이레놀정500밀리그램(아세트아미노펜)",
                        "itemSeq": "198804008",
                        "efcyQesitm": "이 약은 감기로 인한 발열에 사용합니다.",
                        "useMethodQesitm": null,
                        "depositMethodQesitm": "실온에서 보관하십시오.",
                        "itemImage": "https://nedrug.mfds.go.kr/pbp/cmn/itemImageDownload/1"
                    }]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(page.total_count, Some(4743));
        let drug = page.items[0].to_upsert().unwrap();
        assert_eq!(drug.id, "198804008");
        assert_eq!(drug.company.as_deref(), Some("한국얀센(주)"));
        assert_eq!(drug.usage, None);
        assert_eq!(drug.storage.as_deref(), Some("실온에서 보관하십시오."));
        assert!(drug.image_url.unwrap().starts_with("https://"));
    }

    #[test]
    fn parses_upper_snake_items() {
        let page = parse_page(
            r#"{"body": {"items": [{
                "ITEM_SEQ": 200003092,
                "ITEM_NAME": "게보린정",
                "ENTP_NAME": "삼진제약(주)",
                "MAIN_ITEM_INGR": "아세트아미노펜",
                "CHART": "흰색의 원형 정제",
                "DRUG_SHAPE": "원형"
            }]}}"#,
        )
        .unwrap();

        let drug = page.items[0].to_upsert().unwrap();
        assert_eq!(drug.id, "200003092");
        assert_eq!(drug.ingredient.as_deref(), Some("아세트아미노펜"));
        assert_eq!(drug.appearance.as_deref(), Some("흰색의 원형 정제"));
        assert_eq!(drug.shape.as_deref(), Some("원형"));
    }

    #[test]
    fn missing_or_null_items_are_an_empty_page() {
        for body in [
            r#"{"body": {"totalCount": 0}}"#,
            r#"{"body": {"items": null}}"#,
            r#"{"body": null}"#,
            r#"{}"#,
        ] {
            assert!(parse_page(body).unwrap().items.is_empty(), "{body}");
        }
    }

    #[test]
    fn items_without_code_or_name_do_not_map() {
        let page = parse_page(
            r#"{"body": {"items": [
                {"itemName": "이름만"},
                {"itemSeq": "1", "itemName": "   "}
            ]}}"#,
        )
        .unwrap();

        assert!(page.items.iter().all(|item| item.to_upsert().is_none()));
    }

    #[test]
    fn non_json_body_is_a_decode_error() {
        let body = "<OpenAPI_ServiceResponse>SERVICE_KEY_IS_NOT_REGISTERED_ERROR</OpenAPI_ServiceResponse>";
        assert_matches!(parse_page(body), Err(FeedError::Decode(_)));
    }
}

use crate::auth::config::FirebaseConfig;
use crate::db::{Document, DocumentStore, StoreError};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Number, Value};

const PAGE_SIZE: &str = "300";

/// Firestore REST (v1) client scoped to one project's default database.
#[derive(Clone)]
pub struct FirestoreClient {
    client: reqwest::Client,
    documents_url: String,
    api_key: String,
    bearer: Option<String>,
}

#[derive(Deserialize)]
struct RawDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<RawDocument>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct RunQueryItem {
    document: Option<RawDocument>,
}

impl FirestoreClient {
    pub fn new(cfg: &FirebaseConfig, client: reqwest::Client) -> Self {
        Self {
            client,
            documents_url: format!(
                "{}/v1/projects/{}/databases/(default)/documents",
                cfg.firestore_url.trim_end_matches('/'),
                cfg.project_id
            ),
            api_key: cfg.api_key.clone(),
            bearer: cfg.firestore_bearer.clone(),
        }
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.query(&[("key", self.api_key.as_str())]);
        match &self.bearer {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn document_url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url =
            Url::parse(&self.documents_url).map_err(|e| StoreError::Decode(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| StoreError::Decode("store url cannot hold a path".to_string()))?
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl DocumentStore for FirestoreClient {
    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let url = self.document_url(&[collection, id])?;
        let resp = self
            .authorize(self.client.get(url))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        if resp.status() == StatusCode::NOT_FOUND {
            debug!("get_document: '{}/{}' does not exist", collection, id);
            return Ok(None);
        }
        let raw: RawDocument = read_json(resp).await?;
        decode_document(raw).map(Some)
    }

    async fn list_collection(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let url = self.document_url(&[collection])?;
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut req = self
                .authorize(self.client.get(url.clone()))
                .query(&[("pageSize", PAGE_SIZE)]);
            if let Some(token) = &page_token {
                req = req.query(&[("pageToken", token.as_str())]);
            }
            let resp = req
                .send()
                .await
                .map_err(|e| StoreError::Network(e.to_string()))?;
            let page: ListResponse = read_json(resp).await?;
            for raw in page.documents {
                documents.push(decode_document(raw)?);
            }
            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(
            "list_collection: read {} documents from '{}'",
            documents.len(),
            collection
        );
        Ok(documents)
    }

    async fn query_collection(
        &self,
        collection: &str,
        field: &str,
        eq: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let url = format!("{}:runQuery", self.documents_url);
        let body = json!({
            "structuredQuery": {
                "from": [{ "collectionId": collection }],
                "where": {
                    "fieldFilter": {
                        "field": { "fieldPath": field },
                        "op": "EQUAL",
                        "value": { "stringValue": eq }
                    }
                }
            }
        });
        let resp = self
            .authorize(self.client.post(url))
            .json(&body)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        let items: Vec<RunQueryItem> = read_json(resp).await?;
        // Items without a document only carry read progress.
        items
            .into_iter()
            .filter_map(|item| item.document)
            .map(decode_document)
            .collect()
    }
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, StoreError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| StoreError::Network(e.to_string()))?;
    if !status.is_success() {
        let message = error_message(&body);
        error!("firestore: request failed with {}: {}", status, message);
        return Err(StoreError::Status {
            status: status.as_u16(),
            message,
        });
    }
    serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn decode_document(raw: RawDocument) -> Result<Document, StoreError> {
    let id = raw
        .name
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| StoreError::Decode(format!("document name has no id: {}", raw.name)))?
        .to_string();
    Ok(Document {
        id,
        fields: decode_fields(&raw.fields)?,
    })
}

fn decode_fields(fields: &Map<String, Value>) -> Result<Map<String, Value>, StoreError> {
    fields
        .iter()
        .map(|(key, value)| Ok((key.clone(), decode_value(value)?)))
        .collect()
}

/// Converts one Firestore typed value (`{"stringValue": "x"}` etc.) to plain JSON.
pub fn decode_value(value: &Value) -> Result<Value, StoreError> {
    let Some((kind, inner)) = value.as_object().and_then(|o| o.iter().next()) else {
        return Err(StoreError::Decode(format!("not a typed value: {value}")));
    };

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => Ok(Value::Bool(inner.as_bool().unwrap_or(false))),
        "integerValue" => match inner {
            Value::String(s) => s
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| StoreError::Decode(format!("integerValue '{s}': {e}"))),
            Value::Number(n) => Ok(Value::Number(n.clone())),
            other => Err(StoreError::Decode(format!("integerValue: {other}"))),
        },
        "doubleValue" => Ok(inner
            .as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => {
            Ok(Value::String(inner.as_str().unwrap_or_default().to_string()))
        }
        "geoPointValue" => Ok(inner.clone()),
        "arrayValue" => inner
            .get("values")
            .and_then(Value::as_array)
            .map(|values| values.iter().map(decode_value).collect::<Result<Vec<_>, _>>())
            .unwrap_or_else(|| Ok(Vec::new()))
            .map(Value::Array),
        "mapValue" => match inner.get("fields").and_then(Value::as_object) {
            Some(fields) => decode_fields(fields).map(Value::Object),
            None => Ok(Value::Object(Map::new())),
        },
        other => Err(StoreError::Decode(format!("unsupported value type '{other}'"))),
    }
}

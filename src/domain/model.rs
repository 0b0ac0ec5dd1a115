use serde::{Deserialize, Serialize};

/// `POST /track` 的請求本體
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingRequest {
    #[serde(rename = "trackIds")]
    pub track_ids: String,
}

/// 正規化後的追蹤號碼，長度介於 1 與上限之間
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierList {
    ids: Vec<String>,
}

impl IdentifierList {
    // 只有 normalizer 會建立，長度限制因此永遠成立
    pub(crate) fn from_normalized(ids: Vec<String>) -> Self {
        Self { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }
}

/// 單一追蹤號碼的結果：供應商原始 JSON，或錯誤物件
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TrackingResult {
    Failed { error: String },
    Found(serde_json::Value),
}

impl TrackingResult {
    pub fn failed(identifier: &str) -> Self {
        Self::Failed {
            error: format!("Failed to track ID {}", identifier),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_request_uses_camel_case_field() {
        let request: TrackingRequest =
            serde_json::from_str(r#"{"trackIds": "31067110118823"}"#).unwrap();
        assert_eq!(request.track_ids, "31067110118823");

        assert!(serde_json::from_str::<TrackingRequest>(r#"{"track_ids": "1"}"#).is_err());
    }

    #[test]
    fn test_failed_result_serializes_as_error_object() {
        let result = TrackingResult::failed("id1");
        assert!(result.is_failed());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({"error": "Failed to track ID id1"})
        );
    }

    #[test]
    fn test_found_result_is_passed_through_verbatim() {
        let payload = serde_json::json!({
            "data": [{"awb": "31067110118823", "status": {"status": "DELIVERED"}}]
        });
        let result = TrackingResult::Found(payload.clone());
        assert!(!result.is_failed());
        assert_eq!(serde_json::to_value(&result).unwrap(), payload);
    }
}

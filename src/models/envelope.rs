//! Uniform JSON response wrapper.

use serde::{Deserialize, Serialize};

/// Response envelope shared by every JSON endpoint
///
/// A failed envelope never carries `data` or `count`, and a list payload
/// always reports its own length in `count`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Success envelope around a single value, without `count`
    pub fn single(data: T) -> Self {
        Self {
            success: true,
            count: None,
            data: Some(data),
            error: None,
        }
    }
}

impl<T> Envelope<Vec<T>> {
    /// Success envelope around a list, with `count` set to its length
    pub fn list(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(data.len()),
            data: Some(data),
            error: None,
        }
    }
}

impl Envelope<()> {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            count: None,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_envelope_counts() {
        let value = serde_json::to_value(Envelope::list(vec![1, 2, 3])).unwrap();
        assert_eq!(value, json!({"success": true, "count": 3, "data": [1, 2, 3]}));

        let empty: Envelope<Vec<i32>> = Envelope::list(vec![]);
        assert_eq!(
            serde_json::to_value(empty).unwrap(),
            json!({"success": true, "count": 0, "data": []})
        );
    }

    #[test]
    fn test_single_envelope_has_no_count() {
        let value = serde_json::to_value(Envelope::single("x")).unwrap();
        assert_eq!(value, json!({"success": true, "data": "x"}));
    }

    #[test]
    fn test_failure_envelope() {
        let value = serde_json::to_value(Envelope::failure("Failed to fetch quote")).unwrap();
        assert_eq!(
            value,
            json!({"success": false, "error": "Failed to fetch quote"})
        );
    }
}

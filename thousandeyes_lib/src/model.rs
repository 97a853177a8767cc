//! Wire types for web transaction tests.

use crate::helpers::parse_created_date;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scripted browser test.
///
/// `test_id`, `created_date` and `created_by` are assigned by the server: they
/// are read from responses and never sent in request bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebTransaction {
    #[serde(default, skip_serializing)]
    pub test_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_name: Option<String>,
    #[serde(default, skip_serializing)]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing)]
    pub created_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_script: Option<String>,
}

impl WebTransaction {
    /// New test definition ready to be created.
    pub fn new(test_name: impl Into<String>, transaction_script: impl Into<String>) -> Self {
        Self {
            test_name: Some(test_name.into()),
            transaction_script: Some(transaction_script.into()),
            ..Self::default()
        }
    }

    /// Creation time, when the server reported one in the expected format.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_date
            .as_deref()
            .and_then(|s| parse_created_date(s).ok())
    }
}

/// Response wrapper: `{"test": [ ... ]}`. A missing or `null` list counts as empty.
#[derive(Debug, Deserialize)]
pub(crate) struct TestEnvelope {
    #[serde(default)]
    pub test: Option<Vec<WebTransaction>>,
}

impl TestEnvelope {
    pub(crate) fn into_first(self) -> Option<WebTransaction> {
        self.test.unwrap_or_default().into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn server_fields_are_not_serialized() {
        let wt = WebTransaction {
            test_id: Some(7),
            test_name: Some("checkout".to_string()),
            created_date: Some("2020-02-06 15:28:07".to_string()),
            created_by: Some("someone".to_string()),
            transaction_script: Some("script".to_string()),
        };
        let v = serde_json::to_value(&wt).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"testName": "checkout", "transactionScript": "script"})
        );
    }

    #[test]
    fn unset_fields_are_omitted() {
        let wt = WebTransaction {
            transaction_script: Some("new script".to_string()),
            ..WebTransaction::default()
        };
        let body = serde_json::to_string(&wt).unwrap();
        assert_eq!(body, r#"{"transactionScript":"new script"}"#);
    }

    #[test]
    fn envelope_takes_first_element() {
        let env: TestEnvelope = serde_json::from_str(
            r#"{"test":[{"testId":1,"testName":"a"},{"testId":2,"testName":"b"}]}"#,
        )
        .unwrap();
        assert_eq!(env.into_first().and_then(|t| t.test_id), Some(1));
    }

    #[test]
    fn envelope_may_be_empty() {
        let env: TestEnvelope = serde_json::from_str(r#"{"test":[]}"#).unwrap();
        assert!(env.into_first().is_none());
        let env: TestEnvelope = serde_json::from_str("{}").unwrap();
        assert!(env.into_first().is_none());
        let env: TestEnvelope = serde_json::from_str(r#"{"test": null}"#).unwrap();
        assert!(env.into_first().is_none());
    }

    #[test]
    fn created_at_parses_server_format() {
        let wt = WebTransaction {
            created_date: Some("2020-02-06 15:28:07".to_string()),
            ..WebTransaction::default()
        };
        let t = wt.created_at().unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2020, 2, 6));
        assert_eq!((t.hour(), t.minute(), t.second()), (15, 28, 7));
        assert!(WebTransaction::default().created_at().is_none());
    }
}

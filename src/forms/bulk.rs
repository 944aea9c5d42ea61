use serde::Deserialize;
use serde_json::Value;

use crate::forms::decode;
use crate::forms::employee::EmployeePayload;
use crate::forms::errors::FieldErrors;

/// Body of `POST /employee/bulk/`.
#[derive(Debug, Default, Deserialize)]
pub struct BulkActionPayload {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub employees: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Create,
    Delete,
}

impl BulkAction {
    /// Case-insensitive.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "CREATE" => Some(BulkAction::Create),
            "DELETE" => Some(BulkAction::Delete),
            _ => None,
        }
    }
}

impl BulkActionPayload {
    pub fn action(&self) -> Option<BulkAction> {
        self.action.as_deref().and_then(BulkAction::parse)
    }

    /// Submitted items. A missing list counts as empty; `None` means the
    /// value was not a JSON array.
    pub fn items(&self) -> Option<&[Value]> {
        match &self.employees {
            None | Some(Value::Null) => Some(&[]),
            Some(Value::Array(items)) => Some(items.as_slice()),
            Some(_) => None,
        }
    }
}

/// Ids named by a DELETE batch: the `id` of every object item carrying one.
pub fn delete_ids(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.get("id"))
        .filter(|id| !id.is_null())
        .map(|id| match id {
            Value::String(id) => id.clone(),
            other => other.to_string(),
        })
        .collect()
}

/// Decodes each item into an [`EmployeePayload`], keeping per-item failures.
pub fn parse_items(items: &[Value]) -> Vec<Result<EmployeePayload, FieldErrors>> {
    items.iter().cloned().map(decode::<EmployeePayload>).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::forms::errors::ErrorKind;

    #[test]
    fn action_is_case_insensitive() {
        assert_eq!(BulkAction::parse("create"), Some(BulkAction::Create));
        assert_eq!(BulkAction::parse("Delete"), Some(BulkAction::Delete));
        assert_eq!(BulkAction::parse("update"), None);
    }

    #[test]
    fn non_list_employees_are_rejected() {
        let payload: BulkActionPayload =
            serde_json::from_value(json!({"action": "CREATE", "employees": {"a": 1}})).unwrap();
        assert!(payload.items().is_none());

        let missing: BulkActionPayload = serde_json::from_value(json!({"action": "DELETE"})).unwrap();
        assert_eq!(missing.items().map(<[Value]>::len), Some(0));
    }

    #[test]
    fn delete_ids_skip_items_without_id() {
        let items = vec![json!({"id": "a"}), json!({"name": "x"}), json!("b"), json!({"id": 7})];
        assert_eq!(delete_ids(&items), vec!["a".to_string(), "7".to_string()]);
    }

    #[test]
    fn non_object_items_become_item_errors() {
        let parsed = parse_items(&[json!({"name": "Jane"}), json!(42)]);
        assert!(parsed[0].is_ok());
        let errors = parsed[1].as_ref().unwrap_err();
        assert_eq!(errors.codes("non_field_errors"), vec![ErrorKind::InvalidFormat]);
    }

    #[test]
    fn mistyped_item_fields_stay_on_the_item() {
        let parsed = parse_items(&[json!({"name": "Jane", "age": "old"})]);
        let payload = parsed[0].as_ref().unwrap();
        assert_eq!(payload.name.as_deref(), Some("Jane"));
        assert_eq!(payload.age, None);
    }
}

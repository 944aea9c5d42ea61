//! Field projection for JSON responses.

use serde_json::{Map, Value};

/// An entity that can be rendered field by field.
pub trait Projectable {
    /// Field holding a related entity. It is always emitted last.
    const RELATIONSHIP: Option<&'static str> = None;

    /// JSON value of `name`, or `None` if the entity has no such field.
    fn field(&self, name: &str) -> Option<Value>;
}

/// Ordered allow-list of field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    fields: Vec<&'static str>,
}

impl Projection {
    pub fn new(fields: &[&'static str]) -> Self {
        Self {
            fields: fields.to_vec(),
        }
    }

    /// Appends `field` unless it is already listed.
    pub fn with(mut self, field: &'static str) -> Self {
        if !self.fields.contains(&field) {
            self.fields.push(field);
        }
        self
    }

    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    /// Renders `entity`. Unknown names are dropped and output order follows
    /// the allow-list, except for the relationship field which goes last.
    pub fn apply<P: Projectable>(&self, entity: &P) -> Map<String, Value> {
        let mut output = Map::new();
        let mut relationship = None;

        for &name in &self.fields {
            let Some(value) = entity.field(name) else {
                continue;
            };
            if P::RELATIONSHIP == Some(name) {
                relationship = Some((name, value));
            } else {
                output.insert(name.to_string(), value);
            }
        }
        if let Some((name, value)) = relationship {
            output.insert(name.to_string(), value);
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    struct Row;

    impl Projectable for Row {
        const RELATIONSHIP: Option<&'static str> = Some("owner");

        fn field(&self, name: &str) -> Option<Value> {
            match name {
                "id" => Some(json!(1)),
                "title" => Some(json!("x")),
                "owner" => Some(json!({"id": 2})),
                _ => None,
            }
        }
    }

    #[test]
    fn follows_allow_list_order_and_drops_unknown() {
        let output = Projection::new(&["title", "bogus", "id"]).apply(&Row);
        let keys: Vec<&str> = output.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["title", "id"]);
    }

    #[test]
    fn relationship_moves_to_the_end() {
        let output = Projection::new(&["owner", "id", "title"]).apply(&Row);
        let keys: Vec<&str> = output.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "title", "owner"]);
    }

    #[test]
    fn with_does_not_duplicate() {
        let projection = Projection::new(&["id"]).with("id").with("title");
        assert_eq!(projection.fields(), &["id", "title"]);
    }
}

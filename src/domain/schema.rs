use serde_json::{Map, Value, json};

/// Value shape of a single extracted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Number,
    StringList,
    ObjectList,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::StringList => "list<string>",
            FieldType::ObjectList => "list<object>",
        }
    }

    fn json_schema(&self) -> Value {
        match self {
            FieldType::String => json!({ "type": "string" }),
            FieldType::Number => json!({ "type": "number" }),
            FieldType::StringList => json!({ "type": "array", "items": { "type": "string" } }),
            FieldType::ObjectList => json!({ "type": "array", "items": { "type": "object" } }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: FieldType,
}

impl FieldSpec {
    pub const fn new(name: &'static str, field_type: FieldType) -> Self {
        Self { name, field_type }
    }
}

/// Named, ordered set of typed fields expected for one document type.
///
/// `rule_description` is the text the classifier uses to recognise the type.
/// Schemas without one are still provisioned but never proposed to the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentTypeSchema {
    pub name: &'static str,
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
    pub rule_description: Option<&'static str>,
}

impl DocumentTypeSchema {
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// JSON Schema object sent to the remote service when an extraction agent is created.
    /// All fields are required and declared in registry order.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in self.fields {
            let mut property = field.field_type.json_schema();
            if let Value::Object(obj) = &mut property {
                obj.insert("title".to_string(), Value::String(humanize(field.name)));
            }
            properties.insert(field.name.to_string(), property);
        }

        let required: Vec<Value> = self
            .field_names()
            .map(|n| Value::String(n.to_string()))
            .collect();

        json!({
            "title": self.title,
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

fn humanize(field_name: &str) -> String {
    field_name
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

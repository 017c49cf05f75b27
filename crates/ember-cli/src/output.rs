//! Output formatting

use serde_json::{Map, Value};

use crate::CliError;

/// Output builder for formatted CLI output
pub struct Output {
    json_mode: bool,
    fields: Map<String, Value>,
    message: Option<String>,
}

impl Output {
    /// Create a new output builder
    pub fn new(json_mode: bool) -> Self {
        Self {
            json_mode,
            fields: Map::new(),
            message: None,
        }
    }

    /// Add a string field to the output
    pub fn field(mut self, key: &str, value: &str) -> Self {
        self.fields.insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Add a u64 field to the output
    pub fn field_u64(mut self, key: &str, value: u64) -> Self {
        self.fields.insert(key.to_string(), Value::Number(value.into()));
        self
    }

    /// Add a boolean field to the output
    pub fn field_bool(mut self, key: &str, value: bool) -> Self {
        self.fields.insert(key.to_string(), Value::Bool(value));
        self
    }

    /// Add a JSON value field to the output
    pub fn field_value(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Set the human-readable message
    pub fn message(mut self, msg: &str) -> Self {
        self.message = Some(msg.to_string());
        self
    }

    /// Render without printing; `None` when there is nothing to show
    pub fn render(&self) -> Result<Option<String>, CliError> {
        if self.json_mode {
            Ok(Some(serde_json::to_string_pretty(&self.fields)?))
        } else {
            Ok(self.message.clone())
        }
    }

    /// Print the output
    pub fn print(self) -> Result<(), CliError> {
        if let Some(text) = self.render()? {
            println!("{}", text);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_mode_prints_message() {
        let out = Output::new(false).field("a", "b").message("hello");
        assert_eq!(out.render().unwrap().as_deref(), Some("hello"));
        assert_eq!(Output::new(false).render().unwrap(), None);
    }

    #[test]
    fn test_json_mode_keeps_fields() {
        let out = Output::new(true)
            .field("outcome", "success")
            .field_bool("success", true)
            .field_u64("steps", 3)
            .field_value("stack", serde_json::json!(["0x2"]))
            .message("ignored");
        let value: Value = serde_json::from_str(&out.render().unwrap().unwrap()).unwrap();
        assert_eq!(value["outcome"], "success");
        assert_eq!(value["success"], true);
        assert_eq!(value["steps"], 3);
        assert_eq!(value["stack"][0], "0x2");
    }
}

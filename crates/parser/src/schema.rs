use jsonschema::JSONSchema;
use serde_json::Value;

const RULES_SCHEMA: &str = include_str!("../../../schemas/rules.json");

pub struct SchemaValidator {
    schema: JSONSchema,
}

impl SchemaValidator {
    pub fn new() -> Result<Self, String> {
        let schema_json: Value = serde_json::from_str(RULES_SCHEMA)
            .map_err(|e| format!("Failed to parse rule file schema: {}", e))?;

        let schema = JSONSchema::compile(&schema_json)
            .map_err(|e| format!("Failed to compile JSON schema: {}", e))?;

        Ok(Self { schema })
    }

    /// Checks an already parsed rule file, listing every violation.
    pub fn validate_rules(&self, rules: &Value) -> Result<(), Vec<String>> {
        if let Err(errors) = self.schema.validate(rules) {
            let violations = errors
                .map(|error| {
                    let location = error.instance_path.to_string();
                    if location.is_empty() {
                        error.to_string()
                    } else {
                        format!("{}: {}", location, error)
                    }
                })
                .collect();
            return Err(violations);
        }

        Ok(())
    }
}

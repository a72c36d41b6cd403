use crate::products::ProductList;

const PREAMBLE: &str = "Answer the following query by providing product information.";

const SHAPE_RULES: &str = "Output a JSON object (enclosed in curly braces) with one key 'products'  which is a list of **at least 5** product objects.
Do NOT output JSON arrays at the top level. The output must be a JSON object starting with '{' and ending with '}'.

Each product object must have these fields:
- product_name (string)
- product_details (string)
- price (number in USD)

Only output the JSON object. Do NOT output any text, explanation, or comments.";

/// Default format instructions: shape rules followed by a worked example.
pub fn format_instructions() -> String {
    // ProductList is plain data, serialising it cannot fail
    let example = serde_json::to_string_pretty(&ProductList::example()).unwrap_or_default();
    format!("\n{}\n\nExample:\n{}\n", SHAPE_RULES, example)
}

#[derive(Debug, Clone)]
pub struct PromptBuilder {
    instructions: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::with_instructions(format_instructions())
    }

    pub fn with_instructions(instructions: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
        }
    }

    /// Instructions always come before the query.
    pub fn build(&self, query: &str) -> String {
        format!("{}\n{}\nQuery: {}", PREAMBLE, self.instructions, query)
    }
}

use heck::{ToSnakeCase, ToUpperCamelCase};

/// A logical name split into its words, used to derive storage names.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Name {
    pub parts: Vec<String>,
}

impl Name {
    pub fn new(src: &str) -> Self {
        let snake = src.to_snake_case();
        let parts = snake
            .split('_')
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect();
        Self { parts }
    }

    pub fn snake_case(&self) -> String {
        self.parts.join("_")
    }

    pub fn upper_camel_case(&self) -> String {
        self.snake_case().to_upper_camel_case()
    }

    /// The name of the private field backing a property, e.g. `_first_name`
    /// for `FirstName`.
    pub fn storage_name(&self) -> String {
        format!("_{}", self.snake_case())
    }
}

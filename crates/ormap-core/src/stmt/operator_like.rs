use super::Operator;

/// String matching translated from `StartsWith`, `EndsWith` and `Contains`.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorLike {
    /// The string being matched
    pub operand: Box<Operator>,

    pub method: LikeMethod,

    /// The literal text to look for
    pub value: String,

    /// Renders as `NOT LIKE`
    pub negated: bool,

    /// The escaped `LIKE` pattern, set by optimization
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeMethod {
    StartsWith,
    EndsWith,
    Contains,
}

impl OperatorLike {
    pub fn new(operand: impl Into<Operator>, method: LikeMethod, value: &str) -> Self {
        Self {
            operand: Box::new(operand.into()),
            method,
            value: value.to_string(),
            negated: false,
            pattern: None,
        }
    }

    /// Builds the pattern for `value`, escaping `%`, `_` and `[`.
    pub fn build_pattern(&self) -> String {
        let mut escaped = String::with_capacity(self.value.len() + 2);

        for ch in self.value.chars() {
            match ch {
                '%' => escaped.push_str("[%]"),
                '_' => escaped.push_str("[_]"),
                '[' => escaped.push_str("[[]"),
                ch => escaped.push(ch),
            }
        }

        match self.method {
            LikeMethod::StartsWith => format!("{escaped}%"),
            LikeMethod::EndsWith => format!("%{escaped}"),
            LikeMethod::Contains => format!("%{escaped}%"),
        }
    }
}

impl LikeMethod {
    /// Maps a method name of the object query language.
    pub fn from_method(name: &str) -> Option<Self> {
        match name {
            "StartsWith" => Some(Self::StartsWith),
            "EndsWith" => Some(Self::EndsWith),
            "Contains" => Some(Self::Contains),
            _ => None,
        }
    }
}

impl From<OperatorLike> for Operator {
    fn from(value: OperatorLike) -> Self {
        Self::Like(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_escape_wildcards() {
        let like = OperatorLike::new(Operator::property("Name"), LikeMethod::Contains, "50%_[a]");
        assert_eq!(like.build_pattern(), "%50[%][_][[]a]%");

        let like = OperatorLike::new(Operator::property("Name"), LikeMethod::StartsWith, "Jo");
        assert_eq!(like.build_pattern(), "Jo%");

        let like = OperatorLike::new(Operator::property("Name"), LikeMethod::EndsWith, "son");
        assert_eq!(like.build_pattern(), "%son");
    }
}

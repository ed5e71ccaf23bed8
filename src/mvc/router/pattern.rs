//! # Route Patterns
//!
//! Compiles slash-delimited route patterns into anchored regular expressions.
//!
//! | Token      | Meaning            | Capture                       |
//! |------------|--------------------|-------------------------------|
//! | `$name`    | mandatory variable | one or more word characters   |
//! | `?$name`   | optional variable  | zero or one word-character run|
//! | `*name`    | wildcard tail      | one or more of `[\w\-.~/]`    |
//! | other      | literal            | none                          |
//!
//! The empty pattern is the default route and only matches an empty hash.

use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

const WORD: &str = "[A-Za-z0-9_]+";
const PATH: &str = r"[A-Za-z0-9_\-.~/]+";

/// A single parsed pattern token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(String),
    Variable(String),
    Optional(String),
    Wildcard(String),
}

impl Token {
    pub fn parse(token: &str) -> Self {
        if let Some(name) = token.strip_prefix('*') {
            Token::Wildcard(name.to_string())
        } else if let Some(name) = token.strip_prefix("?$") {
            Token::Optional(name.to_string())
        } else if let Some(name) = token.strip_prefix('$') {
            Token::Variable(name.to_string())
        } else {
            Token::Literal(token.to_string())
        }
    }

    fn param_name(&self) -> Option<&str> {
        match self {
            Token::Literal(_) => None,
            Token::Variable(name) | Token::Optional(name) | Token::Wildcard(name) => Some(name),
        }
    }

    /// Regex fragment for this token, including its leading separator
    fn fragment(&self, first: bool) -> String {
        let sep = if first { "" } else { "/" };
        match self {
            Token::Literal(text) => format!("{sep}(?:{})", regex::escape(text)),
            Token::Variable(_) => format!("{sep}({WORD})"),
            Token::Optional(_) => format!("(?:{sep}({WORD}))?"),
            Token::Wildcard(_) => format!("{sep}({PATH})"),
        }
    }
}

/// Named parameter and the capture group it is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub capture_index: usize,
}

/// Result of matching a hash against a route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    /// Pattern of the route that matched
    pub pattern: String,
    /// Parameters by name; an absent optional variable maps to `None`
    pub params: HashMap<String, Option<String>>,
    /// Parameters in pattern order
    pub args: Vec<Option<String>>,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(|value| value.as_deref())
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).and_then(|value| value.as_deref())
    }
}

/// A compiled route pattern
#[derive(Debug, Clone)]
pub struct RoutePattern {
    source: String,
    matcher: Option<Regex>,
    params: Vec<ParamSpec>,
}

impl RoutePattern {
    /// Compile `source`; the empty string yields the default route
    pub fn compile(source: &str) -> Result<Self, regex::Error> {
        if source.is_empty() {
            return Ok(Self {
                source: String::new(),
                matcher: None,
                params: Vec::new(),
            });
        }

        let mut expression = String::from("^");
        let mut params = Vec::new();
        for (i, raw) in source.split('/').enumerate() {
            let token = Token::parse(raw);
            expression.push_str(&token.fragment(i == 0));
            if let Some(name) = token.param_name() {
                params.push(ParamSpec {
                    name: name.to_string(),
                    capture_index: params.len() + 1,
                });
            }
        }
        expression.push_str("/?$");

        Ok(Self {
            source: source.to_string(),
            matcher: Some(Regex::new(&expression)?),
            params,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_default(&self) -> bool {
        self.matcher.is_none()
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Regex the pattern compiled to, `None` for the default route
    pub fn as_regex(&self) -> Option<&str> {
        self.matcher.as_ref().map(Regex::as_str)
    }

    /// Match `hash` and extract its parameters
    pub fn matches(&self, hash: &str) -> Option<RouteMatch> {
        let Some(matcher) = &self.matcher else {
            return hash.is_empty().then(|| RouteMatch {
                pattern: self.source.clone(),
                ..RouteMatch::default()
            });
        };

        let captures = matcher.captures(hash)?;
        let mut route_match = RouteMatch {
            pattern: self.source.clone(),
            params: HashMap::with_capacity(self.params.len()),
            args: Vec::with_capacity(self.params.len()),
        };
        for spec in &self.params {
            let value = captures
                .get(spec.capture_index)
                .map(|m| m.as_str().to_string());
            route_match.params.insert(spec.name.clone(), value.clone());
            route_match.args.push(value);
        }
        Some(route_match)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(source: &str) -> RoutePattern {
        RoutePattern::compile(source).unwrap()
    }

    #[test]
    fn token_should_classify_prefixes() {
        assert_eq!(Token::parse("*path"), Token::Wildcard("path".into()));
        assert_eq!(Token::parse("?$tag"), Token::Optional("tag".into()));
        assert_eq!(Token::parse("$id"), Token::Variable("id".into()));
        assert_eq!(Token::parse("users"), Token::Literal("users".into()));
        assert_eq!(Token::parse("?tag"), Token::Literal("?tag".into()));
    }

    #[test]
    fn literal_pattern_should_only_match_exact_hash() {
        let pattern = compile("users/new");

        assert!(pattern.matches("users/new").is_some());
        assert!(pattern.matches("users/new/").is_some());
        assert!(pattern.matches("users").is_none());
        assert!(pattern.matches("users/new/extra").is_none());
        assert!(pattern.matches("xusers/new").is_none());
        assert!(pattern.matches("").is_none());
    }

    #[test]
    fn literal_tokens_should_be_escaped() {
        let pattern = compile("file.json");

        assert!(pattern.matches("file.json").is_some());
        assert!(pattern.matches("fileXjson").is_none());
    }

    #[test]
    fn variable_should_capture_one_segment() {
        let pattern = compile("users/$id");
        let found = pattern.matches("users/42").unwrap();

        assert_eq!(found.param("id"), Some("42"));
        assert_eq!(found.args, vec![Some("42".to_string())]);
        assert!(pattern.matches("users/").is_none());
        assert!(pattern.matches("users/4-2").is_none());
        assert!(pattern.matches("users/42/posts").is_none());
    }

    #[test]
    fn wildcard_should_capture_remaining_path() {
        let pattern = compile("files/*path");
        let found = pattern.matches("files/a/b/c.png").unwrap();

        assert_eq!(found.param("path"), Some("a/b/c.png"));
        assert!(pattern.matches("files").is_none());
    }

    #[test]
    fn wildcard_should_accept_dashes_and_tildes() {
        let pattern = compile("files/*path");
        let found = pattern.matches("files/a-b~c.png").unwrap();

        assert_eq!(found.param("path"), Some("a-b~c.png"));
        assert!(pattern.matches("files/a b").is_none());
    }

    #[test]
    fn separator_should_be_required_before_wildcard_and_optional_values() {
        let files = compile("files/*path");
        assert_eq!(files.as_regex(), Some(r"^(?:files)/([A-Za-z0-9_\-.~/]+)/?$"));
        assert!(files.matches("filesabc").is_none());

        let list = compile("list/?$tag");
        assert!(list.matches("listsports").is_none());
        assert!(list.matches("list/").is_some());
    }

    #[test]
    fn optional_variable_should_match_with_and_without_segment() {
        let pattern = compile("list/?$tag");

        let bare = pattern.matches("list").unwrap();
        assert_eq!(bare.params.get("tag"), Some(&None));
        assert_eq!(bare.args, vec![None]);

        let tagged = pattern.matches("list/sports").unwrap();
        assert_eq!(tagged.param("tag"), Some("sports"));
        assert!(pattern.matches("listsports").is_none());
    }

    #[test]
    fn params_should_follow_pattern_order() {
        let pattern = compile("hash/$id/*new");
        let found = pattern.matches("hash/19/img/1.png").unwrap();

        assert_eq!(found.arg(0), Some("19"));
        assert_eq!(found.arg(1), Some("img/1.png"));
        assert_eq!(
            pattern.params(),
            &[
                ParamSpec {
                    name: "id".into(),
                    capture_index: 1
                },
                ParamSpec {
                    name: "new".into(),
                    capture_index: 2
                },
            ]
        );
    }

    #[test]
    fn leading_optional_and_wildcard_tokens_should_compile() {
        assert!(compile("?$page").matches("").is_some());
        assert_eq!(compile("?$page").matches("3").unwrap().param("page"), Some("3"));
        assert_eq!(compile("*rest").matches("a/b").unwrap().param("rest"), Some("a/b"));
    }

    #[test]
    fn default_pattern_should_only_match_empty_hash() {
        let pattern = compile("");

        assert!(pattern.is_default());
        assert!(pattern.as_regex().is_none());
        assert_eq!(pattern.matches("").unwrap(), RouteMatch::default());
        assert!(pattern.matches("home").is_none());
    }
}

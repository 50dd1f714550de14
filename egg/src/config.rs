use crate::eval::DEFAULT_MAX_CALL_DEPTH;
use std::env;
use std::str::FromStr;
use tracing::warn;

/// Interpreter settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Accept '#' line comments in programs.
    pub comments: bool,
    /// Max nesting of egg function calls before evaluation fails.
    pub max_call_depth: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config { comments: true, max_call_depth: DEFAULT_MAX_CALL_DEPTH }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Defaults overridden by EGG_COMMENTS and EGG_MAX_CALL_DEPTH.
    pub fn from_env() -> Config {
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Config {
        let mut config = Config::default();
        if let Some(raw) = lookup("EGG_COMMENTS") {
            match parse_bool(&raw) {
                Some(comments) => config.comments = comments,
                None => warn!(value = %raw, "ignoring invalid EGG_COMMENTS"),
            }
        }
        if let Some(raw) = lookup("EGG_MAX_CALL_DEPTH") {
            match usize::from_str(raw.trim()) {
                Ok(depth) if depth > 0 => config.max_call_depth = depth,
                _ => warn!(value = %raw, "ignoring invalid EGG_MAX_CALL_DEPTH"),
            }
        }
        config
    }

    pub fn comments(mut self, comments: bool) -> Config {
        self.comments = comments;
        self
    }

    pub fn max_call_depth(mut self, max_call_depth: usize) -> Config {
        self.max_call_depth = max_call_depth;
        self
    }
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_vars() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn reads_vars() {
        let config = Config::from_lookup(lookup(&[
            ("EGG_COMMENTS", "off"), ("EGG_MAX_CALL_DEPTH", " 64 ")]));
        assert_eq!(config, Config::default().comments(false).max_call_depth(64));
    }

    #[test]
    fn invalid_vars_keep_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("EGG_COMMENTS", "maybe"), ("EGG_MAX_CALL_DEPTH", "0")]));
        assert_eq!(config, Config::default());
    }
}

//! `{{ env.NAME }}` placeholder resolution for configuration values.
//!
//! A field that contains a placeholder is replaced as a whole by the value
//! of the referenced environment variable; surrounding text is dropped.
//! Only one placeholder per field is supported. The name capture is greedy,
//! so a field holding several placeholders yields a name spanning all of
//! them (`A }}-{{ env.B`), which never resolves and fails the field.

use regex::Regex;
use std::sync::LazyLock;
use tracing::error;

use crate::error::ConfigError;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*env\.(.*)\s*\}\}").unwrap());

/// Looks up a variable by name. Implemented for any `Fn(&str) -> Option<String>`.
pub trait EnvLookup {
    fn get(&self, name: &str) -> Option<String>;
}

impl<F> EnvLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Reads variables from the process environment.
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Variable name referenced by `value`, trimmed of surrounding spaces.
#[must_use]
pub fn placeholder_name(value: &str) -> Option<&str> {
    ENV_PLACEHOLDER
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Resolve the placeholder in `value`.
///
/// Returns `Ok(None)` when the value has no placeholder.
///
/// # Errors
///
/// Returns [`ConfigError::EnvVarMissing`] when the variable is unset or empty.
pub fn env_replacement(
    field: &str,
    value: &str,
    env: &dyn EnvLookup,
) -> Result<Option<String>, ConfigError> {
    let Some(name) = placeholder_name(value) else {
        return Ok(None);
    };

    match env.get(name) {
        Some(resolved) if !resolved.is_empty() => Ok(Some(resolved)),
        _ => {
            error!(field, variable = name, "env var replacement does not exist");
            Err(ConfigError::EnvVarMissing {
                name: name.to_string(),
                field: field.to_string(),
            })
        }
    }
}

/// Resolve `value` in place, leaving it untouched when it has no placeholder.
///
/// # Errors
///
/// Returns [`ConfigError::EnvVarMissing`] when the variable is unset or empty.
pub fn resolve_in_place(
    field: &str,
    value: &mut String,
    env: &dyn EnvLookup,
) -> Result<(), ConfigError> {
    if let Some(resolved) = env_replacement(field, value, env)? {
        *value = resolved;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_plain_value_is_untouched() {
        let lookup = env(&[]);
        assert_eq!(env_replacement("url", "http://x", &lookup).unwrap(), None);
    }

    #[test]
    fn test_placeholder_spacing_variants() {
        let lookup = env(&[("GRAFANA_KEY", "secret")]);
        for raw in ["{{env.GRAFANA_KEY}}", "{{ env.GRAFANA_KEY }}", "{{   env.GRAFANA_KEY}}"] {
            assert_eq!(
                env_replacement("key", raw, &lookup).unwrap().as_deref(),
                Some("secret"),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_whole_field_is_replaced() {
        let lookup = env(&[("HOST", "prom.local")]);
        let mut value = "http://{{ env.HOST }}:9090".to_string();
        resolve_in_place("prometheus_url", &mut value, &lookup).unwrap();
        assert_eq!(value, "prom.local");
    }

    #[test]
    fn test_two_placeholders_in_one_field_fail() {
        let lookup = env(&[("A", "first"), ("B", "second")]);
        let err = env_replacement("f", "{{ env.A }}-{{ env.B }}", &lookup).unwrap_err();
        match err {
            ConfigError::EnvVarMissing { name, field } => {
                assert_eq!(name, "A }}-{{ env.B");
                assert_eq!(field, "f");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_identifier_name_is_looked_up() {
        let lookup = env(&[("MY-VAR", "dashed")]);
        assert_eq!(
            env_replacement("f", "{{ env.MY-VAR }}", &lookup).unwrap().as_deref(),
            Some("dashed")
        );

        let err = env_replacement("f", "{{ env.MY-VAR }}", &env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarMissing { ref name, .. } if name == "MY-VAR"));
    }

    #[test]
    fn test_missing_variable() {
        let lookup = env(&[]);
        let err = env_replacement("api_key", "{{ env.NOPE }}", &lookup).unwrap_err();
        match err {
            ConfigError::EnvVarMissing { name, field } => {
                assert_eq!(name, "NOPE");
                assert_eq!(field, "api_key");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_variable_counts_as_missing() {
        let lookup = env(&[("EMPTY", "")]);
        assert!(env_replacement("f", "{{ env.EMPTY }}", &lookup).is_err());
    }

    #[test]
    #[serial_test::serial]
    fn test_process_env_lookup() {
        std::env::set_var("ROBUSTA_TEMPLATING_TEST", "from-process");
        let resolved = env_replacement("f", "{{ env.ROBUSTA_TEMPLATING_TEST }}", &ProcessEnv).unwrap();
        std::env::remove_var("ROBUSTA_TEMPLATING_TEST");
        assert_eq!(resolved.as_deref(), Some("from-process"));
    }
}

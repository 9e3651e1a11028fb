//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Supports:
/// - `${VAR}` - expands to the value of VAR, errors if unset
/// - `${VAR:-default}` - expands to VAR if set, otherwise uses default
///
/// Strings without `${` are returned unchanged, so bare `$` in titles and
/// URLs is left alone.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Expand an optional string field.
pub(crate) fn expand_opt(
    value: Option<&str>,
    field: &str,
) -> Result<Option<String>, ConfigError> {
    value.map(|v| expand_env(v, field)).transpose()
}

/// Environment variable lookup failure.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_expand_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("MWDOC_TEST_HOST", "wiki.example.org");
        }
        let result = expand_env("https://${MWDOC_TEST_HOST}/w/api.php", "wiki.api_url").unwrap();
        assert_eq!(result, "https://wiki.example.org/w/api.php");
        unsafe {
            std::env::remove_var("MWDOC_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_default() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("MWDOC_TEST_UNSET_ROOT");
        }
        let result = expand_env("${MWDOC_TEST_UNSET_ROOT:-Manual}", "document.root").unwrap();
        assert_eq!(result, "Manual");
    }

    #[test]
    fn test_expand_missing_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("MWDOC_TEST_MISSING");
        }
        let err = expand_env("${MWDOC_TEST_MISSING}", "wiki.api_url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MWDOC_TEST_MISSING"));
        assert!(err.to_string().contains("wiki.api_url"));
    }

    #[test]
    fn test_bare_dollar_unchanged() {
        let result = expand_env("Price in $US", "document.root").unwrap();
        assert_eq!(result, "Price in $US");
    }

    #[test]
    fn test_expand_opt_none() {
        assert_eq!(expand_opt(None, "wiki.index_url").unwrap(), None);
    }
}

//! URL parameter parsing.

use super::ApiError;

/// Parse the URL parameter `name` as an integer.
pub fn parse_int_param(name: &str, value: &str) -> Result<i64, ApiError> {
    value.trim().parse().map_err(|_| ApiError::ParamNotInt {
        name: name.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_param() {
        assert_eq!(parse_int_param("id", "42").unwrap(), 42);
        assert_eq!(parse_int_param("id", "-7").unwrap(), -7);
    }

    #[test]
    fn test_parse_int_param_rejects_text() {
        let err = parse_int_param("id", "4x2").unwrap_err();
        assert!(matches!(err, ApiError::ParamNotInt { ref name, ref value } if name == "id" && value == "4x2"));
    }
}

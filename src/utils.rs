//! # Utility Functions Module
//!
//! Small helpers for building external command lines.

/// Converts any iterable of string-like items to `Vec<String>`.
///
/// # Example
/// ```rust
/// use svg_minifier::utils::to_string_vec;
///
/// let precision = 3;
/// let args = to_string_vec(["--set-precision", &precision.to_string(), "--quiet"]);
/// assert_eq!(args, vec!["--set-precision", "3", "--quiet"]);
/// ```
pub fn to_string_vec<T, I>(items: I) -> Vec<String>
where
    T: ToString,
    I: IntoIterator<Item = T>,
{
    items.into_iter().map(|item| item.to_string()).collect()
}

/// Builds an argument vector from mixed expressions.
///
/// # Example
/// ```rust
/// use svg_minifier::args;
///
/// let args = args!["-i", "in.svg", "--indent=none"];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    [$($item:expr),* $(,)?] => {
        $crate::utils::to_string_vec([$($item.to_string()),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_string_vec_mixed_types() {
        let num = 42;
        let result = to_string_vec(["--set-precision", &num.to_string(), "--quiet"]);
        assert_eq!(result, vec!["--set-precision", "42", "--quiet"]);
    }

    #[test]
    fn test_to_string_vec_empty() {
        let result: Vec<String> = to_string_vec(Vec::<&str>::new());
        assert!(result.is_empty());
    }

    #[test]
    fn test_args_macro() {
        let precision = 5;
        let result = args!["--set-precision", precision, "--strip-xml-prolog"];
        assert_eq!(result, vec!["--set-precision", "5", "--strip-xml-prolog"]);
    }
}

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Add context to snapshot store errors
pub fn store_context(operation: &str, path: &std::path::Path) -> String {
    format!("Failed to {} rankings snapshot at {}", operation, path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_context_is_prepended_to_source() {
        let parsed: Result<u32, _> = "7:30".parse::<u32>();
        let err = parsed.context(parse_context("score cell")).unwrap_err();

        assert_eq!(err.to_string(), "Failed to parse score cell");
        assert!(err.chain().count() >= 2);
    }
}

use thiserror::Error;

/// Everything that can go wrong while parsing a statement.
///
/// The display strings double as the wire-level status messages, so the CLI
/// prints them verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input buffer is not valid UTF-8 text.
    #[error("PARSE_ERROR_INVALID_ARGUMENT")]
    InvalidArgument,
    /// The input does not match the SELECT grammar, a construct never
    /// terminates, or tokens remain after the statement ends. No attempt is
    /// made to point at the failure site.
    #[error("PARSE_INVALID_SYNTAX")]
    InvalidSyntax,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_the_wire_format() {
        assert_eq!(
            ParseError::InvalidArgument.to_string(),
            "PARSE_ERROR_INVALID_ARGUMENT"
        );
        assert_eq!(ParseError::InvalidSyntax.to_string(), "PARSE_INVALID_SYNTAX");
    }
}

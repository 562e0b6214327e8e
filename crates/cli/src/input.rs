use std::io::Read;
use std::path::Path;

/// Reads the query text, following the convention that `-` means stdin.
/// Bytes come back raw; UTF-8 validation happens in the parser.
pub(crate) fn read_query(path: &Path) -> Result<Vec<u8>, String> {
    if path == Path::new("-") {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .map_err(|error| error.to_string())?;
        return Ok(buffer);
    }

    std::fs::read(path).map_err(|error| format!("{}: {error}", path.display()))
}

// WHY: Input loading for the CLI; files and stdin both come through tokio

use anyhow::{Context, Result};
use std::path::Path;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Read the whole input file, or stdin when no path is given
pub async fn read_text(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => read_text_file(path).await,
        None => read_text_from(tokio::io::stdin())
            .await
            .context("failed to read text from stdin"),
    }
}

/// Read a UTF-8 text file
pub async fn read_text_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read input file {}", path.display()))
}

/// Read any async source to a UTF-8 string
pub async fn read_text_from<R: AsyncRead + Unpin>(mut reader: R) -> Result<String> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .await
        .context("input is not valid UTF-8 or could not be read")?;
    Ok(text)
}

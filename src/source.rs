use std::time::Instant;

use ftt_lib::{
    Config, DocumentNode, FigmaAuth, FigmaClient, FttError, ParsedSource, Result, SourceKind,
};
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

/// Path to a JSON document served in place of the Figma API (used by tests).
const MOCK_DOCUMENT_ENV: &str = "FTT_MOCK_DOCUMENT";

/// Load the design document a parsed source points at.
pub async fn load_document(source: &ParsedSource, config: &Config) -> Result<DocumentNode> {
    let started = Instant::now();
    let document = match source.kind {
        SourceKind::File => {
            debug!(path = %source.value, "reading document from file");
            let raw = tokio::fs::read_to_string(&source.value).await?;
            DocumentNode::from_json_str(&raw)?
        }
        SourceKind::Stdin => {
            debug!("reading document from stdin");
            let mut raw = String::new();
            tokio::io::stdin().read_to_string(&mut raw).await?;
            DocumentNode::from_json_str(&raw)?
        }
        SourceKind::Figma => fetch_figma(source, config).await?,
    };
    info!(
        kind = ?source.kind,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "document loaded"
    );
    Ok(document)
}

async fn fetch_figma(source: &ParsedSource, config: &Config) -> Result<DocumentNode> {
    let file_key = source.file_key.as_deref().ok_or_else(|| {
        FttError::Config(format!("Figma source '{}' has no file key", source.value))
    })?;

    if let Some(path) = std::env::var_os(MOCK_DOCUMENT_ENV) {
        debug!(file_key, path = ?path, "serving mock Figma document");
        let raw = tokio::fs::read_to_string(&path).await?;
        return DocumentNode::from_json_str(&raw);
    }

    let auth = FigmaAuth::from_env().ok_or_else(|| {
        FttError::Config("Figma token missing; set FIGMA_TOKEN or FIGMA_OAUTH_TOKEN".to_string())
    })?;
    let client =
        FigmaClient::with_base_url_and_timeout(auth, &config.figma.base_url, config.figma.timeout)?;
    client.fetch_document(file_key).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftt_lib::parse_source;
    use std::io::Write;

    #[tokio::test]
    async fn loads_local_json_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        write!(file, r#"{{"document": {{"name": "Colour block"}}}}"#).expect("write");

        let source =
            parse_source(&file.path().display().to_string(), None).expect("parse source");
        let document = load_document(&source, &Config::default())
            .await
            .expect("load");
        assert!(document.get("document").is_some());
    }

    #[tokio::test]
    async fn rejects_non_object_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        write!(file, "[1, 2, 3]").expect("write");

        let source = parse_source(&file.path().display().to_string(), Some(SourceKind::File))
            .expect("parse source");
        let err = load_document(&source, &Config::default())
            .await
            .unwrap_err();
        assert!(matches!(err, FttError::InvalidDocument(_)));
    }
}

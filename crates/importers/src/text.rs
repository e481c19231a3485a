use crate::error::{ImportError, Result};
use crate::importer::Importer;
use async_trait::async_trait;
use std::path::Path;

/// Reads the file as-is. Invalid UTF-8 sequences are replaced rather than rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextImporter;

impl TextImporter {
    pub const NAME: &'static str = "TextImporter";
    pub const VERSION: u32 = 1;

    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Importer for TextImporter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn version(&self) -> u32 {
        Self::VERSION
    }

    async fn run(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ImportError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(err) => {
                log::debug!("{} is not valid UTF-8, decoding lossily", path.display());
                Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
            }
        }
    }
}

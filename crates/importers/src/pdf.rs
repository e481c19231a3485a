use crate::command::run_tool;
use crate::error::Result;
use crate::importer::Importer;
use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::Path;

const PDFTOTEXT: &str = "pdftotext";

/// Extracts PDF text with poppler's `pdftotext`, writing to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfImporter;

impl PdfImporter {
    pub const NAME: &'static str = "PdfImporter";
    pub const VERSION: u32 = 1;

    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Importer for PdfImporter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn version(&self) -> u32 {
        Self::VERSION
    }

    async fn run(&self, path: &Path) -> Result<String> {
        let args: [&OsStr; 3] = ["-q".as_ref(), path.as_os_str(), "-".as_ref()];
        run_tool(PDFTOTEXT, args, path).await
    }
}

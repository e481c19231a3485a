//! Document conversion through `pandoc`.
//!
//! pandoc's `plain` writer renders emphasis with underscores, strong emphasis
//! and level 1 headings in ALL CAPS. Headings are shifted down one level so
//! titles keep their original casing in the indexed text.

use crate::command::run_tool;
use crate::error::Result;
use crate::importer::Importer;
use async_trait::async_trait;
use std::ffi::OsStr;
use std::path::Path;

const PANDOC: &str = "pandoc";

#[derive(Debug, Default, Clone, Copy)]
pub struct PandocImporter;

impl PandocImporter {
    pub const NAME: &'static str = "PandocImporter";
    pub const VERSION: u32 = 1;

    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Importer for PandocImporter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn version(&self) -> u32 {
        Self::VERSION
    }

    async fn run(&self, path: &Path) -> Result<String> {
        let args: [&OsStr; 3] = [
            path.as_os_str(),
            "--to=plain".as_ref(),
            "--shift-heading-level-by=1".as_ref(),
        ];
        run_tool(PANDOC, args, path).await
    }
}

//! # Sift Importers
//!
//! Extraction strategies that turn files into plain text for indexing.
//!
//! Each [`Importer`] carries a name and a version. Both are recorded in the
//! index snapshot, so swapping the importer for an extension or bumping its
//! version schedules re-extraction of every affected file.
//!
//! | Extension | Importer |
//! |-----------|----------|
//! | `txt` | [`TextImporter`] (read as-is) |
//! | `md`, `doc`, `docx`, `tex`, `latex`, `html`, `epub` | [`PandocImporter`] (`pandoc -t plain`) |
//! | `pdf` | [`PdfImporter`] (`pdftotext`) |

mod command;
mod error;
mod importer;
mod pandoc;
mod pdf;
mod registry;
mod text;

pub use error::{ImportError, Result};
pub use importer::Importer;
pub use pandoc::PandocImporter;
pub use pdf::PdfImporter;
pub use registry::{has_extension, ImporterRegistry};
pub use text::TextImporter;

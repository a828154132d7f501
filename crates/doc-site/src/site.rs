//! Writing the generated search index and pages to disk.

use std::io;
use std::path::Path;

use crate::markup::PageShell;
use crate::model::SearchIndex;

/// File name of the search index, next to the pages.
pub const SEARCH_INDEX_FILE: &str = "search.json";

pub struct SiteWriter;

impl SiteWriter {
    /// Write `search.json` into `output_dir`, creating the directory if needed.
    pub fn write_index(index: &SearchIndex, output_dir: &Path) -> io::Result<()> {
        std::fs::create_dir_all(output_dir)?;
        let json = index.to_json().map_err(io::Error::other)?;
        std::fs::write(output_dir.join(SEARCH_INDEX_FILE), json)?;
        tracing::info!(entries = index.len(), dir = %output_dir.display(), "wrote search index");
        Ok(())
    }

    /// Render `shell` into `output_dir/file_name`.
    pub fn write_page(shell: &PageShell<'_>, output_dir: &Path, file_name: &str) -> io::Result<()> {
        std::fs::create_dir_all(output_dir)?;
        let html = shell.render().map_err(io::Error::other)?;
        std::fs::write(output_dir.join(file_name), html)
    }
}

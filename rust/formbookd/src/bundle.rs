use anyhow::Context;
use serde_json::json;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::render::html::{print_document, RenderMode};
use crate::render::Page;
use crate::session::Session;

const MANIFEST_ENTRY: &str = "manifest.json";
const DOCUMENT_ENTRY: &str = "document.html";
pub const BUNDLE_FORMAT_V1: &str = "formbook-print-v1";

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub bundle_format: String,
    pub entry_count: usize,
    pub page_count: usize,
}

/// Writes the print-mode document for `pages` into a zip at `out_path`.
pub fn export_print_bundle(
    session: &Session,
    pages: &[Page],
    out_path: &Path,
) -> anyhow::Result<ExportSummary> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.to_string_lossy()))?;
    }

    let out_file = File::create(out_path).with_context(|| {
        format!(
            "failed to create output file {}",
            out_path.to_string_lossy()
        )
    })?;
    let mut zip = ZipWriter::new(out_file);
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let signature = session.signature.as_ref();
    let manifest = json!({
        "format": BUNDLE_FORMAT_V1,
        "version": 1,
        "appVersion": env!("CARGO_PKG_VERSION"),
        "exportedAt": chrono::Utc::now().to_rfc3339(),
        "pages": pages.iter().map(|p| p.kind.as_str()).collect::<Vec<_>>(),
        "omittedStudents": pages.iter().map(|p| p.omitted_students).max().unwrap_or(0),
        "signature": signature.map(|img| img.bundle_entry_name()),
    });
    zip.start_file(MANIFEST_ENTRY, opts)
        .context("failed to start manifest entry")?;
    zip.write_all(
        serde_json::to_string_pretty(&manifest)
            .context("failed to serialize manifest")?
            .as_bytes(),
    )
    .context("failed to write manifest entry")?;

    let document = print_document(pages, signature, RenderMode::Print).into_string();
    zip.start_file(DOCUMENT_ENTRY, opts)
        .context("failed to start document entry")?;
    zip.write_all(document.as_bytes())
        .context("failed to write document entry")?;

    let mut entry_count = 2;
    if let Some(img) = signature {
        zip.start_file(img.bundle_entry_name(), opts)
            .context("failed to start signature entry")?;
        zip.write_all(&img.bytes)
            .context("failed to write signature entry")?;
        entry_count += 1;
    }

    zip.finish().context("failed to finalize zip bundle")?;
    tracing::info!(
        path = %out_path.to_string_lossy(),
        pages = pages.len(),
        "print bundle written"
    );

    Ok(ExportSummary {
        bundle_format: BUNDLE_FORMAT_V1.to_string(),
        entry_count,
        page_count: pages.len(),
    })
}

//! PDF rendering through an external headless browser engine.
//!
//! Each conversion launches its own engine process, scoped to the call:
//! the process is awaited to completion, killed if the bounded wait
//! expires, and never shared between conversions. Temporary HTML
//! artifacts live in [`tempfile::NamedTempFile`] handles, so they are
//! removed on every exit path.

pub mod engine;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::{Error, Result};
use crate::{html, package};

/// Options for the PDF render path.
#[derive(Debug, Clone)]
pub struct PdfRenderOptions {
    /// Explicit render-engine executable; discovered when `None`.
    pub engine_path: Option<PathBuf>,

    /// Bound on the render subprocess; the process is killed on expiry.
    pub timeout: Duration,
}

impl PdfRenderOptions {
    /// Create options with the default timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit render-engine executable.
    pub fn with_engine_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.engine_path = Some(path.into());
        self
    }

    /// Set the render timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for PdfRenderOptions {
    fn default() -> Self {
        Self {
            engine_path: None,
            timeout: Duration::from_secs(120),
        }
    }
}

/// Render an HTML file to PDF.
///
/// Fails with [`Error::NotFound`] if the source is missing and with
/// [`Error::RenderEngineNotFound`] if no engine resolves. The HTML
/// content is handed to the engine as a base64 `data:` URL, not a file
/// URL; the page's own `@page` rule supplies A4 geometry and margins.
pub async fn html_to_pdf(source: &Path, dest: &Path, options: &PdfRenderOptions) -> Result<()> {
    if !source.exists() {
        return Err(Error::NotFound(source.to_path_buf()));
    }
    let content = tokio::fs::read_to_string(source).await?;
    render_html(&content, dest, options).await
}

/// Convert a DOCX file to PDF via a temporary HTML artifact.
///
/// Returns the number of blocks rendered. The source is parsed before
/// any temporary file is created, so a missing or invalid source leaves
/// nothing behind.
pub async fn document_to_pdf(
    source: &Path,
    dest: &Path,
    options: &PdfRenderOptions,
) -> Result<usize> {
    let doc = package::docx::parse(source)?;
    let content = html::render::document_to_html(&doc);
    render_via_temp(&content, dest, options).await?;
    Ok(doc.block_count())
}

/// Convert an XLSX file to PDF via a temporary HTML artifact.
///
/// Returns the number of sheets rendered.
pub async fn spreadsheet_to_pdf(
    source: &Path,
    dest: &Path,
    options: &PdfRenderOptions,
) -> Result<usize> {
    let sheets = package::xlsx::parse(source)?;
    let title = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Workbook".into());
    let content = html::render::sheets_to_html(&sheets, &title);
    render_via_temp(&content, dest, options).await?;
    Ok(sheets.len())
}

/// Stage HTML in a scoped temporary file and delegate to [`html_to_pdf`].
///
/// The temp file is dropped (and deleted) whether the render succeeds,
/// fails, or the future is cancelled.
async fn render_via_temp(content: &str, dest: &Path, options: &PdfRenderOptions) -> Result<()> {
    let mut temp = tempfile::Builder::new()
        .prefix("docbridge-")
        .suffix(".html")
        .tempfile()?;
    temp.write_all(content.as_bytes())?;
    temp.flush()?;
    log::debug!("staged HTML artifact at {}", temp.path().display());

    html_to_pdf(temp.path(), dest, options).await
}

/// Fixed page setup for every render: A4, 1 cm margins, backgrounds on.
const PAGE_SETUP: &str = "<style>@page { size: A4; margin: 1cm; } \
body { -webkit-print-color-adjust: exact; print-color-adjust: exact; }</style>";

/// Inject the page-setup rules so arbitrary source HTML renders with the
/// same geometry as generated pages.
fn with_page_setup(content: &str) -> String {
    match content.to_ascii_lowercase().find("<head>") {
        Some(pos) => {
            let insert_at = pos + "<head>".len();
            format!("{}{}{}", &content[..insert_at], PAGE_SETUP, &content[insert_at..])
        }
        None => format!("{PAGE_SETUP}{content}"),
    }
}

async fn render_html(content: &str, dest: &Path, options: &PdfRenderOptions) -> Result<()> {
    let engine = engine::resolve(options.engine_path.as_deref())?;
    let url = format!(
        "data:text/html;base64,{}",
        BASE64.encode(with_page_setup(content))
    );

    log::debug!(
        "launching {} for {} bytes of HTML -> {}",
        engine.display(),
        content.len(),
        dest.display()
    );

    let mut command = tokio::process::Command::new(&engine);
    command
        .arg("--headless")
        .arg("--disable-gpu")
        .arg("--no-pdf-header-footer")
        .arg(format!("--print-to-pdf={}", dest.display()))
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        // Guarantees teardown if the bounded wait below gives up first.
        .kill_on_drop(true);

    let child = command
        .spawn()
        .map_err(|e| Error::Render(format!("failed to launch {}: {e}", engine.display())))?;

    let output = match tokio::time::timeout(options.timeout, child.wait_with_output()).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(Error::Render(format!(
                "render engine timed out after {} s",
                options.timeout.as_secs()
            )));
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Render(format!(
            "render engine exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }
    if !dest.exists() {
        return Err(Error::Render(format!(
            "render engine produced no output at {}",
            dest.display()
        )));
    }
    Ok(())
}

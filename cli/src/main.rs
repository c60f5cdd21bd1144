//! docbridge CLI - office document conversion tool

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use docbridge::{convert, ConversionOutcome, PdfRenderOptions};

#[derive(Parser)]
#[command(name = "docbridge")]
#[command(version)]
#[command(about = "Convert office documents among DOCX, XLSX, HTML, text, and PDF", long_about = None)]
struct Cli {
    /// Print the conversion outcome as JSON instead of status lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a DOCX document to HTML
    DocxToHtml {
        /// Input DOCX file
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        /// Output HTML file
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Convert an HTML document to DOCX
    HtmlToDocx {
        /// Input HTML file
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        /// Output DOCX file
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Convert an XLSX workbook to HTML
    XlsxToHtml {
        /// Input XLSX file
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        /// Output HTML file
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Convert the tables of an HTML document to XLSX
    HtmlToXlsx {
        /// Input HTML file
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        /// Output XLSX file
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Convert a DOCX document to PDF
    DocxToPdf {
        /// Input DOCX file
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        /// Output PDF file
        #[arg(long, value_name = "FILE")]
        output: PathBuf,

        /// Explicit render-engine executable (discovered when omitted)
        #[arg(long, value_name = "FILE")]
        chrome_path: Option<PathBuf>,
    },

    /// Convert an XLSX workbook to PDF
    XlsxToPdf {
        /// Input XLSX file
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        /// Output PDF file
        #[arg(long, value_name = "FILE")]
        output: PathBuf,

        /// Explicit render-engine executable (discovered when omitted)
        #[arg(long, value_name = "FILE")]
        chrome_path: Option<PathBuf>,
    },

    /// Render an HTML document to PDF
    HtmlToPdf {
        /// Input HTML file
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        /// Output PDF file
        #[arg(long, value_name = "FILE")]
        output: PathBuf,

        /// Explicit render-engine executable (discovered when omitted)
        #[arg(long, value_name = "FILE")]
        chrome_path: Option<PathBuf>,
    },

    /// Convert a plain-text file to HTML
    TextToHtml {
        /// Input text file
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        /// Output HTML file
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Convert an HTML document to plain text
    HtmlToText {
        /// Input HTML file
        #[arg(long, value_name = "FILE")]
        input: PathBuf,

        /// Output text file
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let json = cli.json;

    let outcome = match cli.command {
        Commands::DocxToHtml { input, output } => convert::docx_to_html(&input, &output),
        Commands::HtmlToDocx { input, output } => convert::html_to_docx(&input, &output),
        Commands::XlsxToHtml { input, output } => convert::xlsx_to_html(&input, &output),
        Commands::HtmlToXlsx { input, output } => convert::html_to_xlsx(&input, &output),
        Commands::TextToHtml { input, output } => convert::text_to_html(&input, &output),
        Commands::HtmlToText { input, output } => convert::html_to_text(&input, &output),
        Commands::DocxToPdf {
            input,
            output,
            chrome_path,
        } => run_async(|options| async move { convert::docx_to_pdf(&input, &output, &options).await }, chrome_path),
        Commands::XlsxToPdf {
            input,
            output,
            chrome_path,
        } => run_async(|options| async move { convert::xlsx_to_pdf(&input, &output, &options).await }, chrome_path),
        Commands::HtmlToPdf {
            input,
            output,
            chrome_path,
        } => run_async(|options| async move { convert::html_to_pdf(&input, &output, &options).await }, chrome_path),
    };

    std::process::exit(report(&outcome, json));
}

/// Drive one async PDF conversion to completion on a fresh runtime.
fn run_async<F, Fut>(conversion: F, chrome_path: Option<PathBuf>) -> ConversionOutcome
where
    F: FnOnce(PdfRenderOptions) -> Fut,
    Fut: std::future::Future<Output = ConversionOutcome>,
{
    let mut options = PdfRenderOptions::default();
    if let Some(path) = chrome_path {
        options = options.with_engine_path(path);
    }

    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt.block_on(conversion(options)),
        Err(e) => {
            let err = docbridge::Error::Conversion(format!("failed to start runtime: {e}"));
            ConversionOutcome::failure(&err)
        }
    }
}

/// Print the outcome and return the process exit code.
fn report(outcome: &ConversionOutcome, json: bool) -> i32 {
    if json {
        match serde_json::to_string_pretty(outcome) {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("{}: {e}", "Error".red().bold()),
        }
        return if outcome.success { 0 } else { 1 };
    }

    for message in &outcome.messages {
        println!("{} {message}", "·".dimmed());
    }

    if outcome.success {
        let path = outcome
            .output_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        println!(
            "{} {path} ({} items)",
            "Done:".green().bold(),
            outcome.items_processed
        );
        0
    } else {
        let message = outcome.error_message.as_deref().unwrap_or("unknown error");
        eprintln!("{}: {message}", "Error".red().bold());
        1
    }
}

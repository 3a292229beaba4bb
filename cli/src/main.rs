//! pdfstruct CLI - PDF metadata, text and structure extraction

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use pdfstruct::render::to_json;
use pdfstruct::{
    CleanupOptions, DocxExtraction, ExtractOptions, JsonFormat, PdfExtraction, SystemRunner,
    Tool, ToolRunner,
};

#[derive(Parser)]
#[command(name = "pdfstruct")]
#[command(version)]
#[command(about = "Extract metadata, text and tagged structure from PDFs", long_about = None)]
struct Cli {
    /// Directory holding the poppler and pandoc executables
    #[arg(long, global = true, value_name = "DIR", env = "PDFSTRUCT_TOOL_DIR")]
    tool_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show metadata, image statistics and the scan heuristic as JSON
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Extract plain text
    Text {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Normalize Unicode and collapse whitespace
        #[arg(long)]
        clean: bool,

        /// Do not preserve the physical layout
        #[arg(long)]
        raw: bool,
    },

    /// Dump the pdftohtml XML layout
    Xml {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Convert the tagged structure tree to HTML
    Html {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Render the first page as PNG
    Thumb {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Rendering resolution
        #[arg(long, default_value = "50")]
        dpi: u32,
    },

    /// Run every extraction and write the results to a directory
    Convert {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Extract info for many PDFs in parallel, one JSON line each
    Batch {
        /// Input PDF files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output JSON Lines file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Convert a Word document through pandoc
    Docx {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Pandoc output format
        #[arg(long, default_value = pdfstruct::extract::DEFAULT_DOCX_OUTPUT)]
        to: String,
    },

    /// Check that the external tools can be found
    Check,

    /// Show version information
    Version,
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let runner = match cli.tool_dir {
        Some(dir) => SystemRunner::new().with_tool_dir(dir),
        None => SystemRunner::new(),
    };

    let result = match cli.command {
        Commands::Info { input, compact } => cmd_info(&runner, &input, compact),
        Commands::Text {
            input,
            output,
            clean,
            raw,
        } => cmd_text(&runner, &input, output.as_deref(), clean, raw),
        Commands::Xml { input, output } => cmd_xml(&runner, &input, output.as_deref()),
        Commands::Html { input, output } => cmd_html(&runner, &input, output.as_deref()),
        Commands::Thumb { input, output, dpi } => cmd_thumb(&runner, &input, &output, dpi),
        Commands::Convert { input, output } => cmd_convert(&runner, &input, output.as_deref()),
        Commands::Batch { inputs, output } => cmd_batch(&runner, &inputs, output.as_deref()),
        Commands::Docx { input, to } => cmd_docx(&runner, &input, &to),
        Commands::Check => cmd_check(&runner),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn open<'a>(
    runner: &'a SystemRunner,
    input: &Path,
) -> pdfstruct::Result<PdfExtraction<&'a SystemRunner>> {
    let pdf = PdfExtraction::open_with_runner(input, runner)?;
    if !pdf.is_pdf() {
        eprintln!(
            "{} {} is not a PDF",
            "Warning:".yellow().bold(),
            input.display()
        );
    }
    Ok(pdf)
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_info(runner: &SystemRunner, input: &Path, compact: bool) -> CliResult {
    let mut pdf = open(runner, input)?;
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    println!("{}", to_json(&pdf.info()?, format)?);
    Ok(())
}

fn cmd_text(
    runner: &SystemRunner,
    input: &Path,
    output: Option<&Path>,
    clean: bool,
    raw: bool,
) -> CliResult {
    let mut options = ExtractOptions::new().with_layout(!raw);
    if clean {
        options = options.with_cleanup(CleanupOptions::standard());
    }

    let pdf = open(runner, input)?.with_options(options);
    write_or_print(output, &pdf.text()?.unwrap_or_default())
}

fn cmd_xml(runner: &SystemRunner, input: &Path, output: Option<&Path>) -> CliResult {
    let pdf = open(runner, input)?;
    write_or_print(output, &pdf.xml()?.unwrap_or_default())
}

fn cmd_html(runner: &SystemRunner, input: &Path, output: Option<&Path>) -> CliResult {
    let mut pdf = open(runner, input)?;
    let html = pdf.html()?;
    if html.is_empty() {
        eprintln!("{}", "No structure tree (document is not tagged)".yellow());
        return Ok(());
    }
    write_or_print(output, &html)
}

fn cmd_thumb(runner: &SystemRunner, input: &Path, output: &Path, dpi: u32) -> CliResult {
    let pdf = open(runner, input)?.with_options(ExtractOptions::new().with_thumbnail_dpi(dpi));

    match pdf.thumbnail()? {
        Some(png) => {
            fs::write(output, png)?;
            println!("{} {}", "Saved to".green(), output.display());
        }
        None => eprintln!("{}", "No thumbnail produced".yellow()),
    }
    Ok(())
}

fn cmd_convert(runner: &SystemRunner, input: &Path, output: Option<&Path>) -> CliResult {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(5);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    let mut pdf = open(runner, input)?;

    pb.set_message("Reading metadata...");
    let info = pdf.info()?;
    fs::write(
        output_dir.join("info.json"),
        to_json(&info, JsonFormat::Pretty)?,
    )?;
    pb.inc(1);

    pb.set_message("Extracting text...");
    fs::write(
        output_dir.join("extract.txt"),
        pdf.text()?.unwrap_or_default(),
    )?;
    pb.inc(1);

    pb.set_message("Extracting XML...");
    fs::write(output_dir.join("extract.xml"), pdf.xml()?.unwrap_or_default())?;
    pb.inc(1);

    pb.set_message("Converting structure...");
    let html = pdf.html()?;
    if !html.is_empty() {
        fs::write(output_dir.join("extract.html"), &html)?;
    }
    pb.inc(1);

    pb.set_message("Rendering thumbnail...");
    let thumbnail = pdf.thumbnail()?;
    if let Some(ref png) = thumbnail {
        fs::write(output_dir.join("thumb.png"), png)?;
    }
    pb.inc(1);

    pb.finish_with_message("Done!");

    let mut files = vec!["info.json", "extract.txt", "extract.xml"];
    if !html.is_empty() {
        files.push("extract.html");
    }
    if thumbnail.is_some() {
        files.push("thumb.png");
    }

    println!("\n{}", "Output files:".green().bold());
    for (i, file) in files.iter().enumerate() {
        let branch = if i + 1 == files.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), file);
    }

    Ok(())
}

fn batch_line(runner: &SystemRunner, input: &Path) -> serde_json::Value {
    let result = PdfExtraction::open_with_runner(input, runner).and_then(|mut pdf| {
        let info = pdf.info()?;
        let html = pdf.html()?;
        Ok((info, html.len()))
    });

    match result {
        Ok((info, html_len)) => serde_json::json!({
            "file": input.display().to_string(),
            "info": info,
            "html_bytes": html_len,
        }),
        Err(e) => {
            log::warn!("{}: {}", input.display(), e);
            serde_json::json!({
                "file": input.display().to_string(),
                "error": e.to_string(),
            })
        }
    }
}

fn cmd_batch(runner: &SystemRunner, inputs: &[PathBuf], output: Option<&Path>) -> CliResult {
    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let lines: Vec<serde_json::Value> = inputs
        .par_iter()
        .map(|input| {
            let line = batch_line(runner, input);
            pb.inc(1);
            line
        })
        .collect();
    pb.finish_and_clear();

    let failed = lines.iter().filter(|l| l.get("error").is_some()).count();

    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(std::io::BufWriter::new(fs::File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    };
    for line in &lines {
        writeln!(out, "{}", serde_json::to_string(line)?)?;
    }
    out.flush()?;

    eprintln!(
        "{} {} documents, {} failed",
        "Done!".green().bold(),
        lines.len(),
        failed
    );
    Ok(())
}

fn cmd_docx(runner: &SystemRunner, input: &Path, to: &str) -> CliResult {
    let text = DocxExtraction::open_with_runner(input, runner)?.parse(to)?;
    println!("{}", text);
    Ok(())
}

fn cmd_check(runner: &SystemRunner) -> CliResult {
    println!("{}", "External tools".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let mut missing = 0;
    for tool in Tool::POPPLER.iter().copied().chain([Tool::Pandoc]) {
        if runner.is_available(tool) {
            println!("  {} {}", "✓".green(), tool);
        } else {
            println!("  {} {}", "✗".red(), tool);
            if tool != Tool::Pandoc {
                missing += 1;
            }
        }
    }

    if let Some(dir) = runner.tool_dir() {
        println!("\n{}: {}", "Tool directory".bold(), dir.display());
    }

    if missing > 0 {
        return Err(format!("{} poppler utilities missing", missing).into());
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfstruct".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF metadata, text and structure extraction");
    println!();
    println!("Requires: poppler-utils (pandoc for DOCX)");
    println!("License: MIT");
}

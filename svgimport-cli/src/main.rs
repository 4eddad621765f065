//! `svgimport` CLI: import an SVG drawing into an in-memory scene, report
//! what was built, and optionally write a preview.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use svgimport_core::{Diagnostic, ImportOptions, Severity, import_file};
use svgimport_geometry::scene::Scene;
use svgimport_svg::render_to_string;

#[derive(Parser)]
#[command(version, about = "Import SVG drawings as grouped 3D-ready geometry")]
struct Cli {
    /// SVG file to import
    file: PathBuf,

    /// Write an SVG preview of the imported scene to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Document scale multiplier applied on top of the 90 units per inch
    #[arg(long, value_name = "F")]
    scale: Option<f64>,

    /// Report element begin/end and skipped elements, and log at debug level
    #[arg(long)]
    debug: bool,

    /// Paint the back side of filled faces as well
    #[arg(long)]
    back_material: bool,
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("svgimport=debug,svgimport_core=debug,svgimport_geometry=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let options = ImportOptions {
        debug: cli.debug,
        scale: cli.scale,
        back_material: cli.back_material,
        base_dir: None,
    };

    tracing::debug!(file = %cli.file.display(), ?options, "starting import");
    let mut scene = Scene::new();
    let report = match import_file(&mut scene, &cli.file, &options) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    print_diagnostics(&report.diagnostics);

    let stats = scene.stats();
    println!(
        "Imported {}: {} groups, {} edges, {} curves, {} faces, {} images",
        cli.file.display(),
        stats.groups,
        stats.edges,
        stats.curves,
        stats.faces,
        stats.images,
    );

    if let Some(ref output) = cli.output {
        if let Err(e) = fs::write(output, render_to_string(&scene)) {
            eprintln!("Error writing {}: {e}", output.display());
            process::exit(1);
        }
        println!("Wrote {}", output.display());
    }
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        match d.severity {
            Severity::Info => println!("{d}"),
            Severity::Warning => eprintln!("{d}"),
        }
    }
}

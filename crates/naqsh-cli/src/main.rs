// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Naqsh — synthetic Urdu word-image corpus generator.
//
// Entry point. Initialises logging, builds the default configuration, and
// runs one of the three pipeline modes:
//
//   naqsh compose <font.ttf> <sheets.pdf>        render the grid-sheet PDF
//   naqsh generate <font.ttf> <output-dir>       render the corpus directly
//   naqsh extract <pages-dir> <output-dir> [sheets.pdf]
//                                                extract from page rasters,
//                                                optionally asserting the
//                                                source PDF's page count

use std::process::ExitCode;

use naqsh_core::{CorpusConfig, NaqshError, Result, RunSummary};
use naqsh_corpus::{AbGlyphRenderer, PageImages, Pipeline, SheetInfo};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Naqsh starting");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "Run aborted");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("compose") if args.len() == 3 => {
            let pipeline = Pipeline::new(CorpusConfig::default())?;
            let glyphs = AbGlyphRenderer::from_file(&args[1], pipeline.config().font_scale)?;
            let bytes = pipeline.compose_sheets(&glyphs)?;
            std::fs::write(&args[2], &bytes)?;
            tracing::info!(path = %args[2], "Word sheets written");
            Ok(())
        }
        Some("generate") if args.len() == 3 => {
            let mut config = CorpusConfig::default();
            config.output_root = std::path::PathBuf::from(&args[2]);
            let pipeline = Pipeline::new(config)?;
            let glyphs = AbGlyphRenderer::from_file(&args[1], pipeline.config().font_scale)?;
            report(pipeline.generate(&glyphs)?)
        }
        Some("extract") if args.len() == 3 || args.len() == 4 => {
            let mut config = CorpusConfig::default();
            config.output_root = std::path::PathBuf::from(&args[2]);
            let pipeline = Pipeline::new(config)?;

            if let Some(pdf_path) = args.get(3) {
                let info = SheetInfo::open(pdf_path)?;
                pipeline.check_sheet(&info);
            }

            let source = PageImages::open_dir(&args[1])?;
            report(pipeline.extract(&source)?)
        }
        _ => Err(NaqshError::Configuration(
            "usage: naqsh compose <font.ttf> <sheets.pdf> | \
             naqsh generate <font.ttf> <output-dir> | \
             naqsh extract <pages-dir> <output-dir> [sheets.pdf]"
                .to_string(),
        )),
    }
}

/// Print the completeness report to stdout as JSON.
fn report(summary: RunSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

mod cli;
mod manifest;
mod writer;

use anyhow::{bail, Result};
use clap::Parser;
use log::{info, warn};
use swiftmod_codegen::{generate_all, CodeGenerator, TaggedUnionGenerator};

use crate::cli::Args;
use crate::manifest::Manifest;
use crate::writer::UnitWriter;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    let options = args.generator_options()?;
    let manifest = Manifest::from_file(&args.input)?;
    info!(
        "Loaded {} signatures from {}{}",
        manifest.signatures().len(),
        args.input.display(),
        manifest
            .module()
            .map(|m| format!(" (module {})", m))
            .unwrap_or_default()
    );

    let generator = TaggedUnionGenerator::with_options(options);
    let extension = generator.file_extension();
    let outcomes = generate_all(&generator, manifest.signatures());

    let mut units = Vec::with_capacity(outcomes.len());
    let mut failed = 0;
    for outcome in outcomes {
        let category = outcome.category;
        let unit = outcome.into_unit(extension);
        for error in &unit.errors {
            eprintln!("error: {} category: {}", category, error);
        }
        if !unit.is_successful() {
            failed += 1;
        }
        units.push(unit);
    }

    if failed > 0 && !args.keep_going {
        bail!(
            "{} of {} categories failed; nothing was written (use --keep-going to write the rest)",
            failed,
            units.len()
        );
    }

    let writer = UnitWriter::new(&args.out, extension);
    let removed = writer.prepare(args.clean)?;
    if removed > 0 {
        info!("Removed {} previously generated files", removed);
    }

    for unit in units.iter().filter(|u| u.is_successful()) {
        let path = writer.write(unit)?;
        println!("{} ({} cases)", path.display(), unit.item_count);
    }

    if failed > 0 {
        warn!(
            "Skipped {} failed categories; output in {}",
            failed,
            writer.out_dir().display()
        );
    }

    Ok(())
}

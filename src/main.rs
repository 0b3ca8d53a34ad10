use std::env;
use std::fs;
use tessera::{ComposerBuilder, PipelineError, RenderContext};

/// Composes a graphic from a config, a module manifest and a render context.
fn main() -> Result<(), PipelineError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 5 {
        eprintln!("Composes module fragments into a single HTML document.");
        eprintln!();
        eprintln!(
            "Usage: {} <path/to/config.json> <path/to/modules.json> <path/to/context.json> <path/to/output.html>",
            args[0]
        );
        eprintln!();
        eprintln!("Set RUST_LOG=debug to see skipped rules and suppressed items.");
        std::process::exit(1);
    }

    let config_path = &args[1];
    let manifest_path = &args[2];
    let context_path = &args[3];
    let output_path = &args[4];

    println!("Loading config from {}", config_path);
    println!("Loading modules from {}", manifest_path);
    let composer = ComposerBuilder::new()
        .with_config_file(config_path)?
        .with_manifest_file(manifest_path)?
        .build()?;

    println!("Loading render context from {}", context_path);
    let context: RenderContext = serde_json::from_str(&fs::read_to_string(context_path)?)?;

    let composition = composer.compose(&context)?;
    for failure in &composition.rule_failures {
        eprintln!("Warning: {}", failure);
    }

    fs::write(
        output_path,
        tessera::document::wrap_document(&composition.html, &context),
    )?;
    println!("Successfully generated {}", output_path);
    Ok(())
}

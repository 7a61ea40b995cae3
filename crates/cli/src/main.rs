use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::Parser;
use serde_json::{Map, Value};

use facelens_core::detection::domain::detector_options::DetectorOptions;
use facelens_core::detection::domain::options_mapper::map_options;
use facelens_core::detection::infrastructure::recorded_face_engine::RecordedFaceEngine;
use facelens_core::pipeline::detect_error::DetectError;
use facelens_core::pipeline::detect_faces_use_case::DetectFacesUseCase;
use facelens_core::pipeline::plugin_call::{IMAGE_KEY, OPTIONS_KEY};
use facelens_core::shared::constants::IMAGE_EXTENSIONS;

/// Run a detectInImage call against recorded engine output.
#[derive(Parser)]
#[command(name = "facelens")]
struct Cli {
    /// Request JSON file: {"image": "<base64>", "options": {...}}.
    request: Option<PathBuf>,

    /// Recorded engine output (JSON array of face records).
    #[arg(long)]
    faces: PathBuf,

    /// Image file to send instead of a request file.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Options bag as inline JSON (only with --image).
    #[arg(long)]
    options: Option<String>,

    /// Engine defaults as an options bag, e.g. '{"landmarkMode": 2}'.
    #[arg(long)]
    engine_defaults: Option<String>,

    /// Make the engine fail every detection with this message.
    #[arg(long)]
    fail_with: Option<String>,

    /// Give up waiting for the engine after this many milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Pretty-print the response.
    #[arg(long)]
    pretty: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        match e.downcast_ref::<DetectError>() {
            Some(detect) => eprintln!("Error [{}]: {detect}", detect.kind()),
            None => eprintln!("Error: {e}"),
        }
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let mut engine = RecordedFaceEngine::load(&cli.faces)?;
    if let Some(defaults) = &cli.engine_defaults {
        engine = engine.with_defaults(parse_engine_defaults(defaults)?);
    }
    if let Some(message) = &cli.fail_with {
        engine = engine.with_failure(message.clone());
    }
    let request = build_request(&cli)?;
    let use_case = DetectFacesUseCase::new(Arc::new(engine));

    let response =
        use_case.execute_blocking(request, cli.timeout_ms.map(Duration::from_millis))?;

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{rendered}");
    Ok(())
}

fn parse_engine_defaults(json: &str) -> Result<DetectorOptions, Box<dyn std::error::Error>> {
    let bag: Value = serde_json::from_str(json)
        .map_err(|e| format!("--engine-defaults is not valid JSON: {e}"))?;
    let defaults = map_options(Some(&bag), &DetectorOptions::default())?;
    log::info!("Engine defaults: {defaults:?}");
    Ok(defaults)
}

fn build_request(cli: &Cli) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.request {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read request {}: {e}", path.display()))?;
        return Ok(serde_json::from_str(&json)?);
    }

    let mut request = Map::new();
    if let Some(path) = &cli.image {
        let bytes =
            fs::read(path).map_err(|e| format!("Failed to read image {}: {e}", path.display()))?;
        log::info!("Encoding {} ({} bytes)", path.display(), bytes.len());
        request.insert(IMAGE_KEY.to_string(), Value::String(STANDARD.encode(bytes)));
    }
    if let Some(options) = &cli.options {
        let options: Value = serde_json::from_str(options)
            .map_err(|e| format!("--options is not valid JSON: {e}"))?;
        request.insert(OPTIONS_KEY.to_string(), options);
    }
    Ok(Value::Object(request))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.faces.exists() {
        return Err(format!("Recording not found: {}", cli.faces.display()).into());
    }
    match (&cli.request, &cli.image) {
        (Some(_), Some(_)) => {
            return Err("Pass either a request file or --image, not both".into());
        }
        (None, None) => return Err("A request file or --image is required".into()),
        (Some(request), None) => {
            if !request.exists() {
                return Err(format!("Request file not found: {}", request.display()).into());
            }
            if cli.options.is_some() {
                return Err("--options can only be used with --image".into());
            }
        }
        (None, Some(image)) => {
            if !image.exists() {
                return Err(format!("Image file not found: {}", image.display()).into());
            }
            if !is_image(image) {
                return Err(format!(
                    "Unsupported image type: {} (expected one of {})",
                    image.display(),
                    IMAGE_EXTENSIONS.join(", ")
                )
                .into());
            }
        }
    }
    if cli.timeout_ms == Some(0) {
        return Err("Timeout must be greater than 0".into());
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

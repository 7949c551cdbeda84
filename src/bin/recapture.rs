use clap::{Parser, Subcommand};
use qr_recapture::logger;
use qr_recapture::tools::{dataset_iter, dataset_root_from_env, load_color_image};
use qr_recapture::{BatchSummary, ExtractorConfig, FeatureExtractor, ForestModel, Pipeline};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "recapture", version, about = "Original vs recaptured QR photo classifier")]
struct Cli {
    /// Override the white threshold (0-255, strict)
    #[arg(long, global = true)]
    threshold: Option<u8>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the feature vector of an image as JSON
    Extract {
        #[arg(long)]
        image: PathBuf,
    },
    /// Classify a single image
    Classify {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        model: PathBuf,
    },
    /// Classify every image under a directory
    Batch {
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long)]
        model: PathBuf,
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> ExitCode {
    logger::init();
    let cli = Cli::parse();

    let mut config = ExtractorConfig::default();
    if let Some(threshold) = cli.threshold {
        config = config.with_white_threshold(threshold);
    }
    let extractor = FeatureExtractor::new(config);

    match cli.command {
        Command::Extract { image } => extract_cmd(&extractor, &image),
        Command::Classify { image, model } => classify_cmd(extractor, &image, &model),
        Command::Batch { root, model, limit } => batch_cmd(extractor, root, &model, limit),
    }
}

fn build_pipeline(extractor: FeatureExtractor, model: &Path) -> Option<Pipeline<ForestModel>> {
    let model = match ForestModel::load(model) {
        Ok(model) => model,
        Err(err) => {
            error!("Failed to load model {}: {}", model.display(), err);
            return None;
        }
    };
    match Pipeline::new(extractor, model) {
        Ok(pipeline) => Some(pipeline),
        Err(err) => {
            error!("Model is incompatible: {}", err);
            None
        }
    }
}

fn extract_cmd(extractor: &FeatureExtractor, image: &Path) -> ExitCode {
    let img = match load_color_image(image) {
        Ok(img) => img,
        Err(err) => {
            error!("Failed to load image {}: {}", image.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let features = extractor.extract(&img);
    if features.is_insufficient_signal() {
        warn!("No white region found in {}", image.display());
    }
    match serde_json::to_string_pretty(&features.summary()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Failed to serialize features: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn classify_cmd(extractor: FeatureExtractor, image: &Path, model: &Path) -> ExitCode {
    let Some(pipeline) = build_pipeline(extractor, model) else {
        return ExitCode::FAILURE;
    };

    match pipeline.classify_path(image) {
        Ok(result) => match serde_json::to_string(&result) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!("Failed to serialize result: {}", err);
                ExitCode::FAILURE
            }
        },
        Err(err) if err.is_insufficient_signal() => {
            warn!("Insufficient features: no white region in {}", image.display());
            ExitCode::from(2)
        }
        Err(err) => {
            error!("Failed to classify {}: {}", image.display(), err);
            ExitCode::FAILURE
        }
    }
}

fn batch_cmd(
    extractor: FeatureExtractor,
    root: Option<PathBuf>,
    model: &Path,
    limit: Option<usize>,
) -> ExitCode {
    let Some(pipeline) = build_pipeline(extractor, model) else {
        return ExitCode::FAILURE;
    };

    let root = root.unwrap_or_else(dataset_root_from_env);
    let images: Vec<PathBuf> = dataset_iter(&root, limit).collect();
    if images.is_empty() {
        warn!("No images found under {}", root.display());
        return ExitCode::SUCCESS;
    }

    info!("Classifying {} images under {}", images.len(), root.display());
    let start = Instant::now();
    let items = pipeline.classify_batch(images);
    let elapsed = start.elapsed();

    for item in &items {
        match &item.outcome {
            Ok(result) => println!("{}\t{}", item.path.display(), result),
            Err(err) => println!("{}\terror: {}", item.path.display(), err),
        }
    }

    let summary = BatchSummary::from_items(&items);
    println!(
        "Total: {}  original: {}  recaptured: {}  insufficient: {}  failed: {}  ({:.2?})",
        summary.total,
        summary.original,
        summary.recaptured,
        summary.insufficient_signal,
        summary.failed,
        elapsed
    );
    ExitCode::SUCCESS
}

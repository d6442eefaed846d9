use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use nerval::io::{read_records, read_tagged_documents, render_metrics, write_json, write_text};
use nerval::{
    count_labels, count_labels_in_records, evaluate_documents, parse_exchange_file,
    prelabel_document, read_span_documents, read_span_set_documents, read_word_indexed_documents,
    AnnotationSource, CountConfig, EvalConfig, EvaluationReport, Granularity, ReportConfig,
    WhitespaceBoundary,
};

#[derive(Parser)]
#[command(name = "nerval")]
#[command(author, version, about = "NER annotation conversion and evaluation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Form {
    /// Text with (start, end, label, text) spans in annotation order
    Spans,
    /// Text with whitespace word positions
    Words,
    /// Text with the unique (start, end, label) set
    Dedup,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an annotation export into a normalized form
    Convert {
        /// Annotation export file (JSON task list)
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,

        /// Target form
        #[arg(long, value_enum, default_value = "spans")]
        form: Form,

        /// Task field to read results from
        #[arg(long, value_enum, default_value = "annotations")]
        source: AnnotationSource,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Score an evaluated export against a ground-truth export
    Evaluate {
        /// Ground-truth annotation export
        #[arg(short, long)]
        ground: PathBuf,

        /// Annotation export to evaluate
        #[arg(short, long)]
        eval: PathBuf,

        /// Task field the evaluated export is read from (ground truth uses annotations)
        #[arg(long, value_enum, default_value = "annotations")]
        eval_source: AnnotationSource,

        /// Value compared between the two exports
        #[arg(long, value_enum, default_value = "span")]
        granularity: Granularity,

        /// List false negatives and false positives
        #[arg(long)]
        show_differences: bool,

        /// Digits after the decimal point
        #[arg(long, default_value = "2")]
        decimals: usize,

        /// Optional JSON report file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Count entity labels in a corpus
    Count {
        /// Annotation export, or a JSON record list with --records
        #[arg(short, long)]
        input: PathBuf,

        /// Treat the input as a list of records holding entities under --field
        #[arg(long)]
        records: bool,

        /// Record field holding the entity list
        #[arg(long, default_value = "entities")]
        field: String,

        /// Task field to read results from, for annotation exports
        #[arg(long, value_enum, default_value = "annotations")]
        source: AnnotationSource,

        /// Optional text file for the aligned counts
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Turn tagger output into pre-annotated tasks
    Prelabel {
        /// Tagged documents (JSON list of {text, tokens})
        #[arg(short, long)]
        input: PathBuf,

        /// Output task list
        #[arg(short, long)]
        output: PathBuf,

        /// Model version recorded on the predictions
        #[arg(long)]
        model_version: Option<String>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            form,
            source,
            verbose,
        } => {
            setup_logging(verbose);
            convert(input, output, form, source)
        }
        Commands::Evaluate {
            ground,
            eval,
            eval_source,
            granularity,
            show_differences,
            decimals,
            output,
            verbose,
        } => {
            setup_logging(verbose);
            let config = EvalConfig {
                granularity,
                show_differences,
            };
            evaluate(ground, eval, eval_source, output, &config, decimals)
        }
        Commands::Count {
            input,
            records,
            field,
            source,
            output,
            verbose,
        } => {
            setup_logging(verbose);
            let input = CountInput {
                path: input,
                records,
                source,
            };
            count(&input, &CountConfig { field }, output)
        }
        Commands::Prelabel {
            input,
            output,
            model_version,
            verbose,
        } => {
            setup_logging(verbose);
            prelabel(input, output, model_version.as_deref())
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn convert(input: PathBuf, output: PathBuf, form: Form, source: AnnotationSource) -> Result<()> {
    info!("Loading {} from {:?}", source.field(), input);
    let tasks = parse_exchange_file(&input)?;

    match form {
        Form::Spans => write_json(&read_span_documents(&tasks, source)?, &output)?,
        Form::Words => write_json(
            &read_word_indexed_documents(&tasks, source, &WhitespaceBoundary)?,
            &output,
        )?,
        Form::Dedup => write_json(&read_span_set_documents(&tasks, source)?, &output)?,
    }

    info!("Wrote {} documents to {:?}", tasks.len(), output);
    Ok(())
}

fn evaluate(
    ground: PathBuf,
    eval: PathBuf,
    eval_source: AnnotationSource,
    output: Option<PathBuf>,
    config: &EvalConfig,
    decimals: usize,
) -> Result<()> {
    info!("Loading ground truth from {:?}", ground);
    let ground_tasks = parse_exchange_file(&ground)?;
    let ground_docs = read_span_documents(&ground_tasks, AnnotationSource::Annotations)
        .context("Failed to read ground truth")?;
    info!("Loading evaluated {} from {:?}", eval_source.field(), eval);
    let eval_docs = read_span_documents(&parse_exchange_file(&eval)?, eval_source)
        .context("Failed to read evaluation")?;

    let metrics = evaluate_documents(&ground_docs, &eval_docs, config);

    let report_config = ReportConfig {
        decimals,
        show_differences: config.show_differences,
    };
    print!("{}", render_metrics(&metrics, &report_config));

    if let Some(path) = output {
        let granularity = format!("{:?}", config.granularity).to_lowercase();
        let report = EvaluationReport::new(
            &ground,
            &eval,
            &granularity,
            metrics,
            config.show_differences,
        );
        write_json(&report, &path)?;
        info!("Report written to {:?}", path);
    }

    Ok(())
}

/// Where `count` reads its entities from
struct CountInput {
    path: PathBuf,
    /// A JSON record list instead of an annotation export
    records: bool,
    source: AnnotationSource,
}

fn count(input: &CountInput, config: &CountConfig, output: Option<PathBuf>) -> Result<()> {
    info!("Counting labels in {:?}", input.path);
    let counts = if input.records {
        count_labels_in_records(&read_records(&input.path)?, &config.field)?
    } else {
        let docs = read_span_documents(&parse_exchange_file(&input.path)?, input.source)?;
        count_labels(&docs, |d| &d.spans)?
    };

    let rendered = counts.render();
    println!("{}", rendered);

    if let Some(path) = output {
        write_text(&rendered, &path)?;
        info!("Counts written to {:?}", path);
    }

    Ok(())
}

fn prelabel(input: PathBuf, output: PathBuf, model_version: Option<&str>) -> Result<()> {
    info!("Loading tagged documents from {:?}", input);
    let docs = read_tagged_documents(&input)?;

    let tasks: Vec<_> = docs
        .iter()
        .map(|doc| prelabel_document(doc, model_version))
        .collect();

    let span_count: usize = tasks
        .iter()
        .flat_map(|t| t.predictions.iter())
        .filter_map(|p| p.result.as_ref())
        .map(Vec::len)
        .sum();
    info!("Pre-annotated {} documents with {} spans", tasks.len(), span_count);

    write_json(&tasks, &output)?;
    info!("Output written to {:?}", output);
    Ok(())
}

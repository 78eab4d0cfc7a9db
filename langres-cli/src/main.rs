mod edit;
mod export;
mod report;
mod view;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use langres::model::OllamaModel;
use langres::{
    DesignDocument, Locale, MatchOptions, Product, ResourceStore, SearchQuery, audit_document,
    audit_texts, health_report, search, suggest, suggest_with_model,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Search resources by text, product, or category.
    Search {
        /// Resource file (one JSON array)
        #[arg(short, long, default_value = "resources.json")]
        resources: PathBuf,

        /// Search query; omit to list all resources
        #[arg(short, long)]
        query: Option<String>,

        /// Locale echoed in the results (matching spans all locales)
        #[arg(short, long)]
        locale: Option<Locale>,

        /// Restrict to resources tagged with a product
        #[arg(short, long)]
        product: Option<Product>,

        /// Case-insensitive substring over category fields
        #[arg(short, long)]
        category: Option<String>,

        /// Maximum number of results to return
        #[arg(long)]
        limit: Option<usize>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// View resources in a resource file.
    View {
        /// Resource file to view
        #[arg(short, long, default_value = "resources.json")]
        resources: PathBuf,

        /// Optional locale to filter translations by
        #[arg(short, long)]
        locale: Option<Locale>,

        /// Display full values without truncation
        #[arg(long)]
        full: bool,
    },

    /// Audit a design document export against the resource file.
    Audit {
        #[arg(short, long, default_value = "resources.json")]
        resources: PathBuf,

        /// Document tree as exported by the design-tool plugin (JSON)
        #[arg(short, long)]
        document: PathBuf,

        #[arg(short, long, default_value = "ko-KR")]
        locale: Locale,

        #[arg(short, long)]
        product: Option<Product>,

        /// Prefer product-specific translations over generic ones
        #[arg(long)]
        variant_first: bool,

        #[arg(long)]
        json: bool,
    },

    /// Check a flat list of texts against the resource file.
    Check {
        #[arg(short, long, default_value = "resources.json")]
        resources: PathBuf,

        /// Text to check (repeatable)
        #[arg(short, long = "text")]
        texts: Vec<String>,

        #[arg(short, long, default_value = "ko-KR")]
        locale: Locale,

        #[arg(short, long)]
        product: Option<Product>,

        #[arg(long)]
        json: bool,
    },

    /// Report repository-wide resource health.
    Health {
        #[arg(short, long, default_value = "resources.json")]
        resources: PathBuf,

        #[arg(short, long)]
        product: Option<Product>,

        #[arg(long)]
        json: bool,
    },

    /// Suggest a replacement for one text.
    Suggest {
        /// The text to improve
        text: String,

        #[arg(short, long, default_value = "resources.json")]
        resources: PathBuf,

        #[arg(short, long, default_value = "ko-KR")]
        locale: Locale,

        #[arg(short, long)]
        product: Option<Product>,

        /// Style guide hint passed through to the rationale and the model
        #[arg(long)]
        style_guide: Option<String>,

        /// Base URL of an Ollama instance; omit for the offline fallback
        #[arg(long)]
        model_url: Option<String>,

        #[arg(long, default_value = "llama3")]
        model_name: String,

        /// Upper bound for the model call, in seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,

        #[arg(long)]
        json: bool,
    },

    /// Add a new resource to the resource file.
    Add(edit::AddArgs),

    /// Update fields of an existing resource.
    Update(edit::UpdateArgs),

    /// Export resources to a CSV file (one row per resource).
    Export {
        #[arg(short, long, default_value = "resources.json")]
        resources: PathBuf,

        /// Destination CSV path
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    match args.commands {
        Commands::Search {
            resources,
            query,
            locale,
            product,
            category,
            limit,
            json,
        } => {
            let mut store = ResourceStore::open(&resources);
            let results = search(
                store.load()?,
                &SearchQuery {
                    query,
                    locale,
                    product,
                    category,
                    limit,
                },
            );
            report::print_search(&results, json);
        }

        Commands::View {
            resources,
            locale,
            full,
        } => {
            let mut store = ResourceStore::open(&resources);
            view::print_view(store.load()?, locale, full);
        }

        Commands::Audit {
            resources,
            document,
            locale,
            product,
            variant_first,
            json,
        } => {
            let file = std::fs::File::open(&document)?;
            let document: DesignDocument = serde_json::from_reader(std::io::BufReader::new(file))?;
            let mut store = ResourceStore::open(&resources);
            let report = audit_document(
                &document,
                store.load()?,
                locale,
                product,
                MatchOptions { variant_first },
            );
            report::print_document_audit(&report, json);
        }

        Commands::Check {
            resources,
            texts,
            locale,
            product,
            json,
        } => {
            if texts.is_empty() {
                return Err(langres::Error::validation("at least one --text is required").into());
            }
            let mut store = ResourceStore::open(&resources);
            let report = audit_texts(
                &texts,
                store.load()?,
                locale,
                product,
                MatchOptions::default(),
            );
            report::print_text_audit(&report, json);
        }

        Commands::Health {
            resources,
            product,
            json,
        } => {
            let mut store = ResourceStore::open(&resources);
            let report = health_report(store.load()?, product);
            report::print_health(&report, json);
        }

        Commands::Suggest {
            text,
            resources,
            locale,
            product,
            style_guide,
            model_url,
            model_name,
            timeout_secs,
            json,
        } => {
            let mut store = ResourceStore::open(&resources);
            let list = store.load()?.to_vec();
            let suggestion = match model_url {
                Some(url) => {
                    let model = OllamaModel::new(url, model_name)?;
                    let runtime = tokio::runtime::Runtime::new()?;
                    runtime.block_on(suggest_with_model(
                        &text,
                        &list,
                        locale,
                        product,
                        style_guide.as_deref(),
                        MatchOptions::default(),
                        &model,
                        Duration::from_secs(timeout_secs),
                    ))
                }
                None => suggest(
                    &text,
                    &list,
                    locale,
                    product,
                    style_guide.as_deref(),
                    MatchOptions::default(),
                ),
            };
            report::print_suggestion(&suggestion, json);
        }

        Commands::Add(args) => edit::run_add(args)?,

        Commands::Update(args) => edit::run_update(args)?,

        Commands::Export { resources, output } => {
            let mut store = ResourceStore::open(&resources);
            let count = export::export_csv(store.load()?, &output)?;
            println!("Exported {} resource(s) to {}", count, output.display());
        }
    }

    Ok(())
}

//! `add` and `update` handlers: argument parsing plus the store calls.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use langres::{
    Error, Locale, NewResource, Product, Resource, ResourcePatch, ResourceStatus, ResourceStore,
};

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(short, long, default_value = "resources.json")]
    pub resources: PathBuf,

    /// Logical key, e.g. login.button
    #[arg(short, long)]
    pub key: String,

    /// Product tag (repeatable)
    #[arg(short, long = "product")]
    pub products: Vec<Product>,

    /// Mark as a common (not product-specific) resource
    #[arg(long)]
    pub common: bool,

    /// Translation as LOCALE=TEXT (repeatable), e.g. -t "ko-KR=로그인"
    #[arg(short, long = "translation")]
    pub translations: Vec<String>,

    #[arg(long)]
    pub section1: Option<String>,

    #[arg(long)]
    pub section2: Option<String>,

    #[arg(long)]
    pub artboard: Option<String>,

    #[arg(long)]
    pub component: Option<String>,

    /// Initial status (defaults to draft)
    #[arg(long)]
    pub status: Option<ResourceStatus>,

    #[arg(short, long)]
    pub author: String,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Id of the resource to update
    pub id: String,

    #[arg(short, long, default_value = "resources.json")]
    pub resources: PathBuf,

    /// Translation as LOCALE=TEXT (repeatable); merged per locale
    #[arg(short, long = "translation")]
    pub translations: Vec<String>,

    #[arg(long)]
    pub section1: Option<String>,

    #[arg(long)]
    pub section2: Option<String>,

    #[arg(long)]
    pub artboard: Option<String>,

    #[arg(long)]
    pub component: Option<String>,

    #[arg(long)]
    pub status: Option<ResourceStatus>,

    #[arg(short, long)]
    pub author: Option<String>,

    #[arg(long)]
    pub json: bool,
}

/// Parses repeatable `LOCALE=TEXT` arguments into a translation map.
pub fn parse_translations(pairs: &[String]) -> Result<BTreeMap<Locale, String>, Error> {
    let mut map = BTreeMap::new();
    for pair in pairs {
        let (locale, text) = pair.split_once('=').ok_or_else(|| {
            Error::validation(format!("invalid translation `{}`, expected LOCALE=TEXT", pair))
        })?;
        let locale = locale
            .trim()
            .parse::<Locale>()
            .map_err(Error::validation)?;
        map.insert(locale, text.to_string());
    }
    Ok(map)
}

pub fn run_add(args: AddArgs) -> Result<(), Error> {
    let translations = parse_translations(&args.translations)?;
    let mut store = ResourceStore::open(&args.resources);
    let resource = store.insert(NewResource {
        key: args.key,
        products: args.products,
        common: args.common,
        section1: args.section1,
        section2: args.section2,
        artboard: args.artboard,
        component: args.component,
        translations,
        product_specific: BTreeMap::new(),
        status: args.status,
        author: args.author,
    })?;
    print_resource(&resource, args.json, "Created");
    Ok(())
}

pub fn run_update(args: UpdateArgs) -> Result<(), Error> {
    let translations = parse_translations(&args.translations)?;
    let mut store = ResourceStore::open(&args.resources);
    let resource = store.update(
        &args.id,
        ResourcePatch {
            section1: args.section1,
            section2: args.section2,
            artboard: args.artboard,
            component: args.component,
            translations,
            product_specific: None,
            status: args.status,
            author: args.author,
        },
    )?;
    print_resource(&resource, args.json, "Updated");
    Ok(())
}

fn print_resource(resource: &Resource, json: bool, action: &str) {
    if json {
        println!("{}", serde_json::to_string_pretty(resource).unwrap());
    } else {
        println!("{} resource {} ({})", action, resource.id, resource.key);
    }
}

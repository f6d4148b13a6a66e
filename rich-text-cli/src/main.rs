// Command-line interface for rich-text
//
// This binary runs the rich-text attachment pipeline on an HTML file (or stdin) and prints the
// result to stdout. Diagnostics go to stderr through tracing.
//
// Usage:
//  rich-text render <input>        - Canonical HTML, legacy (Trix) wrappers normalized
//  rich-text plain-text <input>    - Plain-text rendering
//  rich-text links <input>         - Distinct link targets, one per line
//  rich-text attachments <input>   - Attachments as a JSON array (legacy form + resolved kind)
//  rich-text minify <input>        - HTML with attachment bodies stripped
//  rich-text legacy <input>        - HTML with attachments turned back into Trix figures
//
// Global options:
//  --config <path>      Configuration file layered over the defaults (and over ./rich-text.toml)
//  --tag-name <name>    Attachment tag name, overriding the configuration
//  --records <path>     JSON array of records that sgids resolve against
//  --verbose            Debug logging on stderr (RUST_LOG is honored otherwise)

use clap::{Arg, ArgAction, Command, ValueHint};
use rich_text::{
    use_tag_name, Content, ContentOptions, MemoryRecordStore, RecordResolver, RichTextError,
    StoredRecord,
};
use rich_text_config::{Loader, RichTextConfig};
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::rc::Rc;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const COMMANDS: &[(&str, &str)] = &[
    ("render", "Render canonical HTML"),
    ("plain-text", "Render plain text"),
    ("links", "List distinct link targets"),
    ("attachments", "List attachments as JSON"),
    ("minify", "Strip rendered attachment bodies"),
    ("legacy", "Convert attachments to the legacy editor format"),
];

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input HTML file, or '-' for stdin")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    let cli = Command::new("rich-text")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for processing rich-text HTML attachments")
        .long_about(
            "rich-text parses rich-text editor HTML, resolves the attachments in it and\n\
            renders the result.\n\n\
            Legacy editor attachments (data-trix-attachment) are normalized on input.\n\n\
            Examples:\n  \
            rich-text render post.html                      # Canonical HTML\n  \
            rich-text plain-text post.html                  # Plain text\n  \
            rich-text attachments post.html --records r.json  # Resolve records\n  \
            cat post.html | rich-text links -               # Read stdin",
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a rich-text.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("tag-name")
                .long("tag-name")
                .value_name("NAME")
                .help("Attachment tag name (overrides configuration)")
                .global(true),
        )
        .arg(
            Arg::new("records")
                .long("records")
                .value_name("PATH")
                .help("JSON array of records for sgid resolution")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log debug output to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        );

    COMMANDS.iter().fold(cli, |cli, (name, about)| {
        cli.subcommand(Command::new(*name).about(*about).arg(input_arg()))
    })
}

fn main() {
    let matches = build_cli().get_matches();

    init_tracing(matches.get_flag("verbose"));

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        matches.get_one::<String>("tag-name").map(|s| s.as_str()),
    );
    // Attachments built without explicit options use the configured tag as well
    use_tag_name(&config.attachments.tag_name);

    let resolver = load_records(matches.get_one::<String>("records").map(|s| s.as_str()))
        .unwrap_or_else(|err| {
            eprintln!("Failed to load records: {err}");
            std::process::exit(1);
        });
    let options = config.content_options(resolver);

    let Some((name, sub_matches)) = matches.subcommand() else {
        eprintln!("Unknown subcommand. Use --help for usage information.");
        std::process::exit(1);
    };
    let Some(command) = Subcommand::from_name(name) else {
        eprintln!("Unknown subcommand '{name}'. Use --help for usage information.");
        std::process::exit(1);
    };
    let input = sub_matches
        .get_one::<String>("input")
        .expect("input is required");

    let source = read_input(input).unwrap_or_else(|e| {
        eprintln!("Error reading '{input}': {e}");
        std::process::exit(1);
    });

    match run_command(command, &source, options) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Install the stderr subscriber; `--verbose` wins over RUST_LOG.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("rich_text=debug,rich_text_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rich_text=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn load_cli_config(explicit_path: Option<&str>, tag_name: Option<&str>) -> RichTextConfig {
    let loader = Loader::new().with_optional_file("rich-text.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    let loader = match tag_name {
        Some(tag_name) => loader.set_override("attachments.tag_name", tag_name),
        None => Ok(loader),
    };

    loader.and_then(Loader::build).unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Record store from a JSON file; no file means every sgid is unknown.
fn load_records(path: Option<&str>) -> Result<Rc<dyn RecordResolver>, String> {
    let Some(path) = path else {
        return Ok(Rc::new(MemoryRecordStore::new()));
    };

    let raw = fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
    let records: Vec<StoredRecord> =
        serde_json::from_str(&raw).map_err(|e| format!("{path}: {e}"))?;
    debug!(path, count = records.len(), "loaded records");

    Ok(Rc::new(MemoryRecordStore::from_records(records)))
}

fn read_input(input: &str) -> std::io::Result<String> {
    if input == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(input)
    }
}

/// The pipeline steps exposed as subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Subcommand {
    Render,
    PlainText,
    Links,
    Attachments,
    Minify,
    Legacy,
}

impl Subcommand {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "render" => Some(Subcommand::Render),
            "plain-text" => Some(Subcommand::PlainText),
            "links" => Some(Subcommand::Links),
            "attachments" => Some(Subcommand::Attachments),
            "minify" => Some(Subcommand::Minify),
            "legacy" => Some(Subcommand::Legacy),
            _ => None,
        }
    }
}

/// Run one subcommand over `source`, returning what goes to stdout.
fn run_command(
    command: Subcommand,
    source: &str,
    options: ContentOptions,
) -> Result<String, RichTextError> {
    let content = Content::with_options(source, options)?;
    debug!(?command, tag_name = content.options().tag_name(), "running command");

    match command {
        Subcommand::Render => content.render(),
        Subcommand::PlainText => Ok(content.to_plain_text()),
        Subcommand::Links => Ok(content.links().join("\n")),
        Subcommand::Attachments => attachments_json(&content),
        Subcommand::Minify => content.minified()?.render(),
        Subcommand::Legacy => content.to_legacy_html(),
    }
}

fn attachments_json(content: &Content) -> Result<String, RichTextError> {
    let attachments: Vec<Value> = content
        .attachments()
        .iter()
        .map(|attachment| {
            let mut object = attachment.to_legacy_format(None).attributes().clone();
            object.insert(
                "kind".to_string(),
                Value::from(attachment.attachable().kind()),
            );
            Value::Object(object)
        })
        .collect();

    serde_json::to_string_pretty(&attachments)
        .map_err(|e| RichTextError::Serialization(e.to_string()))
}

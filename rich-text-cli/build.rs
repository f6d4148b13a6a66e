use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the subcommands from src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
const COMMANDS: &[&str] = &[
    "render",
    "plain-text",
    "links",
    "attachments",
    "minify",
    "legacy",
];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("rich-text")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for processing rich-text HTML attachments")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(Arg::new("tag-name").long("tag-name").global(true))
        .arg(
            Arg::new("records")
                .long("records")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .global(true),
        );

    for name in COMMANDS {
        cmd = cmd.subcommand(
            Command::new(*name).arg(
                Arg::new("input")
                    .required(true)
                    .index(1)
                    .value_hint(ValueHint::FilePath),
            ),
        );
    }

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "rich-text", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "rich-text", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "rich-text", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}

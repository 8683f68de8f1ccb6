use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command surface in src/main.rs; build scripts cannot access
// src/ modules, so the definition is duplicated here for completion output.
fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("adf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert ADF documents to Markdown")
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .value_hint(ValueHint::FilePath),
        )
        .subcommand(
            Command::new("convert")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("ignore-errors")
                        .long("ignore-errors")
                        .action(ArgAction::SetTrue),
                )
                .arg(Arg::new("cache-as").long("cache-as").value_name("NAME")),
        )
        .subcommand(Command::new("inspect").arg(
            Arg::new("input")
                .required(true)
                .index(1)
                .value_hint(ValueHint::FilePath),
        ));

    generate_to(Bash, &mut cmd, "adf", &outdir)?;
    generate_to(Zsh, &mut cmd, "adf", &outdir)?;
    generate_to(Fish, &mut cmd, "adf", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}

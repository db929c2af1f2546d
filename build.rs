// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: pool directory or name
fn pool_arg() -> Arg {
    Arg::new("pool")
        .required(true)
        .help("Pool directory, or a name relative to the pool search path")
}

/// Common argument: pool search path
fn pool_path_arg() -> Arg {
    Arg::new("pool_path")
        .long("pool-path")
        .env("FAB_POOL_PATH")
        .value_name("DIR")
        .help("Base directory for relative pool names")
}

fn build_cli() -> Command {
    Command::new("debclosure")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve Debian package plans into pinned specs")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .global(true)
                .help("Configuration file (TOML)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("resolve")
                .about("Resolve a plan and its dependencies into a spec")
                .arg(pool_arg())
                .arg(
                    Arg::new("plan")
                        .required(true)
                        .num_args(1..)
                        .value_name("NAME|@PLAN")
                        .help("Package names, or @FILE to read names from a plan file"),
                )
                .arg(pool_path_arg())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Also write the spec to this file"),
                )
                .arg(
                    Arg::new("check_constraints")
                        .long("check-constraints")
                        .action(ArgAction::SetTrue)
                        .help("Fail if a resolved version violates a dependency relation"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .value_parser(["text", "json"])
                        .default_value("text")
                        .help("Output format"),
                )
                .arg(
                    Arg::new("tmpdir")
                        .long("tmpdir")
                        .env("FAB_TMPDIR")
                        .value_name("DIR")
                        .help("Directory under which work dirs are created"),
                ),
        )
        .subcommand(
            Command::new("spec-get")
                .about("Fetch the packages listed in a spec")
                .arg(pool_arg())
                .arg(Arg::new("spec").required(true).help("Spec file, or inline name=version lines"))
                .arg(Arg::new("outdir").required(true).help("Directory to fetch into"))
                .arg(pool_path_arg()),
        )
        .subcommand(
            Command::new("install-order")
                .about("Show the batches a spec or package directory installs in")
                .arg(
                    Arg::new("target")
                        .required(true)
                        .help("Directory of .deb files, spec file, or inline spec"),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "elvish", "fish", "powershell", "zsh"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("debclosure.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use cfgparser::{
    find_settings_file, generate_init_file, is_default_section, load_settings, merge_settings,
    run, sanitize, should_use_colors, CfgParserToml, CliSettingsOptions, Config, ConfigParser,
    NoSectionsConfigParser, OutputContext, OutputMode, Settings,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cfgparser")]
#[command(version, about = "Read, query and normalize INI configuration files")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalArgs {
    /// Specify settings file path (overrides auto-discovery)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Delimiter written between keys and values
    #[arg(long, global = true)]
    delimiter: Option<String>,

    /// Write delimiters without surrounding spaces
    #[arg(long, global = true)]
    no_space: bool,

    /// Line terminator used on output
    #[arg(long, value_enum, global = true)]
    linebreak: Option<Linebreak>,

    /// Log errors and carry on instead of failing
    #[arg(long, global = true)]
    no_throw: bool,

    /// Treat files as plain key/value lists without sections
    #[arg(long, global = true)]
    no_sections: bool,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Linebreak {
    Lf,
    Crlf,
}

impl Linebreak {
    fn as_str(self) -> &'static str {
        match self {
            Linebreak::Lf => "\n",
            Linebreak::Crlf => "\r\n",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ValueType {
    Str,
    Int,
    Float,
    Bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print one option from the merged files
    Get {
        /// Option name
        option: String,

        /// Files to read, later files override earlier ones
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Section holding the option (empty for the default scope)
        #[arg(short, long, default_value = "")]
        section: String,

        /// Value used when the option is missing
        #[arg(long)]
        fallback: Option<String>,

        /// Convert the value before printing
        #[arg(long = "type", value_enum, default_value = "str")]
        value_type: ValueType,
    },

    /// Set one option and save the file
    Set {
        /// File to update
        file: PathBuf,

        /// Option name
        option: String,

        /// New value
        value: String,

        /// Section to write into, created if missing
        #[arg(short, long, default_value = "")]
        section: String,
    },

    /// Print the merged files in canonical form
    Dump {
        /// Files to read, later files override earlier ones
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print a file after dialect normalization
    Sanitize {
        /// File to normalize
        file: PathBuf,
    },

    /// Rewrite INI files into canonical form
    Fmt {
        /// Target files or directories
        #[arg(required = true)]
        paths: Vec<String>,

        /// Check only (no modifications), exit 1 if files are not canonical
        #[arg(short, long)]
        check: bool,

        /// Show changes in diff format
        #[arg(short, long)]
        diff: bool,

        /// Output only affected file names
        #[arg(short, long)]
        quiet: bool,

        /// Rewrite files even if their comments would be dropped
        #[arg(long)]
        strip_comments: bool,

        /// Force colored output
        #[arg(long)]
        color: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Generate a template cfgparser.toml settings file
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    let toml = load_configuration(&cli.global.config);
    let settings = merge_settings(
        &build_cli_options(&cli.global),
        toml.as_ref().map(|t| &t.settings),
    );
    let has_sections = !cli.global.no_sections;

    let outcome = match cli.command {
        Command::Get {
            option,
            files,
            section,
            fallback,
            value_type,
        } => {
            let query = Query {
                section: &section,
                option: &option,
                fallback: fallback.as_deref(),
                value_type,
            };
            handle_get(&files, &query, settings, has_sections)
        }
        Command::Set {
            file,
            option,
            value,
            section,
        } => handle_set(&file, &section, &option, &value, settings, has_sections),
        Command::Dump { files } => handle_dump(&files, settings, has_sections),
        Command::Sanitize { file } => handle_sanitize(&file),
        Command::Fmt {
            paths,
            check,
            diff,
            quiet,
            strip_comments,
            color,
            no_color,
        } => {
            let mode = if quiet {
                OutputMode::Quiet
            } else if diff {
                OutputMode::Diff
            } else {
                OutputMode::Normal
            };
            let ctx = OutputContext::new(
                mode,
                should_use_colors(color, no_color),
                cli.global.verbose,
                !quiet,
            );
            let config = Config {
                check_only: check,
                settings,
                has_sections,
                strip_comments,
            };
            match run(&paths, &config, &ctx) {
                Ok(result) => Ok(!result.has_problems()),
                Err(e) => Err(e.to_string()),
            }
        }
        Command::Init => handle_init(),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_init() -> Outcome {
    let path = generate_init_file().map_err(|e| e.to_string())?;
    println!("Created {}", path.display());
    Ok(true)
}

fn load_configuration(explicit_path: &Option<PathBuf>) -> Option<CfgParserToml> {
    let settings_path = explicit_path.clone().or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|d| find_settings_file(&d))
    });

    settings_path.and_then(|p| match load_settings(&p) {
        Ok(loaded) => {
            tracing::debug!("using settings from {}", p.display());
            Some(loaded)
        }
        Err(e) => {
            eprintln!("Warning: Failed to load {}: {}", p.display(), e);
            None
        }
    })
}

fn build_cli_options(global: &GlobalArgs) -> CliSettingsOptions {
    // Boolean flags in clap are always present (default false), so we
    // treat false as "not set" for proper merging with the settings file.
    CliSettingsOptions {
        delimiter: global.delimiter.clone(),
        no_space: global.no_space.then_some(true),
        linebreak: global.linebreak.map(|l| l.as_str().to_string()),
        no_throw: global.no_throw.then_some(true),
    }
}

struct Query<'a> {
    section: &'a str,
    option: &'a str,
    fallback: Option<&'a str>,
    value_type: ValueType,
}

type Outcome = Result<bool, String>;

fn handle_get(files: &[PathBuf], query: &Query, settings: Settings, has_sections: bool) -> Outcome {
    let rendered = if has_sections {
        let mut parser = ConfigParser::with_settings(settings);
        parser.read(files).map_err(|e| e.to_string())?;
        let (section, option, fallback) = (query.section, query.option, query.fallback);
        match query.value_type {
            ValueType::Str => parser.get(section, option, fallback),
            ValueType::Int => parser
                .get_int(section, option, fallback)
                .map(|v| Some(v.to_string())),
            ValueType::Float => parser
                .get_float(section, option, fallback)
                .map(|v| Some(v.to_string())),
            ValueType::Bool => parser
                .get_boolean(section, option, fallback)
                .map(|v| v.map(|b| b.to_string())),
        }
    } else {
        let mut parser = NoSectionsConfigParser::with_settings(settings);
        parser.read(files).map_err(|e| e.to_string())?;
        let (option, fallback) = (query.option, query.fallback);
        match query.value_type {
            ValueType::Str => parser.get(option, fallback),
            ValueType::Int => parser.get_int(option, fallback).map(|v| Some(v.to_string())),
            ValueType::Float => parser
                .get_float(option, fallback)
                .map(|v| Some(v.to_string())),
            ValueType::Bool => parser
                .get_boolean(option, fallback)
                .map(|v| v.map(|b| b.to_string())),
        }
    };

    match rendered.map_err(|e| e.to_string())? {
        Some(value) => {
            println!("{value}");
            Ok(true)
        }
        None => Ok(false),
    }
}

fn handle_set(
    file: &Path,
    section: &str,
    option: &str,
    value: &str,
    settings: Settings,
    has_sections: bool,
) -> Outcome {
    let saved = if has_sections {
        let mut parser = ConfigParser::with_settings(settings);
        if !parser.read_file(file).map_err(|e| e.to_string())? {
            return Ok(false);
        }
        let needs_section =
            !section.is_empty() && !is_default_section(section) && !parser.has_section(section);
        if needs_section {
            parser.add_section(section).map_err(|e| e.to_string())?;
        }
        parser
            .set(section, option, value)
            .map_err(|e| e.to_string())?;
        parser.save()
    } else {
        let mut parser = NoSectionsConfigParser::with_settings(settings);
        if !parser.read_file(file).map_err(|e| e.to_string())? {
            return Ok(false);
        }
        parser.set(option, value);
        parser.save()
    };

    saved.map_err(|e| e.to_string())
}

fn handle_dump(files: &[PathBuf], settings: Settings, has_sections: bool) -> Outcome {
    let printed = if has_sections {
        let mut parser = ConfigParser::with_settings(settings);
        parser.read(files).map_err(|e| e.to_string())?;
        parser.output()
    } else {
        let mut parser = NoSectionsConfigParser::with_settings(settings);
        parser.read(files).map_err(|e| e.to_string())?;
        parser.output()
    };

    printed.map(|()| true).map_err(|e| e.to_string())
}

fn handle_sanitize(file: &Path) -> Outcome {
    let raw = std::fs::read_to_string(file).map_err(|e| format!("{}: {e}", file.display()))?;
    print!("{}", sanitize(&raw));
    Ok(true)
}

//! Minimal CLI: sample JSON → (descriptor | declaration)
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use typescaffold::{Value, render::Declarations};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer a structural type from sample JSON and print it as a descriptor or a type declaration
#[derive(Parser, Debug)]
#[command(name = "typescaffold", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,

    /// more log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and print the type declaration
    Ts(DeclarationOut),
    /// infer and print the raw type descriptor as JSON
    Infer(DescriptorOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document.
    #[arg(long)]
    jq_expr: Option<String>,

    /// read ISO-8601 date and timestamp strings as dates
    #[arg(long, default_value_t = false)]
    detect_dates: bool,

    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct DeclarationOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// name of the declared type
    #[arg(long, default_value = typescaffold::DEFAULT_TYPE_NAME)]
    name: String,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct DescriptorOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// pretty-print the descriptor JSON
    #[arg(long)]
    pretty: bool,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

/// Where a document came from, for error messages.
#[derive(Debug, Clone)]
enum Source {
    Stdin,
    File(PathBuf),
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Stdin => f.write_str("<stdin>"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Read, parse and pre-process every input into sample values.
    fn load_samples(&self) -> Result<Vec<Value>> {
        let sources = resolve_sources(&self.input)?;
        let texts = sources
            .iter()
            .map(|source| Ok((source.clone(), read_source(source)?)))
            .collect::<Result<Vec<_>>>()?;

        let per_source = texts
            .par_iter()
            .map(|(source, text)| self.process_source(source, text))
            .collect::<Result<Vec<_>>>()?;

        let samples: Vec<Value> = per_source.into_iter().flatten().collect();
        tracing::info!(inputs = sources.len(), samples = samples.len(), "loaded samples");
        Ok(samples)
    }

    fn process_source(&self, source: &Source, text: &str) -> Result<Vec<Value>> {
        let documents: Vec<serde_json::Value> = if self.ndjson {
            crate::path_de::ndjson_with_path(text)
        } else {
            crate::path_de::from_str_with_path(text).map(|doc| vec![doc])
        }
        .with_context(|| format!("Failed to parse JSON source file ({source})"))?;

        let mut out = Vec::new();
        for document in documents {
            let document = match self.json_pointer.as_deref() {
                None => document,
                Some(pointer) => match document.pointer(pointer) {
                    Some(node) => node.clone(),
                    None => bail!("JSON pointer `{pointer}` matched nothing in {source}"),
                },
            };
            let documents = match self.jq_expr.as_deref() {
                None => vec![document],
                Some(jq_expr) => crate::jq_exec::run_jaq(jq_expr, &document).with_context(|| {
                    format!("Failed to apply jq expression to source file ({source})")
                })?,
            };
            out.extend(documents.into_iter().map(|doc| self.to_value(doc)));
        }
        tracing::debug!(%source, documents = out.len(), "processed source");
        Ok(out)
    }

    fn to_value(&self, json: serde_json::Value) -> Value {
        if self.detect_dates {
            Value::from_json_with_dates(json)
        } else {
            Value::from(json)
        }
    }
}

/// One sample is the subject itself. Several samples are read as instances of
/// one shape: the subject is their array, and its element type is declared.
fn subject_descriptor(samples: Vec<Value>) -> Result<typescaffold::TypeDescriptor> {
    match samples.len() {
        0 => bail!("no input documents"),
        1 => {
            let sample = samples.into_iter().next().unwrap_or(Value::Undefined);
            Ok(typescaffold::infer(&sample)?)
        }
        _ => match typescaffold::infer(&Value::Array(samples))? {
            typescaffold::TypeDescriptor::Array(item) => Ok(*item),
            other => Ok(other),
        },
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Ts(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let samples = target.input_settings.load_samples()?;
                let ty = subject_descriptor(samples)?;

                let mut decl = Declarations::new();
                decl.emit(&ty, &target.name);
                write_output(target.out.as_deref(), &decl.into_string())
            }
            Command::Infer(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let samples = target.input_settings.load_samples()?;
                let ty = subject_descriptor(samples)?;

                let json = if target.pretty {
                    serde_json::to_string_pretty(&ty)?
                } else {
                    serde_json::to_string(&ty)?
                };
                write_output(target.out.as_deref(), &json)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(out, format!("{text}\n"))
                .with_context(|| format!("Failed to write {}", out.display()))?;
            tracing::info!(path = %out.display(), "wrote output");
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn read_source(source: &Source) -> Result<String> {
    match source {
        Source::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
        Source::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file {}", path.display())),
    }
}

fn resolve_sources(patterns: &[String]) -> Result<Vec<Source>> {
    let mut out = Vec::new();
    let mut files = Vec::new();
    for pattern in patterns {
        if pattern == "-" {
            if out.iter().any(|s| matches!(s, Source::Stdin)) {
                bail!("stdin ('-') given more than once");
            }
            out.push(Source::Stdin);
        } else {
            files.push(pattern.as_str());
        }
    }
    out.extend(resolve_file_path_patterns(files)?.into_iter().map(Source::File));
    Ok(out)
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern: {pattern}"))? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

mod batch;
mod config;
mod generate;
mod messages;
mod parser;
mod record;
mod synth;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;

use config::GeneratorArgs;
use generate::OpenAiGenerator;

#[derive(Parser)]
#[command(name = "profile_hooks", about = "Profile text parser and sales hook generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify profile text into a structured record
    Extract {
        /// Text file to read ("-" for stdin)
        #[arg(default_value = "-")]
        input: String,
        /// Also ask the model to extract the record, printing both
        #[arg(long)]
        with_model: bool,
        #[command(flatten)]
        generator: GeneratorArgs,
    },
    /// Generate three hooks from a record JSON file
    Hooks {
        /// Record JSON file ("-" for stdin)
        #[arg(default_value = "-")]
        record: String,
        #[command(flatten)]
        generator: GeneratorArgs,
    },
    /// Classify, model-extract and generate hooks in one go
    Run {
        /// Text file to read ("-" for stdin)
        #[arg(default_value = "-")]
        input: String,
        #[command(flatten)]
        generator: GeneratorArgs,
    },
    /// Answer one JSON request (getContent / getTopHooks)
    Handle {
        /// Request JSON file ("-" for stdin)
        #[arg(default_value = "-")]
        request: String,
        #[command(flatten)]
        generator: GeneratorArgs,
    },
    /// Classify every *.txt file in a directory into JSON Lines
    Batch {
        dir: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input,
            with_model,
            generator,
        } => {
            let text = read_input(&input)?;
            let data = parser::classify(&text);
            if with_model {
                let client = OpenAiGenerator::new(generator.generator_config()?)?;
                let ai_data = synth::extract_with_model(&client, &text).await?;
                print_json(&json!({ "data": data, "aiData": ai_data }))
            } else {
                print_json(&data)
            }
        }
        Commands::Hooks {
            record: path,
            generator,
        } => {
            let raw = read_input(&path)?;
            let record: record::ProfileRecord =
                serde_json::from_str(&raw).context("Record file is not a valid profile record")?;
            let client = OpenAiGenerator::new(generator.generator_config()?)?;
            let seller = generator.seller_context()?;
            let set = synth::synthesize(&client, &record, &seller).await?;
            for hook in &set.hooks {
                println!("{}", hook);
            }
            Ok(())
        }
        Commands::Run { input, generator } => {
            let text = read_input(&input)?;
            let client = OpenAiGenerator::new(generator.generator_config()?)?;
            let seller = generator.seller_context()?;

            let data = parser::classify(&text);
            info!("Classified profile for {:?}", data.name);

            // Independent calls; neither waits on the other.
            let (ai_data, hooks) = tokio::join!(
                synth::extract_with_model(&client, &text),
                synth::synthesize(&client, &data, &seller),
            );
            let ai_data = ai_data.context("Model extraction failed")?;
            let hooks = hooks.context("Hook generation failed")?;
            print_json(&json!({ "data": data, "aiData": ai_data, "hooks": hooks.hooks }))
        }
        Commands::Handle { request, generator } => {
            let raw = read_input(&request)?;
            let request: messages::Request =
                serde_json::from_str(&raw).context("Invalid request JSON")?;
            let client = OpenAiGenerator::new(generator.generator_config()?)?;
            let seller = generator.seller_context()?;
            let response = messages::dispatch(request, &client, &seller).await;
            print_json(&response)?;
            if response.is_error() {
                anyhow::bail!("Request failed");
            }
            Ok(())
        }
        Commands::Batch { dir, out } => {
            let mut writer: Box<dyn Write> = match &out {
                Some(path) => Box::new(std::io::BufWriter::new(
                    std::fs::File::create(path)
                        .with_context(|| format!("Failed to create {}", path.display()))?,
                )),
                None => Box::new(std::io::stdout().lock()),
            };
            let rows = run_batch(&dir, &mut writer)?;
            if out.is_some() && !rows.is_empty() {
                batch::count(&rows).print();
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source).with_context(|| format!("Failed to read {}", source))
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Classify every `*.txt` under `dir`, writing only JSON Lines to `writer`.
fn run_batch(dir: &Path, writer: &mut dyn Write) -> Result<Vec<batch::BatchRow>> {
    let paths = batch::collect_inputs(dir)?;
    if paths.is_empty() {
        info!("No .txt files in {}", dir.display());
        return Ok(Vec::new());
    }
    let inputs = paths
        .iter()
        .map(|p| Ok((p.display().to_string(), std::fs::read_to_string(p)?)))
        .collect::<Result<Vec<_>>>()?;

    let rows = batch::classify_all(&inputs);
    for row in &rows {
        serde_json::to_writer(&mut *writer, row)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(rows)
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_writes_only_json_lines() {
        let mut out = Vec::new();
        let rows = run_batch(Path::new("tests/fixtures"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), rows.len());
        for line in text.lines() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value["record"].is_object());
        }
    }

    #[test]
    fn empty_batch_dir_writes_nothing() {
        let dir = std::env::temp_dir().join(format!("profile_hooks_empty_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut out = Vec::new();
        let rows = run_batch(&dir, &mut out).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();
        assert!(rows.is_empty());
        assert!(out.is_empty());
    }
}

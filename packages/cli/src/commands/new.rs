use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use hermeneutix_editor::{Document, EditorConfig, Mutation};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Text file to analyse, one proposition per line
    pub input: PathBuf,

    /// Output document (defaults to the input file with a .json extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Title of the pericope
    #[arg(long)]
    pub title: Option<String>,

    /// Author of the analysis
    #[arg(long)]
    pub author: Option<String>,

    /// Force overwrite an existing document
    #[arg(short, long)]
    pub force: bool,
}

pub fn create(args: NewArgs, cwd: &Path) -> Result<()> {
    let config = EditorConfig::load(cwd)?;
    let language = config
        .language_model(cwd)
        .context("Cannot load the configured language model")?;

    let input = cwd.join(&args.input);
    let text = fs::read_to_string(&input)
        .with_context(|| format!("Cannot read {}", input.display()))?;
    let output = match args.output {
        Some(output) => cwd.join(output),
        None => input.with_extension("json"),
    };

    if output.exists() && !args.force {
        println!("{} {} already exists", "⚠️".yellow(), output.display());
        println!("Use --force to overwrite");
        return Ok(());
    }

    let mut document = Document::from_text(&text, language, config.undo_limit);
    if document.pericope().roots().is_empty() {
        bail!("{} contains no text", input.display());
    }
    if args.title.is_some() || args.author.is_some() {
        document.apply(Mutation::SetPericopeMetadata {
            title: args.title,
            author: args.author,
            comment: None,
        })?;
    }
    document.save_as(&output)?;

    println!(
        "  {} Created {} with {} propositions",
        "✓".green(),
        output.display().to_string().bright_white(),
        document.pericope().proposition_count()
    );
    Ok(())
}

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use hermeneutix_editor::{Document, EditorConfig, Mutation, MutationOutcome};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Document to edit
    pub document: PathBuf,

    /// JSON file holding a list of mutations
    pub script: PathBuf,

    /// Apply the script without saving the result
    #[arg(long)]
    pub dry_run: bool,
}

pub fn apply(args: ApplyArgs, cwd: &Path) -> Result<()> {
    let config = EditorConfig::load(cwd)?;
    let mut document = Document::load(&cwd.join(&args.document), config.undo_limit)?;

    let script_path = cwd.join(&args.script);
    let script = fs::read_to_string(&script_path)
        .with_context(|| format!("Cannot read {}", script_path.display()))?;
    let mutations: Vec<Mutation> = serde_json::from_str(&script)
        .with_context(|| format!("Invalid mutation script {}", script_path.display()))?;

    debug!(script = %script_path.display(), count = mutations.len(), "parsed mutation script");
    println!("{} {} mutations", "Applying".green().bold(), mutations.len());

    for (index, mutation) in mutations.into_iter().enumerate() {
        let outcome = document
            .apply(mutation)
            .with_context(|| format!("Mutation #{} failed, nothing saved", index + 1))?;
        println!("  {} #{} {}", "✓".green(), index + 1, describe(&outcome));
    }

    if args.dry_run {
        println!("{} dry run, nothing saved", "⚠️".yellow());
        return Ok(());
    }

    document.save()?;
    println!(
        "  {} Saved {} (version {})",
        "✓".green(),
        args.document.display().to_string().bright_white(),
        document.version
    );
    Ok(())
}

fn describe(outcome: &MutationOutcome) -> String {
    match outcome {
        MutationOutcome::Done => "done".to_string(),
        MutationOutcome::Propositions(ids) => {
            let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();
            format!("added {}", ids.join(", "))
        }
        MutationOutcome::Proposition(id) => format!("created {id}"),
        MutationOutcome::ClauseItem(id) => format!("created {id}"),
        MutationOutcome::Relation(id) => format!("created {id}"),
    }
}

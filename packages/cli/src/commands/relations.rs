use anyhow::Result;
use clap::Args;
use colored::Colorize;
use hermeneutix_editor::model::{AssociateRole, RelationTemplate};
use hermeneutix_editor::EditorConfig;
use std::path::Path;

#[derive(Debug, Args)]
pub struct RelationsArgs {
    /// Also print template descriptions
    #[arg(short, long)]
    pub verbose: bool,
}

/// List the relation templates available for `CreateRelation`
pub fn relations(args: RelationsArgs, cwd: &Path) -> Result<()> {
    let config = EditorConfig::load(cwd)?;
    let model = config.relation_model(cwd)?;

    for (index, group) in model.groups.iter().enumerate() {
        println!("{}", format!("Group {}", index + 1).bright_blue().bold());
        for template in &group.templates {
            println!("  {}", render_template(template));
            if args.verbose {
                if let Some(description) = &template.description {
                    println!("      {}", description.dimmed());
                }
            }
        }
    }
    Ok(())
}

fn render_role(role: &AssociateRole) -> String {
    if role.high_weight {
        format!("{}+", role.role)
    } else {
        format!("{}-", role.role)
    }
}

fn render_template(template: &RelationTemplate) -> String {
    match &template.repetitive {
        Some(repetitive) => format!(
            "{} / {} ... / {}",
            render_role(&template.leading),
            render_role(repetitive),
            render_role(&template.trailing)
        ),
        None => format!(
            "{} / {}",
            render_role(&template.leading),
            render_role(&template.trailing)
        ),
    }
}

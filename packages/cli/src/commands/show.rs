use anyhow::Result;
use clap::Args;
use colored::Colorize;
use hermeneutix_editor::model::{
    walk_relation, ClauseItem, Connectable, Pericope, Proposition, Relation, Visitor,
};
use hermeneutix_editor::{Document, EditorConfig};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Document to print
    pub document: PathBuf,

    /// Print element ids, as used in mutation scripts
    #[arg(long)]
    pub ids: bool,
}

pub fn show(args: ShowArgs, cwd: &Path) -> Result<()> {
    let config = EditorConfig::load(cwd)?;
    let document = Document::load(&cwd.join(&args.document), config.undo_limit)?;
    let pericope = document.pericope();

    if let Some(title) = &pericope.title {
        println!("{}", title.bright_blue().bold());
    }
    if let Some(author) = &pericope.author {
        println!("{}", author.dimmed());
    }

    let mut outline = Outline::new(args.ids);
    outline.visit_pericope(pericope);
    for line in outline.lines {
        println!("{line}");
    }
    Ok(())
}

/// Renders a pericope as indented text lines
pub struct Outline {
    pub lines: Vec<String>,
    show_ids: bool,
    relations_started: bool,
}

impl Outline {
    pub fn new(show_ids: bool) -> Self {
        Self {
            lines: Vec::new(),
            show_ids,
            relations_started: false,
        }
    }

    fn render_item(&self, item: &ClauseItem) -> String {
        let mut text = item.origin_text.clone();
        if let Some(function) = &item.function {
            text = format!("{text}{}", format!("[{}]", function.code).cyan());
        }
        if self.show_ids {
            text = format!("{text}{}", format!("#{}", item.id.raw()).dimmed());
        }
        text
    }

    fn render_associate(pericope: &Pericope, associate: Connectable) -> String {
        let role = pericope
            .role(associate)
            .map(|role| {
                if role.high_weight {
                    role.role.bold().to_string()
                } else {
                    role.role.clone()
                }
            })
            .unwrap_or_default();
        format!("{associate} {role}")
    }
}

impl Visitor for Outline {
    fn visit_part(&mut self, _pericope: &Pericope, part: &Proposition, depth: usize) {
        let indent = "    ".repeat(depth);
        let marker = if part.is_first_part() { "•" } else { "→" };
        let mut line = format!("{indent}{marker} ");

        if self.show_ids {
            line.push_str(&format!("{} ", part.id.to_string().dimmed()));
        }
        if let Some(label) = &part.label {
            line.push_str(&format!("{} ", label.yellow()));
        }
        if let Some(function) = &part.function {
            line.push_str(&format!("{} ", format!("<{}>", function.code).green()));
        }
        let items: Vec<String> = part.items.iter().map(|item| self.render_item(item)).collect();
        line.push_str(&items.join(" "));
        self.lines.push(line);

        if let Some(translation) = &part.semantic_translation {
            self.lines.push(format!("{indent}  {}", translation.italic()));
        }
    }

    fn visit_relation(&mut self, pericope: &Pericope, relation: &Relation, depth: usize) {
        if !self.relations_started {
            self.lines.push(String::new());
            self.lines.push("Relations".bright_blue().bold().to_string());
            self.relations_started = true;
        }
        let associates: Vec<String> = relation
            .associates
            .iter()
            .map(|associate| Self::render_associate(pericope, *associate))
            .collect();
        self.lines.push(format!(
            "{}{} {}",
            "    ".repeat(depth),
            relation.id,
            associates.join(" | ")
        ));
        walk_relation(self, pericope, relation, depth);
    }
}

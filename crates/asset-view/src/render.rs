//! Plain-text rendering of a view
//!
//! Markdown descriptions are flattened with pulldown-cmark; links are
//! printed as `text <href>`.

use std::fmt::{self, Display, Formatter};

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::panels::{Link, NeighborSection, Section, UnderlyingOps};
use crate::view::AssetNodeDefinitionView;

/// Display adapter over a built view
#[derive(Debug, Clone, Copy)]
pub struct TextReport<'a>(pub &'a AssetNodeDefinitionView);

/// Render `view` as a multi-line text report
#[must_use]
pub fn render_text(view: &AssetNodeDefinitionView) -> String {
    TextReport(view).to_string()
}

/// Flatten markdown to plain text, one paragraph per line
#[must_use]
pub fn markdown_to_plain(markdown: &str) -> String {
    let mut out = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push('\n'),
            Event::Start(Tag::Item) => out.push_str("- "),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock) => {
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
    out.trim_end().to_string()
}

fn link(link: &Link) -> String {
    match &link.href {
        Some(href) => format!("{} <{href}>", link.text),
        None => link.text.clone(),
    }
}

fn underline(f: &mut Formatter<'_>, title: &str, mark: &str) -> fmt::Result {
    writeln!(f, "{title}")?;
    writeln!(f, "{}", mark.repeat(title.chars().count()))
}

fn heading(f: &mut Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    underline(f, title, "-")
}

fn empty_line<T>(f: &mut Formatter<'_>, section: &Section<T>) -> fmt::Result {
    if let Some(state) = section.empty_state() {
        match &state.docs_link {
            Some(docs) => writeln!(f, "  {} (see {docs})", state.message)?,
            None => writeln!(f, "  {}", state.message)?,
        }
    }
    Ok(())
}

fn neighbors(f: &mut Formatter<'_>, section: &NeighborSection) -> fmt::Result {
    heading(f, &link(&section.header))?;
    match &section.entries {
        Section::Content(entries) => {
            for entry in entries {
                let mut line = format!("  [{}] {}", entry.status.label(), link(&entry.link));
                if entry.is_source {
                    line.push_str(" (source)");
                }
                if let Some(kind) = &entry.compute_kind {
                    line.push_str(&format!(" ({kind})"));
                }
                writeln!(f, "{line}")?;
            }
            if section.overflow > 0 {
                writeln!(f, "  … and {} more", section.overflow)?;
            }
            Ok(())
        }
        Section::Empty(_) => empty_line(f, &section.entries),
    }
}

impl Display for TextReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let view = self.0;
        underline(f, &view.display_name, "=")?;

        let ann = &view.annotations;
        if ann.source_asset {
            writeln!(f, "Source asset")?;
        }
        if let Some(addr) = &view.repository {
            writeln!(f, "Repository: {addr}")?;
        }
        if let Some(group) = &ann.group_name {
            writeln!(f, "Group: {group}")?;
        }
        if let Some(kind) = &ann.compute_kind {
            writeln!(f, "Compute kind: {kind}")?;
        }
        if !ann.jobs.is_empty() {
            let jobs: Vec<String> = ann.jobs.iter().map(link).collect();
            writeln!(f, "Jobs: {}", jobs.join(", "))?;
        }
        match &ann.underlying {
            UnderlyingOps::Graph { name } => writeln!(f, "Graph: {name}")?,
            UnderlyingOps::Op { name } => writeln!(f, "Op: {name}")?,
            UnderlyingOps::Ops { count } => writeln!(f, "Ops: {count}")?,
            UnderlyingOps::Hidden => {}
        }

        heading(f, "Description")?;
        match &view.description {
            Section::Content(text) => {
                for line in markdown_to_plain(text).lines() {
                    writeln!(f, "  {line}")?;
                }
            }
            Section::Empty(_) => empty_line(f, &view.description)?,
        }

        neighbors(f, &view.upstream)?;
        neighbors(f, &view.downstream)?;

        heading(f, "Metadata")?;
        match &view.metadata {
            Section::Content(rows) => {
                for row in rows {
                    writeln!(f, "  {}: {}", row.label, link(&row.link))?;
                }
            }
            Section::Empty(_) => empty_line(f, &view.metadata)?,
        }

        heading(f, "Required resources")?;
        match &view.required_resources {
            Section::Content(links) => {
                for resource in links {
                    writeln!(f, "  {}", link(resource))?;
                }
            }
            Section::Empty(_) => empty_line(f, &view.required_resources)?,
        }

        heading(f, "Config")?;
        match &view.config {
            Section::Content(config) => {
                writeln!(f, "  {}", config.key)?;
                for field in &config.fields {
                    let required = if field.is_required { "" } else { "?" };
                    writeln!(f, "    {}{required}: {}", field.name, field.type_key)?;
                }
            }
            Section::Empty(_) => empty_line(f, &view.config)?,
        }

        heading(f, "Type")?;
        match &view.output_type {
            Section::Content(summary) => writeln!(f, "  {}", summary.display_name)?,
            Section::Empty(_) => empty_line(f, &view.output_type)?,
        }

        if let Some(version) = &view.code_version {
            heading(f, "Code version")?;
            writeln!(f, "  {version}")?;
        }
        if let Some(freshness) = &view.freshness {
            heading(f, "Freshness policy")?;
            writeln!(f, "  {}", freshness.summary)?;
        }
        if let Some(policy) = &view.auto_materialize {
            heading(f, "Auto-materialize policy")?;
            writeln!(f, "  {}", policy.summary)?;
        }
        if let Some(partitions) = &view.partitions {
            heading(f, "Partitions")?;
            writeln!(f, "  {partitions}")?;
        }
        Ok(())
    }
}

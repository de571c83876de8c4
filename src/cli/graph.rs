//! Graph command - show how resources were grouped and related

use crate::graph::default_graph_builder;
use anyhow::Result;
use console::style;
use std::path::Path;
use tokio_util::sync::CancellationToken;

pub fn run(input: &Path, json: bool) -> Result<()> {
    let resources = super::read_input(input)?;
    let graph = default_graph_builder().build(resources, &CancellationToken::new())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&graph)?);
        return Ok(());
    }

    println!("\n{} ({})\n", style("Service groups").bold(), graph.groups().len());
    for group in graph.groups() {
        let namespace = if group.namespace.is_empty() {
            String::new()
        } else {
            format!(" [{}]", group.namespace)
        };
        println!("  {}{}", style(&group.name).cyan(), style(namespace).dim());
        for key in &group.resources {
            println!("    {}", key);
        }
    }

    println!(
        "\n{} ({})\n",
        style("Relationships").bold(),
        graph.relationship_count()
    );
    for rel in graph.relationships() {
        let dangling = if graph.contains(&rel.to) {
            String::new()
        } else {
            style(" (not in input)").dim().to_string()
        };
        println!(
            "  {} {} {}{}",
            rel.from,
            style(format!("--{}-->", rel.kind)).yellow(),
            rel.to,
            dangling
        );
    }
    println!();
    Ok(())
}

//! `docschat models` -- list the provider's model catalogue.

use anyhow::Context;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;

use docschat_infra::llm::OpenRouterProvider;
use docschat_types::config::ChatConfig;
use docschat_types::llm::ModelInfo;

use super::ApiKeyArgs;

/// Fetch and print the available models.
pub async fn list_models(key: &ApiKeyArgs, json: bool, config: ChatConfig) -> anyhow::Result<()> {
    let provider =
        OpenRouterProvider::new(key.secret()?, &config).context("failed to create provider")?;
    let models = provider
        .list_models()
        .await
        .context("failed to fetch model list")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&models)?);
        return Ok(());
    }

    if models.is_empty() {
        println!("  {}", style("No models available.").dim());
        return Ok(());
    }

    println!();
    println!(
        "  {} ({})",
        style("Available models").bold(),
        style(models.len()).dim()
    );
    println!();
    println!("{}", models_table(&models, &config.model));
    Ok(())
}

/// Render the catalogue, highlighting the configured model.
fn models_table(models: &[ModelInfo], current: &str) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Context").fg(Color::White),
    ]);

    for model in models {
        let id_cell = if model.id == current {
            Cell::new(format!("{} *", model.id)).fg(Color::Green)
        } else {
            Cell::new(&model.id)
        };
        let context = model
            .context_length
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            id_cell,
            Cell::new(model.name.as_deref().unwrap_or("-")),
            Cell::new(context),
        ]);
    }

    table
}

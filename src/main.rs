// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notionkit::config::{CliConfig, Command, CommandLineInput};
use notionkit::model::{user_prompt_uri, OAuthCredentials, Page, PropertyData};
use notionkit::{
    Block, BlockId, DatabaseId, NotionClient, PageId, PropertySort, SortDirection, UserId,
};
use std::fs;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notionkit.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

fn page_title(page: &Page) -> String {
    page.title()
        .and_then(|title| title.plain_text())
        .unwrap_or_else(|| "(untitled)".to_string())
}

fn print_page(page: &Page) {
    println!("{}  {}", page.id, page_title(page));
    for property in &page.property_values {
        let shown = match &property.value {
            PropertyData::Title(text) | PropertyData::RichText(text) => {
                text.plain_text().unwrap_or_default()
            }
            PropertyData::Number(Some(n)) => n.to_string(),
            PropertyData::Checkbox(checked) => checked.to_string(),
            PropertyData::Select(Some(option)) => option.name.clone(),
            PropertyData::Date(Some(date)) => date.start.to_string(),
            PropertyData::Url(Some(text))
            | PropertyData::Email(Some(text))
            | PropertyData::PhoneNumber(Some(text)) => text.clone(),
            other => format!("<{}>", other.type_name()),
        };
        println!("    {}: {}", property.name, shown);
    }
}

fn print_blocks(blocks: &[Block], depth: usize) {
    for block in blocks {
        let text = block
            .text()
            .and_then(|text| text.plain_text())
            .unwrap_or_default();
        println!("{}- [{}] {}", "  ".repeat(depth), block.block_type(), text);
        if let Some(children) = block.children().fetched() {
            print_blocks(children, depth + 1);
        }
    }
}

/// Runs one subcommand against the API.
async fn run(config: CliConfig) -> anyhow::Result<()> {
    if let Command::OauthUrl {
        client_id,
        redirect_uri,
        state,
    } = &config.command
    {
        let credentials = OAuthCredentials {
            client_id: client_id.clone(),
            client_secret: String::new(),
            redirect_uri: redirect_uri.clone(),
        };
        let uri = user_prompt_uri(
            notionkit::constants::NOTION_OAUTH_AUTHORIZE_URL,
            &credentials,
            state,
        )?;
        println!("{}", uri);
        return Ok(());
    }

    let client = NotionClient::new(&config.client)?;
    match &config.command {
        Command::User { id } => {
            let user = client.users().get_user(&UserId::parse(id)?).await?;
            println!("{}  {}", user.id, user.name.as_deref().unwrap_or("(no name)"));
        }
        Command::Users => {
            for user in client.users().get_all_user_list().await? {
                println!("{}  {}", user.id, user.name.as_deref().unwrap_or("(no name)"));
            }
        }
        Command::Page { id } => {
            let page = client.pages().get_page(&PageId::parse(id)?).await?;
            print_page(&page);
        }
        Command::Database { id } => {
            let database = client
                .databases()
                .get_database(&DatabaseId::parse(id)?)
                .await?;
            println!(
                "{}  {}",
                database.id,
                database.title.plain_text().unwrap_or_default()
            );
            for spec in &database.property_specs {
                println!("    {}: {}", spec.name, spec.kind.type_name());
            }
        }
        Command::Query { id } => {
            let rows = client
                .databases()
                .query_database_all(&DatabaseId::parse(id)?, None, None)
                .await?;
            for row in &rows {
                print_page(row);
            }
            println!("{} rows", rows.len());
        }
        Command::Blocks { id, recursive } => {
            let parent = BlockId::parse(id)?;
            let blocks = if *recursive {
                client.blocks().get_all_block_list_recursively(&parent).await?
            } else {
                client.blocks().get_all_block_list(&parent).await?
            };
            print_blocks(&blocks, 0);
        }
        Command::Search { query, databases } => {
            let sort = PropertySort::last_edited(SortDirection::Descending);
            if *databases {
                let found = client
                    .search()
                    .search_databases(query.as_deref(), Some(&sort), None)
                    .await?;
                for database in found.results {
                    println!(
                        "{}  {}",
                        database.id,
                        database.title.plain_text().unwrap_or_default()
                    );
                }
            } else {
                let found = client
                    .search()
                    .search_pages(query.as_deref(), Some(&sort), None)
                    .await?;
                for page in found.results {
                    println!("{}  {}", page.id, page_title(&page));
                }
            }
        }
        Command::OauthUrl { .. } => {}
    }
    client.close();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = CliConfig::resolve(cli).context("Invalid configuration")?;

    run(config).await
}

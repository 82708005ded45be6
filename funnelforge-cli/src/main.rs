//! FunnelForge command-line editor
//!
//! Creates funnel pages from templates, edits their elements, renders them
//! to HTML and publishes them. Pages are kept as one JSON collection under
//! the data directory.
//!
//! Usage:
//!   funnelforge new "Spring Launch" --template product-launch
//!   funnelforge add <PAGE_ID> heading
//!   funnelforge update <PAGE_ID> <ELEMENT_ID> --set text="Hello" --style color=#111827
//!   funnelforge render <PAGE_ID> -o page.html

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use funnelforge_cli::{build_patch, parse_kind, App, AppConfig};
use funnelforge_generation::BusinessProfile;
use funnelforge_model::PageTemplate;
use funnelforge_types::{ElementId, Notification, NotificationLevel, PageId};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "funnelforge")]
#[command(about = "Compose, generate and publish funnel pages")]
struct Args {
    /// Directory holding the page collection
    #[arg(short, long, default_value = ".funnelforge")]
    data_dir: PathBuf,

    /// Optional JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a page from a template
    New {
        name: String,
        #[arg(short, long, default_value = "blank")]
        template: PageTemplate,
    },
    /// List saved pages
    List,
    /// Print a page record as JSON
    Show { page: PageId },
    /// Add a default element to a page
    Add {
        page: PageId,
        /// heading, text, button, image, form or container
        kind: String,
        /// Nest the element inside this container
        #[arg(long)]
        parent: Option<ElementId>,
    },
    /// Update an element's content and styles
    Update {
        page: PageId,
        element: ElementId,
        /// Content field assignment, e.g. --set text="Hello"
        #[arg(long = "set")]
        sets: Vec<String>,
        /// Style assignment, e.g. --style color=#111827
        #[arg(long = "style")]
        styles: Vec<String>,
        /// Style property to drop
        #[arg(long = "unset-style")]
        unset_styles: Vec<String>,
    },
    /// Remove an element from a page
    Remove { page: PageId, element: ElementId },
    /// Render a page to HTML
    Render {
        page: PageId,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Mark a page published and save it
    Publish { page: PageId },
    /// Delete a saved page
    Delete { page: PageId },
    /// Generate a funnel page from a business profile
    Generate {
        #[arg(long)]
        business: String,
        #[arg(long)]
        industry: String,
        #[arg(long)]
        audience: String,
        #[arg(long, default_value = "")]
        goal: String,
        #[arg(long, default_value = "")]
        topic: String,
        #[arg(long, default_value = "")]
        tone: String,
        /// Use the configured generation backend instead of the simulation
        #[arg(long)]
        remote: bool,
    },
    /// List available page templates
    Templates,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let (tx, rx) = mpsc::unbounded_channel();
    let toasts = tokio::spawn(log_notifications(rx));
    let app = App::open(&args.data_dir, config, Some(tx))?;

    let outcome = run(&app, args.command).await;
    drop(app);
    let _ = toasts.await;
    outcome
}

async fn run(app: &App, command: Command) -> Result<()> {
    match command {
        Command::New { name, template } => {
            let page = app.create_page(&name, template).await?;
            println!("{}", page.id);
        }
        Command::List => {
            let pages = app.list_pages()?;
            if pages.is_empty() {
                println!("No pages yet. Create one with `funnelforge new <NAME>`.");
            }
            for page in pages {
                println!(
                    "{}  {:<10} {:>3} elements  {}",
                    page.id,
                    page.status.to_string(),
                    page.elements.len(),
                    page.name
                );
            }
        }
        Command::Show { page } => {
            let page = app.find_page(&page)?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Command::Add { page, kind, parent } => {
            let id = app.add_element(&page, parse_kind(&kind)?, parent.as_ref()).await?;
            println!("{id}");
        }
        Command::Update {
            page,
            element,
            sets,
            styles,
            unset_styles,
        } => {
            let content = app.element_content(&page, &element)?;
            let patch = build_patch(&sets, &styles, &unset_styles, content.as_ref())?;
            if !app.update_element(&page, &element, &patch).await? {
                warn!("No element {element} on page {page}; nothing changed");
            }
        }
        Command::Remove { page, element } => {
            if !app.remove_element(&page, &element).await? {
                warn!("No element {element} on page {page}; nothing removed");
            }
        }
        Command::Render { page, output } => {
            let html = app.render_page(&page)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, html)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Rendered {} to {}", page, path.display());
                }
                None => println!("{html}"),
            }
        }
        Command::Publish { page } => {
            let page = app.publish_page(&page).await?;
            println!("{} is {}", page.name, page.status);
        }
        Command::Delete { page } => {
            if !app.delete_page(&page)? {
                warn!("No page {page}; nothing deleted");
            }
        }
        Command::Generate {
            business,
            industry,
            audience,
            goal,
            topic,
            tone,
            remote,
        } => {
            let profile = BusinessProfile {
                business_name: business,
                industry,
                target_audience: audience,
                goal,
                topic,
                tone,
            };
            if remote {
                let content = app.generate_remote(&profile).await?;
                println!("{}", serde_json::to_string_pretty(&content)?);
            } else {
                let page = app.generate(&profile, |_| {}).await?;
                println!("{}", page.id);
            }
        }
        Command::Templates => {
            for template in PageTemplate::ALL {
                println!("{:<16} {}", template.slug(), template.description());
            }
        }
    }
    Ok(())
}

async fn log_notifications(mut rx: mpsc::UnboundedReceiver<Notification>) {
    while let Some(notification) = rx.recv().await {
        match notification.level {
            NotificationLevel::Error => warn!("{notification}"),
            NotificationLevel::Info | NotificationLevel::Success => info!("{notification}"),
        }
    }
}

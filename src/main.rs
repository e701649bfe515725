mod cli;
mod config;
mod document;
mod enhance;
mod error;
mod export;
mod interactive;
mod navigation;
mod preview;
mod render;
mod storage;
mod ui;
mod validation;
mod wizard;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use console::Style;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};
use config::ResumeConfig;
use document::ResumeDocument;
use enhance::ScriptedEnhancer;
use export::{LopdfRenderer, SystemPrinter};
use navigation::{History, Route};
use preview::Preview;
use render::TemplateId;
use storage::{FileStore, ResumeRepository};
use validation::validate_document;
use wizard::{Editor, EditorOptions, EditorStep, Transition};

type Repository = ResumeRepository<FileStore>;

fn init_tracing(config: &ResumeConfig, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("resume={level}"))
        }))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn read_document(path: &Path) -> Result<ResumeDocument> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a valid resume document", path.display()))
}

fn editor_options(config: &ResumeConfig, template: Option<TemplateId>, resume: bool) -> EditorOptions {
    EditorOptions {
        template,
        fallback_template: config.default_template,
        resume,
    }
}

/// Prints the stored resume, or points at the editor when there is none.
/// With `edit` the editor is opened on the stored resume afterwards.
fn show_preview(
    repository: &Repository,
    config: &ResumeConfig,
    html: Option<PathBuf>,
    edit: bool,
) -> Result<()> {
    let mut navigator = History::new();
    let Some(preview) = Preview::open(repository, &mut navigator, config.default_template)? else {
        ui::warning("No resume saved yet. Run `resume edit` to create one.");
        return Ok(());
    };

    let rendered = preview.rendered();
    match html {
        Some(path) => {
            std::fs::write(&path, rendered.to_html())
                .with_context(|| format!("failed to write {}", path.display()))?;
            ui::success(&format!("HTML preview written to {}", path.display()));
        }
        None => {
            let template = preview.template();
            println!(
                "{}",
                Style::new()
                    .dim()
                    .apply_to(format!("── {} ({template}) ──", template.display_name()))
            );
            print!("{}", rendered.to_text());
        }
    }

    if edit {
        preview.edit(&mut navigator);
    }
    drop(preview);
    if navigator.current() == Some(Route::Editor) {
        return edit_session(repository, config, None, true);
    }
    Ok(())
}

fn edit_session(
    repository: &Repository,
    config: &ResumeConfig,
    template: Option<TemplateId>,
    resume: bool,
) -> Result<()> {
    let mut navigator = History::new();
    let mut editor = Editor::open(repository, &mut navigator, editor_options(config, template, resume))?;
    let Some(record) = interactive::run(&mut editor, &mut std::io::stdin().lock())? else {
        return Ok(());
    };
    drop(editor);

    ui::print_submission(&record);
    if navigator.current() == Some(Route::Preview) {
        show_preview(repository, config, None, false)?;
    }
    Ok(())
}

/// Walks an imported document through every stage, stopping at the first
/// stage that does not validate.
fn import(
    repository: &Repository,
    config: &ResumeConfig,
    file: &Path,
    template: Option<TemplateId>,
) -> Result<()> {
    let document = read_document(file)?;
    let mut navigator = History::new();
    let mut editor = Editor::open(repository, &mut navigator, editor_options(config, template, false))?;
    editor.replace_document(document);

    let record = loop {
        match editor.next()? {
            EditorStep::Submitted(record) => break record,
            EditorStep::Wizard(Transition::Blocked(errors)) => {
                ui::print_validation(&errors);
                bail!(
                    "{} stopped at stage {} with {} problem(s)",
                    file.display(),
                    editor.wizard().stage(),
                    errors.len()
                );
            }
            EditorStep::Wizard(_) => {}
        }
    };
    drop(editor);

    ui::print_submission(&record);
    if navigator.current() == Some(Route::Preview) {
        show_preview(repository, config, None, false)?;
    }
    Ok(())
}

fn list_templates(repository: &Repository, config: &ResumeConfig) -> Result<()> {
    let current = repository
        .load_template()?
        .unwrap_or(config.default_template);
    let bold = Style::new().bold();
    for template in TemplateId::ALL {
        let marker = if template == current { "*" } else { " " };
        println!(
            "{marker} {:<10} {}",
            bold.apply_to(template.id()),
            template.display_name()
        );
    }
    Ok(())
}

async fn enhance(repository: &Repository, config: &ResumeConfig) -> Result<()> {
    let mut navigator = History::new();
    let preview = Preview::require(repository, &mut navigator, config.default_template)?;
    let enhancer = ScriptedEnhancer::new(Duration::from_millis(config.enhance_delay_ms));

    let progress = ui::ActionProgress::start("Enhancing resume...");
    match preview.enhance(&enhancer).await {
        Ok(()) => {
            progress.succeed("Resume enhanced");
            Ok(())
        }
        Err(err) => {
            progress.fail(&err.to_string());
            Err(err.into())
        }
    }
}

async fn export(repository: &Repository, config: &ResumeConfig, out_dir: Option<PathBuf>) -> Result<()> {
    let mut navigator = History::new();
    let preview = Preview::require(repository, &mut navigator, config.default_template)?;
    let renderer = LopdfRenderer::new(out_dir.unwrap_or_else(|| PathBuf::from(".")));
    let options = preview
        .pdf_options()
        .with_scale(config.pdf_scale)
        .with_margin(config.pdf_margin_in);

    let progress = ui::ActionProgress::start("Exporting PDF...");
    match preview.export_pdf(&renderer, &options).await {
        Ok(path) => {
            progress.succeed(&format!("Resume saved as {}", path.display()));
            Ok(())
        }
        Err(err) => {
            progress.fail(&err.to_string());
            Err(err.into())
        }
    }
}

fn validate(repository: &Repository, file: Option<&Path>) -> Result<()> {
    let document = match file {
        Some(path) => read_document(path)?,
        None => match repository.load()? {
            Some(document) => document,
            None => bail!("no resume saved yet; pass a file or run `resume edit`"),
        },
    };

    let errors = validate_document(&document);
    if errors.is_empty() {
        ui::success("Resume is valid");
        return Ok(());
    }
    ui::print_validation(&errors);
    bail!("{} problem(s) found", errors.len())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ResumeConfig::load()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    init_tracing(&config, cli.verbose);
    info!(data_dir = %config.data_dir.display(), "starting");

    let repository = ResumeRepository::new(FileStore::new(&config.data_dir));

    match cli.command {
        Command::Edit { template, resume } => edit_session(&repository, &config, template, resume),
        Command::Import { file, template } => import(&repository, &config, &file, template),
        Command::Preview { html, edit } => show_preview(&repository, &config, html, edit),
        Command::Template { id } => {
            let mut navigator = History::new();
            Preview::require(&repository, &mut navigator, config.default_template)?
                .select_template(id)?;
            ui::success(&format!("Template set to {}", id.display_name()));
            Ok(())
        }
        Command::Templates => list_templates(&repository, &config),
        Command::Enhance => enhance(&repository, &config).await,
        Command::Export { out_dir } => export(&repository, &config, out_dir).await,
        Command::Print => {
            let mut navigator = History::new();
            Preview::require(&repository, &mut navigator, config.default_template)?
                .print(&SystemPrinter::new(config.print_command.as_str()))?;
            ui::success("Sent to printer");
            Ok(())
        }
        Command::Validate { file } => validate(&repository, file.as_deref()),
    }
}

//! Command-line surface of `resume`, built with clap.
//!
//! [`Cli`] holds the global flags (`--data-dir`, `--verbose`) and one
//! [`Command`] per screen action.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::render::TemplateId;

/// Build a resume step by step, preview it in four templates, export to PDF.
#[derive(Debug, Parser)]
#[command(name = "resume", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory where the resume is stored.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Debug logging on stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fill in the resume interactively, one stage at a time.
    Edit {
        /// Template to save with the resume.
        #[arg(long)]
        template: Option<TemplateId>,

        /// Start from the stored resume instead of a blank one.
        #[arg(long)]
        resume: bool,
    },

    /// Run a JSON resume through every stage and save it.
    Import {
        /// JSON file using the stored `resumeData` layout.
        file: PathBuf,

        #[arg(long)]
        template: Option<TemplateId>,
    },

    /// Show the stored resume in its template.
    Preview {
        /// Write a standalone HTML page instead of printing text.
        #[arg(long)]
        html: Option<PathBuf>,

        /// Go back to the editor with the stored resume afterwards.
        #[arg(long)]
        edit: bool,
    },

    /// Change the template of the stored resume.
    Template {
        id: TemplateId,
    },

    /// List the available templates.
    Templates,

    /// Rewrite the summary and first job with enhanced copy.
    Enhance,

    /// Export the stored resume to PDF.
    Export {
        /// Where to write the PDF (default: current directory).
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Send the stored resume to the print command.
    Print,

    /// Check a resume and list problems per stage.
    Validate {
        /// JSON file to check instead of the stored resume.
        file: Option<PathBuf>,
    },
}

#![forbid(unsafe_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use kinfolk::{Editor, EditorConfig, LayoutMetrics, Person, PersonId, Placement, Rect, SvgRenderer};
use serde::Serialize;

use crate::error::{CliError, Result};

#[derive(Debug, Parser)]
#[command(
    name = "kinfolk",
    about = "Create, inspect, edit, and export family tree documents",
    version
)]
pub struct Cli {
    /// Layout metrics as a JSON object, e.g. '{"node_width":160}'.
    #[arg(long, global = true, value_name = "JSON")]
    pub metrics: Option<String>,

    /// More logging (-v debug, -vv trace). KINFOLK_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a new document holding a single blank root.
    New(NewArgs),

    /// Print every placement, the bounds, and integrity findings as JSON.
    Show(ShowArgs),

    /// Append a child to a person and save.
    #[command(name = "add-child")]
    AddChild(AddChildArgs),

    /// Replace a person's child order and save.
    Reorder(ReorderArgs),

    /// Move one person to a new index among its siblings and save.
    Move(MoveArgs),

    /// Render the tree as SVG.
    Export(ExportArgs),
}

#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    pub out: PathBuf,
    #[arg(long, default_value = "")]
    pub title: String,
}

#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    pub file: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct AddChildArgs {
    pub file: PathBuf,
    #[arg(long)]
    pub parent: String,
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub title: String,
    #[arg(long, default_value = "")]
    pub spouse: String,
    #[arg(long, default_value = "")]
    pub note: String,
    #[arg(long)]
    pub female: bool,
    #[arg(long)]
    pub alive: bool,
    #[arg(long)]
    pub spouse_alive: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ReorderArgs {
    pub file: PathBuf,
    #[arg(long)]
    pub parent: String,
    /// Every current child id, in the new order.
    #[arg(required = true)]
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct MoveArgs {
    pub file: PathBuf,
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub to: usize,
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    pub file: PathBuf,
    pub out: PathBuf,
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,
    #[arg(long, default_value_t = 20.0)]
    pub padding: f64,
}

/// JSON printed by `show`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowReport<'a> {
    pub title: &'a str,
    pub root_id: &'a PersonId,
    pub members: usize,
    pub layers: usize,
    pub bounds: Rect,
    pub placements: Vec<&'a Placement>,
    pub issues: Vec<String>,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let config = config_from(cli.metrics.as_deref())?;
    tracing::debug!(target: "kinfolk.cli", command = ?cli.command, "running command");
    match cli.command {
        Commands::New(args) => run_new(config, args, out),
        Commands::Show(args) => run_show(config, args, out),
        Commands::AddChild(args) => run_add_child(config, args, out),
        Commands::Reorder(args) => run_reorder(config, args, out),
        Commands::Move(args) => run_move(config, args, out),
        Commands::Export(args) => run_export(config, args, out),
    }
}

fn config_from(metrics: Option<&str>) -> Result<EditorConfig> {
    let Some(json) = metrics else {
        return Ok(EditorConfig::default());
    };
    let metrics: LayoutMetrics = serde_json::from_str(json)?;
    metrics.validate().map_err(kinfolk::Error::from)?;
    Ok(EditorConfig::default().with_metrics(metrics))
}

fn open(config: EditorConfig, file: &Path) -> Result<Editor> {
    let mut editor = Editor::with_config(config)?;
    editor.load_file(file)?;
    Ok(editor)
}

fn known(editor: &Editor, id: &str) -> Result<PersonId> {
    let id = PersonId::from(id);
    if editor.family().contains(&id) {
        Ok(id)
    } else {
        Err(CliError::UnknownPerson {
            id: id.to_string(),
        })
    }
}

fn run_new<W: Write>(config: EditorConfig, args: NewArgs, out: &mut W) -> Result<()> {
    let mut editor = Editor::with_config(config)?;
    editor.set_title(args.title);
    editor.save_file(&args.out)?;
    writeln!(out, "{}", editor.family().root_id())?;
    Ok(())
}

fn run_show<W: Write>(config: EditorConfig, args: ShowArgs, out: &mut W) -> Result<()> {
    let editor = open(config, &args.file)?;
    let layout = editor.layout();
    let report = editor.family().invariant_report();
    let show = ShowReport {
        title: editor.family().title(),
        root_id: editor.family().root_id(),
        members: editor.family().len(),
        layers: layout.layer_count(),
        bounds: layout.bounds(),
        placements: layout.iter().collect(),
        issues: report.issues.iter().map(ToString::to_string).collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &show)?;
    writeln!(out)?;
    Ok(())
}

fn run_add_child<W: Write>(config: EditorConfig, args: AddChildArgs, out: &mut W) -> Result<()> {
    let mut editor = open(config, &args.file)?;
    let parent = known(&editor, &args.parent)?;
    if args.name.trim().is_empty() {
        return Err(CliError::invalid("--name must not be empty"));
    }
    let person = Person::new()
        .with_name(args.name)
        .with_title(args.title)
        .with_spouse(args.spouse)
        .with_note(args.note)
        .with_male(!args.female)
        .with_alive(args.alive)
        .with_spouse_alive(args.spouse_alive);
    let id = person.id.clone();
    editor.add_child_done(&parent, person)?;
    editor.save()?;
    writeln!(out, "{id}")?;
    Ok(())
}

fn run_reorder<W: Write>(config: EditorConfig, args: ReorderArgs, out: &mut W) -> Result<()> {
    let mut editor = open(config, &args.file)?;
    let parent = known(&editor, &args.parent)?;
    let order = args
        .ids
        .iter()
        .map(|id| known(&editor, id))
        .collect::<Result<Vec<_>>>()?;
    editor.reorder_children(&parent, order)?;
    editor.save()?;
    writeln!(out, "reordered {} children of {parent}", args.ids.len())?;
    Ok(())
}

fn run_move<W: Write>(config: EditorConfig, args: MoveArgs, out: &mut W) -> Result<()> {
    let mut editor = open(config, &args.file)?;
    let id = known(&editor, &args.id)?;
    if editor.family().parent_id(&id).is_none() {
        return Err(CliError::invalid("the root person has no siblings to move among"));
    }
    if editor.move_child(&id, args.to)? {
        editor.save()?;
        let index = editor.family().index_in_siblings(&id).unwrap_or(args.to);
        writeln!(out, "moved {id} to index {index}")?;
    } else {
        writeln!(out, "{id} is already at index {}", args.to)?;
    }
    Ok(())
}

fn run_export<W: Write>(config: EditorConfig, args: ExportArgs, out: &mut W) -> Result<()> {
    if !(args.scale.is_finite() && args.scale > 0.0) {
        return Err(CliError::invalid(format!("--scale must be positive, got {}", args.scale)));
    }
    let editor = open(config, &args.file)?;
    let renderer = SvgRenderer::default()
        .with_scale(args.scale)
        .with_padding(args.padding);
    std::fs::write(&args.out, editor.export_svg_with(&renderer))?;
    writeln!(out, "{}", args.out.display())?;
    Ok(())
}

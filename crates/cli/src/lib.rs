mod view;

use clap::{Parser, Subcommand};
use clsview_api::FqName;
use clsview_core::{ClassProjection, ProjectionConfig};
use clsview_java::JavaProjections;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tabled::{Table, settings::Style};
use view::{ClassRow, MemberRow, SignatureRow};

#[derive(Parser)]
#[command(
    name = "clsview",
    version,
    about = "Inspect compiled Java classes through their source-level projections",
    long_about = "clsview reads the classes of a jar, jmod or jimage and presents them as \
                  source-level declarations. When a source attachment is available, members \
                  are matched with the declarations they were compiled from."
)]
pub struct Cli {
    /// Also log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the classes of an archive
    List {
        /// Path to the jar, jmod or jimage
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,
        #[command(flatten)]
        options: LoadOptions,
    },
    /// Show the members of one class
    Inspect {
        #[arg(value_name = "ARCHIVE")]
        archive: PathBuf,
        /// Qualified name of the class, e.g. `com.example.Outer.Inner`
        #[arg(value_name = "CLASS")]
        class: String,
        /// Also show every signature visible through supertypes
        #[arg(long)]
        inherited: bool,
        #[command(flatten)]
        options: LoadOptions,
    },
    /// Print the JSON schema of the configuration file
    Schema,
}

#[derive(clap::Args)]
pub struct LoadOptions {
    /// Source attachment; defaults to a sibling `-sources.jar`
    #[arg(long, value_name = "SOURCES_JAR")]
    pub sources: Option<PathBuf>,
    /// JSON configuration file
    #[arg(long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,
}

impl LoadOptions {
    fn open(&self, archive: &Path) -> Result<JavaProjections, Box<dyn std::error::Error>> {
        let config = match &self.config {
            Some(path) => ProjectionConfig::load(path)?,
            None => ProjectionConfig::default(),
        };
        let projections = JavaProjections::new(config);
        projections.open_archive(archive, self.sources.as_deref())?;
        Ok(projections)
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = clsview_core::logging::init_logging("cli", cli.verbose);
    execute(cli.command, &mut std::io::stdout().lock())
}

/// Run one command, printing its tables to `out`.
pub fn execute(
    command: Commands,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::List { archive, options } => list(&archive, &options, out),
        Commands::Inspect {
            archive,
            class,
            inherited,
            options,
        } => inspect(&archive, &class, inherited, &options, out),
        Commands::Schema => {
            let schema = ProjectionConfig::json_schema();
            writeln!(out, "{}", serde_json::to_string_pretty(&schema)?)?;
            Ok(())
        }
    }
}

fn list(
    archive: &Path,
    options: &LoadOptions,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let projections = options.open(archive)?;
    let mut classes: Vec<Arc<ClassProjection>> = projections
        .index()
        .files()
        .iter()
        .flat_map(|file| file.all_classes())
        .collect();
    classes.sort_by(|a, b| a.fq_name().cmp(b.fq_name()));

    let rows: Vec<ClassRow> = classes.iter().map(|c| ClassRow::from_class(c)).collect();
    tracing::info!(archive = %archive.display(), classes = rows.len(), "listing classes");
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    writeln!(out, "{table}")?;
    Ok(())
}

fn inspect(
    archive: &Path,
    class: &str,
    inherited: bool,
    options: &LoadOptions,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let projections = options.open(archive)?;
    let fq_name = FqName::new(class);
    let projection = projections
        .find_class(&fq_name)
        .ok_or_else(|| format!("class {fq_name} not found in {}", archive.display()))?;

    writeln!(out, "{}  ({projection})", projection.fq_name())?;
    let mut rows: Vec<MemberRow> = Vec::new();
    rows.extend(projection.fields().iter().map(|f| MemberRow::from_field(f)));
    rows.extend(projection.methods().iter().map(|m| MemberRow::from_method(m)));
    rows.extend(
        [projection.values_method(), projection.value_of_method()]
            .into_iter()
            .flatten()
            .map(|m| MemberRow::from_synthetic(&m)),
    );
    rows.extend(
        projection
            .inner_classes()
            .iter()
            .map(MemberRow::from_inner_class),
    );
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    writeln!(out, "{table}")?;

    if inherited {
        let rows: Vec<SignatureRow> = projection
            .visible_signatures()
            .iter()
            .map(SignatureRow::from_signature)
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::sharp());
        writeln!(out, "{table}")?;
    }
    Ok(())
}

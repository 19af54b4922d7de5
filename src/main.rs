use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use skill_matrix::config::Settings;
use skill_matrix::config::CRITERIA_FILE;
use skill_matrix::output::dump::dump_sheets;
use skill_matrix::patch::patch_file;
use skill_matrix::spreadsheet::filter::SheetFilter;
use skill_matrix::Pipeline;
use skill_matrix::Workbook;

#[derive(Parser)]
#[command(about = "Convert a team skill-matrix workbook into structured JSON documents.")]
struct Args {
    /// Source workbook.
    #[arg(long, global = true)]
    workbook: Option<PathBuf>,

    /// Directory receiving the structured documents.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Directory receiving the raw per-sheet dumps.
    #[arg(long, global = true)]
    dump_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Extract the structured documents (default).
    Extract,
    /// Dump every sheet as an array of row objects.
    Dump {
        /// Glob patterns selecting the sheets to dump (repeatable, default: all).
        #[arg(long = "sheet")]
        sheets: Vec<String>,
    },
    /// Replace bare NaN / Infinity tokens in a JSON file with null.
    Patch {
        /// File to patch (default: `<data-dir>/criteria.json`).
        file: Option<PathBuf>,
    },
}

impl Args {
    fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        if let Some(workbook) = &self.workbook {
            settings.workbook = workbook.clone();
        }
        if let Some(data_dir) = &self.data_dir {
            settings.data_dir = data_dir.clone();
        }
        if let Some(dump_dir) = &self.dump_dir {
            settings.dump_dir = dump_dir.clone();
        }
        settings
    }
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();
    let settings = args.settings();

    match args.command.unwrap_or(Command::Extract) {
        Command::Extract => {
            Pipeline::open(&settings).run().context("extraction failed")?;
        }
        Command::Dump { sheets } => {
            let filter = SheetFilter::new(&sheets[..]).context("invalid --sheet pattern")?;
            let mut workbook = Workbook::open(&settings.workbook)
                .with_context(|| format!("cannot open workbook '{}'", settings.workbook.display()))?;
            dump_sheets(&mut workbook, &filter, &settings.dump_dir).context("dump failed")?;
        }
        Command::Patch { file } => {
            let path = file.unwrap_or_else(|| settings.data_file(CRITERIA_FILE));
            patch_file(&path).with_context(|| format!("cannot patch '{}'", path.display()))?;
        }
    }
    Ok(())
}

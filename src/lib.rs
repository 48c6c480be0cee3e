use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

pub mod import;
pub mod parsing;
pub mod record;
pub mod unify;
pub mod write;

use write::WriteOutcome;

/// Convert a vCard 3.0 file to a Trojita addressbook and sort the addressbook by name.
///
/// Without a vCard file the existing addressbook is only sorted.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Config {
    /// vCard 3.0 file whose contacts are added to the addressbook
    #[clap(parse(from_os_str))]
    pub vcf_file: Option<PathBuf>,

    /// Addressbook file to sort and write. The previous version is kept in <ADDRESSBOOK>.bak
    #[clap(short, long, parse(from_os_str), default_value = "addressbook")]
    pub addressbook: PathBuf,

    /// Print debug information
    #[clap(short, long)]
    pub verbose: bool,
}

pub fn run(config: Config) -> Result<()> {
    let previous = parsing::read_addressbook(&config.addressbook)?;
    let existing = parsing::parse_addressbook(&previous);

    let records = match &config.vcf_file {
        Some(vcf_file) => {
            // Read the whole vCard file before touching anything, a bad file aborts the run
            let contacts = parsing::read_vcards(vcf_file)?;
            let import = import::import_contacts(&contacts);
            bunt::println!("{$green}Imported {} contacts{/$}", import.total);
            let (unified, replaced) = unify::merge_records(existing, import.records);
            if replaced > 0 {
                bunt::println!("{$yellow}Replaced {} existing contacts{/$}", replaced);
            }
            unified
        }
        None => {
            if previous.trim().is_empty() {
                bunt::println!("{$yellow}Missing or empty addressbook file... nothing done{/$}");
                return Ok(());
            }
            existing
        }
    };

    let sorted = unify::sort_records(records);
    let content = unify::render_addressbook(&sorted);
    match write::write_addressbook(&config.addressbook, &previous, &content)? {
        WriteOutcome::Unchanged => info!(contacts = sorted.len(), "addressbook already sorted"),
        WriteOutcome::Written { backup } => bunt::println!(
            "Wrote {} contacts to {[bold]}, previous version saved to {[bold]}",
            sorted.len(),
            config.addressbook.display(),
            backup.display()
        ),
    }
    Ok(())
}

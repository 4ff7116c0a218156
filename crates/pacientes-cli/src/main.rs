//! `pacientes` — terminal front end for the patient registry.
//!
//! All behavior lives in `pacientes-core`; this binary only collects
//! arguments, asks for delete confirmation, and prints views and notices.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pacientes_core::cache::{AssetCache, DirSource};
use pacientes_core::view::{ListView, PatientDetails};
use pacientes_core::{Notice, PatientInput, PatientStatus, RecordStore, ViewController};

#[derive(Parser)]
#[command(name = "pacientes", about = "Local-first patient registry", version)]
struct Cli {
    /// Path of the JSON document holding the patient collection
    #[arg(long, env = "PACIENTES_DATA", default_value = "patients.json", global = true)]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a new patient
    Add(PatientArgs),
    /// Edit an existing patient (unset flags keep their current values)
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Delete a patient (asks for confirmation unless --yes)
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
    /// List patients, optionally filtered
    List {
        /// Substring match against name, CPF digits, or email
        #[arg(long, default_value = "")]
        search: String,
        /// Exact status match: active or inactive
        #[arg(long, value_parser = parse_status)]
        status: Option<PatientStatus>,
    },
    /// Show one patient in full
    Show { id: String },
    /// Dashboard counts
    Summary,
    /// Export the whole collection as CSV
    Export {
        /// Directory the dated CSV file is written into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Manage the offline cache of static assets
    Cache {
        #[command(subcommand)]
        action: CacheCommand,
    },
}

#[derive(Args)]
struct PatientArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    cpf: String,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    /// First consultation date, YYYY-MM-DD
    #[arg(long)]
    first_consultation: Option<String>,
    /// Next consultation date, YYYY-MM-DD
    #[arg(long)]
    next_consultation: Option<String>,
    /// active or inactive
    #[arg(long, value_parser = parse_status, default_value = "active")]
    status: PatientStatus,
    #[arg(long)]
    observations: Option<String>,
}

#[derive(Args)]
struct EditArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    cpf: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    first_consultation: Option<String>,
    #[arg(long)]
    next_consultation: Option<String>,
    #[arg(long, value_parser = parse_status)]
    status: Option<PatientStatus>,
    #[arg(long)]
    observations: Option<String>,
}

#[derive(Subcommand)]
enum CacheCommand {
    /// Pre-fetch the static asset manifest from an origin directory
    Install {
        #[arg(long)]
        origin: PathBuf,
        #[arg(long, default_value = "cache")]
        root: PathBuf,
    },
    /// Remove caches left over from previous versions
    Activate {
        #[arg(long, default_value = "cache")]
        root: PathBuf,
    },
    /// Show which manifest assets are currently cached
    Status {
        #[arg(long, default_value = "cache")]
        root: PathBuf,
    },
}

fn parse_status(s: &str) -> Result<PatientStatus, String> {
    s.parse()
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut controller = ViewController::new(RecordStore::open(&cli.data));

    let code = match cli.command {
        Command::Add(args) => {
            let outcome = controller.submit_form(patient_input(args));
            print_notice(&outcome.notice);
            if let Some(patient) = outcome.patient {
                println!("id: {}", patient.id);
            }
            exit_for(&outcome.notice)
        }
        Command::Edit { id, fields } => match controller.begin_edit(&id) {
            Some(form) => {
                let outcome = controller.submit_form(merge_edit(form, fields));
                print_notice(&outcome.notice);
                exit_for(&outcome.notice)
            }
            None => {
                eprintln!("Patient not found.");
                ExitCode::FAILURE
            }
        },
        Command::Delete { id, yes } => {
            let confirmed = yes || confirm_delete(&controller, &id)?;
            match controller.request_delete(&id, confirmed) {
                Some(notice) => {
                    print_notice(&notice);
                    exit_for(&notice)
                }
                None => {
                    println!("Aborted.");
                    ExitCode::SUCCESS
                }
            }
        }
        Command::List { search, status } => {
            print_list(&controller.search(&search, status));
            ExitCode::SUCCESS
        }
        Command::Show { id } => match controller.details(&id) {
            Some(details) => {
                print_details(&details);
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("Patient not found.");
                ExitCode::FAILURE
            }
        },
        Command::Summary => {
            let summary = controller.dashboard();
            println!("total:    {}", summary.total);
            println!("active:   {}", summary.active);
            println!("inactive: {}", summary.inactive);
            ExitCode::SUCCESS
        }
        Command::Export { out } => match controller.export_csv() {
            Ok(export) => {
                let path = export.write_to(&out)?;
                println!("Patient list exported to {}", path.display());
                ExitCode::SUCCESS
            }
            Err(notice) => {
                print_notice(&notice);
                ExitCode::FAILURE
            }
        },
        Command::Cache { action } => run_cache(action)?,
    };

    Ok(code)
}

fn patient_input(args: PatientArgs) -> PatientInput {
    PatientInput {
        full_name: args.name,
        cpf: args.cpf,
        email: args.email,
        phone: args.phone,
        first_consultation: args.first_consultation,
        next_consultation: args.next_consultation,
        status: Some(args.status),
        observations: args.observations,
    }
}

/// Full-replacement edit semantics: start from the record's current values,
/// override whatever flags were provided.
fn merge_edit(mut form: PatientInput, fields: EditArgs) -> PatientInput {
    if let Some(name) = fields.name {
        form.full_name = name;
    }
    if let Some(cpf) = fields.cpf {
        form.cpf = cpf;
    }
    if let Some(email) = fields.email {
        form.email = Some(email);
    }
    if let Some(phone) = fields.phone {
        form.phone = Some(phone);
    }
    if let Some(date) = fields.first_consultation {
        form.first_consultation = Some(date);
    }
    if let Some(date) = fields.next_consultation {
        form.next_consultation = Some(date);
    }
    if let Some(status) = fields.status {
        form.status = Some(status);
    }
    if let Some(observations) = fields.observations {
        form.observations = Some(observations);
    }
    form
}

fn confirm_delete(controller: &ViewController, id: &str) -> Result<bool> {
    let name = match controller.details(id) {
        Some(details) => details.full_name,
        None => id.to_string(),
    };
    print!("Delete patient {}? [y/N] ", name);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn print_notice(notice: &Notice) {
    match notice {
        Notice::Success(message) => println!("{}", message),
        Notice::Error(message) => eprintln!("{}", message),
    }
}

fn exit_for(notice: &Notice) -> ExitCode {
    if notice.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_list(view: &ListView) {
    if let Some(empty) = view.empty {
        println!("{}", empty.title());
        println!("{}", empty.hint());
        return;
    }

    for row in &view.rows {
        let mut extras = Vec::new();
        if let Some(email) = &row.email {
            extras.push(email.clone());
        }
        if let Some(phone) = &row.phone {
            extras.push(phone.clone());
        }
        if let Some(next) = &row.next_consultation {
            extras.push(format!("next: {}", next));
        }
        println!(
            "{}  {:<10}  {}  {}{}",
            row.id,
            row.status,
            row.cpf,
            row.full_name,
            if extras.is_empty() {
                String::new()
            } else {
                format!("  ({})", extras.join(", "))
            }
        );
    }
}

fn print_details(details: &PatientDetails) {
    println!("id:                 {}", details.id);
    println!("name:               {}", details.full_name);
    println!("cpf:                {}", details.cpf);
    if let Some(email) = &details.email {
        println!("email:              {}", email);
    }
    if let Some(phone) = &details.phone {
        println!("phone:              {}", phone);
    }
    if let Some(date) = &details.first_consultation {
        println!("first consultation: {}", date);
    }
    if let Some(date) = &details.next_consultation {
        println!("next consultation:  {}", date);
    }
    println!("status:             {}", details.status);
    if let Some(observations) = &details.observations {
        println!("observations:       {}", observations);
    }
}

fn run_cache(action: CacheCommand) -> Result<ExitCode> {
    match action {
        CacheCommand::Install { origin, root } => {
            let cache = AssetCache::new(root);
            cache.install(&DirSource::new(origin))?;
            println!(
                "Cache {} installed ({} assets)",
                cache.version(),
                cache.manifest().len()
            );
            Ok(ExitCode::SUCCESS)
        }
        CacheCommand::Activate { root } => {
            let cache = AssetCache::new(root);
            let removed = cache.activate()?;
            if removed.is_empty() {
                println!("Cache {} active, nothing to clean up", cache.version());
            } else {
                for name in removed {
                    println!("Removed stale cache {}", name);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        CacheCommand::Status { root } => {
            let cache = AssetCache::new(root);
            println!("cache: {}", cache.version());
            for asset in cache.manifest() {
                let mark = if cache.is_cached(asset) { "cached" } else { "-" };
                println!("  {:<7} {}", mark, asset);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("active").unwrap(), PatientStatus::Active);
        assert_eq!(parse_status("Inactive").unwrap(), PatientStatus::Inactive);
        assert!(parse_status("archived").is_err());
    }

    #[test]
    fn test_merge_edit_overrides_only_set_flags() {
        let form = PatientInput {
            full_name: "Ana Silva".into(),
            cpf: "11122233344".into(),
            email: Some("ana@example.com".into()),
            status: Some(PatientStatus::Active),
            ..Default::default()
        };

        let fields = EditArgs {
            name: Some("Ana Souza".into()),
            cpf: None,
            email: None,
            phone: Some("11987654321".into()),
            first_consultation: None,
            next_consultation: None,
            status: Some(PatientStatus::Inactive),
            observations: None,
        };

        let merged = merge_edit(form, fields);
        assert_eq!(merged.full_name, "Ana Souza");
        assert_eq!(merged.cpf, "11122233344");
        assert_eq!(merged.email.as_deref(), Some("ana@example.com"));
        assert_eq!(merged.phone.as_deref(), Some("11987654321"));
        assert_eq!(merged.status, Some(PatientStatus::Inactive));
    }
}

use clap::Subcommand;
use dreampiece_core::cgpa;
use dreampiece_core::{CgpaKind, Config, Database};

#[derive(Subcommand)]
pub enum CgpaAction {
    /// Show current and target CGPA
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Save a CGPA value (0 to 10)
    Set {
        /// current or target
        kind: CgpaKind,
        value: String,
    },
}

pub fn run(action: CgpaAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        CgpaAction::Show { json } => {
            let config = Config::load_or_default();
            let current = cgpa::load(&db, CgpaKind::Current, &config.cgpa)?;
            let target = cgpa::load(&db, CgpaKind::Target, &config.cgpa)?;
            if json {
                let out = serde_json::json!({
                    "current": current.display(),
                    "target": target.display(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("Current CGPA: {}", current.display());
                println!("Target CGPA:  {}", target.display());
            }
        }
        CgpaAction::Set { kind, value } => {
            let record = cgpa::save(&db, kind, &value)?;
            println!("{kind} CGPA: {}", record.display());
        }
    }
    Ok(())
}

use crate::config::toml_config::{RosterConfig, DEFAULT_CONFIG_FILE};
use crate::core::context::RosterContext;
use crate::domain::model::{Roster, Student};
use crate::utils::error::{Result, RosterError};
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Parser)]
#[command(name = "student-roster")]
#[command(about = "Keep a roster of students and their grades in an XML file")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Roster XML file (overrides storage.file)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Append log records to this file (overrides logging.file)
    #[arg(long, conflicts_with = "no_log_file")]
    pub log_file: Option<String>,

    /// Log to stderr instead of a log file
    #[arg(long)]
    pub no_log_file: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Add a student and save the roster
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        group: String,

        /// Comma-separated integer grades, e.g. 5,4,2
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        grades: Vec<i32>,
    },

    /// Print every student as a table
    List {
        #[arg(long)]
        json: bool,
    },

    /// Print the students holding a given grade
    Find {
        #[arg(long, default_value_t = crate::core::roster::FAILING_GRADE)]
        grade: i32,

        #[arg(long)]
        json: bool,
    },
}

impl CliConfig {
    /// The config file to read and whether the user asked for it explicitly.
    pub fn config_path(&self) -> (&str, bool) {
        match &self.config {
            Some(path) => (path.as_str(), true),
            None => (DEFAULT_CONFIG_FILE, false),
        }
    }

    /// Apply command-line overrides on top of file configuration.
    pub fn apply_overrides(&self, config: &mut RosterConfig) {
        if let Some(file) = &self.file {
            config.storage.file = file.clone();
        }
        if let Some(log_file) = &self.log_file {
            config.logging.file = Some(log_file.clone());
        }
        if self.no_log_file {
            config.logging.file = None;
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
    }
}

/// Read the configuration file, apply flag overrides and validate.
///
/// Every failure here is reported as a configuration error.
pub fn load_config(cli: &CliConfig) -> Result<RosterConfig> {
    let (path, explicit) = cli.config_path();
    let loaded = if explicit {
        RosterConfig::from_file(path)
    } else {
        RosterConfig::from_file_or_default(path)
    };
    let mut config = loaded.map_err(|e| match e {
        RosterError::Config { .. } => e,
        other => RosterError::config(format!("cannot read config file {}: {}", path, other)),
    })?;

    cli.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

/// Process exit code for a failed run: 1 for configuration, 2 for data or IO.
pub fn exit_code(err: &RosterError) -> i32 {
    match err {
        RosterError::Config { .. } => 1,
        _ => 2,
    }
}

pub fn run<W: Write>(ctx: &RosterContext, command: &Command, file: &str, out: &mut W) -> Result<()> {
    match command {
        Command::Add {
            name,
            group,
            grades,
        } => {
            let mut students = load_or_empty(ctx, file)?;
            ctx.add_student(&mut students, name.as_str(), group.as_str(), grades.clone());
            ctx.save(file, &students)?;
            writeln!(out, "✅ Added {} ({} students in {})", name, students.len(), file)?;
        }
        Command::List { json } => {
            let students = load_or_empty(ctx, file)?;
            print_students(ctx, out, &students, *json)?;
        }
        Command::Find { grade, json } => {
            let students = load_or_empty(ctx, file)?;
            let found = ctx.find_with_grade(&students, *grade);
            print_students(ctx, out, &found, *json)?;
        }
    }
    Ok(())
}

/// A roster file that does not exist yet is an empty roster.
pub fn load_or_empty(ctx: &RosterContext, file: &str) -> Result<Roster> {
    if !Path::new(file).exists() {
        tracing::debug!("roster file {} does not exist, starting empty", file);
        return Ok(Roster::new());
    }
    ctx.load_students(file)
}

fn print_students<W: Write>(
    ctx: &RosterContext,
    out: &mut W,
    students: &[Student],
    json: bool,
) -> Result<()> {
    if json {
        let dicts: Vec<_> = students.iter().map(Student::to_dict).collect();
        let text = serde_json::to_string_pretty(&dicts)
            .map_err(|e| RosterError::data_format(format!("cannot encode JSON: {}", e)))?;
        writeln!(out, "{}", text)?;
        Ok(())
    } else {
        ctx.write_students(out, students)
    }
}

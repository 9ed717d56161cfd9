use clap::Parser;
use comfy_table::{presets::UTF8_FULL, Cell, Table as ComfyTable};
use config::{Config, Environment, File};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde::Deserialize;
use std::path::Path;

use flatbase::executor::{ConsoleSink, Executor, StdinConfirm};
use flatbase::parser::{parse_command, Command};
use flatbase::storage::JsonStorage;
use flatbase::{QueryResult, TableData};

/// Flatbase interactive shell
#[derive(Parser, Debug)]
#[command(name = "flatbase")]
#[command(about = "Flat-file JSON record store", long_about = None)]
struct Args {
    /// Directory holding the catalog and table files
    #[arg(short, long)]
    data_dir: Option<String>,
}

/// Shell configuration
#[derive(Debug, Deserialize)]
struct ShellConfig {
    #[serde(default = "default_data_dir")]
    data_dir: String,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

impl ShellConfig {
    /// Load configuration with priority: CLI args > ENV > config file > defaults
    fn load(args: &Args) -> Self {
        let config_paths = ["/etc/flatbase/flatbase.toml", "./flatbase.toml"];

        let mut builder = Config::builder();
        for path in &config_paths {
            if Path::new(path).exists() {
                builder = builder.add_source(File::with_name(path));
                break;
            }
        }
        builder = builder.add_source(Environment::with_prefix("FLATBASE").separator("_"));

        let base = builder
            .build()
            .ok()
            .and_then(|c| c.try_deserialize::<ShellConfig>().ok())
            .unwrap_or_else(|| ShellConfig {
                data_dir: default_data_dir(),
            });

        Self {
            data_dir: args.data_dir.clone().unwrap_or(base.data_dir),
        }
    }
}

fn print_help() {
    println!("\nTable management:");
    println!("  create_table <table> <column:type> [..]   - create a table (types: int, str, bool)");
    println!("  list_tables                               - list all tables");
    println!("  drop_table <table>                        - drop a table");
    println!("\nRow operations:");
    println!("  insert <table> <value> [<value> ..]       - add a row (ID is assigned automatically)");
    println!("  select <table> [where field=value]        - list rows");
    println!("  update <table> set field=value[, ..] [where field=value]");
    println!("  delete <table> where field=value          - remove rows");
    println!("\nGeneral:");
    println!("  help                                      - this message");
    println!("  exit                                      - quit");
    println!();
}

fn render_rows(columns: &[String], rows: &TableData) -> String {
    if rows.is_empty() {
        return "(0 rows)".to_string();
    }

    let mut table = ComfyTable::new();
    table.load_preset(UTF8_FULL);
    table.set_header(columns.iter().map(Cell::new));
    for row in rows {
        table.add_row(columns.iter().map(|column| {
            Cell::new(row.get(column).map(ToString::to_string).unwrap_or_default())
        }));
    }

    format!("{table}\n({} rows)", rows.len())
}

fn render(result: &QueryResult) {
    match result {
        QueryResult::Success(message) => {
            if !message.is_empty() {
                println!("{message}");
            }
        }
        QueryResult::Rows { columns, rows } => println!("{}", render_rows(columns, rows)),
        QueryResult::Cancelled => println!("Operation cancelled"),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = ShellConfig::load(&args);

    let storage = JsonStorage::new(&config.data_dir)?;
    let mut executor = Executor::new(storage, Box::new(StdinConfirm), Box::new(ConsoleSink));

    println!("flatbase (data dir: {})", config.data_dir);
    println!("Type 'help' for the command list, 'exit' to quit.");

    let mut rl = DefaultEditor::new()?;
    let history_file = dirs::home_dir().map(|mut p| {
        p.push(".flatbase_history");
        p
    });
    if let Some(ref path) = history_file {
        let _ = rl.load_history(path); // Ignore error if file doesn't exist
    }

    loop {
        match rl.readline("flatbase> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                let command = match parse_command(line) {
                    Ok(command) => command,
                    Err(err) => {
                        eprintln!("Error: {err}");
                        continue;
                    }
                };

                match command {
                    Command::Help => print_help(),
                    Command::Exit => break,
                    other => match executor.execute(other) {
                        Ok(result) => render(&result),
                        Err(err) => eprintln!("Error: {err}"),
                    },
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                break;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {err:?}");
                return Err(err.into());
            }
        }
    }

    if let Some(ref path) = history_file {
        let _ = rl.save_history(path);
    }
    println!("Bye");
    Ok(())
}

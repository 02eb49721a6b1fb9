//! `profiledir` - CLI for the profile directory
//!
//! Each invocation loads the saved profiles, applies one user event and
//! writes back whatever changed.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::{bail, Context};
use clap::Parser;

use profiledir::cli::{
    AddCommand, ClearCommand, Cli, Command, ConfigCommand, DeleteCommand, ListCommand,
    OutputFormat, ShowCommand,
};
use profiledir::{
    init_logging, App, AssetProbe, AssumeYes, Config, Confirm, Field, Page, Profile,
    ProfileStore, Storage, SubmitOutcome, TerminalPrompt,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Show(cmd) => handle_show(&config, &cmd),
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Add(cmd) => handle_add(&config, cmd),
        Command::Delete(cmd) => handle_delete(&config, &cmd),
        Command::Clear(cmd) => handle_clear(&config, &cmd),
        Command::Status(cmd) => handle_status(&config, cmd.json),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_storage(config: &Config) -> anyhow::Result<Storage> {
    let path = config.database_path();
    Storage::open(&path, config.storage.quota_bytes)
        .with_context(|| format!("opening local storage at {}", path.display()))
}

fn open_app(config: &Config) -> anyhow::Result<App<Storage>> {
    let store = ProfileStore::with_key(open_storage(config)?, config.storage.key.clone());
    Ok(App::initialize(store))
}

fn prompt_for(yes: bool) -> Box<dyn Confirm> {
    if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalPrompt::stdio())
    }
}

fn handle_show(config: &Config, cmd: &ShowCommand) -> anyhow::Result<()> {
    let mut app = open_app(config)?;
    app.set_search(cmd.search.as_str());

    let mut page = Page::new();
    page.sync(&app);
    page.load_images(&AssetProbe::new(config.assets_root()));
    print!("{}", page.render(&app));
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let mut app = open_app(config)?;
    app.set_search(cmd.search.as_str());
    let profiles = app.filtered_profiles();

    match cmd.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&profiles)?);
        }
        OutputFormat::Plain => {
            for profile in &profiles {
                println!("{}", plain_line(profile));
            }
            println!("{}", profiledir::page::found_label(profiles.len()));
        }
        OutputFormat::Table => {
            print_table(&profiles);
            println!("{}", profiledir::page::found_label(profiles.len()));
        }
    }
    Ok(())
}

fn plain_line(profile: &Profile) -> String {
    let id = profile
        .id
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string);
    format!("{id}\t{}\t{}", profile.name, profile.image)
}

fn print_table(profiles: &[&Profile]) {
    let ids: Vec<String> = profiles
        .iter()
        .map(|p| p.id.as_ref().map_or_else(|| "-".to_string(), ToString::to_string))
        .collect();
    let id_width = ids.iter().map(String::len).max().unwrap_or(0).max(2);
    let name_width = profiles
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    println!("{:<id_width$}  {:<name_width$}  IMAGE", "ID", "NAME");
    for (id, profile) in ids.iter().zip(profiles) {
        println!(
            "{:<id_width$}  {:<name_width$}  {}",
            id, profile.name, profile.image
        );
    }
}

fn handle_add(config: &Config, cmd: AddCommand) -> anyhow::Result<()> {
    let mut app = open_app(config)?;
    app.change_field(Field::Name, cmd.name);
    app.change_field(Field::Image, cmd.image);
    app.change_field(Field::Bio, cmd.bio);

    match app.submit() {
        SubmitOutcome::Added(id) => {
            println!("Added profile #{id}");
            Ok(())
        }
        SubmitOutcome::Rejected(errors) => {
            for (field, message) in &errors {
                eprintln!("{field}: {message}");
            }
            bail!("profile was not added");
        }
    }
}

fn handle_delete(config: &Config, cmd: &DeleteCommand) -> anyhow::Result<()> {
    let mut app = open_app(config)?;
    if !app.profiles().iter().any(|p| p.id.as_ref() == Some(&cmd.id)) {
        println!("No profile with id {}", cmd.id);
        return Ok(());
    }

    let mut prompt = prompt_for(cmd.yes);
    if app.delete(&cmd.id, prompt.as_mut()) {
        println!("Deleted profile #{}", cmd.id);
    } else {
        println!("Kept profile #{}", cmd.id);
    }
    Ok(())
}

fn handle_clear(config: &Config, cmd: &ClearCommand) -> anyhow::Result<()> {
    let mut app = open_app(config)?;
    let mut prompt = prompt_for(cmd.yes);
    if app.clear_all(prompt.as_mut()) {
        println!("Cleared saved profiles");
    } else {
        println!("Nothing cleared");
    }
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let storage = open_storage(config)?;
    let stats = storage.stats()?;
    let store = ProfileStore::with_key(&storage, config.storage.key.clone());
    let profile_count = store.load().len();

    if json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "storage_key": config.storage.key,
            "profiles": profile_count,
            "keys": stats.total_keys,
            "value_bytes": stats.total_value_bytes,
            "quota_bytes": storage.quota(),
            "last_updated": stats.last_updated,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("profiledir status");
        println!("-----------------");
        println!("Database:      {}", config.database_path().display());
        println!("Storage key:   {}", config.storage.key);
        println!("Profiles:      {profile_count}");
        println!(
            "Stored bytes:  {} / {}",
            stats.total_value_bytes,
            storage.quota()
        );
        match stats.last_updated {
            Some(when) => println!("Last updated:  {}", when.to_rfc3339()),
            None => println!("Last updated:  never"),
        }
        println!("Database size: {} bytes", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:  {}", config.database_path().display());
                println!("  Key:            {}", config.storage.key);
                println!("  Quota (bytes):  {}", config.storage.quota_bytes);
                println!();
                println!("[Assets]");
                println!("  Root:           {}", config.assets_root().display());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

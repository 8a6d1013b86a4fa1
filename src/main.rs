use anyhow::{bail, Context, Result};
use clap::Parser;
use kestrel_library::cli::{Cli, Command};
use kestrel_library::{AssetCategory, AssetKind, AssetLibrary, CatalogEntry, EditorConfig, JsonCatalog};
use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err:?}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = EditorConfig::load_or_default(&cli.config);
    let overrides = cli.into_config_overrides();
    if !overrides.is_empty() {
        log::info!("[cli] overriding {}", overrides.applied_fields().join(", "));
        config.apply_overrides(&overrides);
    }
    let catalog = JsonCatalog::new(&config.library.catalog_path);
    match cli.command {
        Command::List => cmd_list(&catalog),
        Command::Show { name } => cmd_show(&catalog, &name),
        Command::Search { query, kind } => {
            cmd_search(&AssetLibrary::from_config(&config.library), &query, kind);
            Ok(())
        }
        Command::Add { name, path, kind, animations } => cmd_add(&catalog, name, path, kind, animations),
        Command::Remove { name } => {
            let mut library = AssetLibrary::from_config(&config.library);
            if !library.discard(&catalog, &name)? {
                bail!("'{name}' is not in the catalog {}", catalog.path().display());
            }
            println!("Removed '{name}'.");
            Ok(())
        }
    }
}

fn cmd_list(catalog: &JsonCatalog) -> Result<()> {
    let entries = catalog.entries().with_context(|| format!("reading {}", catalog.path().display()))?;
    if entries.is_empty() {
        println!("Catalog {} is empty.", catalog.path().display());
        return Ok(());
    }
    println!("Catalog {} ({} entries)", catalog.path().display(), entries.len());
    for entry in entries {
        println!("  {:<24} {:<8} {}", entry.name, entry.kind.category(), entry.path.display());
    }
    Ok(())
}

fn cmd_show(catalog: &JsonCatalog, name: &str) -> Result<()> {
    let entry = catalog
        .entries()?
        .into_iter()
        .find(|entry| entry.name == name)
        .with_context(|| format!("'{name}' is not in the catalog {}", catalog.path().display()))?;
    println!("Name: {}", entry.name);
    println!("Kind: {}", entry.kind.category());
    println!("Path: {}", entry.path.display());
    if let Some(animations) = entry.kind.animations() {
        if animations.is_empty() {
            println!("Animations: none");
        } else {
            println!("Animations: {}", animations.join(", "));
        }
    }
    Ok(())
}

fn cmd_search(library: &AssetLibrary, query: &str, kind: Option<AssetCategory>) {
    let hits = library.search(query, kind);
    if hits.is_empty() {
        println!("No matching assets under {}.", library.asset_root().display());
        return;
    }
    for hit in hits {
        println!("  {:<24} {:<8} {}", hit.name, hit.category, hit.path.display());
    }
}

fn cmd_add(
    catalog: &JsonCatalog,
    name: String,
    path: std::path::PathBuf,
    kind: Option<AssetCategory>,
    animations: Vec<String>,
) -> Result<()> {
    let category = match kind {
        Some(category) => category,
        None if !animations.is_empty() => AssetCategory::Actor,
        None if AssetCategory::Texture.matches_path(&path) => AssetCategory::Texture,
        None => AssetCategory::Model,
    };
    if !category.matches_path(&path) {
        bail!("{} is not a {} file", path.display(), category.label().to_lowercase());
    }
    let kind = match category {
        AssetCategory::Model => AssetKind::Model,
        AssetCategory::Texture => AssetKind::Texture,
        AssetCategory::Actor => AssetKind::Actor { animations },
    };
    let entry = CatalogEntry::new(name, path, kind);
    let replaced = catalog.insert(&entry)?;
    println!("{} '{}' ({}).", if replaced { "Updated" } else { "Added" }, entry.name, entry.kind.category());
    Ok(())
}

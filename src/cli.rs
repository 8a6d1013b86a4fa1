use crate::catalog::AssetCategory;
use crate::config::EditorConfigOverrides;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "kestrel_library", version, about = "Inspect and edit the asset library catalog")]
pub struct Cli {
    /// Editor config file.
    #[arg(long, global = true, default_value = "config/editor.json")]
    pub config: PathBuf,

    /// Catalog file, overriding the config.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Asset root, overriding the config.
    #[arg(long = "asset-root", global = true)]
    pub asset_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List catalog entries.
    List,
    /// Print a single entry.
    Show { name: String },
    /// Search the asset root for files that can be added.
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(long)]
        kind: Option<AssetCategory>,
    },
    /// Add or replace an entry.
    Add {
        name: String,
        path: PathBuf,
        /// Defaults to actor when animations are given, otherwise inferred from the extension.
        #[arg(long)]
        kind: Option<AssetCategory>,
        #[arg(long = "anim")]
        animations: Vec<String>,
    },
    /// Remove an entry.
    Remove { name: String },
}

impl Cli {
    pub fn into_config_overrides(&self) -> EditorConfigOverrides {
        EditorConfigOverrides { asset_root: self.asset_root.clone(), catalog_path: self.catalog.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_overrides_after_subcommand() {
        let cli = Cli::try_parse_from(["kestrel_library", "list", "--catalog", "lib.json", "--asset-root", "/srv"])
            .expect("parse");
        assert_eq!(cli.command, Command::List);
        let overrides = cli.into_config_overrides();
        assert_eq!(overrides.catalog_path, Some(PathBuf::from("lib.json")));
        assert_eq!(overrides.asset_root, Some(PathBuf::from("/srv")));
        assert_eq!(cli.config, PathBuf::from("config/editor.json"));
    }

    #[test]
    fn add_collects_repeated_animations() {
        let cli = Cli::try_parse_from([
            "kestrel_library",
            "add",
            "Robot",
            "actors/robot.bam",
            "--anim",
            "walk",
            "--anim",
            "idle",
        ])
        .expect("parse");
        match cli.command {
            Command::Add { name, path, kind, animations } => {
                assert_eq!(name, "Robot");
                assert_eq!(path, PathBuf::from("actors/robot.bam"));
                assert_eq!(kind, None);
                assert_eq!(animations, vec!["walk".to_string(), "idle".to_string()]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn search_query_defaults_to_empty() {
        let cli = Cli::try_parse_from(["kestrel_library", "search", "--kind", "texture"]).expect("parse");
        assert_eq!(cli.command, Command::Search { query: String::new(), kind: Some(AssetCategory::Texture) });
        assert!(cli.into_config_overrides().is_empty());
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = Cli::try_parse_from(["kestrel_library", "search", "--kind", "sound"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["kestrel_library"]).is_err());
    }
}

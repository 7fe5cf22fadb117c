use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use collator_core::{CollationConfig, Correspondence, DiffAlgorithm, OutputMode};

/// Collate TEI transcriptions of the same text
///
/// Every witness document in DIR is compared paragraph by paragraph against
/// the base witness. Additions and omissions are written to output.txt
/// (text), output.html (hypertext) and/or output.json.
///
/// All witnesses must contain the same number of units; otherwise the run
/// stops before any report is written.
#[derive(Debug, Parser)]
#[command(name = "collator")]
#[command(version, about)]
pub struct Cli {
    /// Directory holding the witness documents
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// TOML configuration file; flags override its values
    #[arg(short, long, env = "COLLATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base witness (file stem); defaults to the first document in sorted order
    #[arg(short, long)]
    pub base: Option<String>,

    /// Only elements whose xml:id starts with this prefix are units
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Extension of the witness documents
    #[arg(long = "ext", value_name = "EXT")]
    pub extension: Option<String>,

    /// Report to produce (repeatable)
    #[arg(short, long = "mode", value_enum, value_name = "MODE")]
    pub modes: Vec<ModeArg>,

    /// Where reports are written
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Worker threads per witness pair
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    /// Keep `. , : ;` instead of turning them into spaces
    #[arg(long)]
    pub keep_punctuation: bool,

    /// Match units by identifier instead of by position
    #[arg(long)]
    pub by_id: bool,

    /// Diff algorithm
    #[arg(long, value_enum)]
    pub algorithm: Option<AlgorithmArg>,

    /// Skip the semantic cleanup pass
    #[arg(long)]
    pub raw: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Text,
    #[value(alias = "hypertext")]
    Html,
    Json,
}

impl From<ModeArg> for OutputMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Text => Self::Text,
            ModeArg::Html => Self::Hypertext,
            ModeArg::Json => Self::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    Myers,
    Lcs,
}

impl From<AlgorithmArg> for DiffAlgorithm {
    fn from(algorithm: AlgorithmArg) -> Self {
        match algorithm {
            AlgorithmArg::Myers => Self::Myers,
            AlgorithmArg::Lcs => Self::Lcs,
        }
    }
}

impl Cli {
    /// The configuration file (if any) with command line overrides applied
    pub fn config(&self) -> Result<CollationConfig> {
        let mut config = match &self.config {
            Some(path) => CollationConfig::from_file(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
            None => CollationConfig::default(),
        };

        if let Some(base) = &self.base {
            config = config.with_base_witness(base.clone());
        }
        if let Some(prefix) = &self.prefix {
            config = config.with_required_id_prefix(prefix.clone());
        }
        if let Some(extension) = &self.extension {
            config = config.with_file_extension(extension.clone());
        }
        if !self.modes.is_empty() {
            config = config.with_output_modes(self.modes.iter().map(|&m| OutputMode::from(m)));
        }
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if self.keep_punctuation {
            config = config.with_strip_punctuation(false);
        }
        if self.by_id {
            config = config.with_correspondence(Correspondence::Identifier);
        }
        if let Some(algorithm) = self.algorithm {
            config = config.with_algorithm(algorithm.into());
        }
        if self.raw {
            config = config.with_semantic_cleanup(false);
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "collator", "data", "--base", "sorb", "-m", "json", "-m", "hypertext", "--by-id", "-j", "3",
        ]);
        let config = cli.config().unwrap();

        assert_eq!(cli.dir, PathBuf::from("data"));
        assert_eq!(config.base_witness.as_deref(), Some("sorb"));
        assert_eq!(config.output_modes, vec![OutputMode::Json, OutputMode::Hypertext]);
        assert_eq!(config.correspondence, Correspondence::Identifier);
        assert_eq!(config.workers, Some(3));
        assert!(config.strip_punctuation);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let cli = Cli::parse_from(["collator", "-j", "0"]);
        assert!(cli.config().is_err());
    }
}

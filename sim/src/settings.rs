use std::fs;
use std::path::Path;

use anyhow::Context;
use blastgrid_core::{CellCount, Coord, GameConfig, Level};
use serde::Deserialize;

/// Grid settings read from a TOML file, every key optional:
///
/// ```toml
/// level = "medium"
/// rows = 10
/// cols = 12
/// mines = 20
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub level: Option<String>,
    pub rows: Option<Coord>,
    pub cols: Option<Coord>,
    pub mines: Option<CellCount>,
}

impl FileSettings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

/// Overrides applied on top of a preset, in increasing priority: file, then command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub rows: Option<Coord>,
    pub cols: Option<Coord>,
    pub mines: Option<CellCount>,
}

pub fn parse_level(name: &str) -> anyhow::Result<Level> {
    name.parse::<Level>()
        .with_context(|| format!("Invalid level {name:?}"))
}

pub fn resolve(
    level: Option<Level>,
    file: Option<FileSettings>,
    cli: Overrides,
) -> anyhow::Result<GameConfig> {
    let file = file.unwrap_or_default();
    let file_level = file.level.as_deref().map(parse_level).transpose()?;
    let base = level.or(file_level).unwrap_or_default().config();

    let rows = cli.rows.or(file.rows).unwrap_or(base.rows());
    let cols = cli.cols.or(file.cols).unwrap_or(base.cols());
    let mines = cli.mines.or(file.mines).unwrap_or(base.mines);

    GameConfig::new((rows, cols), mines)
        .with_context(|| format!("Invalid grid {rows}x{cols} with {mines} mines"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_easy() {
        let config = resolve(None, None, Overrides::default()).unwrap();
        assert_eq!(config, Level::Easy.config());
    }

    #[test]
    fn command_line_beats_file_beats_level() {
        let file = FileSettings::parse("level = \"hard\"\nmines = 50\ncols = 20\n").unwrap();
        let cli = Overrides {
            mines: Some(60),
            ..Default::default()
        };

        let config = resolve(None, Some(file), cli).unwrap();

        assert_eq!(config.size, (24, 20));
        assert_eq!(config.mines, 60);
    }

    #[test]
    fn rejects_unknown_keys_and_levels() {
        assert!(FileSettings::parse("colour = \"red\"").is_err());
        assert!(parse_level("nightmare").is_err());
        assert_eq!(parse_level("HARD").unwrap(), Level::Hard);
    }

    #[test]
    fn rejects_grid_without_safe_cell() {
        let cli = Overrides {
            rows: Some(2),
            cols: Some(2),
            mines: Some(4),
        };
        assert!(resolve(Some(Level::Easy), None, cli).is_err());
    }
}

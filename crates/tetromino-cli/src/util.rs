use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use tetromino_engine::GameConfig;

/// Where a report is written: locked stdout, or a buffered file.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File(BufWriter<File>, PathBuf),
}

impl Output {
    /// Writes `value` as pretty JSON to `path`, or to stdout when `path` is `None`.
    pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match path {
            Some(path) => Self::create(path)?,
            None => Self::Stdout(io::stdout().lock()),
        };
        output
            .write_json(value)
            .with_context(|| format!("Failed to write JSON to {}", output.name()))
    }

    fn create(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self::File(BufWriter::new(file), path.to_owned()))
    }

    fn name(&self) -> String {
        match self {
            Self::Stdout(_) => "stdout".to_owned(),
            Self::File(_, path) => path.display().to_string(),
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(writer) => writer,
            Self::File(writer, _) => writer,
        }
    }

    fn write_json<T>(&mut self, value: &T) -> io::Result<()>
    where
        T: serde::Serialize,
    {
        let writer = self.writer();
        serde_json::to_writer_pretty(&mut *writer, value)?;
        writeln!(writer)?;
        writer.flush()
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Reads a game configuration and checks that a game can be built from it.
///
/// Fields missing from the file take their default values.
pub fn read_config_file<P>(path: P) -> anyhow::Result<GameConfig>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let config: GameConfig = read_json_file("config", path)?;
    config
        .validate()
        .with_context(|| format!("Invalid game config: {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("tetromino-{}-{name}", process::id()))
    }

    #[test]
    fn test_read_partial_config() {
        let path = temp_path("partial.json");
        fs::write(&path, r#"{ "board_width": 8, "lines_per_level": 5 }"#).unwrap();
        let config = read_config_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.board_width, 8);
        assert_eq!(config.lines_per_level, 5);
        assert_eq!(config.board_height, GameConfig::default().board_height);
    }

    #[test]
    fn test_read_invalid_config() {
        let path = temp_path("invalid.json");
        fs::write(&path, r#"{ "board_height": 3 }"#).unwrap();
        let err = read_config_file(&path).unwrap_err();
        fs::remove_file(&path).unwrap();

        let message = format!("{err:#}");
        assert!(message.contains("Invalid game config"), "{message}");
        assert!(message.contains("board height"), "{message}");
    }

    #[test]
    fn test_read_missing_config() {
        let err = read_config_file(temp_path("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to open config file"));
    }

    #[test]
    fn test_write_json_to_file() {
        let path = temp_path("output.json");
        Output::save_json(&GameConfig::default(), Some(&path)).unwrap();
        let loaded: GameConfig = read_json_file("config", &path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(loaded, GameConfig::default());
    }
}

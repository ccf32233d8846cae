use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::prompt::Prompt;
use crate::Result;

/// Flat `KEY=VALUE` file. Writes only ever append.
#[derive(Debug)]
pub struct CredentialStore {
    path: PathBuf,
    entries: Vec<(String, String)>,
}

impl CredentialStore {
    /// Reads the store. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            entries: parse_entries(&content),
        })
    }

    /// Last non-blank value stored under `key`.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }

    pub fn append(&mut self, key: &str, value: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        write!(file, "\n{key}={value}")?;
        self.entries.push((key.to_string(), value.to_string()));
        Ok(())
    }
}

fn parse_entries(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (key, value) = line.split_once('=')?;
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            Some((key.trim().to_string(), value.to_string()))
        })
        .collect()
}

/// Picks the session token for this run.
///
/// Offers the saved token first. Otherwise asks for one and offers to append it
/// to the store. A blank answer is passed through as is.
pub fn resolve_session(config: &Config, prompt: &mut dyn Prompt) -> Result<String> {
    if let Some(saved) = &config.saved_session {
        if prompt.confirm("Use saved session ID? (y/n): ")? {
            return Ok(saved.clone());
        }
    }

    let token = prompt.ask("Please enter your PHPSESSID: ")?;
    if prompt.confirm("Save this session ID for future use? (y/n): ")? {
        CredentialStore::open(&config.store_path)?.append(&config.session_key, &token)?;
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompt;

    fn config_in(dir: &Path) -> Config {
        Config {
            store_path: dir.join(".env"),
            ..Config::default()
        }
    }

    #[test]
    fn parses_quotes_comments_and_duplicates() {
        let entries = parse_entries("# c\nA=1\n\nexport B=\"two\"\nA='3'\nnoequals\n");
        assert_eq!(
            entries,
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "two".to_string()),
                ("A".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn lookup_prefers_last_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "PARK4NIGHT_SESSION=old\nPARK4NIGHT_SESSION=new").unwrap();
        let store = CredentialStore::open(&path).unwrap();
        assert_eq!(store.lookup("PARK4NIGHT_SESSION"), Some("new"));
        assert_eq!(store.lookup("MISSING"), None);
    }

    #[test]
    fn reuses_saved_session() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            saved_session: Some("saved".into()),
            ..config_in(dir.path())
        };
        let mut prompt = ScriptedPrompt::new(["y"]);

        let token = resolve_session(&config, &mut prompt).unwrap();
        assert_eq!(token, "saved");
        assert_eq!(prompt.remaining(), 0);
        assert!(!config.store_path.exists());
    }

    #[test]
    fn declined_session_is_entered_and_appended() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            saved_session: Some("saved".into()),
            ..config_in(dir.path())
        };
        std::fs::write(&config.store_path, "OTHER=1").unwrap();
        let mut prompt = ScriptedPrompt::new(["n", "fresh", "y"]);

        let token = resolve_session(&config, &mut prompt).unwrap();
        assert_eq!(token, "fresh");
        let stored = std::fs::read_to_string(&config.store_path).unwrap();
        assert_eq!(stored, "OTHER=1\nPARK4NIGHT_SESSION=fresh");
    }

    #[test]
    fn entered_session_not_saved_on_decline() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let mut prompt = ScriptedPrompt::new(["", "n"]);

        let token = resolve_session(&config, &mut prompt).unwrap();
        assert_eq!(token, "");
        assert_eq!(prompt.questions.len(), 2);
        assert!(!config.store_path.exists());
    }
}

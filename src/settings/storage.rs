//! Durable key/value backends the settings are persisted to.

use std::{
	collections::BTreeMap,
	fs,
	path::{Path, PathBuf},
};

use anyhow::{Context as _, bail};
use bevy::prelude::*;
use tracing::warn;
use serde_json::Value;

/// Environment variable overriding where native builds keep their settings.
pub(crate) const SETTINGS_PATH_VAR: &str = "LUMINARY_SOCCER_SETTINGS";
const DEFAULT_SETTINGS_FILE: &str = "settings.json";

/// A flat string-to-string store. Values are stored as plain strings and
/// parsed by the caller.
pub(crate) trait KeyValueStore: Send + Sync + 'static {
	fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
	fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()>;
}

/// Keeps everything in memory. Used on the web and in tests.
#[derive(Debug, Default, Clone)]
pub(crate) struct MemoryStore {
	values: BTreeMap<String, String>,
}

impl MemoryStore {
	pub(crate) fn with_values<'a>(values: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
		Self {
			values: values
				.into_iter()
				.map(|(key, value)| (key.to_owned(), value.to_owned()))
				.collect(),
		}
	}
}

impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
		Ok(self.values.get(key).cloned())
	}

	fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
		self.values.insert(key.to_owned(), value.to_owned());
		Ok(())
	}
}

/// A JSON object on disk, rewritten on every `set`.
#[derive(Debug)]
pub(crate) struct JsonFileStore {
	path: PathBuf,
	values: BTreeMap<String, Value>,
}

impl JsonFileStore {
	/// Opens the store at `path`. A missing file is an empty store, so is an
	/// unreadable one (with a warning); the next `set` overwrites it.
	pub(crate) fn open(path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		let values = read_values(&path).unwrap_or_else(|err| {
			warn!("Ignoring settings file {}: {err:#}", path.display());
			BTreeMap::new()
		});
		Self { path, values }
	}

	fn write(&self) -> anyhow::Result<()> {
		if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent)
				.with_context(|| format!("failed to create {}", parent.display()))?;
		}
		let json = serde_json::to_string_pretty(&self.values)?;
		fs::write(&self.path, json)
			.with_context(|| format!("failed to write {}", self.path.display()))
	}
}

impl KeyValueStore for JsonFileStore {
	fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
		match self.values.get(key) {
			None => Ok(None),
			Some(Value::String(value)) => Ok(Some(value.clone())),
			Some(other) => bail!("`{key}` holds {other}, expected a string"),
		}
	}

	fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
		self.values
			.insert(key.to_owned(), Value::String(value.to_owned()));
		self.write()
	}
}

fn read_values(path: &Path) -> anyhow::Result<BTreeMap<String, Value>> {
	if !path.exists() {
		return Ok(BTreeMap::new());
	}
	let text = fs::read_to_string(path)
		.with_context(|| format!("failed to read {}", path.display()))?;
	serde_json::from_str(&text).context("settings file is not a JSON object")
}

/// Where native builds keep their settings file.
pub(crate) fn settings_path() -> PathBuf {
	std::env::var_os(SETTINGS_PATH_VAR)
		.map(PathBuf::from)
		.unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
}

/// The backend the game uses when nothing else was configured.
pub(crate) fn platform_store() -> Box<dyn KeyValueStore> {
	if cfg!(any(test, target_family = "wasm")) {
		Box::new(MemoryStore::default())
	} else {
		Box::new(JsonFileStore::open(settings_path()))
	}
}

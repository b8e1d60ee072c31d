//! File-backed translations.
//!
//! Values live in `{root}/{language}/{namespace}.json`. Nested objects are
//! addressed with dot-separated keys (`"offers.form.title"`). Writes replace
//! the whole file, so concurrent writers to one namespace race and the last
//! one wins. Key metadata is kept in the `translation_keys` table.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use db::models::translation_key;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter};
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::fs;
use tracing::info;

use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStatus {
    pub language: String,
    pub total_keys: usize,
    pub translated_keys: usize,
    pub completion: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingKey {
    pub namespace: String,
    pub key: String,
}

fn valid_segment(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn check_segment(value: &str, what: &str) -> ServiceResult<()> {
    if valid_segment(value) {
        Ok(())
    } else {
        Err(ServiceError::validation(format!("Invalid {what}: {value:?}")))
    }
}

fn key_path(key: &str) -> ServiceResult<Vec<&str>> {
    let parts: Vec<&str> = key.split('.').collect();
    if key.is_empty() || parts.iter().any(|p| p.is_empty()) {
        return Err(ServiceError::validation(format!("Invalid translation key: {key:?}")));
    }
    Ok(parts)
}

/// Flattens nested objects into dot-separated keys. Arrays are leaves.
pub fn flatten(value: &Value) -> BTreeMap<String, Value> {
    fn walk(prefix: &str, value: &Value, out: &mut BTreeMap<String, Value>) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{prefix}.{key}")
                    };
                    walk(&path, child, out);
                }
            }
            leaf => {
                out.insert(prefix.to_string(), leaf.clone());
            }
        }
    }

    let mut out = BTreeMap::new();
    if value.is_object() {
        walk("", value, &mut out);
    }
    out
}

fn lookup<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(root, |node, segment| node.get(*segment))
}

/// Writes `value` at `path`, replacing anything in the way.
fn insert_path(root: &mut Map<String, Value>, path: &[&str], value: Value) {
    let (last, parents) = match path.split_last() {
        Some(split) => split,
        None => return,
    };
    let mut node = root;
    for segment in parents {
        let child = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !child.is_object() {
            *child = Value::Object(Map::new());
        }
        node = match child {
            Value::Object(map) => map,
            _ => return,
        };
    }
    node.insert(last.to_string(), value);
}

/// Removes the value at `path` and any parent objects left empty.
fn remove_path(node: &mut Map<String, Value>, path: &[&str]) -> bool {
    match path {
        [] => false,
        [last] => node.remove(*last).is_some(),
        [head, rest @ ..] => {
            let Some(Value::Object(child)) = node.get_mut(*head) else {
                return false;
            };
            let removed = remove_path(child, rest);
            if removed && child.is_empty() {
                node.remove(*head);
            }
            removed
        }
    }
}

/// Merges `source` into `target`, returning the number of leaves written.
/// Existing leaves are only replaced when `overwrite` is set.
fn deep_merge(target: &mut Map<String, Value>, source: Map<String, Value>, overwrite: bool) -> usize {
    let mut written = 0;
    for (key, incoming) in source {
        match target.get_mut(&key) {
            Some(Value::Object(existing)) if incoming.is_object() => {
                if let Value::Object(nested) = incoming {
                    written += deep_merge(existing, nested, overwrite);
                }
            }
            Some(_) if !overwrite => {}
            _ => {
                written += flatten(&incoming).len().max(1);
                target.insert(key, incoming);
            }
        }
    }
    written
}

/// Reads and writes the per-language JSON files under one root directory.
#[derive(Debug, Clone)]
pub struct TranslationStore {
    root: PathBuf,
}

impl TranslationStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn language_dir(&self, language: &str) -> ServiceResult<PathBuf> {
        check_segment(language, "language code")?;
        Ok(self.root.join(language))
    }

    fn namespace_file(&self, language: &str, namespace: &str) -> ServiceResult<PathBuf> {
        check_segment(namespace, "namespace")?;
        Ok(self.language_dir(language)?.join(format!("{namespace}.json")))
    }

    /// Entries of `dir` as (name, is_dir) pairs; a missing directory is empty.
    async fn entries(dir: &Path) -> ServiceResult<Vec<(String, bool)>> {
        let mut reader = match fs::read_dir(dir).await {
            Ok(reader) => reader,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut entries = Vec::new();
        while let Some(entry) = reader.next_entry().await? {
            let is_dir = entry.file_type().await?.is_dir();
            entries.push((entry.file_name().to_string_lossy().into_owned(), is_dir));
        }
        entries.sort();
        Ok(entries)
    }

    pub async fn languages(&self) -> ServiceResult<Vec<String>> {
        Ok(Self::entries(&self.root)
            .await?
            .into_iter()
            .filter(|(name, is_dir)| *is_dir && valid_segment(name))
            .map(|(name, _)| name)
            .collect())
    }

    pub async fn namespaces(&self, language: &str) -> ServiceResult<Vec<String>> {
        let dir = self.language_dir(language)?;
        Ok(Self::entries(&dir)
            .await?
            .into_iter()
            .filter(|(_, is_dir)| !is_dir)
            .filter_map(|(name, _)| name.strip_suffix(".json").map(str::to_string))
            .filter(|name| valid_segment(name))
            .collect())
    }

    /// The namespace document, or `None` if the file does not exist.
    async fn read(&self, language: &str, namespace: &str) -> ServiceResult<Option<Map<String, Value>>> {
        let path = self.namespace_file(language, namespace)?;
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Some(Map::new()));
        }
        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(map) => Ok(Some(map)),
            _ => Err(ServiceError::validation(format!(
                "{language}/{namespace}.json does not hold a JSON object"
            ))),
        }
    }

    async fn write(&self, language: &str, namespace: &str, document: &Map<String, Value>) -> ServiceResult<()> {
        let path = self.namespace_file(language, namespace)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_string_pretty(document)?;
        fs::write(&path, body).await?;
        Ok(())
    }

    pub async fn namespace(&self, language: &str, namespace: &str) -> ServiceResult<Value> {
        self.read(language, namespace)
            .await?
            .map(Value::Object)
            .ok_or_else(|| ServiceError::not_found("Namespace not found"))
    }

    pub async fn get(&self, language: &str, namespace: &str, key: &str) -> ServiceResult<Value> {
        let path = key_path(key)?;
        let document = self.namespace(language, namespace).await?;
        lookup(&document, &path)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Translation key not found"))
    }

    /// Sets one key, creating the language directory, namespace file and any
    /// parent objects as needed.
    pub async fn set(&self, language: &str, namespace: &str, key: &str, value: Value) -> ServiceResult<()> {
        let path = key_path(key)?;
        let mut document = self.read(language, namespace).await?.unwrap_or_default();
        insert_path(&mut document, &path, value);
        self.write(language, namespace, &document).await
    }

    pub async fn delete(&self, language: &str, namespace: &str, key: &str) -> ServiceResult<()> {
        let path = key_path(key)?;
        let mut document = self
            .read(language, namespace)
            .await?
            .ok_or_else(|| ServiceError::not_found("Namespace not found"))?;
        if !remove_path(&mut document, &path) {
            return Err(ServiceError::not_found("Translation key not found"));
        }
        self.write(language, namespace, &document).await
    }

    /// Deep-merges `data` into a namespace and returns the number of leaf
    /// values written.
    pub async fn import(&self, language: &str, namespace: &str, data: Value, overwrite: bool) -> ServiceResult<usize> {
        let Value::Object(data) = data else {
            return Err(ServiceError::validation("Import data must be a JSON object"));
        };
        let mut document = self.read(language, namespace).await?.unwrap_or_default();
        let written = deep_merge(&mut document, data, overwrite);
        self.write(language, namespace, &document).await?;
        Ok(written)
    }

    /// Every namespace of a language, keyed by namespace name.
    pub async fn export(&self, language: &str) -> ServiceResult<Map<String, Value>> {
        let namespaces = self.namespaces(language).await?;
        if namespaces.is_empty() && !self.languages().await?.iter().any(|l| l == language) {
            return Err(ServiceError::not_found("Language not found"));
        }
        let mut out = Map::new();
        for namespace in namespaces {
            if let Some(document) = self.read(language, &namespace).await? {
                out.insert(namespace, Value::Object(document));
            }
        }
        Ok(out)
    }

    /// Flattened keys of every namespace of a language, as (namespace, key).
    async fn keys(&self, language: &str) -> ServiceResult<BTreeMap<(String, String), Value>> {
        let mut keys = BTreeMap::new();
        for (namespace, document) in self.export_or_empty(language).await? {
            for (key, value) in flatten(&document) {
                keys.insert((namespace.clone(), key), value);
            }
        }
        Ok(keys)
    }

    async fn export_or_empty(&self, language: &str) -> ServiceResult<Map<String, Value>> {
        match self.export(language).await {
            Err(ServiceError::NotFound(_)) => Ok(Map::new()),
            other => other,
        }
    }

    /// Per-language key counts and completion against `reference`.
    pub async fn status(&self, reference: &str) -> ServiceResult<Vec<LanguageStatus>> {
        let reference_keys = self.keys(reference).await?;
        let mut report = Vec::new();
        for language in self.languages().await? {
            let keys = self.keys(&language).await?;
            let translated = reference_keys.keys().filter(|k| keys.contains_key(*k)).count();
            let completion = if reference_keys.is_empty() {
                100.0
            } else {
                (translated as f64 * 10_000.0 / reference_keys.len() as f64).round() / 100.0
            };
            report.push(LanguageStatus {
                language,
                total_keys: keys.len(),
                translated_keys: translated,
                completion,
            });
        }
        Ok(report)
    }

    /// Keys present in `reference` but absent from `language`.
    pub async fn missing(&self, language: &str, reference: &str) -> ServiceResult<Vec<MissingKey>> {
        check_segment(language, "language code")?;
        let reference_keys = self.keys(reference).await?;
        let keys = self.keys(language).await?;
        Ok(reference_keys
            .into_keys()
            .filter(|k| !keys.contains_key(k))
            .map(|(namespace, key)| MissingKey { namespace, key })
            .collect())
    }
}

/// Translation store plus the `translation_keys` metadata table.
pub struct TranslationService {
    store: TranslationStore,
    db: DatabaseConnection,
}

impl TranslationService {
    pub fn new(store: TranslationStore, db: DatabaseConnection) -> Self {
        Self { store, db }
    }

    pub fn store(&self) -> &TranslationStore {
        &self.store
    }

    pub async fn set(
        &self,
        language: &str,
        namespace: &str,
        key: &str,
        value: Value,
        description: Option<String>,
    ) -> ServiceResult<translation_key::Model> {
        self.store.set(language, namespace, key, value).await?;
        let meta = self.upsert_key(namespace, key, description).await?;
        info!(language, namespace, key, "Translation set");
        Ok(meta)
    }

    pub async fn delete(&self, language: &str, namespace: &str, key: &str) -> ServiceResult<()> {
        self.store.delete(language, namespace, key).await?;
        if let Some(meta) = self.find_key(namespace, key).await? {
            meta.delete(&self.db).await?;
        }
        info!(language, namespace, key, "Translation deleted");
        Ok(())
    }

    pub async fn import(&self, language: &str, namespace: &str, data: Value, overwrite: bool) -> ServiceResult<usize> {
        let keys: Vec<String> = flatten(&data).into_keys().collect();
        let written = self.store.import(language, namespace, data, overwrite).await?;
        for key in keys {
            self.upsert_key(namespace, &key, None).await?;
        }
        info!(language, namespace, written, overwrite, "Translations imported");
        Ok(written)
    }

    async fn find_key(&self, namespace: &str, key: &str) -> ServiceResult<Option<translation_key::Model>> {
        Ok(translation_key::Entity::find()
            .filter(translation_key::Column::Namespace.eq(namespace))
            .filter(translation_key::Column::Key.eq(key))
            .one(&self.db)
            .await?)
    }

    async fn upsert_key(
        &self,
        namespace: &str,
        key: &str,
        description: Option<String>,
    ) -> ServiceResult<translation_key::Model> {
        let now = Utc::now();
        let meta = match self.find_key(namespace, key).await? {
            Some(existing) => {
                let keep = existing.description.clone();
                let mut active: translation_key::ActiveModel = existing.into();
                active.description = Set(description.or(keep));
                active.updated_at = Set(now);
                active.update(&self.db).await?
            }
            None => {
                translation_key::ActiveModel {
                    namespace: Set(namespace.to_string()),
                    key: Set(key.to_string()),
                    description: Set(description),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await?
            }
        };
        Ok(meta)
    }
}

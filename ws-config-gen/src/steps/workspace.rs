use crate::config::Settings;
use crate::resources::WORKSPACE_TEMPLATE;
use crate::WsError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use ws_core::{ReposConfig, Template, TemplateData, WorkspaceFolderEntry};

/// One folder per repository, in list order.
pub fn folder_entries(settings: &Settings, config: &ReposConfig) -> Vec<WorkspaceFolderEntry> {
    config
        .repos
        .iter()
        .map(|repo| WorkspaceFolderEntry::for_repository(&settings.folder_prefix, repo))
        .collect()
}

/// Tab-indented JSON array. Lines after the first carry one extra tab so
/// the block lines up under the `"folders":` key of the template.
pub fn folders_json(entries: &[WorkspaceFolderEntry]) -> Result<String, WsError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    entries.serialize(&mut ser).map_err(|source| WsError::Json {
        context: "marshal folders JSON",
        source,
    })?;

    let json = String::from_utf8_lossy(&buf);
    Ok(json.replace('\n', "\n\t"))
}

/// Render the workspace file, replacing any previous one.
pub fn generate_workspace(
    settings: &Settings,
    base_dir: &Path,
    config: &ReposConfig,
) -> Result<PathBuf, WsError> {
    let folders = folders_json(&folder_entries(settings, config))?;

    let mut data = TemplateData::new();
    data.insert("Folders".to_string(), folders);
    data.insert("BaseWorkDir".to_string(), json_string_body(base_dir)?);

    let path = base_dir.join(&settings.workspace_file);
    write_rendered(&path, WORKSPACE_TEMPLATE, &data)?;

    tracing::info!("Wrote {}", path.display());
    Ok(path)
}

/// Render `source` in memory, then write it to `path`. A template error
/// leaves any previous file untouched.
fn write_rendered(path: &Path, source: &str, data: &TemplateData) -> Result<(), WsError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let content = Template::parse(&name, source)?.render_to_string(data)?;
    fs::write(path, content).map_err(|e| WsError::io("failed to create workspace file", path, e))
}

/// The path as it appears between the quotes of a JSON string.
fn json_string_body(path: &Path) -> Result<String, WsError> {
    let quoted = serde_json::to_string(&path.to_string_lossy()).map_err(|source| WsError::Json {
        context: "encode base directory",
        source,
    })?;
    Ok(quoted[1..quoted.len() - 1].to_string())
}

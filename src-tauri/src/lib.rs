mod graph;
mod settings;
mod vault;

use std::path::Path;

use tauri::Manager;

#[tauri::command]
fn init_vault(app_handle: tauri::AppHandle) -> Result<String, String> {
    let docs = app_handle
        .path()
        .document_dir()
        .map_err(|e| e.to_string())?;
    let vault_path = docs.join("BedrockVault");
    vault::init_vault_dir(&vault_path).map_err(|e| e.to_string())?;
    log::info!("vault ready at {}", vault_path.display());
    Ok(vault_path.to_string_lossy().into_owned())
}

#[tauri::command]
fn read_dir(path: &str) -> Result<Vec<String>, String> {
    vault::collect_note_paths(Path::new(path)).map_err(|e| e.to_string())
}

#[tauri::command]
fn read_file(path: &str) -> Result<String, String> {
    vault::read_file(Path::new(path)).map_err(|e| e.to_string())
}

#[tauri::command]
fn write_file(path: &str, content: &str) -> Result<(), String> {
    vault::write_file(Path::new(path), content).map_err(|e| e.to_string())
}

#[tauri::command]
fn load_settings(vault_path: &str) -> Result<String, String> {
    Ok(settings::read_settings_raw(Path::new(vault_path)))
}

#[tauri::command]
fn get_local_graph(vault_path: &str, path: &str) -> Result<graph::GraphData, String> {
    let root = Path::new(vault_path);
    let notes = vault::read_vault_notes(root).map_err(|e| e.to_string())?;
    let limit = settings::load_backend_settings(root).graph_node_limit;
    let data = graph::build_local_graph(&notes, path, limit);
    log::debug!(
        "local graph for {path}: {} nodes, {} edges",
        data.nodes.len(),
        data.edges.len()
    );
    Ok(data)
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_log::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            init_vault,
            read_dir,
            read_file,
            write_file,
            load_settings,
            get_local_graph
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

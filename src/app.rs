use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use crate::backend::{self, ReadDirArgs, ReadFileArgs, VaultPathArgs, WriteFileArgs};
use crate::editor_surface::EditorAdapter;
use crate::graph::GraphView;
use crate::settings::AppSettings;

fn normalize_rel_path(path: &str) -> String {
    path.trim().replace('\\', "/").trim_matches('/').to_string()
}

fn file_stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.strip_suffix(".md").unwrap_or(name)
}

/// Maps a wiki-link target onto a note in the vault listing: exact path
/// first (with or without `.md`), then a unique file-name match. A
/// `#heading` suffix is ignored.
pub fn resolve_link_target(target: &str, files: &[String]) -> Option<String> {
    let note = target.split_once('#').map_or(target, |(note, _)| note);
    let wanted = normalize_rel_path(note).to_ascii_lowercase();
    if wanted.is_empty() {
        return None;
    }
    let wanted_with_ext = if wanted.ends_with(".md") {
        wanted.clone()
    } else {
        format!("{wanted}.md")
    };

    if let Some(exact) = files
        .iter()
        .find(|file| file.to_ascii_lowercase() == wanted_with_ext)
    {
        return Some(exact.clone());
    }

    let wanted_stem = file_stem(&wanted_with_ext).to_string();
    let mut by_stem = files
        .iter()
        .filter(|file| file_stem(file).eq_ignore_ascii_case(&wanted_stem));
    match (by_stem.next(), by_stem.next()) {
        (Some(only), None) => Some(only.clone()),
        _ => None,
    }
}

#[component]
pub fn App() -> impl IntoView {
    let (vault_path, set_vault_path) = signal(String::new());
    let (files, set_files) = signal(Vec::<String>::new());
    let (current_file, set_current_file) = signal(String::new());
    let (content, set_content) = signal(String::new());
    let (settings, set_settings) = signal(AppSettings::default());
    let (graph_open, set_graph_open) = signal(false);

    Effect::new(move |_| {
        spawn_local(async move {
            let path = match backend::call_without_args::<String>("init_vault").await {
                Ok(path) => path,
                Err(err) => {
                    warn!("vault: {err}");
                    return;
                }
            };
            set_vault_path.set(path.clone());

            match backend::call::<_, Vec<String>>("read_dir", &ReadDirArgs { path: &path }).await {
                Ok(list) => set_files.set(list),
                Err(err) => warn!("vault: {err}"),
            }
            let vault_args = VaultPathArgs { vault_path: &path };
            match backend::call::<_, String>("load_settings", &vault_args).await {
                Ok(raw) => set_settings.set(AppSettings::from_json(&raw)),
                Err(err) => warn!("settings: {err}"),
            }
        });
    });

    let select_file = move |filename: String| {
        spawn_local(async move {
            let file_path = format!("{}/{}", vault_path.get_untracked(), filename);
            match backend::call::<_, String>("read_file", &ReadFileArgs { path: &file_path }).await
            {
                Ok(text) => {
                    info!("opened {filename}");
                    set_content.set(text);
                    set_current_file.set(filename);
                }
                Err(err) => warn!("open {filename}: {err}"),
            }
        });
    };

    let on_change = Callback::new(move |new_text: String| {
        set_content.set(new_text.clone());
        let filename = current_file.get_untracked();
        if filename.is_empty() {
            return;
        }
        let file_path = format!("{}/{}", vault_path.get_untracked(), filename);
        spawn_local(async move {
            let args = WriteFileArgs {
                path: &file_path,
                content: &new_text,
            };
            if let Err(err) = backend::call::<_, ()>("write_file", &args).await {
                warn!("save {file_path}: {err}");
            }
        });
    });

    let on_ctrl_click_link = Callback::new(move |target: String| {
        match resolve_link_target(&target, &files.get_untracked()) {
            Some(filename) => select_file(filename),
            None => info!("link target not in vault: {target}"),
        }
    });

    let active_path = Signal::derive(move || {
        let file = current_file.get();
        (!file.is_empty()).then_some(file)
    });

    // Keyed on presence only so switching notes keeps the editor mounted.
    let has_file = Memo::new(move |_| !current_file.get().is_empty());
    let editor_pane = move || {
        if !has_file.get() {
            view! {
                <div class="placeholder">"Select a note from the sidebar to start editing."</div>
            }
            .into_any()
        } else {
            view! {
                <header class="topbar">
                    <span>{move || current_file.get()}</span>
                    <button class="graph-button" on:click=move |_| set_graph_open.set(true)>
                        "Graph"
                    </button>
                </header>
                <EditorAdapter
                    value=content
                    on_change=on_change
                    on_ctrl_click_link=on_ctrl_click_link
                />
            }
            .into_any()
        }
    };

    view! {
        <main class="app-layout" style=move || settings.with(AppSettings::css_variables)>
            <nav class="sidebar">
                <div class="sidebar-header">"Bedrock"</div>
                <div class="file-list">
                    {move || {
                        files
                            .get()
                            .into_iter()
                            .map(|f| {
                                let filename = f.clone();
                                let f_clone = f.clone();
                                let is_active = move || current_file.get() == f_clone;
                                view! {
                                    <div
                                        class="file-item"
                                        class:active=is_active
                                        on:click=move |_| select_file(filename.clone())
                                    >
                                        {f}
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </div>
            </nav>
            <section class="editor-pane">{editor_pane}</section>
            <GraphView
                open=graph_open
                active_path=active_path
                vault_path=vault_path
                on_close=Callback::new(move |_| set_graph_open.set(false))
                on_open_note=Callback::new(move |path: String| select_file(path))
            />
        </main>
    }
}

mod app;
mod backend;
mod editor_core;
mod editor_surface;
mod editor_sync;
mod graph;
mod highlight;
mod settings;
mod wiki_link;

use app::*;
use leptos::prelude::*;
use log::{info, Level};

fn init_logging() {
    let _ = console_log::init_with_level(Level::Debug);
    console_error_panic_hook::set_once();
    info!("logging initialized");
}

fn main() {
    init_logging();
    mount_to_body(|| {
        view! {
            <App/>
        }
    })
}

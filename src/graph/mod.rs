mod client;
mod layout;
mod scene;
mod state;
mod types;
mod view;

pub use view::GraphView;

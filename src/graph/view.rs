use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos::web_sys::MouseEvent;

use super::client::{GraphDataClient, TauriGraphClient};
use super::layout::radial_layout;
use super::scene::{build_scene, summary, truncation_notice, Scene};
use super::state::{FetchTicket, GraphPhase, GraphViewState};
use super::types::CanvasSize;

async fn load_graph<C: GraphDataClient>(
    client: C,
    ticket: FetchTicket,
    state: RwSignal<GraphViewState>,
) {
    let result = client.get_local_graph(&ticket.path).await;
    // The panel may have been unmounted while the request was in flight.
    let _ = state.try_update(|state| state.resolve(&ticket, result));
}

/// Modal panel with the active note's 1-hop neighborhood.
#[component]
pub fn GraphView(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] active_path: Signal<Option<String>>,
    #[prop(into)] vault_path: Signal<String>,
    on_close: Callback<()>,
    on_open_note: Callback<String>,
    #[prop(optional)] canvas: Option<CanvasSize>,
) -> impl IntoView {
    let canvas = canvas.unwrap_or_default();
    let state = RwSignal::new(GraphViewState::new());

    Effect::new(move |_| {
        let is_open = open.get();
        let path = active_path.get();
        let mut ticket = None;
        state.update(|state| ticket = state.sync(is_open, path));
        if let Some(ticket) = ticket {
            let client = TauriGraphClient::new(vault_path.get_untracked());
            spawn_local(load_graph(client, ticket, state));
        }
    });

    let scene = Memo::new(move |_| {
        state.with(|state| match state.graph() {
            Some(graph) => {
                let layout = radial_layout(&graph.nodes, state.active_path(), canvas);
                build_scene(graph, &layout, state.active_path())
            }
            None => Scene::default(),
        })
    });

    let phase = move || state.with(|state| state.phase());
    let message = move || match phase() {
        GraphPhase::NoActiveNote => Some("Open a note to generate its graph."),
        GraphPhase::Loading => Some("Loading graph…"),
        GraphPhase::Empty => Some("No linked notes yet."),
        GraphPhase::Closed | GraphPhase::Populated => None,
    };
    let show_canvas = move || {
        matches!(phase(), GraphPhase::Empty | GraphPhase::Populated)
            && state.with(|state| state.graph().is_some_and(|graph| !graph.nodes.is_empty()))
    };
    let meta = move || state.with(|state| state.graph().map(summary).unwrap_or_default());
    let notice = move || state.with(|state| state.graph().and_then(truncation_notice));

    view! {
        <Show when=move || open.get()>
            <div class="modal-overlay" on:click=move |_| on_close.run(())>
                <div
                    class="modal graph-modal"
                    aria-busy=move || state.with(|state| state.is_loading()).to_string()
                    on:click=|ev: MouseEvent| ev.stop_propagation()
                >
                    <div class="modal-header">"Graph View"</div>
                    <div class="modal-subtitle">
                        "Local graph for the current note with 1-hop links."
                    </div>
                    {move || message().map(|text| view! { <div class="empty">{text}</div> })}
                    <Show when=show_canvas>
                        <div class="graph-canvas">
                            <svg viewBox=canvas.view_box() width="100%" height="100%">
                                {move || {
                                    scene
                                        .get()
                                        .edges
                                        .into_iter()
                                        .map(|edge| {
                                            view! {
                                                <line
                                                    class="graph-edge"
                                                    x1=edge.from.x.to_string()
                                                    y1=edge.from.y.to_string()
                                                    x2=edge.to.x.to_string()
                                                    y2=edge.to.y.to_string()
                                                />
                                            }
                                        })
                                        .collect_view()
                                }}
                                {move || {
                                    scene
                                        .get()
                                        .nodes
                                        .into_iter()
                                        .map(|node| {
                                            let target = node.navigation_target().map(str::to_string);
                                            let label = node.label_position().map(|at| {
                                                view! {
                                                    <text
                                                        x=at.x.to_string()
                                                        y=at.y.to_string()
                                                        text-anchor="middle"
                                                    >
                                                        {node.title.clone()}
                                                    </text>
                                                }
                                            });
                                            let class = if node.is_active {
                                                "graph-node active"
                                            } else {
                                                "graph-node"
                                            };
                                            view! {
                                                <g
                                                    class=class
                                                    on:click=move |_| {
                                                        if let Some(path) = target.clone() {
                                                            on_open_note.run(path);
                                                        }
                                                    }
                                                >
                                                    <title>{node.tooltip()}</title>
                                                    <circle
                                                        cx=node.position.x.to_string()
                                                        cy=node.position.y.to_string()
                                                        r=node.radius.to_string()
                                                    />
                                                    {label}
                                                </g>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </svg>
                            <div class="graph-meta">{meta}</div>
                        </div>
                    </Show>
                    {move || notice().map(|text| view! { <div class="graph-warning">{text}</div> })}
                    <div class="modal-actions">
                        <button on:click=move |_| on_close.run(())>"Close"</button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

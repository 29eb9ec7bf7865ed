use super::{classify_drop, command_for_key, DragSession, DropGeometry, DropTarget, KeyInput};
use crate::columns::{self, ResizeSession};
use crate::i18n::{self, Msg};
use crate::models::Node;
use crate::state::AppContext;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Live text of a node input. Browsers may leave a lone `\n` in an emptied contenteditable.
fn input_text(el: &web_sys::HtmlElement) -> String {
    let text = el.text_content().unwrap_or_default();
    if text.trim_end_matches('\n').is_empty() {
        String::new()
    } else {
        text
    }
}

fn drop_geometry(ev: &web_sys::DragEvent) -> Option<DropGeometry> {
    let el = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
    let rect = el.get_bounding_client_rect();
    Some(DropGeometry::from_rect(
        rect.left(),
        rect.top(),
        rect.width(),
        rect.height(),
        ev.client_x() as f64,
        ev.client_y() as f64,
    ))
}

/// Put the caret at the end of the input for `id`, once the current render has landed.
pub(crate) fn focus_node_input(id: String) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        wasm_bindgen::closure::Closure::once_into_js(move || {
            let Some(window) = web_sys::window() else {
                return;
            };
            let Some(document) = window.document() else {
                return;
            };
            let selector = format!(".node-input[data-node-id=\"{id}\"]");
            let Some(el) = document
                .query_selector(&selector)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
            else {
                return;
            };

            let _ = el.focus();
            let range = document.create_range();
            if let (Ok(range), Ok(Some(selection))) = (range, window.get_selection()) {
                let _ = range.select_node_contents(&el);
                range.collapse_with_to_start(false);
                let _ = selection.remove_all_ranges();
                let _ = selection.add_range(&range);
            }
        })
        .as_ref()
        .unchecked_ref(),
        0,
    );
}

#[component]
pub fn OutlineNode(node: Node, depth: usize) -> impl IntoView {
    let state = expect_context::<AppContext>().0;

    let is_root = depth == 0;
    let has_children = node.has_children();
    let id_sv = StoredValue::new(node.id.clone());
    let focused = RwSignal::new(false);
    let target = DropTarget {
        has_children,
        is_root,
    };

    let placeholder = if is_root {
        state.t(Msg::PlaceholderRoot)
    } else {
        state.t(Msg::PlaceholderNode)
    };

    let content_class = move || {
        let id = id_sv.get_value();
        let mut class = String::from("node-content");
        if focused.get() {
            class.push_str(" focused");
        }
        state.drag.with(|drag| {
            if let Some(drag) = drag {
                if drag.source_id() == id {
                    class.push_str(" is-dragging");
                }
                if let Some(zone) = drag.highlight_for(&id) {
                    class.push(' ');
                    class.push_str(zone.highlight_class());
                }
            }
        });
        class
    };

    let children_view = if !has_children {
        ().into_any()
    } else if state.session.with_untracked(|s| s.visible_depth()).expands(depth) {
        node.children
            .into_iter()
            .map(|child| view! { <OutlineNode node=child depth=depth + 1 /> }.into_any())
            .collect_view()
            .into_any()
    } else {
        let count = node.children.len().to_string();
        let label = i18n::tf(state.lang(), Msg::HiddenNodes, &[("count", &count)]);
        view! { <div class="hidden-indicator">{label}</div> }.into_any()
    };

    view! {
        <div class=if is_root { "tree-container" } else { "child-wrapper" }>
            <div class="node-group">
                <div
                    class=content_class
                    style=columns::width_style(depth)
                    data-id=node.id.clone()
                    data-has-children=has_children.to_string()
                    on:dragover=move |ev: web_sys::DragEvent| {
                        ev.prevent_default();
                        if let Some(dt) = ev.data_transfer() {
                            dt.set_drop_effect("move");
                        }
                        let Some(geometry) = drop_geometry(&ev) else {
                            return;
                        };
                        let zone = classify_drop(target, geometry);
                        let id = id_sv.get_value();
                        let current = state
                            .drag
                            .with_untracked(|d| d.as_ref().map(|d| d.highlight_for(&id)));
                        if let Some(current) = current {
                            if current != Some(zone) {
                                state.drag.update(|d| {
                                    if let Some(d) = d {
                                        d.hover(&id, zone);
                                    }
                                });
                            }
                        }
                    }
                    on:dragleave=move |_ev: web_sys::DragEvent| {
                        let id = id_sv.get_value();
                        state.drag.update(|d| {
                            if let Some(d) = d {
                                d.leave(&id);
                            }
                        });
                    }
                    on:drop=move |ev: web_sys::DragEvent| {
                        ev.prevent_default();
                        ev.stop_propagation();

                        let source_id = state
                            .drag
                            .with_untracked(|d| d.as_ref().map(|d| d.source_id().to_string()));
                        state.drag.set(None);
                        let Some(source_id) = source_id else {
                            return;
                        };
                        let Some(geometry) = drop_geometry(&ev) else {
                            return;
                        };
                        let zone = classify_drop(target, geometry);
                        let _ = state.move_by_drag(&source_id, &id_sv.get_value(), zone);
                    }
                >
                    <div
                        class="node-handle"
                        draggable=if is_root { "false" } else { "true" }
                        on:dragstart=move |ev: web_sys::DragEvent| {
                            if is_root {
                                ev.prevent_default();
                                return;
                            }
                            let id = id_sv.get_value();
                            if let Some(dt) = ev.data_transfer() {
                                dt.set_effect_allowed("move");
                                // Firefox will not start a drag without data.
                                let _ = dt.set_data("text/plain", &id);
                            }
                            state.drag.set(Some(DragSession::new(id)));
                        }
                        on:dragend=move |_ev: web_sys::DragEvent| state.drag.set(None)
                    />
                    <div
                        class=move || {
                            let active = state.resize.with(|r| r.is_some_and(|r| r.depth == depth));
                            if active { "resizer active" } else { "resizer" }
                        }
                        contenteditable="false"
                        on:mousedown=move |ev: web_sys::MouseEvent| {
                            ev.stop_propagation();
                            ev.prevent_default();
                            let start_width = ev
                                .current_target()
                                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                                .and_then(|el| el.parent_element())
                                .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
                                .map(|el| el.offset_width() as f64)
                                .unwrap_or(columns::MIN_COLUMN_WIDTH_PX);
                            let x = ev.client_x() as f64;
                            state.resize.set(Some(ResizeSession::new(depth, x, start_width)));
                        }
                    />
                    <div
                        class="node-input"
                        contenteditable="true"
                        data-placeholder=placeholder
                        data-node-id=node.id.clone()
                        on:input=move |ev: web_sys::Event| {
                            if let Some(el) = ev
                                .current_target()
                                .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
                            {
                                state.set_text(&id_sv.get_value(), &input_text(&el));
                            }
                        }
                        on:focus=move |_ev: web_sys::FocusEvent| {
                            focused.set(true);
                            state.set_focus(Some(id_sv.get_value()));
                        }
                        on:blur=move |_ev: web_sys::FocusEvent| {
                            focused.set(false);
                            state.persist();
                        }
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            let Some(el) = ev
                                .current_target()
                                .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
                            else {
                                return;
                            };
                            let text = input_text(&el);
                            let key = ev.key();
                            let input = KeyInput {
                                key: &key,
                                shift: ev.shift_key(),
                                composing: ev.is_composing(),
                            };
                            let Some(command) = command_for_key(input, text.is_empty()) else {
                                return;
                            };
                            ev.prevent_default();
                            let _ = state.apply(&id_sv.get_value(), command, &text);
                        }
                    >
                        {node.text}
                    </div>
                </div>
                <div class="children-container">{children_view}</div>
            </div>
        </div>
    }
}

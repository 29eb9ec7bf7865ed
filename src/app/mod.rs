use crate::columns;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Dialog, DialogDescription, DialogFooter, DialogHeader,
    DialogTitle,
};
use crate::config::EditorConfig;
use crate::editor::{focus_node_input, OutlineNode, VisibleDepth};
use crate::i18n::{self, Msg};
use crate::state::{AppContext, AppState};
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;
use wasm_bindgen::JsCast;

fn set_root_css_var(name: &str, value: &str) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        return;
    };
    let _ = root.style().set_property(name, value);
}

async fn read_file_text(file: web_sys::File) -> Option<String> {
    wasm_bindgen_futures::JsFuture::from(file.text())
        .await
        .ok()?
        .as_string()
}

#[component]
pub fn App() -> impl IntoView {
    let config = EditorConfig::from_env();
    let state = AppState::new(config);
    provide_context(AppContext(state));

    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(state.t(Msg::AppTitle));
    }

    // Stored, imported and committed widths.
    Effect::new(move |_| {
        state.session.with(|s| {
            for (depth, width) in s.column_widths().iter() {
                set_root_css_var(&columns::css_var(depth), width);
            }
        });
    });

    // Restore the caret after anything that moved focus or re-rendered the tree.
    Effect::new(move |_| {
        if let Some(id) = state.session.with(|s| s.focus().map(str::to_string)) {
            focus_node_input(id);
        }
    });

    // Column resize: preview on move, commit once on release.
    let _move_handle = window_event_listener(ev::mousemove, move |ev: web_sys::MouseEvent| {
        let mut preview = None;
        state.resize.update_untracked(|r| {
            if let Some(resize) = r {
                preview = Some((resize.depth, resize.drag_to(ev.client_x() as f64)));
            }
        });
        if let Some((depth, width)) = preview {
            set_root_css_var(&columns::css_var(depth), &columns::px(width));
        }
    });
    let _up_handle = window_event_listener(ev::mouseup, move |ev: web_sys::MouseEvent| {
        if let Some(resize) = state.resize.get_untracked() {
            state.resize.set(None);
            if let Some(width) = resize.release(ev.client_x() as f64) {
                state.commit_column_width(resize.depth, width);
            }
        }
    });

    view! {
        <div class="app flex min-h-screen flex-col">
            <Toolbar />
            <main id="app" class="flex-1 overflow-auto p-4">
                {move || {
                    let tree = state.session.with(|s| s.tree().clone());
                    view! { <OutlineNode node=tree depth=0 /> }
                }}
            </main>
            <ConfirmResetDialog />
            <HelpDialog />
        </div>
    }
}

#[component]
fn Toolbar() -> impl IntoView {
    let state = expect_context::<AppContext>().0;
    let file_ref: NodeRef<html::Input> = NodeRef::new();

    let depth_label = move || match state.session.with(|s| s.visible_depth()) {
        VisibleDepth::All => state.t(Msg::DepthAll).to_string(),
        VisibleDepth::Levels(n) => {
            i18n::tf(state.lang(), Msg::DepthLevel, &[("val", &n.to_string())])
        }
    };

    let on_import_change = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        // Allow picking the same file again.
        input.set_value("");

        spawn_local(async move {
            let result = match read_file_text(file).await {
                Some(text) => state.import_json(&text).map_err(|e| e.to_string()),
                None => Err("file could not be read".to_string()),
            };
            if let Err(e) = result {
                tracing::warn!(error = %e, "import rejected");
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(state.t(Msg::ErrorInvalidJson));
                }
            }
        });
    };

    view! {
        <header class="toolbar flex flex-wrap items-center gap-2 border-b border-border px-4 py-2">
            <h1 class="mr-auto text-sm font-semibold">{state.t(Msg::AppTitle)}</h1>

            <label class="flex items-center gap-2 text-xs text-muted-foreground">
                <span id="label-depth">{depth_label}</span>
                <input
                    id="input-depth"
                    type="range"
                    min="1"
                    max=VisibleDepth::SLIDER_ALL.to_string()
                    prop:value=move || state.session.with(|s| s.visible_depth().slider_value()).to_string()
                    on:input=move |ev| {
                        if let Ok(value) = event_target_value(&ev).parse::<u32>() {
                            state.set_visible_depth(VisibleDepth::from_slider(value));
                        }
                    }
                />
            </label>

            <Button
                variant=ButtonVariant::Outline
                size=ButtonSize::Sm
                on:click=move |_| state.confirm_reset_open.set(true)
            >
                {state.t(Msg::BtnClear)}
            </Button>
            <Button
                variant=ButtonVariant::Outline
                size=ButtonSize::Sm
                on:click=move |_| {
                    if let Some(input) = file_ref.get() {
                        input.click();
                    }
                }
            >
                {state.t(Msg::BtnImport)}
            </Button>
            <input
                node_ref=file_ref
                id="import-file"
                type="file"
                accept=".json,application/json"
                class="hidden"
                on:change=on_import_change
            />
            <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=move |_| state.export()>
                {state.t(Msg::BtnExport)}
            </Button>
            <Button variant=ButtonVariant::Ghost size=ButtonSize::Sm on:click=move |_| state.help_open.set(true)>
                {state.t(Msg::BtnHelp)}
            </Button>
        </header>
    }
}

#[component]
fn ConfirmResetDialog() -> impl IntoView {
    let state = expect_context::<AppContext>().0;
    let open = state.confirm_reset_open;
    let cancel_ref: NodeRef<html::Div> = NodeRef::new();

    view! {
        <Dialog open=open initial_focus=cancel_ref>
            <DialogHeader>
                <DialogDescription class="confirm-message">{state.t(Msg::ConfirmClear)}</DialogDescription>
            </DialogHeader>
            <DialogFooter>
                <div node_ref=cancel_ref class="contents">
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        on:click=move |_| open.set(false)
                    >
                        {state.t(Msg::BtnCancel)}
                    </Button>
                </div>
                <Button
                    variant=ButtonVariant::Destructive
                    size=ButtonSize::Sm
                    on:click=move |_| {
                        open.set(false);
                        state.reset();
                    }
                >
                    {state.t(Msg::BtnInitialize)}
                </Button>
            </DialogFooter>
        </Dialog>
    }
}

#[component]
fn HelpDialog() -> impl IntoView {
    let state = expect_context::<AppContext>().0;
    let open = state.help_open;
    let close_ref: NodeRef<html::Div> = NodeRef::new();

    view! {
        <Dialog open=open class="max-w-md" initial_focus=close_ref>
            <DialogHeader>
                <DialogTitle>{state.t(Msg::HelpTitle)}</DialogTitle>
            </DialogHeader>
            <ul class="help-list space-y-1 text-sm">
                {i18n::shortcuts(state.lang())
                    .iter()
                    .map(|(keys, desc)| {
                        view! {
                            <li class="flex items-center gap-3">
                                <kbd class="rounded border border-border px-1.5 py-0.5 text-xs">{*keys}</kbd>
                                <span>{*desc}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <DialogFooter>
                <div node_ref=close_ref class="contents">
                    <Button size=ButtonSize::Sm on:click=move |_| open.set(false)>
                        {state.t(Msg::BtnClose)}
                    </Button>
                </div>
            </DialogFooter>
        </Dialog>
    }
}

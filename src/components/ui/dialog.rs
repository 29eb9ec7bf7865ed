use icons::X;
use leptos::html;
use leptos::prelude::*;
use leptos_ui::clx;
use tw_merge::*;
use wasm_bindgen::JsCast;

mod components {
    use super::*;
    clx! {DialogHeader, div, "flex flex-col gap-2 text-center sm:text-left"}
    clx! {DialogTitle, h3, "text-lg leading-none font-semibold"}
    clx! {DialogDescription, p, "text-muted-foreground text-sm"}
    clx! {DialogFooter, footer, "flex flex-col-reverse gap-2 sm:flex-row sm:justify-end"}
}

pub use components::*;

/// Focus the first element inside `slot` every time `open` turns true.
fn focus_on_open(open: RwSignal<bool>, slot: NodeRef<html::Div>) {
    Effect::new(move |_| {
        if !open.get() {
            return;
        }

        // Defer to next tick so the dialog body is mounted.
        let _ = window().set_timeout_with_callback_and_timeout_and_arguments_0(
            wasm_bindgen::closure::Closure::once_into_js(move || {
                if let Some(el) = slot
                    .get_untracked()
                    .and_then(|slot| slot.first_element_child())
                    .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
                {
                    let _ = el.focus();
                }
            })
            .as_ref()
            .unchecked_ref(),
            0,
        );
    });
}

/// Modal overlay shown while `open` is true. Clicking the backdrop or the close icon hides it.
///
/// `initial_focus` wraps the control that takes focus each time the dialog opens.
#[component]
pub fn Dialog(
    open: RwSignal<bool>,
    children: ChildrenFn,
    #[prop(optional, into)] class: String,
    #[prop(optional)] initial_focus: Option<NodeRef<html::Div>>,
) -> impl IntoView {
    if let Some(slot) = initial_focus {
        focus_on_open(open, slot);
    }
    let merged_class = tw_merge!(
        "relative flex w-full max-w-sm flex-col gap-4 rounded-md border border-border bg-background p-4 shadow-lg",
        class
    );
    let children = StoredValue::new(children);

    view! {
        <Show when=move || open.get() fallback=|| ().into_view()>
            <div
                class="dialog-overlay fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4"
                on:click=move |_| open.set(false)
            >
                <div
                    class=merged_class.clone()
                    role="dialog"
                    aria-modal="true"
                    on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
                >
                    <button
                        type="button"
                        class="absolute top-3 right-3 p-1 rounded-sm focus:outline-none [&_svg:not([class*='size-'])]:size-4"
                        aria-label="Close dialog"
                        on:click=move |_| open.set(false)
                    >
                        <X />
                    </button>
                    {children.with_value(|children| children())}
                </div>
            </div>
        </Show>
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    async fn next_ticks() {
        let promise = js_sys::Promise::new(&mut |resolve: js_sys::Function, _reject| {
            let _ = window().set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 20);
        });
        let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
    }

    fn active_id() -> Option<String> {
        document().active_element().map(|el| el.id())
    }

    #[wasm_bindgen_test]
    async fn test_initial_focus_applies_on_every_open() {
        let open = RwSignal::new(false);
        let slot: NodeRef<html::Div> = NodeRef::new();
        leptos::mount::mount_to_body(move || {
            view! {
                <Dialog open=open initial_focus=slot>
                    <div node_ref=slot class="contents">
                        <button id="dialog-first">"ok"</button>
                    </div>
                    <button id="dialog-other">"other"</button>
                </Dialog>
            }
        });

        for _ in 0..2 {
            open.set(true);
            next_ticks().await;
            assert_eq!(active_id().as_deref(), Some("dialog-first"));

            open.set(false);
            next_ticks().await;
            assert_ne!(active_id().as_deref(), Some("dialog-first"));
        }
    }
}

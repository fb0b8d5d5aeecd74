use leptos::prelude::*;

use super::Toast;
use crate::ui_model::{score_label, sound_icon, APP_TITLE};

#[component]
pub(super) fn Header(
    score: impl Fn() -> u64 + Send + Sync + 'static,
    sound_enabled: impl Fn() -> bool + Send + Sync + Copy + 'static,
    on_toggle_sound: Callback<()>,
    on_reset: Callback<()>,
) -> impl IntoView {
    view! {
        <header style="text-align: center; margin-bottom: 20px;">
            <h1 style="font-size: 2.25rem; font-weight: 700; color: #fff; margin: 0 0 8px 0;">
                {APP_TITLE}
            </h1>
            <div style="display: flex; justify-content: center; align-items: center; gap: 14px; color: #fff;">
                <div style="font-size: 1.25rem; font-variant-numeric: tabular-nums;">
                    {move || score_label(score())}
                </div>
                <button
                    class="btn sm ghost"
                    style=HEADER_BUTTON
                    title=move || if sound_enabled() { "Mute" } else { "Unmute" }
                    on:click=move |_| on_toggle_sound.run(())
                >
                    {move || sound_icon(sound_enabled())}
                </button>
                <button
                    class="btn sm ghost"
                    style=HEADER_BUTTON
                    title="Reset bubble wrap"
                    on:click=move |_| on_reset.run(())
                >
                    "↺"
                </button>
            </div>
        </header>
    }
}

const HEADER_BUTTON: &str = "padding: 4px 10px; background: rgba(255,255,255,0.2); border: 1px solid rgba(255,255,255,0.3); border-radius: 8px; color: #fff; cursor: pointer;";

#[component]
pub(super) fn ToastStack(toasts: RwSignal<Vec<Toast>>) -> impl IntoView {
    view! {
        <div
            class="toast-stack"
            aria-live="polite"
            aria-relevant="additions removals"
            style="position: fixed; bottom: 16px; right: 16px; display: flex; flex-direction: column; gap: 8px; z-index: 50;"
        >
            <For
                each=move || toasts.get()
                key=|t| t.id
                children=move |t| {
                    let id = t.id;
                    view! {
                        <div
                            class="toast success"
                            style="display: flex; gap: 10px; align-items: center; background: #fff; color: #111; padding: 10px 12px; border-radius: 10px; box-shadow: 0 4px 15px rgba(0,0,0,0.2);"
                        >
                            <div style="flex: 1; white-space: pre-wrap;">{t.message}</div>
                            <button
                                class="toast-close"
                                title="Dismiss"
                                style="background: none; border: none; cursor: pointer;"
                                on:click=move |_| toasts.update(|ts| ts.retain(|x| x.id != id))
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

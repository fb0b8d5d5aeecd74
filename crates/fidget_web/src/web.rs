use std::sync::atomic::{AtomicU64, Ordering};

use fidget::prelude::*;
use leptos::prelude::*;
use tracing::trace;
use wasm_bindgen::prelude::*;

use crate::ui_model::{
    footer_line, glow, Section, BUBBLE_FILL, FOOTER_HINT, OFF_FILL, SLIDER_GRADIENT,
};

mod shell;

use shell::{Header, ToastStack};

// A very short click, encoded inline so there is nothing to fetch.
const SOUND_DATA_URI: &str = "data:audio/wav;base64,UklGRnoGAABXQVZFZm10IBAAAAABAAEAQB8AAEAfAAABAAgAZGF0YQoGAACBhYqFbF1fdJivrJBhNjVgodDbq2EcBj+a2/LDciUFLIHO8tiJNwgZaLvt559NEAxQp+PwtmMcBjiR1/LMeSwFJHfH8N2QQAoUXrTp66hVFApGn+DyvmwhCDGH0fPTgjMGHm7A7+OZSA0PVqzn77BdGAg+ltryxnkpBSl+zPLaizsIGGS57OScTgwOUarm7blmHgg2jdXzzn0vBSF0xe/glEILElyx6OyrWBUIQ5zd8sFuIAUuhM/z2YU2Bhxqvu7mnEoODlOq5O+zYBoGPJPY88p9KwUme8rx3I4+CRZiturqpVITC0ml4u6/bSEELIHO8diJOQcZZ7zs45ZODBFUquPvtGIaCD2T2fPJfSsFJnnK8dyOPgkWYbbq6qVSEwtJpeLuv20hBCyBzvHYiTkHGWe87OOWTgwRVKrj77RiGgg9k9nzyX0rBSZ5yvHcjj4JFmG26uqlUhMLS";

static NEXT_TOAST_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Debug)]
pub(super) struct Toast {
    pub(super) id: u64,
    pub(super) message: String,
}

/// Plays the click through a throwaway `<audio>` element. Browsers may refuse
/// (autoplay policy); the rejected promise is caught and dropped.
#[derive(Clone, Copy, Default)]
struct WebAudio;

impl AudioSink for WebAudio {
    fn play(&self, volume: f32) {
        let Ok(audio) = web_sys::HtmlAudioElement::new_with_src(SOUND_DATA_URI) else {
            trace!("audio element unavailable");
            return;
        };
        audio.set_volume(volume as f64);
        match audio.play() {
            Ok(promise) => {
                let swallow = Closure::wrap(Box::new(|_err: JsValue| {}) as Box<dyn FnMut(JsValue)>);
                let _ = promise.catch(&swallow);
                swallow.forget();
            }
            Err(_) => trace!("audio play() threw"),
        }
    }
}

/// Pushes into the toast stack and removes the toast when its time is up.
#[derive(Clone, Copy)]
struct ToastNotifier {
    toasts: RwSignal<Vec<Toast>>,
}

impl Notifier for ToastNotifier {
    fn notify(&self, message: &str, duration_ms: u32) {
        let id = NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed);
        self.toasts.update(|ts| {
            ts.push(Toast {
                id,
                message: message.to_string(),
            })
        });
        let toasts = self.toasts;
        after_ms(duration_ms, move || {
            toasts.update(|ts| ts.retain(|t| t.id != id));
        });
    }
}

type WebController = Controller<WebAudio, ToastNotifier, SystemClock>;

pub fn start() {
    mount_to_body(|| view! { <App /> });
}

fn make_controller(toasts: RwSignal<Vec<Toast>>) -> WebController {
    let seed = js_sys::Date::now() as u64;
    let store = Store::new(FidgetConfig::default().with_seed(seed))
        .unwrap_or_else(|_| Store::seeded(seed));
    Controller::new(store, WebAudio, ToastNotifier { toasts }, SystemClock::new())
}

fn after_ms(ms: u32, f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let cb = Closure::once_into_js(f);
    let timeout = ms.min(i32::MAX as u32) as i32;
    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), timeout)
        .is_err()
    {
        trace!(ms, "setTimeout failed");
    }
}

/// Apply one event and bump the revision so views re-read the session.
fn dispatch(runtime: StoredValue<WebController>, set_revision: WriteSignal<u64>, event: Event) {
    runtime.update_value(|c| {
        c.dispatch(event);
    });
    set_revision.update(|r| *r += 1);

    // Every click queues its own clear in the store, so it gets its own wakeup.
    if let Event::ClickColorButton(_) = event {
        let wait = runtime.with_value(|c| c.store().config().flash_ms);
        let wait = wait.min(u32::MAX as u64 - 1) as u32 + 1;
        after_ms(wait, move || dispatch(runtime, set_revision, Event::Tick));
    }
}

fn grid_style(columns: u32, gap_px: u32) -> String {
    format!("display: grid; grid-template-columns: repeat({columns}, minmax(0, 1fr)); gap: {gap_px}px;")
}

#[component]
fn App() -> impl IntoView {
    let toasts = RwSignal::new(Vec::<Toast>::new());
    let runtime = StoredValue::new(make_controller(toasts));
    let (revision, set_revision) = signal(0u64);

    let score = move || {
        revision.track();
        runtime.with_value(|c| c.session().score())
    };
    let sound_enabled = move || {
        revision.track();
        runtime.with_value(|c| c.session().sound_enabled())
    };

    view! {
        <main style="min-height: 100vh; margin: 0; padding: 16px; background: linear-gradient(to bottom right, #c084fc, #ec4899, #ef4444); font-family: system-ui, -apple-system, Segoe UI, Roboto, sans-serif;">
            <div style="max-width: 1152px; margin: 0 auto;">
                <Header
                    score=score
                    sound_enabled=sound_enabled
                    on_toggle_sound=Callback::new(move |_| dispatch(runtime, set_revision, Event::ToggleSound))
                    on_reset=Callback::new(move |_| dispatch(runtime, set_revision, Event::ResetBubbles))
                />

                <div style="display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 20px;">
                    <BubblePanel runtime=runtime revision=revision set_revision=set_revision />
                    <LightPanel runtime=runtime revision=revision set_revision=set_revision />
                    <SwitchPanel runtime=runtime revision=revision set_revision=set_revision />
                    <ColorPanel runtime=runtime revision=revision set_revision=set_revision />
                </div>

                <SliderPanel runtime=runtime revision=revision set_revision=set_revision />

                <footer style="text-align: center; margin-top: 20px; color: rgba(255,255,255,0.8);">
                    <p style="margin: 0;">{move || footer_line(score())}</p>
                    <p style="margin: 4px 0 0 0; font-size: 0.85em;">{FOOTER_HINT}</p>
                </footer>
            </div>
            <ToastStack toasts=toasts />
        </main>
    }
}

#[component]
fn Panel(
    section: Section,
    heading: impl Fn() -> String + Send + 'static,
    children: Children,
) -> impl IntoView {
    view! {
        <section style="background: rgba(255,255,255,0.1); border-radius: 10px; padding: 14px;">
            <h2 style="margin: 0 0 12px 0; font-size: 1.2rem; font-weight: 700; color: #fff;">
                {section.icon()}" "{heading}
            </h2>
            {children()}
            {section.hint().map(|h| {
                view! {
                    <div style="margin-top: 8px; text-align: center; color: rgba(255,255,255,0.7); font-size: 0.85em;">
                        {h}
                    </div>
                }
            })}
        </section>
    }
}

#[component]
fn BubblePanel(
    runtime: StoredValue<WebController>,
    revision: ReadSignal<u64>,
    set_revision: WriteSignal<u64>,
) -> impl IntoView {
    let count = runtime.with_value(|c| c.session().bubbles().len());
    let popped = move |id: usize| {
        revision.track();
        runtime.with_value(|c| c.session().bubbles().get(id).map_or(true, |b| b.popped))
    };

    view! {
        <Panel
            section=Section::BubbleWrap
            heading=move || {
                revision.track();
                runtime.with_value(|c| Section::BubbleWrap.heading(c.session()))
            }
        >
            <div style=grid_style(Section::BubbleWrap.columns(), 4)>
                {(0..count)
                    .map(|id| {
                        view! {
                            <button
                                disabled=move || popped(id)
                                style=move || {
                                    if popped(id) {
                                        format!("aspect-ratio: 1; border: none; border-radius: 9999px; background: {OFF_FILL}; transform: scale(0.75); cursor: not-allowed;")
                                    } else {
                                        format!("aspect-ratio: 1; border: none; border-radius: 9999px; background: {BUBBLE_FILL}; box-shadow: 0 4px 8px rgba(0,0,0,0.25); cursor: pointer;")
                                    }
                                }
                                on:click=move |_| dispatch(runtime, set_revision, Event::PopBubble(id))
                            ></button>
                        }
                    })
                    .collect_view()}
            </div>
        </Panel>
    }
}

#[component]
fn LightPanel(
    runtime: StoredValue<WebController>,
    revision: ReadSignal<u64>,
    set_revision: WriteSignal<u64>,
) -> impl IntoView {
    let count = runtime.with_value(|c| c.session().lights().len());
    let light = move |i: usize| {
        revision.track();
        runtime.with_value(|c| c.session().lights().get(i).copied())
    };

    view! {
        <Panel
            section=Section::LightSwitch
            heading=move || {
                revision.track();
                runtime.with_value(|c| Section::LightSwitch.heading(c.session()))
            }
        >
            <div style=grid_style(Section::LightSwitch.columns(), 10)>
                {(0..count)
                    .map(|i| {
                        view! {
                            <button
                                style=move || match light(i) {
                                    Some(l) if l.is_on => format!(
                                        "height: 64px; border: none; border-radius: 10px; cursor: pointer; font-size: 1.6rem; background: {}; box-shadow: {};",
                                        l.color.hex(),
                                        glow(l.color.hex(), 20, ""),
                                    ),
                                    _ => "height: 64px; border: none; border-radius: 10px; cursor: pointer; font-size: 1.6rem; background: #4b5563; opacity: 0.8;".to_string(),
                                }
                                on:click=move |_| dispatch(runtime, set_revision, Event::ToggleLight(i))
                            >
                                "💡"
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </Panel>
    }
}

#[component]
fn SwitchPanel(
    runtime: StoredValue<WebController>,
    revision: ReadSignal<u64>,
    set_revision: WriteSignal<u64>,
) -> impl IntoView {
    let count = runtime.with_value(|c| c.session().switches().len());
    let switch = move |i: usize| {
        revision.track();
        runtime.with_value(|c| c.session().switches().get(i).copied())
    };

    view! {
        <Panel section=Section::MagicSwitches heading=|| Section::MagicSwitches.label().to_string()>
            <div style=grid_style(Section::MagicSwitches.columns(), 10)>
                {(0..count)
                    .map(|i| {
                        view! {
                            <button
                                style=move || match switch(i) {
                                    Some(s) if s.is_on => format!(
                                        "height: 48px; border: none; border-radius: 10px; cursor: pointer; background: {}; box-shadow: {};",
                                        s.color.hex(),
                                        glow(s.color.hex(), 15, "50"),
                                    ),
                                    _ => format!("height: 48px; border: none; border-radius: 10px; cursor: pointer; background: {OFF_FILL};"),
                                }
                                on:click=move |_| dispatch(runtime, set_revision, Event::ToggleSwitch(i))
                            >
                                <div style=move || {
                                    let shift = if switch(i).is_some_and(|s| s.is_on) { 8 } else { -8 };
                                    format!("width: 22px; height: 22px; margin: 0 auto; border-radius: 9999px; background: #fff; transition: transform 300ms; transform: translateX({shift}px);")
                                }></div>
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </Panel>
    }
}

#[component]
fn ColorPanel(
    runtime: StoredValue<WebController>,
    revision: ReadSignal<u64>,
    set_revision: WriteSignal<u64>,
) -> impl IntoView {
    let count = runtime.with_value(|c| c.session().color_buttons().len());
    let button = move |i: usize| {
        revision.track();
        runtime.with_value(|c| {
            let s = c.session();
            s.color_buttons().get(i).map(|b| (b.color, s.is_animating(i)))
        })
    };

    view! {
        <Panel section=Section::ColorButtons heading=|| Section::ColorButtons.label().to_string()>
            <div style=grid_style(Section::ColorButtons.columns(), 10)>
                {(0..count)
                    .map(|i| {
                        view! {
                            <button
                                style=move || {
                                    let Some((color, animating)) = button(i) else {
                                        return String::new();
                                    };
                                    let hex = color.hex();
                                    if animating {
                                        format!("height: 64px; border: none; border-radius: 10px; cursor: pointer; background: {hex}; transform: scale(0.95); filter: brightness(1.5); box-shadow: {};", glow(hex, 20, ""))
                                    } else {
                                        format!("height: 64px; border: none; border-radius: 10px; cursor: pointer; background: {hex}; box-shadow: 0 4px 15px {hex}40;")
                                    }
                                }
                                on:click=move |_| dispatch(runtime, set_revision, Event::ClickColorButton(i))
                            ></button>
                        }
                    })
                    .collect_view()}
            </div>
        </Panel>
    }
}

#[component]
fn SliderPanel(
    runtime: StoredValue<WebController>,
    revision: ReadSignal<u64>,
    set_revision: WriteSignal<u64>,
) -> impl IntoView {
    let value = move || {
        revision.track();
        runtime.with_value(|c| c.session().slider_value())
    };

    view! {
        <div style="margin-top: 20px;">
            <Panel
                section=Section::Slider
                heading=move || {
                    revision.track();
                    runtime.with_value(|c| Section::Slider.heading(c.session()))
                }
            >
                <input
                    type="range"
                    min="0"
                    max="100"
                    prop:value=move || value().to_string()
                    on:input=move |ev| {
                        if let Ok(v) = event_target_value(&ev).parse::<i64>() {
                            dispatch(runtime, set_revision, Event::SetSlider(v));
                        }
                    }
                    style=format!("width: 100%; height: 10px; border-radius: 10px; appearance: none; cursor: pointer; background: {SLIDER_GRADIENT};")
                />
            </Panel>
        </div>
    }
}

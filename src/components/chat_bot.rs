//! Chat Widget Component
//!
//! Floating assistant panel. Bot replies render as Markdown; quick-reply
//! buttons navigate, send a follow-up message or open a link.

use leptos::prelude::*;
use leptos::task::spawn_local;

use picktogether_core::chat::{dispatch, ChatEffect, ChatMessage, ChatService, ChatTranscript, QuickReply, Sender};
use picktogether_core::route::Route;

use super::CircularProgress;
use crate::api::use_backend;
use crate::browser::open_url;
use crate::context::use_app_context;
use crate::markdown::parse_markdown;

#[component]
pub fn ChatBot() -> impl IntoView {
    let ctx = use_app_context();
    let backend = StoredValue::new(use_backend());
    let transcript = RwSignal::new(ChatTranscript::default());
    let (open, set_open) = signal(false);
    let (input, set_input) = signal(String::new());

    let submit = move |text: String| {
        let Some(message) = transcript.try_update(|t| t.begin_send(&text)).flatten() else {
            return;
        };
        let backend = backend.get_value();
        spawn_local(async move {
            let result = backend.send(&message).await;
            transcript.update(|t| t.finish(result));
        });
    };

    let on_quick_reply = move |reply: QuickReply| match dispatch(&reply.action) {
        ChatEffect::Navigate(route) => {
            set_open.set(false);
            ctx.navigate(route);
        }
        ChatEffect::Send(text) => submit(text),
        ChatEffect::OpenUrl(url) => open_url(&url),
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        submit(input.get_untracked());
        set_input.set(String::new());
    };

    view! {
        <div class="chat-widget">
            <Show when=move || open.get()>
                <div class="chat-panel">
                    <div class="chat-header">
                        <span>"PickTogether 도우미"</span>
                        <button class="chat-close" on:click=move |_| set_open.set(false)>"×"</button>
                    </div>
                    <div class="chat-messages">
                        <For
                            each=move || transcript.with(|t| t.messages().iter().cloned().enumerate().collect::<Vec<_>>())
                            key=|(index, _)| *index
                            children=move |(_, message)| view! {
                                <MessageBubble message=message on_quick_reply=on_quick_reply />
                            }
                        />
                        <Show when=move || transcript.with(|t| t.is_pending())>
                            <div class="chat-bubble bot typing">"..."</div>
                        </Show>
                    </div>
                    <form class="chat-input" on:submit=on_submit>
                        <input
                            type="text"
                            placeholder="메시지를 입력하세요"
                            prop:value=move || input.get()
                            on:input=move |ev| set_input.set(event_target_value(&ev))
                        />
                        <button type="submit" disabled=move || transcript.with(|t| t.is_pending())>"전송"</button>
                    </form>
                </div>
            </Show>
            <button class="chat-toggle" on:click=move |_| set_open.update(|o| *o = !*o)>"💬"</button>
        </div>
    }
}

#[component]
fn MessageBubble(
    message: ChatMessage,
    on_quick_reply: impl Fn(QuickReply) + Copy + 'static,
) -> impl IntoView {
    let ctx = use_app_context();
    let bubble = match message.sender {
        Sender::User => view! { <div class="chat-bubble user">{message.text.clone()}</div> }.into_any(),
        Sender::Bot => view! { <div class="chat-bubble bot" inner_html=parse_markdown(&message.text)></div> }.into_any(),
    };

    view! {
        {bubble}
        {(!message.restaurants.is_empty()).then(|| view! {
            <div class="chat-restaurants">
                {message.restaurants.iter().cloned().map(|r| {
                    let id = r.restaurant_id;
                    view! {
                        <div class="chat-restaurant" on:click=move |_| ctx.navigate(Route::Restaurant(id))>
                            {r.image_url.map(|src| view! { <img src=src alt="" /> })}
                            <div>
                                <strong>{r.name}</strong>
                                <span class="card-category">{r.category_name.unwrap_or_default()}</span>
                            </div>
                            {r.funding_percent.map(|p| view! { <CircularProgress percent=p size=36 stroke=4 /> })}
                        </div>
                    }
                }).collect_view()}
            </div>
        })}
        {(!message.buttons.is_empty()).then(|| view! {
            <div class="chat-quick-replies">
                {message.buttons.iter().cloned().map(|reply| {
                    let label = reply.label.clone();
                    view! {
                        <button class="quick-reply" on:click=move |_| on_quick_reply(reply.clone())>{label}</button>
                    }
                }).collect_view()}
            </div>
        })}
    }
}

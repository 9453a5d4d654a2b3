//! Rewards page: referral code, share link and reward entries.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::api::types::{RewardEntry, RewardSummary};
use crate::app::AppContext;
use crate::utils::{dom, format, url};

#[component]
pub fn Rewards() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let summary = RwSignal::new(RewardSummary::default());
    let entries = RwSignal::new(Vec::<RewardEntry>::new());
    let error = RwSignal::new(None::<String>);
    let copied = RwSignal::new(false);

    let loaded = StoredValue::new(false);
    Effect::new(move || {
        if loaded.get_value() {
            return;
        }
        loaded.set_value(true);
        spawn_local(async move {
            match api::fetch_reward_summary().await {
                Ok(fetched) => summary.set(fetched),
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                }
            }
            match api::fetch_rewards().await {
                Ok(fetched) => entries.set(fetched),
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    });

    let share_link = move || summary.with(|s| s.referral_code.as_deref().map(url::referral_link));
    let copy_link = move |_| {
        if let Some(link) = share_link() {
            dom::copy_to_clipboard(&link);
            copied.set(true);
        }
    };

    let reward_rows = move || {
        entries.with(|list| {
            list.iter()
                .map(|entry| {
                    view! {
                        <li>
                            <span class="kind">{entry.kind.clone()}</span>
                            <span class="amount">{format::group_thousands(&entry.amount)}</span>
                            <span class="note">{entry.note.clone().unwrap_or_default()}</span>
                            <span class="age">{format::date_iso(entry.created_at)}</span>
                        </li>
                    }
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <section class="rewards">
            <Show when=move || !ctx.auth.with(|a| a.signed_in)>
                <p class="hint">"Sign in to see your referral code and rewards."</p>
            </Show>
            <Show when=move || error.get().is_some()>
                <p class="form-error">{move || error.get()}</p>
            </Show>

            <div class="card referral-card">
                <h2>"Your referral"</h2>
                <p class="code">
                    {move || summary.with(|s| s.referral_code.clone().unwrap_or_else(|| "--".into()))}
                </p>
                <Show when=move || share_link().is_some()>
                    <p class="link">{share_link}</p>
                    <button on:click=copy_link>
                        {move || if copied.get() { "Copied" } else { "Copy link" }}
                    </button>
                </Show>
                <p>{move || format!("Referrals: {}", summary.with(|s| s.referral_count))}</p>
            </div>

            <div class="card totals-card">
                <h2>"Totals"</h2>
                <p>
                    {move || {
                        format!("Earned: {}", summary.with(|s| format::group_thousands(&s.total_earned)))
                    }}
                </p>
                <p>
                    {move || {
                        format!("Pending: {}", summary.with(|s| format::group_thousands(&s.pending)))
                    }}
                </p>
            </div>

            <div class="card">
                <h2>"Reward history"</h2>
                <Show
                    when=move || entries.with(|list| !list.is_empty())
                    fallback=|| view! { <p class="hint">"No rewards yet."</p> }
                >
                    <ul class="reward-list">{reward_rows}</ul>
                </Show>
            </div>
        </section>
    }
}

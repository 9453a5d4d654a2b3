//! Convert page: price-conversion widget with a debounced quote.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::api::types::{QuoteRequest, QuoteResponse};
use crate::config;
use crate::utils::format;

/// Symbols offered by the pair selectors.
const SYMBOLS: [&str; 4] = ["BNB", "USDT", "BTC", "ETH"];

#[component]
pub fn Convert() -> impl IntoView {
    let amount = RwSignal::new(String::new());
    let from = RwSignal::new(SYMBOLS[0].to_string());
    let to = RwSignal::new(SYMBOLS[1].to_string());
    let quote = RwSignal::new(None::<QuoteResponse>);
    let error = RwSignal::new(None::<String>);

    // One pending debounce timer at a time; replacing it cancels the
    // previous one on drop.
    let debounce = StoredValue::new_local(None::<gloo_timers::callback::Timeout>);

    let request_quote = move || {
        let value = amount.get_untracked().trim().to_string();
        if !format::is_valid_amount(&value) {
            quote.set(None);
            return;
        }
        let request = QuoteRequest {
            from: from.get_untracked(),
            to: to.get_untracked(),
            amount: value,
        };
        spawn_local(async move {
            match api::fetch_quote(&request).await {
                Ok(fetched) => {
                    error.set(None);
                    quote.set(Some(fetched));
                }
                Err(err) => {
                    quote.set(None);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    let schedule_quote = move || {
        debounce.set_value(Some(gloo_timers::callback::Timeout::new(
            config::QUOTE_DEBOUNCE_MS,
            request_quote,
        )));
    };

    let symbol_options = |selected: RwSignal<String>| {
        SYMBOLS
            .into_iter()
            .map(|symbol| {
                view! {
                    <option value=symbol selected=move || selected.get() == symbol>
                        {symbol}
                    </option>
                }
            })
            .collect::<Vec<_>>()
    };

    view! {
        <section class="convert">
            <div class="card">
                <h2>"Convert"</h2>
                <input
                    type="text"
                    placeholder="amount"
                    prop:value=move || amount.get()
                    on:input=move |ev| {
                        amount.set(event_target_value(&ev));
                        schedule_quote();
                    }
                />
                <select on:change=move |ev| {
                    from.set(event_target_value(&ev));
                    schedule_quote();
                }>{symbol_options(from)}</select>
                <span class="arrow">"to"</span>
                <select on:change=move |ev| {
                    to.set(event_target_value(&ev));
                    schedule_quote();
                }>{symbol_options(to)}</select>

                <Show when=move || quote.get().is_some()>
                    <p class="result">
                        {move || {
                            quote
                                .get()
                                .map(|q| {
                                    format!(
                                        "{} {} = {:.6} {} (rate {:.6})",
                                        amount.get(),
                                        from.get(),
                                        q.converted,
                                        to.get(),
                                        q.rate,
                                    )
                                })
                        }}
                    </p>
                </Show>
                <Show when=move || error.get().is_some()>
                    <p class="form-error">{move || error.get()}</p>
                </Show>
            </div>
        </section>
    }
}

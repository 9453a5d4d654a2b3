//! History page: paged transaction list with explorer links.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::api::types::{HistoryPage, TransactionRecord};
use crate::app::AppContext;
use crate::config;
use crate::utils::{format, url};

/// Seconds since the Unix epoch, from the browser clock.
fn now_secs() -> u64 {
    (js_sys::Date::now() / 1000.0) as u64
}

#[component]
pub fn History() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let page = RwSignal::new(1u32);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let listing = RwSignal::new(HistoryPage::default());

    // Refetch whenever the page number changes (including on mount).
    Effect::new(move || {
        let current = page.get();
        loading.set(true);
        spawn_local(async move {
            match api::fetch_history(current).await {
                Ok(fetched) => {
                    error.set(None);
                    listing.set(fetched);
                }
                Err(err) => error.set(Some(err.to_string())),
            }
            loading.set(false);
        });
    });

    let page_count = move || {
        let total = listing.with(|l| l.total);
        (total.div_ceil(u64::from(config::HISTORY_PAGE_SIZE)) as u32).max(1)
    };

    let rows = move || {
        let account = ctx.wallet.with(|w| w.account.clone()).unwrap_or_default();
        let now = now_secs();
        listing.with(move |l| {
            l.transactions
                .iter()
                .map(move |tx| transaction_row(tx, &account, now))
                .collect::<Vec<_>>()
        })
    };

    view! {
        <section class="history">
            <h2>"Transactions"</h2>
            <Show when=move || error.get().is_some()>
                <p class="form-error">{move || error.get()}</p>
            </Show>
            <Show
                when=move || listing.with(|l| !l.transactions.is_empty())
                fallback=move || {
                    view! {
                        <p class="hint">
                            {move || if loading.get() { "Loading..." } else { "No transactions yet." }}
                        </p>
                    }
                }
            >
                <table>
                    <thead>
                        <tr>
                            <th>"Tx"</th>
                            <th>"Direction"</th>
                            <th>"Amount"</th>
                            <th>"Age"</th>
                            <th>"Status"</th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
            </Show>
            <div class="pager">
                <button
                    disabled=move || page.get() <= 1 || loading.get()
                    on:click=move |_| page.update(|p| *p -= 1)
                >
                    "Previous"
                </button>
                <span>{move || format!("{} / {}", page.get(), page_count())}</span>
                <button
                    disabled=move || page.get() >= page_count() || loading.get()
                    on:click=move |_| page.update(|p| *p += 1)
                >
                    "Next"
                </button>
            </div>
        </section>
    }
}

fn transaction_row(tx: &TransactionRecord, account: &str, now: u64) -> impl IntoView + use<> {
    let direction = if tx.is_outgoing(account) { "sent" } else { "received" };
    let counterparty = if tx.is_outgoing(account) { tx.to.clone() } else { tx.from.clone() };
    view! {
        <tr>
            <td>
                <a href=url::explorer_tx_url(&tx.hash) target="_blank">
                    {format::short_address(&tx.hash)}
                </a>
            </td>
            <td title=format::short_address(&counterparty)>{direction}</td>
            <td>{format!("{} {}", tx.amount, crate::config::TARGET_CHAIN.currency_symbol)}</td>
            <td>{format::relative_age(tx.timestamp, now)}</td>
            <td>{tx.status.clone()}</td>
        </tr>
    }
}

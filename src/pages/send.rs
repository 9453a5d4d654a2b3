//! Send page: coin transfer form.

use alloy_primitives::Address;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::api::types::TransferRequest;
use crate::app::AppContext;
use crate::config::TARGET_CHAIN;
use crate::utils::{format, url};

#[component]
pub fn Send() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let recipient = RwSignal::new(String::new());
    let amount = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let tx_hash = RwSignal::new(None::<String>);

    // Checksummed form, so the backend always receives EIP-55 casing.
    let parsed_recipient =
        move || recipient.get().trim().parse::<Address>().map(|a| a.to_checksum(None));

    let submit = move |_| {
        let to = match parsed_recipient() {
            Ok(to) => to,
            Err(_) => {
                error.set(Some("Recipient is not a valid address.".to_string()));
                return;
            }
        };
        let value = amount.get_untracked().trim().to_string();
        if !format::is_valid_amount(&value) {
            error.set(Some("Enter a positive amount.".to_string()));
            return;
        }

        busy.set(true);
        error.set(None);
        tx_hash.set(None);
        spawn_local(async move {
            match api::submit_transfer(&TransferRequest { to, amount: value }).await {
                Ok(response) => tx_hash.set(Some(response.tx_hash)),
                Err(err) => error.set(Some(err.to_string())),
            }
            busy.set(false);
        });
    };

    let recipient_invalid =
        move || !recipient.get().trim().is_empty() && parsed_recipient().is_err();

    view! {
        <section class="send">
            <div class="card">
                <h2>{format!("Send {}", TARGET_CHAIN.currency_symbol)}</h2>
                <Show when=move || !ctx.wallet.with(|w| w.connected)>
                    <p class="hint">"Connect a wallet to send funds."</p>
                </Show>
                <label>
                    "Recipient"
                    <input
                        type="text"
                        placeholder="0x..."
                        class:invalid=recipient_invalid
                        prop:value=move || recipient.get()
                        on:input=move |ev| recipient.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Amount"
                    <input
                        type="text"
                        placeholder="0.0"
                        prop:value=move || amount.get()
                        on:input=move |ev| amount.set(event_target_value(&ev))
                    />
                </label>
                <button
                    disabled=move || busy.get() || !ctx.wallet.with(|w| w.connected)
                    on:click=submit
                >
                    {move || if busy.get() { "Sending..." } else { "Send" }}
                </button>

                <Show when=move || error.get().is_some()>
                    <p class="form-error">{move || error.get()}</p>
                </Show>
                <Show when=move || tx_hash.get().is_some()>
                    <p class="success">
                        "Submitted: "
                        <a
                            href=move || tx_hash.get().map(|h| url::explorer_tx_url(&h))
                            target="_blank"
                        >
                            {move || tx_hash.get().map(|h| format::short_address(&h))}
                        </a>
                    </p>
                </Show>
            </div>
        </section>
    }
}

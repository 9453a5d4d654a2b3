//! Sign-in page: passkey sign-in/sign-up and wallet-signature sign-in.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::core::error::AuthError;
use crate::core::provider;
use crate::core::session::LocalStore;
use crate::core::{auth, webauthn};

#[component]
pub fn Login() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let username = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let finish = move |result: Result<(), AuthError>| {
        busy.set(false);
        match result {
            Ok(()) => {
                error.set(None);
                ctx.auth.set(auth::load_auth_state(&LocalStore));
            }
            Err(err) => error.set(Some(err.to_string())),
        }
    };

    let passkey_login = move |_| {
        let name = username.get_untracked().trim().to_string();
        if name.is_empty() {
            error.set(Some("Enter a username first.".to_string()));
            return;
        }
        busy.set(true);
        spawn_local(async move {
            finish(auth::login_with_passkey(&LocalStore, &name).await.map(|_| ()));
        });
    };

    let passkey_register = move |_| {
        let name = username.get_untracked().trim().to_string();
        if name.is_empty() {
            error.set(Some("Pick a username first.".to_string()));
            return;
        }
        busy.set(true);
        spawn_local(async move {
            finish(auth::register_with_passkey(&LocalStore, &name).await.map(|_| ()));
        });
    };

    let wallet_login = move |_| {
        let Some(account) = ctx.wallet.with_untracked(|w| w.account.clone()) else {
            error.set(Some("Connect a wallet before signing in with it.".to_string()));
            return;
        };
        let Some(provider) = provider::get_provider() else {
            error.set(Some("No wallet provider available.".to_string()));
            return;
        };
        busy.set(true);
        spawn_local(async move {
            finish(auth::login_with_wallet(&provider, &LocalStore, &account).await.map(|_| ()));
        });
    };

    let sign_out = move |_| {
        ctx.sign_out();
        username.set(String::new());
    };

    view! {
        <section class="login">
            <Show
                when=move || ctx.auth.with(|a| a.signed_in)
                fallback=move || {
                    view! {
                        <div class="card">
                            <h2>"Sign in with a passkey"</h2>
                            <Show when=|| !webauthn::is_supported()>
                                <p class="hint">{AuthError::NotSupported.to_string()}</p>
                            </Show>
                            <input
                                type="text"
                                placeholder="username"
                                prop:value=move || username.get()
                                on:input=move |ev| username.set(event_target_value(&ev))
                            />
                            <button disabled=move || busy.get() on:click=passkey_login>
                                "Sign in"
                            </button>
                            <button disabled=move || busy.get() on:click=passkey_register>
                                "Create account"
                            </button>
                        </div>
                        <div class="card">
                            <h2>"Sign in with your wallet"</h2>
                            <p class="hint">"Signs a one-time message; no transaction, no fee."</p>
                            <button disabled=move || busy.get() on:click=wallet_login>
                                "Sign in with wallet"
                            </button>
                        </div>
                        <Show when=move || error.get().is_some()>
                            <p class="form-error">{move || error.get()}</p>
                        </Show>
                    }
                }
            >
                <div class="card">
                    <h2>{move || format!("Signed in as {}", ctx.auth.get().display_name())}</h2>
                    <button on:click=sign_out>"Sign out"</button>
                </div>
            </Show>
        </section>
    }
}

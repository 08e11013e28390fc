use exercises::echo::{self, EchoState};
use exercises::web::AlertNotifier;
use kobold::prelude::*;
use log::debug;
use wasm_bindgen::UnwrapThrowExt;
use web_sys::HtmlInputElement;

#[component]
fn Exercise() -> impl View {
    stateful(EchoState::default, |state| {
        let onclick = state.bind(|_, _| {
            echo::show_alert(&AlertNotifier);
            Then::Stop
        });

        // Writes through the `&mut` the hook hands out, the hook renders once we return.
        let oninput = state.bind(|state, event: Event<HtmlInputElement>| {
            echo::get_input(state, &*event.target()).unwrap_throw();
            Then::Render
        });

        view! {
            <div #exercise>
                <button {onclick}>"Show Alert"</button>
                <input type="text" {oninput} />
                <p>{ state.value.as_str() }</p>
        }
    })
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());

    debug!("mounting input echo");

    kobold::start(view! {
        <Exercise />
    });
}

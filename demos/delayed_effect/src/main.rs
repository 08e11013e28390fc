use std::rc::Rc;

use exercises::effect::{EffectState, EffectToggle};
use exercises::web::GlooScheduler;
use kobold::prelude::*;
use log::debug;
use wasm_bindgen::UnwrapThrowExt;

#[component]
fn Exercise(effect: Rc<EffectToggle<GlooScheduler>>) -> impl View + 'static {
    let mirror = effect.clone();

    stateful(EffectState::default, move |state| {
        let effect = effect.clone();
        let onclick = state.bind(move |_, _| {
            effect.start_effect();
            Then::Stop
        });

        view! {
            <div #exercise>
                <button {onclick}>"Start Effect"</button>
                <div #effect class={state.effect_classes()}></div>
                <div .{state.class_a} .{state.class_b}>"Static classes"</div>
        }
    })
    .once(move |signal| {
        // Deferred toggles land in the store, this copies them into the view.
        mirror
            .store()
            .subscribe(move |state| signal.set(*state))
            .unwrap_throw();
    })
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());

    let effect = Rc::new(EffectToggle::new(GlooScheduler));

    debug!("mounting delayed effect, delay {:?}", effect.delay());

    kobold::start(view! {
        <Exercise {effect} />
    });
}

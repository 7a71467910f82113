use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::map_view::MapView;
use crate::components::pokedex_view::PokedexView;
use crate::error::ViewerError;
use crate::model::Dataset;
use crate::state::DatasetStore;
use crate::state::dataset::{HttpFetcher, StoreHandle};
use crate::util::cerr;

#[derive(Clone, Copy, PartialEq, Eq)]
enum View {
    Map,
    Pokedex,
}

#[function_component(App)]
pub fn app() -> Html {
    let store = use_state(|| StoreHandle(Rc::new(DatasetStore::new(Rc::new(HttpFetcher)))));
    let dataset = use_state(|| None::<Rc<Dataset>>);
    let error = use_state(|| None::<ViewerError>);
    let view = use_state(|| View::Map);

    {
        let store = (*store).clone();
        let dataset = dataset.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                match store.0.get().await {
                    Ok(data) => dataset.set(Some(data)),
                    Err(e) => {
                        cerr(&format!("dataset load failed: {e}"));
                        error.set(Some(e));
                    }
                }
            });
            || ()
        });
    }

    let select_view = |target: View| {
        let view = view.clone();
        Callback::from(move |_: MouseEvent| view.set(target))
    };

    let body = match (&*dataset, &*error) {
        (Some(data), _) => {
            // Both views stay mounted; hiding instead of unmounting keeps
            // the map session alive across tab switches.
            let visible = |v: View| if *view == v { "" } else { "display:none;" };
            html! {
                <>
                    <div style={visible(View::Map)}>
                        <MapView store={(*store).clone()} dataset={data.clone()} />
                    </div>
                    <div style={visible(View::Pokedex)}>
                        <PokedexView dataset={data.clone()} />
                    </div>
                </>
            }
        }
        (None, Some(e)) => html! {
            <p style="padding:12px; color:#f85149;">{ format!("Failed to load the dataset: {e}") }</p>
        },
        (None, None) => html! { <p style="padding:12px;">{"Loading the dataset..."}</p> },
    };

    html! {
        <div style="min-height:100vh; background:#0d1117; color:#c9d1d9; font-family:sans-serif;">
            <div style="display:flex; gap:8px; padding:8px 12px; border-bottom:1px solid #30363d;">
                <button disabled={*view == View::Map} onclick={select_view(View::Map)}>
                    {"World map"}
                </button>
                <button disabled={*view == View::Pokedex} onclick={select_view(View::Pokedex)}>
                    {"Pokédex"}
                </button>
            </div>
            { body }
        </div>
    }
}

use yew::prelude::*;

use crate::model::Dataset;
use crate::util::asset_url;

#[derive(Properties, PartialEq, Clone)]
pub struct PkmnBoxProps {
    pub dex_id: u8,
    pub name: AttrValue,
    pub sprite_url: AttrValue,
    /// Extra line under the name (e.g. "Level 12", a stone name).
    #[prop_or_default]
    pub caption: Option<AttrValue>,
    #[prop_or_default]
    pub on_select: Option<Callback<u8>>,
}

/// Small creature card: front sprite plus `#id NAME`, reused by the
/// Pokédex grid, evolution lists and map tooltips.
#[function_component(PkmnBox)]
pub fn pkmn_box(props: &PkmnBoxProps) -> Html {
    let onclick = props.on_select.as_ref().map(|cb| {
        let cb = cb.clone();
        let dex_id = props.dex_id;
        Callback::from(move |_: MouseEvent| cb.emit(dex_id))
    });
    let cursor = if onclick.is_some() {
        "cursor:pointer;"
    } else {
        ""
    };
    html! {
        <div
            style={format!("display:inline-block; text-align:center; padding:4px; margin:2px; background:#161b22; border:1px solid #30363d; border-radius:6px; {cursor}")}
            onclick={onclick}
        >
            <img src={props.sprite_url.clone()} alt={props.name.clone()} />
            <p style="margin:2px 0; font-size:12px;">{ format!("#{} {}", props.dex_id, props.name) }</p>
            {
                if let Some(caption) = &props.caption {
                    html! { <p style="margin:0; font-size:11px; opacity:0.8;">{ caption.clone() }</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

/// Resolve a dex id against the dataset and render its box; an invalid id
/// renders the lookup failure instead of reading out of range.
pub fn pkmn_box_for(
    data: &Dataset,
    dex_id: u8,
    caption: Option<String>,
    on_select: Option<Callback<u8>>,
) -> Html {
    match data.pokemon(dex_id) {
        Ok(pkmn) => html! {
            <PkmnBox
                dex_id={dex_id}
                name={AttrValue::from(pkmn.name.clone())}
                sprite_url={AttrValue::from(asset_url(&pkmn.sprite_front_path))}
                caption={caption.map(AttrValue::from)}
                on_select={on_select}
            />
        },
        Err(e) => html! { <p style="color:#f85149;">{ e.to_string() }</p> },
    }
}

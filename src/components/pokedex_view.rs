use std::rc::Rc;

use yew::prelude::*;

use crate::components::pkmn_box::pkmn_box_for;
use crate::model::{Dataset, Evolution, PokemonRecord};
use crate::util::asset_url;

#[derive(Properties, PartialEq, Clone)]
pub struct PokedexViewProps {
    pub dataset: Rc<Dataset>,
}

/// Pokédex browser: a grid of every creature next to a detail panel for
/// the selected one. Evolution boxes re-select on click.
#[function_component(PokedexView)]
pub fn pokedex_view(props: &PokedexViewProps) -> Html {
    let selected = use_state(|| 1u8);
    let on_select = {
        let selected = selected.clone();
        Callback::from(move |dex_id: u8| selected.set(dex_id))
    };

    let grid = (1..=props.dataset.pokedex.len() as u8).map(|dex_id| {
        pkmn_box_for(&props.dataset, dex_id, None, Some(on_select.clone()))
    });

    html! {
        <div style="display:flex; gap:16px; align-items:flex-start; padding:8px;">
            <div style="flex:1; display:flex; flex-wrap:wrap; align-content:flex-start; max-height:85vh; overflow-y:auto;">
                { for grid }
            </div>
            <div style="width:420px; max-height:85vh; overflow-y:auto;">
                { detail_html(&props.dataset, *selected, &on_select) }
            </div>
        </div>
    }
}

fn detail_html(data: &Dataset, dex_id: u8, on_select: &Callback<u8>) -> Html {
    let pkmn = match data.pokemon(dex_id) {
        Ok(pkmn) => pkmn,
        Err(e) => return html! { <p style="color:#f85149;">{ e.to_string() }</p> },
    };
    html! {
        <div style="background:#161b22; border:1px solid #30363d; border-radius:8px; padding:12px;">
            <h1 style="margin:0 0 4px 0; font-size:18px;">
                { format!("#{dex_id} {}", pkmn.name) }
            </h1>
            <div>
                <img src={asset_url(&pkmn.sprite_front_path)} alt={pkmn.name.clone()} />
                <img src={asset_url(&pkmn.sprite_back_path)} alt={format!("{} (back)", pkmn.name)} />
            </div>
            <p style="margin:4px 0;">
                <b>{ pkmn.species_name.clone() }</b>
                { format!(" ({})", pkmn.types.join(", ")) }
            </p>
            <p style="margin:4px 0; font-size:13px;">
                { format!("Height {} / Weight {} / Growth {}", pkmn.height, pkmn.weight, pkmn.growth_rate) }
            </p>
            <p style="margin:4px 0; font-size:13px; white-space:pre-line; opacity:0.9;">
                { pkmn.desc.clone() }
            </p>
            { stats_html(pkmn) }
            { evolutions_html(data, pkmn, on_select) }
            { attacks_html(pkmn) }
            { tmhm_html(pkmn) }
        </div>
    }
}

fn stats_html(pkmn: &PokemonRecord) -> Html {
    let rows = [
        ("HP", pkmn.hp),
        ("Attack", pkmn.atk),
        ("Defense", pkmn.def),
        ("Speed", pkmn.spd),
        ("Special", pkmn.spe),
        ("Capture rate", pkmn.cap),
        ("Base exp.", pkmn.exp),
    ];
    html! {
        <table style="border-collapse:collapse; font-size:13px; margin:6px 0;">
            {
                for rows.iter().map(|(label, value)| html! {
                    <tr>
                        <td style="padding:1px 12px 1px 0; opacity:0.8;">{ *label }</td>
                        <td style="text-align:right;">{ value.to_string() }</td>
                    </tr>
                })
            }
        </table>
    }
}

fn evolutions_html(data: &Dataset, pkmn: &PokemonRecord, on_select: &Callback<u8>) -> Html {
    if pkmn.evolutions.is_empty() {
        return html! {};
    }
    html! {
        <div style="margin:6px 0;">
            <div style="font-weight:600; font-size:13px;">{"Evolutions"}</div>
            <div style="display:flex; flex-wrap:wrap;">
                {
                    for pkmn.evolutions.iter().map(|evo| {
                        let (target, caption) = match evo {
                            Evolution::Level { pkmn_id, level } => {
                                (*pkmn_id, format!("Level {level}"))
                            }
                            Evolution::Stone { pkmn_id, stone } => (*pkmn_id, stone.clone()),
                            Evolution::Exchange { pkmn_id } => (*pkmn_id, "Exchange".to_string()),
                        };
                        pkmn_box_for(data, target, Some(caption), Some(on_select.clone()))
                    })
                }
            </div>
        </div>
    }
}

fn attacks_html(pkmn: &PokemonRecord) -> Html {
    if pkmn.attacks.is_empty() {
        return html! {};
    }
    html! {
        <div style="margin:6px 0;">
            <div style="font-weight:600; font-size:13px;">{"Attacks"}</div>
            <table style="border-collapse:collapse; font-size:13px;">
                {
                    for pkmn.attacks.iter().map(|(level, name)| html! {
                        <tr>
                            <td style="padding:1px 12px 1px 0; opacity:0.8;">
                                {
                                    if *level == 0 {
                                        html! { <i>{"Native"}</i> }
                                    } else {
                                        html! { { format!("Level {level}") } }
                                    }
                                }
                            </td>
                            <td>{ name.clone() }</td>
                        </tr>
                    })
                }
            </table>
        </div>
    }
}

fn tmhm_html(pkmn: &PokemonRecord) -> Html {
    if pkmn.tmhm.is_empty() {
        return html! {};
    }
    html! {
        <div style="margin:6px 0;">
            <div style="font-weight:600; font-size:13px;">{"TM / HM"}</div>
            <table style="border-collapse:collapse; font-size:13px;">
                {
                    for pkmn.tmhm.iter().map(|(name, machine)| html! {
                        <tr>
                            <td style="padding:1px 12px 1px 0; opacity:0.8;">{ machine.clone() }</td>
                            <td>{ name.clone() }</td>
                        </tr>
                    })
                }
            </table>
        </div>
    }
}

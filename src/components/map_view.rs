use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::pkmn_box::pkmn_box_for;
use crate::model::{Dataset, OVERWORLD_MAP_ID, WildLocation};
use crate::state::MapSession;
use crate::state::dataset::StoreHandle;
use crate::state::hotspots::{Hotspot, TooltipAt, TooltipBody};
use crate::state::session::MapScene;
use crate::util::{asset_url, cerr, clog};

#[derive(Properties, PartialEq, Clone)]
pub struct MapViewProps {
    pub store: StoreHandle,
    pub dataset: Rc<Dataset>,
}

fn cursor_of(e: &MouseEvent) -> (f64, f64) {
    (f64::from(e.client_x()), f64::from(e.client_y()))
}

/// Scrollable world map: a panned composite (or single-map) picture with
/// one hover region and one tooltip per point of interest.
#[function_component(MapView)]
pub fn map_view(props: &MapViewProps) -> Html {
    let session = use_mut_ref(MapSession::new);
    let scene = use_state(|| None::<MapScene>);
    let hotspots = use_state(Vec::<Hotspot>::new);
    let tooltip = use_state(|| None::<TooltipAt>);
    let margins = use_state(|| (0.0f64, 0.0f64));

    // Every load goes through the store; the cached dataset makes the
    // await immediate after the first one, and the synchronous tail means
    // rapid double-clicks settle on the last writer.
    let request_load: Rc<dyn Fn(u8, u8, u8)> = {
        let store = props.store.0.clone();
        let session = session.clone();
        let scene = scene.clone();
        let hotspots = hotspots.clone();
        let tooltip = tooltip.clone();
        let margins = margins.clone();
        Rc::new(move |cur_id: u8, map_id: u8, warp_id: u8| {
            let store = store.clone();
            let session = session.clone();
            let scene = scene.clone();
            let hotspots = hotspots.clone();
            let tooltip = tooltip.clone();
            let margins = margins.clone();
            spawn_local(async move {
                let data = match store.get().await {
                    Ok(data) => data,
                    Err(e) => {
                        cerr(&format!("map load aborted: {e}"));
                        return;
                    }
                };
                let mut s = session.borrow_mut();
                match s.load_map(&data, cur_id, map_id, warp_id) {
                    Ok(loaded) => {
                        clog(&format!(
                            "loaded map 0x{:02x} ({} hotspots)",
                            loaded.map_id,
                            s.registry.hotspots().len()
                        ));
                        margins.set(loaded.offset);
                        hotspots.set(s.registry.hotspots().to_vec());
                        tooltip.set(None);
                        scene.set(Some(loaded));
                    }
                    // Keep the previous view on failure; the error is only
                    // reported, never retried.
                    Err(e) => cerr(&format!("map load failed: {e}")),
                }
            });
        })
    };

    {
        let request_load = request_load.clone();
        use_effect_with((), move |_| {
            request_load(0, OVERWORLD_MAP_ID, 0);
            || ()
        });
    }

    let on_mouse_down = {
        let session = session.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            session.borrow_mut().pan.press_start(cursor_of(&e));
        })
    };
    let on_mouse_move = {
        let session = session.clone();
        let margins = margins.clone();
        Callback::from(move |e: MouseEvent| {
            if let Some(offset) = session.borrow_mut().pan.drag_to(cursor_of(&e)) {
                margins.set(offset);
            }
        })
    };
    let commit_pan = {
        let session = session.clone();
        let margins = margins.clone();
        move |e: MouseEvent| {
            if let Some(offset) = session.borrow_mut().pan.release(cursor_of(&e)) {
                margins.set(offset);
            }
        }
    };
    let on_mouse_up = Callback::from(commit_pan.clone());
    // Leaving mid-drag commits with the same formula as a release.
    let on_mouse_leave = Callback::from(commit_pan);

    let Some(current) = (*scene).clone() else {
        return html! { <p style="padding:12px;">{"Loading the world map..."}</p> };
    };
    let (mx, my) = *margins;

    let regions = hotspots.iter().map(|hs| {
        let id = hs.id;
        let onmouseenter = {
            let session = session.clone();
            let tooltip = tooltip.clone();
            Callback::from(move |e: MouseEvent| {
                tooltip.set(session.borrow_mut().registry.show(id, cursor_of(&e)));
            })
        };
        let onmouseleave = {
            let session = session.clone();
            let tooltip = tooltip.clone();
            Callback::from(move |_: MouseEvent| {
                let mut s = session.borrow_mut();
                s.registry.hide(id);
                tooltip.set(s.registry.visible());
            })
        };
        let onclick = hs.warp.map(|warp| {
            let request_load = request_load.clone();
            Callback::from(move |_: MouseEvent| {
                request_load(warp.from_map, warp.to_map, warp.to_warp);
            })
        });
        let cursor = if hs.warp.is_some() { "pointer" } else { "default" };
        html! {
            <div
                key={id}
                style={format!(
                    "position:absolute; left:{}px; top:{}px; width:{}px; height:{}px; cursor:{};",
                    hs.bounds.x, hs.bounds.y, hs.bounds.w, hs.bounds.h, cursor
                )}
                {onmouseenter}
                {onmouseleave}
                {onclick}
            ></div>
        }
    });

    let tooltips = hotspots.iter().map(|hs| {
        let at = tooltip.filter(|t| t.id == hs.id);
        let style = match at {
            Some(t) => format!(
                "display:block; position:fixed; left:{}px; top:{}px; z-index:10; \
                 background:rgba(22,27,34,0.95); border:1px solid #30363d; border-radius:6px; \
                 padding:6px 8px; max-width:280px; pointer-events:none;",
                t.x, t.y
            ),
            None => "display:none;".to_string(),
        };
        html! {
            <div key={hs.id} style={style}>
                { tooltip_html(&hs.tooltip, &props.dataset) }
            </div>
        }
    });

    let map_label = if current.map_id == OVERWORLD_MAP_ID {
        "Overworld".to_string()
    } else {
        format!("Map 0x{:02x}", current.map_id)
    };

    html! {
        <div>
            <div style="padding:4px 12px; font-size:13px; opacity:0.8;">{ map_label }</div>
            <div style="display:flex; gap:12px; align-items:flex-start;">
                <div
                    style="position:relative; overflow:hidden; flex:1; height:82vh; display:flex; justify-content:center; align-items:center; background:#0e1116;"
                    onmousedown={on_mouse_down}
                    onmousemove={on_mouse_move}
                    onmouseup={on_mouse_up}
                    onmouseleave={on_mouse_leave}
                >
                    <div style={format!("position:relative; margin-left:{mx}px; margin-top:{my}px;")}>
                        <img
                            src={asset_url(&current.pic_path)}
                            style="display:block; image-rendering:pixelated;"
                            draggable="false"
                            alt="world map"
                        />
                        { for regions }
                    </div>
                </div>
                { wild_panel(&props.dataset, current.map_id) }
            </div>
            { for tooltips }
        </div>
    }
}

fn tooltip_html(body: &TooltipBody, data: &Dataset) -> Html {
    match body {
        TooltipBody::Warp { to_map, to_warp } => {
            html! { <p style="margin:0;">{ format!("To map 0x{to_map:x} at warp {to_warp}") }</p> }
        }
        TooltipBody::Sign { text } | TooltipBody::Npc { text } => {
            html! { <p style="margin:0; white-space:pre-line;">{ text.clone() }</p> }
        }
        TooltipBody::Trainer {
            name,
            sprite_path,
            payout,
            team,
        } => html! {
            <div>
                <h1 style="margin:0; font-size:14px;">{ name.clone() }</h1>
                <img src={asset_url(sprite_path)} alt={name.clone()} />
                <p style="margin:2px 0;"><b>{"Money:"}</b>{ format!(" ${payout}") }</p>
                <div style="display:flex; flex-wrap:wrap;">
                    {
                        for team.iter().map(|member| pkmn_box_for(
                            data,
                            member.dex_id,
                            Some(format!("Level {}", member.level)),
                            None,
                        ))
                    }
                </div>
            </div>
        },
        TooltipBody::Encounter { dex_id, level } => {
            pkmn_box_for(data, *dex_id, Some(format!("Level {level}")), None)
        }
        TooltipBody::Item { name, text } => match text {
            Some(text) => html! { <p style="margin:0; white-space:pre-line;">{ text.clone() }</p> },
            None => html! { <p style="margin:0;"><b>{"Item"}</b>{ format!(": {name}") }</p> },
        },
        TooltipBody::Hidden { content } => match content {
            Some(content) => {
                html! { <p style="margin:0;"><b>{"Hidden item:"}</b>{ format!(" {content}") }</p> }
            }
            None => html! { <p style="margin:0;">{"<Special>"}</p> },
        },
    }
}

/// Wild encounter tables for the displayed map (single-map view only).
fn wild_panel(data: &Dataset, map_id: u8) -> Html {
    if map_id == OVERWORLD_MAP_ID {
        return html! {};
    }
    let Ok(map) = data.map(map_id) else {
        return html! {};
    };
    let wild = &map.wild_pkmn;
    if wild.grass.is_none() && wild.water.is_none() {
        return html! {};
    }
    html! {
        <div style="min-width:220px; background:#161b22; border:1px solid #30363d; border-radius:8px; padding:8px; font-size:12px;">
            <div style="font-weight:600; margin-bottom:6px;">{"Wild encounters"}</div>
            { wild_location(data, "Grass", wild.grass.as_ref()) }
            { wild_location(data, "Water", wild.water.as_ref()) }
        </div>
    }
}

fn wild_location(data: &Dataset, label: &str, location: Option<&WildLocation>) -> Html {
    let Some(location) = location else {
        return html! {};
    };
    html! {
        <div style="margin-bottom:6px;">
            <div style="opacity:0.8;">{ format!("{label} (rate {})", location.rate) }</div>
            {
                for location.pokemons.iter().map(|wild| {
                    let name = data
                        .pokemon(wild.dex_id)
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|e| e.to_string());
                    let percent = f64::from(wild.proba) / 255.0 * 100.0;
                    html! {
                        <div>{ format!("Lv.{} {} ({percent:.0}%)", wild.level, name) }</div>
                    }
                })
            }
        </div>
    }
}

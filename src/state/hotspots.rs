//! Interactive overlay regions and their paired tooltips.
//!
//! For every point of interest on a rendered map the registry builds one
//! hotspot (a tile-sized rectangle in map-image space) and one resolved
//! tooltip body. Ids restart at 0 on `clear` and grow monotonically in the
//! fixed order warps, signs, entities, hiddens, continuing across maps when
//! the composite overworld is rendered.

use crate::error::ViewerError;
use crate::model::{Dataset, EntityData, MapRecord, TeamMember};
use crate::state::coords::{PixelRect, hotspot_bounds};

/// Distance between the pointer and the tooltip's top-left corner.
pub const TOOLTIP_CURSOR_GAP: f64 = 10.0;

/// Destination of a clickable warp region. `from_map` is the map owning
/// the warp; it becomes the `cur_id` of the triggered load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WarpTarget {
    pub from_map: u8,
    pub to_map: u8,
    pub to_warp: u8,
}

/// Tooltip content, fully resolved at registration time so rendering
/// cannot hit a missing index.
#[derive(Clone, Debug, PartialEq)]
pub enum TooltipBody {
    Warp {
        to_map: u8,
        to_warp: u8,
    },
    Sign {
        text: String,
    },
    Npc {
        text: String,
    },
    Trainer {
        name: String,
        sprite_path: String,
        payout: u32,
        team: Vec<TeamMember>,
    },
    Encounter {
        dex_id: u8,
        level: u8,
    },
    Item {
        name: String,
        text: Option<String>,
    },
    Hidden {
        content: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hotspot {
    pub id: usize,
    pub bounds: PixelRect,
    /// Present on warp regions only; makes the region clickable.
    pub warp: Option<WarpTarget>,
    pub tooltip: TooltipBody,
}

/// A tooltip currently shown, positioned at the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipAt {
    pub id: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HotspotRegistry {
    hotspots: Vec<Hotspot>,
    visible: Option<TooltipAt>,
}

impl HotspotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    pub fn visible(&self) -> Option<TooltipAt> {
        self.visible
    }

    /// Drop every region and tooltip; the next id is 0 again.
    pub fn clear(&mut self) {
        self.hotspots.clear();
        self.visible = None;
    }

    /// Show the tooltip paired with `id` at `cursor + TOOLTIP_CURSOR_GAP`.
    /// Unknown ids are ignored (a leave may race a rebuild).
    pub fn show(&mut self, id: usize, cursor: (f64, f64)) -> Option<TooltipAt> {
        if id >= self.hotspots.len() {
            return None;
        }
        let at = TooltipAt {
            id,
            x: cursor.0 + TOOLTIP_CURSOR_GAP,
            y: cursor.1 + TOOLTIP_CURSOR_GAP,
        };
        self.visible = Some(at);
        Some(at)
    }

    /// Hide the tooltip paired with `id` if it is the one showing.
    pub fn hide(&mut self, id: usize) {
        if self.visible.map(|v| v.id) == Some(id) {
            self.visible = None;
        }
    }

    /// Register every point of interest of `map`, in record order. Indices
    /// referenced by the records are checked here so an inconsistent
    /// dataset fails loudly instead of rendering undefined data.
    pub fn register_map(
        &mut self,
        map_id: u8,
        map: &MapRecord,
        data: &Dataset,
    ) -> Result<(), ViewerError> {
        let origin = map.coords.as_ref();

        for warp in &map.warps {
            if warp.to_map != crate::model::OVERWORLD_MAP_ID {
                // Validate the destination early; to_warp is resolved by
                // the destination map on click.
                data.map(warp.to_map)?;
            }
            self.push(
                hotspot_bounds(origin, warp.pos),
                Some(WarpTarget {
                    from_map: map_id,
                    to_map: warp.to_map,
                    to_warp: warp.to_warp,
                }),
                TooltipBody::Warp {
                    to_map: warp.to_map,
                    to_warp: warp.to_warp,
                },
            );
        }

        for sign in &map.signs {
            self.push(
                hotspot_bounds(origin, sign.pos),
                None,
                TooltipBody::Sign {
                    text: sign.text.clone(),
                },
            );
        }

        for entity in &map.entities {
            let tooltip = match &entity.data {
                EntityData::NormalPeople { text } => TooltipBody::Npc { text: text.clone() },
                EntityData::Trainer { class_id, team, .. } => {
                    let class = data.trainer_class(*class_id)?;
                    let last = team.last().ok_or_else(|| {
                        ViewerError::Lookup(format!("trainer class {class_id} has an empty team"))
                    })?;
                    for member in team {
                        data.pokemon(member.dex_id)?;
                    }
                    TooltipBody::Trainer {
                        name: class.name.clone(),
                        sprite_path: class.sprite_path.clone(),
                        payout: u32::from(class.base_money) * u32::from(last.level),
                        team: team.clone(),
                    }
                }
                EntityData::Pokemon { dex_id, level } => {
                    data.pokemon(*dex_id)?;
                    TooltipBody::Encounter {
                        dex_id: *dex_id,
                        level: *level,
                    }
                }
                EntityData::Item { name, text } => TooltipBody::Item {
                    name: name.clone(),
                    text: text.clone(),
                },
            };
            self.push(hotspot_bounds(origin, entity.pos), None, tooltip);
        }

        for hidden in &map.hiddens {
            self.push(
                hotspot_bounds(origin, hidden.pos),
                None,
                TooltipBody::Hidden {
                    content: hidden.content.clone(),
                },
            );
        }

        Ok(())
    }

    fn push(&mut self, bounds: PixelRect, warp: Option<WarpTarget>, tooltip: TooltipBody) {
        let id = self.hotspots.len();
        self.hotspots.push(Hotspot {
            id,
            bounds,
            warp,
            tooltip,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, Hidden, Sign, TilePos, Warp};
    use crate::state::testutil::{dataset, empty_map};

    fn npc(x: u8, y: u8) -> Entity {
        Entity {
            pos: TilePos(x, y),
            data: EntityData::NormalPeople { text: "Hi!".into() },
        }
    }

    #[test]
    fn ids_follow_warps_signs_entities_hiddens_order() {
        let mut map = empty_map();
        map.warps = vec![
            Warp {
                pos: TilePos(0, 0),
                to_map: 1,
                to_warp: 0,
            },
            Warp {
                pos: TilePos(1, 0),
                to_map: 1,
                to_warp: 1,
            },
        ];
        map.signs = vec![Sign {
            pos: TilePos(2, 0),
            text: "SIGN".into(),
        }];
        map.entities = vec![npc(3, 0), npc(4, 0), npc(5, 0)];
        map.hiddens = vec![Hidden {
            pos: TilePos(6, 0),
            content: Some("NUGGET".into()),
        }];
        let data = dataset(vec![Some(map.clone()), Some(empty_map())]);

        let mut reg = HotspotRegistry::new();
        reg.register_map(0, &map, &data).unwrap();

        let ids: Vec<usize> = reg.hotspots().iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5, 6]);
        assert!(matches!(reg.hotspots()[0].tooltip, TooltipBody::Warp { .. }));
        assert!(matches!(reg.hotspots()[2].tooltip, TooltipBody::Sign { .. }));
        assert!(matches!(reg.hotspots()[3].tooltip, TooltipBody::Npc { .. }));
        assert!(matches!(
            reg.hotspots()[6].tooltip,
            TooltipBody::Hidden { .. }
        ));
        // only warp regions are clickable
        assert!(reg.hotspots()[0].warp.is_some());
        assert!(reg.hotspots()[2].warp.is_none());
    }

    #[test]
    fn ids_continue_across_maps_and_reset_on_clear() {
        let mut first = empty_map();
        first.signs = vec![Sign {
            pos: TilePos(0, 0),
            text: "A".into(),
        }];
        let mut second = empty_map();
        second.signs = vec![Sign {
            pos: TilePos(1, 1),
            text: "B".into(),
        }];
        let data = dataset(vec![Some(first.clone()), Some(second.clone())]);

        let mut reg = HotspotRegistry::new();
        reg.register_map(0, &first, &data).unwrap();
        reg.register_map(1, &second, &data).unwrap();
        assert_eq!(reg.hotspots().len(), 2);
        assert_eq!(reg.hotspots()[1].id, 1);

        reg.clear();
        reg.register_map(1, &second, &data).unwrap();
        assert_eq!(reg.hotspots()[0].id, 0);
    }

    #[test]
    fn trainer_tooltip_computes_payout_from_last_member() {
        let mut map = empty_map();
        map.entities = vec![Entity {
            pos: TilePos(0, 0),
            data: EntityData::Trainer {
                class_id: 0,
                team: vec![
                    TeamMember {
                        level: 12,
                        dex_id: 1,
                    },
                    TeamMember {
                        level: 14,
                        dex_id: 2,
                    },
                    TeamMember {
                        level: 20,
                        dex_id: 3,
                    },
                ],
                text: None,
            },
        }];
        let data = dataset(vec![Some(map.clone())]);

        let mut reg = HotspotRegistry::new();
        reg.register_map(0, &map, &data).unwrap();
        match &reg.hotspots()[0].tooltip {
            TooltipBody::Trainer { payout, team, .. } => {
                assert_eq!(*payout, 600);
                assert_eq!(team.len(), 3);
            }
            other => panic!("expected trainer tooltip, got {other:?}"),
        }
    }

    #[test]
    fn invalid_indices_fail_loudly() {
        let mut bad_warp = empty_map();
        bad_warp.warps = vec![Warp {
            pos: TilePos(0, 0),
            to_map: 9,
            to_warp: 0,
        }];
        let data = dataset(vec![Some(bad_warp.clone())]);
        let mut reg = HotspotRegistry::new();
        assert!(matches!(
            reg.register_map(0, &bad_warp, &data),
            Err(ViewerError::Lookup(_))
        ));

        let mut bad_trainer = empty_map();
        bad_trainer.entities = vec![Entity {
            pos: TilePos(0, 0),
            data: EntityData::Trainer {
                class_id: 7,
                team: vec![TeamMember {
                    level: 5,
                    dex_id: 1,
                }],
                text: None,
            },
        }];
        let data = dataset(vec![Some(bad_trainer.clone())]);
        let mut reg = HotspotRegistry::new();
        assert!(reg.register_map(0, &bad_trainer, &data).is_err());

        let mut empty_team = empty_map();
        empty_team.entities = vec![Entity {
            pos: TilePos(0, 0),
            data: EntityData::Trainer {
                class_id: 0,
                team: Vec::new(),
                text: None,
            },
        }];
        let data = dataset(vec![Some(empty_team.clone())]);
        let mut reg = HotspotRegistry::new();
        assert!(reg.register_map(0, &empty_team, &data).is_err());
    }

    #[test]
    fn warp_to_overworld_sentinel_is_legal() {
        let mut map = empty_map();
        map.warps = vec![Warp {
            pos: TilePos(0, 0),
            to_map: crate::model::OVERWORLD_MAP_ID,
            to_warp: 2,
        }];
        let data = dataset(vec![Some(map.clone())]);
        let mut reg = HotspotRegistry::new();
        assert!(reg.register_map(0, &map, &data).is_ok());
    }

    #[test]
    fn show_offsets_tooltip_from_cursor() {
        let mut map = empty_map();
        map.signs = vec![Sign {
            pos: TilePos(0, 0),
            text: "A".into(),
        }];
        let data = dataset(vec![Some(map.clone())]);
        let mut reg = HotspotRegistry::new();
        reg.register_map(0, &map, &data).unwrap();

        let at = reg.show(0, (100.0, 50.0)).unwrap();
        assert_eq!((at.x, at.y), (110.0, 60.0));
        assert_eq!(reg.visible(), Some(at));

        // hiding a different id leaves the visible tooltip alone
        reg.hide(3);
        assert!(reg.visible().is_some());
        reg.hide(0);
        assert!(reg.visible().is_none());

        assert!(reg.show(99, (0.0, 0.0)).is_none());
    }
}

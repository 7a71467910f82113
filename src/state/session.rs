//! Map selection and rendering orchestration.
//!
//! `MapSession` is the DOM-free core of the map view: it decides which
//! picture to show, where the pan offset starts, and which hotspots exist.
//! The Yew component applies the returned `MapScene` to the document.

use crate::error::ViewerError;
use crate::model::{Dataset, OVERWORLD_MAP_ID};
use crate::state::coords::overworld_warp_offset;
use crate::state::hotspots::HotspotRegistry;
use crate::state::pan::PanController;

/// Everything the view needs to swap the displayed map.
#[derive(Clone, Debug, PartialEq)]
pub struct MapScene {
    /// Loaded map id; OVERWORLD_MAP_ID for the composite view.
    pub map_id: u8,
    /// Dataset-relative path of the picture to display.
    pub pic_path: String,
    /// Committed pan offset after the load.
    pub offset: (f64, f64),
}

pub struct MapSession {
    current_map: u8,
    /// Most recent map with a grid placement; anchors the overworld view
    /// when returning from an indoor map. None until a placed map is seen,
    /// so an overworld load before that fails loudly instead of rendering
    /// from an arbitrary default anchor.
    last_outside_map: Option<u8>,
    pub pan: PanController,
    pub registry: HotspotRegistry,
}

impl Default for MapSession {
    fn default() -> Self {
        Self {
            current_map: 0,
            last_outside_map: None,
            pan: PanController::new(),
            registry: HotspotRegistry::new(),
        }
    }
}

impl MapSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_map(&self) -> u8 {
        self.current_map
    }

    pub fn last_outside_map(&self) -> Option<u8> {
        self.last_outside_map
    }

    /// Load `map_id` (or the composite overworld for the 0xff sentinel),
    /// rebuilding every hotspot and resetting the pan offset. Hotspots are
    /// built into a fresh registry and swapped in on success; a failed
    /// load keeps the previous registry and pan offset.
    ///
    /// `cur_id` is the map the triggering warp belongs to; `warp_id`
    /// selects the anchor warp the overworld re-centers on. The anchor can
    /// go stale when a warp's true origin was overridden by world scripts
    /// outside the static dataset; that inherited limitation is kept.
    pub fn load_map(
        &mut self,
        data: &Dataset,
        cur_id: u8,
        map_id: u8,
        warp_id: u8,
    ) -> Result<MapScene, ViewerError> {
        if data.map(cur_id)?.coords.is_some() {
            self.last_outside_map = Some(cur_id);
        } else if map_id != OVERWORLD_MAP_ID && data.map(map_id)?.coords.is_some() {
            self.last_outside_map = Some(map_id);
        }

        if map_id == OVERWORLD_MAP_ID {
            let anchor_id = self.last_outside_map.ok_or_else(|| {
                ViewerError::Lookup("overworld requested with no anchor map".into())
            })?;
            let anchor = data.map(anchor_id)?;
            let origin = anchor.coords.as_ref().ok_or_else(|| {
                ViewerError::Lookup(format!("anchor map 0x{anchor_id:02x} has no grid placement"))
            })?;
            let warp = anchor.warps.get(warp_id as usize).ok_or_else(|| {
                ViewerError::Lookup(format!(
                    "anchor map 0x{anchor_id:02x} has no warp {warp_id}"
                ))
            })?;

            let mut registry = HotspotRegistry::new();
            for (id, slot) in data.maps.iter().enumerate() {
                let Some(map) = slot else { continue };
                if map.coords.is_none() {
                    continue;
                }
                registry.register_map(id as u8, map, data)?;
            }

            let (x, y) = overworld_warp_offset(origin, warp.pos, data.overworld.width);
            let offset = self.pan.reset(x, y);
            self.registry = registry;
            self.current_map = OVERWORLD_MAP_ID;
            Ok(MapScene {
                map_id: OVERWORLD_MAP_ID,
                pic_path: data.overworld.pic_path.clone(),
                offset,
            })
        } else {
            let map = data.map(map_id)?;
            let mut registry = HotspotRegistry::new();
            registry.register_map(map_id, map, data)?;
            let offset = self.pan.reset(0.0, 0.0);
            self.registry = registry;
            self.current_map = map_id;
            Ok(MapScene {
                map_id,
                pic_path: map.pic_path.clone(),
                offset,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MapCoords, Sign, TilePos, Warp};
    use crate::state::testutil::{dataset, empty_map};

    fn placed_map(x: i32, y: i32) -> crate::model::MapRecord {
        let mut map = empty_map();
        map.coords = Some(MapCoords { x, y });
        map.warps = vec![Warp {
            pos: TilePos(2, 3),
            to_map: 0,
            to_warp: 0,
        }];
        map
    }

    #[test]
    fn single_map_load_resets_pan_and_ids() {
        let mut indoor = empty_map();
        indoor.signs = vec![Sign {
            pos: TilePos(1, 1),
            text: "MART".into(),
        }];
        indoor.pic_path = "maps/map-09.png".into();
        let data = dataset(vec![Some(placed_map(0, 0)), Some(indoor)]);

        let mut session = MapSession::new();
        session.pan.reset(-100.0, -100.0);
        let scene = session.load_map(&data, 0, 1, 0).unwrap();

        assert_eq!(scene.pic_path, "maps/map-09.png");
        assert_eq!(scene.offset, (0.0, 0.0));
        assert_eq!(session.current_map(), 1);
        assert_eq!(session.registry.hotspots()[0].id, 0);
    }

    #[test]
    fn anchor_tracks_placed_maps_and_survives_indoor_hops() {
        let mut maps: Vec<Option<crate::model::MapRecord>> = (0..10).map(|_| None).collect();
        maps[0] = Some(placed_map(0, 0));
        maps[5] = Some(placed_map(4, 4));
        maps[9] = Some(empty_map()); // indoor
        let data = dataset(maps);

        let mut session = MapSession::new();
        // the anchor follows the map a load departs from
        session.load_map(&data, 0, 5, 0).unwrap();
        assert_eq!(session.last_outside_map(), Some(0));

        // load the overworld from map 5: anchor becomes 5
        session.load_map(&data, 5, 0xff, 0).unwrap();
        assert_eq!(session.last_outside_map(), Some(5));

        // hop into indoor map 9, then back out: anchor still 5
        session.load_map(&data, 5, 9, 0).unwrap();
        assert_eq!(session.last_outside_map(), Some(5));
        let scene = session.load_map(&data, 9, 0xff, 0).unwrap();
        assert_eq!(scene.pic_path, "maps/overworld.png");
        assert_eq!(session.last_outside_map(), Some(5));
        assert_eq!(session.current_map(), 0xff);
    }

    #[test]
    fn overworld_offset_recenters_on_anchor_warp() {
        let data = dataset(vec![Some(placed_map(10, 22))]);
        let mut session = MapSession::new();
        let scene = session.load_map(&data, 0, 0xff, 0).unwrap();
        // (10 + 2 - 10) * 16 = 32, (22 + 3 - 10) * 16 = 240, negated ×2
        assert_eq!(scene.offset, (-64.0, -480.0));
        assert_eq!(session.pan.offset(), scene.offset);
    }

    #[test]
    fn overworld_registers_only_placed_maps_with_continuing_ids() {
        let mut placed_a = placed_map(0, 0);
        placed_a.signs = vec![Sign {
            pos: TilePos(0, 0),
            text: "A".into(),
        }];
        let mut indoor = empty_map();
        indoor.signs = vec![Sign {
            pos: TilePos(0, 0),
            text: "SKIPPED".into(),
        }];
        let mut placed_b = placed_map(6, 6);
        placed_b.signs = vec![Sign {
            pos: TilePos(0, 0),
            text: "B".into(),
        }];
        let data = dataset(vec![Some(placed_a), Some(indoor), None, Some(placed_b)]);

        let mut session = MapSession::new();
        session.load_map(&data, 0, 0xff, 0).unwrap();

        // 2 warps + 2 signs from the placed maps; the indoor sign is skipped
        let ids: Vec<usize> = session.registry.hotspots().iter().map(|h| h.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }

    #[test]
    fn overworld_without_anchor_fails_explicitly() {
        // map 0 is indoor with a warp to placed map 1; loading the
        // overworld right after start has no anchor yet
        let mut indoor = empty_map();
        indoor.warps = vec![Warp {
            pos: TilePos(0, 0),
            to_map: 1,
            to_warp: 0,
        }];
        let data = dataset(vec![Some(indoor), Some(placed_map(3, 3))]);

        let mut session = MapSession::new();
        let err = session.load_map(&data, 0, 0xff, 0).unwrap_err();
        assert!(matches!(err, ViewerError::Lookup(_)));
        // nothing half-rendered
        assert!(session.registry.hotspots().is_empty());
    }

    #[test]
    fn failed_load_keeps_previous_view() {
        let mut placed = placed_map(0, 0);
        placed.signs = vec![Sign {
            pos: TilePos(1, 1),
            text: "A".into(),
        }];
        let data = dataset(vec![Some(placed)]);

        let mut session = MapSession::new();
        session.load_map(&data, 0, 0, 0).unwrap();
        assert_eq!(session.registry.hotspots().len(), 2);

        // map 3 has no record; the loaded map stays hoverable
        assert!(matches!(
            session.load_map(&data, 0, 3, 0),
            Err(ViewerError::Lookup(_))
        ));
        assert_eq!(session.registry.hotspots().len(), 2);
        assert_eq!(session.current_map(), 0);
        assert!(session.registry.show(1, (0.0, 0.0)).is_some());
    }

    #[test]
    fn missing_anchor_warp_fails_explicitly() {
        let mut placed = placed_map(0, 0);
        placed.warps.clear();
        let data = dataset(vec![Some(placed)]);
        let mut session = MapSession::new();
        assert!(matches!(
            session.load_map(&data, 0, 0xff, 0),
            Err(ViewerError::Lookup(_))
        ));
    }
}

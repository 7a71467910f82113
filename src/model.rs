//! Data model for the pre-generated dataset (`data.json`).
//! Everything here is read-only after parse and shared as `Rc<Dataset>`.

use serde::Deserialize;

use crate::error::ViewerError;

/// Reserved map id meaning "render the composite overworld".
pub const OVERWORLD_MAP_ID: u8 = 0xff;

/// Tile offset of a point of interest, relative to its map origin.
/// Serialized as a two-element array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct TilePos(pub u8, pub u8);

/// Tile-grid placement of a map within the overworld.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct MapCoords {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Warp {
    pub pos: TilePos,
    /// Destination map index; 0xff targets the overworld.
    pub to_map: u8,
    /// Index into the destination map's own warp list.
    pub to_warp: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Sign {
    pub pos: TilePos,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct TeamMember {
    pub level: u8,
    pub dex_id: u8,
}

/// Closed union over the entity kinds; exactly one variant per entity.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum EntityData {
    NormalPeople {
        text: String,
    },
    Trainer {
        class_id: u8,
        team: Vec<TeamMember>,
        text: Option<String>,
    },
    Pokemon {
        dex_id: u8,
        level: u8,
    },
    Item {
        name: String,
        text: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Entity {
    pub pos: TilePos,
    pub data: EntityData,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Hidden {
    pub pos: TilePos,
    /// None marks an unrevealed/special hidden spot.
    pub content: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct WildPokemon {
    pub dex_id: u8,
    pub level: u8,
    /// Encounter probability out of 255.
    pub proba: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct WildLocation {
    pub rate: u8,
    pub pokemons: Vec<WildPokemon>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct WildPokemons {
    pub grass: Option<WildLocation>,
    pub water: Option<WildLocation>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MapRecord {
    pub warps: Vec<Warp>,
    pub signs: Vec<Sign>,
    pub entities: Vec<Entity>,
    pub wild_pkmn: WildPokemons,
    pub hiddens: Vec<Hidden>,
    /// None for interior maps with no overworld placement.
    pub coords: Option<MapCoords>,
    pub width: u8,
    pub height: u8,
    pub pic_path: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct OverworldRecord {
    /// Grid width in tile units, used to center pan offsets.
    pub width: usize,
    pub height: usize,
    pub pic_path: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TrainerClass {
    pub name: String,
    pub sprite_path: String,
    /// Payout is base_money × level of the trainer's last team member.
    pub base_money: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum Evolution {
    Level { pkmn_id: u8, level: u8 },
    Stone { pkmn_id: u8, stone: String },
    Exchange { pkmn_id: u8 },
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PokemonRecord {
    pub name: String,
    pub species_name: String,
    pub types: Vec<String>,
    pub height: String,
    pub weight: String,
    pub desc: String,
    pub hp: u8,
    pub atk: u8,
    pub def: u8,
    pub spd: u8,
    pub spe: u8,
    pub cap: u8,
    pub exp: u8,
    /// (level, move name); level 0 means a native move.
    pub attacks: Vec<(u8, String)>,
    pub growth_rate: String,
    pub evolutions: Vec<Evolution>,
    /// (machine name, machine id).
    pub tmhm: Vec<(String, String)>,
    pub sprite_front_path: String,
    pub sprite_back_path: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Dataset {
    pub pokedex: Vec<PokemonRecord>,
    /// Absent slots are map ids the extractor could not resolve.
    pub maps: Vec<Option<MapRecord>>,
    pub overworld: OverworldRecord,
    pub trainers: Vec<TrainerClass>,
}

impl Dataset {
    /// Resolve a map id to its record, failing loudly on absent slots
    /// or out-of-range ids.
    pub fn map(&self, id: u8) -> Result<&MapRecord, ViewerError> {
        self.maps
            .get(id as usize)
            .and_then(|slot| slot.as_ref())
            .ok_or_else(|| ViewerError::Lookup(format!("no map record for id 0x{id:02x}")))
    }

    /// Resolve a 1-based dex id to its creature record.
    pub fn pokemon(&self, dex_id: u8) -> Result<&PokemonRecord, ViewerError> {
        dex_id
            .checked_sub(1)
            .and_then(|i| self.pokedex.get(i as usize))
            .ok_or_else(|| ViewerError::Lookup(format!("no pokedex entry for dex id {dex_id}")))
    }

    pub fn trainer_class(&self, class_id: u8) -> Result<&TrainerClass, ViewerError> {
        self.trainers
            .get(class_id as usize)
            .ok_or_else(|| ViewerError::Lookup(format!("no trainer class {class_id}")))
    }
}

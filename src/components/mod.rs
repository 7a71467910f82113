pub mod app;
pub mod map_view;
pub mod pkmn_box;
pub mod pokedex_view;

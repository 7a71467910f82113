pub mod coords;
pub mod dataset;
pub mod hotspots;
pub mod pan;
pub mod session;

pub use dataset::DatasetStore;
pub use hotspots::HotspotRegistry;
pub use pan::PanController;
pub use session::MapSession;

pub mod menu;
pub use menu::{MenuDataCache, MenuState};

pub mod search;
pub use search::{
    Navigator, RecordingNavigator, SearchController, SearchSession, SearchStatus, SearchVariant,
    SubmitOutcome,
};

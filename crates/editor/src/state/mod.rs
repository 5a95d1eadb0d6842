pub mod history;
pub mod selection;
pub mod settings;

pub use history::CommandHistory;
pub use selection::SelectionState;
pub use settings::{
    CameraSettings, EditSettings, EditorSettings, GridSettings, HistorySettings, PickSettings,
    ViewportSettings,
};

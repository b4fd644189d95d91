pub mod glossaries;
pub mod glossary_editor;
pub mod history;
pub mod styles;
pub mod translate;
pub mod widgets;

pub use glossaries::GlossariesView;
pub use glossary_editor::GlossaryEditorDialog;
pub use history::HistoryView;
pub use translate::TranslateView;
pub use widgets::{ConfirmDialog, LanguageSelect, ProgressBar, StatusBadge, StepIndicator};
